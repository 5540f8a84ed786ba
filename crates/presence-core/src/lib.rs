//! Founder presence survey: vocabularies, answers, scoring, the step wizard,
//! and the submission boundary shared by the server and the CLI.

pub mod app_config;
pub mod config;
pub mod error;
pub mod insight;
pub mod scoring;
pub mod submit;
pub mod survey;
pub mod vocab;
pub mod wizard;

pub use app_config::{AppConfig, Environment, InsightSettings, StoreSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, GateError, SurveyError, UnknownLabel, WizardError};
pub use insight::{HeadlineStyle, HeadlineSuggestions, InsightGenerator, InsightResult};
pub use scoring::{compute_snapshot, ScoreSnapshot};
pub use submit::{
    submit_analysis, submit_gated, SessionStore, SubmitError, SubmitGate, SubmitPermit,
    Submission, FAILURE_NOTICE,
};
pub use survey::{
    CompetitorEdit, CompetitorEntry, CompetitorId, LeadField, LeadInfo, SurveyInput, TopicList,
    MAX_COMPETITORS,
};
pub use vocab::{EngagementBucket, FrequencyBucket, Topic, TopicSet};
pub use wizard::{Step, Wizard};
