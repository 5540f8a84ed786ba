use thiserror::Error;

use crate::survey::{CompetitorId, LeadField};
use crate::wizard::Step;

/// A label that is not part of one of the fixed vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLabel {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Rejected edits to the competitor list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("at most {max} competitors can be benchmarked")]
    CompetitorLimit { max: usize },

    #[error("the last remaining competitor cannot be removed")]
    LastCompetitor,

    #[error("no competitor with id {0}")]
    UnknownCompetitor(CompetitorId),

    #[error("a survey needs between 1 and {max} competitors, got {count}")]
    CompetitorCount { count: usize, max: usize },
}

/// A step-advance gate that is not satisfied yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// `position` is 1-based, matching the "Competitor N" row labels.
    #[error("competitor {position} needs a name")]
    UnnamedCompetitor { position: usize },

    #[error("{0} is required")]
    MissingContactField(LeadField),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cannot leave {step}: {source}")]
    Gate {
        step: Step,
        #[source]
        source: GateError,
    },

    #[error("no step after {0}")]
    NoNextStep(Step),

    #[error("no step before {0}")]
    NoPreviousStep(Step),

    #[error("{0} is left by submitting the analysis")]
    SubmissionRequired(Step),

    #[error("an analysis can only be attached from {expected}, wizard is at {actual}")]
    NotReady { expected: Step, actual: Step },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
