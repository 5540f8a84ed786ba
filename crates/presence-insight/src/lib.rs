//! Narrative insights for a scored founder-presence survey, generated by
//! Gemini under a JSON response schema.

pub mod client;
pub mod error;
pub mod prompt;

mod types;

pub use client::GeminiClient;
pub use error::InsightError;
pub use prompt::build_prompt;
