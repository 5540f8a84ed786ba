//! Survey input from the command line: competitor flags and survey files.

use std::path::Path;

use anyhow::Context;
use presence_core::{CompetitorEntry, EngagementBucket, FrequencyBucket, SurveyInput};

/// Parses `NAME:FREQUENCY:ENGAGEMENT`.
///
/// The name is everything before the last two colons, so names may contain
/// colons themselves. Bucket labels accept the ASCII-hyphen spellings.
pub(crate) fn parse_competitor(raw: &str) -> Result<CompetitorEntry, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(engagement), Some(frequency), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "expected NAME:FREQUENCY:ENGAGEMENT (e.g. \"Acme:6-10:100-250\"), got {raw:?}"
        ));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("competitor name must not be empty".to_string());
    }
    let frequency: FrequencyBucket = frequency.trim().parse().map_err(|e| format!("{e}"))?;
    let engagement: EngagementBucket = engagement.trim().parse().map_err(|e| format!("{e}"))?;

    Ok(CompetitorEntry::named(name, frequency, engagement))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SurveyFormat {
    Json,
    Yaml,
}

impl SurveyFormat {
    /// Chosen by extension; anything that is not `.yaml`/`.yml` is read as JSON.
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

pub(crate) fn parse_survey(contents: &str, format: SurveyFormat) -> anyhow::Result<SurveyInput> {
    match format {
        SurveyFormat::Json => {
            serde_json::from_str(contents).context("survey file is not a valid JSON survey")
        }
        SurveyFormat::Yaml => {
            serde_yaml::from_str(contents).context("survey file is not a valid YAML survey")
        }
    }
}

/// Reads and parses a survey file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a survey.
pub(crate) fn load_survey(path: &Path) -> anyhow::Result<SurveyInput> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read survey file {}", path.display()))?;
    parse_survey(&contents, SurveyFormat::from_path(path))
        .with_context(|| format!("in {}", path.display()))
}
