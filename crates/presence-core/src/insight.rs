//! Narrative insight result and the seam to whatever produces it.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::scoring::ScoreSnapshot;
use crate::survey::SurveyInput;

/// Structured commentary generated for one scored survey.
///
/// Field names follow the JSON schema the generator is constrained to, so a
/// response that misses any of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub score_insight: String,
    /// Prompted for 3–4 items; the count is not enforced.
    pub opportunity_areas: Vec<String>,
    pub narrative_positioning: String,
    pub headline_suggestions: HeadlineSuggestions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineSuggestions {
    pub category_leadership: String,
    pub icp_clarity: String,
    pub bold_differentiation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlineStyle {
    CategoryLeadership,
    IcpClarity,
    BoldDifferentiation,
}

impl HeadlineStyle {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CategoryLeadership => "Category Leadership",
            Self::IcpClarity => "ICP Clarity",
            Self::BoldDifferentiation => "Bold Differentiation",
        }
    }
}

impl HeadlineSuggestions {
    /// The three headlines tagged by style, in display order.
    #[must_use]
    pub fn tagged(&self) -> [(HeadlineStyle, &str); 3] {
        [
            (HeadlineStyle::CategoryLeadership, self.category_leadership.as_str()),
            (HeadlineStyle::IcpClarity, self.icp_clarity.as_str()),
            (HeadlineStyle::BoldDifferentiation, self.bold_differentiation.as_str()),
        ]
    }
}

/// Produces narrative insights for a scored survey.
///
/// One request/response round trip; implementations must not retry and must
/// return failures as they happened.
pub trait InsightGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn generate(
        &self,
        input: &SurveyInput,
        snapshot: &ScoreSnapshot,
    ) -> impl Future<Output = Result<InsightResult, Self::Error>> + Send;
}
