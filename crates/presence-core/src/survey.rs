//! Survey answers and the structural edits the wizard applies to them.
//!
//! Every edit takes `&self` and returns a new [`SurveyInput`]; nothing is
//! mutated in place. Nested edits (one field of one competitor) replace the
//! entry at its index in a copied list.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GateError, SurveyError};
use crate::vocab::{EngagementBucket, FrequencyBucket, Topic, TopicSet};

/// Upper bound on live competitor rows.
pub const MAX_COMPETITORS: usize = 5;

/// Opaque row identity, stable for the lifetime of a competitor entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(String);

impl CompetitorId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompetitorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorEntry {
    pub id: CompetitorId,
    /// Blank means "not filled in yet"; such rows are kept but not scored.
    pub name: String,
    pub frequency: FrequencyBucket,
    pub engagement: EngagementBucket,
}

impl CompetitorEntry {
    /// Defaults for a row added with "add another competitor".
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: CompetitorId::generate(),
            name: String::new(),
            frequency: FrequencyBucket::Mid,
            engagement: EngagementBucket::TwentyToFifty,
        }
    }

    /// Defaults for the single row a fresh survey starts with.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            id: CompetitorId::generate(),
            name: String::new(),
            frequency: FrequencyBucket::High,
            engagement: EngagementBucket::HundredToTwoFifty,
        }
    }

    #[must_use]
    pub fn named(name: &str, frequency: FrequencyBucket, engagement: EngagementBucket) -> Self {
        Self {
            id: CompetitorId::generate(),
            name: name.to_string(),
            frequency,
            engagement,
        }
    }

    /// Whether this row takes part in scoring.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A single-field edit to one competitor row.
#[derive(Debug, Clone, PartialEq)]
pub enum CompetitorEdit {
    Name(String),
    Frequency(FrequencyBucket),
    Engagement(EngagementBucket),
}

/// Which of the two topic sets an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicList {
    User,
    Competitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Email,
    Phone,
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadField::Name => write!(f, "full name"),
            LeadField::Email => write!(f, "email"),
            LeadField::Phone => write!(f, "phone"),
        }
    }
}

/// Lead-contact details collected before the analysis runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl LeadInfo {
    #[must_use]
    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Phone => &self.phone,
        }
    }

    /// First whitespace-separated word of the name, used in greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyInput {
    pub frequency: FrequencyBucket,
    pub engagement: EngagementBucket,
    #[serde(default)]
    pub user_topics: TopicSet,
    #[serde(default)]
    pub competitor_topics: TopicSet,
    pub competitors: Vec<CompetitorEntry>,
    #[serde(default)]
    pub lead_info: LeadInfo,
}

impl Default for SurveyInput {
    fn default() -> Self {
        Self {
            frequency: FrequencyBucket::Mid,
            engagement: EngagementBucket::FiftyToHundred,
            user_topics: TopicSet::new(),
            competitor_topics: TopicSet::new(),
            competitors: vec![CompetitorEntry::initial()],
            lead_info: LeadInfo::default(),
        }
    }
}

impl SurveyInput {
    #[must_use]
    pub fn with_frequency(&self, frequency: FrequencyBucket) -> Self {
        Self {
            frequency,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_engagement(&self, engagement: EngagementBucket) -> Self {
        Self {
            engagement,
            ..self.clone()
        }
    }

    /// Appends a blank competitor row and returns its id alongside the new survey.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::CompetitorLimit`] when [`MAX_COMPETITORS`] rows exist.
    pub fn with_competitor_added(&self) -> Result<(Self, CompetitorId), SurveyError> {
        if self.competitors.len() >= MAX_COMPETITORS {
            return Err(SurveyError::CompetitorLimit {
                max: MAX_COMPETITORS,
            });
        }
        let entry = CompetitorEntry::blank();
        let id = entry.id.clone();
        let mut competitors = self.competitors.clone();
        competitors.push(entry);
        Ok((
            Self {
                competitors,
                ..self.clone()
            },
            id,
        ))
    }

    /// # Errors
    ///
    /// Returns [`SurveyError::LastCompetitor`] if `id` is the only row left, or
    /// [`SurveyError::UnknownCompetitor`] if no row has that id.
    pub fn without_competitor(&self, id: &CompetitorId) -> Result<Self, SurveyError> {
        let index = self.competitor_index(id)?;
        if self.competitors.len() <= 1 {
            return Err(SurveyError::LastCompetitor);
        }
        let mut competitors = self.competitors.clone();
        competitors.remove(index);
        Ok(Self {
            competitors,
            ..self.clone()
        })
    }

    /// Applies `edit` to the row with `id`, replacing it at the same index.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::UnknownCompetitor`] if no row has that id.
    pub fn with_competitor_edit(
        &self,
        id: &CompetitorId,
        edit: CompetitorEdit,
    ) -> Result<Self, SurveyError> {
        let index = self.competitor_index(id)?;
        let current = &self.competitors[index];
        let replacement = match edit {
            CompetitorEdit::Name(name) => CompetitorEntry {
                name,
                ..current.clone()
            },
            CompetitorEdit::Frequency(frequency) => CompetitorEntry {
                frequency,
                ..current.clone()
            },
            CompetitorEdit::Engagement(engagement) => CompetitorEntry {
                engagement,
                ..current.clone()
            },
        };
        let mut competitors = self.competitors.clone();
        competitors[index] = replacement;
        Ok(Self {
            competitors,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_topic_toggled(&self, list: TopicList, topic: Topic) -> Self {
        match list {
            TopicList::User => Self {
                user_topics: self.user_topics.toggled(topic),
                ..self.clone()
            },
            TopicList::Competitor => Self {
                competitor_topics: self.competitor_topics.toggled(topic),
                ..self.clone()
            },
        }
    }

    #[must_use]
    pub fn with_lead_field(&self, field: LeadField, value: String) -> Self {
        let mut lead_info = self.lead_info.clone();
        match field {
            LeadField::Name => lead_info.name = value,
            LeadField::Email => lead_info.email = value,
            LeadField::Phone => lead_info.phone = value,
        }
        Self {
            lead_info,
            ..self.clone()
        }
    }

    /// Competitors with a non-blank name, in list order.
    pub fn valid_competitors(&self) -> impl Iterator<Item = &CompetitorEntry> {
        self.competitors.iter().filter(|c| c.is_valid())
    }

    /// Gate for leaving the competitor step: every row must be named.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::UnnamedCompetitor`] for the first blank row.
    pub fn competitor_gate(&self) -> Result<(), GateError> {
        match self.competitors.iter().position(|c| !c.is_valid()) {
            Some(index) => Err(GateError::UnnamedCompetitor {
                position: index + 1,
            }),
            None => Ok(()),
        }
    }

    /// Gate for leaving the contact step: name, email and phone are required.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingContactField`] for the first blank field.
    pub fn contact_gate(&self) -> Result<(), GateError> {
        [LeadField::Name, LeadField::Email, LeadField::Phone]
            .into_iter()
            .find(|&field| self.lead_info.get(field).trim().is_empty())
            .map_or(Ok(()), |field| Err(GateError::MissingContactField(field)))
    }

    /// Checks the list bounds that edits enforce, for surveys that arrive
    /// already built (deserialized from a request or a file).
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::CompetitorCount`] outside `1..=MAX_COMPETITORS`.
    pub fn check_bounds(&self) -> Result<(), SurveyError> {
        let count = self.competitors.len();
        if (1..=MAX_COMPETITORS).contains(&count) {
            Ok(())
        } else {
            Err(SurveyError::CompetitorCount {
                count,
                max: MAX_COMPETITORS,
            })
        }
    }

    fn competitor_index(&self, id: &CompetitorId) -> Result<usize, SurveyError> {
        self.competitors
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| SurveyError::UnknownCompetitor(id.clone()))
    }
}
