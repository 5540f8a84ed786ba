//! Fixed survey vocabularies: posting frequency, engagement, and topics.
//!
//! Labels are part of the wire format. They must match the options the
//! survey UI offers exactly (including the en dash in ranges such as `1–2`),
//! otherwise scoring and presentation disagree.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLabel;

/// Monthly post-count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrequencyBucket {
    #[serde(rename = "0")]
    Idle,
    #[serde(rename = "1–2")]
    Low,
    #[serde(rename = "3–5")]
    Mid,
    #[serde(rename = "6–10")]
    High,
    #[serde(rename = "10+")]
    VeryHigh,
}

impl FrequencyBucket {
    pub const ALL: [Self; 5] = [Self::Idle, Self::Low, Self::Mid, Self::High, Self::VeryHigh];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "0",
            Self::Low => "1–2",
            Self::Mid => "3–5",
            Self::High => "6–10",
            Self::VeryHigh => "10+",
        }
    }

    /// Midpoint-style weight used by the scoring engine.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Low => 1.5,
            Self::Mid => 4.0,
            Self::High => 8.0,
            Self::VeryHigh => 12.0,
        }
    }
}

impl fmt::Display for FrequencyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrequencyBucket {
    type Err = UnknownLabel;

    /// Accepts the exact label or the same range typed with an ASCII hyphen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().replace('-', "–");
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label() == canonical)
            .ok_or_else(|| UnknownLabel::new("frequency", s))
    }
}

/// Average per-post engagement range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EngagementBucket {
    #[serde(rename = "<20 likes")]
    UnderTwenty,
    #[serde(rename = "20–50 likes")]
    TwentyToFifty,
    #[serde(rename = "50–100 likes")]
    FiftyToHundred,
    #[serde(rename = "100–250 likes")]
    HundredToTwoFifty,
    #[serde(rename = "250+ likes")]
    OverTwoFifty,
}

impl EngagementBucket {
    pub const ALL: [Self; 5] = [
        Self::UnderTwenty,
        Self::TwentyToFifty,
        Self::FiftyToHundred,
        Self::HundredToTwoFifty,
        Self::OverTwoFifty,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UnderTwenty => "<20 likes",
            Self::TwentyToFifty => "20–50 likes",
            Self::FiftyToHundred => "50–100 likes",
            Self::HundredToTwoFifty => "100–250 likes",
            Self::OverTwoFifty => "250+ likes",
        }
    }

    /// Scalar weight used by the scoring engine. Never zero.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::UnderTwenty => 10.0,
            Self::TwentyToFifty => 35.0,
            Self::FiftyToHundred => 75.0,
            Self::HundredToTwoFifty => 175.0,
            Self::OverTwoFifty => 300.0,
        }
    }
}

impl fmt::Display for EngagementBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EngagementBucket {
    type Err = UnknownLabel;

    /// Accepts the exact label, an ASCII-hyphen spelling, and the range
    /// without the trailing `likes` (e.g. `"100-250"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut canonical = s.trim().replace('-', "–");
        if !canonical.ends_with(" likes") {
            canonical.push_str(" likes");
        }
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label() == canonical)
            .ok_or_else(|| UnknownLabel::new("engagement", s))
    }
}

/// Content theme a founder or their competitors post about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "Hiring / Recruiting")]
    Hiring,
    #[serde(rename = "Recruiting Operations")]
    RecruitingOperations,
    #[serde(rename = "AI & Automation")]
    AiAutomation,
    #[serde(rename = "Product Updates")]
    ProductUpdates,
    #[serde(rename = "Industry Insights")]
    IndustryInsights,
    #[serde(rename = "Founder Journey")]
    FounderJourney,
    #[serde(rename = "Customer Stories")]
    CustomerStories,
    #[serde(rename = "Fundraising")]
    Fundraising,
    #[serde(rename = "Leadership & Culture")]
    LeadershipCulture,
}

impl Topic {
    pub const ALL: [Self; 9] = [
        Self::Hiring,
        Self::RecruitingOperations,
        Self::AiAutomation,
        Self::ProductUpdates,
        Self::IndustryInsights,
        Self::FounderJourney,
        Self::CustomerStories,
        Self::Fundraising,
        Self::LeadershipCulture,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hiring => "Hiring / Recruiting",
            Self::RecruitingOperations => "Recruiting Operations",
            Self::AiAutomation => "AI & Automation",
            Self::ProductUpdates => "Product Updates",
            Self::IndustryInsights => "Industry Insights",
            Self::FounderJourney => "Founder Journey",
            Self::CustomerStories => "Customer Stories",
            Self::Fundraising => "Fundraising",
            Self::LeadershipCulture => "Leadership & Culture",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unordered, duplicate-free set of topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSet(BTreeSet<Topic>);

impl TopicSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `topic` removed if present, added otherwise.
    #[must_use]
    pub fn toggled(&self, topic: Topic) -> Self {
        let mut next = self.0.clone();
        if !next.remove(&topic) {
            next.insert(topic);
        }
        Self(next)
    }

    #[must_use]
    pub fn contains(&self, topic: Topic) -> bool {
        self.0.contains(&topic)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Topic> + '_ {
        self.0.iter().copied()
    }

    /// Labels joined with `", "`, as embedded in prompts and reports.
    #[must_use]
    pub fn joined(&self) -> String {
        self.iter().map(Topic::label).collect::<Vec<_>>().join(", ")
    }
}

impl FromIterator<Topic> for TopicSet {
    fn from_iter<T: IntoIterator<Item = Topic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
