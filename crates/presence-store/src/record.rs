use presence_core::{
    CompetitorEntry, EngagementBucket, FrequencyBucket, ScoreSnapshot, SurveyInput, TopicSet,
};
use serde::Serialize;

/// One denormalized row of the session table.
///
/// Bucket and topic columns hold the vocabulary labels. `competitor_data`
/// holds the raw competitor list, blank rows included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub user_frequency: FrequencyBucket,
    pub user_engagement: EngagementBucket,
    pub user_topics: &'a TopicSet,
    pub competitor_topics: &'a TopicSet,
    pub competitor_data: &'a [CompetitorEntry],
    /// Rounded, not the float.
    pub presence_score: u8,
}

impl<'a> SessionRecord<'a> {
    #[must_use]
    pub fn new(input: &'a SurveyInput, snapshot: &ScoreSnapshot) -> Self {
        Self {
            full_name: &input.lead_info.name,
            email: &input.lead_info.email,
            phone: &input.lead_info.phone,
            user_frequency: input.frequency,
            user_engagement: input.engagement,
            user_topics: &input.user_topics,
            competitor_topics: &input.competitor_topics,
            competitor_data: &input.competitors,
            presence_score: snapshot.rounded_score(),
        }
    }
}
