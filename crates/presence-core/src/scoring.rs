//! Presence score: the founder's posting cadence and engagement measured
//! against the average of the competitors they named.

use serde::Serialize;

use crate::survey::SurveyInput;

/// Competitor average frequency assumed when no competitor is named.
pub const FALLBACK_COMPETITOR_FREQUENCY: f64 = 8.0;

/// Competitor average engagement assumed when no competitor is named.
pub const FALLBACK_COMPETITOR_ENGAGEMENT: f64 = 150.0;

/// Each axis contributes half of the score; parity on both axes is 100.
const AXIS_POINTS: f64 = 50.0;

pub const MAX_SCORE: f64 = 100.0;

/// Resolved weights and the final score for one survey.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub user_frequency_weight: f64,
    pub user_engagement_weight: f64,
    pub competitor_avg_frequency_weight: f64,
    pub competitor_avg_engagement_weight: f64,
    /// Always within `[0, 100]`.
    pub presence_score: f64,
}

impl ScoreSnapshot {
    /// Integer score as stored and displayed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_score(&self) -> u8 {
        // presence_score is clamped to [0, 100], so the cast cannot wrap.
        self.presence_score.round() as u8
    }

    #[must_use]
    pub fn frequency_ratio(&self) -> f64 {
        ratio(self.user_frequency_weight, self.competitor_avg_frequency_weight)
    }

    #[must_use]
    pub fn engagement_ratio(&self) -> f64 {
        ratio(
            self.user_engagement_weight,
            self.competitor_avg_engagement_weight,
        )
    }
}

/// Score a survey.
///
/// Only competitors with a non-blank name are averaged. With none, the
/// averages fall back to [`FALLBACK_COMPETITOR_FREQUENCY`] and
/// [`FALLBACK_COMPETITOR_ENGAGEMENT`]. The blended score is clamped to
/// `[0, 100]`.
#[must_use]
pub fn compute_snapshot(input: &SurveyInput) -> ScoreSnapshot {
    let user_frequency_weight = input.frequency.weight();
    let user_engagement_weight = input.engagement.weight();

    let (count, frequency_sum, engagement_sum) = input.valid_competitors().fold(
        (0_usize, 0.0_f64, 0.0_f64),
        |(n, freq, eng), c| (n + 1, freq + c.frequency.weight(), eng + c.engagement.weight()),
    );

    let (competitor_avg_frequency_weight, competitor_avg_engagement_weight) = if count == 0 {
        (FALLBACK_COMPETITOR_FREQUENCY, FALLBACK_COMPETITOR_ENGAGEMENT)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = count.max(1) as f64;
        (frequency_sum / denom, engagement_sum / denom)
    };

    let raw = ratio(user_frequency_weight, competitor_avg_frequency_weight) * AXIS_POINTS
        + ratio(user_engagement_weight, competitor_avg_engagement_weight) * AXIS_POINTS;

    ScoreSnapshot {
        user_frequency_weight,
        user_engagement_weight,
        competitor_avg_frequency_weight,
        competitor_avg_engagement_weight,
        presence_score: raw.clamp(0.0, MAX_SCORE),
    }
}

/// `user / average`, or parity when the average is exactly zero.
#[allow(clippy::float_cmp)]
fn ratio(user: f64, average: f64) -> f64 {
    if average == 0.0 {
        1.0
    } else {
        user / average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{CompetitorEntry, SurveyInput};
    use crate::vocab::{EngagementBucket, FrequencyBucket};

    fn survey(
        frequency: FrequencyBucket,
        engagement: EngagementBucket,
        competitors: Vec<CompetitorEntry>,
    ) -> SurveyInput {
        SurveyInput {
            frequency,
            engagement,
            competitors,
            ..SurveyInput::default()
        }
    }

    fn named(freq: FrequencyBucket, eng: EngagementBucket) -> CompetitorEntry {
        CompetitorEntry::named("Acme", freq, eng)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mid_founder_against_one_high_competitor() {
        let input = survey(
            FrequencyBucket::Mid,
            EngagementBucket::FiftyToHundred,
            vec![named(FrequencyBucket::High, EngagementBucket::HundredToTwoFifty)],
        );
        let snap = compute_snapshot(&input);

        assert_eq!(snap.user_frequency_weight, 4.0);
        assert_eq!(snap.user_engagement_weight, 75.0);
        assert_eq!(snap.competitor_avg_frequency_weight, 8.0);
        assert_eq!(snap.competitor_avg_engagement_weight, 175.0);
        assert!(approx(snap.frequency_ratio(), 0.5));
        let expected = 25.0 + 75.0 / 175.0 * 50.0;
        assert!(approx(snap.presence_score, expected), "got {}", snap.presence_score);
        assert!((snap.presence_score - 46.43).abs() < 0.01);
        assert_eq!(snap.rounded_score(), 46);
    }

    #[test]
    fn blank_competitors_fall_back_and_score_clamps() {
        let input = survey(
            FrequencyBucket::VeryHigh,
            EngagementBucket::OverTwoFifty,
            vec![CompetitorEntry::blank(), CompetitorEntry::initial()],
        );
        let snap = compute_snapshot(&input);

        assert_eq!(snap.competitor_avg_frequency_weight, FALLBACK_COMPETITOR_FREQUENCY);
        assert_eq!(snap.competitor_avg_engagement_weight, FALLBACK_COMPETITOR_ENGAGEMENT);
        assert!(approx(snap.frequency_ratio(), 1.5));
        assert!(approx(snap.engagement_ratio(), 2.0));
        assert_eq!(snap.presence_score, 100.0);
    }

    #[test]
    fn whitespace_names_are_not_valid_competitors() {
        let mut entry = named(FrequencyBucket::Idle, EngagementBucket::UnderTwenty);
        entry.name = "  \t ".into();
        let snap = compute_snapshot(&survey(
            FrequencyBucket::Mid,
            EngagementBucket::FiftyToHundred,
            vec![entry],
        ));
        assert_eq!(snap.competitor_avg_frequency_weight, 8.0);
        assert_eq!(snap.competitor_avg_engagement_weight, 150.0);
    }

    #[test]
    fn parity_scores_exactly_one_hundred() {
        let input = survey(
            FrequencyBucket::Low,
            EngagementBucket::TwentyToFifty,
            vec![named(FrequencyBucket::Low, EngagementBucket::TwentyToFifty)],
        );
        assert_eq!(compute_snapshot(&input).presence_score, 100.0);
    }

    #[test]
    fn idle_founder_scores_zero_on_frequency_axis() {
        let input = survey(
            FrequencyBucket::Idle,
            EngagementBucket::UnderTwenty,
            vec![named(FrequencyBucket::VeryHigh, EngagementBucket::OverTwoFifty)],
        );
        let snap = compute_snapshot(&input);
        assert_eq!(snap.frequency_ratio(), 0.0);
        // Engagement weights are never zero, so the lowest bucket still scores.
        assert!(approx(snap.presence_score, 10.0 / 300.0 * 50.0));
    }

    #[test]
    fn lowest_founder_buckets_against_highest_competitor_give_minimum_score() {
        let floor = compute_snapshot(&survey(
            FrequencyBucket::Idle,
            EngagementBucket::UnderTwenty,
            vec![named(FrequencyBucket::VeryHigh, EngagementBucket::OverTwoFifty)],
        ));
        assert!(approx(floor.presence_score, 10.0 / 300.0 * 50.0));
        assert_eq!(floor.rounded_score(), 2);

        for user_f in FrequencyBucket::ALL {
            for user_e in EngagementBucket::ALL {
                let input = survey(
                    user_f,
                    user_e,
                    vec![named(FrequencyBucket::VeryHigh, EngagementBucket::OverTwoFifty)],
                );
                assert!(compute_snapshot(&input).presence_score >= floor.presence_score);
            }
        }
    }

    #[test]
    fn double_competitor_output_clamps_to_one_hundred() {
        let input = survey(
            FrequencyBucket::VeryHigh,
            EngagementBucket::OverTwoFifty,
            vec![named(FrequencyBucket::Low, EngagementBucket::TwentyToFifty)],
        );
        assert_eq!(compute_snapshot(&input).presence_score, 100.0);
    }

    #[test]
    fn idle_competitors_short_circuit_frequency_ratio_to_parity() {
        let input = survey(
            FrequencyBucket::Mid,
            EngagementBucket::HundredToTwoFifty,
            vec![
                named(FrequencyBucket::Idle, EngagementBucket::HundredToTwoFifty),
                named(FrequencyBucket::Idle, EngagementBucket::HundredToTwoFifty),
            ],
        );
        let snap = compute_snapshot(&input);
        assert_eq!(snap.competitor_avg_frequency_weight, 0.0);
        assert_eq!(snap.frequency_ratio(), 1.0);
        assert_eq!(snap.presence_score, 100.0);
    }

    #[test]
    fn averages_only_over_named_competitors() {
        let input = survey(
            FrequencyBucket::Mid,
            EngagementBucket::FiftyToHundred,
            vec![
                named(FrequencyBucket::High, EngagementBucket::HundredToTwoFifty),
                CompetitorEntry::blank(),
                named(FrequencyBucket::VeryHigh, EngagementBucket::OverTwoFifty),
            ],
        );
        let snap = compute_snapshot(&input);
        assert_eq!(snap.competitor_avg_frequency_weight, 10.0);
        assert_eq!(snap.competitor_avg_engagement_weight, 237.5);
    }

    #[test]
    fn engagement_ratio_guard_treats_zero_average_as_parity() {
        assert_eq!(ratio(75.0, 0.0), 1.0);
    }

    #[test]
    fn score_stays_in_range_for_every_bucket_combination() {
        for user_f in FrequencyBucket::ALL {
            for user_e in EngagementBucket::ALL {
                for comp_f in FrequencyBucket::ALL {
                    for comp_e in EngagementBucket::ALL {
                        let input = survey(user_f, user_e, vec![named(comp_f, comp_e)]);
                        let score = compute_snapshot(&input).presence_score;
                        assert!(
                            (0.0..=MAX_SCORE).contains(&score),
                            "{user_f}/{user_e} vs {comp_f}/{comp_e} scored {score}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn snapshot_is_a_pure_function_of_input() {
        let input = survey(
            FrequencyBucket::Low,
            EngagementBucket::FiftyToHundred,
            vec![named(FrequencyBucket::Mid, EngagementBucket::TwentyToFifty)],
        );
        assert_eq!(compute_snapshot(&input), compute_snapshot(&input.clone()));
    }
}
