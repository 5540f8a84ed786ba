//! Prompt text sent with every insight request.

use std::fmt::Write as _;

use presence_core::{ScoreSnapshot, SurveyInput, TopicSet};

/// Build the natural-language prompt for one scored survey.
///
/// Embeds the presence score, the founder's selections with their weights,
/// both competitor averages, and both topic sets.
#[must_use]
pub fn build_prompt(input: &SurveyInput, snapshot: &ScoreSnapshot) -> String {
    let mut prompt = String::from(
        "Analyze this LinkedIn founder presence data for a competitive presence benchmarking tool.\n\n",
    );

    prompt.push_str("DATA:\n");
    let _ = writeln!(
        prompt,
        "- Founder Presence Score: {}/100",
        format_number(snapshot.presence_score)
    );
    let _ = writeln!(
        prompt,
        "- Founder Frequency: {} posts/month (Numeric weight: {})",
        input.frequency,
        format_number(snapshot.user_frequency_weight)
    );
    let _ = writeln!(
        prompt,
        "- Founder Avg Engagement: {} (Numeric weight: {})",
        input.engagement,
        format_number(snapshot.user_engagement_weight)
    );
    let _ = writeln!(
        prompt,
        "- Competitor Avg Frequency weight: {}",
        format_number(snapshot.competitor_avg_frequency_weight)
    );
    let _ = writeln!(
        prompt,
        "- Competitor Avg Engagement weight: {}",
        format_number(snapshot.competitor_avg_engagement_weight)
    );
    let _ = writeln!(prompt, "- Founder Topics: {}", topics(&input.user_topics));
    let _ = writeln!(
        prompt,
        "- Competitor Topics: {}",
        topics(&input.competitor_topics)
    );

    prompt.push_str(
        "\nTONE:\nDirect, data-driven, slightly urgent, helpful, SaaS-premium.\n\n\
         REQUIRED OUTPUT:\n\
         1. A short insight about the presence score.\n\
         2. 3-4 bullet insights for opportunity areas (frequency gaps, visibility, narrative).\n\
         3. A narrative positioning recommendation (1 paragraph).\n\
         4. 3 headline styles: Category leadership, ICP clarity, and Bold differentiation.\n",
    );

    prompt
}

fn topics(set: &TopicSet) -> String {
    if set.is_empty() {
        "none selected".to_string()
    } else {
        set.joined()
    }
}

/// At most two decimals, without trailing zeros (`4`, `1.5`, `46.43`).
fn format_number(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
