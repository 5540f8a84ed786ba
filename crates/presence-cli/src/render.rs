//! Plain-text rendering of the options list, the score, and the dashboard.

use presence_core::{
    EngagementBucket, FrequencyBucket, InsightResult, ScoreSnapshot, SurveyInput, Topic,
    MAX_COMPETITORS,
};

const BAR_WIDTH: f64 = 30.0;

pub(crate) fn render_options() -> String {
    let mut lines = vec!["Posts per month:".to_string()];
    lines.extend(FrequencyBucket::ALL.iter().map(|b| format!("  {b}")));
    lines.push("Average engagement per post:".to_string());
    lines.extend(EngagementBucket::ALL.iter().map(|b| format!("  {b}")));
    lines.push("Content themes:".to_string());
    lines.extend(Topic::ALL.iter().map(|t| format!("  {t}")));
    lines.push(format!("Up to {MAX_COMPETITORS} competitors."));
    lines.join("\n") + "\n"
}

/// Score headline, comparison table and engagement gap.
pub(crate) fn render_score(input: &SurveyInput, snapshot: &ScoreSnapshot) -> String {
    let mut lines = vec![
        format!(
            "Founder Presence Score: {}/100",
            snapshot.rounded_score()
        ),
        String::new(),
    ];
    lines.extend(comparison_table(input));
    lines.push(String::new());
    lines.extend(engagement_gap(snapshot));
    lines.join("\n") + "\n"
}

pub(crate) fn render_dashboard(
    input: &SurveyInput,
    snapshot: &ScoreSnapshot,
    insight: &InsightResult,
) -> String {
    let mut lines = vec![
        "ANALYSIS DASHBOARD".to_string(),
        format!("Detailed breakdown for {}.", input.lead_info.name.trim()),
        String::new(),
    ];
    lines.push(render_score(input, snapshot).trim_end().to_string());
    lines.push(String::new());
    lines.push(format!("\"{}\"", insight.score_insight));
    lines.push(String::new());

    lines.push("KEY OPPORTUNITY AREAS".to_string());
    lines.extend(insight.opportunity_areas.iter().map(|a| format!("  - {a}")));
    lines.push(String::new());

    lines.push("POSITIONING RECOMMENDATION".to_string());
    lines.push(format!("  {}", insight.narrative_positioning));
    lines.push(String::new());

    lines.push("FOUNDER HEADLINE SUGGESTIONS".to_string());
    for (style, headline) in insight.headline_suggestions.tagged() {
        lines.push(format!("  {:<22}{headline}", style.label()));
    }

    lines.join("\n") + "\n"
}

/// You first, then every named competitor in list order.
fn comparison_table(input: &SurveyInput) -> Vec<String> {
    let mut rows = vec![format!("{:<24}{:<14}AVG ENGAGEMENT", "COMPANY", "FREQUENCY")];
    rows.push(format!(
        "{:<24}{:<14}{}",
        "You",
        format!("{} / mo", input.frequency),
        input.engagement
    ));
    rows.extend(input.valid_competitors().map(|c| {
        format!(
            "{:<24}{:<14}{}",
            truncate(c.name.trim(), 22),
            format!("{} / mo", c.frequency),
            c.engagement
        )
    }));
    rows
}

fn engagement_gap(snapshot: &ScoreSnapshot) -> Vec<String> {
    let you = snapshot.user_engagement_weight;
    let pack = snapshot.competitor_avg_engagement_weight;
    let max = you.max(pack);
    vec![
        "ENGAGEMENT GAP".to_string(),
        format!("  {:<16}{:<31}{you}", "You", bar(you, max)),
        format!("  {:<16}{:<31}{pack}", "Competitor Avg", bar(pack, max)),
    ]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    // value and max are non-negative weights and value <= max.
    let len = (value / max * BAR_WIDTH).round() as usize;
    "#".repeat(len)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars - 3).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use presence_core::{compute_snapshot, CompetitorEntry, HeadlineSuggestions};

    use super::*;

    fn survey() -> SurveyInput {
        SurveyInput {
            competitors: vec![
                CompetitorEntry::named(
                    "Acme",
                    FrequencyBucket::High,
                    EngagementBucket::HundredToTwoFifty,
                ),
                CompetitorEntry::blank(),
            ],
            ..SurveyInput::default()
        }
    }

    fn insight() -> InsightResult {
        InsightResult {
            score_insight: "Half the cadence of the pack.".into(),
            opportunity_areas: vec!["Post weekly".into(), "Tell customer stories".into()],
            narrative_positioning: "The operator founder.".into(),
            headline_suggestions: HeadlineSuggestions {
                category_leadership: "Building the hiring OS".into(),
                icp_clarity: "Hiring for seed teams".into(),
                bold_differentiation: "Resumes are dead".into(),
            },
        }
    }

    #[test]
    fn score_shows_rounded_value_and_named_competitors_only() {
        let input = survey();
        let text = render_score(&input, &compute_snapshot(&input));

        assert!(text.starts_with("Founder Presence Score: 46/100"));
        assert!(text.contains("You"));
        assert!(text.contains("3–5 / mo"));
        assert!(text.contains("Acme"));
        // Header, you, Acme. The blank row is not listed.
        let table_rows = text
            .lines()
            .skip(2)
            .take_while(|l| !l.is_empty())
            .count();
        assert_eq!(table_rows, 3);
    }

    #[test]
    fn engagement_gap_scales_bars_to_the_larger_side() {
        let input = survey();
        let lines = engagement_gap(&compute_snapshot(&input));
        assert!(lines[1].contains(&"#".repeat(13)));
        assert!(!lines[1].contains(&"#".repeat(14)));
        assert!(lines[2].contains(&"#".repeat(30)));
        assert!(lines[2].ends_with("175"));
    }

    #[test]
    fn dashboard_lists_insight_sections_in_order() {
        let mut input = survey();
        input.lead_info.name = "Jane Doe".into();
        let text = render_dashboard(&input, &compute_snapshot(&input), &insight());

        let order = [
            "Detailed breakdown for Jane Doe.",
            "Founder Presence Score: 46/100",
            "\"Half the cadence of the pack.\"",
            "KEY OPPORTUNITY AREAS",
            "  - Post weekly",
            "POSITIONING RECOMMENDATION",
            "FOUNDER HEADLINE SUGGESTIONS",
            "Category Leadership",
            "ICP Clarity",
            "Bold Differentiation",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn options_list_every_label() {
        let text = render_options();
        assert!(text.contains("  1–2"));
        assert!(text.contains("  250+ likes"));
        assert!(text.contains("  Leadership & Culture"));
        assert!(text.contains("Up to 5 competitors."));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("Short", 22), "Short");
        assert_eq!(truncate("A very long competitor name", 10), "A very ...");
    }
}
