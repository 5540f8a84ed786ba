//! `score` and `analyze` command handlers.

use std::path::Path;

use anyhow::Context;
use presence_core::{
    compute_snapshot, submit_analysis, CompetitorEntry, EngagementBucket, FrequencyBucket,
    SurveyInput, Wizard,
};
use presence_insight::GeminiClient;
use presence_store::SupabaseStore;

use crate::render::{render_dashboard, render_score};
use crate::survey_file::load_survey;

/// Builds a survey from `score` flags. Without any competitor the fallback
/// averages apply, so a single blank row stands in for the list.
pub(crate) fn survey_from_flags(
    frequency: FrequencyBucket,
    engagement: EngagementBucket,
    competitors: Vec<CompetitorEntry>,
) -> anyhow::Result<SurveyInput> {
    let competitors = if competitors.is_empty() {
        vec![CompetitorEntry::blank()]
    } else {
        competitors
    };
    let input = SurveyInput {
        frequency,
        engagement,
        competitors,
        ..SurveyInput::default()
    };
    input.check_bounds()?;
    Ok(input)
}

/// Score flags without storing anything or calling the insight API.
///
/// # Errors
///
/// Returns an error if more competitors are given than a survey allows.
pub(crate) fn run_score(
    frequency: FrequencyBucket,
    engagement: EngagementBucket,
    competitors: Vec<CompetitorEntry>,
    json: bool,
) -> anyhow::Result<()> {
    let input = survey_from_flags(frequency, engagement, competitors)?;
    let snapshot = compute_snapshot(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_score(&input, &snapshot));
    }
    Ok(())
}

/// Walks a survey file through the wizard, submits it, and prints the
/// dashboard.
///
/// The session is stored before insights are requested. With no store
/// configured the save is skipped.
///
/// # Errors
///
/// Returns an error if the file is unreadable, a step gate fails, the
/// configuration is incomplete, or the submission fails. Submission failures
/// carry only the user-facing notice; the cause is logged.
pub(crate) async fn run_analyze(path: &Path, json: bool) -> anyhow::Result<()> {
    let input = load_survey(path)?;
    tracing::debug!(
        path = %path.display(),
        competitors = input.competitors.len(),
        "survey loaded"
    );
    let mut wizard = Wizard::from_input(input)?;
    wizard
        .advance_to_review()
        .context("survey is not ready for analysis")?;

    let config = presence_core::load_app_config()?;
    let insight = GeminiClient::from_settings(&config.insight)
        .context("GEMINI_API_KEY is not set; cannot run analysis")?;
    let store = SupabaseStore::from_settings(&config.store)
        .context("failed to build session store")?;

    if !json {
        println!(
            "Thanks, {}. Calculating your competitive gap...",
            wizard.input().lead_info.first_name()
        );
    }

    let submission = submit_analysis(&store, &insight, wizard.input())
        .await
        .map_err(|e| anyhow::Error::msg(e.user_notice()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    let snapshot = submission.snapshot;
    wizard.complete(submission.insight)?;
    let analysis = wizard
        .analysis()
        .context("dashboard reached without an analysis")?;
    print!("{}", render_dashboard(wizard.input(), &snapshot, analysis));
    Ok(())
}
