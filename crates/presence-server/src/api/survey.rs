use axum::{extract::rejection::JsonRejection, Extension, Json};
use presence_core::{
    compute_snapshot, EngagementBucket, FrequencyBucket, ScoreSnapshot, Step, SurveyInput, Topic,
    MAX_COMPETITORS,
};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_rejection, map_validation_error, ApiError, ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct StepItem {
    number: usize,
    title: &'static str,
}

/// Everything a client needs to render the survey form.
#[derive(Debug, Serialize)]
pub(super) struct OptionsData {
    frequency: Vec<&'static str>,
    engagement: Vec<&'static str>,
    topics: Vec<&'static str>,
    max_competitors: usize,
    steps: Vec<StepItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScoreData {
    /// What the dashboard shows and the session table stores.
    rounded_score: u8,
    snapshot: ScoreSnapshot,
}

impl From<ScoreSnapshot> for ScoreData {
    fn from(snapshot: ScoreSnapshot) -> Self {
        Self {
            rounded_score: snapshot.rounded_score(),
            snapshot,
        }
    }
}

pub(super) async fn list_options(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<OptionsData>> {
    let data = OptionsData {
        frequency: FrequencyBucket::ALL.iter().map(|b| b.label()).collect(),
        engagement: EngagementBucket::ALL.iter().map(|b| b.label()).collect(),
        topics: Topic::ALL.iter().map(|t| t.label()).collect(),
        max_competitors: MAX_COMPETITORS,
        steps: Step::ALL
            .iter()
            .map(|s| StepItem {
                number: s.number(),
                title: s.title(),
            })
            .collect(),
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Scores a survey without storing it or generating insights. Blank
/// competitor rows are allowed here; they are simply not averaged.
pub(super) async fn score_survey(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SurveyInput>, JsonRejection>,
) -> Result<Json<ApiResponse<ScoreData>>, ApiError> {
    let Json(input) = payload.map_err(|e| map_rejection(req_id.0.clone(), &e))?;
    input
        .check_bounds()
        .map_err(|e| map_validation_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: compute_snapshot(&input).into(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
