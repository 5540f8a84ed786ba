use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use presence_core::{submit_gated, InsightResult, ScoreSnapshot, SurveyInput, Wizard};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{
    map_rejection, map_submit_error, map_validation_error, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Serialize)]
pub(super) struct AnalysisData {
    rounded_score: u8,
    snapshot: ScoreSnapshot,
    insight: InsightResult,
}

/// Runs a complete survey through the wizard gates, stores it, and returns
/// the generated insights.
///
/// A second request for the same lead email while one is running gets a
/// `conflict`. Any upstream failure gets the generic notice.
pub(super) async fn create_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SurveyInput>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisData>>, ApiError> {
    let Json(input) = payload.map_err(|e| map_rejection(req_id.0.clone(), &e))?;

    let mut wizard =
        Wizard::from_input(input).map_err(|e| map_validation_error(req_id.0.clone(), &e))?;
    wizard
        .advance_to_review()
        .map_err(|e| map_validation_error(req_id.0.clone(), &e))?;

    let submission = submit_gated(
        &state.gate,
        state.store.as_ref(),
        state.insight.as_ref(),
        wizard.input(),
    )
    .await
    .map_err(|e| map_submit_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: AnalysisData {
            rounded_score: submission.snapshot.rounded_score(),
            snapshot: submission.snapshot,
            insight: submission.insight,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
