mod analyses;
mod survey;

use std::fmt::Display;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use presence_core::{SubmitError, SubmitGate};
use presence_insight::GeminiClient;
use presence_store::SupabaseStore;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub insight: Arc<GeminiClient>,
    pub store: Arc<SupabaseStore>,
    pub gate: SubmitGate,
}

impl AppState {
    pub fn new(insight: GeminiClient, store: SupabaseStore) -> Self {
        Self {
            insight: Arc::new(insight),
            store: Arc::new(store),
            gate: SubmitGate::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    insight_model: String,
    session_store: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Malformed JSON or a body that does not fit the survey shape.
pub(super) fn map_rejection(request_id: String, rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "rejected request body");
    ApiError::new(request_id, "validation_error", rejection.body_text())
}

pub(super) fn map_validation_error(request_id: String, error: &impl Display) -> ApiError {
    ApiError::new(request_id, "validation_error", error.to_string())
}

/// Submission failures are already logged with their cause; the response
/// only carries the user-facing notice.
pub(super) fn map_submit_error<P, I>(request_id: String, error: &SubmitError<P, I>) -> ApiError {
    let code = match error {
        SubmitError::InFlight(_) => "conflict",
        SubmitError::Persist(_) | SubmitError::Insight(_) => "internal_error",
    };
    ApiError::new(request_id, code, error.user_notice())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/options", get(survey::list_options))
        .route("/api/v1/score", post(survey::score_survey))
        .route("/api/v1/analyses", post(analyses::create_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            insight_model: state.insight.model().to_string(),
            session_store: if state.store.is_enabled() {
                "configured"
            } else {
                "disabled"
            },
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    pub(crate) fn app_with(insight_url: &str, store: SupabaseStore) -> Router {
        let insight = GeminiClient::with_base_url("test-key", "gemini-test", 5, insight_url)
            .expect("client construction should not fail");
        build_app(AppState::new(insight, store))
    }

    pub(crate) async fn send(
        app: Router,
        request: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    pub(crate) fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;

    use super::test_support::{app_with, send};
    use super::*;

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("validation_error", StatusCode::BAD_REQUEST),
            ("conflict", StatusCode::CONFLICT),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = ApiError::new("req-1", code, "msg").into_response();
            assert_eq!(response.status(), expected, "code {code}");
        }
    }

    #[test]
    fn submit_errors_surface_only_the_notice() {
        let error: SubmitError<std::io::Error, std::io::Error> =
            SubmitError::Insight(std::io::Error::other("quota exceeded for project 1234"));
        let api = map_submit_error("req-1".into(), &error);
        assert_eq!(api.error.code, "internal_error");
        assert_eq!(api.error.message, presence_core::FAILURE_NOTICE);
    }

    #[tokio::test]
    async fn health_reports_model_and_store_state() {
        let app = app_with("http://127.0.0.1:9", SupabaseStore::disabled());
        let (status, json) = send(
            app,
            Request::builder()
                .uri("/api/v1/health")
                .header(REQUEST_ID_HEADER, "req-health")
                .body(Body::empty())
                .expect("request"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["insight_model"], "gemini-test");
        assert_eq!(json["data"]["session_store"], "disabled");
        assert_eq!(json["meta"]["request_id"], "req-health");
    }
}
