//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path as UrlPath, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::cache::PlanId;
use crate::domain::TripPlanResult;
use crate::export::{EXPORT_FILE_NAME, ExportError, export_pdf};
use crate::map::MapView;
use crate::planner::{
    PlanTripRequest, PlannerError, RequestError, TripPlanResponse, convert_trip_plan,
};
use crate::render::LogBook;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Title embedded in exported documents.
const EXPORT_TITLE: &str = "ELD Daily Log Sheets";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/plan-trip", post(plan_trip))
        .route("/trip/:id/eld-log-sheet.pdf", get(export_stored_plan))
        .route("/api/export", post(export_posted_plan))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a trip and store the result for export.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let mut req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "unreadable trip request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    req.validate()?;

    info!(
        from = %req.current_location,
        pickup = %req.pickup_location,
        dropoff = %req.dropoff_location,
        cycle_hours = req.current_cycle_hours,
        "planning trip"
    );

    let plan = state.planner.plan_trip(&req).await?;
    let (plan_id, plan) = state.plans.insert(plan).await;
    info!(
        plan = %plan_id,
        days = plan.eld_logs.len(),
        cached_plans = state.plans.entry_count(),
        "trip planned"
    );

    if accepts_html(&headers) {
        let html = render_results(&state, plan_id, &plan)?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanTripResponse {
            plan_id,
            export_url: export_url(plan_id),
            plan: &plan,
        })
        .into_response())
    }
}

/// Render the map and day sheets of a plan as an HTML fragment.
fn render_results(
    state: &AppState,
    plan_id: PlanId,
    plan: &TripPlanResult,
) -> Result<String, AppError> {
    let map = MapView::from_plan(plan)
        .map(|view| MapPanel::from_view(&view))
        .transpose()
        .map_err(|e| AppError::Internal {
            message: format!("Map serialization error: {e}"),
        })?;

    let book = LogBook::render(&plan.eld_logs, &state.style);
    let template = TripResultsTemplate {
        plan_id: plan_dom_id(plan_id),
        export_url: export_url(plan_id),
        map,
        days: book.day_sheets().map(DaySheetView::from_sheet).collect(),
    };

    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Download the log sheets of a stored plan.
async fn export_stored_plan(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound {
        message: format!("Trip plan {id} not found or expired"),
    };
    let plan_id: PlanId = id.parse().map_err(|_| not_found())?;
    let plan = state.plans.get(plan_id).await.ok_or_else(not_found)?;

    export_response(&state, plan).await
}

/// Export a trip plan posted in the planner's JSON format.
async fn export_posted_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let response: TripPlanResponse =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        })?;
    let plan = convert_trip_plan(&response).map_err(|e| AppError::BadRequest {
        message: format!("invalid trip plan: {e}"),
    })?;

    export_response(&state, Arc::new(plan)).await
}

/// Render and export a plan. An empty plan gives `204 No Content`.
async fn export_response(
    state: &AppState,
    plan: Arc<TripPlanResult>,
) -> Result<Response, AppError> {
    let style = state.style;
    let export = state
        .exports
        .run(move || {
            let book = LogBook::render(&plan.eld_logs, &style);
            export_pdf(&book, EXPORT_TITLE)
        })
        .await?;

    let Some(export) = export else {
        info!("nothing to export");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        export.bytes,
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::Rejected { message, .. } => AppError::BadRequest { message },
            PlannerError::ApiError { status, body } => {
                warn!(status, body = %body, "planner failed");
                AppError::BadGateway {
                    message: "Failed to plan trip".to_string(),
                }
            }
            PlannerError::Http(e) => {
                warn!(error = %e, "planner request failed");
                AppError::BadGateway {
                    message: "planning service unreachable".to_string(),
                }
            }
            PlannerError::Json { message, .. } => AppError::BadGateway {
                message: format!("invalid trip plan: {message}"),
            },
            PlannerError::InvalidPlan(_) => AppError::BadGateway {
                message: e.to_string(),
            },
            PlannerError::Fixture(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: format!("export failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PlanCache;
    use crate::planner::{MockPlanner, PlanningBackend};

    async fn spawn_app() -> String {
        let planner = MockPlanner::new("data/mock_plan.json").unwrap();
        let state = AppState::new(PlanningBackend::Mock(planner), PlanCache::default());
        let app = create_router(state, "static");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn trip_request() -> serde_json::Value {
        serde_json::json!({
            "current_location": "Chicago, IL",
            "pickup_location": "Omaha, NE",
            "dropoff_location": "Denver, CO",
            "current_cycle_hours": 12
        })
    }

    #[test]
    fn accepts_html_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));
        headers.insert(header::ACCEPT, "text/html, */*".parse().unwrap());
        assert!(accepts_html(&headers));
    }

    #[test]
    fn planner_errors_map_to_status() {
        let status = |e: PlannerError| AppError::from(e).into_response().status();

        assert_eq!(
            status(PlannerError::Rejected {
                status: 400,
                message: "Could not geocode".into(),
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(PlannerError::ApiError {
                status: 500,
                body: String::new(),
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(PlannerError::Json {
                message: "eof".into(),
                body: None,
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(PlannerError::Fixture("gone".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn health_check() {
        let base = spawn_app().await;
        let body = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_page_has_form() {
        let base = spawn_app().await;
        let html = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
        assert!(html.contains("id=\"trip-form\""));
        assert!(html.contains("current_cycle_hours"));
    }

    #[tokio::test]
    async fn plan_then_export() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/api/plan-trip"))
            .json(&trip_request())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        let json: serde_json::Value = res.json().await.unwrap();
        assert_eq!(json["plan"]["eld_logs"][0]["date"], "2025-06-02");

        let export_url = json["export_url"].as_str().unwrap();
        let res = client.get(format!("{base}{export_url}")).send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"eld-log-sheet.pdf\""
        );
        assert!(res.bytes().await.unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn plan_as_html_fragment() {
        let base = spawn_app().await;
        let html = reqwest::Client::new()
            .post(format!("{base}/api/plan-trip"))
            .header(header::ACCEPT, "text/html")
            .json(&trip_request())
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("Date: 2025-06-02 (Monday)"));
        assert!(html.contains("Date: 2025-06-03 (Tuesday)"));
        assert!(html.contains("data-map="));
        assert!(html.contains("eld-log-sheet.pdf"));
        assert_eq!(html.matches("<svg").count(), 2);
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_locally() {
        let base = spawn_app().await;
        let mut request = trip_request();
        request["current_cycle_hours"] = serde_json::json!(80);

        let res = reqwest::Client::new()
            .post(format!("{base}/api/plan-trip"))
            .json(&request)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 400);
        let json: serde_json::Value = res.json().await.unwrap();
        assert!(json["error"].as_str().unwrap().contains("current_cycle_hours"));
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let base = spawn_app().await;
        for path in ["/trip/999/eld-log-sheet.pdf", "/trip/abc/eld-log-sheet.pdf"] {
            let res = reqwest::get(format!("{base}{path}")).await.unwrap();
            assert_eq!(res.status(), 404, "{path}");
        }
    }

    #[tokio::test]
    async fn posted_plan_export() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/api/export"))
            .json(&serde_json::json!({ "route": [], "stops": [], "eld_logs": [] }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 204);

        let plan = std::fs::read_to_string("data/mock_plan.json").unwrap();
        let res = client
            .post(format!("{base}/api/export"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(plan)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let res = client
            .post(format!("{base}/api/export"))
            .json(&serde_json::json!({ "route": [{ "lat": 95.0, "lng": 0.0 }] }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 400);
    }
}
