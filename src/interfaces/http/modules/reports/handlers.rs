//! Report handlers

use axum::extract::State;
use axum::Json;
use tracing::warn;

use super::dto::ReportsView;
use crate::interfaces::http::router::AppState;

/// The three fixed reports: recent sales (join), revenue per fuel type
/// (aggregate) and above-average spenders (nested query).
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Join, aggregate and nested report tables", body = ReportsView)
    )
)]
pub async fn show_reports(State(state): State<AppState>) -> Json<ReportsView> {
    match state.repo.reports().await {
        Ok(data) => Json(ReportsView::from_domain(data)),
        Err(e) => {
            warn!("reports unavailable: {}", e);
            Json(ReportsView::unavailable(e.to_string()))
        }
    }
}
