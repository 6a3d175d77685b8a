//! Dashboard handlers

use axum::extract::{Query, State};
use axum::Json;
use tracing::warn;

use super::dto::DashboardView;
use crate::interfaces::http::common::NoticeParams;
use crate::interfaces::http::router::AppState;

/// Status view: current tank levels and fuel prices.
///
/// When the database is unreachable the view still renders, with empty
/// listings and a connectivity warning.
#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    params(NoticeParams),
    responses(
        (status = 200, description = "Tank and fuel-type listings", body = DashboardView)
    )
)]
pub async fn show_dashboard(
    State(state): State<AppState>,
    Query(params): Query<NoticeParams>,
) -> Json<DashboardView> {
    let notice = params.into_notice();
    match state.repo.dashboard().await {
        Ok(data) => Json(DashboardView::from_domain(data, notice)),
        Err(e) => {
            warn!("dashboard unavailable: {}", e);
            Json(DashboardView::unavailable(e.to_string(), notice))
        }
    }
}
