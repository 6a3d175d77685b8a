//! Sale and restock handlers
//!
//! Both operations are fire-and-report: validate the form, call the stored
//! procedure through the repository, and redirect back to the status view
//! with a notice. No retries, no queueing; the procedure's own transaction
//! and trigger logic is the sole correctness mechanism.

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use tracing::{info, warn};

use super::dto::{RestockForm, SaleForm};
use crate::domain::{DomainError, RestockCommand, SaleCommand};
use crate::interfaces::http::common::Notice;
use crate::interfaces::http::router::AppState;

/// Record a sale via the `process_sale` stored procedure.
#[utoipa::path(
    post,
    path = "/process_sale",
    tag = "Operations",
    request_body(content = SaleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the status view with an outcome notice")
    )
)]
pub async fn process_sale(
    State(state): State<AppState>,
    Form(form): Form<SaleForm>,
) -> Redirect {
    let command: SaleCommand = match form.try_into() {
        Ok(command) => command,
        Err(e) => {
            warn!("sale rejected before reaching the database: {}", e);
            return Notice::error(e.to_string()).redirect();
        }
    };

    let notice = match state.repo.process_sale(command).await {
        Ok(()) => {
            info!("sale processed");
            Notice::success("Sale processed successfully. Inventory updated.")
        }
        Err(DomainError::Rejected(message)) => {
            warn!("sale rejected by procedure: {}", message);
            Notice::error(format!("Sale failed: {}", message))
        }
        Err(e) => {
            warn!("sale failed: {}", e);
            Notice::error(format!("An unexpected error occurred: {}", e))
        }
    };
    notice.redirect()
}

/// Add fuel to a tank via the `restock_tank` stored procedure. The
/// capacity-overflow check lives in the procedure; an overflow comes back as
/// a rejection notice.
#[utoipa::path(
    post,
    path = "/restock_tank",
    tag = "Operations",
    request_body(content = RestockForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the status view with an outcome notice")
    )
)]
pub async fn restock_tank(
    State(state): State<AppState>,
    Form(form): Form<RestockForm>,
) -> Redirect {
    let command: RestockCommand = match form.try_into() {
        Ok(command) => command,
        Err(e) => {
            warn!("restock rejected before reaching the database: {}", e);
            return Notice::error(e.to_string()).redirect();
        }
    };

    let tank_id = command.tank_id;
    let liters_added = command.liters_added;
    let notice = match state.repo.restock_tank(command).await {
        Ok(()) => {
            info!(tank_id, liters_added, "tank restocked");
            Notice::success(format!(
                "Tank {} restocked successfully by {}L.",
                tank_id, liters_added
            ))
        }
        Err(DomainError::Rejected(message)) => {
            warn!(tank_id, "restock rejected by procedure: {}", message);
            Notice::error(format!("Restock failed (capacity check): {}", message))
        }
        Err(e) => {
            warn!(tank_id, "restock failed: {}", e);
            Notice::error(format!("An unexpected error occurred: {}", e))
        }
    };
    notice.redirect()
}
