//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::StationRepository;
use crate::interfaces::http::common::Notice;
use crate::interfaces::http::modules::{dashboard, health, reports, sales};

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn StationRepository>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(repo: Arc<dyn StationRepository>) -> Self {
        Self {
            repo,
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard::handlers::show_dashboard,
        sales::handlers::process_sale,
        sales::handlers::restock_tank,
        reports::handlers::show_reports,
        health::handlers::health_check,
    ),
    components(schemas(
        Notice,
        dashboard::dto::DashboardView,
        dashboard::dto::TankDto,
        dashboard::dto::FuelPriceDto,
        sales::dto::SaleForm,
        sales::dto::RestockForm,
        reports::dto::ReportsView,
        reports::dto::SaleRowDto,
        reports::dto::FuelRevenueDto,
        reports::dto::BigSpenderDto,
        health::handlers::HealthResponse,
        health::handlers::ComponentHealth,
    )),
    tags(
        (name = "Dashboard", description = "Tank levels and fuel prices"),
        (name = "Operations", description = "Sale and restock procedure calls"),
        (name = "Reports", description = "Fixed reporting queries"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Fuel Station Dashboard API",
        description = "HTTP facade over the fuel-station database; business rules live in stored procedures."
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::handlers::show_dashboard))
        .route("/process_sale", post(sales::handlers::process_sale))
        .route("/restock_tank", post(sales::handlers::restock_tank))
        .route("/reports", get(reports::handlers::show_reports))
        .route("/health", get(health::handlers::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{
        DashboardData, DomainError, DomainResult, FuelPrice, ReportsData, RestockCommand,
        SaleCommand, Tank,
    };

    /// In-memory repository double. `connected = false` simulates an
    /// unreachable database; write results are configurable per test.
    struct StubRepository {
        connected: bool,
        dashboard: DashboardData,
        reports: ReportsData,
        sale_result: DomainResult<()>,
        restock_result: DomainResult<()>,
        write_calls: AtomicUsize,
        last_sale: Mutex<Option<SaleCommand>>,
    }

    impl Default for StubRepository {
        fn default() -> Self {
            Self {
                connected: true,
                dashboard: DashboardData::default(),
                reports: ReportsData::default(),
                sale_result: Ok(()),
                restock_result: Ok(()),
                write_calls: AtomicUsize::new(0),
                last_sale: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl crate::domain::StationRepository for StubRepository {
        async fn dashboard(&self) -> DomainResult<DashboardData> {
            if !self.connected {
                return Err(DomainError::Connection("connection refused".to_string()));
            }
            Ok(self.dashboard.clone())
        }

        async fn reports(&self) -> DomainResult<ReportsData> {
            if !self.connected {
                return Err(DomainError::Connection("connection refused".to_string()));
            }
            Ok(self.reports.clone())
        }

        async fn process_sale(&self, sale: SaleCommand) -> DomainResult<()> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_sale.lock().unwrap() = Some(sale);
            self.sale_result.clone()
        }

        async fn restock_tank(&self, _restock: RestockCommand) -> DomainResult<()> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            self.restock_result.clone()
        }

        async fn ping(&self) -> DomainResult<()> {
            if !self.connected {
                return Err(DomainError::Connection("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn router_with(stub: Arc<StubRepository>) -> Router {
        create_router(AppState::new(stub))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("valid JSON")
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn location(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .expect("Location header")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn dashboard_renders_tanks_and_fuels() {
        let stub = Arc::new(StubRepository {
            dashboard: DashboardData {
                tanks: vec![Tank {
                    tank_id: 1,
                    current_level_liters: Decimal::new(9500, 0),
                    capacity_liters: Decimal::new(10000, 0),
                    fuel_type_id: 2,
                    fuel_name: "Diesel".to_string(),
                }],
                fuels: vec![FuelPrice {
                    fuel_type_id: 2,
                    name: "Diesel".to_string(),
                    price_per_liter: Decimal::new(189, 2),
                }],
                warnings: vec![],
            },
            ..Default::default()
        });

        let response = router_with(stub)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["tanks"][0]["tank_id"], 1);
        assert_eq!(body["tanks"][0]["fuel_name"], "Diesel");
        assert_eq!(body["fuels"][0]["price_per_liter"], "1.89");
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dashboard_echoes_notice_from_query() {
        let stub = Arc::new(StubRepository::default());
        let response = router_with(stub)
            .oneshot(
                Request::builder()
                    .uri("/?kind=success&notice=Sale+processed+successfully.")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["notice"]["kind"], "success");
        assert_eq!(body["notice"]["message"], "Sale processed successfully.");
    }

    #[tokio::test]
    async fn dashboard_survives_unreachable_database() {
        let stub = Arc::new(StubRepository {
            connected: false,
            ..Default::default()
        });
        let response = router_with(stub)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["tanks"].as_array().unwrap().is_empty());
        assert!(body["fuels"].as_array().unwrap().is_empty());
        let warnings = body["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0]
            .as_str()
            .unwrap()
            .contains("database connection failed"));
    }

    #[tokio::test]
    async fn non_numeric_sale_never_reaches_repository() {
        let stub = Arc::new(StubRepository::default());
        let response = router_with(Arc::clone(&stub))
            .oneshot(form_request(
                "/process_sale",
                "pump_id=two&employee_id=7&liters_sold=12.5",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = location(&response);
        assert!(location.starts_with("/?"));
        assert!(location.contains("kind=error"));
        assert_eq!(stub.write_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn incomplete_sale_form_redirects_with_validation_notice() {
        // A missing field gets the same notice-and-redirect treatment as a
        // non-numeric one, not a bare extractor rejection.
        let stub = Arc::new(StubRepository::default());
        let response = router_with(Arc::clone(&stub))
            .oneshot(form_request("/process_sale", "pump_id=2&employee_id=7"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = location(&response);
        assert!(location.contains("kind=error"));
        assert!(location.contains("Invalid+input"));
        assert_eq!(stub.write_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_sale_is_forwarded_and_reported() {
        let stub = Arc::new(StubRepository::default());
        let response = router_with(Arc::clone(&stub))
            .oneshot(form_request(
                "/process_sale",
                "pump_id=2&employee_id=7&liters_sold=12.5",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).contains("kind=success"));
        assert_eq!(stub.write_calls.load(Ordering::SeqCst), 1);
        let sale = stub.last_sale.lock().unwrap().clone().unwrap();
        assert_eq!(
            sale,
            SaleCommand {
                pump_id: 2,
                employee_id: 7,
                liters_sold: Decimal::new(125, 1),
            }
        );
    }

    #[tokio::test]
    async fn procedure_rejection_surfaces_verbatim_in_notice() {
        let stub = Arc::new(StubRepository {
            restock_result: Err(DomainError::Rejected(
                "Restock exceeds tank capacity".to_string(),
            )),
            ..Default::default()
        });
        let response = router_with(stub)
            .oneshot(form_request("/restock_tank", "tank_id=1&liters_added=600"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = location(&response);
        assert!(location.contains("kind=error"));
        assert!(location.contains("Restock+exceeds+tank+capacity"));
    }

    #[tokio::test]
    async fn reports_render_partial_results_with_warnings() {
        let stub = Arc::new(StubRepository {
            reports: ReportsData {
                sales: vec![crate::domain::SaleRecord {
                    transaction_id: 10,
                    employee_name: "Ava".to_string(),
                    pump_number: 3,
                    fuel_type: "Petrol 95".to_string(),
                    liters_sold: Decimal::new(40, 0),
                    total_amount: Decimal::new(7560, 2),
                    sold_at: Utc::now(),
                }],
                fuel_totals: vec![],
                big_spenders: vec![],
                warnings: vec!["Revenue report unavailable: timeout".to_string()],
            },
            ..Default::default()
        });
        let response = router_with(stub)
            .oneshot(
                Request::builder()
                    .uri("/reports")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["sales"][0]["employee_name"], "Ava");
        assert!(body["fuel_totals"].as_array().unwrap().is_empty());
        assert_eq!(body["warnings"][0], "Revenue report unavailable: timeout");
    }

    #[tokio::test]
    async fn reports_survive_unreachable_database() {
        let stub = Arc::new(StubRepository {
            connected: false,
            ..Default::default()
        });
        let response = router_with(stub)
            .oneshot(
                Request::builder()
                    .uri("/reports")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["sales"].as_array().unwrap().is_empty());
        assert!(body["fuel_totals"].as_array().unwrap().is_empty());
        assert!(body["big_spenders"].as_array().unwrap().is_empty());
        let warnings = body["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0]
            .as_str()
            .unwrap()
            .contains("database connection failed"));
    }

    #[tokio::test]
    async fn health_reports_database_outage() {
        let stub = Arc::new(StubRepository {
            connected: false,
            ..Default::default()
        });
        let response = router_with(stub)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"]["status"], "down");
    }
}
