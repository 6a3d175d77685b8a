//! # Fuel Station Dashboard Service
//!
//! HTTP facade over a fuel-station database whose business rules live in
//! database-side stored procedures and triggers.
//!
//! ## Architecture
//!
//! - **domain**: entities, commands, errors and the repository trait
//! - **infrastructure**: SeaORM-backed database access
//! - **interfaces**: REST API with Swagger documentation
//!
//! The service never enforces inventory or capacity rules itself: sales and
//! restocks are delegated to the `process_sale` / `restock_tank` stored
//! procedures, and the facade only reports their outcome.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{DatabaseConfig, SeaOrmStationRepository};

// Re-export API router
pub use interfaces::http::{create_router, AppState};
