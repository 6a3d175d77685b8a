//! Infrastructure layer: external concerns (database access).

pub mod database;

pub use database::{DatabaseConfig, SeaOrmStationRepository};
