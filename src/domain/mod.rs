//! Domain layer: entities, commands, errors and the repository seam.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{DomainError, DomainResult};
pub use models::{
    BigSpender, DashboardData, FuelPrice, FuelRevenue, ReportsData, RestockCommand, SaleCommand,
    SaleRecord, Tank,
};
pub use repository::StationRepository;
