//! Station repository interface
//!
//! The single seam between the HTTP layer and the database. One
//! implementation talks to PostgreSQL; tests substitute a stub.

use async_trait::async_trait;

use super::models::{DashboardData, ReportsData, RestockCommand, SaleCommand};
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Tank levels and fuel prices for the status view. `Err` only when no
    /// connection could be acquired; query failures degrade per section
    /// inside the data.
    async fn dashboard(&self) -> DomainResult<DashboardData>;

    /// The three fixed reports, executed in sequence on one connection.
    /// Same degradation contract as [`Self::dashboard`].
    async fn reports(&self) -> DomainResult<ReportsData>;

    /// Delegate a sale to the `process_sale` stored procedure inside an
    /// explicit transaction. `Rejected` carries the procedure's own message.
    async fn process_sale(&self, sale: SaleCommand) -> DomainResult<()>;

    /// Delegate a restock to the `restock_tank` stored procedure inside an
    /// explicit transaction.
    async fn restock_tank(&self, restock: RestockCommand) -> DomainResult<()>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> DomainResult<()>;
}
