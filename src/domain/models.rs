//! Domain models
//!
//! Read-only projections of database rows plus the two write commands.
//! Everything here is request-scoped: built fresh from a query result,
//! handed to the view, then dropped. Inventory and capacity invariants are
//! enforced by the database, not by these types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A storage tank joined with its fuel type.
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    pub tank_id: i32,
    pub current_level_liters: Decimal,
    pub capacity_liters: Decimal,
    pub fuel_type_id: i32,
    pub fuel_name: String,
}

/// A fuel type with its current unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPrice {
    pub fuel_type_id: i32,
    pub name: String,
    pub price_per_liter: Decimal,
}

/// Join-report row: one recorded sale across employee, pump and fuel type.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub transaction_id: i32,
    pub employee_name: String,
    pub pump_number: i32,
    pub fuel_type: String,
    pub liters_sold: Decimal,
    pub total_amount: Decimal,
    pub sold_at: DateTime<Utc>,
}

/// Aggregate-report row: revenue totals per fuel type.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelRevenue {
    pub fuel_type: String,
    pub total_revenue: Decimal,
    pub total_liters: Decimal,
    pub sales_count: i64,
}

/// Nested-report row: an employee with at least one transaction above the
/// all-time average amount.
#[derive(Debug, Clone, PartialEq)]
pub struct BigSpender {
    pub employee_id: i32,
    pub name: String,
}

/// Everything the status view needs. A failed section stays empty and adds
/// a warning; sections that did load still render.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub tanks: Vec<Tank>,
    pub fuels: Vec<FuelPrice>,
    pub warnings: Vec<String>,
}

/// The three report result sets, with the same per-section degradation as
/// [`DashboardData`].
#[derive(Debug, Clone, Default)]
pub struct ReportsData {
    pub sales: Vec<SaleRecord>,
    pub fuel_totals: Vec<FuelRevenue>,
    pub big_spenders: Vec<BigSpender>,
    pub warnings: Vec<String>,
}

/// Validated input for the `process_sale` stored procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleCommand {
    pub pump_id: i32,
    pub employee_id: i32,
    pub liters_sold: Decimal,
}

/// Validated input for the `restock_tank` stored procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct RestockCommand {
    pub tank_id: i32,
    pub liters_added: i32,
}
