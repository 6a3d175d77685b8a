//! Report DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BigSpender, FuelRevenue, ReportsData, SaleRecord};

/// Join-report row: a recorded sale with employee, pump and fuel context.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleRowDto {
    pub transaction_id: i32,
    pub employee_name: String,
    pub pump_number: i32,
    pub fuel_type: String,
    pub liters_sold: Decimal,
    pub total_amount: Decimal,
    pub sold_at: DateTime<Utc>,
}

impl SaleRowDto {
    pub fn from_domain(sale: SaleRecord) -> Self {
        Self {
            transaction_id: sale.transaction_id,
            employee_name: sale.employee_name,
            pump_number: sale.pump_number,
            fuel_type: sale.fuel_type,
            liters_sold: sale.liters_sold,
            total_amount: sale.total_amount,
            sold_at: sale.sold_at,
        }
    }
}

/// Aggregate-report row: totals per fuel type, sorted by revenue.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FuelRevenueDto {
    pub fuel_type: String,
    pub total_revenue: Decimal,
    pub total_liters: Decimal,
    pub sales_count: i64,
}

impl FuelRevenueDto {
    pub fn from_domain(revenue: FuelRevenue) -> Self {
        Self {
            fuel_type: revenue.fuel_type,
            total_revenue: revenue.total_revenue,
            total_liters: revenue.total_liters,
            sales_count: revenue.sales_count,
        }
    }
}

/// Nested-report row: an employee with at least one above-average sale.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BigSpenderDto {
    pub employee_id: i32,
    pub name: String,
}

impl BigSpenderDto {
    pub fn from_domain(spender: BigSpender) -> Self {
        Self {
            employee_id: spender.employee_id,
            name: spender.name,
        }
    }
}

/// The reports view: three independent tables plus any warnings raised
/// while loading. A failed section renders empty; the others still show.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportsView {
    pub sales: Vec<SaleRowDto>,
    pub fuel_totals: Vec<FuelRevenueDto>,
    pub big_spenders: Vec<BigSpenderDto>,
    pub warnings: Vec<String>,
}

impl ReportsView {
    pub fn from_domain(data: ReportsData) -> Self {
        Self {
            sales: data.sales.into_iter().map(SaleRowDto::from_domain).collect(),
            fuel_totals: data
                .fuel_totals
                .into_iter()
                .map(FuelRevenueDto::from_domain)
                .collect(),
            big_spenders: data
                .big_spenders
                .into_iter()
                .map(BigSpenderDto::from_domain)
                .collect(),
            warnings: data.warnings,
        }
    }

    pub fn unavailable(warning: String) -> Self {
        Self {
            sales: Vec::new(),
            fuel_totals: Vec::new(),
            big_spenders: Vec::new(),
            warnings: vec![warning],
        }
    }
}
