//! Dashboard DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DashboardData, FuelPrice, Tank};
use crate::interfaces::http::common::Notice;

/// One storage tank with its fuel type.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TankDto {
    pub tank_id: i32,
    pub current_level_liters: Decimal,
    pub capacity_liters: Decimal,
    pub fuel_type_id: i32,
    pub fuel_name: String,
}

impl TankDto {
    pub fn from_domain(tank: Tank) -> Self {
        Self {
            tank_id: tank.tank_id,
            current_level_liters: tank.current_level_liters,
            capacity_liters: tank.capacity_liters,
            fuel_type_id: tank.fuel_type_id,
            fuel_name: tank.fuel_name,
        }
    }
}

/// One fuel type with its current price per liter.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FuelPriceDto {
    pub fuel_type_id: i32,
    pub name: String,
    pub price_per_liter: Decimal,
}

impl FuelPriceDto {
    pub fn from_domain(fuel: FuelPrice) -> Self {
        Self {
            fuel_type_id: fuel.fuel_type_id,
            name: fuel.name,
            price_per_liter: fuel.price_per_liter,
        }
    }
}

/// The status view: tank levels, fuel prices, an optional carried-over
/// notice and any warnings raised while loading.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub tanks: Vec<TankDto>,
    pub fuels: Vec<FuelPriceDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    pub warnings: Vec<String>,
}

impl DashboardView {
    pub fn from_domain(data: DashboardData, notice: Option<Notice>) -> Self {
        Self {
            tanks: data.tanks.into_iter().map(TankDto::from_domain).collect(),
            fuels: data.fuels.into_iter().map(FuelPriceDto::from_domain).collect(),
            notice,
            warnings: data.warnings,
        }
    }

    /// Rendered when no connection could be acquired: empty listings plus a
    /// connectivity warning, never a failed request.
    pub fn unavailable(warning: String, notice: Option<Notice>) -> Self {
        Self {
            tanks: Vec::new(),
            fuels: Vec::new(),
            notice,
            warnings: vec![warning],
        }
    }
}
