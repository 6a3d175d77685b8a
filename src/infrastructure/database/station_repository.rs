//! SeaORM implementation of StationRepository
//!
//! The facade owns no schema: every read is a fixed SQL text and every write
//! is a `CALL` to a stored procedure that enforces the business rules. Each
//! operation acquires its own connection (single-connection pool, released on
//! drop) and writes run inside an explicit transaction.

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, QueryResult,
    RuntimeErr, Statement, TransactionTrait,
};
use tracing::{debug, warn};

use super::DatabaseConfig;
use crate::domain::{
    BigSpender, DashboardData, DomainError, DomainResult, FuelPrice, FuelRevenue, ReportsData,
    RestockCommand, SaleCommand, SaleRecord, StationRepository, Tank,
};

/// SQLSTATE assigned by PostgreSQL to `RAISE EXCEPTION` inside a procedure.
/// Errors carrying it are business-rule rejections, not plumbing failures.
const RAISE_EXCEPTION_SQLSTATE: &str = "P0001";

/// Error-class marker of the legacy SQL Server procedures (`RAISERROR` with a
/// user-defined error number). Only consulted by the textual fallback shim.
const LEGACY_RAISERROR_CODE: &str = "50000";

const TANK_STATUS_SQL: &str = "\
    SELECT t.tank_id, t.current_level_liters, t.capacity_liters, t.fuel_type_id, \
           f.name AS fuel_name \
    FROM tanks t JOIN fuel_types f ON t.fuel_type_id = f.fuel_type_id";

const FUEL_PRICES_SQL: &str =
    "SELECT fuel_type_id, name, current_price_per_liter FROM fuel_types";

const SALES_REPORT_SQL: &str = "\
    SELECT t.transaction_id, e.name AS employee_name, p.pump_number, \
           f.name AS fuel_type, t.liters_sold, t.total_amount, t.datetime AS sold_at \
    FROM transactions t \
    JOIN employees e ON t.employee_id = e.employee_id \
    JOIN pumps p ON t.pump_id = p.pump_id \
    JOIN fuel_types f ON p.fuel_type_id = f.fuel_type_id \
    ORDER BY t.datetime DESC";

const REVENUE_REPORT_SQL: &str = "\
    SELECT f.name AS fuel_type, SUM(t.total_amount) AS total_revenue, \
           SUM(t.liters_sold) AS total_liters, COUNT(t.transaction_id) AS sales_count \
    FROM transactions t \
    JOIN pumps p ON t.pump_id = p.pump_id \
    JOIN fuel_types f ON p.fuel_type_id = f.fuel_type_id \
    GROUP BY f.name ORDER BY total_revenue DESC";

const BIG_SPENDERS_SQL: &str = "\
    SELECT e.employee_id, e.name FROM employees e \
    WHERE e.employee_id IN ( \
        SELECT t.employee_id FROM transactions t \
        WHERE t.total_amount > (SELECT AVG(total_amount) FROM transactions))";

pub struct SeaOrmStationRepository {
    config: DatabaseConfig,
}

impl SeaOrmStationRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Open a fresh connection for one request. `max_connections(1)` keeps
    /// the per-request model: nothing is shared across requests, and dropping
    /// the handle releases the connection.
    async fn acquire(&self) -> DomainResult<DatabaseConnection> {
        let mut options = ConnectOptions::new(&self.config.url);
        options.max_connections(1);
        Database::connect(options)
            .await
            .map_err(|e| DomainError::Connection(e.to_string()))
    }

    async fn query_tanks(&self, db: &DatabaseConnection) -> DomainResult<Vec<Tank>> {
        let rows = db
            .query_all(Statement::from_string(DbBackend::Postgres, TANK_STATUS_SQL))
            .await
            .map_err(map_db_err)?;
        rows.iter().map(tank_from_row).collect()
    }

    async fn query_fuel_prices(&self, db: &DatabaseConnection) -> DomainResult<Vec<FuelPrice>> {
        let rows = db
            .query_all(Statement::from_string(DbBackend::Postgres, FUEL_PRICES_SQL))
            .await
            .map_err(map_db_err)?;
        rows.iter().map(fuel_price_from_row).collect()
    }

    async fn query_sales(&self, db: &DatabaseConnection) -> DomainResult<Vec<SaleRecord>> {
        let rows = db
            .query_all(Statement::from_string(DbBackend::Postgres, SALES_REPORT_SQL))
            .await
            .map_err(map_db_err)?;
        rows.iter().map(sale_record_from_row).collect()
    }

    async fn query_fuel_totals(&self, db: &DatabaseConnection) -> DomainResult<Vec<FuelRevenue>> {
        let rows = db
            .query_all(Statement::from_string(
                DbBackend::Postgres,
                REVENUE_REPORT_SQL,
            ))
            .await
            .map_err(map_db_err)?;
        rows.iter().map(fuel_revenue_from_row).collect()
    }

    async fn query_big_spenders(&self, db: &DatabaseConnection) -> DomainResult<Vec<BigSpender>> {
        let rows = db
            .query_all(Statement::from_string(DbBackend::Postgres, BIG_SPENDERS_SQL))
            .await
            .map_err(map_db_err)?;
        rows.iter().map(big_spender_from_row).collect()
    }

    /// Run one stored-procedure call inside an explicit transaction:
    /// commit on success, roll back on any failure.
    async fn call_procedure(&self, stmt: Statement) -> DomainResult<()> {
        let db = self.acquire().await?;
        let txn = db.begin().await.map_err(map_db_err)?;
        if let Err(e) = txn.execute(stmt).await {
            let err = map_db_err(e);
            if let Err(rb) = txn.rollback().await {
                warn!("rollback failed: {}", rb);
            }
            return Err(err);
        }
        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn dashboard(&self) -> DomainResult<DashboardData> {
        let db = self.acquire().await?;
        let mut data = DashboardData::default();

        match self.query_tanks(&db).await {
            Ok(tanks) => data.tanks = tanks,
            Err(e) => {
                warn!("tank status query failed: {}", e);
                data.warnings.push(format!("Error fetching tank levels: {}", e));
            }
        }
        match self.query_fuel_prices(&db).await {
            Ok(fuels) => data.fuels = fuels,
            Err(e) => {
                warn!("fuel price query failed: {}", e);
                data.warnings.push(format!("Error fetching fuel prices: {}", e));
            }
        }

        debug!(tanks = data.tanks.len(), fuels = data.fuels.len(), "dashboard loaded");
        Ok(data)
    }

    async fn reports(&self) -> DomainResult<ReportsData> {
        let db = self.acquire().await?;
        let mut data = ReportsData::default();

        match self.query_sales(&db).await {
            Ok(sales) => data.sales = sales,
            Err(e) => {
                warn!("sales report query failed: {}", e);
                data.warnings.push(format!("Sales report unavailable: {}", e));
            }
        }
        match self.query_fuel_totals(&db).await {
            Ok(totals) => data.fuel_totals = totals,
            Err(e) => {
                warn!("revenue report query failed: {}", e);
                data.warnings.push(format!("Revenue report unavailable: {}", e));
            }
        }
        match self.query_big_spenders(&db).await {
            Ok(spenders) => data.big_spenders = spenders,
            Err(e) => {
                warn!("big-spender report query failed: {}", e);
                data.warnings
                    .push(format!("Above-average spender report unavailable: {}", e));
            }
        }

        Ok(data)
    }

    async fn process_sale(&self, sale: SaleCommand) -> DomainResult<()> {
        debug!(pump_id = sale.pump_id, employee_id = sale.employee_id, "calling process_sale");
        self.call_procedure(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "CALL process_sale($1, $2, $3)",
            [
                sale.pump_id.into(),
                sale.employee_id.into(),
                sale.liters_sold.into(),
            ],
        ))
        .await
    }

    async fn restock_tank(&self, restock: RestockCommand) -> DomainResult<()> {
        debug!(tank_id = restock.tank_id, liters = restock.liters_added, "calling restock_tank");
        self.call_procedure(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "CALL restock_tank($1, $2)",
            [restock.tank_id.into(), restock.liters_added.into()],
        ))
        .await
    }

    async fn ping(&self) -> DomainResult<()> {
        let db = self.acquire().await?;
        db.execute(Statement::from_string(DbBackend::Postgres, "SELECT 1"))
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

// ── Row conversion helpers ──────────────────────────────────────

fn tank_from_row(row: &QueryResult) -> DomainResult<Tank> {
    Ok(Tank {
        tank_id: row.try_get("", "tank_id").map_err(map_db_err)?,
        current_level_liters: row.try_get("", "current_level_liters").map_err(map_db_err)?,
        capacity_liters: row.try_get("", "capacity_liters").map_err(map_db_err)?,
        fuel_type_id: row.try_get("", "fuel_type_id").map_err(map_db_err)?,
        fuel_name: row.try_get("", "fuel_name").map_err(map_db_err)?,
    })
}

fn fuel_price_from_row(row: &QueryResult) -> DomainResult<FuelPrice> {
    Ok(FuelPrice {
        fuel_type_id: row.try_get("", "fuel_type_id").map_err(map_db_err)?,
        name: row.try_get("", "name").map_err(map_db_err)?,
        price_per_liter: row
            .try_get("", "current_price_per_liter")
            .map_err(map_db_err)?,
    })
}

fn sale_record_from_row(row: &QueryResult) -> DomainResult<SaleRecord> {
    Ok(SaleRecord {
        transaction_id: row.try_get("", "transaction_id").map_err(map_db_err)?,
        employee_name: row.try_get("", "employee_name").map_err(map_db_err)?,
        pump_number: row.try_get("", "pump_number").map_err(map_db_err)?,
        fuel_type: row.try_get("", "fuel_type").map_err(map_db_err)?,
        liters_sold: row.try_get("", "liters_sold").map_err(map_db_err)?,
        total_amount: row.try_get("", "total_amount").map_err(map_db_err)?,
        sold_at: row.try_get("", "sold_at").map_err(map_db_err)?,
    })
}

fn fuel_revenue_from_row(row: &QueryResult) -> DomainResult<FuelRevenue> {
    Ok(FuelRevenue {
        fuel_type: row.try_get("", "fuel_type").map_err(map_db_err)?,
        total_revenue: row.try_get("", "total_revenue").map_err(map_db_err)?,
        total_liters: row.try_get("", "total_liters").map_err(map_db_err)?,
        sales_count: row.try_get("", "sales_count").map_err(map_db_err)?,
    })
}

fn big_spender_from_row(row: &QueryResult) -> DomainResult<BigSpender> {
    Ok(BigSpender {
        employee_id: row.try_get("", "employee_id").map_err(map_db_err)?,
        name: row.try_get("", "name").map_err(map_db_err)?,
    })
}

// ── Error classification ────────────────────────────────────────

fn map_db_err(e: DbErr) -> DomainError {
    if let Some(message) = procedure_rejection(&e) {
        return DomainError::Rejected(message);
    }
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DomainError::Connection(e.to_string()),
        other => DomainError::Unexpected(other.to_string()),
    }
}

/// Detect a business-rule rejection raised inside a stored procedure and
/// extract its human-readable message.
///
/// Primary path: the structured SQLSTATE reported by the driver. Fallback:
/// some drivers only surface a flattened bracketed text (the legacy ODBC
/// format, `[driver][driver][server]message`); for those the message is
/// whatever follows the bracketed prefix. The fallback splits on a fixed
/// delimiter and is known to misparse exotic message formats.
fn procedure_rejection(err: &DbErr) -> Option<String> {
    if let DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) = err {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some(RAISE_EXCEPTION_SQLSTATE) {
                return Some(db_err.message().to_string());
            }
        }
    }

    // Split the driver's own text, not the `DbErr` Display output: the
    // latter prepends "Query Error: " / "Execution Error: ", which would
    // shift the bracket segments.
    let text = match err {
        DbErr::Exec(inner) | DbErr::Query(inner) | DbErr::Conn(inner) => inner.to_string(),
        other => other.to_string(),
    };
    if text.contains(RAISE_EXCEPTION_SQLSTATE) || text.contains(LEGACY_RAISERROR_CODE) {
        return Some(bracketed_message(&text));
    }
    None
}

/// Legacy shim: take the text after the last `]` of the driver/server
/// prefix, falling back to the whole text when nothing follows it.
fn bracketed_message(text: &str) -> String {
    match text.rfind(']') {
        Some(pos) => {
            let tail = text[pos + 1..].trim();
            if tail.is_empty() {
                text.trim().to_string()
            } else {
                tail.to_string()
            }
        }
        None => text.trim().to_string(),
    }
}
