use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::config::{Config, DbConfig};
use crate::error::EtlError;
use crate::model::EnrichedSale;

/// How many rows to read back after the load, purely for display.
const PREVIEW_ROWS: u32 = 3;

/// A row as it exists in the table, surrogate key included. Used only for
/// the post-load preview.
#[derive(Debug, sqlx::FromRow)]
pub struct LoadedSale {
    pub id: i32,
    pub order_id: String,
    pub customer_name: String,
    pub product: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub date: NaiveDate,
    pub month: String,
}

/// Create the target database if it does not exist yet. Connects to the
/// server without selecting a database, so this works on a fresh install.
#[tracing::instrument(level = "info", skip(db), fields(database = %db.database))]
pub async fn ensure_database(db: &DbConfig) -> Result<(), EtlError> {
    let mut conn = db
        .server_options()
        .connect()
        .await
        .map_err(EtlError::Connect)?;
    sqlx::query(&format!(
        "CREATE DATABASE IF NOT EXISTS `{}`",
        db.database
    ))
    .execute(&mut conn)
    .await
    .map_err(EtlError::Sql)?;
    conn.close().await.map_err(EtlError::Sql)?;
    info!("database ready");
    Ok(())
}

/// Create the sales table (if absent), insert every row in input order inside
/// one transaction, then log the first few rows back out of the table.
///
/// The single commit after the last insert means a failed insert rolls back
/// the entire batch; there is no partially loaded state.
#[tracing::instrument(level = "info", skip_all, fields(table = %cfg.table, rows = rows.len()))]
pub async fn load(cfg: &Config, rows: &[EnrichedSale]) -> Result<(), EtlError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(cfg.db.connect_options())
        .await
        .map_err(EtlError::Connect)?;

    ensure_table(&pool, &cfg.table).await?;
    insert_all(&pool, &cfg.table, rows).await?;
    info!("loaded {} rows", rows.len());

    for row in preview(&pool, &cfg.table).await? {
        info!(
            id = row.id,
            order_id = %row.order_id,
            product = %row.product,
            total_amount = %row.total_amount,
            month = %row.month,
            "loaded row"
        );
    }

    pool.close().await;
    Ok(())
}

/// Idempotent: re-running against an existing table neither errors nor
/// touches existing rows.
pub async fn ensure_table(pool: &MySqlPool, table: &str) -> Result<(), EtlError> {
    sqlx::query(&create_table_sql(table))
        .execute(pool)
        .await
        .map_err(EtlError::Sql)?;
    Ok(())
}

async fn insert_all(pool: &MySqlPool, table: &str, rows: &[EnrichedSale]) -> Result<(), EtlError> {
    let sql = insert_sql(table);
    let mut tx = pool.begin().await.map_err(EtlError::Sql)?;
    for row in rows {
        debug!(order_id = %row.order_id, "inserting");
        sqlx::query(&sql)
            .bind(&row.order_id)
            .bind(&row.customer_name)
            .bind(&row.product)
            .bind(row.price)
            .bind(row.quantity)
            .bind(row.total_amount)
            .bind(row.date)
            .bind(&row.month)
            .execute(&mut *tx)
            .await
            .map_err(EtlError::Sql)?;
    }
    tx.commit().await.map_err(EtlError::Sql)?;
    Ok(())
}

async fn preview(pool: &MySqlPool, table: &str) -> Result<Vec<LoadedSale>, EtlError> {
    sqlx::query_as::<_, LoadedSale>(&format!(
        "SELECT id, order_id, customer_name, product, price, quantity, \
         total_amount, date, month FROM `{table}` ORDER BY id LIMIT {PREVIEW_ROWS}"
    ))
    .fetch_all(pool)
    .await
    .map_err(EtlError::Sql)
}

fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS `{table}` (
            id INT AUTO_INCREMENT PRIMARY KEY,
            order_id VARCHAR(50),
            customer_name VARCHAR(100),
            product VARCHAR(100),
            price DECIMAL(10,2),
            quantity INT,
            total_amount DECIMAL(10,2),
            date DATE,
            month VARCHAR(7)
        )"
    )
}

fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO `{table}` (order_id, customer_name, product, price, \
         quantity, total_amount, date, month) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ddl_is_guarded_and_complete() {
        let ddl = create_table_sql("processed_sales");
        assert!(ddl.contains("IF NOT EXISTS"));
        assert!(ddl.contains("AUTO_INCREMENT PRIMARY KEY"));
        for col in [
            "order_id",
            "customer_name",
            "product",
            "price",
            "quantity",
            "total_amount",
            "date",
            "month",
        ] {
            assert!(ddl.contains(col), "missing column {col}");
        }
    }

    #[test]
    fn insert_binds_eight_columns() {
        let sql = insert_sql("processed_sales");
        assert_eq!(sql.matches('?').count(), 8);
        assert!(!sql.contains("id,"), "surrogate key must not be bound");
    }
}
