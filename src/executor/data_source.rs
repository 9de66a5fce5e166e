use super::source::{ColumnInfo, QueryResult, QuerySource};
use super::value::CellValue;
use crate::config::PoolConfig;
use crate::error::{CityGridError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures::TryStreamExt;
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Executor, Row, Statement, TypeInfo, ValueRef};
use tracing::{debug, info, warn};

/// Pooled MySQL data source. Cloning shares the same pool.
#[derive(Clone)]
pub struct DataSource {
    pool: MySqlPool,
    url: String,
}

impl DataSource {
    /// Builds the pool and opens its first connection, so an unreachable host
    /// or bad credentials fail here rather than on first query.
    pub async fn connect(config: &PoolConfig) -> Result<Self> {
        config.validate()?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_pool_size)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(CityGridError::Connect)?;

        let url = config.url();
        info!(url = %url, max_connections = config.max_pool_size, "Connection pool ready");

        Ok(Self { pool, url })
    }
}

#[async_trait]
impl QuerySource for DataSource {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        if self.pool.is_closed() {
            return Err(CityGridError::SourceClosed);
        }

        let mut conn = self.pool.acquire().await?;

        // Preparing first gives the column metadata even for empty results.
        let statement = (&mut *conn).prepare(sql).await?;
        let columns: Vec<ColumnInfo> = statement
            .columns()
            .iter()
            .map(|c| ColumnInfo::new(c.name(), c.type_info().name()))
            .collect();
        for column in &columns {
            debug!(name = %column.name, column_type = %column.column_type, "Result column");
        }

        let mut rows = Vec::new();
        let mut stream = statement.query().fetch(&mut *conn);
        while let Some(row) = stream.try_next().await? {
            rows.push(decode_row(&row, &columns)?);
        }

        Ok(QueryResult { columns, rows })
    }

    async fn close(&self) {
        if self.pool.is_closed() {
            warn!(url = %self.url, "Connection pool already closed");
            return;
        }
        self.pool.close().await;
        info!(url = %self.url, "Connection pool closed");
    }

    fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

fn decode_row(row: &MySqlRow, columns: &[ColumnInfo]) -> Result<Vec<CellValue>> {
    (0..row.len())
        .map(|index| {
            decode_cell(row, index).map_err(|e| CityGridError::Decode {
                column: columns
                    .get(index)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| index.to_string()),
                message: e.to_string(),
            })
        })
        .collect()
}

fn decode_cell(row: &MySqlRow, index: usize) -> std::result::Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let type_name = raw.type_info().name().to_string();

    let typed = match type_name.as_str() {
        "BOOLEAN" => row.try_get::<bool, _>(index).map(CellValue::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<i64, _>(index).map(CellValue::Int)
        }
        name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(index).map(CellValue::UInt),
        "FLOAT" => row.try_get::<f32, _>(index).map(CellValue::from_f32),
        "DOUBLE" => row.try_get::<f64, _>(index).map(CellValue::Float),
        "DECIMAL" => row.try_get::<Decimal, _>(index).map(CellValue::Decimal),
        "DATE" => row.try_get::<NaiveDate, _>(index).map(CellValue::Date),
        "DATETIME" => row.try_get::<NaiveDateTime, _>(index).map(CellValue::DateTime),
        "TIMESTAMP" => row
            .try_get::<DateTime<Utc>, _>(index)
            .map(CellValue::Timestamp),
        "TIME" => row.try_get::<NaiveTime, _>(index).map(CellValue::Time),
        // Not accepted by the checked decoders.
        "YEAR" => row
            .try_get_unchecked::<u16, _>(index)
            .map(|v| CellValue::UInt(u64::from(v))),
        "BIT" => row.try_get_unchecked::<Vec<u8>, _>(index).map(CellValue::Bytes),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            row.try_get::<Vec<u8>, _>(index).map(CellValue::Bytes)
        }
        _ => row.try_get::<String, _>(index).map(CellValue::Text),
    };

    match typed {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!(index, type_name = %type_name, error = %err, "Falling back to text decode");
            text_fallback(row, index).ok_or(err)
        }
    }
}

// Negative or over-24h TIME values and the like still render as text.
fn text_fallback(row: &MySqlRow, index: usize) -> Option<CellValue> {
    if let Ok(text) = row.try_get_unchecked::<String, _>(index) {
        return Some(CellValue::Text(text));
    }
    row.try_get_unchecked::<Vec<u8>, _>(index)
        .ok()
        .map(|bytes| CellValue::Text(String::from_utf8_lossy(&bytes).into_owned()))
}
