use super::value::CellValue;
use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Everything a query produced. Columns are populated even when there are no
/// rows.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<CellValue>>,
}

#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Releases the underlying connections. Safe to call more than once.
    async fn close(&self);

    fn is_closed(&self) -> bool;
}
