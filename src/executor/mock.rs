use super::source::{ColumnInfo, QueryResult, QuerySource};
use super::value::CellValue;
use crate::error::{CityGridError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

enum MockResponse {
    Rows(QueryResult),
    Fail(String),
}

/// In-memory source that answers every query with a canned result.
pub struct MockSource {
    response: MockResponse,
    closed: AtomicBool,
    close_calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn with_result(result: QueryResult) -> Self {
        Self::new(MockResponse::Rows(result))
    }

    pub fn with_rows(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Self {
        let columns = columns
            .iter()
            .map(|name| ColumnInfo::new(*name, "VARCHAR"))
            .collect();
        Self::with_result(QueryResult { columns, rows })
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(MockResponse::Fail(reason.into()))
    }

    fn new(response: MockResponse) -> Self {
        Self {
            response,
            closed: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn executed_queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuerySource for MockSource {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        if self.is_closed() {
            return Err(CityGridError::SourceClosed);
        }
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(sql.to_string());
        }
        match &self.response {
            MockResponse::Rows(result) => Ok(result.clone()),
            MockResponse::Fail(reason) => Err(CityGridError::Query(sqlx::Error::Protocol(
                reason.clone(),
            ))),
        }
    }

    async fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub fn create_mock_source(result: QueryResult) -> MockSource {
    MockSource::with_result(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_mock_refuses_queries() {
        let source = MockSource::with_rows(&["ID"], vec![vec![CellValue::Int(1)]]);
        source.close().await;
        source.close().await;
        assert!(source.is_closed());
        assert_eq!(source.close_calls(), 2);
        assert!(matches!(
            source.query("SELECT 1").await,
            Err(CityGridError::SourceClosed)
        ));
    }

    #[test]
    fn records_queries() {
        let source = create_mock_source(QueryResult {
            columns: vec![ColumnInfo::new("ID", "INT")],
            rows: vec![],
        });
        let result = tokio_test::block_on(source.query("SELECT * FROM world.city")).unwrap();
        assert_eq!(result.columns.len(), 1);
        assert_eq!(source.executed_queries(), vec!["SELECT * FROM world.city"]);
    }
}
