use super::model::TableModel;
use crate::error::Result;
use crate::executor::{QueryResult, QuerySource};
use std::time::Instant;
use tracing::{error, info};

pub const CITY_QUERY: &str = "SELECT * FROM world.city";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { columns: usize, rows: usize },
    Failed { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            LoadOutcome::Failed { reason } => Some(reason),
            LoadOutcome::Loaded { .. } => None,
        }
    }
}

pub struct TableLoader {
    sql: &'static str,
}

impl TableLoader {
    pub fn new() -> Self {
        Self { sql: CITY_QUERY }
    }

    /// Runs the query and fills `model`. The model is only touched once the
    /// whole result has been read, so a failure leaves it unchanged.
    pub async fn load(&self, source: &dyn QuerySource, model: &mut TableModel) -> LoadOutcome {
        let started = Instant::now();
        let outcome = match self.fetch_into_staging(source).await {
            Ok(staged) => {
                let outcome = LoadOutcome::Loaded {
                    columns: staged.column_count(),
                    rows: staged.row_count(),
                };
                *model = staged;
                outcome
            }
            Err(e) => {
                error!(sql = self.sql, error = %e, "Failed to load table data");
                LoadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        if let LoadOutcome::Loaded { columns, rows } = &outcome {
            info!(
                columns,
                rows,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Loaded table data"
            );
        }
        outcome
    }

    /// Loads once and then releases the source, whatever the outcome.
    pub async fn load_and_close(
        &self,
        source: &dyn QuerySource,
        model: &mut TableModel,
    ) -> LoadOutcome {
        let outcome = self.load(source, model).await;
        source.close().await;
        outcome
    }

    async fn fetch_into_staging(&self, source: &dyn QuerySource) -> Result<TableModel> {
        let QueryResult { columns, rows } = source.query(self.sql).await?;

        let mut staged = TableModel::new();
        for column in columns {
            staged.add_column(column);
        }
        for row in rows {
            staged.add_row(row)?;
        }
        Ok(staged)
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}
