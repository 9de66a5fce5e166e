use crate::error::{CityGridError, Result};
use crate::executor::{CellValue, ColumnInfo};

/// Column definitions plus row data backing the grid.
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    columns: Vec<ColumnInfo>,
    rows: Vec<Vec<CellValue>>,
}

impl TableModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: ColumnInfo) {
        self.columns.push(column);
    }

    pub fn add_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CityGridError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.name.as_str())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn value_at(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}
