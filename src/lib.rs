pub mod config;
pub mod error;
pub mod executor;
pub mod table;
pub mod viewer;

pub use config::{ConfigFile, ConfigLoader, PoolConfig, PoolOverrides};
pub use error::{CityGridError, Result};
pub use executor::{
    create_mock_source, CellValue, ColumnInfo, DataSource, MockSource, QueryResult, QuerySource,
};
pub use table::{render_json, render_text, LoadOutcome, TableLoader, TableModel, CITY_QUERY};
pub use viewer::{GridApp, ViewerOptions};
