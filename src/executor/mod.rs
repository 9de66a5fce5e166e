mod data_source;
mod mock;
mod source;
mod value;

pub use data_source::DataSource;
pub use mock::{create_mock_source, MockSource};
pub use source::{ColumnInfo, QueryResult, QuerySource};
pub use value::CellValue;
