use thiserror::Error;

#[derive(Error, Debug)]
pub enum CityGridError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Cannot decode column '{column}': {message}")]
    Decode { column: String, message: String },

    #[error("Row has {actual} values but the table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Viewer error: {0}")]
    Viewer(String),

    #[error("Data source is closed")]
    SourceClosed,
}

pub type Result<T> = std::result::Result<T, CityGridError>;
