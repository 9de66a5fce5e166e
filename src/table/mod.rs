mod loader;
mod model;
mod render;

pub use loader::{LoadOutcome, TableLoader, CITY_QUERY};
pub use model::TableModel;
pub use render::{render_json, render_text};
