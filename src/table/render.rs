use super::model::TableModel;
use crate::error::Result;
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn render_text(model: &TableModel) -> String {
    let mut builder = Builder::default();
    builder.push_record(model.columns().iter().map(|c| c.name.clone()));
    for row in model.rows() {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!(
        "{}\n{} rows, {} columns",
        table,
        model.row_count(),
        model.column_count()
    )
}

/// One JSON object per row, keyed by column name.
pub fn render_json(model: &TableModel) -> Result<String> {
    let records: Vec<Value> = model
        .rows()
        .iter()
        .map(|row| -> std::result::Result<Value, serde_json::Error> {
            let mut record = Map::with_capacity(row.len());
            for (column, cell) in model.columns().iter().zip(row) {
                record.insert(column.name.clone(), serde_json::to_value(cell)?);
            }
            Ok(Value::Object(record))
        })
        .collect::<std::result::Result<_, serde_json::Error>>()?;

    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{CellValue, ColumnInfo};

    fn model() -> TableModel {
        let mut model = TableModel::new();
        model.add_column(ColumnInfo::new("ID", "INT"));
        model.add_column(ColumnInfo::new("Name", "CHAR"));
        model
            .add_row(vec![CellValue::Int(1), CellValue::from("Kabul")])
            .unwrap();
        model
            .add_row(vec![CellValue::Int(2), CellValue::Null])
            .unwrap();
        model
    }

    #[test]
    fn text_contains_headers_values_and_summary() {
        let text = render_text(&model());
        assert!(text.contains("ID"));
        assert!(text.contains("Kabul"));
        assert!(text.contains("NULL"));
        assert!(text.ends_with("2 rows, 2 columns"));
    }

    #[test]
    fn text_for_headers_only() {
        let mut empty = TableModel::new();
        empty.add_column(ColumnInfo::new("ID", "INT"));
        let text = render_text(&empty);
        assert!(text.contains("ID"));
        assert!(text.ends_with("0 rows, 1 columns"));
    }

    #[test]
    fn json_keys_rows_by_column() {
        let json = render_json(&model()).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["ID"], 1);
        assert_eq!(parsed[0]["Name"], "Kabul");
        assert!(parsed[1]["Name"].is_null());
    }

    #[test]
    fn json_for_no_rows_is_empty_array() {
        let json = render_json(&TableModel::new()).unwrap();
        assert_eq!(json, "[]");
    }
}
