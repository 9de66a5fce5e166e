use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell as read from a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Time(NaiveTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// FLOAT columns arrive as `f32`; widening through the shortest decimal
    /// form keeps `78.4` from turning into `78.4000015258789`.
    pub fn from_f32(value: f32) -> Self {
        CellValue::Float(value.to_string().parse().unwrap_or(f64::from(value)))
    }

    /// Right-aligned in grids.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::UInt(_) | CellValue::Float(_) | CellValue::Decimal(_)
        )
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::UInt(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Decimal(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Bytes(v) => write!(f, "0x{}", hex::encode_upper(v)),
            CellValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            CellValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S UTC")),
            CellValue::Time(v) => write!(f, "{}", v.format("%H:%M:%S")),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Bool(v) => serializer.serialize_bool(*v),
            CellValue::Int(v) => serializer.serialize_i64(*v),
            CellValue::UInt(v) => serializer.serialize_u64(*v),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Decimal(v) => Serialize::serialize(v, serializer),
            CellValue::Text(v) => serializer.serialize_str(v),
            other => serializer.collect_str(other),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(CellValue::Null.to_string(), "NULL");
        assert_eq!(CellValue::Int(-7).to_string(), "-7");
        assert_eq!(CellValue::Bytes(vec![0x0a, 0xff]).to_string(), "0x0AFF");
        assert_eq!(
            CellValue::Date(NaiveDate::from_ymd_opt(2025, 3, 21).unwrap()).to_string(),
            "2025-03-21"
        );
        assert_eq!(CellValue::from("Kabul").to_string(), "Kabul");
    }

    #[test]
    fn json_shapes() {
        let cells = vec![
            CellValue::Null,
            CellValue::Int(1780000),
            CellValue::from("AFG"),
            CellValue::Bool(true),
            CellValue::Bytes(vec![1]),
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[null,1780000,"AFG",true,"0x01"]"#);
    }

    #[test]
    fn decimal_serializes_as_string() {
        let cell = CellValue::Decimal(Decimal::new(17800025, 1));
        assert_eq!(serde_json::to_string(&cell).unwrap(), r#""1780002.5""#);
        assert_eq!(cell.to_string(), "1780002.5");
    }

    #[test]
    fn float_columns_keep_their_stored_digits() {
        assert_eq!(CellValue::from_f32(78.4).to_string(), "78.4");
        assert_eq!(CellValue::from_f32(-0.1), CellValue::Float(-0.1));
        assert_eq!(CellValue::from_f32(3.0).to_string(), "3");
        assert_eq!(serde_json::to_string(&CellValue::from_f32(78.4)).unwrap(), "78.4");
    }

    #[test]
    fn numeric_detection() {
        assert!(CellValue::UInt(3).is_numeric());
        assert!(!CellValue::from("3").is_numeric());
        assert!(CellValue::from(None::<i64>).is_null());
    }
}
