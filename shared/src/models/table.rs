//! Dining Table Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Table location category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLocation {
    Main,
    Terrace,
    Private,
}

impl TableLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Terrace => "terrace",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for TableLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
///
/// `number` is the booking reference used by reservations; `id` is the
/// record identity. `is_available` is derived state: true iff no active
/// reservation currently targets this table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub number: String,
    pub capacity: u32,
    pub is_available: bool,
    pub location: TableLocation,
    /// Per-booking deposit, copied onto reservations at creation
    pub deposit: Decimal,
}

/// Availability patch payload (`PATCH /api/tables/{number}/availability`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAvailabilityUpdate {
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn table_serializes_with_camel_case_keys() {
        let table = Table {
            id: "t1".to_string(),
            number: "5".to_string(),
            capacity: 4,
            is_available: true,
            location: TableLocation::Terrace,
            deposit: Decimal::new(50000, 2),
        };
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["isAvailable"], serde_json::json!(true));
        assert_eq!(value["location"], serde_json::json!("terrace"));
        assert_eq!(value["deposit"], serde_json::json!(500.0));
    }
}
