//! Monthly Report Models
//!
//! Derived data: regenerated from the reservation history on every query,
//! never stored or hand-edited.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reservation count for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCount {
    pub table_number: String,
    pub count: u64,
}

/// Reservation count for one time-of-day bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourCount {
    /// Time of day, `HH:MM`
    pub hour: String,
    pub count: u64,
}

/// Monthly summary row (`GET /api/reports/monthly`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Month key, `YYYY-MM`
    pub month: String,
    pub total_reservations: u64,
    pub completed_reservations: u64,
    pub cancelled_reservations: u64,
    /// Sum of deposits over completed reservations
    pub revenue: Decimal,
}

/// Full monthly statistics (`GET /api/reports/monthly/{month}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub month: String,
    pub total_reservations: u64,
    pub completed_reservations: u64,
    pub cancelled_reservations: u64,
    pub revenue: Decimal,
    /// Top 5 tables by reservation count, ties broken by table number
    pub popular_tables: Vec<TableCount>,
    /// Top 5 time buckets by reservation count, ties broken by hour
    pub peak_hours: Vec<HourCount>,
}
