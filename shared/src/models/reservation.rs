//! Reservation Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
///
/// A reservation is born `Pending` and moves through the lifecycle via
/// [`ReservationStatus::can_transition_to`]. `Cancelled` and `Completed`
/// are terminal: nothing moves out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Active reservations occupy their table
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Terminal statuses permit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Check whether `self -> next` is a legal lifecycle transition
    ///
    /// | From | To |
    /// |------|----|
    /// | pending | confirmed, cancelled |
    /// | confirmed | cancelled, completed |
    /// | cancelled, completed | (none) |
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }

    /// Wire name of the status ("pending", "confirmed", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// Reservation entity
///
/// `table_number` is the human-facing booking reference, not the table's
/// identity. `amount` is the booking deposit stamped from the table at
/// creation time; monthly revenue sums it over completed reservations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    /// Owning user
    pub user_id: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Time of day, `HH:MM`
    pub time: String,
    /// Party size
    pub guests: u32,
    pub table_number: String,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// Booking deposit, source of monthly revenue
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Create reservation payload
///
/// Deliberately cannot express id, owner, status, amount or timestamps:
/// those are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub guest_name: String,
    pub guest_phone: String,
    #[serde(default)]
    pub guest_email: String,
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub table_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

/// Update reservation payload
///
/// Only guest-editable fields are representable; anything else sent by a
/// client is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

/// Status transition payload (`PATCH /api/reservations/{id}/status`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_confirmed_or_cancelled() {
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Confirmed));
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::Completed));
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::Pending));
    }

    #[test]
    fn confirmed_moves_to_cancelled_or_completed() {
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Cancelled));
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Completed));
        assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Pending));
    }

    #[test]
    fn terminal_statuses_permit_nothing() {
        for terminal in [ReservationStatus::Cancelled, ReservationStatus::Completed] {
            for next in [
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
                ReservationStatus::Cancelled,
                ReservationStatus::Completed,
            ] {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next}");
            }
        }
    }

    #[test]
    fn active_iff_pending_or_confirmed() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
        assert!(!ReservationStatus::Completed.is_active());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&ReservationStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let parsed: ReservationStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Completed);
    }

    #[test]
    fn update_payload_drops_protected_fields() {
        // A client trying to smuggle id/status/userId through an update
        // simply loses them during deserialization.
        let patch: ReservationUpdate = serde_json::from_str(
            r#"{"id":"r-999","userId":"u-999","status":"completed","guestName":"Olena"}"#,
        )
        .unwrap();
        assert_eq!(patch.guest_name.as_deref(), Some("Olena"));
        assert!(patch.guest_phone.is_none());
    }
}
