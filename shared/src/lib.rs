//! Shared types for the Chico reservation platform
//!
//! Entity models and wire DTOs used by both booking-server and
//! chico-client, so the two sides always agree on the reservation
//! lifecycle and the JSON shapes on the wire.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, RegisterRequest};
pub use error::ErrorBody;
pub use models::{
    HourCount, MonthlyStats, MonthlySummary, Reservation, ReservationCreate, ReservationStatus,
    ReservationStatusUpdate, ReservationUpdate, Table, TableAvailabilityUpdate, TableCount,
    TableLocation, User, UserRole,
};
