//! Chico Client - HTTP client for the booking server
//!
//! One [`Client`] interface, two interchangeable adapters:
//!
//! - [`NetworkClient`] - reqwest over the wire (production)
//! - [`InProcessClient`] - drives an axum `Router` directly, zero network
//!   (feature `in-process`, used by integration tests)
//!
//! The session module persists the auth token together with the user
//! snapshot; both are invalidated as one unit.

pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use client::{ChicoClient, Client, NetworkClient, ReservationListParams};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionStore};

#[cfg(feature = "in-process")]
pub use client::InProcessClient;

// Re-export shared types for convenience
pub use shared::{
    LoginRequest, LoginResponse, MonthlyStats, MonthlySummary, RegisterRequest, Reservation,
    ReservationCreate, ReservationStatus, ReservationStatusUpdate, ReservationUpdate, Table,
    User, UserRole,
};
