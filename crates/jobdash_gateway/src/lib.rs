//! Jobdash gateway: HTTP client for the scraper backend API.
//!
//! Wire payloads are validated into the core domain model here; the rest
//! of the client never handles raw JSON or HTTP statuses.
mod bulk;
mod client;
mod error;
mod types;

pub use bulk::{add_tracked_jobs, delete_tracked_jobs};
pub use client::{Gateway, GatewaySettings, HttpGateway};
pub use error::GatewayError;
pub use types::ExportFormat;
