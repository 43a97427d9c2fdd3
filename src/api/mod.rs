//! Requests to the gift service.

mod api;
mod builder;
mod response;

pub use api::GiftsAPI;
pub use builder::GiftsAPIBuilder;
pub use response::StatusResponse;

use crate::enums::ReservationStatus;
use crate::error::Error;
use async_trait::async_trait;

/// The default location of the gift service.
pub const DEFAULT_BASE_URL: &str = "https://eoexx-syaaa-aaaab-qahzq-cai.icp0.io";

/// Reads and flips the reservation status of a listing. Both calls answer with the status the
/// service now holds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Gets the current status of the listing.
    async fn status(&self, id: &str) -> Result<ReservationStatus, Error>;
    /// Flips the status of the listing.
    async fn toggle(&self, id: &str) -> Result<ReservationStatus, Error>;
}
