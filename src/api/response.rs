use crate::enums::ReservationStatus;
use crate::error::Error;
use serde::Deserialize;

/// Body of both the status and toggle responses. The status is kept as a string here so that an
/// unexpected value is reported as [`Error::InvalidStatus`] rather than a parse error.
#[derive(Deserialize, Debug)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// Converts the raw status into a [`ReservationStatus`].
    pub fn into_status(self) -> Result<ReservationStatus, Error> {
        ReservationStatus::parse(&self.status)
    }
}
