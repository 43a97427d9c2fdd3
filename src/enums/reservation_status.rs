use crate::error::Error;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumString};

/// Whether a listing has been claimed. The service is the source of truth for this value.
#[derive(Serialize, Deserialize, Display, EnumString, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReservationStatus {
    /// Nobody has claimed the listing.
    Unbought,
    /// Someone has claimed the listing.
    Bought,
}

impl ReservationStatus {
    /// Whether the toggle control should be checked for this status.
    pub fn is_bought(&self) -> bool {
        matches!(self, Self::Bought)
    }
    
    /// Parses a status as sent by the service. Anything other than `bought` or `unbought` is
    /// rejected with [`Error::InvalidStatus`].
    pub fn parse(status: &str) -> Result<Self, Error> {
        Self::from_str(status).map_err(|_| Error::InvalidStatus(status.to_owned()))
    }
}
