//! Enumerated types.

mod listing_field;
mod reservation_status;

pub use listing_field::ListingField;
pub use reservation_status::ReservationStatus;
