//! A gift listing widget. Renders a listing's descriptive attributes and keeps a reservation
//! toggle in sync with the gift service.
//!
//! ```no_run
//! use gift_item::{GiftItem, GiftsAPI, ListingAttributes, ListingField};
//! use gift_item::controller::{ControlState, ControllerOptions};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), gift_item::Error> {
//! let api = GiftsAPI::builder().build()?;
//! let attributes = ListingAttributes::new("42")
//!     .with(ListingField::Title, "Kettle")
//!     .with(ListingField::Price, "1200");
//! let mut item = GiftItem::mount(attributes, Arc::new(api), ControlState::default(), ControllerOptions::default());
//!
//! item.set_attribute("originalPrice", Some("1500"));
//! item.click()?;
//! item.teardown().await
//! # }
//! ```

pub mod api;
pub mod controller;
pub mod enums;
pub mod error;
pub mod listing;
pub mod price;
pub mod render;
pub mod types;

mod helpers;
mod widget;

pub use api::{GiftsAPI, ReservationService};
pub use enums::{ListingField, ReservationStatus};
pub use error::Error;
pub use listing::{AttributeChange, ListingAttributes};
pub use render::ListingView;
pub use widget::GiftItem;
