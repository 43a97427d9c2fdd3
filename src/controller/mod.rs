//! Keeps the reservation toggle in sync with the gift service.

mod control;
mod controller;
mod machine;
mod snapshot;
mod timer;

pub use control::{ControlState, ToggleControl};
pub use controller::{spawn_controller, ControllerHandle};
pub use machine::{ControllerState, Operation, ReservationMachine, Step, TimerAction};
pub use snapshot::ReservationSnapshot;

use std::time::Duration;

/// Messages delivered to a running controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControllerEvent {
    /// The user activated the toggle control.
    Click,
    /// The polling timer armed with this generation fired.
    Tick(u64),
    /// Read the status again after a failed mount.
    Retry,
    /// Stop the controller.
    Teardown,
}

/// The shortest interval the status is polled at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Options for a controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Interval to poll the status at. Default is 10 seconds. Raised to [`MIN_POLL_INTERVAL`] if
    /// shorter.
    pub poll_interval: Duration,
    /// How many times the mount read is attempted before giving up. Default is 3.
    pub read_attempts: u32,
    /// Delay before the second mount read attempt, doubled after each further failure. Default
    /// is 1 second.
    pub retry_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            read_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl ControllerOptions {
    /// Uses the default values but polls at the given interval.
    pub fn default_with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..Self::default()
        }
    }
}
