use super::machine::ControllerState;
use crate::enums::ReservationStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The observable state of a reservation controller.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReservationSnapshot {
    pub state: ControllerState,
    /// Whether the control is checked. Always matches the last confirmed status.
    pub checked: bool,
    pub disabled: bool,
    /// The last failure, cleared by the next confirmed status.
    pub last_error: Option<String>,
    /// When the service last confirmed the status.
    pub last_confirmed: Option<DateTime<Utc>>,
}

impl ReservationSnapshot {
    /// The last status confirmed by the service, if any.
    pub fn status(&self) -> Option<ReservationStatus> {
        self.state.confirmed()
    }
    
    /// A request is outstanding and clicks are ignored.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ControllerState::Busy { .. })
    }
    
    /// The controller accepts clicks.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ControllerState::Idle(_) | ControllerState::Sampling(_))
    }
    
    /// The initial status could not be read.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, ControllerState::Failed)
    }
}
