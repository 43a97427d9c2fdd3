use super::control::ToggleControl;
use super::snapshot::ReservationSnapshot;
use crate::enums::ReservationStatus;
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A request to the gift service.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// The status read made when the widget is mounted or retried after a failure.
    Mount,
    /// A periodic status read.
    Poll,
    /// Flipping the status.
    Toggle,
}

/// State of a reservation controller.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// A mount read or toggle is outstanding. The control is disabled and the timer disarmed.
    Busy {
        operation: Operation,
        /// The status confirmed before the request, restored if a toggle fails.
        confirmed: Option<ReservationStatus>,
    },
    /// The status is confirmed, the control enabled and the timer armed.
    Idle(ReservationStatus),
    /// Same as [`ControllerState::Idle`] with a poll read outstanding. A click abandons the read.
    Sampling(ReservationStatus),
    /// The mount read failed. The control stays disabled until a retry succeeds.
    Failed,
    /// The widget was torn down.
    Terminated,
}

impl ControllerState {
    /// The last status confirmed by the service.
    pub fn confirmed(&self) -> Option<ReservationStatus> {
        match self {
            Self::Busy { confirmed, .. } => *confirmed,
            Self::Idle(status) |
            Self::Sampling(status) => Some(*status),
            Self::Failed |
            Self::Terminated => None,
        }
    }
}

/// What to do with the polling timer after a transition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    #[default]
    Keep,
    Arm,
    Disarm,
}

/// The effects of a transition for the controller to carry out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// A request to start. Replaces any request still in flight.
    pub request: Option<Operation>,
    pub timer: TimerAction,
}

impl Step {
    fn request(operation: Operation, timer: TimerAction) -> Self {
        Self {
            request: Some(operation),
            timer,
        }
    }
    
    fn timer(timer: TimerAction) -> Self {
        Self {
            request: None,
            timer,
        }
    }
}

/// The reservation state machine. Transitions are synchronous and drive the toggle control
/// immediately, so the control is disabled before any request starts.
pub struct ReservationMachine<C> {
    state: ControllerState,
    control: C,
    checked: bool,
    disabled: bool,
    last_error: Option<String>,
    last_confirmed: Option<DateTime<Utc>>,
}

impl<C> ReservationMachine<C>
where
    C: ToggleControl,
{
    /// Creates a machine waiting for its mount read. The control starts disabled and unchecked.
    pub fn new(control: C) -> Self {
        let mut machine = Self {
            state: ControllerState::Busy {
                operation: Operation::Mount,
                confirmed: None,
            },
            control,
            checked: false,
            disabled: true,
            last_error: None,
            last_confirmed: None,
        };
        
        machine.control.set_checked(false);
        machine.control.set_disabled(true);
        machine
    }
    
    pub fn state(&self) -> ControllerState {
        self.state
    }
    
    pub fn snapshot(&self) -> ReservationSnapshot {
        ReservationSnapshot {
            state: self.state,
            checked: self.checked,
            disabled: self.disabled,
            last_error: self.last_error.clone(),
            last_confirmed: self.last_confirmed,
        }
    }
    
    /// The first step after mounting: read the status.
    pub fn mount(&mut self) -> Step {
        self.enter_busy(Operation::Mount, None);
        Step::request(Operation::Mount, TimerAction::Disarm)
    }
    
    /// The user activated the control. Ignored unless a status is confirmed and no mount read or
    /// toggle is outstanding.
    pub fn click(&mut self) -> Step {
        match self.state {
            ControllerState::Idle(status) |
            ControllerState::Sampling(status) => {
                log::debug!("Toggling from {status}");
                self.enter_busy(Operation::Toggle, Some(status));
                Step::request(Operation::Toggle, TimerAction::Disarm)
            },
            state => {
                log::debug!("Ignoring click while {state:?}");
                Step::default()
            },
        }
    }
    
    /// The polling timer fired. Only reads when idle; ticks are never queued.
    pub fn tick(&mut self) -> Step {
        match self.state {
            ControllerState::Idle(status) => {
                self.state = ControllerState::Sampling(status);
                Step::request(Operation::Poll, TimerAction::Keep)
            },
            state => {
                log::debug!("Skipping poll while {state:?}");
                Step::default()
            },
        }
    }
    
    /// Reads the status again after the mount read failed.
    pub fn retry(&mut self) -> Step {
        match self.state {
            ControllerState::Failed => self.mount(),
            _ => Step::default(),
        }
    }
    
    /// The widget is being torn down. No further transitions happen.
    pub fn teardown(&mut self) -> Step {
        self.state = ControllerState::Terminated;
        Step::timer(TimerAction::Disarm)
    }
    
    /// A request finished. Returns an error only for a contract violation, after which the
    /// machine is terminated with the control disabled.
    pub fn complete(
        &mut self,
        operation: Operation,
        result: Result<ReservationStatus, Error>,
    ) -> Result<Step, Error> {
        let expected = match self.state {
            ControllerState::Busy { operation: current, .. } => current == operation,
            ControllerState::Sampling(_) => operation == Operation::Poll,
            _ => false,
        };
        
        if !expected {
            log::warn!("Discarding {operation:?} result while {:?}", self.state);
            return Ok(Step::default());
        }
        
        match result {
            Ok(status) => Ok(self.confirm(operation, status)),
            Err(error) if error.is_contract_violation() => {
                log::error!("{operation:?} failed: {error}");
                self.state = ControllerState::Terminated;
                self.last_error = Some(error.to_string());
                self.set_disabled(true);
                Err(error)
            },
            Err(error) => Ok(self.recover(operation, error)),
        }
    }
    
    fn confirm(
        &mut self,
        operation: Operation,
        status: ReservationStatus,
    ) -> Step {
        log::debug!("{operation:?} confirmed {status}");
        self.state = ControllerState::Idle(status);
        self.last_error = None;
        self.last_confirmed = Some(Utc::now());
        self.set_checked(status.is_bought());
        self.set_disabled(false);
        
        match operation {
            Operation::Poll => Step::default(),
            Operation::Mount |
            Operation::Toggle => Step::timer(TimerAction::Arm),
        }
    }
    
    fn recover(
        &mut self,
        operation: Operation,
        error: Error,
    ) -> Step {
        log::warn!("{operation:?} failed: {error}");
        self.last_error = Some(error.to_string());
        
        match (operation, self.state.confirmed()) {
            (Operation::Mount, _) |
            (_, None) => {
                self.state = ControllerState::Failed;
                self.set_disabled(true);
                Step::timer(TimerAction::Disarm)
            },
            // the checked state still shows this status
            (Operation::Toggle, Some(status)) => {
                self.state = ControllerState::Idle(status);
                self.set_disabled(false);
                Step::timer(TimerAction::Arm)
            },
            (Operation::Poll, Some(status)) => {
                self.state = ControllerState::Idle(status);
                Step::default()
            },
        }
    }
    
    fn enter_busy(
        &mut self,
        operation: Operation,
        confirmed: Option<ReservationStatus>,
    ) {
        self.state = ControllerState::Busy {
            operation,
            confirmed,
        };
        self.set_disabled(true);
    }
    
    fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.control.set_checked(checked);
        }
    }
    
    fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.control.set_disabled(disabled);
        }
    }
}
