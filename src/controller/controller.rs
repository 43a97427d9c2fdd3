use super::control::ToggleControl;
use super::machine::{Operation, ReservationMachine, Step, TimerAction};
use super::snapshot::ReservationSnapshot;
use super::timer::PollTimer;
use super::{ControllerEvent, ControllerOptions};
use crate::api::ReservationService;
use crate::enums::ReservationStatus;
use crate::error::Error;
use crate::types::ListingId;
use std::sync::Arc;
use std::time::Duration;
use futures::future::{BoxFuture, OptionFuture};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

type Completion = (Operation, Result<ReservationStatus, Error>);

/// Runs the reservation machine for one listing. At most one request is in flight at a time.
struct ReservationController<S, C> {
    id: ListingId,
    service: Arc<S>,
    machine: ReservationMachine<C>,
    timer: PollTimer,
    options: ControllerOptions,
    events: mpsc::UnboundedReceiver<ControllerEvent>,
    snapshot: watch::Sender<ReservationSnapshot>,
}

impl<S, C> ReservationController<S, C>
where
    S: ReservationService + 'static,
    C: ToggleControl,
{
    async fn run(mut self) -> Result<(), Error> {
        let mut in_flight: Option<BoxFuture<'static, Completion>> = None;
        let step = self.machine.mount();
        
        self.apply(step, &mut in_flight);
        
        loop {
            tokio::select! {
                // Queued events go first so a click made while busy is dropped instead of being
                // applied after the request completes.
                biased;
                event = self.events.recv() => {
                    let step = match event {
                        Some(ControllerEvent::Click) => self.machine.click(),
                        Some(ControllerEvent::Tick(generation)) => {
                            if !self.timer.is_current(generation) {
                                log::debug!("Ignoring stale tick for {}", self.id);
                                continue;
                            }
                            
                            self.machine.tick()
                        },
                        Some(ControllerEvent::Retry) => self.machine.retry(),
                        Some(ControllerEvent::Teardown) | None => {
                            log::debug!("Tearing down controller for {}", self.id);
                            let step = self.machine.teardown();
                            
                            // dropping the request abandons it
                            in_flight = None;
                            self.apply(step, &mut in_flight);
                            return Ok(());
                        },
                    };
                    
                    self.apply(step, &mut in_flight);
                },
                Some((operation, result)) = OptionFuture::from(in_flight.as_mut()), if in_flight.is_some() => {
                    in_flight = None;
                    
                    match self.machine.complete(operation, result) {
                        Ok(step) => self.apply(step, &mut in_flight),
                        Err(error) => {
                            self.timer.disarm();
                            self.publish();
                            return Err(error);
                        },
                    }
                },
            }
        }
    }
    
    fn apply(
        &mut self,
        step: Step,
        in_flight: &mut Option<BoxFuture<'static, Completion>>,
    ) {
        match step.timer {
            TimerAction::Keep => {},
            TimerAction::Arm => self.timer.arm(),
            TimerAction::Disarm => self.timer.disarm(),
        }
        
        if let Some(operation) = step.request {
            // Only a toggle ever replaces a request, and only a poll read.
            *in_flight = Some(self.start(operation));
        }
        
        self.publish();
    }
    
    fn start(&self, operation: Operation) -> BoxFuture<'static, Completion> {
        let service = Arc::clone(&self.service);
        let id = self.id.clone();
        let attempts = self.options.read_attempts.max(1);
        let retry_delay = self.options.retry_delay;
        
        log::debug!("Starting {operation:?} for {id}");
        
        Box::pin(async move {
            let result = match operation {
                Operation::Mount => read_with_retry(&*service, &id, attempts, retry_delay).await,
                Operation::Poll => service.status(&id).await,
                Operation::Toggle => service.toggle(&id).await,
            };
            
            (operation, result)
        })
    }
    
    fn publish(&self) {
        self.snapshot.send_replace(self.machine.snapshot());
    }
}

/// Reads the status up to `attempts` times, waiting `delay` after the first failure and doubling
/// it after each one after that. Contract violations are returned immediately.
async fn read_with_retry<S>(
    service: &S,
    id: &str,
    attempts: u32,
    mut delay: Duration,
) -> Result<ReservationStatus, Error>
where
    S: ReservationService + ?Sized,
{
    let mut attempt = 1;
    
    loop {
        match service.status(id).await {
            Err(error) if attempt < attempts && !error.is_contract_violation() => {
                log::warn!("Status read for {id} failed (attempt {attempt}/{attempts}): {error}");
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            },
            result => return result,
        }
    }
}

/// Spawns a controller for the listing `id` and reads its status. Must be called from within a
/// tokio runtime.
pub fn spawn_controller<S, C>(
    id: ListingId,
    service: Arc<S>,
    control: C,
    options: ControllerOptions,
) -> ControllerHandle
where
    S: ReservationService + 'static,
    C: ToggleControl + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let machine = ReservationMachine::new(control);
    let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());
    let controller = ReservationController {
        id,
        service,
        machine,
        timer: PollTimer::new(options.poll_interval, events_tx.clone()),
        options,
        events: events_rx,
        snapshot: snapshot_tx,
    };
    let task = tokio::spawn(controller.run());
    
    ControllerHandle {
        events: events_tx,
        snapshot: snapshot_rx,
        task: Some(task),
    }
}

/// Handle to a running controller. Dropping the handle tears the controller down.
#[derive(Debug)]
pub struct ControllerHandle {
    events: mpsc::UnboundedSender<ControllerEvent>,
    snapshot: watch::Receiver<ReservationSnapshot>,
    task: Option<JoinHandle<Result<(), Error>>>,
}

impl ControllerHandle {
    fn send(&self, event: ControllerEvent) -> Result<(), Error> {
        self.events.send(event)
            .map_err(|_| Error::ControllerStopped)
    }
    
    /// Delivers a click on the toggle control.
    pub fn click(&self) -> Result<(), Error> {
        self.send(ControllerEvent::Click)
    }
    
    /// Reads the status again if the mount read failed.
    pub fn retry(&self) -> Result<(), Error> {
        self.send(ControllerEvent::Retry)
    }
    
    /// The current state.
    pub fn snapshot(&self) -> ReservationSnapshot {
        self.snapshot.borrow().clone()
    }
    
    /// Receives every state change.
    pub fn subscribe(&self) -> watch::Receiver<ReservationSnapshot> {
        self.snapshot.clone()
    }
    
    /// Stops the controller and cancels its timer. Returns the error the controller stopped
    /// with, if any.
    pub async fn teardown(mut self) -> Result<(), Error> {
        let _ = self.events.send(ControllerEvent::Teardown);
        
        match self.task.take() {
            Some(task) => match task.await {
                Ok(result) => result,
                Err(error) => {
                    log::error!("Controller task failed: {error}");
                    Err(Error::ControllerStopped)
                },
            },
            None => Ok(()),
        }
    }
}

impl Drop for ControllerHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            let _ = self.events.send(ControllerEvent::Teardown);
        }
    }
}
