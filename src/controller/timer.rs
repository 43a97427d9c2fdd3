use super::{ControllerEvent, MIN_POLL_INTERVAL};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// The timer driving periodic status reads. While armed, a background task sends a
/// [`ControllerEvent::Tick`] tagged with the arm generation every `interval`.
pub(crate) struct PollTimer {
    interval: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
    events: mpsc::UnboundedSender<ControllerEvent>,
}

impl PollTimer {
    /// Intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn new(
        interval: Duration,
        events: mpsc::UnboundedSender<ControllerEvent>,
    ) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
            generation: 0,
            handle: None,
            events,
        }
    }
    
    /// Starts a fresh timer. The first tick fires one interval from now.
    pub fn arm(&mut self) {
        self.disarm();
        self.generation += 1;
        
        let generation = self.generation;
        let period = self.interval;
        let events = self.events.clone();
        
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            
            loop {
                interval.tick().await;
                
                if events.send(ControllerEvent::Tick(generation)).is_err() {
                    // The controller is gone.
                    break;
                }
            }
        }));
    }
    
    /// Cancels the timer. Ticks already queued are recognised as stale by [`Self::is_current`].
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
    
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
    
    /// Whether a tick from `generation` came from the timer that is currently armed.
    pub fn is_current(&self, generation: u64) -> bool {
        self.is_armed() && generation == self.generation
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}
