use std::time::Duration;

use tokio::{sync::mpsc, task::AbortHandle, time::sleep};

use crate::app::events::AppEvent;

/// A delayed event that can be withdrawn before it fires.
pub trait ScheduledTask {
    fn cancel(&self);
}

/// Source of delayed events. Production uses tokio timers; tests substitute
/// a scheduler they can fire by hand.
pub trait Scheduler {
    fn schedule(
        &self,
        tx: &mpsc::Sender<AppEvent>,
        delay: Duration,
        event: AppEvent,
    ) -> Box<dyn ScheduledTask>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(
        &self,
        tx: &mpsc::Sender<AppEvent>,
        delay: Duration,
        event: AppEvent,
    ) -> Box<dyn ScheduledTask> {
        let tx = tx.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(event).await;
        });
        Box::new(handle.abort_handle())
    }
}

impl ScheduledTask for AbortHandle {
    fn cancel(&self) {
        self.abort();
    }
}

/// Trailing-edge debounce for suggestion lookups. Each trigger replaces the
/// pending timer and bumps the generation, so only the last keystroke of a
/// burst produces a lookup.
pub struct Debouncer {
    scheduler: Box<dyn Scheduler>,
    delay: Duration,
    generation: u64,
    pending: Option<Box<dyn ScheduledTask>>,
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("generation", &self.generation)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl Debouncer {
    pub fn new(scheduler: Box<dyn Scheduler>, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn trigger(&mut self, tx: &mpsc::Sender<AppEvent>) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        self.pending = Some(self.scheduler.schedule(
            tx,
            self.delay,
            AppEvent::SuggestDue { generation },
        ));
        generation
    }

    /// Drops the pending timer. Lookups already in flight keep their
    /// generation; use [`Debouncer::invalidate`] to discard them.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
    }

    /// Consumes a due notification; false when a later trigger superseded it.
    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.pending = None;
        true
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Bumps the generation without scheduling, so late results are ignored.
    pub fn invalidate(&mut self) {
        self.cancel();
        self.generation += 1;
    }
}
