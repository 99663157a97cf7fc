//! Cancellable delayed actions.
//!
//! Each purpose (selection debounce, bubble dismiss) owns one
//! [`DelayedAction`]. Arming it again drops the previous handle, which
//! cancels the previous task.

use gloo_timers::callback::Timeout;

/// Source of one-shot timers. Dropping a handle cancels its task.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers through `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// A single pending task for one purpose.
pub struct DelayedAction<S: Scheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> DelayedAction<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Run `task` after `delay_ms`, replacing whatever was pending
    pub fn arm(&mut self, delay_ms: u32, task: impl FnOnce() + 'static) {
        self.pending = None;
        self.pending = Some(self.scheduler.schedule(delay_ms, Box::new(task)));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::manual::ManualClock;
    use super::*;

    #[test]
    fn rearming_cancels_the_previous_task() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(0));
        let mut action = DelayedAction::new(clock.clone());

        for _ in 0..3 {
            let fired = fired.clone();
            action.arm(80, move || fired.set(fired.get() + 1));
            clock.advance(50);
        }
        assert_eq!(fired.get(), 0);
        assert_eq!(clock.pending(), 1);

        clock.advance(30);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn cancel_drops_the_task() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(false));
        let mut action = DelayedAction::new(clock.clone());

        let flag = fired.clone();
        action.arm(250, move || flag.set(true));
        action.cancel();
        clock.advance(1000);

        assert!(!fired.get());
        assert_eq!(clock.pending(), 0);
    }
}
