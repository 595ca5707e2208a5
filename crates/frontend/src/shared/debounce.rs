//! Debounce для полей поиска
//!
//! A [`Debouncer`] runs only the last of a burst of triggers, once the input
//! has been quiet for the configured window. Scheduling goes through the
//! [`Scheduler`] trait so the timing can be driven by a fake clock in tests.

use std::cell::RefCell;

/// Schedules a callback after a delay. Dropping the returned handle cancels
/// the callback if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` based scheduler
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(delay_ms, task)
    }
}

pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// Cancel whatever is pending and restart the quiet window with `task`
    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        // Drop the previous handle first: that is what cancels it.
        self.pending.borrow_mut().take();
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(task));
        *self.pending.borrow_mut() = Some(handle);
    }
}

impl Debouncer<BrowserScheduler> {
    pub fn browser(delay_ms: u32) -> Self {
        Self::new(BrowserScheduler, delay_ms)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Task {
        due: u64,
        cancelled: Rc<Cell<bool>>,
        run: Option<Box<dyn FnOnce()>>,
    }

    /// Manually advanced clock
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        now: Rc<Cell<u64>>,
        tasks: Rc<RefCell<Vec<Task>>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualScheduler {
        /// Move time forward, running every task that became due
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let next = {
                    let mut tasks = self.tasks.borrow_mut();
                    tasks.retain(|t| !t.cancelled.get() && t.run.is_some());
                    tasks
                        .iter_mut()
                        .filter(|t| t.due <= target)
                        .min_by_key(|t| t.due)
                        .map(|t| {
                            // Mark as done so dropping the handle later is a no-op.
                            t.cancelled.set(true);
                            (t.due, t.run.take())
                        })
                };
                match next {
                    Some((due, Some(run))) => {
                        self.now.set(due);
                        run();
                    }
                    _ => break,
                }
            }
            self.now.set(target);
        }

        pub fn pending(&self) -> usize {
            self.tasks
                .borrow()
                .iter()
                .filter(|t| !t.cancelled.get() && t.run.is_some())
                .count()
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            self.tasks.borrow_mut().push(Task {
                due: self.now.get() + u64::from(delay_ms),
                cancelled: cancelled.clone(),
                run: Some(task),
            });
            ManualHandle { cancelled }
        }
    }
}
