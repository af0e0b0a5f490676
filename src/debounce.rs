//! Cancelable, reschedulable deferred callback.
//!
//! A `Debouncer` holds at most one pending task. Every `call` drops the
//! previous handle (which cancels it) and schedules a fresh one, so a burst
//! of calls results in a single run once the burst has been quiet for the
//! configured delay.

use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Something that can run a task after a delay.
///
/// Dropping the returned handle must cancel the task if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers through `gloo_timers`; dropping a `Timeout` clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    // The handle of a fired task is kept until the next call replaces it, so
    // a task never drops its own timer while running.
    handle: RefCell<Option<S::Handle>>,
    armed: Rc<Cell<bool>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            handle: RefCell::new(None),
            armed: Rc::new(Cell::new(false)),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Schedule `task`, superseding any task still waiting.
    pub fn call(&self, task: impl FnOnce() + 'static) {
        self.cancel();

        let armed = Rc::clone(&self.armed);
        armed.set(true);
        let handle = self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                armed.set(false);
                task();
            }),
        );
        *self.handle.borrow_mut() = Some(handle);
    }

    /// Drop the waiting task, if any.
    pub fn cancel(&self) {
        // Take first so the old handle is dropped outside the borrow.
        let previous = self.handle.borrow_mut().take();
        drop(previous);
        self.armed.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }
}

#[doc(hidden)]
pub mod manual {
    //! Virtual-time scheduler for driving debounced code in tests, both the
    //! unit tests here and the crate's integration tests.

    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Entry {
        id: u64,
        due: u64,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Inner {
        now: Cell<u64>,
        next_id: Cell<u64>,
        queue: RefCell<Vec<Entry>>,
    }

    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        inner: Rc<Inner>,
    }

    pub struct ManualHandle {
        id: u64,
        inner: Rc<Inner>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.inner.queue.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let id = self.inner.next_id.get();
            self.inner.next_id.set(id + 1);
            self.inner.queue.borrow_mut().push(Entry {
                id,
                due: self.inner.now.get() + u64::from(delay_ms),
                task,
            });
            ManualHandle {
                id,
                inner: Rc::clone(&self.inner),
            }
        }
    }

    impl ManualScheduler {
        pub fn now(&self) -> u64 {
            self.inner.now.get()
        }

        pub fn pending(&self) -> usize {
            self.inner.queue.borrow().len()
        }

        /// Move the clock forward, running due tasks in deadline order.
        pub fn advance(&self, ms: u64) {
            let target = self.inner.now.get() + ms;
            loop {
                let next = {
                    let mut queue = self.inner.queue.borrow_mut();
                    let pos = queue
                        .iter()
                        .enumerate()
                        .filter(|(_, entry)| entry.due <= target)
                        .min_by_key(|(_, entry)| (entry.due, entry.id))
                        .map(|(pos, _)| pos);
                    pos.map(|pos| queue.remove(pos))
                };
                match next {
                    Some(entry) => {
                        self.inner.now.set(entry.due);
                        (entry.task)();
                    }
                    None => break,
                }
            }
            self.inner.now.set(target);
        }
    }
}
