//! Debounce and throttle on top of `gloo-timers`, for Rust callers and for
//! the `NtandoStore.debounce` / `NtandoStore.throttle` exports.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Function;

/// Runs a task once after a delay. Dropping the returned handle cancels
/// the task if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` through `gloo-timers`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimers;

impl Scheduler for BrowserTimers {
    type Handle = Timeout;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Runs the callback once calls have stopped for `wait_ms`, with the
/// argument of the last call.
pub struct Debounced<A: 'static, S: Scheduler = BrowserTimers> {
    wait_ms: u32,
    callback: Rc<RefCell<dyn FnMut(A)>>,
    pending: RefCell<Option<S::Handle>>,
    scheduler: S,
}

impl<A: 'static> Debounced<A> {
    pub fn new(wait_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
        Self::with_scheduler(BrowserTimers, wait_ms, callback)
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    pub fn with_scheduler(scheduler: S, wait_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
        Self {
            wait_ms,
            callback: Rc::new(RefCell::new(callback)),
            pending: RefCell::new(None),
            scheduler,
        }
    }

    pub fn call(&self, arg: A) {
        let callback = Rc::clone(&self.callback);
        let handle = self
            .scheduler
            .after(self.wait_ms, Box::new(move || (*callback.borrow_mut())(arg)));
        // Dropping the previous handle cancels it.
        *self.pending.borrow_mut() = Some(handle);
    }
}

/// Open/closed flag behind `Throttled`.
#[derive(Debug, Default, Clone)]
pub struct Gate {
    closed: Rc<Cell<bool>>,
}

impl Gate {
    /// Closes the gate and returns true if it was open.
    pub fn try_enter(&self) -> bool {
        !self.closed.replace(true)
    }

    pub fn reopen(&self) {
        self.closed.set(false);
    }
}

/// Runs the callback at most once per `limit_ms`; calls in between are
/// dropped, not deferred.
pub struct Throttled<A: 'static, S: Scheduler = BrowserTimers> {
    limit_ms: u32,
    callback: RefCell<Box<dyn FnMut(A)>>,
    gate: Gate,
    reopen: RefCell<Option<S::Handle>>,
    scheduler: S,
}

impl<A: 'static> Throttled<A> {
    pub fn new(limit_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
        Self::with_scheduler(BrowserTimers, limit_ms, callback)
    }
}

impl<A: 'static, S: Scheduler> Throttled<A, S> {
    pub fn with_scheduler(scheduler: S, limit_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
        Self {
            limit_ms,
            callback: RefCell::new(Box::new(callback)),
            gate: Gate::default(),
            reopen: RefCell::new(None),
            scheduler,
        }
    }

    pub fn call(&self, arg: A) {
        if !self.gate.try_enter() {
            return;
        }
        let gate = self.gate.clone();
        let handle = self.scheduler.after(self.limit_ms, Box::new(move || gate.reopen()));
        *self.reopen.borrow_mut() = Some(handle);
        (*self.callback.borrow_mut())(arg);
    }
}

fn forward(func: &Function, arg: &JsValue) {
    if let Err(err) = func.call1(&JsValue::NULL, arg) {
        gloo_console::error!("Wrapped function threw:", err);
    }
}

/// JS-callable debounced wrapper around `func`. Only the first argument is
/// forwarded.
pub fn debounce_js(func: Function, wait_ms: u32) -> JsValue {
    let debounced = Debounced::new(wait_ms, move |arg: JsValue| forward(&func, &arg));
    Closure::<dyn Fn(JsValue)>::new(move |arg: JsValue| debounced.call(arg)).into_js_value()
}

/// JS-callable throttled wrapper around `func`. Only the first argument is
/// forwarded.
pub fn throttle_js(func: Function, limit_ms: u32) -> JsValue {
    let throttled = Throttled::new(limit_ms, move |arg: JsValue| forward(&func, &arg));
    Closure::<dyn Fn(JsValue)>::new(move |arg: JsValue| throttled.call(arg)).into_js_value()
}

/// A clock that only moves when told to, for driving timers in native
/// tests.
#[cfg(test)]
pub mod manual {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};

    use super::Scheduler;

    struct Task {
        id: u64,
        due: u64,
        run: Box<dyn FnOnce()>,
    }

    #[derive(Clone, Default)]
    pub struct ManualTimers {
        now: Rc<Cell<u64>>,
        next_id: Rc<Cell<u64>>,
        tasks: Rc<RefCell<Vec<Task>>>,
    }

    pub struct TaskHandle {
        id: u64,
        tasks: Weak<RefCell<Vec<Task>>>,
    }

    impl Drop for TaskHandle {
        fn drop(&mut self) {
            if let Some(tasks) = self.tasks.upgrade() {
                tasks.borrow_mut().retain(|task| task.id != self.id);
            }
        }
    }

    impl Scheduler for ManualTimers {
        type Handle = TaskHandle;

        fn after(&self, delay_ms: u32, run: Box<dyn FnOnce()>) -> TaskHandle {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.tasks.borrow_mut().push(Task {
                id,
                due: self.now.get() + u64::from(delay_ms),
                run,
            });
            TaskHandle {
                id,
                tasks: Rc::downgrade(&self.tasks),
            }
        }
    }

    impl ManualTimers {
        /// Moves the clock forward, running every task that falls due in
        /// order.
        pub fn advance(&self, ms: u64) {
            let until = self.now.get() + ms;
            loop {
                let next = {
                    let mut tasks = self.tasks.borrow_mut();
                    let due = tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, task)| task.due <= until)
                        .min_by_key(|(_, task)| (task.due, task.id))
                        .map(|(index, _)| index);
                    due.map(|index| tasks.remove(index))
                };
                let Some(task) = next else { break };
                self.now.set(task.due);
                (task.run)();
            }
            self.now.set(until);
        }

        pub fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualTimers;
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, impl FnMut(i32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value| sink.borrow_mut().push(value))
    }

    #[test]
    fn gate_lets_one_caller_through_until_reopened() {
        let gate = Gate::default();
        assert!(gate.try_enter());
        assert!(!gate.try_enter());
        assert!(!gate.clone().try_enter());
        gate.reopen();
        assert!(gate.try_enter());
    }

    #[test]
    fn debounce_runs_once_with_the_last_argument() {
        let timers = ManualTimers::default();
        let (seen, callback) = recorder();
        let debounced = Debounced::with_scheduler(timers.clone(), 100, callback);

        debounced.call(1);
        timers.advance(50);
        debounced.call(2);
        timers.advance(50);
        debounced.call(3);
        assert_eq!(timers.pending(), 1);

        timers.advance(99);
        assert!(seen.borrow().is_empty());
        timers.advance(1);
        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn debounce_fires_again_after_a_later_burst() {
        let timers = ManualTimers::default();
        let (seen, callback) = recorder();
        let debounced = Debounced::with_scheduler(timers.clone(), 100, callback);

        debounced.call(1);
        timers.advance(100);
        debounced.call(2);
        timers.advance(100);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropping_debounced_cancels_the_pending_call() {
        let timers = ManualTimers::default();
        let (seen, callback) = recorder();
        let debounced = Debounced::with_scheduler(timers.clone(), 100, callback);
        debounced.call(1);
        drop(debounced);
        timers.advance(200);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn throttle_drops_calls_inside_the_window() {
        let timers = ManualTimers::default();
        let (seen, callback) = recorder();
        let throttled = Throttled::with_scheduler(timers.clone(), 100, callback);

        throttled.call(1);
        throttled.call(2);
        timers.advance(99);
        throttled.call(3);
        assert_eq!(*seen.borrow(), vec![1]);

        timers.advance(1);
        throttled.call(4);
        throttled.call(5);
        assert_eq!(*seen.borrow(), vec![1, 4]);

        // Dropped calls are not replayed once the window closes.
        timers.advance(500);
        assert_eq!(*seen.borrow(), vec![1, 4]);
    }
}
