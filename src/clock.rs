//! Monotonic time source plus one-shot deferred callbacks (spec §2, §6).
//!
//! `now_ms`, `schedule_after` and `cancel_scheduled` from spec §6 are folded
//! into a single `Clock` trait: a real clock needs a live timer to fire
//! deadlines, and a test needs to fake both together (see DESIGN.md, Open
//! Question 1). Grounded on `near_async::time::Clock`/`FakeClock`'s
//! real-vs-fake split (`chain/chain/src/tests/simple_chain.rs`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub type TimerCallback = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Host-provided monotonic clock and one-shot timer.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Schedules `callback` to run once, no earlier than `delay` from now.
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancels a previously scheduled callback. A no-op if it already fired
    /// or was already cancelled.
    fn cancel(&self, handle: TimerHandle);
}

/// Real clock, backed by a caller-supplied `tokio` runtime handle.
///
/// Only the deadline timer touches the runtime; the rest of the core is
/// synchronous (spec §5: "Suspension points: none within the core").
pub struct RealClock {
    runtime: tokio::runtime::Handle,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<u64, tokio::task::AbortHandle>>,
}

impl RealClock {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime, next_id: AtomicU64::new(0), tasks: Mutex::new(HashMap::new()) }
    }
}

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        self.tasks.lock().insert(id, join.abort_handle());
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(abort) = self.tasks.lock().remove(&handle.0) {
            abort.abort();
        }
    }
}

struct PendingTimer {
    id: u64,
    due: Duration,
    callback: Option<TimerCallback>,
}

/// Manually-advanced clock for deterministic tests, mirroring
/// `near_async::time::FakeClock`'s `advance()` API.
pub struct FakeClock {
    base: Instant,
    state: Mutex<FakeClockState>,
}

struct FakeClockState {
    offset: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            state: Mutex::new(FakeClockState { offset: Duration::ZERO, next_id: 0, pending: Vec::new() }),
        }
    }

    /// Advances the fake clock by `delta` and synchronously fires any
    /// callback whose deadline has now passed, in the order they were
    /// scheduled.
    pub fn advance(&self, delta: Duration) {
        let due_now: Vec<TimerCallback> = {
            let mut state = self.state.lock();
            state.offset += delta;
            let now = state.offset;
            let mut fired = Vec::new();
            state.pending.retain_mut(|t| {
                if t.due <= now {
                    if let Some(cb) = t.callback.take() {
                        fired.push(cb);
                    }
                    false
                } else {
                    true
                }
            });
            fired
        };
        for cb in due_now {
            cb();
        }
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.base + self.state.lock().offset
    }

    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.offset + delay;
        state.pending.push(PendingTimer { id, due, callback: Some(callback) });
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut state = self.state.lock();
        state.pending.retain(|t| t.id != handle.0);
    }
}
