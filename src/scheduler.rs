//! The scheduler orchestrator (spec §4): owns the pending queue, the head
//! model and the batch/deadline state, and exposes `init`, `add_request`,
//! `dispatch`, `merged_siblings`, `shutdown` and `report`.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::clock::{Clock, TimerHandle};
use crate::config::SchedulerConfig;
use crate::error::{DispatchError, SchedulerError, SubmitError};
use crate::events::{EventSink, SchedulerEvent};
use crate::gate::ReleaseGate;
use crate::head::HeadModel;
use crate::metrics;
use crate::queue::PendingQueue;
use crate::request::Request;
use crate::selector::Selector;

/// Host-provided operations injected at `init` (spec §6): handing a chosen
/// request to the lower layer, and asking the consumer to call `dispatch`
/// again after the deadline fires.
pub trait SchedulerOps<R: Request>: Send + Sync {
    /// Hand `req` to the lower layer. Assumed infallible by contract except
    /// for the failure path documented in spec §4.2 / §7.
    fn submit(&self, req: R) -> Result<(), SubmitError>;

    /// Schedule a subsequent `dispatch` call on the consumer's own thread.
    /// Called from the deadline timer; must not block or re-enter the
    /// scheduler synchronously.
    fn kick(&self);
}

/// Snapshot returned by [`Scheduler::report`] (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerReport {
    pub sim_seek_total: u64,
    pub real_seek_total: u64,
    /// `(sim - real) * 100 / sim`, truncated; `None` when `sim_seek_total == 0`.
    pub savings_percent: Option<i64>,
}

struct SchedulerState<R> {
    queue: PendingQueue<R>,
    head: HeadModel,
    batch_start: Option<Instant>,
    timer_handle: Option<TimerHandle>,
}

impl<R: Request> SchedulerState<R> {
    fn new() -> Self {
        Self { queue: PendingQueue::new(), head: HeadModel::new(), batch_start: None, timer_handle: None }
    }
}

pub struct Scheduler<R: Request + Send + 'static> {
    config: SchedulerConfig,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
    ops: Arc<dyn SchedulerOps<R>>,
    created_at: Instant,
    state: Mutex<SchedulerState<R>>,
}

impl<R: Request + Send + 'static> Scheduler<R> {
    /// Allocates empty scheduler state, validating `config` (spec §3's
    /// range table) and emitting `CONFIG_DEFAULTED` for anything out of
    /// range (spec §7).
    pub fn init(
        config: SchedulerConfig,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn EventSink>,
        ops: Arc<dyn SchedulerOps<R>>,
    ) -> Self {
        let (config, warnings) = config.validated();
        for w in warnings {
            sink.emit(SchedulerEvent::ConfigDefaulted { field: w.field, requested: w.requested, used: w.used });
        }
        let created_at = clock.now();
        Self { config, clock, sink, ops, created_at, state: Mutex::new(SchedulerState::new()) }
    }

    fn now_ms(&self, now: Instant) -> u64 {
        // Relative to scheduler construction is sufficient; spec only
        // requires millisecond-resolution timestamps in event records, not
        // wall-clock time, and this stays correct under a FakeClock.
        now.duration_since(self.created_at).as_millis() as u64
    }

    /// Appends `req`, arming the deadline timer on the empty-to-non-empty
    /// transition and updating the FCFS simulator (spec §4.1).
    pub fn add_request(&self, req: R) {
        let sector = req.sector();
        let rw = req.rw();
        let mut state = self.state.lock();

        let was_empty = state.queue.is_empty();
        state.queue.push(req);

        if was_empty {
            let now = self.clock.now();
            state.batch_start = Some(now);
            let ops = self.ops.clone();
            let handle = self.clock.schedule_after(self.config.max_wait_time, Box::new(move || ops.kick()));
            state.timer_handle = Some(handle);
        }

        let sim_seek_total = state.head.record_arrival(sector);
        metrics::REQUESTS_ARRIVED_TOTAL.inc();
        metrics::SIM_SEEK_TOTAL.set(sim_seek_total as i64);

        if self.config.debug {
            let ts_ms = self.now_ms(self.clock.now());
            self.sink.emit(SchedulerEvent::Arrived { ts_ms, block: sector, rw, sim_seek_total });
        }
    }

    /// Drains the pending queue if the release gate is open, submitting
    /// each chosen request in nearest-sector order (spec §4.2).
    pub fn dispatch(&self, force: bool) -> Result<usize, DispatchError> {
        let span = tracing::info_span!(target: "sstf", "sstf_dispatch", force);
        let _guard = span.enter();
        let timer = metrics::DISPATCH_DURATION_SECONDS.start_timer();

        let mut state = self.state.lock();
        let n = state.queue.len();
        if n == 0 {
            return Ok(0);
        }

        let now = self.clock.now();
        let batch_start = state.batch_start.expect("batch_start set whenever queue is non-empty");
        let elapsed = now.duration_since(batch_start);
        let timed_out = elapsed > self.config.max_wait_time;

        if !ReleaseGate::is_open(force, n, self.config.queue_size, elapsed, self.config.max_wait_time) {
            return Ok(0);
        }

        if timed_out && self.config.debug {
            let ts_ms = self.now_ms(now);
            self.sink.emit(SchedulerEvent::Timeout { ts_ms });
        }

        if let Some(handle) = state.timer_handle.take() {
            self.clock.cancel(handle);
        }

        let mut drained = 0usize;
        loop {
            if state.queue.is_empty() {
                break;
            }

            let idx = match state.head.real_pos() {
                None => 0,
                Some(real_pos) => {
                    Selector::choose_index(&state.queue, real_pos).expect("queue checked non-empty above")
                }
            };
            let chosen = state.queue.remove_at(idx).expect("idx came from the same queue");
            let sector = chosen.sector();
            let rw = chosen.rw();

            state.head.record_dispatch(sector);
            drained += 1;

            if let Err(cause) = self.ops.submit(chosen) {
                drop(timer);
                if !state.queue.is_empty() {
                    let now = self.clock.now();
                    state.batch_start = Some(now);
                    let ops = self.ops.clone();
                    let handle =
                        self.clock.schedule_after(self.config.max_wait_time, Box::new(move || ops.kick()));
                    state.timer_handle = Some(handle);
                }
                return Err(DispatchError { submitted_before_failure: drained - 1, cause });
            }

            metrics::REQUESTS_DISPATCHED_TOTAL.inc();
            metrics::REAL_SEEK_TOTAL.set(state.head.real_seek_total() as i64);

            if self.config.debug {
                let ts_ms = self.now_ms(self.clock.now());
                self.sink.emit(SchedulerEvent::Dispatched {
                    ts_ms,
                    block: sector,
                    rw,
                    direction: state.head.direction(),
                    real_seek_total: state.head.real_seek_total(),
                });
            }
        }

        metrics::DISPATCH_BATCHES_TOTAL.inc();
        drop(timer);
        Ok(drained)
    }

    /// Removes `absorbed` from the pending queue if present, as directed by
    /// the host after a higher-layer merge (spec §4.3). No statistics change.
    pub fn merged_siblings(&self, _primary: &R, absorbed: &R) -> bool {
        let mut state = self.state.lock();
        state.queue.remove_matching(absorbed).is_some()
    }

    /// Tears down the scheduler. Fatal if the pending queue is non-empty
    /// (spec §3, §5, §7).
    pub fn shutdown(&self) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();
        if !state.queue.is_empty() {
            return Err(SchedulerError::ShutdownWithPendingRequests { pending: state.queue.len() });
        }
        if let Some(handle) = state.timer_handle.take() {
            self.clock.cancel(handle);
        }
        Ok(())
    }

    /// Pure function of current state (spec §4.5); safe to call repeatedly.
    pub fn report(&self) -> SchedulerReport {
        let state = self.state.lock();
        let sim_seek_total = state.head.sim_seek_total();
        let real_seek_total = state.head.real_seek_total();
        let savings_percent = if sim_seek_total == 0 {
            None
        } else {
            Some(
                ((sim_seek_total as i128 - real_seek_total as i128) * 100 / sim_seek_total as i128) as i64,
            )
        };

        if self.config.debug {
            self.sink.emit(SchedulerEvent::Report { sim_seek_total, real_seek_total, savings_percent });
        }

        SchedulerReport { sim_seek_total, real_seek_total, savings_percent }
    }
}
