//! Structured telemetry records (spec §6) and the sink trait that receives
//! them. The crate ships one sink, [`TracingEventSink`], which logs through
//! `tracing` the way `chain/client/src/sync_jobs_actor.rs` and
//! `runtime/runtime/src/metrics.rs` emit structured fields; any other sink
//! (a channel, a counter-only stub for tests) is the embedder's choice.

use crate::head::Direction;
use crate::request::Rw;

pub const EVENT_TARGET: &str = "sstf";

/// One telemetry record, emitted only when `SchedulerConfig::debug` is set
/// (spec §6), except `ConfigDefaulted` which fires once at `init` regardless
/// (a misconfiguration warning, not per-request tracing).
#[derive(Debug, Clone)]
pub enum SchedulerEvent {
    Arrived { ts_ms: u64, block: u64, rw: Rw, sim_seek_total: u64 },
    Dispatched { ts_ms: u64, block: u64, rw: Rw, direction: Direction, real_seek_total: u64 },
    Timeout { ts_ms: u64 },
    Report { sim_seek_total: u64, real_seek_total: u64, savings_percent: Option<i64> },
    ConfigDefaulted { field: &'static str, requested: String, used: String },
}

/// Receives [`SchedulerEvent`]s emitted by the scheduler core.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SchedulerEvent);
}

/// Default sink: logs every event through `tracing` at a level matching its
/// severity (info for arrivals/dispatches/reports, warn for timeouts and
/// defaulted config).
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: SchedulerEvent) {
        match event {
            SchedulerEvent::Arrived { ts_ms, block, rw, sim_seek_total } => {
                tracing::info!(target: EVENT_TARGET, ts_ms, block, %rw, sim_seek_total, "ARRIVED");
            }
            SchedulerEvent::Dispatched { ts_ms, block, rw, direction, real_seek_total } => {
                tracing::info!(
                    target: EVENT_TARGET,
                    ts_ms,
                    block,
                    %rw,
                    direction = ?direction,
                    real_seek_total,
                    "DISPATCHED"
                );
            }
            SchedulerEvent::Timeout { ts_ms } => {
                tracing::warn!(target: EVENT_TARGET, ts_ms, "TIMEOUT");
            }
            SchedulerEvent::Report { sim_seek_total, real_seek_total, savings_percent } => {
                tracing::info!(
                    target: EVENT_TARGET,
                    sim_seek_total,
                    real_seek_total,
                    savings_percent,
                    "REPORT"
                );
            }
            SchedulerEvent::ConfigDefaulted { field, requested, used } => {
                tracing::warn!(target: EVENT_TARGET, field, requested, used, "CONFIG_DEFAULTED");
            }
        }
    }
}

/// Sink that drops every event; used by tests that don't care about telemetry.
#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: SchedulerEvent) {}
}
