//! Shortest-Seek-Time-First (SSTF) block I/O scheduler core.
//!
//! A pluggable reordering layer that sits between request producers and the
//! dispatch queue feeding a physical device: requests accumulate in a
//! pending queue and, when a release condition fires, are drained in
//! nearest-sector-first order. See `SPEC_FULL.md` for the full design.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod head;
pub mod metrics;
pub mod queue;
pub mod request;
pub mod scheduler;
pub mod selector;

pub use clock::{Clock, FakeClock, RealClock, TimerHandle};
pub use config::{ConfigDefaulted, SchedulerConfig};
pub use error::{DispatchError, SchedulerError, SubmitError};
pub use events::{EventSink, NullEventSink, SchedulerEvent, TracingEventSink};
pub use gate::ReleaseGate;
pub use head::{Direction, HeadModel};
pub use queue::PendingQueue;
pub use request::{Request, Rw};
pub use scheduler::{Scheduler, SchedulerOps, SchedulerReport};
pub use selector::Selector;
