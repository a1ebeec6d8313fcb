use std::fmt;

/// Read/write tag carried by a [`Request`] for telemetry only.
///
/// The scheduler never branches on this value; it is surfaced verbatim in
/// [`crate::events::SchedulerEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rw {
    Read,
    Write,
}

impl fmt::Display for Rw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rw::Read => write!(f, "R"),
            Rw::Write => write!(f, "W"),
        }
    }
}

/// A single I/O request as seen by the scheduler core.
///
/// The payload is opaque to the scheduler: it only ever reads [`Request::sector`]
/// and [`Request::rw`], and compares requests with [`PartialEq`] when removing
/// an element (`merged_siblings`). Implementors typically wrap a handle back
/// into the host's own request representation.
pub trait Request: fmt::Debug + PartialEq {
    /// Target sector, i.e. the address the Selector orders on.
    fn sector(&self) -> u64;

    /// Read/write tag, telemetry-only.
    fn rw(&self) -> Rw;
}
