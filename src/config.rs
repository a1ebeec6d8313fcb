use std::time::Duration;

pub const DEFAULT_QUEUE_SIZE: usize = 64;
pub const DEFAULT_MAX_WAIT_TIME: Duration = Duration::from_millis(50);

const QUEUE_SIZE_RANGE: std::ops::RangeInclusive<usize> = 1..=100;
const MAX_WAIT_TIME_MS_RANGE: std::ops::RangeInclusive<u64> = 20..=100;

/// Scheduler configuration, immutable after `init` (spec §3).
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub queue_size: usize,
    pub max_wait_time: Duration,
    pub debug: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { queue_size: DEFAULT_QUEUE_SIZE, max_wait_time: DEFAULT_MAX_WAIT_TIME, debug: false }
    }
}

/// One out-of-range field that was replaced by its default, as returned by
/// [`SchedulerConfig::validated`]. Surfaced to the caller as a
/// `CONFIG_DEFAULTED` event (spec §3, §7: "Out-of-range values are replaced
/// by defaults ... and a warning event is emitted").
#[derive(Debug, Clone)]
pub struct ConfigDefaulted {
    pub field: &'static str,
    pub requested: String,
    pub used: String,
}

impl SchedulerConfig {
    /// Validates each field against its documented range (spec §3 table),
    /// substituting the default for anything out of range, and returns the
    /// corrected config alongside a list describing each substitution.
    ///
    /// This never fails: range violations are a recoverable, locally-handled
    /// condition (spec §7), not a `Result::Err`.
    pub fn validated(self) -> (Self, Vec<ConfigDefaulted>) {
        let mut warnings = Vec::new();
        let mut config = self;

        if !QUEUE_SIZE_RANGE.contains(&self.queue_size) {
            warnings.push(ConfigDefaulted {
                field: "queue_size",
                requested: self.queue_size.to_string(),
                used: DEFAULT_QUEUE_SIZE.to_string(),
            });
            config.queue_size = DEFAULT_QUEUE_SIZE;
        }

        let requested_ms = self.max_wait_time.as_millis() as u64;
        if !MAX_WAIT_TIME_MS_RANGE.contains(&requested_ms) {
            warnings.push(ConfigDefaulted {
                field: "max_wait_time",
                requested: format!("{requested_ms}ms"),
                used: format!("{}ms", DEFAULT_MAX_WAIT_TIME.as_millis()),
            });
            config.max_wait_time = DEFAULT_MAX_WAIT_TIME;
        }

        (config, warnings)
    }
}
