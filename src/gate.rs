use std::time::Duration;

/// Pure predicate deciding whether a `dispatch` call drains the queue
/// (spec §4.7).
pub struct ReleaseGate;

impl ReleaseGate {
    /// Opens iff `force`, or the queue has reached `queue_size`, or the
    /// current batch has been open longer than `max_wait_time`.
    pub fn is_open(
        force: bool,
        queue_len: usize,
        queue_size: usize,
        elapsed_since_batch_start: Duration,
        max_wait_time: Duration,
    ) -> bool {
        force || queue_len >= queue_size || elapsed_since_batch_start > max_wait_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_below_threshold_and_deadline() {
        assert!(!ReleaseGate::is_open(
            false,
            3,
            4,
            Duration::from_millis(10),
            Duration::from_millis(50)
        ));
    }

    #[test]
    fn opens_on_force() {
        assert!(ReleaseGate::is_open(true, 0, 4, Duration::ZERO, Duration::from_millis(50)));
    }

    #[test]
    fn opens_on_threshold() {
        assert!(ReleaseGate::is_open(
            false,
            4,
            4,
            Duration::from_millis(10),
            Duration::from_millis(50)
        ));
    }

    #[test]
    fn opens_strictly_after_deadline() {
        assert!(!ReleaseGate::is_open(
            false,
            1,
            4,
            Duration::from_millis(50),
            Duration::from_millis(50)
        ));
        assert!(ReleaseGate::is_open(
            false,
            1,
            4,
            Duration::from_millis(51),
            Duration::from_millis(50)
        ));
    }
}
