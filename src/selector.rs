use crate::queue::PendingQueue;
use crate::request::Request;

/// Picks the pending request whose target sector is nearest the current
/// head position (spec §4.6).
pub struct Selector;

impl Selector {
    /// Index, within arrival order, of the request with minimum
    /// `|sector - real_pos|`. Ties resolve to the first match encountered
    /// during the scan (earliest arrival). `None` iff the queue is empty.
    ///
    /// Linear in queue length; acceptable since `queue_size ≤ 100` (spec §4.6).
    pub fn choose_index<R: Request>(queue: &PendingQueue<R>, real_pos: u64) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (idx, req) in queue.iter().enumerate() {
            let dist = req.sector().abs_diff(real_pos);
            match best {
                Some((_, best_dist)) if best_dist <= dist => {}
                _ => best = Some((idx, dist)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}
