/// Direction the (real) head last moved, for telemetry.
///
/// `Parked` holds until the first non-bootstrap dispatch (spec §9: the
/// bootstrap dispatch never updates direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Parked,
    Left,
    Right,
}

/// Tracks the simulated disk head: the SSTF-advanced "real" position and the
/// FCFS-simulated "virtual" position, plus their cumulative seek totals.
///
/// Scoped to a single [`crate::Scheduler`] instance (the source this spec was
/// distilled from kept this as module-global state; see DESIGN.md).
#[derive(Debug, Default)]
pub struct HeadModel {
    real_pos: Option<u64>,
    virtual_pos: Option<u64>,
    direction: Direction,
    real_seek_total: u64,
    sim_seek_total: u64,
}

impl HeadModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn real_pos(&self) -> Option<u64> {
        self.real_pos
    }

    pub fn virtual_pos(&self) -> Option<u64> {
        self.virtual_pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn real_seek_total(&self) -> u64 {
        self.real_seek_total
    }

    pub fn sim_seek_total(&self) -> u64 {
        self.sim_seek_total
    }

    /// Record an arrival at `sector`, advancing the FCFS simulator (spec §4.1
    /// step 3). Returns the updated `sim_seek_total`.
    pub fn record_arrival(&mut self, sector: u64) -> u64 {
        if let Some(prev) = self.virtual_pos {
            self.sim_seek_total += sector.abs_diff(prev);
        }
        self.virtual_pos = Some(sector);
        self.sim_seek_total
    }

    /// Record a dispatch of `sector` (spec §4.2 step 5c). Returns the
    /// movement contributed to `real_seek_total` (0 on bootstrap).
    pub fn record_dispatch(&mut self, sector: u64) -> u64 {
        let movement = match self.real_pos {
            None => 0,
            Some(prev) => {
                self.direction = if sector > prev { Direction::Right } else { Direction::Left };
                sector.abs_diff(prev)
            }
        };
        self.real_seek_total += movement;
        self.real_pos = Some(sector);
        movement
    }
}
