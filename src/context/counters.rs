//! Counters over the lifetime of a context.

/// Counters over the lifetime of a context.
#[derive(Default)]
pub struct Counters {
    /// A count of every conflict seen.
    pub total_conflicts: u64,

    /// A count of conflicts seen in the current bounded search call.
    pub fresh_conflicts: u64,

    /// A count of every decision made.
    pub total_decisions: u64,

    /// A count of every literal propagated.
    pub propagations: u64,

    /// A count of restart iterations of the solve loop.
    pub restarts: u64,

    /// The size of the trail when the clause database was last simplified.
    pub last_simplify_assignments: usize,
}
