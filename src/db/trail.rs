//! The trail of assignments made during a solve, together with the decision levels they were made on.
//!
//! The unpropagated suffix of the trail doubles as the propagation queue: [q_head](Trail::q_head) points one past the most recently propagated assignment.

use crate::{db::LevelIndex, structures::literal::CLiteral};

/// The trail.
#[derive(Default)]
pub struct Trail {
    /// Every assignment on the current valuation, in the order made.
    pub assignments: Vec<CLiteral>,

    /// For each decision level, the index into `assignments` at which the level opens.
    pub level_indices: Vec<usize>,

    /// The assignments at indices below `q_head` have been propagated.
    pub q_head: usize,
}

impl Trail {
    /// A count of the assignments on the trail.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.level_indices.len() as LevelIndex
    }

    /// Opens a fresh decision level.
    pub fn new_level(&mut self) {
        self.level_indices.push(self.assignments.len());
    }

    /// Stores an assignment at the current level.
    pub fn push(&mut self, literal: CLiteral) {
        self.assignments.push(literal);
    }

    /// True if some decision (or assumption) is active, false otherwise.
    pub fn decision_is_made(&self) -> bool {
        !self.level_indices.is_empty()
    }

    /// Removes the top level, returning the assignments made on it.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of the assignments.
    pub fn forget_top_level(&mut self) -> Vec<CLiteral> {
        match self.level_indices.pop() {
            Some(level_start) => self.assignments.split_off(level_start),
            None => Vec::default(),
        }
    }
}
