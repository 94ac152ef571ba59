/*!
Recovery from a conflict.

# Overview

A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.

Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone.

As the propagation queue is the unpropagated suffix of the trail, clearing the trail also clears any queued consequences.
*/

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets::{self},
    structures::literal::Literal,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Backjumps to the given target level.
    ///
    /// Sound for any target: passing a level greater than or equal to the current level does nothing.
    pub fn backjump(&mut self, target: LevelIndex) {
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        while self.trail.level() > target {
            for literal in self.trail.forget_top_level() {
                self.atom_db.drop_value(literal.atom());
            }
        }
        self.trail.q_head = self.trail.assignments.len();
    }

    /// Opens a fresh decision level.
    pub fn new_decision_level(&mut self) {
        self.trail.new_level();
    }

    /// The current decision level.
    pub fn decision_level(&self) -> LevelIndex {
        self.trail.level()
    }
}
