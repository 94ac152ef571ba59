/*!
Simplification of the clause database at the root level.

# Overview

With the trail at level zero, every assignment is permanent, and so:
- A clause containing a true literal is satisfied outright and may be removed.
- The removal of addition clauses is unconditional bookkeeping, while removal of *original* clauses compacts the transient slot vector, with the slot moves recorded through the [bimap](crate::db::bimap)'s buffered rewrite so persistent ids remain valid.

The procedure is skipped when the root assignment has not grown since the previous call, as nothing new can have become satisfied.
*/

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Simplifies the clause database against the root valuation.
    ///
    /// Returns false if the formula is, or is found to be, unsatisfiable.
    ///
    /// # Soundness
    /// Requires the trail to be at decision level zero.
    pub fn simplify(&mut self) -> bool {
        debug_assert_eq!(self.trail.level(), 0);

        if self.state == ContextState::Unsatisfiable {
            return false;
        }

        if self.propagate_to_fixpoint().is_some() {
            self.note_root_conflict();
            return false;
        }

        if self.trail.assignment_count() == self.counters.last_simplify_assignments {
            return true;
        }

        log::trace!(target: targets::SIMPLIFY, "Simplify at {} root assignments", self.trail.assignment_count());
        self.clause_db.remove_satisfied(&mut self.atom_db);
        self.counters.last_simplify_assignments = self.trail.assignment_count();

        true
    }
}
