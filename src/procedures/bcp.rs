/*!
Boolean constraint propagation.

# Overview

[propagate_to_fixpoint](crate::context::GenericContext::propagate_to_fixpoint) drains the unpropagated suffix of the trail, calling [bcp](crate::context::GenericContext::bcp) on each assignment.

bcp propagates an atom being assigned some value, given as a literal.
This is done by examining clauses watching the negation of the literal and, per clause, updating the watch if possible, queuing the consequence of an asserting clause, or identifying that the clause conflicts with the current valuation.

Each clause keeps its two watched literals at positions 0 and 1, and a clause is only inspected through a watched literal becoming false.
So, on inspection the false literal is moved to position 1, and position 0 holds the only literal which may be asserted --- which also establishes the invariant that the literal at position 0 of a reason clause is the literal the clause asserted.

# Complications

Use is made of [watchers_unchecked](crate::db::atom::AtomDB::watchers_unchecked) to obtain a pointer to the traversed watch list.
This avoids a mutable borrow of the atom database for the list conflicting with reads of the valuation and with watch updates made during the traversal.
The *borrowed* list will not be mutated through those calls: a replacement watch is always some literal other than the false literal whose list is under traversal, as the replacement cannot be false on the current valuation.

Watchers whose key no longer unlocks a clause are removed when encountered, which is what makes deletion of a watched clause safe without eager watch list maintenance.
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::BCPError,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Queues `literal` for propagation at the current level, with `reason` as the clause responsible, if any.
    ///
    /// # Soundness
    /// Requires the atom of the literal to have no value on the current valuation.
    pub fn enqueue(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        debug_assert!(self.value_of(literal).is_none());

        let level = self.trail.level();
        self.atom_db.set_value(literal, level, reason);
        self.trail.push(literal);
    }

    /// Propagates every queued assignment, returning the key of a conflicting clause if one is met.
    ///
    /// On a conflict the queue is drained, so a following call is a no-op until the trail is extended again.
    pub fn propagate_to_fixpoint(&mut self) -> Option<ClauseKey> {
        while self.trail.q_head < self.trail.assignments.len() {
            let literal = self.trail.assignments[self.trail.q_head];
            self.trail.q_head += 1;
            self.counters.propagations += 1;

            if let Err(BCPError::Conflict(key)) = unsafe { self.bcp(literal) } {
                self.trail.q_head = self.trail.assignments.len();
                return Some(key);
            }
        }
        None
    }

    /// Propagates the assignment of `literal` through the clauses watching its negation.
    ///
    /// # Safety
    /// Requires the watched literals of every stored clause to be at positions 0 and 1.
    pub unsafe fn bcp(&mut self, literal: CLiteral) -> Result<(), BCPError> {
        let false_literal = literal.negate();
        let list = &mut *self.atom_db.watchers_unchecked(false_literal);

        let mut index = 0;
        let mut length = list.len();

        'watch_loop: while index < length {
            let key = list[index];

            let Some(db_clause) = self.clause_db.get_mut(&key) else {
                // A stale key: the clause has been deleted since the watch was set.
                list.swap_remove(index);
                length -= 1;
                continue 'watch_loop;
            };

            if db_clause.literal_unchecked(0) == false_literal {
                db_clause.swap_literals(0, 1);
            }
            let watch = db_clause.literal_unchecked(0);

            if self.atom_db.value_of(watch.atom()) == Some(watch.polarity()) {
                // Satisfied through the other watch.
                index += 1;
                continue 'watch_loop;
            }

            // Search for a replacement for the false watch.
            let mut replacement = None;
            for position in 2..db_clause.size() {
                let candidate = db_clause.literal_unchecked(position);
                if self.atom_db.value_of(candidate.atom()) != Some(!candidate.polarity()) {
                    replacement = Some((position, candidate));
                    break;
                }
            }

            match replacement {
                Some((position, candidate)) => {
                    db_clause.swap_literals(1, position);
                    self.atom_db.watch(candidate, key);
                    list.swap_remove(index);
                    length -= 1;
                }

                None => match self.atom_db.value_of(watch.atom()) {
                    Some(_) => {
                        // The checks above leave only a false watch, so the clause conflicts.
                        log::trace!(target: targets::PROPAGATION, "Conflict at {key} on {literal}");
                        return Err(BCPError::Conflict(key));
                    }

                    None => {
                        log::trace!(target: targets::PROPAGATION, "Consequence of {key}: {watch}");
                        self.clause_db.bump_activity(key);
                        let level = self.trail.level();
                        self.atom_db.set_value(watch, level, Some(key));
                        self.trail.push(watch);
                        index += 1;
                    }
                },
            }
        }

        Ok(())
    }
}
