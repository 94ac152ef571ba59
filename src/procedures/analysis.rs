/*!
Analysis of a conflict.

# Overview

[conflict_analysis](crate::context::GenericContext::conflict_analysis) takes the key of a clause unsatisfiable on the current valuation and applies resolution, using the clauses which forced the assignments involved, until a clause asserting the negation of a *unique implication point* of the current level is obtained.

The walk is the classic one: literals of the conflict clause are marked, the trail of the current level is traversed in reverse, and each marked assignment forced by a clause is resolved against that clause, until a single marked assignment of the current level remains.
Its negation becomes the asserting literal of the learnt clause, and the learnt clause is ordered so that the asserting literal is at position 0 and a literal of the backjump level is at position 1 --- the positions watched when the clause is stored.

[analyze_final](crate::context::GenericContext::analyze_final) is the corresponding procedure for a conflicting *assumption*: the trail above the first assumption is traversed and the assumptions implicated in forcing the conflict are collected, negated, into the context's `conflict` clause.
The cube-search step reads that clause back as the refuted subcube.

# Literature

The core procedure was developed by reading Decision Procedures and the Handbook of Satisfiability, chapters 3 and 4 on complete algorithms and CDCL techniques.
*/

use crate::{
    context::GenericContext,
    db::{ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
};

/// Scratch space for conflict analysis, kept on the context to avoid repeated allocation.
#[derive(Default)]
pub struct AnalysisBuffer {
    /// Atoms marked during the current analysis.
    seen: Vec<bool>,

    /// The marked atoms, for cheap unmarking.
    to_clear: Vec<Atom>,
}

impl AnalysisBuffer {
    /// Grows the buffer to track `count` atoms.
    pub fn ensure_capacity(&mut self, count: usize) {
        self.seen.resize(count, false);
    }

    fn mark(&mut self, atom: Atom) {
        self.seen[atom as usize] = true;
        self.to_clear.push(atom);
    }

    fn marked(&self, atom: Atom) -> bool {
        self.seen[atom as usize]
    }

    fn clear(&mut self) {
        for atom in self.to_clear.drain(..) {
            self.seen[atom as usize] = false;
        }
    }
}

/// Possible 'Ok' results from conflict analysis.
pub enum AnalysisResult {
    /// The result of analysis is a unit clause.
    UnitClause {
        /// The literal of the clause.
        literal: CLiteral,
    },

    /// The result of analysis is a (non-unit) asserting clause.
    AssertingClause {
        /// The learnt clause, asserting literal at position 0 and a backjump-level literal at position 1.
        clause: CClause,

        /// The level to backjump to, on which the clause asserts.
        backjump_level: LevelIndex,
    },
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Resolves the clause under `conflict_key` against the reasons of the current level to a first-UIP asserting clause.
    ///
    /// # Soundness
    /// Requires a decision (or assumption) to have been made, and the clause to be unsatisfiable on the current valuation.
    pub fn conflict_analysis(&mut self, conflict_key: ClauseKey) -> AnalysisResult {
        log::trace!(target: targets::ANALYSIS, "Analysis of {conflict_key} at level {}", self.trail.level());
        debug_assert!(self.trail.decision_is_made());

        let current_level = self.trail.level();

        // Position 0 is reserved for the asserting literal.
        let mut learnt: CClause = vec![CLiteral::new(0, false)];
        let mut unresolved: usize = 0;
        let mut pivot: Option<CLiteral> = None;
        let mut index = self.trail.assignment_count();
        let mut reason_key = conflict_key;

        loop {
            self.clause_db.bump_activity(reason_key);

            let clause = self
                .clause_db
                .get(&reason_key)
                .expect("lost clause during analysis");

            for literal in clause.literals() {
                if let Some(pivot) = pivot {
                    if literal.atom() == pivot.atom() {
                        continue;
                    }
                }

                let atom = literal.atom();
                if !self.analysis.marked(atom) && self.atom_db.level_of(atom) > 0 {
                    self.analysis.mark(atom);
                    self.atom_db.bump_activity(atom);

                    if self.atom_db.level_of(atom) >= current_level {
                        unresolved += 1;
                    } else {
                        learnt.push(*literal);
                    }
                }
            }

            // The most recent marked assignment is resolved on next.
            let resolved = loop {
                index -= 1;
                let assignment = self.trail.assignments[index];
                if self.analysis.marked(assignment.atom()) {
                    break assignment;
                }
            };

            self.analysis.seen[resolved.atom() as usize] = false;
            unresolved -= 1;
            pivot = Some(resolved);

            if unresolved == 0 {
                learnt[0] = resolved.negate();
                break;
            }

            reason_key = self
                .atom_db
                .reason_of(resolved.atom())
                .expect("marked assignment without a reason");
        }

        self.analysis.clear();
        self.atom_db.decay_activity();
        self.clause_db.decay_activity();

        if learnt.len() == 1 {
            let literal = learnt[0];
            log::trace!(target: targets::ANALYSIS, "Learnt unit {literal}");
            return AnalysisResult::UnitClause { literal };
        }

        // Move a literal of the backjump level to the second watched position.
        let mut deepest = 1;
        for position in 2..learnt.len() {
            if self.atom_db.level_of(learnt[position].atom())
                > self.atom_db.level_of(learnt[deepest].atom())
            {
                deepest = position;
            }
        }
        learnt.swap(1, deepest);
        let backjump_level = self.atom_db.level_of(learnt[1].atom());

        log::trace!(target: targets::ANALYSIS, "Learnt {} asserting at {backjump_level}", learnt.as_dimacs(false));
        AnalysisResult::AssertingClause {
            clause: learnt,
            backjump_level,
        }
    }

    /// Collects, into the context's `conflict` clause, the negations of the assumptions implicated in falsifying the assumption with negation `failed`.
    ///
    /// # Soundness
    /// Requires `failed` to be the negation of an assumption false on the current valuation.
    pub fn analyze_final(&mut self, failed: CLiteral) {
        self.conflict.clear();
        self.conflict.push(failed);

        if !self.trail.decision_is_made() {
            return;
        }

        self.analysis.mark(failed.atom());

        let first_level_start = self.trail.level_indices[0];
        for index in (first_level_start..self.trail.assignment_count()).rev() {
            let assignment = self.trail.assignments[index];
            let atom = assignment.atom();
            if !self.analysis.marked(atom) {
                continue;
            }

            match self.atom_db.reason_of(atom) {
                None => {
                    // A decision at or above the first assumption is an assumption.
                    self.conflict.push(assignment.negate());
                }

                Some(key) => {
                    let clause = self.clause_db.get(&key).expect("lost reason clause");
                    for literal in clause.literals() {
                        if literal.atom() != atom && self.atom_db.level_of(literal.atom()) > 0 {
                            self.analysis.mark(literal.atom());
                        }
                    }
                }
            }
        }

        self.analysis.clear();
        log::trace!(target: targets::CUBE_SEARCH, "Failed assumption clause {}", self.conflict.as_dimacs(false));
    }
}
