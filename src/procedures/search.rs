/*!
Bounded conflict-driven search.

# Overview

[search](crate::context::GenericContext::search) runs the CDCL loop for up to a given number of conflicts:

- Queued assignments are propagated to fixpoint.
- A conflict is analysed to an asserting clause, the clause is learnt, and a backjump is made to the level the clause asserts on.
- Otherwise, the next assumption without a value is asserted, or a decision is made, or --- if every atom has a value --- a model has been found.

Restarts are *not* made here: the conflict budget is owned by the caller, and on exhaustion the trail is unwound to the root and an unknown report is returned.
This is what lets the [interleaved solve](crate::procedures::solve) use plain search as one phase among several within a restart window.

# Assumptions

The context's `assumptions` vector is asserted one literal per decision level before any free decision, following the usual incremental-solver treatment:
- An assumption already true on the current valuation opens an empty level.
- An assumption already false is final: the implicated assumptions are collected by [analyze_final](crate::context::GenericContext::analyze_final) into the `conflict` clause and an unsatisfiable report is returned.
- A conflict at a level at or below the assumptions may backjump *into* the assumption levels; the unwound assumptions are re-asserted on the following iterations.

An unsatisfiable report with an *empty* `conflict` clause indicates the formula itself is unsatisfiable, regardless of assumptions.
*/

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    procedures::{analysis::AnalysisResult, decision::DecisionOk},
    reports::Report,
    structures::{clause::ClauseSource, literal::Literal},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Searches for up to `conflict_budget` conflicts, under the assumptions of the context.
    pub fn search(&mut self, conflict_budget: u64) -> Report {
        self.analysis.ensure_capacity(self.atom_db.count());
        self.counters.fresh_conflicts = 0;

        loop {
            match self.propagate_to_fixpoint() {
                Some(conflict_key) => {
                    self.counters.total_conflicts += 1;
                    self.counters.fresh_conflicts += 1;

                    if !self.trail.decision_is_made() {
                        // A conflict before any decision or assumption concludes the solve.
                        self.note_root_conflict();
                        return Report::Unsatisfiable;
                    }

                    match self.conflict_analysis(conflict_key) {
                        AnalysisResult::UnitClause { literal } => {
                            self.backjump(0);
                            self.enqueue(literal, None);
                        }

                        AnalysisResult::AssertingClause {
                            clause,
                            backjump_level,
                        } => {
                            self.backjump(backjump_level);
                            let asserted = clause[0];
                            let key = self.clause_db.store(
                                clause,
                                ClauseSource::Addition,
                                &mut self.atom_db,
                            );
                            self.enqueue(asserted, Some(key));
                        }
                    }

                    let interval = self.config.reduction_interval.value;
                    if interval != 0 && self.counters.total_conflicts % interval == 0 {
                        log::info!(target: targets::REDUCTION, "Reduction at {} conflicts", self.counters.total_conflicts);
                        self.clause_db.reduce(&mut self.atom_db);
                    }
                }

                None => {
                    if self.counters.fresh_conflicts >= conflict_budget || !self.within_budget() {
                        self.backjump(0);
                        return Report::Unknown;
                    }

                    if !self.trail.decision_is_made() && !self.simplify() {
                        return Report::Unsatisfiable;
                    }

                    // Assert the next assumption without a value, if any remain.
                    let mut next = None;
                    while (self.trail.level() as usize) < self.assumptions.len() {
                        let assumption = self.assumptions[self.trail.level() as usize];
                        match self.value_of(assumption) {
                            Some(true) => self.new_decision_level(),
                            Some(false) => {
                                self.analyze_final(assumption.negate());
                                return Report::Unsatisfiable;
                            }
                            None => {
                                next = Some(assumption);
                                break;
                            }
                        }
                    }

                    let decision = match next {
                        Some(assumption) => assumption,
                        None => match self.make_decision() {
                            DecisionOk::Literal(decision) => decision,
                            DecisionOk::Exhausted => return Report::Satisfiable,
                        },
                    };

                    self.new_decision_level();
                    self.enqueue(decision, None);
                }
            }
        }
    }

    /// Notes a conflict at the root level: the formula is unsatisfiable outright.
    pub fn note_root_conflict(&mut self) {
        self.conflict.clear();
        self.state = ContextState::Unsatisfiable;
    }
}
