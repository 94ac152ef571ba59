/*!
The solve loop: restarts scheduled around a pluggable per-iteration step.

# Overview

The usual solve procedure is:

1. Run preprocessing (unless disabled).
2. Loop:
    1. Determine an iteration budget from the restart policy.
    2. Bounded CDCL search under that budget.
    3. If solved, or out of overall budget, break.
3. If satisfiable, materialise the model.

[interleaved_solve](GenericContext::interleaved_solve) generalises step 2.2 to arbitrary code through the [InterleavedStep] trait, with a hook ([bootstrap](InterleavedStep::bootstrap)) run between steps 1 and 2.
The name refers to the intended use of doing something *in addition to* the search call, rather than instead of it: search calls are 'interleaved' with the other work of the step.

[SearchStep] recovers the usual procedure, and [solve](GenericContext::solve) is sugar for it.
The [cubifier](crate::cubifier) is the step this library is built around.

# Budgets

On the luby schedule the budget of iteration `r` is `restart_first · restart_base^luby(r)`; otherwise it is `restart_first · r^restart_base`.
*/

use crate::{
    context::{ContextState, GenericContext},
    generic::luby::luby_exp,
    reports::Report,
};

/// A per-iteration step of the solve loop, together with a hook run before the loop.
///
/// The trait stands in for the override points a solver subclass would carry: implementations hold whatever state the step needs, and receive the context each call.
pub trait InterleavedStep<R: rand::Rng + std::default::Default> {
    /// Executed once, before the solve loop.
    fn bootstrap(&mut self, _ctx: &mut GenericContext<R>) {}

    /// Executed as step 2.2 of the solve loop, under `budget` conflicts.
    ///
    /// Returns:
    /// - [Report::Unknown] if a conclusion could not be reached,
    /// - [Report::Satisfiable] if a model has been found,
    /// - [Report::Unsatisfiable] if unsatisfiability has been established.
    fn step(&mut self, ctx: &mut GenericContext<R>, budget: f64, restarts: u32) -> Report;
}

/// The default solver step: search from the top, for the whole budget.
pub struct SearchStep;

impl<R: rand::Rng + std::default::Default> InterleavedStep<R> for SearchStep {
    fn step(&mut self, ctx: &mut GenericContext<R>, budget: f64, _restarts: u32) -> Report {
        ctx.search(budget as u64)
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the formula in the context, running `step` at each restart iteration.
    pub fn interleaved_solve(&mut self, step: &mut impl InterleavedStep<R>) -> Report {
        // Clear internals.
        self.model = None;
        self.conflict.clear();

        // If we know we're unsatisfiable already, there is nothing to do.
        if !self.ok() {
            return Report::Unsatisfiable;
        }

        if self.config.preprocessing.value && self.preprocess().is_err() {
            return Report::Unsatisfiable;
        }

        // Root propagation, verifying the clauses may be satisfiable before anything is built on them.
        if self.propagate_to_fixpoint().is_some() {
            self.note_root_conflict();
            return Report::Unsatisfiable;
        }

        self.state = ContextState::Solving;

        // Preparations that need to run before any iterations do.
        step.bootstrap(self);

        // Run the step under the restart policy.
        let mut status = Report::Unknown;
        let mut restarts: u32 = 0;
        while status == Report::Unknown {
            let budget = self.restart_budget(restarts);

            status = step.step(self, budget, restarts);

            // Check for early exit conditions: interrupted, or out of allowed conflicts or propagations.
            if !self.within_budget() {
                break;
            }

            restarts += 1;
            self.counters.restarts += 1;
        }

        // If the step concluded, update the internal state:
        // - On a satisfying assignment, materialise the model before the trail is unwound.
        // - On unsatisfiability independent of any assumption, mark the context unsatisfiable.
        match status {
            Report::Satisfiable => {
                self.state = ContextState::Satisfiable;
                let model = self
                    .atom_db
                    .valuation()
                    .iter()
                    .enumerate()
                    .map(|(atom, value)| {
                        (*value).unwrap_or_else(|| self.atom_db.previous_value_of(atom as u32))
                    })
                    .collect();
                self.model = Some(model);
            }

            Report::Unsatisfiable if self.conflict.is_empty() => {
                self.state = ContextState::Unsatisfiable;
            }

            _ => {}
        }

        self.backjump(0);
        self.assumptions.clear();

        status
    }

    /// Determines the satisfiability of the formula in the context by plain bounded searches.
    pub fn solve(&mut self) -> Report {
        self.interleaved_solve(&mut SearchStep)
    }

    /// The conflict budget of restart iteration `restarts`.
    fn restart_budget(&self, restarts: u32) -> f64 {
        let first = self.config.restart_first.value as f64;
        let base = self.config.restart_base.value;
        match self.config.luby_restarts.value {
            true => first * luby_exp(restarts, base),
            false => first * (restarts as f64).powf(base),
        }
    }
}
