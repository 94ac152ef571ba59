/*!
The cubifying step: search, cubification, cube search, and simplification, interleaved within each restart window.

# Overview

An *implicant cube* of a problem clause is a cube containing all but one literal of the clause's negation --- assuming an implicant trivially implies the negation of the missing literal.
The step scores implicant cubes by the unit propagations they force, and preferentially searches the branches the densest cubes describe.

The body of [step](Cubifier::step), with the iteration budget marked `X`:

1. Run a standard search for `X` conflicts.
2. Mark as `P` the number of propagations used by step 1.
3. Spend `k_c · P` propagations cubifying enqueued clauses, if any.
4. Spend at most `X` conflicts searching in the best-scored cubes.
5. Simplify.

In step 4, any cube reaching a model also gives a model for the full problem.
Any refuted cube gives some subclause of the cube's negation as an implicate of the formula: the parents of the cube are replaced by that (usually shorter) clause, and if the subclause is empty the full problem is unsatisfiable.

By default step 4 only runs once the cubification queue is exhausted; [always_search](crate::config::CubifierConfig::always_search) lifts the gate.

# Bookkeeping

The cubifier owns the [cube queue](crate::db::cube::queue), the [cube index](crate::db::cube::index), the stack of persistent ids enqueued for cubification, and the per-literal difficulty record used to order planning.
Everything it holds across calls into the engine is a persistent id, so clause deletion and relocation during search or simplification need no notice.

Wall time spent in each phase is accumulated, and [report_stats](Cubifier::report_stats) prints the split together with the exit point of the concluding step:

| Exit | Meaning |
|------|---------|
| 1 | cubification reached an unsatisfiable or satisfied state |
| 2 | cube search found a model |
| 3 | a cube refutation strengthened the formula into unsatisfiability |
| 4 | a cube branch was refuted by the empty clause |
| 5 | simplification failed |
*/

mod methods;
pub mod planner;

use std::time::{Duration, Instant};

use crate::{
    config::{Config, CubifierConfig},
    context::GenericContext,
    db::{cube::index::CubeIndex, cube::queue::CubeQueue, PersistentId},
    misc::log::targets::{self},
    procedures::solve::InterleavedStep,
    reports::Report,
    structures::cube::Cube,
};

/// The cubifying step of an interleaved solve.
pub struct Cubifier {
    /// A local copy of the cubifier configuration.
    config: CubifierConfig,

    /// Queue of cubes to search on, ordered by density score.
    /// This structure also tracks the mean density seen so far.
    cq: CubeQueue,

    /// Setlike index of cubes whose negations have been added to the problem clauses by the cubifier, used as a subsumption guard.
    ci: CubeIndex,

    /// Persistent ids of clauses enqueued for cubification, as a stack.
    cubify_queue: Vec<PersistentId>,

    /// For each literal encoding, the unit propagations last measured when the literal was the sole decision.
    /// Infinite for a literal never measured, so unknowns are tried first.
    literal_difficulty: Vec<f64>,

    /// Counter: how many clauses have been cubified?
    pub cubifications: u64,

    /// Counter: how many cubes have been refuted?
    pub cube_refutations: u64,

    /// The exit point of the concluding step, zero before a conclusion.
    exit_point: u8,

    time_search: Duration,
    time_cubify: Duration,
    time_cube_search: Duration,
    time_end_simplify: Duration,
}

impl Cubifier {
    /// A fresh cubifier, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Cubifier {
            config: config.cubifier.clone(),
            cq: CubeQueue::new(config.cubifier.cube_budget.value),
            ci: CubeIndex::default(),
            cubify_queue: Vec::default(),
            literal_difficulty: Vec::default(),
            cubifications: 0,
            cube_refutations: 0,
            exit_point: 0,
            time_search: Duration::default(),
            time_cubify: Duration::default(),
            time_cube_search: Duration::default(),
            time_end_simplify: Duration::default(),
        }
    }

    /// The mean density score over every cube scored so far.
    pub fn mean_score(&self) -> f64 {
        self.cq.mean_score()
    }

    /// The queue of scored cubes.
    pub fn queue(&self) -> &CubeQueue {
        &self.cq
    }

    /// The queue of scored cubes, mutably --- e.g. to seed cubes of interest before a solve.
    pub fn queue_mut(&mut self) -> &mut CubeQueue {
        &mut self.cq
    }

    /// Prints the per-phase time split and the counters of the cubifier.
    pub fn report_stats(&self) {
        let total_time = (self.time_search + self.time_cubify + self.time_cube_search).as_secs_f64();
        let pct = |duration: Duration| 100.0 * duration.as_secs_f64() / total_time;

        println!("| Search:       {:12.2} s ({:5.2} %)", self.time_search.as_secs_f64(), pct(self.time_search));
        println!("| Cubification: {:12.2} s ({:5.2} %)", self.time_cubify.as_secs_f64(), pct(self.time_cubify));
        println!("| Search(cube): {:12.2} s ({:5.2} %)", self.time_cube_search.as_secs_f64(), pct(self.time_cube_search));
        println!("| End simplify: {:12.2} s ({:5.2} %)", self.time_end_simplify.as_secs_f64(), pct(self.time_end_simplify));
        println!("| Exit:         {:12}", self.exit_point);
        println!("===============================================================================");
        println!("cubifications         : {:<12}", self.cubifications);
        println!("cube refutations      : {:<12}", self.cube_refutations);
        println!("final mean score      : {:<12}", self.mean_score());
    }
}

impl<R: rand::Rng + std::default::Default> InterleavedStep<R> for Cubifier {
    /// Enqueues every problem clause for cubification, and seeds the difficulty record.
    fn bootstrap(&mut self, ctx: &mut GenericContext<R>) {
        debug_assert_eq!(ctx.trail.level(), 0);

        self.literal_difficulty = vec![f64::INFINITY; 2 * ctx.atom_db.count()];

        self.cubify_queue.reserve(ctx.clause_db.originals_count());
        for slot in 0..ctx.clause_db.originals_count() {
            if let Some(id) = ctx.clause_db.persistent_id_at_slot(slot) {
                self.cubify_queue.push(id);
            }
        }
        log::info!(target: targets::CUBIFY, "Enqueued {} clauses for cubification", self.cubify_queue.len());
    }

    fn step(&mut self, ctx: &mut GenericContext<R>, budget: f64, _restarts: u32) -> Report {
        // The search phases use the budget value as their conflict budget.
        // Cubification is propagation-limited relative to the opening search phase.
        let conflict_budget = budget as u64;

        // PHASE: default search, without assumptions.
        let time_zero = Instant::now();
        let propagations_before_search = ctx.counters.propagations;
        let mut status = ctx.search(conflict_budget);
        let time_one = Instant::now();
        self.time_search += time_one - time_zero;

        // PHASE: cubification.
        //
        // Find and score the implicant cubes of one or more clauses, spending
        // propagations in proportion to those used by the search phase.
        // Any clause that enters cubification is cubified in full.
        if status == Report::Unknown {
            let spent = ctx.counters.propagations - propagations_before_search;
            let propagation_limit =
                propagations_before_search + (self.config.k_c.value * spent as f64) as u64;

            while ctx.counters.propagations < propagation_limit {
                if !ctx.within_budget() {
                    break;
                }
                if !self.can_cubify(ctx) {
                    break;
                }

                self.cubifications += 1;
                status = self.cubify_one(ctx);
                if status != Report::Unknown {
                    self.exit_point = 1;
                    break;
                }
            }
        }
        let time_two = Instant::now();
        self.time_cubify += time_two - time_one;

        // PHASE: cube search.
        //
        // Search while assuming the topmost admissible cube, for as long as
        // the budget allows. Unless always_search is set, this phase only
        // executes once all cubes have been scored.
        if status == Report::Unknown && (self.config.always_search.value || !self.can_cubify(ctx)) {
            let conflict_limit = ctx.counters.total_conflicts + conflict_budget;
            while ctx.counters.total_conflicts < conflict_limit {
                if !ctx.within_budget() {
                    break;
                }
                let Some(cube) = self.pick_cube(ctx) else {
                    break;
                };
                debug_assert!(!cube.is_empty());

                let branch_budget = conflict_limit - ctx.counters.total_conflicts;
                status = self.search_cube_branch(ctx, &cube, branch_budget);

                match status {
                    Report::Satisfiable => {
                        self.exit_point = 2;
                        break;
                    }

                    Report::Unsatisfiable => {
                        self.cube_refutations += 1;

                        if ctx.conflict.is_empty() {
                            self.exit_point = 4;
                            break;
                        }

                        let reduced = Cube::inverted(&ctx.conflict);
                        debug_assert!(reduced.subset_of(&cube));

                        status = self.refute_cube(ctx, &cube, &reduced);
                        if status == Report::Unsatisfiable {
                            self.exit_point = 3;
                            break;
                        }
                    }

                    Report::Unknown => {}
                }
            }
        }
        let time_three = Instant::now();
        self.time_cube_search += time_three - time_two;

        // PHASE: end simplification.
        if status == Report::Unknown && !ctx.simplify() {
            self.exit_point = 5;
            return Report::Unsatisfiable;
        }
        self.time_end_simplify += time_three.elapsed();

        status
    }
}
