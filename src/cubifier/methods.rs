/*!
Cubification of single clauses, cube-branch search, and refutation handling.

The operations here bridge the cubifier's stores and the engine: each resolves persistent ids to transient slots at the moment of use, and each leaves the trail at the level it found it.
*/

use rand::Rng;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    reports::Report,
    structures::{cube::Cube, literal::Literal},
};

use super::Cubifier;

impl Cubifier {
    /// True if some enqueued persistent id still resolves to a live clause, false otherwise.
    pub fn can_cubify<R: rand::Rng + std::default::Default>(
        &self,
        ctx: &GenericContext<R>,
    ) -> bool {
        self.cubify_queue
            .iter()
            .any(|id| ctx.clause_db.bimap().fw(*id).is_some())
    }

    /// Dequeues persistent ids until one resolves to a live clause, and cubifies that clause.
    pub fn cubify_one<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
    ) -> Report {
        while let Some(id) = self.cubify_queue.pop() {
            if let Some(slot) = ctx.clause_db.bimap().fw(id) {
                return self.cubify(ctx, slot);
            }
        }
        Report::Unknown
    }

    /// Cubifies the clause at transient slot `slot`: scores its implicant cubes, and strengthens or replaces the clause when the planner or execution shows it redundant.
    pub fn cubify<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        slot: usize,
    ) -> Report {
        debug_assert!(ctx.ok());
        debug_assert_eq!(ctx.trail.level(), 0);

        let clause_size = ctx.clause_db.clause_at_slot(slot).size();

        // Reduce the clause to a minimal conflicting cube (minimal in a weak sense) under the root assignment.
        let Some(root) = self.root_of(ctx, slot) else {
            // The clause is satisfied at the root.
            return Report::Unknown;
        };

        // If the minimal conflict cube is too big, don't cubify it (but prune the clause, if it shrank).
        if root.len() > self.config.max_cubify.value {
            if root.len() < clause_size {
                return self.prune_clause(ctx, slot, &root);
            }
            return Report::Unknown;
        }

        debug_assert!(root.len() > 1);
        debug_assert!(self.is_conflicted(ctx, &root));

        // Score the implicant cubes of the clause, watching for a conflicting
        // or subsumed subcube along the way.
        let post = self.cubify_internal(ctx, slot, &root);

        if post.is_empty() {
            // A subcube is already indexed: the clause is subsumed by an existing one.
            log::trace!(target: targets::CUBIFY, "Subsumed clause at slot {slot}");
            ctx.drop_clause(slot);
            return self.report_ok(ctx);
        }

        debug_assert!(post.subset_of(&root));
        debug_assert!(self.is_conflicted(ctx, &post));

        if post.len() < clause_size {
            // A strengthening: replace the clause with the negation of the
            // reduced cube, and queue the replacement for cubification.
            ctx.drop_clause(slot);

            if post.len() == 1 {
                let unit = post[0];
                debug_assert!(ctx.value_of(unit).is_none());
                let _ = ctx.add_clause(unit.negate());
            } else if !self.ci.contains(&post) {
                if let Some(id) = self.learn_negation_of(ctx, &post) {
                    self.cubify_queue.push(id);
                }
                self.ci.push(&post);
            }
        }

        self.report_ok(ctx)
    }

    /// Replaces the oversized clause at `slot` with the (shorter) negation of `root`, unless an equal clause is already indexed.
    fn prune_clause<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        slot: usize,
        root: &Cube,
    ) -> Report {
        log::trace!(target: targets::CUBIFY, "Pruned clause at slot {slot} to {} literals", root.len());
        ctx.drop_clause(slot);
        if !self.ci.contains(root) {
            let _ = ctx.add_clause(root.invert());
        }
        self.report_ok(ctx)
    }

    /// The negations of the literals of the clause at `slot` undefined at the root, or `None` if the clause is satisfied at the root.
    fn root_of<R: rand::Rng + std::default::Default>(
        &self,
        ctx: &GenericContext<R>,
        slot: usize,
    ) -> Option<Cube> {
        let mut root = Cube::default();
        for literal in ctx.clause_db.clause_at_slot(slot).literals() {
            match ctx.value_of(*literal) {
                // A true literal satisfies the clause.
                Some(true) => return None,
                // A false literal need not be included.
                Some(false) => {}
                // An undefined literal is included.
                None => root.push(literal.negate()),
            }
        }
        Some(root)
    }

    /// True if asserting `cube` at a fresh decision level falsifies a literal or propagates to a conflict. An assertion-only sanity check.
    pub fn is_conflicted<R: rand::Rng + std::default::Default>(
        &self,
        ctx: &mut GenericContext<R>,
        cube: &Cube,
    ) -> bool {
        debug_assert_eq!(ctx.trail.level(), 0);

        ctx.new_decision_level();
        for literal in cube.iter() {
            match ctx.value_of(*literal) {
                Some(false) => {
                    ctx.backjump(0);
                    return true;
                }
                Some(true) => {}
                None => ctx.enqueue(*literal, None),
            }
        }
        let conflicted = ctx.propagate_to_fixpoint().is_some();
        ctx.backjump(0);
        conflicted
    }

    /// Pushes the negation of `cube` as a new problem clause, returning the persistent id of the stored clause, if one was stored.
    ///
    /// Does not check whether the clause exists already.
    pub fn learn_negation_of<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        cube: &Cube,
    ) -> Option<crate::db::PersistentId> {
        debug_assert!(!cube.is_empty());
        debug_assert_eq!(ctx.trail.level(), 0);

        let slots_before = ctx.clause_db.originals_count();
        let _ = ctx.add_clause(cube.invert());

        match ctx.clause_db.originals_count() {
            count if count > slots_before => ctx.clause_db.persistent_id_at_slot(count - 1),
            _ => None,
        }
    }

    /// Picks the best cube in the queue, provided it is dense enough relative to the rolling mean.
    pub fn pick_cube<R: rand::Rng + std::default::Default>(
        &self,
        ctx: &mut GenericContext<R>,
    ) -> Option<Cube> {
        if self.cq.is_empty() {
            return None;
        }
        if self.cq.best_score() < self.config.k_t.value * self.cq.mean_score() {
            return None;
        }
        Some(self.cq.peek_best(ctx.rng.random_range(0..1_000_000)))
    }

    /// Searches inside the branch described by `cube`, by asserting its literals as assumptions.
    ///
    /// On anything but a model the trail is unwound to the root and the assumptions are cleared; the context's `conflict` clause holds the refuted subcube, negated.
    pub fn search_cube_branch<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        cube: &Cube,
        budget: u64,
    ) -> Report {
        debug_assert!(cube.sane());
        debug_assert_eq!(ctx.trail.level(), 0);
        debug_assert!(ctx.assumptions.is_empty());

        log::trace!(target: targets::CUBE_SEARCH, "Branching on {cube}");
        ctx.assumptions.extend(cube.iter().copied());
        ctx.conflict.clear();

        let status = ctx.search(budget);

        if status == Report::Satisfiable {
            return status;
        }

        ctx.backjump(0);
        ctx.assumptions.clear();
        status
    }

    /// Handles the refutation of `base`, reduced by search to the subcube `reduced`.
    ///
    /// Every parent clause of `base` which still resolves to a live slot is subsumed by the negation of `reduced`, and deleted.
    /// If the negation of `reduced` is not already indexed, it is learnt as a new problem clause and queued for cubification.
    pub fn refute_cube<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        base: &Cube,
        reduced: &Cube,
    ) -> Report {
        log::trace!(target: targets::CUBE_SEARCH, "Refuted {base} to {reduced}");

        if let Some((_, parents)) = self.cq.pop(base) {
            for id in parents {
                if let Some(slot) = ctx.clause_db.bimap().fw(id) {
                    ctx.drop_clause(slot);
                }
            }
        }

        if !self.ci.contains(reduced) {
            if let Some(id) = self.learn_negation_of(ctx, reduced) {
                self.cubify_queue.push(id);
            }
            self.ci.push(reduced);
        }

        self.report_ok(ctx)
    }

    /// Unknown while the context remains consistent, unsatisfiable otherwise.
    fn report_ok<R: rand::Rng + std::default::Default>(&self, ctx: &GenericContext<R>) -> Report {
        match ctx.ok() {
            true => Report::Unknown,
            false => Report::Unsatisfiable,
        }
    }
}
