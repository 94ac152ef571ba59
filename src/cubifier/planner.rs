/*!
The cubification path planner, and the execution of planned paths against the trail.

# Planning

Given the root cube `C = [L0, …, Ln-1]` of a clause, every implicant subcube `C \ {Li}` is to be visited and scored, with as little propagate/undo work as possible.
The planner emits a *path*: a sequence of moves, where a [push](PathMove::Push) means 'open a decision level, enqueue the literal, propagate, and score the prefix so far', and a [cancel](PathMove::Cancel) means 'pop the top of the auxiliary stack, closing its decision level'.

Consecutive subcube visits share their longest common prefix on the trail, so the planner arranges the visits over a *schedule* --- a permutation of the root's literals --- and walks the skipped position from the back of the schedule to the front.
Between visits only the differing suffix is cancelled and re-pushed.

The schedule places first any literal whose complementary subcube has already been scored: their visits are resolved at planning time by recording the clause as a further parent, and the literals then sit at the bottom of the trail where no visit disturbs them.
The remaining literals follow in descending [difficulty](super::Cubifier) order, so the decisions predicted to constrain the most land deep in the prefix.

If some subcube is found in the cube index the root clause is subsumed by an existing clause, and planning aborts.

# Execution

Execution interprets the moves against the trail, maintaining the auxiliary stack and the incremental cube:

- A pushed literal false on the current valuation conflicts: the cube extended with it is a strengthening of the clause, and the path ends.
- A pushed literal true under propagation is tautological in context: no level is opened and the cube is unchanged.
- Otherwise a level is opened, the literal is enqueued and propagated --- a conflict again ends the path with a strengthening --- and the prefix cube is scored as trail growth over cube size, with scores at or below 1.0 discarded as noise.

Whichever way the path ends, the trail is returned to the level it was found at.
*/

use crate::{
    context::GenericContext,
    db::PersistentId,
    misc::log::targets::{self},
    structures::{
        cube::Cube,
        literal::{CLiteral, Literal},
    },
};

use super::Cubifier;

/// A move of a cubification path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathMove {
    /// Open a decision level, enqueue the literal, propagate, and score the prefix so far.
    Push(CLiteral),

    /// Pop the top of the auxiliary stack, closing its decision level.
    Cancel,
}

/// An entry of the auxiliary stack: the pushed literal, and whether a decision level was opened for it.
struct StackEntry {
    literal: CLiteral,
    opened: bool,
}

impl Cubifier {
    /// Scores the implicant subcubes of `root`, the root cube of the clause at `slot`.
    ///
    /// Returns the conflicting cube if one was found along a path --- a strengthening of the clause --- and `root` itself otherwise.
    /// An empty cube is returned when planning finds the clause subsumed.
    pub fn cubify_internal<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        slot: usize,
        root: &Cube,
    ) -> Cube {
        debug_assert!(root.sane());

        let id = ctx
            .clause_db
            .persistent_id_at_slot(slot)
            .expect("cubified clause without an id");

        match self.plan_path(root, id) {
            None => Cube::default(),
            Some(path) => self.execute_path(ctx, id, root, &path),
        }
    }

    /// Plans the path visiting every unscored implicant subcube of `root`, on behalf of the clause with persistent id `id`.
    ///
    /// Returns `None` if some subcube is already indexed, as then the root clause is subsumed.
    pub fn plan_path(&mut self, root: &Cube, id: PersistentId) -> Option<Vec<PathMove>> {
        let size = root.len();

        // Partition the skip positions: subcubes already scored are recorded
        // as parents and placed at the front of the schedule, the rest are
        // scheduled by descending difficulty.
        let mut scored: Vec<CLiteral> = Vec::default();
        let mut pending: Vec<CLiteral> = Vec::default();

        for skip in 0..size {
            let mut term = Cube::default();
            for position in (0..size).filter(|position| *position != skip) {
                term.push(root[position]);
            }

            if self.ci.contains(&term) {
                log::trace!(target: targets::CUBIFY, "Planning met indexed subcube {term}");
                return None;
            }

            if self.cq.contains(&term) {
                self.cq.add_parent_id(&term, id);
                scored.push(root[skip]);
            } else {
                pending.push(root[skip]);
            }
        }

        let visits = pending.len();
        let mut schedule = scored;
        pending.sort_by(|a, b| {
            self.literal_difficulty[b.index()].total_cmp(&self.literal_difficulty[a.index()])
        });
        schedule.append(&mut pending);

        // Walk the skipped position from the back of the schedule to the
        // front, cancelling down to the shared prefix between visits.
        //
        // Between visits the stack holds a prefix of the schedule, so a
        // visit skipping position `skip` cancels to `skip` entries and
        // pushes the remainder of the schedule around the skip.
        let mut moves: Vec<PathMove> = Vec::default();
        let mut stack_size = 0;

        for skip in ((size - visits)..size).rev() {
            while stack_size > skip {
                moves.push(PathMove::Cancel);
                stack_size -= 1;
            }
            for position in (stack_size..size).filter(|position| *position != skip) {
                moves.push(PathMove::Push(schedule[position]));
            }
            stack_size = size - 1;
        }

        Some(moves)
    }

    /// Executes `path` against the trail, scoring prefixes on behalf of the clause with persistent id `id`.
    ///
    /// Returns the conflicting cube if one was met, and `root` otherwise.
    /// The decision level on entry is restored on every exit, conflict or not.
    pub fn execute_path<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        id: PersistentId,
        root: &Cube,
        path: &[PathMove],
    ) -> Cube {
        let level_zero = ctx.trail.level();
        let trail_zero = ctx.trail.assignment_count();

        let mut cube = Cube::default();
        let mut stack: Vec<StackEntry> = Vec::default();
        let mut conflict = false;

        'path_walk: for step in path {
            match step {
                PathMove::Cancel => {
                    let entry = stack.pop().expect("cancel on an empty stack");
                    if entry.opened {
                        ctx.backjump(ctx.trail.level() - 1);
                        cube.pop(entry.literal);
                    }
                }

                PathMove::Push(literal) => match ctx.value_of(*literal) {
                    Some(false) => {
                        // The prefix extended with the literal is conflicting,
                        // and strengthens the clause.
                        cube.push(*literal);
                        conflict = true;
                        break 'path_walk;
                    }

                    Some(true) => {
                        // Tautological under propagation: nothing to assert.
                        stack.push(StackEntry {
                            literal: *literal,
                            opened: false,
                        });
                    }

                    None => {
                        let propagations_before = ctx.counters.propagations;

                        ctx.new_decision_level();
                        cube.push(*literal);
                        ctx.enqueue(*literal, None);

                        if ctx.propagate_to_fixpoint().is_some() {
                            conflict = true;
                            break 'path_walk;
                        }
                        stack.push(StackEntry {
                            literal: *literal,
                            opened: true,
                        });

                        let growth = (ctx.trail.assignment_count() - trail_zero) as f64;
                        let score = growth / cube.len() as f64;

                        if cube.len() == 1 {
                            self.literal_difficulty[literal.index()] =
                                (ctx.counters.propagations - propagations_before) as f64;
                        }

                        if score > 1.0 {
                            self.cq.push(cube.clone(), score, id);
                        }
                    }
                },
            }
        }

        ctx.backjump(level_zero);

        match conflict {
            true => cube,
            false => root.clone(),
        }
    }
}
