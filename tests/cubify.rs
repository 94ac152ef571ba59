use cubist_sat::{
    config::Config,
    context::Context,
    cubifier::{planner::PathMove, Cubifier},
    procedures::solve::InterleavedStep,
    reports::Report,
    structures::{cube::Cube, literal::Literal},
};

mod step {
    use super::*;

    #[test]
    fn satisfied_clauses_are_left_alone() {
        // -b forces -a and c at the root, so every clause is satisfied and
        // cubification has nothing to do.
        let mut ctx = Context::from_config(Config::default());

        let a = ctx.fresh_literal();
        let b = ctx.fresh_literal();
        let c = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![a, b, c]).is_ok());
        assert!(ctx.add_clause(vec![-a, b]).is_ok());
        assert!(ctx.add_clause(-b).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        assert_eq!(ctx.interleaved_solve(&mut cubifier), Report::Satisfiable);

        let model = ctx.model.as_ref().expect("no model");
        assert!(!model[a.atom() as usize]);
        assert!(!model[b.atom() as usize]);
        assert!(model[c.atom() as usize]);

        assert!(cubifier.queue().is_empty());
    }

    #[test]
    fn unsatisfiable_formula() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        assert_eq!(ctx.interleaved_solve(&mut cubifier), Report::Unsatisfiable);
    }

    #[test]
    fn pigeons_into_fewer_holes() {
        // Three pigeons, two holes.
        let mut ctx = Context::from_config(Config::default());

        let mut place = Vec::default();
        for _ in 0..3 {
            place.push(vec![ctx.fresh_literal(), ctx.fresh_literal()]);
        }

        for pigeon in &place {
            assert!(ctx.add_clause(pigeon.clone()).is_ok());
        }
        for hole in 0..2 {
            for first in 0..3 {
                for second in (first + 1)..3 {
                    let exclusion = vec![-place[first][hole], -place[second][hole]];
                    assert!(ctx.add_clause(exclusion).is_ok());
                }
            }
        }

        let mut cubifier = Cubifier::from_config(&ctx.config);
        assert_eq!(ctx.interleaved_solve(&mut cubifier), Report::Unsatisfiable);
    }
}

mod planning {
    use super::*;

    #[test]
    fn paths_share_prefixes() {
        let mut ctx = Context::from_config(Config::default());

        let a = ctx.fresh_literal();
        let b = ctx.fresh_literal();
        let c = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![-a, -b, -c]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        cubifier.bootstrap(&mut ctx);

        let root = Cube::from_literals([a, b, c]);
        let id = ctx.clause_db.persistent_id_at_slot(0).expect("no id");

        // With no difficulty measurements the schedule is the natural order,
        // and consecutive visits unwind only the differing suffix.
        let path = cubifier.plan_path(&root, id).expect("subsumed");
        assert_eq!(
            path,
            vec![
                PathMove::Push(a),
                PathMove::Push(b),
                PathMove::Cancel,
                PathMove::Push(c),
                PathMove::Cancel,
                PathMove::Cancel,
                PathMove::Push(b),
                PathMove::Push(c),
            ],
        );
    }

    #[test]
    fn scored_subcubes_are_recorded_as_parents() {
        let mut ctx = Context::from_config(Config::default());

        let a = ctx.fresh_literal();
        let b = ctx.fresh_literal();
        let c = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![-a, -b, -c]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        cubifier.bootstrap(&mut ctx);

        let root = Cube::from_literals([a, b, c]);
        let id = ctx.clause_db.persistent_id_at_slot(0).expect("no id");

        let scored = Cube::from_literals([a, b]);
        cubifier.queue_mut().push(scored.clone(), 4.0, 900);

        let path = cubifier.plan_path(&root, id).expect("subsumed");

        // The already-scored subcube gains a parent and is not visited: its
        // skipped literal stays at the bottom of every pushed prefix.
        assert_eq!(cubifier.queue().parent_ids(&scored), Some([900, id].as_slice()));
        assert_eq!(
            path,
            vec![
                PathMove::Push(c),
                PathMove::Push(a),
                PathMove::Cancel,
                PathMove::Push(b),
            ],
        );
    }

    #[test]
    fn scoring_by_trail_growth() {
        let mut ctx = Context::from_config(Config::default());

        let a = ctx.fresh_literal();
        let b = ctx.fresh_literal();
        let c = ctx.fresh_literal();
        let d = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![-a, -b, -c]).is_ok());
        assert!(ctx.add_clause(vec![-a, d]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        cubifier.bootstrap(&mut ctx);

        assert_eq!(cubifier.cubify(&mut ctx, 0), Report::Unknown);

        // Assuming a forces d, so prefixes containing a are dense.
        // The singleton b forces nothing and its score of one is discarded,
        // while the full implicant {b, c} forces -a through the clause itself.
        let cq = cubifier.queue();
        assert!(cq.contains(&Cube::from_literals([a])));
        assert!(cq.contains(&Cube::from_literals([a, b])));
        assert!(cq.contains(&Cube::from_literals([a, c])));
        assert!(cq.contains(&Cube::from_literals([b, c])));
        assert!(!cq.contains(&Cube::from_literals([b])));

        assert_eq!(cq.best_score(), 2.0);
        assert_eq!(ctx.trail.level(), 0);
    }

    #[test]
    fn conflicting_subcube_strengthens_the_clause() {
        let mut ctx = Context::from_config(Config::default());

        let a = ctx.fresh_literal();
        let b = ctx.fresh_literal();
        let c = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![-a, -b, -c]).is_ok());
        assert!(ctx.add_clause(vec![-a, -b]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        cubifier.bootstrap(&mut ctx);

        // Cubifying the ternary clause meets the conflict of {a, b}, and the
        // clause is replaced by the (already present) strengthening.
        assert_eq!(cubifier.cubify(&mut ctx, 0), Report::Unknown);

        assert_eq!(ctx.clause_db.originals_count(), 2);
        for (_, clause) in ctx.clause_db.original_clauses() {
            assert_eq!(clause.size(), 2);
        }
        assert!(cubifier.can_cubify(&ctx));
        assert_eq!(ctx.trail.level(), 0);
    }
}

mod picking {
    use super::*;
    use cubist_sat::structures::literal::CLiteral;

    fn singleton(atom: u32) -> Cube {
        Cube::from_literals([CLiteral::new(atom, true)])
    }

    #[test]
    fn sparse_cubes_are_suppressed() {
        let mut ctx = Context::from_config(Config::default());
        let mut cubifier = Cubifier::from_config(&ctx.config);

        // With every cube near the mean, nothing clears the density gate.
        for atom in 0..20 {
            cubifier.queue_mut().push(singleton(atom), 1.1, atom);
        }
        assert_eq!(cubifier.pick_cube(&mut ctx), None);

        // A cube far above the rolling mean does.
        cubifier.queue_mut().push(singleton(20), 1000.0, 20);
        assert_eq!(cubifier.pick_cube(&mut ctx), Some(singleton(20)));
    }
}

mod refutation {
    use super::*;

    #[test]
    fn refutation_replaces_parent_clauses() {
        let mut ctx = Context::from_config(Config::default());

        let x = ctx.fresh_literal();
        let y = ctx.fresh_literal();
        let z = ctx.fresh_literal();
        let w = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![-x, -y, -z, w]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        cubifier.bootstrap(&mut ctx);

        let id = ctx.clause_db.persistent_id_at_slot(0).expect("no id");
        let base = Cube::from_literals([x, y, z]);
        let reduced = Cube::from_literals([x, y]);

        cubifier.queue_mut().push(base.clone(), 3.0, id);

        assert_eq!(cubifier.refute_cube(&mut ctx, &base, &reduced), Report::Unknown);

        // The four-literal parent is gone, replaced by the two-literal clause.
        assert_eq!(ctx.clause_db.originals_count(), 1);
        let (_, clause) = ctx.clause_db.original_clauses().next().expect("no clause");
        assert_eq!(clause.literals(), &[-x, -y]);

        // The base cube has left the queue, and the replacement awaits cubification.
        assert!(!cubifier.queue().contains(&base));
        assert!(cubifier.can_cubify(&ctx));
    }

    #[test]
    fn unit_refutations_bind_the_root() {
        let mut ctx = Context::from_config(Config::default());

        let x = ctx.fresh_literal();
        let y = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![-x, -y]).is_ok());

        let mut cubifier = Cubifier::from_config(&ctx.config);
        cubifier.bootstrap(&mut ctx);

        let id = ctx.clause_db.persistent_id_at_slot(0).expect("no id");
        let base = Cube::from_literals([x, y]);
        let reduced = Cube::from_literals([x]);

        cubifier.queue_mut().push(base.clone(), 2.0, id);

        assert_eq!(cubifier.refute_cube(&mut ctx, &base, &reduced), Report::Unknown);

        // A unit strengthening lands on the valuation rather than the store.
        assert_eq!(ctx.clause_db.originals_count(), 0);
        assert_eq!(ctx.value_of_atom(x.atom()), Some(false));
    }
}
