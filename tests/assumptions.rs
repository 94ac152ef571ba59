use cubist_sat::{config::Config, context::Context, reports::Report, structures::literal::Literal};

mod assumptions {
    use super::*;

    #[test]
    fn satisfiable_inside_branch() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        ctx.assumptions.push(-p);
        assert_eq!(ctx.search(u64::MAX), Report::Satisfiable);
        assert_eq!(ctx.value_of_atom(q.atom()), Some(true));

        ctx.backjump(0);
        ctx.assumptions.clear();
    }

    #[test]
    fn failed_assumptions_are_collected() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();
        let r = ctx.fresh_literal();

        // p implies q.
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        // The innocent r plays no part in the conflict.
        ctx.assumptions.push(p);
        ctx.assumptions.push(r);
        ctx.assumptions.push(-q);

        assert_eq!(ctx.search(u64::MAX), Report::Unsatisfiable);

        // The conflict clause holds the negations of the implicated assumptions.
        assert_eq!(ctx.conflict.len(), 2);
        assert!(ctx.conflict.contains(&-p));
        assert!(ctx.conflict.contains(&q));
        assert!(!ctx.conflict.iter().any(|l| l.atom() == r.atom()));

        // The formula itself remains satisfiable.
        ctx.backjump(0);
        ctx.assumptions.clear();
        assert_eq!(ctx.solve(), Report::Satisfiable);
    }

    #[test]
    fn root_unsatisfiability_leaves_an_empty_conflict() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        ctx.assumptions.push(p);

        assert_eq!(ctx.search(u64::MAX), Report::Unsatisfiable);
        assert!(ctx.conflict.is_empty());
        assert!(!ctx.ok());
    }
}
