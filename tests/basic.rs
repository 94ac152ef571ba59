use cubist_sat::{builder::ClauseOk, config::Config, context::Context, reports::Report};

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal();

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(p));

        assert_eq!(ctx.solve(), Report::Satisfiable);
    }

    #[test]
    fn conflict() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        assert_eq!(ctx.solve(), Report::Unsatisfiable);
        assert!(!ctx.ok());
    }

    #[test]
    fn unit_conjunct() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(vec![p, q]));
        assert!(ctx.add_clause(-p).is_ok());

        assert_eq!(ctx.solve(), Report::Satisfiable);

        use cubist_sat::structures::literal::Literal;
        assert_eq!(ctx.value_of_atom(p.atom()), Some(false));
        assert_eq!(ctx.value_of_atom(q.atom()), Some(true));
    }

    #[test]
    fn duplicates() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, p, q, q]).is_ok());

        assert_eq!(ctx.clause_db.originals_count(), 1);
        let (_, clause) = ctx.clause_db.original_clauses().next().expect("no clause");
        assert_eq!(clause.size(), 2);
    }

    #[test]
    fn tautology_skip() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert_eq!(Ok(ClauseOk::Skipped), ctx.add_clause(vec![p, -q, -p]));
        assert_eq!(ctx.clause_db.originals_count(), 0);
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();

        assert!(ctx.add_clause(p).is_ok());
        assert!(ctx.add_clause(-p).is_err());

        assert_eq!(ctx.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn model_extends_to_every_atom() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();
        let _floating = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert_eq!(ctx.solve(), Report::Satisfiable);

        let model = ctx.model.as_ref().expect("no model");
        assert_eq!(model.len(), 3);
    }
}

mod dimacs {
    use super::*;

    #[test]
    fn read_and_solve() {
        let mut ctx = Context::from_config(Config::default());

        let dimacs = "c a small satisfiable formula
p cnf 3 3
1 2 0
-1 3 0
-3 0
";
        assert!(ctx.read_dimacs(dimacs.as_bytes()).is_ok());
        assert_eq!(ctx.atom_count(), 3);
        assert_eq!(ctx.solve(), Report::Satisfiable);

        // -3 forces -1 through the second clause, and so 2 through the first.
        assert_eq!(ctx.value_of_atom(0), Some(false));
        assert_eq!(ctx.value_of_atom(1), Some(true));
        assert_eq!(ctx.value_of_atom(2), Some(false));
    }

    #[test]
    fn unsatisfiable_during_read() {
        let mut ctx = Context::from_config(Config::default());

        let dimacs = "p cnf 1 2
1 0
-1 0
";
        assert!(ctx.read_dimacs(dimacs.as_bytes()).is_ok());
        assert!(!ctx.ok());
        assert_eq!(ctx.solve(), Report::Unsatisfiable);
    }
}
