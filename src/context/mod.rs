//! The context --- to which formulas are added and within which solves take place.
//!
//! Strictly, a [GenericContext] and a [Context].
//!
//! The generic context is designed to be generic over various parameters.
//! Though, for the moment this is limited to the source of randomness.
//!
//! Still, this helps distinguish generic context methods against those intended for external use or a particular application.
//! In particular, [from_config](Context::from_config) is implemented for a context rather than a generic context to avoid requiring a source of randomness to be supplied alongside a config.
//!
//! # Example
//! ```rust
//! # use cubist_sat::context::Context;
//! # use cubist_sat::config::Config;
//! # use cubist_sat::reports::Report;
//! # use cubist_sat::structures::literal::Literal;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.fresh_literal();
//! let q = ctx.fresh_literal();
//!
//! assert!(ctx.add_clause(vec![p, q]).is_ok());
//! assert!(ctx.add_clause(-p).is_ok());
//!
//! assert_eq!(ctx.solve(), Report::Satisfiable);
//! assert_eq!(ctx.value_of_atom(q.atom()), Some(true));
//! ```

mod counters;
pub use counters::Counters;

use rand::SeedableRng;

use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail},
    generic::minimal_pcg::MinimalPCG32,
    procedures::analysis::AnalysisBuffer,
    structures::{atom::Atom, clause::CClause, literal::CLiteral},
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Clauses may be added, and nothing constrains the valuation.
    Input,

    /// The formula is known to be satisfiable, e.g. with a complete valuation.
    Satisfiable,

    /// The formula is known to be unsatisfiable, e.g. with an unsatisfiable clause identified.
    Unsatisfiable,

    /// The satisfiability of the formula is unknown.
    Solving,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Solving => write!(f, "Solving"),
        }
    }
}

/// A generic context, parameterised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [Default](std::default::Default).
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// The trail of assignments.
    /// See [db::trail](crate::db::trail) for details.
    pub trail: Trail,

    /// Literals to assume before any decision, one per decision level, in order.
    pub assumptions: Vec<CLiteral>,

    /// After an unsatisfiable search under assumptions, the clause of negated assumptions responsible.
    /// Empty after an unsatisfiable search otherwise.
    pub conflict: CClause,

    /// A model of the formula from the most recent satisfiable solve, indexed by atoms.
    pub model: Option<Vec<bool>>,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// Scratch space for conflict analysis.
    pub(crate) analysis: AnalysisBuffer,

    /// A cooperative interrupt, polled alongside the budget.
    interrupted: bool,
}

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            counters: Counters::default(),

            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::new(&config),
            trail: Trail::default(),

            assumptions: Vec::default(),
            conflict: Vec::default(),
            model: None,

            state: ContextState::Input,

            rng: MinimalPCG32::from_seed(0_u64.to_le_bytes()),

            analysis: AnalysisBuffer::default(),

            interrupted: false,

            config,
        }
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// False if the formula has been identified as unsatisfiable, true otherwise.
    pub fn ok(&self) -> bool {
        self.state != ContextState::Unsatisfiable
    }

    /// The value of `literal` on the current valuation, if its atom has a value.
    pub fn value_of(&self, literal: CLiteral) -> Option<bool> {
        use crate::structures::literal::Literal;
        self.atom_db
            .value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The value of `atom` on the current valuation, if any.
    pub fn value_of_atom(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// A count of the atoms of the context.
    pub fn atom_count(&self) -> usize {
        self.atom_db.count()
    }

    /// Requests a cooperative interrupt of the solve in progress.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Clears a cooperative interrupt.
    pub fn clear_interrupt(&mut self) {
        self.interrupted = false;
    }

    /// True while the interrupt flag is unset and the configured conflict and propagation limits have not been reached.
    ///
    /// Polled at phase boundaries and at the restart boundary; exhaustion surfaces as an unknown report.
    pub fn within_budget(&self) -> bool {
        !self.interrupted
            && self.counters.total_conflicts < self.config.conflict_limit.value
            && self.counters.propagations < self.config.propagation_limit.value
    }
}
