//! A library for determining the satisfiability of boolean formulas written in conjunctive normal form, with search interleaved against *cubification*.
//!
//! cubist_sat is a conflict-driven clause-learning solver whose restart loop is generalised to a pluggable per-iteration step.
//! The step shipped with the library splits each restart window four ways:
//!
//! 1. Ordinary bounded CDCL search.
//! 2. *Cubification* --- the implicant cubes of problem clauses are enumerated by driving the trail through shared decision prefixes, and each cube is scored by the unit propagations it forces.
//! 3. *Cube search* --- the densest cubes are assumed and a bounded search is run inside the branch they describe.
//!    A branch which reaches a model is a model of the full formula, and a refuted branch yields a clause which (usually) strengthens the clauses the cube was drawn from.
//! 4. Simplification of the clause database at the root level.
//!
//! (An implicant cube of a clause contains all but one literal of the clause's negation; assuming such a cube trivially implies the negation of the missing literal.)
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context](crate::context).
//!
//! Contexts are built from a configuration, and clauses may be added through the [DIMACS](crate::context::GenericContext::read_dimacs) representation of a formula or [programatically](crate::context::GenericContext::add_clause).
//!
//! Internally, and at a high level, a solve is viewed in terms of the manipulation of, and relationships between, a handful of databases:
//! - A formula is stored in a [clause database](crate::db::clause).
//! - A valuation, and things indexed by atoms generally, are stored in an [atom database](crate::db::atom).
//! - Consequences of the current valuation with respect to the formula are stored on a [trail](crate::db::trail).
//! - Cubes discovered during cubification are stored in a [queue](crate::db::cube::queue) ordered by density and a [prefix trie](crate::db::cube::index).
//!
//! The clause database hands out two kinds of identity for a problem clause: a *transient* slot, which is the clause's current position in the problem clause vector, and a *persistent* id, which survives deletion and relocation.
//! The two are related by a [bidirectional map](crate::db::bimap), and the cubification machinery only ever holds persistent ids across calls into the engine.
//!
//! Useful starting points:
//! - The [solve procedure](crate::procedures::solve) for the restart loop and the step trait.
//! - The [cubifier](crate::cubifier) for the four-phase step, the path planner, and clause strengthening.
//! - The [configuration](crate::config) to see what is tunable.
//!
//! # Example
//!
//! ```rust
//! # use cubist_sat::config::Config;
//! # use cubist_sat::context::Context;
//! # use cubist_sat::cubifier::Cubifier;
//! # use cubist_sat::reports::Report;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.fresh_literal();
//! let q = ctx.fresh_literal();
//!
//! assert!(ctx.add_clause(vec![p, q]).is_ok());
//! assert!(ctx.add_clause(vec![-p, q]).is_ok());
//! assert!(ctx.add_clause(vec![p, -q]).is_ok());
//! assert!(ctx.add_clause(vec![-p, -q]).is_ok());
//!
//! let mut cubifier = Cubifier::from_config(&ctx.config);
//! assert_eq!(ctx.interleaved_solve(&mut cubifier), Report::Unsatisfiable);
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, and a variety of targets are defined in [misc::log] to help narrow output to relevant parts.
//! No log implementation is bundled.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod cubifier;

pub mod misc;

pub mod preprocessing;

pub mod reports;
