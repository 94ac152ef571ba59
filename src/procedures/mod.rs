//! The algorithm for determining satisfiability, factored into a collection of procedures.
//!
//! Each procedure is implemented as a collection of methods on a [context](crate::context::GenericContext), and documented in its module.

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod search;
pub mod simplify;
pub mod solve;
