//! Reports from a solve.

/// A report on the satisfiability of the formula in a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The formula is satisfiable, e.g. as a model has been found.
    Satisfiable,

    /// The formula is unsatisfiable, e.g. as an unsatisfiable clause has been identified.
    Unsatisfiable,

    /// Satisfiability was not established, e.g. as some budget was exhausted.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
