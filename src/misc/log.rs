/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const PROPAGATION: &str = "propagation";
    pub const ANALYSIS: &str = "analysis";
    pub const REDUCTION: &str = "reduction";
    pub const CLAUSE_DB: &str = "clause_db";
    pub const VALUATION: &str = "valuation";
    pub const BACKJUMP: &str = "backjump";
    pub const PREPROCESSING: &str = "preprocessing";
    pub const CUBIFY: &str = "cubify";
    pub const CUBE_SEARCH: &str = "cube_search";
    pub const SIMPLIFY: &str = "simplify";
}
