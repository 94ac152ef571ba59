//! Keys to access clauses stored in the clause database.

/// The index of a clause within a store of the clause database.
pub type FormulaIndex = u32;

/// The token of a formula index, used to distinguish re-use of the same [FormulaIndex].
pub type FormulaToken = u16;

/// A persistent clause identity, minted by the [bimap](crate::db::bimap) when an original clause is first recorded.
///
/// Persistent ids survive the deletion and relocation of *other* clauses; the id of a deleted clause is retired, never reissued.
pub type PersistentId = u32;

/// A key to access a clause stored in the clause database.
///
/// Within the clause database clauses are stored in slotted structures, and keys contain the index to the slot together with a token to distinguish reuse of the same index.
/// The token allows watch lists to be cleaned lazily: a watcher whose key no longer unlocks a clause is simply dropped when encountered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKey {
    /// The key to a clause of the formula.
    Original(FormulaIndex, FormulaToken),

    /// The key to a clause added by conflict analysis.
    Addition(FormulaIndex, FormulaToken),
}

impl ClauseKey {
    /// Extracts the index from a key.
    pub fn index(&self) -> usize {
        match self {
            Self::Original(index, _) => *index as usize,
            Self::Addition(index, _) => *index as usize,
        }
    }
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original(index, token) => write!(f, "Original({index}, {token})"),
            Self::Addition(index, token) => write!(f, "Addition({index}, {token})"),
        }
    }
}
