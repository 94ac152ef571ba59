/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some of these are internally expected --- e.g. BCP errors are used to control the flow of a solve.
- Others are external --- e.g. a build error is returned when an added clause makes the formula unsatisfiable, and the context may still be inspected.

Names of the error enums --- for the most part --- overlap with corresponding structs.
*/

use crate::db::ClauseKey;

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error when building a context.
    Build(BuildError),

    /// An error in the atom database.
    AtomDB(AtomDBError),

    /// An error related to parsing.
    Parse(ParseError),

    /// An error related to preprocessing.
    Preprocessing(PreprocessingError),
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseKey),
}

/// Noted errors when building a context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable clause.
    Unsatisfiable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// Failure to read the input.
    Io,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// An error during preprocessing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PreprocessingError {
    /// The formula was identified as unsatisfiable.
    Unsatisfiable,
}

impl From<PreprocessingError> for ErrorKind {
    fn from(e: PreprocessingError) -> Self {
        ErrorKind::Preprocessing(e)
    }
}
