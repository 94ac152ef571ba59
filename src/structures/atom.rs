/*!
(The internal representation of) an atom (aka. a 'variable').

Each atom is a u32 *u* such that either *u* is 0, or *u - 1* is an atom.
That is, the atoms of a context are [0..*m*) for some *m*, which allows atoms to be used as the indices of a structure (a valuation, a watch list, the literal difficulty vector, etc.) without taking too much space.

The external representation of an atom is its successor, in keeping with the DIMACS convention of strictly positive variable names.

# Notes
- In the SAT literature these are often called 'variables' while in the logic literature these are often called 'atoms'.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
///
/// Limited by the representation of literals as `2·atom + polarity`.
pub const ATOM_MAX: Atom = (u32::MAX >> 1) - 1;
