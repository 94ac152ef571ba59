//! Valuations, aka. a (partial) function from atoms to truth values.
//!
//! The canonical representation of a valuation is a vector of `Option<bool>`s indexed by atoms, with `None` for an atom without a value.
//!
//! ```rust
//! # use cubist_sat::structures::valuation::Valuation;
//! let valuation: Vec<Option<bool>> = vec![Some(true), None, Some(false)];
//!
//! assert_eq!(valuation.value_of(2), Some(false));
//! assert_eq!(valuation.unvalued_atoms().collect::<Vec<_>>(), vec![1]);
//! ```

use crate::structures::atom::Atom;

/// The valuation trait.
pub trait Valuation {
    /// The value of `atom` on the valuation, if one has been assigned.
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// An iterator over the atoms of the valuation without a value, in order.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// A count of the atoms of the valuation.
    fn atom_count(&self) -> usize;
}

/// The canonical implementation of a valuation.
pub type VValuation = Vec<Option<bool>>;

impl Valuation for VValuation {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        self[atom as usize]
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter()
            .enumerate()
            .filter_map(|(atom, value)| match value {
                None => Some(atom as Atom),
                Some(_) => None,
            })
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}
