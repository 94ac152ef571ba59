//! Cubes, aka. a collection of literals interpreted as the *conjunction* of those literals.
//!
//! A cube is kept as a vector of literals in strictly ascending [index](crate::structures::literal::Literal::index) order, with no duplicate literal and no atom appearing under both polarities.
//! The ordered representation makes prefix tests cheap, which the [cube trie](crate::db::cube::index) and the [path planner](crate::cubifier) rely on.
//!
//! ```rust
//! # use cubist_sat::structures::cube::Cube;
//! # use cubist_sat::structures::literal::{CLiteral, Literal};
//! let p = CLiteral::new(0, true);
//! let q = CLiteral::new(1, false);
//!
//! let mut cube = Cube::default();
//! cube.push(q);
//! cube.push(p);
//! cube.push(p); // a repeated push is a no-op
//!
//! assert_eq!(cube.len(), 2);
//! assert_eq!(cube[0], p);
//! assert!(cube.sane());
//! assert_eq!(cube.invert(), vec![-p, -q]);
//! ```

use crate::structures::{
    clause::CClause,
    literal::{CLiteral, Literal},
};

/// An ordered, duplicate-free conjunction of literals.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cube {
    literals: Vec<CLiteral>,
}

impl Cube {
    /// A cube built by [push](Cube::push)ing each literal of `literals`, in any order.
    pub fn from_literals(literals: impl IntoIterator<Item = CLiteral>) -> Self {
        let mut cube = Cube::default();
        for literal in literals {
            cube.push(literal);
        }
        cube
    }

    /// A count of the literals in the cube.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True if the cube contains no literals, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Removes every literal from the cube.
    pub fn clear(&mut self) {
        self.literals.clear();
    }

    /// Inserts `literal`, preserving ascending order.
    /// A no-op if the literal is already present.
    pub fn push(&mut self, literal: CLiteral) {
        if self.contains(literal) {
            return;
        }

        // Bubble the literal down to its place.
        let count = self.literals.len();
        self.literals.push(literal);
        for position in (1..=count).rev() {
            if self.literals[position] < self.literals[position - 1] {
                self.literals.swap(position - 1, position);
            } else {
                return;
            }
        }
    }

    /// Removes `literal`, if present, preserving the order of the remaining literals.
    pub fn pop(&mut self, literal: CLiteral) {
        if let Some(position) = self.literals.iter().position(|l| *l == literal) {
            self.literals.remove(position);
        }
    }

    /// True if `literal` is in the cube, false otherwise.
    pub fn contains(&self, literal: CLiteral) -> bool {
        self.literals.contains(&literal)
    }

    /// An iterator over the literals of the cube, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &CLiteral> {
        self.literals.iter()
    }

    /// True if every literal of the cube is contained in `other`, false otherwise.
    pub fn subset_of(&self, other: &Cube) -> bool {
        self.literals.iter().all(|literal| other.contains(*literal))
    }

    /// True if `other` is a prefix of the cube, false otherwise.
    pub fn starts_with(&self, other: &Cube) -> bool {
        self.literals.starts_with(&other.literals)
    }

    /// The order-preserving merge of the cube with `other`.
    pub fn union(&self, other: &Cube) -> Cube {
        let mut merged = self.clone();
        for literal in other.iter() {
            merged.push(*literal);
        }
        merged
    }

    /// The clause whose literals are the negations of the cube's literals, in the same positional order.
    pub fn invert(&self) -> CClause {
        self.literals.iter().map(|literal| literal.negate()).collect()
    }

    /// The cube built from the negations of the literals of `clause`.
    pub fn inverted(clause: &[CLiteral]) -> Cube {
        let mut cube = Cube::default();
        for literal in clause {
            cube.push(literal.negate());
        }
        cube
    }

    /// The representation invariant: literals strictly ascending, and no atom reused with the opposite sign.
    ///
    /// Higher layers require this of every cube they observe; a violation indicates a bug upstream.
    pub fn sane(&self) -> bool {
        self.literals.windows(2).all(|pair| {
            let (a, b) = (pair[0], pair[1]);
            a < b && a.atom() != b.atom()
        })
    }

    /// A stable 64-bit signature of the cube: a rotate-and-xor over the literal encodings.
    ///
    /// Deterministic across runs, and in agreement with equality.
    pub fn signature(&self) -> u64 {
        let mut x: u64 = 0;
        for literal in &self.literals {
            x = x.rotate_left(27) ^ (literal.index() as u64);
        }
        x
    }
}

impl std::ops::Index<usize> for Cube {
    type Output = CLiteral;

    fn index(&self, position: usize) -> &Self::Output {
        &self.literals[position]
    }
}

impl std::hash::Hash for Cube {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.signature());
    }
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut literals = self.literals.iter();
        if let Some(literal) = literals.next() {
            write!(f, "{literal}")?;
            for literal in literals {
                write!(f, " {literal}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(int: isize) -> CLiteral {
        CLiteral::new((int.unsigned_abs() - 1) as u32, int > 0)
    }

    #[test]
    fn push_orders_and_dedups() {
        let cube = Cube::from_literals([literal(3), literal(-1), literal(2), literal(3)]);

        assert_eq!(cube.len(), 3);
        assert_eq!(cube[0], literal(-1));
        assert_eq!(cube[1], literal(2));
        assert_eq!(cube[2], literal(3));
        assert!(cube.sane());
    }

    #[test]
    fn push_pop_round_trip() {
        let cube = Cube::from_literals([literal(-1), literal(2), literal(4)]);

        let mut trip = cube.clone();
        trip.push(literal(3));
        trip.pop(literal(3));

        assert_eq!(cube, trip);
    }

    #[test]
    fn invert_round_trip() {
        let cube = Cube::from_literals([literal(-1), literal(2), literal(4)]);
        assert_eq!(Cube::inverted(&cube.invert()), cube);
    }

    #[test]
    fn union_merges_in_order() {
        let left = Cube::from_literals([literal(-1), literal(4)]);
        let right = Cube::from_literals([literal(2), literal(4)]);

        let merged = left.union(&right);
        assert_eq!(merged, Cube::from_literals([literal(-1), literal(2), literal(4)]));
        assert!(merged.sane());
    }

    #[test]
    fn prefix_and_subset() {
        let cube = Cube::from_literals([literal(-1), literal(2), literal(4)]);
        let prefix = Cube::from_literals([literal(-1), literal(2)]);
        let inner = Cube::from_literals([literal(-1), literal(4)]);

        assert!(cube.starts_with(&prefix));
        assert!(!cube.starts_with(&inner));
        assert!(prefix.subset_of(&cube));
        assert!(inner.subset_of(&cube));
        assert!(!cube.subset_of(&inner));
    }

    #[test]
    fn insane_on_opposed_polarities() {
        let mut cube = Cube::default();
        cube.push(literal(1));
        cube.push(literal(-1));

        assert!(!cube.sane());
    }

    #[test]
    fn signature_matches_equality() {
        let a = Cube::from_literals([literal(-1), literal(2)]);
        let b = Cube::from_literals([literal(2), literal(-1)]);
        let c = Cube::from_literals([literal(1), literal(2)]);

        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());
    }
}
