/*!
A prefix trie over cubes, keyed on literal encodings.

Each node holds a *marks* set of literal encodings --- membership markers for cubes terminating at the node --- and a *children* map from literal encodings to child nodes.
A cube `C` is present iff the path `C[0], …, C[|C|-2]` reaches a node whose marks contain the encoding of `C[|C|-1]`.

As cubes keep their literals in ascending encoding order, walking the trie during path planning tests prefix containment in `O(|C|)` with small constants.

Empty cubes are rejected (precondition).
Trie nodes persist until an explicit [pop](CubeIndex::pop).
*/

use rustc_hash::{FxHashMap, FxHashSet};

use crate::structures::{cube::Cube, literal::Literal};

/// A recursive prefix trie over cubes.
#[derive(Default)]
pub struct CubeIndex {
    /// Membership markers: if an encoding is marked, the cube terminating with it at this node exists.
    marks: FxHashSet<usize>,

    /// Child tries, by literal encoding.
    children: FxHashMap<usize, CubeIndex>,
}

impl CubeIndex {
    /// Inserts `cube`. Idempotent at the leaf.
    pub fn push(&mut self, cube: &Cube) {
        debug_assert!(!cube.is_empty());
        self.push_from(cube, 0);
    }

    /// Deletes `cube`, if present.
    pub fn pop(&mut self, cube: &Cube) {
        debug_assert!(!cube.is_empty());
        self.pop_from(cube, 0);
    }

    /// True if `cube` is present, false otherwise.
    pub fn contains(&self, cube: &Cube) -> bool {
        debug_assert!(!cube.is_empty());
        self.contains_from(cube, 0)
    }

    fn push_from(&mut self, cube: &Cube, depth: usize) {
        let encoding = cube[depth].index();
        if cube.len() == depth + 1 {
            self.marks.insert(encoding);
        } else {
            self.children
                .entry(encoding)
                .or_default()
                .push_from(cube, depth + 1);
        }
    }

    fn pop_from(&mut self, cube: &Cube, depth: usize) {
        let encoding = cube[depth].index();
        if cube.len() == depth + 1 {
            self.marks.remove(&encoding);
        } else if let Some(child) = self.children.get_mut(&encoding) {
            child.pop_from(cube, depth + 1);
        }
    }

    fn contains_from(&self, cube: &Cube, depth: usize) -> bool {
        let encoding = cube[depth].index();
        if cube.len() == depth + 1 {
            self.marks.contains(&encoding)
        } else {
            match self.children.get(&encoding) {
                Some(child) => child.contains_from(cube, depth + 1),
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::CLiteral;

    fn cube(ints: &[isize]) -> Cube {
        Cube::from_literals(
            ints.iter()
                .map(|int| CLiteral::new((int.unsigned_abs() - 1) as u32, *int > 0)),
        )
    }

    #[test]
    fn neither_prefixes_nor_extensions() {
        let mut index = CubeIndex::default();
        index.push(&cube(&[1, 2, 3]));

        assert!(index.contains(&cube(&[1, 2, 3])));
        assert!(!index.contains(&cube(&[1, 2])));
        assert!(!index.contains(&cube(&[1, 2, 4])));
        assert!(!index.contains(&cube(&[1, 2, 3, 4])));
    }

    #[test]
    fn push_is_idempotent() {
        let mut index = CubeIndex::default();
        index.push(&cube(&[1, 2]));
        index.push(&cube(&[1, 2]));

        index.pop(&cube(&[1, 2]));
        assert!(!index.contains(&cube(&[1, 2])));
    }

    #[test]
    fn pop_restores_prior_state() {
        let mut index = CubeIndex::default();
        index.push(&cube(&[1, 2]));
        index.push(&cube(&[1, 2, 3]));

        index.push(&cube(&[1, 4]));
        index.pop(&cube(&[1, 4]));

        assert!(index.contains(&cube(&[1, 2])));
        assert!(index.contains(&cube(&[1, 2, 3])));
        assert!(!index.contains(&cube(&[1, 4])));
    }

    #[test]
    fn pop_keeps_extensions() {
        let mut index = CubeIndex::default();
        index.push(&cube(&[1, 2]));
        index.push(&cube(&[1, 2, 3]));

        index.pop(&cube(&[1, 2]));

        assert!(!index.contains(&cube(&[1, 2])));
        assert!(index.contains(&cube(&[1, 2, 3])));
    }
}
