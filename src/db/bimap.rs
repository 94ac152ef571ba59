/*!
A bidirectional map between transient clause slots and persistent clause ids.

The clause database keeps the problem clauses in a vector, and the position of a clause in that vector --- its *transient* slot --- changes when clauses are deleted (the last slot is swapped in) or when the vector is compacted during simplification.
The cubification machinery needs to refer to clauses across such events, so each clause is also assigned a *persistent* id when first recorded, and the bimap maintains the partial bijection between live slots and ids.

Simplification rewrites many slots at once.
For this the bimap offers a buffered mode: [will_move](Bimap::will_move) records pending reassignments without disturbing the live maps, and [flip_buffer](Bimap::flip_buffer) commits them all, retiring the ids of any slot not carried over.
During the collection phase [fw](Bimap::fw) and [bw](Bimap::bw) continue to reflect the pre-flip state.

```rust
# use cubist_sat::db::bimap::Bimap;
let mut bimap = Bimap::default();

let p = bimap.add(0);
let q = bimap.add(1);

bimap.swap(0, 1);
assert_eq!(bimap.fw(p), Some(1));
assert_eq!(bimap.bw(0), Some(q));
```
*/

use rustc_hash::FxHashMap;

use crate::db::keys::PersistentId;

/// A bidirectional map between transient slots and persistent ids.
#[derive(Default)]
pub struct Bimap {
    /// The next persistent id to mint.
    next_free: PersistentId,

    /// Persistent-to-transient map. Any id absent from this map belongs to a clause which no longer exists.
    ptt: FxHashMap<PersistentId, usize>,

    /// Transient-to-persistent map.
    ttp: Vec<Option<PersistentId>>,

    /// Transient-to-persistent map, pending a buffer flip.
    ttp_next: Vec<Option<PersistentId>>,
}

impl Bimap {
    /// Records a clause at (free) transient slot `i`, returning a freshly minted persistent id.
    pub fn add(&mut self, i: usize) -> PersistentId {
        debug_assert!(self.ttp.len() <= i || self.ttp[i].is_none());

        let j = self.next_free;
        self.next_free += 1;

        self.ptt.insert(j, i);
        if self.ttp.len() <= i {
            self.ttp.resize(i + 1, None);
        }
        self.ttp[i] = Some(j);

        j
    }

    /// Drops the clause whose transient slot is `i`, retiring its persistent id.
    pub fn drop(&mut self, i: usize) {
        debug_assert!(i < self.ttp.len() && self.ttp[i].is_some());

        if let Some(j) = self.ttp[i].take() {
            self.ptt.remove(&j);
        }
    }

    /// Swaps the persistent ids at the (live) transient slots `i` and `j`, updating both directions.
    pub fn swap(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.ttp.len() && self.ttp[i].is_some());
        debug_assert!(j < self.ttp.len() && self.ttp[j].is_some());

        self.ttp.swap(i, j);
        if let Some(id) = self.ttp[i] {
            self.ptt.insert(id, i);
        }
        if let Some(id) = self.ttp[j] {
            self.ptt.insert(id, j);
        }
    }

    /// Indicates that the clause at transient slot `i` will occupy transient slot `j` at the next buffer flip.
    pub fn will_move(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.ttp.len() && self.ttp[i].is_some());

        if self.ttp_next.len() <= j {
            self.ttp_next.resize(j + 1, None);
        }
        self.ttp_next[j] = self.ttp[i];
    }

    /// Discards any pending reassignments recorded since the last flip.
    pub fn clear_pending(&mut self) {
        self.ttp_next.clear();
    }

    /// Enacts a buffer flip: pending reassignments become live, and the id of any slot not carried over is retired.
    pub fn flip_buffer(&mut self) {
        std::mem::swap(&mut self.ttp, &mut self.ttp_next);
        self.ttp_next.clear();

        self.ptt.clear();
        for (i, id) in self.ttp.iter().enumerate() {
            if let Some(id) = id {
                self.ptt.insert(*id, i);
            }
        }
    }

    /// The transient slot of the clause with persistent id `j`, if the clause still exists.
    pub fn fw(&self, j: PersistentId) -> Option<usize> {
        self.ptt.get(&j).copied()
    }

    /// The persistent id of the clause at transient slot `i`, if the slot is live.
    pub fn bw(&self, i: usize) -> Option<PersistentId> {
        self.ttp.get(i).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_swap_drop() {
        let mut bimap = Bimap::default();

        assert_eq!(bimap.add(0), 0);
        assert_eq!(bimap.add(1), 1);

        bimap.swap(0, 1);
        assert_eq!(bimap.fw(0), Some(1));
        assert_eq!(bimap.fw(1), Some(0));
        assert_eq!(bimap.bw(0), Some(1));
        assert_eq!(bimap.bw(1), Some(0));

        // Slot 1 holds persistent id 0 after the swap.
        bimap.drop(1);
        assert_eq!(bimap.fw(0), None);
        assert_eq!(bimap.bw(1), None);
        assert_eq!(bimap.bw(0), Some(1));
        assert_eq!(bimap.fw(1), Some(0));
    }

    #[test]
    fn add_drop_round_trip() {
        let mut bimap = Bimap::default();

        let first = bimap.add(0);
        bimap.drop(0);

        assert_eq!(bimap.fw(first), None);
        assert_eq!(bimap.bw(0), None);

        // The extensional state is restored, though one persistent id has been consumed.
        let second = bimap.add(0);
        assert_ne!(first, second);
        assert_eq!(bimap.fw(second), Some(0));
    }

    #[test]
    fn buffered_rewrite() {
        let mut bimap = Bimap::default();

        let a = bimap.add(0);
        let b = bimap.add(1);
        let c = bimap.add(2);

        // Slots 0 and 2 survive a compaction, slot 1 does not.
        bimap.will_move(0, 0);
        bimap.will_move(2, 1);

        // Pre-flip state is still visible during collection.
        assert_eq!(bimap.fw(b), Some(1));
        assert_eq!(bimap.bw(2), Some(c));

        bimap.flip_buffer();

        assert_eq!(bimap.fw(a), Some(0));
        assert_eq!(bimap.fw(b), None);
        assert_eq!(bimap.fw(c), Some(1));
        assert_eq!(bimap.bw(0), Some(a));
        assert_eq!(bimap.bw(1), Some(c));
        assert_eq!(bimap.bw(2), None);
    }
}
