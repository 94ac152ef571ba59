/*!
A max heap on some subset of elements with fixed indices.

In other words, a heap backed by a vector of values together with a companion vector which tracks the current location of a value's index on the heap.
The backing vector stays constant, allowing the structure to act as a store of values which may be moved on and off the heap.

For example, an [IndexHeap] is used as a store of atom activities, as it is a useful heuristic to decide on an atom without a value with the most activity, and atoms gain and lose values throughout a solve.

```rust
# use cubist_sat::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(600, 10);
heap.add(0, 70);

heap.activate(600);
heap.activate(0);

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert_eq!(heap.pop_max(), None);
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    /// The value of each index, whether active on the heap or not.
    values: Vec<V>,

    /// Indices active on the heap, in heap order. Only the prefix up to `active` is meaningful.
    heap: Vec<usize>,

    /// The position of an index on the heap, if active.
    position: Vec<Option<usize>>,

    /// A count of active indices.
    active: usize,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            heap: Vec::default(),
            position: Vec::default(),
            active: 0,
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Indexes `value` with `index`, growing the structure as needed.
    /// The index is *not* active on the heap until [activate](IndexHeap::activate) is called.
    pub fn add(&mut self, index: usize, value: V) {
        while self.values.len() <= index {
            self.values.push(V::default());
            self.position.push(None);
            self.heap.push(usize::MAX);
        }
        self.values[index] = value;
    }

    /// Activates `index` on the heap, or restores heap order about it if already active.
    pub fn activate(&mut self, index: usize) {
        match self.position[index] {
            None => {
                self.heap[self.active] = index;
                self.position[index] = Some(self.active);
                self.active += 1;
                self.sift_up(self.active - 1);
            }
            Some(heap_index) => {
                self.sift_up(heap_index);
                self.sift_down(heap_index);
            }
        }
    }

    /// Restores heap order about `index`, if active. A no-op otherwise.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(heap_index) = self.position[index] {
            self.sift_up(heap_index);
            self.sift_down(heap_index);
        }
    }

    /// Removes and returns the index with the maximum value from the heap, if the heap is not empty.
    pub fn pop_max(&mut self) -> Option<usize> {
        match self.active {
            0 => None,
            _ => {
                let max_index = self.heap[0];
                self.active -= 1;
                self.position[max_index] = None;
                if self.active > 0 {
                    let moved = self.heap[self.active];
                    self.heap[0] = moved;
                    self.position[moved] = Some(0);
                    self.sift_down(0);
                }
                Some(max_index)
            }
        }
    }

    /// The value indexed by `index`.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Applies `f` to the value at `index` and restores heap order, if the index is active.
    pub fn apply_to_index(&mut self, index: usize, f: impl Fn(&V) -> V) {
        self.values[index] = f(&self.values[index]);
        self.heapify_if_active(index);
    }

    /// Applies `f` to all (indexed) values.
    ///
    /// # Soundness
    /// Requires `f` to be monotone, as the heap is not rebuilt.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value);
        }
    }

    /// A count of values indexed by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Shuffles the value at `heap_index` up towards the root, while larger than its parent.
    fn sift_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.values[self.heap[parent]] < self.values[self.heap[heap_index]] {
                self.swap_heap_entries(parent, heap_index);
                heap_index = parent;
            } else {
                break;
            }
        }
    }

    /// Shuffles the value at `heap_index` down towards the leaves, while smaller than a child.
    fn sift_down(&mut self, mut heap_index: usize) {
        loop {
            let left = (2 * heap_index) + 1;
            if left >= self.active {
                break;
            }

            let mut largest = heap_index;
            if self.values[self.heap[largest]] < self.values[self.heap[left]] {
                largest = left;
            }

            let right = left + 1;
            if right < self.active && self.values[self.heap[largest]] < self.values[self.heap[right]]
            {
                largest = right;
            }

            if largest == heap_index {
                break;
            }
            self.swap_heap_entries(heap_index, largest);
            heap_index = largest;
        }
    }

    fn swap_heap_entries(&mut self, a: usize, b: usize) {
        self.position.swap(self.heap[a], self.heap[b]);
        self.heap.swap(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut heap = IndexHeap::default();
        for (index, value) in [(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)] {
            heap.add(index, value);
            heap.activate(index);
        }

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn heap_update() {
        let mut heap = IndexHeap::default();
        for (index, value) in [(6, 10), (4, 30), (1, 60), (0, 70)] {
            heap.add(index, value);
            heap.activate(index);
        }

        heap.apply_to_index(0, |_| 0);
        heap.apply_to_index(6, |_| 80);

        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_sparse() {
        let mut heap = IndexHeap::default();
        heap.add(600, 10);
        heap.add(0, 70);
        heap.activate(600);
        heap.activate(0);

        assert_eq!(heap.count(), 601);
        assert_eq!(heap.value_at(5), &i32::default());
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(600));
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn heap_reactivation() {
        let mut heap = IndexHeap::default();
        for index in 0..5 {
            heap.add(index, index);
            heap.activate(index);
        }

        assert_eq!(heap.pop_max(), Some(4));
        heap.activate(4);
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(3));
    }
}
