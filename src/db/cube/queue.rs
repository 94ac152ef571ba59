/*!
A bounded priority structure over scored cubes.

The primary map takes a cube to its score and the persistent ids of its *parents* --- the problem clauses the cube was drawn from.
A secondary ordered map from scores to buckets of cubes gives `O(log n)` access to both the best and the worst cube, so the queue can serve [peek_best](CubeQueue::peek_best) during cube search and evict through [peek_worst](CubeQueue::peek_worst) when the budget is reached.

The queue also tracks the sum and count of every distinct insertion ever made --- including cubes since evicted or popped --- from which the rolling [mean score](CubeQueue::mean_score) is drawn.
*/

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::{db::keys::PersistentId, structures::cube::Cube};

/// A score, as stored by the queue.
///
/// Scores order buckets in the secondary map through [total_cmp](f64::total_cmp); scores computed by the planner are finite, so the ordering agrees with the usual one.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScoreKey(f64);

impl Eq for ScoreKey {}

impl PartialOrd for ScoreKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The queue of scored cubes.
pub struct CubeQueue {
    /// A bound on the number of cubes held.
    budget: usize,

    /// The sum of the scores of every distinct insertion, including insertions since removed.
    sum_score: f64,

    /// A count of every distinct insertion, including insertions since removed.
    num_seen: f64,

    /// Score-to-cubes buckets, ordered by score.
    scorewise: BTreeMap<ScoreKey, Vec<Cube>>,

    /// Cube-to-(score, parents).
    implicants: FxHashMap<Cube, (f64, Vec<PersistentId>)>,
}

impl Default for CubeQueue {
    fn default() -> Self {
        CubeQueue::new(1_000_000)
    }
}

impl CubeQueue {
    /// A fresh queue holding at most `budget` cubes.
    pub fn new(budget: usize) -> Self {
        CubeQueue {
            budget,
            sum_score: 0.0,
            num_seen: 0.0,
            scorewise: BTreeMap::default(),
            implicants: FxHashMap::default(),
        }
    }

    /// Registers `cube` with the given score, on behalf of parent `parent`.
    ///
    /// If the cube is already present only the parent id is recorded --- the score is not updated.
    /// Otherwise, if the queue is at budget, the worst cube is evicted first.
    pub fn push(&mut self, cube: Cube, score: f64, parent: PersistentId) {
        if self.contains(&cube) {
            self.add_parent_id(&cube, parent);
            return;
        }

        if self.implicants.len() + 1 > self.budget {
            let worst = self.peek_worst();
            self.pop(&worst);
        }

        self.scorewise
            .entry(ScoreKey(score))
            .or_default()
            .push(cube.clone());
        self.implicants.insert(cube, (score, vec![parent]));

        self.sum_score += score;
        self.num_seen += 1.0;
    }

    /// Removes `cube` from the queue, returning its score and parent ids if it was present.
    pub fn pop(&mut self, cube: &Cube) -> Option<(f64, Vec<PersistentId>)> {
        let (score, parents) = self.implicants.remove(cube)?;

        let key = ScoreKey(score);
        let bucket = self.scorewise.get_mut(&key).expect("missing score bucket");
        if bucket.len() == 1 {
            self.scorewise.remove(&key);
        } else {
            let position = bucket.iter().position(|c| c == cube).expect("missing cube");
            bucket.remove(position);
        }

        Some((score, parents))
    }

    /// The best cube in the queue, with `r` used to break ties within the best bucket.
    ///
    /// # Soundness
    /// Requires the queue to be non-empty.
    pub fn peek_best(&self, r: usize) -> Cube {
        let (_, bucket) = self.scorewise.last_key_value().expect("empty cube queue");
        match bucket.len() {
            1 => bucket[0].clone(),
            n => bucket[r % n].clone(),
        }
    }

    /// The worst cube in the queue: the front of the lowest-score bucket.
    ///
    /// # Soundness
    /// Requires the queue to be non-empty.
    pub fn peek_worst(&self) -> Cube {
        let (_, bucket) = self.scorewise.first_key_value().expect("empty cube queue");
        bucket[0].clone()
    }

    /// Is the given cube recorded here?
    pub fn contains(&self, cube: &Cube) -> bool {
        self.implicants.contains_key(cube)
    }

    /// Records `parent` as a parent of `cube`. Idempotent.
    ///
    /// # Soundness
    /// Requires the cube to be present.
    pub fn add_parent_id(&mut self, cube: &Cube, parent: PersistentId) {
        let (_, parents) = self.implicants.get_mut(cube).expect("missing cube");
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    /// The parent ids currently recorded for `cube`, if the cube is present.
    pub fn parent_ids(&self, cube: &Cube) -> Option<&[PersistentId]> {
        self.implicants
            .get(cube)
            .map(|(_, parents)| parents.as_slice())
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// How many cubes are in the queue?
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    /// The best score in the queue, or zero if the queue is empty.
    pub fn best_score(&self) -> f64 {
        match self.scorewise.last_key_value() {
            Some((key, _)) => key.0,
            None => 0.0,
        }
    }

    /// The mean score over every distinct insertion seen so far, or zero if nothing has been seen.
    pub fn mean_score(&self) -> f64 {
        match self.num_seen == 0.0 {
            true => 0.0,
            false => self.sum_score / self.num_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::{CLiteral, Literal};

    fn singleton(atom: u32) -> Cube {
        Cube::from_literals([CLiteral::new(atom, true)])
    }

    #[test]
    fn peek_best_tie_break() {
        let mut cq = CubeQueue::new(8);
        cq.push(singleton(0), 1.0, 0);
        cq.push(singleton(1), 1.0, 1);
        cq.push(singleton(2), 1.0, 2);

        assert_eq!(cq.peek_best(0), singleton(0));
        assert_eq!(cq.peek_best(1), singleton(1));
        assert_eq!(cq.peek_best(5), singleton(2));
        assert_eq!(cq.mean_score(), 1.0);
    }

    #[test]
    fn eviction_on_budget() {
        let mut cq = CubeQueue::new(2);
        cq.push(singleton(0), 5.0, 0);
        cq.push(singleton(1), 1.0, 0);
        cq.push(singleton(2), 3.0, 0);

        assert_eq!(cq.len(), 2);
        assert!(!cq.contains(&singleton(1)));
        assert_eq!(cq.best_score(), 5.0);
        assert_eq!(cq.mean_score(), 3.0);
    }

    #[test]
    fn repeated_push_merges_parents() {
        let mut cq = CubeQueue::new(8);
        cq.push(singleton(0), 2.0, 4);
        cq.push(singleton(0), 7.0, 5);
        cq.push(singleton(0), 7.0, 5);

        // The score of a present cube is not updated…
        assert_eq!(cq.best_score(), 2.0);
        // …and each distinct parent is recorded once.
        assert_eq!(cq.parent_ids(&singleton(0)), Some([4, 5].as_slice()));
        // Only the first insertion contributes to the rolling mean.
        assert_eq!(cq.mean_score(), 2.0);
    }

    #[test]
    fn pop_removes_bucket_entries() {
        let mut cq = CubeQueue::new(8);
        cq.push(singleton(0), 2.0, 0);
        cq.push(singleton(1), 2.0, 1);

        let (score, parents) = cq.pop(&singleton(0)).expect("missing cube");
        assert_eq!(score, 2.0);
        assert_eq!(parents, vec![0]);
        assert_eq!(cq.len(), 1);
        assert_eq!(cq.peek_best(0), singleton(1));
        assert_eq!(cq.pop(&singleton(0)), None);
    }
}
