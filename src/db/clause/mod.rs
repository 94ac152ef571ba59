/*!
A database of clause related things.

Clauses are stored in two slotted stores, distinguished by [source](crate::structures::clause::ClauseSource): clauses of the formula ('originals') and clauses added by conflict analysis ('additions').
Slots are accessed through [keys](crate::db::ClauseKey), and a key contains a token to distinguish reuse of a freed slot, so anything holding a stale key (a watch list, notably) discovers the fact on access.

Original clauses are additionally listed in a dense vector, and the position of a clause in that vector is its *transient slot* --- the identity used when iterating the formula.
Transient slots move: [drop_clause_at](ClauseDB::drop_clause_at) swaps the last slot into the gap, and [remove_satisfied](ClauseDB::remove_satisfied) compacts the vector.
A [Bimap] tracks the corresponding *persistent ids*, which never move.

Unit clauses are not stored: their consequence is recorded on the valuation at the root level.

Fields of the database are private to ensure the use of methods which uphold the slot/bimap invariants.
*/

use crate::{
    config::{Activity, Config},
    db::{
        atom::AtomDB,
        bimap::Bimap,
        keys::{ClauseKey, FormulaIndex, FormulaToken, PersistentId},
    },
    misc::log::targets::{self},
    structures::{
        clause::{CClause, ClauseSource},
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
};

/// A stored clause, together with the data used to manage it.
pub struct DbClause {
    /// The key under which the clause is stored.
    key: ClauseKey,

    /// The literals of the clause. The literals at positions 0 and 1 are watched.
    literals: CClause,

    /// The activity of the clause, bumped when the clause is used during analysis.
    activity: Activity,
}

impl DbClause {
    /// The key under which the clause is stored.
    pub fn key(&self) -> ClauseKey {
        self.key
    }

    /// The literals of the clause, watched literals first.
    pub fn literals(&self) -> &[CLiteral] {
        &self.literals
    }

    /// A count of the literals of the clause.
    pub fn size(&self) -> usize {
        self.literals.len()
    }

    /// The literal at `position`.
    ///
    /// # Safety
    /// No check is made that the position is within the clause.
    pub unsafe fn literal_unchecked(&self, position: usize) -> CLiteral {
        *self.literals.get_unchecked(position)
    }

    /// Swaps the literals at two positions.
    pub fn swap_literals(&mut self, a: usize, b: usize) {
        self.literals.swap(a, b);
    }
}

/// The clause database.
pub struct ClauseDB {
    /// The transient slot vector: position `i` holds the key of problem clause `i`.
    originals: Vec<ClauseKey>,

    /// The map between transient slots and persistent ids.
    bimap: Bimap,

    /// Slotted store of original clauses.
    original_store: Vec<Option<DbClause>>,

    /// The token a fresh key for an original slot will carry.
    original_tokens: Vec<FormulaToken>,

    /// Freed original slots.
    original_free: Vec<FormulaIndex>,

    /// Slotted store of addition clauses.
    addition_store: Vec<Option<DbClause>>,

    /// The token a fresh key for an addition slot will carry.
    addition_tokens: Vec<FormulaToken>,

    /// Freed addition slots.
    addition_free: Vec<FormulaIndex>,

    /// A count of addition clauses.
    // This can't be inferred from the addition store, as slots may be reused.
    addition_count: usize,

    /// The amount to bump a clause's activity by.
    bump: Activity,

    /// The inverse of the clause activity decay factor.
    inverse_decay: Activity,
}

impl ClauseDB {
    /// A new [ClauseDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            originals: Vec::default(),
            bimap: Bimap::default(),

            original_store: Vec::default(),
            original_tokens: Vec::default(),
            original_free: Vec::default(),

            addition_store: Vec::default(),
            addition_tokens: Vec::default(),
            addition_free: Vec::default(),
            addition_count: 0,

            bump: config.clause_bump.value,
            inverse_decay: 1.0 / config.clause_decay.value,
        }
    }

    /// The bidirectional slot/id map of the problem clauses.
    pub fn bimap(&self) -> &Bimap {
        &self.bimap
    }

    /// A count of the problem clauses.
    pub fn originals_count(&self) -> usize {
        self.originals.len()
    }

    /// A count of the addition clauses.
    pub fn addition_count(&self) -> usize {
        self.addition_count
    }

    /// The clause at transient slot `slot`.
    pub fn clause_at_slot(&self, slot: usize) -> &DbClause {
        // Soundness: slot keys are maintained alongside the stores.
        self.get(&self.originals[slot]).expect("corrupt transient slot")
    }

    /// The persistent id of the clause at transient slot `slot`, if the slot is live.
    pub fn persistent_id_at_slot(&self, slot: usize) -> Option<PersistentId> {
        self.bimap.bw(slot)
    }

    /// An iterator over the problem clauses paired with their transient slots.
    pub fn original_clauses(&self) -> impl Iterator<Item = (usize, &DbClause)> {
        self.originals.iter().enumerate().map(|(slot, key)| {
            (slot, self.get(key).expect("corrupt transient slot"))
        })
    }

    /// Stores a (non-unit) clause, initialising watches on its first two literals.
    ///
    /// Any instance of storing a clause should use this method, as it maintains the watch lists, the transient slot vector, and the bimap.
    pub fn store(&mut self, clause: CClause, source: ClauseSource, atom_db: &mut AtomDB) -> ClauseKey {
        debug_assert!(clause.len() >= 2);

        let key = match source {
            ClauseSource::Original => {
                let (index, token) = Self::fresh_slot(
                    &mut self.original_store,
                    &mut self.original_tokens,
                    &mut self.original_free,
                );
                ClauseKey::Original(index, token)
            }
            ClauseSource::Addition => {
                let (index, token) = Self::fresh_slot(
                    &mut self.addition_store,
                    &mut self.addition_tokens,
                    &mut self.addition_free,
                );
                self.addition_count += 1;
                ClauseKey::Addition(index, token)
            }
        };

        atom_db.watch(clause[0], key);
        atom_db.watch(clause[1], key);

        let db_clause = DbClause {
            key,
            literals: clause,
            activity: 1.0,
        };

        match key {
            ClauseKey::Original(index, _) => {
                self.original_store[index as usize] = Some(db_clause);
                self.bimap.add(self.originals.len());
                self.originals.push(key);
            }
            ClauseKey::Addition(index, _) => {
                self.addition_store[index as usize] = Some(db_clause);
            }
        }

        log::trace!(target: targets::CLAUSE_DB, "Stored {key}");
        key
    }

    /// The clause stored under `key`, unless the key is stale.
    pub fn get(&self, key: &ClauseKey) -> Option<&DbClause> {
        let store = match key {
            ClauseKey::Original(_, _) => &self.original_store,
            ClauseKey::Addition(_, _) => &self.addition_store,
        };
        store
            .get(key.index())?
            .as_ref()
            .filter(|clause| clause.key == *key)
    }

    /// The clause stored under `key`, mutably, unless the key is stale.
    pub fn get_mut(&mut self, key: &ClauseKey) -> Option<&mut DbClause> {
        let store = match key {
            ClauseKey::Original(_, _) => &mut self.original_store,
            ClauseKey::Addition(_, _) => &mut self.addition_store,
        };
        store
            .get_mut(key.index())?
            .as_mut()
            .filter(|clause| clause.key == *key)
    }

    /// Deletes the problem clause at transient slot `slot`, swapping the last slot into the gap and keeping the bimap synchronised.
    pub fn drop_clause_at(&mut self, slot: usize, atom_db: &mut AtomDB) {
        debug_assert!(slot < self.originals.len());

        let last = self.originals.len() - 1;
        if slot != last {
            self.originals.swap(slot, last);
            self.bimap.swap(slot, last);
        }
        self.bimap.drop(last);
        let key = self.originals.pop().expect("empty transient slot vector");

        log::trace!(target: targets::CLAUSE_DB, "Dropped {key} from slot {slot}");
        self.remove_from_store(key, atom_db);
    }

    /// Removes the addition clause stored under `key`.
    pub fn remove_addition(&mut self, key: ClauseKey, atom_db: &mut AtomDB) {
        debug_assert!(matches!(key, ClauseKey::Addition(_, _)));
        self.addition_count -= 1;
        self.remove_from_store(key, atom_db);
    }

    /// Bumps the activity of the clause stored under `key`, rescoring every addition if the bump overflows the activity representation.
    pub fn bump_activity(&mut self, key: ClauseKey) {
        const RESCALE_AT: Activity = 1e100;

        let bump = self.bump;
        let mut rescale = false;
        if let Some(clause) = self.get_mut(&key) {
            clause.activity += bump;
            rescale = clause.activity > RESCALE_AT;
        }

        if rescale {
            for slot in self.addition_store.iter_mut().flatten() {
                slot.activity *= 1.0 / RESCALE_AT;
            }
            self.bump *= 1.0 / RESCALE_AT;
        }
    }

    /// Scales the activity bump so that, relatively, the activity of every addition decays.
    pub fn decay_activity(&mut self) {
        self.bump *= self.inverse_decay;
    }

    /// Removes (roughly) the least active half of the (long) addition clauses.
    ///
    /// Clauses of size two and clauses locked as the reason of an assignment are kept.
    pub fn reduce(&mut self, atom_db: &mut AtomDB) {
        let mut candidates: Vec<(Activity, ClauseKey)> = self
            .addition_store
            .iter()
            .flatten()
            .filter(|clause| clause.size() > 2)
            .map(|clause| (clause.activity, clause.key))
            .collect();

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        candidates.truncate(candidates.len() / 2);

        let mut removed = 0_usize;
        for (_, key) in candidates {
            let locked = {
                let clause = self.get(&key).expect("missing reduction candidate");
                let watch = clause.literals[0];
                atom_db.reason_of(watch.atom()) == Some(key)
            };
            if !locked {
                self.remove_addition(key, atom_db);
                removed += 1;
            }
        }

        log::info!(target: targets::REDUCTION, "Removed {removed} addition clauses");
    }

    /// Removes every clause satisfied on the (root) valuation.
    ///
    /// The transient slot vector is compacted, with the slot reassignments batched through the bimap's buffered rewrite so persistent ids of surviving clauses are unaffected.
    pub fn remove_satisfied(&mut self, atom_db: &mut AtomDB) {
        // Additions, slot by slot.
        let addition_keys: Vec<ClauseKey> = self
            .addition_store
            .iter()
            .flatten()
            .map(|clause| clause.key)
            .collect();
        for key in addition_keys {
            if self.satisfied_on_valuation(&key, atom_db) {
                self.remove_addition(key, atom_db);
            }
        }

        // Originals, by compaction.
        let mut kept: Vec<ClauseKey> = Vec::with_capacity(self.originals.len());
        let mut dropped: Vec<ClauseKey> = Vec::default();
        for slot in 0..self.originals.len() {
            let key = self.originals[slot];
            if self.satisfied_on_valuation(&key, atom_db) {
                dropped.push(key);
            } else {
                self.bimap.will_move(slot, kept.len());
                kept.push(key);
            }
        }
        if dropped.is_empty() {
            // No slot moved, so the pending buffer is discarded rather than flipped.
            self.bimap.clear_pending();
            return;
        }

        self.bimap.flip_buffer();
        self.originals = kept;
        for key in dropped {
            log::trace!(target: targets::SIMPLIFY, "Removed satisfied {key}");
            self.remove_from_store(key, atom_db);
        }
    }

    /// True if the clause under `key` contains a literal true on the current valuation.
    fn satisfied_on_valuation(&self, key: &ClauseKey, atom_db: &AtomDB) -> bool {
        let clause = self.get(key).expect("missing clause");
        clause
            .literals
            .iter()
            .any(|literal| atom_db.valuation().value_of(literal.atom()) == Some(literal.polarity()))
    }

    /// Unwatches and frees the clause under `key`, detaching it as a reason if needed.
    fn remove_from_store(&mut self, key: ClauseKey, atom_db: &mut AtomDB) {
        let (store, tokens, free) = match key {
            ClauseKey::Original(_, _) => (
                &mut self.original_store,
                &mut self.original_tokens,
                &mut self.original_free,
            ),
            ClauseKey::Addition(_, _) => (
                &mut self.addition_store,
                &mut self.addition_tokens,
                &mut self.addition_free,
            ),
        };

        let index = key.index();
        let clause = store[index].take().expect("missing clause");
        debug_assert!(clause.key == key);

        atom_db.unwatch(clause.literals[0], key);
        atom_db.unwatch(clause.literals[1], key);
        for literal in &clause.literals {
            atom_db.detach_reason(literal.atom(), key);
        }

        tokens[index] = tokens[index].wrapping_add(1);
        free.push(index as FormulaIndex);
    }

    /// A fresh slot in `store`, together with the token a key for it should carry.
    fn fresh_slot(
        store: &mut Vec<Option<DbClause>>,
        tokens: &mut Vec<FormulaToken>,
        free: &mut Vec<FormulaIndex>,
    ) -> (FormulaIndex, FormulaToken) {
        match free.pop() {
            Some(index) => (index, tokens[index as usize]),
            None => {
                store.push(None);
                tokens.push(0);
                ((store.len() - 1) as FormulaIndex, 0)
            }
        }
    }
}
