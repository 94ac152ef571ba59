/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- Watch lists for each literal, holding the keys of clauses watching the literal.
- A current (often partial) [valuation](crate::structures::valuation::Valuation) and the previous valuation.
- An [IndexHeap] recording the activity of atoms, where any atom without a value is a candidate on the heap.
- A record of which decision level an atom was valued on, and of the clause responsible, if any.
*/

use crate::{
    config::{Activity, Config},
    db::{ClauseKey, LevelIndex},
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX},
        literal::{CLiteral, Literal},
        valuation::VValuation,
    },
    types::err::AtomDBError,
};

/// Watch lists for one atom, split by the polarity of the watched literal.
#[derive(Default)]
pub struct WatchDB {
    /// Keys of clauses watching the positive literal of the atom.
    positive: Vec<ClauseKey>,

    /// Keys of clauses watching the negative literal of the atom.
    negative: Vec<ClauseKey>,
}

/// The atom database.
pub struct AtomDB {
    /// Watch lists for each atom in the form of [WatchDB] structs, indexed by atoms.
    watch_dbs: Vec<WatchDB>,

    /// A current (often partial) valuation.
    valuation: VValuation,

    /// The previous value of each atom, used for phase saving.
    previous_valuation: Vec<bool>,

    /// The decision level on which an atom was valued. Meaningful only while the atom has a value.
    levels: Vec<LevelIndex>,

    /// The clause which forced the value of an atom, if the value was set by propagation.
    reasons: Vec<Option<ClauseKey>>,

    /// An [IndexHeap] recording the activity of atoms, where any atom without a value is active on the heap.
    activity_heap: IndexHeap<Activity>,

    /// The amount to bump an atom's activity by.
    bump: Activity,

    /// The inverse of the activity decay factor.
    inverse_decay: Activity,
}

impl AtomDB {
    /// A new [AtomDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        AtomDB {
            watch_dbs: Vec::default(),

            valuation: Vec::default(),
            previous_valuation: Vec::default(),
            levels: Vec::default(),
            reasons: Vec::default(),

            activity_heap: IndexHeap::default(),
            bump: config.atom_bump.value,
            inverse_decay: 1.0 / config.atom_decay.value,
        }
    }

    /// A count of atoms in the [AtomDB].
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation, as a canonical [VValuation].
    pub fn valuation(&self) -> &VValuation {
        &self.valuation
    }

    /// A fresh atom --- on Ok the atom is part of the language of the context.
    ///
    /// All the relevant data structures are updated to support access via the atom, and the safety of each unchecked access below is guaranteed.
    pub fn fresh_atom(&mut self, previous_value: bool) -> Result<Atom, AtomDBError> {
        let atom = match self.valuation.len().try_into() {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => {
                return Err(AtomDBError::AtomsExhausted);
            }
        };

        self.activity_heap.add(atom as usize, Activity::default());
        self.activity_heap.activate(atom as usize);

        self.watch_dbs.push(WatchDB::default());
        self.valuation.push(None);
        self.previous_valuation.push(previous_value);
        self.levels.push(0);
        self.reasons.push(None);

        Ok(atom)
    }

    /// The value of `atom` on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation[atom as usize]
    }

    /// The decision level on which `atom` was valued.
    ///
    /// # Soundness
    /// Stale unless the atom has a value.
    pub fn level_of(&self, atom: Atom) -> LevelIndex {
        self.levels[atom as usize]
    }

    /// The clause which forced the value of `atom`, if the value was set by propagation.
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseKey> {
        self.reasons[atom as usize]
    }

    /// The previous value of `atom`, for phase saving.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_valuation[atom as usize]
    }

    /// Gives `atom` the value of `literal`, noting the level the value was set on and the clause which forced it, if any.
    ///
    /// # Soundness
    /// Requires the atom to have no value on the current valuation.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        debug_assert!(self.valuation[atom].is_none());

        self.valuation[atom] = Some(literal.polarity());
        self.levels[atom] = level;
        self.reasons[atom] = reason;
    }

    /// Clears the value of `atom`, saving the phase, and returns the atom to the activity heap.
    pub fn drop_value(&mut self, atom: Atom) {
        log::trace!(target: targets::VALUATION, "Cleared atom: {atom}");

        if let Some(value) = self.valuation[atom as usize].take() {
            self.previous_valuation[atom as usize] = value;
        }
        self.reasons[atom as usize] = None;
        self.activity_heap.activate(atom as usize);
    }

    /// Detaches `key` as the reason of `atom`, if it is.
    pub fn detach_reason(&mut self, atom: Atom, key: ClauseKey) {
        if self.reasons[atom as usize] == Some(key) {
            self.reasons[atom as usize] = None;
        }
    }

    /// Adds `key` to the watch list of `literal`.
    pub fn watch(&mut self, literal: CLiteral, key: ClauseKey) {
        let watches = &mut self.watch_dbs[literal.atom() as usize];
        match literal.polarity() {
            true => watches.positive.push(key),
            false => watches.negative.push(key),
        }
    }

    /// Removes `key` from the watch list of `literal`, if present.
    pub fn unwatch(&mut self, literal: CLiteral, key: ClauseKey) {
        let watches = &mut self.watch_dbs[literal.atom() as usize];
        let list = match literal.polarity() {
            true => &mut watches.positive,
            false => &mut watches.negative,
        };
        if let Some(position) = list.iter().position(|k| *k == key) {
            list.swap_remove(position);
        }
    }

    /// Returns the list of keys of clauses watching `literal`.
    ///
    /// A pointer is returned (rather than a slice) to help simplify [BCP](crate::procedures::bcp), where the list is traversed while values are read and set through the database.
    /// As such, care should be taken to avoid creating aliases.
    ///
    /// # Safety
    /// The caller must not use the pointer to add a watcher for `literal` while the list is borrowed.
    pub unsafe fn watchers_unchecked(&mut self, literal: CLiteral) -> *mut Vec<ClauseKey> {
        let watches = self.watch_dbs.get_unchecked_mut(literal.atom() as usize);
        match literal.polarity() {
            true => &mut watches.positive,
            false => &mut watches.negative,
        }
    }

    /// Pops the most active atom from the activity heap.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// Bumps the activity of `atom`, rescoring every atom if the bump overflows the activity representation.
    pub fn bump_activity(&mut self, atom: Atom) {
        const RESCALE_AT: Activity = 1e100;

        if self.activity_heap.value_at(atom as usize) + self.bump > RESCALE_AT {
            self.activity_heap.apply_to_all(|activity| activity * (1.0 / RESCALE_AT));
            self.bump *= 1.0 / RESCALE_AT;
        }

        let bump = self.bump;
        self.activity_heap.apply_to_index(atom as usize, |activity| activity + bump);
    }

    /// Scales the activity bump so that, relatively, every existing activity decays.
    pub fn decay_activity(&mut self) {
        self.bump *= self.inverse_decay;
    }
}
