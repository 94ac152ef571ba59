/*!
Methods for choosing the value of an atom.

# Overview

The core decision procedure is straightforward:
- Search through all atoms in the context for an atom which is not assigned a value, and assign either true or false.

# Heuristics

## Activity

Atoms may be selected by activity, and the [atom database](crate::db::atom) stores atoms without a value on a max activity heap in order to support quick access to the most active atom without a value.
Though, as storing *only* those atoms without a value takes considerably more effort than *at least* those atoms without a value, it may take some work to find the relevant atom.

## Phase saving

If phase saving is enabled, a chosen atom previously valued *v* is again valued *v*.

Note: for efficiency an atom always has a 'previous' value, initialised via [Config::polarity_lean](crate::config::Config::polarity_lean) when the atom is created.

## Randomness

With [Config::random_decision_bias](crate::config::Config::random_decision_bias) probability the atom is drawn uniformly from the unvalued atoms rather than by activity.
*/

use rand::{seq::IteratorRandom, Rng};

use crate::{
    context::{ContextState, GenericContext},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
};

/// Possible 'Ok' results from choosing a truth value to assign an atom.
pub enum DecisionOk {
    /// Some truth value was chosen for some atom.
    Literal(CLiteral),

    /// All atoms had already been assigned truth values, so no decision could be made.
    Exhausted,
}

/// Methods related to making decisions.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Makes a decision, by random choice or by taking the atom with the highest activity.
    ///
    /// On exhaustion the valuation is complete, and the state of the context is set to satisfiable.
    pub fn make_decision(&mut self) -> DecisionOk {
        match self.atom_without_value() {
            Some(chosen_atom) => {
                self.counters.total_decisions += 1;

                let decision_literal = match self.config.phase_saving.value {
                    true => {
                        let previous_value = self.atom_db.previous_value_of(chosen_atom);
                        CLiteral::new(chosen_atom, previous_value)
                    }
                    false => {
                        let random_value = self.rng.random_bool(self.config.polarity_lean.value);
                        CLiteral::new(chosen_atom, random_value)
                    }
                };
                log::trace!("Decision {decision_literal}");

                DecisionOk::Literal(decision_literal)
            }
            None => {
                self.state = ContextState::Satisfiable;
                DecisionOk::Exhausted
            }
        }
    }

    /// Returns an atom which has no value on the current valuation, either by random choice or by most activity.
    pub fn atom_without_value(&mut self) -> Option<Atom> {
        // Takes ownership of rng to satisfy the borrow checker.
        let mut rng = std::mem::take(&mut self.rng);
        let chosen_atom = match rng.random_bool(self.config.random_decision_bias.value) {
            true => self.atom_db.valuation().unvalued_atoms().choose(&mut rng),
            false => {
                let mut from_heap = None;
                while let Some(atom) = self.atom_db.heap_pop_most_active() {
                    if self.atom_db.value_of(atom).is_none() {
                        from_heap = Some(atom);
                        break;
                    }
                }
                from_heap.or_else(|| self.atom_db.valuation().unvalued_atoms().next())
            }
        };
        self.rng = rng;
        chosen_atom
    }
}
