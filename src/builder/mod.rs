/*!
Methods for building the formula of a context: fresh atoms, clause addition and deletion, and [DIMACS parsing](dimacs).

# Clause addition

[add_clause](crate::context::GenericContext::add_clause) takes anything satisfying the [Clause](crate::structures::clause::Clause) trait and records it against the current root valuation:

- The literals are put in canonical order and deduplicated; a tautological clause is skipped.
- Literals false at the root are dropped, and a clause containing a literal true at the root is skipped.
- An empty clause makes the formula unsatisfiable; a unit clause is recorded directly on the valuation (and propagated); anything longer is stored.

Stored clauses of the formula receive a transient slot and a persistent id, the identities used throughout [cubification](crate::cubifier).
*/

pub mod dimacs;

use rand::Rng;

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{Clause, ClauseSource},
        literal::{CLiteral, Literal},
    },
    types::err::BuildError,
};

/// Possible 'Ok' results from adding a clause to a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the formula.
    Added,

    /// The clause was skipped, as it is true on the root valuation or tautological.
    Skipped,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A fresh atom, whose previous value is drawn against [Config::polarity_lean](crate::config::Config::polarity_lean).
    ///
    /// # Panics
    /// If the atoms of the context are exhausted.
    pub fn fresh_atom(&mut self) -> Atom {
        let previous_value = self.rng.random_bool(self.config.polarity_lean.value);
        self.atom_db
            .fresh_atom(previous_value)
            .expect("atoms exhausted")
    }

    /// The positive literal of a fresh atom.
    pub fn fresh_literal(&mut self) -> CLiteral {
        CLiteral::new(self.fresh_atom(), true)
    }

    /// Adds a clause to the formula, simplified against the root valuation.
    ///
    /// # Soundness
    /// Requires the trail to be at decision level zero.
    pub fn add_clause(&mut self, clause: impl Clause) -> Result<ClauseOk, BuildError> {
        debug_assert_eq!(self.trail.level(), 0);

        if !self.ok() {
            return Err(BuildError::Unsatisfiable);
        }

        let mut literals = clause.canonical();
        literals.sort_unstable();
        literals.dedup();

        // With literals ordered, opposed polarities of an atom are adjacent.
        if literals
            .windows(2)
            .any(|pair| pair[0].atom() == pair[1].atom())
        {
            log::trace!(target: targets::CLAUSE_DB, "Skipped tautology");
            return Ok(ClauseOk::Skipped);
        }

        let mut kept = Vec::with_capacity(literals.len());
        for literal in literals {
            match self.value_of(literal) {
                Some(true) => return Ok(ClauseOk::Skipped),
                Some(false) => {}
                None => kept.push(literal),
            }
        }

        match kept.len() {
            0 => {
                self.state = ContextState::Unsatisfiable;
                Err(BuildError::Unsatisfiable)
            }

            1 => {
                self.enqueue(kept[0], None);
                match self.propagate_to_fixpoint() {
                    None => Ok(ClauseOk::Added),
                    Some(_) => {
                        self.note_root_conflict();
                        Err(BuildError::Unsatisfiable)
                    }
                }
            }

            _ => {
                self.clause_db
                    .store(kept, ClauseSource::Original, &mut self.atom_db);
                Ok(ClauseOk::Added)
            }
        }
    }

    /// Deletes the problem clause at transient slot `slot`.
    ///
    /// The last slot is swapped into the gap and the bimap follows, so any held persistent ids remain valid.
    pub fn drop_clause(&mut self, slot: usize) {
        self.clause_db.drop_clause_at(slot, &mut self.atom_db);
    }
}
