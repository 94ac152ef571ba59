/*!
Preprocessing of a formula, prior to the solve loop.

The preprocessing applied is limited to the assignment of *pure* literals: a literal whose negation does not occur in any problem clause may be assigned true without affecting satisfiability, as doing so can only satisfy clauses.

Pure-literal assignment is model-preserving rather than equivalence-preserving, so preprocessing is disabled by default and gated on [Config::preprocessing](crate::config::Config::preprocessing).
*/

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::PreprocessingError,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Assigns every pure literal of the problem clauses at the root level.
    ///
    /// # Soundness
    /// Requires the trail to be at decision level zero.
    pub fn preprocess(&mut self) -> Result<(), PreprocessingError> {
        debug_assert_eq!(self.trail.level(), 0);

        let atom_count = self.atom_db.count();
        let mut positive = vec![false; atom_count];
        let mut negative = vec![false; atom_count];

        for (_, clause) in self.clause_db.original_clauses() {
            for literal in clause.literals() {
                match literal.polarity() {
                    true => positive[literal.atom() as usize] = true,
                    false => negative[literal.atom() as usize] = true,
                }
            }
        }

        let mut assigned = 0_usize;
        for atom in 0..atom_count as u32 {
            if self.atom_db.value_of(atom).is_some() {
                continue;
            }
            match (positive[atom as usize], negative[atom as usize]) {
                (true, false) => {
                    self.enqueue(CLiteral::new(atom, true), None);
                    assigned += 1;
                }
                (false, true) => {
                    self.enqueue(CLiteral::new(atom, false), None);
                    assigned += 1;
                }
                _ => {}
            }
        }
        log::info!(target: targets::PREPROCESSING, "Assigned {assigned} pure literals");

        match self.propagate_to_fixpoint() {
            None => Ok(()),
            Some(_) => {
                self.note_root_conflict();
                Err(PreprocessingError::Unsatisfiable)
            }
        }
    }
}
