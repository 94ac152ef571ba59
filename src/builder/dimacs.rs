/*!
Parsing of formulas in (un)compressed DIMACS format.

A reader over a DIMACS input may be passed to [read_dimacs](crate::context::GenericContext::read_dimacs).
Comment lines (prefixed `c`) are skipped, the problem line (prefixed `p cnf`) reserves atoms, and every remaining whitespace-separated integer contributes to the current clause, with `0` closing a clause.

Atoms are created on demand, so the problem line is not required, and an understated atom count is corrected silently.
*/

use std::io::BufRead;

use crate::{
    context::GenericContext,
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal},
    },
    types::err::{BuildError, ParseError},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Reads a DIMACS formula from `reader`, adding each clause to the context.
    ///
    /// An unsatisfiable clause surfaces as a [BuildError], identified during the read.
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<(), ParseError> {
        let mut buffer = String::default();
        let mut clause: CClause = Vec::default();
        let mut line_number = 0_usize;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => {}
                Err(_) => return Err(ParseError::Io),
            }
            line_number += 1;

            let mut tokens = buffer.split_whitespace().peekable();
            match tokens.peek() {
                None | Some(&"c") => continue,

                Some(&"p") => {
                    // p cnf <atoms> <clauses>
                    let atoms: usize = tokens
                        .nth(2)
                        .and_then(|count| count.parse().ok())
                        .ok_or(ParseError::ProblemSpecification)?;
                    self.ensure_atoms(atoms);
                    continue;
                }

                Some(_) => {}
            }

            for token in tokens {
                let literal = self.literal_from_dimacs(token, line_number)?;
                match literal {
                    None => {
                        // A zero closes the clause in hand.
                        let finished = std::mem::take(&mut clause);
                        match self.add_clause(finished) {
                            Ok(_) => {}
                            Err(BuildError::Unsatisfiable) => return Ok(()),
                        }
                    }
                    Some(literal) => clause.push(literal),
                }
            }
        }

        // A final clause unterminated by zero.
        if !clause.is_empty() {
            match self.add_clause(clause) {
                Ok(_) | Err(BuildError::Unsatisfiable) => {}
            }
        }

        Ok(())
    }

    /// Creates fresh atoms until the context contains at least `count` atoms.
    pub fn ensure_atoms(&mut self, count: usize) {
        while self.atom_db.count() < count {
            self.fresh_atom();
        }
    }

    /// Interprets a DIMACS token as a literal, with `None` for the clause-closing zero.
    fn literal_from_dimacs(
        &mut self,
        token: &str,
        line_number: usize,
    ) -> Result<Option<CLiteral>, ParseError> {
        let int: i64 = match token.parse() {
            Ok(int) => int,
            Err(_) => return Err(ParseError::Line(line_number)),
        };

        if int == 0 {
            return Ok(None);
        }
        if int.unsigned_abs() > u32::MAX as u64 {
            return Err(ParseError::Line(line_number));
        }

        let atom = (int.unsigned_abs() - 1) as u32;
        self.ensure_atoms(atom as usize + 1);

        Ok(Some(CLiteral::new(atom, int > 0)))
    }
}
