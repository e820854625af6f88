//! Shared helpers for inference rules

use crate::fol::{Atom, Clause, Literal, Substitution, Term, Variable};
use std::collections::HashMap;

/// Supply of canonical fresh variable names for one refutation search.
///
/// Every clause admitted to the search, and every partner clause before
/// resolution, has its variables renamed through this supply, so no two
/// interacting clauses ever share a variable. The counter resets per search,
/// which keeps traces reproducible. Generated names (`v0`, `v1`, ...) cannot
/// collide with clause variables coming out of clausification, which always
/// contain an underscore.
#[derive(Debug, Default)]
pub struct FreshVars {
    counter: usize,
}

impl FreshVars {
    pub fn new() -> Self {
        FreshVars::default()
    }

    /// Rename every variable of the clause to a fresh canonical name,
    /// assigning names in order of first occurrence.
    pub fn freshen(&mut self, clause: &Clause) -> Clause {
        let mut renaming: HashMap<Variable, Variable> = HashMap::new();
        let literals = clause
            .literals
            .iter()
            .map(|lit| Literal {
                atom: Atom {
                    predicate: lit.atom.predicate.clone(),
                    args: lit
                        .atom
                        .args
                        .iter()
                        .map(|arg| self.rename_term(arg, &mut renaming))
                        .collect(),
                },
                polarity: lit.polarity,
            })
            .collect();
        Clause { literals }
    }

    fn rename_term(&mut self, term: &Term, renaming: &mut HashMap<Variable, Variable>) -> Term {
        match term {
            Term::Variable(v) => {
                let renamed = renaming.entry(v.clone()).or_insert_with(|| {
                    let n = self.counter;
                    self.counter += 1;
                    Variable::new(format!("v{n}"))
                });
                Term::Variable(renamed.clone())
            }
            Term::Constant(_) => term.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter()
                    .map(|arg| self.rename_term(arg, renaming))
                    .collect(),
            ),
        }
    }
}

/// Literals of a clause except the one at `exclude`, with the substitution
/// applied. Used to collect the side literals of a resolution or factoring
/// step.
pub(crate) fn literals_except(
    clause: &Clause,
    exclude: usize,
    subst: &Substitution,
) -> Vec<Literal> {
    clause
        .literals
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != exclude)
        .map(|(_, lit)| lit.apply_substitution(subst))
        .collect()
}
