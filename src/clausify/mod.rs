//! Conversion of formulas to clausal form
//!
//! The pipeline runs in a fixed order, since Skolemization does not commute
//! with the later steps: eliminate `->`/`<->`, push negations to literals,
//! standardize variables apart, Skolemize, drop universal quantifiers,
//! distribute `|` over `&`, and split into clauses.

mod cnf;
mod nnf;
mod skolem;
mod standardize;

use crate::fol::{Clause, Formula};
use std::collections::HashMap;
use thiserror::Error;

/// Source of fresh names for standardized variables and Skolem symbols.
///
/// Counters are monotone for the lifetime of the supply. A knowledge base
/// keeps one supply per session so Skolem symbols stay unique across the
/// whole premise set; generated names always contain an underscore, which
/// user identifiers (purely alphanumeric) cannot.
#[derive(Debug, Clone, Default)]
pub struct NameSupply {
    variables: usize,
    skolems: usize,
}

impl NameSupply {
    pub fn new() -> Self {
        NameSupply::default()
    }

    /// A fresh variable name derived from `base`
    pub fn fresh_variable(&mut self, base: &str) -> String {
        let n = self.variables;
        self.variables += 1;
        format!("{base}_{n}")
    }

    /// A fresh Skolem symbol name
    pub fn fresh_skolem(&mut self) -> String {
        let n = self.skolems;
        self.skolems += 1;
        format!("sk_{n}")
    }
}

/// Error produced when a formula cannot be clausified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClausifyError {
    #[error("function '{symbol}' is used with arity {first} and with arity {second}")]
    FunctionArityConflict {
        symbol: String,
        first: usize,
        second: usize,
    },
    #[error("relation '{symbol}' is used with arity {first} and with arity {second}")]
    PredicateArityConflict {
        symbol: String,
        first: usize,
        second: usize,
    },
}

/// Convert a formula into an equisatisfiable set of clauses.
///
/// Tautological clauses are dropped; an empty result means the formula is
/// valid. Free variables are treated as universally quantified.
pub fn clausify(formula: Formula, names: &mut NameSupply) -> Result<Vec<Clause>, ClausifyError> {
    check_arities(&formula)?;
    let formula = nnf::eliminate_connectives(formula);
    let formula = nnf::to_nnf(formula);
    let formula = standardize::standardize_apart(formula, names);
    let formula = skolem::skolemize(formula, names);
    let formula = cnf::drop_universals(formula);
    Ok(cnf::to_clauses(formula))
}

/// Reject formulas that use one symbol at two different arities.
fn check_arities(formula: &Formula) -> Result<(), ClausifyError> {
    let mut functions: HashMap<&str, usize> = HashMap::new();
    let mut predicates: HashMap<&str, usize> = HashMap::new();
    check_formula(formula, &mut functions, &mut predicates)
}

fn check_formula<'a>(
    formula: &'a Formula,
    functions: &mut HashMap<&'a str, usize>,
    predicates: &mut HashMap<&'a str, usize>,
) -> Result<(), ClausifyError> {
    match formula {
        Formula::Atom(atom) => {
            let arity = atom.args.len();
            let seen = *predicates.entry(&atom.predicate.name).or_insert(arity);
            if seen != arity {
                return Err(ClausifyError::PredicateArityConflict {
                    symbol: atom.predicate.name.clone(),
                    first: seen,
                    second: arity,
                });
            }
            for arg in &atom.args {
                check_term(arg, functions)?;
            }
            Ok(())
        }
        Formula::Not(inner) => check_formula(inner, functions, predicates),
        Formula::And(l, r)
        | Formula::Or(l, r)
        | Formula::Implies(l, r)
        | Formula::Iff(l, r) => {
            check_formula(l, functions, predicates)?;
            check_formula(r, functions, predicates)
        }
        Formula::Forall(_, body) | Formula::Exists(_, body) => {
            check_formula(body, functions, predicates)
        }
    }
}

fn check_term<'a>(
    term: &'a crate::fol::Term,
    functions: &mut HashMap<&'a str, usize>,
) -> Result<(), ClausifyError> {
    if let crate::fol::Term::Function(f, args) = term {
        let arity = args.len();
        let seen = *functions.entry(&f.name).or_insert(arity);
        if seen != arity {
            return Err(ClausifyError::FunctionArityConflict {
                symbol: f.name.clone(),
                first: seen,
                second: arity,
            });
        }
        for arg in args {
            check_term(arg, functions)?;
        }
    }
    Ok(())
}
