//! Standardizing variables apart
//!
//! Every variable in the formula, bound or free, is renamed to a globally
//! fresh name, so that no two quantifiers share a variable and clause sets
//! produced from different formulas never collide on variable names. Free
//! variables are renamed consistently across the whole formula; bound
//! variables are renamed per quantifier.

use super::NameSupply;
use crate::fol::{Atom, Formula, Term, Variable};
use std::collections::HashMap;

pub(super) fn standardize_apart(formula: Formula, names: &mut NameSupply) -> Formula {
    let mut free = HashMap::new();
    rename_formula(formula, &HashMap::new(), &mut free, names)
}

fn rename_formula(
    formula: Formula,
    bound: &HashMap<Variable, Variable>,
    free: &mut HashMap<Variable, Variable>,
    names: &mut NameSupply,
) -> Formula {
    match formula {
        Formula::Atom(atom) => Formula::Atom(Atom {
            predicate: atom.predicate,
            args: atom
                .args
                .into_iter()
                .map(|arg| rename_term(arg, bound, free, names))
                .collect(),
        }),
        Formula::Not(inner) => Formula::not(rename_formula(*inner, bound, free, names)),
        Formula::And(l, r) => Formula::and(
            rename_formula(*l, bound, free, names),
            rename_formula(*r, bound, free, names),
        ),
        Formula::Or(l, r) => Formula::or(
            rename_formula(*l, bound, free, names),
            rename_formula(*r, bound, free, names),
        ),
        Formula::Forall(var, body) => {
            let fresh = Variable::new(names.fresh_variable(&var.name));
            let mut inner_bound = bound.clone();
            inner_bound.insert(var, fresh.clone());
            Formula::Forall(
                fresh,
                Box::new(rename_formula(*body, &inner_bound, free, names)),
            )
        }
        Formula::Exists(var, body) => {
            let fresh = Variable::new(names.fresh_variable(&var.name));
            let mut inner_bound = bound.clone();
            inner_bound.insert(var, fresh.clone());
            Formula::Exists(
                fresh,
                Box::new(rename_formula(*body, &inner_bound, free, names)),
            )
        }
        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are eliminated before standardization")
        }
    }
}

fn rename_term(
    term: Term,
    bound: &HashMap<Variable, Variable>,
    free: &mut HashMap<Variable, Variable>,
    names: &mut NameSupply,
) -> Term {
    match term {
        Term::Variable(v) => {
            if let Some(renamed) = bound.get(&v) {
                Term::Variable(renamed.clone())
            } else if let Some(renamed) = free.get(&v) {
                Term::Variable(renamed.clone())
            } else {
                let fresh = Variable::new(names.fresh_variable(&v.name));
                free.insert(v, fresh.clone());
                Term::Variable(fresh)
            }
        }
        Term::Constant(_) => term,
        Term::Function(f, args) => Term::Function(
            f,
            args.into_iter()
                .map(|arg| rename_term(arg, bound, free, names))
                .collect(),
        ),
    }
}
