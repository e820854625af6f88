//! Skolemization
//!
//! Each existentially quantified variable is replaced by a Skolem term over
//! the universal variables in whose scope it occurs: a fresh constant when
//! there are none, otherwise a fresh function applied to them. Free
//! variables of the formula count as outermost universals. Expects NNF input
//! with variables standardized apart.

use super::NameSupply;
use crate::fol::{Atom, Formula, Term, Variable};
use std::collections::HashMap;

pub(super) fn skolemize(formula: Formula, names: &mut NameSupply) -> Formula {
    // Free variables are implicitly universal at the outermost scope; sort
    // for a reproducible argument order.
    let mut universals: Vec<Variable> = formula.free_variables().into_iter().collect();
    universals.sort();

    let mut skolem_map = HashMap::new();
    walk(formula, &mut universals, &mut skolem_map, names)
}

fn walk(
    formula: Formula,
    universals: &mut Vec<Variable>,
    skolem_map: &mut HashMap<Variable, Term>,
    names: &mut NameSupply,
) -> Formula {
    match formula {
        Formula::Atom(atom) => Formula::Atom(Atom {
            predicate: atom.predicate,
            args: atom
                .args
                .into_iter()
                .map(|arg| replace(arg, skolem_map))
                .collect(),
        }),
        Formula::Not(inner) => Formula::not(walk(*inner, universals, skolem_map, names)),
        Formula::And(l, r) => {
            let l = walk(*l, universals, skolem_map, names);
            let r = walk(*r, universals, skolem_map, names);
            Formula::and(l, r)
        }
        Formula::Or(l, r) => {
            let l = walk(*l, universals, skolem_map, names);
            let r = walk(*r, universals, skolem_map, names);
            Formula::or(l, r)
        }
        Formula::Forall(var, body) => {
            universals.push(var.clone());
            let body = walk(*body, universals, skolem_map, names);
            universals.pop();
            Formula::Forall(var, Box::new(body))
        }
        Formula::Exists(var, body) => {
            let skolem = if universals.is_empty() {
                Term::constant(names.fresh_skolem())
            } else {
                Term::function(
                    names.fresh_skolem(),
                    universals.iter().cloned().map(Term::Variable).collect(),
                )
            };
            skolem_map.insert(var, skolem);
            // The quantifier node itself disappears
            walk(*body, universals, skolem_map, names)
        }
        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are eliminated before skolemization")
        }
    }
}

fn replace(term: Term, skolem_map: &HashMap<Variable, Term>) -> Term {
    match term {
        Term::Variable(ref v) => match skolem_map.get(v) {
            Some(skolem) => skolem.clone(),
            None => term,
        },
        Term::Constant(_) => term,
        Term::Function(f, args) => Term::Function(
            f,
            args.into_iter()
                .map(|arg| replace(arg, skolem_map))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::Atom;

    #[test]
    fn test_skolem_constant() {
        // exists x P(x) -> P(sk_0)
        let f = Formula::exists("x", Formula::Atom(Atom::new("P", vec![Term::var("x")])));
        let mut names = NameSupply::new();
        let result = skolemize(f, &mut names);
        assert_eq!(
            result,
            Formula::Atom(Atom::new("P", vec![Term::constant("sk_0")]))
        );
    }

    #[test]
    fn test_skolem_function_of_enclosing_universals() {
        // forall x exists y Loves(x, y) -> forall x Loves(x, sk_0(x))
        let f = Formula::forall(
            "x",
            Formula::exists(
                "y",
                Formula::Atom(Atom::new("Loves", vec![Term::var("x"), Term::var("y")])),
            ),
        );
        let mut names = NameSupply::new();
        let result = skolemize(f, &mut names);
        assert_eq!(
            result,
            Formula::forall(
                "x",
                Formula::Atom(Atom::new(
                    "Loves",
                    vec![
                        Term::var("x"),
                        Term::function("sk_0", vec![Term::var("x")])
                    ]
                ))
            )
        );
    }

    #[test]
    fn test_free_variable_counts_as_universal() {
        // exists y R(x, y) with free x -> R(x, sk_0(x))
        let f = Formula::exists(
            "y",
            Formula::Atom(Atom::new("R", vec![Term::var("x"), Term::var("y")])),
        );
        let mut names = NameSupply::new();
        let result = skolemize(f, &mut names);
        assert_eq!(
            result,
            Formula::Atom(Atom::new(
                "R",
                vec![Term::var("x"), Term::function("sk_0", vec![Term::var("x")])]
            ))
        );
    }

    #[test]
    fn test_existential_outside_universal_scope() {
        // exists x forall y P(x, y): the Skolem term takes no arguments
        let f = Formula::exists(
            "x",
            Formula::forall(
                "y",
                Formula::Atom(Atom::new("P", vec![Term::var("x"), Term::var("y")])),
            ),
        );
        let mut names = NameSupply::new();
        let result = skolemize(f, &mut names);
        assert_eq!(
            result,
            Formula::forall(
                "y",
                Formula::Atom(Atom::new(
                    "P",
                    vec![Term::constant("sk_0"), Term::var("y")]
                ))
            )
        );
    }
}
