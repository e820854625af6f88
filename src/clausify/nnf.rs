//! Connective elimination and negation normal form

use crate::fol::Formula;

/// Rewrite `->` and `<->` in terms of `!`, `&`, `|`.
///
/// The biconditional uses the conjunctive form `(!A | B) & (A | !B)` so that
/// CNF distribution stays bounded.
pub(super) fn eliminate_connectives(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(inner) => Formula::not(eliminate_connectives(*inner)),
        Formula::And(l, r) => Formula::and(eliminate_connectives(*l), eliminate_connectives(*r)),
        Formula::Or(l, r) => Formula::or(eliminate_connectives(*l), eliminate_connectives(*r)),
        Formula::Implies(l, r) => {
            let l = eliminate_connectives(*l);
            let r = eliminate_connectives(*r);
            Formula::or(Formula::not(l), r)
        }
        Formula::Iff(l, r) => {
            let l = eliminate_connectives(*l);
            let r = eliminate_connectives(*r);
            Formula::and(
                Formula::or(Formula::not(l.clone()), r.clone()),
                Formula::or(l, Formula::not(r)),
            )
        }
        Formula::Forall(var, body) => {
            Formula::Forall(var, Box::new(eliminate_connectives(*body)))
        }
        Formula::Exists(var, body) => {
            Formula::Exists(var, Box::new(eliminate_connectives(*body)))
        }
    }
}

/// Push negations down to atoms. Expects `->` and `<->` to be gone already.
pub(super) fn to_nnf(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(inner) => negate(*inner),
        Formula::And(l, r) => Formula::and(to_nnf(*l), to_nnf(*r)),
        Formula::Or(l, r) => Formula::or(to_nnf(*l), to_nnf(*r)),
        Formula::Forall(var, body) => Formula::Forall(var, Box::new(to_nnf(*body))),
        Formula::Exists(var, body) => Formula::Exists(var, Box::new(to_nnf(*body))),
        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are eliminated before NNF conversion")
        }
    }
}

/// NNF of the negation of `formula`
fn negate(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => Formula::not(formula),
        // Double negation cancels
        Formula::Not(inner) => to_nnf(*inner),
        // De Morgan
        Formula::And(l, r) => Formula::or(negate(*l), negate(*r)),
        Formula::Or(l, r) => Formula::and(negate(*l), negate(*r)),
        // Quantifier duals
        Formula::Forall(var, body) => Formula::Exists(var, Box::new(negate(*body))),
        Formula::Exists(var, body) => Formula::Forall(var, Box::new(negate(*body))),
        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are eliminated before NNF conversion")
        }
    }
}
