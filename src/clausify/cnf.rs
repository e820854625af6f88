//! Universal-quantifier removal and CNF distribution

use crate::fol::{Clause, Formula, Literal};

/// Remove universal quantifiers. After skolemization every remaining
/// quantifier is universal, and clauses are implicitly universally closed,
/// so the prefix carries no information.
pub(super) fn drop_universals(formula: Formula) -> Formula {
    match formula {
        Formula::Forall(_, body) => drop_universals(*body),
        Formula::And(l, r) => Formula::and(drop_universals(*l), drop_universals(*r)),
        Formula::Or(l, r) => Formula::or(drop_universals(*l), drop_universals(*r)),
        Formula::Not(_) | Formula::Atom(_) => formula,
        Formula::Exists(_, _) => unreachable!("existentials are eliminated by skolemization"),
        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are eliminated before CNF distribution")
        }
    }
}

/// Distribute disjunction over conjunction and split the result into
/// clauses. Duplicate literals within a clause are collapsed and
/// tautological clauses are dropped.
pub(super) fn to_clauses(formula: Formula) -> Vec<Clause> {
    distribute(formula)
        .into_iter()
        .map(Clause::new)
        .filter(|clause| !clause.is_tautology())
        .collect()
}

fn distribute(formula: Formula) -> Vec<Vec<Literal>> {
    match formula {
        Formula::And(l, r) => {
            let mut clauses = distribute(*l);
            clauses.extend(distribute(*r));
            clauses
        }
        Formula::Or(l, r) => {
            // (A1 & ... & An) | (B1 & ... & Bm) distributes to the
            // cross product of the two clause lists
            let left = distribute(*l);
            let right = distribute(*r);
            let mut clauses = Vec::with_capacity(left.len() * right.len());
            for lc in &left {
                for rc in &right {
                    let mut combined = lc.clone();
                    combined.extend(rc.iter().cloned());
                    clauses.push(combined);
                }
            }
            clauses
        }
        Formula::Atom(atom) => vec![vec![Literal::positive(atom)]],
        Formula::Not(inner) => match *inner {
            Formula::Atom(atom) => vec![vec![Literal::negative(atom)]],
            other => unreachable!("negation of non-atom in NNF matrix: {other:?}"),
        },
        other => unreachable!("quantifier or implication in CNF matrix: {other:?}"),
    }
}
