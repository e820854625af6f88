//! Factoring
//!
//! When two literals of one clause unify, the instance of the clause under
//! their MGU collapses them into one. Factors are generated alongside every
//! new clause; without them binary resolution is incomplete.

use super::common::literals_except;
use crate::fol::Clause;
use crate::unification::unify_literals;

/// All single-step factors of a clause.
pub fn factors(clause: &Clause) -> Vec<Clause> {
    let mut results = Vec::new();

    for i in 0..clause.literals.len() {
        for j in (i + 1)..clause.literals.len() {
            let lit_i = &clause.literals[i];
            let lit_j = &clause.literals[j];
            if lit_i.polarity != lit_j.polarity {
                continue;
            }
            if let Ok(mgu) = unify_literals(lit_i, lit_j) {
                // Under the MGU the two literals coincide, so dropping one
                // of them and instantiating the rest is the factor.
                results.push(Clause::new(literals_except(clause, j, &mgu)));
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Atom, Literal, Term};

    fn pos(name: &str, args: Vec<Term>) -> Literal {
        Literal::positive(Atom::new(name, args))
    }

    fn neg(name: &str, args: Vec<Term>) -> Literal {
        Literal::negative(Atom::new(name, args))
    }

    #[test]
    fn test_variable_factor() {
        // P(x) | P(y) factors to P(x)
        let clause = Clause::new(vec![
            pos("P", vec![Term::var("x")]),
            pos("P", vec![Term::var("y")]),
        ]);

        let results = factors(&clause);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 1);
    }

    #[test]
    fn test_factor_instantiates_side_literals() {
        // P(x) | P(A) | Q(x) factors to P(A) | Q(A)
        let clause = Clause::new(vec![
            pos("P", vec![Term::var("x")]),
            pos("P", vec![Term::constant("A")]),
            pos("Q", vec![Term::var("x")]),
        ]);

        let results = factors(&clause);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].to_string(), "P(A), Q(A)");
    }

    #[test]
    fn test_opposite_polarity_not_factored() {
        let clause = Clause::new(vec![
            pos("P", vec![Term::var("x")]),
            neg("P", vec![Term::var("y")]),
        ]);
        assert!(factors(&clause).is_empty());
    }

    #[test]
    fn test_clashing_literals_not_factored() {
        let clause = Clause::new(vec![
            pos("P", vec![Term::constant("A")]),
            pos("P", vec![Term::constant("B")]),
        ]);
        assert!(factors(&clause).is_empty());
    }

    #[test]
    fn test_unit_clause_has_no_factors() {
        let clause = Clause::new(vec![pos("P", vec![Term::var("x")])]);
        assert!(factors(&clause).is_empty());
    }
}
