//! Binary resolution

use super::common::literals_except;
use crate::fol::Clause;
use crate::unification::unify_literals;

/// All binary resolvents of two clauses.
///
/// Every literal of `given` is paired with every literal of `partner` of
/// opposite polarity and matching predicate; each pair that unifies yields
/// the resolvent built from the remaining literals of both clauses under the
/// MGU. The caller must have renamed `partner` apart from `given`.
pub fn resolvents(given: &Clause, partner: &Clause) -> Vec<Clause> {
    let mut results = Vec::new();

    for (i, lit_g) in given.literals.iter().enumerate() {
        for (j, lit_p) in partner.literals.iter().enumerate() {
            if lit_g.polarity == lit_p.polarity {
                continue;
            }
            if let Ok(mgu) = unify_literals(lit_g, lit_p) {
                let mut literals = literals_except(given, i, &mgu);
                literals.extend(literals_except(partner, j, &mgu));
                results.push(Clause::new(literals));
            }
        }
    }

    results
}
