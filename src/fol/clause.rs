//! Clauses: disjunctions of literals, implicitly universally closed

use super::literal::Literal;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A clause (disjunction of literals). The empty clause is falsity.
///
/// Variables are local to a clause; the resolution engine renames them apart
/// before two clauses interact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause, collapsing duplicate literals while preserving the
    /// order of first occurrence.
    pub fn new(literals: Vec<Literal>) -> Self {
        let mut seen = HashSet::new();
        let mut deduped = Vec::with_capacity(literals.len());
        for lit in literals {
            if seen.insert(lit.clone()) {
                deduped.push(lit);
            }
        }
        Clause { literals: deduped }
    }

    pub fn empty() -> Self {
        Clause { literals: vec![] }
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// A clause containing both a literal and its complement is valid and
    /// contributes nothing to a refutation.
    pub fn is_tautology(&self) -> bool {
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].atom == self.literals[j].atom
                    && self.literals[i].polarity != self.literals[j].polarity
                {
                    return true;
                }
            }
        }
        false
    }

    /// All variables occurring in the clause
    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        for lit in &self.literals {
            lit.collect_variables(&mut vars);
        }
        vars
    }

    /// Depth of the deepest term in any literal
    pub fn max_term_depth(&self) -> usize {
        self.literals
            .iter()
            .map(Literal::max_term_depth)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}
