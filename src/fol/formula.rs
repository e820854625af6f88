//! First-order formulas as produced by the parser
//!
//! Formulas only exist between parsing and clausification; the prover itself
//! works on clauses.

use super::literal::Atom;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A first-order formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formula {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional
    Iff(Box<Formula>, Box<Formula>),
    /// Universal quantification
    Forall(Variable, Box<Formula>),
    /// Existential quantification
    Exists(Variable, Box<Formula>),
}

impl Formula {
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn and(left: Formula, right: Formula) -> Formula {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Formula {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Formula {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    pub fn iff(left: Formula, right: Formula) -> Formula {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    pub fn forall(var: impl Into<String>, body: Formula) -> Formula {
        Formula::Forall(Variable::new(var), Box::new(body))
    }

    pub fn exists(var: impl Into<String>, body: Formula) -> Formula {
        Formula::Exists(Variable::new(var), Box::new(body))
    }

    /// Variables occurring in the formula outside the scope of any quantifier
    /// binding them.
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            Formula::Atom(atom) => {
                let mut vars = HashSet::new();
                atom.collect_variables(&mut vars);
                vars
            }
            Formula::Not(f) => f.free_variables(),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => {
                let mut vars = l.free_variables();
                vars.extend(r.free_variables());
                vars
            }
            Formula::Forall(var, f) | Formula::Exists(var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }
}

// Pretty printing. The printed form re-parses to a structurally equal
// formula: binding levels are <-> (loosest), ->, |, &, then negation,
// quantifiers, and atoms. -> and <-> associate to the right, | and & to
// the left.

/// Binding strength of each connective, loosest first
const LEVEL_IFF: u8 = 0;
const LEVEL_IMPLIES: u8 = 1;
const LEVEL_OR: u8 = 2;
const LEVEL_AND: u8 = 3;
const LEVEL_UNARY: u8 = 4;

impl Formula {
    fn level(&self) -> u8 {
        match self {
            Formula::Iff(_, _) => LEVEL_IFF,
            Formula::Implies(_, _) => LEVEL_IMPLIES,
            Formula::Or(_, _) => LEVEL_OR,
            Formula::And(_, _) => LEVEL_AND,
            Formula::Not(_) | Formula::Forall(_, _) | Formula::Exists(_, _) | Formula::Atom(_) => {
                LEVEL_UNARY
            }
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min_level: u8) -> fmt::Result {
        if self.level() < min_level {
            write!(f, "(")?;
            self.fmt_at(f, LEVEL_IFF)?;
            return write!(f, ")");
        }
        match self {
            Formula::Atom(atom) => write!(f, "{}", atom),
            Formula::Not(inner) => {
                write!(f, "!")?;
                inner.fmt_at(f, LEVEL_UNARY)
            }
            Formula::And(l, r) => {
                l.fmt_at(f, LEVEL_AND)?;
                write!(f, " & ")?;
                r.fmt_at(f, LEVEL_UNARY)
            }
            Formula::Or(l, r) => {
                l.fmt_at(f, LEVEL_OR)?;
                write!(f, " | ")?;
                r.fmt_at(f, LEVEL_AND)
            }
            Formula::Implies(l, r) => {
                l.fmt_at(f, LEVEL_OR)?;
                write!(f, " -> ")?;
                r.fmt_at(f, LEVEL_IMPLIES)
            }
            Formula::Iff(l, r) => {
                l.fmt_at(f, LEVEL_IMPLIES)?;
                write!(f, " <-> ")?;
                r.fmt_at(f, LEVEL_IFF)
            }
            Formula::Forall(var, body) => {
                write!(f, "forall {} ", var)?;
                body.fmt_at(f, LEVEL_UNARY)
            }
            Formula::Exists(var, body) => {
                write!(f, "exists {} ", var)?;
                body.fmt_at(f, LEVEL_UNARY)
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, LEVEL_IFF)
    }
}
