//! Atoms and literals

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol. Predicate names begin with an uppercase letter;
/// nullary predicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
}

impl PredicateSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        PredicateSymbol { name: name.into() }
    }
}

/// An atomic formula (predicate applied to terms)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: PredicateSymbol::new(predicate),
            args,
        }
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for arg in &self.args {
            arg.collect_variables(vars);
        }
    }
}

/// A literal (positive or negative atom)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Atom,
    /// true = positive, false = negative
    pub polarity: bool,
}

impl Literal {
    pub fn positive(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    /// The same atom with flipped polarity
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            polarity: !self.polarity,
        }
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        self.atom.collect_variables(vars);
    }

    /// Depth of the deepest argument term (0 for nullary atoms)
    pub fn max_term_depth(&self) -> usize {
        self.atom.args.iter().map(Term::depth).max().unwrap_or(0)
    }
}

// Display implementations

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate.name)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "!")?;
        }
        write!(f, "{}", self.atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        let lit = Literal::positive(Atom::new("P", vec![Term::var("x")]));
        let neg = lit.complement();
        assert!(!neg.polarity);
        assert_eq!(neg.atom, lit.atom);
        assert_eq!(neg.complement(), lit);
    }

    #[test]
    fn test_display() {
        let lit = Literal::negative(Atom::new("Q", vec![Term::constant("A")]));
        assert_eq!(lit.to_string(), "!Q(A)");

        let nullary = Literal::positive(Atom::new("Sunny", vec![]));
        assert_eq!(nullary.to_string(), "Sunny");
    }
}
