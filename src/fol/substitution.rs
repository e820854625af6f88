//! Variable substitutions

use super::clause::Clause;
use super::literal::{Atom, Literal};
use super::term::{Term, Variable};
use std::collections::HashMap;
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Bindings are normalized eagerly: whenever a new pair is added, it is first
/// rewritten under the existing bindings and then folded back into them, so
/// applying a substitution once always yields a fixed point.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    map: HashMap<Variable, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution {
            map: HashMap::new(),
        }
    }

    /// Bind `var` to `term`, keeping the substitution idempotent.
    ///
    /// The caller is responsible for the occurs check; binding a variable to
    /// a term containing it would make application loop.
    pub fn bind(&mut self, var: Variable, term: Term) {
        let normalized = term.apply_substitution(self);
        if normalized == Term::Variable(var.clone()) {
            return;
        }

        let single = Substitution {
            map: HashMap::from([(var.clone(), normalized.clone())]),
        };
        for existing in self.map.values_mut() {
            *existing = existing.apply_substitution(&single);
        }
        self.map.insert(var, normalized);
    }

    /// Get the term a variable is bound to
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.map.iter().collect();
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
        write!(f, "{{")?;
        for (i, (var, term)) in pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => subst.get(v).cloned().unwrap_or_else(|| self.clone()),
            Term::Constant(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter()
                    .map(|arg| arg.apply_substitution(subst))
                    .collect(),
            ),
        }
    }
}

impl Atom {
    /// Apply a substitution to this atom
    pub fn apply_substitution(&self, subst: &Substitution) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self
                .args
                .iter()
                .map(|arg| arg.apply_substitution(subst))
                .collect(),
        }
    }
}

impl Literal {
    /// Apply a substitution to this literal
    pub fn apply_substitution(&self, subst: &Substitution) -> Literal {
        Literal {
            atom: self.atom.apply_substitution(subst),
            polarity: self.polarity,
        }
    }
}

impl Clause {
    /// Apply a substitution to this clause, collapsing literals that become
    /// equal.
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        Clause::new(
            self.literals
                .iter()
                .map(|lit| lit.apply_substitution(subst))
                .collect(),
        )
    }
}
