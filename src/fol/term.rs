//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable. Variable names begin with a lowercase letter; names generated
/// during clausification additionally contain an underscore, which user
/// identifiers never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A constant symbol. Constant names begin with an uppercase letter or a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

/// A function symbol. Arity is given by the argument list at each occurrence;
/// the clausifier rejects formulas that use one symbol at two arities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionSymbol { name: name.into() }
    }
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Term {
        Term::Variable(Variable::new(name))
    }

    pub fn constant(name: impl Into<String>) -> Term {
        Term::Constant(Constant::new(name))
    }

    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Function(FunctionSymbol::new(name), args)
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Check whether the given variable occurs anywhere in this term
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Nesting depth: variables and constants have depth 1, a function term
    /// is one deeper than its deepest argument.
    pub fn depth(&self) -> usize {
        match self {
            Term::Variable(_) | Term::Constant(_) => 1,
            Term::Function(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
        }
    }
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
