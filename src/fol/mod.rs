//! The first-order logic data model: terms, literals, clauses, formulas,
//! and substitutions.

pub mod clause;
pub mod formula;
pub mod literal;
pub mod substitution;
pub mod term;

pub use clause::Clause;
pub use formula::Formula;
pub use literal::{Atom, Literal, PredicateSymbol};
pub use substitution::Substitution;
pub use term::{Constant, FunctionSymbol, Term, Variable};
