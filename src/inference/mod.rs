//! Inference rules and proof bookkeeping

mod common;
mod factoring;
mod proof;
mod resolution;

pub use common::FreshVars;
pub use factoring::factors;
pub use proof::{Justification, PremiseSource, Proof, ProofStep};
pub use resolution::resolvents;

pub(crate) use proof::{extract, ProofRecord};
