//! The knowledge base façade
//!
//! A [`Session`] holds the ordered axiom and theorem stores and drives the
//! prove pipeline: parse the goal, clausify its negation, assemble premises
//! (every axiom plus the selector's choice of lemmas), run the saturation
//! engine, and append the theorem on success. Failures never mutate the
//! stores.

use crate::clausify::{clausify, ClausifyError, NameSupply};
use crate::fol::{Clause, Formula};
use crate::inference::{PremiseSource, Proof};
use crate::parser::{parse, ParseError};
use crate::saturation::{saturate, BudgetReason, PremiseClause, ProofOutcome, ProverConfig};
use crate::selection::{EmbeddingRanker, PremiseSelector};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An axiom or theorem held by the session
#[derive(Debug, Clone)]
pub struct Entry {
    /// The formula as parsed
    pub formula: Formula,
    /// The source text as the user wrote it
    pub text: String,
    pub description: Option<String>,
    /// Clausal form, produced when the entry was accepted
    pub clauses: Vec<Clause>,
}

/// Which store an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Axiom,
    Theorem,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Axiom => write!(f, "axiom"),
            Kind::Theorem => write!(f, "theorem"),
        }
    }
}

impl FromStr for Kind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "axiom" => Ok(Kind::Axiom),
            "theorem" => Ok(Kind::Theorem),
            other => Err(SessionError::UnknownKind(other.to_string())),
        }
    }
}

/// Errors surfaced to the command layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Clausify(#[from] ClausifyError),
    #[error("unknown kind '{0}' (expected 'axiom' or 'theorem')")]
    UnknownKind(String),
    #[error("no {kind} with index {index}")]
    IndexOutOfRange { kind: Kind, index: usize },
}

/// How a prove call ended
#[derive(Debug, Clone)]
pub enum ProveOutcome {
    /// Refutation found; the theorem was stored at `index`
    Proved { index: usize, proof: Proof },
    /// The goal does not follow from the chosen premises
    Saturated,
    /// The search gave up before an answer was reached
    BudgetExhausted(BudgetReason),
}

/// Outcome of a prove call plus the lemma choice that went into it
#[derive(Debug, Clone)]
pub struct ProveReport {
    pub outcome: ProveOutcome,
    /// Theorem indices the selector picked as premises
    pub selected_lemmas: Vec<usize>,
}

/// An interactive proving session
pub struct Session {
    axioms: Vec<Entry>,
    theorems: Vec<Entry>,
    names: NameSupply,
    selector: Box<dyn PremiseSelector>,
}

impl Session {
    pub fn new(selector: Box<dyn PremiseSelector>) -> Self {
        Session {
            axioms: Vec::new(),
            theorems: Vec::new(),
            names: NameSupply::new(),
            selector,
        }
    }

    /// A session ranking lemmas by description similarity
    pub fn with_default_selector() -> Self {
        Session::new(Box::new(EmbeddingRanker::new()))
    }

    /// Parse and clausify an axiom, then append it to the store.
    pub fn add_axiom(
        &mut self,
        text: &str,
        description: Option<String>,
    ) -> Result<usize, SessionError> {
        let formula = parse(text)?;
        let clauses = clausify(formula.clone(), &mut self.names)?;
        let index = self.axioms.len();
        log::info!("axiom {index}: {} clause(s)", clauses.len());
        self.axioms.push(Entry {
            formula,
            text: text.to_string(),
            description,
            clauses,
        });
        Ok(index)
    }

    /// Attempt to prove a theorem by refuting its negation. On success the
    /// theorem is appended to the store so later proofs can reuse it.
    pub fn prove(
        &mut self,
        text: &str,
        description: Option<String>,
        config: &ProverConfig,
    ) -> Result<ProveReport, SessionError> {
        let goal = parse(text)?;
        let negated_clauses = clausify(Formula::not(goal.clone()), &mut self.names)?;

        let selected_lemmas = self.select_lemmas(description.as_deref().unwrap_or(""));

        let mut inputs = Vec::new();
        for (i, axiom) in self.axioms.iter().enumerate() {
            for clause in &axiom.clauses {
                inputs.push(PremiseClause {
                    source: PremiseSource::Axiom(i),
                    clause: clause.clone(),
                });
            }
        }
        for &i in &selected_lemmas {
            for clause in &self.theorems[i].clauses {
                inputs.push(PremiseClause {
                    source: PremiseSource::Theorem(i),
                    clause: clause.clone(),
                });
            }
        }
        for clause in negated_clauses {
            inputs.push(PremiseClause {
                source: PremiseSource::Conclusion,
                clause,
            });
        }

        log::info!(
            "proving with {} premise clause(s), {} lemma(s) selected",
            inputs.len(),
            selected_lemmas.len()
        );

        let outcome = match saturate(inputs, config) {
            ProofOutcome::Proof(proof) => {
                // Store the theorem in positive clausal form for reuse
                let clauses = clausify(goal.clone(), &mut self.names)?;
                let index = self.theorems.len();
                self.theorems.push(Entry {
                    formula: goal,
                    text: text.to_string(),
                    description,
                    clauses,
                });
                ProveOutcome::Proved { index, proof }
            }
            ProofOutcome::Saturated => ProveOutcome::Saturated,
            ProofOutcome::BudgetExhausted(reason) => ProveOutcome::BudgetExhausted(reason),
        };

        Ok(ProveReport {
            outcome,
            selected_lemmas,
        })
    }

    /// Ask the selector which theorems to use as premises.
    fn select_lemmas(&self, goal_description: &str) -> Vec<usize> {
        if self.theorems.is_empty() {
            return vec![];
        }
        let candidates: Vec<String> = self
            .theorems
            .iter()
            .map(|t| t.description.clone().unwrap_or_default())
            .collect();

        let mut selected = self.selector.select(goal_description, &candidates);
        selected.retain(|&i| i < self.theorems.len());
        let mut seen = std::collections::HashSet::new();
        selected.retain(|&i| seen.insert(i));

        log::debug!(
            "selector '{}' picked lemmas {:?}",
            self.selector.name(),
            selected
        );
        selected
    }

    /// Attach or replace a description.
    pub fn describe(
        &mut self,
        kind: Kind,
        index: usize,
        description: String,
    ) -> Result<(), SessionError> {
        let entry = self.entry_mut(kind, index)?;
        entry.description = Some(description);
        Ok(())
    }

    pub fn entries(&self, kind: Kind) -> &[Entry] {
        match kind {
            Kind::Axiom => &self.axioms,
            Kind::Theorem => &self.theorems,
        }
    }

    pub fn entry(&self, kind: Kind, index: usize) -> Result<&Entry, SessionError> {
        self.entries(kind)
            .get(index)
            .ok_or(SessionError::IndexOutOfRange { kind, index })
    }

    fn entry_mut(&mut self, kind: Kind, index: usize) -> Result<&mut Entry, SessionError> {
        let entries = match kind {
            Kind::Axiom => &mut self.axioms,
            Kind::Theorem => &mut self.theorems,
        };
        entries
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { kind, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AllLemmas;

    #[test]
    fn test_axiom_rejected_on_parse_error() {
        let mut session = Session::with_default_selector();
        let err = session.add_axiom("p(", None).unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
        assert!(session.entries(Kind::Axiom).is_empty());
    }

    #[test]
    fn test_failed_proof_leaves_store_unchanged() {
        let mut session = Session::new(Box::new(AllLemmas));
        session.add_axiom("P(A)", None).unwrap();

        let report = session
            .prove("Q(A)", None, &ProverConfig::default())
            .unwrap();
        assert!(matches!(report.outcome, ProveOutcome::Saturated));
        assert!(session.entries(Kind::Theorem).is_empty());
    }

    #[test]
    fn test_describe_and_lookup() {
        let mut session = Session::with_default_selector();
        let idx = session.add_axiom("P(A)", None).unwrap();
        session
            .describe(Kind::Axiom, idx, "a fact".to_string())
            .unwrap();
        assert_eq!(
            session.entry(Kind::Axiom, idx).unwrap().description.as_deref(),
            Some("a fact")
        );

        let err = session.entry(Kind::Theorem, 0).unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("axiom".parse::<Kind>().unwrap(), Kind::Axiom);
        assert_eq!("theorem".parse::<Kind>().unwrap(), Kind::Theorem);
        assert!(matches!(
            "lemma".parse::<Kind>(),
            Err(SessionError::UnknownKind(_))
        ));
    }
}
