//! Proof steps and trace reconstruction

use crate::fol::Clause;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Where a premise clause came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PremiseSource {
    /// Clause of the axiom with this index
    Axiom(usize),
    /// Clause of the previously proved theorem with this index
    Theorem(usize),
    /// Clause of the negated goal
    Conclusion,
}

/// How a clause entered the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justification {
    /// Input clause
    Premise(PremiseSource),
    /// Resolvent of the two clauses at the given indices
    Resolve(usize, usize),
    /// Factor of the clause at the given index
    Factor(usize),
}

impl Justification {
    /// Indices of the clauses this one was derived from
    pub fn parents(&self) -> Vec<usize> {
        match self {
            Justification::Premise(_) => vec![],
            Justification::Resolve(i, j) => vec![*i, *j],
            Justification::Factor(i) => vec![*i],
        }
    }

    /// Ordering rank used when assembling a trace: premises, then the
    /// negated goal's clauses, then derived clauses.
    fn rank(&self) -> u8 {
        match self {
            Justification::Premise(PremiseSource::Axiom(_))
            | Justification::Premise(PremiseSource::Theorem(_)) => 0,
            Justification::Premise(PremiseSource::Conclusion) => 1,
            Justification::Resolve(_, _) | Justification::Factor(_) => 2,
        }
    }

    fn remap(&self, map: &HashMap<usize, usize>) -> Justification {
        match self {
            Justification::Premise(_) => *self,
            Justification::Resolve(i, j) => Justification::Resolve(map[i], map[j]),
            Justification::Factor(i) => Justification::Factor(map[i]),
        }
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Justification::Premise(PremiseSource::Axiom(i)) => write!(f, "Premise, Axiom {i}"),
            Justification::Premise(PremiseSource::Theorem(i)) => {
                write!(f, "Premise, Theorem {i}")
            }
            Justification::Premise(PremiseSource::Conclusion) => write!(f, "Conclusion"),
            Justification::Resolve(i, j) => write!(f, "Resolve {i}, {j}"),
            Justification::Factor(i) => write!(f, "Factor {i}"),
        }
    }
}

/// One line of a proof trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub index: usize,
    pub clause: Clause,
    pub justification: Justification,
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({})", self.index, self.clause, self.justification)
    }
}

/// A refutation: premises first, ending at the empty clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub steps: Vec<ProofStep>,
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// A clause recorded during saturation, with its derivation
#[derive(Debug, Clone)]
pub(crate) struct ProofRecord {
    pub clause: Clause,
    pub justification: Justification,
}

/// Extract the proof ending at `empty_idx`: keep only ancestors of the
/// empty clause, order them premises-first, and renumber.
pub(crate) fn extract(records: &[ProofRecord], empty_idx: usize) -> Proof {
    let mut included: HashSet<usize> = HashSet::new();
    let mut queue: VecDeque<usize> = VecDeque::from([empty_idx]);
    while let Some(idx) = queue.pop_front() {
        if included.insert(idx) {
            queue.extend(records[idx].justification.parents());
        }
    }

    // Derived clauses keep their relative order, so every parent precedes
    // its child; premises and conclusion clauses carry no dependencies and
    // are moved to the front.
    let mut order: Vec<usize> = included.into_iter().collect();
    order.sort_by_key(|&idx| (records[idx].justification.rank(), idx));

    let mut map = HashMap::new();
    let mut steps = Vec::with_capacity(order.len());
    for (new_idx, &old_idx) in order.iter().enumerate() {
        map.insert(old_idx, new_idx);
        steps.push(ProofStep {
            index: new_idx,
            clause: records[old_idx].clause.clone(),
            justification: records[old_idx].justification.remap(&map),
        });
    }

    Proof { steps }
}
