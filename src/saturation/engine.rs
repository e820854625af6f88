//! The given-clause saturation loop

use super::state::{BudgetReason, ProofOutcome, ProverConfig};
use super::subsumption::subsumes;
use crate::fol::Clause;
use crate::inference::{extract, factors, resolvents, FreshVars, Justification, PremiseSource, ProofRecord};
use indexmap::IndexSet;
use std::time::Instant;

/// An input clause tagged with its origin
#[derive(Debug, Clone)]
pub struct PremiseClause {
    pub source: PremiseSource,
    pub clause: Clause,
}

/// Search for a refutation of the given clause set.
pub fn saturate(inputs: Vec<PremiseClause>, config: &ProverConfig) -> ProofOutcome {
    Engine::new(inputs, config).run()
}

struct Engine<'a> {
    config: &'a ProverConfig,
    /// Every clause ever admitted, in derivation order. Indices into this
    /// vector are the clause identities used in justifications.
    records: Vec<ProofRecord>,
    /// Clauses awaiting selection
    unprocessed: IndexSet<usize>,
    /// Clauses already used as the given clause
    processed: IndexSet<usize>,
    fresh: FreshVars,
    /// Count of generated resolvents and factors, including discarded ones
    generated: usize,
    /// Set when a clause was dropped by the size or depth caps; an emptied
    /// pool is then inconclusive rather than saturated
    truncated: bool,
}

impl<'a> Engine<'a> {
    fn new(inputs: Vec<PremiseClause>, config: &'a ProverConfig) -> Self {
        let mut engine = Engine {
            config,
            records: Vec::new(),
            unprocessed: IndexSet::new(),
            processed: IndexSet::new(),
            fresh: FreshVars::new(),
            generated: 0,
            truncated: false,
        };

        for input in inputs {
            let idx = engine.records.len();
            engine.records.push(ProofRecord {
                clause: input.clause,
                justification: Justification::Premise(input.source),
            });
            engine.unprocessed.insert(idx);
        }

        engine
    }

    fn run(mut self) -> ProofOutcome {
        let start = Instant::now();

        // Factor the input clauses; factors of derived clauses are produced
        // on admission.
        for idx in 0..self.records.len() {
            let clause = self.records[idx].clause.clone();
            for factor in factors(&clause) {
                if let Some(outcome) = self.admit(factor, Justification::Factor(idx)) {
                    return outcome;
                }
            }
        }

        loop {
            // Budget is polled once per iteration, so cancellation lag is
            // bounded by a single given-clause step.
            if start.elapsed() > self.config.timeout {
                return ProofOutcome::BudgetExhausted(BudgetReason::Timeout);
            }
            if self.generated >= self.config.max_resolvents {
                return ProofOutcome::BudgetExhausted(BudgetReason::Resolvents);
            }
            if self.processed.len() >= self.config.max_processed {
                return ProofOutcome::BudgetExhausted(BudgetReason::ProcessedClauses);
            }

            let given = match self.select_given() {
                Some(idx) => idx,
                None if self.truncated => {
                    return ProofOutcome::BudgetExhausted(BudgetReason::ClauseLimits)
                }
                None => return ProofOutcome::Saturated,
            };

            self.unprocessed.shift_remove(&given);
            self.processed.insert(given);

            // Resolve the given clause against every processed clause
            // (itself included), renaming the partner apart each time.
            let partners: Vec<usize> = self.processed.iter().copied().collect();
            for partner_idx in partners {
                let partner = self.fresh.freshen(&self.records[partner_idx].clause);
                let given_clause = self.records[given].clause.clone();
                for resolvent in resolvents(&given_clause, &partner) {
                    if let Some(outcome) =
                        self.admit(resolvent, Justification::Resolve(partner_idx, given))
                    {
                        return outcome;
                    }
                }
            }
        }
    }

    /// Smallest clause first, by literal count; ties go to the clause
    /// admitted earliest.
    fn select_given(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for &idx in &self.unprocessed {
            let size = self.records[idx].clause.len();
            let better = match best {
                None => true,
                Some((_, best_size)) => size < best_size,
            };
            if better {
                best = Some((idx, size));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Run a newly generated clause through the admission filters and, if it
    /// survives, add it to the unprocessed pool along with its factors.
    /// Returns a final outcome when the empty clause is derived.
    fn admit(&mut self, clause: Clause, justification: Justification) -> Option<ProofOutcome> {
        self.generated += 1;

        // Rename apart from every existing clause
        let clause = self.fresh.freshen(&clause);

        if clause.is_empty() {
            let idx = self.records.len();
            self.records.push(ProofRecord {
                clause,
                justification,
            });
            return Some(ProofOutcome::Proof(extract(&self.records, idx)));
        }

        if clause.len() > self.config.max_clause_literals
            || clause.max_term_depth() > self.config.max_term_depth
        {
            self.truncated = true;
            return None;
        }

        if clause.is_tautology() {
            return None;
        }

        // Forward subsumption: discard the newcomer if any live clause
        // subsumes it
        if self
            .live()
            .any(|idx| subsumes(&self.records[idx].clause, &clause))
        {
            return None;
        }

        let idx = self.records.len();
        self.records.push(ProofRecord {
            clause: clause.clone(),
            justification,
        });

        // Backward subsumption: evict live clauses the newcomer subsumes.
        // Their records stay, so earlier justifications remain valid.
        let evicted: Vec<usize> = self
            .live()
            .filter(|&other| subsumes(&clause, &self.records[other].clause))
            .collect();
        for other in evicted {
            self.processed.shift_remove(&other);
            self.unprocessed.shift_remove(&other);
        }

        self.unprocessed.insert(idx);

        for factor in factors(&clause) {
            if let Some(outcome) = self.admit(factor, Justification::Factor(idx)) {
                return Some(outcome);
            }
        }

        None
    }

    fn live(&self) -> impl Iterator<Item = usize> + '_ {
        self.processed
            .iter()
            .chain(self.unprocessed.iter())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Atom, Literal, Term};

    fn premise(source: PremiseSource, literals: Vec<Literal>) -> PremiseClause {
        PremiseClause {
            source,
            clause: Clause::new(literals),
        }
    }

    fn pos(name: &str, args: Vec<Term>) -> Literal {
        Literal::positive(Atom::new(name, args))
    }

    fn neg(name: &str, args: Vec<Term>) -> Literal {
        Literal::negative(Atom::new(name, args))
    }

    fn modus_ponens_inputs() -> Vec<PremiseClause> {
        vec![
            premise(
                PremiseSource::Axiom(0),
                vec![
                    neg("P", vec![Term::var("x_0")]),
                    pos("Q", vec![Term::var("x_0")]),
                ],
            ),
            premise(PremiseSource::Axiom(1), vec![pos("P", vec![Term::constant("A")])]),
            premise(
                PremiseSource::Conclusion,
                vec![neg("Q", vec![Term::constant("A")])],
            ),
        ]
    }

    #[test]
    fn test_modus_ponens_refutation() {
        let outcome = saturate(modus_ponens_inputs(), &ProverConfig::default());
        let ProofOutcome::Proof(proof) = outcome else {
            panic!("expected a proof")
        };

        // Premises and conclusion first, empty clause last
        assert_eq!(proof.steps.len(), 5);
        assert_eq!(
            proof.steps[0].justification,
            Justification::Premise(PremiseSource::Axiom(0))
        );
        assert_eq!(
            proof.steps[2].justification,
            Justification::Premise(PremiseSource::Conclusion)
        );
        assert!(proof.steps[4].clause.is_empty());
    }

    #[test]
    fn test_proof_steps_reference_earlier_steps() {
        let outcome = saturate(modus_ponens_inputs(), &ProverConfig::default());
        let ProofOutcome::Proof(proof) = outcome else {
            panic!("expected a proof")
        };

        for (i, step) in proof.steps.iter().enumerate() {
            assert_eq!(step.index, i);
            for parent in step.justification.parents() {
                assert!(parent < i, "step {i} references later step {parent}");
            }
        }
    }

    #[test]
    fn test_saturation_without_proof() {
        // P(A) alone cannot refute !Q(A)
        let inputs = vec![
            premise(PremiseSource::Axiom(0), vec![pos("P", vec![Term::constant("A")])]),
            premise(
                PremiseSource::Conclusion,
                vec![neg("Q", vec![Term::constant("A")])],
            ),
        ];

        let outcome = saturate(inputs, &ProverConfig::default());
        assert!(matches!(outcome, ProofOutcome::Saturated));
    }

    #[test]
    fn test_empty_input_saturates() {
        let outcome = saturate(vec![], &ProverConfig::default());
        assert!(matches!(outcome, ProofOutcome::Saturated));
    }

    #[test]
    fn test_budget_exhaustion_on_growing_terms() {
        // P(A), and P(x) -> P(f(x)): derivations grow forever, the goal
        // !Q(A) is unreachable
        let inputs = vec![
            premise(PremiseSource::Axiom(0), vec![pos("P", vec![Term::constant("A")])]),
            premise(
                PremiseSource::Axiom(1),
                vec![
                    neg("P", vec![Term::var("x_0")]),
                    pos("P", vec![Term::function("f", vec![Term::var("x_0")])]),
                ],
            ),
            premise(
                PremiseSource::Conclusion,
                vec![neg("Q", vec![Term::constant("A")])],
            ),
        ];

        let config = ProverConfig {
            max_resolvents: 200,
            ..ProverConfig::default()
        };
        let outcome = saturate(inputs, &config);
        assert!(matches!(outcome, ProofOutcome::BudgetExhausted(_)));
    }

    #[test]
    fn test_factoring_completes_two_literal_problem() {
        // P(x) | P(y) and !P(u) | !P(v): binary resolution alone cycles on
        // two-literal clauses; factoring the resolvents finds the
        // refutation.
        let inputs = vec![
            premise(
                PremiseSource::Axiom(0),
                vec![
                    pos("P", vec![Term::var("x_0")]),
                    pos("P", vec![Term::var("y_0")]),
                ],
            ),
            premise(
                PremiseSource::Conclusion,
                vec![
                    neg("P", vec![Term::var("u_0")]),
                    neg("P", vec![Term::var("v_0")]),
                ],
            ),
        ];

        let outcome = saturate(inputs, &ProverConfig::default());
        assert!(outcome.is_proof());
    }

    #[test]
    fn test_deterministic_traces() {
        let first = saturate(modus_ponens_inputs(), &ProverConfig::default());
        let second = saturate(modus_ponens_inputs(), &ProverConfig::default());

        let (ProofOutcome::Proof(p1), ProofOutcome::Proof(p2)) = (first, second) else {
            panic!("expected proofs")
        };
        assert_eq!(p1.to_string(), p2.to_string());
    }

    #[test]
    fn test_deep_nested_skolem_terms_survive() {
        // Equal terms nested eight functions deep: the chain resolves step
        // by step down to the empty clause.
        fn nest(depth: usize, inner: Term) -> Term {
            (0..depth).fold(inner, |t, _| Term::function("sk_9", vec![t]))
        }

        let inputs = vec![
            premise(
                PremiseSource::Axiom(0),
                vec![pos("P", vec![nest(8, Term::constant("A"))])],
            ),
            premise(
                PremiseSource::Axiom(1),
                vec![
                    neg("P", vec![Term::function("sk_9", vec![Term::var("x_0")])]),
                    pos("P", vec![Term::var("x_0")]),
                ],
            ),
            premise(
                PremiseSource::Conclusion,
                vec![neg("P", vec![Term::constant("A")])],
            ),
        ];

        let outcome = saturate(inputs, &ProverConfig::default());
        assert!(outcome.is_proof());
    }
}
