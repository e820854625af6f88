//! End-to-end tests of the proving session

use proofdesk::{
    AllLemmas, Justification, NoLemmas, PremiseSource, Proof, ProveOutcome, ProverConfig,
    Session,
};
use std::time::Duration;

fn prove(session: &mut Session, goal: &str) -> ProveOutcome {
    session
        .prove(goal, None, &ProverConfig::default())
        .expect("goal should parse and clausify")
        .outcome
}

fn must_prove(session: &mut Session, goal: &str) -> Proof {
    match prove(session, goal) {
        ProveOutcome::Proved { proof, .. } => proof,
        other => panic!("expected a proof of {goal}, got {other:?}"),
    }
}

#[test]
fn test_modus_ponens() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("forall x (P(x) -> Q(x))", None).unwrap();
    session.add_axiom("P(a)", None).unwrap();

    let proof = must_prove(&mut session, "Q(a)");

    // Two premise clauses, the negated conclusion, one intermediate
    // resolvent, and the empty clause
    assert_eq!(proof.steps.len(), 5);
    assert_eq!(
        proof.steps[0].justification,
        Justification::Premise(PremiseSource::Axiom(0))
    );
    assert_eq!(
        proof.steps[1].justification,
        Justification::Premise(PremiseSource::Axiom(1))
    );
    assert_eq!(
        proof.steps[2].justification,
        Justification::Premise(PremiseSource::Conclusion)
    );
    assert!(proof.steps.last().unwrap().clause.is_empty());
}

#[test]
fn test_existential_witness() {
    let mut session = Session::new(Box::new(NoLemmas));
    session
        .add_axiom("forall animal (Cat(animal) -> Mammal(animal))", None)
        .unwrap();
    session
        .add_axiom("exists animal (Pet(animal) & !Mammal(animal))", None)
        .unwrap();

    let proof = must_prove(&mut session, "exists animal (Pet(animal) & !Cat(animal))");

    // The witness for the second axiom is the first Skolem symbol of the
    // session and must show up in the trace
    let trace = proof.to_string();
    assert!(trace.contains("sk_0"), "no Skolem constant in:\n{trace}");
}

fn even_odd_session() -> Session {
    let mut session = Session::new(Box::new(AllLemmas));
    session.add_axiom("forall x !(Even(x) & Odd(x))", None).unwrap();
    session
        .add_axiom(
            "forall x ((Even(x) -> Odd(addOne(x))) & (Odd(x) -> Even(addOne(x))))",
            None,
        )
        .unwrap();
    session.add_axiom("Integer(0) & Even(0)", None).unwrap();
    session
}

#[test]
fn test_even_odd() {
    let mut session = even_odd_session();
    must_prove(&mut session, "!Even(addOne(0))");
}

#[test]
fn test_lemma_reuse() {
    let mut session = even_odd_session();
    must_prove(&mut session, "!Even(addOne(0))");

    // The stored theorem is the shortest route to this refutation, and the
    // unit-first search takes it
    let proof = must_prove(&mut session, "!forall x Even(x)");
    assert!(
        proof.steps.iter().any(|step| {
            step.justification == Justification::Premise(PremiseSource::Theorem(0))
        }),
        "proof does not use theorem 0:\n{proof}"
    );
}

#[test]
fn test_non_consequence_saturates() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("P(a)", None).unwrap();

    assert!(matches!(
        prove(&mut session, "Q(a)"),
        ProveOutcome::Saturated
    ));
}

#[test]
fn test_tautology_proved_from_nothing() {
    let mut session = Session::new(Box::new(NoLemmas));
    must_prove(&mut session, "forall x (P(x) | !P(x))");
}

#[test]
fn test_budget_exhaustion() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("P(A)", None).unwrap();
    session.add_axiom("forall x (P(x) -> P(f(x)))", None).unwrap();

    let config = ProverConfig {
        max_resolvents: 100,
        timeout: Duration::from_secs(30),
        ..ProverConfig::default()
    };
    let report = session.prove("Q(A)", None, &config).unwrap();
    assert!(matches!(report.outcome, ProveOutcome::BudgetExhausted(_)));

    // Nothing was stored
    assert!(session.entries(proofdesk::Kind::Theorem).is_empty());
}

#[test]
fn test_contrapositive() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("forall x (A(x) -> B(x))", None).unwrap();
    must_prove(&mut session, "forall y (!B(y) -> !A(y))");
}

#[test]
fn test_disjunction_elimination() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("forall x (A(x) | B(x))", None).unwrap();
    session.add_axiom("!A(1)", None).unwrap();
    must_prove(&mut session, "B(1)");
}

#[test]
fn test_implication_chain_with_existential() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("forall x (A(x) -> B(x))", None).unwrap();
    session.add_axiom("forall y (B(y) -> C(y))", None).unwrap();
    session.add_axiom("exists x A(x)", None).unwrap();
    must_prove(&mut session, "exists x C(x)");
}

#[test]
fn test_biconditional() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("A(x) <-> B(x)", None).unwrap();
    session.add_axiom("B(x) | A(x)", None).unwrap();
    must_prove(&mut session, "A(x) & B(x)");
}

#[test]
fn test_universal_instantiation() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("forall x R(x)", None).unwrap();
    must_prove(&mut session, "R(0)");
    must_prove(&mut session, "exists y R(y)");
}

#[test]
fn test_existential_from_witness() {
    let mut session = Session::new(Box::new(NoLemmas));
    session.add_axiom("R(0)", None).unwrap();
    must_prove(&mut session, "exists x R(x)");
}

#[test]
fn test_selected_lemmas_reported() {
    let mut session = Session::new(Box::new(AllLemmas));
    session.add_axiom("P(A)", None).unwrap();

    let report = session
        .prove("P(A)", Some("trivial".to_string()), &ProverConfig::default())
        .unwrap();
    assert!(report.selected_lemmas.is_empty());
    assert!(matches!(report.outcome, ProveOutcome::Proved { .. }));

    // Second proof sees the stored theorem as a candidate
    let report = session
        .prove("P(A)", Some("again".to_string()), &ProverConfig::default())
        .unwrap();
    assert_eq!(report.selected_lemmas, vec![0]);
}
