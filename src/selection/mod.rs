//! Premise selection for lemma reuse
//!
//! Every axiom always reaches the engine; previously proved theorems are
//! filtered through a [`PremiseSelector`] first. The selector only sees
//! descriptions, never clause sets, so the core stays testable with trivial
//! stubs.

pub mod embedding;

pub use embedding::EmbeddingRanker;

/// Ranks previously proved lemmas by relevance to a goal.
///
/// The result is advisory: the session includes the returned lemmas (in the
/// returned order) and omits the rest. Implementations must be pure: the
/// same inputs always produce the same ranking.
pub trait PremiseSelector {
    /// Given the goal description and the candidate lemma descriptions,
    /// return the indices of the lemmas to include, most relevant first.
    fn select(&self, goal: &str, candidates: &[String]) -> Vec<usize>;

    /// Name used in diagnostics
    fn name(&self) -> &str;
}

/// Include every lemma, in index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllLemmas;

impl PremiseSelector for AllLemmas {
    fn select(&self, _goal: &str, candidates: &[String]) -> Vec<usize> {
        (0..candidates.len()).collect()
    }

    fn name(&self) -> &str {
        "all-lemmas"
    }
}

/// Never include lemmas.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLemmas;

impl PremiseSelector for NoLemmas {
    fn select(&self, _goal: &str, _candidates: &[String]) -> Vec<usize> {
        vec![]
    }

    fn name(&self) -> &str {
        "no-lemmas"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_selectors() {
        let candidates = vec!["a".to_string(), "b".to_string()];
        assert_eq!(AllLemmas.select("goal", &candidates), vec![0, 1]);
        assert!(NoLemmas.select("goal", &candidates).is_empty());
    }
}
