//! Bag-of-words embedding ranker
//!
//! A lightweight, model-free stand-in for sentence-embedding premise
//! selection: descriptions are embedded as hashed bag-of-words vectors and
//! ranked by cosine similarity against the goal description. Fully
//! deterministic, so proof searches stay reproducible.

use super::PremiseSelector;
use std::cmp::Ordering;

/// Embedding dimension. Small enough to stay cheap, large enough that
/// unrelated descriptions rarely collide into the same buckets.
const DIMENSIONS: usize = 256;

/// Ranks lemmas by cosine similarity of hashed bag-of-words embeddings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddingRanker;

impl EmbeddingRanker {
    pub fn new() -> Self {
        EmbeddingRanker
    }

    /// Embed a description into a fixed-dimension token-count vector.
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; DIMENSIONS];
        for token in tokens(text) {
            vector[bucket(&token)] += 1.0;
        }
        vector
    }
}

impl PremiseSelector for EmbeddingRanker {
    fn select(&self, goal: &str, candidates: &[String]) -> Vec<usize> {
        if goal.trim().is_empty() || candidates.is_empty() {
            return vec![];
        }

        let goal_vec = self.embed(goal);
        let mut scored: Vec<(usize, f32)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, candidate)| {
                let score = cosine(&goal_vec, &self.embed(candidate));
                (score > 0.0).then_some((idx, score))
            })
            .collect();

        // Highest similarity first; equal scores keep index order
        scored.sort_by(|(i, a), (j, b)| {
            b.partial_cmp(a).unwrap_or(Ordering::Equal).then(i.cmp(j))
        });

        log::debug!(
            "embedding ranker scored {} of {} candidates",
            scored.len(),
            candidates.len()
        );

        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    fn name(&self) -> &str {
        "embedding"
    }
}

/// Lowercased alphanumeric tokens of a description
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// FNV-1a bucket for a token
fn bucket(token: &str) -> usize {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % DIMENSIONS as u64) as usize
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
