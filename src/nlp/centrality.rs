// Weighted PageRank over the sentence similarity graph (power iteration).
use crate::nlp::similarity::SimilarityGraph;
use std::cmp::Reverse;
use tracing::debug;

pub const DAMPING: f64 = 0.85;
pub const CONVERGENCE: f64 = 1e-9;
pub const MAX_ITERATIONS: usize = 200;

// Scores closer than this are treated as tied and fall back to document order
const TIE_RESOLUTION: f64 = 1e-12;

/// Importance score per sentence index. Scores are positive and sum to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores {
    scores: Vec<f64>,
}

impl CentralityScores {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn score(&self, index: usize) -> f64 {
        self.scores[index]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// Sentence indices from most to least central; equal scores keep document order.
    pub fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by_key(|&i| (Reverse((self.scores[i] / TIE_RESOLUTION).round() as i64), i));
        order
    }

    /// The `k` most central indices, returned in document order.
    pub fn top(&self, k: usize) -> Vec<usize> {
        let mut selected: Vec<usize> = self.ranked().into_iter().take(k).collect();
        selected.sort_unstable();
        selected
    }
}

pub fn rank(graph: &SimilarityGraph) -> CentralityScores {
    rank_with(graph, DAMPING, MAX_ITERATIONS, CONVERGENCE)
}

/// Power iteration with a teleport term, so isolated sentences keep a
/// `(1 - damping) / n` baseline. Nodes without edges spread their mass evenly.
pub fn rank_with(
    graph: &SimilarityGraph,
    damping: f64,
    max_iterations: usize,
    convergence: f64,
) -> CentralityScores {
    let n = graph.len();
    if n == 0 {
        return CentralityScores { scores: Vec::new() };
    }

    let strength: Vec<f64> = (0..n).map(|i| graph.strength(i)).collect();
    let base = (1.0 - damping) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];

    for iteration in 0..max_iterations {
        let dangling: f64 = (0..n)
            .filter(|&j| strength[j] <= 0.0)
            .map(|j| scores[j])
            .sum();

        let new_scores: Vec<f64> = (0..n)
            .map(|i| {
                let incoming: f64 = (0..n)
                    .filter(|&j| j != i && strength[j] > 0.0)
                    .map(|j| graph.weight(j, i) * scores[j] / strength[j])
                    .sum();
                base + damping * (incoming + dangling / n as f64)
            })
            .collect();

        let diff: f64 = new_scores
            .iter()
            .zip(scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = new_scores;

        if diff < convergence {
            debug!(
                "centrality converged after {} iterations (diff={:.2e})",
                iteration + 1,
                diff
            );
            return CentralityScores { scores };
        }
    }

    debug!(
        "centrality stopped after {} iterations without convergence",
        max_iterations
    );
    CentralityScores { scores }
}
