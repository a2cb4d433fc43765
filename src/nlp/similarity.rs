// TF-IDF cosine similarity graph over the sentences of one document
use crate::error::{Result, SummarizeError};
use crate::nlp::sentences::Sentence;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z0-9']+").unwrap());

// Function words dropped before weighting so they cannot dominate similarity
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "she",
        "in", "is", "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will",
        "with", "this", "but", "they", "have", "had", "what", "when", "where", "who", "which",
        "why", "how", "his", "her", "their", "there", "been", "being", "than", "then", "so",
        "if", "into", "not", "no", "do", "does", "did", "can", "could", "would", "should",
        "may", "also", "after", "before", "any", "all", "each", "our", "we", "you", "i",
    ]
    .iter()
    .copied()
    .collect()
});

pub fn tokenize(s: &str) -> Vec<String> {
    WORD_RE
        .find_iter(s)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Lower-cased tokens with stop words removed.
pub fn content_terms(s: &str) -> Vec<String> {
    tokenize(s)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .collect()
}

/// Symmetric, non-negative sentence similarity weights stored as a dense matrix.
/// Node `i` is the sentence with ordinal index `i`; the diagonal is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityGraph {
    weights: Vec<Vec<f64>>,
}

impl SimilarityGraph {
    pub fn build(sentences: &[Sentence<'_>]) -> Self {
        let n = sentences.len();
        if n < 2 {
            return Self {
                weights: vec![vec![0.0; n]; n],
            };
        }

        let docs_terms: Vec<Vec<String>> = sentences
            .par_iter()
            .map(|s| content_terms(s.text))
            .collect();

        let mut vocab: HashMap<&str, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        for terms in &docs_terms {
            let mut seen: HashSet<&str> = HashSet::new();
            for t in terms {
                if !seen.insert(t.as_str()) {
                    continue;
                }
                let next = vocab.len();
                let idx = *vocab.entry(t.as_str()).or_insert(next);
                if idx == df.len() {
                    df.push(0);
                }
                df[idx] += 1;
            }
        }

        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n as f64) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let vectors: Vec<Vec<f64>> = docs_terms
            .par_iter()
            .map(|terms| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for t in terms {
                    if let Some(&i) = vocab.get(t.as_str()) {
                        *counts.entry(i).or_insert(0.0) += 1.0;
                    }
                }
                let mut vec = vec![0.0; idf.len()];
                for (&i, &count) in &counts {
                    vec[i] = (1.0 + count.log2()) * idf[i];
                }
                let norm = vec.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for x in vec.iter_mut() {
                        *x /= norm;
                    }
                }
                vec
            })
            .collect();

        let mut weights = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let sim = cosine_sim(&vectors[i], &vectors[j]).clamp(0.0, 1.0);
                weights[i][j] = sim;
                weights[j][i] = sim;
            }
        }
        Self { weights }
    }

    /// Build from an explicit weight table. Negative or non-finite weights become zero,
    /// the diagonal is cleared and asymmetric pairs are averaged.
    pub fn from_weights(mut weights: Vec<Vec<f64>>) -> Result<Self> {
        let n = weights.len();
        if let Some(row) = weights.iter().find(|row| row.len() != n) {
            return Err(SummarizeError::InvalidParameter(format!(
                "weight table must be square: expected {} columns, found {}",
                n,
                row.len()
            )));
        }
        for i in 0..n {
            weights[i][i] = 0.0;
            for j in (i + 1)..n {
                let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
                let w = (clean(weights[i][j]) + clean(weights[j][i])) / 2.0;
                weights[i][j] = w;
                weights[j][i] = w;
            }
        }
        Ok(Self { weights })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.weights[i][j]
        }
    }

    /// Sum of edge weights incident to node `i`.
    pub fn strength(&self, i: usize) -> f64 {
        self.weights[i].iter().sum()
    }
}

fn cosine_sim(a: &[f64], b: &[f64]) -> f64 {
    // vectors are L2-normalised, so the dot product is the cosine
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::sentences::split_sentences;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Troponin: Positive, ECG shows ST elevation.");
        assert_eq!(
            tokens,
            vec!["troponin", "positive", "ecg", "shows", "st", "elevation"]
        );
    }

    #[test]
    fn test_content_terms_drop_stop_words() {
        let terms = content_terms("The patient was stable and in no distress");
        assert_eq!(terms, vec!["patient", "stable", "distress"]);
    }

    #[test]
    fn test_graph_is_symmetric_with_zero_diagonal() {
        let sentences = split_sentences(
            "Chest pain started at rest. Chest pain radiated to the arm. The weather was mild.",
        );
        let graph = SimilarityGraph::build(&sentences);
        assert_eq!(graph.len(), 3);
        for i in 0..3 {
            assert_eq!(graph.weight(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(graph.weight(i, j), graph.weight(j, i));
                assert!(graph.weight(i, j) >= 0.0);
            }
        }
        assert!(graph.weight(0, 1) > 0.0);
        assert_eq!(graph.weight(0, 2), 0.0);
    }

    #[test]
    fn test_stop_word_only_overlap_is_zero() {
        let sentences = split_sentences("It was the end. It was the start.");
        let graph = SimilarityGraph::build(&sentences);
        assert_eq!(graph.weight(0, 1), 0.0);
    }

    #[test]
    fn test_trivial_graphs() {
        let one = split_sentences("Single sentence here.");
        let graph = SimilarityGraph::build(&one);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.strength(0), 0.0);

        let none = SimilarityGraph::build(&[]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_from_weights_sanitises_table() {
        let graph = SimilarityGraph::from_weights(vec![
            vec![5.0, -1.0, 0.4],
            vec![-1.0, 5.0, f64::NAN],
            vec![0.2, f64::NAN, 5.0],
        ])
        .unwrap();
        assert_eq!(graph.weight(0, 0), 0.0);
        assert_eq!(graph.weight(0, 1), 0.0);
        assert!((graph.weight(0, 2) - 0.3).abs() < 1e-12);
        assert_eq!(graph.weight(1, 2), 0.0);
    }

    #[test]
    fn test_from_weights_rejects_ragged_table() {
        let result = SimilarityGraph::from_weights(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(matches!(result, Err(SummarizeError::InvalidParameter(_))));
    }
}
