// Extractive summarization: split, build the similarity graph, rank by centrality,
// then keep the top sentences in their original order.
use crate::error::{Result, SummarizeError};
use crate::nlp::centrality::rank;
use crate::nlp::sentences::split_sentences;
use crate::nlp::similarity::SimilarityGraph;
use tracing::debug;

pub fn summarize_extractive(text: &str, k: usize) -> Result<String> {
    if k == 0 {
        return Err(SummarizeError::InvalidParameter(
            "sentence count must be a positive integer".to_string(),
        ));
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Err(SummarizeError::UnreadableInput(
            "document contains no sentences".to_string(),
        ));
    }

    // Short documents pass through untouched
    if sentences.len() <= k {
        return Ok(text.to_string());
    }

    let graph = SimilarityGraph::build(&sentences);
    let scores = rank(&graph);
    let selected = scores.top(k);
    debug!(
        "selected {} of {} sentences: {:?}",
        selected.len(),
        sentences.len(),
        selected
    );

    let summary: Vec<&str> = selected.iter().map(|&idx| sentences[idx].text).collect();
    Ok(summary.join(" "))
}
