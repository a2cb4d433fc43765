// Sliding word-count windows for feeding long documents through a
// bounded-context summarizer. Boundaries ignore sentence structure.
use crate::error::{Result, SummarizeError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub index: usize,
    /// Offset of the first word of this chunk in the whitespace-tokenized document.
    pub start_word: usize,
    pub word_count: usize,
    pub text: String,
}

/// Number of words the window advances between chunks.
pub fn chunk_step(words_per_chunk: usize, overlap_percent: f64) -> Result<usize> {
    if words_per_chunk == 0 {
        return Err(SummarizeError::InvalidParameter(
            "chunk size must be at least one word".to_string(),
        ));
    }
    if !overlap_percent.is_finite() || overlap_percent < 0.0 {
        return Err(SummarizeError::InvalidParameter(format!(
            "overlap percent must be a non-negative number, got {}",
            overlap_percent
        )));
    }
    let step = (words_per_chunk as f64 * (1.0 - overlap_percent / 100.0)).floor();
    if step < 1.0 {
        return Err(SummarizeError::InvalidParameter(format!(
            "{}% overlap on {}-word chunks leaves a step below one word",
            overlap_percent, words_per_chunk
        )));
    }
    Ok(step as usize)
}

pub fn chunk_text(text: &str, words_per_chunk: usize, overlap_percent: f64) -> Result<Vec<Chunk>> {
    let step = chunk_step(words_per_chunk, overlap_percent)?;
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() <= words_per_chunk {
        return Ok(vec![Chunk {
            index: 0,
            start_word: 0,
            word_count: words.len(),
            text: text.to_string(),
        }]);
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + words_per_chunk).min(words.len());
        chunks.push(Chunk {
            index: chunks.len(),
            start_word: start,
            word_count: end - start,
            text: words[start..end].join(" "),
        });
        if end == words.len() {
            break;
        }
        start += step;
    }
    Ok(chunks)
}
