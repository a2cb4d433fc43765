// Chunk-and-merge adapter around an external bounded-context summarizer.
// The model itself lives behind `ChunkSummarizer`; this module only owns
// ordering, progress and error mapping.
use crate::error::{CapabilityError, Result, SummarizeError};
use crate::nlp::chunker::chunk_text;
use tracing::{debug, info, warn};

/// A summarization capability that shortens one chunk of text.
pub trait ChunkSummarizer: Send + Sync {
    fn summarize_chunk(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> std::result::Result<String, CapabilityError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbstractiveSummarizer {
    pub chunk_words: usize,
    pub overlap_percent: f64,
    pub min_length: usize,
    pub max_length: usize,
}

impl AbstractiveSummarizer {
    pub fn summarize(&self, text: &str, capability: &dyn ChunkSummarizer) -> Result<String> {
        self.summarize_with_progress(text, capability, |_| {})
    }

    /// Summarize every chunk in order and join the partial summaries with single spaces.
    /// The first failing chunk aborts the whole call; nothing partial is returned.
    pub fn summarize_with_progress<F>(
        &self,
        text: &str,
        capability: &dyn ChunkSummarizer,
        mut on_progress: F,
    ) -> Result<String>
    where
        F: FnMut(Progress),
    {
        if text.trim().is_empty() {
            return Err(SummarizeError::UnreadableInput(
                "document is empty".to_string(),
            ));
        }

        let chunks = chunk_text(text, self.chunk_words, self.overlap_percent)?;
        let total = chunks.len();
        info!(
            "summarizing {} chunk(s) of up to {} words",
            total, self.chunk_words
        );
        on_progress(Progress {
            completed: 0,
            total,
        });

        let mut partials: Vec<String> = Vec::with_capacity(total);
        for chunk in &chunks {
            let partial = capability
                .summarize_chunk(&chunk.text, self.min_length, self.max_length)
                .map_err(|e| match e {
                    CapabilityError::ResourceExhausted(detail) => {
                        warn!("chunk {} exhausted summarizer resources: {}", chunk.index, detail);
                        SummarizeError::CapacityExceeded {
                            chunk: chunk.index,
                            detail,
                        }
                    }
                    CapabilityError::Cancelled => SummarizeError::Cancelled { chunk: chunk.index },
                    CapabilityError::Other(message) => SummarizeError::CapabilityFailure(message),
                })?;
            debug!(
                "chunk {} (words {}..{}) summarized to {} chars",
                chunk.index,
                chunk.start_word,
                chunk.start_word + chunk.word_count,
                partial.len()
            );
            partials.push(partial.trim().to_string());
            on_progress(Progress {
                completed: chunk.index + 1,
                total,
            });
        }

        Ok(partials.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Keeps the first `max_length` words of each chunk and records what it saw.
    struct FirstWords {
        seen: Mutex<Vec<String>>,
    }

    impl FirstWords {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChunkSummarizer for FirstWords {
        fn summarize_chunk(
            &self,
            text: &str,
            _min_length: usize,
            max_length: usize,
        ) -> std::result::Result<String, CapabilityError> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(text
                .split_whitespace()
                .take(max_length)
                .collect::<Vec<_>>()
                .join(" "))
        }
    }

    /// Fails on the chunk with the given position.
    struct FailOn {
        position: usize,
        error: CapabilityError,
        calls: Mutex<usize>,
    }

    impl ChunkSummarizer for FailOn {
        fn summarize_chunk(
            &self,
            _text: &str,
            _min_length: usize,
            _max_length: usize,
        ) -> std::result::Result<String, CapabilityError> {
            let mut calls = self.calls.lock().unwrap();
            let current = *calls;
            *calls += 1;
            if current == self.position {
                Err(self.error.clone())
            } else {
                Ok("partial".to_string())
            }
        }
    }

    fn summarizer() -> AbstractiveSummarizer {
        AbstractiveSummarizer {
            chunk_words: 4,
            overlap_percent: 0.0,
            min_length: 1,
            max_length: 2,
        }
    }

    #[test]
    fn test_partials_joined_in_chunk_order() {
        let stub = FirstWords::new();
        let summary = summarizer()
            .summarize("a b c d e f g h i j", &stub)
            .unwrap();
        assert_eq!(summary, "a b e f i j");
        assert_eq!(stub.seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_progress_reports_each_chunk() {
        let stub = FirstWords::new();
        let mut reports = Vec::new();
        summarizer()
            .summarize_with_progress("a b c d e f g h", &stub, |p| reports.push(p))
            .unwrap();
        let completed: Vec<usize> = reports.iter().map(|p| p.completed).collect();
        assert_eq!(completed, vec![0, 1, 2]);
        assert_eq!(reports.last().unwrap().fraction(), 1.0);
    }

    #[test]
    fn test_resource_exhaustion_aborts_without_partial_output() {
        let stub = FailOn {
            position: 1,
            error: CapabilityError::ResourceExhausted("CUDA out of memory".to_string()),
            calls: Mutex::new(0),
        };
        let result = summarizer().summarize("a b c d e f g h i j", &stub);
        match result {
            Err(SummarizeError::CapacityExceeded { chunk, detail }) => {
                assert_eq!(chunk, 1);
                assert_eq!(detail, "CUDA out of memory");
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }
        // no retry and no further chunks after the failure
        assert_eq!(*stub.calls.lock().unwrap(), 2);
    }

    #[test]
    fn test_other_failure_surfaces_message_verbatim() {
        let stub = FailOn {
            position: 0,
            error: CapabilityError::Other("tokenizer missing".to_string()),
            calls: Mutex::new(0),
        };
        let err = summarizer().summarize("a b c", &stub).unwrap_err();
        assert_eq!(err, SummarizeError::CapabilityFailure("tokenizer missing".to_string()));
        assert_eq!(err.to_string(), "tokenizer missing");
    }

    #[test]
    fn test_cancellation_is_distinguishable() {
        let stub = FailOn {
            position: 0,
            error: CapabilityError::Cancelled,
            calls: Mutex::new(0),
        };
        let err = summarizer().summarize("a b c", &stub).unwrap_err();
        assert_eq!(err, SummarizeError::Cancelled { chunk: 0 });
    }

    #[test]
    fn test_bad_overlap_fails_before_calling_capability() {
        let stub = FirstWords::new();
        let bad = AbstractiveSummarizer {
            overlap_percent: 100.0,
            ..summarizer()
        };
        assert!(matches!(
            bad.summarize("a b c d e f", &stub),
            Err(SummarizeError::InvalidParameter(_))
        ));
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_text_is_unreadable() {
        let stub = FirstWords::new();
        assert!(matches!(
            summarizer().summarize("   ", &stub),
            Err(SummarizeError::UnreadableInput(_))
        ));
    }
}
