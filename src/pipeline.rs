// Strategy dispatch: optional PHI masking, then exactly one of the
// extractive, abstractive or structured paths.
use crate::clinical::{anonymize, summarize_structured, DiagnosisRules};
use crate::config::{Strategy, SummaryConfig, Tone};
use crate::error::{Result, SummarizeError};
use crate::nlp::abstractive::{AbstractiveSummarizer, ChunkSummarizer, Progress};
use crate::nlp::summarization::summarize_extractive;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub strategy: Strategy,
    pub tone: Tone,
    pub masked: bool,
    pub text: String,
}

pub struct Summarizer<'a> {
    config: SummaryConfig,
    capability: Option<&'a dyn ChunkSummarizer>,
    rules: DiagnosisRules,
}

impl<'a> Summarizer<'a> {
    pub fn new(config: SummaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            capability: None,
            rules: DiagnosisRules::default(),
        })
    }

    pub fn with_capability(mut self, capability: &'a dyn ChunkSummarizer) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn with_rules(mut self, rules: DiagnosisRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn summarize(&self, raw_text: &str) -> Result<Summary> {
        self.summarize_with_progress(raw_text, |_| {})
    }

    /// `on_progress` only fires on the abstractive path, once per finished chunk.
    pub fn summarize_with_progress<F>(&self, raw_text: &str, on_progress: F) -> Result<Summary>
    where
        F: FnMut(Progress),
    {
        if raw_text.trim().is_empty() {
            return Err(SummarizeError::UnreadableInput(
                "please provide report text or a readable document".to_string(),
            ));
        }

        let cfg = &self.config;
        info!(
            "summarizing {} chars with {:?} strategy ({:?} tone, mask_phi={})",
            raw_text.len(),
            cfg.strategy,
            cfg.tone,
            cfg.mask_phi
        );

        let text = match cfg.strategy {
            Strategy::Structured => {
                summarize_structured(raw_text, cfg.tone, &self.rules, cfg.mask_phi).paragraph
            }
            Strategy::Extractive => {
                summarize_extractive(&self.prepare(raw_text), cfg.sentence_count)?
            }
            Strategy::Abstractive => {
                let capability = self.capability.ok_or_else(|| {
                    SummarizeError::InvalidParameter(
                        "the abstractive strategy needs a summarization capability".to_string(),
                    )
                })?;
                let adapter = AbstractiveSummarizer {
                    chunk_words: cfg.chunk_words,
                    overlap_percent: cfg.overlap_percent,
                    min_length: cfg.min_length,
                    max_length: cfg.max_length,
                };
                adapter.summarize_with_progress(&self.prepare(raw_text), capability, on_progress)?
            }
        };

        Ok(Summary {
            strategy: cfg.strategy,
            tone: cfg.tone,
            masked: cfg.mask_phi,
            text,
        })
    }

    fn prepare(&self, raw_text: &str) -> String {
        if self.config.mask_phi {
            anonymize(raw_text)
        } else {
            raw_text.to_string()
        }
    }
}
