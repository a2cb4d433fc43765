// Summary configuration consumed by the pipeline
use crate::error::{Result, SummarizeError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Target audience register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Tone {
    #[default]
    Patient,
    Doctor,
}

impl Tone {
    /// Pick the phrasing that matches this tone.
    pub fn phrase<'a>(self, patient: &'a str, doctor: &'a str) -> &'a str {
        match self {
            Tone::Patient => patient,
            Tone::Doctor => doctor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Strategy {
    Extractive,
    Abstractive,
    #[default]
    Structured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub tone: Tone,
    pub strategy: Strategy,
    pub sentence_count: usize,
    pub chunk_words: usize,
    pub overlap_percent: f64,
    pub min_length: usize,
    pub max_length: usize,
    pub mask_phi: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            tone: Tone::Patient,
            strategy: Strategy::Structured,
            sentence_count: 5,
            chunk_words: 400,
            overlap_percent: 10.0,
            min_length: 30,
            max_length: 130,
            mask_phi: true,
        }
    }
}

impl SummaryConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let f = File::open(path)?;
        let config: SummaryConfig = serde_json::from_reader(f)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sentence_count == 0 {
            return Err(SummarizeError::InvalidParameter(
                "sentence count must be a positive integer".to_string(),
            ));
        }
        if self.chunk_words == 0 {
            return Err(SummarizeError::InvalidParameter(
                "chunk size must be at least one word".to_string(),
            ));
        }
        if !(0.0..100.0).contains(&self.overlap_percent) {
            return Err(SummarizeError::InvalidParameter(format!(
                "overlap percent must be in [0, 100), got {}",
                self.overlap_percent
            )));
        }
        if self.max_length == 0 || self.min_length > self.max_length {
            return Err(SummarizeError::InvalidParameter(format!(
                "summary length bounds are inconsistent (min {}, max {})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SummaryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_sentence_count_rejected() {
        let config = SummaryConfig {
            sentence_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SummarizeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_full_overlap_rejected() {
        let config = SummaryConfig {
            overlap_percent: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SummarizeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_inverted_length_bounds_rejected() {
        let config = SummaryConfig {
            min_length: 200,
            max_length: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tone_phrase() {
        assert_eq!(Tone::Patient.phrase("Heart attack", "STEMI"), "Heart attack");
        assert_eq!(Tone::Doctor.phrase("Heart attack", "STEMI"), "STEMI");
    }

    #[test]
    fn test_partial_json_config_uses_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        let mut f = File::create(&path)?;
        writeln!(f, r#"{{"tone": "Doctor", "sentence_count": 3}}"#)?;

        let config = SummaryConfig::from_json_file(&path)?;
        assert_eq!(config.tone, Tone::Doctor);
        assert_eq!(config.sentence_count, 3);
        assert_eq!(config.chunk_words, 400);
        assert!(config.mask_phi);
        Ok(())
    }
}
