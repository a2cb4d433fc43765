//! Medical report summarization core.
//!
//! Three independent strategies over one report text:
//! extractive (TF-IDF similarity graph + centrality ranking), abstractive
//! (chunk-and-merge around an injected [`nlp::ChunkSummarizer`]) and structured
//! (label-anchored field extraction rendered in patient or doctor tone).
//! PHI masking is an optional pre-pass for the text-based strategies.
pub mod clinical;
pub mod config;
pub mod error;
pub mod input;
pub mod nlp;
pub mod ollama;
pub mod pipeline;

pub use config::{Strategy, SummaryConfig, Tone};
pub use error::{CapabilityError, SummarizeError};
pub use pipeline::{Summarizer, Summary};
