// NLP module for medsum
pub mod abstractive;
pub mod centrality;
pub mod chunker;
pub mod sentences;
pub mod similarity;
pub mod summarization;

pub use abstractive::{AbstractiveSummarizer, ChunkSummarizer, Progress};
pub use chunker::{chunk_text, Chunk};
pub use sentences::{split_sentences, Sentence};
pub use summarization::summarize_extractive;
