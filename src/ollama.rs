// Abstractive capability backed by a local Ollama install (`ollama run <model> <prompt>`).
use crate::error::CapabilityError;
use crate::nlp::abstractive::ChunkSummarizer;
use std::process::Command;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "mistral";

// stderr fragments that mean the model could not fit the request in memory
const EXHAUSTION_MARKERS: &[&str] = &[
    "out of memory",
    "insufficient memory",
    "requires more system memory",
    "cudamalloc failed",
    "failed to allocate",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaSummarizer {
    pub model: String,
}

impl OllamaSummarizer {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Model from the override, then `OLLAMA_MODEL`, then the smallest installed model.
    pub fn detect(model_override: Option<String>) -> Self {
        let model = model_override
            .or_else(|| std::env::var("OLLAMA_MODEL").ok())
            .or_else(probe_smallest_model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        debug!("using ollama model {}", model);
        Self { model }
    }
}

impl ChunkSummarizer for OllamaSummarizer {
    fn summarize_chunk(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, CapabilityError> {
        let prompt = build_prompt(text, min_length, max_length);
        let output = Command::new("ollama")
            .arg("run")
            .arg(&self.model)
            .arg(&prompt)
            .output()
            .map_err(|e| CapabilityError::Other(format!("failed to invoke ollama: {}", e)))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!("ollama run failed ({}): {}", self.model, stderr);
        Err(classify_failure(&stderr))
    }
}

pub fn build_prompt(text: &str, min_length: usize, max_length: usize) -> String {
    format!(
        "Summarize the following part of a medical report in {} to {} words.\n\
         - Use only facts stated in the text; do not add anything new.\n\
         - Keep medication names, doses and dates exactly as written.\n\
         - Output the summary only.\n\nText:\n{}\n",
        min_length, max_length, text
    )
}

pub fn classify_failure(stderr: &str) -> CapabilityError {
    let lowered = stderr.to_lowercase();
    if EXHAUSTION_MARKERS.iter().any(|m| lowered.contains(m)) {
        CapabilityError::ResourceExhausted(stderr.to_string())
    } else if stderr.is_empty() {
        CapabilityError::Other("ollama exited without output".to_string())
    } else {
        CapabilityError::Other(stderr.to_string())
    }
}

// Parse `ollama list` (NAME  ID  SIZE  MODIFIED) and pick the smallest model.
fn probe_smallest_model() -> Option<String> {
    let out = Command::new("ollama").arg("list").output().ok()?;
    if !out.status.success() {
        return None;
    }
    smallest_model(&String::from_utf8_lossy(&out.stdout))
}

fn smallest_model(listing: &str) -> Option<String> {
    let mut best: Option<(String, f64)> = None;
    for line in listing.lines() {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 3 {
            continue;
        }
        let size = cols.windows(2).skip(1).find_map(|pair| {
            let scale = match pair[1].to_uppercase().as_str() {
                "GB" => 1024.0 * 1024.0 * 1024.0,
                "MB" => 1024.0 * 1024.0,
                "KB" => 1024.0,
                _ => return None,
            };
            let value = pair[0].parse::<f64>().ok()?;
            Some(value * scale)
        });
        if let Some(size) = size {
            match &best {
                Some((_, best_size)) if *best_size <= size => {}
                _ => best = Some((cols[0].to_string(), size)),
            }
        }
    }
    best.map(|(name, _)| name)
}
