// Text sources for the summarizer: TXT/MD files, PDF text extraction and the bundled sample.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const SAMPLE_REPORT: &str = "Patient Name: John Smith
Age: 65 years
History: Hypertension, high cholesterol
Chief Complaint: Severe chest pain for 4 hours radiating to left arm with sweating
ECG: ST elevation in leads II, III, aVF
Troponin: Positive
Procedure: PCI with stent in RCA
Medications: Aspirin, Clopidogrel, Statin, Metoprolol
Follow-up: Cardiology OPD after 2 weeks
Outcome: Patient discharged in stable condition";

pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "pdf"];

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read PDF {path}: {detail}")]
    Pdf { path: String, detail: String },

    #[error("Unsupported file format: {0}")]
    Unsupported(String),

    #[error("{0} contains no readable text")]
    NoReadableText(String),
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn read_document(path: &Path) -> Result<String, InputError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let display = path.display().to_string();

    let text = match ext.as_str() {
        "txt" | "md" => {
            let mut content = String::new();
            File::open(path)
                .and_then(|mut file| file.read_to_string(&mut content))
                .map_err(|source| InputError::Io {
                    path: display.clone(),
                    source,
                })?;
            content
        }
        "pdf" => pdf_extract::extract_text(path).map_err(|e| InputError::Pdf {
            path: display.clone(),
            detail: e.to_string(),
        })?,
        _ => return Err(InputError::Unsupported(ext)),
    };

    if text.trim().is_empty() {
        return Err(InputError::NoReadableText(display));
    }
    Ok(text)
}
