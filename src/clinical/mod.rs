// Structured clinical summaries: field extraction, diagnosis rules,
// paragraph rendering and PHI redaction.
pub mod anonymize;
pub mod diagnosis;
pub mod fields;
pub mod render;

pub use anonymize::anonymize;
pub use diagnosis::{infer_diagnosis, DiagnosisRule, DiagnosisRules};
pub use fields::{extract_fields, ExtractedFields, Field, NOT_MENTIONED};
pub use render::render_paragraph;

use crate::config::Tone;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredSummary {
    pub fields: ExtractedFields,
    /// Rule-based diagnosis if a rule matched, otherwise the labelled one.
    pub diagnosis: Field,
    pub paragraph: String,
}

/// Extract, diagnose and render from the original (unredacted) report text.
/// With `mask_phi` the rendered name becomes [NAME] and the paragraph is redacted.
pub fn summarize_structured(
    original_text: &str,
    tone: Tone,
    rules: &DiagnosisRules,
    mask_phi: bool,
) -> StructuredSummary {
    let mut fields = extract_fields(original_text);
    let diagnosis = rules
        .infer(original_text, tone)
        .or(fields.diagnosis.clone());

    if mask_phi && fields.patient_name.is_found() {
        fields.patient_name = Field::Found(anonymize::NAME_TAG.to_string());
    }
    let mut paragraph = render_paragraph(&fields, &diagnosis, tone);
    if mask_phi {
        paragraph = anonymize(&paragraph);
    }

    StructuredSummary {
        fields,
        diagnosis,
        paragraph,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SAMPLE_REPORT;

    #[test]
    fn test_sample_report_patient_tone() {
        let summary = summarize_structured(SAMPLE_REPORT, Tone::Patient, &DiagnosisRules::default(), false);
        assert_eq!(summary.diagnosis.as_found(), Some("Heart attack"));
        let p = &summary.paragraph;
        assert!(p.starts_with("John Smith, 65 years, experienced Severe chest pain"));
        assert!(p.contains("This was diagnosed as Heart attack."));
        assert!(p.contains("The treatment performed was PCI with stent in RCA."));
        assert!(p.contains("The outcome was Patient discharged in stable condition."));
        assert!(p.contains("Medications prescribed include Aspirin, Clopidogrel, Statin, Metoprolol."));
        assert!(p.contains("Follow-up is scheduled: Cardiology OPD after 2 weeks."));
        assert!(!p.contains(NOT_MENTIONED));
    }

    #[test]
    fn test_sample_report_doctor_tone() {
        let summary = summarize_structured(SAMPLE_REPORT, Tone::Doctor, &DiagnosisRules::default(), false);
        let p = &summary.paragraph;
        assert!(p.starts_with("Patient: John Smith, 65 years."));
        assert!(p.contains("Diagnosis: Acute myocardial infarction (STEMI)."));
        assert!(p.contains("Procedure/Treatment: PCI with stent in RCA."));
        assert!(p.contains("Follow-up: Cardiology OPD after 2 weeks."));
    }

    #[test]
    fn test_labelled_diagnosis_used_when_no_rule_matches() {
        let text = "Chief Complaint: rash\nDiagnosis: Contact dermatitis";
        let summary = summarize_structured(text, Tone::Doctor, &DiagnosisRules::default(), false);
        assert_eq!(summary.diagnosis.as_found(), Some("Contact dermatitis"));
        assert_eq!(
            summary.paragraph,
            "Chief complaint: rash. Diagnosis: Contact dermatitis."
        );
    }

    #[test]
    fn test_masking_hides_name_and_dates() {
        let text = "Patient Name: Jane Roe\nChief Complaint: cough\nFollow-up: clinic on 03/04/2025";
        let summary = summarize_structured(text, Tone::Patient, &DiagnosisRules::default(), true);
        assert!(!summary.paragraph.contains("Jane"));
        assert!(summary.paragraph.starts_with("[NAME] experienced cough."));
        assert!(summary.paragraph.contains("clinic on [DATE]"));
    }
}
