// Label-anchored field extraction from a semi-structured clinical narrative.
// Every field is optional: an absent label yields `Field::NotMentioned`, never an error.
use crate::nlp::sentences::split_sentences;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_MENTIONED: &str = "Not mentioned";

const MAX_FIELD_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    #[default]
    NotMentioned,
    Found(String),
}

impl Field {
    /// Wrap a raw value; blank values count as not mentioned.
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(NOT_MENTIONED) {
            Field::NotMentioned
        } else {
            Field::Found(value.to_string())
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Field::Found(_))
    }

    pub fn as_found(&self) -> Option<&str> {
        match self {
            Field::Found(v) => Some(v.as_str()),
            Field::NotMentioned => None,
        }
    }

    pub fn or(self, other: Field) -> Field {
        if self.is_found() {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_found().unwrap_or(NOT_MENTIONED))
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::from_value(&value)
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub patient_name: Field,
    pub age: Field,
    pub gender: Field,
    pub complaint: Field,
    pub diagnosis: Field,
    pub procedure: Field,
    pub medications: Field,
    pub follow_up: Field,
    pub outcome: Field,
}

fn label_pattern(labels: &str) -> Regex {
    Regex::new(&format!(r"(?im)(?:{})[ \t]*:[ \t]*([^\r\n]+)", labels)).unwrap()
}

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| label_pattern(r"\bpatient[ \t]+name|\bpt\.?[ \t]*name|^[ \t]*name"));

static AGE_PATTERN: Lazy<Regex> = Lazy::new(|| label_pattern(r"\bage"));

static GENDER_PATTERN: Lazy<Regex> = Lazy::new(|| label_pattern(r"\bgender|\bsex"));

static GENDER_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(male|female)\b").unwrap());

static COMPLAINT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    label_pattern(r"\bchief[ \t]+complaints?|\bpresenting[ \t]+complaints?|\bc/o|^[ \t]*complaints?")
});

static DIAGNOSIS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    label_pattern(r"\b(?:final[ \t]+|provisional[ \t]+|working[ \t]+)?diagnosis|\bimpression|\bassessment")
});

static PROCEDURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| label_pattern(r"\bprocedures?(?:[ \t]+performed)?|\bintervention"));

static MEDICATIONS_PATTERN: Lazy<Regex> =
    Lazy::new(|| label_pattern(r"\b(?:discharge[ \t]+)?medications?|\bmeds"));

static FOLLOW_UP_PATTERN: Lazy<Regex> = Lazy::new(|| label_pattern(r"\bfollow[- ]?up"));

static OUTCOME_PATTERN: Lazy<Regex> = Lazy::new(|| label_pattern(r"\boutcome|\bdisposition"));

// First outcome-like phrase anywhere in the text, up to `.`, `,` or a line break.
// Known false positives: an unrelated sentence in multi-patient documents, words
// such as "unstable", and other labels such as "Discharge Medications: Amoxicillin,".
static OUTCOME_PHRASE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(discharge[d]?|stable|recovered|improved).*?(\.|,|\n)").unwrap()
});

pub fn extract_fields(original_text: &str) -> ExtractedFields {
    ExtractedFields {
        patient_name: labelled(&NAME_PATTERN, original_text),
        age: labelled(&AGE_PATTERN, original_text),
        gender: extract_gender(original_text),
        complaint: labelled(&COMPLAINT_PATTERN, original_text),
        diagnosis: labelled(&DIAGNOSIS_PATTERN, original_text),
        procedure: labelled(&PROCEDURE_PATTERN, original_text),
        medications: labelled(&MEDICATIONS_PATTERN, original_text),
        follow_up: labelled(&FOLLOW_UP_PATTERN, original_text),
        outcome: labelled(&OUTCOME_PATTERN, original_text).or(outcome_phrase(original_text)),
    }
}

fn labelled(pattern: &Regex, text: &str) -> Field {
    pattern
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| Field::from_value(&clean_value(m.as_str())))
        .unwrap_or_default()
}

// Keep the first sentence of the captured line, bounded in length.
fn clean_value(raw: &str) -> String {
    let first = split_sentences(raw)
        .first()
        .map(|s| s.text)
        .unwrap_or("");
    let bounded = match first.char_indices().nth(MAX_FIELD_CHARS) {
        Some((cut, _)) => &first[..cut],
        None => first,
    };
    bounded
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';'))
        .to_string()
}

fn extract_gender(text: &str) -> Field {
    let labelled_value = labelled(&GENDER_PATTERN, text);
    let value = match labelled_value.as_found() {
        Some(v) => v.to_string(),
        None => match GENDER_WORD_PATTERN.captures(text).and_then(|cap| cap.get(1)) {
            Some(m) => m.as_str().to_string(),
            None => return Field::NotMentioned,
        },
    };
    let normalized = match value.to_lowercase().as_str() {
        "m" | "male" => "Male".to_string(),
        "f" | "female" => "Female".to_string(),
        _ => value,
    };
    Field::from_value(&normalized)
}

fn outcome_phrase(text: &str) -> Field {
    OUTCOME_PHRASE_PATTERN
        .find(text)
        .map(|m| Field::from_value(&clean_value(m.as_str())))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SAMPLE_REPORT;

    #[test]
    fn test_name_present_age_absent() {
        let fields = extract_fields("Patient Name: Jane Roe\nHistory: asthma");
        assert_eq!(fields.patient_name, Field::Found("Jane Roe".to_string()));
        assert_eq!(fields.age, Field::NotMentioned);
        assert_eq!(fields.age.to_string(), NOT_MENTIONED);
    }

    #[test]
    fn test_sample_report_fields() {
        let fields = extract_fields(SAMPLE_REPORT);
        assert_eq!(fields.patient_name.as_found(), Some("John Smith"));
        assert_eq!(fields.age.as_found(), Some("65 years"));
        assert_eq!(
            fields.complaint.as_found(),
            Some("Severe chest pain for 4 hours radiating to left arm with sweating")
        );
        assert_eq!(fields.procedure.as_found(), Some("PCI with stent in RCA"));
        assert_eq!(
            fields.medications.as_found(),
            Some("Aspirin, Clopidogrel, Statin, Metoprolol")
        );
        assert_eq!(
            fields.follow_up.as_found(),
            Some("Cardiology OPD after 2 weeks")
        );
        assert_eq!(
            fields.outcome.as_found(),
            Some("Patient discharged in stable condition")
        );
        assert_eq!(fields.diagnosis, Field::NotMentioned);
        assert_eq!(fields.gender, Field::NotMentioned);
    }

    #[test]
    fn test_age_keeps_its_unit() {
        let fields = extract_fields("Patient Name: Baby Roe\nAge: 18 months\nChief Complaint: fever");
        assert_eq!(fields.age.as_found(), Some("18 months"));
        assert_eq!(extract_fields("Age: 65 years").age.as_found(), Some("65 years"));
        assert_eq!(extract_fields("age:42").age.as_found(), Some("42"));
        assert_eq!(extract_fields("Stage: 3").age, Field::NotMentioned);
    }

    #[test]
    fn test_outcome_phrase_can_match_other_labels() {
        let fields = extract_fields("Discharge Medications: Amoxicillin, Paracetamol");
        assert_eq!(
            fields.outcome.as_found(),
            Some("Discharge Medications: Amoxicillin")
        );
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let fields = extract_fields("CHIEF COMPLAINT: cough\nfollow up: GP in 1 week");
        assert_eq!(fields.complaint.as_found(), Some("cough"));
        assert_eq!(fields.follow_up.as_found(), Some("GP in 1 week"));
    }

    #[test]
    fn test_value_stops_at_sentence_end() {
        let fields = extract_fields("Diagnosis: Community acquired pneumonia. Started on antibiotics.");
        assert_eq!(
            fields.diagnosis.as_found(),
            Some("Community acquired pneumonia")
        );
    }

    #[test]
    fn test_gender_label_and_fallback() {
        assert_eq!(
            extract_fields("Sex: F").gender.as_found(),
            Some("Female")
        );
        assert_eq!(
            extract_fields("A 40 year old male with fever.").gender.as_found(),
            Some("Male")
        );
    }

    #[test]
    fn test_outcome_phrase_fallback() {
        let fields = extract_fields("Treated overnight. Patient improved with fluids, then went home.");
        assert_eq!(fields.outcome.as_found(), Some("improved with fluids"));
    }

    #[test]
    fn test_empty_label_value_is_not_mentioned() {
        let fields = extract_fields("Procedure:   \nMedications: none listed");
        assert_eq!(fields.procedure, Field::NotMentioned);
        assert_eq!(fields.medications.as_found(), Some("none listed"));
    }

    #[test]
    fn test_extraction_never_fails_on_degenerate_input() {
        assert_eq!(extract_fields(""), ExtractedFields::default());
        let fields = extract_fields(":::: \n\n Name:");
        assert_eq!(fields.patient_name, Field::NotMentioned);
    }

    #[test]
    fn test_long_values_are_bounded() {
        let text = format!("Medications: {}", "x".repeat(500));
        let fields = extract_fields(&text);
        assert_eq!(fields.medications.as_found().unwrap().len(), MAX_FIELD_CHARS);
    }

    #[test]
    fn test_field_serializes_with_sentinel() {
        let fields = ExtractedFields {
            patient_name: Field::Found("Jane Roe".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["patient_name"], "Jane Roe");
        assert_eq!(json["age"], NOT_MENTIONED);
        let back: ExtractedFields = serde_json::from_value(json).unwrap();
        assert_eq!(back, fields);
    }
}
