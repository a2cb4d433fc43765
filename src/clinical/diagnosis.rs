// Ordered rule table mapping co-occurring signal terms to a named condition.
// Rules are evaluated top to bottom and the first match wins; new rules go at the end.
use crate::clinical::fields::Field;
use crate::config::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisRule {
    /// Lower-case terms that must all appear in the text.
    pub all_of: &'static [&'static str],
    pub patient: &'static str,
    pub doctor: &'static str,
}

impl DiagnosisRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.all_of.iter().all(|term| lowered.contains(term))
    }

    pub fn phrase(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Patient => self.patient,
            Tone::Doctor => self.doctor,
        }
    }
}

const BUILTIN_RULES: &[DiagnosisRule] = &[
    DiagnosisRule {
        all_of: &["st elevation", "troponin", "positive"],
        patient: "Heart attack",
        doctor: "Acute myocardial infarction (STEMI)",
    },
    DiagnosisRule {
        all_of: &["angina"],
        patient: "Chest pain likely due to angina",
        doctor: "Stable angina",
    },
    DiagnosisRule {
        all_of: &["pneumonia"],
        patient: "Pneumonia",
        doctor: "Pneumonia",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisRules {
    rules: Vec<DiagnosisRule>,
}

impl Default for DiagnosisRules {
    fn default() -> Self {
        Self {
            rules: BUILTIN_RULES.to_vec(),
        }
    }
}

impl DiagnosisRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule with the lowest precedence.
    pub fn push(&mut self, rule: DiagnosisRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[DiagnosisRule] {
        &self.rules
    }

    pub fn infer(&self, text: &str, tone: Tone) -> Field {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| Field::Found(rule.phrase(tone).to_string()))
            .unwrap_or_default()
    }
}

pub fn infer_diagnosis(text: &str, tone: Tone) -> Field {
    DiagnosisRules::default().infer(text, tone)
}
