// Regex PHI redaction. One-way and approximate:
// - a 6 to 8 digit identifier (including most MRNs longer than 7 digits) matches the
//   phone pattern first and becomes [PHONE];
// - name values run until a character outside [\w ,.'-], so "Name: Jo Roe, Age" eats ", Age";
// - unlabelled names, addresses and free-text dates ("Jan 5") are not redacted.
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{3}\)?[-.\s]?){1,2}\d{3,4}\b").unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|\d{4}[/\-]\d{1,2}[/\-]\d{1,2})\b").unwrap()
});

static MRN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:MRN[:\s]*\d{5,}|Record\s*No[:\s]*\d{5,})\b").unwrap()
});

static NAME_FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Name|Patient Name|Pt\. Name)\s*:[ \t]*[\w ,.'-]+\b").unwrap()
});

pub const EMAIL_TAG: &str = "[EMAIL]";
pub const PHONE_TAG: &str = "[PHONE]";
pub const DATE_TAG: &str = "[DATE]";
pub const MRN_TAG: &str = "[MRN]";
pub const NAME_TAG: &str = "[NAME]";

pub fn anonymize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = EMAIL_PATTERN.replace_all(text, EMAIL_TAG);
    let text = PHONE_PATTERN.replace_all(&text, PHONE_TAG);
    let text = DATE_PATTERN.replace_all(&text, DATE_TAG);
    let text = MRN_PATTERN.replace_all(&text, MRN_TAG);
    let text = NAME_FIELD_PATTERN.replace_all(&text, format!("${{1}}: {}", NAME_TAG).as_str());
    text.into_owned()
}
