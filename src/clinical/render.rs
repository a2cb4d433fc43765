// Tone-specific paragraph templates over the extracted fields.
// A clause is emitted only for fields that were actually found.
use crate::clinical::fields::{ExtractedFields, Field};
use crate::config::Tone;

pub const PATIENT_EMPTY: &str = "No details could be found in this report.";
pub const DOCTOR_EMPTY: &str = "No structured findings identified.";

pub fn render_paragraph(fields: &ExtractedFields, diagnosis: &Field, tone: Tone) -> String {
    let clauses = match tone {
        Tone::Patient => patient_clauses(fields, diagnosis),
        Tone::Doctor => doctor_clauses(fields, diagnosis),
    };
    if clauses.is_empty() {
        return tone.phrase(PATIENT_EMPTY, DOCTOR_EMPTY).to_string();
    }
    clauses.join(" ")
}

fn value(field: &Field) -> Option<&str> {
    field
        .as_found()
        .map(|v| v.trim().trim_end_matches(['.', ',', ';']).trim_end())
        .filter(|v| !v.is_empty())
}

fn demographics(fields: &ExtractedFields) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(age) = value(&fields.age) {
        if age.chars().all(|c| c.is_ascii_digit()) {
            parts.push(format!("{} years", age));
        } else {
            parts.push(age.to_string());
        }
    }
    if let Some(gender) = value(&fields.gender) {
        parts.push(gender.to_string());
    }
    parts
}

fn patient_clauses(fields: &ExtractedFields, diagnosis: &Field) -> Vec<String> {
    let mut clauses = Vec::new();
    let name = value(&fields.patient_name);
    let demo = demographics(fields);

    let mut head = name.unwrap_or("The patient").to_string();
    for part in &demo {
        head.push_str(", ");
        head.push_str(part);
    }
    match value(&fields.complaint) {
        Some(complaint) if demo.is_empty() => {
            clauses.push(format!("{} experienced {}.", head, complaint))
        }
        Some(complaint) => clauses.push(format!("{}, experienced {}.", head, complaint)),
        None if name.is_some() || !demo.is_empty() => clauses.push(format!("{}.", head)),
        None => {}
    }

    if let Some(d) = value(diagnosis) {
        clauses.push(format!("This was diagnosed as {}.", d));
    }
    if let Some(p) = value(&fields.procedure) {
        clauses.push(format!("The treatment performed was {}.", p));
    }
    if let Some(o) = value(&fields.outcome) {
        clauses.push(format!("The outcome was {}.", o));
    }
    if let Some(m) = value(&fields.medications) {
        clauses.push(format!("Medications prescribed include {}.", m));
    }
    if let Some(f) = value(&fields.follow_up) {
        clauses.push(format!("Follow-up is scheduled: {}.", f));
    }
    clauses
}

fn doctor_clauses(fields: &ExtractedFields, diagnosis: &Field) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut identity: Vec<String> = Vec::new();
    if let Some(name) = value(&fields.patient_name) {
        identity.push(name.to_string());
    }
    identity.extend(demographics(fields));
    if !identity.is_empty() {
        clauses.push(format!("Patient: {}.", identity.join(", ")));
    }

    let labelled = [
        ("Chief complaint", value(&fields.complaint)),
        ("Diagnosis", value(diagnosis)),
        ("Procedure/Treatment", value(&fields.procedure)),
        ("Outcome", value(&fields.outcome)),
        ("Medications", value(&fields.medications)),
        ("Follow-up", value(&fields.follow_up)),
    ];
    for (label, v) in labelled {
        if let Some(v) = v {
            clauses.push(format!("{}: {}.", label, v));
        }
    }
    clauses
}
