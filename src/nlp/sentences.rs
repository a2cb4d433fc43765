// Sentence splitting with abbreviation and line-structure awareness.
// Clinical reports mix prose with "Label: value" lines, so a line break that
// starts a new capitalised line or bullet also ends a sentence.
use once_cell::sync::Lazy;
use std::collections::HashSet;

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "dr", "mr", "mrs", "ms", "prof", "st", "vs", "etc", "e.g", "i.e", "approx", "no",
        "pt", "hx", "dx", "rx", "tx", "sx", "fig", "jr", "sr", "mg", "mcg", "ml", "kg",
        "cm", "mm", "min", "hr", "hrs", "wk", "wks", "yr", "yrs", "b.i.d", "t.i.d",
        "q.i.d", "q.d", "p.o", "p.r.n", "a.m", "p.m", "sec", "dept",
    ]
    .iter()
    .copied()
    .collect()
});

/// A sentence span together with its position in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub index: usize,
    pub text: &'a str,
}

pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());

    let mut spans: Vec<&str> = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            '.' | '!' | '?' => {
                let mut j = i + 1;
                while j < chars.len() && is_closing(chars[j].1) {
                    j += 1;
                }
                let at_break = j == chars.len() || chars[j].1.is_whitespace();
                if at_break && !(c == '.' && ends_with_abbreviation(&text[start..pos])) {
                    let end = byte_at(j);
                    spans.push(&text[start..end]);
                    start = end;
                }
                i = j;
            }
            '\n' => {
                if line_break_ends_sentence(&text[pos + 1..]) {
                    spans.push(&text[start..pos]);
                    start = pos + 1;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    spans.push(&text[start..]);

    spans
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(index, text)| Sentence { index, text })
        .collect()
}

/// Join sentences back together with single spaces.
pub fn join_sentences(sentences: &[Sentence<'_>]) -> String {
    sentences
        .iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_closing(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

fn ends_with_abbreviation(before_dot: &str) -> bool {
    let token = before_dot
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if token.is_empty() {
        return false;
    }
    // Single-letter initials ("J. Smith")
    let mut letters = token.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        if first.is_alphabetic() {
            return true;
        }
    }
    ABBREVIATIONS.contains(token.to_lowercase().as_str())
}

fn line_break_ends_sentence(rest: &str) -> bool {
    let next_line = rest.trim_start_matches([' ', '\t', '\r']);
    match next_line.chars().next() {
        None | Some('\n') => true,
        Some(c) => c.is_uppercase() || matches!(c, '-' | '*' | '\u{2022}'),
    }
}
