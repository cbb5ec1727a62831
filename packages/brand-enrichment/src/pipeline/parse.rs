//! Tolerant extraction of labeled fields from a model answer.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::answer::ParsedFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Brand,
    Manufacturer,
    Rationale,
}

lazy_static! {
    /// Ordered `(label synonyms, field)` rules, evaluated per line; the first
    /// rule that matches a line claims it, and the first line per field wins.
    ///
    /// Labels are case-sensitive. Longer spellings come before their
    /// prefixes so `ブランド名：X` yields `X`, not `名：X`. A leading list
    /// marker, bold markup on either side of the colon, and the colon
    /// (either width) are optional.
    static ref RULES: Vec<(Regex, Field)> = [
        ("ブランド名|ブランド|Brand", Field::Brand),
        ("メーカー名|メーカー|製造元|Manufacturer", Field::Manufacturer),
        ("理由|根拠|Reason", Field::Rationale),
    ]
    .into_iter()
    .map(|(labels, field)| {
        let pattern = format!(
            r"^\s*(?:[-*・]\s*)?(?:\*\*)?(?:{labels})(?:\*\*)?\s*[:：]?\s*(?:\*\*)?\s*(.*)$"
        );
        (Regex::new(&pattern).unwrap(), field)
    })
    .collect();
}

/// Extract brand, manufacturer and rationale from a model answer.
///
/// Never fails: fields the answer does not mention are left empty.
pub fn parse_answer(text: &str) -> ParsedFields {
    let mut brand = None;
    let mut manufacturer = None;
    let mut rationale = None;

    for line in text.lines() {
        let Some((field, value)) = match_line(line) else {
            continue;
        };
        let slot = match field {
            Field::Brand => &mut brand,
            Field::Manufacturer => &mut manufacturer,
            Field::Rationale => &mut rationale,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    ParsedFields {
        brand: brand.unwrap_or_default(),
        manufacturer: manufacturer.unwrap_or_default(),
        rationale: rationale.unwrap_or_default(),
    }
}

fn match_line(line: &str) -> Option<(Field, String)> {
    RULES.iter().find_map(|(regex, field)| {
        regex
            .captures(line)
            .map(|caps| (*field, caps[1].trim().trim_end_matches("**").trim_end().to_string()))
    })
}
