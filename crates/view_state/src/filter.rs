//! Free-text table filter.
//!
//! Matching ignores case, accents and repeated whitespace, so `cafe` finds
//! `Café  Central`.
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::state::{TableData, TableRow};

/// Folds `input` to the form used for matching.
pub fn normalize_token(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() {
            if !out.is_empty() && !prev_space {
                out.push(' ');
                prev_space = true;
            }
            continue;
        }
        out.extend(ch.to_lowercase());
        prev_space = false;
    }
    out
}

/// An empty token matches every row.
pub fn row_matches(row: &TableRow, token: &str) -> bool {
    let token = normalize_token(token);
    matches_normalized(row, &token)
}

pub fn filtered_rows<'a>(table: &'a TableData, token: &str) -> Vec<&'a TableRow> {
    let token = normalize_token(token);
    table
        .rows
        .iter()
        .filter(|row| matches_normalized(row, &token))
        .collect()
}

fn matches_normalized(row: &TableRow, token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    [row.concept.as_str(), row.account.as_str(), row.kind.label()]
        .iter()
        .any(|field| normalize_token(field).contains(token))
}
