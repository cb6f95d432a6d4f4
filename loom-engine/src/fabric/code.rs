//! Percentage parsing and fabric content codes
//!
//! A content code is a space-separated list of `ABBR-N%` tokens, e.g.
//! `"COT-60% POL-40%"`, where `ABBR` is the first three characters of the
//! material name in upper case.

use shared::models::Composition;

/// Separator between code tokens
pub const TOKEN_SEPARATOR: &str = " ";

/// Parse percentage text the way a lenient integer parse does
///
/// Leading whitespace is skipped and the leading run of ASCII digits is
/// read; trailing text is ignored (`"60%"` reads as 60). Text with no
/// leading digit, including negative numbers, yields `None`.
pub fn parse_percent(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Percentage contributed by a text value; unparsable text counts as zero
pub fn percent_or_zero(text: &str) -> u32 {
    parse_percent(text).unwrap_or(0)
}

pub fn abbreviation(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

pub fn format_token(name: &str, percent: u32) -> String {
    format!("{}-{}%", abbreviation(name), percent)
}

/// Percentages encoded in a code, left to right
///
/// A token without a `N%` part contributes 0.
pub fn percentage_tokens(code: &str) -> Vec<u32> {
    code.split(TOKEN_SEPARATOR)
        .filter(|t| !t.is_empty())
        .map(token_percent)
        .collect()
}

fn token_percent(token: &str) -> u32 {
    for (pos, _) in token.match_indices('%') {
        let head = &token[..pos];
        let start = head
            .rfind(|c: char| !c.is_ascii_digit())
            .map_or(0, |i| i + 1);
        if let Ok(value) = head[start..].parse() {
            return value;
        }
    }
    0
}

/// Order a composition the way its code lists it
///
/// Each entry takes the first not yet claimed token carrying its
/// percentage. Entries without a matching token keep key order after the
/// matched ones.
pub fn order_by_code(composition: &Composition, code: &str) -> Vec<(String, u32)> {
    let tokens = percentage_tokens(code);
    let mut claimed = vec![false; tokens.len()];
    let mut ranked: Vec<(usize, String, u32)> = Vec::with_capacity(composition.len());

    for (key, &percent) in composition {
        let rank = tokens
            .iter()
            .enumerate()
            .find(|&(i, &t)| !claimed[i] && t == percent)
            .map(|(i, _)| i);
        if let Some(i) = rank {
            claimed[i] = true;
        }
        ranked.push((rank.unwrap_or(tokens.len()), key.clone(), percent));
    }

    ranked.sort_by_key(|(rank, _, _)| *rank);
    ranked.into_iter().map(|(_, key, pct)| (key, pct)).collect()
}
