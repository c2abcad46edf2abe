use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Non-nested `( ... )`: matches up to the first closing paren.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("bracket pattern is valid"));

/// `30%`, `12.5 %`, `7.%`.
static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*\s*%").expect("percentage pattern is valid"));

const DELIMITERS: [char; 3] = [',', ';', '.'];

/// Split a free-text ingredient list into de-duplicated raw tokens.
///
/// The text is lowercased, then parenthesised and bracketed annotations and
/// percentages are removed before splitting on `,`, `;` and `.`. Pieces that
/// are empty or a single character after trimming are dropped.
///
/// Tokens come back in first-occurrence order. Absent or empty input yields
/// an empty list.
pub fn parse(text: Option<&str>) -> Vec<String> {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    let lowered = text.to_lowercase();
    let cleaned = PARENTHETICAL.replace_all(&lowered, " ");
    let cleaned = BRACKETED.replace_all(&cleaned, " ");
    let cleaned = PERCENTAGE.replace_all(&cleaned, "");

    let mut seen: HashSet<&str> = HashSet::new();
    let mut tokens = Vec::new();

    for piece in cleaned.split(DELIMITERS) {
        let token = piece.trim();
        if token.chars().count() <= 1 {
            continue;
        }
        if seen.insert(token) {
            tokens.push(token.to_string());
        }
    }

    tokens
}
