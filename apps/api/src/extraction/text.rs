//! Line-level helpers shared by the field extractors.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("numbered bullet pattern is valid"));

/// Characters that separate items in list-style sections (skills, hobbies).
const ITEM_DELIMITERS: &[char] = &[',', ';', '•', '-'];

/// Truncates to at most `max` characters, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// `•`, `-`, `*` or `N.` at the start of an already-trimmed line.
pub fn is_bullet(line: &str) -> bool {
    line.starts_with(['•', '-', '*']) || NUMBERED_BULLET.is_match(line)
}

/// Groups a section body into blank-line delimited blocks of trimmed,
/// non-blank lines.
pub fn blocks(body: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Splits every line of `body` on list delimiters and keeps trimmed items
/// whose length is strictly between 2 and 50 characters.
pub fn list_items(body: &str) -> impl Iterator<Item = &str> {
    body.lines()
        .flat_map(|line| line.split(ITEM_DELIMITERS))
        .map(str::trim)
        .filter(|item| {
            let len = item.chars().count();
            len > 2 && len < 50
        })
}
