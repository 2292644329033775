//! Section segmentation: splits raw resume text into named sections.
//!
//! A section starts at the first occurrence (case-insensitive) of one of the
//! caller's header names, tried in priority order, and runs until the next line
//! that looks like an all-caps header or the end of the document.
//!
//! Any all-caps line ends the section, including false positives such as an
//! all-caps company name. Very short tokens (fewer than `MIN_HEADER_LETTERS`
//! letters, e.g. `MIT`, `IBM`) are not treated as headers.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum number of letters for an all-caps line to terminate a section.
const MIN_HEADER_LETTERS: usize = 4;

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,}(?:[ \t]+[A-Z]{2,})*)[ \t\r]*(?::|$)")
        .expect("header line pattern is valid")
});

/// A located section. `text` starts at the header keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    text: &'a str,
    header_len: usize,
}

impl<'a> Section<'a> {
    /// Full section text, header keyword included.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Section text without its header.
    ///
    /// The keyword is always removed. The rest of the header line up to a colon
    /// (or the line end) is removed too when it carries no lowercase letters,
    /// so "SKILLS AND TOOLS" and "EDUCATIONAL BACKGROUND" vanish whole while
    /// inline content such as "SKILLS: Python, Go" is kept.
    pub fn body(&self) -> &'a str {
        let rest = &self.text[self.header_len..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let label_end = rest[..line_end]
            .find(':')
            .map(|idx| idx + 1)
            .unwrap_or(line_end);

        let rest = if rest[..label_end].chars().any(char::is_lowercase) {
            rest
        } else {
            &rest[label_end..]
        };
        rest.trim_start_matches([':', ' ', '\t'])
    }
}

/// Locates the first section matching any of `names`.
pub fn find_section<'a>(text: &'a str, names: &[&str]) -> Option<Section<'a>> {
    // ASCII uppercasing keeps byte offsets aligned with `text`.
    let upper = text.to_ascii_uppercase();

    names.iter().find_map(|name| {
        let name = name.to_ascii_uppercase();
        let start = upper.find(&name)?;
        let search_from = start + name.len();
        let end = next_header_offset(&text[search_from..])
            .map(|offset| search_from + offset)
            .unwrap_or(text.len());
        Some(Section {
            text: &text[start..end],
            header_len: name.len(),
        })
    })
}

/// Returns the section text for the first matching header name, or an empty
/// string if none of `names` occurs in `text`.
pub fn extract_section(text: &str, names: &[&str]) -> String {
    find_section(text, names)
        .map(|section| section.text().to_string())
        .unwrap_or_default()
}

/// Byte offset of the newline that precedes the next header-looking line.
fn next_header_offset(text: &str) -> Option<usize> {
    text.match_indices('\n').find_map(|(idx, _)| {
        let line = text[idx + 1..].split('\n').next().unwrap_or_default();
        let caps = HEADER_LINE.captures(line)?;
        let letters = caps[1].chars().filter(char::is_ascii_alphabetic).count();
        (letters >= MIN_HEADER_LETTERS).then_some(idx)
    })
}
