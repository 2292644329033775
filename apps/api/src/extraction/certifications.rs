use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::section::find_section;

pub const CERTIFICATION_HEADERS: &[&str] = &["CERTIFICATIONS", "CERTIFICATES", "LICENSES"];
pub const MAX_CERTIFICATIONS: usize = 10;

static CERTIFICATION_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(certified|certificate|certification|license|credential)")
        .expect("certification pattern is valid")
});

/// Whole lines of the CERTIFICATIONS section that mention a certification keyword.
pub fn extract_certifications(text: &str) -> Vec<String> {
    let Some(section) = find_section(text, CERTIFICATION_HEADERS) else {
        return Vec::new();
    };

    section
        .body()
        .lines()
        .filter(|line| CERTIFICATION_KEYWORD.is_match(line))
        .map(|line| line.trim().to_string())
        .take(MAX_CERTIFICATIONS)
        .collect()
}
