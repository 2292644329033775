use crate::extraction::section::find_section;
use crate::extraction::text::truncate_chars;

pub const INTRODUCTION_HEADERS: &[&str] =
    &["SUMMARY", "OBJECTIVE", "INTRODUCTION", "PROFILE", "ABOUT"];
pub const MAX_INTRODUCTION_CHARS: usize = 500;

/// Lines taken from the top of the document when there is no summary section.
const FALLBACK_LINES: usize = 5;

/// First paragraph of the SUMMARY section; otherwise the first few non-blank
/// lines of the document joined by spaces. Always at most
/// `MAX_INTRODUCTION_CHARS` characters.
pub fn extract_introduction(text: &str) -> String {
    if let Some(section) = find_section(text, INTRODUCTION_HEADERS) {
        let paragraph = section
            .body()
            .trim_start()
            .lines()
            .take_while(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let paragraph = paragraph.trim();
        if !paragraph.is_empty() {
            return truncate_chars(paragraph, MAX_INTRODUCTION_CHARS);
        }
    }

    let opening = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(FALLBACK_LINES)
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&opening, MAX_INTRODUCTION_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_paragraph_of_summary() {
        let text = "Jane Doe\n\nSUMMARY\nBackend engineer with 8 years\nof distributed systems work.\n\nSecond paragraph.\n\nSKILLS\nRust\n";
        assert_eq!(
            extract_introduction(text),
            "Backend engineer with 8 years\nof distributed systems work."
        );
    }

    #[test]
    fn test_summary_header_with_inline_text() {
        let text = "PROFILE: Pragmatic SRE.\n\nEXPERIENCE\nSRE\n";
        assert_eq!(extract_introduction(text), "Pragmatic SRE.");
    }

    #[test]
    fn test_fallback_to_opening_lines() {
        let text = "Jane Doe\n\n  jane@example.com \nBerlin\n+49 123\nlinkedin.com/in/jane\nrust, go\nignored line\n";
        assert_eq!(
            extract_introduction(text),
            "Jane Doe jane@example.com Berlin +49 123 linkedin.com/in/jane"
        );
    }

    #[test]
    fn test_truncated_to_limit() {
        let text = format!("SUMMARY\n{}\n", "word ".repeat(200));
        assert_eq!(
            extract_introduction(&text).chars().count(),
            MAX_INTRODUCTION_CHARS
        );
        let text = "x".repeat(900);
        assert_eq!(
            extract_introduction(&text).chars().count(),
            MAX_INTRODUCTION_CHARS
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_introduction(""), "");
    }
}
