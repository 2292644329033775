use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::section::find_section;
use crate::extraction::text::blocks;
use crate::models::EducationEntry;

pub const EDUCATION_HEADERS: &[&str] = &["EDUCATION", "ACADEMIC", "QUALIFICATION"];
pub const MAX_EDUCATION_ENTRIES: usize = 5;

static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(bachelor|b\.s\.|b\.a\.|master|m\.s\.|m\.a\.|\bmba\b|ph\.?d|doctorate|doctor of)",
    )
    .expect("degree pattern is valid")
});

static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(university|college|institute|school)").expect("institution pattern is valid")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year pattern is valid"));

static GPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bgpa\b\s*[:\-]?\s*(\d+(?:\.\d+)?(?:\s*/\s*\d+(?:\.\d+)?)?)")
        .expect("gpa pattern is valid")
});

static FIELD_OF_STUDY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+(.+)$").expect("field pattern is valid"));

/// Parses the EDUCATION section into at most `MAX_EDUCATION_ENTRIES` records.
///
/// Each blank-line delimited block is one record. Within a record every field
/// is first-writer-wins: the first degree-looking line is the degree, the first
/// line with an institution keyword is the institution, and the first line
/// carrying years sets both `start_date` (first year) and `end_date` (last year).
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let Some(section) = find_section(text, EDUCATION_HEADERS) else {
        return Vec::new();
    };

    blocks(section.body())
        .iter()
        .map(|lines| parse_record(lines))
        .filter(|entry| !entry.is_empty())
        .take(MAX_EDUCATION_ENTRIES)
        .collect()
}

fn parse_record(lines: &[&str]) -> EducationEntry {
    let mut entry = EducationEntry::default();
    let mut plain_line: Option<&str> = None;

    for &line in lines {
        let is_degree = DEGREE.is_match(line);
        if is_degree && entry.degree.is_none() {
            entry.degree = Some(line.to_string());
            entry.field = field_of_study(line);
        }

        let is_institution = INSTITUTION.is_match(line);
        if is_institution && entry.institution.is_none() {
            entry.institution = Some(line.to_string());
        }

        let gpa = GPA.captures(line).map(|caps| caps[1].to_string());
        let is_gpa = gpa.is_some();
        if entry.gpa.is_none() {
            entry.gpa = gpa;
        }

        let years: Vec<&str> = YEAR.find_iter(line).map(|m| m.as_str()).collect();
        if let (Some(first), Some(last)) = (years.first(), years.last()) {
            if entry.start_date.is_none() {
                entry.start_date = Some(first.to_string());
            }
            if entry.end_date.is_none() {
                entry.end_date = Some(last.to_string());
            }
        }

        if !is_degree
            && !is_institution
            && !is_gpa
            && years.is_empty()
            && plain_line.is_none()
            && line.chars().any(char::is_alphabetic)
        {
            plain_line = Some(line);
        }
    }

    // Acronym schools ("MIT", "UCLA") carry no institution keyword; next to a
    // degree the first plain line is the best guess.
    if entry.institution.is_none() && entry.degree.is_some() {
        entry.institution = plain_line.map(str::to_string);
    }

    entry
}

fn field_of_study(degree_line: &str) -> Option<String> {
    let caps = FIELD_OF_STUDY.captures(degree_line)?;
    let field = caps[1]
        .split([',', '(', '|'])
        .next()
        .unwrap_or_default()
        .split(" - ")
        .next()
        .unwrap_or_default()
        .trim();
    (!field.is_empty()).then(|| field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_institution_and_single_year() {
        let text = "EDUCATION\nBachelor of Science\nMIT\n2018\n\nEXPERIENCE\n...";
        let education = extract_education(text);
        assert_eq!(education.len(), 1);
        let entry = &education[0];
        assert_eq!(entry.degree.as_deref(), Some("Bachelor of Science"));
        assert!(entry.institution.as_deref().unwrap().contains("MIT"));
        assert_eq!(entry.start_date.as_deref(), Some("2018"));
        assert_eq!(entry.end_date.as_deref(), Some("2018"));
    }

    #[test]
    fn test_multi_word_header_is_not_an_institution() {
        let text = "EDUCATIONAL BACKGROUND\nBachelor of Science\nMIT\n2018\n";
        let education = extract_education(text);
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].degree.as_deref(), Some("Bachelor of Science"));
        assert_eq!(education[0].institution.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_year_range_and_keyword_institution() {
        let text = "EDUCATION\nStanford University\nMaster of Science in Computer Science, 2016 - 2018\nGPA: 3.9/4.0\n";
        let entry = &extract_education(text)[0];
        assert_eq!(entry.institution.as_deref(), Some("Stanford University"));
        assert_eq!(
            entry.degree.as_deref(),
            Some("Master of Science in Computer Science, 2016 - 2018")
        );
        assert_eq!(entry.field.as_deref(), Some("Computer Science"));
        assert_eq!(entry.start_date.as_deref(), Some("2016"));
        assert_eq!(entry.end_date.as_deref(), Some("2018"));
        assert_eq!(entry.gpa.as_deref(), Some("3.9/4.0"));
    }

    #[test]
    fn test_first_writer_wins_within_record() {
        let text = "EDUCATION\nPhD in Physics\nMaster of Arts\nOxford University\nCambridge College\n2010\n2014\n";
        let entry = &extract_education(text)[0];
        assert_eq!(entry.degree.as_deref(), Some("PhD in Physics"));
        assert_eq!(entry.institution.as_deref(), Some("Oxford University"));
        assert_eq!(entry.start_date.as_deref(), Some("2010"));
        assert_eq!(entry.end_date.as_deref(), Some("2010"));
    }

    #[test]
    fn test_blank_lines_separate_records() {
        let text = "EDUCATION\nMBA\nWharton School\n2020\n\nB.S. Economics\nState College\n2015\n";
        let education = extract_education(text);
        assert_eq!(education.len(), 2);
        assert_eq!(education[1].degree.as_deref(), Some("B.S. Economics"));
        assert_eq!(education[1].institution.as_deref(), Some("State College"));
    }

    #[test]
    fn test_capped_at_five_records_keeping_earliest() {
        let mut text = String::from("EDUCATION\n");
        for i in 0..8 {
            text.push_str(&format!("Bachelor of Arts {i}\nCity College\n\n"));
        }
        let education = extract_education(&text);
        assert_eq!(education.len(), MAX_EDUCATION_ENTRIES);
        assert_eq!(education[0].degree.as_deref(), Some("Bachelor of Arts 0"));
        assert_eq!(education[4].degree.as_deref(), Some("Bachelor of Arts 4"));
    }

    #[test]
    fn test_no_section_or_empty_input() {
        assert!(extract_education("").is_empty());
        assert!(extract_education("EXPERIENCE\nEngineer at Acme").is_empty());
        assert!(extract_education("EDUCATION").is_empty());
    }
}
