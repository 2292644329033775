use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::section::find_section;
use crate::extraction::text::{blocks, is_bullet};
use crate::models::ExperienceEntry;

pub const EXPERIENCE_HEADERS: &[&str] = &["EXPERIENCE", "WORK", "EMPLOYMENT", "PROFESSIONAL"];
pub const MAX_EXPERIENCE_ENTRIES: usize = 10;

/// Written to `end_date` for ongoing roles.
const ONGOING: &str = "Present";

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(engineer|developer|manager|analyst|consultant|specialist|lead|senior|junior)")
        .expect("title pattern is valid")
});

static COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(inc\.|ltd\.|corp\.|company|technologies|systems)")
        .expect("company pattern is valid")
});

/// A bare year or "Month Year".
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}|\w+\s+\d{4}").expect("date pattern is valid"));

static ONGOING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(present|current|now)\b").expect("ongoing pattern is valid")
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*, ?[A-Z]{2})\b|(?i:\b(remote)\b)")
        .expect("location pattern is valid")
});

/// Parses the EXPERIENCE section into at most `MAX_EXPERIENCE_ENTRIES` records.
///
/// Blank lines delimit records. `title`, `company`, `location` and both dates
/// are first-writer-wins; every bullet line is appended to `description`.
/// `end_date` is only written when the dated line carries a second date (or an
/// ongoing marker such as "Present"), so a later line may still supply it.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let Some(section) = find_section(text, EXPERIENCE_HEADERS) else {
        return Vec::new();
    };

    blocks(section.body())
        .iter()
        .map(|lines| parse_record(lines))
        .filter(|entry| !entry.is_empty())
        .take(MAX_EXPERIENCE_ENTRIES)
        .collect()
}

fn parse_record(lines: &[&str]) -> ExperienceEntry {
    let mut entry = ExperienceEntry::default();

    for &line in lines {
        if entry.title.is_none() && TITLE.is_match(line) {
            entry.title = Some(line.to_string());
        }

        if entry.company.is_none() && COMPANY.is_match(line) {
            entry.company = Some(line.to_string());
        }

        let dates: Vec<&str> = DATE.find_iter(line).map(|m| m.as_str()).collect();
        if let Some(first) = dates.first() {
            if entry.start_date.is_none() {
                entry.start_date = Some(first.to_string());
            }
            if entry.end_date.is_none() {
                entry.end_date = match dates.as_slice() {
                    [_, .., last] => Some(last.to_string()),
                    _ if ONGOING_MARKER.is_match(line) => Some(ONGOING.to_string()),
                    _ => None,
                };
            }
        }

        if entry.location.is_none() {
            entry.location = location(line);
        }

        if is_bullet(line) {
            match entry.description.as_mut() {
                Some(description) => {
                    description.push(' ');
                    description.push_str(line);
                }
                None => entry.description = Some(line.to_string()),
            }
        }
    }

    entry
}

fn location(line: &str) -> Option<String> {
    let caps = LOCATION.captures(line)?;
    match (caps.get(1), caps.get(2)) {
        (Some(city), _) => Some(city.as_str().to_string()),
        (None, Some(_)) => Some("Remote".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
EXPERIENCE
Senior Software Engineer
Acme Technologies, Austin, TX
Jan 2020 - Mar 2022
• Built the billing pipeline
• Cut p99 latency by 40%

Data Analyst
Globex Corp.
2017 - 2019
- Automated weekly reports

SKILLS
Python
";

    #[test]
    fn test_two_records_with_fields() {
        let experience = extract_experience(RESUME);
        assert_eq!(experience.len(), 2);

        let first = &experience[0];
        assert_eq!(first.title.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(first.company.as_deref(), Some("Acme Technologies, Austin, TX"));
        assert_eq!(first.start_date.as_deref(), Some("Jan 2020"));
        assert_eq!(first.end_date.as_deref(), Some("Mar 2022"));
        assert_eq!(first.location.as_deref(), Some("Austin, TX"));
        assert_eq!(
            first.description.as_deref(),
            Some("• Built the billing pipeline • Cut p99 latency by 40%")
        );

        let second = &experience[1];
        assert_eq!(second.title.as_deref(), Some("Data Analyst"));
        assert_eq!(second.company.as_deref(), Some("Globex Corp."));
        assert_eq!(second.start_date.as_deref(), Some("2017"));
        assert_eq!(second.end_date.as_deref(), Some("2019"));
        assert_eq!(second.description.as_deref(), Some("- Automated weekly reports"));
    }

    #[test]
    fn test_single_date_leaves_end_unset_until_range_found() {
        let text = "EXPERIENCE\nBackend Developer\nSince 2021\n2021 - 2023\n";
        let entry = &extract_experience(text)[0];
        assert_eq!(entry.start_date.as_deref(), Some("Since 2021"));
        assert_eq!(entry.end_date.as_deref(), Some("2023"));
    }

    #[test]
    fn test_ongoing_role_marks_present() {
        let text = "EXPERIENCE\nEngineering Manager\n2022 - Present\nRemote\n";
        let entry = &extract_experience(text)[0];
        assert_eq!(entry.start_date.as_deref(), Some("2022"));
        assert_eq!(entry.end_date.as_deref(), Some("Present"));
        assert_eq!(entry.location.as_deref(), Some("Remote"));
    }

    #[test]
    fn test_numbered_bullets_accumulate() {
        let text = "EXPERIENCE\nConsultant\n1. Audited systems\n2. Wrote the report\n";
        let entry = &extract_experience(text)[0];
        assert_eq!(
            entry.description.as_deref(),
            Some("1. Audited systems 2. Wrote the report")
        );
    }

    #[test]
    fn test_capped_at_ten_records() {
        let mut text = String::from("EXPERIENCE\n");
        for i in 0..15 {
            text.push_str(&format!("Developer {i}\n\n"));
        }
        let experience = extract_experience(&text);
        assert_eq!(experience.len(), MAX_EXPERIENCE_ENTRIES);
        assert_eq!(experience[9].title.as_deref(), Some("Developer 9"));
    }

    #[test]
    fn test_missing_section_yields_empty() {
        assert!(extract_experience("").is_empty());
        assert!(extract_experience("EDUCATION\nBSc\n").is_empty());
    }
}
