use crate::models::CandidateRecord;

/// Number of skills included in the QA context.
const CONTEXT_SKILLS: usize = 20;

const MISSING: &str = "N/A";

/// Flattens a candidate record into the plain-text context handed to the
/// answering strategies. Empty sections are left out entirely.
pub fn format_candidate_context(record: &CandidateRecord) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !record.introduction.is_empty() {
        parts.push(format!("Introduction: {}", record.introduction));
    }

    if !record.education.is_empty() {
        parts.push("Education:".to_string());
        for edu in &record.education {
            let mut line = format!(
                "  - {} from {}",
                edu.degree.as_deref().unwrap_or(MISSING),
                edu.institution.as_deref().unwrap_or(MISSING)
            );
            if let Some(end) = &edu.end_date {
                line.push_str(&format!(" (completed {end})"));
            }
            parts.push(line);
        }
    }

    if !record.experience.is_empty() {
        parts.push("Experience:".to_string());
        for exp in &record.experience {
            let mut line = format!(
                "  - {} at {}",
                exp.title.as_deref().unwrap_or(MISSING),
                exp.company.as_deref().unwrap_or(MISSING)
            );
            if let (Some(start), Some(end)) = (&exp.start_date, &exp.end_date) {
                line.push_str(&format!(" ({start} - {end})"));
            }
            parts.push(line);
        }
    }

    if !record.skills.is_empty() {
        let skills: Vec<&str> = record
            .skills
            .iter()
            .take(CONTEXT_SKILLS)
            .map(String::as_str)
            .collect();
        parts.push(format!("Skills: {}", skills.join(", ")));
    }

    if !record.certifications.is_empty() {
        parts.push(format!(
            "Certifications: {}",
            record.certifications.join(", ")
        ));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry};

    #[test]
    fn test_full_context() {
        let record = CandidateRecord {
            candidate_id: "c-1".to_string(),
            introduction: "Backend engineer".to_string(),
            education: vec![EducationEntry {
                degree: Some("BSc Computer Science".to_string()),
                end_date: Some("2016".to_string()),
                ..Default::default()
            }],
            experience: vec![
                ExperienceEntry {
                    title: Some("Senior Engineer".to_string()),
                    company: Some("Initech Systems".to_string()),
                    start_date: Some("2019".to_string()),
                    end_date: Some("Present".to_string()),
                    ..Default::default()
                },
                ExperienceEntry {
                    title: Some("Intern".to_string()),
                    start_date: Some("2016".to_string()),
                    ..Default::default()
                },
            ],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            certifications: vec!["CKA Certified".to_string()],
            ..Default::default()
        };

        assert_eq!(
            format_candidate_context(&record),
            "Introduction: Backend engineer\n\
             Education:\n  - BSc Computer Science from N/A (completed 2016)\n\
             Experience:\n  - Senior Engineer at Initech Systems (2019 - Present)\n  - Intern at N/A\n\
             Skills: Rust, SQL\n\
             Certifications: CKA Certified"
        );
    }

    #[test]
    fn test_empty_sections_omitted() {
        let record = CandidateRecord {
            skills: (0..30).map(|i| format!("s{i}")).collect(),
            ..Default::default()
        };
        let context = format_candidate_context(&record);
        assert!(context.starts_with("Skills: s0, s1"));
        assert!(context.ends_with("s19"));
        assert!(!context.contains("Education:"));
        assert_eq!(format_candidate_context(&CandidateRecord::default()), "");
    }
}
