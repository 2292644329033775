use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::section::{extract_section, find_section};
use crate::extraction::text::list_items;

pub const SKILL_HEADERS: &[&str] = &["SKILLS", "TECHNICAL SKILLS", "COMPETENCIES"];
pub const MAX_SKILLS: usize = 30;

/// Reference vocabulary matched as whole words, in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "Go",
    "Rust",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "FastAPI",
    "React",
    "Node.js",
    "Docker",
    "AWS",
    "Git",
    "Linux",
    "Machine Learning",
    "Data Science",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "scikit-learn",
    "Kubernetes",
    "Redis",
    "Elasticsearch",
    "GraphQL",
    "REST API",
    "Microservices",
];

/// Vocabulary entries that are also common English words. They only count
/// inside a SKILLS section and only with their exact capitalisation.
const AMBIGUOUS_SKILLS: &[&str] = &["Go"];

struct VocabularyPattern {
    skill: &'static str,
    pattern: Regex,
    section_only: bool,
}

static VOCABULARY: LazyLock<Vec<VocabularyPattern>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|&skill| {
            let section_only = AMBIGUOUS_SKILLS.contains(&skill);
            let flags = if section_only { "" } else { "(?i)" };
            let pattern = Regex::new(&format!(r"{flags}\b{}\b", regex::escape(skill)))
                .expect("vocabulary pattern is valid");
            VocabularyPattern {
                skill,
                pattern,
                section_only,
            }
        })
        .collect()
});

static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(skills|technical|proficient)").expect("label pattern is valid")
});

/// Two-pass skill extraction.
///
/// 1. Vocabulary pass over the SKILLS section (or the whole document when there
///    is none): every vocabulary entry present as a whole word, in vocabulary order.
/// 2. Section pass: list items of the SKILLS section not already captured and
///    not themselves a section label.
///
/// Output is deduplicated (case-sensitive), order-stable and capped at `MAX_SKILLS`.
pub fn extract_skills(text: &str) -> Vec<String> {
    let section_text = extract_section(text, SKILL_HEADERS);
    let in_section = !section_text.is_empty();
    let haystack = if in_section { section_text.as_str() } else { text };

    let mut skills: Vec<String> = Vec::new();
    for entry in VOCABULARY.iter() {
        if entry.section_only && !in_section {
            continue;
        }
        if entry.pattern.is_match(haystack) && !skills.iter().any(|s| s == entry.skill) {
            skills.push(entry.skill.to_string());
        }
    }

    if let Some(section) = find_section(text, SKILL_HEADERS) {
        for item in list_items(section.body()) {
            if !skills.iter().any(|s| s == item) && !SECTION_LABEL.is_match(item) {
                skills.push(item.to_string());
            }
        }
    }

    skills.truncate(MAX_SKILLS);
    skills
}
