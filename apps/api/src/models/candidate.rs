use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extraction::text::truncate_chars;

/// Number of introduction characters surfaced in a candidate summary.
const SUMMARY_INTRO_CHARS: usize = 200;
/// Number of skills surfaced in a candidate summary.
const SUMMARY_SKILLS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

impl EducationEntry {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Bullet lines of the entry joined by single spaces.
    pub description: Option<String>,
    pub location: Option<String>,
}

impl ExperienceEntry {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Open, schema-less project record. Project layouts vary too much for a fixed
/// shape, so whatever fields the extractor detects (`name`, `description`,
/// `url`, `technologies`, ...) are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectEntry(BTreeMap<String, String>);

impl ProjectEntry {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Sets `field` only if it has not been set yet.
    pub fn set_once(&mut self, field: &str, value: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| value.into());
    }

    /// Appends `value` to `field`, space separated, creating it if absent.
    pub fn append(&mut self, field: &str, value: &str) {
        self.0
            .entry(field.to_string())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything extracted from one resume. This is the unit of persistence:
/// entries have no identity beyond their position and are replaced wholesale
/// when the same candidate id is saved again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub candidate_id: String,
    pub introduction: String,
    pub skills: Vec<String>,
    pub experience_count: usize,
    pub education_count: usize,
}

impl From<&CandidateRecord> for CandidateSummary {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            candidate_id: record.candidate_id.clone(),
            introduction: truncate_chars(&record.introduction, SUMMARY_INTRO_CHARS),
            skills: record.skills.iter().take(SUMMARY_SKILLS).cloned().collect(),
            experience_count: record.experience.len(),
            education_count: record.education.len(),
        }
    }
}
