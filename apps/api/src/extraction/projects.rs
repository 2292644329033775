use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::section::find_section;
use crate::extraction::text::{blocks, is_bullet};
use crate::models::ProjectEntry;

pub const PROJECT_HEADERS: &[&str] = &["PROJECTS", "PROJECT"];
pub const MAX_PROJECTS: usize = 10;

/// Lines at or above this many characters are never taken as a project name.
const MAX_NAME_CHARS: usize = 100;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern is valid"));

static TECHNOLOGIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:tech(?:nologies| stack)?|stack|built with)\s*:\s*(.+)$")
        .expect("technologies pattern is valid")
});

/// Parses the PROJECTS section into open project records.
///
/// Per blank-line delimited block: the first line shorter than
/// `MAX_NAME_CHARS` is the `name`, bullet lines accumulate into `description`,
/// and the first link and technology list are kept as `url` / `technologies`.
pub fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    let Some(section) = find_section(text, PROJECT_HEADERS) else {
        return Vec::new();
    };

    blocks(section.body())
        .iter()
        .map(|lines| parse_record(lines))
        .filter(|project| !project.is_empty())
        .take(MAX_PROJECTS)
        .collect()
}

fn parse_record(lines: &[&str]) -> ProjectEntry {
    let mut project = ProjectEntry::default();

    for &line in lines {
        if !project.contains("name") && line.chars().count() < MAX_NAME_CHARS {
            project.set_once("name", line);
        }
        if is_bullet(line) {
            project.append("description", line);
        }
        if let Some(url) = URL.find(line) {
            project.set_once("url", url.as_str());
        }
        if let Some(caps) = TECHNOLOGIES.captures(line) {
            project.set_once("technologies", caps[1].trim());
        }
    }

    project
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_name_description_and_extras() {
        let text = "\
PROJECTS
Distributed Cache
- Sharded LRU cache in Rust
- 2M ops/sec on a laptop
Tech: Rust, Tokio
https://github.com/jane/cache

Resume Parser
* Heuristic section segmentation
";
        let projects = extract_projects(text);
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].get("name"), Some("Distributed Cache"));
        assert_eq!(
            projects[0].get("description"),
            Some("- Sharded LRU cache in Rust - 2M ops/sec on a laptop")
        );
        assert_eq!(projects[0].get("technologies"), Some("Rust, Tokio"));
        assert_eq!(projects[0].get("url"), Some("https://github.com/jane/cache"));
        assert_eq!(projects[1].get("name"), Some("Resume Parser"));
        assert_eq!(
            projects[1].get("description"),
            Some("* Heuristic section segmentation")
        );
    }

    #[test]
    fn test_long_first_line_is_not_a_name() {
        let long = "a".repeat(120);
        let text = format!("PROJECTS\n{long}\nShort Name\n");
        let projects = extract_projects(&text);
        assert_eq!(projects[0].get("name"), Some("Short Name"));
    }

    #[test]
    fn test_capped_at_ten() {
        let mut text = String::from("PROJECTS\n");
        for i in 0..12 {
            text.push_str(&format!("Project {i}\n\n"));
        }
        assert_eq!(extract_projects(&text).len(), MAX_PROJECTS);
    }

    #[test]
    fn test_requires_section() {
        assert!(extract_projects("").is_empty());
    }
}
