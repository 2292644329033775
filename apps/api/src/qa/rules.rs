//! Local keyword rules. Always produce an answer, never touch the network.

use std::sync::LazyLock;

use regex::Regex;

static YEAR_2000S: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("year pattern is valid"));

const SKILLS_REDIRECT: &str = "The candidate's skills are listed in their profile. \
Please check the candidate details for the complete list.";

const GENERIC_REDIRECT: &str = "Based on the candidate's profile, the information is available. \
Please refer to the candidate details for specific information.";

pub fn rule_based_answer(question: &str, context: &str) -> String {
    let question = question.to_lowercase();

    if ["graduation", "graduate", "degree"]
        .iter()
        .any(|k| question.contains(k))
    {
        if let Some(year) = latest_year(context) {
            return format!("The candidate completed their graduation in {year}.");
        }
    }

    if question.contains("experience") || question.contains("work") {
        return format!(
            "The candidate has {} work experience entries.",
            experience_count(context)
        );
    }

    if question.contains("skills") {
        return SKILLS_REDIRECT.to_string();
    }

    GENERIC_REDIRECT.to_string()
}

fn latest_year(context: &str) -> Option<&str> {
    YEAR_2000S.find_iter(context).map(|m| m.as_str()).max()
}

/// Occurrences of "title", or of "company" when there are none. Deliberately
/// naive: counts words in the flattened context, not structured entries.
fn experience_count(context: &str) -> usize {
    let context = context.to_lowercase();
    match context.matches("title").count() {
        0 => context.matches("company").count(),
        n => n,
    }
}
