use crate::extraction::section::find_section;
use crate::extraction::text::list_items;

pub const HOBBY_HEADERS: &[&str] = &["HOBBIES", "INTERESTS", "ACTIVITIES"];
pub const MAX_HOBBIES: usize = 10;

/// List items of the HOBBIES section. No section, no hobbies.
pub fn extract_hobbies(text: &str) -> Vec<String> {
    let Some(section) = find_section(text, HOBBY_HEADERS) else {
        return Vec::new();
    };

    list_items(section.body())
        .take(MAX_HOBBIES)
        .map(str::to_string)
        .collect()
}
