use serde::{Deserialize, Serialize};

pub type CategoryId = i32;

/// Category entity - a tag shared by many posts, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Insert payload for a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Split a comma separated tag field into category names.
///
/// Names keep their surrounding whitespace and case. Empty segments are
/// dropped and repeats collapse to their first occurrence.
pub fn parse_tags(tags_csv: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in tags_csv.split(',') {
        if name.is_empty() || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}
