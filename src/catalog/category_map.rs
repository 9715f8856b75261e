//! Category map built from the site navigation

use std::collections::BTreeMap;

/// Link text of the sidebar entry that lists every book rather than a category
const ALL_BOOKS_LABEL: &str = "books";

/// A category link discovered in the site navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Label as written on the site
    pub label: String,

    /// Site-relative path of the category's first listing page
    pub path: String,
}

/// Case-insensitive mapping from category display name to site-relative path
///
/// Built once per crawl from the root page and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: BTreeMap<String, CategoryEntry>,
}

impl CategoryMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a navigation link
    ///
    /// Both values are trimmed. Links with empty text or href are ignored, as is
    /// the "Books" link that stands for the whole catalog. A later label that
    /// matches an existing one case-insensitively replaces it.
    ///
    /// Returns true if the link was stored.
    pub fn insert(&mut self, label: &str, path: &str) -> bool {
        let label = label.trim();
        let path = path.trim();

        if label.is_empty() || path.is_empty() {
            return false;
        }

        let key = fold(label);
        if key == ALL_BOOKS_LABEL {
            return false;
        }

        self.entries.insert(
            key,
            CategoryEntry {
                label: label.to_string(),
                path: path.to_string(),
            },
        );
        true
    }

    /// Looks up a category by name, ignoring case and surrounding whitespace
    pub fn get(&self, name: &str) -> Option<&CategoryEntry> {
        self.entries.get(&fold(name.trim()))
    }

    /// Returns true if the map holds a category with this name
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no category was discovered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the categories in case-folded alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.values()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut map = CategoryMap::new();
        map.insert("Mystery", "catalogue/category/books/mystery_3/index.html");

        let entry = map.get("mystery").unwrap();
        assert_eq!(entry.label, "Mystery");
        assert_eq!(entry.path, "catalogue/category/books/mystery_3/index.html");
        assert!(map.contains("  MYSTERY "));
    }

    #[test]
    fn test_skips_all_books_link() {
        let mut map = CategoryMap::new();
        assert!(!map.insert("Books", "catalogue/category/books_1/index.html"));
        assert!(!map.insert(" books ", "catalogue/category/books_1/index.html"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_skips_empty_values() {
        let mut map = CategoryMap::new();
        assert!(!map.insert("   ", "travel_2/index.html"));
        assert!(!map.insert("Travel", ""));
        assert!(map.is_empty());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let mut map = CategoryMap::new();
        map.insert("Poetry", "poetry_23/index.html");
        map.insert("POETRY", "poetry_99/index.html");

        assert_eq!(map.len(), 1);
        let entry = map.get("poetry").unwrap();
        assert_eq!(entry.label, "POETRY");
        assert_eq!(entry.path, "poetry_99/index.html");
    }

    #[test]
    fn test_iteration_order() {
        let mut map = CategoryMap::new();
        map.insert("Travel", "t");
        map.insert("art", "a");
        map.insert("Mystery", "m");

        let labels: Vec<_> = map.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["art", "Mystery", "Travel"]);
    }
}
