use serde::{Deserialize, Serialize};

/// Default topic labels, in menu display order.
pub const DEFAULT_CATEGORIES: [&str; 15] = [
    "Planets",
    "Species",
    "Technology",
    "Beverages",
    "Essential Items",
    "Spacecraft",
    "Personalities",
    "Computers",
    "Philosophy",
    "Infrastructure",
    "Culture",
    "Locations",
    "Corporations",
    "Advertising",
    "Science",
];

/// Closed set of categories a record may be filed under.
///
/// Built once from configuration and handed to the catalog and the checker;
/// it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories {
    names: Vec<String>,
}

impl Default for Categories {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().map(|name| (*name).to_string()))
    }
}

impl Categories {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    /// Look up a category by its 1-based menu number.
    pub fn by_number(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.names.get(idx))
            .map(String::as_str)
    }

    /// Resolve a user choice given either as a menu number or as an exact name.
    pub fn resolve(&self, choice: &str) -> Option<&str> {
        let trimmed = choice.trim();
        if let Ok(number) = trimmed.parse::<usize>() {
            return self.by_number(number);
        }
        self.names
            .iter()
            .find(|known| known.as_str() == trimmed)
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
