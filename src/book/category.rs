use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of spending categories. The variant names are the wire strings
/// used by the persisted JSON stores and must stay stable across versions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Groceries,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Education,
    Subscriptions,
    Other,
}

impl Category {
    /// Every category in declaration order. Breakdown ties resolve in this
    /// order, so it doubles as the presentation order for equal totals.
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Groceries,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Education,
        Category::Subscriptions,
        Category::Other,
    ];

    /// Display icon token carried as data for the presentation layer.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "fork.knife",
            Category::Groceries => "cart",
            Category::Transportation => "car.fill",
            Category::Housing => "house.fill",
            Category::Utilities => "bolt.fill",
            Category::Entertainment => "tv.fill",
            Category::Shopping => "bag.fill",
            Category::Healthcare => "cross.case.fill",
            Category::Education => "book.fill",
            Category::Subscriptions => "arrow.triangle.2.circlepath",
            Category::Other => "ellipsis.circle.fill",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Subscriptions => "Subscriptions",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_variant_names() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn all_lists_every_variant_once() {
        let mut seen = std::collections::HashSet::new();
        for category in Category::ALL {
            assert!(seen.insert(category));
        }
        assert_eq!(seen.len(), 11);
    }
}
