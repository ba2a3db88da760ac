use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Color token used whenever a category name has no registry entry.
pub const FALLBACK_COLOR: &str = "#CBD5E1";

/// Colors offered by the category form; the first one is the default pick.
pub const PRESET_COLORS: [&str; 12] = [
    "#F87171", "#FB923C", "#FBBF24", "#34D399", "#22D3EE", "#60A5FA", "#818CF8", "#A78BFA",
    "#F472B6", "#9CA3AF", "#475569", "#1E293B",
];

const STARTER_CATEGORIES: [(&str, &str); 7] = [
    ("Food & Drinks", "#F87171"),
    ("Transport", "#60A5FA"),
    ("Shopping", "#FBBF24"),
    ("Entertainment", "#A78BFA"),
    ("Health", "#34D399"),
    ("Bills", "#F472B6"),
    ("Other", "#9CA3AF"),
];

/// User-defined spending category. Transactions refer to it by `name` only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Single-letter badge shown next to transactions of this category.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Ordered set of categories. Removing an entry never touches transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The starter set installed when nothing has been stored yet.
    pub fn with_defaults() -> Self {
        Self::new(
            STARTER_CATEGORIES
                .iter()
                .map(|(name, color)| Category::new(*name, *color))
                .collect(),
        )
    }

    pub fn add(
        &mut self,
        name: &str,
        color: impl Into<String>,
    ) -> Result<Category, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("category name cannot be empty"));
        }
        let category = Category::new(name, color);
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Removes the category with `id`. Missing ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> Option<Category> {
        let index = self.categories.iter().position(|category| category.id == id)?;
        Some(self.categories.remove(index))
    }

    /// First category whose name matches exactly.
    pub fn lookup(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn color_for(&self, name: &str) -> &str {
        self.lookup(name)
            .map(|category| category.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn find(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    pub fn first(&self) -> Option<&Category> {
        self.categories.first()
    }

    pub fn last(&self) -> Option<&Category> {
        self.categories.last()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_contain_starter_set_in_order() {
        let registry = CategoryRegistry::with_defaults();
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Food & Drinks",
                "Transport",
                "Shopping",
                "Entertainment",
                "Health",
                "Bills",
                "Other"
            ]
        );
        assert_eq!(registry.last().unwrap().color, "#9CA3AF");
    }

    #[test]
    fn add_trims_name_and_appends() {
        let mut registry = CategoryRegistry::default();
        let category = registry.add("  Travel ", "#22D3EE").unwrap();
        assert_eq!(category.name, "Travel");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find(category.id), Some(&category));
    }

    #[test]
    fn blank_name_rejected_without_mutation() {
        let mut registry = CategoryRegistry::with_defaults();
        let err = registry.add("   ", "#000000").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut registry = CategoryRegistry::with_defaults();
        assert!(registry.remove(Uuid::new_v4()).is_none());
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn duplicate_names_resolve_to_first_entry() {
        let mut registry = CategoryRegistry::default();
        let first = registry.add("Pets", "#111111").unwrap();
        registry.add("Pets", "#222222").unwrap();
        assert_eq!(registry.lookup("Pets").map(|c| c.id), Some(first.id));
        assert_eq!(registry.color_for("Pets"), "#111111");
    }

    #[test]
    fn unknown_name_uses_fallback_color() {
        let registry = CategoryRegistry::with_defaults();
        assert!(registry.lookup("food & drinks").is_none());
        assert_eq!(registry.color_for("Gone"), FALLBACK_COLOR);
    }
}
