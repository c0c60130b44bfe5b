use serde::{Deserialize, Serialize};
use std::fmt;

/// Acquisition urgency for a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Upper-cased tag rendered in front of item names, e.g. `[CRITICAL]`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Critical => "[CRITICAL]",
            Self::High => "[HIGH]",
            Self::Medium => "[MEDIUM]",
            Self::Low => "[LOW]",
        }
    }

    /// Authored values are matched exactly; `critical` is a data error, not `Critical`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.label() == raw)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub name: String,
    pub examples: String,
    pub rationale: String,
    pub quantity: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistCategory {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistCategory {
    /// Heading text shown above the category's items.
    pub fn heading(&self) -> String {
        format!("{} {}", self.icon, self.title.to_uppercase())
    }
}

/// Categories in authored order. Construction goes through the catalog loader,
/// which guarantees unique keys and no empty categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistDataset {
    categories: Vec<ChecklistCategory>,
}

impl ChecklistDataset {
    pub(crate) fn from_categories(categories: Vec<ChecklistCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[ChecklistCategory] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&ChecklistCategory> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.key.as_str())
    }

    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.items.len())
            .sum()
    }

    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
            .filter(|item| item.priority == priority)
            .count()
    }

    /// Base categories unchanged, followed by the appended ones.
    pub(crate) fn extended_with(&self, extra: &ChecklistDataset) -> Self {
        let mut categories = self.categories.clone();
        categories.extend(extra.categories.iter().cloned());
        Self { categories }
    }
}
