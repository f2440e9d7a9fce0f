/// Recommended task categories. Other values are accepted.
pub const TASK_CATEGORIES: &[&str] = &[
    "personal",
    "professional",
    "health",
    "study",
    "family",
    "finance",
];

/// Recommended expense categories. Other values are accepted.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "food",
    "transport",
    "subscriptions",
    "groceries",
    "leisure",
    "health",
    "other",
];

/// Canonical form of a category discriminator.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_recommended_task_category(category: &str) -> bool {
    TASK_CATEGORIES.contains(&category)
}

pub fn is_recommended_expense_category(category: &str) -> bool {
    EXPENSE_CATEGORIES.contains(&category)
}
