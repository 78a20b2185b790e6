use serde::{Deserialize, Serialize};

/// The fallback chart color for spending in a category the server does not know about.
pub const DEFAULT_CATEGORY_COLOR: &str = "#9CA3AF";

/// A spending category. Server-owned; the client caches a read-only copy.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: Some(color.into()),
        }
    }
}

/// A partial update for `PUT /categories/{id}`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The backend echoes the full category list after any category mutation.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategorySet {
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// The spending total for one category within the selected month, colored for charting.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategorySpending {
    pub category: String,
    pub amount: crate::model::Amount,
    pub color: String,
}
