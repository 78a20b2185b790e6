use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A description-pattern to category-id rule used by server-side auto-categorization.
/// The client only displays and caches these.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MappingRule {
    pub pattern: String,
    pub category_id: String,
}

impl MappingRule {
    pub fn new(pattern: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category_id: category_id.into(),
        }
    }
}

/// The full `pattern -> category_id` dictionary served by `GET /mappings`.
pub type Mappings = BTreeMap<String, String>;

/// The backend echoes the full mapping dictionary after any mapping mutation.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MappingSet {
    pub success: bool,
    #[serde(default)]
    pub mappings: Mappings,
}
