use serde::{Deserialize, Serialize};

/// A linked financial institution, as listed by `GET /teller/tokens`.
///
/// The backend sanitizes this record: it never includes the access token itself. Identity is
/// keyed by `institution_name`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Institution {
    pub institution_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Institution {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            institution_name: name.into(),
            ..Self::default()
        }
    }
}

/// The result of storing or deleting a Teller token.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
