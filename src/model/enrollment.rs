use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload produced by the Teller Connect widget when the user completes a bank link.
///
/// The `user` and `enrollment` objects are opaque to us and must be forwarded verbatim to
/// `POST /teller/store-token`, so they are kept as raw JSON values.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: Value,
    pub enrollment: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Vec<String>>,
}

impl Enrollment {
    /// The institution name buried in the enrollment object, when present.
    pub fn institution_name(&self) -> Option<&str> {
        self.enrollment
            .get("institution")
            .and_then(|i| i.get("name"))
            .and_then(Value::as_str)
    }
}
