use crate::model::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A bank account belonging to one linked institution.
///
/// The Teller API includes fields we do not model directly (type, currency, status, links);
/// those are preserved in `other_fields` so that records round-trip unchanged.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,
    /// The server omits this on some responses, in which case it is attached client-side from
    /// the selected institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<InstitutionRef>,
    #[serde(flatten)]
    pub other_fields: BTreeMap<String, Value>,
}

/// The denormalized institution reference attached to each account.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InstitutionRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Account {
    /// The institution name this account belongs to, when known.
    pub fn institution_name(&self) -> Option<&str> {
        self.institution.as_ref().map(|i| i.name.as_str())
    }
}

/// A balance snapshot for one account, from `GET /accounts/{id}/balances`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Balance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger: Option<Amount>,
    #[serde(flatten)]
    pub other_fields: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_preserves_unknown_fields() {
        let raw = r#"{
            "id": "acc_123",
            "name": "Checking",
            "last_four": "1234",
            "institution": {"name": "First Bank", "id": "first_bank"},
            "type": "depository",
            "currency": "USD"
        }"#;
        let account: Account = serde_json::from_str(raw).unwrap();
        assert_eq!(account.id, "acc_123");
        assert_eq!(account.institution_name(), Some("First Bank"));
        assert_eq!(
            account.other_fields.get("currency"),
            Some(&Value::String("USD".to_string()))
        );
    }

    #[test]
    fn test_account_without_institution() {
        let account: Account =
            serde_json::from_str(r#"{"id": "acc_123", "name": "Checking"}"#).unwrap();
        assert!(account.institution.is_none());
        assert!(account.last_four.is_none());
    }

    #[test]
    fn test_balance() {
        let balance: Balance = serde_json::from_str(
            r#"{"account_id": "acc_123", "available": "512.10", "ledger": 512.10}"#,
        )
        .unwrap();
        assert!(balance.available.is_some());
        assert_eq!(balance.available, balance.ledger);
    }
}
