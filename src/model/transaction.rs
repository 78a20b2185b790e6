use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The literal category name the backend assigns when no mapping matches.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single transaction belonging to one account.
///
/// Negative amounts are expenses, positive amounts are income. Fields the dashboard does not
/// model directly are preserved in `other_fields`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub other_fields: BTreeMap<String, Value>,
}

impl Transaction {
    /// Returns true when the transaction has no category or carries the backend's literal
    /// "Uncategorized" placeholder.
    pub fn is_uncategorized(&self) -> bool {
        match self.category.as_deref() {
            None | Some("") => true,
            Some(name) => name == UNCATEGORIZED,
        }
    }
}

/// The transaction shape the backend expects in `POST /transactions/categorize` and
/// `POST /transactions/export` batches: a `Transaction` enriched with the resolved
/// `account_name`, which the server does not track per-transaction.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionRecord {
    pub id: String,
    pub account_id: String,
    pub account_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionRecord {
    /// Builds a batch record from a transaction and the resolved account name.
    pub fn new(transaction: &Transaction, account_name: impl Into<String>) -> Self {
        Self {
            id: transaction.id.clone(),
            account_id: transaction.account_id.clone(),
            account_name: account_name.into(),
            date: transaction.date,
            description: transaction.description.clone(),
            amount: transaction.amount,
            category: transaction.category.clone(),
            notes: transaction.notes.clone(),
        }
    }
}

/// The wrapper the backend expects around a transaction batch.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionBatch {
    pub transactions: Vec<TransactionRecord>,
}

/// The result of exporting a batch to the external spreadsheet.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOutcome {
    #[serde(
        rename = "updatedRange",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_range: Option<String>,
    #[serde(flatten)]
    pub other_fields: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn transaction(raw: &str) -> Transaction {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_deserialize() {
        let tx = transaction(
            r#"{
                "id": "txn_1",
                "account_id": "acc_1",
                "date": "2025-01-15",
                "description": "Coffee Shop",
                "amount": "-4.50",
                "category": "Food"
            }"#,
        );
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert!(tx.amount.is_negative());
        assert!(!tx.is_uncategorized());
    }

    #[test]
    fn test_is_uncategorized() {
        let mut tx = transaction(
            r#"{
                "id": "txn_1",
                "account_id": "acc_1",
                "date": "2025-01-15",
                "description": "Coffee Shop",
                "amount": "-4.50"
            }"#,
        );
        assert!(tx.is_uncategorized());
        tx.category = Some(UNCATEGORIZED.to_string());
        assert!(tx.is_uncategorized());
        tx.category = Some(String::new());
        assert!(tx.is_uncategorized());
        tx.category = Some("Food".to_string());
        assert!(!tx.is_uncategorized());
    }

    #[test]
    fn test_record_carries_account_name() {
        let tx = Transaction {
            id: "txn_1".to_string(),
            account_id: "acc_1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: "Coffee Shop".to_string(),
            amount: Amount::from_str("-4.50").unwrap(),
            category: Some("Food".to_string()),
            notes: None,
            other_fields: BTreeMap::new(),
        };
        let record = TransactionRecord::new(&tx, "Checking");
        assert_eq!(record.account_name, "Checking");
        assert_eq!(record.id, tx.id);
        assert_eq!(record.amount, tx.amount);
    }

    #[test]
    fn test_export_outcome() {
        let outcome: ExportOutcome =
            serde_json::from_str(r#"{"updatedRange": "Transactions!A10:H12"}"#).unwrap();
        assert_eq!(
            outcome.updated_range.as_deref(),
            Some("Transactions!A10:H12")
        );
    }
}
