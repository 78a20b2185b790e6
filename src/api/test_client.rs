//! Implements the `BudgetApi` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the
//! whole app, top-to-bottom, without a running backend (see `Mode::from_env`).

use crate::api::BudgetApi;
use crate::model::{
    Account, Balance, Category, CategorySet, CategoryUpdate, Enrollment, ExportOutcome,
    Institution, MappingRule, MappingSet, Mappings, TokenOutcome, Transaction, TransactionRecord,
};
use crate::Result;
use anyhow::{bail, Context};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// An implementation of the `BudgetApi` trait that does not use the network. It can hold any
/// data in memory and, by default, is seeded with some existing data. Individual operations can
/// be made to fail once, which the store tests use to exercise error paths.
pub struct TestClient {
    state: Mutex<TestState>,
}

/// The backend-of-record data held by a `TestClient`.
#[derive(Default)]
pub struct TestState {
    pub institutions: Vec<Institution>,
    /// Accounts keyed by institution name.
    pub accounts: BTreeMap<String, Vec<Account>>,
    /// Transactions keyed by account id.
    pub transactions: BTreeMap<String, Vec<Transaction>>,
    /// Balances keyed by account id.
    pub balances: BTreeMap<String, Balance>,
    pub categories: Vec<Category>,
    pub mappings: Mappings,
    /// Operation names that will fail on their next invocation.
    fail_once: BTreeSet<String>,
}

impl TestClient {
    /// Create a new `TestClient` holding `state`.
    pub fn new(state: TestState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Create a new `TestClient` seeded with the data from this module.
    pub fn seeded() -> Self {
        Self::new(seed_state())
    }

    /// Make the named operation fail on its next invocation only.
    pub fn fail_once(&self, operation: &str) {
        self.lock().fail_once.insert(operation.to_string());
    }

    /// Replace the transactions held for `account_id`.
    pub fn set_transactions(&self, account_id: &str, transactions: Vec<Transaction>) {
        self.lock()
            .transactions
            .insert(account_id.to_string(), transactions);
    }

    /// Replace the accounts held for `institution`.
    pub fn set_accounts(&self, institution: &str, accounts: Vec<Account>) {
        self.lock()
            .accounts
            .insert(institution.to_string(), accounts);
    }

    /// Replace the institution list.
    pub fn set_institutions(&self, institutions: Vec<Institution>) {
        self.lock().institutions = institutions;
    }

    /// Replace the category list.
    pub fn set_categories(&self, categories: Vec<Category>) {
        self.lock().categories = categories;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TestState> {
        // The lock is never held across an await and the app is single-threaded per operation,
        // so poisoning can only follow a panicking test.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if self.lock().fail_once.remove(operation) {
            bail!("Injected failure for operation '{operation}'");
        }
        Ok(())
    }
}

impl Default for TestClient {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait::async_trait]
impl BudgetApi for TestClient {
    async fn list_teller_tokens(&self) -> Result<Vec<Institution>> {
        self.check_fail("list_teller_tokens")?;
        Ok(self.lock().institutions.clone())
    }

    async fn store_teller_token(&self, enrollment: &Enrollment) -> Result<TokenOutcome> {
        self.check_fail("store_teller_token")?;
        let name = enrollment
            .institution_name()
            .context("Enrollment payload has no institution name")?
            .to_string();
        let mut state = self.lock();
        state
            .institutions
            .retain(|i| i.institution_name != name);
        state.institutions.push(Institution::new(name));
        Ok(TokenOutcome {
            success: true,
            message: Some("Token stored successfully".to_string()),
        })
    }

    async fn delete_teller_token(&self, institution_name: &str) -> Result<TokenOutcome> {
        self.check_fail("delete_teller_token")?;
        let mut state = self.lock();
        let before = state.institutions.len();
        state
            .institutions
            .retain(|i| i.institution_name != institution_name);
        if state.institutions.len() == before {
            bail!("No token found for institution: {institution_name}");
        }
        state.accounts.remove(institution_name);
        Ok(TokenOutcome {
            success: true,
            message: Some(format!(
                "Token for {institution_name} deleted successfully"
            )),
        })
    }

    async fn list_accounts(&self, institution: Option<&str>) -> Result<Vec<Account>> {
        self.check_fail("list_accounts")?;
        let state = self.lock();
        match institution {
            Some(name) => Ok(state.accounts.get(name).cloned().unwrap_or_default()),
            None => Ok(state.accounts.values().flatten().cloned().collect()),
        }
    }

    async fn get_balance(&self, account_id: &str, _institution: Option<&str>) -> Result<Balance> {
        self.check_fail("get_balance")?;
        self.lock()
            .balances
            .get(account_id)
            .cloned()
            .with_context(|| format!("No balance held for account {account_id}"))
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        _institution: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.check_fail("list_transactions")?;
        Ok(self
            .lock()
            .transactions
            .get(account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn categorize_transactions(
        &self,
        transactions: &[TransactionRecord],
    ) -> Result<Vec<TransactionRecord>> {
        self.check_fail("categorize_transactions")?;
        let mut state = self.lock();
        for record in transactions {
            if let Some(held) = state.transactions.get_mut(&record.account_id) {
                for tx in held.iter_mut().filter(|tx| tx.id == record.id) {
                    tx.category = record.category.clone();
                }
            }
        }
        Ok(transactions.to_vec())
    }

    async fn export_transactions(
        &self,
        transactions: &[TransactionRecord],
    ) -> Result<ExportOutcome> {
        self.check_fail("export_transactions")?;
        let last_row = transactions.len() + 1;
        Ok(ExportOutcome {
            updated_range: Some(format!("Transactions!A2:H{last_row}")),
            other_fields: BTreeMap::new(),
        })
    }

    async fn get_categories(&self) -> Result<Vec<Category>> {
        self.check_fail("get_categories")?;
        Ok(self.lock().categories.clone())
    }

    async fn add_category(&self, category: &Category) -> Result<CategorySet> {
        self.check_fail("add_category")?;
        let mut state = self.lock();
        if state.categories.iter().any(|c| c.name == category.name) {
            bail!("Failed to add category. Name may already exist.");
        }
        let mut category = category.clone();
        if category.id.is_none() {
            category.id = Some(format!("cat_{}", state.categories.len() + 1));
        }
        state.categories.push(category);
        Ok(CategorySet {
            success: true,
            categories: state.categories.clone(),
        })
    }

    async fn update_category(
        &self,
        category_id: &str,
        update: &CategoryUpdate,
    ) -> Result<CategorySet> {
        self.check_fail("update_category")?;
        let mut state = self.lock();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(category_id))
            .with_context(|| format!("Category not found: {category_id}"))?;
        if let Some(name) = &update.name {
            category.name = name.clone();
        }
        if let Some(color) = &update.color {
            category.color = Some(color.clone());
        }
        Ok(CategorySet {
            success: true,
            categories: state.categories.clone(),
        })
    }

    async fn delete_category(&self, category_id: &str) -> Result<CategorySet> {
        self.check_fail("delete_category")?;
        let mut state = self.lock();
        let before = state.categories.len();
        state
            .categories
            .retain(|c| c.id.as_deref() != Some(category_id));
        if state.categories.len() == before {
            bail!("Category not found: {category_id}");
        }
        Ok(CategorySet {
            success: true,
            categories: state.categories.clone(),
        })
    }

    async fn get_mappings(&self) -> Result<Mappings> {
        self.check_fail("get_mappings")?;
        Ok(self.lock().mappings.clone())
    }

    async fn add_mapping(&self, rule: &MappingRule) -> Result<MappingSet> {
        self.check_fail("add_mapping")?;
        let mut state = self.lock();
        state
            .mappings
            .insert(rule.pattern.clone(), rule.category_id.clone());
        Ok(MappingSet {
            success: true,
            mappings: state.mappings.clone(),
        })
    }

    async fn delete_mapping(&self, pattern: &str) -> Result<MappingSet> {
        self.check_fail("delete_mapping")?;
        let mut state = self.lock();
        if state.mappings.remove(pattern).is_none() {
            bail!("Mapping not found: {pattern}");
        }
        Ok(MappingSet {
            success: true,
            mappings: state.mappings.clone(),
        })
    }
}

/// Provides the seed data from this module.
fn seed_state() -> TestState {
    let institutions: Vec<Institution> = serde_json::from_str(INSTITUTION_DATA).unwrap();
    let accounts: BTreeMap<String, Vec<Account>> = serde_json::from_str(ACCOUNT_DATA).unwrap();
    let transactions: BTreeMap<String, Vec<Transaction>> =
        serde_json::from_str(TRANSACTION_DATA).unwrap();
    let categories: Vec<Category> = serde_json::from_str(CATEGORY_DATA).unwrap();
    let mappings: Mappings = serde_json::from_str(MAPPING_DATA).unwrap();

    let mut balances = BTreeMap::new();
    for account in accounts.values().flatten() {
        balances.insert(
            account.id.clone(),
            Balance {
                account_id: Some(account.id.clone()),
                available: Some(Default::default()),
                ledger: Some(Default::default()),
                other_fields: BTreeMap::new(),
            },
        );
    }

    TestState {
        institutions,
        accounts,
        transactions,
        balances,
        categories,
        mappings,
        fail_once: BTreeSet::new(),
    }
}

/// Seed institution data.
const INSTITUTION_DATA: &str = r#"[
    {"institution_name": "First Bank", "institution_id": "first_bank", "created_at": "2025-01-02T10:00:00Z"},
    {"institution_name": "Second Credit Union", "institution_id": "second_cu", "created_at": "2025-02-14T18:30:00Z"}
]"#;

/// Seed account data, keyed by institution name.
const ACCOUNT_DATA: &str = r#"{
    "First Bank": [
        {"id": "acc_checking", "name": "Everyday Checking", "last_four": "5678",
         "institution": {"name": "First Bank", "id": "first_bank"}},
        {"id": "acc_credit", "name": "Rewards Credit Card", "last_four": "1234",
         "institution": {"name": "First Bank", "id": "first_bank"}}
    ],
    "Second Credit Union": [
        {"id": "acc_savings", "name": "High Yield Savings", "last_four": "9012"}
    ]
}"#;

/// Seed transaction data, keyed by account id.
const TRANSACTION_DATA: &str = r#"{
    "acc_checking": [
        {"id": "txn_001", "account_id": "acc_checking", "date": "2025-10-16",
         "description": "PG&E Electric", "amount": "-142.67", "category": "Utilities"},
        {"id": "txn_002", "account_id": "acc_checking", "date": "2025-10-11",
         "description": "Comcast Internet", "amount": "-89.99", "category": "Utilities"},
        {"id": "txn_003", "account_id": "acc_checking", "date": "2025-10-01",
         "description": "Monthly Rent Payment", "amount": "-1850.00", "category": "Housing"},
        {"id": "txn_004", "account_id": "acc_checking", "date": "2025-10-01",
         "description": "Acme Corp Payroll", "amount": "3200.00", "category": "Income"}
    ],
    "acc_credit": [
        {"id": "txn_101", "account_id": "acc_credit", "date": "2025-10-20",
         "description": "Whole Foods Market", "amount": "-87.43", "category": "Groceries"},
        {"id": "txn_102", "account_id": "acc_credit", "date": "2025-10-19",
         "description": "Starbucks #2847", "amount": "-6.75", "category": "Coffee Shops"},
        {"id": "txn_103", "account_id": "acc_credit", "date": "2025-10-18",
         "description": "Shell Gas Station", "amount": "-52.30"}
    ],
    "acc_savings": [
        {"id": "txn_201", "account_id": "acc_savings", "date": "2025-09-30",
         "description": "Interest Payment", "amount": "12.84", "category": "Income"}
    ]
}"#;

/// Seed category data.
const CATEGORY_DATA: &str = r##"[
    {"id": "cat_1", "name": "Groceries", "color": "#10B981"},
    {"id": "cat_2", "name": "Coffee Shops", "color": "#F59E0B"},
    {"id": "cat_3", "name": "Utilities", "color": "#3B82F6"},
    {"id": "cat_4", "name": "Housing", "color": "#8B5CF6"},
    {"id": "cat_5", "name": "Income", "color": "#22C55E"}
]"##;

/// Seed mapping data.
const MAPPING_DATA: &str = r#"{
    "whole foods": "cat_1",
    "starbucks": "cat_2",
    "pg&e": "cat_3"
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_data_is_consistent() {
        let client = TestClient::seeded();
        let institutions = client.list_teller_tokens().await.unwrap();
        assert_eq!(institutions.len(), 2);
        for institution in &institutions {
            let accounts = client
                .list_accounts(Some(&institution.institution_name))
                .await
                .unwrap();
            assert!(!accounts.is_empty());
            for account in &accounts {
                let _ = client.get_balance(&account.id, None).await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_seed_categories_carry_hex_colors() {
        let client = TestClient::seeded();
        let categories = client.get_categories().await.unwrap();
        assert_eq!(categories.len(), 5);
        let groceries = categories.iter().find(|c| c.name == "Groceries").unwrap();
        assert_eq!(groceries.color.as_deref(), Some("#10B981"));
        assert!(categories
            .iter()
            .all(|c| c.color.as_deref().unwrap_or_default().starts_with('#')));
    }

    #[tokio::test]
    async fn test_fail_once_only_fails_once() {
        let client = TestClient::seeded();
        client.fail_once("get_categories");
        assert!(client.get_categories().await.is_err());
        assert!(client.get_categories().await.is_ok());
    }

    #[tokio::test]
    async fn test_store_token_replaces_by_name() {
        let client = TestClient::seeded();
        let enrollment: Enrollment = serde_json::from_str(
            r#"{"accessToken": "tok", "user": {"id": "usr"},
                "enrollment": {"id": "enr", "institution": {"name": "First Bank"}}}"#,
        )
        .unwrap();
        client.store_teller_token(&enrollment).await.unwrap();
        let institutions = client.list_teller_tokens().await.unwrap();
        let count = institutions
            .iter()
            .filter(|i| i.institution_name == "First Bank")
            .count();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_token_fails() {
        let client = TestClient::seeded();
        assert!(client.delete_teller_token("No Such Bank").await.is_err());
    }
}
