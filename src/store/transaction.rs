//! The transaction store: the cross-account transaction list, its derived monthly views, and
//! the cached category/mapping data.

use crate::api::BudgetApi;
use crate::model::{
    Amount, Category, CategorySpending, ExportOutcome, Mappings, Transaction, TransactionRecord,
    YearMonth, DEFAULT_CATEGORY_COLOR,
};
use crate::store::AccountLookup;
use crate::Result;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::error;

/// Owns the transaction list across accounts, the derived monthly views, the category list and
/// the auto-categorization mapping dictionary.
///
/// Fetches are idempotent per account: refetching an account's transactions replaces that
/// account's rows and leaves other accounts' rows untouched. The `filtered` view mirrors the
/// full list after every fetch; an active search filter must be reapplied by the caller.
pub struct TransactionStore {
    api: Arc<dyn BudgetApi>,
    transactions: Vec<Transaction>,
    filtered: Vec<Transaction>,
    categories: Vec<Category>,
    mappings: Mappings,
    current: YearMonth,
    loading: bool,
    error: Option<String>,
}

impl TransactionStore {
    pub fn new(api: Arc<dyn BudgetApi>) -> Self {
        Self {
            api,
            transactions: Vec::new(),
            filtered: Vec::new(),
            categories: Vec::new(),
            mappings: Mappings::new(),
            current: YearMonth::now(),
            loading: false,
            error: None,
        }
    }

    /// Fetches the transactions for one account and upserts them: rows currently held for that
    /// account are discarded and replaced by the fetch result, other accounts' rows are
    /// preserved. Resets the filtered view to the full list.
    pub async fn fetch_transactions(&mut self, account_id: &str, institution: Option<&str>) {
        self.loading = true;
        self.error = None;

        match self.api.list_transactions(account_id, institution).await {
            Ok(batch) => {
                self.transactions.retain(|t| t.account_id != account_id);
                self.transactions.extend(batch);
                self.filtered = self.transactions.clone();
            }
            Err(e) => self.record_error("Failed to fetch transactions", &e),
        }
        self.loading = false;
    }

    /// Accumulates a batch of transactions that may span several accounts, with the same
    /// upsert-by-account semantics as `fetch_transactions`. An empty batch is a no-op.
    pub fn add_transactions(&mut self, batch: Vec<Transaction>) {
        if batch.is_empty() {
            return;
        }
        let replaced: BTreeSet<String> = batch.iter().map(|t| t.account_id.clone()).collect();
        self.transactions
            .retain(|t| !replaced.contains(&t.account_id));
        self.transactions.extend(batch);
        self.filtered = self.transactions.clone();
    }

    /// Caches a read-only copy of the server's category list.
    pub async fn fetch_categories(&mut self) {
        self.loading = true;
        match self.api.get_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => self.record_error("Failed to fetch categories", &e),
        }
        self.loading = false;
    }

    /// Caches a read-only copy of the server's auto-categorization dictionary.
    pub async fn fetch_mappings(&mut self) {
        self.loading = true;
        match self.api.get_mappings().await {
            Ok(mappings) => self.mappings = mappings,
            Err(e) => self.record_error("Failed to fetch category mappings", &e),
        }
        self.loading = false;
    }

    /// Assigns a category to one transaction as an explicit two-phase optimistic update: the
    /// prior category is snapshotted, the new one is applied locally for immediate feedback,
    /// and the updated record is sent to the backend. On failure the snapshot is restored and
    /// an error is recorded. An unknown transaction id is a silent no-op.
    pub async fn categorize_transaction(
        &mut self,
        transaction_id: &str,
        category_name: &str,
        accounts: &dyn AccountLookup,
    ) {
        let Some(transaction) = self.transactions.iter().find(|t| t.id == transaction_id) else {
            return;
        };
        let snapshot = transaction.category.clone();
        let account_id = transaction.account_id.clone();

        self.set_category(transaction_id, Some(category_name.to_string()));
        let record = match self.transactions.iter().find(|t| t.id == transaction_id) {
            Some(updated) => TransactionRecord::new(
                updated,
                accounts.account_name(&account_id).unwrap_or_default(),
            ),
            None => return,
        };

        if let Err(e) = self.api.categorize_transactions(&[record]).await {
            self.record_error("Failed to categorize transaction", &e);
            self.set_category(transaction_id, snapshot);
        }
    }

    /// Exports the current month's transactions to the external spreadsheet. Records failures
    /// and also returns them, so the caller can show a confirmation or alert. An empty month
    /// is a no-op that reports an empty outcome.
    pub async fn export_transactions(
        &mut self,
        accounts: &dyn AccountLookup,
    ) -> Result<ExportOutcome> {
        let records: Vec<TransactionRecord> = self
            .current_month_transactions()
            .into_iter()
            .map(|tx| {
                TransactionRecord::new(tx, accounts.account_name(&tx.account_id).unwrap_or_default())
            })
            .collect();
        if records.is_empty() {
            return Ok(ExportOutcome::default());
        }

        self.loading = true;
        self.error = None;
        let result = self.api.export_transactions(&records).await;
        self.loading = false;
        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.record_error("Failed to export transactions", &e);
                Err(e)
            }
        }
    }

    /// The transactions whose date falls within the selected month.
    pub fn current_month_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| self.current.contains(t.date))
            .collect()
    }

    /// Spending per category for the selected month: the absolute values of negative amounts
    /// summed per category, colored via the category cache. Income is excluded. Categories
    /// appear in first-occurrence order.
    pub fn spending_by_category(&self) -> Vec<CategorySpending> {
        let mut spending: Vec<(String, rust_decimal::Decimal)> = Vec::new();
        for tx in self.current_month_transactions() {
            if !tx.amount.is_negative() {
                continue;
            }
            let category = tx
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| crate::model::UNCATEGORIZED.to_string());
            match spending.iter_mut().find(|(name, _)| *name == category) {
                Some((_, total)) => *total += tx.amount.abs(),
                None => spending.push((category, tx.amount.abs())),
            }
        }

        spending
            .into_iter()
            .map(|(category, total)| {
                let color = self
                    .categories
                    .iter()
                    .find(|c| c.name == category)
                    .and_then(|c| c.color.clone())
                    .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
                CategorySpending {
                    category,
                    amount: Amount::new(total),
                    color,
                }
            })
            .collect()
    }

    /// The sum of positive amounts in the selected month.
    pub fn total_income(&self) -> Amount {
        let total = self
            .current_month_transactions()
            .iter()
            .filter(|t| t.amount.is_positive())
            .map(|t| t.amount.value())
            .sum();
        Amount::new(total)
    }

    /// The sum of the absolute values of negative amounts in the selected month.
    pub fn total_expenses(&self) -> Amount {
        let total = self
            .current_month_transactions()
            .iter()
            .filter(|t| t.amount.is_negative())
            .map(|t| t.amount.abs())
            .sum();
        Amount::new(total)
    }

    /// Transactions with no category, or with the literal "Uncategorized" placeholder.
    pub fn uncategorized_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.is_uncategorized())
            .collect()
    }

    /// The distinct months present in the data, most recent first.
    pub fn available_months(&self) -> Vec<YearMonth> {
        let months: BTreeSet<YearMonth> = self
            .transactions
            .iter()
            .map(|t| YearMonth::from_date(t.date))
            .collect();
        months.into_iter().rev().collect()
    }

    pub fn set_month(&mut self, month: YearMonth) {
        self.current = month;
    }

    pub fn set_next_month(&mut self) {
        self.current = self.current.next();
    }

    pub fn set_previous_month(&mut self) {
        self.current = self.current.previous();
    }

    /// Case-insensitive substring match over description and category. Empty input resets the
    /// filtered view to the full list.
    pub fn filter_transactions(&mut self, search_text: &str) {
        if search_text.is_empty() {
            self.filtered = self.transactions.clone();
            return;
        }
        let query = search_text.to_lowercase();
        self.filtered = self
            .transactions
            .iter()
            .filter(|t| {
                t.description.to_lowercase().contains(&query)
                    || t.category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&query))
            })
            .cloned()
            .collect();
    }

    pub fn reset(&mut self) {
        self.transactions.clear();
        self.filtered.clear();
        self.error = None;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn filtered_transactions(&self) -> &[Transaction] {
        &self.filtered
    }

    pub fn has_transactions(&self) -> bool {
        !self.transactions.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    pub fn current_month(&self) -> YearMonth {
        self.current
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies a category value to the transaction in both the full list and the filtered
    /// view, which hold independent copies.
    fn set_category(&mut self, transaction_id: &str, category: Option<String>) {
        for tx in self
            .transactions
            .iter_mut()
            .chain(self.filtered.iter_mut())
            .filter(|t| t.id == transaction_id)
        {
            tx.category = category.clone();
        }
    }

    fn record_error(&mut self, what: &str, e: &crate::Error) {
        let message = format!("{what}: {e:#}");
        error!("{message}");
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestClient;
    use crate::test::{lookup, tx};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn store_with(transactions: Vec<Transaction>) -> TransactionStore {
        let mut store = TransactionStore::new(Arc::new(TestClient::seeded()));
        store.add_transactions(transactions);
        store
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_current_month_transactions_filters_by_date() {
        let mut store = store_with(vec![
            tx("txn_1", "acc_a", "2025-01-01", "Rent", "-1850.00", None),
            tx("txn_2", "acc_a", "2025-01-31", "Groceries", "-80.00", None),
            tx("txn_3", "acc_a", "2025-02-01", "Coffee", "-5.00", None),
            tx("txn_4", "acc_a", "2024-01-15", "Old Rent", "-1700.00", None),
        ]);
        store.set_month(month("2025-01"));
        let current: Vec<&str> = store
            .current_month_transactions()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(current, vec!["txn_1", "txn_2"]);

        store.set_month(month("2025-06"));
        assert!(store.current_month_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_refetch_replaces_only_that_account() {
        let client = Arc::new(TestClient::seeded());
        client.set_transactions(
            "acc_a",
            vec![
                tx("txn_a1", "acc_a", "2025-01-05", "First", "-10.00", None),
                tx("txn_a2", "acc_a", "2025-01-06", "Second", "-20.00", None),
            ],
        );
        client.set_transactions(
            "acc_b",
            vec![tx("txn_b1", "acc_b", "2025-01-07", "Other", "-30.00", None)],
        );

        let mut store = TransactionStore::new(client.clone());
        store.fetch_transactions("acc_a", None).await;
        store.fetch_transactions("acc_b", None).await;
        assert_eq!(store.transactions().len(), 3);

        // A second fetch for account A returns a different result.
        client.set_transactions(
            "acc_a",
            vec![tx("txn_a3", "acc_a", "2025-01-08", "Replacement", "-40.00", None)],
        );
        store.fetch_transactions("acc_a", None).await;

        let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"txn_a3"));
        assert!(ids.contains(&"txn_b1"));
        assert!(!ids.contains(&"txn_a1"));
        assert_eq!(store.filtered_transactions().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_prior_rows() {
        let client = Arc::new(TestClient::seeded());
        client.set_transactions(
            "acc_a",
            vec![tx("txn_a1", "acc_a", "2025-01-05", "First", "-10.00", None)],
        );
        let mut store = TransactionStore::new(client.clone());
        store.fetch_transactions("acc_a", None).await;

        client.fail_once("list_transactions");
        store.fetch_transactions("acc_a", None).await;
        assert_eq!(store.transactions().len(), 1);
        assert!(store.error().unwrap().contains("Failed to fetch transactions"));
    }

    #[tokio::test]
    async fn test_fetch_resets_active_filter() {
        let client = Arc::new(TestClient::seeded());
        client.set_transactions(
            "acc_a",
            vec![
                tx("txn_a1", "acc_a", "2025-01-05", "Rent", "-10.00", None),
                tx("txn_a2", "acc_a", "2025-01-06", "Coffee", "-20.00", None),
            ],
        );
        let mut store = TransactionStore::new(client.clone());
        store.fetch_transactions("acc_a", None).await;
        store.filter_transactions("rent");
        assert_eq!(store.filtered_transactions().len(), 1);

        store.fetch_transactions("acc_a", None).await;
        assert_eq!(store.filtered_transactions().len(), 2);
    }

    #[test]
    fn test_add_transactions_empty_batch_is_noop() {
        let mut store = store_with(vec![tx(
            "txn_1", "acc_a", "2025-01-01", "Rent", "-1850.00", None,
        )]);
        store.add_transactions(Vec::new());
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn test_add_transactions_upserts_per_account() {
        let mut store = store_with(vec![
            tx("txn_a1", "acc_a", "2025-01-01", "Rent", "-1850.00", None),
            tx("txn_b1", "acc_b", "2025-01-02", "Coffee", "-5.00", None),
        ]);
        store.add_transactions(vec![tx(
            "txn_a2", "acc_a", "2025-01-03", "Groceries", "-60.00", None,
        )]);
        let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"txn_a2"));
        assert!(ids.contains(&"txn_b1"));
    }

    #[test]
    fn test_spending_by_category() {
        let mut store = store_with(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-01-09", "Lunch", "-30.00", Some("Food")),
            tx("txn_3", "acc_a", "2025-01-15", "Payroll", "100.00", Some("Income")),
        ]);
        store.set_month(month("2025-01"));
        let spending = store.spending_by_category();
        assert_eq!(spending.len(), 1);
        assert_eq!(spending[0].category, "Food");
        assert_eq!(spending[0].amount.value(), Decimal::from(80));
        assert_eq!(spending[0].color, DEFAULT_CATEGORY_COLOR);
    }

    #[tokio::test]
    async fn test_spending_uses_category_colors() {
        let client = Arc::new(TestClient::seeded());
        client.set_categories(vec![Category::new("Food", "#EF4444")]);
        let mut store = TransactionStore::new(client);
        store.fetch_categories().await;
        store.add_transactions(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-01-06", "Mystery", "-10.00", None),
        ]);
        store.set_month(month("2025-01"));
        let spending = store.spending_by_category();
        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].color, "#EF4444");
        assert_eq!(spending[1].category, crate::model::UNCATEGORIZED);
        assert_eq!(spending[1].color, DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_totals() {
        let mut store = store_with(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-01-09", "Refund", "20.00", None),
            tx("txn_3", "acc_a", "2025-01-15", "Payroll", "100.00", Some("Income")),
            tx("txn_4", "acc_a", "2025-02-01", "Next Month", "-999.00", None),
        ]);
        store.set_month(month("2025-01"));
        assert_eq!(store.total_income().value(), Decimal::from(120));
        assert_eq!(store.total_expenses().value(), Decimal::from(50));
    }

    #[test]
    fn test_uncategorized_transactions() {
        let store = store_with(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-01-06", "Mystery", "-10.00", None),
            tx(
                "txn_3",
                "acc_a",
                "2025-01-07",
                "Unknown",
                "-10.00",
                Some("Uncategorized"),
            ),
        ]);
        let ids: Vec<&str> = store
            .uncategorized_transactions()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["txn_2", "txn_3"]);
    }

    #[test]
    fn test_available_months_sorted_descending() {
        let store = store_with(vec![
            tx("txn_1", "acc_a", "2024-12-05", "A", "-1.00", None),
            tx("txn_2", "acc_a", "2025-02-01", "B", "-1.00", None),
            tx("txn_3", "acc_a", "2025-02-14", "C", "-1.00", None),
            tx("txn_4", "acc_a", "2025-01-20", "D", "-1.00", None),
        ]);
        let months = store.available_months();
        assert_eq!(months.len(), 3);
        assert_eq!(months[0], month("2025-02"));
        assert_eq!(months[1], month("2025-01"));
        assert_eq!(months[2], month("2024-12"));
        assert_eq!(months[2].label(), "December 2024");
    }

    #[test]
    fn test_month_navigation_rolls_over() {
        let mut store = store_with(Vec::new());
        store.set_month(month("2024-12"));
        store.set_next_month();
        assert_eq!(store.current_month(), month("2025-01"));

        store.set_month(month("2025-01"));
        store.set_previous_month();
        assert_eq!(store.current_month(), month("2024-12"));
    }

    #[tokio::test]
    async fn test_categorize_applies_locally() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client);
        store.add_transactions(vec![tx(
            "txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", None,
        )]);
        let accounts = lookup(&[("acc_a", "Everyday Checking")]);
        store.categorize_transaction("txn_1", "Food", &accounts).await;
        assert_eq!(store.transactions()[0].category.as_deref(), Some("Food"));
        assert_eq!(
            store.filtered_transactions()[0].category.as_deref(),
            Some("Food")
        );
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_categorize_rolls_back_on_failure() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client.clone());
        store.add_transactions(vec![tx(
            "txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", None,
        )]);
        let accounts = lookup(&[("acc_a", "Everyday Checking")]);

        client.fail_once("categorize_transactions");
        store.categorize_transaction("txn_1", "Food", &accounts).await;
        assert_eq!(store.transactions()[0].category, None);
        assert_eq!(store.filtered_transactions()[0].category, None);
        assert!(store
            .error()
            .unwrap()
            .contains("Failed to categorize transaction"));
    }

    #[tokio::test]
    async fn test_categorize_rollback_restores_prior_category() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client.clone());
        store.add_transactions(vec![tx(
            "txn_1",
            "acc_a",
            "2025-01-05",
            "Dinner",
            "-50.00",
            Some("Restaurants"),
        )]);
        let accounts = lookup(&[("acc_a", "Everyday Checking")]);

        client.fail_once("categorize_transactions");
        store.categorize_transaction("txn_1", "Food", &accounts).await;
        assert_eq!(
            store.transactions()[0].category.as_deref(),
            Some("Restaurants")
        );
    }

    #[tokio::test]
    async fn test_categorize_unknown_id_is_noop() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client);
        let accounts = lookup(&[]);
        store
            .categorize_transaction("txn_missing", "Food", &accounts)
            .await;
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_export_sends_current_month_with_account_names() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client);
        store.add_transactions(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-02-05", "Other Month", "-10.00", None),
        ]);
        store.set_month(month("2025-01"));
        let accounts = lookup(&[("acc_a", "Everyday Checking")]);
        let outcome = store.export_transactions(&accounts).await.unwrap();
        // One record exported: header row plus one data row.
        assert_eq!(outcome.updated_range.as_deref(), Some("Transactions!A2:H2"));
    }

    #[tokio::test]
    async fn test_export_empty_month_is_noop() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client.clone());
        store.set_month(month("2025-06"));
        client.fail_once("export_transactions");
        // The injected failure is never reached because nothing is sent.
        let outcome = store.export_transactions(&lookup(&[])).await.unwrap();
        assert!(outcome.updated_range.is_none());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_export_failure_is_recorded_and_rethrown() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client.clone());
        store.add_transactions(vec![tx(
            "txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food"),
        )]);
        store.set_month(month("2025-01"));

        client.fail_once("export_transactions");
        let result = store.export_transactions(&lookup(&[])).await;
        assert!(result.is_err());
        assert!(store
            .error()
            .unwrap()
            .contains("Failed to export transactions"));
    }

    #[test]
    fn test_filter_matches_description_case_insensitively() {
        let mut store = store_with(vec![
            tx(
                "txn_1",
                "acc_a",
                "2025-01-05",
                "Monthly Rent Payment",
                "-1850.00",
                None,
            ),
            tx("txn_2", "acc_a", "2025-01-06", "Coffee", "-5.00", Some("Food")),
        ]);
        store.filter_transactions("rent");
        assert_eq!(store.filtered_transactions().len(), 1);
        assert_eq!(store.filtered_transactions()[0].id, "txn_1");
    }

    #[test]
    fn test_filter_matches_category() {
        let mut store = store_with(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-01-06", "Gas", "-40.00", Some("Auto")),
        ]);
        store.filter_transactions("FOOD");
        assert_eq!(store.filtered_transactions().len(), 1);
        assert_eq!(store.filtered_transactions()[0].id, "txn_1");
    }

    #[test]
    fn test_filter_empty_restores_full_list() {
        let mut store = store_with(vec![
            tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", Some("Food")),
            tx("txn_2", "acc_a", "2025-01-06", "Gas", "-40.00", Some("Auto")),
        ]);
        store.filter_transactions("dinner");
        assert_eq!(store.filtered_transactions().len(), 1);
        store.filter_transactions("");
        assert_eq!(store.filtered_transactions().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_categories_and_mappings() {
        let client = Arc::new(TestClient::seeded());
        let mut store = TransactionStore::new(client);
        store.fetch_categories().await;
        store.fetch_mappings().await;
        assert!(!store.categories().is_empty());
        assert_eq!(
            store.mappings().get("whole foods").map(String::as_str),
            Some("cat_1")
        );
    }

    #[test]
    fn test_reset() {
        let mut store = store_with(vec![tx(
            "txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", None,
        )]);
        store.reset();
        assert!(!store.has_transactions());
        assert!(store.filtered_transactions().is_empty());
    }

    #[test]
    fn test_amount_parsing_in_fixture() {
        let transaction = tx("txn_1", "acc_a", "2025-01-05", "Dinner", "-50.00", None);
        assert_eq!(
            transaction.amount.value(),
            Decimal::from_str("-50.00").unwrap()
        );
    }
}
