//! The reactive state layer that sits between the view layer and the API client.
//!
//! Each store owns its state, calls the `BudgetApi` client, and exposes derived getters for the
//! view layer to render. Store actions catch API failures and record them in an `error` field
//! for display; only the operations a caller must react to synchronously (`store_token`,
//! `export_transactions`) also propagate the failure.

mod bank;
mod transaction;

pub use bank::BankStore;
pub use transaction::TransactionStore;

/// The account-lookup capability the transaction store needs when building batch records.
///
/// The transaction store does not own account data; it queries this interface instead, which
/// `BankStore` implements over its cross-institution account cache. Tests substitute a plain
/// map.
pub trait AccountLookup {
    /// Resolve an account id to its display name.
    fn account_name(&self, account_id: &str) -> Option<String>;
}

impl AccountLookup for std::collections::BTreeMap<String, String> {
    fn account_name(&self, account_id: &str) -> Option<String> {
        self.get(account_id).cloned()
    }
}
