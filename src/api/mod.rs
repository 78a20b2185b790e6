//! The client for the budget backend's REST surface.
//!
//! `BudgetApi` has one method per backend operation. The production implementation talks HTTP
//! via `reqwest`; the test implementation serves seedable in-memory data so the whole app can
//! run top-to-bottom without a backend.

mod http_client;
mod test_client;

use crate::model::{
    Account, Balance, Category, CategorySet, CategoryUpdate, Enrollment, ExportOutcome,
    Institution, MappingRule, MappingSet, Mappings, TokenOutcome, Transaction, TransactionRecord,
};
use crate::{Config, Result};
use std::sync::Arc;

pub(crate) use http_client::HttpClient;
pub use test_client::TestClient;

/// The environment variable that switches the app into test mode.
pub const TEST_MODE_VAR: &str = "TDASH_IN_TEST_MODE";

/// One method per backend operation. Each performs a single request/response round trip,
/// returns the decoded body and propagates any transport or non-2xx failure as an error.
#[async_trait::async_trait]
pub trait BudgetApi: Send + Sync {
    /// `GET /teller/tokens`: the institutions the user has linked.
    async fn list_teller_tokens(&self) -> Result<Vec<Institution>>;

    /// `POST /teller/store-token`: forward a Teller Connect enrollment payload.
    async fn store_teller_token(&self, enrollment: &Enrollment) -> Result<TokenOutcome>;

    /// `DELETE /teller/tokens/{institution_name}`: unlink an institution.
    async fn delete_teller_token(&self, institution_name: &str) -> Result<TokenOutcome>;

    /// `GET /accounts`: the accounts for `institution` (or for the default token when `None`).
    async fn list_accounts(&self, institution: Option<&str>) -> Result<Vec<Account>>;

    /// `GET /accounts/{id}/balances`: a balance snapshot for one account.
    async fn get_balance(&self, account_id: &str, institution: Option<&str>) -> Result<Balance>;

    /// `GET /accounts/{id}/transactions`: the transactions for one account.
    async fn list_transactions(
        &self,
        account_id: &str,
        institution: Option<&str>,
    ) -> Result<Vec<Transaction>>;

    /// `POST /transactions/categorize`: persist category assignments for a batch.
    async fn categorize_transactions(
        &self,
        transactions: &[TransactionRecord],
    ) -> Result<Vec<TransactionRecord>>;

    /// `POST /transactions/export`: append a batch to the external spreadsheet.
    async fn export_transactions(
        &self,
        transactions: &[TransactionRecord],
    ) -> Result<ExportOutcome>;

    /// `GET /categories`
    async fn get_categories(&self) -> Result<Vec<Category>>;

    /// `POST /categories`
    async fn add_category(&self, category: &Category) -> Result<CategorySet>;

    /// `PUT /categories/{id}`
    async fn update_category(
        &self,
        category_id: &str,
        update: &CategoryUpdate,
    ) -> Result<CategorySet>;

    /// `DELETE /categories/{id}`
    async fn delete_category(&self, category_id: &str) -> Result<CategorySet>;

    /// `GET /mappings`: the auto-categorization dictionary, pattern -> category id.
    async fn get_mappings(&self) -> Result<Mappings>;

    /// `POST /mappings`
    async fn add_mapping(&self, rule: &MappingRule) -> Result<MappingSet>;

    /// `DELETE /mappings/{pattern}`
    async fn delete_mapping(&self, pattern: &str) -> Result<MappingSet>;
}

/// Whether the program is being run normally (over HTTP) or with in-memory test data.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Http,
    Test,
}

impl Mode {
    /// When `TDASH_IN_TEST_MODE` is set and non-zero in length the mode is `Mode::Test`,
    /// otherwise it is `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_VAR) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// Create the API client for the given `mode`. The client is shared by both stores.
pub fn client(config: &Config, mode: Mode) -> Result<Arc<dyn BudgetApi>> {
    match mode {
        Mode::Http => Ok(Arc::new(HttpClient::new(config)?)),
        Mode::Test => Ok(Arc::new(TestClient::seeded())),
    }
}
