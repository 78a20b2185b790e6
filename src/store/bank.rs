//! The institution store: linked banks, the selected institution's accounts, and the
//! cross-institution account cache.

use crate::api::BudgetApi;
use crate::model::{Account, Enrollment, Institution, InstitutionRef};
use crate::store::AccountLookup;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, error};

/// Owns the list of linked institutions and the accounts for the selected institution.
///
/// An institution entry moves `unlinked -> linked` when a stored enrollment round trip
/// completes and `linked -> removed` when the user disconnects it. Alongside the displayed
/// account list, the store maintains `all_accounts`, a cache of every account fetched so far
/// across institutions, which backs the `AccountLookup` capability used by the transaction
/// store.
pub struct BankStore {
    api: Arc<dyn BudgetApi>,
    institutions: Vec<Institution>,
    accounts: Vec<Account>,
    selected_institution: Option<String>,
    selected_account: Option<Account>,
    /// Cache of all fetched accounts across institutions.
    all_accounts: Vec<Account>,
    loading: bool,
    error: Option<String>,
}

impl BankStore {
    pub fn new(api: Arc<dyn BudgetApi>) -> Self {
        Self {
            api,
            institutions: Vec::new(),
            accounts: Vec::new(),
            selected_institution: None,
            selected_account: None,
            all_accounts: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Replaces the institution list with the server's current set. On failure the prior list
    /// is left untouched and an error message is recorded.
    pub async fn fetch_institutions(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_teller_tokens().await {
            Ok(institutions) => self.institutions = institutions,
            Err(e) => self.record_error("Failed to fetch institutions", &e),
        }
        self.loading = false;
    }

    /// Fetches the accounts for one institution, replacing the displayed list and updating the
    /// cross-institution cache. Accounts the server returns without institution metadata are
    /// tagged with it client-side.
    pub async fn fetch_accounts(&mut self, institution: &str) {
        self.loading = true;
        self.error = None;

        match self.api.list_accounts(Some(institution)).await {
            Ok(mut accounts) => {
                let institution_id = self
                    .institutions
                    .iter()
                    .find(|i| i.institution_name == institution)
                    .and_then(|i| i.institution_id.clone());
                for account in &mut accounts {
                    if account.institution.is_none() {
                        account.institution = Some(InstitutionRef {
                            name: institution.to_string(),
                            id: institution_id.clone(),
                        });
                    }
                }

                // Replace this institution's entries in the cache, preserve the rest.
                self.all_accounts
                    .retain(|a| a.institution_name() != Some(institution));
                self.all_accounts.extend(accounts.iter().cloned());

                self.accounts = accounts;
                self.selected_institution = Some(institution.to_string());
            }
            Err(e) => self.record_error("Failed to fetch accounts", &e),
        }
        self.loading = false;
    }

    /// Pure local state transition, no I/O.
    pub fn select_account(&mut self, account: Account) {
        self.selected_account = Some(account);
    }

    /// Deletes the stored token for `institution_name`, then removes the institution locally.
    /// If it was the selected institution, the displayed accounts and selection are cleared.
    /// Failure records an error and leaves all state unchanged.
    pub async fn disconnect_institution(&mut self, institution_name: &str) {
        self.loading = true;
        self.error = None;

        match self.api.delete_teller_token(institution_name).await {
            Ok(_) => {
                self.institutions
                    .retain(|i| i.institution_name != institution_name);
                if self.selected_institution.as_deref() == Some(institution_name) {
                    self.accounts.clear();
                    self.selected_institution = None;
                    self.selected_account = None;
                }
            }
            Err(e) => self.record_error("Failed to disconnect institution", &e),
        }
        self.loading = false;
    }

    /// Forwards an enrollment payload from the bank-link widget, then refetches the
    /// institution list so the newly linked institution appears. Failures are recorded *and*
    /// returned, because the caller may need to show a retry prompt.
    pub async fn store_token(&mut self, enrollment: &Enrollment) -> Result<()> {
        self.loading = true;
        self.error = None;

        let result = self.api.store_teller_token(enrollment).await;
        match result {
            Ok(outcome) => {
                debug!(
                    "Stored enrollment token: {}",
                    outcome.message.unwrap_or_default()
                );
                self.fetch_institutions().await;
                self.loading = false;
                Ok(())
            }
            Err(e) => {
                self.record_error("Failed to store token", &e);
                self.loading = false;
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.institutions.clear();
        self.accounts.clear();
        self.selected_institution = None;
        self.selected_account = None;
        self.all_accounts.clear();
        self.error = None;
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn has_institutions(&self) -> bool {
        !self.institutions.is_empty()
    }

    pub fn has_accounts(&self) -> bool {
        !self.accounts.is_empty()
    }

    pub fn selected_institution(&self) -> Option<&str> {
        self.selected_institution.as_deref()
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.selected_account.as_ref()
    }

    /// Every account fetched so far, regardless of which institution is selected.
    pub fn all_accounts(&self) -> &[Account] {
        &self.all_accounts
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn record_error(&mut self, what: &str, e: &crate::Error) {
        let message = format!("{what}: {e:#}");
        error!("{message}");
        self.error = Some(message);
    }
}

impl AccountLookup for BankStore {
    fn account_name(&self, account_id: &str) -> Option<String> {
        self.all_accounts
            .iter()
            .chain(self.accounts.iter())
            .find(|a| a.id == account_id)
            .map(|a| a.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestClient;
    use crate::model::Institution;

    fn store(client: Arc<TestClient>) -> BankStore {
        BankStore::new(client)
    }

    #[tokio::test]
    async fn test_fetch_institutions_replaces_list() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client.clone());
        bank.fetch_institutions().await;
        assert_eq!(bank.institutions().len(), 2);
        assert!(bank.has_institutions());
        assert!(bank.error().is_none());

        client.set_institutions(vec![Institution::new("Only Bank")]);
        bank.fetch_institutions().await;
        assert_eq!(bank.institutions().len(), 1);
        assert_eq!(bank.institutions()[0].institution_name, "Only Bank");
    }

    #[tokio::test]
    async fn test_fetch_institutions_failure_keeps_prior_list() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client.clone());
        bank.fetch_institutions().await;
        assert_eq!(bank.institutions().len(), 2);

        client.fail_once("list_teller_tokens");
        bank.fetch_institutions().await;
        assert_eq!(bank.institutions().len(), 2);
        assert!(bank.error().unwrap().contains("Failed to fetch institutions"));
    }

    #[tokio::test]
    async fn test_fetch_accounts_tags_institution() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client);
        bank.fetch_institutions().await;
        // The seed's Second Credit Union account has no institution metadata on the server.
        bank.fetch_accounts("Second Credit Union").await;
        assert!(bank.has_accounts());
        let account = &bank.accounts()[0];
        assert_eq!(account.institution_name(), Some("Second Credit Union"));
        assert_eq!(
            account.institution.as_ref().unwrap().id.as_deref(),
            Some("second_cu")
        );
        assert_eq!(bank.selected_institution(), Some("Second Credit Union"));
    }

    #[tokio::test]
    async fn test_account_cache_replaces_per_institution() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client.clone());
        bank.fetch_institutions().await;
        bank.fetch_accounts("First Bank").await;
        bank.fetch_accounts("Second Credit Union").await;
        assert_eq!(bank.all_accounts().len(), 3);

        // Refetching First Bank with a different result replaces only its cache entries.
        let replacement: Vec<crate::model::Account> = serde_json::from_str(
            r#"[{"id": "acc_new", "name": "New Checking",
                 "institution": {"name": "First Bank", "id": "first_bank"}}]"#,
        )
        .unwrap();
        client.set_accounts("First Bank", replacement);
        bank.fetch_accounts("First Bank").await;

        assert_eq!(bank.all_accounts().len(), 2);
        assert!(bank.all_accounts().iter().any(|a| a.id == "acc_new"));
        assert!(bank.all_accounts().iter().any(|a| a.id == "acc_savings"));
        assert!(!bank.all_accounts().iter().any(|a| a.id == "acc_checking"));
    }

    #[tokio::test]
    async fn test_disconnect_clears_selection() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client);
        bank.fetch_institutions().await;
        bank.fetch_accounts("First Bank").await;
        let account = bank.accounts()[0].clone();
        bank.select_account(account);

        bank.disconnect_institution("First Bank").await;
        assert_eq!(bank.institutions().len(), 1);
        assert!(!bank.has_accounts());
        assert!(bank.selected_institution().is_none());
        assert!(bank.selected_account().is_none());
    }

    #[tokio::test]
    async fn test_disconnect_other_institution_keeps_selection() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client);
        bank.fetch_institutions().await;
        bank.fetch_accounts("First Bank").await;

        bank.disconnect_institution("Second Credit Union").await;
        assert_eq!(bank.institutions().len(), 1);
        assert!(bank.has_accounts());
        assert_eq!(bank.selected_institution(), Some("First Bank"));
    }

    #[tokio::test]
    async fn test_disconnect_failure_leaves_state_unchanged() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client.clone());
        bank.fetch_institutions().await;
        bank.fetch_accounts("First Bank").await;

        client.fail_once("delete_teller_token");
        bank.disconnect_institution("First Bank").await;
        assert_eq!(bank.institutions().len(), 2);
        assert!(bank.has_accounts());
        assert_eq!(bank.selected_institution(), Some("First Bank"));
        assert!(bank.error().is_some());
    }

    #[tokio::test]
    async fn test_store_token_refetches_institutions() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client);
        bank.fetch_institutions().await;

        let enrollment: Enrollment = serde_json::from_str(
            r#"{"accessToken": "tok", "user": {"id": "usr"},
                "enrollment": {"id": "enr", "institution": {"name": "Third Bank"}}}"#,
        )
        .unwrap();
        bank.store_token(&enrollment).await.unwrap();
        assert!(bank
            .institutions()
            .iter()
            .any(|i| i.institution_name == "Third Bank"));
    }

    #[tokio::test]
    async fn test_store_token_failure_is_rethrown() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client.clone());

        client.fail_once("store_teller_token");
        let enrollment: Enrollment = serde_json::from_str(
            r#"{"accessToken": "tok", "user": {"id": "usr"},
                "enrollment": {"id": "enr", "institution": {"name": "Third Bank"}}}"#,
        )
        .unwrap();
        let result = bank.store_token(&enrollment).await;
        assert!(result.is_err());
        assert!(bank.error().unwrap().contains("Failed to store token"));
    }

    #[tokio::test]
    async fn test_account_lookup() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client);
        bank.fetch_institutions().await;
        bank.fetch_accounts("First Bank").await;
        assert_eq!(
            bank.account_name("acc_checking").as_deref(),
            Some("Everyday Checking")
        );
        assert!(bank.account_name("acc_unknown").is_none());
    }

    #[tokio::test]
    async fn test_reset() {
        let client = Arc::new(TestClient::seeded());
        let mut bank = store(client);
        bank.fetch_institutions().await;
        bank.fetch_accounts("First Bank").await;
        bank.reset();
        assert!(!bank.has_institutions());
        assert!(!bank.has_accounts());
        assert!(bank.all_accounts().is_empty());
        assert!(bank.selected_institution().is_none());
    }
}
