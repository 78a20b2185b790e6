//! Implements the `BudgetApi` trait over HTTP using `reqwest`.

use crate::api::BudgetApi;
use crate::model::{
    Account, Balance, Category, CategorySet, CategoryUpdate, Enrollment, ExportOutcome,
    Institution, MappingRule, MappingSet, Mappings, TokenOutcome, Transaction, TransactionBatch,
    TransactionRecord,
};
use crate::{Config, Result};
use anyhow::{anyhow, bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, trace};
use url::Url;

/// Implements the `BudgetApi` trait against the backend's REST surface. One HTTP round trip
/// per call, JSON bodies both ways, and a fixed request deadline taken from the config. There
/// are no retries; failures are logged here and propagated to the caller.
pub(crate) struct HttpClient {
    base: Url,
    http: reqwest::Client,
}

impl HttpClient {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(config.api_url())
            .with_context(|| format!("Invalid API base URL '{}'", config.api_url()))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Unable to build the HTTP client")?;
        Ok(Self { base, http })
    }

    /// Builds a URL from path segments (percent-encoded) and optional query parameters.
    fn url(&self, segments: &[&str], query: &[(&str, Option<&str>)]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| anyhow!("The API base URL cannot be used as a base"))?;
            for segment in segments {
                path.push(segment);
            }
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        trace!("GET {url}");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| log_transport("GET", &url, e))?;
        decode("GET", &url, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        trace!("POST {url}");
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| log_transport("POST", &url, e))?;
        decode("POST", &url, response).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        trace!("PUT {url}");
        let response = self
            .http
            .put(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| log_transport("PUT", &url, e))?;
        decode("PUT", &url, response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        trace!("DELETE {url}");
        let response = self
            .http
            .delete(url.clone())
            .send()
            .await
            .map_err(|e| log_transport("DELETE", &url, e))?;
        decode("DELETE", &url, response).await
    }
}

/// Logs a transport-level failure at the API boundary and wraps it for propagation.
fn log_transport(method: &str, url: &Url, e: reqwest::Error) -> crate::Error {
    error!("{method} {url} transport failure: {e}");
    anyhow::Error::new(e).context(format!("{method} {url} failed"))
}

/// Checks the response status and decodes the JSON body. Non-2xx responses are logged with
/// whatever body the server sent and surfaced as errors carrying the status.
async fn decode<T: DeserializeOwned>(
    method: &str,
    url: &Url,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("{method} {url} returned {status}: {body}");
        bail!("{method} {url} returned {status}");
    }
    response
        .json::<T>()
        .await
        .with_context(|| format!("Failed to decode the response body from {method} {url}"))
}

#[async_trait::async_trait]
impl BudgetApi for HttpClient {
    async fn list_teller_tokens(&self) -> Result<Vec<Institution>> {
        let url = self.url(&["teller", "tokens"], &[])?;
        self.get_json(url).await
    }

    async fn store_teller_token(&self, enrollment: &Enrollment) -> Result<TokenOutcome> {
        let url = self.url(&["teller", "store-token"], &[])?;
        self.post_json(url, enrollment).await
    }

    async fn delete_teller_token(&self, institution_name: &str) -> Result<TokenOutcome> {
        let url = self.url(&["teller", "tokens", institution_name], &[])?;
        self.delete_json(url).await
    }

    async fn list_accounts(&self, institution: Option<&str>) -> Result<Vec<Account>> {
        let url = self.url(&["accounts"], &[("institution", institution)])?;
        self.get_json(url).await
    }

    async fn get_balance(&self, account_id: &str, institution: Option<&str>) -> Result<Balance> {
        let url = self.url(
            &["accounts", account_id, "balances"],
            &[("institution", institution)],
        )?;
        self.get_json(url).await
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        institution: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let url = self.url(
            &["accounts", account_id, "transactions"],
            &[("institution", institution)],
        )?;
        self.get_json(url).await
    }

    async fn categorize_transactions(
        &self,
        transactions: &[TransactionRecord],
    ) -> Result<Vec<TransactionRecord>> {
        let url = self.url(&["transactions", "categorize"], &[])?;
        let batch = TransactionBatch {
            transactions: transactions.to_vec(),
        };
        self.post_json(url, &batch).await
    }

    async fn export_transactions(
        &self,
        transactions: &[TransactionRecord],
    ) -> Result<ExportOutcome> {
        let url = self.url(&["transactions", "export"], &[])?;
        let batch = TransactionBatch {
            transactions: transactions.to_vec(),
        };
        self.post_json(url, &batch).await
    }

    async fn get_categories(&self) -> Result<Vec<Category>> {
        let url = self.url(&["categories"], &[])?;
        self.get_json(url).await
    }

    async fn add_category(&self, category: &Category) -> Result<CategorySet> {
        let url = self.url(&["categories"], &[])?;
        self.post_json(url, category).await
    }

    async fn update_category(
        &self,
        category_id: &str,
        update: &CategoryUpdate,
    ) -> Result<CategorySet> {
        let url = self.url(&["categories", category_id], &[])?;
        self.put_json(url, update).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<CategorySet> {
        let url = self.url(&["categories", category_id], &[])?;
        self.delete_json(url).await
    }

    async fn get_mappings(&self) -> Result<Mappings> {
        let url = self.url(&["mappings"], &[])?;
        self.get_json(url).await
    }

    async fn add_mapping(&self, rule: &MappingRule) -> Result<MappingSet> {
        let url = self.url(&["mappings"], &[])?;
        self.post_json(url, rule).await
    }

    async fn delete_mapping(&self, pattern: &str) -> Result<MappingSet> {
        let url = self.url(&["mappings", pattern], &[])?;
        self.delete_json(url).await
    }
}
