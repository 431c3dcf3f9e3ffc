//! HTTP collaborator for the ledger API, enabled by the `remote` feature.
//!
//! Token acquisition, refresh, and storage belong to the host; this client
//! only carries the bearer credential it is handed. It never retries:
//! retry policy, if any, is the host's.

use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::analyzer::{analyze, Analysis};
use crate::catalog::{CategoryCatalog, RemoteCategory, EXPENSE_KIND};
use crate::error::{ExpenseQueryError, Result};
use crate::ledger::{LedgerPage, CATEGORIES_ENDPOINT, PAYABLES_SEARCH_ENDPOINT};
use crate::query::ExpenseQuery;
use crate::summary::{summarize, Summary};

const API_BASE_URL: &str = "https://api-v2.contaazul.com/v1";

/// Page size used when listing categories; the full expense tree of a
/// typical account fits in one page.
const CATEGORY_PAGE_SIZE: u32 = 500;

#[derive(Clone)]
pub struct LedgerHttpClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl LedgerHttpClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: API_BASE_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExpenseQueryError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Runs one page of the payables search.
    pub async fn search_payables(&self, query: &ExpenseQuery) -> Result<LedgerPage> {
        debug!(
            "searching payables {}..{} (page {})",
            query.accrual_from, query.accrual_to, query.page
        );
        self.get_json(PAYABLES_SEARCH_ENDPOINT, &query.to_query_params())
            .await
    }

    /// Fetches the expense categories as the ledger knows them, ids resolved.
    pub async fn fetch_expense_categories(&self) -> Result<CategoryCatalog> {
        let params = vec![
            ("pagina".to_string(), "1".to_string()),
            ("tamanho_pagina".to_string(), CATEGORY_PAGE_SIZE.to_string()),
            ("tipo".to_string(), EXPENSE_KIND.to_string()),
            ("permite_apenas_filhos".to_string(), "true".to_string()),
        ];
        let listing: CategoryListing = self.get_json(CATEGORIES_ENDPOINT, &params).await?;
        Ok(CategoryCatalog::from_remote_items(listing.items))
    }
}

#[derive(Debug, Deserialize)]
struct CategoryListing {
    #[serde(rename = "itens", default)]
    items: Vec<RemoteCategory>,
}

/// A complete answer, with the analysis and query kept for auditability.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub summary: Summary,
    pub analysis: Analysis,
    pub query: ExpenseQuery,
}

/// End-to-end question answering against the live ledger: analyze the
/// question, run one search page, aggregate the result.
pub struct ExpenseAssistant {
    client: LedgerHttpClient,
}

impl ExpenseAssistant {
    pub fn new(client: LedgerHttpClient) -> Self {
        Self { client }
    }

    /// Ask one question against a previously loaded catalog.
    ///
    /// # Arguments
    /// * `question` - the user's free-text question
    /// * `catalog` - the expense category catalog for this session
    /// * `today` - reference date for period interpretation
    pub async fn ask(
        &self,
        question: &str,
        catalog: &CategoryCatalog,
        today: NaiveDate,
    ) -> Result<Answer> {
        let analysis = analyze(question, catalog, today);
        let query = ExpenseQuery::from_analysis(&analysis);
        let page = self.client.search_payables(&query).await?;
        let summary = summarize(&page.items, &analysis);

        Ok(Answer {
            summary,
            analysis,
            query,
        })
    }
}
