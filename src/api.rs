// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use futures::StreamExt;
use reqwest::StatusCode;
use tokio::sync::Semaphore;

use crate::config::WildConfig;
use crate::entities::{CatalogEntry, CatalogPage};
use crate::error::WildError;
use crate::http::HttpClient;

/// How many detail requests a bulk fetch keeps in flight at once.
const BULK_FETCH_CONCURRENCY: usize = 8;

/// Client for the remote catalog endpoints.
///
/// Stateless apart from the underlying connection pool; caching and
/// freshness belong to the query layer.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: HttpClient,
}

impl CatalogApi {
    pub fn new(config: &WildConfig) -> Result<CatalogApi, WildError> {
        Ok(CatalogApi {
            http: HttpClient::new(&config.base_url)?,
        })
    }

    /// Builds the client over an already-constructed adapter.
    pub fn with_client(http: HttpClient) -> CatalogApi {
        CatalogApi { http }
    }

    /// Retrieve a single catalog entry by its exact name.
    pub async fn fetch_entry(&self, name: &str) -> Result<CatalogEntry, WildError> {
        let path = format!("catalog/{name}");
        match self.http.get_json(&path, &[]).await {
            Err(WildError::Transport { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(WildError::NotFound(name.to_string()))
            }
            other => other,
        }
    }

    /// Retrieve one page of catalog references starting at `offset`.
    pub async fn fetch_page(&self, offset: usize, limit: usize) -> Result<CatalogPage, WildError> {
        let query = [
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.http.get_json("catalog", &query).await
    }

    /// Fetch full entries for each name, a bounded number in flight at a
    /// time. Results arrive in completion order; individual failures do not
    /// abort the batch.
    pub async fn fetch_entries(&self, names: &[String]) -> Vec<Result<CatalogEntry, WildError>> {
        let semaphore = Arc::new(Semaphore::new(BULK_FETCH_CONCURRENCY));

        futures::stream::iter(names)
            .map(|name| {
                let api = self.clone();
                let sem = Arc::clone(&semaphore);
                async move {
                    let _permit = sem.acquire().await.expect("semaphore closed");
                    api.fetch_entry(name).await
                }
            })
            .buffer_unordered(BULK_FETCH_CONCURRENCY)
            .collect()
            .await
    }
}
