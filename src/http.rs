// SPDX-License-Identifier: GPL-3.0-only

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::case::camelize_keys;
use crate::error::WildError;

/// Thin wrapper over [`reqwest::Client`] pinned to the catalog base address.
///
/// Every successful response body is rewritten from the wire's
/// underscore_separated keys to camelCase before it reaches callers, so the
/// rest of the crate only ever sees normalized data. Failures are surfaced
/// as-is; there are no retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<HttpClient, WildError> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins drop the last path segment unless the base ends
        // with a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let client = Client::builder().pool_max_idle_per_host(10).build()?;

        Ok(HttpClient { base_url, client })
    }

    /// Performs a GET against `path` (relative to the base address) and
    /// returns the normalized response body.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, WildError> {
        let url = self.base_url.join(path)?;
        debug!(%url, "requesting");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WildError::Transport { status, body });
        }

        let body: Value = response.json().await?;
        Ok(camelize_keys(body))
    }

    /// Performs a GET and deserializes the normalized body into `T`.
    ///
    /// `T` is expected to spell its fields the client-side way
    /// (`#[serde(rename_all = "camelCase")]`).
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WildError> {
        let body = self.get(path, query).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn normalizes_response_keys() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/pikachu");
                then.status(200).json_body(json!({
                    "id": 25,
                    "base_experience": 112,
                    "sprites": { "front_default": "https://img.example/25.png" },
                }));
            })
            .await;

        let client = HttpClient::new(&server.base_url()).unwrap();
        let body = client.get("catalog/pikachu", &[]).await.unwrap();

        assert_eq!(body["baseExperience"], json!(112));
        assert_eq!(
            body["sprites"]["frontDefault"],
            json!("https://img.example/25.png")
        );
    }

    #[tokio::test]
    async fn forwards_query_parameters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/catalog")
                    .query_param("limit", "20")
                    .query_param("offset", "40");
                then.status(200).json_body(json!({ "count": 0, "results": [] }));
            })
            .await;

        let client = HttpClient::new(&server.base_url()).unwrap();
        let query = [("limit", "20".to_string()), ("offset", "40".to_string())];
        client.get("catalog", &query).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_statuses_become_transport_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog/missingno");
                then.status(503).body("catalog is down");
            })
            .await;

        let client = HttpClient::new(&server.base_url()).unwrap();
        let err = client.get("catalog/missingno", &[]).await.unwrap_err();

        match err {
            WildError::Transport { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "catalog is down");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn base_url_gains_a_trailing_slash() {
        let client = HttpClient::new("https://api.example/v2").unwrap();
        assert_eq!(client.base_url.path(), "/v2/");
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(
            HttpClient::new("not a url"),
            Err(WildError::BadUrl(_))
        ));
    }
}
