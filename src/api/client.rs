//! API client for the graph server's session and query endpoints.
//!
//! This is a thin wrapper over the server's REST surface: version info,
//! session creation, PGQL statement execution. Tokens come from
//! `auth::TokenManager`; this client only attaches them as bearer auth.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{QueryResultSet, SessionInfo, VersionInfo};

use super::ApiError;

/// HTTP request timeout in seconds.
/// Long enough for a slow PGQL statement, short enough to fail usefully.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the graph server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client for the given server base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    /// Create a client carrying the given bearer token, sharing the
    /// connection pool of this one.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(), // Cheap clone, shares connection pool
            token: Some(token),
        }
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning a classified error with
    /// the body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// Fetch server version information
    pub async fn fetch_version(&self) -> Result<VersionInfo> {
        let url = format!("{}/version", self.base_url);
        self.get(&url).await
    }

    /// Open a new session on the server. `source` names the client for
    /// server-side diagnostics.
    pub async fn create_session(&self, source: &str) -> Result<SessionInfo> {
        let url = format!("{}/core/v1/sessions", self.base_url);
        let body = serde_json::json!({ "source": source });
        debug!(source = %source, "creating session");
        self.post(&url, &body).await
    }

    /// Run a PGQL statement against a shared graph within a session
    pub async fn run_query(
        &self,
        session_id: &str,
        graph: &str,
        statement: &str,
    ) -> Result<QueryResultSet> {
        let url = format!("{}/core/v1/pgql/run", self.base_url);
        let body = serde_json::json!({
            "sessionId": session_id,
            "graphName": graph,
            "statement": statement,
        });
        debug!(graph = %graph, "running PGQL statement");
        self.post(&url, &body).await
    }

    /// Close a session, releasing its server-side resources
    pub async fn close_session(&self, session_id: &str) -> Result<()> {
        let url = format!("{}/core/v1/sessions/{}", self.base_url, session_id);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{DELETE, GET, POST};
    use httpmock::MockServer;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url())
            .unwrap()
            .with_token("tok".to_string())
    }

    #[tokio::test]
    async fn fetch_version_parses_server_fields() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/version")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(json!({
                "releaseVersion": "23.4.0",
                "serverType": "sm",
                "apiVersion": "3.16",
                "pgqlVersion": "1.5"
            }));
        });

        let version = client_for(&server).fetch_version().await.unwrap();
        assert_eq!(version.release_version, "23.4.0");
        assert_eq!(version.pgql_version.as_deref(), Some("1.5"));
    }

    #[tokio::test]
    async fn run_query_returns_columns_and_rows() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/core/v1/pgql/run")
                .json_body(json!({
                    "sessionId": "s-1",
                    "graphName": "bank",
                    "statement": "SELECT 1"
                }));
            then.status(200).json_body(json!({
                "colNames": ["label", "num_edges"],
                "rows": [["transfer", 1200], ["owns", 44]]
            }));
        });

        let results = client_for(&server)
            .run_query("s-1", "bank", "SELECT 1")
            .await
            .unwrap();
        assert_eq!(results.columns, vec!["label", "num_edges"]);
        assert_eq!(results.rows.len(), 2);
    }

    #[tokio::test]
    async fn unauthorized_is_classified() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/version");
            then.status(401);
        });

        let err = client_for(&server).fetch_version().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn close_session_hits_delete_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/core/v1/sessions/s-9");
            then.status(204);
        });

        client_for(&server).close_session("s-9").await.unwrap();
        mock.assert_async().await;
    }
}
