//! Token lifecycle management for the graph server's credential exchange.
//!
//! `TokenManager` exchanges a username/password for a JWT-shaped bearer
//! token via `POST {base}/auth/token`, keeps the raw server response as an
//! immutable snapshot, and derives everything else (segments, expiration,
//! remaining lifetime) from that snapshot on every call. A refresh swaps the
//! whole snapshot; a failed refresh leaves the previous token readable.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Local, TimeZone, Utc};
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::TokenError;

/// HTTP request timeout in seconds.
/// 30s allows for slow auth backends while still failing in bounded time.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Credential-exchange endpoint, relative to the server base URL.
const AUTH_TOKEN_PATH: &str = "/auth/token";

/// One successful credential exchange.
///
/// Replaced wholesale on every refresh. Accessors re-derive all fields from
/// `response` each call, so no decoded value can drift from the raw document.
#[derive(Debug, Clone)]
struct TokenState {
    /// Raw JSON document returned by the server.
    response: Value,
    /// Wall clock when the exchange completed. The payload's own `iat`
    /// claim, if any, is never consulted.
    issued: DateTime<Utc>,
}

/// Manages one credential's token lifecycle against one server endpoint.
///
/// Credentials are fixed at construction and reused by every [`refresh`].
/// The manager can be shared across tasks: token state lives behind a
/// `RwLock` and is swapped as a unit, so readers observe either the
/// pre-refresh or post-refresh token, never a partial update.
///
/// Empty usernames or passwords are not rejected here; they fail naturally
/// at the server with a 401.
///
/// [`refresh`]: TokenManager::refresh
pub struct TokenManager {
    base_url: String,
    username: String,
    password: String,
    client: Client,
    state: RwLock<Option<TokenState>>,
}

impl TokenManager {
    /// Create a manager without contacting the server.
    ///
    /// Call [`refresh`](TokenManager::refresh) to obtain the first token, or
    /// use [`connect`](TokenManager::connect) to do both in one step.
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self, TokenError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            client,
            state: RwLock::new(None),
        })
    }

    /// Create a manager and immediately perform the first credential
    /// exchange.
    pub async fn connect(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, TokenError> {
        let manager = Self::new(base_url, username, password)?;
        manager.refresh().await?;
        Ok(manager)
    }

    /// Exchange the stored credentials for a new token.
    ///
    /// On success the previous token state, if any, is fully replaced and
    /// the issue timestamp is recorded. On any failure (401, unexpected
    /// status, transport error) the previous state is left untouched, so a
    /// still-valid token survives a failed renewal attempt.
    ///
    /// No retries are attempted; retry policy belongs to the caller. The
    /// underlying request carries a 30s timeout.
    pub async fn refresh(&self) -> Result<(), TokenError> {
        let url = format!("{}{}", self.base_url, AUTH_TOKEN_PATH);
        debug!(url = %url, user = %self.username, "requesting authentication token");

        let body = serde_json::json!({
            "username": self.username,
            "password": self.password,
        });

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                let text = response.text().await?;
                let parsed: Value = serde_json::from_str(&text).map_err(|e| {
                    TokenError::Protocol(format!("token response is not valid JSON: {}", e))
                })?;

                let mut state = self.state.write().await;
                *state = Some(TokenState {
                    response: parsed,
                    issued: Utc::now(),
                });
                debug!("authentication token stored");
                Ok(())
            }
            StatusCode::UNAUTHORIZED => Err(TokenError::Unauthorized),
            status => Err(TokenError::Protocol(format!(
                "error fetching authorization token. HTTP:{}",
                status.as_u16()
            ))),
        }
    }

    /// URL of the server the token was obtained from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the user the token was obtained for.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The bearer token value (`access_token` in the server response).
    ///
    /// `None` before the first successful refresh. Fails with
    /// [`TokenError::Protocol`] if a response is present but carries no
    /// `access_token` field.
    pub async fn access_token(&self) -> Result<Option<String>, TokenError> {
        let Some(state) = self.snapshot().await else {
            return Ok(None);
        };

        let value = state
            .response
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                TokenError::Protocol("token response has no access_token field".to_string())
            })?;
        Ok(Some(value.to_string()))
    }

    /// Decoded first token segment (the JWT header), as raw JSON text.
    pub async fn header(&self) -> Result<Option<String>, TokenError> {
        match self.access_token().await? {
            None => Ok(None),
            Some(token) => {
                let parts = token_segments(&token, 2)?;
                decode_segment(parts[0]).map(Some)
            }
        }
    }

    /// Decoded second token segment (the JWT payload), as raw JSON text.
    pub async fn payload(&self) -> Result<Option<String>, TokenError> {
        match self.access_token().await? {
            None => Ok(None),
            Some(token) => {
                let parts = token_segments(&token, 2)?;
                decode_segment(parts[1]).map(Some)
            }
        }
    }

    /// Third token segment (the signature), still base64url-encoded.
    pub async fn signature(&self) -> Result<Option<String>, TokenError> {
        match self.access_token().await? {
            None => Ok(None),
            Some(token) => {
                let parts = token_segments(&token, 3)?;
                Ok(Some(parts[2].to_string()))
            }
        }
    }

    /// Absolute expiration of the token in seconds since the Unix epoch,
    /// taken from the payload's `exp` claim.
    pub async fn expiration_sec(&self) -> Result<Option<i64>, TokenError> {
        let Some(payload) = self.payload().await? else {
            return Ok(None);
        };

        let claims: Value = serde_json::from_str(&payload).map_err(|e| {
            TokenError::Protocol(format!("token payload is not valid JSON: {}", e))
        })?;
        let exp = claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or_else(|| TokenError::Protocol("token payload has no exp claim".to_string()))?;
        Ok(Some(exp))
    }

    /// Nominal token lifetime in seconds, as reported by the server's
    /// `expires_in` field at issuance. Independent of the `exp` claim.
    /// 0 when no token (or no `expires_in`) is present.
    pub async fn lifetime(&self) -> i64 {
        match self.snapshot().await {
            None => 0,
            Some(state) => state
                .response
                .get("expires_in")
                .and_then(Value::as_i64)
                .unwrap_or(0),
        }
    }

    /// Absolute expiration rendered in the local timezone offset in effect
    /// at call time (not at issuance — a DST change between the two skews
    /// the displayed value, never the underlying epoch seconds).
    pub async fn expiration(&self) -> Result<Option<DateTime<Local>>, TokenError> {
        let Some(exp) = self.expiration_sec().await? else {
            return Ok(None);
        };

        let at = Local.timestamp_opt(exp, 0).single().ok_or_else(|| {
            TokenError::Protocol(format!("exp claim {} is out of range", exp))
        })?;
        Ok(Some(at))
    }

    /// Seconds until expiration. Negative once the token has expired.
    pub async fn remaining_secs(&self) -> Result<Option<i64>, TokenError> {
        Ok(self
            .expiration_sec()
            .await?
            .map(|exp| exp - Utc::now().timestamp()))
    }

    /// Whether the token has expired. True when no token has been obtained
    /// yet. Strict comparison, no grace margin: a token whose `exp` equals
    /// the current second is still reported valid.
    pub async fn is_expired(&self) -> Result<bool, TokenError> {
        match self.expiration_sec().await? {
            None => Ok(true),
            Some(exp) => Ok(exp < Utc::now().timestamp()),
        }
    }

    /// Wall-clock time recorded when the last successful refresh completed.
    pub async fn issued(&self) -> Option<DateTime<Utc>> {
        self.snapshot().await.map(|state| state.issued)
    }

    /// The raw JSON document of the last successful exchange.
    pub async fn raw_response(&self) -> Option<Value> {
        self.snapshot().await.map(|state| state.response)
    }

    async fn snapshot(&self) -> Option<TokenState> {
        self.state.read().await.clone()
    }
}

/// Split a dot-delimited token, requiring at least `min` segments.
fn token_segments(token: &str, min: usize) -> Result<Vec<&str>, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < min {
        return Err(TokenError::Format(format!(
            "token has {} segment(s) where {} are expected",
            parts.len(),
            min
        )));
    }
    Ok(parts)
}

/// Decode one base64url segment into UTF-8 text.
fn decode_segment(segment: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Format(format!("segment is not valid base64url: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| TokenError::Format(format!("decoded segment is not valid UTF-8: {}", e)))
}
