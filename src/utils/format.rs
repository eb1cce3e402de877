//! Presentation helpers.
//!
//! The library itself never writes to the console; these functions build
//! display strings and callers decide where they go.

use chrono::Local;
use serde_json::Value;

use crate::auth::{TokenError, TokenManager};

/// Format a number of seconds as a compact duration, e.g. `1h 02m 05s`.
pub fn format_secs(secs: i64) -> String {
    let secs = secs.abs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Render one result row as comma-separated text
pub fn format_row(row: &[Value]) -> String {
    row.iter()
        .map(|value| match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a multi-line report of the manager's current token: the raw server
/// response, the decoded segments, and the issuance/expiration picture.
///
/// Everything is re-read from the manager at call time, so the report always
/// reflects the latest refresh.
pub async fn token_report(manager: &TokenManager) -> Result<String, TokenError> {
    use std::fmt::Write;

    let Some(response) = manager.raw_response().await else {
        return Ok("No token requested\n".to_string());
    };

    let mut out = String::new();
    let _ = writeln!(out, "Token Response: {}", response);

    if let Some(value) = manager.access_token().await? {
        let _ = writeln!(out, "Token Value: {}", value);
        let _ = writeln!(out, "- Header: {}", manager.header().await?.unwrap_or_default());
        let _ = writeln!(out, "- Payload: {}", manager.payload().await?.unwrap_or_default());
        let _ = writeln!(out, "- Signature: {}", manager.signature().await?.unwrap_or_default());
    }

    let _ = writeln!(out, "Lifetime: {} seconds", manager.lifetime().await);
    if let Some(issued) = manager.issued().await {
        let _ = writeln!(out, "Issued: {}", issued.with_timezone(&Local));
    }

    if let (Some(at), Some(remaining)) = (
        manager.expiration().await?,
        manager.remaining_secs().await?,
    ) {
        if manager.is_expired().await? {
            let _ = writeln!(out, "Token is Expired");
            let _ = writeln!(out, "Expired: {}", at);
            let _ = writeln!(out, "Expired {} ago", format_secs(remaining));
        } else {
            let _ = writeln!(out, "Expires: {}", at);
            let _ = writeln!(out, "Expires in: {}", format_secs(remaining));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(5), "5s");
        assert_eq!(format_secs(65), "1m 05s");
        assert_eq!(format_secs(3725), "1h 02m 05s");
        // Sign is dropped; callers phrase direction ("in" / "ago")
        assert_eq!(format_secs(-65), "1m 05s");
    }

    #[test]
    fn test_format_row() {
        let row = vec![json!("transfer"), json!(1200), json!(null)];
        assert_eq!(format_row(&row), "transfer, 1200, ");
        assert_eq!(format_row(&[]), "");
    }

    #[tokio::test]
    async fn test_report_without_token() {
        let manager = TokenManager::new("http://127.0.0.1:9", "scott", "tiger").unwrap();
        let report = token_report(&manager).await.unwrap();
        assert_eq!(report, "No token requested\n");
    }

    #[tokio::test]
    async fn test_report_after_refresh() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;
        use httpmock::Method::POST;
        use httpmock::MockServer;

        let exp = chrono::Utc::now().timestamp() + 1800;
        let token = format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#),
            URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp))
        );

        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/token");
            then.status(201)
                .json_body(json!({"access_token": token, "expires_in": 1800}));
        });

        let manager = TokenManager::connect(&server.base_url(), "scott", "tiger")
            .await
            .unwrap();
        let report = token_report(&manager).await.unwrap();

        assert!(report.contains("Token Value:"));
        assert!(report.contains(r#"- Header: {"alg":"none"}"#));
        assert!(report.contains("Lifetime: 1800 seconds"));
        assert!(report.contains("Expires in:"));
        assert!(!report.contains("Token is Expired"));
    }
}
