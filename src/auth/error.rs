use thiserror::Error;

/// Errors raised by the token lifecycle manager.
///
/// The credential exchange only distinguishes three server outcomes
/// (201, 401, anything else), so the taxonomy stays flat: rejected
/// credentials, transport failure, contract violation, malformed token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Credentials rejected by the server (HTTP 401). Never retried
    /// automatically; the caller must re-prompt or fail.
    #[error("invalid username/password; logon denied")]
    Unauthorized,

    /// Transport-level failure: unreachable host, timeout, TLS.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Well-formed HTTP exchange that violates the expected contract:
    /// unexpected status code, malformed JSON, missing fields.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Token string does not split into the expected segments, or a
    /// segment is not valid base64url.
    #[error("malformed token: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TokenError::Unauthorized.to_string(),
            "invalid username/password; logon denied"
        );

        let err = TokenError::Protocol("error fetching authorization token. HTTP:500".to_string());
        assert!(err.to_string().contains("HTTP:500"));

        let err = TokenError::Format("token has 1 segment(s)".to_string());
        assert!(err.to_string().starts_with("malformed token"));
    }
}
