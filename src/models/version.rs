use serde::Deserialize;

/// Server version information, as returned by `GET /version`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "releaseVersion")]
    pub release_version: String,
    #[serde(rename = "serverType")]
    pub server_type: Option<String>,
    #[serde(rename = "apiVersion")]
    pub api_version: Option<String>,
    #[serde(rename = "pgqlVersion")]
    pub pgql_version: Option<String>,
}

impl VersionInfo {
    /// One-line summary for display
    pub fn summary(&self) -> String {
        format!(
            "{} type: {}",
            self.release_version,
            self.server_type.as_deref().unwrap_or("unknown")
        )
    }
}
