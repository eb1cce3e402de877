//! Runtime configuration for the demonstration client.
//!
//! Connection settings come from the environment (after an optional `.env`
//! load in `main`), with positional CLI arguments taking precedence. Nothing
//! is persisted to disk.

use anyhow::{Context, Result};

const ENV_SERVER_URL: &str = "GRAPH_SERVER_URL";
const ENV_USERNAME: &str = "GRAPH_SERVER_USERNAME";
const ENV_PASSWORD: &str = "GRAPH_SERVER_PASSWORD";
const ENV_GRAPH: &str = "GRAPH_SERVER_GRAPH";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub username: String,
    pub password: String,
    pub graph: String,
}

impl Config {
    /// Build from positional CLI arguments:
    /// `<server-url> <username> <password> <graph>`.
    pub fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [server_url, username, password, graph] => Some(Self {
                server_url: server_url.clone(),
                username: username.clone(),
                password: password.clone(),
                graph: graph.clone(),
            }),
            _ => None,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server_url: require(&lookup, ENV_SERVER_URL)?,
            username: require(&lookup, ENV_USERNAME)?,
            password: require(&lookup, ENV_PASSWORD)?,
            graph: require(&lookup, ENV_GRAPH)?,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .with_context(|| format!("{} is not set", key))
}
