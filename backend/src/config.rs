//! Process configuration, read from the environment exactly once at startup.
//!
//! The file-hosting credential in particular is deliberately configuration:
//! it never appears as a literal anywhere in the tree and it never leaves the
//! server process. When only part of the GitHub host configuration is set the
//! process refuses to start instead of silently falling back to inline
//! proof storage.

use std::env;

use log::info;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "registrations.sqlite";

/// Ceiling for uploaded proof files. 8 MiB is the GitHub contents API limit;
/// deployments without a GitHub host may lower it via `PROOF_MAX_BYTES`.
pub const DEFAULT_PROOF_MAX_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "incomplete file host configuration: GITHUB_OWNER, GITHUB_REPO and \
         GITHUB_TOKEN must be set together"
    )]
    PartialGithub,
    #[error("invalid {key} value {value:?}")]
    BadValue { key: &'static str, value: String },
}

/// Remote content host for proof uploads. When absent, proofs are stored
/// inline as data URLs instead.
#[derive(Debug, Clone)]
pub struct GithubHost {
    pub owner: String,
    pub repo: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub db_path: String,
    pub proof_max_bytes: usize,
    pub github: Option<GithubHost>,
}

impl AppConfig {
    pub fn load() -> Result<AppConfig, ConfigError> {
        let bind = var_or("REGISTRATION_BIND", DEFAULT_BIND);
        let db_path = var_or("REGISTRATION_DB", DEFAULT_DB_PATH);

        let proof_max_bytes = match env::var("PROOF_MAX_BYTES") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::BadValue {
                key: "PROOF_MAX_BYTES",
                value: raw,
            })?,
            Err(_) => DEFAULT_PROOF_MAX_BYTES,
        };

        let github = match (
            env::var("GITHUB_OWNER").ok().filter(|v| !v.is_empty()),
            env::var("GITHUB_REPO").ok().filter(|v| !v.is_empty()),
            env::var("GITHUB_TOKEN").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(owner), Some(repo), Some(token)) => {
                info!("Proof uploads hosted at github.com/{}/{}", owner, repo);
                Some(GithubHost { owner, repo, token })
            }
            (None, None, None) => {
                info!("No file host configured, proofs will be stored inline");
                None
            }
            _ => return Err(ConfigError::PartialGithub),
        };

        Ok(AppConfig {
            bind,
            db_path,
            proof_max_bytes,
            github,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            proof_max_bytes: DEFAULT_PROOF_MAX_BYTES,
            github: None,
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
