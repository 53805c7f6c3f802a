// Client configuration: where the API lives, which developer key to sign
// requests with and how long to wait for a response. Built once at startup
// and handed to `GoodreadsClient`; nothing here is global.

use crate::error::{GoodreadsError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.goodreads.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File looked up in the working directory when `GOODREADS_KEY` is unset.
pub const KEY_FILE: &str = "goodreads_auth.txt";

/// File looked up in the home directory as a last resort.
pub const HOME_KEY_FILE: &str = ".goodreads_key";

#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    key: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("key", &"***")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ApiConfig {
    /// Build a config for `base_url` signed with `key`. An empty key or a base
    /// URL that cannot carry a path is rejected.
    pub fn new(base_url: &str, key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(GoodreadsError::Configuration(
                "developer key is empty".into(),
            ));
        }
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            GoodreadsError::Configuration(format!("invalid API base URL {base_url}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GoodreadsError::Configuration(format!(
                "API base URL {base_url} cannot carry a path"
            )));
        }
        Ok(ApiConfig {
            base_url,
            key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("goodreads-cli/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Create a config from the environment.
    ///
    /// `GOODREADS_API_URL` and `GOODREADS_TIMEOUT_SECS` override the defaults.
    /// The key comes from `GOODREADS_KEY`, then `goodreads_auth.txt` in the
    /// working directory, then `~/.goodreads_key`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("GOODREADS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let key = match std::env::var("GOODREADS_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => load_key(&key_file_candidates())?,
        };

        let mut config = ApiConfig::new(&base_url, key)?;
        if let Ok(raw) = std::env::var("GOODREADS_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                GoodreadsError::Configuration(format!("GOODREADS_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn key_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(KEY_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(HOME_KEY_FILE));
    }
    paths
}

/// Read the developer key from the first existing, non-empty file in `paths`.
pub fn load_key(paths: &[PathBuf]) -> Result<String> {
    for path in paths {
        if let Some(key) = read_key_file(path)? {
            return Ok(key);
        }
    }
    let tried: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    Err(GoodreadsError::Configuration(format!(
        "no developer key found (set GOODREADS_KEY or create one of: {})",
        tried.join(", ")
    )))
}

fn read_key_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(data) => {
            let key = data.trim();
            Ok((!key.is_empty()).then(|| key.to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GoodreadsError::Configuration(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
    }
}
