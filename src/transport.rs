// Transport module: the single blocking GET the request layer needs, behind
// a trait so the client can be driven by fixtures in tests. The real
// implementation wraps a `reqwest` blocking client.

pub mod mock;

use crate::config::ApiConfig;
use crate::error::{GoodreadsError, Result};
use reqwest::blocking::Client;
use url::Url;

/// Raw HTTP response: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        HttpResponse {
            status: 200,
            body: body.into(),
        }
    }
}

/// Performs one synchronous GET. Implementations report network failures as
/// `GoodreadsError::Transport` and return every received response as-is,
/// whatever its status.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// `Transport` backed by `reqwest::blocking::Client`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                GoodreadsError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let res = self
            .client
            .get(url)
            .send()
            .map_err(|e| GoodreadsError::transport(redact(url), e.without_url().to_string()))?;
        let status = res.status().as_u16();
        let body = res
            .text()
            .map_err(|e| GoodreadsError::transport(redact(url), e.without_url().to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Replace the value of any `key` query parameter with `***`. A URL that does
/// not parse loses its whole query.
pub fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return match url.split_once('?') {
            Some((base, _)) => format!("{base}?***"),
            None => url.to_string(),
        };
    };
    if parsed.query().is_none() {
        return parsed.into();
    }
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}
