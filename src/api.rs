// API client module: the request layer. It turns an endpoint into a signed
// URL, performs one blocking GET through the configured transport, checks
// the status and strips the envelope every Goodreads response carries.
// Each call is independent; caching happens one level up, in `entity`.

use crate::config::ApiConfig;
use crate::error::{GoodreadsError, Result};
use crate::transport::{redact, HttpTransport, Transport};
use crate::xml::Element;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Where a lookup is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Path segments below the API base URL, signed with the developer key.
    /// Each segment is percent-encoded on its own.
    Path(Vec<String>),
    /// Complete URL used verbatim.
    Url(String),
}

impl Endpoint {
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Endpoint::Path(segments.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Path(segments) => write!(f, "{}", segments.join("/")),
            Endpoint::Url(u) => write!(f, "{}", redact(u)),
        }
    }
}

/// Client holding the transport and the configuration every request is
/// built from. Shared by all entities through an `Arc`.
#[derive(Clone)]
pub struct GoodreadsClient {
    transport: Arc<dyn Transport>,
    config: ApiConfig,
}

impl GoodreadsClient {
    /// Create a client that talks HTTP with `reqwest`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client from `ApiConfig::from_env`.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        GoodreadsClient { transport, config }
    }

    /// Full request URL for `endpoint`.
    pub fn request_url(&self, endpoint: &Endpoint) -> Result<Url> {
        match endpoint {
            Endpoint::Path(segments) => {
                let mut url = self.config.base_url.clone();
                url.path_segments_mut()
                    .map_err(|_| {
                        GoodreadsError::Configuration(format!(
                            "{} cannot carry a path",
                            self.config.base_url
                        ))
                    })?
                    .pop_if_empty()
                    .extend(segments);
                url.query_pairs_mut().append_pair("key", self.config.key());
                Ok(url)
            }
            Endpoint::Url(raw) => Url::parse(raw).map_err(|e| {
                GoodreadsError::Configuration(format!("invalid endpoint URL {}: {e}", redact(raw)))
            }),
        }
    }

    /// Fetch `endpoint` and return the payload element.
    ///
    /// Non-200 responses fail with `Transport` before the body is looked at.
    /// The response root's first child is the request echo and is skipped;
    /// the second child is returned.
    pub fn fetch(&self, endpoint: &Endpoint) -> Result<Element> {
        let url = self.request_url(endpoint)?;
        let shown = redact(url.as_str());
        debug!(url = %shown, "GET");

        let res = self.transport.get(url.as_str())?;
        if res.status != 200 {
            warn!(url = %shown, status = res.status, "unexpected status");
            return Err(GoodreadsError::Transport {
                url: shown,
                status: Some(res.status),
                message: format!("unexpected status {}", res.status),
            });
        }

        let root = Element::parse(&res.body)?;
        unwrap_envelope(root)
    }
}

fn unwrap_envelope(root: Element) -> Result<Element> {
    root.children().get(1).cloned().ok_or_else(|| {
        GoodreadsError::Parse(format!(
            "<{}> has {} child element(s), expected a request echo followed by the payload",
            root.name(),
            root.children().len()
        ))
    })
}
