// Fixture transport: a `Transport` that answers from canned responses and
// records every URL it was asked for, so tests can assert how many requests
// an operation issued.
//
// Unknown URLs get a `404` with an empty body.
//
// ```ignore
// let transport = Arc::new(FixtureTransport::new());
// transport.respond(url, HttpResponse::ok(body));
// let client = GoodreadsClient::with_transport(config, transport.clone());
// // ... exercise entities ...
// assert_eq!(transport.calls(), 1);
// ```

use super::{HttpResponse, Transport};
use crate::error::{GoodreadsError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Default)]
pub struct FixtureTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requested: Mutex<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response` every time it is requested.
    pub fn respond(&self, url: impl Into<String>, response: HttpResponse) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), Reply::Response(response));
        self
    }

    /// Make requests for `url` fail as if the network were down.
    pub fn fail(&self, url: impl Into<String>, message: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), Reply::Failure(message.into()));
        self
    }

    /// Total number of requests served, known or not.
    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    /// Every requested URL, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Transport for FixtureTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        let replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        match replies.get(url) {
            Some(Reply::Response(r)) => Ok(r.clone()),
            Some(Reply::Failure(msg)) => Err(GoodreadsError::transport(super::redact(url), msg.clone())),
            None => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_request() {
        let transport = FixtureTransport::new();
        transport.respond("https://a.test/x", HttpResponse::ok("<r/>"));

        assert_eq!(transport.get("https://a.test/x").unwrap().status, 200);
        assert_eq!(transport.get("https://a.test/y").unwrap().status, 404);
        assert_eq!(transport.get("https://a.test/x").unwrap().body, "<r/>");

        assert_eq!(transport.calls(), 3);
        assert_eq!(transport.calls_to("https://a.test/x"), 2);
        assert_eq!(transport.requested()[1], "https://a.test/y");
    }

    #[test]
    fn scripted_failure_is_a_transport_error() {
        let transport = FixtureTransport::new();
        transport.fail("https://a.test/x?key=k", "connection refused");
        let err = transport.get("https://a.test/x?key=k").unwrap_err();
        assert_eq!(
            err,
            GoodreadsError::Transport {
                url: "https://a.test/x?key=***".into(),
                status: None,
                message: "connection refused".into(),
            }
        );
    }
}
