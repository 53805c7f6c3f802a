#![allow(dead_code)]

use goodreads_cli::transport::mock::FixtureTransport;
use goodreads_cli::transport::HttpResponse;
use goodreads_cli::{ApiConfig, GoodreadsClient};
use std::sync::Arc;

pub const BASE: &str = "https://www.goodreads.com";
pub const KEY: &str = "k3y";

pub const AUTHOR_1: &str = include_str!("../fixtures/author_show_1.xml");
pub const BOOK_13642: &str = include_str!("../fixtures/book_show_13642.xml");
pub const USER_42: &str = include_str!("../fixtures/user_show_42.xml");

/// Signed URL the client builds for `path`.
pub fn url(path: &str) -> String {
    format!("{BASE}/{path}?key={KEY}")
}

/// Client backed by a fixture transport serving the three canned payloads.
pub fn setup() -> (Arc<FixtureTransport>, Arc<GoodreadsClient>) {
    let transport = Arc::new(FixtureTransport::new());
    transport.respond(url("author/show/1"), HttpResponse::ok(AUTHOR_1));
    transport.respond(url("book/show/13642"), HttpResponse::ok(BOOK_13642));
    transport.respond(url("user/show/42"), HttpResponse::ok(USER_42));

    let config = ApiConfig::new(BASE, KEY).expect("valid config");
    let client = Arc::new(GoodreadsClient::with_transport(config, transport.clone()));
    (transport, client)
}
