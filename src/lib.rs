// Library root
// -----------
// Client binding for the Goodreads XML API. Entities (authors, books,
// shelves, users) read their fields lazily: from the inline data they were
// built from when possible, otherwise from one memoized lookup.
//
// Module responsibilities:
// - `config`, `transport`, `api`: configuration, the HTTP GET seam and the
//   request layer that signs URLs and unwraps the response envelope.
// - `xml`: owned element tree parsed from response bodies.
// - `entity`: the shared caching/dispatch record and list expansion.
// - `author`, `book`, `shelf`, `user`: the concrete entity kinds.
// - `report`, `ui`: printing and the interactive front end used by the binary.
pub mod api;
pub mod author;
pub mod book;
pub mod config;
pub mod entity;
pub mod error;
pub mod report;
pub mod shelf;
pub mod transport;
pub mod ui;
pub mod user;
pub mod xml;

pub use api::{Endpoint, GoodreadsClient};
pub use author::{Author, AuthorField};
pub use book::{Book, BookField};
pub use config::ApiConfig;
pub use entity::{expand_list, Entity, EntityId, EntityRecord, FieldKey};
pub use error::{GoodreadsError, Result};
pub use shelf::{Shelf, ShelfField};
pub use user::{User, UserField};
pub use xml::Element;
