// Lazy entity records.
//
// An `EntityRecord` is the shared state behind every entity kind: its
// identifier, the endpoint it is looked up at, the inline fields it was
// built from and the outcome of its one remote lookup.
//
// Field resolution order:
// 1. inline cache (filled from the parent's XML fragment at construction),
// 2. the memoized lookup, performed on first need and then kept for the
//    lifetime of the record.
//
// A record never issues more than one request. The lookup slot is a `Mutex`
// held across the fetch, so concurrent first accesses on a shared record
// still produce a single request. A failed lookup is memoized too: every
// later access replays the same error.
//
// Payloads are retained until the record is dropped; memory grows with the
// number of distinct entities a run looks at.

use crate::api::{Endpoint, GoodreadsClient};
use crate::error::{GoodreadsError, Result};
use crate::xml::Element;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// Wire key of a field, implemented by each kind's field table.
pub trait FieldKey: Copy {
    fn key(self) -> &'static str;
}

/// Declares a field table enum mapping each variant to its wire key.
macro_rules! field_table {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::entity::FieldKey for $name {
            fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }
    };
}
pub(crate) use field_table;

/// Opaque identifier of an entity, unique per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId(id.trim().to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::from(id.as_str())
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id.to_string())
    }
}

pub struct EntityRecord {
    kind: &'static str,
    id: EntityId,
    endpoint: Option<Endpoint>,
    cache: HashMap<String, Element>,
    lookup: Mutex<Option<Result<Arc<Element>>>>,
    client: Arc<GoodreadsClient>,
}

impl fmt::Debug for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cached: Vec<&str> = self.cache.keys().map(String::as_str).collect();
        cached.sort_unstable();
        f.debug_struct("EntityRecord")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .field("cached", &cached)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl EntityRecord {
    pub fn new(
        client: Arc<GoodreadsClient>,
        kind: &'static str,
        id: EntityId,
        endpoint: Option<Endpoint>,
    ) -> Self {
        EntityRecord {
            kind,
            id,
            endpoint,
            cache: HashMap::new(),
            lookup: Mutex::new(None),
            client,
        }
    }

    /// Seed the inline cache from `fragment`.
    ///
    /// Every child element is cached under its tag; a later duplicate
    /// replaces an earlier one. Attributes are cached as text fields unless a
    /// child of the same name exists.
    pub fn with_fragment(mut self, fragment: &Element) -> Self {
        for child in fragment.children() {
            self.cache.insert(child.name().to_string(), child.clone());
        }
        for (name, value) in fragment.attributes() {
            self.cache
                .entry(name.to_string())
                .or_insert_with(|| Element::text_node(name, value));
        }
        self
    }

    pub fn identifier(&self) -> &EntityId {
        &self.id
    }

    /// Whether `field` was present in the inline fragment.
    pub fn is_cached(&self, field: &str) -> bool {
        self.cache.contains_key(field)
    }

    /// Whether the remote payload has been fetched successfully.
    pub fn is_resolved(&self) -> bool {
        matches!(
            *self.lookup.lock().unwrap_or_else(PoisonError::into_inner),
            Some(Ok(_))
        )
    }

    /// Text of `field`.
    pub fn field_text(&self, field: &str) -> Result<String> {
        self.resolve(field, |el| el.text().to_string())
    }

    /// Raw element of `field`.
    pub fn field_node(&self, field: &str) -> Result<Element> {
        self.resolve(field, Element::clone)
    }

    /// Build one lazy `C` per child of the list element `field`.
    pub fn expand<C: Entity>(&self, field: &str) -> Result<Vec<C>> {
        self.resolve(field, |list| expand_list(&self.client, list))?
    }

    /// Fetched payload, requesting it if this is the first need. The outcome
    /// of that request, success or error, is returned on every later call.
    pub fn payload(&self) -> Result<Arc<Element>> {
        let endpoint = self.endpoint.as_ref().ok_or_else(|| {
            GoodreadsError::Configuration(format!(
                "there is no lookup endpoint for {} {}",
                self.kind, self.id
            ))
        })?;

        let mut slot = self.lookup.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(outcome) = slot.as_ref() {
            return outcome.clone();
        }

        debug!(kind = self.kind, id = %self.id, %endpoint, "fetching entity");
        let outcome = self.client.fetch(endpoint).map(Arc::new);
        *slot = Some(outcome.clone());
        outcome
    }

    fn resolve<T>(&self, field: &str, read: impl FnOnce(&Element) -> T) -> Result<T> {
        if let Some(el) = self.cache.get(field) {
            trace!(kind = self.kind, id = %self.id, field, "inline hit");
            return Ok(read(el));
        }
        let payload = self.payload()?;
        payload
            .child(field)
            .map(read)
            .ok_or_else(|| GoodreadsError::FieldNotFound {
                kind: self.kind,
                id: self.id.to_string(),
                field: field.to_string(),
            })
    }
}

/// A kind of remote entity backed by an [`EntityRecord`].
pub trait Entity: Sized {
    type Field: FieldKey;

    /// Lowercase kind name used in messages and logs.
    const KIND: &'static str;

    /// Key used as identifier when an inline fragment has no `id`.
    const FALLBACK_ID_KEY: Option<&'static str> = None;

    /// Lookup endpoint for `id`, if this kind can be looked up directly.
    fn endpoint_for(id: &EntityId) -> Option<Endpoint>;

    fn from_record(record: EntityRecord) -> Self;

    fn record(&self) -> &EntityRecord;

    /// Root lookup by identifier. Nothing is fetched until a field is read.
    fn lookup(client: &Arc<GoodreadsClient>, id: impl Into<EntityId>) -> Self {
        let id = id.into();
        let endpoint = Self::endpoint_for(&id);
        Self::from_record(EntityRecord::new(Arc::clone(client), Self::KIND, id, endpoint))
    }

    /// Entity whose lookup goes to a complete URL instead of the kind's endpoint.
    fn at_url(client: &Arc<GoodreadsClient>, id: impl Into<EntityId>, url: impl Into<String>) -> Self {
        let endpoint = Some(Endpoint::Url(url.into()));
        Self::from_record(EntityRecord::new(Arc::clone(client), Self::KIND, id.into(), endpoint))
    }

    /// Entity described by an inline fragment of a parent's payload.
    fn from_fragment(client: &Arc<GoodreadsClient>, fragment: &Element) -> Result<Self> {
        let id = fragment_id(fragment, Self::FALLBACK_ID_KEY).ok_or_else(|| {
            GoodreadsError::FieldNotFound {
                kind: Self::KIND,
                id: format!("in <{}>", fragment.name()),
                field: "id".to_string(),
            }
        })?;
        let id = EntityId::from(id);
        let endpoint = Self::endpoint_for(&id);
        let record =
            EntityRecord::new(Arc::clone(client), Self::KIND, id, endpoint).with_fragment(fragment);
        Ok(Self::from_record(record))
    }

    fn identifier(&self) -> &EntityId {
        self.record().identifier()
    }

    fn text(&self, field: Self::Field) -> Result<String> {
        self.record().field_text(field.key())
    }

    fn node(&self, field: Self::Field) -> Result<Element> {
        self.record().field_node(field.key())
    }
}

/// One lazy `C` per child element of `list`, in document order. Issues no requests.
pub fn expand_list<C: Entity>(client: &Arc<GoodreadsClient>, list: &Element) -> Result<Vec<C>> {
    list.children()
        .iter()
        .map(|child| C::from_fragment(client, child))
        .collect()
}

fn fragment_id<'a>(fragment: &'a Element, fallback: Option<&str>) -> Option<&'a str> {
    let read = |key: &str| {
        fragment
            .child_text(key)
            .or_else(|| fragment.attribute(key))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    read("id").or_else(|| fallback.and_then(read))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::Author;
    use crate::book::Book;
    use crate::config::ApiConfig;
    use crate::shelf::Shelf;
    use crate::transport::mock::FixtureTransport;
    use crate::transport::HttpResponse;

    const AUTHOR_URL: &str = "https://www.goodreads.com/author/show/7?key=k";

    fn setup() -> (Arc<FixtureTransport>, Arc<GoodreadsClient>) {
        let transport = Arc::new(FixtureTransport::new());
        let config = ApiConfig::new("https://www.goodreads.com", "k").unwrap();
        let client = Arc::new(GoodreadsClient::with_transport(config, transport.clone()));
        (transport, client)
    }

    fn author_body() -> HttpResponse {
        HttpResponse::ok(
            "<GoodreadsResponse><Request/><author><id>7</id><name>Ann Leckie</name>\
             <gender>female</gender><books><book><id>1</id><title>Ancillary Justice</title></book>\
             <book><id>2</id><title>Ancillary Sword</title></book></books></author></GoodreadsResponse>",
        )
    }

    #[test]
    fn lookup_is_lazy_and_fetches_once() {
        let (transport, client) = setup();
        transport.respond(AUTHOR_URL, author_body());

        let author = Author::lookup(&client, 7u64);
        assert_eq!(transport.calls(), 0);
        assert!(!author.record().is_resolved());

        assert_eq!(author.name().unwrap(), "Ann Leckie");
        assert_eq!(author.gender().unwrap(), "female");
        assert_eq!(author.books().unwrap().len(), 2);
        assert!(author.record().is_resolved());
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn missing_field_after_fetch_is_field_not_found() {
        let (transport, client) = setup();
        transport.respond(AUTHOR_URL, author_body());

        let author = Author::lookup(&client, "7");
        let err = author.hometown().unwrap_err();
        assert_eq!(
            err,
            GoodreadsError::FieldNotFound {
                kind: "author",
                id: "7".into(),
                field: "hometown".into(),
            }
        );
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn failed_fetch_is_memoized() {
        let (transport, client) = setup();
        transport.fail(AUTHOR_URL, "connection reset");

        let author = Author::lookup(&client, 7u64);
        let first = author.name().unwrap_err();
        assert!(matches!(first, GoodreadsError::Transport { .. }));

        transport.respond(AUTHOR_URL, author_body());
        assert_eq!(author.gender().unwrap_err(), first);
        assert_eq!(author.hometown().unwrap_err(), first);
        assert!(!author.record().is_resolved());
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn non_200_lookup_is_requested_once() {
        let (transport, client) = setup();
        transport.respond(
            AUTHOR_URL,
            HttpResponse {
                status: 404,
                body: String::new(),
            },
        );

        let author = Author::lookup(&client, 7u64);
        for _ in 0..3 {
            assert_eq!(author.name().unwrap_err().status(), Some(404));
        }
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn fragment_attributes_fill_cache_and_name_identifies_shelves() {
        let (transport, client) = setup();
        let fragment = Element::parse(r#"<shelf name="to-read" count="4411"/>"#).unwrap();

        let shelf = Shelf::from_fragment(&client, &fragment).unwrap();
        assert_eq!(shelf.identifier().as_str(), "to-read");
        assert_eq!(shelf.name().unwrap(), "to-read");
        assert!(shelf.record().is_cached("count"));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn child_wins_over_attribute_of_same_name() {
        let (_, client) = setup();
        let fragment =
            Element::parse(r#"<book id="attr"><id>9</id><title>T</title></book>"#).unwrap();
        let book = Book::from_fragment(&client, &fragment).unwrap();
        assert_eq!(book.identifier().as_str(), "9");
        assert_eq!(book.record().field_text("id").unwrap(), "9");
    }

    #[test]
    fn fragment_without_identifier_is_rejected() {
        let (_, client) = setup();
        let fragment = Element::parse("<book><title>No id</title></book>").unwrap();
        let err = Book::from_fragment(&client, &fragment).unwrap_err();
        assert!(matches!(err, GoodreadsError::FieldNotFound { field, .. } if field == "id"));
    }

    #[test]
    fn shared_record_fetches_once_across_threads() {
        let (transport, client) = setup();
        transport.respond(AUTHOR_URL, author_body());
        let author = Arc::new(Author::lookup(&client, 7u64));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let author = Arc::clone(&author);
                std::thread::spawn(move || author.name().unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), "Ann Leckie");
        }
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn debug_lists_cached_fields() {
        let (_, client) = setup();
        let fragment = Element::parse("<author><name>N</name><id>3</id></author>").unwrap();
        let author = Author::from_fragment(&client, &fragment).unwrap();
        let shown = format!("{:?}", author.record());
        assert!(shown.contains(r#"cached: ["id", "name"]"#), "{shown}");
        assert!(shown.contains("resolved: false"));
    }
}
