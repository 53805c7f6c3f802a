// Authors: looked up at `author/show/<id>`, or built from inline entries of
// a book's authors or a user's favorite authors.

use crate::api::Endpoint;
use crate::book::Book;
use crate::entity::{field_table, Entity, EntityId, EntityRecord, FieldKey};
use crate::error::Result;

field_table! {
    /// Fields of an `author/show` payload.
    AuthorField {
        Name => "name",
        FansCount => "fans_count",
        About => "about",
        Influences => "influences",
        WorksCount => "works_count",
        Gender => "gender",
        Hometown => "hometown",
        BornAt => "born_at",
        DiedAt => "died_at",
        Books => "books",
    }
}

#[derive(Debug)]
pub struct Author {
    record: EntityRecord,
}

impl Entity for Author {
    type Field = AuthorField;
    const KIND: &'static str = "author";

    fn endpoint_for(id: &EntityId) -> Option<Endpoint> {
        Some(Endpoint::path(["author", "show", id.as_str()]))
    }

    fn from_record(record: EntityRecord) -> Self {
        Author { record }
    }

    fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl Author {
    pub fn name(&self) -> Result<String> {
        self.text(AuthorField::Name)
    }

    pub fn fans_count(&self) -> Result<String> {
        self.text(AuthorField::FansCount)
    }

    pub fn about(&self) -> Result<String> {
        self.text(AuthorField::About)
    }

    pub fn influences(&self) -> Result<String> {
        self.text(AuthorField::Influences)
    }

    pub fn works_count(&self) -> Result<String> {
        self.text(AuthorField::WorksCount)
    }

    pub fn gender(&self) -> Result<String> {
        self.text(AuthorField::Gender)
    }

    pub fn hometown(&self) -> Result<String> {
        self.text(AuthorField::Hometown)
    }

    pub fn born_at(&self) -> Result<String> {
        self.text(AuthorField::BornAt)
    }

    pub fn died_at(&self) -> Result<String> {
        self.text(AuthorField::DiedAt)
    }

    /// Books listed on the author's page, built from their inline entries.
    pub fn books(&self) -> Result<Vec<Book>> {
        self.record.expand(AuthorField::Books.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_match_wire_names() {
        assert_eq!(AuthorField::FansCount.key(), "fans_count");
        assert_eq!(AuthorField::BornAt.key(), "born_at");
    }

    #[test]
    fn endpoint_uses_author_show() {
        let id = EntityId::from(18541u64);
        assert_eq!(
            Author::endpoint_for(&id),
            Some(Endpoint::path(["author", "show", "18541"]))
        );
    }
}
