// Shelves have no lookup endpoint of their own: they only exist as inline
// entries of a book's popular shelves or a user's shelves. Reading a field
// the inline entry lacks fails with a configuration error.

use crate::api::Endpoint;
use crate::entity::{field_table, Entity, EntityId, EntityRecord};
use crate::error::Result;

field_table! {
    ShelfField {
        Name => "name",
        BookCount => "book_count",
        ExclusiveFlag => "exclusive_flag",
        Description => "description",
    }
}

#[derive(Debug)]
pub struct Shelf {
    record: EntityRecord,
}

impl Entity for Shelf {
    type Field = ShelfField;
    const KIND: &'static str = "shelf";
    // popular_shelves entries carry only name and count attributes
    const FALLBACK_ID_KEY: Option<&'static str> = Some("name");

    fn endpoint_for(_id: &EntityId) -> Option<Endpoint> {
        None
    }

    fn from_record(record: EntityRecord) -> Self {
        Shelf { record }
    }

    fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl Shelf {
    pub fn name(&self) -> Result<String> {
        self.text(ShelfField::Name)
    }

    pub fn book_count(&self) -> Result<String> {
        self.text(ShelfField::BookCount)
    }

    pub fn exclusive_flag(&self) -> Result<String> {
        self.text(ShelfField::ExclusiveFlag)
    }

    pub fn description(&self) -> Result<String> {
        self.text(ShelfField::Description)
    }
}
