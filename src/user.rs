// Users: looked up at `user/show/<id>`. Their favorites and shelves come
// back inline and expand without further requests.

use crate::api::Endpoint;
use crate::author::Author;
use crate::book::Book;
use crate::entity::{field_table, Entity, EntityId, EntityRecord, FieldKey};
use crate::error::Result;
use crate::shelf::Shelf;

field_table! {
    /// Fields of a `user/show` payload.
    UserField {
        Name => "name",
        UserName => "user_name",
        About => "about",
        Age => "age",
        Gender => "gender",
        Location => "location",
        Website => "website",
        Joined => "joined",
        LastActive => "last_active",
        Interests => "interests",
        FavoriteAuthors => "favorite_authors",
        FavoriteBooks => "favorite_books",
        FriendsCount => "friends_count",
        UserShelves => "user_shelves",
    }
}

#[derive(Debug)]
pub struct User {
    record: EntityRecord,
}

impl Entity for User {
    type Field = UserField;
    const KIND: &'static str = "user";

    fn endpoint_for(id: &EntityId) -> Option<Endpoint> {
        Some(Endpoint::path(["user", "show", id.as_str()]))
    }

    fn from_record(record: EntityRecord) -> Self {
        User { record }
    }

    fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl User {
    pub fn name(&self) -> Result<String> {
        self.text(UserField::Name)
    }

    pub fn user_name(&self) -> Result<String> {
        self.text(UserField::UserName)
    }

    pub fn about(&self) -> Result<String> {
        self.text(UserField::About)
    }

    pub fn age(&self) -> Result<String> {
        self.text(UserField::Age)
    }

    pub fn gender(&self) -> Result<String> {
        self.text(UserField::Gender)
    }

    pub fn location(&self) -> Result<String> {
        self.text(UserField::Location)
    }

    pub fn website(&self) -> Result<String> {
        self.text(UserField::Website)
    }

    pub fn joined(&self) -> Result<String> {
        self.text(UserField::Joined)
    }

    pub fn last_active(&self) -> Result<String> {
        self.text(UserField::LastActive)
    }

    pub fn interests(&self) -> Result<String> {
        self.text(UserField::Interests)
    }

    pub fn favorite_authors(&self) -> Result<Vec<Author>> {
        self.record.expand(UserField::FavoriteAuthors.key())
    }

    pub fn favorite_books(&self) -> Result<Vec<Book>> {
        self.record.expand(UserField::FavoriteBooks.key())
    }

    pub fn friends_count(&self) -> Result<String> {
        self.text(UserField::FriendsCount)
    }

    pub fn user_shelves(&self) -> Result<Vec<Shelf>> {
        self.record.expand(UserField::UserShelves.key())
    }
}
