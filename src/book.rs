// Books: looked up at `book/show/<id>`, or built from inline entries of an
// author's books, a user's favorites or another book's similar books.

use crate::api::Endpoint;
use crate::author::Author;
use crate::entity::{field_table, Entity, EntityId, EntityRecord, FieldKey};
use crate::error::Result;
use crate::shelf::Shelf;

field_table! {
    /// Fields of a `book/show` payload.
    BookField {
        Title => "title",
        Isbn => "isbn",
        CountryCode => "country_code",
        PublicationYear => "publication_year",
        PublicationMonth => "publication_month",
        PublicationDay => "publication_day",
        Publisher => "publisher",
        LanguageCode => "language_code",
        Description => "description",
        AverageRating => "average_rating",
        NumPages => "num_pages",
        Format => "format",
        EditionInformation => "edition_information",
        RatingsCount => "ratings_count",
        TextReviewsCount => "text_reviews_count",
        Url => "url",
        Authors => "authors",
        PopularShelves => "popular_shelves",
        SimilarBooks => "similar_books",
    }
}

#[derive(Debug)]
pub struct Book {
    record: EntityRecord,
}

impl Entity for Book {
    type Field = BookField;
    const KIND: &'static str = "book";

    fn endpoint_for(id: &EntityId) -> Option<Endpoint> {
        Some(Endpoint::path(["book", "show", id.as_str()]))
    }

    fn from_record(record: EntityRecord) -> Self {
        Book { record }
    }

    fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl Book {
    pub fn title(&self) -> Result<String> {
        self.text(BookField::Title)
    }

    pub fn isbn(&self) -> Result<String> {
        self.text(BookField::Isbn)
    }

    pub fn country_code(&self) -> Result<String> {
        self.text(BookField::CountryCode)
    }

    pub fn publication_year(&self) -> Result<String> {
        self.text(BookField::PublicationYear)
    }

    pub fn publication_month(&self) -> Result<String> {
        self.text(BookField::PublicationMonth)
    }

    pub fn publication_day(&self) -> Result<String> {
        self.text(BookField::PublicationDay)
    }

    pub fn publisher(&self) -> Result<String> {
        self.text(BookField::Publisher)
    }

    pub fn language_code(&self) -> Result<String> {
        self.text(BookField::LanguageCode)
    }

    pub fn description(&self) -> Result<String> {
        self.text(BookField::Description)
    }

    pub fn average_rating(&self) -> Result<String> {
        self.text(BookField::AverageRating)
    }

    pub fn num_pages(&self) -> Result<String> {
        self.text(BookField::NumPages)
    }

    pub fn format(&self) -> Result<String> {
        self.text(BookField::Format)
    }

    pub fn edition_information(&self) -> Result<String> {
        self.text(BookField::EditionInformation)
    }

    pub fn ratings_count(&self) -> Result<String> {
        self.text(BookField::RatingsCount)
    }

    pub fn text_reviews_count(&self) -> Result<String> {
        self.text(BookField::TextReviewsCount)
    }

    /// Goodreads web page of the book.
    pub fn url(&self) -> Result<String> {
        self.text(BookField::Url)
    }

    pub fn authors(&self) -> Result<Vec<Author>> {
        self.record.expand(BookField::Authors.key())
    }

    /// Shelves readers most often put this book on.
    pub fn popular_shelves(&self) -> Result<Vec<Shelf>> {
        self.record.expand(BookField::PopularShelves.key())
    }

    pub fn similar_books(&self) -> Result<Vec<Book>> {
        self.record.expand(BookField::SimilarBooks.key())
    }
}
