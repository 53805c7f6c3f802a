// Reporting helpers: collect the fields a person usually wants to see about
// an author, book or user into a plain struct, then print it as labeled text
// or as JSON. Collecting reads through the lazy accessors, so one report
// costs one request for the root entity plus whatever its list entries lack.

use crate::author::Author;
use crate::book::Book;
use crate::entity::Entity;
use crate::error::Result;
use crate::user::User;
use serde::Serialize;
use std::io::{self, Write};

/// Title and ISBN of a listed book.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BookLine {
    pub id: String,
    pub title: String,
    pub isbn: String,
}

impl BookLine {
    fn collect(book: &Book) -> Result<Self> {
        Ok(BookLine {
            id: book.identifier().to_string(),
            title: book.title()?,
            isbn: book.isbn()?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorReport {
    pub id: String,
    pub name: String,
    pub fans: String,
    pub about: String,
    pub influences: String,
    pub works: String,
    pub gender: String,
    pub hometown: String,
    pub born: String,
    pub died: String,
    pub books: Vec<BookLine>,
}

impl AuthorReport {
    pub fn collect(author: &Author) -> Result<Self> {
        let books = author
            .books()?
            .iter()
            .map(BookLine::collect)
            .collect::<Result<Vec<_>>>()?;
        Ok(AuthorReport {
            id: author.identifier().to_string(),
            name: author.name()?,
            fans: author.fans_count()?,
            about: author.about()?,
            influences: author.influences()?,
            works: author.works_count()?,
            gender: author.gender()?,
            hometown: author.hometown()?,
            born: author.born_at()?,
            died: author.died_at()?,
            books,
        })
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Name: {}", self.name)?;
        writeln!(out, "No. of Fans: {}", self.fans)?;
        writeln!(out, "About: {}", self.about)?;
        writeln!(out, "Influences: {}", self.influences)?;
        writeln!(out, "No. of Works: {}", self.works)?;
        writeln!(out, "Gender: {}", self.gender)?;
        writeln!(out, "Hometown: {}", self.hometown)?;
        writeln!(out, "Birth: {}", self.born)?;
        writeln!(out, "Died: {}", self.died)?;
        writeln!(out, "Some of their books:")?;
        for book in &self.books {
            writeln!(out, "    {}: {}", book.title, book.isbn)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BookReport {
    pub id: String,
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub year: String,
    pub average_rating: String,
    pub authors: Vec<String>,
}

impl BookReport {
    pub fn collect(book: &Book) -> Result<Self> {
        let authors = book
            .authors()?
            .iter()
            .map(Author::name)
            .collect::<Result<Vec<_>>>()?;
        Ok(BookReport {
            id: book.identifier().to_string(),
            title: book.title()?,
            isbn: book.isbn()?,
            publisher: book.publisher()?,
            year: book.publication_year()?,
            average_rating: book.average_rating()?,
            authors,
        })
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Title: {}", self.title)?;
        writeln!(out, "ISBN: {}", self.isbn)?;
        writeln!(out, "Publisher: {}", self.publisher)?;
        writeln!(out, "Year: {}", self.year)?;
        writeln!(out, "Average Rating: {}", self.average_rating)?;
        writeln!(out, "Authors: {}", self.authors.join(", "))?;
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserReport {
    pub id: String,
    pub name: String,
    pub user_name: String,
    pub location: String,
    pub joined: String,
    pub friends: String,
    pub favorite_books: Vec<String>,
    pub shelves: Vec<String>,
}

impl UserReport {
    pub fn collect(user: &User) -> Result<Self> {
        let favorite_books = user
            .favorite_books()?
            .iter()
            .map(Book::title)
            .collect::<Result<Vec<_>>>()?;
        let shelves = user
            .user_shelves()?
            .iter()
            .map(|s| s.name())
            .collect::<Result<Vec<_>>>()?;
        Ok(UserReport {
            id: user.identifier().to_string(),
            name: user.name()?,
            user_name: user.user_name()?,
            location: user.location()?,
            joined: user.joined()?,
            friends: user.friends_count()?,
            favorite_books,
            shelves,
        })
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Name: {}", self.name)?;
        writeln!(out, "User Name: {}", self.user_name)?;
        writeln!(out, "Location: {}", self.location)?;
        writeln!(out, "Joined: {}", self.joined)?;
        writeln!(out, "Friends: {}", self.friends)?;
        writeln!(out, "Favorite books:")?;
        for title in &self.favorite_books {
            writeln!(out, "    {title}")?;
        }
        writeln!(out, "Shelves: {}", self.shelves.join(", "))?;
        Ok(())
    }
}

/// Pretty JSON rendering of any report.
pub fn write_json<W: Write, R: Serialize>(report: &R, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
