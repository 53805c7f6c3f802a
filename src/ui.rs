// UI layer: a simple interactive menu using `dialoguer`.
// Each lookup asks for an id and an output format, collects the report
// behind a spinner and prints it. Lookup errors are shown and the loop
// continues; only terminal I/O errors end it.

use crate::author::Author;
use crate::book::Book;
use crate::entity::Entity;
use crate::report::{write_json, AuthorReport, BookReport, UserReport};
use crate::user::User;
use crate::GoodreadsClient;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Entity kinds that can be looked up from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Author,
    Book,
    User,
}

/// Look up `id` as `kind` and collect its report.
pub fn collect_report(
    client: &Arc<GoodreadsClient>,
    kind: LookupKind,
    id: &str,
) -> crate::Result<Report> {
    match kind {
        LookupKind::Author => AuthorReport::collect(&Author::lookup(client, id)).map(Report::Author),
        LookupKind::Book => BookReport::collect(&Book::lookup(client, id)).map(Report::Book),
        LookupKind::User => UserReport::collect(&User::lookup(client, id)).map(Report::User),
    }
}

/// A collected report of any kind.
#[derive(Debug)]
pub enum Report {
    Author(AuthorReport),
    Book(BookReport),
    User(UserReport),
}

impl Report {
    pub fn render<W: Write>(&self, format: OutputFormat, out: &mut W) -> io::Result<()> {
        match (self, format) {
            (Report::Author(r), OutputFormat::Text) => r.write_text(out),
            (Report::Book(r), OutputFormat::Text) => r.write_text(out),
            (Report::User(r), OutputFormat::Text) => r.write_text(out),
            (Report::Author(r), OutputFormat::Json) => write_json(r, out),
            (Report::Book(r), OutputFormat::Json) => write_json(r, out),
            (Report::User(r), OutputFormat::Json) => write_json(r, out),
        }
    }
}

/// Main interactive menu. Runs a select loop until the user chooses "Exit".
///
/// `Select::interact()` is keyboard-driven: arrow keys and Enter choose an option.
pub fn main_menu(client: Arc<GoodreadsClient>) -> Result<()> {
    loop {
        let items = vec!["Look up author", "Look up book", "Look up user", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        let kind = match selection {
            0 => LookupKind::Author,
            1 => LookupKind::Book,
            2 => LookupKind::User,
            _ => break,
        };

        let id: String = Input::new().with_prompt("Id").interact_text()?;
        let format = ask_format()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("Fetching...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = collect_report(&client, kind, &id);
        spinner.finish_and_clear();

        match result {
            Ok(report) => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                report.render(format, &mut out)?;
                out.flush()?;
            }
            Err(e) => println!("Lookup failed: {}", e),
        }
    }
    Ok(())
}

fn ask_format() -> Result<OutputFormat> {
    let choices = vec!["Text", "JSON"];
    let format = match Select::new()
        .with_prompt("Output format")
        .items(&choices)
        .default(0)
        .interact()?
    {
        1 => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_switches_on_format() {
        let report = Report::Book(BookReport {
            id: "5".into(),
            title: "Azkaban".into(),
            isbn: "0439655489".into(),
            publisher: "Scholastic".into(),
            year: "2004".into(),
            average_rating: "4.57".into(),
            authors: vec!["J.K. Rowling".into(), "Mary GrandPré".into()],
        });

        let mut text = Vec::new();
        report.render(OutputFormat::Text, &mut text).unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.starts_with("Title: Azkaban\n"));
        assert!(text.contains("Authors: J.K. Rowling, Mary GrandPré\n"));

        let mut json = Vec::new();
        report.render(OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["authors"][1], "Mary GrandPré");
    }
}
