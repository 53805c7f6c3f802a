mod common;

use common::{setup, url};
use goodreads_cli::report::{AuthorReport, BookReport, UserReport};
use goodreads_cli::ui::{collect_report, LookupKind, OutputFormat, Report};
use goodreads_cli::{Author, Entity};

#[test]
fn author_report_reads_books_inline() {
    let (transport, client) = setup();
    let report = AuthorReport::collect(&Author::lookup(&client, 1u64)).unwrap();

    assert_eq!(report.name, "Ursula K. Le Guin");
    assert_eq!(report.died, "2018/01/22");
    assert_eq!(report.books.len(), 3);
    assert_eq!(report.books[1].isbn, "0441478123");
    assert_eq!(transport.requested(), vec![url("author/show/1")]);

    let mut out = Vec::new();
    report.write_text(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Name: Ursula K. Le Guin\nNo. of Fans: 21754\n"));
    assert!(text.contains("    The Dispossessed: 0060512753\n"));
}

#[test]
fn book_and_user_reports_through_menu_dispatch() {
    let (transport, client) = setup();

    let book = match collect_report(&client, LookupKind::Book, "13642").unwrap() {
        Report::Book(r) => r,
        other => panic!("unexpected report: {other:?}"),
    };
    assert_eq!(
        book,
        BookReport {
            id: "13642".into(),
            title: "A Wizard of Earthsea (Earthsea Cycle, #1)".into(),
            isbn: "0553383043".into(),
            publisher: "Bantam".into(),
            year: "2004".into(),
            average_rating: "4.00".into(),
            authors: vec!["Ursula K. Le Guin".into(), "Ruth Robbins".into()],
        }
    );

    let report = collect_report(&client, LookupKind::User, "42").unwrap();
    let mut out = Vec::new();
    report.render(OutputFormat::Json, &mut out).unwrap();
    let user: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(user["user_name"], "adareads");
    assert_eq!(user["shelves"][2], "sci-fi");
    assert_eq!(user["favorite_books"][0], "The Left Hand of Darkness");

    assert_eq!(transport.calls(), 2);
}

#[test]
fn failed_lookup_reports_error() {
    let (_, client) = setup();
    let err = collect_report(&client, LookupKind::Author, "999").unwrap_err();
    assert_eq!(err.status(), Some(404));

    let user = goodreads_cli::User::lookup(&client, 42u64);
    let report = UserReport::collect(&user).unwrap();
    assert_eq!(report.friends, "57");
}
