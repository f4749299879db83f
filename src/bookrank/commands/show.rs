use crate::commands::{BookDetail, CmdMessage, CmdResult};
use crate::error::Result;
use crate::metrics;
use crate::store::DataSource;

use super::helpers::books_or_empty;

/// Looks up a single book by id. An unknown id is reported, not an error.
pub fn run<S: DataSource>(source: &S, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let books = books_or_empty(source, &mut result);
    if result.unavailable {
        return Ok(result);
    }

    match books.into_iter().find(|b| b.id == id) {
        Some(book) => {
            let score = metrics::score(&book);
            Ok(result.with_book(BookDetail { book, score }))
        }
        None => {
            result.add_message(CmdMessage::warning(format!("Book not found: {}", id)));
            result.add_message(CmdMessage::info("Back to the ranking: bookrank list"));
            Ok(result)
        }
    }
}
