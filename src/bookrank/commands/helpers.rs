use crate::commands::{CmdMessage, CmdResult};
use crate::error::CatalogError;
use crate::model::{Book, Channel};
use crate::store::DataSource;
use log::error;

const UNAVAILABLE: &str = "The catalogue is unavailable right now.";

/// Loads the books, degrading to an empty collection when the dataset can't
/// be read. The failure is logged and flagged on `result`.
pub fn books_or_empty<S: DataSource>(source: &S, result: &mut CmdResult) -> Vec<Book> {
    match source.load_books() {
        Ok(books) => books,
        Err(e) => {
            degrade(result, &e);
            Vec::new()
        }
    }
}

pub fn channels_or_empty<S: DataSource>(source: &S, result: &mut CmdResult) -> Vec<Channel> {
    match source.load_channels() {
        Ok(channels) => channels,
        Err(e) => {
            degrade(result, &e);
            Vec::new()
        }
    }
}

fn degrade(result: &mut CmdResult, e: &CatalogError) {
    error!("failed to load dataset: {}", e);
    if !result.unavailable {
        result.unavailable = true;
        result.add_message(CmdMessage::warning(UNAVAILABLE));
    }
}
