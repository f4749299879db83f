use crate::commands::{CmdMessage, CmdResult, Facets};
use crate::engine;
use crate::error::Result;
use crate::metrics;
use crate::store::DataSource;
use crate::view_state::ViewState;

use super::helpers::books_or_empty;

pub fn run<S: DataSource>(source: &S, state: &ViewState) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let books = books_or_empty(source, &mut result);

    let listing = engine::render(&books, state);
    let facets = Facets {
        years: metrics::years_covered(&books),
        channels: metrics::channels_covered(&books),
    };

    if !result.unavailable && listing.items.is_empty() && listing.total_matched > 0 {
        result.add_message(CmdMessage::info(format!(
            "Page {} is past the end ({} pages).",
            listing.page,
            listing.total_pages()
        )));
    }

    Ok(result
        .with_summary(metrics::summary(&books))
        .with_facets(facets)
        .with_listing(listing)
        .with_state(state.clone()))
}
