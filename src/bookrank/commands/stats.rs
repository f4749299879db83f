use crate::commands::{CmdResult, Facets};
use crate::error::Result;
use crate::metrics;
use crate::store::DataSource;

use super::helpers::books_or_empty;

pub fn run<S: DataSource>(source: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let books = books_or_empty(source, &mut result);

    let facets = Facets {
        years: metrics::years_covered(&books),
        channels: metrics::channels_covered(&books),
    };
    Ok(result
        .with_summary(metrics::summary(&books))
        .with_facets(facets))
}
