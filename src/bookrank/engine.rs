//! # Listing Engine
//!
//! Turns the full book collection plus a [`ViewState`] into the page to show.
//! [`render`] is a pure function: it keeps nothing between calls and never
//! touches the input collection.
//!
//! ## Pipeline
//!
//! ```text
//! all books
//!   │ 1. year filter     narrow appearances to the year, drop empty books
//!   │ 2. channel filter  narrow appearances to the channel, drop empty books
//!   │ 3. sort            stable, descending on the selected key
//!   │ 4. text filter     title or author, case-insensitive
//!   │ 5. paginate        PAGE_SIZE per page, 1-based
//!   ▼
//! Listing
//! ```
//!
//! Narrowing yields new [`Book`] values with recomputed aggregates, so a book
//! filtered to 2023 reports only its 2023 mentions, views and likes. The text
//! filter runs after sorting and keeps the relative order of the matches.

use crate::metrics;
use crate::model::Book;
use crate::view_state::{SortMode, ViewState};
use log::debug;
use serde::Serialize;
use std::cmp::Reverse;

pub const PAGE_SIZE: usize = 20;

/// Pages shown in full before the pagination control starts eliding.
const MAX_FULL_WINDOW: usize = 7;

/// One page of a filtered, sorted listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<Book>,
    /// Books left after every filter, before slicing.
    pub total_matched: usize,
    pub page: usize,
    /// Position of the first item in the full result (0-based).
    pub offset: usize,
}

impl Listing {
    pub fn total_pages(&self) -> usize {
        self.total_matched.div_ceil(PAGE_SIZE)
    }

    /// 1-based rank of each item on this page.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &Book)> {
        self.items
            .iter()
            .enumerate()
            .map(move |(i, book)| (self.offset + i + 1, book))
    }

    pub fn window(&self) -> Vec<PageLink> {
        page_window(self.page, self.total_pages())
    }
}

pub fn render(all_books: &[Book], state: &ViewState) -> Listing {
    let narrowed = narrow(all_books, state.year, state.channel.as_deref());
    let sorted = sort_books(narrowed, state.sort);
    let matched = filter_text(sorted, &state.query);

    let total_matched = matched.len();
    let page = state.page.max(1);
    let offset = (page - 1).saturating_mul(PAGE_SIZE);
    let items: Vec<Book> = matched.into_iter().skip(offset).take(PAGE_SIZE).collect();

    debug!(
        "rendered listing: {} of {} books matched, page {} holds {}",
        total_matched,
        all_books.len(),
        page,
        items.len()
    );

    Listing {
        items,
        total_matched,
        page,
        offset,
    }
}

/// Applies the year filter, then the channel filter.
pub fn narrow(books: &[Book], year: Option<i32>, channel: Option<&str>) -> Vec<Book> {
    let by_year: Vec<Book> = match year {
        Some(year) => filter_by_year(books, year),
        None => books.to_vec(),
    };
    match channel {
        Some(channel) => filter_by_channel(&by_year, channel),
        None => by_year,
    }
}

pub fn filter_by_year(books: &[Book], year: i32) -> Vec<Book> {
    books
        .iter()
        .filter_map(|b| b.narrowed(|a| a.published_year() == Some(year)))
        .collect()
}

/// Exact, case-sensitive match on the channel name.
pub fn filter_by_channel(books: &[Book], channel: &str) -> Vec<Book> {
    books
        .iter()
        .filter_map(|b| b.narrowed(|a| a.channel == channel))
        .collect()
}

/// Stable descending sort; equal keys keep their input order.
pub fn sort_books(mut books: Vec<Book>, mode: SortMode) -> Vec<Book> {
    match mode {
        SortMode::Point => books.sort_by_cached_key(|b| Reverse(metrics::score(b).points)),
        SortMode::Count => books.sort_by_key(|b| Reverse(b.count)),
        SortMode::Views => books.sort_by_key(|b| Reverse(b.total_views)),
        SortMode::Likes => books.sort_by_key(|b| Reverse(b.total_likes)),
    }
    books
}

pub fn filter_text(books: Vec<Book>, query: &str) -> Vec<Book> {
    if query.is_empty() {
        return books;
    }
    let needle = query.to_lowercase();
    books.into_iter().filter(|b| b.matches_text(&needle)).collect()
}

/// An entry in the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Page numbers to offer around `current`.
///
/// Up to seven pages are listed in full. Beyond that the first and last page
/// are always present, the neighbours of `current` are listed, and a gap marks
/// each elided run.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    if total <= MAX_FULL_WINDOW {
        return (1..=total).map(PageLink::Page).collect();
    }

    let mut links = vec![PageLink::Page(1)];
    if current > 3 {
        links.push(PageLink::Gap);
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    links.extend((start..=end).map(PageLink::Page));

    if current + 2 < total {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Page(total));
    links
}
