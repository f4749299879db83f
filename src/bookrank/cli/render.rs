//! # Rendering Module
//!
//! Turns command results into terminal text through the templates in
//! `templates/` and the named styles of [`BOOKRANK_THEME`].
//!
//! Layout calculations (width, truncation, padding, number grouping) stay in
//! Rust because they need Unicode-aware processing; Japanese titles are two
//! columns per character. Templates only decide what goes on which line and
//! which semantic style it gets.

use super::styles::{BOOKRANK_THEME, names};
use super::templates::{
    BOOK_TEMPLATE, CHANNELS_TEMPLATE, LISTING_TEMPLATE, MESSAGES_TEMPLATE, STATS_TEMPLATE,
};
use bookrank::api::{CmdMessage, MessageLevel};
use bookrank::commands::{BookDetail, ChannelEntry, Facets};
use bookrank::engine::{Listing, PageLink};
use bookrank::metrics::{self, CatalogSummary};
use bookrank::model::Book;
use bookrank::view_state::{SortMode, ViewState};
use chrono::{DateTime, NaiveDateTime, Utc};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
const METRIC_WIDTH: usize = 16;
const CHANNEL_NAME_WIDTH: usize = 28;
const TOP_CHANNELS: usize = 10;

#[derive(Serialize)]
struct ListingRow {
    rank: String,
    title: String,
    padding: String,
    metric: String,
    indent: String,
    detail: String,
}

#[derive(Serialize)]
struct PageCell {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ListingData {
    heading: String,
    filter_line: String,
    empty: bool,
    empty_message: String,
    rows: Vec<ListingRow>,
    pages: Vec<PageCell>,
    position: String,
    year_choices: String,
    share: String,
}

#[derive(Serialize)]
struct AppearanceLine {
    channel: String,
    title: String,
    when: String,
    link: String,
}

#[derive(Serialize)]
struct BookData {
    title: String,
    byline: String,
    score_line: String,
    totals_line: String,
    purchase_url: String,
    appearances: Vec<AppearanceLine>,
}

#[derive(Serialize)]
struct ChannelLine {
    name: String,
    padding: String,
    subscribers: String,
    appearances: String,
    url: String,
    note: String,
}

#[derive(Serialize)]
struct ChannelsData {
    empty: bool,
    channels: Vec<ChannelLine>,
}

#[derive(Serialize)]
struct ChannelCountLine {
    count: String,
    name: String,
}

#[derive(Serialize)]
struct StatsData {
    books: String,
    appearances: String,
    years: String,
    channels: Vec<ChannelCountLine>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

fn render_template<T: Serialize>(
    template: &'static str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    let theme = BOOKRANK_THEME.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });

    env.add_template("view", template)?;
    env.get_template("view")?.render(data)
}

/// Renders one page of the ranking, followed by the shareable query string.
pub fn render_listing(
    listing: &Listing,
    state: &ViewState,
    facets: Option<&Facets>,
    unavailable: bool,
    use_color: bool,
) -> String {
    let last_rank = listing.offset + listing.items.len();
    let rank_width = last_rank.to_string().len().max(2) + 1;

    let rows = listing
        .ranked()
        .map(|(rank, book)| listing_row(rank, book, state.sort, rank_width))
        .collect();

    let empty_message = if unavailable {
        "Nothing to show."
    } else if listing.total_matched == 0 {
        "No books match this view."
    } else {
        "No books on this page."
    };

    let position = if listing.items.is_empty() {
        String::new()
    } else {
        format!(
            "({}-{} of {})",
            listing.offset + 1,
            last_rank,
            group_digits(listing.total_matched as u64)
        )
    };

    let year_choices = match facets {
        Some(facets) if state.year.is_none() => facets
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    };

    let data = ListingData {
        heading: state.sort.label().to_string(),
        filter_line: filter_line(state),
        empty: listing.items.is_empty(),
        empty_message: empty_message.to_string(),
        rows,
        pages: page_cells(listing),
        position,
        year_choices,
        share: format!("?{}", state.encode()),
    };

    render_template(LISTING_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn listing_row(rank: usize, book: &Book, sort: SortMode, rank_width: usize) -> ListingRow {
    let rank = format!("{:>width$}", format!("{}.", rank), width = rank_width);
    let metric = format!("{:>width$}", sort_metric(book, sort), width = METRIC_WIDTH);

    let available = LINE_WIDTH.saturating_sub(rank_width + 1 + METRIC_WIDTH + 1);
    let title = truncate_to_width(&book.title, available);
    let padding = " ".repeat(available.saturating_sub(title.width()) + 1);

    let mut detail = Vec::new();
    if let Some(author) = book.author.as_deref().filter(|a| !a.is_empty()) {
        detail.push(author.to_string());
    }
    detail.push(format!("id {}", book.id));

    ListingRow {
        rank,
        title,
        padding,
        metric,
        indent: " ".repeat(rank_width + 1),
        detail: detail.join(" · "),
    }
}

/// The figure a listing row shows for the active sort.
fn sort_metric(book: &Book, sort: SortMode) -> String {
    match sort {
        SortMode::Point => format!("{} pts", group_digits(metrics::score(book).points)),
        SortMode::Count => plural(book.count, "mention", "mentions"),
        SortMode::Views => format!("{} views", group_digits(book.total_views)),
        SortMode::Likes => format!("{} likes", group_digits(book.total_likes)),
    }
}

fn filter_line(state: &ViewState) -> String {
    let mut parts = Vec::new();
    if !state.query.is_empty() {
        parts.push(format!("matching \"{}\"", state.query));
    }
    if let Some(year) = state.year {
        parts.push(format!("in {}", year));
    }
    if let Some(channel) = &state.channel {
        parts.push(format!("on {}", channel));
    }
    parts.join(", ")
}

fn page_cells(listing: &Listing) -> Vec<PageCell> {
    listing
        .window()
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == listing.page => PageCell {
                label: format!("[{}]", n),
                style: names::CURRENT_PAGE,
            },
            PageLink::Page(n) => PageCell {
                label: n.to_string(),
                style: names::PAGE,
            },
            PageLink::Gap => PageCell {
                label: "…".to_string(),
                style: names::MUTED,
            },
        })
        .collect()
}

/// Renders a book with its score and every appearance.
pub fn render_book(detail: &BookDetail, use_color: bool) -> String {
    render_book_at(detail, Utc::now(), use_color)
}

fn render_book_at(detail: &BookDetail, now: DateTime<Utc>, use_color: bool) -> String {
    let book = &detail.book;

    let byline = [
        book.author.as_deref(),
        book.publisher.as_deref(),
        book.publication_date.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" · ");

    let score_line = format!(
        "{} pts from {}",
        group_digits(detail.score.points),
        plural(detail.score.channels as u64, "channel", "channels")
    );
    let totals_line = format!(
        "{} · {} views · {} likes",
        plural(book.count, "mention", "mentions"),
        group_digits(book.total_views),
        group_digits(book.total_likes)
    );

    let appearances = book
        .appearances
        .iter()
        .map(|a| AppearanceLine {
            channel: a.channel.clone(),
            title: a.title.clone(),
            when: match a.published_at() {
                Some(at) => format!("{} ({})", at.format("%Y-%m-%d"), format_time_ago(at, now)),
                None => "date unknown".to_string(),
            },
            link: a.link.clone(),
        })
        .collect();

    let data = BookData {
        title: book.title.clone(),
        byline,
        score_line,
        totals_line,
        purchase_url: book.purchase_url.clone(),
        appearances,
    };

    render_template(BOOK_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders the channel directory.
pub fn render_channels(entries: &[ChannelEntry], use_color: bool) -> String {
    let channels = entries
        .iter()
        .map(|entry| {
            let name = truncate_to_width(&entry.channel.name, CHANNEL_NAME_WIDTH);
            let padding = " ".repeat(CHANNEL_NAME_WIDTH.saturating_sub(name.width()) + 2);
            ChannelLine {
                name,
                padding,
                subscribers: entry.channel.subscribers.clone(),
                appearances: plural(entry.appearances as u64, "mention", "mentions"),
                url: entry.url.clone(),
                note: entry.channel.note.clone().unwrap_or_default(),
            }
        })
        .collect();

    let data = ChannelsData {
        empty: entries.is_empty(),
        channels,
    };

    render_template(CHANNELS_TEMPLATE, &data, use_color)
        .unwrap_or_else(|_| "No channels to show.\n".to_string())
}

/// Renders catalogue totals, covered years and the most active channels.
pub fn render_stats(summary: &CatalogSummary, facets: &Facets, use_color: bool) -> String {
    let count_width = facets
        .channels
        .first()
        .map(|c| c.count.to_string().len())
        .unwrap_or(1);

    let data = StatsData {
        books: group_digits(summary.books as u64),
        appearances: group_digits(summary.appearances as u64),
        years: facets
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        channels: facets
            .channels
            .iter()
            .take(TOP_CHANNELS)
            .map(|c| ChannelCountLine {
                count: format!("{:>width$}", c.count, width = count_width),
                name: c.name.clone(),
            })
            .collect(),
    };

    render_template(STATS_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders command messages, one per line, styled by level.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_template(MESSAGES_TEMPLATE, &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// `1234567` as `1,234,567`.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", group_digits(n), many)
    }
}

fn format_time_ago(at: NaiveDateTime, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(at.and_utc());
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
