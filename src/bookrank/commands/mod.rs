use crate::engine::Listing;
use crate::metrics::{CatalogSummary, ChannelCount, Score};
use crate::model::{Book, Channel};
use crate::view_state::ViewState;

pub mod channels;
pub mod helpers;
pub mod link;
pub mod list;
pub mod show;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A book as shown on its detail view.
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub score: Score,
}

/// A channel directory entry, joined with the appearances credited to it.
#[derive(Debug, Clone)]
pub struct ChannelEntry {
    pub channel: Channel,
    pub url: String,
    pub appearances: usize,
}

/// Facets offered as filter choices on the listing.
#[derive(Debug, Clone, Default)]
pub struct Facets {
    pub years: Vec<i32>,
    pub channels: Vec<ChannelCount>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub state: Option<ViewState>,
    pub listing: Option<Listing>,
    pub facets: Option<Facets>,
    pub summary: Option<CatalogSummary>,
    pub book: Option<BookDetail>,
    pub channels: Vec<ChannelEntry>,
    pub link: Option<String>,
    /// Set when the dataset could not be loaded and the view is empty.
    pub unavailable: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn with_summary(mut self, summary: CatalogSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_book(mut self, book: BookDetail) -> Self {
        self.book = Some(book);
        self
    }

    pub fn with_channels(mut self, channels: Vec<ChannelEntry>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_link(mut self, link: String) -> Self {
        self.link = Some(link);
        self
    }
}
