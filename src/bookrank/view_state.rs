//! # View State
//!
//! Everything that drives a listing (sort, text query, year, channel, page)
//! lives in one immutable [`ViewState`] value, and the URL query string is its
//! only persisted form. A listing is always rendered from a freshly decoded
//! state; any interaction builds a new state and encodes it back.
//!
//! ## Query String Format
//!
//! ```text
//! ?sort=<point|count|views|likes>&page=<n>&q=<text>&year=<yyyy>&channel=<name>
//! ```
//!
//! Keys are written in that order and only when they differ from the default,
//! so the unfiltered first page encodes to an empty string. Decoding never
//! fails: anything unrecognised falls back to its default.
//!
//! ## Transitions
//!
//! Changing the sort, query, year or channel goes back to page 1; only
//! [`ViewState::with_page`] keeps the rest of the state as it is.

use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Point,
    Count,
    Views,
    Likes,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Point,
        SortMode::Count,
        SortMode::Views,
        SortMode::Likes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Point => "point",
            SortMode::Count => "count",
            SortMode::Views => "views",
            SortMode::Likes => "likes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Point => "By points",
            SortMode::Count => "By mentions",
            SortMode::Views => "By views",
            SortMode::Likes => "By likes",
        }
    }

    pub fn parse(s: &str) -> Option<SortMode> {
        SortMode::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub sort: SortMode,
    pub query: String,
    pub year: Option<i32>,
    pub channel: Option<String>,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort: SortMode::default(),
            query: String::new(),
            year: None,
            channel: None,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn with_sort(self, sort: SortMode) -> Self {
        Self {
            sort,
            page: 1,
            ..self
        }
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_year(self, year: Option<i32>) -> Self {
        Self {
            year,
            page: 1,
            ..self
        }
    }

    pub fn with_channel(self, channel: Option<String>) -> Self {
        Self {
            channel: channel.filter(|c| !c.is_empty()),
            page: 1,
            ..self
        }
    }

    pub fn with_page(self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn is_default(&self) -> bool {
        *self == ViewState::default()
    }

    pub fn has_filters(&self) -> bool {
        self.year.is_some() || self.channel.is_some()
    }

    /// Query string without the leading `?`; empty for the default state.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if self.sort != SortMode::default() {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }
        if self.page != 1 {
            pairs.push(("page", self.page.to_string()));
        }
        if !self.query.is_empty() {
            pairs.push(("q", urlencoding::encode(&self.query).into_owned()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(channel) = &self.channel {
            pairs.push(("channel", urlencoding::encode(channel).into_owned()));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decodes a query string, with or without its leading `?`.
    pub fn decode(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut sort = None;
        let mut page = None;
        let mut text = None;
        let mut year = None;
        let mut channel = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw);
            // First occurrence wins, as with URLSearchParams::get
            match key {
                "sort" if sort.is_none() => sort = Some(value),
                "page" if page.is_none() => page = Some(value),
                "q" if text.is_none() => text = Some(value),
                "year" if year.is_none() => year = Some(value),
                "channel" if channel.is_none() => channel = Some(value),
                _ => {}
            }
        }

        ViewState {
            sort: sort
                .as_deref()
                .and_then(SortMode::parse)
                .unwrap_or_default(),
            query: text.unwrap_or_default(),
            year: year.and_then(|y| y.parse().ok()),
            channel: channel.filter(|c| !c.is_empty()),
            page: page
                .and_then(|p| p.parse::<usize>().ok())
                .filter(|&p| p >= 1)
                .unwrap_or(1),
        }
    }

    /// `path` followed by the encoded state, or `path` alone for the default state.
    pub fn href(&self, path: &str) -> String {
        let query = self.encode();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

impl FromStr for ViewState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ViewState::decode(s))
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
