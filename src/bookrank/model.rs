use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One mention of a book in a creator's video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(default)]
    pub video_id: String,
    #[serde(rename = "video_title", default)]
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub link: String,
    // Kept as text: the dataset is not strict about the format.
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
}

impl Appearance {
    /// Publish timestamp, if it parses.
    ///
    /// Accepts RFC 3339 (`2023-04-01T09:30:00Z`), a bare local datetime
    /// (`2023-04-01T09:30:00` or with a space separator) and a plain date.
    /// Offsets are normalised to UTC.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        let raw = self.published.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn published_year(&self) -> Option<i32> {
        self.published_at().map(|dt| dt.year())
    }
}

/// A catalogued title together with every appearance recorded for it.
///
/// `count`, `total_views` and `total_likes` come precomputed in the dataset.
/// Narrowing a book to a subset of its appearances (see [`Book::narrowed`])
/// produces a new value whose aggregates describe that subset only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(rename = "amazon_url", default)]
    pub purchase_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(rename = "videos", default)]
    pub appearances: Vec<Appearance>,
}

impl Book {
    /// Returns a copy holding only the appearances accepted by `keep`, with the
    /// aggregates recomputed from them. `None` when nothing is left.
    pub fn narrowed<F>(&self, mut keep: F) -> Option<Book>
    where
        F: FnMut(&Appearance) -> bool,
    {
        let appearances: Vec<Appearance> = self
            .appearances
            .iter()
            .filter(|a| keep(a))
            .cloned()
            .collect();
        if appearances.is_empty() {
            return None;
        }

        Some(Book {
            count: appearances.len() as u64,
            total_views: appearances.iter().map(|a| a.view_count).sum(),
            total_likes: appearances.iter().map(|a| a.like_count).sum(),
            appearances,
            ..self.clone_header()
        })
    }

    fn clone_header(&self) -> Book {
        Book {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            purchase_url: self.purchase_url.clone(),
            image_url: self.image_url.clone(),
            publication_date: self.publication_date.clone(),
            isbn: self.isbn.clone(),
            count: 0,
            total_views: 0,
            total_likes: 0,
            appearances: Vec::new(),
        }
    }

    /// Case-insensitive substring match on the title or, when present, the author.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .author
                .as_deref()
                .is_some_and(|author| author.to_lowercase().contains(needle_lower))
    }
}

/// A content creator listed in the channel directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub channel_id: String,
    /// Display text such as "12.3万人"; never parsed.
    #[serde(default)]
    pub subscribers: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn appearance(channel: &str, published: &str, views: u64, likes: u64) -> Appearance {
        Appearance {
            video_id: format!("{}-{}", channel, published),
            title: format!("{} review", channel),
            channel: channel.to_string(),
            link: "https://www.youtube.com/watch?v=x".to_string(),
            published: published.to_string(),
            view_count: views,
            like_count: likes,
        }
    }

    /// Builds a book whose aggregates are consistent with its appearances.
    pub fn book(id: &str, title: &str, appearances: Vec<Appearance>) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: None,
            publisher: None,
            purchase_url: format!("https://www.amazon.co.jp/dp/{}", id),
            image_url: None,
            publication_date: None,
            isbn: None,
            count: appearances.len() as u64,
            total_views: appearances.iter().map(|a| a.view_count).sum(),
            total_likes: appearances.iter().map(|a| a.like_count).sum(),
            appearances,
        }
    }
}
