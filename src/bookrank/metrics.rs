//! # Metrics
//!
//! Derived numbers over the catalogue: the per-book score used by the
//! `point` ranking, plus the collection-wide facets (years and channels) the
//! listing offers as filter choices.
//!
//! ## Scoring
//!
//! Each distinct channel that mentions a book is worth 5 points, and every
//! further mention by the same channel adds 1:
//!
//! ```text
//! score = Σ over channels c of (5 + (mentions_c - 1))
//! ```
//!
//! A book picked up by three different creators therefore outranks one that a
//! single creator covered five times (15 vs 9).

use crate::model::{Appearance, Book};
use chrono::{Datelike, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// First year the dataset is considered meaningful for.
pub const FIRST_YEAR: i32 = 2015;

const POINTS_PER_CHANNEL: u64 = 5;
const POINTS_PER_REPEAT: u64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub points: u64,
    pub channels: usize,
}

pub fn score(book: &Book) -> Score {
    score_appearances(&book.appearances)
}

pub fn score_appearances(appearances: &[Appearance]) -> Score {
    let mut per_channel: HashMap<&str, u64> = HashMap::new();
    for appearance in appearances {
        if appearance.channel.is_empty() {
            continue;
        }
        *per_channel.entry(appearance.channel.as_str()).or_insert(0) += 1;
    }

    let points = per_channel
        .values()
        .map(|&k| POINTS_PER_CHANNEL + (k - 1) * POINTS_PER_REPEAT)
        .sum();

    Score {
        points,
        channels: per_channel.len(),
    }
}

/// Years with at least one appearance, most recent first, limited to
/// `[FIRST_YEAR, current year]`.
pub fn years_covered(books: &[Book]) -> Vec<i32> {
    years_covered_until(books, Utc::now().year())
}

pub fn years_covered_until(books: &[Book], current_year: i32) -> Vec<i32> {
    let years: BTreeSet<i32> = books
        .iter()
        .flat_map(|b| b.appearances.iter())
        .filter_map(Appearance::published_year)
        .filter(|year| (FIRST_YEAR..=current_year).contains(year))
        .collect();

    years.into_iter().rev().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelCount {
    pub name: String,
    pub count: usize,
}

/// Appearance count per channel name, highest first. Equal counts keep the
/// order in which the channels were first seen.
pub fn channels_covered(books: &[Book]) -> Vec<ChannelCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ChannelCount> = Vec::new();

    for appearance in books.iter().flat_map(|b| b.appearances.iter()) {
        if appearance.channel.is_empty() {
            continue;
        }
        match positions.get(appearance.channel.as_str()) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(appearance.channel.as_str(), counts.len());
                counts.push(ChannelCount {
                    name: appearance.channel.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Headline totals for the whole catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub books: usize,
    pub appearances: usize,
}

pub fn summary(books: &[Book]) -> CatalogSummary {
    CatalogSummary {
        books: books.len(),
        appearances: books.iter().map(|b| b.appearances.len()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{appearance, book};

    fn on(channels: &[&str]) -> Vec<Appearance> {
        channels
            .iter()
            .map(|c| appearance(c, "2023-01-01", 0, 0))
            .collect()
    }

    #[test]
    fn empty_book_scores_zero() {
        let b = book("b", "Empty", vec![]);
        assert_eq!(score(&b), Score::default());
    }

    #[test]
    fn breadth_beats_repetition() {
        let a = book("a", "A", on(&["X", "X", "X", "Y"]));
        let b = book("b", "B", on(&["Z"]));

        assert_eq!(
            score(&a),
            Score {
                points: 12,
                channels: 2
            }
        );
        assert_eq!(
            score(&b),
            Score {
                points: 5,
                channels: 1
            }
        );

        let wide = book("w", "Wide", on(&["A", "B", "C"]));
        let deep = book("d", "Deep", on(&["A", "A", "A", "A", "A"]));
        assert_eq!(score(&wide).points, 15);
        assert_eq!(score(&deep).points, 9);
    }

    #[test]
    fn matches_formula_for_mixed_counts() {
        let channels = ["P", "Q", "P", "R", "Q", "P", "S"];
        let b = book("m", "Mixed", on(&channels));

        let mut per: HashMap<&str, u64> = HashMap::new();
        for c in channels {
            *per.entry(c).or_default() += 1;
        }
        let expected: u64 = per.values().map(|k| 5 + (k - 1)).sum();

        assert_eq!(score(&b).points, expected);
        assert_eq!(score(&b).channels, per.len());
    }

    #[test]
    fn appearances_without_channel_are_not_credited() {
        let b = book("b", "B", on(&["", "X"]));
        assert_eq!(
            score(&b),
            Score {
                points: 5,
                channels: 1
            }
        );
    }

    #[test]
    fn years_are_descending_and_bounded() {
        let books = vec![
            book(
                "a",
                "A",
                vec![
                    appearance("X", "2019-03-01T00:00:00Z", 0, 0),
                    appearance("X", "2014-12-31", 0, 0),
                    appearance("X", "not a date", 0, 0),
                ],
            ),
            book(
                "b",
                "B",
                vec![
                    appearance("Y", "2023-07-07", 0, 0),
                    appearance("Y", "2019-01-01", 0, 0),
                    appearance("Y", "2031-01-01", 0, 0),
                ],
            ),
        ];

        assert_eq!(years_covered_until(&books, 2025), vec![2023, 2019]);
    }

    #[test]
    fn channel_counts_are_descending_with_stable_ties() {
        let books = vec![
            book("a", "A", on(&["Late", "Busy", "Early"])),
            book("b", "B", on(&["Busy", "Early", "Busy", ""])),
        ];

        let counts = channels_covered(&books);
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.name.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Busy", 3), ("Early", 2), ("Late", 1)]);

        let tied = vec![book("t", "T", on(&["B", "A", "C"]))];
        let names: Vec<String> = channels_covered(&tied).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn summary_counts_books_and_appearances() {
        let books = vec![book("a", "A", on(&["X", "Y"])), book("b", "B", vec![])];
        assert_eq!(
            summary(&books),
            CatalogSummary {
                books: 2,
                appearances: 2
            }
        );
    }
}
