//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone
//! files under `templates/`, which are easier to edit and diff than string
//! literals. They are embedded at compile time so the binary stays
//! self-contained.
//!
//! Templates are rendered with `trim_blocks` and `lstrip_blocks` on, so a
//! line holding only a block tag produces no output and each remaining
//! template line is one output line.
//!
//! Styling goes through the `style` filter with a semantic name from
//! [`super::styles::names`]; templates never pick colours. When the choice of
//! style depends on the data, the Rust side computes the style name and the
//! template just uses it. Layout math (truncation, padding, number grouping)
//! also stays in Rust.

pub const LISTING_TEMPLATE: &str = include_str!("templates/listing.tmp");
pub const BOOK_TEMPLATE: &str = include_str!("templates/book.tmp");
pub const CHANNELS_TEMPLATE: &str = include_str!("templates/channels.tmp");
pub const STATS_TEMPLATE: &str = include_str!("templates/stats.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
