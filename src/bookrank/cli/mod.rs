//! # CLI Behavior
//!
//! This is **one possible UI client** for bookrank, not the application
//! itself. For the overall architecture, see the crate-level documentation of
//! the `bookrank` library.
//!
//! ## Naked Execution (`bookrank`)
//!
//! Running `bookrank` with no arguments is `bookrank list`: the first page of
//! the ranking by points, with every filter off.
//!
//! ## Shareable Views
//!
//! Every listing ends with a `view:` line holding the canonical query string
//! for what is on screen. Passing it back with `--url` (a bare query string or
//! a full link both work) reproduces the same page; flags given alongside it
//! are applied on top, and any flag other than `--page` starts again from
//! page 1.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Output formatting through templates
//! - `setup`: Argument parsing via clap, grouped help
//! - `styles`: The named style theme
//! - `templates`: Output templates

mod commands;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
