//! # Bookrank Architecture
//!
//! Bookrank ranks the books recommended across a set of book-review video
//! channels. It is a **UI-agnostic catalogue library**: the `bookrank` binary
//! is one client of it, and a static site generator or web handler could be
//! another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, handles terminal I/O│
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (query strings → ViewState)            │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure logic over the catalogue: engine, metrics, links    │
//! │  - Degrades to an empty view when the dataset is missing    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data Layer (store/)                                        │
//! │  - Abstract DataSource trait                                │
//! │  - FileSource (production), InMemorySource (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Listing Pipeline
//!
//! A listing is a pure function of the catalogue and a [`view_state::ViewState`]:
//!
//! 1. narrow appearances to the selected year, then to the selected channel
//!    (books left with no appearances drop out, aggregates are recomputed)
//! 2. sort by the selected mode, stable, descending
//! 3. keep books whose title or author contains the query
//! 4. cut the 20-item page
//!
//! The URL query string is the only persisted form of a view state. See
//! [`view_state`] for the format and [`engine`] for the pipeline.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, and never prints or exits. The data layer reads files and logs
//! through the `log` facade; which logger (if any) is installed is up to the
//! client.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Logic for each command
//! - [`engine`]: Filtering, sorting and pagination
//! - [`metrics`]: Scores and catalogue-wide facets
//! - [`view_state`]: View state and its query string codec
//! - [`links`]: Purchase links and ISBN conversion
//! - [`store`]: Dataset access
//! - [`model`]: Core data types (`Book`, `Appearance`, `Channel`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod links;
pub mod metrics;
pub mod model;
pub mod store;
pub mod view_state;
