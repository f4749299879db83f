//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for catalogue operations, whatever the UI.
//!
//! It dispatches to the command functions, normalizes inputs (a listing is
//! always driven by a [`ViewState`], however the caller obtained one) and
//! returns structured `Result<CmdResult>` values. It never writes to
//! stdout/stderr and never formats anything for display.
//!
//! ## Generic Over DataSource
//!
//! `CatalogApi<S: DataSource>` is generic over where the dataset comes from:
//! - Production: `CatalogApi<FileSource>`
//! - Testing: `CatalogApi<InMemorySource>`
//!
//! API tests only check dispatch and argument passing; the logic itself is
//! tested in the command modules.

use crate::commands;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::store::DataSource;
use crate::view_state::ViewState;

pub struct CatalogApi<S: DataSource> {
    source: S,
    config: CatalogConfig,
}

impl<S: DataSource> CatalogApi<S> {
    pub fn new(source: S, config: CatalogConfig) -> Self {
        Self { source, config }
    }

    /// One page of the ranking for `state`.
    pub fn list(&self, state: &ViewState) -> Result<commands::CmdResult> {
        commands::list::run(&self.source, state)
    }

    /// Same as [`CatalogApi::list`], from a URL query string.
    pub fn list_query(&self, query: &str) -> Result<commands::CmdResult> {
        self.list(&ViewState::decode(query))
    }

    pub fn show(&self, id: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.source, id.trim())
    }

    pub fn channels(&self) -> Result<commands::CmdResult> {
        commands::channels::run(&self.source, &self.config)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.source)
    }

    pub fn link(&self, code: &str) -> Result<commands::CmdResult> {
        commands::link::run(&self.config, code)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
