//! Styles for the bookrank CLI.
//!
//! Templates only ever refer to semantic style names (`rank`, `metric`,
//! `time`...) through the `style` filter; the concrete colours live here in
//! one [`Theme`], registered once through `once_cell::sync::Lazy`.
//!
//! A style name missing from the theme renders with a `(!?)` prefix, so a
//! typo in a template shows up in the output instead of silently dropping
//! the styling.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Semantic style names shared by templates and rendering code.
pub mod names {
    pub const HEADING: &str = "heading";
    pub const FILTER: &str = "filter";
    pub const RANK: &str = "rank";
    pub const TITLE: &str = "title";
    pub const METRIC: &str = "metric";
    pub const MUTED: &str = "muted";
    pub const CHANNEL: &str = "channel";
    pub const TIME: &str = "time";
    pub const PAGE: &str = "page";
    pub const CURRENT_PAGE: &str = "current_page";
    pub const LINK: &str = "link";
    pub const INFO: &str = "info";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// A set of named `console::Style`s.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Applies the style called `name` to `text`.
    ///
    /// With `use_color` off the text is returned as is, but unknown names are
    /// still flagged.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => {
                style.clone().force_styling(true).apply_to(text).to_string()
            }
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Maps an RGB colour to the nearest entry of the 256-colour palette.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

pub static BOOKRANK_THEME: Lazy<Theme> = Lazy::new(|| {
    let grey = rgb_to_ansi256((154, 154, 154));
    Theme::new()
        .add(names::HEADING, Style::new().bold())
        .add(names::FILTER, Style::new().cyan())
        .add(names::RANK, Style::new().yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::METRIC, Style::new().green())
        .add(names::MUTED, Style::new().color256(grey))
        .add(names::CHANNEL, Style::new().cyan())
        .add(names::TIME, Style::new().color256(grey).italic())
        .add(names::PAGE, Style::new())
        .add(names::CURRENT_PAGE, Style::new().black().on_yellow())
        .add(names::LINK, Style::new().underlined())
        .add(names::INFO, Style::new().color256(grey))
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});
