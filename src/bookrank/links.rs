//! Purchase links.
//!
//! For books, the store's product code (ASIN) is the ISBN-10, which can be
//! derived from a `978` ISBN-13 by recomputing the check digit.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};

/// Converts a `978`-prefixed ISBN-13 (hyphens allowed) to its ISBN-10 / ASIN.
pub fn isbn13_to_asin(isbn13: &str) -> Result<String> {
    let digits: String = isbn13.chars().filter(|c| *c != '-').collect();

    if digits.len() != 13
        || !digits.starts_with("978")
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CatalogError::InvalidCode(format!(
            "{} is not a 978 ISBN-13",
            isbn13
        )));
    }

    let core = &digits[3..12];
    let weighted: u32 = core
        .chars()
        .zip((2..=10).rev())
        .map(|(c, weight)| c.to_digit(10).unwrap_or(0) * weight)
        .sum();

    let check = match 11 - weighted % 11 {
        11 => '0',
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('0'),
    };

    Ok(format!("{}{}", core, check))
}

fn looks_like_isbn13(code: &str) -> bool {
    let digits: Vec<char> = code.chars().filter(|c| *c != '-').collect();
    digits.len() == 13 && digits.iter().all(|c| c.is_ascii_digit())
}

/// Resolves `code` (an ASIN, or a 978 ISBN-13) to the product code to link to.
pub fn resolve_asin(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CatalogError::InvalidCode("empty product code".to_string()));
    }
    if looks_like_isbn13(code) {
        return isbn13_to_asin(code);
    }
    Ok(code.to_string())
}

/// Builds the store link for `code`, tagged with the configured associate id.
pub fn associate_link(code: &str, config: &CatalogConfig) -> Result<String> {
    let asin = resolve_asin(code)?;
    let mut url = format!("{}{}", config.store_url, asin);
    if let Some(tag) = config.associate_tag.as_deref().filter(|t| !t.is_empty()) {
        url.push_str("?tag=");
        url.push_str(&urlencoding::encode(tag));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_isbn13_with_hyphens() {
        assert_eq!(isbn13_to_asin("978-4-87311-932-8").unwrap(), "4873119324");
    }

    #[test]
    fn converts_to_x_and_zero_check_digits() {
        assert_eq!(isbn13_to_asin("9784065182147").unwrap(), "406518214X");
        assert_eq!(isbn13_to_asin("9784065182840").unwrap(), "4065182840");
    }

    #[test]
    fn rejects_non_978_codes() {
        assert!(matches!(
            isbn13_to_asin("9791234567896"),
            Err(CatalogError::InvalidCode(_))
        ));
        assert!(isbn13_to_asin("978123").is_err());
        assert!(isbn13_to_asin("978412345678A").is_err());
    }

    #[test]
    fn passes_plain_asins_through() {
        assert_eq!(resolve_asin(" B0CHX1234Z ").unwrap(), "B0CHX1234Z");
        assert_eq!(resolve_asin("4894514737").unwrap(), "4894514737");
        assert!(resolve_asin("   ").is_err());
    }

    #[test]
    fn tags_links_when_configured() {
        let mut config = CatalogConfig::default();
        config.store_url = "https://www.amazon.co.jp/dp/".to_string();
        config.associate_tag = None;
        assert_eq!(
            associate_link("4894514737", &config).unwrap(),
            "https://www.amazon.co.jp/dp/4894514737"
        );

        config.associate_tag = Some("shelf-22".to_string());
        assert_eq!(
            associate_link("978-4-87311-932-8", &config).unwrap(),
            "https://www.amazon.co.jp/dp/4873119324?tag=shelf-22"
        );
    }
}
