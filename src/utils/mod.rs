//! Utility functions and helpers.

pub mod http;

/// Last path segment of an href: everything after the final `/`.
///
/// Returns `None` when the href contains no `/` at all.
pub fn last_path_segment(href: &str) -> Option<&str> {
    href.rfind('/').map(|i| &href[i + 1..])
}

/// Parse a scraped numeric token, accepting `,` as the decimal separator.
pub fn parse_decimal(token: &str) -> Option<f64> {
    token.replacen(',', ".", 1).parse().ok()
}

/// Collect an element's text nodes into one string.
pub fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_path_segment() {
        assert_eq!(
            last_path_segment("https://fitfoodway.ro/p/pui-cu-orez"),
            Some("pui-cu-orez")
        );
        assert_eq!(last_path_segment("/p/omleta"), Some("omleta"));
        assert_eq!(last_path_segment("https://fitfoodway.ro/p/"), Some(""));
        assert_eq!(last_path_segment("omleta"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12,50"), Some(12.5));
        assert_eq!(parse_decimal("31.5"), Some(31.5));
        assert_eq!(parse_decimal("420"), Some(420.0));
        assert_eq!(parse_decimal("abc"), None);
    }
}
