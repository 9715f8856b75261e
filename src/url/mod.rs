//! URL handling module for Shelf-Scout
//!
//! This module provides base URL normalization and resolution of the
//! site-relative links found in catalog pages.

mod normalize;

use url::Url;

// Re-export main functions
pub use normalize::{normalize_base_url, DEFAULT_BASE_URL};

/// Resolves an `href` found on a page against that page's URL
///
/// Returns `None` when the href is empty or cannot be joined onto `base`.
///
/// # Examples
///
/// ```
/// use shelf_scout::url::resolve_href;
/// use url::Url;
///
/// let page = Url::parse("https://books.toscrape.com/catalogue/category/books/travel_2/index.html").unwrap();
/// let next = resolve_href(&page, "page-2.html").unwrap();
/// assert_eq!(
///     next.as_str(),
///     "https://books.toscrape.com/catalogue/category/books/travel_2/page-2.html"
/// );
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    base.join(href).ok()
}
