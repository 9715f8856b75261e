//! HTML parser for catalog pages
//!
//! This module extracts from the catalog's HTML:
//! - The category navigation of the root page
//! - The listing entries of a category page
//! - The link to the next listing page

use crate::catalog::{CategoryMap, ListingEntry};
use crate::url::resolve_href;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html};
use std::str::FromStr;
use url::Url;

mod selectors {
    use once_cell::sync::Lazy;
    use scraper::Selector;

    pub static CATEGORY_LINKS: Lazy<Selector> =
        Lazy::new(|| Selector::parse("div.side_categories ul li a").unwrap());
    pub static ENTRY: Lazy<Selector> = Lazy::new(|| Selector::parse("article.product_pod").unwrap());
    pub static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3 > a").unwrap());
    pub static PRICE: Lazy<Selector> = Lazy::new(|| Selector::parse("p.price_color").unwrap());
    pub static RATING: Lazy<Selector> = Lazy::new(|| Selector::parse("p.star-rating").unwrap());
    pub static NEXT_PAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("li.next > a").unwrap());
}

/// Rating words as they appear in the rating node's class, in match order
const RATING_WORDS: [(&str, u8); 5] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
];

/// Entries and pagination extracted from one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Entries in document order
    pub entries: Vec<ListingEntry>,

    /// Number of fragments dropped for missing a mandatory field
    pub skipped: usize,

    /// Absolute URL of the next listing page, if any
    pub next_page: Option<Url>,
}

/// Builds the category map from the root page's sidebar navigation
///
/// Links with empty text or href and the "Books" link are ignored. A page
/// without the navigation yields an empty map.
///
/// # Example
///
/// ```
/// use shelf_scout::crawler::parse_category_map;
///
/// let html = r#"<div class="side_categories"><ul><li><a href="books_1/index.html">Books</a>
///     <ul><li><a href="books/travel_2/index.html"> Travel </a></li></ul></li></ul></div>"#;
/// let map = parse_category_map(html);
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get("travel").unwrap().path, "books/travel_2/index.html");
/// ```
pub fn parse_category_map(html: &str) -> CategoryMap {
    let document = Html::parse_document(html);
    let mut map = CategoryMap::new();

    for link in document.select(&selectors::CATEGORY_LINKS) {
        let label = link.text().collect::<String>();
        let href = link.value().attr("href").unwrap_or_default();
        map.insert(&label, href);
    }

    map
}

/// Parses one listing page
///
/// `page_url` is the URL the page was fetched from; every relative link on the
/// page is resolved against it.
pub fn parse_listing_page(html: &str, page_url: &Url) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for fragment in document.select(&selectors::ENTRY) {
        match parse_entry(fragment, page_url) {
            Some(entry) => page.entries.push(entry),
            None => page.skipped += 1,
        }
    }

    page.next_page = document
        .select(&selectors::NEXT_PAGE)
        .next()
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| resolve_href(page_url, href));

    page
}

/// Extracts one listing entry
///
/// Returns `None` when the title, price or rating node is missing, or the
/// title is empty. An unreadable price or rating does not drop the entry; the
/// field becomes 0 instead.
pub fn parse_entry(fragment: ElementRef<'_>, base_url: &Url) -> Option<ListingEntry> {
    let title_node = fragment.select(&selectors::TITLE).next()?;
    let price_node = fragment.select(&selectors::PRICE).next()?;
    let rating_node = fragment.select(&selectors::RATING).next()?;

    let title = title_node.value().attr("title").unwrap_or_default().trim();
    if title.is_empty() {
        tracing::debug!("Skipping listing entry without a title on {}", base_url);
        return None;
    }

    let url = title_node
        .value()
        .attr("href")
        .and_then(|href| resolve_href(base_url, href))
        .unwrap_or_else(|| base_url.clone());

    let price = parse_price(&price_node.text().collect::<String>());
    let rating = parse_rating(rating_node.value().attr("class").unwrap_or_default());

    Some(ListingEntry {
        title: title.to_string(),
        price,
        rating,
        url: url.to_string(),
    })
}

/// Reads a price from display text
///
/// Currency symbols and other text are discarded and what is left is parsed
/// as a locale-independent decimal. `,` groups thousands in the integer part
/// only; a `,` after the decimal point makes the text unreadable. Text that
/// does not parse gives 0.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shelf_scout::crawler::parse_price;
///
/// assert_eq!(parse_price("£51.77"), Decimal::new(5177, 2));
/// assert_eq!(parse_price("N/A"), Decimal::ZERO);
/// ```
pub fn parse_price(text: &str) -> Decimal {
    let number: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number.as_str(), None),
    };

    if fraction.is_some_and(|f| f.contains(',')) {
        return Decimal::ZERO;
    }

    let mut digits = integer.replace(',', "");
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }

    Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}

/// Reads a star rating from the rating node's class attribute
///
/// The first of "One" to "Five" found anywhere in the string, ignoring case,
/// gives 1 to 5. None of them gives 0.
pub fn parse_rating(class: &str) -> u8 {
    let class = class.to_lowercase();

    RATING_WORDS
        .iter()
        .find(|(word, _)| class.contains(word))
        .map(|(_, rating)| *rating)
        .unwrap_or(0)
}
