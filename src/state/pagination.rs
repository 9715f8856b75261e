use crate::state::CategoryStatus;
use url::Url;

/// Position of the walk over one category's listing pages
///
/// ```text
/// Fetching(url) --ok--> Parsing { url, body } --next link--> Fetching(url')
///       |                        |
///       +--error/cancel/bound--> Done(status) <--no next link--+
/// ```
#[derive(Debug)]
pub enum PaginationState {
    /// The page at this URL is about to be requested
    Fetching(Url),

    /// The page was fetched and its entries are about to be extracted
    Parsing {
        /// Page the body came from, used to resolve relative links
        url: Url,
        /// Raw HTML
        body: String,
    },

    /// The walk is over
    Done(CategoryStatus),
}
