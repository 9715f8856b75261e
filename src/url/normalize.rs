use crate::UrlError;
use url::Url;

/// Site crawled when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com/";

/// Normalizes the catalog base URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; an empty string becomes [`DEFAULT_BASE_URL`]
/// 2. Parse the URL; reject if malformed
/// 3. Reject anything that is not HTTP or HTTPS, or has no host
/// 4. Drop query and fragment
/// 5. Make sure the path ends with `/` so relative category paths resolve
///    underneath it rather than replacing its last segment
///
/// # Examples
///
/// ```
/// use shelf_scout::url::normalize_base_url;
///
/// let url = normalize_base_url("https://books.toscrape.com").unwrap();
/// assert_eq!(url.as_str(), "https://books.toscrape.com/");
/// ```
pub fn normalize_base_url(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_BASE_URL } else { raw };

    let mut url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_trailing_slash() {
        let url = normalize_base_url("https://books.toscrape.com").unwrap();
        assert_eq!(url.as_str(), "https://books.toscrape.com/");
    }

    #[test]
    fn test_adds_trailing_slash_to_subpath() {
        let url = normalize_base_url("http://localhost:8080/catalog").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/catalog/");
    }

    #[test]
    fn test_keeps_existing_trailing_slash() {
        let url = normalize_base_url("https://books.toscrape.com/").unwrap();
        assert_eq!(url.as_str(), "https://books.toscrape.com/");
    }

    #[test]
    fn test_empty_uses_default() {
        let url = normalize_base_url("   ").unwrap();
        assert_eq!(url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_strips_query_and_fragment() {
        let url = normalize_base_url("https://example.com/shop?x=1#top").unwrap();
        assert_eq!(url.as_str(), "https://example.com/shop/");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            normalize_base_url("ftp://example.com/"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(UrlError::Parse(_))
        ));
    }
}
