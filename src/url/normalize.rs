use crate::UrlError;
use url::Url;

/// Normalizes the seed URL of a crawl session
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Only accept HTTP and HTTPS schemes
/// 3. Require a host
/// 4. Remove fragment (everything after #)
///
/// Host case and default ports are canonicalized by the URL parser itself.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use site_mapper::url::normalize_seed;
///
/// let url = normalize_seed("https://EXAMPLE.com#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn normalize_seed(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Resolves a raw link against the page it was found on
///
/// Relative references are resolved to an absolute URL and the fragment is
/// stripped, so `page#a` and `page#b` resolve to the same address. Returns
/// `None` for input the URL parser rejects.
pub fn resolve_link(raw: &str, base: &Url) -> Option<Url> {
    let mut resolved = base.join(raw).ok()?;
    resolved.set_fragment(None);
    Some(resolved)
}
