/// Finds the first ignored prefix that a URL path starts with
///
/// Prefixes are checked in configuration order and the first match wins.
/// Matching is a plain string prefix test: `/blog` matches `/blog`, `/blog/`
/// and `/blogroll` alike.
///
/// # Arguments
///
/// * `path` - The path of an absolute URL
/// * `prefixes` - The ignored path prefixes of the session
///
/// # Returns
///
/// * `Some(prefix)` - The first prefix matching the path
/// * `None` - The path is not excluded
///
/// # Examples
///
/// ```
/// use site_mapper::url::matching_prefix;
///
/// let prefixes = vec!["/cdn-cgi".to_string(), "/help".to_string()];
/// assert_eq!(matching_prefix("/help/faq", &prefixes), Some("/help"));
/// assert_eq!(matching_prefix("/about", &prefixes), None);
/// ```
pub fn matching_prefix<'a>(path: &str, prefixes: &'a [String]) -> Option<&'a str> {
    prefixes
        .iter()
        .find(|prefix| path.starts_with(prefix.as_str()))
        .map(String::as_str)
}
