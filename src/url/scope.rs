use url::Url;

/// Checks whether `candidate` lives on the same host as `base`
///
/// Hosts are compared verbatim after URL parsing: `blog.example.com` is a
/// different host from `example.com`. An explicit non-default port is part of
/// the host, so `example.com:8080` differs from `example.com`. URLs without a
/// host (`mailto:`, `javascript:`, `data:`) never match a web page's host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mapper::url::same_host;
///
/// let base = Url::parse("https://domain.com/").unwrap();
/// assert!(same_host(&Url::parse("https://domain.com/a/").unwrap(), &base));
/// assert!(!same_host(&Url::parse("https://otherdomain.com/b/").unwrap(), &base));
/// ```
pub fn same_host(candidate: &Url, base: &Url) -> bool {
    match (candidate.host_str(), base.host_str()) {
        (Some(candidate_host), Some(base_host)) => {
            candidate_host == base_host && candidate.port() == base.port()
        }
        _ => false,
    }
}
