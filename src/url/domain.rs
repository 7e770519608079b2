use url::Url;

/// Extracts the lowercased host from a URL.
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Registrable domain of a host, e.g. `blog.example.com` becomes
/// `example.com`.
///
/// A label-counting approximation rather than a public-suffix lookup: a
/// short (3 chars or fewer) second-to-last label such as `co` in
/// `example.co.uk` keeps three labels, everything else keeps two. Good
/// enough to scope a crawl to one site.
pub fn registrable_domain(host: &str) -> String {
    let parts: Vec<&str> = host.split('.').collect();
    let n = parts.len();

    if n >= 2 {
        if n == 4 || (n == 3 && parts[n - 2].len() <= 3) {
            return parts[n - 3..].join(".");
        }
        return parts[n - 2..].join(".");
    }

    host.to_string()
}

/// Short site label used for the output file name, e.g. `www.example.com`
/// becomes `example`.
pub fn site_label(host: &str) -> String {
    let parts: Vec<&str> = host.split('.').collect();
    let n = parts.len();

    if n >= 2 {
        if n == 4 || (n == 3 && parts[n - 2].len() <= 3) {
            return parts[n - 3].to_string();
        }
        return parts[n - 2].to_string();
    }

    host.to_string()
}

/// Whether `url` belongs to the site identified by `site_domain` (a
/// registrable domain): the host either equals it or is a subdomain of it.
pub fn is_same_site(url: &Url, site_domain: &str) -> bool {
    match extract_host(url) {
        Some(host) => {
            host == site_domain || host.ends_with(&format!(".{}", site_domain))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host_lowercases() {
        let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_registrable_domain_two_labels() {
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("blog.example.com"), "example.com");
    }

    #[test]
    fn test_registrable_domain_short_suffix_label() {
        assert_eq!(registrable_domain("example.co.uk"), "example.co.uk");
        assert_eq!(registrable_domain("www.example.co.uk"), "example.co.uk");
    }

    #[test]
    fn test_registrable_domain_single_label() {
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn test_site_label() {
        assert_eq!(site_label("www.example.com"), "example");
        assert_eq!(site_label("example.com"), "example");
        assert_eq!(site_label("www.example.co.uk"), "example");
        assert_eq!(site_label("localhost"), "localhost");
    }

    #[test]
    fn test_same_site_exact_host() {
        let url = Url::parse("https://example.com/p").unwrap();
        assert!(is_same_site(&url, "example.com"));
    }

    #[test]
    fn test_same_site_subdomain() {
        let url = Url::parse("https://blog.example.com/p").unwrap();
        assert!(is_same_site(&url, "example.com"));
    }

    #[test]
    fn test_different_site() {
        let url = Url::parse("https://example.net/p").unwrap();
        assert!(!is_same_site(&url, "example.com"));

        // A host merely ending in the same text is not a subdomain.
        let url = Url::parse("https://notexample.com/p").unwrap();
        assert!(!is_same_site(&url, "example.com"));
    }
}
