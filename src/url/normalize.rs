use url::Url;

/// Cleans a discovered link for queueing and dedup.
///
/// Drops the fragment and trims trailing slashes from the path, so
/// `/page/`, `/page` and `/page#top` collapse to one frontier entry. The
/// query is kept; robots rules match against path-plus-query.
pub fn clean_url(url: &Url) -> Url {
    let mut cleaned = url.clone();
    cleaned.set_fragment(None);

    let path = cleaned.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        cleaned.set_path(path.trim_end_matches('/'));
    }

    cleaned
}

/// Whether the last path segment looks like a file, e.g.
/// `/assets/logo.png`. The crawl maps pages, not assets, and skips these.
pub fn looks_like_file(url: &Url) -> bool {
    url.path_segments()
        .and_then(|segments| segments.last())
        .map(|segment| segment.contains('.'))
        .unwrap_or(false)
}
