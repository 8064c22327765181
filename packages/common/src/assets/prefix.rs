/// Prefixes that legacy references carry in front of public web-root paths.
pub const PUBLIC_PREFIXES: &[&str] = &["public/", "app/public/"];

/// Prefixes that legacy references carry in front of storage-disk paths.
pub const STORAGE_PREFIXES: &[&str] = &["storage/", "public/", "app/public/"];

/// Whether a reference is already a URL a browser can fetch.
pub fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("//")
}

/// Convert backslashes to `/` and drop leading slashes.
pub fn normalize_reference(value: &str) -> String {
    value.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Remove leading `prefixes` until none of them matches.
///
/// Each pass tries every prefix in order, so stacked prefixes such as
/// `public/app/public/` are peeled in one call. Leading slashes exposed by
/// the stripping are dropped as well.
pub fn strip_prefixes<'a>(path: &'a str, prefixes: &[&str]) -> &'a str {
    let mut current = path;
    loop {
        let before = current;
        for prefix in prefixes {
            if let Some(rest) = current.strip_prefix(prefix) {
                current = rest;
            }
        }
        if current == before {
            return current.trim_start_matches('/');
        }
    }
}
