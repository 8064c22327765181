use percent_encoding::percent_decode_str;

/// Why a storage request path was refused.
#[derive(Debug, PartialEq, Eq)]
pub enum RequestPathError {
    /// Percent-decoding produced invalid UTF-8.
    InvalidEncoding,
    /// A segment is exactly `..`.
    PathTraversal,
    /// The decoded path contains a null byte.
    NullByte,
}

impl RequestPathError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidEncoding => "Path is not valid UTF-8 after decoding",
            Self::PathTraversal => "Path must not contain '..' segments",
            Self::NullByte => "Path must not contain null bytes",
        }
    }
}

/// Backslashes become `/`, runs of slashes collapse to one, and leading
/// slashes are dropped.
pub fn normalize_separators(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        normalized.push(c);
    }
    normalized.trim_start_matches('/').to_string()
}

/// Whether any `/`-separated segment is exactly `..`.
pub fn contains_parent_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "..")
}

/// Decode and normalize the raw (still percent-encoded) tail of a storage
/// request, refusing anything that could address a file outside the disk.
///
/// Unsafe paths are rejected outright, never rewritten into something safe.
pub fn decode_request_path(raw: &str) -> Result<String, RequestPathError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| RequestPathError::InvalidEncoding)?;

    let normalized = normalize_separators(&decoded);

    if contains_parent_segment(&normalized) {
        return Err(RequestPathError::PathTraversal);
    }

    if normalized.contains('\0') {
        return Err(RequestPathError::NullByte);
    }

    Ok(normalized)
}
