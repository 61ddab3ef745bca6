//! Route path normalization.
//!
//! [`normalize_path`] is the single source of truth for cache keys, the
//! outbound `path` query parameter and webhook path matching. Every one of
//! those call sites must go through it; a webhook that spells a path
//! differently from the page that cached it would otherwise leave a stale
//! entry behind.

/// Characters that must stay percent-encoded after a segment is decoded,
/// otherwise a second normalization pass would split or truncate the segment.
const RESERVED_IN_SEGMENT: [(char, &str); 4] =
    [('%', "%25"), ('/', "%2F"), ('?', "%3F"), ('#', "%23")];

/// Canonicalize a route path.
///
/// - `None` or `""` returns `None`, which stands for the root/layout level.
/// - Query string and fragment are stripped.
/// - Repeated slashes collapse to one; trailing slashes are removed except
///   for `/` itself; a leading slash is added when missing.
/// - Each segment is percent-decoded on its own. Characters that would
///   change the segment structure (`/`, `?`, `#`, `%`) are kept encoded.
///
/// The function is idempotent.
///
/// # Examples
///
/// ```rust
/// use pagemeta_core::normalize_path;
///
/// assert_eq!(normalize_path(Some("test/")).as_deref(), Some("/test"));
/// assert_eq!(normalize_path(Some("/a//b///")).as_deref(), Some("/a/b"));
/// assert_eq!(normalize_path(Some("/x?y=1#z")).as_deref(), Some("/x"));
/// assert_eq!(normalize_path(Some("/")).as_deref(), Some("/"));
/// assert_eq!(normalize_path(None), None);
/// ```
pub fn normalize_path(path: Option<&str>) -> Option<String> {
    let raw = path.filter(|p| !p.is_empty())?;

    let end = raw.find(|c| c == '?' || c == '#').unwrap_or(raw.len());
    let segments: Vec<String> = raw[..end]
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode_segment)
        .collect();

    Some(format!("/{}", segments.join("/")))
}

fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => {
            let mut out = String::with_capacity(decoded.len());
            for c in decoded.chars() {
                match RESERVED_IN_SEGMENT.iter().find(|(reserved, _)| *reserved == c) {
                    Some((_, encoded)) => out.push_str(encoded),
                    None => out.push(c),
                }
            }
            out
        }
        // Not valid UTF-8 once decoded; keep the segment exactly as received.
        Err(_) => segment.to_string(),
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
