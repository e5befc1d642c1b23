//! Log sanitization utilities
//!
//! Keeps provider payloads and API credentials from being fully exposed
//! in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Number of characters kept at each end of a masked secret.
const MASK_KEEP: usize = 4;

/// Mask a secret (API key, token) for logging.
///
/// Keeps the first and last four characters of long secrets; short secrets
/// are fully replaced so nothing meaningful leaks.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= MASK_KEEP * 3 {
        return "*".repeat(chars.len().max(3));
    }
    let head: String = chars[..MASK_KEEP].iter().collect();
    let tail: String = chars[chars.len() - MASK_KEEP..].iter().collect();
    format!("{head}...{tail}")
}
