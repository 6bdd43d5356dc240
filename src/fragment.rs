//! Location fragment normalisation

/// Delimiter that introduces the fragment part of a location
pub const HASH_DELIMITER: char = '#';

/// Strip a single leading `#` from a location hash.
///
/// Only one delimiter is removed, so `"##abc"` becomes `"#abc"`.
///
/// # Example
///
/// ```
/// use fragment_router::clean_hash;
///
/// assert_eq!(clean_hash("#posts/12"), "posts/12");
/// assert_eq!(clean_hash("posts/12"), "posts/12");
/// ```
pub fn clean_hash(raw: &str) -> &str {
    raw.strip_prefix(HASH_DELIMITER).unwrap_or(raw)
}

/// Build the location hash written by `go`: `#` followed by the fragment.
pub fn to_location_hash(fragment: &str) -> String {
    let mut hash = String::with_capacity(fragment.len() + 1);
    hash.push(HASH_DELIMITER);
    hash.push_str(fragment);
    hash
}
