//! Glob matching for cache key patterns.
//!
//! Supports the subset of Redis glob syntax the key scheme produces: `*`
//! matches any sequence of characters (including none) and `?` matches
//! exactly one character. Everything else matches literally.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use bookmarks_core::cache::pattern_matches;
///
/// assert!(pattern_matches("bookmark:1:*", "bookmark:1:100"));
/// assert!(pattern_matches("bookmark:?:100", "bookmark:1:100"));
/// assert!(!pattern_matches("bookmark:1:*", "bookmark:12:100"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    // Position of the last `*` seen and the key index it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        match pattern.get(p).copied() {
            Some('*') => {
                backtrack = Some((p, k));
                p += 1;
            }
            Some('?') => {
                p += 1;
                k += 1;
            }
            Some(c) if c == key[k] => {
                p += 1;
                k += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    k = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(pattern_matches("bookmark:1:100", "bookmark:1:100"));
        assert!(!pattern_matches("bookmark:1:100", "bookmark:1:101"));
    }

    #[test]
    fn test_trailing_wildcard() {
        assert!(pattern_matches("bookmark:1:*", "bookmark:1:100"));
        assert!(pattern_matches("bookmark:1:*", "bookmark:1:"));
        assert!(!pattern_matches("bookmark:1:*", "bookmark:1"));
        assert!(!pattern_matches("bookmark:1:*", "bookmark:10:1"));
    }

    #[test]
    fn test_leading_and_middle_wildcards() {
        assert!(pattern_matches("*:100", "bookmark:1:100"));
        assert!(pattern_matches("bookmark:*:100", "bookmark:42:100"));
        assert!(!pattern_matches("bookmark:*:100", "bookmark:42:101"));
        assert!(pattern_matches("*:*:*", "a:b:c"));
    }

    #[test]
    fn test_wildcard_backtracks() {
        assert!(pattern_matches("a*b*c", "a-b-b-c"));
        assert!(pattern_matches("*ab", "aab"));
        assert!(!pattern_matches("a*b*c", "a-b-b-d"));
    }

    #[test]
    fn test_single_character_wildcard() {
        assert!(pattern_matches("bookmark:?:1", "bookmark:7:1"));
        assert!(!pattern_matches("bookmark:?:1", "bookmark:77:1"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(pattern_matches("", ""));
        assert!(pattern_matches("*", ""));
        assert!(pattern_matches("**", ""));
        assert!(!pattern_matches("", "bookmark:1:1"));
        assert!(!pattern_matches("bookmark:*", ""));
    }
}
