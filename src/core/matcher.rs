//! Streaming literal-pattern matcher
//!
//! Finds a fixed byte pattern inside text that arrives in arbitrary pieces.
//! The pattern may straddle any split point, so after searching a piece the
//! caller must retain the longest trailing suffix that could still grow into
//! a match (at most pattern length - 1 bytes) and prepend it to the next
//! piece. Everything before that suffix is safe to flush immediately.

use memchr::memmem;

/// Matcher for one fixed pattern across fragment boundaries
#[derive(Debug, Clone)]
pub struct StreamMatcher {
    pattern: String,
}

impl StreamMatcher {
    /// Create a matcher for the given literal pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        StreamMatcher {
            pattern: pattern.into(),
        }
    }

    /// The pattern being searched for
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Byte length of the pattern
    #[inline]
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// Find the first complete occurrence of the pattern in `haystack`
    #[inline]
    pub fn find(&self, haystack: &str) -> Option<usize> {
        memmem::find(haystack.as_bytes(), self.pattern.as_bytes())
    }

    /// Length of the longest suffix of `haystack` that is a proper prefix of
    /// the pattern
    ///
    /// This is exactly the number of trailing bytes that must be carried into
    /// the next call: they may yet complete a match once more input arrives.
    /// Returns 0 when the haystack cannot be extended into a match at all.
    pub fn retain_len(&self, haystack: &str) -> usize {
        let hay = haystack.as_bytes();
        let pat = self.pattern.as_bytes();
        let max = hay.len().min(pat.len().saturating_sub(1));

        for keep in (1..=max).rev() {
            if pat.starts_with(&hay[hay.len() - keep..]) {
                return keep;
            }
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_complete_match() {
        let matcher = StreamMatcher::new("</Start>");
        assert_eq!(matcher.find("abc</Start>def"), Some(3));
        assert_eq!(matcher.find("abcdef"), None);
    }

    #[test]
    fn test_retain_partial_suffix() {
        let matcher = StreamMatcher::new("</Start>");
        assert_eq!(matcher.retain_len("content</Sta"), 5);
        assert_eq!(matcher.retain_len("content<"), 1);
        assert_eq!(matcher.retain_len("content"), 0);
    }

    #[test]
    fn test_retain_never_full_pattern() {
        let matcher = StreamMatcher::new("</a>");
        // A full match is found, not retained.
        assert_eq!(matcher.retain_len("</a"), 3);
        assert!(matcher.retain_len("x</a>") < matcher.len());
    }

    #[test]
    fn test_retain_prefers_longest_suffix() {
        // "<<" ends with "<", which is a prefix; the longer suffix "<<" is not.
        let matcher = StreamMatcher::new("</end>");
        assert_eq!(matcher.retain_len("x<<"), 1);
    }

    #[test]
    fn test_mismatched_suffix_not_retained() {
        let matcher = StreamMatcher::new("</Start>");
        // "</Reaso" diverges from the pattern at the third byte.
        assert_eq!(matcher.retain_len("ervation</Reaso"), 0);
    }
}
