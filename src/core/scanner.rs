//! SIMD-accelerated fragment scanning using memchr
//!
//! Uses the memchr crate for fast delimiter searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! All delimiters recognized here (`<`, `>`) are ASCII, so byte offsets into
//! UTF-8 text are always char boundaries and slicing at them cannot panic.

use memchr::memchr;

/// Scanner for tag delimiter detection within a single fragment
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given fragment
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current byte position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining text
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Get a slice between two byte positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Find next '<' (tag start) at or after the current position
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input.as_bytes()[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next '>' (tag end) at or after the current position
    #[inline]
    pub fn find_tag_end(&self) -> Option<usize> {
        memchr(b'>', &self.input.as_bytes()[self.pos..]).map(|i| self.pos + i)
    }
}
