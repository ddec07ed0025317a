//! Core streaming primitives
//!
//! This module contains the substrate shared by all recognition policies:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: chunk-boundary-safe token extraction with carry-over state
//! - Matcher: streaming literal-pattern search with partial-match retention

pub mod matcher;
pub mod scanner;
pub mod tokenizer;
