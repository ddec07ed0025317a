//! Tag tokenizer - chunk-boundary-safe token extraction
//!
//! Splits each incoming fragment into provisional tokens: literal text runs
//! and candidate tags delimited by `<`...`>`. A construct whose closing `>`
//! has not arrived yet is carried verbatim into the next call, so no split
//! point can lose or duplicate input.
//!
//! The grammar recognized is strictly `<name>`, `</name>`, and text between
//! them. Attributes, comments, CDATA and entities are out of scope.

use super::scanner::Scanner;

/// A resolved token from the input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text between tags
    Text(String),
    /// Opening tag: `<name>`
    Open {
        /// Trimmed tag name
        name: String,
        /// Exact source text including both delimiters
        raw: String,
    },
    /// Closing tag: `</name>`
    Close {
        /// Trimmed tag name
        name: String,
        /// Exact source text including both delimiters
        raw: String,
    },
}

/// Stateful tokenizer that survives arbitrary fragment splits
///
/// The only carry-over between calls is an unterminated markup construct
/// (a `<` whose `>` has not been seen). Text runs are never retained.
#[derive(Debug, Default)]
pub struct Tokenizer {
    /// In-progress markup, from its `<` (inclusive) up to the last byte seen
    markup: Option<String>,
}

impl Tokenizer {
    /// Create a new tokenizer with no retained state
    pub fn new() -> Self {
        Tokenizer { markup: None }
    }

    /// Tokenize one fragment, carrying any unterminated construct forward
    pub fn feed(&mut self, fragment: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut scanner = Scanner::new(fragment);

        // A markup construct left over from the previous call resolves first.
        if let Some(mut buf) = self.markup.take() {
            match scanner.find_tag_end() {
                Some(gt) => {
                    buf.push_str(scanner.slice(0, gt));
                    scanner.advance(gt + 1);
                    if let Some(token) = resolve_tag(&buf) {
                        tokens.push(token);
                    }
                }
                None => {
                    buf.push_str(fragment);
                    self.markup = Some(buf);
                    return tokens;
                }
            }
        }

        while !scanner.is_eof() {
            let pos = scanner.position();
            match scanner.find_tag_start() {
                None => {
                    tokens.push(Token::Text(scanner.remaining().to_string()));
                    break;
                }
                Some(lt) => {
                    if lt > pos {
                        tokens.push(Token::Text(scanner.slice(pos, lt).to_string()));
                        scanner.advance(lt - pos);
                    }
                    match scanner.find_tag_end() {
                        Some(gt) => {
                            if let Some(token) = resolve_tag(scanner.slice(lt, gt)) {
                                tokens.push(token);
                            }
                            scanner.advance(gt + 1 - lt);
                        }
                        None => {
                            self.markup = Some(scanner.remaining().to_string());
                            break;
                        }
                    }
                }
            }
        }

        tokens
    }

    /// Drain retained state at end of stream
    ///
    /// An unterminated `<...` construct is returned as literal text, angle
    /// bracket and partial name verbatim. Malformed markup is never dropped.
    pub fn finalize(&mut self) -> Option<Token> {
        self.markup.take().map(Token::Text)
    }

    /// Whether an unterminated construct is currently retained
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.markup.is_some()
    }

    /// Discard all retained state
    pub fn reset(&mut self) {
        self.markup = None;
    }
}

/// Resolve one complete markup construct into a token
///
/// `raw` runs from the opening `<` (inclusive) up to but not including the
/// `>`. The name is the enclosed text, trimmed; a `/` immediately after `<`
/// marks a closing tag. An empty name resolves to nothing: `<>` produces no
/// token and no error.
pub(crate) fn resolve_tag(raw: &str) -> Option<Token> {
    let body = &raw[1..];
    let (closing, name) = match body.strip_prefix('/') {
        Some(rest) => (true, rest.trim()),
        None => (false, body.trim()),
    };
    if name.is_empty() {
        return None;
    }

    let name = name.to_string();
    let raw = format!("{raw}>");
    Some(if closing {
        Token::Close { name, raw }
    } else {
        Token::Open { name, raw }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(t: &str) -> Token {
        Token::Text(t.to_string())
    }

    fn open(name: &str) -> Token {
        Token::Open {
            name: name.to_string(),
            raw: format!("<{name}>"),
        }
    }

    fn close(name: &str) -> Token {
        Token::Close {
            name: name.to_string(),
            raw: format!("</{name}>"),
        }
    }

    #[test]
    fn test_single_fragment() {
        let mut tok = Tokenizer::new();
        let tokens = tok.feed("<a>hello</a>");
        assert_eq!(tokens, vec![open("a"), text("hello"), close("a")]);
        assert!(tok.finalize().is_none());
    }

    #[test]
    fn test_tag_split_across_fragments() {
        let mut tok = Tokenizer::new();
        assert_eq!(tok.feed("x<ta"), vec![text("x")]);
        assert!(tok.has_pending());
        assert_eq!(tok.feed("g>y"), vec![open("tag"), text("y")]);
    }

    #[test]
    fn test_closing_marker_split_from_bracket() {
        let mut tok = Tokenizer::new();
        assert!(tok.feed("<").is_empty());
        assert_eq!(tok.feed("/a>"), vec![close("a")]);
    }

    #[test]
    fn test_one_char_fragments() {
        let mut tok = Tokenizer::new();
        let mut tokens = Vec::new();
        for ch in "a<b>c</b>".chars() {
            tokens.extend(tok.feed(&ch.to_string()));
        }
        tokens.extend(tok.finalize());
        assert_eq!(
            tokens,
            vec![text("a"), open("b"), text("c"), close("b")]
        );
    }

    #[test]
    fn test_empty_name_discarded() {
        let mut tok = Tokenizer::new();
        let tokens = tok.feed("a<>b</ >c");
        assert_eq!(tokens, vec![text("a"), text("b"), text("c")]);
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut tok = Tokenizer::new();
        let tokens = tok.feed("< item >");
        assert_eq!(
            tokens,
            vec![Token::Open {
                name: "item".to_string(),
                raw: "< item >".to_string(),
            }]
        );
    }

    #[test]
    fn test_finalize_flushes_partial_markup_verbatim() {
        let mut tok = Tokenizer::new();
        assert_eq!(tok.feed("x</unfini"), vec![text("x")]);
        assert_eq!(tok.finalize(), Some(text("</unfini")));
        assert!(!tok.has_pending());
    }

    #[test]
    fn test_empty_fragment_is_noop() {
        let mut tok = Tokenizer::new();
        assert!(tok.feed("").is_empty());
        tok.feed("<pend");
        assert!(tok.feed("").is_empty());
        assert_eq!(tok.feed("ing>"), vec![open("pending")]);
    }

    #[test]
    fn test_reset_discards_partial() {
        let mut tok = Tokenizer::new();
        tok.feed("<half");
        tok.reset();
        assert!(tok.finalize().is_none());
        assert_eq!(tok.feed("done>"), vec![text("done>")]);
    }

    #[test]
    fn test_multibyte_content() {
        let mut tok = Tokenizer::new();
        let tokens = tok.feed("<名前>値です</名前>");
        assert_eq!(
            tokens,
            vec![open("名前"), text("値です"), close("名前")]
        );
    }
}
