//! Full recognition policy
//!
//! Every resolved tag is structural, unconditionally: no schema, no nesting
//! discipline. A closing tag with no corresponding open is still emitted as
//! an event, trading strictness for robustness against malformed streams.

use tracing::debug;

use crate::core::tokenizer::{Token, Tokenizer};
use crate::events::TagEvent;
use crate::strategy::ChunkParser;

/// Streaming parser that treats every well-formed tag as structural
///
/// Text accumulates in a pending buffer and is flushed before any structural
/// event and at the end of every call, so content is emitted as early as
/// possible without waiting for more input.
#[derive(Debug, Default)]
pub struct StreamingParser {
    tokenizer: Tokenizer,
    pending: String,
}

impl StreamingParser {
    /// Create a new parser with no retained state
    pub fn new() -> Self {
        StreamingParser {
            tokenizer: Tokenizer::new(),
            pending: String::new(),
        }
    }

    /// Whether an unterminated construct or unflushed content is retained
    pub fn has_pending(&self) -> bool {
        self.tokenizer.has_pending() || !self.pending.is_empty()
    }

    fn flush_pending(&mut self, events: &mut Vec<TagEvent>) {
        if !self.pending.is_empty() {
            events.push(TagEvent::content(std::mem::take(&mut self.pending)));
        }
    }
}

impl ChunkParser for StreamingParser {
    type Event = TagEvent;

    fn process(&mut self, fragment: &str) -> Vec<TagEvent> {
        let mut events = Vec::new();

        for token in self.tokenizer.feed(fragment) {
            match token {
                Token::Text(text) => self.pending.push_str(&text),
                Token::Open { name, .. } => {
                    self.flush_pending(&mut events);
                    events.push(TagEvent::StartTag { name });
                }
                Token::Close { name, .. } => {
                    self.flush_pending(&mut events);
                    events.push(TagEvent::EndTag { name });
                }
            }
        }

        self.flush_pending(&mut events);
        events
    }

    fn finalize(&mut self) -> Vec<TagEvent> {
        if let Some(Token::Text(text)) = self.tokenizer.finalize() {
            debug!(len = text.len(), "flushing unterminated markup as content");
            self.pending.push_str(&text);
        }

        let mut events = Vec::new();
        self.flush_pending(&mut events);
        events
    }

    fn reset(&mut self) {
        self.tokenizer.reset();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(fragments: &[&str]) -> Vec<TagEvent> {
        let mut parser = StreamingParser::new();
        let mut events = Vec::new();
        for fragment in fragments {
            events.extend(parser.process(fragment));
        }
        events.extend(parser.finalize());
        events
    }

    fn content_of(events: &[TagEvent]) -> String {
        events
            .iter()
            .filter_map(|e| match e {
                TagEvent::Content { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn structure_of(events: &[TagEvent]) -> Vec<TagEvent> {
        events
            .iter()
            .filter(|e| !e.is_content())
            .cloned()
            .collect()
    }

    #[test]
    fn test_single_fragment() {
        let events = run(&["<a>x</a>"]);
        assert_eq!(
            events,
            vec![
                TagEvent::start("a"),
                TagEvent::content("x"),
                TagEvent::end("a"),
            ]
        );
    }

    #[test]
    fn test_tags_reassemble_across_fragments() {
        let events = run(&["<a><b", "b>x</b", "b></a>"]);
        assert_eq!(
            events,
            vec![
                TagEvent::start("a"),
                TagEvent::start("bb"),
                TagEvent::content("x"),
                TagEvent::end("bb"),
                TagEvent::end("a"),
            ]
        );
    }

    #[test]
    fn test_split_invariance_one_char_fragments() {
        let input = "pre<a>body 文字</a><b><c>deep</c></b>post";
        let whole = run(&[input]);

        let fragments: Vec<String> = input.chars().map(|c| c.to_string()).collect();
        let refs: Vec<&str> = fragments.iter().map(|s| s.as_str()).collect();
        let split = run(&refs);

        assert_eq!(structure_of(&whole), structure_of(&split));
        assert_eq!(content_of(&whole), content_of(&split));
    }

    #[test]
    fn test_unmatched_close_still_emitted() {
        let events = run(&["</orphan>text"]);
        assert_eq!(
            events,
            vec![TagEvent::end("orphan"), TagEvent::content("text")]
        );
    }

    #[test]
    fn test_empty_tag_merges_surrounding_content() {
        let events = run(&["a<>b"]);
        assert_eq!(events, vec![TagEvent::content("ab")]);
    }

    #[test]
    fn test_finalize_flushes_partial_tag_as_content() {
        let mut parser = StreamingParser::new();
        let events = parser.process("x<unfin");
        assert_eq!(events, vec![TagEvent::content("x")]);
        assert_eq!(parser.finalize(), vec![TagEvent::content("<unfin")]);
    }

    #[test]
    fn test_no_data_loss_with_malformed_stream() {
        let events = run(&["a < b ", "and c> d <", "e"]);
        // "< b and c>" resolves as a tag named "b and c" (trimmed);
        // the trailing "<e" flushes verbatim on finalize.
        assert_eq!(content_of(&events), "a  d <e");
        assert_eq!(structure_of(&events).len(), 1);
    }

    #[test]
    fn test_reset_then_replay_is_identical() {
        let mut parser = StreamingParser::new();
        let mut first = parser.process("<a>one<b");
        first.extend(parser.finalize());

        parser.reset();
        let mut second = parser.process("<a>one<b");
        second.extend(parser.finalize());

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_fragment_produces_nothing() {
        let mut parser = StreamingParser::new();
        assert!(parser.process("").is_empty());
    }
}
