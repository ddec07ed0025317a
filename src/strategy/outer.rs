//! Outer-only recognition policy
//!
//! Only the first opening tag is structural. Everything after it is opaque
//! content up to the literal closing sequence `</name>`, found by a
//! streaming substring search that survives the pattern being split across
//! fragment boundaries.
//!
//! Matching is purely literal: a same-named tag nested inside the body will
//! close the outer tag at the first occurrence of the closing sequence.
//! That is preserved behavior of this policy, not a defect; callers that
//! need nesting awareness use the tree policy instead.

use memchr::memchr;
use tracing::{debug, trace};

use crate::core::matcher::StreamMatcher;
use crate::core::tokenizer::{resolve_tag, Token};
use crate::events::TagEvent;
use crate::strategy::ChunkParser;

/// Recognition states for the outer-only policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OuterState {
    /// Outside any structural tag, scanning for `<`
    Idle,
    /// Inside a candidate tag, waiting for its `>`
    InTag,
    /// Inside the captured outer tag, searching for its closing sequence
    Body,
}

/// Streaming parser that treats only the outermost tag as structural
///
/// The carry buffer holds at most one unterminated `<...` construct (while
/// `InTag`) or a partial-match suffix of the closing pattern no longer than
/// pattern length - 1 bytes (while `Body`); everything else flushes as
/// content at the end of each call.
#[derive(Debug, Default)]
pub struct OuterParser {
    state: OuterState,
    /// Unresolved carry-over: partial tag or partial closing-pattern suffix
    buffer: String,
    /// Resolved content not yet emitted
    pending: String,
    /// Captured outer tag name and its closing-pattern matcher
    outer: Option<(String, StreamMatcher)>,
}

impl Default for OuterState {
    fn default() -> Self {
        OuterState::Idle
    }
}

impl OuterParser {
    /// Create a new parser with no retained state
    pub fn new() -> Self {
        OuterParser {
            state: OuterState::Idle,
            buffer: String::new(),
            pending: String::new(),
            outer: None,
        }
    }

    /// Name of the currently open outer tag, if any
    pub fn current_tag(&self) -> Option<&str> {
        self.outer.as_ref().map(|(name, _)| name.as_str())
    }
}

impl ChunkParser for OuterParser {
    type Event = TagEvent;

    fn process(&mut self, fragment: &str) -> Vec<TagEvent> {
        self.buffer.push_str(fragment);
        let mut events = Vec::new();

        loop {
            match self.state {
                OuterState::Idle => match memchr(b'<', self.buffer.as_bytes()) {
                    None => {
                        self.pending.push_str(&self.buffer);
                        self.buffer.clear();
                        break;
                    }
                    Some(lt) => {
                        self.pending.push_str(&self.buffer[..lt]);
                        self.buffer.drain(..lt);
                        self.state = OuterState::InTag;
                    }
                },

                OuterState::InTag => {
                    // The buffer starts at the construct's '<'.
                    let Some(gt) = memchr(b'>', self.buffer.as_bytes()) else {
                        break;
                    };
                    match resolve_tag(&self.buffer[..gt]) {
                        Some(Token::Open { name, .. }) => {
                            if !self.pending.is_empty() {
                                events.push(TagEvent::content(std::mem::take(&mut self.pending)));
                            }
                            events.push(TagEvent::start(&name));
                            let matcher = StreamMatcher::new(format!("</{name}>"));
                            trace!(tag = %name, closing = %matcher.pattern(), "captured outer tag");
                            self.outer = Some((name, matcher));
                            self.state = OuterState::Body;
                        }
                        Some(Token::Close { raw, .. }) => {
                            // A closing tag with no outer tag open is not
                            // structural here; it folds into content.
                            self.pending.push_str(&raw);
                            self.state = OuterState::Idle;
                        }
                        Some(Token::Text(_)) | None => {
                            // Empty name: discarded, no event, no characters.
                            self.state = OuterState::Idle;
                        }
                    }
                    self.buffer.drain(..gt + 1);
                }

                OuterState::Body => {
                    let Some((name, matcher)) = &self.outer else {
                        self.state = OuterState::Idle;
                        continue;
                    };
                    match matcher.find(&self.buffer) {
                        Some(pos) => {
                            let pattern_len = matcher.len();
                            let name = name.clone();
                            self.pending.push_str(&self.buffer[..pos]);
                            if !self.pending.is_empty() {
                                events.push(TagEvent::content(std::mem::take(&mut self.pending)));
                            }
                            events.push(TagEvent::end(name));
                            self.buffer.drain(..pos + pattern_len);
                            self.outer = None;
                            self.state = OuterState::Idle;
                        }
                        None => {
                            // Keep only the suffix that may still grow into
                            // the closing pattern; the rest is body content.
                            let keep = matcher.retain_len(&self.buffer);
                            let cut = self.buffer.len() - keep;
                            self.pending.push_str(&self.buffer[..cut]);
                            self.buffer.drain(..cut);
                            break;
                        }
                    }
                }
            }
        }

        if !self.pending.is_empty() {
            events.push(TagEvent::content(std::mem::take(&mut self.pending)));
        }
        events
    }

    fn finalize(&mut self) -> Vec<TagEvent> {
        if !self.buffer.is_empty() {
            debug!(len = self.buffer.len(), "flushing retained tail as content");
            let tail = std::mem::take(&mut self.buffer);
            self.pending.push_str(&tail);
        }

        let mut events = Vec::new();
        if !self.pending.is_empty() {
            events.push(TagEvent::content(std::mem::take(&mut self.pending)));
        }
        self.outer = None;
        self.state = OuterState::Idle;
        events
    }

    fn reset(&mut self) {
        self.state = OuterState::Idle;
        self.buffer.clear();
        self.pending.clear();
        self.outer = None;
    }
}
