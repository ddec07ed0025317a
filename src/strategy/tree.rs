//! Schema-aware recognition policy
//!
//! Accepts or rejects each resolved tag against a declared parent-to-children
//! hierarchy. An accepted tag becomes structural and carries its nesting
//! depth; a rejected tag and its entire subtree fold back into a single
//! content span at the depth where the rejection happened. Pseudo-tags in
//! model output therefore never produce structural events.

use tracing::{debug, trace};

use crate::core::tokenizer::{Token, Tokenizer};
use crate::events::TreeEvent;
use crate::schema::TagSchema;
use crate::strategy::ChunkParser;

/// Streaming parser that validates tags against a [`TagSchema`]
///
/// State: the open-tag stack (accepted tags only), a pending content
/// accumulator, and the unmatched depth inside a rejected subtree. The
/// accumulator flushes before every accepted structural event, when a
/// rejected subtree closes, and at the end of a call when no rejected
/// subtree is open - so every content event has a well-defined depth.
#[derive(Debug)]
pub struct TreeParser {
    schema: TagSchema,
    tokenizer: Tokenizer,
    /// Names of currently open accepted tags, bottom first
    stack: Vec<String>,
    /// Nesting depth inside a rejected subtree; 0 means none is open
    invalid_depth: usize,
    pending: String,
}

impl TreeParser {
    /// Create a parser for the given hierarchy
    pub fn new(schema: TagSchema) -> Self {
        TreeParser {
            schema,
            tokenizer: Tokenizer::new(),
            stack: Vec::new(),
            invalid_depth: 0,
            pending: String::new(),
        }
    }

    /// The configured schema
    pub fn schema(&self) -> &TagSchema {
        &self.schema
    }

    /// Render the configured hierarchy for diagnostics/logging
    ///
    /// Not part of the parsing contract.
    pub fn describe_schema(&self) -> String {
        self.schema.describe()
    }

    /// Current nesting depth (number of open accepted tags)
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn flush_pending(&mut self, events: &mut Vec<TreeEvent>) {
        if !self.pending.is_empty() {
            events.push(TreeEvent::content(
                std::mem::take(&mut self.pending),
                self.stack.len(),
            ));
        }
    }
}

impl ChunkParser for TreeParser {
    type Event = TreeEvent;

    fn process(&mut self, fragment: &str) -> Vec<TreeEvent> {
        let mut events = Vec::new();

        for token in self.tokenizer.feed(fragment) {
            match token {
                Token::Text(text) => self.pending.push_str(&text),

                Token::Open { name, raw } => {
                    if self.invalid_depth > 0 {
                        // Inside a rejected subtree: the tag is content.
                        self.invalid_depth += 1;
                        self.pending.push_str(&raw);
                    } else if self
                        .schema
                        .allows(self.stack.last().map(String::as_str), &name)
                    {
                        self.flush_pending(&mut events);
                        events.push(TreeEvent::start(&name, self.stack.len()));
                        self.stack.push(name);
                    } else {
                        trace!(tag = %name, depth = self.stack.len(), "rejecting subtree");
                        self.invalid_depth = 1;
                        self.pending.push_str(&raw);
                    }
                }

                Token::Close { name, raw } => {
                    if self.invalid_depth > 0 {
                        self.invalid_depth -= 1;
                        self.pending.push_str(&raw);
                        if self.invalid_depth == 0 {
                            // The whole rejected subtree flushes as one span
                            // at the depth it started at (the stack did not
                            // move while it was open).
                            self.flush_pending(&mut events);
                        }
                    } else if self.stack.last().is_some_and(|top| top == &name) {
                        self.flush_pending(&mut events);
                        self.stack.pop();
                        events.push(TreeEvent::end(&name, self.stack.len()));
                    } else {
                        // Mismatched close with no rejected subtree open:
                        // literal content, never an error.
                        self.pending.push_str(&raw);
                    }
                }
            }
        }

        if self.invalid_depth == 0 {
            self.flush_pending(&mut events);
        }
        events
    }

    fn finalize(&mut self) -> Vec<TreeEvent> {
        if let Some(Token::Text(text)) = self.tokenizer.finalize() {
            debug!(len = text.len(), "flushing unterminated markup as content");
            self.pending.push_str(&text);
        }

        let mut events = Vec::new();
        self.flush_pending(&mut events);
        self.stack.clear();
        self.invalid_depth = 0;
        events
    }

    fn reset(&mut self) {
        self.tokenizer.reset();
        self.stack.clear();
        self.invalid_depth = 0;
        self.pending.clear();
    }
}
