//! Event handler layer
//!
//! Callback traits and convenience functions for consumers that want to
//! iterate a whole chunk sequence and react per event instead of collecting
//! event vectors themselves. All methods have default no-op bodies, so a
//! handler implements only what it cares about.

use crate::events::{TagEvent, TreeEvent};
use crate::schema::TagSchema;
use crate::strategy::{ChunkParser, OuterParser, StreamingParser, TreeParser};

/// Handler for two-field events (full and outer policies)
pub trait TagHandler {
    /// An opening tag resolved
    fn on_start_tag(&mut self, _name: &str) {}

    /// A closing tag resolved
    fn on_end_tag(&mut self, _name: &str) {}

    /// A run of content
    fn on_content(&mut self, _text: &str) {}

    /// Dispatch one event to the matching method
    fn on_event(&mut self, event: &TagEvent) {
        match event {
            TagEvent::StartTag { name } => self.on_start_tag(name),
            TagEvent::EndTag { name } => self.on_end_tag(name),
            TagEvent::Content { text } => self.on_content(text),
        }
    }
}

/// Handler for depth-annotated events (tree policy)
pub trait TreeHandler {
    /// An accepted opening tag
    fn on_start_tag(&mut self, _name: &str, _depth: usize) {}

    /// An accepted closing tag
    fn on_end_tag(&mut self, _name: &str, _depth: usize) {}

    /// A run of content, including any rejected subtree
    fn on_content(&mut self, _text: &str, _depth: usize) {}

    /// Dispatch one event to the matching method
    fn on_event(&mut self, event: &TreeEvent) {
        match event {
            TreeEvent::StartTag { name, depth } => self.on_start_tag(name, *depth),
            TreeEvent::EndTag { name, depth } => self.on_end_tag(name, *depth),
            TreeEvent::Content { text, depth } => self.on_content(text, *depth),
        }
    }
}

/// Parse a chunk sequence with the full policy, dispatching every event
pub fn parse_stream<'a, I, H>(chunks: I, handler: &mut H)
where
    I: IntoIterator<Item = &'a str>,
    H: TagHandler,
{
    let mut parser = StreamingParser::new();
    for chunk in chunks {
        for event in parser.process(chunk) {
            handler.on_event(&event);
        }
    }
    for event in parser.finalize() {
        handler.on_event(&event);
    }
}

/// Parse a chunk sequence with the outer-only policy
pub fn parse_outer_stream<'a, I, H>(chunks: I, handler: &mut H)
where
    I: IntoIterator<Item = &'a str>,
    H: TagHandler,
{
    let mut parser = OuterParser::new();
    for chunk in chunks {
        for event in parser.process(chunk) {
            handler.on_event(&event);
        }
    }
    for event in parser.finalize() {
        handler.on_event(&event);
    }
}

/// Parse a chunk sequence with the schema-aware policy
///
/// Schema construction (and its validation errors) stay with the caller.
pub fn parse_tree_stream<'a, I, H>(chunks: I, schema: &TagSchema, handler: &mut H)
where
    I: IntoIterator<Item = &'a str>,
    H: TreeHandler,
{
    let mut parser = TreeParser::new(schema.clone());
    for chunk in chunks {
        for event in parser.process(chunk) {
            handler.on_event(&event);
        }
    }
    for event in parser.finalize() {
        handler.on_event(&event);
    }
}
