//! tagstream - streaming tag/content recognition for chunked text
//!
//! Incrementally recognizes `<name>`, `</name>` and the text between them in
//! quasi-XML that arrives in arbitrarily sized, arbitrarily split fragments
//! (single characters up to megabyte blocks), emitting structural events as
//! soon as they are unambiguous and never buffering a whole document. The
//! primary use case is reacting to structural markers (tool calls, sections)
//! in token-by-token language model output or any chunked transport.
//!
//! Policies:
//! - Full: every well-formed tag at any depth is structural ([`StreamingParser`])
//! - Outer: only the first tag is structural, its body is opaque ([`OuterParser`])
//! - Tree: tags validated against a declared hierarchy ([`TreeParser`])
//!
//! One engine instance owns one logical stream; feed fragments with
//! [`ChunkParser::process`] and drain retained state with
//! [`ChunkParser::finalize`] when the stream ends. No split point can lose
//! or duplicate a byte of input.
//!
//! ```
//! use tagstream::{ChunkParser, StreamingParser, TagEvent};
//!
//! let mut parser = StreamingParser::new();
//! let mut events = parser.process("<answer>42</ans");
//! events.extend(parser.process("wer>"));
//! events.extend(parser.finalize());
//!
//! assert_eq!(events, vec![
//!     TagEvent::start("answer"),
//!     TagEvent::content("42"),
//!     TagEvent::end("answer"),
//! ]);
//! ```

mod core;
mod events;
mod handler;
mod schema;
mod strategy;

pub use events::{TagEvent, TreeEvent};
pub use handler::{parse_outer_stream, parse_stream, parse_tree_stream, TagHandler, TreeHandler};
pub use schema::{SchemaError, TagSchema};
pub use strategy::{ChunkParser, OuterParser, StreamingParser, TreeParser};
