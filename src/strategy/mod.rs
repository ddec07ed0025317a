//! Recognition policies
//!
//! Three concrete engines over the shared tokenization substrate:
//! - Full: every well-formed tag at any depth is structural
//! - Outer: only the first tag is structural; its body is opaque content
//! - Tree: tags are accepted or rejected against a declared hierarchy
//!
//! Their internal state shapes differ (carry buffer vs pattern-match cursor
//! vs stack and invalid-subtree counter), so they share a trait rather than
//! a common base.

pub mod full;
pub mod outer;
pub mod tree;

pub use full::StreamingParser;
pub use outer::OuterParser;
pub use tree::TreeParser;

/// Shared contract of all recognition engines
///
/// One instance owns one logical stream. `process` incorporates a fragment
/// of any length (including empty) and returns the events that became
/// resolvable; it never fails, whatever the input looks like. `finalize`
/// drains all retained state (partial markup verbatim, pending content,
/// bookkeeping best-effort) and leaves the instance inert - calling
/// `process` afterwards without `reset` is unspecified and up to the caller
/// to guard.
pub trait ChunkParser {
    /// Event type produced by this policy
    type Event;

    /// Incorporate one fragment and return the newly resolvable events
    fn process(&mut self, fragment: &str) -> Vec<Self::Event>;

    /// Drain all retained state at end of stream
    fn finalize(&mut self) -> Vec<Self::Event>;

    /// Return to the freshly constructed state
    fn reset(&mut self);
}
