//! Structural event types
//!
//! Defines the events emitted during streaming recognition. All policies
//! share the same three-way vocabulary (start tag, end tag, content); the
//! schema-aware policy additionally annotates every event with its nesting
//! depth.
//!
//! Events are immutable and produced in the exact order the input implies.
//! A single logical content run may surface as several `Content` events when
//! it was delivered across multiple calls - consumers concatenate.

/// An event from the full or outer-only recognition policies
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TagEvent {
    /// An opening tag resolved: `<name>`
    StartTag { name: String },
    /// A closing tag resolved: `</name>`
    EndTag { name: String },
    /// A run of literal text between tags
    Content { text: String },
}

impl TagEvent {
    /// Create a start-tag event
    #[inline]
    pub fn start(name: impl Into<String>) -> Self {
        TagEvent::StartTag { name: name.into() }
    }

    /// Create an end-tag event
    #[inline]
    pub fn end(name: impl Into<String>) -> Self {
        TagEvent::EndTag { name: name.into() }
    }

    /// Create a content event
    #[inline]
    pub fn content(text: impl Into<String>) -> Self {
        TagEvent::Content { text: text.into() }
    }

    /// Check if this is a start-tag event
    #[inline]
    pub fn is_start_tag(&self) -> bool {
        matches!(self, TagEvent::StartTag { .. })
    }

    /// Check if this is an end-tag event
    #[inline]
    pub fn is_end_tag(&self) -> bool {
        matches!(self, TagEvent::EndTag { .. })
    }

    /// Check if this is a content event
    #[inline]
    pub fn is_content(&self) -> bool {
        matches!(self, TagEvent::Content { .. })
    }

    /// Get the tag name if this is a start or end tag
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            TagEvent::StartTag { name } | TagEvent::EndTag { name } => Some(name),
            TagEvent::Content { .. } => None,
        }
    }
}

/// An event from the schema-aware recognition policy
///
/// `depth` is the number of accepted ancestor tags enclosing the event: the
/// open-tag stack length measured before the push for a start tag and after
/// the pop for an end tag (these coincide).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TreeEvent {
    /// An accepted opening tag
    StartTag { name: String, depth: usize },
    /// An accepted closing tag
    EndTag { name: String, depth: usize },
    /// Literal text, including any rejected subtree folded back into content
    Content { text: String, depth: usize },
}

impl TreeEvent {
    /// Create a start-tag event
    #[inline]
    pub fn start(name: impl Into<String>, depth: usize) -> Self {
        TreeEvent::StartTag {
            name: name.into(),
            depth,
        }
    }

    /// Create an end-tag event
    #[inline]
    pub fn end(name: impl Into<String>, depth: usize) -> Self {
        TreeEvent::EndTag {
            name: name.into(),
            depth,
        }
    }

    /// Create a content event
    #[inline]
    pub fn content(text: impl Into<String>, depth: usize) -> Self {
        TreeEvent::Content {
            text: text.into(),
            depth,
        }
    }

    /// Check if this is a start-tag event
    #[inline]
    pub fn is_start_tag(&self) -> bool {
        matches!(self, TreeEvent::StartTag { .. })
    }

    /// Check if this is an end-tag event
    #[inline]
    pub fn is_end_tag(&self) -> bool {
        matches!(self, TreeEvent::EndTag { .. })
    }

    /// Check if this is a content event
    #[inline]
    pub fn is_content(&self) -> bool {
        matches!(self, TreeEvent::Content { .. })
    }

    /// Get the tag name if this is a start or end tag
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            TreeEvent::StartTag { name, .. } | TreeEvent::EndTag { name, .. } => Some(name),
            TreeEvent::Content { .. } => None,
        }
    }

    /// Nesting depth at the moment of the event
    #[inline]
    pub fn depth(&self) -> usize {
        match self {
            TreeEvent::StartTag { depth, .. }
            | TreeEvent::EndTag { depth, .. }
            | TreeEvent::Content { depth, .. } => *depth,
        }
    }
}
