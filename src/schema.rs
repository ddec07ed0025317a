//! Tag hierarchy schema
//!
//! An immutable parent-to-children table driving acceptance in the
//! schema-aware policy. A tag is valid at the root when it is never listed
//! as any parent's child; it is valid beneath a parent only when that
//! parent's entry lists it. Absence from the table in a given position means
//! invalid in that position.
//!
//! Construction is the only place configuration errors surface; once built,
//! a schema never changes and never fails mid-stream.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Error raised while building a [`TagSchema`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A tag name was empty or contained a delimiter/whitespace character
    #[error("invalid tag name {0:?}: names must be non-empty and free of whitespace, '<', '>' and '/'")]
    InvalidName(String),
    /// Every declared tag appears as some parent's child, so nothing can
    /// ever open at the root
    #[error("hierarchy has no root: every declared tag appears as a child")]
    NoRoot,
}

/// Immutable tag hierarchy: parent name to the set of valid direct children
///
/// A tag may be listed under several parents, or under itself; nesting depth
/// is always derived from the engine's open-tag stack, never from the table.
#[derive(Debug, Clone, Default)]
pub struct TagSchema {
    /// parent -> valid direct children
    children: BTreeMap<String, BTreeSet<String>>,
    /// Names never listed as a child; the only tags valid with an empty stack
    roots: BTreeSet<String>,
}

impl TagSchema {
    /// Build a schema from `(parent, children)` entries
    ///
    /// An empty hierarchy is legal and rejects every tag.
    pub fn new<I, S>(hierarchy: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut mentioned: BTreeSet<String> = BTreeSet::new();
        let mut listed_as_child: BTreeSet<String> = BTreeSet::new();

        for (parent, kids) in hierarchy {
            let parent = parent.into();
            check_name(&parent)?;
            mentioned.insert(parent.clone());
            let entry = children.entry(parent).or_default();
            for kid in kids {
                let kid = kid.into();
                check_name(&kid)?;
                mentioned.insert(kid.clone());
                listed_as_child.insert(kid.clone());
                entry.insert(kid);
            }
        }

        let roots: BTreeSet<String> = mentioned
            .iter()
            .filter(|name| !listed_as_child.contains(*name))
            .cloned()
            .collect();

        if !mentioned.is_empty() && roots.is_empty() {
            return Err(SchemaError::NoRoot);
        }

        Ok(TagSchema { children, roots })
    }

    /// Build a schema from borrowed pairs, convenient for literals
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Result<Self, SchemaError> {
        Self::new(
            pairs
                .iter()
                .map(|(parent, kids)| {
                    (
                        parent.to_string(),
                        kids.iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect::<Vec<(String, Vec<String>)>>(),
        )
    }

    /// Check whether `name` may open with an empty stack
    #[inline]
    pub fn is_root(&self, name: &str) -> bool {
        self.roots.contains(name)
    }

    /// Check whether `child` may open directly beneath `parent`
    #[inline]
    pub fn is_child_of(&self, parent: &str, child: &str) -> bool {
        self.children
            .get(parent)
            .is_some_and(|kids| kids.contains(child))
    }

    /// Check whether `name` may open beneath the given parent context
    ///
    /// `None` means the stack is empty and only root tags are valid.
    pub fn allows(&self, parent: Option<&str>, name: &str) -> bool {
        match parent {
            None => self.is_root(name),
            Some(parent) => self.is_child_of(parent, name),
        }
    }

    /// Whether the schema declares no tags at all
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.roots.is_empty()
    }

    /// Render the configured hierarchy for diagnostics/logging
    ///
    /// Not part of the parsing contract. Self-recursive entries are marked
    /// rather than expanded so rendering always terminates.
    pub fn describe(&self) -> String {
        let mut out = String::from("tag hierarchy:\n");
        let mut path = Vec::new();
        for root in &self.roots {
            self.format_node(root, 0, &mut path, &mut out);
        }
        out
    }

    fn format_node(&self, name: &str, indent: usize, path: &mut Vec<String>, out: &mut String) {
        for _ in 0..indent {
            out.push_str("  ");
        }
        out.push_str("- ");
        out.push_str(name);
        if path.iter().any(|seen| seen == name) {
            out.push_str(" (recursive)\n");
            return;
        }
        out.push('\n');

        path.push(name.to_string());
        if let Some(kids) = self.children.get(name) {
            for kid in kids {
                self.format_node(kid, indent + 1, path, out);
            }
        }
        path.pop();
    }
}

fn check_name(name: &str) -> Result<(), SchemaError> {
    let ok = !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/'));
    if ok {
        Ok(())
    } else {
        Err(SchemaError::InvalidName(name.to_string()))
    }
}
