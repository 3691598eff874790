//! Outline tree structures.
//!
//! A parsed document is an [`Outline`]: an arena of [`Node`]s plus the
//! ordered list of top-level nodes and a heading-text lookup map. Cross
//! references (heading lookup, the keyword index) hold [`NodeId`] handles
//! into the arena rather than owning copies, so they can never desynchronize
//! from the tree.

use std::collections::HashMap;

use serde::Serialize;

use crate::note::Note;

/// Stable handle to a node in an [`Outline`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Constructs a handle from an arena slot.
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Returns the arena slot this handle points at.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One heading-anchored subtree unit of the outline.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Outline depth, one of 2, 3 or 4.
    pub level: u8,
    /// Display text of this node's heading. Empty only for the synthetic
    /// preamble bucket.
    pub heading: String,
    /// Content attached directly under this heading, before any sub-heading.
    pub content: Vec<Note>,
    /// Immediate children, each one level deeper, in document order.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Creates an empty node at the given depth.
    pub(crate) fn new(level: u8, heading: String) -> Self {
        Self {
            level,
            heading,
            content: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// A parsed document: node arena, top-level order, and heading lookup.
///
/// Immutable once the parser returns it; all query-side structures reference
/// nodes through [`NodeId`].
#[derive(Debug, Clone)]
pub struct Outline {
    /// Node storage; handles index into this.
    arena: Vec<Node>,
    /// Top-level (level-2) nodes in document order.
    roots: Vec<NodeId>,
    /// Exact heading text to node, across all levels.
    headings: HashMap<String, NodeId>,
}

impl Outline {
    /// Creates an outline from parser-built parts.
    pub(crate) fn from_parts(
        arena: Vec<Node>,
        roots: Vec<NodeId>,
        headings: HashMap<String, NodeId>,
    ) -> Self {
        Self {
            arena,
            roots,
            headings,
        }
    }

    /// Returns the node behind a handle.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id.index()]
    }

    /// Returns the top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Looks up a node by its exact heading text.
    pub fn heading(&self, text: &str) -> Option<NodeId> {
        self.headings.get(text).copied()
    }

    /// Returns the heading lookup table.
    pub fn headings(&self) -> &HashMap<String, NodeId> {
        &self.headings
    }

    /// Returns the total number of nodes in the outline.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns all nodes in pre-order (depth-first, document order).
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            outline: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Concatenates the plain text of a node's direct content.
    ///
    /// Descendants are deliberately excluded; this is the surface the
    /// keyword index and the search substring boost operate on.
    pub fn direct_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for note in &self.node(id).content {
            note.collect_text(&mut out);
        }
        out
    }
}

/// Pre-order iterator over outline node handles.
pub struct PreorderIter<'a> {
    /// The outline being walked.
    outline: &'a Outline,
    /// Nodes still to visit, rightmost siblings pushed first.
    stack: Vec<NodeId>,
}

impl Iterator for PreorderIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        for child in self.outline.node(id).children.iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}
