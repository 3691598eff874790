//! Keyword index and search for refdex.
//!
//! This crate wraps a parsed [`Outline`] in a frozen [`Reference`]: the
//! outline plus a hand-built inverted index from lowercase word to the
//! nodes whose direct content contains it. Construction happens once at
//! startup; afterward the aggregate is immutable and `search`/`render`
//! may be called concurrently without coordination.
//!
//! To refresh the underlying document, build a new `Reference` off to the
//! side and swap the shared handle; in-flight readers of the old instance
//! remain valid.

#![warn(missing_docs)]

mod error;
mod keyword;
mod search;

use std::collections::HashMap;

use refdex_document::{Node, NodeId, Outline, Rendered};

pub use error::IndexError;

/// The frozen root aggregate: outline tree, heading lookup, and keyword
/// inverted index.
#[derive(Debug, Clone)]
pub struct Reference {
    /// The parsed outline tree with its heading table.
    outline: Outline,
    /// Lowercase word to nodes containing it in their direct content,
    /// document-ordered and duplicate-free.
    keywords: HashMap<String, Vec<NodeId>>,
}

impl Reference {
    /// Builds the index over a parsed outline.
    ///
    /// Fails when the outline is empty; a process must refuse to serve
    /// queries rather than run on an absent index.
    pub fn build(outline: Outline) -> Result<Self, IndexError> {
        if outline.node_count() == 0 {
            return Err(IndexError::EmptyOutline);
        }
        let keywords = keyword::build_keywords(&outline);
        Ok(Self { outline, keywords })
    }

    /// Returns the underlying outline.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Returns the node behind a handle.
    pub fn node(&self, id: NodeId) -> &Node {
        self.outline.node(id)
    }

    /// Looks up a node by exact heading text, independent of search.
    pub fn lookup(&self, heading: &str) -> Option<NodeId> {
        self.outline.heading(heading)
    }

    /// Returns the posting list for a lowercase word.
    pub fn postings(&self, word: &str) -> &[NodeId] {
        self.keywords.get(word).map_or(&[], Vec::as_slice)
    }

    /// Answers a free-text query with ranked node handles.
    pub fn search(&self, query: &str) -> Vec<NodeId> {
        search::search(&self.outline, &self.keywords, query)
    }

    /// Renders a node under a byte budget.
    pub fn render(&self, id: NodeId, limit: usize) -> Rendered {
        self.outline.render(id, limit)
    }
}
