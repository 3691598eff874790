//! Block-level input surface for the outline parser.
//!
//! The parser consumes an ordered sequence of [`Block`] values rather than
//! raw markup, so any front end that can produce this sequence (the bundled
//! markdown front end, or a synthetic one in tests) can drive it.

/// A block-level element of the source document, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A heading line with its outline depth (2-4).
    Heading {
        /// Outline depth of the heading.
        level: u8,
        /// Heading display text.
        text: String,
    },

    /// A paragraph of inline elements.
    Paragraph(Vec<Inline>),

    /// An ordered or unordered list.
    List {
        /// True for numbered lists.
        ordered: bool,
        /// Inline runs, one per list item.
        items: Vec<Vec<Inline>>,
    },

    /// A preformatted block, verbatim.
    Pre(String),
}

/// An inline markup element within a paragraph or list item.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// A raw text run. May contain newlines; the parser normalizes them.
    Text(String),

    /// A hyperlink with its unresolved target.
    Link {
        /// Link display text.
        text: String,
        /// Target as written in the source (possibly relative).
        location: String,
    },

    /// An italicized span.
    Italic(String),

    /// An inline code span.
    Code(String),
}
