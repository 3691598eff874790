//! Renderable content attached to outline nodes.
//!
//! A [`Note`] is one piece of inline or block content under a heading. The
//! variant set is closed and matched exhaustively by the renderer and the
//! keyword indexer; adding a variant is a deliberate model change, not an
//! extension point.

use serde::Serialize;

/// An ordered run of notes, used for inline sequences and list items.
pub type Paragraph = Vec<Note>;

/// One piece of renderable content attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Note {
    /// A section heading line.
    Heading {
        /// Outline depth of the heading (2-4).
        level: u8,
        /// Heading display text.
        text: String,
    },

    /// A hyperlink with resolved target.
    Link {
        /// Link display text.
        text: String,
        /// Absolute or already-resolved target URL.
        location: String,
    },

    /// An ordered or unordered list.
    List {
        /// True for numbered lists.
        ordered: bool,
        /// One paragraph per list item.
        items: Vec<Paragraph>,
    },

    /// An inline run of notes (text, links, emphasis, code spans).
    Paragraph(Paragraph),

    /// An inline code span.
    Code(String),

    /// An italicized span.
    Italic(String),

    /// A preformatted block.
    Pre(String),

    /// A raw text run.
    Text(String),
}

impl Note {
    /// Renders this note to a markdown-like string.
    ///
    /// `Paragraph` and `List` recurse into their parts; the remaining
    /// variants are terminal.
    pub fn markdown(&self) -> String {
        match self {
            Self::Heading { level, text } => heading_markdown(*level, text),
            Self::Link { text, location } => format!("[{text}]({location})"),
            Self::List { ordered, items } => list_markdown(*ordered, items),
            Self::Paragraph(parts) => paragraph_markdown(parts),
            Self::Code(code) => code_markdown(code),
            Self::Italic(text) => format!("*{text}*"),
            Self::Pre(text) => format!("```\n{text}\n```\n"),
            Self::Text(text) => text.clone(),
        }
    }

    /// Appends the plain textual surface of this note to `out`.
    ///
    /// Headings and links contribute their display text, composites recurse
    /// into their parts, and the terminal variants contribute their literal
    /// text. This is the surface the keyword indexer tokenizes.
    pub fn collect_text(&self, out: &mut String) {
        match self {
            Self::Heading { text, .. } | Self::Link { text, .. } => {
                push_separated(out, text);
            }
            Self::List { items, .. } => {
                for item in items {
                    for part in item {
                        part.collect_text(out);
                    }
                }
            }
            Self::Paragraph(parts) => {
                for part in parts {
                    part.collect_text(out);
                }
            }
            Self::Code(text) | Self::Italic(text) | Self::Pre(text) | Self::Text(text) => {
                push_separated(out, text);
            }
        }
    }
}

/// Appends `text` to `out` with a separating space when needed.
fn push_separated(out: &mut String, text: &str) {
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(text);
}

/// Renders a heading line with `#` markers matching its outline depth.
fn heading_markdown(level: u8, text: &str) -> String {
    let marks = "#".repeat(usize::from(level));
    format!("{marks} {text}\n")
}

/// Renders an inline code span, padding bare backticks so the delimiters
/// survive.
fn code_markdown(code: &str) -> String {
    if code == "``" {
        return "` `` `".to_string();
    }
    format!("`{code}`")
}

/// Renders a paragraph by concatenating its parts.
fn paragraph_markdown(parts: &[Note]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.markdown(),
        _ => {
            let mut out = String::new();
            for part in parts {
                out.push_str(&part.markdown());
            }
            let mut trimmed = out.trim().to_string();
            trimmed.push('\n');
            trimmed
        }
    }
}

/// Returns the item prefix for a list, numbered when ordered.
fn list_prefix(ordered: bool, n: usize) -> String {
    if ordered {
        return format!("{n}. ");
    }
    "- ".to_string()
}

/// Renders a list with one prefixed line per item.
fn list_markdown(ordered: bool, items: &[Paragraph]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&list_prefix(ordered, i + 1));
        out.push_str(&paragraph_markdown(item));
    }
    out
}
