//! Document model and outline parsing for refdex.
//!
//! This crate turns one long-form structured document into an immutable
//! outline tree:
//! - a closed [`Note`] content model (headings, links, lists, code,
//!   preformatted blocks, plain text)
//! - a [`Block`] stream input surface, with a bundled markdown front end
//! - a cursor-per-level parser producing the [`Outline`] arena with its
//!   heading lookup table
//! - a budget-bounded recursive renderer with a truncation signal
//!
//! Everything is built once and read-only afterward; cross references hold
//! [`NodeId`] handles into the arena.

#![warn(missing_docs)]

mod block;
mod error;
mod markdown;
mod node;
mod note;
mod parse;
mod render;

pub use block::{Block, Inline};
pub use error::DocumentError;
pub use markdown::parse_markdown;
pub use node::{Node, NodeId, Outline, PreorderIter};
pub use note::{Note, Paragraph};
pub use parse::{LinkContext, load_file, parse_blocks, parse_document};
pub use render::Rendered;
