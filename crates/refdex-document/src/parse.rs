//! Outline construction from the block stream.
//!
//! The parser folds an ordered sequence of [`Block`]s into an [`Outline`]
//! by keeping at most one open cursor per outline level. A new heading
//! closes every cursor at its own level and deeper, then opens under the
//! cursor one level up; content blocks attach to the deepest open cursor.
//! Children are linked to their parent at open time, so document order is
//! preserved without an explicit fold at close.

use std::{collections::HashMap, fs, path::Path};

use crate::{
    block::{Block, Inline},
    error::DocumentError,
    markdown::parse_markdown,
    node::{Node, NodeId, Outline},
    note::{Note, Paragraph},
};

/// URLs that relative link targets resolve against.
#[derive(Debug, Clone, Default)]
pub struct LinkContext {
    /// Canonical URL of the document itself; fragment-only targets
    /// (`#Section`) resolve against this.
    pub page: String,
    /// Site base URL; root-relative targets (`/pkg/fmt`) resolve against
    /// this.
    pub site: String,
}

impl LinkContext {
    /// Creates a link context from the document and site URLs.
    pub fn new(page: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            site: site.into(),
        }
    }

    /// Resolves a link target as written in the source.
    pub fn resolve(&self, target: &str) -> String {
        if target.starts_with('#') {
            return format!("{}{}", self.page, target);
        }
        if target.starts_with('/') {
            return format!("{}{}", self.site, target);
        }
        target.to_string()
    }
}

/// Parses a block sequence into an outline.
pub fn parse_blocks(blocks: Vec<Block>, links: &LinkContext) -> Outline {
    let mut parser = OutlineParser::new(links);
    for block in blocks {
        parser.push(block);
    }
    parser.finish()
}

/// Parses markdown content into an outline via the bundled front end.
pub fn parse_document(content: &str, links: &LinkContext) -> Outline {
    parse_blocks(parse_markdown(content), links)
}

/// Reads and parses a markdown file into an outline.
pub fn load_file(path: &Path, links: &LinkContext) -> Result<Outline, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_document(&content, links))
}

/// Shallowest outline level.
const MIN_LEVEL: u8 = 2;
/// Deepest outline level.
const MAX_LEVEL: u8 = 4;

/// Cursor-per-level fold of the block stream.
struct OutlineParser<'a> {
    /// Link resolution context for inline anchors.
    links: &'a LinkContext,
    /// Node storage under construction.
    arena: Vec<Node>,
    /// Top-level nodes in document order.
    roots: Vec<NodeId>,
    /// Heading text to node, recorded when each node opens.
    headings: HashMap<String, NodeId>,
    /// Open cursors for levels 2, 3 and 4.
    open: [Option<NodeId>; 3],
}

/// Maps an outline level to its cursor slot.
fn slot(level: u8) -> usize {
    usize::from(level - MIN_LEVEL)
}

impl<'a> OutlineParser<'a> {
    /// Creates an empty parser.
    fn new(links: &'a LinkContext) -> Self {
        Self {
            links,
            arena: Vec::new(),
            roots: Vec::new(),
            headings: HashMap::new(),
            open: [None; 3],
        }
    }

    /// Consumes one block.
    fn push(&mut self, block: Block) {
        match block {
            Block::Heading { level, text } => {
                let level = self.effective_level(level);
                self.open_heading(level, text);
            }
            Block::Paragraph(inlines) => {
                let paragraph = self.parse_inlines(inlines);
                self.attach(Note::Paragraph(paragraph));
            }
            Block::List { ordered, items } => {
                let items: Vec<Paragraph> = items
                    .into_iter()
                    .map(|item| self.parse_inlines(item))
                    .collect();
                self.attach(Note::List { ordered, items });
            }
            Block::Pre(text) => {
                self.attach(Note::Pre(text));
            }
        }
    }

    /// Finishes the parse, freezing the outline.
    fn finish(self) -> Outline {
        Outline::from_parts(self.arena, self.roots, self.headings)
    }

    /// Clamps a heading level so it never opens more than one level below
    /// the deepest open cursor. An h4 arriving with only an h2 open becomes
    /// level 3; any heading before the first h2 becomes level 2.
    fn effective_level(&self, level: u8) -> u8 {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        match self.deepest_open_level() {
            Some(deepest) => level.min(deepest + 1),
            None => MIN_LEVEL,
        }
    }

    /// Returns the level of the deepest open cursor.
    fn deepest_open_level(&self) -> Option<u8> {
        (MIN_LEVEL..=MAX_LEVEL)
            .rev()
            .find(|&level| self.open[slot(level)].is_some())
    }

    /// Returns the deepest open cursor.
    fn deepest_open(&self) -> Option<NodeId> {
        self.deepest_open_level()
            .and_then(|level| self.open[slot(level)])
    }

    /// Opens a new node for a heading, closing cursors at its level and
    /// deeper first.
    fn open_heading(&mut self, level: u8, text: String) {
        for l in level..=MAX_LEVEL {
            self.open[slot(l)] = None;
        }

        let id = self.alloc(Node::new(level, text.clone()));
        // A node's own heading line is part of its direct content, so the
        // keyword index sees heading words and the renderer prints the
        // heading above the body.
        self.arena[id.index()].content.push(Note::Heading {
            level,
            text: text.clone(),
        });
        self.headings.insert(text, id);

        if level == MIN_LEVEL {
            self.roots.push(id);
        } else if let Some(parent) = self.open[slot(level - 1)] {
            self.arena[parent.index()].children.push(id);
        } else {
            // Unreachable after effective_level clamping; keep the node
            // reachable rather than dropping it.
            self.roots.push(id);
        }

        self.open[slot(level)] = Some(id);
    }

    /// Attaches a content note to the deepest open node, opening the
    /// synthetic preamble bucket when nothing is open yet.
    fn attach(&mut self, note: Note) {
        let target = match self.deepest_open() {
            Some(id) => id,
            None => self.open_preamble(),
        };
        self.arena[target.index()].content.push(note);
    }

    /// Opens the synthetic level-2 bucket for content that appears before
    /// any heading. Registered under the empty heading.
    fn open_preamble(&mut self) -> NodeId {
        let id = self.alloc(Node::new(MIN_LEVEL, String::new()));
        self.headings.insert(String::new(), id);
        self.roots.push(id);
        self.open[slot(MIN_LEVEL)] = Some(id);
        id
    }

    /// Allocates a node in the arena.
    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.arena.len());
        self.arena.push(node);
        id
    }

    /// Converts inline elements to notes, normalizing newlines in raw text
    /// runs and resolving link targets.
    fn parse_inlines(&self, inlines: Vec<Inline>) -> Paragraph {
        inlines
            .into_iter()
            .map(|inline| match inline {
                Inline::Text(text) => Note::Text(text.replace('\n', " ")),
                Inline::Link { text, location } => Note::Link {
                    text,
                    location: self.links.resolve(&location),
                },
                Inline::Italic(text) => Note::Italic(text),
                Inline::Code(text) => Note::Code(text),
            })
            .collect()
    }
}
