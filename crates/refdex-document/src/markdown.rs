//! Markdown front end producing the parser's block stream.
//!
//! Converts raw markdown into the [`Block`] sequence the outline parser
//! consumes. Heading levels outside the outline's 2-4 range are clamped into
//! it, so an h1 document title becomes a top-level outline node and h5/h6
//! headings fold into the deepest level.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::block::{Block, Inline};

/// Parses markdown content into an ordered block sequence.
pub fn parse_markdown(content: &str) -> Vec<Block> {
    let mut collector = BlockCollector::default();
    for event in Parser::new(content) {
        collector.push(event);
    }
    collector.blocks
}

/// Converts a pulldown-cmark heading level to an outline depth in 2..=4.
fn clamp_level(level: HeadingLevel) -> u8 {
    let raw = match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    };
    raw.clamp(2, 4)
}

/// Event-stream accumulator turning pulldown-cmark events into blocks.
#[derive(Default)]
struct BlockCollector {
    /// Completed blocks in source order.
    blocks: Vec<Block>,
    /// Open heading: clamped level and accumulated text.
    heading: Option<(u8, String)>,
    /// Open preformatted block text.
    pre: Option<String>,
    /// Open link: target and accumulated display text.
    link: Option<(String, String)>,
    /// Open emphasis span text.
    italic: Option<String>,
    /// Inline run of the open paragraph or list item.
    inlines: Option<Vec<Inline>>,
    /// Open list: ordered flag and completed items.
    list: Option<(bool, Vec<Vec<Inline>>)>,
    /// Nesting depth of list tags; nested lists flatten into the outermost.
    list_depth: usize,
}

impl BlockCollector {
    /// Feeds one parser event into the accumulator.
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.code(&code),
            Event::SoftBreak | Event::HardBreak => self.text("\n"),
            _ => {}
        }
    }

    /// Handles an opening tag.
    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.heading = Some((clamp_level(level), String::new()));
            }
            Tag::CodeBlock(_) => {
                self.pre = Some(String::new());
            }
            Tag::Paragraph => {
                // Paragraphs inside list items feed the open item run.
                if self.list_depth == 0 {
                    self.inlines = Some(Vec::new());
                }
            }
            Tag::List(start) => {
                if self.list_depth == 0 {
                    self.list = Some((start.is_some(), Vec::new()));
                }
                self.list_depth += 1;
            }
            Tag::Item => {
                self.inlines = Some(Vec::new());
            }
            Tag::Link { dest_url, .. } => {
                if self.heading.is_none() {
                    self.link = Some((dest_url.to_string(), String::new()));
                }
            }
            Tag::Emphasis => {
                if self.heading.is_none() && self.link.is_none() {
                    self.italic = Some(String::new());
                }
            }
            _ => {}
        }
    }

    /// Handles a closing tag, completing the matching accumulator.
    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                if let Some((level, text)) = self.heading.take() {
                    self.blocks.push(Block::Heading { level, text });
                }
            }
            TagEnd::CodeBlock => {
                if let Some(text) = self.pre.take() {
                    self.blocks.push(Block::Pre(text.trim().to_string()));
                }
            }
            TagEnd::Paragraph => {
                if self.list_depth == 0
                    && let Some(inlines) = self.inlines.take()
                {
                    self.blocks.push(Block::Paragraph(inlines));
                }
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0
                    && let Some((ordered, items)) = self.list.take()
                {
                    self.blocks.push(Block::List { ordered, items });
                }
            }
            TagEnd::Item => {
                if let (Some(inlines), Some((_, items))) =
                    (self.inlines.take(), self.list.as_mut())
                {
                    items.push(inlines);
                }
            }
            TagEnd::Link => {
                if let Some((location, text)) = self.link.take() {
                    self.emit(Inline::Link { text, location });
                }
            }
            TagEnd::Emphasis => {
                if let Some(text) = self.italic.take() {
                    self.emit(Inline::Italic(text));
                }
            }
            _ => {}
        }
    }

    /// Routes raw text to the innermost open accumulator.
    fn text(&mut self, text: &str) {
        if let Some((_, heading)) = self.heading.as_mut() {
            heading.push_str(text);
        } else if let Some(pre) = self.pre.as_mut() {
            pre.push_str(text);
        } else if let Some((_, link_text)) = self.link.as_mut() {
            link_text.push_str(text);
        } else if let Some(italic) = self.italic.as_mut() {
            italic.push_str(text);
        } else {
            self.emit(Inline::Text(text.to_string()));
        }
    }

    /// Routes an inline code span; inside headings and links the span's text
    /// joins the surrounding display text.
    fn code(&mut self, code: &str) {
        if let Some((_, heading)) = self.heading.as_mut() {
            heading.push_str(code);
        } else if let Some((_, link_text)) = self.link.as_mut() {
            link_text.push_str(code);
        } else {
            self.emit(Inline::Code(code.to_string()));
        }
    }

    /// Appends an inline element to the open paragraph or list item.
    fn emit(&mut self, inline: Inline) {
        if let Some(inlines) = self.inlines.as_mut() {
            inlines.push(inline);
        }
    }
}
