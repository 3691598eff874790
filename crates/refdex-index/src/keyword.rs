//! Inverted keyword index construction.
//!
//! One depth-first walk over the outline populates the word-to-nodes map.
//! A node is indexed for the words of its own direct content only, never
//! for words that appear solely in a descendant; a term occurring only in
//! a level-4 body does not make its level-2 ancestor match.

use std::collections::{HashMap, HashSet};

use refdex_document::{NodeId, Outline};

/// Builds the inverted index: lowercase word to nodes containing it, in
/// first-encountered document order, duplicate-free.
pub(crate) fn build_keywords(outline: &Outline) -> HashMap<String, Vec<NodeId>> {
    let mut keywords: HashMap<String, Vec<NodeId>> = HashMap::new();
    // Transient per-word seen-sets; dropped once the build completes.
    let mut seen: HashMap<String, HashSet<NodeId>> = HashMap::new();

    for id in outline.iter_preorder() {
        for note in &outline.node(id).content {
            let mut text = String::new();
            note.collect_text(&mut text);
            for token in text.split_whitespace() {
                let word = token.to_lowercase();
                if seen.entry(word.clone()).or_default().insert(id) {
                    keywords.entry(word).or_default().push(id);
                }
            }
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use refdex_document::{Block, Inline, LinkContext, parse_blocks};

    use super::*;

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    fn para(text: &str) -> Block {
        Block::Paragraph(vec![Inline::Text(text.into())])
    }

    fn build(blocks: Vec<Block>) -> (Outline, HashMap<String, Vec<NodeId>>) {
        let outline = parse_blocks(blocks, &LinkContext::default());
        let keywords = build_keywords(&outline);
        (outline, keywords)
    }

    #[test]
    fn test_words_map_to_owning_node() {
        let (outline, keywords) = build(vec![
            heading(2, "Types"),
            para("a type determines a set of values"),
        ]);

        let types = outline.heading("Types").unwrap();
        assert_eq!(keywords["type"], vec![types]);
        assert_eq!(keywords["determines"], vec![types]);
        // Heading words are indexed too; the heading note is direct content.
        assert_eq!(keywords["types"], vec![types]);
    }

    #[test]
    fn test_words_lowercased() {
        let (outline, keywords) = build(vec![heading(2, "Types"), para("A Type DETERMINES")]);

        let types = outline.heading("Types").unwrap();
        assert_eq!(keywords["determines"], vec![types]);
        assert!(!keywords.contains_key("DETERMINES"));
    }

    #[test]
    fn test_node_appears_once_per_word() {
        let (outline, keywords) = build(vec![heading(2, "Types"), para("type type type")]);

        let types = outline.heading("Types").unwrap();
        assert_eq!(keywords["type"], vec![types]);
    }

    #[test]
    fn test_child_words_do_not_index_parent() {
        let (outline, keywords) = build(vec![
            heading(2, "Types"),
            para("a type determines a set of values"),
            heading(3, "Struct types"),
            para("struct types combine fields"),
        ]);

        let structs = outline.heading("Struct types").unwrap();
        assert_eq!(keywords["fields"], vec![structs]);
        let types = outline.heading("Types").unwrap();
        assert!(!keywords["fields"].contains(&types));
    }

    #[test]
    fn test_postings_in_document_order() {
        let (outline, keywords) = build(vec![
            heading(2, "First"),
            para("shared word"),
            heading(2, "Second"),
            para("shared word"),
            heading(2, "Third"),
            para("shared word"),
        ]);

        let expected: Vec<NodeId> = ["First", "Second", "Third"]
            .iter()
            .map(|h| outline.heading(h).unwrap())
            .collect();
        assert_eq!(keywords["shared"], expected);
    }

    #[test]
    fn test_link_and_list_text_indexed() {
        let (outline, keywords) = build(vec![
            heading(2, "A"),
            Block::Paragraph(vec![Inline::Link {
                text: "anchor".into(),
                location: "#x".into(),
            }]),
            Block::List {
                ordered: false,
                items: vec![vec![Inline::Code("snippet".into())]],
            },
        ]);

        let a = outline.heading("A").unwrap();
        assert_eq!(keywords["anchor"], vec![a]);
        assert_eq!(keywords["snippet"], vec![a]);
    }

    #[test]
    fn test_index_soundness_over_whole_outline() {
        let (outline, keywords) = build(vec![
            heading(2, "Types"),
            para("a type determines values"),
            heading(3, "Struct types"),
            para("struct types combine fields"),
            heading(4, "Field names"),
            para("names must be unique"),
        ]);

        for id in outline.iter_preorder() {
            for token in outline.direct_text(id).split_whitespace() {
                let word = token.to_lowercase();
                assert!(
                    keywords[&word].contains(&id),
                    "{word:?} missing for {:?}",
                    outline.node(id).heading
                );
            }
        }
    }
}
