//! Ranked free-text search over the keyword index.
//!
//! Queries are lowercased and split on whitespace. A node whose heading
//! equals the whole query (case-insensitively) short-circuits everything
//! else; otherwise candidates must contain every distinct query word in
//! their own direct content (strict AND) and are ranked by substring
//! affinity, then depth, then heading.

use std::{cmp::Ordering, collections::HashMap};

use refdex_document::{NodeId, Outline};

/// Runs a query against the index, returning ranked node handles.
///
/// Empty and unmatched queries return an empty list; search never fails.
pub(crate) fn search(
    outline: &Outline,
    keywords: &HashMap<String, Vec<NodeId>>,
    query: &str,
) -> Vec<NodeId> {
    let query = query.to_lowercase();
    let mut tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    // AND semantics count distinct words; repeated words must not inflate
    // the required match count.
    dedup_preserving_order(&mut tokens);

    let mut counts: HashMap<NodeId, usize> = HashMap::new();
    let mut candidates: Vec<NodeId> = Vec::new();

    for token in &tokens {
        let Some(postings) = keywords.get(*token) else {
            continue;
        };
        for &id in postings {
            // Exact heading match wins outright.
            if outline.node(id).heading.to_lowercase() == query {
                return vec![id];
            }
            let count = counts.entry(id).or_insert(0);
            if *count == 0 {
                candidates.push(id);
            }
            *count += 1;
        }
    }

    let mut results: Vec<NodeId> = candidates
        .into_iter()
        .filter(|id| counts[id] == tokens.len())
        .collect();

    results.sort_by(|a, b| rank(outline, &query, *a, *b));
    results
}

/// Removes duplicate tokens while keeping first-occurrence order.
fn dedup_preserving_order(tokens: &mut Vec<&str>) {
    let mut seen = Vec::with_capacity(tokens.len());
    tokens.retain(|token| {
        if seen.contains(token) {
            return false;
        }
        seen.push(token);
        true
    });
}

/// Ranking comparator for non-exact matches.
///
/// Order of keys: heading contains the full query as a substring, then
/// direct-content text contains it, then deeper level before shallower,
/// then case-insensitive heading order.
fn rank(outline: &Outline, query: &str, a: NodeId, b: NodeId) -> Ordering {
    let node_a = outline.node(a);
    let node_b = outline.node(b);
    let heading_a = node_a.heading.to_lowercase();
    let heading_b = node_b.heading.to_lowercase();

    match (heading_a.contains(query), heading_b.contains(query)) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let body_a = outline.direct_text(a).to_lowercase().contains(query);
    let body_b = outline.direct_text(b).to_lowercase().contains(query);
    match (body_a, body_b) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    node_b
        .level
        .cmp(&node_a.level)
        .then_with(|| heading_a.cmp(&heading_b))
}

#[cfg(test)]
mod tests {
    use refdex_document::{Block, Inline, LinkContext, parse_blocks};

    use super::*;
    use crate::keyword::build_keywords;

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    fn para(text: &str) -> Block {
        Block::Paragraph(vec![Inline::Text(text.into())])
    }

    struct Fixture {
        outline: Outline,
        keywords: HashMap<String, Vec<NodeId>>,
    }

    impl Fixture {
        fn new(blocks: Vec<Block>) -> Self {
            let outline = parse_blocks(blocks, &LinkContext::default());
            let keywords = build_keywords(&outline);
            Self { outline, keywords }
        }

        fn search(&self, query: &str) -> Vec<&str> {
            search(&self.outline, &self.keywords, query)
                .into_iter()
                .map(|id| self.outline.node(id).heading.as_str())
                .collect()
        }
    }

    fn scenario() -> Fixture {
        Fixture::new(vec![
            heading(2, "Types"),
            para("A type determines a set of values"),
            heading(3, "Struct types"),
            para("Struct types combine fields"),
        ])
    }

    #[test]
    fn test_single_word_matches_direct_content() {
        assert_eq!(scenario().search("type"), vec!["Types"]);
    }

    #[test]
    fn test_exact_heading_match_is_singleton() {
        // Both nodes contain "struct"-adjacent words, but the exact heading
        // match bypasses filtering and ranking entirely.
        assert_eq!(scenario().search("struct types"), vec!["Struct types"]);
        assert_eq!(scenario().search("STRUCT TYPES"), vec!["Struct types"]);
    }

    #[test]
    fn test_child_only_word_does_not_surface_parent() {
        assert_eq!(scenario().search("fields"), vec!["Struct types"]);
    }

    #[test]
    fn test_empty_and_blank_queries() {
        let fixture = scenario();
        assert!(fixture.search("").is_empty());
        assert!(fixture.search("   ").is_empty());
    }

    #[test]
    fn test_unmatched_query_is_empty_not_error() {
        assert!(scenario().search("nonexistent").is_empty());
    }

    #[test]
    fn test_and_semantics_requires_all_words() {
        let fixture = Fixture::new(vec![
            heading(2, "Alpha"),
            para("red green"),
            heading(2, "Beta"),
            para("red blue"),
        ]);

        assert_eq!(fixture.search("red green"), vec!["Alpha"]);
        let both = fixture.search("red");
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_repeated_query_word_counts_once() {
        let fixture = Fixture::new(vec![heading(2, "Alpha"), para("red green")]);
        assert_eq!(fixture.search("red red"), vec!["Alpha"]);
    }

    #[test]
    fn test_heading_substring_ranks_first() {
        let fixture = Fixture::new(vec![
            heading(2, "Interfaces"),
            para("an interface defines a method sets view"),
            heading(2, "Pointer method sets"),
            para("pointers widen the receiver"),
        ]);

        // Both pass AND filtering and neither heading equals the query;
        // the heading containing the query as a substring ranks first.
        let ranked = fixture.search("method sets");
        assert_eq!(ranked, vec!["Pointer method sets", "Interfaces"]);
    }

    #[test]
    fn test_deeper_nodes_rank_before_shallower() {
        let fixture = Fixture::new(vec![
            heading(2, "Declarations"),
            para("scope rules apply"),
            heading(3, "Blank identifier"),
            para("scope rules apply"),
        ]);

        let ranked = fixture.search("scope rules");
        assert_eq!(ranked, vec!["Blank identifier", "Declarations"]);
    }

    #[test]
    fn test_lexicographic_tiebreak() {
        let fixture = Fixture::new(vec![
            heading(2, "Zebra"),
            para("shared token"),
            heading(2, "Aardvark"),
            para("shared token"),
        ]);

        let ranked = fixture.search("shared token");
        assert_eq!(ranked, vec!["Aardvark", "Zebra"]);
    }

    #[test]
    fn test_content_substring_outranks_depth() {
        // Neither heading contains the query; the node whose direct content
        // holds the full phrase wins even though it is shallower.
        let fixture = Fixture::new(vec![
            heading(2, "Conversions"),
            para("a constant value may convert"),
            heading(2, "Outer"),
            para("filler"),
            heading(3, "Constants"),
            para("value constant ordering differs"),
        ]);

        let ranked = fixture.search("constant value");
        assert_eq!(ranked, vec!["Conversions", "Constants"]);
    }
}
