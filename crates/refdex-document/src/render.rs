//! Budget-bounded subtree rendering.
//!
//! Renders a node and its descendants to markdown-like text, stopping once
//! the accumulated output exceeds a caller-supplied byte budget. Rendering
//! is a pure read of the immutable outline and is safe to call from any
//! number of threads.

use crate::node::{NodeId, Outline};

/// Elision marker appended once when output was cut off.
const MORE_OMITTED: &str = "*more content omitted*";

/// Output of a bounded render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered text, including the elision marker when truncated.
    pub text: String,
    /// True when any content was elided to stay within the budget.
    pub truncated: bool,
}

impl Outline {
    /// Renders a node and its descendants under a byte budget.
    ///
    /// Direct content renders first, one note per line; children follow,
    /// each with the budget reduced by what has already been written. When
    /// the budget runs out the elision marker is appended exactly once,
    /// regardless of how many subtrees were cut.
    ///
    /// A node with no direct content renders to nothing, children included.
    /// That behavior is pinned by tests; see DESIGN.md before changing it.
    pub fn render(&self, id: NodeId, limit: usize) -> Rendered {
        let mut text = String::new();
        let truncated = self.render_into(id, limit, &mut text);
        if truncated {
            text.push_str(MORE_OMITTED);
        }
        Rendered { text, truncated }
    }

    /// Recursive worker; appends to `out` and reports truncation without
    /// adding the marker.
    fn render_into(&self, id: NodeId, limit: usize, out: &mut String) -> bool {
        let node = self.node(id);
        if node.content.is_empty() {
            return false;
        }
        if limit == 0 {
            return true;
        }

        let start = out.len();
        let mut truncated = false;

        for note in &node.content {
            if out.len() - start > limit {
                truncated = true;
                break;
            }
            out.push_str(&note.markdown());
            out.push('\n');
        }

        if !truncated {
            for child in &node.children {
                let written = out.len() - start;
                if written > limit {
                    truncated = true;
                    break;
                }
                if self.render_into(*child, limit - written, out) {
                    truncated = true;
                    break;
                }
                out.push('\n');
            }
        }

        truncated
    }
}
