//! Render a node tree back to HTML.
//!
//! Two layouts share one walker: pretty (one node per line, indented by depth)
//! and minified (no whitespace between nodes). Rendering the Document renders
//! its children.

use std::borrow::Cow;

use sprig_dom::{DomTree, ElementData, NodeId, NodeType};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements." Their content, if a tree gives them any, is not rendered.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Layout options for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// One node per line, indented by depth. Otherwise nodes are concatenated.
    pub pretty: bool,
    /// Spaces per depth level in pretty mode.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

impl RenderOptions {
    /// No inter-node whitespace at all.
    #[must_use]
    pub const fn minified() -> Self {
        Self {
            pretty: false,
            indent: 0,
        }
    }
}

/// Render `node` and its subtree.
///
/// In pretty mode every line, including the last, ends with `\n`. An id that
/// is not in the tree renders as the empty string.
#[must_use]
pub fn render(tree: &DomTree, node: NodeId, options: &RenderOptions) -> String {
    let mut renderer = Renderer {
        tree,
        options,
        out: String::new(),
    };
    renderer.node(node, 0);
    renderer.out
}

/// [`render`] with [`RenderOptions::default`].
#[must_use]
pub fn render_pretty(tree: &DomTree, node: NodeId) -> String {
    render(tree, node, &RenderOptions::default())
}

/// [`render`] with [`RenderOptions::minified`].
#[must_use]
pub fn render_minified(tree: &DomTree, node: NodeId) -> String {
    render(tree, node, &RenderOptions::minified())
}

struct Renderer<'a> {
    tree: &'a DomTree,
    options: &'a RenderOptions,
    out: String,
}

impl Renderer<'_> {
    fn node(&mut self, id: NodeId, depth: usize) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Document => {
                for &child in tree.children(id) {
                    self.node(child, depth);
                }
            }
            NodeType::Text(text) => self.line(depth, &escape(text, false)),
            NodeType::Raw(markup) => self.line(depth, markup),
            NodeType::Element(data) => self.element(id, data, depth),
        }
    }

    fn element(&mut self, id: NodeId, data: &ElementData, depth: usize) {
        let tree = self.tree;
        let mut open = start_tag(data);
        if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
            self.line(depth, &open);
            return;
        }

        if let Some(text) = &data.text {
            open.push_str(&escape(text, false));
        }
        let close = format!("</{}>", data.tag_name);

        let children = tree.children(id);
        if children.is_empty() {
            open.push_str(&close);
            self.line(depth, &open);
            return;
        }

        self.line(depth, &open);
        for &child in children {
            self.node(child, depth + 1);
        }
        self.line(depth, &close);
    }

    fn line(&mut self, depth: usize, content: &str) {
        if self.options.pretty {
            self.out
                .extend(std::iter::repeat_n(' ', depth * self.options.indent));
            self.out.push_str(content);
            self.out.push('\n');
        } else {
            self.out.push_str(content);
        }
    }
}

/// `<tag a="v1 v2" flag>`. An attribute whose values join to the empty string
/// is written bare.
fn start_tag(data: &ElementData) -> String {
    let mut tag = format!("<{}", data.tag_name);
    for (name, values) in data.attrs.iter() {
        tag.push(' ');
        tag.push_str(name);
        let value = values.join(" ");
        if !value.is_empty() {
            tag.push_str("=\"");
            tag.push_str(&escape(&value, true));
            tag.push('"');
        }
    }
    tag.push('>');
    tag
}

/// [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// Replaces `&`, `<` and `>`, plus `"` when `attribute` is set.
fn escape(text: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (attribute && c == '"');
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_leaves_quotes() {
        assert_eq!(escape("a < b & \"c\"", false), "a &lt; b &amp; \"c\"");
    }

    #[test]
    fn test_escape_attribute_quotes() {
        assert_eq!(escape("say \"hi\" > 1", true), "say &quot;hi&quot; &gt; 1");
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape("plain", true), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_start_tag_joins_values_and_writes_flags_bare() {
        let mut data = ElementData::new("input");
        data.attrs.set("class", "a  b");
        data.attrs.set("disabled", "");
        assert_eq!(start_tag(&data), r#"<input class="a b" disabled>"#);
    }
}
