// src/classify.rs
//
// Tag and node classification used by the layout engine.
//
// - VOID: start tag only, never an end tag, children are never visited.
// - SPECIAL CONTENT: script and style. Their text is reindented line by line
//   instead of being collapsed.
// - SINGLE TEXT CHILD: an element whose only child is one text node is laid
//   out inline, start tag, text and end tag on one line.

use markup5ever_rcdom::{Handle, Node, NodeData};

/* =============================== Core sets =============================== */

pub fn is_void_element(tag: &str) -> bool {
    matches_ignore_ascii_case(
        tag,
        &[
            "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen",
            "link", "meta", "param", "source", "track", "wbr",
        ],
    )
}

pub fn is_special_content_element(tag: &str) -> bool {
    matches_ignore_ascii_case(tag, &["script", "style"])
}

pub fn is_preformatted_element(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("pre")
}

fn matches_ignore_ascii_case(name: &str, set: &[&str]) -> bool {
    set.iter().any(|s| name.eq_ignore_ascii_case(s))
}

/* ============================ Node predicates =========================== */

/// Local tag name of an element node, `None` for every other kind.
pub fn tag_name(node: &Node) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Whether `node` is a `<script>` or `<style>` element. `None` (no parent) is
/// never special.
pub fn is_special_content(node: Option<&Handle>) -> bool {
    node.and_then(|n| tag_name(n))
        .is_some_and(is_special_content_element)
}

pub fn is_void(node: &Node) -> bool {
    tag_name(node).is_some_and(is_void_element)
}

pub fn is_text(node: &Node) -> bool {
    matches!(node.data, NodeData::Text { .. })
}

/// A text node holding nothing but whitespace.
pub fn is_empty_text(node: &Node) -> bool {
    match node.data {
        NodeData::Text { ref contents } => contents.borrow().trim().is_empty(),
        _ => false,
    }
}

/// First child is also the last child, and it is a text node.
pub fn has_single_text_child(children: &[Handle]) -> bool {
    matches!(children, [only] if is_text(only))
}

/// Children in document order. Template contents live in a separate
/// fragment and are treated as the element's children.
pub fn child_nodes(node: &Handle) -> Vec<Handle> {
    if let NodeData::Element {
        ref template_contents,
        ..
    } = node.data
    {
        if let Some(contents) = template_contents.borrow().as_ref() {
            return contents.children.borrow().clone();
        }
    }
    node.children.borrow().clone()
}
