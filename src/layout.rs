// src/layout.rs
//
// Layout engine: one depth-first walk that decides, per node, whether to
// indent, whether to break the line, and whether content is raw.
//
// - Indent is one space per nesting level.
// - Elements go on their own line. An element whose only child is text stays
//   on one line: `<li>A</li>`.
// - Whitespace-only text is dropped. Other text is trimmed and re-indented,
//   except at a glue boundary: a text sibling whose trimmed content starts
//   with punctuation stays on the line of the sibling before it.
// - script/style bodies are split into lines and each line is re-indented.
// - <pre> subtrees are raw: text verbatim, tags written without any inserted
//   newline or indent.
//
// Writes go straight to the sink. The first failed write aborts the walk.

use std::io::Write;

use html5ever::{Attribute, QualName};
use log::trace;
use markup5ever_rcdom::{Handle, NodeData};
use memchr::memchr_iter;

use crate::classify::{
    child_nodes, has_single_text_child, is_empty_text, is_preformatted_element,
    is_special_content, is_special_content_element, is_void, is_void_element,
};
use crate::error::{Error, Result};
use crate::escape::escape_attribute_value;
use crate::whitespace::{collapse_whitespace, ends_with_whitespace, starts_with_punctuation};

/// Lay out `nodes` as a run of top-level siblings at indent level 0.
pub fn print_nodes<W: Write>(out: &mut W, nodes: &[Handle]) -> Result<()> {
    let mut p = Printer { out };
    print_children(&mut p, None, nodes, 0)
}

/* ================================ Sink ================================== */

struct Printer<'w, W: Write> {
    out: &'w mut W,
}

impl<W: Write> Printer<'_, W> {
    fn write(&mut self, s: &str) -> Result<()> {
        self.out.write_all(s.as_bytes()).map_err(Error::Write)
    }

    fn newline(&mut self) -> Result<()> {
        self.write("\n")
    }

    fn indent(&mut self, level: usize) -> Result<()> {
        const SPACES: &str = "                                ";
        let mut left = level;
        while left > 0 {
            let n = left.min(SPACES.len());
            self.write(&SPACES[..n])?;
            left -= n;
        }
        Ok(())
    }

    fn start_tag(&mut self, name: &QualName, attrs: &[Attribute]) -> Result<()> {
        self.write("<")?;
        self.write(&name.local)?;
        for attr in attrs {
            self.write(" ")?;
            if let Some(prefix) = &attr.name.prefix {
                self.write(prefix)?;
                self.write(":")?;
            }
            self.write(&attr.name.local)?;
            self.write("=\"")?;
            self.write(&escape_attribute_value(&attr.value))?;
            self.write("\"")?;
        }
        self.write(">")
    }

    fn end_tag(&mut self, name: &QualName) -> Result<()> {
        self.write("</")?;
        self.write(&name.local)?;
        self.write(">")
    }

    fn comment(&mut self, contents: &str) -> Result<()> {
        self.write("<!--")?;
        self.write(contents)?;
        self.write("-->")
    }
}

/* =============================== Position =============================== */

/// Where a node sits among its siblings. Top-level nodes have no parent.
#[derive(Clone, Copy)]
struct Position<'a> {
    parent: Option<&'a Handle>,
    siblings: &'a [Handle],
    index: usize,
}

impl<'a> Position<'a> {
    fn prev(&self) -> Option<&'a Handle> {
        self.index.checked_sub(1).map(|i| &self.siblings[i])
    }

    fn next(&self) -> Option<&'a Handle> {
        self.siblings.get(self.index + 1)
    }

    /// Parent is an element whose only child is text.
    fn inline(&self) -> bool {
        self.parent.is_some() && has_single_text_child(self.siblings)
    }

    fn glued_before(&self, node: &Handle) -> bool {
        self.prev()
            .is_some_and(|prev| glued(self.parent, prev, node))
    }

    fn glued_after(&self, node: &Handle) -> bool {
        self.next()
            .is_some_and(|next| glued(self.parent, node, next))
    }
}

/// `node` and `next` share a line: `next` is text starting with punctuation
/// and `node` is something that would otherwise end the line.
fn glued(parent: Option<&Handle>, node: &Handle, next: &Handle) -> bool {
    if is_special_content(parent) {
        return false;
    }
    let next_is_punct = match next.data {
        NodeData::Text { ref contents } => starts_with_punctuation(&contents.borrow()),
        _ => false,
    };
    if !next_is_punct {
        return false;
    }
    match node.data {
        NodeData::Element { .. } => !is_void(node),
        NodeData::Text { .. } => !is_empty_text(node),
        _ => false,
    }
}

/* ============================= Normal mode ============================== */

fn print_children<W: Write>(
    p: &mut Printer<'_, W>,
    parent: Option<&Handle>,
    children: &[Handle],
    level: usize,
) -> Result<()> {
    for (index, child) in children.iter().enumerate() {
        let pos = Position {
            parent,
            siblings: children,
            index,
        };
        print_node(p, child, pos, level)?;
    }
    Ok(())
}

fn print_node<W: Write>(
    p: &mut Printer<'_, W>,
    node: &Handle,
    pos: Position<'_>,
    level: usize,
) -> Result<()> {
    match node.data {
        NodeData::Document | NodeData::Doctype { .. } => {
            print_children(p, Some(node), &child_nodes(node), level)
        }
        NodeData::Comment { ref contents } => {
            p.indent(level)?;
            p.comment(contents)?;
            p.newline()?;
            print_children(p, Some(node), &child_nodes(node), level)
        }
        NodeData::Text { ref contents } => print_text(p, node, &contents.borrow(), pos, level),
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => print_element(p, node, name, &attrs.borrow(), pos, level),
        NodeData::ProcessingInstruction { .. } => Ok(()),
    }
}

fn print_text<W: Write>(
    p: &mut Printer<'_, W>,
    node: &Handle,
    text: &str,
    pos: Position<'_>,
    level: usize,
) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if is_special_content(pos.parent) {
        return print_reindented(p, trimmed, level + 1);
    }

    let inline = pos.inline();
    let before = !inline && pos.glued_before(node);
    let after = !inline && pos.glued_after(node);

    if !inline && !before {
        p.indent(level)?;
    }
    // At a glue boundary the later node writes the single separating space,
    // if either side had whitespace there.
    let collapsed = collapse_whitespace(text);
    let mut body: &str = collapsed.trim_end();
    if before {
        let prev_padded = pos.prev().is_some_and(|prev| match prev.data {
            NodeData::Text { ref contents } => ends_with_whitespace(&contents.borrow()),
            _ => false,
        });
        if prev_padded && !body.starts_with(' ') {
            p.write(" ")?;
        }
    } else {
        body = body.trim_start();
    }
    p.write(body)?;
    if !inline && !after {
        p.newline()?;
    }
    Ok(())
}

/// Each line of a script/style body on its own line at `level`, followed by
/// a final newline.
fn print_reindented<W: Write>(p: &mut Printer<'_, W>, text: &str, level: usize) -> Result<()> {
    let mut start = 0;
    let ends = memchr_iter(b'\n', text.as_bytes()).chain(std::iter::once(text.len()));
    for end in ends {
        let line = &text[start..end];
        let line = line.strip_suffix('\r').unwrap_or(line);
        p.newline()?;
        p.indent(level)?;
        p.write(line)?;
        start = end + 1;
    }
    p.newline()
}

fn print_element<W: Write>(
    p: &mut Printer<'_, W>,
    node: &Handle,
    name: &QualName,
    attrs: &[Attribute],
    pos: Position<'_>,
    level: usize,
) -> Result<()> {
    let tag: &str = &name.local;

    p.indent(level)?;
    p.start_tag(name, attrs)?;

    let children = child_nodes(node);
    if is_preformatted_element(tag) {
        trace!("<{tag}> raw at level {level}");
        preserve_leading_newline(p, &children)?;
        for child in &children {
            print_raw(p, child)?;
        }
        p.end_tag(name)?;
        if !pos.glued_after(node) {
            p.newline()?;
        }
        return Ok(());
    }

    let inline = !is_void_element(tag) && has_single_text_child(&children);
    if !inline {
        p.newline()?;
    }
    if is_void_element(tag) {
        trace!("<{tag}> void at level {level}");
        return Ok(());
    }
    trace!("<{tag}> inline={inline} at level {level}");

    print_children(p, Some(node), &children, level + 1)?;

    if is_special_content_element(tag) || !inline {
        p.indent(level)?;
    }
    p.end_tag(name)?;
    if !pos.glued_after(node) {
        p.newline()?;
    }
    Ok(())
}

/* =============================== Raw mode =============================== */

fn print_raw<W: Write>(p: &mut Printer<'_, W>, node: &Handle) -> Result<()> {
    match node.data {
        NodeData::Text { ref contents } => p.write(&contents.borrow()),
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            p.start_tag(name, &attrs.borrow())?;
            if is_void_element(&name.local) {
                return Ok(());
            }
            let children = child_nodes(node);
            if is_preformatted_element(&name.local) {
                preserve_leading_newline(p, &children)?;
            }
            for child in &children {
                print_raw(p, child)?;
            }
            p.end_tag(name)
        }
        NodeData::Comment { ref contents } => p.comment(contents),
        NodeData::Document | NodeData::Doctype { .. } => {
            for child in &child_nodes(node) {
                print_raw(p, child)?;
            }
            Ok(())
        }
        NodeData::ProcessingInstruction { .. } => Ok(()),
    }
}

/// Parsing drops one newline right after `<pre>`; write one back so a
/// leading newline in the content survives.
fn preserve_leading_newline<W: Write>(p: &mut Printer<'_, W>, children: &[Handle]) -> Result<()> {
    if let Some(NodeData::Text { contents }) = children.first().map(|c| &c.data) {
        if contents.borrow().starts_with('\n') {
            p.newline()?;
        }
    }
    Ok(())
}
