// src/lib.rs
//
// htmlindent: format parsed HTML into canonical, re-indented text.
//
// - html5ever parses; this crate only lays out the resulting tree.
// - One space of indent per nesting level.
// - Attribute values are re-escaped from their decoded form, so any source
//   spelling of `&` comes out as `&amp;`.
// - Text inside <pre> is written verbatim. script/style bodies are
//   reindented line by line.
//
// Entry points:
//   document  : parse a whole document and format it
//   fragment  : parse a fragment in a <body> context and format its nodes
//   nodes     : format nodes that were parsed elsewhere

mod classify;
mod error;
mod escape;
mod layout;
mod whitespace;

use std::io::{self, Read, Write};

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, parse_fragment, LocalName, Namespace, ParseOpts, QualName};
use log::debug;

pub use crate::error::{Error, Result};
pub use crate::escape::escape_attribute_value;
pub use markup5ever_rcdom::{Handle, RcDom};

use crate::classify::child_nodes;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parse a complete HTML document from `input` and write it formatted to `out`.
///
/// Read errors are returned as [`Error::Parse`] before anything is written.
pub fn document<W: Write, R: Read>(out: &mut W, input: &mut R) -> Result<()> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(input)
        .map_err(Error::Parse)?;
    log_parse_errors(&dom);
    debug!("formatting document");
    nodes(out, &[dom.document.clone()])
}

/// Parse an HTML fragment from `input` and write its top-level nodes
/// formatted to `out`.
///
/// The fragment is parsed as the content of a `<body>` element, so text and
/// flow content are accepted as-is and missing end tags are supplied.
pub fn fragment<W: Write, R: Read>(out: &mut W, input: &mut R) -> Result<()> {
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .from_utf8()
        .read_from(input)
        .map_err(Error::Parse)?;
    log_parse_errors(&dom);

    // The parser wraps the fragment in a single synthetic <html> element.
    let roots = dom
        .document
        .children
        .borrow()
        .first()
        .map(child_nodes)
        .unwrap_or_default();
    nodes(out, &roots)
}

/// Format already-parsed nodes. The nodes are laid out as siblings of one
/// another at indent level 0.
///
/// The `RcDom` the handles came from must outlive the call: dropping it
/// clears the children of every node in its tree.
pub fn nodes<W: Write>(out: &mut W, nodes: &[Handle]) -> Result<()> {
    debug!("formatting {} top-level nodes", nodes.len());
    layout::print_nodes(out, nodes)
}

/// [`document`] over a string, collecting the output.
pub fn document_to_string(html: &str) -> Result<String> {
    let mut out = Vec::with_capacity(html.len() + html.len() / 4);
    document(&mut out, &mut html.as_bytes())?;
    into_string(out)
}

/// [`fragment`] over a string, collecting the output.
pub fn fragment_to_string(html: &str) -> Result<String> {
    let mut out = Vec::with_capacity(html.len() + html.len() / 4);
    fragment(&mut out, &mut html.as_bytes())?;
    into_string(out)
}

fn into_string(out: Vec<u8>) -> Result<String> {
    String::from_utf8(out).map_err(|e| Error::Write(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn log_parse_errors(dom: &RcDom) {
    for err in &dom.errors {
        debug!("parse error: {err}");
    }
}
