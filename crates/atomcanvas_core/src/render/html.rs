//! HTML document renderer for canvas scene graphs.
//!
//! # Responsibility
//! - Serialize one `CanvasState` into a self-contained HTML document.
//! - Dispatch per atom on `AtomKind` with a container fallback.
//!
//! # Invariants
//! - Output is a pure function of the input; the canvas is never mutated.
//! - Missing and cyclic references contribute an empty fragment.
//! - Style declarations keep property insertion order and skip
//!   `text`/`src`.

use crate::logging::sanitize_for_log;
use crate::model::atom::{
    is_reserved_content_key, AtomId, AtomKind, Properties, SRC_PROPERTY, TEXT_PROPERTY,
};
use crate::model::canvas::CanvasState;
use log::{debug, warn};
use std::collections::HashSet;

/// Fixed document prefix up to and including the opening `<body>`.
pub const DOCUMENT_HEAD: &str =
    "<!DOCTYPE html><html><head><style>body{margin:0;}</style></head><body>";
/// Fixed document suffix.
pub const DOCUMENT_TAIL: &str = "</body></html>";

/// Renders the full document: wrapper plus every root fragment in order.
pub fn render_document(canvas: &CanvasState) -> String {
    let mut out = String::from(DOCUMENT_HEAD);
    for root in &canvas.root_atom_ids {
        write_atom(canvas, root, &mut out);
    }
    out.push_str(DOCUMENT_TAIL);

    debug!(
        "event=render_document module=render status=ok atoms={} roots={} bytes={}",
        canvas.atoms.len(),
        canvas.root_atom_ids.len(),
        out.len()
    );
    out
}

/// Renders one atom subtree without the document wrapper.
///
/// Returns an empty string when `id` is not part of the canvas.
pub fn render_atom(canvas: &CanvasState, id: &AtomId) -> String {
    let mut out = String::new();
    write_atom(canvas, id, &mut out);
    out
}

/// Flattens presentation properties into `key:value;key:value`.
pub fn style_declaration(properties: &Properties) -> String {
    properties
        .iter()
        .filter(|(name, _)| !is_reserved_content_key(name))
        .map(|(name, value)| format!("{name}:{value}"))
        .collect::<Vec<_>>()
        .join(";")
}

enum Frame<'a> {
    Open(&'a AtomId),
    Close(&'a AtomId),
}

// Explicit work stack: nesting depth never grows the call stack.
fn write_atom<'a>(canvas: &'a CanvasState, root: &'a AtomId, out: &mut String) {
    let mut on_path: HashSet<&'a AtomId> = HashSet::new();
    let mut stack = vec![Frame::Open(root)];

    while let Some(frame) = stack.pop() {
        let id = match frame {
            Frame::Open(id) => id,
            Frame::Close(id) => {
                on_path.remove(id);
                out.push_str("</div>");
                continue;
            }
        };

        let Some(node) = canvas.atoms.get(id) else {
            debug!(
                "event=render_skip module=render reason=missing_atom id={}",
                sanitize_for_log(id.as_str())
            );
            continue;
        };
        if on_path.contains(id) {
            warn!(
                "event=render_skip module=render reason=cycle id={} depth={}",
                sanitize_for_log(id.as_str()),
                on_path.len()
            );
            continue;
        }

        let style = style_declaration(&node.properties);
        match &node.kind {
            AtomKind::Text => {
                open_tag(out, "div", id, &style);
                out.push('>');
                if let Some(text) = node.properties.get(TEXT_PROPERTY) {
                    escape_into(out, &text.to_string());
                }
                out.push_str("</div>");
            }
            AtomKind::Image => {
                open_tag(out, "img", id, &style);
                out.push_str(" src=\"");
                if let Some(src) = node.properties.get(SRC_PROPERTY) {
                    escape_into(out, &src.to_string());
                }
                out.push_str("\" />");
            }
            AtomKind::Box | AtomKind::Other(_) => {
                open_tag(out, "div", id, &style);
                out.push('>');
                on_path.insert(id);
                stack.push(Frame::Close(id));
                stack.extend(node.children.iter().rev().map(Frame::Open));
            }
        }
    }
}

fn open_tag(out: &mut String, tag: &str, id: &AtomId, style: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(" id=\"");
    escape_into(out, id.as_str());
    out.push_str("\" style=\"");
    escape_into(out, style);
    out.push('"');
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}
