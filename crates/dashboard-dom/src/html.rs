//! HTML serialization of the in-memory tree.

use crate::memory::MemoryNode;
use crate::Element;

pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

impl MemoryNode {
    /// Markup of this node and its subtree.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }

    /// Markup of the subtree below this node.
    pub fn inner_html(&self) -> String {
        let mut out = escape_text(&self.own_text());
        for child in self.children() {
            write_node(&child, &mut out);
        }
        out
    }
}

fn write_node(node: &MemoryNode, out: &mut String) {
    let tag = node.tag_name();
    out.push('<');
    out.push_str(&tag);

    let attributes = node.attributes();
    let id = attributes.iter().find(|(name, _)| name == "id");
    if let Some((_, value)) = id {
        push_attribute(out, "id", value);
    }
    if let Some(classes) = node.attribute("class") {
        push_attribute(out, "class", &classes);
    }
    for (name, value) in attributes.iter().filter(|(name, _)| name != "id") {
        push_attribute(out, name, value);
    }

    out.push('>');
    out.push_str(&node.inner_html());
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}
