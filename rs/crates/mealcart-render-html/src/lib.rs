//! mealcart-render-html — Render Mealcart DomNode trees to HTML strings
//!
//! Produces server-rendered HTML with data-key and data-a_ attributes that
//! client.js uses to route events and swap surfaces.

mod canvas;

pub use canvas::{HtmlCanvas, SurfacePatch};

use mealcart_dom::DomNode;
use std::collections::HashMap;

/// Void elements that must not have closing tags
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Render a DomNode tree to an HTML string.
pub fn render_to_html(node: &DomNode) -> String {
    let mut buf = String::with_capacity(4096);
    write_node(node, &mut buf);
    buf
}

/// Options for rendering a full HTML page.
pub struct PageOptions {
    pub root: DomNode,
    pub title: Option<String>,
    pub description: Option<String>,
    pub inline_css: Option<String>,
    pub styles: Vec<String>,
    pub scripts: Vec<String>,
    pub mount_selector: Option<String>,
}

/// Render a full HTML page around the server-rendered root.
pub fn render_page(opts: &PageOptions) -> String {
    let body_html = render_to_html(&opts.root);

    let mut html = String::with_capacity(body_html.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");

    if let Some(title) = &opts.title {
        html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    }
    if let Some(desc) = &opts.description {
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\" />\n",
            escape_attr(desc)
        ));
    }

    if let Some(css) = &opts.inline_css {
        html.push_str(&format!("<style>{}</style>", css));
    }
    for href in &opts.styles {
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\" />", escape_attr(href)));
    }

    html.push_str("\n</head>\n<body>\n");

    let mount = opts.mount_selector.as_deref().unwrap_or("#app");
    let id = mount.trim_start_matches('#');
    html.push_str(&format!("<div id=\"{}\">{}</div>\n", escape_attr(id), body_html));

    for src in &opts.scripts {
        html.push_str(&format!("<script src=\"{}\"></script>\n", escape_attr(src)));
    }

    html.push_str("</body>\n</html>");
    html
}

fn write_node(node: &DomNode, buf: &mut String) {
    buf.push('<');
    buf.push_str(&node.tag);

    if let Some(key) = &node.key {
        write_attr(buf, "data-key", key);
    }
    if let Some(attrs) = &node.attrs {
        for (name, value) in sorted(attrs) {
            write_attr(buf, name, value);
        }
    }
    // Events ride along as data-a_{event}="{action}"
    if let Some(events) = &node.events {
        for (event, action) in sorted(events) {
            write_attr(buf, &format!("data-a_{event}"), action);
        }
    }
    buf.push('>');

    if let Some(text) = &node.text {
        escape_into(buf, text, false);
    }
    for child in node.children_iter() {
        write_node(child, buf);
    }

    if !VOID_ELEMENTS.contains(&node.tag.as_str()) {
        buf.push_str("</");
        buf.push_str(&node.tag);
        buf.push('>');
    }
}

/// Map entries in name order, so output is stable across runs.
fn sorted(map: &HashMap<String, String>) -> Vec<(&String, &String)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by_key(|(name, _)| *name);
    entries
}

fn write_attr(buf: &mut String, name: &str, value: &str) {
    buf.push(' ');
    buf.push_str(name);
    buf.push_str("=\"");
    escape_into(buf, value, true);
    buf.push('"');
}

fn escape_into(buf: &mut String, s: &str, quotes: bool) {
    for c in s.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' if quotes => buf.push_str("&quot;"),
            c => buf.push(c),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s, false);
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s, true);
    out
}
