//! mealcart-dom — Shared DomNode types for Mealcart renderers
//!
//! This crate defines the structured view tree every Mealcart surface is
//! projected into. Paint adapters (HTML today) consume this type; the JSON
//! form is what `/snapshot` serves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single node in the view tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomNode {
    /// HTML tag name (e.g. "div", "button", "img")
    pub tag: String,

    /// Stable identity; surfaces are addressed by their root key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// HTML attributes (class, src, alt, data-*, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<HashMap<String, String>>,

    /// Map of DOM event name → action name (e.g. "click" → "add_to_cart:52772")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<HashMap<String, String>>,

    /// Text content for leaf nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DomNode>>,
}

/// A complete snapshot wrapping the root DomNode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: DomNode,
}

impl DomNode {
    /// Create an empty element
    pub fn el(tag: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            key: None,
            attrs: None,
            events: None,
            text: None,
            children: None,
        }
    }

    /// Create a simple text node
    pub fn text(tag: &str, content: &str) -> Self {
        DomNode::el(tag).with_text(content)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.into());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    /// Bind a DOM event to an action name.
    pub fn on(mut self, event: &str, action: impl Into<String>) -> Self {
        self.events
            .get_or_insert_with(HashMap::new)
            .insert(event.to_string(), action.into());
        self
    }

    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    pub fn with_children(mut self, children: Vec<DomNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Get a class attribute if present
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(name).map(|s| s.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class()
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Iterate over children (empty slice if none)
    pub fn children_iter(&self) -> &[DomNode] {
        match &self.children {
            Some(c) => c,
            None => &[],
        }
    }

    /// Get an event action by event name
    pub fn event(&self, name: &str) -> Option<&str> {
        self.events.as_ref()?.get(name).map(|s| s.as_str())
    }

    /// Depth-first search for the first node carrying `key`.
    pub fn find_by_key(&self, key: &str) -> Option<&DomNode> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children_iter().iter().find_map(|c| c.find_by_key(key))
    }

    /// All nodes (self included) that carry `class`, in document order.
    pub fn find_all_by_class<'a>(&'a self, class: &str) -> Vec<&'a DomNode> {
        let mut out = Vec::new();
        collect_by_class(self, class, &mut out);
        out
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        collect_text(self, &mut buf);
        buf
    }
}

fn collect_by_class<'a>(node: &'a DomNode, class: &str, out: &mut Vec<&'a DomNode>) {
    if node.has_class(class) {
        out.push(node);
    }
    for child in node.children_iter() {
        collect_by_class(child, class, out);
    }
}

fn collect_text(node: &DomNode, buf: &mut String) {
    if let Some(t) = &node.text {
        buf.push_str(t);
    }
    for child in node.children_iter() {
        collect_text(child, buf);
    }
}

/// Parse a snapshot from a JSON string
pub fn parse_snapshot(json: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let json = r#"{
            "root": {
                "tag": "div",
                "key": "app",
                "children": [
                    { "tag": "h4", "text": "Teriyaki Chicken" },
                    { "tag": "button", "events": { "click": "add_to_cart:52772" }, "text": "+" }
                ]
            }
        }"#;

        let snap = parse_snapshot(json).unwrap();
        assert_eq!(snap.root.tag, "div");
        assert_eq!(snap.root.key.as_deref(), Some("app"));
        assert_eq!(snap.root.children_iter().len(), 2);
        assert_eq!(
            snap.root.children_iter()[1].event("click"),
            Some("add_to_cart:52772")
        );
    }

    #[test]
    fn test_builder_and_lookup() {
        let root = DomNode::el("div").with_key("app").with_children(vec![
            DomNode::el("section")
                .with_key("cart-count")
                .with_class("badge cart")
                .with_text("3"),
            DomNode::el("div").with_class("cart").with_children(vec![
                DomNode::text("span", "RM "),
                DomNode::text("span", "84.00"),
            ]),
        ]);

        let badge = root.find_by_key("cart-count").unwrap();
        assert_eq!(badge.text.as_deref(), Some("3"));
        assert!(badge.has_class("badge"));
        assert!(!badge.has_class("bad"));
        assert_eq!(root.find_all_by_class("cart").len(), 2);
        assert_eq!(root.text_content(), "3RM 84.00");
        assert!(root.find_by_key("missing").is_none());
    }

    #[test]
    fn test_skip_empty_fields_in_json() {
        let json = serde_json::to_string(&DomNode::text("p", "hi")).unwrap();
        assert_eq!(json, r#"{"tag":"p","text":"hi"}"#);
    }
}
