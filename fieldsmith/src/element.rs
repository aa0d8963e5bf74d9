//! Detached element tree produced by the builder.
//!
//! Elements carry attributes, classes, attached data and the live form state
//! (value, checked, selected) separately from attributes, the way a browser
//! keeps properties apart from markup. [`Element::to_html`] serializes the
//! current state for a host surface to paint.

use html_escape::{encode_double_quoted_attribute, encode_text};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::types::DataStore;

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Whether `name` can appear as a tag or attribute name without escaping:
/// ASCII letters, digits, `-` and `_`, starting with a letter.
pub fn is_markup_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    classes: Vec<String>,
    data: DataStore,
    value: Option<String>,
    checked: bool,
    selected: bool,
    multiple: bool,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            classes: Vec::new(),
            data: DataStore::new(),
            value: None,
            checked: false,
            selected: false,
            multiple: false,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    // --- Attributes and classes ---

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Attribute names in insertion order.
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// The `type` attribute of an input.
    pub fn input_type(&self) -> Option<&str> {
        self.attr("type")
    }

    /// Add a class; blank and duplicate names are ignored.
    pub fn add_class(&mut self, class: &str) {
        for name in class.split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    // --- Attached data ---

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key, value);
    }

    /// Attach every entry of `data`, overwriting existing keys.
    pub fn merge_data(&mut self, data: &DataStore) {
        self.data.merge(data);
    }

    // --- Form state ---

    /// Current value. For a select this is the value of the selected option.
    pub fn value(&self) -> Option<&str> {
        if self.tag == "select" {
            return self
                .child_elements()
                .find(|o| o.selected)
                .and_then(|o| o.attr("value"));
        }
        self.value.as_deref()
    }

    /// Set the value. For a select, the option with a matching value becomes
    /// selected and all others are deselected.
    pub fn set_value(&mut self, value: &str) {
        if self.tag == "select" {
            for child in &mut self.children {
                if let Node::Element(option) = child {
                    option.selected = option.attr("value") == Some(value);
                }
            }
        }
        self.value = Some(value.to_string());
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn set_multiple(&mut self, multiple: bool) {
        self.multiple = multiple;
    }

    // --- Tree ---

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct children that are elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text()),
            }
        }
        out
    }

    /// Depth-first search including this element.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|e| e.find(pred))
    }

    /// Every matching element in document order, including this one.
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_into(pred, &mut found);
        found
    }

    fn collect_into<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if pred(self) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_into(pred, found);
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e| e.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| match c {
            Node::Element(e) => e.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    // --- Rendering ---

    /// Serialize to HTML. Attached data renders as `data-*` attributes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        if self.tag == "input" {
            if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
                push_attr(out, "value", value);
            }
        }
        if self.checked {
            out.push_str(" checked");
        }
        if self.selected {
            out.push_str(" selected");
        }
        if self.multiple {
            out.push_str(" multiple");
        }
        for (key, value) in self.data.iter() {
            if !is_markup_name(key) {
                debug!(%key, "data key not rendered");
                continue;
            }
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            push_attr(out, &format!("data-{key}"), &rendered);
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&encode_text(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
