//! An in-memory, DOM-like document.
//!
//! This is the document used off the Web, and what the test suite renders
//! into. It models just enough of the DOM for a host adapter: elements with
//! attributes, inline style and listeners, text nodes, and ordered children.

use crate::document::{Document, HostError};
use crate::props::Handler;
use std::cell::RefCell;
use std::fmt;
use std::fmt::Write;
use std::rc::{Rc, Weak};

/// An event dispatched to listeners in a `MemoryDocument`.
#[derive(Clone, Debug)]
pub struct Event {
    kind: String,
    target: Node,
}

impl Event {
    /// The native event name, such as `"click"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The node the event was dispatched to.
    pub fn target(&self) -> &Node {
        &self.target
    }
}

enum NodeKind {
    Element {
        tag_name: String,
        attributes: Vec<(String, String)>,
        style: Vec<(String, String)>,
        listeners: Vec<(String, Handler<Event>)>,
    },
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<Node>,
}

/// A node in a `MemoryDocument`.
///
/// `Node` is a cheap, reference-counted handle. Equality is node identity.
#[derive(Clone)]
pub struct Node {
    inner: Rc<RefCell<NodeData>>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.outer_html())
    }
}

impl Node {
    fn new(kind: NodeKind) -> Node {
        Node {
            inner: Rc::new(RefCell::new(NodeData {
                kind,
                parent: Weak::new(),
                children: Vec::new(),
            })),
        }
    }

    /// Is this an element, rather than a text node?
    pub fn is_element(&self) -> bool {
        match self.inner.borrow().kind {
            NodeKind::Element { .. } => true,
            NodeKind::Text(_) => false,
        }
    }

    /// The element's tag name, or `"#text"` for text nodes.
    pub fn node_name(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Element { tag_name, .. } => tag_name.clone(),
            NodeKind::Text(_) => "#text".to_string(),
        }
    }

    /// The value of the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { attributes, .. } => lookup(attributes, name),
            NodeKind::Text(_) => None,
        }
    }

    /// All attribute names, in the order they were first set.
    pub fn attribute_names(&self) -> Vec<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { attributes, .. } => {
                attributes.iter().map(|(n, _)| n.clone()).collect()
            }
            NodeKind::Text(_) => vec![],
        }
    }

    /// The inline style value of the property `name`, if it is set.
    pub fn style(&self, name: &str) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { style, .. } => lookup(style, name),
            NodeKind::Text(_) => None,
        }
    }

    /// The number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        match &self.inner.borrow().kind {
            NodeKind::Element { listeners, .. } => {
                listeners.iter().filter(|(e, _)| e == event).count()
            }
            NodeKind::Text(_) => 0,
        }
    }

    /// Invoke every listener registered for `event` on this node, in
    /// registration order. Returns how many listeners were invoked.
    pub fn dispatch(&self, event: &str) -> usize {
        // Collect first: listeners may mutate this node.
        let handlers: Vec<_> = match &self.inner.borrow().kind {
            NodeKind::Element { listeners, .. } => listeners
                .iter()
                .filter(|(e, _)| e == event)
                .map(|(_, h)| h.clone())
                .collect(),
            NodeKind::Text(_) => vec![],
        };
        let e = Event {
            kind: event.to_string(),
            target: self.clone(),
        };
        for h in &handlers {
            h.call(&e);
        }
        handlers.len()
    }

    /// The concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut s = String::new();
        self.collect_text(&mut s);
        s
    }

    fn collect_text(&self, s: &mut String) {
        let data = self.inner.borrow();
        match &data.kind {
            NodeKind::Text(text) => s.push_str(text),
            NodeKind::Element { .. } => {
                for child in &data.children {
                    child.collect_text(s);
                }
            }
        }
    }

    /// This node's children, in document order.
    pub fn children(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    pub fn first_child(&self) -> Option<Node> {
        self.inner.borrow().children.first().cloned()
    }

    /// This node's parent, if it is attached.
    pub fn parent(&self) -> Option<Node> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Node { inner })
    }

    /// Serialize this node and its subtree as HTML.
    pub fn outer_html(&self) -> String {
        let mut s = String::new();
        self.write_html(&mut s)
            .expect("writing to a `String` cannot fail");
        s
    }

    fn write_html(&self, s: &mut String) -> fmt::Result {
        let data = self.inner.borrow();
        match &data.kind {
            NodeKind::Text(text) => s.write_str(text),
            NodeKind::Element {
                tag_name,
                attributes,
                style,
                ..
            } => {
                write!(s, "<{}", tag_name)?;
                for (name, value) in attributes {
                    write!(s, " {}=\"{}\"", name, value)?;
                }
                if !style.is_empty() {
                    s.write_str(" style=\"")?;
                    for (name, value) in style {
                        write!(s, "{}: {}; ", name, value)?;
                    }
                    s.pop();
                    s.write_str("\"")?;
                }
                s.write_str(">")?;
                for child in &data.children {
                    child.write_html(s)?;
                }
                write!(s, "</{}>", tag_name)
            }
        }
    }

    fn with_element<T>(
        &self,
        f: impl FnOnce(
            &mut Vec<(String, String)>,
            &mut Vec<(String, String)>,
            &mut Vec<(String, Handler<Event>)>,
        ) -> T,
    ) -> Result<T, HostError> {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Element {
                attributes,
                style,
                listeners,
                ..
            } => Ok(f(attributes, style, listeners)),
            NodeKind::Text(_) => Err(HostError::Backend(
                "text nodes have no attributes, style, or listeners".into(),
            )),
        }
    }

    fn position(&self, child: &Node) -> Option<usize> {
        self.inner.borrow().children.iter().position(|c| c == child)
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            if let Some(i) = parent.position(self) {
                parent.inner.borrow_mut().children.remove(i);
            }
        }
        self.inner.borrow_mut().parent = Weak::new();
    }

    fn contains(&self, other: &Node) -> bool {
        let mut node = Some(other.clone());
        while let Some(n) = node {
            if n == *self {
                return true;
            }
            node = n.parent();
        }
        false
    }

    // Validates before detaching `child`, so a failed insert leaves the tree
    // untouched.
    fn insert_at(&self, before: Option<&Node>, child: &Node) -> Result<(), HostError> {
        if !self.is_element() {
            return Err(HostError::Backend("text nodes cannot have children".into()));
        }
        if child.contains(self) {
            return Err(HostError::Backend(
                "cannot insert a node into its own subtree".into(),
            ));
        }
        child.detach();
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        // Detaching may shift `before`'s index.
        let index = before.and_then(|b| self.position(b));
        let mut data = self.inner.borrow_mut();
        match index {
            Some(i) => data.children.insert(i, child.clone()),
            None => data.children.push(child.clone()),
        }
        Ok(())
    }
}

fn lookup(entries: &[(String, String)], name: &str) -> Option<String> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
}

fn upsert<V>(entries: &mut Vec<(String, V)>, name: &str, value: V) {
    match entries.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name.to_string(), value)),
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        // `std::time::Instant` panics on `wasm32-unknown-unknown`.
        #[derive(Debug)]
        struct Epoch(f64);

        impl Epoch {
            fn now() -> Epoch {
                Epoch(js_sys::Date::now())
            }

            fn elapsed_ms(&self) -> f64 {
                (js_sys::Date::now() - self.0).max(0.0)
            }
        }
    } else {
        #[derive(Debug)]
        struct Epoch(std::time::Instant);

        impl Epoch {
            fn now() -> Epoch {
                Epoch(std::time::Instant::now())
            }

            fn elapsed_ms(&self) -> f64 {
                self.0.elapsed().as_secs_f64() * 1000.0
            }
        }
    }
}

/// An in-memory document.
#[derive(Debug)]
pub struct MemoryDocument {
    epoch: Epoch,
    focused: RefCell<Option<Node>>,
}

impl Default for MemoryDocument {
    fn default() -> MemoryDocument {
        MemoryDocument::new()
    }
}

impl MemoryDocument {
    /// Construct a new, empty document.
    pub fn new() -> MemoryDocument {
        MemoryDocument {
            epoch: Epoch::now(),
            focused: RefCell::new(None),
        }
    }

    /// The node that currently has input focus.
    pub fn active_element(&self) -> Option<Node> {
        self.focused.borrow().clone()
    }
}

impl Document for MemoryDocument {
    type Node = Node;
    type Event = Event;

    fn create_element(&self, tag: &str) -> Result<Node, HostError> {
        let valid = tag
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic())
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ':');
        if !valid {
            return Err(HostError::Backend(format!("invalid tag name: {:?}", tag)));
        }
        Ok(Node::new(NodeKind::Element {
            tag_name: tag.to_string(),
            attributes: vec![],
            style: vec![],
            listeners: vec![],
        }))
    }

    fn create_text_node(&self, text: &str) -> Node {
        Node::new(NodeKind::Text(text.to_string()))
    }

    fn set_attribute(&self, node: &Node, name: &str, value: &str) -> Result<(), HostError> {
        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '=') {
            return Err(HostError::Backend(format!("invalid attribute name: {:?}", name)));
        }
        node.with_element(|attributes, _, _| upsert(attributes, name, value.to_string()))
    }

    fn remove_attribute(&self, node: &Node, name: &str) -> Result<(), HostError> {
        node.with_element(|attributes, _, _| attributes.retain(|(n, _)| n != name))
    }

    fn set_style(&self, node: &Node, name: &str, value: Option<&str>) -> Result<(), HostError> {
        node.with_element(|_, style, _| match value {
            Some(value) => upsert(style, name, value.to_string()),
            None => style.retain(|(n, _)| n != name),
        })
    }

    fn set_text_content(&self, node: &Node, text: Option<&str>) {
        let text = text.unwrap_or("");
        if !node.is_element() {
            node.inner.borrow_mut().kind = NodeKind::Text(text.to_string());
            return;
        }
        for child in node.children() {
            child.detach();
        }
        if !text.is_empty() {
            let child = self.create_text_node(text);
            child.inner.borrow_mut().parent = Rc::downgrade(&node.inner);
            node.inner.borrow_mut().children.push(child);
        }
    }

    fn add_listener(
        &self,
        node: &Node,
        event: &str,
        handler: &Handler<Event>,
    ) -> Result<(), HostError> {
        node.with_element(|_, _, listeners| {
            if !listeners
                .iter()
                .any(|(e, h)| e == event && h.ptr_eq(handler))
            {
                listeners.push((event.to_string(), handler.clone()));
            }
        })
    }

    fn remove_listener(
        &self,
        node: &Node,
        event: &str,
        handler: &Handler<Event>,
    ) -> Result<(), HostError> {
        node.with_element(|_, _, listeners| {
            listeners.retain(|(e, h)| !(e == event && h.ptr_eq(handler)))
        })
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<(), HostError> {
        parent.insert_at(None, child)
    }

    fn insert_before(&self, parent: &Node, child: &Node, before: &Node) -> Result<(), HostError> {
        if parent.position(before).is_none() {
            return Err(HostError::NotAChild);
        }
        if child == before {
            return Ok(());
        }
        parent.insert_at(Some(before), child)
    }

    fn remove_child(&self, parent: &Node, child: &Node) -> Result<(), HostError> {
        if parent.position(child).is_none() {
            return Err(HostError::NotAChild);
        }
        child.detach();
        Ok(())
    }

    fn focus(&self, node: &Node) -> Result<(), HostError> {
        if !node.is_element() {
            return Err(HostError::Backend("text nodes cannot be focused".into()));
        }
        *self.focused.borrow_mut() = Some(node.clone());
        Ok(())
    }

    fn now(&self) -> f64 {
        self.epoch.elapsed_ms()
    }
}
