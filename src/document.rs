use crate::props::Handler;
use std::fmt;

/// An error from a host operation.
#[derive(Clone, Debug, PartialEq)]
pub enum HostError {
    /// The document rejected an operation, such as creating an element with an
    /// invalid tag name.
    Backend(String),

    /// A structural operation referenced a node that is not a child of the
    /// given parent.
    NotAChild,

    /// The property `name` holds a kind of value that has no meaning for it,
    /// such as an event handler on a property that is not an event property.
    UnsupportedValue {
        /// The offending property name.
        name: String,
    },

    /// A root was created for a container that already has one.
    AlreadyRooted,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HostError::Backend(msg) => write!(f, "The document rejected the operation: {}", msg),
            HostError::NotAChild => write!(f, "The node is not a child of the given parent."),
            HostError::UnsupportedValue { name } => {
                write!(f, "The property `{}` cannot hold this kind of value.", name)
            }
            HostError::AlreadyRooted => write!(f, "The container already has a root."),
        }
    }
}

impl std::error::Error for HostError {}

/// A concrete, mutable, DOM-like tree that a host adapter drives.
///
/// Implementations own their nodes' lifetimes: a node lives as long as the
/// tree (or a handle) holds it. None of these operations may block.
pub trait Document {
    /// A node in this document: an element or a text node. Cloning a node
    /// clones the handle, not the node; equality is node identity.
    type Node: Clone + PartialEq + fmt::Debug;

    /// The event type that listeners receive.
    type Event;

    /// Create a new, detached element with the given tag name.
    fn create_element(&self, tag: &str) -> Result<Self::Node, HostError>;

    /// Create a new, detached text node.
    fn create_text_node(&self, text: &str) -> Self::Node;

    /// Set an attribute on an element.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), HostError>;

    /// Remove an attribute from an element, if it has it.
    fn remove_attribute(&self, node: &Self::Node, name: &str) -> Result<(), HostError>;

    /// Set an inline style property on an element, or reset it to its default
    /// when `value` is `None`.
    fn set_style(&self, node: &Self::Node, name: &str, value: Option<&str>)
        -> Result<(), HostError>;

    /// Replace a node's content with the given literal text. For an element
    /// this replaces all of its children; for a text node, its data. `None`
    /// clears the content.
    fn set_text_content(&self, node: &Self::Node, text: Option<&str>);

    /// Register `handler` for `event` on `node`. Registering the same handler
    /// for the same event twice has no additional effect.
    fn add_listener(
        &self,
        node: &Self::Node,
        event: &str,
        handler: &Handler<Self::Event>,
    ) -> Result<(), HostError>;

    /// Deregister `handler` for `event` on `node`. Only the exact same handler
    /// that was registered is removed.
    fn remove_listener(
        &self,
        node: &Self::Node,
        event: &str,
        handler: &Handler<Self::Event>,
    ) -> Result<(), HostError>;

    /// Make `child` the last child of `parent`, moving it if it already has a
    /// parent.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), HostError>;

    /// Place `child` immediately before `before` among `parent`'s children.
    fn insert_before(
        &self,
        parent: &Self::Node,
        child: &Self::Node,
        before: &Self::Node,
    ) -> Result<(), HostError>;

    /// Detach `child` from `parent`.
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), HostError>;

    /// Give `node` input focus.
    fn focus(&self, node: &Self::Node) -> Result<(), HostError>;

    /// A monotonic clock, in milliseconds.
    fn now(&self) -> f64;
}
