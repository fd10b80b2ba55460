use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// The property name whose value is a node's child content.
pub(crate) const CHILDREN: &str = "children";

/// The property name whose value is a node's inline style.
pub(crate) const STYLE: &str = "style";

/// An event handler.
///
/// Handlers are compared by identity: two handlers are the same handler only
/// if one is a clone of the other. This is what lets a backend remove exactly
/// the listener it registered earlier.
pub struct Handler<E> {
    callback: Rc<dyn Fn(&E)>,
}

impl<E> Handler<E> {
    /// Construct a new handler that invokes `f` with each event.
    pub fn new<F>(f: F) -> Handler<E>
    where
        F: 'static + Fn(&E),
    {
        Handler {
            callback: Rc::new(f),
        }
    }

    /// Invoke this handler with the given event.
    #[inline]
    pub fn call(&self, event: &E) {
        (self.callback)(event)
    }

    /// Is `other` the very same handler as `self`?
    #[inline]
    pub fn ptr_eq(&self, other: &Handler<E>) -> bool {
        self.id() == other.id()
    }

    /// An address that uniquely identifies this handler for as long as it,
    /// or any clone of it, is alive.
    #[inline]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.callback) as *const u8 as usize
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Handler {
            callback: self.callback.clone(),
        }
    }
}

impl<E> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&(self.id() as *const u8))
            .finish()
    }
}

/// An opaque reference to nested child nodes that the engine appends on its
/// own. The adapter never looks inside; it only compares references.
#[derive(Clone)]
pub struct ChildRef(Rc<dyn Any>);

impl ChildRef {
    /// Wrap the engine's own representation of a node's children.
    pub fn new<T: Any>(children: T) -> ChildRef {
        ChildRef(Rc::new(children))
    }

    /// Get the wrapped children back, if they are a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Is `other` the very same child reference as `self`?
    #[inline]
    pub fn ptr_eq(&self, other: &ChildRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ChildRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ChildRef")
            .field(&(Rc::as_ptr(&self.0) as *const u8))
            .finish()
    }
}

/// Format a number the way the DOM stringifies it: `-0` is `0`.
pub(crate) fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

// `NaN` is the same as `NaN` so that comparing a value with itself is always
// equal.
#[inline]
pub(crate) fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// A single inline style value.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleValue {
    /// A value used verbatim, such as `"red"` or `"1em"`.
    Str(String),
    /// A number. Becomes a pixel length unless the property is unitless.
    Number(f64),
    /// Booleans reset the property to its default.
    Bool(bool),
    /// Reset the property to its default.
    Null,
}

impl StyleValue {
    /// Does this value reset its property to the default?
    #[inline]
    pub fn is_unset(&self) -> bool {
        match self {
            StyleValue::Null | StyleValue::Bool(_) => true,
            StyleValue::Str(s) => s.is_empty(),
            StyleValue::Number(_) => false,
        }
    }
}

impl PartialEq for StyleValue {
    fn eq(&self, other: &StyleValue) -> bool {
        match (self, other) {
            (StyleValue::Str(a), StyleValue::Str(b)) => a == b,
            (StyleValue::Number(a), StyleValue::Number(b)) => same_number(*a, *b),
            (StyleValue::Bool(a), StyleValue::Bool(b)) => a == b,
            (StyleValue::Null, StyleValue::Null) => true,
            _ => false,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Str(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n.into())
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(StyleValue::Null, Into::into)
    }
}

/// An inline style mapping, such as `{ color: "red", opacity: 0.5 }`.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default)]
pub struct Style {
    entries: Vec<(String, StyleValue)>,
}

impl Style {
    /// Construct a new, empty style mapping.
    pub fn new() -> Style {
        Style::default()
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: &str, value: impl Into<StyleValue>) -> Style {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: &str, value: impl Into<StyleValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Get the value for `name`.
    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Structural equality: same keys with equal values, regardless of order.
impl PartialEq for Style {
    fn eq(&self, other: &Style) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

/// A property value.
///
/// Each variant is one class of property the adapter knows how to handle, so
/// that materializing and updating a node can match on it exhaustively.
pub enum PropValue<E> {
    /// A string. Becomes an attribute value, or text content under `children`.
    Str(String),
    /// A number. Becomes an attribute value, or text content under `children`.
    Number(f64),
    /// A boolean flag. `true` is present, `false` is absent.
    Bool(bool),
    /// Explicitly no value.
    Null,
    /// An inline style mapping, under `style`.
    Style(Rc<Style>),
    /// An event handler, under an `on*` event property.
    Handler(Handler<E>),
    /// Nested child nodes, under `children`. Appended by the engine, not here.
    Nodes(ChildRef),
}

impl<E> PropValue<E> {
    /// Is this value present, in the sense that an attribute with this value
    /// should exist on the node?
    ///
    /// Everything except `Null`, `false`, and the empty string is present.
    /// Note that numeric zero is present.
    pub fn is_present(&self) -> bool {
        match self {
            PropValue::Null | PropValue::Bool(false) => false,
            PropValue::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Is this value truthy?
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
            _ => self.is_present(),
        }
    }

    /// This value as an attribute value, if it has an attribute form.
    pub fn attribute_value(&self) -> Option<Cow<str>> {
        match self {
            PropValue::Str(s) => Some(Cow::Borrowed(s)),
            PropValue::Number(n) => Some(Cow::Owned(number_to_string(*n))),
            PropValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            PropValue::Null | PropValue::Style(_) | PropValue::Handler(_) | PropValue::Nodes(_) => {
                None
            }
        }
    }

    /// This value as literal text content, when it is a string or number
    /// child rather than nested nodes.
    pub fn text_content(&self) -> Option<Cow<str>> {
        match self {
            PropValue::Str(s) => Some(Cow::Borrowed(s)),
            PropValue::Number(n) => Some(Cow::Owned(number_to_string(*n))),
            _ => None,
        }
    }

    /// Get the handler, if this value is one.
    pub fn as_handler(&self) -> Option<&Handler<E>> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Get the style mapping, if this value is one.
    pub fn as_style(&self) -> Option<&Style> {
        match self {
            PropValue::Style(s) => Some(s),
            _ => None,
        }
    }
}

impl<E> Clone for PropValue<E> {
    fn clone(&self) -> Self {
        match self {
            PropValue::Str(s) => PropValue::Str(s.clone()),
            PropValue::Number(n) => PropValue::Number(*n),
            PropValue::Bool(b) => PropValue::Bool(*b),
            PropValue::Null => PropValue::Null,
            PropValue::Style(s) => PropValue::Style(s.clone()),
            PropValue::Handler(h) => PropValue::Handler(h.clone()),
            PropValue::Nodes(c) => PropValue::Nodes(c.clone()),
        }
    }
}

impl<E> fmt::Debug for PropValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            PropValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            PropValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            PropValue::Null => f.write_str("Null"),
            PropValue::Style(s) => f.debug_tuple("Style").field(s).finish(),
            PropValue::Handler(h) => h.fmt(f),
            PropValue::Nodes(c) => c.fmt(f),
        }
    }
}

impl<E> From<&str> for PropValue<E> {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl<E> From<String> for PropValue<E> {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl<E> From<f64> for PropValue<E> {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl<E> From<i32> for PropValue<E> {
    fn from(n: i32) -> Self {
        PropValue::Number(n.into())
    }
}

impl<E> From<bool> for PropValue<E> {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl<E> From<Style> for PropValue<E> {
    fn from(s: Style) -> Self {
        PropValue::Style(Rc::new(s))
    }
}

impl<E> From<Rc<Style>> for PropValue<E> {
    fn from(s: Rc<Style>) -> Self {
        PropValue::Style(s)
    }
}

impl<E> From<Handler<E>> for PropValue<E> {
    fn from(h: Handler<E>) -> Self {
        PropValue::Handler(h)
    }
}

impl<E> From<ChildRef> for PropValue<E> {
    fn from(c: ChildRef) -> Self {
        PropValue::Nodes(c)
    }
}

/// A property mapping, such as `{ className: "a", onClick: f }`.
///
/// Keys are unique. Insertion order is kept so that update payloads come out
/// in a deterministic order, but it plays no part in equality.
pub struct Props<E> {
    entries: Vec<(String, PropValue<E>)>,
}

impl<E> Props<E> {
    /// Construct a new, empty property mapping.
    pub fn new() -> Props<E> {
        Props {
            entries: Vec::new(),
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: &str, value: impl Into<PropValue<E>>) -> Props<E> {
        self.insert(name, value);
        self
    }

    /// Builder-style `insert` of an event handler.
    pub fn on<F>(self, name: &str, f: F) -> Props<E>
    where
        F: 'static + Fn(&E),
    {
        self.with(name, Handler::new(f))
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: &str, value: impl Into<PropValue<E>>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Get the value for `name`.
    pub fn get(&self, name: &str) -> Option<&PropValue<E>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The `children` value, if any.
    pub fn children(&self) -> Option<&PropValue<E>> {
        self.get(CHILDREN)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<E>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate over the property names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Props<E> {
    fn default() -> Self {
        Props::new()
    }
}

impl<E> Clone for Props<E> {
    fn clone(&self) -> Self {
        Props {
            entries: self.entries.clone(),
        }
    }
}

impl<E> fmt::Debug for Props<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(n, v)| (n, v)))
            .finish()
    }
}
