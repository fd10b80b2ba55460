use crate::diff::{diff_style, DiffPolicy, UpdatePayload};
use crate::document::{Document, HostError};
use crate::events::{self, EventNames};
use crate::props::{PropValue, Props, Style, CHILDREN, STYLE};
use crate::style::normalize_value;
use std::fmt;

/// The operations a reconciliation engine needs from a rendering backend.
///
/// The engine calls `create_instance`, `create_text_instance`,
/// `append_initial_child`, `finalize_initial_children` and `prepare_update`
/// during its render phase, which it may abandon at any point: these only
/// touch the nodes they create. Everything else is called during the commit
/// phase, at most once per committed change.
///
/// The host context and the engine's internal instance handles are opaque:
/// they are passed through and never examined.
pub trait HostConfig {
    /// The root node that whole trees are mounted into.
    type Container;
    /// An element node.
    type Instance;
    /// A text node.
    type TextInstance;
    /// A property mapping.
    type Props;
    /// Context threaded from parents to children during rendering.
    type HostContext: Clone;
    /// What `prepare_update` hands to `commit_update`.
    type UpdatePayload;
    /// What the engine exposes to application code as a rendered instance.
    type PublicInstance;

    /// The host context for the root of a tree mounted into `container`.
    fn root_host_context(&self, container: &Self::Container) -> Self::HostContext;

    /// The host context for the children of an element of type `tag`.
    fn child_host_context(&self, parent: &Self::HostContext, tag: &str) -> Self::HostContext;

    /// Create an element and apply its initial props.
    fn create_instance<H: ?Sized>(
        &self,
        tag: &str,
        props: &Self::Props,
        container: &Self::Container,
        cx: &Self::HostContext,
        handle: &H,
    ) -> Result<Self::Instance, HostError>;

    /// Create a text node.
    fn create_text_instance<H: ?Sized>(
        &self,
        text: &str,
        container: &Self::Container,
        cx: &Self::HostContext,
        handle: &H,
    ) -> Self::TextInstance;

    /// Append a child to a parent that is still being built.
    fn append_initial_child(
        &self,
        parent: &Self::Instance,
        child: &Self::Instance,
    ) -> Result<(), HostError>;

    /// Called once an element's initial children are appended. Returns whether
    /// `commit_mount` should be called for it once it is attached.
    fn finalize_initial_children(
        &self,
        instance: &Self::Instance,
        tag: &str,
        props: &Self::Props,
        container: &Self::Container,
        cx: &Self::HostContext,
    ) -> bool;

    /// Does an element of type `tag` with `props` hold its children as
    /// literal text content, instead of as child nodes?
    fn should_set_text_content(&self, tag: &str, props: &Self::Props) -> bool;

    /// Compute what changed between `old` and `new`, or `None` if nothing did.
    fn prepare_update(
        &self,
        instance: &Self::Instance,
        tag: &str,
        old: &Self::Props,
        new: &Self::Props,
        container: &Self::Container,
        cx: &Self::HostContext,
    ) -> Option<Self::UpdatePayload>;

    /// Apply a payload from `prepare_update`.
    fn commit_update<H: ?Sized>(
        &self,
        instance: &Self::Instance,
        payload: &Self::UpdatePayload,
        tag: &str,
        old: &Self::Props,
        new: &Self::Props,
        handle: &H,
    ) -> Result<(), HostError>;

    /// Called for elements flagged by `finalize_initial_children` once they
    /// are attached.
    fn commit_mount<H: ?Sized>(
        &self,
        instance: &Self::Instance,
        tag: &str,
        props: &Self::Props,
        handle: &H,
    ) -> Result<(), HostError>;

    /// Replace a text node's text.
    fn commit_text_update(&self, text: &Self::TextInstance, old: &str, new: &str);

    /// Clear the text content of an element that held literal text.
    fn reset_text_content(&self, instance: &Self::Instance);

    fn append_child(&self, parent: &Self::Instance, child: &Self::Instance)
        -> Result<(), HostError>;

    fn append_child_to_container(
        &self,
        container: &Self::Container,
        child: &Self::Instance,
    ) -> Result<(), HostError>;

    fn insert_before(
        &self,
        parent: &Self::Instance,
        child: &Self::Instance,
        before: &Self::Instance,
    ) -> Result<(), HostError>;

    fn insert_in_container_before(
        &self,
        container: &Self::Container,
        child: &Self::Instance,
        before: &Self::Instance,
    ) -> Result<(), HostError>;

    fn remove_child(&self, parent: &Self::Instance, child: &Self::Instance)
        -> Result<(), HostError>;

    fn remove_child_from_container(
        &self,
        container: &Self::Container,
        child: &Self::Instance,
    ) -> Result<(), HostError>;

    /// Remove everything from `container` before mounting a fresh tree.
    fn clear_container(&self, container: &Self::Container);

    fn public_instance(&self, instance: &Self::Instance) -> Self::PublicInstance;

    /// Called before the commit phase's mutations.
    fn prepare_for_commit(&self, _container: &Self::Container) {}

    /// Called after the commit phase's mutations.
    fn reset_after_commit(&self, _container: &Self::Container) {}

    /// The clock the engine schedules by, in milliseconds.
    fn now(&self) -> f64;
}

/// Element types that are focused on mount when `autoFocus` is set.
const FOCUSABLE: &[&str] = &["button", "input", "select", "textarea"];

/// Element types whose children are always literal text.
const TEXT_ONLY: &[&str] = &["noscript", "option", "textarea"];

/// A host adapter for the document `D`.
///
/// The adapter holds no state between calls besides its configuration: the
/// document to drive, the table of recognized events, and the diff policy.
pub struct HostAdapter<D> {
    document: D,
    events: EventNames,
    policy: DiffPolicy,
}

impl<D: fmt::Debug> fmt::Debug for HostAdapter<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HostAdapter")
            .field("document", &self.document)
            .field("events", &self.events)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<D: Document> HostAdapter<D> {
    /// Construct a new host adapter driving `document`, with the standard DOM
    /// event table and the identity diff policy.
    pub fn new(document: D) -> HostAdapter<D> {
        HostAdapter {
            document,
            events: EventNames::dom(),
            policy: DiffPolicy::default(),
        }
    }

    /// Use `events` to decide which `on*` properties are event properties.
    pub fn with_events(mut self, events: EventNames) -> HostAdapter<D> {
        self.events = events;
        self
    }

    /// Use `policy` to compare property values when diffing.
    pub fn with_policy(mut self, policy: DiffPolicy) -> HostAdapter<D> {
        self.policy = policy;
        self
    }

    /// The document this adapter drives.
    #[inline]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[inline]
    pub fn events(&self) -> &EventNames {
        &self.events
    }

    #[inline]
    pub fn policy(&self) -> DiffPolicy {
        self.policy
    }

    /// Create an element of type `tag` and apply its initial props.
    ///
    /// Literal string or number `children` become the element's text content;
    /// nested node children are left for the caller to append.
    pub fn create_element(&self, tag: &str, props: &Props<D::Event>) -> Result<D::Node, HostError> {
        trace!("create_element <{}> {:?}", tag, props);
        let node = self.document.create_element(tag)?;
        for (name, value) in props.iter() {
            match name {
                CHILDREN => {
                    if let Some(text) = value.text_content() {
                        self.document.set_text_content(&node, Some(&*text));
                    }
                }
                STYLE => {
                    if let Some(style) = self.style_of(name, value)? {
                        self.set_style(&node, style.iter().map(|(n, _)| n), style)?;
                    }
                }
                _ => {
                    if let Some(event) = self.events.event_name(name) {
                        match value {
                            PropValue::Handler(h) => events::bind(&self.document, &node, &event, h)?,
                            PropValue::Null => {}
                            _ => return Err(unsupported(name)),
                        }
                    } else if value.is_present() {
                        self.set_attribute(&node, name, value)?;
                    }
                }
            }
        }
        Ok(node)
    }

    /// Create a text node.
    pub fn create_text_node(&self, text: &str) -> D::Node {
        trace!("create_text_node {:?}", text);
        self.document.create_text_node(text)
    }

    /// Should an element of type `tag` with `props` be focused once mounted?
    pub fn should_auto_focus(&self, tag: &str, props: &Props<D::Event>) -> bool {
        FOCUSABLE.contains(&tag) && props.get("autoFocus").map_or(false, |v| v.is_truthy())
    }

    /// Does an element of type `tag` with `props` hold its children as literal
    /// text content?
    pub fn should_set_text_content(&self, tag: &str, props: &Props<D::Event>) -> bool {
        TEXT_ONLY.contains(&tag) || props.children().map_or(false, |c| c.text_content().is_some())
    }

    /// Compute the update payload between `old` and `new` under this
    /// adapter's diff policy.
    pub fn diff(&self, old: &Props<D::Event>, new: &Props<D::Event>) -> UpdatePayload {
        self.policy.diff(old, new)
    }

    /// Apply exactly the properties named in `payload` to `node`.
    pub fn commit_update(
        &self,
        node: &D::Node,
        payload: &UpdatePayload,
        old: &Props<D::Event>,
        new: &Props<D::Event>,
    ) -> Result<(), HostError> {
        trace!("commit_update {:?}", payload);
        for name in payload.iter() {
            let old_value = old.get(name);
            let new_value = new.get(name);
            match name {
                // Text children are updated through their own text nodes, and
                // node children are appended and removed by the engine.
                CHILDREN => {}
                STYLE => {
                    let old_style = match old_value {
                        Some(v) => self.style_of(name, v)?,
                        None => None,
                    };
                    let new_style = match new_value {
                        Some(v) => self.style_of(name, v)?,
                        None => None,
                    };
                    let changed = diff_style(old_style, new_style);
                    let empty = Style::new();
                    self.set_style(
                        node,
                        changed.iter().map(|n| n.as_str()),
                        new_style.unwrap_or(&empty),
                    )?;
                }
                _ => {
                    if let Some(event) = self.events.event_name(name) {
                        // Always remove before adding, even when rebinding, so
                        // the old handler can never fire again.
                        if let Some(PropValue::Handler(h)) = old_value {
                            events::unbind(&self.document, node, &event, h)?;
                        }
                        match new_value {
                            Some(PropValue::Handler(h)) => {
                                events::bind(&self.document, node, &event, h)?
                            }
                            None | Some(PropValue::Null) => {}
                            Some(_) => return Err(unsupported(name)),
                        }
                    } else {
                        match new_value {
                            Some(v) if v.is_present() => self.set_attribute(node, name, v)?,
                            _ => self.document.remove_attribute(node, attribute_name(name))?,
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Replace `node`'s content with literal text.
    pub fn set_text_content(&self, node: &D::Node, text: &str) {
        self.document.set_text_content(node, Some(text));
    }

    /// Clear `node`'s literal text content.
    pub fn reset_text_content(&self, node: &D::Node) {
        self.document.set_text_content(node, None);
    }

    pub fn append_child(&self, parent: &D::Node, child: &D::Node) -> Result<(), HostError> {
        self.document.append_child(parent, child)
    }

    pub fn insert_before(
        &self,
        parent: &D::Node,
        child: &D::Node,
        before: &D::Node,
    ) -> Result<(), HostError> {
        self.document.insert_before(parent, child, before)
    }

    pub fn remove_child(&self, parent: &D::Node, child: &D::Node) -> Result<(), HostError> {
        self.document.remove_child(parent, child)
    }

    /// Give `node` input focus.
    pub fn focus(&self, node: &D::Node) -> Result<(), HostError> {
        trace!("focus {:?}", node);
        self.document.focus(node)
    }

    // The style mapping held by `value`, or `None` if there is none.
    fn style_of<'a>(
        &self,
        name: &str,
        value: &'a PropValue<D::Event>,
    ) -> Result<Option<&'a Style>, HostError> {
        match value {
            PropValue::Style(style) => Ok(Some(style)),
            PropValue::Null => Ok(None),
            _ => Err(unsupported(name)),
        }
    }

    // Assign each of `names` from `style`; names missing from `style` are
    // reset to their defaults.
    fn set_style<'n>(
        &self,
        node: &D::Node,
        names: impl Iterator<Item = &'n str>,
        style: &Style,
    ) -> Result<(), HostError> {
        for name in names {
            let value = style.get(name).and_then(|v| normalize_value(name, v));
            self.document.set_style(node, name, value.as_deref())?;
        }
        Ok(())
    }

    fn set_attribute(
        &self,
        node: &D::Node,
        name: &str,
        value: &PropValue<D::Event>,
    ) -> Result<(), HostError> {
        let value = value.attribute_value().ok_or_else(|| unsupported(name))?;
        self.document.set_attribute(node, attribute_name(name), &value)
    }
}

fn attribute_name(prop: &str) -> &str {
    match prop {
        "className" => "class",
        _ => prop,
    }
}

fn unsupported(name: &str) -> HostError {
    warn!("unsupported value for property `{}`", name);
    HostError::UnsupportedValue {
        name: name.to_string(),
    }
}

impl<D: Document> HostConfig for HostAdapter<D> {
    type Container = D::Node;
    type Instance = D::Node;
    type TextInstance = D::Node;
    type Props = Props<D::Event>;
    type HostContext = ();
    type UpdatePayload = UpdatePayload;
    type PublicInstance = D::Node;

    fn root_host_context(&self, _container: &D::Node) -> Self::HostContext {}

    fn child_host_context(&self, _parent: &(), _tag: &str) -> Self::HostContext {}

    fn create_instance<H: ?Sized>(
        &self,
        tag: &str,
        props: &Props<D::Event>,
        _container: &D::Node,
        _cx: &(),
        _handle: &H,
    ) -> Result<D::Node, HostError> {
        self.create_element(tag, props)
    }

    fn create_text_instance<H: ?Sized>(
        &self,
        text: &str,
        _container: &D::Node,
        _cx: &(),
        _handle: &H,
    ) -> D::Node {
        self.create_text_node(text)
    }

    fn append_initial_child(&self, parent: &D::Node, child: &D::Node) -> Result<(), HostError> {
        self.append_child(parent, child)
    }

    fn finalize_initial_children(
        &self,
        _instance: &D::Node,
        tag: &str,
        props: &Props<D::Event>,
        _container: &D::Node,
        _cx: &(),
    ) -> bool {
        self.should_auto_focus(tag, props)
    }

    fn should_set_text_content(&self, tag: &str, props: &Props<D::Event>) -> bool {
        HostAdapter::should_set_text_content(self, tag, props)
    }

    fn prepare_update(
        &self,
        _instance: &D::Node,
        _tag: &str,
        old: &Props<D::Event>,
        new: &Props<D::Event>,
        _container: &D::Node,
        _cx: &(),
    ) -> Option<UpdatePayload> {
        let payload = self.diff(old, new);
        if payload.is_empty() {
            None
        } else {
            Some(payload)
        }
    }

    fn commit_update<H: ?Sized>(
        &self,
        instance: &D::Node,
        payload: &UpdatePayload,
        _tag: &str,
        old: &Props<D::Event>,
        new: &Props<D::Event>,
        _handle: &H,
    ) -> Result<(), HostError> {
        HostAdapter::commit_update(self, instance, payload, old, new)
    }

    fn commit_mount<H: ?Sized>(
        &self,
        instance: &D::Node,
        tag: &str,
        props: &Props<D::Event>,
        _handle: &H,
    ) -> Result<(), HostError> {
        if self.should_auto_focus(tag, props) {
            self.focus(instance)?;
        }
        Ok(())
    }

    fn commit_text_update(&self, text: &D::Node, _old: &str, new: &str) {
        trace!("commit_text_update {:?}", new);
        self.set_text_content(text, new);
    }

    fn reset_text_content(&self, instance: &D::Node) {
        HostAdapter::reset_text_content(self, instance)
    }

    fn append_child(&self, parent: &D::Node, child: &D::Node) -> Result<(), HostError> {
        HostAdapter::append_child(self, parent, child)
    }

    fn append_child_to_container(
        &self,
        container: &D::Node,
        child: &D::Node,
    ) -> Result<(), HostError> {
        self.document.append_child(container, child)
    }

    fn insert_before(
        &self,
        parent: &D::Node,
        child: &D::Node,
        before: &D::Node,
    ) -> Result<(), HostError> {
        HostAdapter::insert_before(self, parent, child, before)
    }

    fn insert_in_container_before(
        &self,
        container: &D::Node,
        child: &D::Node,
        before: &D::Node,
    ) -> Result<(), HostError> {
        self.document.insert_before(container, child, before)
    }

    fn remove_child(&self, parent: &D::Node, child: &D::Node) -> Result<(), HostError> {
        HostAdapter::remove_child(self, parent, child)
    }

    fn remove_child_from_container(
        &self,
        container: &D::Node,
        child: &D::Node,
    ) -> Result<(), HostError> {
        self.document.remove_child(container, child)
    }

    fn clear_container(&self, container: &D::Node) {
        self.document.set_text_content(container, None);
    }

    fn public_instance(&self, instance: &D::Node) -> D::Node {
        instance.clone()
    }

    fn now(&self) -> f64 {
        self.document.now()
    }
}
