//! A tiny reconciliation engine.
//!
//! Children are matched up by position only: the `i`th old child is patched
//! into the `i`th new child when both are text or both are elements with the
//! same tag, and replaced otherwise. Extra old children are removed and extra
//! new children are appended.

use dom_host::{Document, HostAdapter, HostConfig, HostError, Props, Reconciler};

/// A virtual node.
pub enum VNode<E> {
    Text(String),
    Element {
        tag: &'static str,
        props: Props<E>,
        children: Vec<VNode<E>>,
    },
}

impl<E> VNode<E> {
    pub fn text(text: impl Into<String>) -> VNode<E> {
        VNode::Text(text.into())
    }

    pub fn element(tag: &'static str, props: Props<E>, children: Vec<VNode<E>>) -> VNode<E> {
        VNode::Element {
            tag,
            props,
            children,
        }
    }
}

enum Shape<E> {
    Text(String),
    Element { tag: &'static str, props: Props<E> },
}

impl<E> Shape<E> {
    fn matches(&self, vnode: &VNode<E>) -> bool {
        match (self, vnode) {
            (Shape::Text(_), VNode::Text(_)) => true,
            (Shape::Element { tag, .. }, VNode::Element { tag: new, .. }) => tag == new,
            _ => false,
        }
    }
}

struct Mounted<D: Document> {
    node: D::Node,
    shape: Shape<D::Event>,
    children: Vec<Mounted<D>>,
}

/// What the engine remembers about one container.
pub struct Tree<D: Document> {
    container: D::Node,
    current: Option<Mounted<D>>,
}

impl<D: Document> Tree<D> {
    /// The node currently mounted at the top of this tree.
    pub fn top(&self) -> Option<&D::Node> {
        self.current.as_ref().map(|m| &m.node)
    }
}

/// The engine.
pub struct Engine<D: Document> {
    pending_mounts: Vec<(D::Node, &'static str, Props<D::Event>)>,
}

impl<D: Document> Default for Engine<D> {
    fn default() -> Engine<D> {
        Engine {
            pending_mounts: Vec::new(),
        }
    }
}

fn literal_text<E>(props: &Props<E>) -> Option<String> {
    props
        .children()
        .and_then(|c| c.text_content())
        .map(|t| t.into_owned())
}

impl<D: Document> Engine<D> {
    fn mount(
        &mut self,
        host: &HostAdapter<D>,
        container: &D::Node,
        vnode: VNode<D::Event>,
    ) -> Result<Mounted<D>, HostError> {
        match vnode {
            VNode::Text(text) => Ok(Mounted {
                node: host.create_text_instance(&text, container, &(), &()),
                shape: Shape::Text(text),
                children: vec![],
            }),
            VNode::Element {
                tag,
                props,
                children,
            } => {
                let node = host.create_instance(tag, &props, container, &(), &())?;
                let mut mounted = Vec::with_capacity(children.len());
                if !HostConfig::should_set_text_content(host, tag, &props) {
                    for child in children {
                        let child = self.mount(host, container, child)?;
                        host.append_initial_child(&node, &child.node)?;
                        mounted.push(child);
                    }
                }
                if host.finalize_initial_children(&node, tag, &props, container, &()) {
                    self.pending_mounts.push((node.clone(), tag, props.clone()));
                }
                Ok(Mounted {
                    node,
                    shape: Shape::Element { tag, props },
                    children: mounted,
                })
            }
        }
    }

    // `old` and `new` must have the same shape.
    fn patch(
        &mut self,
        host: &HostAdapter<D>,
        container: &D::Node,
        old: &mut Mounted<D>,
        new: VNode<D::Event>,
    ) -> Result<(), HostError> {
        match (&mut old.shape, new) {
            (Shape::Text(text), VNode::Text(new_text)) => {
                if *text != new_text {
                    host.commit_text_update(&old.node, text, &new_text);
                    *text = new_text;
                }
                Ok(())
            }
            (
                Shape::Element { tag, props },
                VNode::Element {
                    props: new_props,
                    children,
                    ..
                },
            ) => {
                let tag = *tag;
                if let Some(payload) =
                    host.prepare_update(&old.node, tag, props, &new_props, container, &())
                {
                    HostConfig::commit_update(host, &old.node, &payload, tag, props, &new_props, &())?;
                }
                let was_text = HostConfig::should_set_text_content(host, tag, props);
                let old_text = literal_text(props);
                *props = new_props;

                if HostConfig::should_set_text_content(host, tag, props) {
                    let text = literal_text(props);
                    if !was_text || text != old_text {
                        old.children.clear();
                        host.set_text_content(&old.node, text.as_deref().unwrap_or(""));
                    }
                    return Ok(());
                }
                if was_text {
                    HostConfig::reset_text_content(host, &old.node);
                }
                self.patch_children(host, container, &old.node, &mut old.children, children)
            }
            _ => Ok(()),
        }
    }

    fn patch_children(
        &mut self,
        host: &HostAdapter<D>,
        container: &D::Node,
        parent: &D::Node,
        old: &mut Vec<Mounted<D>>,
        new: Vec<VNode<D::Event>>,
    ) -> Result<(), HostError> {
        if old.len() > new.len() {
            for extra in old.drain(new.len()..) {
                HostConfig::remove_child(host, parent, &extra.node)?;
            }
        }

        let mut new = new.into_iter();
        for child in old.iter_mut() {
            let vnode = match new.next() {
                Some(vnode) => vnode,
                None => break,
            };
            if child.shape.matches(&vnode) {
                self.patch(host, container, child, vnode)?;
            } else {
                let replacement = self.mount(host, container, vnode)?;
                HostConfig::insert_before(host, parent, &replacement.node, &child.node)?;
                HostConfig::remove_child(host, parent, &child.node)?;
                *child = replacement;
            }
        }

        for vnode in new {
            let child = self.mount(host, container, vnode)?;
            HostConfig::append_child(host, parent, &child.node)?;
            old.push(child);
        }
        Ok(())
    }
}

impl<D: Document> Reconciler<HostAdapter<D>> for Engine<D> {
    type Root = Tree<D>;
    type Element = VNode<D::Event>;
    type Output = Result<(), HostError>;

    fn create_container(&mut self, _host: &HostAdapter<D>, container: &D::Node) -> Tree<D> {
        Tree {
            container: container.clone(),
            current: None,
        }
    }

    fn update_container(
        &mut self,
        host: &HostAdapter<D>,
        element: VNode<D::Event>,
        root: &mut Tree<D>,
        callback: Option<Box<dyn FnOnce()>>,
    ) -> Result<(), HostError> {
        self.pending_mounts.clear();
        host.prepare_for_commit(&root.container);

        match root.current.as_mut() {
            Some(current) if current.shape.matches(&element) => {
                self.patch(host, &root.container, current, element)?;
            }
            _ => {
                let new = self.mount(host, &root.container, element)?;
                match root.current.take() {
                    Some(old) => {
                        host.insert_in_container_before(&root.container, &new.node, &old.node)?;
                        host.remove_child_from_container(&root.container, &old.node)?;
                    }
                    None => {
                        host.clear_container(&root.container);
                        host.append_child_to_container(&root.container, &new.node)?;
                    }
                }
                root.current = Some(new);
            }
        }

        for (node, tag, props) in self.pending_mounts.drain(..) {
            host.commit_mount(&node, tag, &props, &())?;
        }
        host.reset_after_commit(&root.container);

        if let Some(callback) = callback {
            callback();
        }
        Ok(())
    }
}
