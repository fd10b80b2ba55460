//! The browser DOM, through `web-sys`.

use crate::document::{Document, HostError};
use crate::props::Handler;
use fxhash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// A JS function that trampolines into a handler, shared by every
// registration of that handler.
struct Trampoline {
    // Keeps the handler alive so that its id is not reused while registered.
    _handler: Handler<web_sys::Event>,
    closure: Closure<dyn Fn(web_sys::Event)>,
    // The DOM ignores a second identical `addEventListener`, so each
    // `(event, node)` pair is recorded once.
    registrations: Vec<(String, web_sys::Node)>,
}

/// The browser's DOM.
///
/// Each distinct handler gets one JS closure, created the first time it is
/// registered and dropped once it is no longer registered anywhere. Handing the
/// DOM the same JS function for the same handler is what makes
/// `removeEventListener` remove exactly what was added.
pub struct WebDocument {
    document: web_sys::Document,
    trampolines: RefCell<FxHashMap<usize, Trampoline>>,
}

impl fmt::Debug for WebDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WebDocument")
            .field("trampolines", &self.trampolines.borrow().len())
            .finish()
    }
}

impl WebDocument {
    /// Drive the global `window.document`.
    pub fn new() -> WebDocument {
        let document = web_sys::window()
            .expect_throw("should have access to the Window")
            .document()
            .expect_throw("should have access to the Document");
        WebDocument::with_document(document)
    }

    /// Drive the given document.
    pub fn with_document(document: web_sys::Document) -> WebDocument {
        WebDocument {
            document,
            trampolines: RefCell::new(FxHashMap::default()),
        }
    }

    /// How many handlers currently have a live JS closure.
    pub fn trampolines(&self) -> usize {
        self.trampolines.borrow().len()
    }

    fn function_for(&self, handler: &Handler<web_sys::Event>) -> js_sys::Function {
        let mut trampolines = self.trampolines.borrow_mut();
        let trampoline = trampolines.entry(handler.id()).or_insert_with(|| {
            let h = handler.clone();
            Trampoline {
                _handler: handler.clone(),
                closure: Closure::wrap(
                    Box::new(move |event: web_sys::Event| h.call(&event)) as Box<dyn Fn(_)>
                ),
                registrations: Vec::new(),
            }
        });
        trampoline.closure.as_ref().unchecked_ref::<js_sys::Function>().clone()
    }
}

impl Default for WebDocument {
    fn default() -> WebDocument {
        WebDocument::new()
    }
}

fn element(node: &web_sys::Node) -> Result<&web_sys::Element, HostError> {
    node.dyn_ref::<web_sys::Element>()
        .ok_or_else(|| HostError::Backend(format!("not an element: {:?}", node)))
}

fn html_element(node: &web_sys::Node) -> Result<&web_sys::HtmlElement, HostError> {
    node.dyn_ref::<web_sys::HtmlElement>()
        .ok_or_else(|| HostError::Backend(format!("not an HTML element: {:?}", node)))
}

fn js_error(e: JsValue) -> HostError {
    HostError::Backend(format!("{:?}", e))
}

// `style.setProperty` wants `kebab-case` names; style mappings use the
// `camelCase` names of the `CSSStyleDeclaration` object.
fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut css = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            css.push('-');
            css.push(c.to_ascii_lowercase());
        } else {
            css.push(c);
        }
    }
    if css.starts_with("ms-") {
        css.insert(0, '-');
    }
    css
}

impl Document for WebDocument {
    type Node = web_sys::Node;
    type Event = web_sys::Event;

    fn create_element(&self, tag: &str) -> Result<web_sys::Node, HostError> {
        self.document
            .create_element(tag)
            .map(Into::into)
            .map_err(js_error)
    }

    fn create_text_node(&self, text: &str) -> web_sys::Node {
        self.document.create_text_node(text).into()
    }

    fn set_attribute(&self, node: &web_sys::Node, name: &str, value: &str) -> Result<(), HostError> {
        element(node)?.set_attribute(name, value).map_err(js_error)
    }

    fn remove_attribute(&self, node: &web_sys::Node, name: &str) -> Result<(), HostError> {
        element(node)?.remove_attribute(name).map_err(js_error)
    }

    fn set_style(
        &self,
        node: &web_sys::Node,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), HostError> {
        let style = html_element(node)?.style();
        let name = css_property_name(name);
        match value {
            Some(value) => style.set_property(&name, value).map_err(js_error),
            None => style.remove_property(&name).map(|_| ()).map_err(js_error),
        }
    }

    fn set_text_content(&self, node: &web_sys::Node, text: Option<&str>) {
        node.set_text_content(text);
    }

    fn add_listener(
        &self,
        node: &web_sys::Node,
        event: &str,
        handler: &Handler<web_sys::Event>,
    ) -> Result<(), HostError> {
        let f = self.function_for(handler);
        node.add_event_listener_with_callback(event, &f)
            .map_err(js_error)?;
        if let Some(t) = self.trampolines.borrow_mut().get_mut(&handler.id()) {
            if !t.registrations.iter().any(|(e, n)| e == event && n == node) {
                t.registrations.push((event.to_string(), node.clone()));
            }
        }
        Ok(())
    }

    fn remove_listener(
        &self,
        node: &web_sys::Node,
        event: &str,
        handler: &Handler<web_sys::Event>,
    ) -> Result<(), HostError> {
        let id = handler.id();
        let f = match self.trampolines.borrow().get(&id) {
            Some(t) => t.closure.as_ref().unchecked_ref::<js_sys::Function>().clone(),
            None => {
                warn!("removing a listener that was never added: {:?}", handler);
                return Ok(());
            }
        };
        node.remove_event_listener_with_callback(event, &f)
            .map_err(js_error)?;

        let mut trampolines = self.trampolines.borrow_mut();
        let done = trampolines.get_mut(&id).map_or(false, |t| {
            t.registrations.retain(|(e, n)| !(e == event && n == node));
            t.registrations.is_empty()
        });
        if done {
            trampolines.remove(&id);
        }
        Ok(())
    }

    fn append_child(&self, parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), HostError> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn insert_before(
        &self,
        parent: &web_sys::Node,
        child: &web_sys::Node,
        before: &web_sys::Node,
    ) -> Result<(), HostError> {
        if before.parent_node().as_ref() != Some(parent) {
            return Err(HostError::NotAChild);
        }
        parent
            .insert_before(child, Some(before))
            .map(|_| ())
            .map_err(js_error)
    }

    fn remove_child(&self, parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), HostError> {
        if child.parent_node().as_ref() != Some(parent) {
            return Err(HostError::NotAChild);
        }
        parent.remove_child(child).map(|_| ()).map_err(js_error)
    }

    fn focus(&self, node: &web_sys::Node) -> Result<(), HostError> {
        html_element(node)?.focus().map_err(js_error)
    }

    fn now(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}
