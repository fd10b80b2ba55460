//! A counter with `+` and `-` buttons.

pub mod engine;

use dom_host::{Document, Handler, HostAdapter, HostError, Props, Roots};
use engine::{Engine, VNode};
use log::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The counter application, mounted into one container.
pub struct Counter<D: Document + 'static> {
    val: Cell<isize>,
    container: D::Node,
    roots: RefCell<Roots<HostAdapter<D>, Engine<D>>>,
}

impl<D: Document + 'static> Counter<D> {
    /// Render a new counter into `container`.
    pub fn mount(host: HostAdapter<D>, container: D::Node) -> Result<Rc<Counter<D>>, HostError> {
        let counter = Rc::new(Counter {
            val: Cell::new(0),
            container,
            roots: RefCell::new(Roots::new(host, Engine::default())),
        });
        counter.render()?;
        Ok(counter)
    }

    pub fn val(&self) -> isize {
        self.val.get()
    }

    fn render(self: &Rc<Self>) -> Result<(), HostError> {
        debug!("rendering counter = {}", self.val());
        let view = self.view();
        self.roots.borrow_mut().render(view, &self.container, None)
    }

    fn view(self: &Rc<Self>) -> VNode<D::Event> {
        VNode::element(
            "div",
            Props::new().with("className", "counter"),
            vec![
                VNode::element(
                    "button",
                    Props::new().with("onClick", self.on_click(1)),
                    vec![VNode::text("+")],
                ),
                VNode::text(self.val().to_string()),
                VNode::element(
                    "button",
                    Props::new().with("onClick", self.on_click(-1)),
                    vec![VNode::text("-")],
                ),
            ],
        )
    }

    // Listeners hold the counter weakly: the counter owns the nodes that own
    // the listeners.
    fn on_click(self: &Rc<Self>, delta: isize) -> Handler<D::Event> {
        let counter = Rc::downgrade(self);
        Handler::new(move |_| {
            if let Some(counter) = counter.upgrade() {
                counter.val.set(counter.val() + delta);
                if let Err(e) = counter.render() {
                    error!("failed to re-render the counter: {}", e);
                }
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::Counter;
    use dom_host::{HostAdapter, WebDocument};
    use log::*;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(Level::Trace).expect("should initialize logging OK");

        let window = web_sys::window().unwrap_throw();
        let document = window.document().unwrap_throw();
        let body = document.body().unwrap_throw();

        // Mount our counter to the `<body>`.
        let host = HostAdapter::new(WebDocument::with_document(document));
        let counter =
            Counter::mount(host, body.into()).map_err(|e| JsValue::from_str(&e.to_string()))?;

        // Run the counter and its listeners forever.
        std::mem::forget(counter);
        Ok(())
    }
}
