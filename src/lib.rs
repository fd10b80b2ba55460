//! A host adapter for driving a DOM from a tree-reconciliation engine.
//!
//! The reconciliation engine owns the virtual tree, scheduling, and the
//! decision of *what* changes. This crate is the other half: it turns the
//! engine's primitive render output into real nodes, computes the minimal set
//! of changed properties between two renders of a node, and applies exactly
//! those changes to the mutable tree.
//!
//! ## Example
//!
//! ```
//! use dom_host::{HostAdapter, MemoryDocument, Props, Style};
//!
//! let host = HostAdapter::new(MemoryDocument::new());
//!
//! // Render phase: materialize an element from its initial props.
//! let old = Props::new()
//!     .with("className", "greeting")
//!     .with("style", Style::new().with("color", "red").with("width", 10))
//!     .with("children", "Hello!");
//! let div = host.create_element("div", &old).unwrap();
//!
//! assert_eq!(div.attribute("class").as_deref(), Some("greeting"));
//! assert_eq!(div.style("width").as_deref(), Some("10px"));
//! assert_eq!(div.text_content(), "Hello!");
//!
//! // Commit phase: diff and apply only what changed.
//! let new = Props::new()
//!     .with("className", "farewell")
//!     .with("children", "Hello!");
//! let payload = host.diff(&old, &new);
//! assert_eq!(payload.len(), 2);
//! host.commit_update(&div, &payload, &old, &new).unwrap();
//!
//! assert_eq!(div.attribute("class").as_deref(), Some("farewell"));
//! assert_eq!(div.style("color"), None);
//! ```

#![deny(missing_debug_implementations)]

#[cfg(feature = "log")]
#[macro_use]
extern crate log;

#[cfg(not(feature = "log"))]
#[macro_use]
mod logging;

mod diff;
mod document;
mod dom;
mod events;
mod host;
mod props;
mod root;
mod style;

// Re-export items at the top level.
pub use self::diff::{diff, diff_style, DiffPolicy, UpdatePayload};
pub use self::document::{Document, HostError};
pub use self::dom::{Event, MemoryDocument, Node};
pub use self::events::EventNames;
pub use self::host::{HostAdapter, HostConfig};
pub use self::props::{ChildRef, Handler, PropValue, Props, Style, StyleValue};
pub use self::root::{Reconciler, Roots};
pub use self::style::{is_unitless, normalize, normalize_value, StyleAssignment};

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod web;
        pub use self::web::WebDocument;

        /// The document backend for the current target: the browser's DOM.
        pub type DefaultDocument = WebDocument;
    } else {
        /// The document backend for the current target: there is no browser
        /// DOM outside of `wasm32`, so this is the in-memory tree.
        pub type DefaultDocument = MemoryDocument;
    }
}
