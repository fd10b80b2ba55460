use crate::document::{Document, HostError};
use crate::props::Handler;
use fxhash::FxHashSet;
use std::borrow::Cow;
use std::fmt;

/// The standard DOM events, lowercase, without the `on` prefix.
const DOM_EVENTS: &[&str] = &[
    "abort",
    "animationend",
    "animationiteration",
    "animationstart",
    "auxclick",
    "beforeinput",
    "blur",
    "canplay",
    "canplaythrough",
    "change",
    "click",
    "close",
    "contextmenu",
    "copy",
    "cut",
    "dblclick",
    "drag",
    "dragend",
    "dragenter",
    "dragleave",
    "dragover",
    "dragstart",
    "drop",
    "durationchange",
    "ended",
    "error",
    "focus",
    "focusin",
    "focusout",
    "input",
    "invalid",
    "keydown",
    "keypress",
    "keyup",
    "load",
    "loadeddata",
    "loadedmetadata",
    "loadstart",
    "mousedown",
    "mouseenter",
    "mouseleave",
    "mousemove",
    "mouseout",
    "mouseover",
    "mouseup",
    "paste",
    "pause",
    "play",
    "playing",
    "pointercancel",
    "pointerdown",
    "pointerenter",
    "pointerleave",
    "pointermove",
    "pointerout",
    "pointerover",
    "pointerup",
    "progress",
    "ratechange",
    "reset",
    "resize",
    "scroll",
    "seeked",
    "seeking",
    "select",
    "stalled",
    "submit",
    "suspend",
    "timeupdate",
    "toggle",
    "touchcancel",
    "touchend",
    "touchmove",
    "touchstart",
    "transitionend",
    "volumechange",
    "waiting",
    "wheel",
];

/// The table of native event names that `on*` properties may bind to.
///
/// A property such as `onClick` is an event property only if `click` is in
/// the table. Lookups are case-insensitive on the property name; the table
/// itself holds lowercase names.
#[derive(Clone)]
pub struct EventNames {
    names: FxHashSet<Cow<'static, str>>,
}

impl fmt::Debug for EventNames {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<_> = self.names.iter().collect();
        names.sort();
        f.debug_set().entries(names).finish()
    }
}

impl Default for EventNames {
    fn default() -> EventNames {
        EventNames::dom()
    }
}

impl EventNames {
    /// An empty table: no property is an event property.
    pub fn empty() -> EventNames {
        EventNames {
            names: FxHashSet::default(),
        }
    }

    /// The standard DOM events.
    pub fn dom() -> EventNames {
        DOM_EVENTS.iter().copied().collect()
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: &str) -> EventNames {
        self.insert(name);
        self
    }

    /// Recognize `name` as a native event name.
    pub fn insert(&mut self, name: &str) {
        self.names.insert(Cow::Owned(name.to_lowercase()));
    }

    /// Is `event` a recognized native event name?
    pub fn contains(&self, event: &str) -> bool {
        self.names.contains(event)
    }

    /// If `prop` names an event property, get the native event name it binds.
    ///
    /// `onClick` becomes `click`, `onMouseDown` becomes `mousedown`.
    pub fn event_name(&self, prop: &str) -> Option<String> {
        if !prop.starts_with("on") {
            return None;
        }
        let event = prop[2..].to_lowercase();
        if self.contains(&event) {
            Some(event)
        } else {
            None
        }
    }

    /// Is `prop` an event property?
    #[inline]
    pub fn is_event_prop(&self, prop: &str) -> bool {
        self.event_name(prop).is_some()
    }
}

impl<'a> std::iter::FromIterator<&'a str> for EventNames {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> EventNames {
        let mut names = EventNames::empty();
        for name in iter {
            names.insert(name);
        }
        names
    }
}

/// Register `handler` as a listener for `event` on `node`.
pub(crate) fn bind<D: Document>(
    document: &D,
    node: &D::Node,
    event: &str,
    handler: &Handler<D::Event>,
) -> Result<(), HostError> {
    trace!("bind {} listener {:?}", event, handler);
    document.add_listener(node, event, handler)
}

/// Deregister `handler`, which must be the exact handler that was bound.
pub(crate) fn unbind<D: Document>(
    document: &D,
    node: &D::Node,
    event: &str,
    handler: &Handler<D::Event>,
) -> Result<(), HostError> {
    trace!("unbind {} listener {:?}", event, handler);
    document.remove_listener(node, event, handler)
}
