use crate::props::{same_number, PropValue, Props, Style};
use std::slice;

/// The names of the properties that changed between two renders of a node,
/// in the order they should be applied.
///
/// Every name appears at most once, and is a key of the old props, the new
/// props, or both.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdatePayload {
    names: Vec<String>,
}

impl UpdatePayload {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Does this payload contain the property `name`?
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Iterate over the changed property names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }
}

impl<'a> IntoIterator for &'a UpdatePayload {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// How two property values are compared when diffing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffPolicy {
    /// Strict, non-deep equality.
    ///
    /// Strings, numbers and booleans are compared by value. Style mappings,
    /// handlers and child references are compared by identity, so replacing
    /// a style mapping with a structurally identical but distinct one is a
    /// change. Diffing stays linear in the number of keys and never descends
    /// into nested values.
    Identity,

    /// Like `Identity`, except that style mappings are compared by their
    /// contents. Handlers and child references are still compared by
    /// identity.
    Structural,
}

impl Default for DiffPolicy {
    fn default() -> DiffPolicy {
        DiffPolicy::Identity
    }
}

impl DiffPolicy {
    /// Compute the update payload between `old` and `new` under this policy.
    ///
    /// Names come out in `old`'s order, followed by the names only `new` has.
    pub fn diff<E>(self, old: &Props<E>, new: &Props<E>) -> UpdatePayload {
        // Quadratic, but property mappings are almost always tiny.
        let mut names = Vec::new();
        for (name, old_value) in old.iter() {
            if !self.same_value(Some(old_value), new.get(name)) {
                names.push(name.to_string());
            }
        }
        for (name, _) in new.iter().filter(|(name, _)| old.get(name).is_none()) {
            names.push(name.to_string());
        }
        UpdatePayload { names }
    }

    /// Are these two (possibly absent) values the same under this policy?
    pub fn same_value<E>(self, old: Option<&PropValue<E>>, new: Option<&PropValue<E>>) -> bool {
        let (old, new) = match (old, new) {
            (None, None) => return true,
            (Some(old), Some(new)) => (old, new),
            _ => return false,
        };
        match (old, new) {
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => same_number(*a, *b),
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Null, PropValue::Null) => true,
            (PropValue::Style(a), PropValue::Style(b)) => match self {
                DiffPolicy::Identity => std::rc::Rc::ptr_eq(a, b),
                DiffPolicy::Structural => std::rc::Rc::ptr_eq(a, b) || a == b,
            },
            (PropValue::Handler(a), PropValue::Handler(b)) => a.ptr_eq(b),
            (PropValue::Nodes(a), PropValue::Nodes(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Compute the update payload between `old` and `new` with the default,
/// identity-based policy.
pub fn diff<E>(old: &Props<E>, new: &Props<E>) -> UpdatePayload {
    DiffPolicy::Identity.diff(old, new)
}

/// Compute the names of the style properties that changed between `old` and
/// `new`, in `old`'s order followed by the names only `new` has.
///
/// A missing style mapping is the same as an empty one.
pub fn diff_style(old: Option<&Style>, new: Option<&Style>) -> Vec<String> {
    let empty = Style::new();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    let mut names = Vec::new();
    for (name, old_value) in old.iter() {
        if new.get(name) != Some(old_value) {
            names.push(name.to_string());
        }
    }
    for (name, _) in new.iter().filter(|(name, _)| old.get(name).is_none()) {
        names.push(name.to_string());
    }
    names
}
