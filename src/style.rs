use crate::props::{number_to_string, Style, StyleValue};

/// Style properties whose numeric values are used as-is, without a `px` unit.
///
/// Sorted, so that lookups can binary search.
const UNITLESS: &[&str] = &[
    "animationIterationCount",
    "aspectRatio",
    "borderImageOutset",
    "borderImageSlice",
    "borderImageWidth",
    "boxFlex",
    "boxFlexGroup",
    "boxOrdinalGroup",
    "columnCount",
    "columns",
    "fillOpacity",
    "flex",
    "flexGrow",
    "flexNegative",
    "flexOrder",
    "flexPositive",
    "flexShrink",
    "floodOpacity",
    "fontWeight",
    "gridArea",
    "gridColumn",
    "gridColumnEnd",
    "gridColumnSpan",
    "gridColumnStart",
    "gridRow",
    "gridRowEnd",
    "gridRowSpan",
    "gridRowStart",
    "lineClamp",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "stopOpacity",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeMiterlimit",
    "strokeOpacity",
    "strokeWidth",
    "tabSize",
    "widows",
    "zIndex",
    "zoom",
];

/// A single normalized style assignment for a node's style surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleAssignment {
    /// The style property name, exactly as it appeared in the style mapping.
    pub name: String,
    /// The backend-native value, or `None` to reset the property to its
    /// default.
    pub value: Option<String>,
}

/// Are numeric values of the style property `name` used without a unit?
///
/// Accepts both `camelCase` and `kebab-case` names. Custom properties
/// (`--my-thing`) are always unitless.
pub fn is_unitless(name: &str) -> bool {
    if name.starts_with("--") {
        return true;
    }
    if name.contains('-') {
        return UNITLESS.binary_search(&camel_case(name).as_str()).is_ok();
    }
    UNITLESS.binary_search(&name).is_ok()
}

fn camel_case(name: &str) -> String {
    let mut s = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.trim_start_matches('-').chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            s.extend(c.to_uppercase());
            upper = false;
        } else {
            s.push(c);
        }
    }
    s
}

/// Normalize one style value for the property `name`.
///
/// Returns `None` when the property should be reset to its default.
pub fn normalize_value(name: &str, value: &StyleValue) -> Option<String> {
    if value.is_unset() {
        return None;
    }
    match value {
        StyleValue::Number(n) if !is_unitless(name) => {
            Some(format!("{}px", number_to_string(*n)))
        }
        StyleValue::Number(n) => Some(number_to_string(*n)),
        StyleValue::Str(s) => Some(s.clone()),
        StyleValue::Bool(_) | StyleValue::Null => None,
    }
}

/// Normalize a whole style mapping into assignments, in the mapping's order.
pub fn normalize(style: &Style) -> Vec<StyleAssignment> {
    style
        .iter()
        .map(|(name, value)| StyleAssignment {
            name: name.to_string(),
            value: normalize_value(name, value),
        })
        .collect()
}
