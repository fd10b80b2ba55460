use super::{host, props, update, Calls};
use dom_host::{
    DiffPolicy, Document, EventNames, HostAdapter, HostConfig, HostError, MemoryDocument,
    PropValue, Style, StyleValue,
};
use std::rc::Rc;

#[test]
fn rebinding_a_click_handler() {
    let host = host();
    let (c1, c2) = (Calls::default(), Calls::default());
    let old = props().with("onClick", c1.handler());
    let new = props().with("onClick", c2.handler());

    let button = host.create_element("button", &old).unwrap();
    update(&host, &button, &old, &new);

    assert_eq!(button.listener_count("click"), 1);
    button.dispatch("click");
    button.dispatch("click");
    assert_eq!(c1.count(), 0);
    assert_eq!(c2.count(), 2);
}

#[test]
fn rebinding_the_same_handler_is_a_no_op() {
    let host = host();
    let calls = Calls::default();
    let handler = calls.handler();
    let old = props().with("onClick", handler.clone());
    let new = props().with("onClick", handler);

    let button = host.create_element("button", &old).unwrap();
    assert!(host.prepare_update(&button, "button", &old, &new, &button, &()).is_none());
    update(&host, &button, &old, &new);

    assert_eq!(button.dispatch("click"), 1);
    assert_eq!(calls.count(), 1);
}

#[test]
fn removing_and_adding_listeners() {
    let host = host();
    let calls = Calls::default();
    let with = props().with("onInput", calls.handler());
    let without = props().with("onInput", PropValue::Null);

    let input = host.create_element("input", &with).unwrap();
    update(&host, &input, &with, &without);
    assert_eq!(input.listener_count("input"), 0);
    assert_eq!(input.dispatch("input"), 0);

    update(&host, &input, &without, &with);
    assert_eq!(input.listener_count("input"), 1);
    input.dispatch("input");
    assert_eq!(calls.count(), 1);

    update(&host, &input, &with, &props());
    assert_eq!(input.listener_count("input"), 0);
}

#[test]
fn non_handler_event_values_are_rejected() {
    let host = host();
    let old = props();
    let new = props().with("onClick", "alert(1)");
    let div = host.create_element("div", &old).unwrap();
    let payload = host.diff(&old, &new);
    assert_eq!(
        host.commit_update(&div, &payload, &old, &new),
        Err(HostError::UnsupportedValue {
            name: "onClick".into()
        })
    );
    assert_eq!(div.attribute("onClick"), None);
}

#[test]
fn resetting_one_style_property() {
    let host = host();
    let old = props().with("style", Style::new().with("color", "blue").with("width", 10));
    let new = props().with(
        "style",
        Style::new().with("color", StyleValue::Null).with("width", 10),
    );

    let div = host.create_element("div", &old).unwrap();
    update(&host, &div, &old, &new);

    assert_eq!(div.style("color"), None);
    assert_eq!(div.style("width").as_deref(), Some("10px"));
}

#[test]
fn style_sub_diff_only_touches_changed_keys() {
    let host = host();
    let old = props().with(
        "style",
        Style::new()
            .with("color", "blue")
            .with("opacity", 0.5)
            .with("height", 3),
    );
    let new = props().with(
        "style",
        Style::new()
            .with("color", "green")
            .with("opacity", 0.5)
            .with("flexGrow", 2),
    );

    let div = host.create_element("div", &old).unwrap();
    // Simulate something else changing an untracked style property.
    host.document()
        .set_style(&div, "opacity", Some("0.9"))
        .unwrap();
    update(&host, &div, &old, &new);

    assert_eq!(div.style("color").as_deref(), Some("green"));
    assert_eq!(div.style("height"), None);
    assert_eq!(div.style("flexGrow").as_deref(), Some("2"));
    // Unchanged between renders, so not re-applied.
    assert_eq!(div.style("opacity").as_deref(), Some("0.9"));
}

#[test]
fn removing_and_adding_the_whole_style() {
    let host = host();
    let styled = props().with("style", Style::new().with("color", "red").with("top", 1));
    let plain = props();

    let div = host.create_element("div", &styled).unwrap();
    update(&host, &div, &styled, &plain);
    assert_eq!(div.style("color"), None);
    assert_eq!(div.style("top"), None);

    update(&host, &div, &plain, &styled);
    assert_eq!(div.style("color").as_deref(), Some("red"));
    assert_eq!(div.style("top").as_deref(), Some("1px"));
}

#[test]
fn identity_policy_flags_equal_but_distinct_styles() {
    let host = host();
    let old = props().with("style", Style::new().with("color", "red"));
    let new = props().with("style", Style::new().with("color", "red"));
    let div = host.create_element("div", &old).unwrap();
    assert_eq!(host.diff(&old, &new).len(), 1);
    // The style sub-diff is empty, so nothing is touched.
    host.document()
        .set_style(&div, "color", Some("purple"))
        .unwrap();
    update(&host, &div, &old, &new);
    assert_eq!(div.style("color").as_deref(), Some("purple"));

    let structural = HostAdapter::new(MemoryDocument::new()).with_policy(DiffPolicy::Structural);
    assert!(structural.diff(&old, &new).is_empty());
}

#[test]
fn shared_style_mappings_are_unchanged() {
    let host = host();
    let style = Rc::new(Style::new().with("color", "red"));
    let old = props().with("style", style.clone());
    let new = props().with("style", style);
    assert!(host.diff(&old, &new).is_empty());
}

#[test]
fn attributes_are_set_and_removed() {
    let host = host();
    let old = props()
        .with("id", "a")
        .with("title", "t")
        .with("tabIndex", 1)
        .with("lang", "en");
    let new = props()
        .with("id", "b")
        .with("title", PropValue::Null)
        .with("tabIndex", 0)
        .with("hidden", true)
        .with("lang", "");

    let div = host.create_element("div", &old).unwrap();
    update(&host, &div, &old, &new);

    assert_eq!(div.attribute("id").as_deref(), Some("b"));
    assert_eq!(div.attribute("title"), None);
    // Numeric zero is a value, not an absence.
    assert_eq!(div.attribute("tabIndex").as_deref(), Some("0"));
    assert_eq!(div.attribute("hidden").as_deref(), Some("true"));
    assert_eq!(div.attribute("lang"), None);
}

#[test]
fn class_name_updates_the_class_attribute() {
    let host = host();
    let old = props().with("className", "a");
    let new = props().with("className", "b");
    let div = host.create_element("div", &old).unwrap();

    update(&host, &div, &old, &new);
    assert_eq!(div.attribute_names(), ["class"]);
    assert_eq!(div.attribute("class").as_deref(), Some("b"));

    update(&host, &div, &new, &props());
    assert!(div.attribute_names().is_empty());
}

#[test]
fn children_are_skipped() {
    let host = host();
    let old = props().with("children", "before");
    let new = props().with("children", "after");
    let div = host.create_element("div", &old).unwrap();

    let payload = host.diff(&old, &new);
    assert!(payload.contains("children"));
    host.commit_update(&div, &payload, &old, &new).unwrap();
    assert_eq!(div.text_content(), "before");
    assert!(div.attribute_names().is_empty());

    // The text is updated through its own text node.
    let text = div.first_child().unwrap();
    host.commit_text_update(&text, "before", "after");
    assert_eq!(div.text_content(), "after");
}

#[test]
fn only_names_in_the_payload_are_applied() {
    let host = host();
    let old = props().with("id", "a").with("title", "x");
    let new = props().with("id", "b").with("title", "y");
    let div = host.create_element("div", &old).unwrap();

    let payload = host.diff(&old, &new);
    let partial = host.diff(&old, &props().with("id", "b").with("title", "x"));
    assert_eq!(payload.len(), 2);
    host.commit_update(&div, &partial, &old, &new).unwrap();

    assert_eq!(div.attribute("id").as_deref(), Some("b"));
    assert_eq!(div.attribute("title").as_deref(), Some("x"));
}

#[test]
fn applying_is_idempotent() {
    let host = host();
    let calls = Calls::default();
    let old = props().with("id", "a").on("onClick", |_| {});
    let new = props()
        .with("id", "b")
        .with("onClick", calls.handler())
        .with("style", Style::new().with("left", 5));
    let div = host.create_element("div", &old).unwrap();

    let payload = host.diff(&old, &new);
    host.commit_update(&div, &payload, &old, &new).unwrap();
    let once = div.outer_html();
    host.commit_update(&div, &payload, &old, &new).unwrap();

    assert_eq!(div.outer_html(), once);
    assert_eq!(div.listener_count("click"), 1);
    div.dispatch("click");
    assert_eq!(calls.count(), 1);
}

#[test]
fn custom_event_tables() {
    let events = EventNames::empty().with("tap");
    let host = HostAdapter::new(MemoryDocument::new()).with_events(events);
    let calls = Calls::default();
    let old = props();
    let new = props()
        .with("onTap", calls.handler())
        .with("onClick", "not an event here");
    let div = host.create_element("div", &old).unwrap();

    update(&host, &div, &old, &new);
    assert_eq!(div.listener_count("tap"), 1);
    assert_eq!(div.attribute("onClick").as_deref(), Some("not an event here"));
}
