use super::{host, props, Calls};
use dom_host::{ChildRef, Document, Event, HostConfig, HostError, PropValue, Style, StyleValue};

#[test]
fn initial_render_of_styled_div() {
    let host = host();
    let props = props()
        .with("style", Style::new().with("color", "red").with("opacity", 0.5))
        .with("className", "a")
        .with("children", "hi");
    let div = host.create_element("div", &props).unwrap();

    assert_eq!(div.node_name(), "div");
    assert_eq!(div.attribute_names(), ["class"]);
    assert_eq!(div.attribute("class").as_deref(), Some("a"));
    assert_eq!(div.style("color").as_deref(), Some("red"));
    assert_eq!(div.style("opacity").as_deref(), Some("0.5"));
    assert_eq!(div.text_content(), "hi");
    assert_eq!(div.children().len(), 1);
    assert_eq!(div.outer_html(), r#"<div class="a" style="color: red; opacity: 0.5;">hi</div>"#);
}

#[test]
fn numeric_styles_get_pixel_units() {
    let host = host();
    let props = props().with(
        "style",
        Style::new()
            .with("width", 10)
            .with("zIndex", 3)
            .with("marginTop", 0)
            .with("display", StyleValue::Null)
            .with("visibility", false),
    );
    let div = host.create_element("div", &props).unwrap();
    assert_eq!(div.style("width").as_deref(), Some("10px"));
    assert_eq!(div.style("zIndex").as_deref(), Some("3"));
    assert_eq!(div.style("marginTop").as_deref(), Some("0px"));
    assert_eq!(div.style("display"), None);
    assert_eq!(div.style("visibility"), None);
}

#[test]
fn numeric_children_are_text() {
    let host = host();
    let span = host
        .create_element("span", &props().with("children", 42))
        .unwrap();
    assert_eq!(span.text_content(), "42");
}

#[test]
fn negative_zero_is_written_as_zero() {
    let host = host();
    let div = host
        .create_element(
            "div",
            &props()
                .with("tabIndex", -0.0)
                .with("style", Style::new().with("left", -0.0).with("opacity", -0.0))
                .with("children", -0.0),
        )
        .unwrap();
    assert_eq!(div.attribute("tabIndex").as_deref(), Some("0"));
    assert_eq!(div.style("left").as_deref(), Some("0px"));
    assert_eq!(div.style("opacity").as_deref(), Some("0"));
    assert_eq!(div.text_content(), "0");
}

#[test]
fn node_children_are_left_to_the_engine() {
    let host = host();
    let ul = host
        .create_element("ul", &props().with("children", ChildRef::new(vec!["a", "b"])))
        .unwrap();
    assert!(ul.children().is_empty());
    assert!(ul.attribute_names().is_empty());
}

#[test]
fn plain_props_become_attributes() {
    let host = host();
    let input = host
        .create_element(
            "input",
            &props()
                .with("id", "name")
                .with("tabIndex", 0)
                .with("disabled", true)
                .with("hidden", false)
                .with("title", "")
                .with("placeholder", PropValue::Null),
        )
        .unwrap();
    assert_eq!(input.attribute_names(), ["id", "tabIndex", "disabled"]);
    assert_eq!(input.attribute("tabIndex").as_deref(), Some("0"));
    assert_eq!(input.attribute("disabled").as_deref(), Some("true"));
}

#[test]
fn event_props_bind_listeners_instead_of_attributes() {
    let host = host();
    let calls = Calls::default();
    let button = host
        .create_element(
            "button",
            &props()
                .with("onClick", calls.handler())
                .with("onFrobnicate", "not an event"),
        )
        .unwrap();
    assert_eq!(button.listener_count("click"), 1);
    assert_eq!(button.attribute("onClick"), None);
    // Unrecognized events are plain attributes.
    assert_eq!(button.attribute("onFrobnicate").as_deref(), Some("not an event"));

    assert_eq!(button.dispatch("click"), 1);
    assert_eq!(calls.count(), 1);
}

#[test]
fn handlers_on_plain_props_are_rejected() {
    let host = host();
    let calls = Calls::default();
    let err = host
        .create_element("div", &props().with("title", calls.handler()))
        .unwrap_err();
    assert_eq!(
        err,
        HostError::UnsupportedValue {
            name: "title".into()
        }
    );
}

#[test]
fn invalid_tag_names_propagate_backend_errors() {
    let host = host();
    match host.create_element("not a tag", &props()) {
        Err(HostError::Backend(_)) => {}
        other => panic!("expected a backend error, got {:?}", other),
    }
}

#[test]
fn materializing_touches_nothing_but_the_new_node() {
    let host = host();
    let container = super::container(&host);
    let div = host
        .create_instance("div", &props().with("id", "x"), &container, &(), &())
        .unwrap();
    assert!(div.parent().is_none());
    assert!(container.children().is_empty());
    assert_eq!(host.document().active_element(), None);
}

#[test]
fn auto_focus_is_reported_for_focusable_elements_only() {
    let host = host();
    let container = super::container(&host);
    let cases: Vec<(&str, PropValue<Event>, bool)> = vec![
        ("input", PropValue::Bool(true), true),
        ("button", PropValue::Bool(true), true),
        ("select", PropValue::Bool(true), true),
        ("textarea", PropValue::Bool(true), true),
        ("input", PropValue::Bool(false), false),
        ("input", PropValue::Null, false),
        ("div", PropValue::Bool(true), false),
        ("a", PropValue::Bool(true), false),
    ];
    for (tag, auto_focus, expected) in cases {
        let props = props().with("autoFocus", auto_focus);
        let node = host.create_element(tag, &props).unwrap();
        assert_eq!(
            host.finalize_initial_children(&node, tag, &props, &container, &()),
            expected,
            "finalize_initial_children for <{}> {:?}",
            tag,
            props
        );
    }
}

#[test]
fn commit_mount_focuses() {
    let host = host();
    let props = props().with("autoFocus", true);
    let input = host.create_element("input", &props).unwrap();
    host.commit_mount(&input, "input", &props, &()).unwrap();
    assert_eq!(host.document().active_element(), Some(input));
}

#[test]
fn text_content_elements() {
    let host = host();
    let cases: Vec<(&str, PropValue<Event>, bool)> = vec![
        ("div", PropValue::from("text"), true),
        ("div", PropValue::from(7), true),
        ("div", PropValue::from(ChildRef::new(())), false),
        ("textarea", PropValue::Null, true),
        ("option", PropValue::Null, true),
        ("noscript", PropValue::Null, true),
        ("p", PropValue::Null, false),
    ];
    for (tag, children, expected) in cases {
        let props = props().with("children", children);
        assert_eq!(
            HostConfig::should_set_text_content(&host, tag, &props),
            expected,
            "should_set_text_content(<{}>, {:?})",
            tag,
            props
        );
    }
}

#[test]
fn text_nodes() {
    let host = host();
    let text = host.create_text_node("hello");
    assert_eq!(text.node_name(), "#text");
    assert_eq!(text.text_content(), "hello");
    assert!(host.document().set_attribute(&text, "id", "x").is_err());
}
