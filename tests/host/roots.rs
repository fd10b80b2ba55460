use super::{container, el, host, props, text, Calls, Host, TestEngine};
use dom_host::{HostError, Roots, Style};
use std::cell::Cell;
use std::rc::Rc;

fn roots() -> Roots<Host, TestEngine> {
    Roots::new(host(), TestEngine::default())
}

#[test]
fn rendering_twice_reuses_the_root() {
    let mut roots = roots();
    let root = container(roots.host());

    let first = roots.render(
        el("div", props().with("id", "a"), vec![text("hello")]),
        &root,
        None,
    );
    let second = roots.render(
        el("div", props().with("id", "b"), vec![text("world")]),
        &root,
        None,
    );

    assert_eq!(roots.engine().containers_created, 1);
    assert_eq!(roots.len(), 1);
    assert_eq!(roots.root(&root).map(|r| r.renders), Some(2));
    // Patched in place, not remounted.
    assert_eq!(first, second);
    assert_eq!(root.children(), [second.clone()]);
    assert_eq!(root.outer_html(), r#"<div><div id="b">world</div></div>"#);
}

#[test]
fn callbacks_run_after_commit() {
    let mut roots = roots();
    let root = container(roots.host());
    let committed = Rc::new(Cell::new(false));

    let c = committed.clone();
    let r = root.clone();
    roots.render(
        el("p", props().with("children", "hi"), vec![]),
        &root,
        Some(Box::new(move || {
            assert_eq!(r.text_content(), "hi");
            c.set(true);
        })),
    );
    assert!(committed.get());
}

#[test]
fn explicit_roots_cannot_be_created_twice() {
    let mut roots = roots();
    let root = container(roots.host());

    let id = roots.create_root(&root).map(|r| r.id);
    assert_eq!(id, Ok(1));
    assert_eq!(
        roots.create_root(&root).map(|r| r.id),
        Err(HostError::AlreadyRooted)
    );

    // Rendering goes through the existing root.
    roots.render(el("div", props(), vec![]), &root, None);
    assert_eq!(roots.engine().containers_created, 1);

    let other = container(roots.host());
    roots.render(el("div", props(), vec![]), &other, None);
    assert_eq!(
        roots.create_root(&other).map(|r| r.id),
        Err(HostError::AlreadyRooted)
    );
}

#[test]
fn separate_containers_get_separate_roots() {
    let mut roots = roots();
    let (left, right) = (container(roots.host()), container(roots.host()));

    roots.render(el("span", props(), vec![text("L")]), &left, None);
    roots.render(el("span", props(), vec![text("R")]), &right, None);
    roots.render(el("span", props(), vec![text("L2")]), &left, None);

    assert_eq!(roots.len(), 2);
    assert_eq!(roots.engine().containers_created, 2);
    assert_eq!(roots.root(&left).map(|r| r.id), Some(1));
    assert_eq!(roots.root(&right).map(|r| r.id), Some(2));
    assert_eq!(left.text_content(), "L2");
    assert_eq!(right.text_content(), "R");
}

#[test]
fn unrooted_containers_have_no_root() {
    let roots = roots();
    let root = container(roots.host());
    assert!(roots.is_empty());
    assert!(roots.root(&root).is_none());
}

#[test]
fn changing_the_root_tag_replaces_the_element() {
    let mut roots = roots();
    let root = container(roots.host());

    let div = roots.render(el("div", props(), vec![]), &root, None);
    let section = roots.render(el("section", props(), vec![]), &root, None);

    assert_ne!(div, section);
    assert!(div.parent().is_none());
    assert_eq!(root.children(), [section]);
}

#[test]
fn first_render_clears_existing_content() {
    let mut roots = roots();
    let root = container(roots.host());
    roots
        .host()
        .set_text_content(&root, "server-rendered placeholder");

    roots.render(el("main", props(), vec![]), &root, None);
    assert_eq!(root.outer_html(), "<div><main></main></div>");
}

#[test]
fn updates_flow_through_the_host() {
    let mut roots = roots();
    let root = container(roots.host());
    let (first, second) = (Calls::default(), Calls::default());

    let button = roots.render(
        el(
            "button",
            props()
                .with("onClick", first.handler())
                .with("style", Style::new().with("color", "blue").with("width", 4)),
            vec![text("go")],
        ),
        &root,
        None,
    );
    roots.render(
        el(
            "button",
            props()
                .with("onClick", second.handler())
                .with("style", Style::new().with("width", 4)),
            vec![text("go")],
        ),
        &root,
        None,
    );

    button.dispatch("click");
    assert_eq!((first.count(), second.count()), (0, 1));
    assert_eq!(button.style("color"), None);
    assert_eq!(button.style("width").as_deref(), Some("4px"));
    assert_eq!(button.text_content(), "go");
}

#[test]
fn auto_focus_on_mount() {
    let mut roots = roots();
    let root = container(roots.host());

    let form = roots.render(
        el(
            "form",
            props(),
            vec![
                el("label", props(), vec![text("Name")]),
                el("input", props().with("autoFocus", true), vec![]),
            ],
        ),
        &root,
        None,
    );

    let input = form.children()[1].clone();
    assert_eq!(input.node_name(), "input");
    assert_eq!(roots.host().document().active_element(), Some(input.clone()));
    assert_eq!(input.attribute("autoFocus").as_deref(), Some("true"));
}
