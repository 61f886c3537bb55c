use super::*;
use crate::attrs;
use html::{CallArg, Callback, DomError, Event, NodeId, PropValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn test_bed() -> TestBed {
    TestBed::new(Env::new()).unwrap()
}

fn quiet() -> Option<MountOptions> {
    Some(MountOptions::default())
}

fn counter() -> (Rc<Cell<u32>>, Callback) {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    (calls, Callback::new(move |_| seen.set(seen.get() + 1)))
}

#[test]
fn test_empty_tag() {
    let mut bed = test_bed();
    let doc = bed.document_mut();
    assert_eq!(materialize(doc, &VNode::default(), None), Ok(None));
    let empty = VNode {
        tag: Some(String::new()),
        ..VNode::default()
    };
    assert_eq!(materialize(doc, &empty, None), Ok(None));

    let handle = mount(&mut bed, text("just text"), quiet()).unwrap();
    assert!(handle.elements.is_empty());
    assert!(bed.document().children(bed.container()).is_empty());
}

#[test]
fn test_tag() {
    let mut bed = test_bed();
    let handle = mount(&mut bed, h("my-component", Attrs::new(), vec![]), quiet()).unwrap();
    let doc = bed.document();
    assert_eq!(handle.elements.len(), 1);
    assert_eq!(doc.tag_name(handle.elements[0]), Some("my-component"));
    assert_eq!(doc.children(handle.container), handle.elements.as_slice());

    let err = mount(&mut bed, h("not valid", Attrs::new(), vec![]), quiet()).unwrap_err();
    assert_eq!(err, DomError::InvalidCharacter("not valid".to_string()));
}

#[test]
fn test_properties() {
    let mut bed = test_bed();
    let node = h(
        "my-component",
        attrs!("first" => "John", "last" => "Doe", "middle" => PropValue::Null, "age" => 42),
        vec![],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();
    assert_eq!(doc.property(el, "first"), Some(PropValue::from("John")));
    assert_eq!(doc.property(el, "last"), Some(PropValue::from("Doe")));
    assert_eq!(doc.property(el, "middle"), Some(PropValue::Null));
    assert_eq!(doc.property(el, "age"), Some(PropValue::Number(42.0)));
    assert!(!doc.has_attribute(el, "first"));
    assert!(!doc.has_attribute(el, "last"));
}

#[test]
fn test_data_attributes() {
    let mut bed = test_bed();
    let node = h(
        "div",
        attrs!("data-test" => "x", "dataCount" => 3, "data-flag" => true),
        vec![],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();
    assert_eq!(doc.get_attribute(el, "data-test").as_deref(), Some("x"));
    assert_eq!(doc.get_attribute(el, "datacount").as_deref(), Some("3"));
    assert_eq!(doc.get_attribute(el, "data-flag").as_deref(), Some("true"));
    assert_eq!(doc.property(el, "data-test"), None);
}

#[test]
fn test_prefixed_attributes() {
    let mut bed = test_bed();
    let node = h(
        "my-component",
        attrs!("attr-role" => "button", "attr-aria-label" => "Close"),
        vec![],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();
    assert_eq!(doc.get_attribute(el, "role").as_deref(), Some("button"));
    assert_eq!(doc.get_attribute(el, "aria-label").as_deref(), Some("Close"));
    assert!(!doc.has_attribute(el, "attr-role"));
    assert_eq!(doc.property(el, "attr-role"), None);
    assert_eq!(doc.property(el, "role"), None);

    let err = mount(&mut bed, h("div", attrs!("attr-" => "x"), vec![]), quiet()).unwrap_err();
    assert_eq!(err, DomError::InvalidCharacter(String::new()));
}

#[test]
fn test_class() {
    let mut bed = test_bed();
    let handle = mount(
        &mut bed,
        h("div", attrs!("class" => "card primary"), vec![]),
        quiet(),
    )
    .unwrap();
    let el = handle.elements[0];
    assert_eq!(bed.document().class_name(el), "card primary");
    assert_eq!(
        bed.document().outer_html(el),
        r#"<div class="card primary"></div>"#
    );
}

#[test]
fn test_style_object() {
    let mut bed = test_bed();
    let style = PropValue::object([
        ("backgroundColor", "red"),
        ("width", "300px"),
        ("height", "#zz"),
    ]);
    let handle = mount(&mut bed, h("div", attrs!("style" => style), vec![]), quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();
    assert_eq!(
        doc.computed_style(el, "background-color").as_deref(),
        Some("rgb(255, 0, 0)")
    );
    assert_eq!(doc.computed_style(el, "width").as_deref(), Some("300px"));
    assert_eq!(doc.computed_style(el, "height").as_deref(), Some("auto"));
    assert_eq!(
        doc.get_attribute(el, "style").as_deref(),
        Some("background-color: red; width: 300px;")
    );

    // A string style is a plain property assignment
    let handle = mount(
        &mut bed,
        h("div", attrs!("style" => "color: blue"), vec![]),
        quiet(),
    )
    .unwrap();
    let el = handle.elements[0];
    assert_eq!(
        bed.document().computed_style(el, "color").as_deref(),
        Some("rgb(0, 0, 255)")
    );
}

#[test]
fn test_event_listener() {
    let mut bed = test_bed();
    let details = Rc::new(RefCell::new(Vec::new()));
    let seen = details.clone();
    let on_custom = Callback::new(move |arg| {
        if let CallArg::Event(event) = arg {
            seen.borrow_mut().push(event.detail.clone());
        }
    });
    let (clicks, on_click) = counter();
    let node = h(
        "my-component",
        attrs!("onCustomEvent" => on_custom, "onClick" => on_click),
        vec![],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();

    assert_eq!(doc.dispatch_event(el, Event::custom("customEvent", "Hi1")), 1);
    assert_eq!(*details.borrow(), vec![PropValue::from("Hi1")]);
    assert_eq!(doc.dispatch_event(el, Event::custom("CustomEvent", "Hi2")), 0);
    assert_eq!(doc.property(el, "onCustomEvent"), None);

    doc.click(el);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn test_ref() {
    let mut bed = test_bed();
    let captured = Rc::new(Cell::new(None::<NodeId>));
    let calls = Rc::new(Cell::new(0));
    let (slot, count) = (captured.clone(), calls.clone());
    let on_ref = Callback::new(move |arg| {
        if let CallArg::Element(el) = arg {
            slot.set(Some(el));
            count.set(count.get() + 1);
        }
    });
    let node = h(
        "my-component",
        attrs!("first" => "John", "ref" => on_ref),
        vec![h("span", Attrs::new(), vec![])],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(captured.get(), Some(handle.elements[0]));
    assert_eq!(bed.document().property(handle.elements[0], "ref"), None);

    let err = mount(&mut bed, h("div", attrs!("ref" => "nope"), vec![]), quiet()).unwrap_err();
    assert_eq!(err, DomError::NotCallable("ref".to_string()));
}

#[test]
fn test_children() {
    let mut bed = test_bed();
    let node = h(
        "ul",
        Attrs::new(),
        vec![
            h("li", Attrs::new(), vec![text("one")]),
            VNode::default(),
            h("li", Attrs::new(), vec![text("two")]),
        ],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    assert_eq!(
        bed.document().outer_html(handle.elements[0]),
        "<ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn test_last_text_wins() {
    let mut bed = test_bed();
    let node = h(
        "p",
        Attrs::new(),
        vec![
            text("first"),
            h("b", Attrs::new(), vec![]),
            text("last"),
        ],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    let doc = bed.document();
    assert_eq!(doc.text_content(handle.elements[0]), "last");
    assert_eq!(doc.element_children(handle.elements[0]).len(), 0);

    // Text set before a later element child survives it
    let node = h("p", Attrs::new(), vec![text("Hello"), h("b", Attrs::new(), vec![])]);
    let handle = mount(&mut bed, node, quiet()).unwrap();
    assert_eq!(bed.document().inner_html(handle.elements[0]), "Hello<b></b>");
}

#[test]
fn test_list_order() {
    let mut bed = test_bed();
    let nodes = vec![
        h("first-one", Attrs::new(), vec![]),
        text("skipped"),
        h("second-one", Attrs::new(), vec![]),
    ];
    let handle = mount(&mut bed, nodes, quiet()).unwrap();
    let doc = bed.document();
    let tags: Vec<_> = doc
        .children(handle.container)
        .iter()
        .filter_map(|c| doc.tag_name(*c))
        .collect();
    assert_eq!(tags, vec!["first-one", "second-one"]);
    assert_eq!(handle.elements, doc.children(handle.container));
}

#[test]
fn test_markup() {
    let mut bed = test_bed();
    mount(&mut bed, h("old-content", Attrs::new(), vec![]), quiet()).unwrap();

    let handle = mount(
        &mut bed,
        r#"<my-component first="John" last="Doe" onClick="x"></my-component>"#,
        quiet(),
    )
    .unwrap();
    let doc = bed.document();
    assert_eq!(handle.elements.len(), 1);
    assert_eq!(doc.children(handle.container), handle.elements.as_slice());
    let el = handle.elements[0];
    assert_eq!(doc.get_attribute(el, "first").as_deref(), Some("John"));
    assert_eq!(doc.get_attribute(el, "onclick").as_deref(), Some("x"));
    assert_eq!(doc.property(el, "first"), None);
}

#[test]
fn test_log() {
    let mut bed = test_bed();
    let node = h(
        "my-component",
        Attrs::new(),
        vec![h("Span", Attrs::new(), vec![text("x")])],
    );
    let options = MountOptions {
        log: true,
        ..MountOptions::default()
    };
    mount(&mut bed, node.clone(), Some(options)).unwrap();
    let messages: Vec<_> = bed.logs().iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Mounting node span", "Mounting node my-component"]
    );
    assert!(bed.logs().iter().all(|r| r.name == "Mount"));

    mount(&mut bed, node, quiet()).unwrap();
    assert_eq!(bed.logs().len(), 2);
}

#[test]
fn test_options_from_env() {
    let env = Env::from_pairs([(config::LOG, "true")]);
    let mut bed = TestBed::new(env).unwrap();
    mount(&mut bed, h("div", Attrs::new(), vec![]), None).unwrap();
    assert_eq!(bed.logs(), &[LogRecord::new("Mount", "Mounting node div")]);
    assert!(bed.pending_assertions().is_empty());

    bed.env_mut().set(config::WAIT_UNTIL_VISIBLE, "true");
    bed.env_mut().set(config::LOG, "false");
    mount(&mut bed, h("div", Attrs::new(), vec![]), None).unwrap();
    assert_eq!(bed.logs().len(), 1);
    assert_eq!(bed.pending_assertions().len(), 1);

    // Explicit options win over the environment
    mount(&mut bed, h("div", Attrs::new(), vec![]), quiet()).unwrap();
    assert_eq!(bed.pending_assertions().len(), 1);
}

#[test]
fn test_wait_until_visible() {
    let mut bed = test_bed();
    let options = Some(MountOptions {
        wait_until_visible: true,
        ..MountOptions::default()
    });
    let node = h(
        "my-component",
        Attrs::new(),
        vec![h("div", Attrs::new(), vec![h("span", Attrs::new(), vec![])])],
    );
    let handle = mount(&mut bed, node, options).unwrap();
    let doc = bed.document();
    let tags: Vec<_> = bed
        .pending_assertions()
        .iter()
        .filter_map(|id| doc.tag_name(*id))
        .collect();
    assert_eq!(tags, vec!["span", "div", "my-component"]);

    // Shadow content is never visited
    let host = handle.elements[0];
    let doc = bed.document_mut();
    let shadow = doc.attach_shadow(host).unwrap();
    let inner = doc.create_element("p").unwrap();
    doc.append_child(shadow, inner).unwrap();
    wait_until_visible(&mut bed, host);
    assert_eq!(bed.pending_assertions().len(), 6);
    assert!(!bed.pending_assertions().contains(&inner));
}

#[test]
fn test_visibility_failure() {
    let mut bed = test_bed().with_retries(2);
    let options = Some(MountOptions {
        wait_until_visible: true,
        ..MountOptions::default()
    });
    let report = bed.run("hidden child", |bed| {
        let style = PropValue::object([("display", "none")]);
        mount(
            bed,
            h("my-component", Attrs::new(), vec![h("div", attrs!("style" => style), vec![])]),
            options,
        )?;
        Ok(())
    });
    match report.outcome {
        Err(TestFailure::NotVisible { tag, attempts, .. }) => {
            assert_eq!(tag, "div");
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let report = bed.run("visible", |bed| {
        mount(bed, h("my-component", Attrs::new(), vec![text("Hi")]), options)?;
        Ok(())
    });
    assert!(report.passed());
}

/// Mounts a hidden `div` and registers a step that shows it once the
/// `reveal`th attempt has failed
fn reveal_after(bed: &mut TestBed, reveal: u32, steps: Rc<Cell<u32>>) -> Result<(), TestFailure> {
    let options = Some(MountOptions {
        wait_until_visible: true,
        ..MountOptions::default()
    });
    let style = PropValue::object([("display", "none")]);
    let handle = mount(bed, h("div", attrs!("style" => style), vec![]), options)?;
    let div = handle.elements[0];
    bed.on_retry(move |doc, attempt| {
        steps.set(steps.get() + 1);
        if attempt == reveal {
            if let Ok(style) = doc.style_mut(div) {
                style.set_property("display", "");
            }
        }
    });
    Ok(())
}

#[test]
fn test_visibility_retries() {
    let steps = Rc::new(Cell::new(0));
    let mut bed = test_bed().with_retries(2);
    let shared = steps.clone();
    let report = bed.run("shown on second retry", |bed| reveal_after(bed, 2, shared));
    assert!(report.passed());
    assert_eq!(steps.get(), 2);

    // One retry is not enough for the same page
    let steps = Rc::new(Cell::new(0));
    let mut bed = test_bed().with_retries(1);
    let shared = steps.clone();
    let report = bed.run("too few retries", |bed| reveal_after(bed, 2, shared));
    assert!(matches!(
        report.outcome,
        Err(TestFailure::NotVisible { attempts: 2, .. })
    ));
    assert_eq!(steps.get(), 1);

    // The step does not outlive its test
    let report = bed.run("no step", |bed| {
        let style = PropValue::object([("display", "none")]);
        let options = Some(MountOptions {
            wait_until_visible: true,
            ..MountOptions::default()
        });
        mount(bed, h("div", attrs!("style" => style), vec![]), options)?;
        Ok(())
    });
    assert!(!report.passed());
    assert_eq!(steps.get(), 1);
}

#[test]
fn test_large_numbers_as_attributes() {
    let mut bed = test_bed();
    let node = h(
        "div",
        attrs!("data-n" => 1e20, "attr-m" => -5e19, "class" => 1e21),
        vec![],
    );
    let handle = mount(&mut bed, node, quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();
    assert_eq!(doc.get_attribute(el, "data-n").as_deref(), Some("100000000000000000000"));
    assert_eq!(doc.get_attribute(el, "m").as_deref(), Some("-50000000000000000000"));
    assert_eq!(doc.class_name(el), "1e+21");
}

#[test]
fn test_style_of_wrong_type() {
    let mut bed = test_bed();
    let style = PropValue::object([("width", "red"), ("color", "300px"), ("opacity", "none")]);
    let handle = mount(&mut bed, h("div", attrs!("style" => style), vec![]), quiet()).unwrap();
    let el = handle.elements[0];
    let doc = bed.document();
    assert_eq!(doc.computed_style(el, "width").as_deref(), Some("auto"));
    assert_eq!(doc.computed_style(el, "color").as_deref(), Some("rgb(0, 0, 0)"));
    assert_eq!(doc.computed_style(el, "opacity").as_deref(), Some("1"));
    assert_eq!(doc.get_attribute(el, "style"), None);
}

#[test]
fn test_log_before_failure() {
    let mut bed = test_bed();
    let options = Some(MountOptions {
        log: true,
        ..MountOptions::default()
    });
    let nodes = vec![
        h("first-one", Attrs::new(), vec![]),
        h("second-one", Attrs::new(), vec![h("span", Attrs::new(), vec![]), h("bad name", Attrs::new(), vec![])]),
    ];
    let err = mount(&mut bed, nodes, options).unwrap_err();
    assert_eq!(err, DomError::InvalidCharacter("bad name".to_string()));
    let messages: Vec<_> = bed.logs().iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["Mounting node first-one", "Mounting node span"]);
    assert_eq!(bed.document().children(bed.container()).len(), 1);
}

#[test]
fn test_cleanup() {
    let mut bed = test_bed();
    setup_hooks(&mut bed);
    setup_hooks(&mut bed);
    assert_eq!(bed.hook_names().collect::<Vec<_>>(), vec![CLEANUP_HOOK]);

    let report = bed.run("mounts", |bed| {
        mount(bed, vec![h("a-b", Attrs::new(), vec![]), h("c-d", Attrs::new(), vec![])], None)?;
        assert_eq!(bed.document().children(bed.container()).len(), 2);
        Ok(())
    });
    assert!(report.passed());
    let container = bed.container();
    assert!(bed.document().children(container).is_empty());
    assert_eq!(bed.document().text_content(container), "");

    // Hooks also run after a failing test
    let report = bed.run("fails", |bed| {
        mount(bed, "<p>left behind</p>", None)?;
        Err(TestFailure::Assertion("boom".to_string()))
    });
    assert!(!report.passed());
    assert_eq!(bed.document().inner_html(container), "");
    assert!(bed.document().is_connected(container));
}

#[test]
fn test_my_component() {
    let mut bed = test_bed();
    setup_hooks(&mut bed);
    let (calls, on_custom) = counter();
    let report = bed.run("my-component", |bed| {
        let node = h(
            "my-component",
            attrs!("first" => "John", "last" => "Doe", "onCustomEvent" => on_custom),
            vec![],
        );
        let handle = mount(bed, node, None)?;
        let el = handle.elements[0];
        let doc = bed.document();
        if doc.property(el, "first") != Some(PropValue::from("John")) {
            return Err(TestFailure::Assertion("first not set".to_string()));
        }
        doc.dispatch_event(el, Event::custom("customEvent", "Hi1"));
        Ok(())
    });
    assert!(report.passed());
    assert_eq!(calls.get(), 1);
}
