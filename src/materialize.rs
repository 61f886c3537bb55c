use crate::harness::LogRecord;
use crate::vnode::VNode;
use html::{CallArg, Document, DomError, NodeId, PropValue};
use tracing::trace;

/// How one attribute entry is applied to the element being built. Rules are
/// tried in declaration order; the first match wins.
#[derive(Debug, PartialEq)]
pub enum AttrRule<'a> {
    /// `style` with an object value: one inline style property per entry
    Style(&'a [(String, PropValue)]),
    /// Keys starting with `data`: an attribute under the key as written
    DataAttribute,
    /// `attr-<name>`: an attribute called `<name>`
    Attribute(&'a str),
    /// `class`: the element's class name
    ClassName,
    /// A function under any key but `ref`: a listener for the named event
    Listener(String),
    /// `ref`: called with the new element
    Ref,
    /// Anything else: a live property
    Property,
}

impl<'a> AttrRule<'a> {
    pub fn classify(key: &'a str, value: &'a PropValue) -> Self {
        if key == "style" {
            if let Some(pairs) = value.as_object() {
                return AttrRule::Style(pairs);
            }
        }
        if key.starts_with("data") {
            AttrRule::DataAttribute
        } else if key.starts_with("attr-") {
            AttrRule::Attribute(key.rsplit("attr-").next().unwrap_or_default())
        } else if key == "class" {
            AttrRule::ClassName
        } else if value.is_callable() && key != "ref" {
            AttrRule::Listener(camelize(&key.chars().skip(2).collect::<String>()))
        } else if key == "ref" {
            AttrRule::Ref
        } else {
            AttrRule::Property
        }
    }
}

/// Builds the element described by `node`, with its whole subtree, and returns
/// it detached. A node without a tag produces nothing.
///
/// When `log` is given, one `Mount` record is pushed per element once it is
/// complete, so descendants are recorded before their ancestors.
pub fn materialize(
    doc: &mut Document,
    node: &VNode,
    mut log: Option<&mut Vec<LogRecord>>,
) -> Result<Option<NodeId>, DomError> {
    let tag = match node.tag.as_deref() {
        Some(tag) if !tag.is_empty() => tag,
        _ => return Ok(None),
    };
    let el = doc.create_element(tag)?;

    for (key, value) in node.attrs.iter() {
        let rule = AttrRule::classify(key, value);
        trace!(key, ?rule, "Applying attribute");
        apply(doc, el, key, value, rule)?;
    }

    for child in &node.children {
        if let Some(child_el) = materialize(doc, child, log.as_deref_mut())? {
            doc.append_child(el, child_el)?;
        }
        if let Some(text) = child.text.as_deref().filter(|t| !t.is_empty()) {
            doc.set_text_content(el, text);
        }
    }

    if let Some(log) = log {
        let tag = doc.tag_name(el).unwrap_or(tag);
        log.push(LogRecord::new("Mount", format!("Mounting node {}", tag)));
    }
    Ok(Some(el))
}

fn apply(
    doc: &mut Document,
    el: NodeId,
    key: &str,
    value: &PropValue,
    rule: AttrRule<'_>,
) -> Result<(), DomError> {
    match rule {
        AttrRule::Style(pairs) => {
            let style = doc.style_mut(el)?;
            for (prop, v) in pairs {
                let v = match v {
                    PropValue::Null | PropValue::Undefined => String::new(),
                    v => v.to_attribute_string(),
                };
                if !style.set_property(prop, &v) {
                    trace!(property = %prop, value = %v, "Ignoring invalid style value");
                }
            }
        }
        AttrRule::DataAttribute => doc.set_attribute(el, key, &value.to_attribute_string())?,
        AttrRule::Attribute(name) => doc.set_attribute(el, name, &value.to_attribute_string())?,
        AttrRule::ClassName => doc.set_property(el, "className", value.clone())?,
        AttrRule::Listener(event) => {
            if let Some(callback) = value.as_callback() {
                doc.add_event_listener(el, &event, callback.clone());
            }
        }
        AttrRule::Ref => match value.as_callback() {
            Some(callback) => callback.call(CallArg::Element(el)),
            None => return Err(DomError::NotCallable(key.to_string())),
        },
        AttrRule::Property => doc.set_property(el, key, value.clone())?,
    }
    Ok(())
}

/// Turns an event name into camel case: the first character is lower-cased,
/// characters starting a word or already upper case are upper-cased, and
/// whitespace is dropped. `CustomEvent` becomes `customEvent` and
/// `custom event` becomes `customEvent`.
pub fn camelize(name: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut out = String::with_capacity(name.len());
    let mut prev: Option<char> = None;
    for (i, c) in name.chars().enumerate() {
        let starts_word = is_word(c) && !prev.map_or(false, is_word);
        prev = Some(c);
        if c.is_whitespace() {
            continue;
        }
        if !(starts_word || c.is_ascii_uppercase()) {
            out.push(c);
        } else if c == '0' {
            // A word-initial zero is dropped along with whitespace
        } else if i == 0 {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c.to_ascii_uppercase());
        }
    }
    out
}

#[cfg(test)]
#[test]
fn test_camelize() {
    assert_eq!(camelize("CustomEvent"), "customEvent");
    assert_eq!(camelize("Click"), "click");
    assert_eq!(camelize("click"), "click");
    assert_eq!(camelize("custom event"), "customEvent");
    assert_eq!(camelize("my-event"), "my-Event");
    assert_eq!(camelize(""), "");
}

#[cfg(test)]
#[test]
fn test_classify() {
    let noop = PropValue::from(html::Callback::new(|_| {}));
    let style = PropValue::object([("width", "300px")]);
    let text = PropValue::from("x");

    assert!(matches!(AttrRule::classify("style", &style), AttrRule::Style(_)));
    assert_eq!(AttrRule::classify("style", &text), AttrRule::Property);
    assert_eq!(AttrRule::classify("data-id", &noop), AttrRule::DataAttribute);
    assert_eq!(AttrRule::classify("dataset", &text), AttrRule::DataAttribute);
    assert_eq!(AttrRule::classify("attr-role", &text), AttrRule::Attribute("role"));
    assert_eq!(AttrRule::classify("attr-x-attr-y", &text), AttrRule::Attribute("y"));
    assert_eq!(AttrRule::classify("class", &noop), AttrRule::ClassName);
    assert_eq!(
        AttrRule::classify("onCustomEvent", &noop),
        AttrRule::Listener("customEvent".to_string())
    );
    assert_eq!(AttrRule::classify("ref", &noop), AttrRule::Ref);
    assert_eq!(AttrRule::classify("ref", &text), AttrRule::Ref);
    assert_eq!(AttrRule::classify("first", &text), AttrRule::Property);
}
