//! Abstract node trees, as a JSX factory produces them.

use html::{DOMNode, DOMNodeType, PropValue};

/// Attribute map of a [`VNode`]. Keys are unique; iteration follows insertion
/// order, and re-inserting a key keeps its original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs(Vec<(String, PropValue)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Builds [`Attrs`] from `key => value` pairs, values converted with `Into<PropValue>`
#[macro_export]
macro_rules! attrs {
    ($($k:expr => $v:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attrs = $crate::Attrs::new();
        $(attrs.insert($k, $v);)*
        attrs
    }};
}

/// A node of an abstract tree. A node without a tag produces no element; its
/// `text` is applied to the parent instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VNode {
    pub tag: Option<String>,
    pub attrs: Attrs,
    pub children: Vec<VNode>,
    pub text: Option<String>,
}

/// Element node factory
pub fn h(tag: impl Into<String>, attrs: Attrs, children: Vec<VNode>) -> VNode {
    VNode {
        tag: Some(tag.into()),
        attrs,
        children,
        text: None,
    }
}

/// Text node factory
pub fn text(text: impl Into<String>) -> VNode {
    VNode {
        text: Some(text.into()),
        ..VNode::default()
    }
}

impl VNode {
    /// Converts parsed markup into abstract nodes. Attribute values stay
    /// strings.
    pub fn from_markup(markup: &str) -> Vec<VNode> {
        html::parse_fragment(markup)
            .into_iter()
            .map(VNode::from)
            .collect()
    }
}

impl From<DOMNode> for VNode {
    fn from(node: DOMNode) -> Self {
        match node.node_type {
            DOMNodeType::Text(t) => text(t),
            DOMNodeType::Element(element) => h(
                element.tag_name,
                element.attributes.0.into_iter().collect(),
                node.children.into_iter().map(VNode::from).collect(),
            ),
        }
    }
}

impl From<&str> for VNode {
    fn from(s: &str) -> Self {
        text(s)
    }
}

#[cfg(test)]
#[test]
fn test_attrs_order() {
    let mut attrs = attrs!("first" => "John", "last" => "Doe", "age" => 42);
    attrs.insert("first", "Jane");
    let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["first", "last", "age"]);
    assert_eq!(attrs.get("first"), Some(&PropValue::from("Jane")));
    assert_eq!(attrs.get("age"), Some(&PropValue::Number(42.0)));
}

#[cfg(test)]
#[test]
fn test_from_markup() {
    let nodes = VNode::from_markup(r#"<my-component first="John">Hi</my-component><p></p>"#);
    assert_eq!(
        nodes,
        vec![
            h("my-component", attrs!("first" => "John"), vec![text("Hi")]),
            h("p", Attrs::new(), vec![]),
        ]
    );
}
