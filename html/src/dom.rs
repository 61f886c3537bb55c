#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DOMNode {
    pub children: Vec<DOMNode>,
    pub node_type: DOMNodeType,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DOMNodeType {
    Element(DOMElement),
    Text(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DOMElement {
    pub tag_name: String,
    pub attributes: DOMAttributes,
}

/// Attributes in source order; later duplicates are dropped by the parser
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct DOMAttributes(pub Vec<(String, String)>);

impl DOMAttributes {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.get(&name).is_none() {
            self.0.push((name, value.into()));
        }
    }
}

impl DOMNode {
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            children: vec![],
            node_type: DOMNodeType::Text(data.into()),
        }
    }

    pub fn element(name: impl Into<String>, attributes: DOMAttributes, children: Vec<DOMNode>) -> Self {
        Self {
            children,
            node_type: DOMNodeType::Element(DOMElement::new(name, Some(attributes))),
        }
    }
}

impl DOMElement {
    pub fn new(name: impl Into<String>, attributes: Option<DOMAttributes>) -> Self {
        Self {
            tag_name: name.into(),
            attributes: attributes.unwrap_or_default(),
        }
    }
}

impl From<&str> for DOMNode {
    fn from(s: &str) -> Self {
        DOMNode::text(s)
    }
}

/// Builds [`DOMAttributes`] from `name => value` pairs
#[macro_export]
macro_rules! attributes {
    ($($k:expr => $v:expr),* $(,)?) => {{
        let mut attrs = $crate::DOMAttributes::empty();
        $(attrs.insert($k, $v);)*
        attrs
    }};
}
