use crate::{NodeId, PropValue};
use css::StyleDeclarations;

/// Element state. The `style` attribute is not stored as text: it is backed by
/// the inline style declarations and serialized on demand.
#[derive(Debug)]
pub struct Element {
    tag_name: String,
    attributes: Vec<(String, String)>,
    properties: Vec<(String, PropValue)>,
    pub(crate) style: StyleDeclarations,
    pub(crate) shadow_root: Option<NodeId>,
}

impl Element {
    pub(crate) fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            properties: Vec::new(),
            style: StyleDeclarations::new(),
            shadow_root: None,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        if name == "style" {
            return (!self.style.is_empty()).then(|| self.style.css_text());
        }
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    /// Attributes in insertion order, `style` last
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs = self.attributes.clone();
        if !self.style.is_empty() {
            attrs.push(("style".to_string(), self.style.css_text()));
        }
        attrs
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        if name == "style" {
            self.style.set_css_text(value);
            return;
        }
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub(crate) fn remove_attribute(&mut self, name: &str) {
        if name == "style" {
            self.style = StyleDeclarations::new();
            return;
        }
        self.attributes.retain(|(k, _)| k != name);
    }

    pub fn style(&self) -> &StyleDeclarations {
        &self.style
    }

    /// A property from the bag of non-reflected properties
    pub fn property(&self, name: &str) -> Option<&PropValue> {
        self.properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn set_property(&mut self, name: &str, value: PropValue) {
        match self.properties.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.properties.push((name.to_string(), value)),
        }
    }
}
