use crate::element::Element;
use crate::{parse_fragment, Callback, DOMNode, DOMNodeType, DomError, PropValue};
use css::StyleDeclarations;
use std::fmt;
use tracing::{span, trace, Level};

/// Handle to a node owned by a [`Document`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    ShadowRoot { host: NodeId },
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
    pub(crate) listeners: Vec<(String, Callback)>,
}

/// Node arena. Nodes are never freed: removing a node only detaches it, so a
/// [`NodeId`] stays valid for the lifetime of its document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
                listeners: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
            listeners: Vec::new(),
        });
        id
    }

    /// Creates a detached element. The name is lower-cased; names that are not
    /// valid element names are rejected.
    pub fn create_element(&mut self, tag_name: &str) -> Result<NodeId, DomError> {
        if !is_valid_name(tag_name) {
            return Err(DomError::InvalidCharacter(tag_name.to_string()));
        }
        Ok(self.push(NodeData::Element(Element::new(tag_name.to_ascii_lowercase()))))
    }

    pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Element children only, excluding text nodes and shadow content
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.data(id), NodeData::Element(_))
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id) {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match &mut self.node_mut(id).data {
            NodeData::Element(e) => Ok(e),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    /// The lower-cased local name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag_name)
    }

    /// Appends `child` to `parent`, detaching it from its previous parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let accepts_children = !matches!(self.data(parent), NodeData::Text(_));
        let child_insertable = !matches!(
            self.data(child),
            NodeData::Document | NodeData::ShadowRoot { .. }
        );
        if !accepts_children || !child_insertable || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(old) = self.parent(child) {
            self.node_mut(old).children.retain(|c| *c != child);
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotFound { parent, child });
        }
        self.node_mut(parent).children.retain(|c| *c != child);
        self.node_mut(child).parent = None;
        Ok(())
    }

    /// Detaches every child of `id`
    pub fn remove_all_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.flat_parent(node) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Parent in the flattened tree: a shadow root's parent is its host
    pub(crate) fn flat_parent(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id) {
            NodeData::ShadowRoot { host } => Some(*host),
            _ => self.parent(id),
        }
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root(), id)
    }

    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        if self.element_mut(host)?.shadow_root.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }
        let root = self.push(NodeData::ShadowRoot { host });
        self.element_mut(host)?.shadow_root = Some(root);
        Ok(root)
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.element(host).and_then(|e| e.shadow_root)
    }

    /// Attribute names are matched lower-cased
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)
            .and_then(|e| e.get_attribute(&name.to_ascii_lowercase()))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_name(name) {
            return Err(DomError::InvalidCharacter(name.to_string()));
        }
        self.element_mut(id)?
            .set_attribute(&name.to_ascii_lowercase(), value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?
            .remove_attribute(&name.to_ascii_lowercase());
        Ok(())
    }

    pub fn class_name(&self, id: NodeId) -> String {
        self.get_attribute(id, "class").unwrap_or_default()
    }

    pub fn style(&self, id: NodeId) -> Option<&StyleDeclarations> {
        self.element(id).map(Element::style)
    }

    pub fn style_mut(&mut self, id: NodeId) -> Result<&mut StyleDeclarations, DomError> {
        Ok(&mut self.element_mut(id)?.style)
    }

    /// Reads a live property. Reflected properties are derived from the
    /// element's attributes, style and content; anything else comes from the
    /// property bag.
    pub fn property(&self, id: NodeId, name: &str) -> Option<PropValue> {
        let element = self.element(id)?;
        let value = match name {
            "className" => PropValue::String(self.class_name(id)),
            "id" | "title" | "lang" | "dir" => {
                PropValue::String(element.get_attribute(name).unwrap_or_default())
            }
            "hidden" => PropValue::Bool(element.get_attribute("hidden").is_some()),
            "style" => PropValue::String(element.style.css_text()),
            "tagName" | "nodeName" => PropValue::String(element.tag_name().to_ascii_uppercase()),
            "textContent" | "innerText" => PropValue::String(self.text_content(id)),
            "innerHTML" => PropValue::String(self.inner_html(id)),
            _ => return element.property(name).cloned(),
        };
        Some(value)
    }

    /// Assigns a live property. Reflected properties update the element's
    /// attributes, style or content; anything else is stored as given.
    pub fn set_property(&mut self, id: NodeId, name: &str, value: PropValue) -> Result<(), DomError> {
        trace!(?id, property = name, "Setting property");
        match name {
            "className" => self.element_mut(id)?.set_attribute("class", &value.to_attribute_string()),
            "id" | "title" | "lang" | "dir" => {
                self.element_mut(id)?.set_attribute(name, &value.to_attribute_string())
            }
            "hidden" => {
                let element = self.element_mut(id)?;
                if value.is_truthy() {
                    element.set_attribute("hidden", "");
                } else {
                    element.remove_attribute("hidden");
                }
            }
            "style" => self
                .element_mut(id)?
                .style
                .set_css_text(&value.to_attribute_string()),
            "textContent" | "innerText" => {
                self.element_mut(id)?;
                let text = match value {
                    PropValue::Null | PropValue::Undefined => String::new(),
                    v => v.to_attribute_string(),
                };
                self.set_text_content(id, &text);
            }
            "innerHTML" => {
                self.element_mut(id)?;
                self.set_inner_html(id, &value.to_attribute_string());
            }
            _ => self.element_mut(id)?.set_property(name, value),
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes, not entering shadow roots
    pub fn text_content(&self, id: NodeId) -> String {
        match self.data(id) {
            NodeData::Text(t) => t.clone(),
            _ => {
                let mut out = String::new();
                self.collect_text(id, &mut out);
                out
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in self.children(id) {
            match self.data(*child) {
                NodeData::Text(t) => out.push_str(t),
                _ => self.collect_text(*child, out),
            }
        }
    }

    /// Replaces all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let NodeData::Text(t) = &mut self.node_mut(id).data {
            *t = text.to_string();
            return;
        }
        self.remove_all_children(id);
        if !text.is_empty() {
            let node = self.create_text_node(text);
            self.node_mut(node).parent = Some(id);
            self.node_mut(id).children.push(node);
        }
    }

    /// Replaces the children of `id` with the parsed markup
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
        let span = span!(Level::DEBUG, "Setting inner markup", ?id);
        let _enter = span.enter();
        self.remove_all_children(id);
        for node in parse_fragment(markup) {
            let child = self.build(node);
            self.node_mut(child).parent = Some(id);
            self.node_mut(id).children.push(child);
        }
    }

    /// Materializes a parsed node. Parsed names are trusted: the markup parser
    /// only produces names an HTML parser would accept.
    fn build(&mut self, node: DOMNode) -> NodeId {
        let id = match node.node_type {
            DOMNodeType::Text(text) => return self.create_text_node(text),
            DOMNodeType::Element(element) => {
                let mut live = Element::new(element.tag_name);
                for (name, value) in element.attributes.0 {
                    live.set_attribute(&name, &value);
                }
                self.push(NodeData::Element(live))
            }
        };
        for child in node.children {
            let child = self.build(child);
            self.node_mut(child).parent = Some(id);
            self.node_mut(id).children.push(child);
        }
        id
    }

    /// Light-DOM descendants of `root` with the given tag name, in document order
    pub fn get_elements_by_tag_name(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        let name = name.to_ascii_lowercase();
        let mut found = Vec::new();
        self.collect_by_tag(root, &name, &mut found);
        found
    }

    fn collect_by_tag(&self, id: NodeId, name: &str, found: &mut Vec<NodeId>) {
        for child in self.children(id) {
            if let Some(tag) = self.tag_name(*child) {
                if name == "*" || tag == name {
                    found.push(*child);
                }
            }
            self.collect_by_tag(*child, name, found);
        }
    }
}

/// Whether `name` may be used as an element or attribute name
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':') || !c.is_ascii())
}
