use crate::{Document, NodeId};
use css::Value;

// Taken from https://chromium.googlesource.com/chromium/blink/+/refs/heads/main/Source/core/css/html.css
static EXCLUDED: &[&str] = &[
    "head", "meta", "title", "link", "style", "script", "datalist", "param", "noframes", "template",
];

static BLOCK: &[&str] = &[
    "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "pre", "section",
    "article", "aside", "header", "footer", "nav", "main", "form", "fieldset", "figure",
    "blockquote", "address", "hr", "dl", "dt", "dd",
];

/// User agent `display` for elements the default stylesheet styles
fn default_display(tag: &str) -> Option<&'static str> {
    if EXCLUDED.contains(&tag) {
        Some("none")
    } else if BLOCK.contains(&tag) {
        Some("block")
    } else if tag == "li" {
        Some("list-item")
    } else if tag == "table" {
        Some("table")
    } else {
        None
    }
}

impl Document {
    /// The computed value of a property as a style query reports it, e.g.
    /// `rgb(255, 0, 0)` for an inline `background-color: red`. Script-style
    /// names are accepted. `None` for non-elements and properties with no
    /// known initial value.
    pub fn computed_style(&self, id: NodeId, property: &str) -> Option<String> {
        let name = css::property_name(property);
        self.computed_value(id, &name).map(|v| v.to_computed())
    }

    fn computed_value(&self, id: NodeId, name: &str) -> Option<Value> {
        let element = self.element(id)?;
        let inherit = || {
            self.parent_element(id)
                .and_then(|p| self.computed_value(p, name))
                .or_else(|| css::initial_value(name))
        };
        if let Some(decl) = element.style().get(name) {
            let inherits = decl.value.is_keyword("inherit")
                || (decl.value.is_keyword("unset") && css::is_inherited(name));
            return if inherits {
                inherit()
            } else if decl.value.is_keyword("initial") || decl.value.is_keyword("unset") {
                css::initial_value(name)
            } else {
                Some(decl.value.clone())
            };
        }
        if name == "display" {
            if let Some(display) = default_display(element.tag_name()) {
                return Some(Value::Keyword(display.to_string()));
            }
        }
        if css::is_inherited(name) {
            return inherit();
        }
        css::initial_value(name)
    }

    /// Nearest element in the flattened tree: shadow roots lead to their host
    fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.flat_parent(id)?;
        while !self.is_element(current) {
            current = self.flat_parent(current)?;
        }
        Some(current)
    }

    /// Whether the element would be rendered: connected, not excluded by
    /// `display: none` or `hidden` on itself or an ancestor, not transparent,
    /// and with a computed `visibility` of `visible`.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if !self.is_element(id) || !self.is_connected(id) {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if self.has_attribute(node, "hidden") {
                return false;
            }
            if self.computed_style(node, "display").as_deref() == Some("none") {
                return false;
            }
            if self.computed_style(node, "opacity").as_deref() == Some("0") {
                return false;
            }
            current = self.parent_element(node);
        }
        !matches!(
            self.computed_style(id, "visibility").as_deref(),
            Some("hidden") | Some("collapse")
        )
    }
}
