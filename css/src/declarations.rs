use super::{declaration_list, parse_value, Value};

static GLOBAL_KEYWORDS: &[&str] = &["inherit", "initial", "unset"];

#[derive(PartialEq, Clone, Debug)]
pub struct Declaration {
    pub name: String,
    pub value: Value,
    /// The value text as it was written, used when serializing `style`
    pub specified: String,
    pub important: bool,
}

impl Declaration {
    /// Parses `text` as the value of `name`, honouring a trailing `!important`.
    /// Values of the wrong type for `name` are rejected.
    pub fn parse(name: &str, text: &str) -> Option<Self> {
        let text = text.trim();
        let lower = text.to_ascii_lowercase();
        let (text, important) = match lower.strip_suffix("!important") {
            Some(rest) => (text[..rest.len()].trim_end(), true),
            None => (text, false),
        };
        let value = parse_value(text)?;
        if !accepts(name, &value) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value,
            specified: text.to_string(),
            important,
        })
    }
}

/// Whether `name` takes a value of this type. Only the properties computed
/// style and visibility are derived from are checked.
fn accepts(name: &str, value: &Value) -> bool {
    if GLOBAL_KEYWORDS.iter().any(|kw| value.is_keyword(kw)) {
        return true;
    }
    match name {
        "color" | "background-color" => {
            value.try_to_color().is_some() || value.is_keyword("currentcolor")
        }
        "width" | "height" => match value {
            Value::Length(n, _) | Value::Percentage(n) => *n >= 0.0,
            Value::Number(n) => *n == 0.0,
            v => ["auto", "min-content", "max-content", "fit-content"]
                .iter()
                .any(|kw| v.is_keyword(kw)),
        },
        "opacity" => matches!(value, Value::Number(_)),
        "display" | "visibility" => matches!(value, Value::Keyword(_)),
        _ => true,
    }
}

/// An element's inline style: an ordered list of declarations with unique names
#[derive(PartialEq, Clone, Debug, Default)]
pub struct StyleDeclarations(Vec<Declaration>);

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one property. Script-style names are accepted. An empty value removes
    /// the property; a value that does not parse leaves the style untouched and
    /// returns `false`.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        let name = property_name(name);
        if value.trim().is_empty() {
            self.remove_property(&name);
            return true;
        }
        match Declaration::parse(&name, value) {
            Some(decl) => {
                self.insert(decl);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        let name = property_name(name);
        self.0.iter().find(|d| d.name == name)
    }

    /// The specified text of a property, or an empty string when unset
    pub fn get_property_value(&self, name: &str) -> String {
        self.get(name)
            .map(|d| d.specified.clone())
            .unwrap_or_default()
    }

    pub fn remove_property(&mut self, name: &str) -> Option<Declaration> {
        let name = property_name(name);
        let idx = self.0.iter().position(|d| d.name == name)?;
        Some(self.0.remove(idx))
    }

    pub fn css_text(&self) -> String {
        self.0
            .iter()
            .map(|d| {
                let priority = if d.important { " !important" } else { "" };
                format!("{}: {}{};", d.name, d.specified, priority)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replaces every declaration with those parsed from `text`
    pub fn set_css_text(&mut self, text: &str) {
        self.0.clear();
        for decl in declaration_list(text) {
            self.insert(decl);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, decl: Declaration) {
        match self.0.iter_mut().find(|d| d.name == decl.name) {
            Some(existing) => *existing = decl,
            None => self.0.push(decl),
        }
    }
}

/// Converts a script-style property name (`backgroundColor`) to its CSS form
/// (`background-color`). Names that already contain a dash are returned as-is.
pub fn property_name(name: &str) -> String {
    if name.contains('-') {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    for vendor in ["webkit-", "moz-", "ms-"] {
        if out.starts_with(vendor) {
            out.insert(0, '-');
        }
    }
    out
}
