use crate::{Event, NodeId};
use std::fmt;
use std::rc::Rc;

/// A value that can be stored as a live property or passed as a component
/// attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<PropValue>),
    /// Key/value pairs in insertion order
    Object(Vec<(String, PropValue)>),
    Function(Callback),
    Node(NodeId),
}

/// What a [`Callback`] is invoked with
#[derive(Clone, Copy, Debug)]
pub enum CallArg<'a> {
    /// Dispatch of an event the callback listens for
    Event(&'a Event),
    /// A freshly created element handed to a `ref` callback
    Element(NodeId),
}

#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(CallArg<'_>)>);

impl Callback {
    pub fn new(f: impl Fn(CallArg<'_>) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, arg: CallArg<'_>) {
        (self.0)(arg)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PropValue {
    pub fn object<K: Into<String>, V: Into<PropValue>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        PropValue::Object(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, PropValue::Function(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, PropValue)]> {
        match self {
            PropValue::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            PropValue::Function(cb) => Some(cb),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Undefined | PropValue::Null => false,
            PropValue::Bool(b) => *b,
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PropValue::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The string an attribute ends up with when this value is assigned to it
    pub fn to_attribute_string(&self) -> String {
        match self {
            PropValue::Undefined => "undefined".to_string(),
            PropValue::Null => "null".to_string(),
            PropValue::Bool(b) => b.to_string(),
            PropValue::Number(n) => format_number(*n),
            PropValue::String(s) => s.clone(),
            PropValue::Array(items) => items
                .iter()
                .map(|v| match v {
                    PropValue::Undefined | PropValue::Null => String::new(),
                    v => v.to_attribute_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            PropValue::Object(_) => "[object Object]".to_string(),
            PropValue::Function(_) => "[object Function]".to_string(),
            PropValue::Node(_) => "[object HTMLElement]".to_string(),
        }
    }
}

/// Formats a number the way script string conversion does: integers without a
/// fraction, exponent form below 1e-6 and from 1e21 on
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let s = format!("{:e}", n);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        };
    }
    format!("{}", n)
}

#[cfg(test)]
#[test]
fn test_attribute_string() {
    assert_eq!(PropValue::from(42).to_attribute_string(), "42");
    assert_eq!(PropValue::from(1.5).to_attribute_string(), "1.5");
    assert_eq!(PropValue::from(-0.0).to_attribute_string(), "0");
    assert_eq!(PropValue::from(1e20).to_attribute_string(), "100000000000000000000");
    assert_eq!(PropValue::from(-5e19).to_attribute_string(), "-50000000000000000000");
    assert_eq!(PropValue::from(1e21).to_attribute_string(), "1e+21");
    assert_eq!(PropValue::from(2.5e-7).to_attribute_string(), "2.5e-7");
    assert_eq!(PropValue::from(f64::NAN).to_attribute_string(), "NaN");
    assert_eq!(
        PropValue::from(vec![PropValue::from(1), PropValue::Null, PropValue::from(true)])
            .to_attribute_string(),
        "1,,true"
    );
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(f64::from(n))
    }
}

impl From<Callback> for PropValue {
    fn from(cb: Callback) -> Self {
        PropValue::Function(cb)
    }
}

impl From<NodeId> for PropValue {
    fn from(id: NodeId) -> Self {
        PropValue::Node(id)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(items: Vec<T>) -> Self {
        PropValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropValue::Null)
    }
}
