//! An in-memory document: elements with attributes, live properties, inline
//! styles and event listeners, shadow roots, and a lenient markup parser for
//! `innerHTML`-style content.

/// Parse tree produced by the markup parser
mod dom;
/// The node arena and tree operations
mod document;
mod element;
mod error;
mod events;
/// Parsing of markup into a [`DOMNode`] forest
mod parsing;
mod serialize;
/// Computed style and visibility
mod style;
mod value;

pub use document::{Document, NodeData, NodeId};
pub use dom::{DOMAttributes, DOMElement, DOMNode, DOMNodeType};
pub use element::Element;
pub use error::DomError;
pub use events::Event;
pub use parsing::fragment as parse_fragment;
pub use value::{CallArg, Callback, PropValue};
