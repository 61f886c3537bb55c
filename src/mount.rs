use crate::config::{self, Env};
use crate::harness::{Harness, LogRecord};
use crate::materialize::materialize;
use crate::vnode::VNode;
use html::{Document, DomError, NodeId};
use tracing::{debug, span, trace, Level};

/// Name the container cleanup hook is registered under
pub const CLEANUP_HOOK: &str = "ctmount:cleanup";

/// What [`mount`] inserts into the container
#[derive(Clone, Debug, PartialEq)]
pub enum Template {
    Node(VNode),
    Nodes(Vec<VNode>),
    /// Assigned as the container's inner markup, without any attribute
    /// handling
    Markup(String),
}

impl From<VNode> for Template {
    fn from(node: VNode) -> Self {
        Template::Node(node)
    }
}

impl From<Vec<VNode>> for Template {
    fn from(nodes: Vec<VNode>) -> Self {
        Template::Nodes(nodes)
    }
}

impl From<&str> for Template {
    fn from(markup: &str) -> Self {
        Template::Markup(markup.to_string())
    }
}

impl From<String> for Template {
    fn from(markup: String) -> Self {
        Template::Markup(markup)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MountOptions {
    /// Assert that every mounted element and its light-DOM descendants become
    /// visible. Shadow content is not checked.
    pub wait_until_visible: bool,
    /// Log a `Mount` record for every element built
    pub log: bool,
}

impl MountOptions {
    /// Defaults from the `CtStencilWaitUntilVisible` and `CtStencilLog` settings
    pub fn from_env(env: &Env) -> Self {
        Self {
            wait_until_visible: env.get_bool(config::WAIT_UNTIL_VISIBLE),
            log: env.get_bool(config::LOG),
        }
    }
}

/// The elements a [`mount`] call inserted, in container order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountHandle {
    pub container: NodeId,
    pub elements: Vec<NodeId>,
}

/// Mounts `template` into the harness container. Without `options`, the
/// defaults come from the harness environment.
pub fn mount<H: Harness + ?Sized>(
    harness: &mut H,
    template: impl Into<Template>,
    options: Option<MountOptions>,
) -> Result<MountHandle, DomError> {
    let options = options.unwrap_or_else(|| MountOptions::from_env(harness.env()));
    let container = harness.container();
    let span = span!(Level::DEBUG, "Mounting", ?container);
    let _enter = span.enter();

    let elements = match template.into() {
        Template::Markup(markup) => {
            let doc = harness.document_mut();
            doc.set_inner_html(container, &markup);
            doc.element_children(container)
        }
        Template::Node(node) => insert(harness, container, &[node], options.log)?,
        Template::Nodes(nodes) => insert(harness, container, &nodes, options.log)?,
    };
    debug!(count = elements.len(), "Mounted elements");

    if options.wait_until_visible {
        for element in &elements {
            wait_until_visible(harness, *element);
        }
    }
    Ok(MountHandle {
        container,
        elements,
    })
}

/// Materializes and appends each node. Log records reach the harness as soon
/// as their node is built, including when a later element fails.
fn insert<H: Harness + ?Sized>(
    harness: &mut H,
    container: NodeId,
    nodes: &[VNode],
    log: bool,
) -> Result<Vec<NodeId>, DomError> {
    let mut inserted = Vec::new();
    for node in nodes {
        let mut records: Vec<LogRecord> = Vec::new();
        let built = materialize(
            harness.document_mut(),
            node,
            if log { Some(&mut records) } else { None },
        );
        for record in records {
            harness.log(record);
        }
        if let Some(el) = built? {
            harness.document_mut().append_child(container, el)?;
            inserted.push(el);
        }
    }
    Ok(inserted)
}

/// Requests visibility of the light-DOM element children of `element`,
/// depth first, and then of `element` itself
pub fn wait_until_visible<H: Harness + ?Sized>(harness: &mut H, element: NodeId) {
    for child in harness.document().element_children(element) {
        wait_until_visible(harness, child);
    }
    trace!(?element, "Waiting until visible");
    harness.assert_visible(element);
}

/// Empties the container
pub fn cleanup(doc: &mut Document, container: NodeId) {
    doc.set_text_content(container, "");
}

/// Registers [`cleanup`] to run after every test
pub fn setup_hooks<H: Harness + ?Sized>(harness: &mut H) {
    harness.register_after_each(CLEANUP_HOOK, Box::new(cleanup));
}
