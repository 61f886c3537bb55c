use crate::{CallArg, Callback, Document, NodeData, NodeId, PropValue};
use tracing::trace;

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: String,
    pub target: Option<NodeId>,
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    /// Whether the event propagates from a shadow root to its host
    pub composed: bool,
    pub detail: PropValue,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            current_target: None,
            bubbles: false,
            composed: false,
            detail: PropValue::Null,
        }
    }

    /// A bubbling, composed event carrying `detail`, as components emit them
    pub fn custom(event_type: impl Into<String>, detail: impl Into<PropValue>) -> Self {
        Self {
            bubbles: true,
            composed: true,
            detail: detail.into(),
            ..Self::new(event_type)
        }
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }
}

impl Document {
    /// Registers `callback` for `event_type` on `target`. Registering the same
    /// callback twice for one type has no effect.
    pub fn add_event_listener(&mut self, target: NodeId, event_type: &str, callback: Callback) {
        let listeners = &mut self.node_mut(target).listeners;
        if listeners
            .iter()
            .any(|(t, cb)| t == event_type && *cb == callback)
        {
            return;
        }
        listeners.push((event_type.to_string(), callback));
    }

    pub fn remove_event_listener(&mut self, target: NodeId, event_type: &str, callback: &Callback) {
        self.node_mut(target)
            .listeners
            .retain(|(t, cb)| !(t == event_type && cb == callback));
    }

    /// Dispatches `event` at `target`, then at its ancestors when the event
    /// bubbles. Returns how many listeners ran.
    pub fn dispatch_event(&self, target: NodeId, mut event: Event) -> usize {
        event.target = Some(target);
        let mut path = vec![target];
        if event.bubbles {
            let mut current = target;
            while let Some(next) = self.propagation_parent(current, event.composed) {
                path.push(next);
                current = next;
            }
        }

        let mut invoked = 0;
        for node in path {
            let listeners: Vec<Callback> = self
                .node(node)
                .listeners
                .iter()
                .filter(|(t, _)| *t == event.event_type)
                .map(|(_, cb)| cb.clone())
                .collect();
            event.current_target = Some(node);
            for cb in listeners {
                cb.call(CallArg::Event(&event));
                invoked += 1;
            }
        }
        trace!(event = %event.event_type, ?target, invoked, "Dispatched event");
        invoked
    }

    /// Dispatches a bubbling `click` at `target`
    pub fn click(&self, target: NodeId) -> usize {
        self.dispatch_event(target, Event::new("click").bubbles(true))
    }

    fn propagation_parent(&self, id: NodeId, composed: bool) -> Option<NodeId> {
        match self.data(id) {
            NodeData::ShadowRoot { host } if composed => Some(*host),
            NodeData::ShadowRoot { .. } => None,
            _ => self.parent(id),
        }
    }
}
