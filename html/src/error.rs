use crate::NodeId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("{0:?} is not a valid name")]
    InvalidCharacter(String),
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("node {child:?} cannot be inserted into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    #[error("node {child:?} is not a child of {parent:?}")]
    NotFound { parent: NodeId, child: NodeId },
    #[error("{0:?} is not a function")]
    NotCallable(String),
    #[error("element {0:?} already hosts a shadow root")]
    ShadowRootExists(NodeId),
}
