use super::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} no longer exists in the document")]
    StaleNode(NodeId),
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
    #[error("cannot insert node {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    #[error("malformed markup at byte {position}: {message}")]
    Markup { position: u64, message: String },
}
