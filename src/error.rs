use thiserror::Error;

use crate::scene::NodeId;

/// Structural errors raised when editing the scene tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0} is not a container")]
    NotAContainer(NodeId),
    #[error("adding {child} under {parent} would make {parent} its own descendant")]
    WouldCycle { parent: NodeId, child: NodeId },
    #[error("{child} is already a child of {parent}")]
    AlreadyChild { parent: NodeId, child: NodeId },
    #[error("node {0} is already in the scene")]
    AlreadyInScene(NodeId),
    #[error("node {0} not found in scene")]
    NotFound(NodeId),
}

pub type Result<T> = std::result::Result<T, SceneError>;
