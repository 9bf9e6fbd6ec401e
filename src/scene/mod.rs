//! Retained-mode scene graph.
//!
//! A scene is a tree of [`Node`]s. Every node carries a local transform
//! (position, rotation, scale) and one of a closed set of kinds: a
//! [`Rect`] or [`Text`] leaf, or a [`Container`] owning an ordered list of
//! children. Drawing walks the tree depth-first; each node saves the
//! surface state, applies its transform on top of its parent's, paints, and
//! restores.
//!
//! # Example
//!
//! ```
//! use stage2d::prelude::*;
//!
//! let mut scene = Scene::new();
//! let card = scene.add_child(Card::new(10).into_node().at(100.0, 0.0)).unwrap();
//!
//! let mut surface = RecordingSurface::new();
//! scene.frame(&mut surface).unwrap();
//!
//! // Animate between frames by mutating the node.
//! scene.node_mut(card).unwrap().rotation += 0.01;
//! scene.frame(&mut surface).unwrap();
//! assert_eq!(surface.frames().len(), 2);
//! ```

mod card;
mod container;
mod context;
mod node;
mod shapes;

pub use card::Card;
pub use container::Container;
pub use context::{DrawContext, SavedState};
pub use node::{Node, NodeId, NodeKind};
pub use shapes::{Rect, Text};

use bitflags::bitflags;

use crate::error::{Result, SceneError};
use crate::surface::Surface;
use crate::transform::Transform;

bitflags! {
    /// What changed in a scene since it was last presented
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Some node may have been mutated (transform or shape attributes)
        const NEEDS_PAINT = 0b01;
        /// Children were added or removed somewhere in the tree
        const STRUCTURE   = 0b10;
    }
}

/// The root of a scene, owned by the host.
///
/// Wraps a root container and tracks [`ChangeFlags`] so a host can skip
/// presenting frames nothing has touched. Any mutable access to a node
/// counts as a change; it is not diffed.
#[derive(Debug, Clone)]
pub struct Scene {
    root: Node,
    changes: ChangeFlags,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: Node::container(),
            changes: ChangeFlags::NEEDS_PAINT,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id()
    }

    /// Mutable root, e.g. to move or rotate the whole scene.
    pub fn root_mut(&mut self) -> &mut Node {
        self.changes |= ChangeFlags::NEEDS_PAINT;
        &mut self.root
    }

    pub fn changes(&self) -> ChangeFlags {
        self.changes
    }

    pub fn needs_paint(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Append `node` to the root container.
    ///
    /// Fails with [`SceneError::AlreadyInScene`] if any node in `node`'s
    /// subtree shares an id with a node already in the scene.
    pub fn add_child(&mut self, node: Node) -> Result<NodeId> {
        self.ensure_unattached(self.root.id(), &node)?;
        let id = self.root.add_child(node)?;
        self.changes |= ChangeFlags::NEEDS_PAINT | ChangeFlags::STRUCTURE;
        Ok(id)
    }

    /// Append `node` to the container `parent`, anywhere in the tree.
    pub fn add_child_to(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.root.contains(parent) {
            return Err(SceneError::NotFound(parent));
        }
        self.ensure_unattached(parent, &node)?;
        let parent = self
            .root
            .find_mut(parent)
            .ok_or(SceneError::NotFound(parent))?;
        let id = parent.add_child(node)?;
        self.changes |= ChangeFlags::NEEDS_PAINT | ChangeFlags::STRUCTURE;
        Ok(id)
    }

    /// Each id may appear once in the tree. A clone keeps its id, so a copy
    /// of an attached node (or of the root) is rejected.
    fn ensure_unattached(&self, parent: NodeId, node: &Node) -> Result<()> {
        if node.contains(parent) {
            return Err(SceneError::WouldCycle {
                parent,
                child: node.id(),
            });
        }
        match node.subtree_ids().into_iter().find(|id| self.root.contains(*id)) {
            Some(id) => Err(SceneError::AlreadyInScene(id)),
            None => Ok(()),
        }
    }

    /// Detach `id` from wherever it sits in the tree and hand it back.
    ///
    /// The root itself cannot be removed; asking for it returns `None`, as
    /// does an id that is not in the scene.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.root.parent_of_mut(id)?.remove_child(id)?;
        self.changes |= ChangeFlags::NEEDS_PAINT | ChangeFlags::STRUCTURE;
        Some(removed)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let node = self.root.find_mut(id)?;
        self.changes |= ChangeFlags::NEEDS_PAINT;
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.root.contains(id)
    }

    /// The transform `id` is drawn with: every ancestor's local transform,
    /// root first, composed with the node's own.
    pub fn effective_transform(&self, id: NodeId) -> Option<Transform> {
        let path = self.root.path_to(id)?;
        let mut node = &self.root;
        let mut transform = node.local_transform();
        for step in &path[1..] {
            node = node.as_container()?.child(*step)?;
            transform = transform.then(&node.local_transform());
        }
        Some(transform)
    }

    /// Draw the whole tree without presenting.
    pub fn draw<S: Surface>(&self, surface: &mut S) -> std::result::Result<(), S::Error> {
        self.root.draw(surface)
    }

    /// Draw the whole tree and present it as one frame.
    ///
    /// Change flags are cleared only once the frame was presented.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> std::result::Result<(), S::Error> {
        self.draw(surface)?;
        surface.present()?;
        log::trace!("Scene: presented frame ({:?})", self.changes);
        self.changes = ChangeFlags::empty();
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
