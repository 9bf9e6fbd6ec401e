use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SceneError};
use crate::surface::Surface;
use crate::transform::Transform;

use super::container::Container;
use super::context::DrawContext;
use super::shapes::{Rect, Text};

/// Identity of a node.
///
/// Allocated once when the node is built. Cloning a node keeps its id, so a
/// clone counts as the same node for containment checks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    /// Generate a new unique node ID
    pub fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node paints.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Rect(Rect),
    Text(Text),
    Container(Container),
}

/// A drawable node with a local transform.
///
/// Position, rotation and scale are plain public fields and may be changed
/// between any two draws; each draw reads them as they are at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub x: f32,
    pub y: f32,
    /// Radians, clockwise-positive
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::next(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            kind,
        }
    }

    pub fn rect(rect: Rect) -> Self {
        Self::new(NodeKind::Rect(rect))
    }

    pub fn text(text: Text) -> Self {
        Self::new(NodeKind::Text(text))
    }

    /// An empty container.
    pub fn container() -> Self {
        Self::new(NodeKind::Container(Container::default()))
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn scaled(mut self, sx: f32, sy: f32) -> Self {
        self.scale_x = sx;
        self.scale_y = sy;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn as_rect(&self) -> Option<&Rect> {
        match &self.kind {
            NodeKind::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_rect_mut(&mut self) -> Option<&mut Rect> {
        match &mut self.kind {
            NodeKind::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Read access to the children, if this node is a container.
    ///
    /// Children are changed through [`Node::add_child`] and
    /// [`Node::remove_child`]; individual children through [`Node::find_mut`].
    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            NodeKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    /// Whether scale differs from `(1, 1)`.
    pub fn is_scaled(&self) -> bool {
        self.scale_x != 1.0 || self.scale_y != 1.0
    }

    /// This node's transform relative to its parent: translate, then
    /// rotate, then scale.
    pub fn local_transform(&self) -> Transform {
        let mut transform =
            Transform::translate(self.x, self.y).then(&Transform::rotate(self.rotation));
        if self.is_scaled() {
            transform = transform.then(&Transform::scale_xy(self.scale_x, self.scale_y));
        }
        transform
    }

    /// Append `child` to this container's children.
    ///
    /// Fails if this node is a leaf, if `child`'s subtree contains this node
    /// (which would make the tree cyclic), or if a direct child with the same
    /// id is already present.
    pub fn add_child(&mut self, child: Node) -> Result<NodeId> {
        let parent = self.id;
        let child_id = child.id;
        if child.contains(parent) {
            return Err(SceneError::WouldCycle {
                parent,
                child: child_id,
            });
        }

        let NodeKind::Container(container) = &mut self.kind else {
            return Err(SceneError::NotAContainer(parent));
        };
        if container.child(child_id).is_some() {
            return Err(SceneError::AlreadyChild {
                parent,
                child: child_id,
            });
        }

        log::debug!("add_child: {} -> {}", child_id, parent);
        container.push(child);
        Ok(child_id)
    }

    /// Remove the first direct child with `id` and hand it back.
    ///
    /// Returns `None` when there is no such child or this node is a leaf.
    pub fn remove_child(&mut self, id: NodeId) -> Option<Node> {
        let NodeKind::Container(container) = &mut self.kind else {
            return None;
        };
        let removed = container.take(id);
        if removed.is_some() {
            log::debug!("remove_child: {} from {}", id, self.id);
        }
        removed
    }

    /// Whether `id` is this node or any of its descendants.
    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Depth-first search of this subtree, including this node.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.as_container()?
            .children()
            .iter()
            .find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.kind {
            NodeKind::Container(container) => container
                .children_mut()
                .iter_mut()
                .find_map(|child| child.find_mut(id)),
            _ => None,
        }
    }

    /// Ids of this node and every descendant, depth-first.
    pub fn subtree_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<NodeId>) {
        ids.push(self.id);
        if let Some(container) = self.as_container() {
            for child in container.children() {
                child.collect_ids(ids);
            }
        }
    }

    /// Chain of ids from this node down to `id`, both ends included.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        self.collect_path(id, &mut path).then_some(path)
    }

    fn collect_path(&self, id: NodeId, path: &mut Vec<NodeId>) -> bool {
        path.push(self.id);
        if self.id == id {
            return true;
        }
        if let Some(container) = self.as_container() {
            for child in container.children() {
                if child.collect_path(id, path) {
                    return true;
                }
            }
        }
        path.pop();
        false
    }

    /// Parent of `id` within this subtree.
    pub(crate) fn parent_of_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let is_parent = self
            .as_container()
            .is_some_and(|container| container.child(id).is_some());
        if is_parent {
            return Some(self);
        }
        match &mut self.kind {
            NodeKind::Container(container) => container
                .children_mut()
                .iter_mut()
                .find_map(|child| child.parent_of_mut(id)),
            _ => None,
        }
    }

    /// Draw this node and its subtree onto `surface`.
    ///
    /// The surface's save depth is the same on return as on entry, including
    /// when a paint call fails; such failures come back as-is.
    pub fn draw<S: Surface>(&self, surface: &mut S) -> std::result::Result<(), S::Error> {
        self.draw_in(&mut DrawContext::new(surface))
    }

    /// Draw within an existing traversal.
    pub fn draw_in<S: Surface>(
        &self,
        ctx: &mut DrawContext<'_, S>,
    ) -> std::result::Result<(), S::Error> {
        let mut ctx = ctx.save();
        ctx.translate(self.x, self.y);
        ctx.rotate(self.rotation);
        if self.is_scaled() {
            ctx.scale(self.scale_x, self.scale_y);
        }

        match &self.kind {
            NodeKind::Rect(rect) => rect.paint(&mut *ctx),
            NodeKind::Text(text) => text.paint(&mut *ctx),
            NodeKind::Container(container) => container.paint(&mut *ctx),
        }
    }
}
