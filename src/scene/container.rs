use crate::surface::Surface;

use super::context::DrawContext;
use super::node::{Node, NodeId};

/// Ordered children of a container node.
///
/// Order is paint order: the first child is painted first, so later
/// children end up on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    children: Vec<Node>,
}

impl Container {
    /// Start from a fixed list of fresh nodes.
    pub(crate) fn with_children(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct child with `id`.
    pub fn child(&self, id: NodeId) -> Option<&Node> {
        self.children.iter().find(|child| child.id() == id)
    }

    /// Ids of the direct children, in paint order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().map(Node::id)
    }

    pub(crate) fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn take(&mut self, id: NodeId) -> Option<Node> {
        let index = self.children.iter().position(|child| child.id() == id)?;
        Some(self.children.remove(index))
    }

    /// Draw every child in order. Each child's transform stacks on top of
    /// the one already applied for this container.
    pub(crate) fn paint<S: Surface>(&self, ctx: &mut DrawContext<'_, S>) -> Result<(), S::Error> {
        for child in &self.children {
            child.draw_in(ctx)?;
        }
        Ok(())
    }
}
