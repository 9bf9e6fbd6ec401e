use crate::color::Color;

use super::container::Container;
use super::node::{Node, NodeId, NodeKind};
use super::shapes::{Rect, Text};

/// A numbered card: a container holding a background rect and a label.
///
/// The two children are created here and kept for the card's lifetime; the
/// card itself adds no painting of its own.
#[derive(Debug, Clone)]
pub struct Card {
    node: Node,
    background: NodeId,
    label: NodeId,
}

impl Card {
    pub const SIZE: f32 = 200.0;
    pub const BACKGROUND: Color = Color::BLUE;
    pub const LABEL_COLOR: Color = Color::WHITE;
    pub const LABEL_OFFSET: (f32, f32) = (20.0, 20.0);

    pub fn new(number: i64) -> Self {
        let background = Node::rect(Rect::new(Self::SIZE, Self::SIZE).with_fill(Self::BACKGROUND));
        let label = Node::text(Text::new(number.to_string()).with_color(Self::LABEL_COLOR))
            .at(Self::LABEL_OFFSET.0, Self::LABEL_OFFSET.1);

        let background_id = background.id();
        let label_id = label.id();
        let node = Node::new(NodeKind::Container(Container::with_children(vec![
            background, label,
        ])));

        Self {
            node,
            background: background_id,
            label: label_id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn background_id(&self) -> NodeId {
        self.background
    }

    pub fn label_id(&self) -> NodeId {
        self.label
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Mutable access to the card's own transform fields.
    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    pub fn background(&self) -> Option<&Rect> {
        self.node.find(self.background)?.as_rect()
    }

    pub fn background_mut(&mut self) -> Option<&mut Rect> {
        self.node.find_mut(self.background)?.as_rect_mut()
    }

    pub fn label(&self) -> Option<&Text> {
        self.node.find(self.label)?.as_text()
    }

    pub fn into_node(self) -> Node {
        self.node
    }
}

impl From<Card> for Node {
    fn from(card: Card) -> Self {
        card.into_node()
    }
}
