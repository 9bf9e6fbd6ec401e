use stage2d::prelude::*;
use stage2d::surface::{RecordedOp, SurfaceError};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn geometry(ops: Vec<SurfaceOp>) -> Vec<SurfaceOp> {
    ops.into_iter().filter(|op| !op.is_style()).collect()
}

fn fill_rect(x: f32, y: f32, width: f32, height: f32) -> SurfaceOp {
    SurfaceOp::FillRect {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn test_card_draw_sequence() {
    init_logger();
    let mut card = Card::new(10);
    card.node_mut().x = 100.0;

    let mut surface = RecordingSurface::new();
    card.node().draw(&mut surface).unwrap();

    assert_eq!(
        geometry(surface.ops()),
        vec![
            SurfaceOp::Save,
            SurfaceOp::Translate { dx: 100.0, dy: 0.0 },
            SurfaceOp::Rotate { radians: 0.0 },
            // background
            SurfaceOp::Save,
            SurfaceOp::Translate { dx: 0.0, dy: 0.0 },
            SurfaceOp::Rotate { radians: 0.0 },
            fill_rect(0.0, 0.0, 200.0, 200.0),
            SurfaceOp::Restore,
            // label
            SurfaceOp::Save,
            SurfaceOp::Translate { dx: 20.0, dy: 20.0 },
            SurfaceOp::Rotate { radians: 0.0 },
            SurfaceOp::FillText {
                text: "10".to_string(),
                x: 0.0,
                y: 30.0
            },
            SurfaceOp::Restore,
            SurfaceOp::Restore,
        ]
    );

    // Style calls precede each paint
    let ops = surface.ops();
    let fill = ops.iter().position(|op| *op == fill_rect(0.0, 0.0, 200.0, 200.0)).unwrap();
    assert_eq!(ops[fill - 1], SurfaceOp::SetFillColor(Color::BLUE));
    let text = ops.len() - 3;
    assert_eq!(ops[text - 2], SurfaceOp::SetFontSize(30.0));
    assert_eq!(ops[text - 1], SurfaceOp::SetFillColor(Color::WHITE));
}

#[test]
fn test_save_restore_balanced_when_deeply_nested() {
    init_logger();
    let mut node = Node::rect(Rect::default());
    for depth in 0..64 {
        let mut parent = Node::container().at(1.0, 0.0).rotated(0.01 * depth as f32);
        parent.add_child(node).unwrap();
        parent.add_child(Node::text(Text::new(depth.to_string()))).unwrap();
        node = parent;
    }

    let mut surface = RecordingSurface::new();
    node.draw(&mut surface).unwrap();

    let ops = surface.ops();
    let saves = ops.iter().filter(|op| **op == SurfaceOp::Save).count();
    let restores = ops.iter().filter(|op| **op == SurfaceOp::Restore).count();
    assert_eq!(saves, restores);
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.unmatched_restores(), 0);
    assert_eq!(surface.max_depth(), 65);
    assert!(surface.transform().is_identity());
}

#[test]
fn test_child_order_unaffected_by_container_transform() {
    let build = |x: f32, rotation: f32| {
        let mut parent = Node::container().at(x, 0.0).rotated(rotation);
        for label in ["a", "b", "c"] {
            parent.add_child(Node::text(Text::new(label))).unwrap();
        }
        parent
    };

    let order = |node: &Node| {
        let mut surface = RecordingSurface::new();
        node.draw(&mut surface).unwrap();
        surface
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::FillText { text, .. } => Some(text),
                _ => None,
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(order(&build(0.0, 0.0)), vec!["a", "b", "c"]);
    assert_eq!(order(&build(300.0, 2.5)), vec!["a", "b", "c"]);
}

#[test]
fn test_effective_transform_matches_what_surface_draws_with() {
    let mut scene = Scene::new();
    let outer = scene
        .add_child(Node::container().at(40.0, 10.0).rotated(0.3))
        .unwrap();
    let inner = scene
        .add_child_to(outer, Node::container().at(-5.0, 12.0).rotated(-1.1).scaled(2.0, 2.0))
        .unwrap();
    let leaf = scene
        .add_child_to(inner, Node::rect(Rect::new(4.0, 4.0)).at(7.0, 3.0).rotated(0.8))
        .unwrap();

    let mut surface = RecordingSurface::new();
    scene.draw(&mut surface).unwrap();

    let painted: Vec<&RecordedOp> = surface.paints().collect();
    assert_eq!(painted.len(), 1);

    let expected = scene.effective_transform(leaf).unwrap();
    assert!(painted[0].transform.approx_eq(&expected, 1e-4));

    // Same thing, built by hand: root ∘ outer ∘ inner ∘ leaf
    let by_hand = Transform::IDENTITY
        .then(&Transform::translate(40.0, 10.0))
        .then(&Transform::rotate(0.3))
        .then(&Transform::translate(-5.0, 12.0))
        .then(&Transform::rotate(-1.1))
        .then(&Transform::scale_xy(2.0, 2.0))
        .then(&Transform::translate(7.0, 3.0))
        .then(&Transform::rotate(0.8));
    assert!(expected.approx_eq(&by_hand, 1e-4));
}

#[test]
fn test_rotation_change_only_moves_that_subtree() {
    let mut scene = Scene::new();
    let spinning = scene.add_child(Node::container().at(100.0, 100.0)).unwrap();
    let child = scene
        .add_child_to(spinning, Node::rect(Rect::default()).at(10.0, 0.0))
        .unwrap();
    let sibling = scene
        .add_child(Node::rect(Rect::default()).at(300.0, 50.0))
        .unwrap();

    let before: Vec<Transform> = [spinning, child, sibling]
        .iter()
        .map(|id| scene.effective_transform(*id).unwrap())
        .collect();

    let mut first = RecordingSurface::new();
    scene.draw(&mut first).unwrap();

    scene.node_mut(spinning).unwrap().rotation += 0.01;

    let mut second = RecordingSurface::new();
    scene.draw(&mut second).unwrap();

    let after: Vec<Transform> = [spinning, child, sibling]
        .iter()
        .map(|id| scene.effective_transform(*id).unwrap())
        .collect();
    assert_ne!(before[0], after[0]);
    assert_ne!(before[1], after[1]);
    assert_eq!(before[2], after[2]);

    // Paint order is child then sibling in both frames
    let first: Vec<Transform> = first.paints().map(|p| p.transform).collect();
    let second: Vec<Transform> = second.paints().map(|p| p.transform).collect();
    assert_ne!(first[0], second[0]);
    assert_eq!(first[1], second[1]);
}

#[test]
fn test_orphan_still_draws_after_removal() {
    let mut scene = Scene::new();
    let card = scene.add_child(Card::new(3).into_node().at(50.0, 50.0)).unwrap();

    let orphan = scene.remove(card).unwrap();
    assert!(!scene.contains(card));

    let mut surface = RecordingSurface::new();
    orphan.draw(&mut surface).unwrap();
    assert_eq!(surface.paints().count(), 2);
    assert_eq!(surface.depth(), 0);

    // And it can go back in
    assert_eq!(scene.add_child(orphan), Ok(card));
}

#[test]
fn test_add_then_remove_restores_scene() {
    let mut scene = Scene::new();
    scene.add_child(Node::rect(Rect::default())).unwrap();
    scene.add_child(Card::new(1).into_node()).unwrap();
    let before: Vec<NodeId> = scene.root().as_container().unwrap().ids().collect();

    let extra = scene.add_child(Node::text(Text::new("x"))).unwrap();
    scene.remove(extra).unwrap();

    let after: Vec<NodeId> = scene.root().as_container().unwrap().ids().collect();
    assert_eq!(before, after);
}

#[test]
fn test_cycle_is_rejected_at_add() {
    let mut scene = Scene::new();
    let group = scene.add_child(Node::container()).unwrap();

    // A copy of the root still carries the root's id and the group's id
    let root_copy = scene.root().clone();
    assert!(matches!(
        scene.add_child_to(group, root_copy),
        Err(SceneError::WouldCycle { .. })
    ));

    let leaf = scene.add_child_to(group, Node::rect(Rect::default())).unwrap();
    assert_eq!(
        scene.add_child_to(leaf, Node::container()),
        Err(SceneError::NotAContainer(leaf))
    );
}

#[test]
fn test_copies_of_attached_nodes_are_rejected() {
    let mut scene = Scene::new();
    let first = scene.add_child(Node::container()).unwrap();
    let second = scene.add_child(Node::container()).unwrap();
    let leaf = scene.add_child_to(first, Node::rect(Rect::default())).unwrap();

    // A clone of the leaf keeps its id and cannot go under a second parent
    let twin = scene.node(leaf).unwrap().clone();
    assert_eq!(
        scene.add_child_to(second, twin.clone()),
        Err(SceneError::AlreadyInScene(leaf))
    );
    assert_eq!(scene.add_child(twin), Err(SceneError::AlreadyInScene(leaf)));
    assert!(scene.node(second).unwrap().as_container().unwrap().is_empty());

    // Removing the leaf leaves no copy behind
    scene.remove(leaf).unwrap();
    assert!(!scene.contains(leaf));

    // A snapshot of the root taken before `late` existed still carries the
    // root's and `first`'s ids
    let snapshot = scene.root().clone();
    let late = scene.add_child_to(first, Node::container()).unwrap();
    assert_eq!(
        scene.add_child_to(late, snapshot),
        Err(SceneError::AlreadyInScene(scene.root_id()))
    );
    assert_eq!(scene.root().path_to(late).unwrap().len(), 3);
    assert!(scene.node(late).unwrap().as_container().unwrap().is_empty());
}

#[test]
fn test_surface_error_propagates_with_stack_restored() {
    init_logger();
    let mut scene = Scene::new();
    let group = scene.add_child(Node::container().at(10.0, 10.0)).unwrap();
    scene
        .add_child_to(group, Node::rect(Rect::default()))
        .unwrap();
    let bad = scene
        .add_child_to(group, Node::rect(Rect::default().with_fill(Color::rgb(0.0, f32::NAN, 0.0))))
        .unwrap();
    scene.add_child(Node::text(Text::new("never"))).unwrap();

    let mut surface = RecordingSurface::new();
    let err = scene.frame(&mut surface).unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidColor(_)));

    // Painting stopped at the bad node, every open save was still closed,
    // and nothing was presented.
    assert_eq!(surface.paints().count(), 1);
    assert_eq!(surface.depth(), 0);
    assert!(surface.frames().is_empty());
    assert!(scene.needs_paint());

    scene.node_mut(bad).unwrap().as_rect_mut().unwrap().fill_color = Color::GREEN;
    surface.clear();
    scene.frame(&mut surface).unwrap();
    assert_eq!(surface.frames()[0].paint_count(), 3);
}

#[test]
fn test_color_tokens_drive_shapes() {
    let fill: Color = "#ffff00".parse().unwrap();
    let stroke: Color = "green".parse().unwrap();
    let node = Node::rect(Rect::new(100.0, 100.0).with_fill(fill).with_stroke(stroke)).at(10.0, 10.0);

    let mut surface = RecordingSurface::new();
    node.draw(&mut surface).unwrap();
    let ops = surface.ops();
    assert!(ops.contains(&SurfaceOp::SetFillColor(Color::YELLOW)));
    assert!(ops.contains(&SurfaceOp::SetStrokeColor(Color::GREEN)));
    assert_eq!(surface.paints().count(), 2);
}
