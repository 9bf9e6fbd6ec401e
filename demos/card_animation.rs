//! Spins a numbered card at 50 Hz for two seconds, recording every frame.
//!
//! Run with `RUST_LOG=debug cargo run --example card_animation` to see the
//! tree edits and per-run summary.

use std::time::Duration;

use stage2d::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut scene = Scene::new();

    let card = scene.add_child(Card::new(10).into_node().at(100.0, 0.0))?;
    let badge = scene.add_child_to(
        card,
        Node::rect(Rect::new(24.0, 24.0).with_fill("#ffff00".parse()?).with_stroke(Color::BLACK))
            .at(160.0, 16.0),
    )?;

    let mut surface = RecordingSurface::new();
    let presented = App::new()
        .frame_interval(Duration::from_millis(20))
        .max_frames(100)
        .on_update(move |scene, tick| {
            if let Some(node) = scene.node_mut(card) {
                node.rotation += 0.01;
            }
            // Drop the badge halfway through
            if tick == 50 {
                scene.remove(badge);
            }
        })
        .run(&mut scene, &mut surface)?;

    let last = surface.frames().last().map(|frame| frame.paint_count()).unwrap_or(0);
    println!("presented {presented} frames, {last} paints in the last one");
    if let Some(transform) = scene.effective_transform(card) {
        println!("card ended at {:?}", transform);
    }
    Ok(())
}
