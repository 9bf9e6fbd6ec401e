//! Two squares: one rotated a quarter turn about its centre, one left alone.
//! Prints the recorded surface calls.

use std::f32::consts::FRAC_PI_4;

use stage2d::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut scene = Scene::new();

    // Centre the square on its pivot by offsetting it inside a rotated group
    let pivot = scene.add_child(Node::container().at(100.0, 100.0).rotated(FRAC_PI_4))?;
    scene.add_child_to(pivot, Node::rect(Rect::default().with_fill(Color::RED)).at(-50.0, -50.0))?;

    scene.add_child(Node::rect(Rect::default().with_fill(Color::GREEN)))?;

    let mut surface = RecordingSurface::new();
    scene.draw(&mut surface)?;
    for recorded in surface.recorded() {
        println!("{:?}", recorded.op);
    }
    surface.present()?;
    Ok(())
}
