//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use bevy::window::WindowResized;

use super::components::{rgb, to_world, CarLink, SimWorldResource, StatusText};
use crate::simulation::INTERSECTION_COLOR;

/// System to run the collision audit at the fixed tick rate
pub fn tick_simulation(mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick();
}

/// Re-layout the simulation when the window changes size
pub fn handle_resize(
    mut resized: MessageReader<WindowResized>,
    mut sim_world: ResMut<SimWorldResource>,
) {
    for event in resized.read() {
        let (width, height) = (event.width as u32, event.height as u32);
        let current = sim_world.0.viewport();
        if current.width == width && current.height == height {
            continue;
        }
        if let Err(err) = sim_world.0.resize(width, height) {
            bevy::log::error!("Failed to resize simulation: {:#}", err);
        }
    }
}

/// System to move car sprites to the latest car positions
pub fn sync_cars(
    sim_world: Res<SimWorldResource>,
    mut car_query: Query<(&CarLink, &mut Transform, &mut Sprite)>,
) {
    let frame = sim_world.0.frame();
    for (link, mut transform, mut sprite) in car_query.iter_mut() {
        let Some(car) = frame.cars.get(link.0 .0) else {
            continue;
        };
        transform.translation = to_world(car.position, frame.viewport).extend(1.0);
        sprite.custom_size = Some(Vec2::new(car.width as f32, car.height as f32));
    }
}

/// Outline the intersection and mark the latest collision
pub fn draw_intersection(sim_world: Res<SimWorldResource>, mut gizmos: Gizmos) {
    let frame = sim_world.0.frame();
    let region = &frame.intersection;
    gizmos.rect_2d(
        Isometry2d::from_translation(to_world(region.position, frame.viewport)),
        Vec2::new(region.width as f32, region.height as f32),
        rgb(INTERSECTION_COLOR),
    );

    if let Some(lines) = frame.collision_lines() {
        for line in lines {
            gizmos.line_2d(
                to_world(line.from, frame.viewport),
                to_world(line.to, frame.viewport),
                rgb(line.color),
            );
        }
    }
}

/// Refresh the status overlay
pub fn update_status_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&StatusText, &mut Text)>,
) {
    let lines = sim_world.0.frame().status_lines();
    for (status, mut text) in text_query.iter_mut() {
        if let Some(line) = lines.get(status.0) {
            if text.0 != line.text {
                text.0 = line.text.clone();
            }
        }
    }
}
