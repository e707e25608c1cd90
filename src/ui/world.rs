//! World setup systems for camera, car sprites and the status overlay

use bevy::prelude::*;

use super::components::{rgb, to_world, CarLink, MainCamera, SimWorldResource, StatusText};
use crate::simulation::{car_color, AgentId};

/// System to setup the 2D scene from the current simulation frame
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    commands.spawn((MainCamera, Camera2d));

    let frame = sim_world.0.frame();
    for (index, car) in frame.cars.iter().enumerate() {
        let id = AgentId(index);
        commands.spawn((
            CarLink(id),
            Sprite::from_color(
                rgb(car_color(id)),
                Vec2::new(car.width as f32, car.height as f32),
            ),
            Transform::from_translation(to_world(car.position, frame.viewport).extend(1.0)),
        ));
    }

    for (index, line) in frame.status_lines().into_iter().enumerate() {
        commands.spawn((
            StatusText(index),
            Text::new(line.text),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(rgb(line.color)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0 + 16.0 * index as f32),
                left: Val::Px(20.0),
                ..default()
            },
        ));
    }
}
