//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{AgentId, SimWorld, Vec2 as SimVec2, Viewport};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a sprite to a simulated car
#[derive(Component)]
pub struct CarLink(pub AgentId);

/// One line of the status overlay, by index
#[derive(Component)]
pub struct StatusText(pub usize);

/// Screen coordinates (origin top-left, y down) to a centered 2D world
pub fn to_world(position: SimVec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (position.x - viewport.width as f64 / 2.0) as f32,
        (viewport.height as f64 / 2.0 - position.y) as f32,
    )
}

/// 0xRRGGBB to a Bevy color
pub fn rgb(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}
