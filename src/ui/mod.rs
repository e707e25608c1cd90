//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for presentation - all coordination logic is in the
//! `simulation` module. The UI reads frames from `SimWorld` and turns key
//! presses and window resizes into simulation calls.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{rgb, to_world, SimWorldResource};

use crate::simulation::BACKGROUND_COLOR;
use input::handle_input;
use sync::{draw_intersection, handle_resize, sync_cars, tick_simulation, update_status_text};
use world::setup_world;

/// Plugin to register all UI systems. Expects a `SimWorldResource`.
pub struct IntersectionSimUIPlugin;

impl Plugin for IntersectionSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(rgb(BACKGROUND_COLOR)))
            .add_systems(Startup, setup_world)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_resize,
                    sync_cars.after(handle_resize),
                    draw_intersection.after(handle_resize),
                    update_status_text,
                ),
            );
    }
}
