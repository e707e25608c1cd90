//! Placement of the intersection and cars, and screen-edge wrapping
//!
//! ```text
//!            1
//!            |
//!            v
//!          +-----+
//!          |     | <--0
//!     2--> |     |
//!          +-----+
//!              ^
//!              |
//!              3
//! ```

use rand::Rng;

use super::error::{SimError, SimResult};
use super::types::{
    Body, Vec2, CAR_COUNT, CAR_SIZE, LANE_OFFSET, REGION_SIZE, SPEED_SCALE, WRAP_MARGIN,
};

/// Largest accepted side length; the ASCII map allocates a cell per 10 units
pub const MAX_VIEWPORT_SIDE: u32 = 16_384;

/// Size of the visible area in screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> SimResult<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::Config(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        if width > MAX_VIEWPORT_SIDE || height > MAX_VIEWPORT_SIDE {
            return Err(SimError::Config(format!(
                "viewport {width}x{height} exceeds {MAX_VIEWPORT_SIDE} per side"
            )));
        }
        Ok(Self { width, height })
    }

    /// Center in whole units, as the window reports it
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f64, (self.height / 2) as f64)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// Bodies for one simulation epoch
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub intersection: Body,
    pub cars: [Body; CAR_COUNT],
}

/// Draw a speed of 1, 2 or 3 and scale it to units per step
pub fn random_speed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(1..=3) as f64 * SPEED_SCALE
}

/// Extra length a car gets along its direction of travel
fn random_stretch<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(10..=15)
}

/// Center the intersection and put one car on each approach
pub fn layout<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Layout {
    let center = viewport.center();
    let intersection = Body::fixed(center, REGION_SIZE, REGION_SIZE);
    let xres = viewport.width as f64;
    let yres = viewport.height as f64;

    // Heading west
    let west = Body::new(
        Vec2::new(xres + 30.0, center.y - LANE_OFFSET),
        Vec2::new(-random_speed(rng), 0.0),
        CAR_SIZE + random_stretch(rng),
        CAR_SIZE,
    );
    // Heading south
    let south = Body::new(
        Vec2::new(center.x - LANE_OFFSET, -30.0),
        Vec2::new(0.0, random_speed(rng)),
        CAR_SIZE,
        CAR_SIZE + random_stretch(rng),
    );
    // Heading east
    let east = Body::new(
        Vec2::new(-40.0, center.y + LANE_OFFSET),
        Vec2::new(random_speed(rng), 0.0),
        CAR_SIZE + random_stretch(rng),
        CAR_SIZE,
    );
    // Heading north
    let north = Body::new(
        Vec2::new(center.x + LANE_OFFSET, yres + 30.0),
        Vec2::new(0.0, -random_speed(rng)),
        CAR_SIZE,
        CAR_SIZE + random_stretch(rng),
    );

    Layout {
        intersection,
        cars: [west, south, east, north],
    }
}

/// Move a car that has left the screen to just outside the opposite edge.
///
/// Only the side the car is driving towards is checked, and the car keeps
/// its direction with a freshly drawn speed. Returns true if it wrapped.
pub fn wrap_around<R: Rng + ?Sized>(body: &mut Body, viewport: Viewport, rng: &mut R) -> bool {
    let xres = viewport.width as f64;
    let yres = viewport.height as f64;
    let span_x = xres + 2.0 * WRAP_MARGIN;
    let span_y = yres + 2.0 * WRAP_MARGIN;
    let mut wrapped = false;

    if body.position.x < -WRAP_MARGIN && body.velocity.x < 0.0 {
        body.position.x += span_x;
        body.velocity.x = -random_speed(rng);
        wrapped = true;
    }
    if body.position.y < -WRAP_MARGIN && body.velocity.y < 0.0 {
        body.position.y += span_y;
        body.velocity.y = -random_speed(rng);
        wrapped = true;
    }
    if body.position.x > xres + WRAP_MARGIN && body.velocity.x > 0.0 {
        body.position.x -= span_x;
        body.velocity.x = random_speed(rng);
        wrapped = true;
    }
    if body.position.y > yres + WRAP_MARGIN && body.velocity.y > 0.0 {
        body.position.y -= span_y;
        body.velocity.y = random_speed(rng);
        wrapped = true;
    }
    wrapped
}
