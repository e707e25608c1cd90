//! Core types for the intersection simulation
//!
//! Bodies are plain `Copy` values; `AtomicBody` is the shared, tear-safe
//! storage that agent threads write and the control thread reads.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a car. Also its index into the car arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {}", self.0)
    }
}

/// A 2D point or vector in screen units (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// A moving rectangle: a car, or the immobile intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Center of the rectangle
    pub position: Vec2,
    /// Units per step
    pub velocity: Vec2,
    pub width: u32,
    pub height: u32,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, width: u32, height: u32) -> Self {
        Self {
            position,
            velocity,
            width,
            height,
        }
    }

    /// A body that never moves
    pub fn fixed(position: Vec2, width: u32, height: u32) -> Self {
        Self::new(position, Vec2::ZERO, width, height)
    }

    /// Half extents, truncated to whole units the same way the renderer does
    pub fn half_extents(&self) -> (f64, f64) {
        ((self.width >> 1) as f64, (self.height >> 1) as f64)
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }
}

/// An f64 stored in an `AtomicU64` so concurrent reads can never tear.
#[derive(Debug, Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Shared storage for one car.
///
/// Only the owning agent thread stores into it. Readers get per-field
/// atomic values, so a snapshot may mix two steps but is never undefined.
#[derive(Debug)]
pub struct AtomicBody {
    x: AtomicF64,
    y: AtomicF64,
    vx: AtomicF64,
    vy: AtomicF64,
    width: u32,
    height: u32,
}

impl AtomicBody {
    pub fn new(body: Body) -> Self {
        Self {
            x: AtomicF64::new(body.position.x),
            y: AtomicF64::new(body.position.y),
            vx: AtomicF64::new(body.velocity.x),
            vy: AtomicF64::new(body.velocity.y),
            width: body.width,
            height: body.height,
        }
    }

    pub fn load(&self) -> Body {
        Body {
            position: Vec2::new(self.x.load(), self.y.load()),
            velocity: Vec2::new(self.vx.load(), self.vy.load()),
            width: self.width,
            height: self.height,
        }
    }

    /// Publish position and velocity. Extents are fixed at creation.
    pub fn store(&self, body: &Body) {
        self.x.store(body.position.x);
        self.y.store(body.position.y);
        self.vx.store(body.velocity.x);
        self.vy.store(body.velocity.y);
    }
}

/// Number of cars, one per approach
pub const CAR_COUNT: usize = 4;

/// Side length of a car before it is stretched along its travel axis
pub const CAR_SIZE: u32 = 18;

/// Side length of the intersection
pub const REGION_SIZE: u32 = 100;

/// Distance from the intersection center to each lane
pub const LANE_OFFSET: f64 = 21.0;

/// Converts a whole-number speed draw into units per step
pub const SPEED_SCALE: f64 = 0.0002;

/// How far past an edge a car must travel before it wraps
pub const WRAP_MARGIN: f64 = 20.0;
