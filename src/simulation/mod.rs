//! Standalone intersection simulation module
//!
//! All coordination, auditing and layout logic lives here and runs without
//! any graphics. The optional UI only reads frames and sends commands.

mod audit;
mod car;
mod config;
mod context;
mod error;
mod frame;
mod geometry;
mod intersection;
mod layout;
mod modes;
mod types;
mod work;
mod world;

pub use audit::CollisionReport;
pub use car::{car_rng, CancelToken, CarState, SimCar, StepOutcome};
pub use config::{SimConfig, DEFAULT_TICK_INTERVAL};
pub use context::SimContext;
pub use error::{SimError, SimResult};
pub use frame::{
    car_color, DiagnosticLine, Frame, StatusLine, BACKGROUND_COLOR, CAR_COLORS, COUNTER_COLOR,
    HINT_COLOR, INTERSECTION_COLOR,
};
pub use geometry::overlaps;
pub use intersection::{RegionGuard, RegionPermit, SimIntersection};
pub use layout::{layout, random_speed, wrap_around, Layout, Viewport, MAX_VIEWPORT_SIDE};
pub use modes::{Command, ModeFlags};
pub use types::{
    AgentId, AtomicBody, AtomicF64, Body, Vec2, CAR_COUNT, CAR_SIZE, LANE_OFFSET, REGION_SIZE,
    SPEED_SCALE, WRAP_MARGIN,
};
pub use work::{simulated_work, WorkThrottle, DEFAULT_JITTER_UNITS, DEFAULT_SLOW_UNITS};
pub use world::SimWorld;
