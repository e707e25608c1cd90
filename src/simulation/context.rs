//! State shared between agent threads and the control thread

use std::sync::Arc;

use super::error::{SimError, SimResult};
use super::intersection::SimIntersection;
use super::layout::Viewport;
use super::modes::ModeFlags;
use super::types::{AgentId, AtomicBody, Body};
use super::work::WorkThrottle;

/// Everything an agent needs, handed out behind an `Arc`.
///
/// A context lives for one layout epoch; a resize builds a new one.
#[derive(Debug)]
pub struct SimContext {
    pub viewport: Viewport,
    pub intersection: SimIntersection,
    pub cars: Vec<AtomicBody>,
    pub modes: Arc<ModeFlags>,
    pub throttle: WorkThrottle,
}

impl SimContext {
    pub fn new(
        viewport: Viewport,
        intersection: Body,
        cars: &[Body],
        modes: Arc<ModeFlags>,
        throttle: WorkThrottle,
    ) -> SimResult<Self> {
        if cars.is_empty() {
            return Err(SimError::Config("simulation needs at least one car".to_string()));
        }
        Ok(Self {
            viewport,
            intersection: SimIntersection::new(intersection, 1)?,
            cars: cars.iter().copied().map(AtomicBody::new).collect(),
            modes,
            throttle,
        })
    }

    pub fn car(&self, id: AgentId) -> Option<&AtomicBody> {
        self.cars.get(id.0)
    }

    /// Current car bodies. Fields may come from different steps.
    pub fn snapshot_cars(&self) -> Vec<Body> {
        self.cars.iter().map(AtomicBody::load).collect()
    }
}
