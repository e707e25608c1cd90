//! Car agents
//!
//! Each car runs on its own thread and is the only writer of its body.
//! Before moving into the intersection it takes the intersection permit and
//! keeps it until it no longer overlaps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::context::SimContext;
use super::error::{SimError, SimResult};
use super::geometry::overlaps;
use super::layout::wrap_around;
use super::types::{AgentId, Body};

/// Golden-ratio constant used to spread per-car seeds
const SEED_MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Where a car is relative to the intersection protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarState {
    Cruising,
    /// Overlapping the intersection and waiting for the permit
    Entering,
    /// Holding the permit
    InRegion,
}

/// Cooperative stop signal shared by all cars of one run
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Moves made while holding the permit, if the car crossed this step
    pub crossing_moves: Option<u64>,
    /// Slow-mode work burned while holding the permit
    pub stall_units: u64,
    pub wrapped: bool,
}

/// RNG for one car: derived from the run seed, or fresh entropy
pub fn car_rng(seed: Option<u64>, id: AgentId) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed ^ (id.0 as u64 + 1).wrapping_mul(SEED_MIXING_CONSTANT))
        }
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// A car in the simulation
#[derive(Debug)]
pub struct SimCar {
    id: AgentId,
    ctx: Arc<SimContext>,
    body: Body,
    state: CarState,
    rng: StdRng,
    cancel: CancelToken,
    steps: u64,
}

impl SimCar {
    pub fn new(
        id: AgentId,
        ctx: Arc<SimContext>,
        rng: StdRng,
        cancel: CancelToken,
    ) -> SimResult<Self> {
        let body = ctx
            .car(id)
            .ok_or_else(|| SimError::Config(format!("no body for {id}")))?
            .load();
        Ok(Self {
            id,
            ctx,
            body,
            state: CarState::Cruising,
            rng,
            cancel,
            steps: 0,
        })
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    /// Completed steps; a whole crossing counts as one
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn publish(&self) {
        if let Some(shared) = self.ctx.car(self.id) {
            shared.store(&self.body);
        }
    }

    fn advance(&mut self) {
        self.body.advance();
        self.publish();
    }

    /// Run one iteration: move, cross the intersection if we reached it,
    /// then wrap at the screen edge.
    pub fn step(&mut self) -> StepOutcome {
        let ctx = Arc::clone(&self.ctx);
        let intersection = ctx.intersection.body();
        let mut outcome = StepOutcome::default();

        ctx.throttle.jitter(&mut self.rng);
        self.advance();

        if self.state == CarState::Cruising && overlaps(&self.body, intersection) {
            self.state = CarState::Entering;
            let guard = ctx.intersection.permit().acquire(self.id);
            self.state = CarState::InRegion;
            trace!("{} entered the intersection", self.id);

            let mut moves = 0;
            while overlaps(&self.body, intersection) {
                if self.cancel.is_cancelled() {
                    break;
                }
                ctx.throttle.jitter(&mut self.rng);
                if ctx.modes.slow_mode() {
                    outcome.stall_units += u64::from(ctx.throttle.stall());
                }
                self.advance();
                moves += 1;
            }

            drop(guard);
            self.state = CarState::Cruising;
            trace!("{} left the intersection after {} moves", self.id, moves);
            outcome.crossing_moves = Some(moves);
        }

        if wrap_around(&mut self.body, ctx.viewport, &mut self.rng) {
            self.publish();
            debug!(
                "{} wrapped to ({:.1}, {:.1})",
                self.id, self.body.position.x, self.body.position.y
            );
            outcome.wrapped = true;
        }

        self.steps += 1;
        outcome
    }

    /// Step until cancelled or `step_limit` steps have run
    pub fn run(&mut self, step_limit: Option<u64>) {
        debug!("{} started", self.id);
        while !self.cancel.is_cancelled() {
            if step_limit.is_some_and(|limit| self.steps >= limit) {
                break;
            }
            self.step();
        }
        debug!("{} stopped after {} steps", self.id, self.steps);
    }
}
