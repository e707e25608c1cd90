//! Main simulation world that ties everything together
//!
//! `SimWorld` lives on the control thread. It owns the car threads, runs
//! the collision audit once per tick and builds frames for presentation.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::audit::CollisionReport;
use super::car::{car_rng, CancelToken, SimCar};
use super::config::SimConfig;
use super::context::SimContext;
use super::error::{SimError, SimResult};
use super::frame::Frame;
use super::layout::{layout, Viewport};
use super::modes::{Command, ModeFlags};
use super::types::{AgentId, Body};

/// The main simulation world
#[derive(Debug)]
pub struct SimWorld {
    config: SimConfig,
    ctx: Arc<SimContext>,
    modes: Arc<ModeFlags>,
    report: CollisionReport,
    agents: Vec<JoinHandle<()>>,
    cancel: CancelToken,
    rng: StdRng,
    /// Bumped on every re-layout so car RNGs differ between epochs
    epoch: u64,
    ticks: u64,
}

impl SimWorld {
    /// Create a world with the standard four-approach layout
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let viewport = Viewport::new(config.viewport.width, config.viewport.height)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let initial = layout(viewport, &mut rng);
        Self::build(config, rng, initial.intersection, &initial.cars)
    }

    /// Create a world with explicit bodies, e.g. synthetic trajectories
    pub fn with_bodies(config: SimConfig, intersection: Body, cars: &[Body]) -> SimResult<Self> {
        Viewport::new(config.viewport.width, config.viewport.height)?;
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self::build(config, rng, intersection, cars)
    }

    fn build(config: SimConfig, rng: StdRng, intersection: Body, cars: &[Body]) -> SimResult<Self> {
        let modes = Arc::new(ModeFlags::new());
        let ctx = SimContext::new(
            config.viewport,
            intersection,
            cars,
            Arc::clone(&modes),
            config.throttle.clone(),
        )?;
        Ok(Self {
            config,
            ctx: Arc::new(ctx),
            modes,
            report: CollisionReport::new(),
            agents: Vec::new(),
            cancel: CancelToken::new(),
            rng,
            epoch: 0,
            ticks: 0,
        })
    }

    pub fn context(&self) -> &Arc<SimContext> {
        &self.ctx
    }

    pub fn modes(&self) -> &ModeFlags {
        &self.modes
    }

    pub fn report(&self) -> &CollisionReport {
        &self.report
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        !self.agents.is_empty()
    }

    fn car_seed(&self) -> Option<u64> {
        self.config
            .seed
            .map(|seed| seed.wrapping_add(self.epoch.wrapping_mul(0x1000_0000_01b3)))
    }

    /// Spawn one thread per car
    pub fn start(&mut self) -> SimResult<()> {
        if self.is_running() {
            return Err(SimError::AlreadyRunning);
        }
        self.cancel = CancelToken::new();
        let seed = self.car_seed();

        for index in 0..self.ctx.cars.len() {
            let id = AgentId(index);
            let mut car = match SimCar::new(
                id,
                Arc::clone(&self.ctx),
                car_rng(seed, id),
                self.cancel.clone(),
            ) {
                Ok(car) => car,
                Err(err) => {
                    self.stop();
                    return Err(err);
                }
            };
            let step_limit = self.config.step_limit;
            let spawned = thread::Builder::new()
                .name(format!("car-{index}"))
                .spawn(move || car.run(step_limit));

            match spawned {
                Ok(handle) => self.agents.push(handle),
                Err(source) => {
                    self.stop();
                    return Err(SimError::Spawn { agent: id, source });
                }
            }
        }

        info!(
            "Started {} cars in a {}x{} viewport",
            self.agents.len(),
            self.ctx.viewport.width,
            self.ctx.viewport.height
        );
        Ok(())
    }

    /// Signal every car to stop and wait for the threads to exit
    pub fn stop(&mut self) {
        if self.agents.is_empty() {
            return;
        }
        self.cancel.cancel();
        self.join_agents();
        info!("Stopped all cars");
    }

    /// Wait for step-limited cars to finish on their own
    pub fn wait_for_agents(&mut self) {
        self.join_agents();
    }

    fn join_agents(&mut self) {
        for handle in self.agents.drain(..) {
            if handle.join().is_err() {
                warn!("A car thread panicked");
            }
        }
    }

    /// Re-layout for a new viewport size.
    ///
    /// Cars are stopped first so no thread is writing while the bodies are
    /// replaced. An empty or oversized viewport is ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> SimResult<()> {
        let viewport = match Viewport::new(width, height) {
            Ok(viewport) => viewport,
            Err(err) => {
                warn!("Ignoring resize: {}", err);
                return Ok(());
            }
        };

        let was_running = self.is_running();
        self.stop();

        let fresh = layout(viewport, &mut self.rng);
        self.ctx = Arc::new(SimContext::new(
            viewport,
            fresh.intersection,
            &fresh.cars,
            Arc::clone(&self.modes),
            self.config.throttle.clone(),
        )?);
        self.config.viewport = viewport;
        self.epoch += 1;
        info!("Resized to {}x{}", width, height);

        if was_running {
            self.start()?;
        }
        Ok(())
    }

    /// Advance the control loop by one tick: a collision audit pass
    pub fn tick(&mut self) {
        let cars = self.ctx.snapshot_cars();
        let found = self.report.audit(&cars);
        if found > 0 {
            debug!(
                "Collision between {:?} (total {})",
                self.report.last_pair, self.report.count
            );
        }
        self.ticks += 1;
    }

    /// Apply an input command. Returns false when the command is Quit.
    pub fn handle_command(&mut self, command: Command) -> bool {
        let keep_running = self.modes.apply(command);
        debug!(
            "{:?}: show_collisions={}, slow_mode={}",
            command,
            self.modes.show_collisions(),
            self.modes.slow_mode()
        );
        keep_running
    }

    pub fn frame(&self) -> Frame {
        Frame {
            viewport: self.ctx.viewport,
            intersection: *self.ctx.intersection.body(),
            cars: self.ctx.snapshot_cars(),
            report: self.report.clone(),
            show_collisions: self.modes.show_collisions(),
            slow_mode: self.modes.slow_mode(),
        }
    }

    /// Human-readable state, one entry per line
    pub fn summary(&self) -> Vec<String> {
        let permit = self.ctx.intersection.permit();
        let mut lines = vec![
            format!("Ticks: {}", self.ticks),
            format!("Total collisions: {}", self.report.count),
            format!("Collision now: {}", self.report.flag),
            format!("Intersection acquisitions: {}", permit.acquisitions()),
            format!("Peak intersection holders: {}", permit.peak_holders()),
            format!(
                "Intersection held by: {}",
                self.ctx
                    .intersection
                    .occupied_by()
                    .map_or_else(|| "nobody".to_string(), |id| id.to_string())
            ),
        ];
        if let Some((a, b)) = self.report.last_pair {
            lines.push(format!("Last collision: {} and {}", a, b));
        }
        for (i, car) in self.ctx.snapshot_cars().iter().enumerate() {
            lines.push(format!(
                "  car {}: pos=({:.1}, {:.1}) vel=({:.4}, {:.4}) size={}x{}",
                i,
                car.position.x,
                car.position.y,
                car.velocity.x,
                car.velocity.y,
                car.width,
                car.height
            ));
        }
        lines
    }

    pub fn print_summary(&self) {
        for line in self.summary() {
            info!("{}", line);
        }
    }

    pub fn draw_map(&self) -> String {
        self.frame().draw_map()
    }
}

impl Drop for SimWorld {
    fn drop(&mut self) {
        self.stop();
    }
}
