use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use intersection_sim::simulation::{Command, SimConfig, SimWorld, Viewport, WorkThrottle};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Cars sharing one intersection under a semaphore, with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of control ticks to run in headless mode
    #[arg(long, default_value = "2500")]
    ticks: u64,

    /// Milliseconds between control ticks
    #[arg(long, default_value = "4")]
    tick_ms: u64,

    /// Viewport width
    #[arg(long, default_value = "400")]
    width: u32,

    /// Viewport height
    #[arg(long, default_value = "400")]
    height: u32,

    /// Seed for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// Start with slow mode on
    #[arg(long)]
    slow: bool,

    /// Start with collision markers on
    #[arg(long)]
    show_collisions: bool,

    /// Key presses to apply before starting, e.g. `--key c --key s`
    #[arg(long = "key")]
    keys: Vec<String>,

    /// Skip the busy-work that paces the cars
    #[arg(long)]
    no_throttle: bool,

    /// Log a summary and map every N ticks in headless mode (0 = never)
    #[arg(long, default_value = "250")]
    report_every: u64,
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            viewport: Viewport {
                width: self.width,
                height: self.height,
            },
            seed: self.seed,
            throttle: if self.no_throttle {
                WorkThrottle::disabled()
            } else {
                WorkThrottle::default()
            },
            step_limit: None,
            tick_interval: Duration::from_millis(self.tick_ms),
        }
    }

    fn startup_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.slow {
            commands.push(Command::ToggleSlowMode);
        }
        if self.show_collisions {
            commands.push(Command::ToggleShowCollisions);
        }
        for key in &self.keys {
            match Command::from_key(key) {
                Some(command) => commands.push(command),
                None => warn!("Ignoring unknown key {:?}", key),
            }
        }
        commands
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        return run_with_ui(&cli);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,intersection_sim=info"),
    )
    .init();
    run_headless(&cli)
}

#[cfg(not(feature = "ui"))]
fn run_with_ui(_cli: &Cli) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let config = cli.config();
    let interval = config.tick_interval;
    info!("Running intersection simulation in headless mode...");
    info!("Ticks: {}, tick interval: {:?}", cli.ticks, interval);

    let mut world = SimWorld::new(config).context("Failed to set up the simulation")?;
    for command in cli.startup_commands() {
        if !world.handle_command(command) {
            info!("Quit requested before start");
            return Ok(());
        }
    }

    info!("Initial state:");
    world.print_summary();
    info!("\n{}", world.draw_map());

    world.start().context("Failed to start car threads")?;

    for tick in 1..=cli.ticks {
        world.tick();

        if cli.report_every > 0 && tick % cli.report_every == 0 && tick < cli.ticks {
            info!("--- After tick {} ---", tick);
            world.print_summary();
            info!("\n{}", world.draw_map());
        }

        std::thread::sleep(interval);
    }

    world.stop();

    info!("=== SIMULATION COMPLETE ===");
    world.print_summary();
    info!("\n{}", world.draw_map());
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use intersection_sim::ui;

    println!("Starting Intersection Sim UI...");
    println!();
    println!("Controls:");
    println!("  C    - Show collisions");
    println!("  S    - Slow mode");
    println!("  ESC  - Exit");
    println!();

    let config = cli.config();
    let tick_hz = 1.0 / config.tick_interval.as_secs_f64().max(0.001);
    let (width, height) = (config.viewport.width, config.viewport.height);

    let mut world = SimWorld::new(config).context("Failed to set up the simulation")?;
    for command in cli.startup_commands() {
        world.handle_command(command);
    }
    world.start().context("Failed to start car threads")?;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,intersection_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: format!("Intersection Sim {width}x{height}"),
                        resolution: (width, height).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(Time::<Fixed>::from_hz(tick_hz))
        .insert_resource(ui::SimWorldResource(world))
        .add_plugins(ui::IntersectionSimUIPlugin)
        .run();

    Ok(())
}
