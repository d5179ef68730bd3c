//! Swing CLI
//!
//! Assemble clocks and pendulums, drive them through the frame scheduler
//! and print their state.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use swing_animation::{
    AnimationScheduler, Clock, ClockConfig, ClockId, Pendulum, PendulumConfig, PendulumId,
};
use swing_core::{Segment, Shape, Vec2};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{ClockEntry, PendulumEntry, RunConfig, SceneConfig};

#[derive(Parser)]
#[command(name = "swing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless clock and pendulum animation runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Simulation frame rate
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Seconds to simulate
    #[arg(short, long, default_value = "5")]
    duration: f64,

    /// Print state every N frames
    #[arg(long, default_value = "30")]
    sample_every: u32,

    /// Pace frames against the wall clock
    #[arg(long)]
    realtime: bool,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        RunConfig {
            fps: args.fps.max(1),
            duration: args.duration,
            sample_every: args.sample_every,
            realtime: args.realtime,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single clock
    Clock {
        /// Revolutions per second
        #[arg(short, long, default_value = "1")]
        speed: f64,

        /// Jump to this time before starting
        #[arg(long)]
        time: Option<f64>,

        /// Ease to this time over one second instead of running
        #[arg(long, conflicts_with = "speed")]
        animate_to: Option<f64>,

        /// Face radius
        #[arg(long, default_value = "0.7")]
        radius: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run a single pendulum
    Pendulum {
        /// Initial angle from vertical, radians
        #[arg(short, long, default_value_t = std::f64::consts::FRAC_PI_6)]
        angle: f64,

        /// Rod length
        #[arg(short, long, default_value = "3")]
        rod_length: f64,

        /// Initial angular velocity, radians per second
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        velocity: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run a scene described by a TOML file
    Scene {
        /// Scene file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Clock {
            speed,
            time,
            animate_to,
            radius,
            run,
        } => {
            let entry = ClockEntry {
                config: ClockConfig {
                    radius,
                    ..ClockConfig::default()
                },
                offset: [0.0, 0.0],
                speed: animate_to.is_none().then_some(speed),
                time,
                animate_to,
            };
            cmd_scene(SceneConfig {
                run: run.into(),
                clocks: vec![entry],
                pendulums: Vec::new(),
            })
        }

        Commands::Pendulum {
            angle,
            rod_length,
            velocity,
            run,
        } => {
            let entry = PendulumEntry {
                config: PendulumConfig::default()
                    .with_angle(angle)
                    .with_rod_length(rod_length),
                offset: [0.0, 0.0],
                initial_velocity: Some(velocity),
            };
            cmd_scene(SceneConfig {
                run: run.into(),
                clocks: Vec::new(),
                pendulums: vec![entry],
            })
        }

        Commands::Scene { path } => {
            let scene = SceneConfig::load(&path)?;
            info!("Loaded scene from {}", path.display());
            cmd_scene(scene)
        }
    }
}

/// Scheduler populated from a scene, with ids in declaration order
struct Stage {
    scheduler: AnimationScheduler,
    clocks: Vec<ClockId>,
    pendulums: Vec<PendulumId>,
}

fn build_stage(scene: &SceneConfig) -> Result<Stage> {
    let mut scheduler = AnimationScheduler::new();
    let mut clocks = Vec::with_capacity(scene.clocks.len());
    let mut pendulums = Vec::with_capacity(scene.pendulums.len());

    for (index, entry) in scene.clocks.iter().enumerate() {
        let mut clock = Clock::new(entry.config.clone())
            .with_context(|| format!("Invalid clock #{index}"))?;
        clock.move_to(Vec2::new(entry.offset[0], entry.offset[1]));
        if let Some(time) = entry.time {
            clock.set_time(time);
        }
        if let Some(speed) = entry.speed {
            clock.start(speed);
        }
        let clip = entry.animate_to.map(|t| clock.set_time_for_animations(t));

        let id = scheduler.add_clock(clock);
        if let Some(clip) = clip {
            scheduler.play(id, clip);
        }
        clocks.push(id);
    }

    for (index, entry) in scene.pendulums.iter().enumerate() {
        let mut pendulum = Pendulum::new(entry.config.clone())
            .with_context(|| format!("Invalid pendulum #{index}"))?;
        pendulum.move_to(Vec2::new(entry.offset[0], entry.offset[1]));
        if let Some(velocity) = entry.initial_velocity {
            pendulum.start_bouncing(velocity);
        }
        pendulums.push(scheduler.add_pendulum(pendulum));
    }

    Ok(Stage {
        scheduler,
        clocks,
        pendulums,
    })
}

fn cmd_scene(scene: SceneConfig) -> Result<()> {
    let mut stage = build_stage(&scene)?;
    let run = &scene.run;
    let frames = run.frame_count();
    let dt = 1.0 / f64::from(run.fps);
    let frame_interval = Duration::from_secs_f64(dt);

    info!(
        "Running {} clock(s) and {} pendulum(s) for {} frames at {} fps",
        stage.clocks.len(),
        stage.pendulums.len(),
        frames,
        run.fps
    );

    print_sample(&stage, 0.0);
    if run.realtime {
        stage.scheduler.reset_clock();
    }

    let started = Instant::now();
    for frame in 1..=frames {
        if run.realtime {
            std::thread::sleep(frame_interval);
            stage.scheduler.tick();
        } else {
            stage.scheduler.tick_with(dt);
        }

        if run.sample_every > 0 && frame % u64::from(run.sample_every) == 0 {
            print_sample(&stage, frame as f64 * dt);
        }
    }

    debug!(elapsed = ?started.elapsed(), "run complete");
    if stage.scheduler.has_active_animations() {
        info!("Stopped with animations still running");
    }
    Ok(())
}

fn print_sample(stage: &Stage, t: f64) {
    let scheduler = &stage.scheduler;

    for (index, id) in stage.clocks.iter().enumerate() {
        if let Some(clock) = scheduler.clock(*id) {
            let tip = clock.hand().end();
            println!(
                "t={t:7.3}  clock[{index}]     time={:9.4}  hand=({:7.3}, {:7.3}){}",
                clock.time(),
                tip.x,
                tip.y,
                if clock.is_running() { "" } else { "  paused" },
            );
        }
    }

    for (index, id) in stage.pendulums.iter().enumerate() {
        if let Some(pendulum) = scheduler.pendulum(*id) {
            let bob = pendulum.mass().center();
            let label = pendulum
                .label()
                .map(|l| {
                    let p = l.center();
                    format!("({:6.3}, {:6.3})", p.x, p.y)
                })
                .unwrap_or_else(|| "-".to_string());
            println!(
                "t={t:7.3}  pendulum[{index}]  θ={:8.4}  ω={:8.4}  E={:9.6}  bob=({:6.3}, {:6.3})  label={label}{}",
                pendulum.angle(),
                pendulum.angular_velocity(),
                pendulum.energy(),
                bob.x,
                bob.y,
                if pendulum.angle_arc().is_some() { "" } else { "  (no arc)" },
            );
        }
    }
}
