use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use glam::Vec3;
use motion_trace_core::{
    AudioSink, LifecycleSignal, MotionSession, MotionTraceError, PoseReading, Sample,
    SessionConfig, CSV_HEADER,
};
use tracing_subscriber::EnvFilter;

fn main() -> motion_trace_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            output,
            duration,
            rate,
            mute,
        } => run_simulation(config.as_deref(), output, duration, rate, mute),
        Commands::Inspect { input } => run_inspect(&input),
    }
}

/// Drives a full session with a scripted pose source: a circular sweep
/// whose radius grows over the run, with a tracking dropout through the
/// middle fifth. Stands in for the host driver loop during development.
fn run_simulation(
    config_path: Option<&Path>,
    output: Option<PathBuf>,
    duration: f32,
    rate: f32,
    mute: bool,
) -> motion_trace_core::Result<()> {
    if duration <= 0.0 || rate <= 0.0 {
        return Err(MotionTraceError::InvalidInput(
            "duration and rate must be positive",
        ));
    }

    let mut config = match config_path {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(output) = output {
        config.output_path = output;
    }

    tracing::info!(duration, rate, "starting simulated session");

    let sink: Option<Box<dyn AudioSink>> = if mute {
        None
    } else {
        Some(Box::new(LogSink::default()))
    };
    let mut session = MotionSession::new(config, sink)?;

    let ticks = (duration * rate).ceil() as u32;
    for tick in 1..=ticks {
        let now = tick as f32 / rate;
        let reading = scripted_reading(now, duration);
        session.tick(now, reading.as_ref());
    }

    session.handle_signal(LifecycleSignal::Quit);
    tracing::info!(
        samples = session.buffer().len(),
        path = %session.config().output_path.display(),
        "simulation finished"
    );
    Ok(())
}

/// Reads a previously flushed log back and prints summary statistics.
fn run_inspect(input: &Path) -> motion_trace_core::Result<()> {
    let contents = std::fs::read_to_string(input)?;
    let mut lines = contents.lines();

    match lines.next() {
        Some(header) if header == CSV_HEADER => {}
        _ => {
            return Err(MotionTraceError::msg(format!(
                "{} is not a movement log: header mismatch",
                input.display()
            )))
        }
    }

    let mut samples = Vec::new();
    for line in lines {
        samples.push(Sample::parse_csv_row(line)?);
    }

    if samples.is_empty() {
        println!("{}: empty log", input.display());
        return Ok(());
    }

    let first = samples.first().map(|s| s.timestamp).unwrap_or(0.0);
    let last = samples.last().map(|s| s.timestamp).unwrap_or(0.0);
    let peak = samples
        .iter()
        .map(|s| s.velocity_magnitude)
        .fold(0.0_f32, f32::max);
    let mean = samples.iter().map(|s| s.velocity_magnitude).sum::<f32>() / samples.len() as f32;

    println!("{}", input.display());
    println!("  samples:    {}", samples.len());
    println!("  time span:  {first:.3} s .. {last:.3} s");
    println!("  peak speed: {peak:.3} m/s");
    println!("  mean speed: {mean:.3} m/s");
    Ok(())
}

/// Synthetic pose source used by the simulate command.
fn scripted_reading(now: f32, duration: f32) -> Option<PoseReading> {
    // Tracking drops out for the middle fifth of the run, exercising
    // the zeroed-velocity path.
    let tracked = !(now >= duration * 0.4 && now < duration * 0.6);

    let angular_speed = 1.5;
    let radius = 2.0 * (now / duration);
    let angle = angular_speed * now;

    Some(PoseReading {
        is_valid: tracked,
        is_active: tracked,
        position: Vec3::new(radius * angle.cos(), 1.6, radius * angle.sin()),
        linear_velocity: Vec3::new(
            -radius * angular_speed * angle.sin(),
            0.0,
            radius * angular_speed * angle.cos(),
        ),
        angular_velocity: Vec3::new(0.0, angular_speed, 0.0),
    })
}

/// Audio sink that narrates playback decisions through tracing instead
/// of producing sound.
#[derive(Debug, Default)]
struct LogSink {
    playing: bool,
}

impl AudioSink for LogSink {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self, volume: f32) {
        self.playing = true;
        tracing::debug!(volume, "feedback started");
    }

    fn set_volume(&mut self, volume: f32) {
        tracing::trace!(volume, "feedback volume updated");
    }

    fn stop(&mut self) {
        self.playing = false;
        tracing::debug!("feedback stopped");
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Motion tracking session logger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scripted tracking session and flush the resulting log.
    Simulate {
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output path for the log, overriding the configuration.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Session length in seconds.
        #[arg(short, long, default_value_t = 10.0)]
        duration: f32,
        /// Tick rate in Hz.
        #[arg(short, long, default_value_t = 90.0)]
        rate: f32,
        /// Disable the audio feedback sink.
        #[arg(long)]
        mute: bool,
    },
    /// Summarise a previously written movement log.
    Inspect {
        /// Path to the CSV log file.
        input: PathBuf,
    },
}
