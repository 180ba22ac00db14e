use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "strahl")]
#[command(about = "Offline CPU path tracer for rectangle and box scenes")]
pub struct Args {
    /// Built-in scene to render
    #[arg(long, default_value = "boxes", conflicts_with = "scene_file")]
    pub scene: String,

    /// JSON scene description to render instead of a built-in scene
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Output path (.ppm or .png); "-" writes PPM to stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub depth: Option<u32>,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Base seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// True when the image goes to stdout.
    pub fn to_stdout(&self) -> bool {
        self.output == "-"
    }
}
