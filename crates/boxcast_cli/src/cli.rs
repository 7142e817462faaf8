use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

/// Fly a camera through a textured box room and write color and depth frames.
#[derive(Debug, Parser)]
#[command(name = "boxcast")]
#[command(about = "Brute-force triangle ray caster")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "320")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "240")]
    pub height: u32,

    /// Pinhole focal length in pixels
    #[arg(long, short = 'f', default_value = "200")]
    pub focal: f32,

    /// Supersampling grid size (n x n samples per pixel)
    #[arg(long, short = 's', default_value = "2")]
    pub samples: u32,

    /// Use this many random sub-pixel samples instead of a regular grid
    #[arg(long)]
    pub random_samples: Option<usize>,

    /// Seed for random sub-pixel samples
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Number of frames to render
    #[arg(long, short = 'n', default_value = "1")]
    pub frames: usize,

    /// Distance the camera moves forward between frames
    #[arg(long, default_value = "10")]
    pub step: f32,

    /// Directory for the output images
    #[arg(long, short = 'o', default_value = "frames")]
    pub output: PathBuf,

    /// Image file to use as the floor texture instead of a checkerboard
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// JSON file with render settings
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["boxcast"]).unwrap();

        assert_eq!(args.width, 320);
        assert_eq!(args.height, 240);
        assert_eq!(args.samples, 2);
        assert_eq!(args.frames, 1);
        assert_eq!(args.random_samples, None);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "boxcast",
            "--width",
            "64",
            "-n",
            "5",
            "--step",
            "2.5",
            "--log-level",
            "debug",
            "-o",
            "out",
        ])
        .unwrap();

        assert_eq!(args.width, 64);
        assert_eq!(args.frames, 5);
        assert_eq!(args.step, 2.5);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
        assert_eq!(args.output, PathBuf::from("out"));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Args::try_parse_from(["boxcast", "--log-level", "loud"]).is_err());
    }
}
