//! Delve cave generator
//!
//! Generates one cave into an in-memory stone world and prints a summary of
//! what was carved.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p delve-cli -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--style <PATH>`: Cave style TOML file (default: built-in style)
//! - `--seed <N>`: Generation seed (default: 42)
//! - `--length <N>`: Rooms on the main path (default: 24)
//! - `--radius <N>`: Base centroid radius (default: 5)
//! - `--start <X,Y,Z>`: Cave entrance (default: 0,64,0)
//! - `--cave <SYMBOLS>`: Explicit room symbols instead of a random layout
//! - `--print-style`: Print the resolved style as TOML and exit
//! - `-h, --help`: Print help message
//!
//! ## Examples
//!
//! ```bash
//! # Random cave from the built-in style
//! cargo run -p delve-cli
//!
//! # Fixed room sequence
//! cargo run -p delve-cli -- --cave sttvcsbsr --seed 7
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use std::path::PathBuf;

use anyhow::{bail, Context};
use delve_gen::{CaveGenerator, CaveRequest, CaveStyle};
use delve_world::VoxelWorld;
use glam::DVec3;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Options parsed from the command line.
#[derive(Debug, Clone)]
struct CliArgs {
    style: Option<PathBuf>,
    seed: u64,
    print_style: bool,
    request: CaveRequest,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            style: None,
            seed: 42,
            print_style: false,
            request: CaveRequest::default(),
        }
    }
}

impl CliArgs {
    fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter().skip(1);

        while let Some(arg) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("{arg} expects a value"))
            };
            match arg.as_str() {
                "--style" => parsed.style = Some(PathBuf::from(value()?)),
                "--seed" => parsed.seed = parse_number(&arg, &value()?)?,
                "--length" => parsed.request.length = parse_number(&arg, &value()?)?,
                "--radius" => parsed.request.radius = parse_number(&arg, &value()?)?,
                "--start" => parsed.request.start = parse_vec3(&value()?)?,
                "--cave" => parsed.request.description = Some(value()?),
                "--print-style" => parsed.print_style = true,
                other => bail!("unknown option {other:?}, see --help"),
            }
        }

        Ok(parsed)
    }
}

fn parse_number<T>(flag: &str, value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid value {value:?} for {flag}"))
}

fn parse_vec3(value: &str) -> anyhow::Result<DVec3> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid coordinates {value:?}"))?;
    match parts[..] {
        [x, y, z] => Ok(DVec3::new(x, y, z)),
        _ => bail!("expected X,Y,Z but got {value:?}"),
    }
}

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::from_args(std::env::args())?;
    let style = match &args.style {
        Some(path) => CaveStyle::from_path(path)
            .with_context(|| format!("failed to load style {}", path.display()))?,
        None => CaveStyle::builtin()?,
    };

    if args.print_style {
        print!("{}", style.to_toml_string()?);
        return Ok(());
    }

    let generator = CaveGenerator::new(style);
    let mut world = VoxelWorld::stone();
    let report = generator.generate(&mut world, args.seed, &args.request)?;
    info!(chunks = world.len(), "Done");

    println!("description:  {}", report.description);
    println!("rooms:        {}", report.room_starts.len());
    println!("centroids:    {}", report.centroids.len());
    println!("carved:       {}", report.blocks_carved);
    println!("ores placed:  {}", report.ores_placed);
    println!(
        "end:          ({:.1}, {:.1}, {:.1}) heading ({:.2}, {:.2}, {:.2})",
        report.end.location.x,
        report.end.location.y,
        report.end.location.z,
        report.end.direction.x,
        report.end.direction.y,
        report.end.direction.z,
    );
    if let Some(bounds) = world.bounds() {
        let (w, h, d) = bounds.size();
        println!(
            "bounds:       ({}, {}, {}) .. ({}, {}, {}), {w}x{h}x{d}",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z,
        );
    }
    println!(
        "chunks:       {} ({} KiB)",
        world.len(),
        world.memory_usage() / 1024
    );

    Ok(())
}

fn print_help() {
    eprintln!(
        "Delve cave generator

USAGE:
    cargo run -p delve-cli -- [OPTIONS]

OPTIONS:
    --style <PATH>          Cave style TOML file (default: built-in style)
    --seed <N>              Generation seed (default: 42)
    --length <N>            Rooms on the main path (default: 24)
    --radius <N>            Base centroid radius (default: 5)
    --start <X,Y,Z>         Cave entrance (default: 0,64,0)
    --cave <SYMBOLS>        Explicit room symbols instead of a random layout
    --print-style           Print the resolved style as TOML and exit
    -h, --help              Print this help message

EXAMPLES:
    # Random cave from the built-in style
    cargo run -p delve-cli

    # Fixed room sequence
    cargo run -p delve-cli -- --cave sttvcsbsr --seed 7

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("delve")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_without_options() {
        let parsed = CliArgs::from_args(args(&[])).unwrap();
        assert_eq!(parsed.seed, 42);
        assert!(parsed.style.is_none());
        assert_eq!(parsed.request, CaveRequest::default());
    }

    #[test]
    fn parses_every_option() {
        let parsed = CliArgs::from_args(args(&[
            "--seed", "7", "--length", "12", "--radius", "3", "--start", "1, 80,-2", "--cave",
            "stv", "--style", "caves.toml", "--print-style",
        ]))
        .unwrap();
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.request.length, 12);
        assert_eq!(parsed.request.radius, 3);
        assert_eq!(parsed.request.start, DVec3::new(1.0, 80.0, -2.0));
        assert_eq!(parsed.request.description.as_deref(), Some("stv"));
        assert_eq!(parsed.style, Some(PathBuf::from("caves.toml")));
        assert!(parsed.print_style);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(CliArgs::from_args(args(&["--seed", "x"])).is_err());
        assert!(CliArgs::from_args(args(&["--seed"])).is_err());
        assert!(CliArgs::from_args(args(&["--start", "1,2"])).is_err());
        assert!(CliArgs::from_args(args(&["--bogus"])).is_err());
    }
}
