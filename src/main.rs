//! holosnap - snap-to-geometry picking and a two-point ruler
//!
//! Headless driver: replays a scripted session against a scene and reports
//! the measurements taken.

mod config;
mod headless;
mod scene;
mod scripted_input;

use anyhow::Result;
use config::SnapConfig;
use headless::HeadlessConfig;
use scripted_input::ScriptedInputPlayer;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting holosnap v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        print_usage();
        return Ok(());
    }

    let snap = match cli.config.as_deref() {
        Some(path) => SnapConfig::load_from_path(path),
        None => SnapConfig::load(),
    };
    if let Some(path) = cli.save_config.as_deref() {
        snap.save_to_path(path)?;
        info!(path = %path.display(), "configuration saved");
    }

    let scene = match cli.scene.as_deref() {
        Some(path) => scene::load_scene(path)?,
        None => scene::default_scene(),
    };
    let script = match cli.script.as_deref() {
        Some(path) => ScriptedInputPlayer::from_path(path)?,
        None => ScriptedInputPlayer::demo(),
    };
    if cli.max_ticks == Some(0) {
        anyhow::bail!("--max-ticks must be at least 1");
    }

    info!(
        meshes = scene.len(),
        mode = %snap.mode,
        step = snap.step,
        "running session"
    );
    let report = headless::run(HeadlessConfig {
        snap,
        scene,
        script,
        events: cli.events,
        max_ticks: cli.max_ticks,
    })?;

    for segment in &report.measurements {
        info!(
            start = ?segment.start,
            end = ?segment.end,
            distance = %segment.label(),
            "measurement"
        );
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_usage() {
    println!(
        "Usage: holosnap [--config PATH] [--save-config PATH] [--scene PATH] \
         [--script PATH] [--events PATH] [--max-ticks N]"
    );
}

#[derive(Clone, Debug, Default)]
struct CliOptions {
    help: bool,
    config: Option<PathBuf>,
    save_config: Option<PathBuf>,
    scene: Option<PathBuf>,
    script: Option<PathBuf>,
    events: Option<PathBuf>,
    max_ticks: Option<u64>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--config" => opts.config = next_path(&mut args, "--config"),
                "--save-config" => opts.save_config = next_path(&mut args, "--save-config"),
                "--scene" => opts.scene = next_path(&mut args, "--scene"),
                "--script" => opts.script = next_path(&mut args, "--script"),
                "--events" => opts.events = next_path(&mut args, "--events"),
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                other => tracing::warn!(arg = %other, "Ignoring unknown argument"),
            }
        }

        opts
    }
}

fn next_path<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Option<PathBuf> {
    let path = args.next().map(PathBuf::from);
    if path.is_none() {
        tracing::error!("{flag} requires a file path");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_paths_and_limits() {
        let opts = parse(&[
            "--scene",
            "room.json",
            "--script",
            "walk.json",
            "--events",
            "out/events.jsonl",
            "--max-ticks",
            "40",
        ]);
        assert_eq!(opts.scene, Some(PathBuf::from("room.json")));
        assert_eq!(opts.script, Some(PathBuf::from("walk.json")));
        assert_eq!(opts.events, Some(PathBuf::from("out/events.jsonl")));
        assert_eq!(opts.max_ticks, Some(40));
        assert!(opts.config.is_none());
    }

    #[test]
    fn bad_values_are_dropped() {
        let opts = parse(&["--max-ticks", "soon", "--bogus", "--config"]);
        assert_eq!(opts.max_ticks, None);
        assert!(opts.config.is_none());
        assert!(!opts.help);
    }
}
