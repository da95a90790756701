mod commands;
mod util;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use touchsynth_runtime::GestureSettings;
use tracing_subscriber::EnvFilter;

use crate::commands::gesture::{self, GestureCommand, OutputFormat};
use crate::util::{CliResult, parse_millis};

#[derive(Parser)]
#[command(name = "touchsynth", version, about = "Synthesize touch gestures and print their samples")]
pub struct Cli {
    /// Sampling period in milliseconds.
    #[arg(long = "period", global = true, value_parser = parse_millis)]
    period: Option<Duration>,
    /// JSON file with gesture settings.
    #[arg(long = "settings", global = true)]
    settings: Option<PathBuf>,
    #[arg(long = "format", global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: GestureCommand,
}

pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = execute(&cli)?;
    println!("{output}");
    Ok(())
}

fn execute(cli: &Cli) -> CliResult<String> {
    let settings = load_settings(cli.settings.as_deref(), cli.period)?;
    let runtime = gesture::capture_runtime(settings)?;
    let samples = gesture::run(&runtime, &cli.command)?;
    gesture::render(&samples, cli.format)
}

fn load_settings(path: Option<&Path>, period: Option<Duration>) -> CliResult<GestureSettings> {
    let mut settings = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => GestureSettings::default(),
    };
    if let Some(period) = period {
        settings.sampling_period = period;
    }
    tracing::debug!(?settings, "gesture settings loaded");
    Ok(settings)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("touchsynth").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[rstest]
    #[serial]
    fn json_swipe_end_to_end() {
        let cli = parse(&[
            "--format", "json", "swipe", "--bounds", "0,0,100,100", "--from", "5,7", "--to",
            "23,29", "--duration", "50",
        ]);
        let output = execute(&cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let samples = value.as_array().unwrap();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[5]["phase"], "up");
        assert_eq!(samples[5]["t_ms"], 50.0);
        assert_eq!(samples[5]["x"], 23.0);
    }

    #[rstest]
    #[serial]
    fn period_flag_changes_sample_count() {
        let cli = parse(&[
            "swipe", "--bounds", "0,0,100,100", "--from", "0,0", "--to", "50,0", "--duration",
            "100", "--period", "25",
        ]);
        let output = execute(&cli).unwrap();
        assert_eq!(output.lines().count(), 5);
    }

    #[rstest]
    #[serial]
    fn settings_file_is_applied() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "swipe_duration": 80, "sampling_period": 20 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let cli = parse(&["--settings", &path, "swipe-edge", "--bounds", "0,0,300,300", "left"]);
        let output = execute(&cli).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[4].contains("80.000 ms"));
    }

    #[rstest]
    fn unreadable_settings_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_settings(Some(&missing), None).unwrap_err();
        assert!(err.to_string().contains("failed to read settings file"));
    }

    #[rstest]
    fn invalid_settings_fail_before_any_gesture() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "edge_fuzz_factor": 0.9 }}"#).unwrap();
        let settings = load_settings(Some(file.path()), None).unwrap();
        assert!(gesture::capture_runtime(settings).is_err());
    }

    #[rstest]
    fn negative_velocity_parses() {
        let cli = parse(&[
            "swipe-velocity", "--bounds", "0,0,10,10", "--from", "0,0", "--to", "5,5",
            "--velocity", "-3",
        ]);
        assert!(matches!(cli.command, GestureCommand::SwipeVelocity(ref args) if args.velocity == -3.0));
    }
}
