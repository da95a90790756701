use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use touchsynth_core::platform::{PlatformError, TouchSample, TouchSink};
use touchsynth_core::types::{Point, Rect};
use touchsynth_core::ui::GestureTarget;
use touchsynth_runtime::{GestureSettings, Runtime, SwipeDirection};

use crate::util::{CliResult, parse_millis, parse_point, parse_rect};

#[derive(Subcommand)]
pub enum GestureCommand {
    /// Press and release at one point.
    Click(ClickArgs),
    /// Straight swipe at constant speed.
    Swipe(SwipeArgs),
    /// Swipe released with the given velocity.
    SwipeVelocity(SwipeVelocityArgs),
    /// Swipe across the target from one edge towards the opposite one.
    SwipeEdge(SwipeEdgeArgs),
}

#[derive(Args)]
pub struct TargetArgs {
    /// Target bounds as `x,y,width,height` in global coordinates.
    #[arg(long = "bounds", value_parser = parse_rect, allow_hyphen_values = true)]
    pub bounds: Option<Rect>,
    #[arg(long = "name", default_value = "cli-target")]
    pub name: String,
}

#[derive(Args)]
pub struct ClickArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Position relative to the target; defaults to its center.
    #[arg(long = "at", value_parser = parse_point, allow_hyphen_values = true)]
    pub at: Option<Point>,
}

#[derive(Args)]
pub struct SwipeArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long = "from", value_parser = parse_point, allow_hyphen_values = true)]
    pub from: Point,
    #[arg(long = "to", value_parser = parse_point, allow_hyphen_values = true)]
    pub to: Point,
    #[arg(long = "duration", value_parser = parse_millis)]
    pub duration: Option<Duration>,
}

#[derive(Args)]
pub struct SwipeVelocityArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long = "from", value_parser = parse_point, allow_hyphen_values = true)]
    pub from: Point,
    #[arg(long = "to", value_parser = parse_point, allow_hyphen_values = true)]
    pub to: Point,
    /// Release velocity in px/s.
    #[arg(long = "velocity", allow_hyphen_values = true)]
    pub velocity: f64,
    #[arg(long = "duration", value_parser = parse_millis)]
    pub duration: Option<Duration>,
}

#[derive(Args)]
pub struct SwipeEdgeArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(value_enum)]
    pub direction: EdgeKind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EdgeKind {
    Up,
    Down,
    Left,
    Right,
}

impl From<EdgeKind> for SwipeDirection {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Up => SwipeDirection::Up,
            EdgeKind::Down => SwipeDirection::Down,
            EdgeKind::Left => SwipeDirection::Left,
            EdgeKind::Right => SwipeDirection::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Rectangle taken from the command line.
struct CliTarget<'a> {
    name: &'a str,
    bounds: Option<Rect>,
}

impl<'a> CliTarget<'a> {
    fn from_args(args: &'a TargetArgs) -> Self {
        Self { name: &args.name, bounds: args.bounds }
    }
}

impl GestureTarget for CliTarget<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

/// Keeps the last gesture instead of replaying it.
struct CaptureSink {
    samples: Mutex<Vec<TouchSample>>,
}

impl CaptureSink {
    const fn new() -> Self {
        Self { samples: Mutex::new(Vec::new()) }
    }

    fn take(&self) -> Vec<TouchSample> {
        std::mem::take(&mut *self.samples.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl TouchSink for CaptureSink {
    fn accept(&self, samples: &[TouchSample]) -> Result<(), PlatformError> {
        *self.samples.lock().unwrap_or_else(PoisonError::into_inner) = samples.to_vec();
        Ok(())
    }
}

static CAPTURE_SINK: CaptureSink = CaptureSink::new();

/// Runtime whose gestures are captured for printing.
pub fn capture_runtime(settings: GestureSettings) -> CliResult<Runtime> {
    Ok(Runtime::with_sink(&CAPTURE_SINK, settings)?)
}

/// Performs `command` and returns the samples the gesture produced.
pub fn run(runtime: &Runtime, command: &GestureCommand) -> CliResult<Vec<TouchSample>> {
    CAPTURE_SINK.take();
    match command {
        GestureCommand::Click(args) => {
            let target = CliTarget::from_args(&args.target);
            runtime.gestures(&target)?.click(args.at)?;
        }
        GestureCommand::Swipe(args) => {
            let target = CliTarget::from_args(&args.target);
            runtime.gestures(&target)?.swipe(args.from, args.to, args.duration)?;
        }
        GestureCommand::SwipeVelocity(args) => {
            let target = CliTarget::from_args(&args.target);
            runtime.gestures(&target)?.swipe_with_velocity(
                args.from,
                args.to,
                args.velocity,
                args.duration,
            )?;
        }
        GestureCommand::SwipeEdge(args) => {
            let target = CliTarget::from_args(&args.target);
            runtime.gestures(&target)?.swipe_edge(args.direction.into())?;
        }
    }
    Ok(CAPTURE_SINK.take())
}

#[derive(Serialize)]
struct SampleRecord {
    phase: &'static str,
    t_ms: f64,
    x: f64,
    y: f64,
}

impl From<&TouchSample> for SampleRecord {
    fn from(sample: &TouchSample) -> Self {
        Self {
            phase: sample.phase.as_str(),
            t_ms: sample.timestamp.as_secs_f64() * 1000.0,
            x: sample.position.x(),
            y: sample.position.y(),
        }
    }
}

pub fn render(samples: &[TouchSample], format: OutputFormat) -> CliResult<String> {
    let records: Vec<SampleRecord> = samples.iter().map(SampleRecord::from).collect();
    match format {
        OutputFormat::Text => Ok(records
            .iter()
            .map(|r| format!("{:<4} {:>9.3} ms  ({:.3}, {:.3})", r.phase, r.t_ms, r.x, r.y))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serial_test::serial;
    use touchsynth_core::platform::TouchPhase;

    #[fixture]
    fn runtime() -> Runtime {
        capture_runtime(GestureSettings::default()).expect("runtime")
    }

    fn target(bounds: Option<Rect>) -> TargetArgs {
        TargetArgs { bounds, name: "cli-target".into() }
    }

    #[rstest]
    #[serial]
    fn click_defaults_to_center(runtime: Runtime) {
        let command = GestureCommand::Click(ClickArgs {
            target: target(Some(Rect::new(10.0, 10.0, 100.0, 50.0))),
            at: None,
        });
        let samples = run(&runtime, &command).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|s| s.position == Point::new(60.0, 35.0)));
    }

    #[rstest]
    #[serial]
    fn swipe_reports_every_sample(runtime: Runtime) {
        let command = GestureCommand::Swipe(SwipeArgs {
            target: target(Some(Rect::new(0.0, 0.0, 100.0, 100.0))),
            from: Point::new(5.0, 7.0),
            to: Point::new(23.0, 29.0),
            duration: Some(Duration::from_millis(50)),
        });
        let samples = run(&runtime, &command).unwrap();
        let phases: Vec<_> = samples.iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![
                TouchPhase::Down,
                TouchPhase::Move,
                TouchPhase::Move,
                TouchPhase::Move,
                TouchPhase::Move,
                TouchPhase::Up
            ]
        );
    }

    #[rstest]
    #[serial]
    fn missing_bounds_surface_as_error(runtime: Runtime) {
        let command = GestureCommand::SwipeEdge(SwipeEdgeArgs {
            target: target(None),
            direction: EdgeKind::Left,
        });
        let err = run(&runtime, &command).unwrap_err();
        assert!(err.to_string().contains("cli-target"), "{err}");
    }

    #[rstest]
    #[serial]
    fn negative_velocity_is_a_precondition_failure(runtime: Runtime) {
        let command = GestureCommand::SwipeVelocity(SwipeVelocityArgs {
            target: target(Some(Rect::new(0.0, 0.0, 100.0, 100.0))),
            from: Point::new(0.0, 0.0),
            to: Point::new(50.0, 0.0),
            velocity: -10.0,
            duration: None,
        });
        let err = run(&runtime, &command).unwrap_err();
        assert!(err.to_string().contains("invalid gesture parameters"), "{err}");
    }

    #[rstest]
    #[serial]
    fn edge_swipe_starts_inside_target(runtime: Runtime) {
        let command = GestureCommand::SwipeEdge(SwipeEdgeArgs {
            target: target(Some(Rect::new(0.0, 0.0, 200.0, 400.0))),
            direction: EdgeKind::Up,
        });
        let samples = run(&runtime, &command).unwrap();
        let first = samples.first().unwrap().position;
        let last = samples.last().unwrap().position;
        assert_eq!(first.x(), 100.0);
        assert!(first.y() > last.y());
        assert!(first.y() < 400.0 && last.y() > 0.0);
    }

    #[rstest]
    fn text_output_has_one_line_per_sample() {
        let samples = [
            TouchSample::down(Point::new(1.0, 2.0)),
            TouchSample::up(Point::new(3.0, 4.0), Duration::from_millis(10)),
        ];
        let text = render(&samples, OutputFormat::Text).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("down"));
        assert!(lines[1].contains("10.000 ms"));
        assert!(lines[1].contains("(3.000, 4.000)"));
    }

    #[rstest]
    fn json_output_is_an_array_of_samples() {
        let samples = [TouchSample::down(Point::new(1.5, 2.5))];
        let json = render(&samples, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["phase"], "down");
        assert_eq!(value[0]["t_ms"], 0.0);
        assert_eq!(value[0]["x"], 1.5);
    }
}
