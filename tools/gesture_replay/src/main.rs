//! Replay a captured touch trace through the gesture detector.
//!
//! Trace lines look like `touch,<ms>,<phase>,<id>,<x>,<y>` with phase one of
//! `start`, `move`, `end`, `cancel`. Blank lines, `#` comments and the
//! header line are skipped. One gesture CSV line is printed per recognized
//! gesture; `--expect` asserts the kind sequence against a file with one
//! label per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use gesturekit::{
    Contact, ContactId, Gesture, GestureConfig, GestureDetector, SwipeDirection, TouchPhase,
};

#[derive(Parser)]
#[command(about = "Replay a touch trace and print the recognized gestures")]
struct Args {
    /// CSV touch trace to replay.
    trace: PathBuf,

    /// File with the expected gesture kind sequence, one label per line.
    #[arg(long)]
    expect: Option<PathBuf>,

    /// Override the hold timeout, in milliseconds.
    #[arg(long)]
    hold_interval_ms: Option<u64>,

    /// Override the pan threshold, in pixels.
    #[arg(long)]
    pan_threshold_px: Option<f32>,
}

#[derive(Clone, Copy)]
struct TraceSample {
    ms: u64,
    phase: TouchPhase,
    contact: Contact,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = GestureConfig::default();
    if let Some(hold_interval_ms) = args.hold_interval_ms {
        config.hold_interval_ms = hold_interval_ms;
    }
    if let Some(pan_threshold_px) = args.pan_threshold_px {
        config.pan_threshold_px = pan_threshold_px;
    }

    let samples = parse_trace(&args.trace)?;
    log::info!("replaying {} samples from {}", samples.len(), args.trace.display());

    let mut detector = GestureDetector::with_config(config);
    detector.start_detecting();

    let mut gestures: Vec<Gesture> = Vec::new();
    for sample in &samples {
        // Let a hold deadline that elapsed between samples fire at its own
        // time, not at the next sample's.
        while let Some(deadline) = detector.next_deadline().filter(|d| *d < sample.ms) {
            gestures.extend(detector.poll(deadline).iter().copied());
        }
        let output = detector.handle(sample.phase, sample.ms, &[sample.contact]);
        gestures.extend(output.iter().copied());
    }

    // Flush a hold that was still pending when the trace stopped.
    if let Some(deadline) = detector.next_deadline() {
        gestures.extend(detector.poll(deadline).iter().copied());
    }

    println!("gesture,kind,detail");
    for gesture in &gestures {
        println!("gesture,{},{}", gesture.kind().label(), detail(gesture));
    }

    if let Some(expect_path) = args.expect {
        let expected = parse_expected_kinds(&expect_path)?;
        let actual: Vec<&'static str> =
            gestures.iter().map(|g| g.kind().label()).collect();
        if actual != expected {
            eprintln!("expected kinds: {}", expected.join(","));
            eprintln!("actual kinds:   {}", actual.join(","));
            bail!("gesture sequence mismatch");
        }
    }

    Ok(())
}

fn detail(gesture: &Gesture) -> String {
    match gesture {
        Gesture::Tap { at }
        | Gesture::DoubleTap { at }
        | Gesture::HoldStart { at }
        | Gesture::HoldMove { at }
        | Gesture::HoldEnd { at } => {
            format!("{},{},{}", at.screen_x, at.screen_y, at.time_stamp)
        }
        Gesture::Pan { absolute, relative } => format!(
            "{},{},{},{}",
            absolute.dx, absolute.dy, relative.dx, relative.dy
        ),
        Gesture::Swipe(swipe) => format!(
            "{},{},{},{:.1}",
            swipe.dx,
            swipe.dy,
            direction_label(swipe.direction),
            swipe.angle_deg
        ),
        Gesture::Transform(transform) => format!(
            "{:.3},{:.1},{},{}",
            transform.absolute.scale,
            transform.absolute.rotate,
            transform.midpoint.screen_x,
            transform.midpoint.screen_y
        ),
    }
}

fn direction_label(direction: SwipeDirection) -> &'static str {
    match direction {
        SwipeDirection::Left => "left",
        SwipeDirection::Right => "right",
        SwipeDirection::Up => "up",
        SwipeDirection::Down => "down",
    }
}

fn parse_trace(path: &Path) -> Result<Vec<TraceSample>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "touch,ms,phase,id,x,y" {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.first() != Some(&"touch") {
            continue;
        }
        if parts.len() < 6 {
            bail!(
                "{}:{} invalid trace line, expected touch,ms,phase,id,x,y",
                path.display(),
                line_no
            );
        }

        let ms: u64 = parts[1]
            .parse()
            .with_context(|| format!("{}:{} invalid ms '{}'", path.display(), line_no, parts[1]))?;
        let phase = match parts[2] {
            "start" => TouchPhase::Start,
            "move" => TouchPhase::Move,
            "end" => TouchPhase::End,
            "cancel" => TouchPhase::Cancel,
            other => bail!(
                "{}:{} invalid phase '{}'",
                path.display(),
                line_no,
                other
            ),
        };
        let id: u32 = parts[3]
            .parse()
            .with_context(|| format!("{}:{} invalid id '{}'", path.display(), line_no, parts[3]))?;
        let x: i32 = parts[4]
            .parse()
            .with_context(|| format!("{}:{} invalid x '{}'", path.display(), line_no, parts[4]))?;
        let y: i32 = parts[5]
            .parse()
            .with_context(|| format!("{}:{} invalid y '{}'", path.display(), line_no, parts[5]))?;

        out.push(TraceSample {
            ms,
            phase,
            contact: Contact {
                id: ContactId(id),
                screen_x: x,
                screen_y: y,
                client_x: x,
                client_y: y,
                page_x: x,
                page_y: y,
            },
        });
    }

    Ok(out)
}

fn parse_expected_kinds(path: &Path) -> Result<Vec<&'static str>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut kinds = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        let normalized = match token.to_ascii_lowercase().as_str() {
            "tap" => "tap",
            "dbltap" => "dbltap",
            "pan" => "pan",
            "swipe" => "swipe",
            "holdstart" => "holdstart",
            "holdmove" => "holdmove",
            "holdend" => "holdend",
            "transform" => "transform",
            other => bail!(
                "{}:{} invalid expected gesture kind: {}",
                path.display(),
                line_no,
                other
            ),
        };
        kinds.push(normalized);
    }

    Ok(kinds)
}
