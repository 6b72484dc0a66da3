//! CLI entry point for inspecting timeline layouts.
//!
//! # Responsibility
//! - Load a seed (built-in sample or JSON file) into an `EventStore`.
//! - Optionally apply one drag move, then print the resulting lanes.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use timeline_core::{
    default_log_level, init_logging, parse_events_json, sample_events, EventStore,
    ProcessedTimelineData, TimelineService, ZoomLevel,
};

#[derive(Debug, Parser)]
#[command(name = "timeline", version, about = "Lay out date-ranged events into lanes")]
struct Args {
    /// JSON seed file; the built-in sample is used when omitted.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Zoom level, clamped to 0.25..=4.0.
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Event to move before printing.
    #[arg(long, requires = "offset")]
    move_id: Option<i64>,

    /// Horizontal drag offset in pixels for `--move-id`.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f32>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| err.to_string())?;
    }

    let events = match &args.seed {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
            parse_events_json(&raw).map_err(|err| err.to_string())?
        }
        None => sample_events(),
    };
    let store = EventStore::new(events).map_err(|err| err.to_string())?;
    let service = TimelineService::new(Arc::new(store));
    let zoom = ZoomLevel::new(args.zoom);

    if let (Some(id), Some(offset)) = (args.move_id, args.offset) {
        match service.move_event(id, offset, zoom) {
            Ok(moved) => println!(
                "moved #{} to {} .. {}",
                moved.id, moved.start_date, moved.end_date
            ),
            Err(err) => println!("move rejected: {err}"),
        }
    }

    print_layout(&service.layout(zoom));
    log::info!("event=cli_done module=cli status=ok");
    Ok(())
}

fn print_layout(data: &ProcessedTimelineData) {
    let (Some(min_date), Some(max_date)) = (data.min_date, data.max_date) else {
        println!("no events");
        return;
    };
    println!(
        "{min_date} .. {max_date}  zoom={:.2}  width={:.0}px  lanes={}",
        data.zoom_level,
        data.total_width,
        data.lane_count()
    );
    for lane in &data.lanes {
        println!("lane {}:", lane.lane_index);
        for placed in &lane.events {
            println!(
                "  #{:<3} x={:>7.0} w={:>6.0}  {} .. {}  {}",
                placed.event.id,
                placed.x,
                placed.width,
                placed.event.start_date,
                placed.event.end_date,
                placed.event.name
            );
        }
    }
}
