//! Scatter Data Viewer
//!
//! Loads a coordinate file (or the bundled sample) and shows it as an
//! animated 3D scatter plot.
//!
//! Controls:
//! - Wheel: zoom in or out
//! - Hover a marker: select it and show its coordinates
//! - Side panel: pause or resume the camera and pick the shadow quality

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use scattercrate_core::{Error, Point3f, PointCloud};
use scattercrate_gpu::ShadowQuality;
use scattercrate_io::ScatterTextReader;
use scattercrate_visualization::{InteractiveViewer, ViewerConfig};

const SAMPLE_DATA: &str = include_str!("../data/data.txt");

#[derive(Parser, Debug)]
#[command(name = "scattercrate-viewer", version, about = "Show x,y,z coordinate files as a 3D scatter plot")]
struct Args {
    /// Coordinate file with one `x,y,z` point per line; the bundled sample when omitted
    #[arg(value_name = "DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Initial shadow quality, 0 (none) to 6 (high soft)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i32).range(0..=6))]
    shadow_quality: i32,

    /// Start with the camera animation paused
    #[arg(long)]
    paused: bool,
}

fn load(args: &Args) -> PointCloud<Point3f> {
    let report = match &args.data_file {
        Some(path) => ScatterTextReader::read_path(path),
        None => {
            log::info!("No data file given, using the bundled sample");
            ScatterTextReader::parse_str(SAMPLE_DATA)
        }
    };
    if !report.warnings.is_empty() {
        log::warn!("{} problems while loading, {} lines skipped", report.warnings.len(), report.rejected_lines());
    }
    report.into_cloud()
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = ViewerConfig {
        shadow_quality: ShadowQuality::try_from(args.shadow_quality)?,
        start_paused: args.paused,
        ..ViewerConfig::default()
    };

    let cloud = load(&args);
    let mut viewer = InteractiveViewer::new(config);
    viewer.set_point_cloud(cloud);
    viewer.run().context("viewer stopped with an error")?;
    Ok(())
}

fn report_fatal(error: &anyhow::Error) {
    log::error!("{:#}", error);
    let render_context_lost = error
        .downcast_ref::<Error>()
        .is_some_and(Error::is_fatal);
    if render_context_lost {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Scatter Data Viewer")
            .set_description(format!("Could not set up rendering.\n\n{:#}", error))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_fatal(&error);
            ExitCode::FAILURE
        }
    }
}
