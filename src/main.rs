use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use headtrace::data_capture::{CaptureSession, SimulatedSource};

#[derive(Parser)]
#[command(name = "headtrace")]
#[command(version = "0.1.0")]
#[command(about = "Records head-motion telemetry and exports it to CSV")]
struct Args {
    /// Destination CSV file; defaults to motion_data_<timestamp>.csv
    #[arg(long)]
    output: Option<PathBuf>,

    /// Recording duration in seconds
    #[arg(long, default_value_t = 5.0)]
    duration_secs: f64,

    /// Delivery rate of the simulated motion feed, in Hz
    #[arg(long, default_value_t = 25.0)]
    rate_hz: f64,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "motion_data_{}.csv",
            chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S")
        ))
    });

    let source = Arc::new(SimulatedSource::new(args.rate_hz));
    let session = CaptureSession::new(source);

    if let Err(e) = session.start() {
        error!("Unable to start recording: {}", e);
        std::process::exit(1);
    }

    // Live display stand-in: mirror the latest sample to the log output on
    // this task, off the delivery context.
    let mut latest = session.latest();
    let display = tokio::spawn(async move {
        while latest.changed().await.is_ok() {
            if let Some(s) = *latest.borrow_and_update() {
                info!(
                    "t={:.2}s quaternion=({:.3}, {:.3}, {:.3}, {:.3}) acceleration=({:.3}, {:.3}, {:.3})",
                    s.elapsed_seconds,
                    s.orientation.w,
                    s.orientation.x,
                    s.orientation.y,
                    s.orientation.z,
                    s.acceleration.x,
                    s.acceleration.y,
                    s.acceleration.z
                );
            }
        }
    });

    tokio::time::sleep(Duration::from_secs_f64(args.duration_secs)).await;
    session.stop().await;
    display.abort();

    match session.export_csv(&output) {
        Ok(count) => info!("Exported {} sample(s) to {}", count, output.display()),
        Err(e) => {
            error!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}
