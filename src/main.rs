use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use countdown_dial::{CountdownApp, TickMode, TimerConfig};

/// A countdown timer drawn as a shrinking arc.
#[derive(Parser)]
#[command(name = "countdown-dial")]
#[command(version)]
struct Cli {
    /// Prefill the minutes input
    #[arg(short, long, default_value = "")]
    minutes: String,

    /// Prefill the seconds input
    #[arg(short, long, default_value = "")]
    seconds: String,

    /// Window title
    #[arg(long, default_value = "Countdown")]
    title: String,

    /// TrueType/OpenType font for the MM:SS readout and inputs
    #[arg(long)]
    font: Option<PathBuf>,

    /// Device pixel ratio, instead of the window's scale factor
    #[arg(long)]
    scale_factor: Option<f64>,

    /// Tick period in milliseconds
    #[arg(long, default_value = "16")]
    tick_ms: u64,

    /// Derive remaining time from the start instant instead of subtracting
    /// one period per tick
    #[arg(long)]
    anchored: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    fn into_config(self) -> TimerConfig {
        TimerConfig::builder()
            .title(self.title)
            .initial_minutes(self.minutes)
            .initial_seconds(self.seconds)
            .maybe_font_path(self.font)
            .maybe_scale_factor(self.scale_factor)
            .tick_period(Duration::from_millis(self.tick_ms.max(1)))
            .tick_mode(if self.anchored {
                TickMode::Anchored
            } else {
                TickMode::FixedStep
            })
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_dial={}", cli.log_level()))
        .init();

    let config = cli.into_config();
    info!(
        tick_period = ?config.tick_period,
        tick_mode = ?config.tick_mode,
        "starting countdown dial"
    );

    let app = CountdownApp::new(config).context("failed to prepare the timer")?;
    app.run().context("timer window failed")?;

    info!("window closed");
    Ok(())
}
