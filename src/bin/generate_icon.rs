//! LAMA Icon Generator
//!
//! Draws the icon and writes `icon.png` plus the resized copies.
//! Run without arguments to regenerate the stock icon set.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use lama_icon::{CliArgs, IconConfig, IconRenderer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Icon generation failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> lama_icon::Result<()> {
    let config = IconConfig::load_with_args(args)?;
    let renderer = IconRenderer::new(config)?;
    renderer.run()?;

    println!(
        "Icons generated successfully in {}",
        renderer.config().output.directory.display()
    );
    Ok(())
}
