use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "image-session",
    version,
    about = "Client for a remote image-processing service with local inspection and layering"
)]
pub(super) struct Cli {
    /// Service config file (.yaml, .yml or .json).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub(super) base_url: Option<String>,
    #[arg(long, global = true)]
    pub(super) timeout_ms: Option<u64>,
    /// Repeat for more detail; `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(super) verbose: u8,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Decodes an image locally and reports its size.
    Info { input: PathBuf },
    /// Prints the 5x5 neighbourhood around a pixel.
    Inspect {
        input: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Asks the service whether the image is square.
    IsSquare { input: PathBuf },
    /// Applies one adjustment remotely and writes the preview PNG.
    Apply {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        op: String,
        /// Adjustment parameter as `key=value`, e.g. `--param level=20`.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Runs a recipe of adjustments and layers.
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        recipe: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        composite_output: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

pub(super) fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("parameter `{raw}` must look like key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter `{raw}` has an empty key"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[derive(Debug, Serialize)]
pub(super) struct ImageInfo {
    pub(super) file_name: String,
    pub(super) mime_type: String,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) square: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct InspectOutput {
    pub(super) focus: (i64, i64),
    /// `r,g,b` per cell, `null` outside the image.
    pub(super) rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ApplyOutput {
    pub(super) op: String,
    pub(super) output: PathBuf,
    pub(super) width: usize,
    pub(super) height: usize,
    /// False when the adjustment resolved locally without a service call.
    pub(super) remote: bool,
}
