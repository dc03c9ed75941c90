use std::path::Path;

use clap::Parser;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::formats::{PreviewImage, read_upload, write_preview};
use crate::model::Point;
use crate::remote::{Adjustment, ImageService, SquareCheckRequest};
use crate::runtime::{AppContext, AppError, Result};
use crate::session::{Session, View};
use crate::ui::interaction::{Inspection, inspect};
use crate::workflow::{load_recipe, run_recipe, save_report};

use super::types::{ApplyOutput, Cli, Commands, ImageInfo, InspectOutput};

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (e.g. from an embedding host) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Argument(error.to_string()))?;
    println!("{rendered}");
    Ok(())
}

/// Parameter values are read as JSON where possible so numbers stay numbers.
pub(super) fn parse_adjustment(op: &str, params: &[(String, String)]) -> Result<Adjustment> {
    let mut fields = Map::new();
    fields.insert(
        "op".to_string(),
        Value::String(op.trim().replace(['/', '-'], "_")),
    );
    for (key, raw) in params {
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        fields.insert(key.clone(), value);
    }
    serde_json::from_value(Value::Object(fields))
        .map_err(|error| AppError::Argument(format!("adjustment `{op}`: {error}")))
}

fn write_view(session: &Session, output: &Path) -> Result<(usize, usize)> {
    let preview = match session.result() {
        Some(result) => result.preview.clone(),
        None => {
            let buffer = session.buffer(View::Result).ok_or_else(|| {
                AppError::Argument("no image loaded".to_string())
            })?;
            PreviewImage::encode(buffer)?
        }
    };
    write_preview(output, &preview)?;
    let dimensions = session.dimensions(View::Result);
    Ok((dimensions.width, dimensions.height))
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { input } => {
            let upload = read_upload(&input)?;
            let dimensions = upload.dimensions();
            print_json(&ImageInfo {
                file_name: upload.file_name().to_string(),
                mime_type: upload.mime_type().to_string(),
                width: dimensions.width,
                height: dimensions.height,
                square: dimensions.is_square(),
            })
        }
        Commands::Inspect { input, x, y } => {
            let upload = read_upload(&input)?;
            match inspect(Some(upload.pixels().as_ref()), Some(Point::new(x, y))) {
                Inspection::Grid(grid) => print_json(&InspectOutput {
                    focus: grid.focus,
                    rows: grid
                        .rows()
                        .iter()
                        .map(|row| {
                            row.iter()
                                .map(|cell| cell.sample().map(|rgb| rgb.to_string()))
                                .collect()
                        })
                        .collect(),
                }),
                Inspection::Empty => print_json(&json!({"focus": null, "rows": []})),
            }
        }
        Commands::IsSquare { input } => {
            let app = AppContext::resolve(cli.config.as_deref(), cli.base_url, cli.timeout_ms)?;
            let upload = read_upload(&input)?;
            let square = app
                .image_service()
                .is_square(&SquareCheckRequest { image: upload })?;
            print_json(&json!({"input": input, "square": square}))
        }
        Commands::Apply {
            input,
            output,
            op,
            params,
        } => {
            let app = AppContext::resolve(cli.config.as_deref(), cli.base_url, cli.timeout_ms)?;
            let adjustment = parse_adjustment(&op, &params)?;
            let mut session = Session::new();
            session.load_upload(read_upload(&input)?);
            let name = adjustment.name().to_string();
            session.run_adjustment(app.image_service(), adjustment)?;
            let (width, height) = write_view(&session, &output)?;
            print_json(&ApplyOutput {
                op: name,
                output,
                width,
                height,
                remote: session.result().is_some(),
            })
        }
        Commands::Run {
            input,
            recipe,
            output,
            composite_output,
            report,
        } => {
            let app = AppContext::resolve(cli.config.as_deref(), cli.base_url, cli.timeout_ms)?;
            let upload = read_upload(&input)?;
            let spec = load_recipe(&recipe)?;
            let base_dir = recipe.parent().unwrap_or_else(|| Path::new("."));
            let outcome = run_recipe(app.image_service(), upload, &spec, base_dir)?;
            write_view(&outcome.session, &output)?;
            if let Some(path) = composite_output {
                match outcome.session.composite() {
                    Some(composite) => write_preview(&path, &composite.preview)?,
                    None => warn!(
                        path = %path.display(),
                        "no visible layers; composite output not written"
                    ),
                }
            }
            if let Some(path) = report {
                save_report(path, &outcome.report)?;
            }
            print_json(&outcome.report)
        }
    }
}

pub fn run_cli() -> std::result::Result<(), String> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dispatch(cli).map_err(|error| error.to_string())
}
