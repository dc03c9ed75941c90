pub mod cli;
pub mod formats;
pub mod layers;
pub mod model;
pub mod remote;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod workflow;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
