mod error;
mod execute;
mod io;
mod report;
mod spec;

#[cfg(test)]
mod tests;

pub use error::{RecipeError, Result};
pub use execute::{RecipeOutcome, run_recipe};
pub use io::{load_recipe, save_report};
pub use report::{RecipeReport, StepReport, ViewSummary};
pub use spec::{Recipe, RecipeLayer};
