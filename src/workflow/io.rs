use std::fs;
use std::path::Path;

use super::{Recipe, RecipeReport, Result};

fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}

pub fn load_recipe(path: impl AsRef<Path>) -> Result<Recipe> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let recipe = if is_yaml(path) {
        serde_yaml::from_str::<Recipe>(&raw)?
    } else {
        serde_json::from_str::<Recipe>(&raw)?
    };
    recipe.validate()?;
    Ok(recipe)
}

pub fn save_report(path: impl AsRef<Path>, report: &RecipeReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
