use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::formats::{Upload, read_upload};
use crate::layers::LayerSpec;
use crate::remote::ImageService;
use crate::session::{Completion, Session};

use super::{Recipe, RecipeLayer, RecipeReport, Result, StepReport};

/// Session left behind by a recipe together with its report.
#[derive(Debug, Clone)]
pub struct RecipeOutcome {
    pub session: Session,
    pub report: RecipeReport,
}

fn with_overrides(spec: LayerSpec, name: &Option<String>, opacity: Option<f32>) -> LayerSpec {
    let spec = match name {
        Some(name) => spec.with_name(name.clone()),
        None => spec,
    };
    match opacity {
        Some(opacity) => spec.with_opacity(opacity),
        None => spec,
    }
}

fn run_layer<S: ImageService + ?Sized>(
    session: &mut Session,
    service: &S,
    layer: &RecipeLayer,
    base_dir: &Path,
) -> Result<Completion> {
    let spec = match layer {
        RecipeLayer::Color {
            color,
            name,
            opacity,
        } => with_overrides(LayerSpec::color(*color), name, *opacity),
        RecipeLayer::Gradient {
            start,
            end,
            angle,
            name,
            opacity,
        } => with_overrides(LayerSpec::gradient(*start, *end, *angle), name, *opacity),
        RecipeLayer::Image {
            path,
            name,
            opacity,
        } => {
            let upload = read_upload(base_dir.join(path))?;
            with_overrides(LayerSpec::image(&upload), name, *opacity)
        }
        RecipeLayer::Filter {
            adjustment,
            opacity,
        } => {
            let completion = session.run_filter_layer(service, adjustment.clone())?;
            let created = session.layers().top().map(|top| top.id);
            return match (opacity, created) {
                (Some(opacity), Some(id)) if completion == Completion::Applied => {
                    let dispatch = session.set_layer_opacity(id, *opacity)?;
                    Ok(session.run_composite(service, dispatch)?)
                }
                _ => Ok(completion),
            };
        }
    };
    let dispatch = session.create_layer(spec)?;
    Ok(session.run_composite(service, dispatch)?)
}

/// Drives a fresh session over `upload` through every recipe step in order.
///
/// Image layer paths are resolved against `base_dir`. The first failing
/// step aborts the run.
pub fn run_recipe<S: ImageService + ?Sized>(
    service: &S,
    upload: Upload,
    recipe: &Recipe,
    base_dir: &Path,
) -> Result<RecipeOutcome> {
    recipe.validate()?;

    let mut session = Session::new();
    let check = session.load_upload(upload);
    session.run_square_check(service, check)?;

    let mut steps = Vec::with_capacity(recipe.adjustments.len() + recipe.layers.len());
    for adjustment in &recipe.adjustments {
        let started = Instant::now();
        let completion = session.run_adjustment(service, adjustment.clone())?;
        steps.push(StepReport {
            stage: "adjustment".to_string(),
            op: adjustment.name().to_string(),
            duration_ms: started.elapsed().as_millis(),
            applied: completion == Completion::Applied,
        });
    }
    for layer in &recipe.layers {
        let started = Instant::now();
        let completion = run_layer(&mut session, service, layer, base_dir)?;
        steps.push(StepReport {
            stage: "layer".to_string(),
            op: layer.kind().to_string(),
            duration_ms: started.elapsed().as_millis(),
            applied: completion == Completion::Applied,
        });
    }

    let report = RecipeReport {
        recipe_name: recipe.name.clone(),
        is_square: session.is_square(),
        steps,
        layer_count: session.layers().len(),
        result: session
            .result()
            .map(|result| result.dimensions().into()),
        composite: session
            .composite()
            .map(|composite| composite.dimensions().into()),
    };
    info!(
        recipe = recipe.name.as_deref().unwrap_or("<unnamed>"),
        steps = report.steps.len(),
        layers = report.layer_count,
        "recipe finished"
    );
    Ok(RecipeOutcome { session, report })
}
