use std::fs;

use image::{ImageBuffer, Rgb as ImageRgb};
use tempfile::tempdir;

use crate::layers::LayerKind;
use crate::model::Rgb;
use crate::remote::Adjustment;
use crate::remote::fake::{FakeImageService, sample_upload};

use super::{Recipe, RecipeError, RecipeLayer, RecipeReport, load_recipe, run_recipe, save_report};

const RECIPE: &str = r##"
name: poster
adjustments:
  - op: brightness
    level: 25
  - op: crop
    x: 1
    y: 1
    w: 4
    h: 3
layers:
  - kind: color
    color: "#ff8000"
    opacity: 0.25
  - kind: gradient
    start: "#000000"
    end: "#ffffff"
    angle: 90
  - kind: filter
    adjustment:
      op: blur
      intensity: 4
    opacity: 0.6
"##;

#[test]
fn yaml_recipe_parses_tagged_steps() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("recipe.yaml");
    fs::write(&path, RECIPE).expect("write");
    let recipe = load_recipe(&path).expect("recipe");
    assert_eq!(recipe.name.as_deref(), Some("poster"));
    assert_eq!(recipe.adjustments[0], Adjustment::Brightness { level: 25 });
    assert!(matches!(recipe.adjustments[1], Adjustment::Crop(region) if region.w == 4));
    assert_eq!(
        recipe.layers[0],
        RecipeLayer::Color {
            color: Rgb::new(255, 128, 0),
            name: None,
            opacity: Some(0.25),
        }
    );
    assert_eq!(recipe.layers[2].kind(), "filter");
}

#[test]
fn empty_recipe_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("recipe.json");
    fs::write(&path, r#"{"name": "nothing"}"#).expect("write");
    assert!(matches!(load_recipe(&path), Err(RecipeError::Parse(_))));
}

#[test]
fn out_of_range_opacity_is_rejected() {
    let recipe = Recipe {
        name: None,
        adjustments: Vec::new(),
        layers: vec![RecipeLayer::Color {
            color: Rgb::BLACK,
            name: None,
            opacity: Some(1.5),
        }],
    };
    assert!(recipe.validate().is_err());
}

#[test]
fn recipe_drives_session_in_order() {
    let dir = tempdir().expect("tempdir");
    let recipe: Recipe = serde_yaml::from_str(RECIPE).expect("recipe");
    let service = FakeImageService::new();
    let outcome = run_recipe(&service, sample_upload(8, 6), &recipe, dir.path()).expect("run");

    assert_eq!(
        service.endpoints(),
        vec![
            "is-square",
            "brightness",
            "crop",
            "composite-layers",
            "composite-layers",
            "blur",
            "composite-layers",
            "composite-layers",
        ]
    );
    let report = &outcome.report;
    assert_eq!(report.is_square, Some(false));
    assert_eq!(report.layer_count, 3);
    assert_eq!(report.steps.len(), 5);
    assert!(report.steps.iter().all(|step| step.applied));
    let result = report.result.expect("result");
    assert_eq!((result.width, result.height), (4, 3));
    let composite = report.composite.expect("composite");
    assert_eq!((composite.width, composite.height), (8, 6));

    let layers = outcome.session.layers();
    let top = layers.top().expect("top");
    assert_eq!(top.kind(), LayerKind::Filter);
    assert!((top.opacity - 0.6).abs() < 1e-6);
    assert!((layers.layers()[0].opacity - 0.25).abs() < 1e-6);
}

#[test]
fn image_layers_resolve_relative_to_base_dir() {
    let dir = tempdir().expect("tempdir");
    let overlay = ImageBuffer::from_pixel(3, 3, ImageRgb([9_u8, 9, 9]));
    overlay.save(dir.path().join("overlay.png")).expect("save overlay");
    let recipe: Recipe = serde_json::from_str(
        r#"{"name": null, "layers": [{"kind": "image", "path": "overlay.png", "name": "Stamp"}]}"#,
    )
    .expect("recipe");

    let service = FakeImageService::new();
    let outcome = run_recipe(&service, sample_upload(4, 4), &recipe, dir.path()).expect("run");
    let layer = &outcome.session.layers().layers()[0];
    assert_eq!(layer.name, "Stamp");
    assert_eq!(layer.kind(), LayerKind::Image);
    assert!((layer.opacity - 0.5).abs() < 1e-6);
    let layers_json = service.calls()[1].form.text_value("layers").expect("layers").to_string();
    assert!(layers_json.contains("\"fileName\":\"overlay.png\""));
    assert!(layers_json.contains("data:image/png;base64,"));
}

#[test]
fn missing_image_layer_aborts_run() {
    let dir = tempdir().expect("tempdir");
    let recipe = Recipe {
        name: None,
        adjustments: Vec::new(),
        layers: vec![RecipeLayer::Image {
            path: "absent.png".into(),
            name: None,
            opacity: None,
        }],
    };
    let service = FakeImageService::new();
    let error = run_recipe(&service, sample_upload(4, 4), &recipe, dir.path())
        .expect_err("missing file");
    assert!(matches!(error, RecipeError::Image(_)));
}

#[test]
fn remote_failure_surfaces_as_session_error() {
    let dir = tempdir().expect("tempdir");
    let recipe: Recipe = serde_yaml::from_str(RECIPE).expect("recipe");
    let service = FakeImageService::failing();
    let error = run_recipe(&service, sample_upload(4, 4), &recipe, dir.path())
        .expect_err("failing service");
    assert!(matches!(error, RecipeError::Session(_)));
}

#[test]
fn report_is_written_in_requested_format() {
    let dir = tempdir().expect("tempdir");
    let recipe: Recipe = serde_yaml::from_str(RECIPE).expect("recipe");
    let service = FakeImageService::new();
    let outcome = run_recipe(&service, sample_upload(8, 8), &recipe, dir.path()).expect("run");

    let json_path = dir.path().join("report.json");
    save_report(&json_path, &outcome.report).expect("json report");
    let parsed: RecipeReport =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read")).expect("parse");
    assert_eq!(parsed, outcome.report);

    let yaml_path = dir.path().join("report.yml");
    save_report(&yaml_path, &outcome.report).expect("yaml report");
    let raw = fs::read_to_string(&yaml_path).expect("read");
    assert!(raw.contains("recipe_name: poster"));
}
