use std::{fs, path::PathBuf};

use tempfile::tempdir;

use cameo::CameoError;
use cameo_cli::{Args, OutputFormat};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn args(output: &str, select: &[&str], closure: bool, format: OutputFormat) -> Args {
    Args {
        input: fixture("process.svg"),
        elements: fixture("process.toml"),
        select: select.iter().map(|id| id.to_string()).collect(),
        closure,
        output: output.to_string(),
        format,
        config: Some(fixture("config.toml")),
        log_level: "off".to_string(),
    }
}

fn png_size(data: &[u8]) -> (u32, u32) {
    assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n", "Output should be a PNG");
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    (width, height)
}

#[test]
fn e2e_smoke_test_render_all_elements() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("all.png");

    cameo_cli::run(&args(
        &output.to_string_lossy(),
        &[],
        false,
        OutputFormat::Png,
    ))
    .expect("Failed to render all elements");

    let png = fs::read(&output).expect("Output file should exist");
    assert_eq!(png_size(&png), (292, 112));
}

#[test]
fn e2e_smoke_test_render_selected_element() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("task.png");

    cameo_cli::run(&args(
        &output.to_string_lossy(),
        &["Task_1"],
        false,
        OutputFormat::Png,
    ))
    .expect("Failed to render Task_1");

    let png = fs::read(&output).expect("Output file should exist");
    assert_eq!(png_size(&png), (72, 52));
}

#[test]
fn e2e_smoke_test_closure_as_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("sub.svg");

    cameo_cli::run(&args(
        &output.to_string_lossy(),
        &["SubProcess_1"],
        true,
        OutputFormat::Svg,
    ))
    .expect("Failed to render closure");

    let svg = fs::read_to_string(&output).expect("Output file should exist");
    assert!(svg.contains(r#"viewBox="84 4 212 112""#), "Unexpected frame: {svg}");
    assert!(svg.contains(r#"width="212""#));
    assert!(svg.contains(r#"height="112""#));
    // Task visuals survive as part of the closure; the start event loses its circle.
    assert_eq!(svg.matches("<rect").count(), 3);
    assert!(!svg.contains("<circle"));
}

#[test]
fn e2e_smoke_test_closure_as_png() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("sub.png");

    cameo_cli::run(&args(
        &output.to_string_lossy(),
        &["SubProcess_1"],
        true,
        OutputFormat::Png,
    ))
    .expect("Failed to render closure");

    let png = fs::read(&output).expect("Output file should exist");
    assert_eq!(png_size(&png), (212, 112));
}

#[test]
fn e2e_smoke_test_empty_closure_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("nothing.png");

    cameo_cli::run(&args(
        &output.to_string_lossy(),
        &["Not_In_Diagram"],
        true,
        OutputFormat::Png,
    ))
    .expect("Empty closure should not be an error");

    assert!(!output.exists());
}

#[test]
fn e2e_smoke_test_unknown_selection_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("unknown.png");

    let err = cameo_cli::run(&args(
        &output.to_string_lossy(),
        &["Not_In_Diagram"],
        false,
        OutputFormat::Png,
    ))
    .unwrap_err();

    assert!(matches!(err, CameoError::NothingToRender));
    assert!(!output.exists());
}

#[test]
fn e2e_smoke_test_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.png");

    let mut cfg = args(&output.to_string_lossy(), &[], false, OutputFormat::Png);
    cfg.config = Some(fixture("missing.toml"));

    let err = cameo_cli::run(&cfg).unwrap_err();
    assert!(matches!(err, CameoError::Configuration(_)));
}

#[test]
fn e2e_smoke_test_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.png");

    let mut cfg = args(&output.to_string_lossy(), &[], false, OutputFormat::Png);
    cfg.input = fixture("missing.svg");

    let err = cameo_cli::run(&cfg).unwrap_err();
    assert!(matches!(err, CameoError::Document(_)));
}
