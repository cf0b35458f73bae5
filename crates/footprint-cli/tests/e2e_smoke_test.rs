use std::{fs, path::PathBuf};

use tempfile::tempdir;

use footprint::FootprintError;
use footprint_cli::{Args, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Collects all .svg files from a directory
fn collect_svg_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("svg")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        dataset: None,
        output: output.to_string_lossy().to_string(),
        window: None,
        config: None,
        log_level: "off".to_string(),
    }
}

fn read_json(path: &PathBuf) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read output");
    serde_json::from_str(&content).expect("Output should be valid JSON")
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_fixtures = collect_svg_files(fixtures_dir());

    assert!(
        !valid_fixtures.is_empty(),
        "No valid fixtures found in tests/fixtures/"
    );

    let mut failed_fixtures = Vec::new();

    for fixture_path in &valid_fixtures {
        let output_filename = format!(
            "{}.json",
            fixture_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args(fixture_path.clone(), output_path.clone())) {
            Ok(_) => {
                let change_set = read_json(&output_path);
                assert_eq!(change_set["label"], "Create buildings");
                assert!(
                    !change_set["polygons"].as_array().unwrap().is_empty(),
                    "{} produced no outlines",
                    fixture_path.display()
                );
            }
            Err(e) => failed_fixtures.push((fixture_path.clone(), e)),
        }
    }

    if !failed_fixtures.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed_fixtures {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid fixture(s) failed unexpectedly",
            failed_fixtures.len()
        );
    }
}

#[test]
fn e2e_smoke_test_invalid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let invalid_fixtures = collect_svg_files(fixtures_dir().join("invalid"));

    assert!(
        !invalid_fixtures.is_empty(),
        "No invalid fixtures found in tests/fixtures/invalid/"
    );

    for fixture_path in &invalid_fixtures {
        let output_path = temp_dir.path().join("out.json");
        let result = run(&args(fixture_path.clone(), output_path.clone()));

        assert!(
            matches!(result, Err(FootprintError::Parse { .. })),
            "{} should fail with a parse error, got {:?}",
            fixture_path.display(),
            result
        );
        assert!(!output_path.exists(), "nothing is written on failure");
    }
}

#[test]
fn e2e_cadastre_sheet_against_dataset() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("cadastre.json");

    let mut args = args(fixtures_dir().join("cadastre_sheet.svg"), output_path.clone());
    args.dataset = Some(
        fixtures_dir()
            .join("cadastre_existing.json")
            .to_string_lossy()
            .to_string(),
    );

    let report = run(&args).expect("Import should succeed");

    assert_eq!(report.paths_seen, 5);
    assert_eq!(report.open_paths, 1);
    assert_eq!(report.discarded.empty_coordinate, 1);
    assert_eq!(report.polygons_built, 3);
    assert_eq!(report.points_identified, 10);
    assert_eq!(report.points_matched, 3);
    assert_eq!(report.polygons_rewired, 1);
    assert_eq!(report.points_emitted, 7);

    let change_set = read_json(&output_path);
    let polygons = change_set["polygons"].as_array().unwrap();
    assert_eq!(polygons.len(), 3);

    let existing_refs: Vec<u64> = polygons[2]["vertices"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|v| v["kind"] == "existing")
        .map(|v| v["id"].as_u64().unwrap())
        .collect();
    assert_eq!(existing_refs, [5001, 5002, 5003, 5001]);

    // Lambert 93 coordinates of Paris land near 48.8N 2.3E
    let lat = change_set["points"][0]["geo"]["lat"].as_f64().unwrap();
    let lon = change_set["points"][0]["geo"]["lon"].as_f64().unwrap();
    assert!((48.0..49.5).contains(&lat), "lat {lat}");
    assert!((2.0..3.0).contains(&lon), "lon {lon}");
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[projection]\nkind = \"identity\"\n\n[change_set]\nlabel = \"Import test sheet\"\n",
    )
    .unwrap();

    let output_path = temp_dir.path().join("out.json");
    let mut args = args(fixtures_dir().join("two_buildings.svg"), output_path.clone());
    args.config = Some(config_path.to_string_lossy().to_string());
    args.window = Some(footprint_cli_window());

    let report = run(&args).expect("Import should succeed");
    assert_eq!(report.points_emitted, 6);
    assert!(report.window.is_some());

    let change_set = read_json(&output_path);
    assert_eq!(change_set["label"], "Import test sheet");
    assert_eq!(change_set["points"][0]["geo"]["lon"], 10.0);
}

fn footprint_cli_window() -> footprint::geometry::BoundingBox {
    footprint_cli::parse_window("0,0,100,100").unwrap()
}
