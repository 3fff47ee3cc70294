//! Smoke tests for the rf-app service layer against the heater demo.

use std::path::PathBuf;

use rf_app::{
    AppError, ExportRequest, evaluate_file, export_model, load_rom, summarize, train_from_files,
    write_evaluation,
};
use rf_dmdc::Series;
use rf_export::{ExportBlock, ExportFormat};

fn demo(file: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("demos");
    path.push("heater");
    path.push(file);
    path
}

#[test]
fn summary_resolves_roles() {
    let rom = load_rom(&demo("rom.yaml")).unwrap();
    let summary = summarize(&rom).unwrap();
    assert_eq!(summary.parameters, vec!["power".to_string()]);
    assert_eq!(summary.outputs, vec!["y".to_string()]);
    assert_eq!(summary.pivot, "time");
    assert!(!summary.center);
}

#[test]
fn train_reports_every_sample() {
    let trained = train_from_files(&demo("rom.yaml"), &demo("training.json")).unwrap();
    assert_eq!(trained.summary.samples, 3);
    assert_eq!(trained.summary.timesteps, 6);
    assert_eq!(trained.summary.effective_ranks, vec![2, 2, 2]);
    assert!(trained.summary.parametric);
    assert!(trained.summary.uniform_time);
    assert!((trained.summary.dt - 0.5).abs() < 1e-12);
}

#[test]
fn evaluate_uses_matching_sample() {
    let trained = train_from_files(&demo("rom.yaml"), &demo("training.json")).unwrap();
    let evaluation = evaluate_file(&trained.model, &demo("requests.json")).unwrap();

    // power = 2 selects the second sample: x[k+1] = 0.7 x[k] + 0.5 u[k], y = 2 x.
    let u = [1.0, 0.4, -0.6, 0.2, 0.8, 0.0];
    let mut x = vec![1.5];
    for k in 0..u.len() - 1 {
        x.push(0.7 * x[k] + 0.5 * u[k]);
    }

    let Some(Series::Single(got_x)) = evaluation.get("x") else {
        panic!("missing x series");
    };
    let Some(Series::Single(got_y)) = evaluation.get("y") else {
        panic!("missing y series");
    };
    assert_eq!(got_x.len(), x.len());
    for k in 0..x.len() {
        assert!((got_x[k] - x[k]).abs() < 1e-6, "x[{k}] = {}", got_x[k]);
        assert!((got_y[k] - 2.0 * x[k]).abs() < 1e-6, "y[{k}] = {}", got_y[k]);
    }
    assert!(evaluation.get("time").is_some());
    assert!(evaluation.get("u").is_some());

    let out = std::env::temp_dir().join("rf_app_smoke_evaluation.json");
    write_evaluation(&out, &evaluation).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"time\""));
}

#[test]
fn export_writes_selected_blocks() {
    let trained = train_from_files(&demo("rom.yaml"), &demo("training.json")).unwrap();
    let out = std::env::temp_dir().join("rf_app_smoke_export.yaml");
    let _ = std::fs::remove_file(&out);

    let request = ExportRequest {
        what: Some(vec!["Atilde".to_string(), "Btilde".to_string()]),
        skip: vec![],
        format: ExportFormat::Yaml,
        output: Some(&out),
    };
    let (document, rendered) = export_model(&trained.model, &request).unwrap();

    assert_eq!(document.block_names(), vec!["Atilde", "Btilde"]);
    assert!(document.matrix(ExportBlock::ATilde).is_some());
    assert!(out.exists());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), rendered);
}

#[test]
fn unknown_export_block_writes_nothing() {
    let trained = train_from_files(&demo("rom.yaml"), &demo("training.json")).unwrap();
    let out = std::env::temp_dir().join("rf_app_smoke_unknown.json");
    let _ = std::fs::remove_file(&out);

    let request = ExportRequest {
        what: Some(vec!["Atilde".to_string(), "Foo".to_string()]),
        output: Some(&out),
        ..Default::default()
    };
    let err = export_model(&trained.model, &request).unwrap_err();

    assert!(matches!(err, AppError::Export(ref msg) if msg.contains("Foo")));
    assert!(!out.exists());
}

#[test]
fn mismatched_request_columns_are_rejected() {
    let trained = train_from_files(&demo("rom.yaml"), &demo("training.json")).unwrap();
    let path = std::env::temp_dir().join("rf_app_smoke_bad_requests.json");
    std::fs::write(&path, r#"{"features": [[[1.0, 2.0], [0.5, 2.0]]]}"#).unwrap();

    let err = evaluate_file(&trained.model, &path).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}
