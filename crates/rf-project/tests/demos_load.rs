use std::path::PathBuf;

fn demo(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/heater")
        .join(file)
}

#[test]
fn heater_definition_loads() {
    let rom = rf_project::load_rom(&demo("rom.yaml")).unwrap();
    assert_eq!(rom.name, "heater");
    assert_eq!(rom.pivot, "time");
    assert_eq!(rom.rank_svd, Some(-1.0));
}

#[test]
fn heater_data_matches_definition() {
    let rom = rf_project::load_rom(&demo("rom.yaml")).unwrap();
    let data = rf_project::load_training_data(&demo("training.json")).unwrap();

    let features = data.feature_batch().unwrap();
    let targets = data.target_batch().unwrap();
    assert_eq!(features.samples(), targets.samples());
    assert_eq!(features.timesteps(), targets.timesteps());
    rf_project::validate_data_columns(&rom, features.columns(), Some(targets.columns()))
        .unwrap();

    let requests = rf_project::load_requests(&demo("requests.json")).unwrap();
    let batch = requests.feature_batch().unwrap();
    rf_project::validate_data_columns(&rom, batch.columns(), None).unwrap();
}

#[test]
fn ragged_training_data_is_rejected() {
    let data = rf_project::TrainingData {
        features: vec![vec![vec![1.0, 2.0], vec![3.0]]],
        targets: vec![vec![vec![0.0], vec![0.5]]],
    };
    assert!(data.feature_batch().is_err());
}
