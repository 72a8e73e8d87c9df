use ferrous_pathstore_domain::{CliOverrides, Config, ConfigError};

const CONFIG: &str = r#"
[logging]
level = "debug"

[policy]
BestSetSize = 3
CandidatesSetSize = 10
HistoryLimit = 2
UpdateAfterNumber = 5
UpdateAfterTime = 60
UnwantedASes = "1-ff00:0:666"

[policy.PropertyRanges]
PeerLinks = "0-2"
HopsLength = "1-10"
DelayTime = "0-600"
GuaranteedBandwidth = "0-20"
AvailableBandwidth = "0-20"
TotalBandwidth = "0-20"

[policy.PropertyWeights]
PeerLinks = 1
HopsLength = 10
Disjointness = 5
"#;

#[test]
fn test_store_section_defaults() {
    let config = Config::from_toml_str(CONFIG).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.json);
    assert_eq!(config.store.worker_queue_depth, 1024);
    assert_eq!(config.store.expiry_sweep_interval_secs, 60);
    assert!(config.validate().is_ok());
}

#[test]
fn test_path_policy_from_config() {
    let config = Config::from_toml_str(CONFIG).unwrap();
    let policy = config.path_policy().unwrap();

    assert_eq!(policy.best_set_size, 3);
    assert_eq!(policy.candidates_set_size, 10);
    assert_eq!(policy.unwanted_ases.len(), 1);
}

#[test]
fn test_missing_policy_section_fails() {
    assert!(matches!(
        Config::from_toml_str("[logging]\nlevel = \"info\"\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_validate_requires_all_ranges() {
    let contents = CONFIG.replace("TotalBandwidth = \"0-20\"\n", "");
    let config = Config::from_toml_str(&contents).unwrap();

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_zero_queue_depth() {
    let contents = format!("[store]\nworker_queue_depth = 0\n{}", CONFIG);
    let config = Config::from_toml_str(&contents).unwrap();

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_load_applies_cli_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pathstore.toml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = Config::load(
        Some(path.to_str().unwrap()),
        CliOverrides {
            log_level: Some("warn".to_string()),
            expiry_sweep_interval_secs: Some(5),
        },
    )
    .unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.store.expiry_sweep_interval_secs, 5);
}

#[test]
fn test_load_missing_file_fails() {
    assert!(matches!(
        Config::load(Some("/nonexistent/pathstore.toml"), CliOverrides::default()),
        Err(ConfigError::FileRead(_, _))
    ));
}
