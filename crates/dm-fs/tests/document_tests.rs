use dm_fs::{DocumentFormat, DocumentStore, Error, NormalizedPath};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestSettings {
    #[serde(rename = "XNATSERVER")]
    xnat_server: String,
    #[serde(rename = "XNATPORT")]
    xnat_port: u16,
    #[serde(default)]
    paths: BTreeMap<String, String>,
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("site_config.yml");
    fs::write(
        &file_path,
        "XNATSERVER: xnat.example.org\nXNATPORT: 443\npaths:\n  dcm: data/dcm/\n",
    )
    .unwrap();

    let store = DocumentStore::new();
    let settings: TestSettings = store.load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(settings.xnat_server, "xnat.example.org");
    assert_eq!(settings.xnat_port, 443);
    assert_eq!(settings.paths["dcm"], "data/dcm/");
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("site_config.toml");
    fs::write(
        &file_path,
        "XNATSERVER = \"xnat.example.org\"\nXNATPORT = 8080\n\n[paths]\nnii = \"data/nii/\"\n",
    )
    .unwrap();

    let store = DocumentStore::new();
    let settings: TestSettings = store.load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(settings.xnat_port, 8080);
    assert_eq!(settings.paths["nii"], "data/nii/");
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("site_config.json");
    fs::write(&file_path, r#"{"XNATSERVER": "localhost", "XNATPORT": 80}"#).unwrap();

    let store = DocumentStore::new();
    let settings: TestSettings = store.load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(settings.xnat_server, "localhost");
    assert!(settings.paths.is_empty());
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("site_config.ini");
    fs::write(&file_path, "XNATSERVER=localhost").unwrap();

    let store = DocumentStore::new();
    let result: Result<TestSettings, _> = store.load(&NormalizedPath::new(&file_path));

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_parse_error_names_format_and_path() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.yml");
    fs::write(&file_path, "XNATSERVER: [unterminated\n").unwrap();

    let store = DocumentStore::new();
    let err = store
        .load::<TestSettings>(&NormalizedPath::new(&file_path))
        .unwrap_err();

    match &err {
        Error::DocumentParse { format, path, .. } => {
            assert_eq!(format, "YAML");
            assert!(path.ends_with("broken.yml"));
        }
        other => panic!("expected DocumentParse, got {other:?}"),
    }
}

#[test]
fn test_missing_file_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let store = DocumentStore::new();
    let missing = NormalizedPath::new(temp.path()).join("missing.yml");

    let err = store.load::<TestSettings>(&missing).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_format_from_path() {
    let path = NormalizedPath::new("config/SPINS_settings.yaml");
    assert_eq!(DocumentFormat::from_path(&path).unwrap(), DocumentFormat::Yaml);
}
