use std::fs;

use covlens_config::{CONFIG_FILE, ProjectConfig};
use covlens_types::Locale;

#[test]
fn working_directory_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "locale = \"de\"\n").unwrap();
    let config = ProjectConfig::discover(None, dir.path()).unwrap();
    assert_eq!(config.locale, Some(Locale::De));
}

#[test]
fn no_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProjectConfig::discover(None, dir.path()).unwrap();
    assert!(config.locale.is_none());
    assert!(config.quality.gates.is_empty());
}

#[test]
fn explicit_file_wins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "locale = \"de\"\n").unwrap();
    let explicit = dir.path().join("ci.toml");
    fs::write(&explicit, "locale = \"fr\"\n").unwrap();
    let config = ProjectConfig::discover(Some(&explicit), dir.path()).unwrap();
    assert_eq!(config.locale, Some(Locale::Fr));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ProjectConfig::discover(Some(&dir.path().join("nope.toml")), dir.path());
    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn invalid_gate_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "[[gates]]\nmetric = \"LINE\"\nbaseline = \"indirect\"\nsource = \"delta\"\nthreshold = 0.0\n",
    )
    .unwrap();
    let result = ProjectConfig::from_file(&path);
    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn project_file_and_gate_file_load_the_same_gates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "locale = \"de\"\n\n[trend]\nbuild_count = 5\n\n[[gates]]\nmetric = \"BRANCH\"\nbaseline = \"modified_lines\"\nthreshold = 60\ncriticality = \"failure\"\n",
    )
    .unwrap();
    let project = ProjectConfig::from_file(&path).unwrap();
    let gates = covlens_gate::GateConfig::from_file(&path).unwrap();
    assert_eq!(project.quality.gates, gates.gates);
    assert_eq!(project.trend.build_count, 5);
}

#[test]
fn non_numeric_threshold_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[[gates]]\nmetric = \"LINE\"\nthreshold = nan\n").unwrap();
    let result = ProjectConfig::from_file(&path);
    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::InvalidData);
}
