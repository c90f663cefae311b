//! End-to-end tests for the esg-dash binary.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Command isolated from the user's environment and config directory.
fn esg_dash(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("esg-dash");
    cmd.env_remove("ESG_DASH_DATASET")
        .env_remove("ESG_DASH_CONFIG")
        .env_remove("ESG_DASH_CONFIG_DIR")
        .env_remove("ESG_DASH_LOG")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

const DRIFTED_DATASET: &str = r#"{
    "wasteTrend": [
        {"name": "2022", "Recycled": 75, "Landfilled": 25},
        {"name": "2023", "Recycled": 80, "Landfilled": 20}
    ]
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

// ============================================================================
// build
// ============================================================================

mod build {
    use super::*;

    #[test]
    fn writes_index_html() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("dist");

        esg_dash(tmp.path())
            .args(["build", "--output"])
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("index.html"));

        let html = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<base href="/sri-lanka-apparel-dashboard-/">"#));
        assert!(html.contains("Apparel Climate Risk"));
    }

    #[test]
    fn applies_cli_overrides() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("site");

        esg_dash(tmp.path())
            .args(["build", "--theme", "dark", "--base-path", "/esg/", "--title", "Board Pack", "-o"])
            .arg(&out)
            .assert()
            .success();

        let html = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(r#"class="dark""#));
        assert!(html.contains(r#"<base href="/esg/">"#));
        assert!(html.contains("<title>Board Pack</title>"));
    }

    #[test]
    fn strict_build_fails_on_drifted_dataset() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "data.json", DRIFTED_DATASET);
        let out = tmp.path().join("dist");

        esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .args(["build", "--strict", "--output"])
            .arg(&out)
            .assert()
            .code(12)
            .stderr(predicate::str::contains("failed validation"));
        assert!(!out.join("index.html").exists());
    }

    #[test]
    fn lenient_build_renders_drifted_dataset() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "data.json", DRIFTED_DATASET);
        let out = tmp.path().join("dist");

        esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .args(["build", "--output"])
            .arg(&out)
            .assert()
            .success();
        assert!(out.join("index.html").exists());
    }

    #[test]
    fn build_survives_null_values_and_arrays() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(
            tmp.path(),
            "nulls.json",
            r#"{"ghgEmissions": [{"name": 2024, "Scope 1": null, "Scope 2": 130, "Scope 3": 3100}], "wasteTrend": null}"#,
        );
        let out = tmp.path().join("dist");

        esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .args(["build", "--output"])
            .arg(&out)
            .assert()
            .success();

        let html = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("No data available"));
        assert!(html.contains(r#""categories":["2024"]"#));
    }

    #[test]
    fn uses_config_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("public");
        let config = serde_json::json!({
            "build": {"output_dir": out, "file_name": "dashboard.html", "base_path": null},
            "report": {"title": "From Config"}
        });
        let config_path = write_file(tmp.path(), "config.json", &config.to_string());

        esg_dash(tmp.path())
            .arg("--config")
            .arg(&config_path)
            .arg("build")
            .assert()
            .success();

        let html = std::fs::read_to_string(out.join("dashboard.html")).unwrap();
        assert!(html.contains("<title>From Config</title>"));
        assert!(!html.contains("<base "));
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .args(["--config", "/nonexistent/esg-config.json", "build"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("config file not found"));
    }

    #[test]
    fn invalid_base_path_is_config_error() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .args(["build", "--base-path", "relative"])
            .arg("--output")
            .arg(tmp.path())
            .assert()
            .code(11);
    }
}

// ============================================================================
// validate
// ============================================================================

mod validate {
    use super::*;

    #[test]
    fn builtin_dataset_is_clean() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .arg("validate")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("built-in dataset: ok"));
    }

    #[test]
    fn drift_reports_path_and_exit_code() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "data.json", DRIFTED_DATASET);

        esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .arg("validate")
            .assert()
            .code(12)
            .stdout(predicate::str::contains("error: wasteTrend[0].Landfill"))
            .stdout(predicate::str::contains("error: wasteTrend[1].Landfill"));
    }

    #[test]
    fn warnings_only_exit_one() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "empty.json", "{}");

        esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .arg("validate")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("0 errors, 5 warnings"));
    }

    #[test]
    fn json_output() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "data.json", DRIFTED_DATASET);

        let output = esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .args(["validate", "--format", "json"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(12));

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["summary"]["errors"], 2);
        assert_eq!(json["source"], "CLI argument");
        assert!(json["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i["path"] == "wasteTrend[0].Landfill" && i["severity"] == "error"));
    }

    #[test]
    fn dataset_from_environment() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "data.json", DRIFTED_DATASET);

        let output = esg_dash(tmp.path())
            .env("ESG_DASH_DATASET", &dataset)
            .args(["validate", "--format", "json"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(12));

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["source"], "environment variable");
        assert_eq!(json["dataset"], dataset.display().to_string());
    }

    #[test]
    fn config_from_environment_that_is_missing() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .env("ESG_DASH_CONFIG", tmp.path().join("missing.json"))
            .args(["config", "show"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("config file not found"));
    }

    #[test]
    fn wrongly_typed_values_are_reported_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(
            tmp.path(),
            "typed.json",
            r#"{"ghgEmissions": [{"name": 2024, "Scope 1": null, "Scope 2": 130, "Scope 3": 3100}], "wasteTrend": 0}"#,
        );

        let output = esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .args(["validate", "--format", "json"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(12));

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let errors: Vec<_> = json["issues"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|i| i["severity"] == "error")
            .map(|i| i["path"].as_str().unwrap().to_string())
            .collect();
        assert!(errors.contains(&"ghgEmissions[0].Scope 1".to_string()), "{errors:?}");
        assert!(errors.contains(&"wasteTrend".to_string()), "{errors:?}");
    }

    #[test]
    fn malformed_dataset_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let dataset = write_file(tmp.path(), "bad.json", "{\"ghgEmissions\": [");

        esg_dash(tmp.path())
            .arg("--dataset")
            .arg(&dataset)
            .arg("validate")
            .assert()
            .code(11)
            .stderr(predicate::str::contains("failed to parse dataset"));
    }
}

// ============================================================================
// dataset / config / version
// ============================================================================

mod inspect {
    use super::*;

    #[test]
    fn dataset_prints_builtin_json() {
        let tmp = TempDir::new().unwrap();
        let output = esg_dash(tmp.path()).arg("dataset").output().unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["ghgEmissions"][2]["Scope 3"], 3100.0);
        assert_eq!(json["wasteTrend"][0]["Landfill"], 25.0);
    }

    #[test]
    fn dataset_schema() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .args(["dataset", "--schema"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"ghgEmissions\""))
            .stdout(predicate::str::contains("\"$schema\""));
    }

    #[test]
    fn config_default() {
        let tmp = TempDir::new().unwrap();
        let output = esg_dash(tmp.path()).args(["config", "default"]).output().unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["schema_version"], "1.0.0");
        assert_eq!(json["build"]["output_dir"], "dist");
        assert_eq!(json["report"]["theme"], "light");
    }

    #[test]
    fn config_show_reads_config_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("conf");
        std::fs::create_dir_all(&dir).unwrap();
        write_file(&dir, "config.json", r#"{"report": {"theme": "auto"}}"#);

        let output = esg_dash(tmp.path())
            .env("ESG_DASH_CONFIG_DIR", &dir)
            .args(["config", "show"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["report"]["theme"], "auto");
    }

    #[test]
    fn version() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("esg-dash "))
            .stdout(predicate::str::contains("dataset schema version: 1.0.0"));
    }
}

// ============================================================================
// Argument errors
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn unknown_command_exits_with_args_error() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn invalid_theme_exits_with_args_error() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .args(["build", "--theme", "sepia"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown theme"));
    }

    #[test]
    fn help_succeeds() {
        let tmp = TempDir::new().unwrap();
        esg_dash(tmp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("build"))
            .stdout(predicate::str::contains("validate"));
    }
}
