//! Dataset validation against files on disk.

use esg_common::Dataset;
use esg_config::{validate_dataset, Severity};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_dataset(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write dataset");
    file
}

#[test]
fn builtin_dataset_round_trips_through_disk_and_stays_clean() {
    let file = write_dataset(&Dataset::builtin().to_json_pretty().unwrap());
    let dataset = Dataset::load(file.path()).unwrap();
    assert_eq!(dataset, Dataset::builtin());
    assert!(validate_dataset(&dataset).is_clean());
}

#[test]
fn landfilled_drift_is_an_error_per_point() {
    let file = write_dataset(
        r#"{
            "wasteTrend": [
                {"name": "2022", "Recycled": 75, "Landfilled": 25},
                {"name": "2023", "Recycled": 80, "Landfilled": 20},
                {"name": "2024", "Recycled": 82, "Landfilled": 18}
            ]
        }"#,
    );
    let dataset = Dataset::load(file.path()).unwrap();
    let report = validate_dataset(&dataset);

    let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["wasteTrend[0].Landfill", "wasteTrend[1].Landfill", "wasteTrend[2].Landfill"]
    );
}

#[test]
fn missing_scope_value_is_reported() {
    let file = write_dataset(
        r##"{
            "ghgEmissions": [
                {"name": "2023", "Scope 1": 210, "Scope 2": 145, "Scope 3": 2950},
                {"name": "2024", "Scope 1": 205, "Scope 2": 130}
            ],
            "scope3Breakdown": [{"name": "Purchased Goods", "value": 3100, "color": "#34d399"}]
        }"##,
    );
    let report = validate_dataset(&Dataset::load(file.path()).unwrap());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "ghgEmissions[1].Scope 3");
    assert_eq!(errors[0].severity, Severity::Error);
}

#[test]
fn bad_color_and_missing_narratives() {
    let file = write_dataset(
        r##"{
            "waterUsage": [
                {"name": "River Water", "value": 60, "color": "blue"},
                {"name": "Groundwater", "value": 40, "color": "#60a5fa"}
            ],
            "transitionRisks": [{"name": "Carbon Pricing", "impact": "Higher costs"}]
        }"##,
    );
    let report = validate_dataset(&Dataset::load(file.path()).unwrap());
    assert!(report.errors().any(|e| e.path == "waterUsage[0].color"));
    assert!(report
        .warnings()
        .any(|w| w.path == "transitionRisks[0].mitigation"));
    assert!(!report.errors().any(|e| e.path == "waterUsage"));
}

#[test]
fn report_serializes_for_machine_output() {
    let report = validate_dataset(&Dataset::default());
    let json = serde_json::to_value(&report).unwrap();
    let issues = json["issues"].as_array().unwrap();
    assert!(!issues.is_empty());
    assert_eq!(issues[0]["severity"], "warning");
    assert_eq!(issues[0]["path"], "ghgEmissions");
}

#[test]
fn null_values_load_as_gaps_and_are_reported() {
    let file = write_dataset(
        r#"{
            "ghgEmissions": [
                {"name": 2023, "Scope 1": 210, "Scope 2": 145, "Scope 3": 2950},
                {"name": 2024, "Scope 1": null, "Scope 2": 130, "Scope 3": 3100}
            ],
            "wasteTrend": null
        }"#,
    );
    let dataset = Dataset::load(file.path()).unwrap();
    assert_eq!(dataset.ghg_emissions[1].name, "2024");
    assert!(dataset.waste_trend.is_empty());

    let report = validate_dataset(&dataset);
    let errors: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
    assert_eq!(errors, vec!["ghgEmissions[1].Scope 1"]);
    assert!(report.warnings().any(|w| w.path == "wasteTrend"));
}

#[test]
fn malformed_entries_are_dropped_with_errors() {
    let file = write_dataset(
        r##"{
            "waterUsage": [
                {"name": "River Water", "value": 60, "color": "#3b82f6"},
                {"name": "Groundwater", "value": "forty", "color": "#60a5fa"}
            ],
            "physicalRisks": "see appendix"
        }"##,
    );
    let dataset = Dataset::load(file.path()).unwrap();
    assert_eq!(dataset.water_usage.len(), 1);

    let report = validate_dataset(&dataset);
    let errors: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
    assert!(errors.contains(&"waterUsage[1]"), "{errors:?}");
    assert!(errors.contains(&"physicalRisks"), "{errors:?}");
    // The remaining share no longer sums to 100.
    assert!(errors.contains(&"waterUsage"), "{errors:?}");
}
