//! HTML dashboard invariant tests.
//!
//! These tests validate the generated HTML structure without requiring a browser:
//! - Required page structure and sections present
//! - CDN URLs are pinned, with SRI integrity when a digest is configured
//! - Dataset strings are escaped
//! - Absent data degrades to empty visuals instead of failing

use esg_common::Dataset;
use esg_report::config::{CdnLibrary, ReportConfig, ReportTheme};
use esg_report::generator::ReportGenerator;
use regex::Regex;

fn builtin_html(config: ReportConfig) -> String {
    ReportGenerator::new(config)
        .generate(&Dataset::builtin())
        .expect("render builtin dataset")
}

/// Extract the JSON payload assigned to `REPORT_DATA`.
fn report_payload(html: &str) -> serde_json::Value {
    let re = Regex::new(r"const REPORT_DATA = (\{.*\});").expect("valid regex");
    let caps = re.captures(html).expect("REPORT_DATA present");
    serde_json::from_str(&caps[1]).expect("REPORT_DATA is valid JSON")
}

// ============================================================================
// HTML Structure Tests
// ============================================================================

mod structure {
    use super::*;

    #[test]
    fn test_html_doctype_present() {
        let html = builtin_html(ReportConfig::default());
        assert!(
            html.starts_with("<!DOCTYPE html>"),
            "HTML must start with DOCTYPE declaration"
        );
    }

    #[test]
    fn test_html_has_required_meta_tags() {
        let html = builtin_html(ReportConfig::default());
        assert!(html.contains(r#"charset="UTF-8""#));
        assert!(html.contains(r#"name="viewport""#));
        assert!(
            html.contains(r#"name="generator" content="esg-dash "#),
            "HTML must have generator meta tag with version"
        );
    }

    #[test]
    fn test_html_has_title() {
        let html = builtin_html(ReportConfig::new().with_title("Custom Dashboard"));
        assert!(html.contains("<title>Custom Dashboard</title>"));
        assert!(html.contains(r#"<h1 class="text-3xl font-bold tracking-tight">Custom Dashboard</h1>"#));
    }

    #[test]
    fn test_html_has_body_structure() {
        let html = builtin_html(ReportConfig::default());
        assert!(html.contains("<body>"));
        assert!(html.contains("</body>"));
        assert!(html.contains("<header"));
        assert!(html.contains("<main>"));
        assert!(html.contains("<footer"));
    }

    #[test]
    fn test_all_sections_present() {
        let html = builtin_html(ReportConfig::default());
        for id in [
            r#"id="headlines""#,
            r#"id="metrics""#,
            r#"id="risks""#,
            r#"id="physical-risks""#,
            r#"id="transition-risks""#,
            r#"id="climate-opportunities""#,
        ] {
            assert!(html.contains(id), "missing {id}");
        }
    }

    #[test]
    fn test_one_container_per_chart() {
        let html = builtin_html(ReportConfig::default());
        for id in ["ghg-by-scope", "scope3-breakdown", "water-sources", "water-trend", "waste-trend"] {
            let needle = format!(r#"id="chart-{id}""#);
            assert_eq!(html.matches(&needle).count(), 1, "chart container {id}");
        }
    }

    #[test]
    fn test_headline_cards_in_order() {
        let html = builtin_html(ReportConfig::default());
        let re = Regex::new(r#"data-headline="([a-z_]+)""#).unwrap();
        let ids: Vec<_> = re.captures_iter(&html).map(|c| c[1].to_string()).collect();
        assert_eq!(
            ids,
            vec!["ghg_total", "water_usage", "waste_recycled", "sustainable_sourcing"]
        );
    }

    #[test]
    fn test_base_path_emitted() {
        let html = builtin_html(ReportConfig::new().with_base_path("/sri-lanka-apparel-dashboard-/"));
        assert!(html.contains(r#"<base href="/sri-lanka-apparel-dashboard-/">"#));

        let html = builtin_html(ReportConfig::default());
        assert!(!html.contains("<base "));
    }
}

// ============================================================================
// Payload Tests
// ============================================================================

mod payload {
    use super::*;

    #[test]
    fn test_payload_lists_charts() {
        let payload = report_payload(&builtin_html(ReportConfig::default()));
        let charts = payload["charts"].as_array().unwrap();
        assert_eq!(charts.len(), 5);
        assert_eq!(charts[0]["id"], "ghg-by-scope");
        assert_eq!(charts[0]["series"][0]["color"], "#ef4444");
        assert_eq!(charts[1]["slices"][0]["name"], "Purchased Goods & Services");
        assert_eq!(charts[1]["slices"][0]["label"], "58%");
        assert!(charts[1]["slices"][0].get("percent").is_none());
    }

    #[test]
    fn test_pie_labels_come_from_payload() {
        let html = builtin_html(ReportConfig::default());
        assert!(html.contains("percentLabel: s.label"));
        assert!(!html.contains("p.percent"));
    }

    #[test]
    fn test_payload_has_both_palettes() {
        let payload = report_payload(&builtin_html(ReportConfig::default()));
        assert_eq!(payload["palettes"]["light"]["grid"], "#e5e7eb");
        assert_eq!(payload["palettes"]["dark"]["grid"], "#4b5563");
        let mut keys: Vec<_> = payload["palettes"]["light"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["axis", "grid", "tooltip_background", "tooltip_border", "tooltip_label"]);
    }

    #[test]
    fn test_script_breakout_is_neutralized() {
        let json = r##"{"scope3Breakdown": [{"name": "</script><b>x", "value": 1, "color": "#fff"}]}"##;
        let html = ReportGenerator::default_config()
            .generate_from_json(json)
            .unwrap();
        assert_eq!(html.matches("</script>").count(), 2, "only the two real script closers");
        let payload = report_payload(&html);
        assert_eq!(payload["charts"][1]["slices"][0]["name"], "</script><b>x");
    }
}

// ============================================================================
// Dark Mode Tests
// ============================================================================

mod dark_mode {
    use super::*;

    #[test]
    fn test_theme_class_on_root() {
        assert!(builtin_html(ReportConfig::default().with_theme(ReportTheme::Dark))
            .contains(r#"<html lang="en" class="dark">"#));
        assert!(builtin_html(ReportConfig::default().with_theme(ReportTheme::Light))
            .contains(r#"<html lang="en" class="light">"#));
        assert!(builtin_html(ReportConfig::default().with_theme(ReportTheme::Auto))
            .contains(r#"<html lang="en" class="">"#));
    }

    #[test]
    fn test_switch_reflects_initial_state() {
        let dark = builtin_html(ReportConfig::default().with_theme(ReportTheme::Dark));
        assert!(dark.contains(r#"id="dark-mode" role="switch" class="switch" checked>"#));

        let light = builtin_html(ReportConfig::default());
        assert!(light.contains(r#"id="dark-mode" role="switch" class="switch">"#));
        assert!(light.contains(r#"<label for="dark-mode" class="text-sm">Dark Mode</label>"#));
    }

    #[test]
    fn test_theme_does_not_change_payload() {
        let light = report_payload(&builtin_html(ReportConfig::default().with_theme(ReportTheme::Light)));
        let dark = report_payload(&builtin_html(ReportConfig::default().with_theme(ReportTheme::Dark)));
        assert_eq!(light, dark);
    }

    #[test]
    fn test_toggle_script_present() {
        let html = builtin_html(ReportConfig::default());
        assert!(html.contains("function applyDarkMode("));
        assert!(html.contains("prefers-color-scheme: dark"));
    }
}

// ============================================================================
// CDN Pinning and SRI Tests
// ============================================================================

mod cdn_pinning {
    use super::*;

    #[test]
    fn test_cdn_urls_have_pinned_versions() {
        let html = builtin_html(ReportConfig::default());
        let cdn_url_pattern =
            Regex::new(r#"cdn\.jsdelivr\.net/npm/([a-z-]+)@(\d+\.\d+\.\d+)/"#).expect("valid regex");

        let packages: Vec<_> = cdn_url_pattern
            .captures_iter(&html)
            .map(|c| c[1].to_string())
            .collect();
        assert!(packages.contains(&"echarts".to_string()));
        assert!(packages.contains(&"tailwindcss".to_string()));
    }

    fn cdn_tags(html: &str) -> Vec<String> {
        let tag_pattern = Regex::new(r#"<(script src|link rel="stylesheet" href)="https://[^"]+"[^>]*>"#)
            .expect("valid regex");
        tag_pattern.find_iter(html).map(|m| m.as_str().to_string()).collect()
    }

    #[test]
    fn test_default_tags_carry_no_unverified_digest() {
        let tags = cdn_tags(&builtin_html(ReportConfig::default()));
        assert_eq!(tags.len(), 2);
        for tag in &tags {
            assert!(!tag.contains("integrity="), "no digest configured: {tag}");
            assert!(tag.contains(r#"crossorigin="anonymous""#));
        }
    }

    #[test]
    fn test_configured_digest_is_emitted() {
        let mut config = ReportConfig::default();
        config.cdn_config.libraries.insert(
            "echarts".to_string(),
            CdnLibrary::new("5.5.0")
                .with_path("dist/echarts.min.js")
                .with_sri("sha384-pinned+digest/value"),
        );
        let tags = cdn_tags(&builtin_html(config));

        let script = tags.iter().find(|t| t.contains("echarts@5.5.0")).unwrap();
        assert!(script.contains(r#"integrity="sha384-pinned+digest/value""#));
        let stylesheet = tags.iter().find(|t| t.contains("tailwindcss@")).unwrap();
        assert!(!stylesheet.contains("integrity="));
    }

    #[test]
    fn test_unavailable_library_is_announced() {
        let html = builtin_html(ReportConfig::default());
        assert!(html.contains("Chart library unavailable"));
    }

    #[test]
    fn test_removed_library_not_loaded() {
        let mut config = ReportConfig::default();
        config.cdn_config.libraries.remove("echarts");
        let html = builtin_html(config);
        assert!(!html.contains("echarts@"));
        assert!(html.contains("typeof echarts === 'undefined'"));
    }
}

// ============================================================================
// Degradation Tests
// ============================================================================

mod degradation {
    use super::*;

    #[test]
    fn test_drifted_dataset_still_renders() {
        let json = r#"{
            "wasteTrend": [
                {"name": "2022", "Recycled": 75, "Landfilled": 25},
                {"name": "2023", "Recycled": 80, "Landfilled": 20}
            ]
        }"#;
        let html = ReportGenerator::default_config()
            .generate_from_json(json)
            .unwrap();
        let payload = report_payload(&html);
        let waste = &payload["charts"][4];
        assert_eq!(waste["id"], "waste-trend");
        assert_eq!(waste["series"][1]["name"], "Landfill");
        assert!(waste["series"][1]["data"][0].is_null());
        assert!(waste["series"][1]["data"][1].is_null());
    }

    #[test]
    fn test_all_gap_chart_shows_empty_notice() {
        let json = r#"{
            "waterTrend": [
                {"name": "2022", "Withdrew": 100, "Discharged": 95},
                {"name": "2023", "Withdrew": 95, "Discharged": 90}
            ]
        }"#;
        let html = ReportGenerator::default_config()
            .generate_from_json(json)
            .unwrap();
        let card = Regex::new(r#"(?s)Water Withdrawal &amp; Discharge.*?id="chart-water-trend""#).unwrap();
        let section = card.find(&html).expect("water trend card").as_str();
        assert!(section.contains("No data available"));
    }

    #[test]
    fn test_malformed_values_render() {
        let json = r#"{
            "ghgEmissions": [
                {"name": 2022, "Scope 1": null, "Scope 2": 150, "Scope 3": 2800},
                {"name": 2023, "Scope 1": 210, "Scope 2": "n/a", "Scope 3": 2950}
            ],
            "wasteTrend": null,
            "waterUsage": "unknown"
        }"#;
        let html = ReportGenerator::default_config()
            .generate_from_json(json)
            .unwrap();
        let payload = report_payload(&html);

        let ghg = &payload["charts"][0];
        assert_eq!(ghg["categories"], serde_json::json!(["2022", "2023"]));
        assert!(ghg["series"][0]["data"][0].is_null());
        assert_eq!(ghg["series"][0]["data"][1], 210.0);
        assert!(ghg["series"][1]["data"][1].is_null());

        // waterUsage, waterTrend and wasteTrend
        assert!(payload["charts"][2].get("slices").is_none());
        assert!(payload["charts"][4].get("categories").is_none());
        assert_eq!(html.matches("No data available").count(), 4);
    }

    #[test]
    fn test_empty_dataset_shows_empty_notices() {
        let html = ReportGenerator::default_config()
            .generate(&Dataset::default())
            .unwrap();
        assert_eq!(html.matches("No data available").count(), 5);
    }

    #[test]
    fn test_missing_narrative_fields() {
        let json = r#"{"climateOpportunities": [{"name": "Green Bonds", "benefit": "  "}]}"#;
        let html = ReportGenerator::default_config()
            .generate_from_json(json)
            .unwrap();
        assert!(html.contains("Green Bonds"));
        assert_eq!(html.matches("Not provided").count(), 2);
    }

    #[test]
    fn test_generation_does_not_mutate_dataset() {
        let dataset = Dataset::builtin();
        let before = dataset.clone();
        let _ = ReportGenerator::default_config().generate(&dataset).unwrap();
        assert_eq!(dataset, before);
    }
}
