//! Report generator implementation.

use crate::config::{CdnLibrary, ReportConfig, ReportTheme};
use crate::error::Result;
use crate::sections::headlines::tone_class;
use crate::sections::*;
use crate::theme::{PaletteSet, ViewState};

use chrono::{DateTime, Utc};
use esg_common::{Dataset, HeadlineMetric, Icon};
use serde::Serialize;
use tracing::{debug, info};

/// Complete report data structure.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Headline cards section.
    pub headlines: Option<HeadlinesSection>,
    /// Charts section.
    pub metrics: Option<MetricsSection>,
    /// Risks and opportunities section.
    pub risks: Option<RisksSection>,
}

/// Data embedded in the page for the chart script.
///
/// Holds no theme information beyond both palettes, so light and dark
/// renders of the same dataset embed the same payload.
#[derive(Debug, Serialize)]
struct PagePayload<'a> {
    charts: &'a [ChartSpec],
    palettes: PaletteSet,
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Compose section data for a dataset. The dataset is only read.
    pub fn build_data(&self, dataset: &Dataset) -> ReportData {
        let sections = &self.config.sections;
        ReportData {
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            headlines: sections
                .headlines
                .then(|| HeadlinesSection::from_dataset(dataset)),
            metrics: sections.metrics.then(|| MetricsSection::from_dataset(dataset)),
            risks: sections.risks.then(|| RisksSection::from_dataset(dataset)),
        }
    }

    /// Generate the page for a dataset.
    pub fn generate(&self, dataset: &Dataset) -> Result<String> {
        let data = self.build_data(dataset);
        self.render(&data)
    }

    /// Generate the page from dataset JSON.
    pub fn generate_from_json(&self, json: &str) -> Result<String> {
        let dataset = Dataset::from_json(json)?;
        self.generate(&dataset)
    }

    /// Render composed report data to HTML.
    pub fn render(&self, data: &ReportData) -> Result<String> {
        debug!(theme = %self.config.theme, "Rendering dashboard");
        let html = self.generate_html(data)?;

        // Optionally minify
        let output = if cfg!(debug_assertions) {
            html
        } else {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        };

        info!(
            bytes = output.len(),
            title = %self.config.title,
            charts = data.metrics.as_ref().map_or(0, |m| m.charts.len()),
            "Dashboard generated"
        );

        Ok(output)
    }

    fn generate_html(&self, data: &ReportData) -> Result<String> {
        let view = ViewState::from_theme(self.config.theme);
        let cdn_base = &self.config.cdn_config.base_url;
        let libs = &self.config.cdn_config.libraries;

        // Build CDN style/script tags
        let mut cdn_styles = String::new();
        let mut cdn_scripts = String::new();

        if let Some(lib) = libs.get("tailwindcss") {
            cdn_styles.push_str(&format!(
                r#"<link rel="stylesheet" href="{}"{} crossorigin="anonymous">"#,
                html_escape(&lib.url(cdn_base, "tailwindcss")),
                integrity_attr(lib)
            ));
        }

        if let Some(lib) = libs.get("echarts") {
            cdn_scripts.push_str(&format!(
                r#"<script src="{}"{} crossorigin="anonymous"></script>"#,
                html_escape(&lib.url(cdn_base, "echarts")),
                integrity_attr(lib)
            ));
        }

        let base_tag = self
            .config
            .base_path
            .as_deref()
            .map(|p| format!(r#"<base href="{}">"#, html_escape(p)))
            .unwrap_or_default();

        // Serialize chart data for JavaScript
        let charts = data
            .metrics
            .as_ref()
            .map(|m| m.charts.as_slice())
            .unwrap_or(&[]);
        let payload = PagePayload {
            charts,
            palettes: PaletteSet::default(),
        };
        let data_json = script_safe_json(&serde_json::to_string(&payload)?);

        let mut main = String::new();
        if let Some(ref headlines) = data.headlines {
            main.push_str(&self.generate_headlines(headlines));
        }
        if let Some(ref metrics) = data.metrics {
            main.push_str(&self.generate_metrics(metrics));
        }
        if let Some(ref risks) = data.risks {
            main.push_str(&self.generate_risks(risks));
        }

        Ok(format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="esg-dash {version}">
    {base_tag}
    {cdn_styles}
    <style>{styles}</style>
</head>
<body>
    <div class="max-w-7xl mx-auto px-4 py-8">
        <header class="flex flex-col sm:flex-row justify-between items-start sm:items-center mb-8 gap-4">
            <div>
                <h1 class="text-3xl font-bold tracking-tight">{title}</h1>
                <p class="text-lg muted mt-2">{subtitle}</p>
            </div>
            <div class="flex items-center gap-2 no-print">
                <label for="dark-mode" class="text-sm">Dark Mode</label>
                <input type="checkbox" id="dark-mode" role="switch" class="switch"{checked}>
            </div>
        </header>

        <main>
            {main}
        </main>

        <footer class="mt-8 pt-4 border-t text-sm text-center muted">
            <p>Generated: {generated_at} | esg-dash v{version}</p>
        </footer>
    </div>

    {cdn_scripts}
    <script>
        const REPORT_DATA = {data_json};
        {script}
    </script>
</body>
</html>"##,
            theme_class = match self.config.theme {
                ReportTheme::Auto => "",
                _ => view.root_class(),
            },
            title = html_escape(&self.config.title),
            subtitle = html_escape(&self.config.subtitle),
            version = env!("CARGO_PKG_VERSION"),
            base_tag = base_tag,
            cdn_styles = cdn_styles,
            styles = BASE_STYLES,
            checked = if view.is_dark() { " checked" } else { "" },
            main = main,
            generated_at = data.generated_at.format("%Y-%m-%d %H:%M UTC"),
            cdn_scripts = cdn_scripts,
            data_json = data_json,
            script = DASHBOARD_SCRIPT,
        ))
    }

    fn generate_headlines(&self, section: &HeadlinesSection) -> String {
        let cards: String = section.cards.iter().map(headline_card).collect();
        format!(
            r##"<section id="headlines" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-8">
    {cards}
</section>
"##
        )
    }

    fn generate_metrics(&self, section: &MetricsSection) -> String {
        let cards: Vec<String> = section.charts.iter().map(chart_card).collect();
        let rows: String = cards
            .chunks(2)
            .map(|pair| {
                format!(
                    r#"<div class="grid grid-cols-1 lg:grid-cols-2 gap-8 mb-8">{}</div>"#,
                    pair.concat()
                )
            })
            .collect();
        format!(
            r##"<section id="metrics">
    {rows}
</section>
"##
        )
    }

    fn generate_risks(&self, section: &RisksSection) -> String {
        let lists: String = section.lists.iter().map(narrative_list).collect();
        format!(
            r##"<section id="risks" class="grid grid-cols-1 lg:grid-cols-3 gap-8 mb-8">
    {lists}
</section>
"##
        )
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::default_config()
    }
}

fn headline_card(card: &HeadlineMetric) -> String {
    let unit = card
        .display_unit()
        .map(|u| format!(r#" <span class="text-sm font-normal muted">{}</span>"#, html_escape(u)))
        .unwrap_or_default();
    format!(
        r##"<div class="card" data-headline="{id}">
        <div class="flex flex-row items-center justify-between pb-2">
            <h3 class="text-sm font-medium muted">{title}</h3>
            {icon}
        </div>
        <div class="text-2xl font-bold">{value}{unit}</div>
        <p class="text-xs mt-1 {tone}">{note}</p>
    </div>"##,
        id = html_escape(&card.id),
        title = html_escape(&card.title),
        icon = icon_svg(card.icon, "icon muted"),
        value = html_escape(&card.display_value()),
        unit = unit,
        tone = tone_class(card.tone),
        note = html_escape(&card.note),
    )
}

fn chart_card(chart: &ChartSpec) -> String {
    let empty_notice = if chart.is_empty() {
        r#"<p class="chart-empty muted">No data available</p>"#
    } else {
        ""
    };
    format!(
        r##"<div class="card">
        <h3 class="text-lg font-semibold">{title}</h3>
        <p class="text-sm muted mb-4">{description}</p>
        {empty_notice}
        <div id="chart-{id}" class="chart" data-kind="{kind}"></div>
    </div>"##,
        title = html_escape(&chart.title),
        description = html_escape(&chart.description),
        empty_notice = empty_notice,
        id = html_escape(&chart.id),
        kind = match chart.kind {
            esg_common::ChartKind::Bar => "bar",
            esg_common::ChartKind::Line => "line",
            esg_common::ChartKind::Pie => "pie",
        },
    )
}

fn narrative_list(list: &NarrativeList) -> String {
    let icon_class = if list.accent { "icon accent" } else { "icon muted" };
    let items: String = list
        .items
        .iter()
        .map(|item| {
            let fields: String = item
                .fields
                .iter()
                .map(|f| {
                    let value = match f.value.as_deref() {
                        Some(v) if !v.trim().is_empty() => html_escape(v),
                        _ => r#"<em class="not-provided">Not provided</em>"#.to_string(),
                    };
                    format!(
                        r#"<p class="text-sm muted"><span class="field-label">{}:</span> {}</p>"#,
                        f.label, value
                    )
                })
                .collect();
            format!(
                r##"<div class="narrative">
                <div class="flex items-center gap-2">
                    {icon}
                    <h5 class="font-semibold text-base">{name}</h5>
                </div>
                {fields}
            </div>"##,
                icon = icon_svg(list.icon, icon_class),
                name = html_escape(&item.name),
                fields = fields,
            )
        })
        .collect();

    format!(
        r##"<div class="card" id="{id}">
        <h3 class="text-lg font-semibold">{title}</h3>
        <p class="text-sm muted mb-4">{description}</p>
        <div class="grid grid-cols-1 gap-4">
            {items}
        </div>
    </div>"##,
        id = list.id,
        title = html_escape(list.title),
        description = html_escape(list.description),
        items = items,
    )
}

/// Inline SVG for a card icon (lucide outlines).
fn icon_svg(icon: Icon, class: &str) -> String {
    let paths = match icon {
        Icon::Activity => r#"<path d="M22 12h-4l-3 9L9 3l-3 9H2"/>"#,
        Icon::Droplets => {
            r#"<path d="M7 16.3c2.2 0 4-1.83 4-4.05 0-1.16-.57-2.26-1.71-3.19S7.29 6.75 7 5.3c-.29 1.45-1.14 2.84-2.29 3.76S3 11.1 3 12.25c0 2.22 1.8 4.05 4 4.05z"/><path d="M12.56 6.6A10.97 10.97 0 0 0 14 3.02c.5 2.5 2 4.9 4 6.5s3 3.5 3 5.5a6.98 6.98 0 0 1-11.91 4.97"/>"#
        }
        Icon::Recycle => {
            r#"<path d="M7 19H4.815a1.83 1.83 0 0 1-1.57-.881 1.785 1.785 0 0 1-.004-1.784L7.196 9.5"/><path d="M11 19h8.203a1.83 1.83 0 0 0 1.556-.89 1.784 1.784 0 0 0 0-1.775l-1.226-2.12"/><path d="m14 16-3 3 3 3"/><path d="M8.293 13.596 7.196 9.5 3.1 10.598"/><path d="m9.344 5.811 1.093-1.892A1.83 1.83 0 0 1 11.985 3a1.784 1.784 0 0 1 1.546.888l3.943 6.843"/><path d="m13.378 9.633 4.096 1.098 1.097-4.096"/>"#
        }
        Icon::Leaf => {
            r#"<path d="M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.48 19 2c1 2 2 4.18 2 8 0 5.5-4.78 10-10 10Z"/><path d="M2 21c0-3 1.85-5.36 5.08-6C9.5 14.52 12 13 13 12"/>"#
        }
        Icon::Cloud => r#"<path d="M17.5 19H9a7 7 0 1 1 6.71-9h1.79a4.5 4.5 0 1 1 0 9Z"/>"#,
        Icon::Scale => {
            r#"<path d="m16 16 3-8 3 8c-.87.65-1.92 1-3 1s-2.13-.35-3-1Z"/><path d="m2 16 3-8 3 8c-.87.65-1.92 1-3 1s-2.13-.35-3-1Z"/><path d="M7 21h10"/><path d="M12 3v18"/><path d="M3 7h2c2 0 5-1 7-2 2 1 5 2 7 2h2"/>"#
        }
    };
    format!(
        r#"<svg class="{class}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">{paths}</svg>"#
    )
}

/// ` integrity="..."` for a pinned digest, or nothing when none is configured.
fn integrity_attr(lib: &CdnLibrary) -> String {
    lib.sri
        .as_deref()
        .map(|sri| format!(r#" integrity="{}""#, html_escape(sri)))
        .unwrap_or_default()
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Make serialized JSON safe to embed inside a `<script>` element.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

const BASE_STYLES: &str = r#"
        :root {
            --bg-primary: #f9fafb;
            --bg-card: #ffffff;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --text-label: #374151;
            --border-color: #e5e7eb;
            --accent-color: #22c55e;
            --negative-color: #ef4444;
        }
        .dark {
            --bg-primary: #111827;
            --bg-card: #1f2937;
            --text-primary: #f3f4f6;
            --text-secondary: #9ca3af;
            --text-label: #d1d5db;
            --border-color: #374151;
            --accent-color: #4ade80;
            --negative-color: #f87171;
        }
        body {
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
        }
        .card {
            background-color: var(--bg-card);
            border-radius: 0.75rem;
            box-shadow: 0 4px 6px -1px rgb(0 0 0 / 0.1);
            padding: 1.5rem;
        }
        .muted { color: var(--text-secondary); }
        .tone-positive { color: var(--accent-color); }
        .tone-negative { color: var(--negative-color); }
        .icon { width: 1rem; height: 1rem; flex-shrink: 0; }
        .icon.accent { color: var(--accent-color); }
        .narrative {
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 1rem;
            display: flex;
            flex-direction: column;
            gap: 0.5rem;
        }
        .field-label { font-weight: 500; color: var(--text-label); }
        .not-provided { opacity: 0.7; }
        .chart { width: 100%; height: 20rem; }
        .chart-empty { text-align: center; padding-top: 1rem; }
        .switch { width: 2.25rem; height: 1.25rem; cursor: pointer; accent-color: var(--accent-color); }
        @media print {
            .no-print { display: none !important; }
            .card { page-break-inside: avoid; }
        }
"#;

const DASHBOARD_SCRIPT: &str = r#"
        const root = document.documentElement;
        const toggle = document.getElementById('dark-mode');
        const chartInstances = [];

        function currentPalette() {
            return root.classList.contains('dark') ? REPORT_DATA.palettes.dark : REPORT_DATA.palettes.light;
        }

        function chartOption(spec, palette) {
            const tooltip = {
                backgroundColor: palette.tooltip_background,
                borderColor: palette.tooltip_border,
                borderRadius: 8,
                textStyle: { color: palette.tooltip_label },
            };
            const legend = { bottom: 0, textStyle: { color: palette.axis } };
            if (spec.kind === 'pie') {
                return {
                    tooltip: Object.assign({ trigger: 'item' }, tooltip),
                    legend,
                    series: [{
                        type: 'pie',
                        radius: '70%',
                        center: ['50%', '45%'],
                        label: { position: 'inside', color: '#fff', formatter: p => p.data.percentLabel },
                        data: (spec.slices || []).map(s => ({ name: s.name, value: s.value, percentLabel: s.label, itemStyle: { color: s.color } })),
                    }],
                };
            }
            const axis = { axisLine: { lineStyle: { color: palette.axis } }, axisLabel: { color: palette.axis } };
            return {
                tooltip: Object.assign({ trigger: 'axis' }, tooltip),
                legend,
                grid: { left: 56, right: 16, top: 16, bottom: 48 },
                xAxis: Object.assign({ type: 'category', data: spec.categories || [] }, axis),
                yAxis: Object.assign({ type: 'value', splitLine: { lineStyle: { type: 'dashed', color: palette.grid } } }, axis),
                series: (spec.series || []).map(s => ({
                    name: s.name,
                    type: spec.kind,
                    stack: s.stack,
                    smooth: spec.kind === 'line',
                    itemStyle: { color: s.color },
                    lineStyle: spec.kind === 'line' ? { color: s.color } : undefined,
                    emphasis: { focus: 'series' },
                    data: s.data,
                })),
            };
        }

        function renderCharts() {
            if (typeof echarts === 'undefined') {
                REPORT_DATA.charts.forEach(spec => {
                    const el = document.getElementById('chart-' + spec.id);
                    if (el) el.innerHTML = '<p class="chart-empty muted">Chart library unavailable</p>';
                });
                return;
            }
            while (chartInstances.length) chartInstances.pop().dispose();
            const palette = currentPalette();
            REPORT_DATA.charts.forEach(spec => {
                const el = document.getElementById('chart-' + spec.id);
                if (!el) return;
                const chart = echarts.init(el);
                chart.setOption(chartOption(spec, palette));
                chartInstances.push(chart);
            });
        }

        function applyDarkMode(enabled) {
            root.classList.toggle('dark', enabled);
            root.classList.toggle('light', !enabled);
            if (toggle) toggle.checked = enabled;
            renderCharts();
        }

        if (root.classList.contains('dark') || root.classList.contains('light')) {
            applyDarkMode(root.classList.contains('dark'));
        } else {
            applyDarkMode(window.matchMedia('(prefers-color-scheme: dark)').matches);
        }
        if (toggle) toggle.addEventListener('change', e => applyDarkMode(e.target.checked));
        window.addEventListener('resize', () => chartInstances.forEach(c => c.resize()));
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_generator_default() {
        let generator = ReportGenerator::default_config();
        assert_eq!(generator.config().theme, ReportTheme::Light);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_script_safe_json() {
        assert_eq!(script_safe_json(r#"{"n":"</script>"}"#), r#"{"n":"<\/script>"}"#);
    }

    #[test]
    fn test_empty_dataset_report() {
        let generator = ReportGenerator::default_config();
        let html = generator.generate(&Dataset::default()).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("No data available"));
        assert!(!html.contains("data-headline="));
    }

    #[test]
    fn test_builtin_report() {
        let generator = ReportGenerator::default_config();
        let html = generator.generate(&Dataset::builtin()).unwrap();
        assert!(html.contains("3,435"));
        assert!(html.contains("tCO2e"));
        assert!(html.contains("GHG Emissions by Scope (GRI 305)"));
        assert!(html.contains("Increased Flooding"));
        assert!(html.contains("Purchased Goods &amp; Services"));
        assert!(!html.contains("Not provided"));
    }

    #[test]
    fn test_sections_can_be_disabled() {
        let mut config = ReportConfig::default();
        config.sections.metrics = false;
        config.sections.risks = false;
        let generator = ReportGenerator::new(config);
        let data = generator.build_data(&Dataset::builtin());
        assert!(data.metrics.is_none());
        assert!(data.risks.is_none());

        let html = generator.render(&data).unwrap();
        assert!(html.contains(r#"id="headlines""#));
        assert!(!html.contains(r#"id="metrics""#));
        assert!(html.contains(r#""charts":[]"#));
    }

    #[test]
    fn test_generate_from_json() {
        let generator = ReportGenerator::default_config();
        let html = generator
            .generate_from_json(r#"{"physicalRisks": [{"name": "Heat <Stress>", "strategy": "Shade"}]}"#)
            .unwrap();
        assert!(html.contains("Heat &lt;Stress&gt;"));
        assert!(html.contains("Shade"));
        assert!(html.contains("Not provided"));
    }

    #[test]
    fn test_generate_from_invalid_json() {
        let generator = ReportGenerator::default_config();
        assert!(generator.generate_from_json("{not json").is_err());
    }
}
