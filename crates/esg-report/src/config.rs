//! Report configuration types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Initial dark-mode state of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// Follow the system preference.
    Auto,
}

impl std::str::FromStr for ReportTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ReportTheme::Light),
            "dark" => Ok(ReportTheme::Dark),
            "auto" | "system" => Ok(ReportTheme::Auto),
            _ => Err(format!("unknown theme: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportTheme::Light => write!(f, "light"),
            ReportTheme::Dark => write!(f, "dark"),
            ReportTheme::Auto => write!(f, "auto"),
        }
    }
}

/// CDN library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnLibrary {
    /// Pinned version number.
    pub version: String,
    /// Subresource integrity digest (`sha384-...`). Without one the tag
    /// carries no `integrity` attribute.
    #[serde(default)]
    pub sri: Option<String>,
    /// Path within npm package.
    #[serde(default)]
    pub path: Option<String>,
}

impl CdnLibrary {
    /// Create a new CDN library configuration.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            sri: None,
            path: None,
        }
    }

    /// Pin the subresource integrity digest of the served file.
    pub fn with_sri(mut self, sri: impl Into<String>) -> Self {
        self.sri = Some(sri.into());
        self
    }

    /// Set the path within the npm package.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get the full CDN URL for this library.
    pub fn url(&self, base_url: &str, package_name: &str) -> String {
        let path = self.path.as_deref().unwrap_or("dist/index.min.js");
        format!("{}/{}@{}/{}", base_url, package_name, self.version, path)
    }
}

/// Report section visibility configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSections {
    /// Headline KPI cards.
    #[serde(default = "default_true")]
    pub headlines: bool,
    /// Emission, water and waste charts.
    #[serde(default = "default_true")]
    pub metrics: bool,
    /// Risk and opportunity card lists.
    #[serde(default = "default_true")]
    pub risks: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            headlines: true,
            metrics: true,
            risks: true,
        }
    }
}

/// CDN configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Base URL for CDN resources.
    #[serde(default = "default_cdn_base")]
    pub base_url: String,
    /// Library configurations.
    #[serde(default = "default_libraries")]
    pub libraries: HashMap<String, CdnLibrary>,
}

fn default_cdn_base() -> String {
    "https://cdn.jsdelivr.net/npm".to_string()
}

fn default_libraries() -> HashMap<String, CdnLibrary> {
    let mut libs = HashMap::new();

    // Versions are pinned in the URL. Integrity digests are set per
    // deployment through `cdn_config.libraries.<name>.sri`.
    libs.insert(
        "tailwindcss".to_string(),
        CdnLibrary::new("2.2.19").with_path("dist/tailwind.min.css"),
    );
    libs.insert(
        "echarts".to_string(),
        CdnLibrary::new("5.5.0").with_path("dist/echarts.min.js"),
    );

    libs
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_cdn_base(),
            libraries: default_libraries(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Subtitle under the page title.
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    /// Initial dark-mode state.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Public base path the page is served under (emitted as `<base href>`).
    #[serde(default)]
    pub base_path: Option<String>,
    /// Section visibility.
    #[serde(default)]
    pub sections: ReportSections,
    /// CDN configuration.
    #[serde(default)]
    pub cdn_config: CdnConfig,
}

fn default_title() -> String {
    "Apparel Climate Risk & Opportunities Dashboard - Sri Lanka Context".to_string()
}

fn default_subtitle() -> String {
    "Monitoring climate-related risks and opportunities aligned with GRI standards.".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            theme: ReportTheme::default(),
            base_path: None,
            sections: ReportSections::default(),
            cdn_config: CdnConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the public base path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
