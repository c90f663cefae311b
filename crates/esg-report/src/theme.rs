//! Dark-mode view state and chart palettes.
//!
//! The dark-mode flag is the only view state. It changes colors and nothing
//! else: the dataset and the chart payload are the same in both modes.

use crate::config::ReportTheme;
use serde::Serialize;

/// Colors applied to chart chrome (grid, axes, tooltip).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPalette {
    pub grid: &'static str,
    pub axis: &'static str,
    pub tooltip_background: &'static str,
    pub tooltip_border: &'static str,
    pub tooltip_label: &'static str,
}

impl ChartPalette {
    pub const fn light() -> Self {
        Self {
            grid: "#e5e7eb",
            axis: "#71717a",
            tooltip_background: "#fff",
            tooltip_border: "#4b5563",
            tooltip_label: "#1f2937",
        }
    }

    pub const fn dark() -> Self {
        Self {
            grid: "#4b5563",
            axis: "#a1a1aa",
            tooltip_background: "#1f2937",
            tooltip_border: "#4b5563",
            tooltip_label: "#e5e7eb",
        }
    }
}

/// Both palettes, as embedded in the page for the client-side toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteSet {
    pub light: ChartPalette,
    pub dark: ChartPalette,
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self {
            light: ChartPalette::light(),
            dark: ChartPalette::dark(),
        }
    }
}

/// The dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    dark_mode: bool,
}

impl ViewState {
    pub fn new(dark_mode: bool) -> Self {
        Self { dark_mode }
    }

    /// Initial state for a configured theme. `Auto` starts light; the page
    /// switches to dark on load when the system prefers it.
    pub fn from_theme(theme: ReportTheme) -> Self {
        Self::new(theme == ReportTheme::Dark)
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }

    pub fn toggle(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn palette(&self) -> ChartPalette {
        if self.dark_mode {
            ChartPalette::dark()
        } else {
            ChartPalette::light()
        }
    }

    /// Root element class list for this state.
    pub fn root_class(&self) -> &'static str {
        if self.dark_mode {
            "dark"
        } else {
            "light"
        }
    }
}
