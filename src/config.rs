//! Plot configuration: built-in experiment layout with optional TOML override.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Workspace root the experiment logs live under.
pub const DEFAULT_WORKSPACE: &str = "/Users/yuki/survey/workspace/2016/data/pic2/";
/// Experiment directories (relative to the workspace) holding `sda.log`.
const DEFAULT_RUNS: [&str; 2] = ["20", "26"];
const LOG_FILE_NAME: &str = "sda.log";
const DEFAULT_OUTPUT: &str = "outline/loss5_2.png";
const DEFAULT_LEGEND_FONT: &str = "/Library/Fonts/Microsoft/MS Gothic.ttf";
const DEFAULT_LABELS: [&str; 3] = ["実験1", "実験2", "実験3"];

/// Everything needed to render one loss-curve chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlotConfig {
    /// Log files to plot, one series each, in order.
    pub inputs: Vec<PathBuf>,
    /// Legend labels, assigned to the inputs by position.
    pub labels: Vec<String>,
    /// Image file to write; the extension selects the format.
    pub output: PathBuf,
    /// Font used for the legend.
    pub legend_font: PathBuf,
    /// Legend font size in points.
    pub legend_font_size: f64,
    /// Font used for axis text; the legend font when unset.
    pub axis_font: Option<PathBuf>,
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::with_workspace(DEFAULT_WORKSPACE)
    }
}

impl PlotConfig {
    /// The default experiment layout rooted at `workspace`.
    pub fn with_workspace(workspace: impl AsRef<Path>) -> Self {
        let workspace = workspace.as_ref();
        Self {
            inputs: DEFAULT_RUNS.iter().map(|run| workspace.join(run).join(LOG_FILE_NAME)).collect(),
            labels: DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
            output: workspace.join(DEFAULT_OUTPUT),
            legend_font: PathBuf::from(DEFAULT_LEGEND_FONT),
            legend_font_size: 14.0,
            axis_font: None,
            // 8x6 inches at 100 dpi
            width: 800,
            height: 600,
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    ///
    /// # Returns
    /// * `Ok(PlotConfig)` if the file was successfully loaded and parsed
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Legend label for the series read from `inputs[index]`.
    ///
    /// Falls back to the name of the run directory (or the file name) when
    /// fewer labels than inputs are configured.
    pub fn label_for(&self, index: usize, path: &Path) -> String {
        if let Some(label) = self.labels.get(index) {
            return label.clone();
        }

        let fallback = path
            .parent()
            .and_then(Path::file_name)
            .or_else(|| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("series {}", index + 1));
        log::warn!("No legend label for {}, using {:?}", path.display(), fallback);
        fallback
    }

    /// Font used for axis labels and tick text.
    pub fn axis_font(&self) -> &Path {
        self.axis_font.as_deref().unwrap_or(&self.legend_font)
    }
}
