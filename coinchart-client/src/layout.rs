use std::path::Path;
use std::path::PathBuf;

use coinchart_model::metrics::deriver::MetricsParams;
use coinchart_model::metrics::frame::DerivedFrame;

use crate::render::dual_axis::render_dual_axis;
use crate::render::discard_on_error;
use crate::render::panels::render_advanced;
use crate::render::RenderError;
use crate::render::RenderOptions;

/// The chart shapes the tool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLayout {
    /// Ratio and price on one chart with two y-axes.
    DualAxis,
    /// Ratio, price with moving averages, and volume in three panels.
    Advanced,
}

impl ChartLayout {
    pub fn suffix(&self) -> &'static str {
        match self {
            ChartLayout::DualAxis => "_chart.png",
            ChartLayout::Advanced => "_advanced_chart.png",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChartLayout::DualAxis => "Chart",
            ChartLayout::Advanced => "Advanced chart",
        }
    }

    /// Metrics the layout draws; the dual-axis chart has no moving averages.
    pub fn metrics_params(&self) -> MetricsParams {
        match self {
            ChartLayout::DualAxis => MetricsParams::ratio_only(),
            ChartLayout::Advanced => MetricsParams::default(),
        }
    }

    pub fn options(&self) -> RenderOptions {
        match self {
            ChartLayout::DualAxis => RenderOptions::dual_axis(),
            ChartLayout::Advanced => RenderOptions::advanced(),
        }
    }

    /// Output file next to `input`: its extension is replaced by the layout suffix.
    ///
    /// `data/btc.csv` becomes `data/btc_chart.png` for the dual-axis layout.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{stem}{}", self.suffix()))
    }

    pub fn render(
        &self,
        frame: &DerivedFrame,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        discard_on_error(path, |path| match self {
            ChartLayout::DualAxis => render_dual_axis(frame, path, options),
            ChartLayout::Advanced => render_advanced(frame, path, options),
        })
    }
}
