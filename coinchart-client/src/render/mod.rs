/*!
Rendering of a [`DerivedFrame`] into a PNG chart.

The renderer only reads the frame; all metrics are computed beforehand by
the model crate. Image size is given in inches together with a DPI so the
output resolution matches a print-style figure.

[`DerivedFrame`]: coinchart_model::metrics::frame::DerivedFrame
*/

pub mod dual_axis;
pub mod panels;
pub mod scale;
pub mod style;

use std::fs;
use std::path::Path;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_DPI: u32 = 300;

/// Baseline DPI at which the point sizes in [`style`] are defined.
const BASE_DPI: f64 = 100.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to draw: the input has no observations")]
    EmptyFrame,
    #[error("drawing failed: {0}")]
    Drawing(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

/// Runs `draw` against `path` and deletes the image it leaves behind if
/// drawing fails.
///
/// The bitmap backend flushes whatever was drawn when it is dropped, so an
/// early return would otherwise write a partial chart. Errors raised before
/// drawing starts leave `path` alone.
pub fn discard_on_error<F>(path: &Path, draw: F) -> Result<(), RenderError>
where
    F: FnOnce(&Path) -> Result<(), RenderError>,
{
    let result = draw(path);
    if let Err(RenderError::Drawing(_)) = &result {
        if path.exists() {
            if let Err(err) = fs::remove_file(path) {
                warn!(path = %path.display(), %err, "failed to remove partial chart");
            }
        }
    }
    result
}

/// Physical size and resolution of the output image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl RenderOptions {
    /// Wide single chart.
    pub fn dual_axis() -> Self {
        RenderOptions {
            width_in: 12.0,
            height_in: 6.0,
            dpi: DEFAULT_DPI,
        }
    }

    /// Tall figure holding three stacked panels.
    pub fn advanced() -> Self {
        RenderOptions {
            width_in: 15.0,
            height_in: 20.0,
            dpi: DEFAULT_DPI,
        }
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    fn scale(&self) -> f64 {
        self.dpi as f64 / BASE_DPI
    }

    /// Font size in pixels for a size given in points at 100 DPI.
    pub fn font(&self, pt: f64) -> f64 {
        pt * self.scale()
    }

    /// Pixel length for a length given at 100 DPI.
    pub fn px(&self, base: u32) -> u32 {
        (base as f64 * self.scale()).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size() {
        assert_eq!(RenderOptions::advanced().pixel_size(), (4500, 6000));
        assert_eq!(RenderOptions::dual_axis().pixel_size(), (3600, 1800));

        let options = RenderOptions {
            width_in: 2.5,
            height_in: 1.0,
            dpi: 72,
        };
        assert_eq!(options.pixel_size(), (180, 72));
    }

    #[test]
    fn test_failed_drawing_removes_partial_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices_chart.png");

        let result = discard_on_error(&path, |path| {
            fs::write(path, b"half drawn").unwrap();
            Err(RenderError::Drawing("label area too small".to_string()))
        });

        assert!(matches!(result, Err(RenderError::Drawing(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_frame_keeps_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices_chart.png");
        fs::write(&path, b"previous chart").unwrap();

        let result = discard_on_error(&path, |_| Err(RenderError::EmptyFrame));

        assert!(matches!(result, Err(RenderError::EmptyFrame)));
        assert_eq!(fs::read(&path).unwrap(), b"previous chart");
    }

    #[test]
    fn test_successful_drawing_keeps_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices_chart.png");

        discard_on_error(&path, |path| {
            fs::write(path, b"chart").unwrap();
            Ok(())
        })
        .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_scaling() {
        let options = RenderOptions::advanced();
        assert_eq!(options.font(10.0), 30.0);
        assert_eq!(options.px(40), 120);
    }
}
