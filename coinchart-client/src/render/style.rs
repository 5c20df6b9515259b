use plotters::style::RGBColor;

pub const RATIO_COLOR: RGBColor = RGBColor(31, 119, 180);
pub const PRICE_COLOR: RGBColor = RGBColor(255, 127, 14);
pub const SMA_COLORS: [RGBColor; 2] = [RGBColor(214, 39, 40), RGBColor(44, 160, 44)];
pub const EMA_COLOR: RGBColor = RGBColor(128, 0, 128);
pub const VOLUME_COLOR: RGBColor = RGBColor(148, 103, 189);
pub const VOLUME_OPACITY: f64 = 0.7;

pub const FONT: &str = "sans-serif";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Point sizes at 100 DPI; scaled by [`super::RenderOptions::font`].
pub const CAPTION_PT: f64 = 22.0;
pub const LABEL_PT: f64 = 13.0;
pub const DESC_PT: f64 = 15.0;

pub const LINE_WIDTH: u32 = 2;
pub const DASH_SIZE: u32 = 12;
pub const DASH_SPACING: u32 = 8;
