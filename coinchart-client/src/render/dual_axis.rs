//! Single chart with the volume/market cap ratio on the left axis and the
//! price on the right axis.

use std::path::Path;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use coinchart_model::metrics::frame::DerivedFrame;
use plotters::prelude::*;
use tracing::debug;

use crate::render::scale::padded_range;
use crate::render::scale::segments;
use crate::render::scale::time_axis;
use crate::render::style::*;
use crate::render::RenderError;
use crate::render::RenderOptions;

const CAPTION: &str = "Total Volume / Market Cap Ratio and Price Over Time";

pub fn render_dual_axis(
    frame: &DerivedFrame,
    path: &Path,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let (start, end) = frame.time_range().ok_or(RenderError::EmptyFrame)?;
    let timestamps = frame.timestamps();
    let prices = frame.prices();

    let x_range = time_axis(start, end, Duration::zero());
    let ratio_range = padded_range(frame.ratio().iter().copied());
    let price_range = padded_range(prices.iter().copied());
    debug!(
        size = ?options.pixel_size(),
        ?ratio_range,
        ?price_range,
        "rendering dual-axis chart"
    );

    let root = BitMapBackend::new(path, options.pixel_size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CAPTION, (FONT, options.font(CAPTION_PT)))
        .margin(options.px(15))
        .x_label_area_size(options.px(50))
        .y_label_area_size(options.px(80))
        .right_y_label_area_size(options.px(80))
        .build_cartesian_2d(x_range.clone(), ratio_range)?
        .set_secondary_coord(x_range, price_range);

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Total Volume / Market Cap Ratio")
        .x_label_formatter(&|t: &DateTime<Utc>| t.format(DATE_FORMAT).to_string())
        .x_label_style((FONT, options.font(LABEL_PT)))
        .y_label_style((FONT, options.font(LABEL_PT)).into_font().color(&RATIO_COLOR))
        .axis_desc_style((FONT, options.font(DESC_PT)))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Price")
        .label_style((FONT, options.font(LABEL_PT)).into_font().color(&PRICE_COLOR))
        .axis_desc_style((FONT, options.font(DESC_PT)))
        .draw()?;

    let line_width = options.px(LINE_WIDTH);

    let ratio_style = RATIO_COLOR.stroke_width(line_width);
    chart
        .draw_series(
            segments(&timestamps, frame.ratio().iter().map(|&r| Some(r)))
                .into_iter()
                .map(|run| PathElement::new(run, ratio_style)),
        )?
        .label("Volume / Market Cap")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ratio_style));

    let price_style = PRICE_COLOR.stroke_width(line_width);
    chart
        .draw_secondary_series(
            segments(&timestamps, prices.iter().map(|&p| Some(p)))
                .into_iter()
                .map(|run| PathElement::new(run, price_style)),
        )?
        .label("Price")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], price_style));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, options.font(LABEL_PT)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
