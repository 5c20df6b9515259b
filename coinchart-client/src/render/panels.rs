/*!
Three stacked panels sharing one time axis:

1. the volume/market cap ratio,
2. the price with its simple and exponential moving averages,
3. the traded volume as bars.

Only the bottom panel carries date labels; the panels above reuse its axis.
*/

use std::ops::Range;
use std::path::Path;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use coinchart_model::metrics::frame::DerivedFrame;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::debug;

use crate::render::scale::bar_width;
use crate::render::scale::padded_range;
use crate::render::scale::segments;
use crate::render::scale::time_axis;
use crate::render::scale::zero_based_range;
use crate::render::style::*;
use crate::render::RenderError;
use crate::render::RenderOptions;

type TimeRange = Range<DateTime<Utc>>;

pub fn render_advanced(
    frame: &DerivedFrame,
    path: &Path,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let (start, end) = frame.time_range().ok_or(RenderError::EmptyFrame)?;
    let timestamps = frame.timestamps();
    let bar = bar_width(&timestamps);
    let x_range = time_axis(start, end, bar / 2);
    debug!(
        size = ?options.pixel_size(),
        rows = frame.len(),
        bar_ms = bar.num_milliseconds(),
        "rendering advanced chart"
    );

    let root = BitMapBackend::new(path, options.pixel_size()).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((3, 1));
    draw_ratio_panel(&panels[0], frame, &timestamps, x_range.clone(), options)?;
    draw_price_panel(&panels[1], frame, &timestamps, x_range.clone(), options)?;
    draw_volume_panel(&panels[2], frame, &timestamps, x_range, bar, options)?;

    root.present()?;
    Ok(())
}

fn draw_ratio_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    frame: &DerivedFrame,
    timestamps: &[DateTime<Utc>],
    x_range: TimeRange,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let y_range = padded_range(frame.ratio().iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Total Volume / Market Cap Ratio Over Time",
            (FONT, options.font(CAPTION_PT)),
        )
        .margin(options.px(15))
        .y_label_area_size(options.px(90))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .y_desc("Total Volume / Market Cap Ratio")
        .y_label_style((FONT, options.font(LABEL_PT)).into_font().color(&RATIO_COLOR))
        .axis_desc_style((FONT, options.font(DESC_PT)).into_font().color(&RATIO_COLOR))
        .draw()?;

    let style = RATIO_COLOR.stroke_width(options.px(LINE_WIDTH));
    chart.draw_series(
        segments(timestamps, frame.ratio().iter().map(|&r| Some(r)))
            .into_iter()
            .map(|run| PathElement::new(run, style)),
    )?;

    Ok(())
}

fn draw_price_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    frame: &DerivedFrame,
    timestamps: &[DateTime<Utc>],
    x_range: TimeRange,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let prices = frame.prices();
    let y_range = padded_range(prices.iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Price and Moving Averages Over Time",
            (FONT, options.font(CAPTION_PT)),
        )
        .margin(options.px(15))
        .y_label_area_size(options.px(90))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .y_desc("Price")
        .y_label_style((FONT, options.font(LABEL_PT)))
        .axis_desc_style((FONT, options.font(DESC_PT)))
        .draw()?;

    let line_width = options.px(LINE_WIDTH);
    let legend_len = options.px(20) as i32;

    let price_style = PRICE_COLOR.stroke_width(line_width);
    chart
        .draw_series(
            segments(timestamps, prices.iter().map(|&p| Some(p)))
                .into_iter()
                .map(|run| PathElement::new(run, price_style)),
        )?
        .label("Price")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], price_style));

    for (series, color) in frame.sma_series().iter().zip(SMA_COLORS.iter().cycle()) {
        let style = color.stroke_width(line_width);
        chart
            .draw_series(
                segments(timestamps, series.values.iter().copied())
                    .into_iter()
                    .map(|run| PathElement::new(run, style)),
            )?
            .label(format!("{}-day SMA", series.period))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], style));
    }

    let dash = options.px(DASH_SIZE);
    let spacing = options.px(DASH_SPACING);
    for series in frame.ema_series() {
        let style = EMA_COLOR.stroke_width(line_width);
        chart
            .draw_series(
                segments(timestamps, series.values.iter().map(|&v| Some(v)))
                    .into_iter()
                    .flat_map(|run| DashedLineSeries::new(run, dash, spacing, style)),
            )?
            .label(format!("{}-day EMA", series.period))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, options.font(LABEL_PT)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_volume_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    frame: &DerivedFrame,
    timestamps: &[DateTime<Utc>],
    x_range: TimeRange,
    bar: Duration,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let volumes = frame.volumes();
    let y_range = zero_based_range(volumes.iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption("Trading Volume Over Time", (FONT, options.font(CAPTION_PT)))
        .margin(options.px(15))
        .x_label_area_size(options.px(60))
        .y_label_area_size(options.px(90))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Volume")
        .x_label_formatter(&|t: &DateTime<Utc>| t.format(DATE_FORMAT).to_string())
        .label_style((FONT, options.font(LABEL_PT)))
        .axis_desc_style((FONT, options.font(DESC_PT)))
        .draw()?;

    let half = bar / 2;
    let fill = VOLUME_COLOR.mix(VOLUME_OPACITY).filled();
    chart.draw_series(
        timestamps
            .iter()
            .zip(&volumes)
            .filter(|(_, v)| v.is_finite())
            .map(|(&t, &v)| Rectangle::new([(t - half, 0.0), (t + half, v)], fill)),
    )?;

    Ok(())
}
