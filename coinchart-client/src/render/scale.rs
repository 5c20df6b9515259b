//! Axis ranges and point sequences shared by the chart layouts.

use std::ops::Range;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

const PADDING: f64 = 0.05;
const BAR_FILL: f64 = 0.8;

/// Range covering every finite value, padded by 5% on both ends.
///
/// Empty or flat inputs get a unit-wide range so a chart can still be built.
pub fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = finite_bounds(values);
    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return min - 0.5..max + 0.5;
    }
    let pad = (max - min) * PADDING;
    min - pad..max + pad
}

/// Range from zero to the largest finite value, for bar charts.
pub fn zero_based_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = finite_bounds(values);
    let low = if min < 0.0 { min * (1.0 + PADDING) } else { 0.0 };
    let high = if max > 0.0 { max * (1.0 + PADDING) } else { 0.0 };
    if high > low {
        low..high
    } else {
        0.0..1.0
    }
}

fn finite_bounds<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
}

/// Splits a series into runs of consecutive drawable points.
///
/// `None` and non-finite values end the current run, so gaps are left open
/// instead of being bridged by a straight line.
pub fn segments<I>(timestamps: &[DateTime<Utc>], values: I) -> Vec<Vec<(DateTime<Utc>, f64)>>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (&t, value) in timestamps.iter().zip(values) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => current.push((t, v)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Bar width: 80% of the smallest gap between consecutive timestamps.
pub fn bar_width(timestamps: &[DateTime<Utc>]) -> Duration {
    let smallest = timestamps
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > Duration::zero())
        .min()
        .unwrap_or_else(|| Duration::days(1));

    Duration::milliseconds((smallest.num_milliseconds() as f64 * BAR_FILL) as i64)
}

/// Time axis spanning `start..end`, widened by `pad` on both sides.
///
/// A single-instant range is widened by at least half a day.
pub fn time_axis(start: DateTime<Utc>, end: DateTime<Utc>, pad: Duration) -> Range<DateTime<Utc>> {
    let pad = if start == end {
        pad.max(Duration::hours(12))
    } else {
        pad
    };
    start - pad..end + pad
}
