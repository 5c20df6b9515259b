use chrono::DateTime;
use chrono::Utc;
use coinchart_utils::vars::observation::Observation;

/// A named derived column, e.g. `SMA20` computed with `period = 20`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    pub label: String,
    pub period: usize,
    pub values: Vec<T>,
}

impl<T> Series<T> {
    pub fn new(prefix: &str, period: usize, values: Vec<T>) -> Self {
        Series {
            label: format!("{prefix}{period}"),
            period,
            values,
        }
    }
}

/// Observations together with every column derived from them.
///
/// This is the only value passed from the model to the renderer. All derived
/// columns have exactly one entry per observation.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFrame {
    observations: Vec<Observation>,
    ratio: Vec<f64>,
    sma: Vec<Series<Option<f64>>>,
    ema: Vec<Series<f64>>,
}

impl DerivedFrame {
    pub(crate) fn new(
        observations: Vec<Observation>,
        ratio: Vec<f64>,
        sma: Vec<Series<Option<f64>>>,
        ema: Vec<Series<f64>>,
    ) -> Self {
        DerivedFrame {
            observations,
            ratio,
            sma,
            ema,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// `total_volume / market_cap` per observation; may contain non-finite values.
    pub fn ratio(&self) -> &[f64] {
        &self.ratio
    }

    pub fn sma_series(&self) -> &[Series<Option<f64>>] {
        &self.sma
    }

    pub fn ema_series(&self) -> &[Series<f64>] {
        &self.ema
    }

    pub fn sma(&self, window: usize) -> Option<&Series<Option<f64>>> {
        self.sma.iter().find(|s| s.period == window)
    }

    pub fn ema(&self, span: usize) -> Option<&Series<f64>> {
        self.ema.iter().find(|s| s.period == span)
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.observations.iter().map(|o| o.timestamp).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.total_volume).collect()
    }

    /// First and last timestamps, or `None` for an empty frame.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}
