/*!
Derivation of the metrics drawn next to the raw price history.

For an ordered slice of observations this computes the volume to market cap
ratio, a simple moving average of the price for every configured window and
an exponential moving average of the price for every configured span. Inputs
are never modified; the results are collected into a [`DerivedFrame`].
*/

use coinchart_utils::ta::check_length;
use coinchart_utils::ta::ema::ema;
use coinchart_utils::ta::ratio::ratio;
use coinchart_utils::ta::sma::sma;
use coinchart_utils::vars::observation::columns;
use coinchart_utils::vars::observation::Observation;
use tracing::debug;
use tracing::warn;

use crate::error::ModelError;
use crate::metrics::frame::DerivedFrame;
use crate::metrics::frame::Series;

const DEFAULT_SMA_WINDOWS: [usize; 2] = [20, 50];
const DEFAULT_EMA_SPANS: [usize; 1] = [21];

pub const SMA_PREFIX: &str = "SMA";
pub const EMA_PREFIX: &str = "EMA";

/// Which moving averages to derive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsParams {
    /// Window sizes of the simple moving averages.
    pub sma_windows: Vec<usize>,
    /// Spans of the exponential moving averages.
    pub ema_spans: Vec<usize>,
}

impl MetricsParams {
    /// Only the ratio, no moving averages.
    pub fn ratio_only() -> Self {
        MetricsParams {
            sma_windows: Vec::new(),
            ema_spans: Vec::new(),
        }
    }
}

impl Default for MetricsParams {
    fn default() -> Self {
        MetricsParams {
            sma_windows: DEFAULT_SMA_WINDOWS.to_vec(),
            ema_spans: DEFAULT_EMA_SPANS.to_vec(),
        }
    }
}

/// `total_volume / market_cap` for every observation.
///
/// A zero market cap produces a non-finite entry, not an error.
pub fn compute_ratio(observations: &[Observation]) -> Vec<f64> {
    observations
        .iter()
        .map(|o| o.total_volume / o.market_cap)
        .collect()
}

/// Simple moving average of the price; the first `window - 1` entries are `None`.
pub fn compute_sma(
    observations: &[Observation],
    window: usize,
) -> Result<Vec<Option<f64>>, ModelError> {
    Ok(sma(&prices(observations), window)?)
}

/// Exponential moving average of the price with `alpha = 2 / (span + 1)`.
pub fn compute_ema(observations: &[Observation], span: usize) -> Result<Vec<f64>, ModelError> {
    Ok(ema(&prices(observations), span)?)
}

fn prices(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.price).collect()
}

pub struct MetricsDeriver {
    params: MetricsParams,
}

impl MetricsDeriver {
    pub fn new(params: MetricsParams) -> Self {
        MetricsDeriver { params }
    }

    /// Computes every configured metric over `observations`.
    ///
    /// All windows and spans are validated up front, so an invalid parameter
    /// fails before anything is computed. The columns are split once and
    /// shared by every series.
    pub fn derive(&self, observations: &[Observation]) -> Result<DerivedFrame, ModelError> {
        for &length in self.params.sma_windows.iter().chain(&self.params.ema_spans) {
            check_length(length)?;
        }

        let (prices, volumes, market_caps) = columns(observations);

        let ratios = ratio(&volumes, &market_caps);
        let non_finite = ratios.iter().filter(|r| !r.is_finite()).count();
        if non_finite > 0 {
            warn!(
                count = non_finite,
                "volume/market cap ratio is not finite for some rows (zero market cap?)"
            );
        }

        let mut sma_series = Vec::with_capacity(self.params.sma_windows.len());
        for &window in &self.params.sma_windows {
            let values = sma(&prices, window)?;
            debug!(window, defined = values.iter().flatten().count(), "derived SMA");
            sma_series.push(Series::new(SMA_PREFIX, window, values));
        }

        let mut ema_series = Vec::with_capacity(self.params.ema_spans.len());
        for &span in &self.params.ema_spans {
            let values = ema(&prices, span)?;
            debug!(span, "derived EMA");
            ema_series.push(Series::new(EMA_PREFIX, span, values));
        }

        Ok(DerivedFrame::new(
            observations.to_vec(),
            ratios,
            sma_series,
            ema_series,
        ))
    }
}

impl Default for MetricsDeriver {
    fn default() -> Self {
        MetricsDeriver::new(MetricsParams::default())
    }
}
