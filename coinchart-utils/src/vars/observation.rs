use chrono::DateTime;
use chrono::Utc;

/// A single market snapshot: one row of a price history export.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub total_volume: f64,
    pub market_cap: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, price: f64, total_volume: f64, market_cap: f64) -> Self {
        Observation {
            timestamp,
            price,
            total_volume,
            market_cap,
        }
    }
}

/// Splits observations into the price, volume and market cap columns.
pub fn columns(observations: &[Observation]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut prices = Vec::with_capacity(observations.len());
    let mut volumes = Vec::with_capacity(observations.len());
    let mut market_caps = Vec::with_capacity(observations.len());

    for o in observations {
        prices.push(o.price);
        volumes.push(o.total_volume);
        market_caps.push(o.market_cap);
    }

    (prices, volumes, market_caps)
}
