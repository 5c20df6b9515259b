use crate::error::TaError;
use crate::ta::check_length;

/// https://www.tradingview.com/pine-script-reference/v5/#fun_ta.ema
///
/// Seeded with the first value and smoothed recursively with
/// `alpha = 2 / (length + 1)`, without bias correction.
pub fn ema(src: &[f64], length: usize) -> Result<Vec<f64>, TaError> {
    let length = check_length(length)?;
    let alpha = 2.0 / (length as f64 + 1.0);
    let mut ema = Vec::with_capacity(src.len());

    for (i, &value) in src.iter().enumerate() {
        if i == 0 {
            ema.push(value);
        } else {
            ema.push(alpha * value + (1.0 - alpha) * ema[i - 1]);
        }
    }

    Ok(ema)
}
