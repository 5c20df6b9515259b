use crate::error::TaError;
use crate::ta::check_length;

/// https://www.tradingview.com/pine-script-reference/v5/#fun_ta.sma
///
/// Entries without `length` values of history are `None`.
pub fn sma(src: &[f64], length: usize) -> Result<Vec<Option<f64>>, TaError> {
    let length = check_length(length)?;
    let mut sma_values = Vec::with_capacity(src.len());

    for i in 0..src.len() {
        if i + 1 < length {
            sma_values.push(None);
        } else {
            let sum: f64 = src[i + 1 - length..=i].iter().sum();
            sma_values.push(Some(sum / length as f64));
        }
    }

    Ok(sma_values)
}
