pub mod ema;
pub mod ratio;
pub mod sma;

use crate::error::TaError;

/// Rejects window lengths that cannot produce an average.
pub fn check_length(length: usize) -> Result<usize, TaError> {
    if length == 0 {
        return Err(TaError::InvalidWindow { length });
    }
    Ok(length)
}
