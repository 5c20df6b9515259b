/// Element-wise `numerator / denominator`.
///
/// A zero denominator yields an infinite (or NaN for `0 / 0`) entry rather
/// than an error. The output is as long as the shorter input.
pub fn ratio(numerator: &[f64], denominator: &[f64]) -> Vec<f64> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(n, d)| n / d)
        .collect()
}
