/// Linearly remap `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]`.
///
/// Unclamped, like the remap found in creative-coding toolkits: values
/// outside the input range extrapolate.
pub(crate) fn map(v: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (out_hi - out_lo) * ((v - in_lo) / (in_hi - in_lo))
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
