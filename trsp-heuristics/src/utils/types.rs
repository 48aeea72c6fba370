/// Alias to a scalar floating type.
///
/// NOTE: `f64` is used as time and cost values are accumulated over long tours and `f32` drifts
/// beyond the comparison tolerance.
pub type Float = f64;
