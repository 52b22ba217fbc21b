//! Scalar helpers shared by the progress and panel math.

/// Clamp `value` into `[min, max]`.  NaN collapses to `min`, so nothing
/// downstream of a bad division ever sees a NaN.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Cubic Hermite smoothstep between `edge0` and `edge1`.
///
/// Returns 0 at or below `edge0`, 1 at or above `edge1`, and
/// `t² (3 − 2t)` in between.  A zero-width edge is a hard step at `edge0`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let span = edge1 - edge0;
    let t = if span == 0.0 {
        if x < edge0 {
            0.0
        } else {
            1.0
        }
    } else {
        clamp((x - edge0) / span, 0.0, 1.0)
    };
    t * t * (3.0 - 2.0 * t)
}
