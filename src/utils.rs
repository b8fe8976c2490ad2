//! Device-pixel-ratio helpers.

use crate::element::ElementRef;

/// Device pixel ratio of the element's window.
///
/// Unusable ratios (zero, negative, NaN, infinite) count as 1.
pub fn get_dpr(element: &ElementRef) -> f64 {
    let dpr = element.device_pixel_ratio();
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Round `value` to the nearest device pixel: `round(value * dpr) / dpr`.
pub fn round_by_dpr(element: &ElementRef, value: f64) -> f64 {
    round_to_ratio(value, get_dpr(element))
}

pub(crate) fn round_to_ratio(value: f64, dpr: f64) -> f64 {
    (value * dpr).round() / dpr
}

// =============================================================================
// Tests
// =============================================================================
