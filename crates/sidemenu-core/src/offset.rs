//! Offset clamping helpers.

/// Clamps a candidate offset's magnitude to the active menu's width,
/// preserving its sign.
pub fn clamp_to_menu_width(candidate: f32, menu_width: f32) -> f32 {
    candidate.signum() * candidate.abs().min(menu_width.max(0.0))
}

/// Epsilon comparison used to reject no-op offset updates so floating-point
/// noise cannot oscillate the visual state.
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON
}
