//! Seam to the embedding layout container.

use crate::children::ChildId;

/// Operations the control needs from the container that actually owns and
/// renders the child views.
///
/// The control never assumes anything about view lifetimes; children are
/// opaque [`ChildId`]s and every query is answered by the host. Hosts with
/// nothing meaningful to report (e.g. before first layout) should return
/// `0.0` widths, which the control treats as "reject offset updates".
pub trait MenuSurface {
    /// Width of the control itself.
    fn container_width(&self) -> f32;

    /// Current laid-out width of a child.
    fn width(&self, child: ChildId) -> f32;

    /// Current laid-out x position of a child.
    fn x(&self, child: ChildId) -> f32;

    /// Applies a horizontal translation to a child.
    fn set_translation_x(&mut self, child: ChildId, translation: f32);

    /// Makes a child pass pointer input through (or stop doing so).
    fn set_input_transparent(&mut self, child: ChildId, transparent: bool);

    /// Moves a child above its siblings.
    fn raise(&mut self, child: ChildId);

    /// Moves a child below its siblings.
    fn lower(&mut self, child: ChildId);
}
