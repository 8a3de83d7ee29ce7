//! Child registry: attached per-child configuration and the z-order stack.

use smallvec::SmallVec;

/// Opaque identity of a child view, assigned by the host.
pub type ChildId = u64;

/// Where a registered child sits in the control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuPosition {
    /// The main content view that translates with the offset.
    #[default]
    Main,
    /// The panel revealed by a positive offset.
    LeftMenu,
    /// The panel revealed by a negative offset.
    RightMenu,
}

/// Attached configuration for a registered child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildConfig {
    pub position: MenuPosition,
    /// Proportional menu width; values `<= 0` mean auto/fill.
    pub menu_width_percentage: f32,
    /// Whether drag gestures may reveal this menu.
    pub gesture_enabled: bool,
}

impl ChildConfig {
    pub fn main() -> Self {
        Self {
            position: MenuPosition::Main,
            menu_width_percentage: -1.0,
            gesture_enabled: true,
        }
    }

    pub fn left_menu() -> Self {
        Self {
            position: MenuPosition::LeftMenu,
            ..Self::main()
        }
    }

    pub fn right_menu() -> Self {
        Self {
            position: MenuPosition::RightMenu,
            ..Self::main()
        }
    }

    pub fn with_menu_width_percentage(mut self, percentage: f32) -> Self {
        self.menu_width_percentage = percentage;
        self
    }

    pub fn with_gesture_enabled(mut self, enabled: bool) -> Self {
        self.gesture_enabled = enabled;
        self
    }
}

/// Layout placement the host should give a child, derived from its attached
/// configuration. Menus anchor to their edge; everything else fills the
/// control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuLayoutSpec {
    /// Fill the control's bounds (main view, overlay).
    Fill,
    /// Side panel anchored at a proportional x (0 = left edge, 1 = right
    /// edge) with an optional explicit proportional width. `None` width
    /// means size to content.
    Menu {
        anchor_x: f32,
        width_fraction: Option<f32>,
    },
}

/// Explicit z-order of the control's children, front of the list being the
/// bottom of the stack.
#[derive(Clone, Debug, Default)]
pub struct ChildStack {
    order: SmallVec<[ChildId; 4]>,
}

impl ChildStack {
    pub fn push(&mut self, child: ChildId) {
        if !self.order.contains(&child) {
            self.order.push(child);
        }
    }

    pub fn remove(&mut self, child: ChildId) {
        self.order.retain(|entry| *entry != child);
    }

    /// Index of a child in the stack, bottom first.
    pub fn index_of(&self, child: ChildId) -> Option<usize> {
        self.order.iter().position(|entry| *entry == child)
    }

    /// Moves a child to the top of the stack.
    pub fn raise(&mut self, child: ChildId) {
        if self.index_of(child).is_some() {
            self.remove(child);
            self.order.push(child);
        }
    }

    /// Moves a child to the bottom of the stack.
    pub fn lower(&mut self, child: ChildId) {
        if self.index_of(child).is_some() {
            self.remove(child);
            self.order.insert(0, child);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
