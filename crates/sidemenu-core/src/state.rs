/// Discrete state of the side menu control.
///
/// The numeric sign convention runs through the whole engine: a positive
/// visual offset implicates the left menu, a negative one the right menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// Both menus hidden, main content centered.
    #[default]
    Default,
    /// Left menu revealed; offset is positive.
    LeftShown,
    /// Right menu revealed; offset is negative.
    RightShown,
}

impl MenuState {
    /// Sign of the offset this state settles at.
    pub fn sign(self) -> f32 {
        match self {
            MenuState::Default => 0.0,
            MenuState::LeftShown => 1.0,
            MenuState::RightShown => -1.0,
        }
    }

    pub(crate) fn signum(self) -> i8 {
        match self {
            MenuState::Default => 0,
            MenuState::LeftShown => 1,
            MenuState::RightShown => -1,
        }
    }
}

/// Three-valued sign used for comparing offsets against state signs,
/// where exactly zero matches neither side.
pub(crate) fn diff_signum(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
