use std::fmt;

/// Positioning instruction currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuidanceState {
    #[default]
    Center,
    Closer,
    Further,
    LeftSide,
    RightSide,
    MoreLight,
    LessReflection,
    HoldSteady,
}

impl GuidanceState {
    pub const ALL: [GuidanceState; 8] = [
        GuidanceState::Center,
        GuidanceState::Closer,
        GuidanceState::Further,
        GuidanceState::LeftSide,
        GuidanceState::RightSide,
        GuidanceState::MoreLight,
        GuidanceState::LessReflection,
        GuidanceState::HoldSteady,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuidanceState::Center => "center",
            GuidanceState::Closer => "closer",
            GuidanceState::Further => "further",
            GuidanceState::LeftSide => "left_side",
            GuidanceState::RightSide => "right_side",
            GuidanceState::MoreLight => "more_light",
            GuidanceState::LessReflection => "less_reflection",
            GuidanceState::HoldSteady => "hold_steady",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            GuidanceState::Center => "Center the spot in the frame",
            GuidanceState::Closer => "Move the camera closer",
            GuidanceState::Further => "Move the camera further away",
            GuidanceState::LeftSide => "Shift slightly to the left",
            GuidanceState::RightSide => "Shift slightly to the right",
            GuidanceState::MoreLight => "Find more light",
            GuidanceState::LessReflection => "Too bright, reduce glare",
            GuidanceState::HoldSteady => "Hold steady...",
        }
    }
}

impl fmt::Display for GuidanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
