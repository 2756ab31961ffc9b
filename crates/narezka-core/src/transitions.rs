/// Closed set of pairwise transitions, rendered through ffmpeg's `xfade`
/// filter. Catalog names outside this set fall back to plain concatenation
/// at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOp {
    Crossfade,
    FadeBlack,
    WipeLeft,
    WipeRight,
    SlideLeft,
    SlideRight,
    Dissolve,
    CircleOpen,
    Radial,
    Pixelize,
}

impl TransitionOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "crossfade" => Some(Self::Crossfade),
            "fade_black" => Some(Self::FadeBlack),
            "wipe_left" => Some(Self::WipeLeft),
            "wipe_right" => Some(Self::WipeRight),
            "slide_left" => Some(Self::SlideLeft),
            "slide_right" => Some(Self::SlideRight),
            "dissolve" => Some(Self::Dissolve),
            "circle_open" => Some(Self::CircleOpen),
            "radial" => Some(Self::Radial),
            "pixelize" => Some(Self::Pixelize),
            _ => None,
        }
    }

    /// The transition name understood by `xfade`.
    pub fn xfade_name(&self) -> &'static str {
        match self {
            Self::Crossfade => "fade",
            Self::FadeBlack => "fadeblack",
            Self::WipeLeft => "wipeleft",
            Self::WipeRight => "wiperight",
            Self::SlideLeft => "slideleft",
            Self::SlideRight => "slideright",
            Self::Dissolve => "dissolve",
            Self::CircleOpen => "circleopen",
            Self::Radial => "radial",
            Self::Pixelize => "pixelize",
        }
    }
}
