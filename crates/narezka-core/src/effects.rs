use crate::catalog::CatalogEntry;

/// Closed set of per-segment effects, each rendered as an ffmpeg video filter.
/// Catalog names outside this set are reported as unsupported at the call
/// site instead of failing a lookup at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOp {
    FadeIn,
    FadeOut,
    Grayscale,
    Invert,
    Brighten,
    Saturate,
    Contrast,
    MirrorX,
    MirrorY,
    Vignette,
}

impl EffectOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fade_in" => Some(Self::FadeIn),
            "fade_out" => Some(Self::FadeOut),
            "grayscale" => Some(Self::Grayscale),
            "invert" => Some(Self::Invert),
            "brighten" => Some(Self::Brighten),
            "saturate" => Some(Self::Saturate),
            "contrast" => Some(Self::Contrast),
            "mirror_x" => Some(Self::MirrorX),
            "mirror_y" => Some(Self::MirrorY),
            "vignette" => Some(Self::Vignette),
            _ => None,
        }
    }

    /// Build the `-vf` filter string. `clip_duration` anchors end-of-clip
    /// fades; per-entry parameters override the defaults.
    pub fn filter(&self, entry: &CatalogEntry, clip_duration: f64) -> String {
        match self {
            Self::FadeIn => format!("fade=t=in:st=0:d={}", entry.param_f64("duration", 1.0)),
            Self::FadeOut => {
                let duration = entry.param_f64("duration", 1.0);
                format!(
                    "fade=t=out:st={:.3}:d={}",
                    (clip_duration - duration).max(0.0),
                    duration
                )
            }
            Self::Grayscale => "hue=s=0".to_string(),
            Self::Invert => "negate".to_string(),
            Self::Brighten => format!("eq=brightness={}", entry.param_f64("amount", 0.1)),
            Self::Saturate => format!("eq=saturation={}", entry.param_f64("factor", 1.5)),
            Self::Contrast => format!("eq=contrast={}", entry.param_f64("factor", 1.3)),
            Self::MirrorX => "hflip".to_string(),
            Self::MirrorY => "vflip".to_string(),
            Self::Vignette => "vignette".to_string(),
        }
    }
}
