//! Slide transitions. Only the tag is modelled; playback happens elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionType {
    #[default]
    None,
    Fade,
    Slide,
    Push,
    Wipe,
    Zoom,
    Dissolve,
    Cover,
    Flip,
}

impl TransitionType {
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Fade,
        Self::Slide,
        Self::Push,
        Self::Wipe,
        Self::Zoom,
        Self::Dissolve,
        Self::Cover,
        Self::Flip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Push => "push",
            Self::Wipe => "wipe",
            Self::Zoom => "zoom",
            Self::Dissolve => "dissolve",
            Self::Cover => "cover",
            Self::Flip => "flip",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The transition to record on a slide. Has no other effect.
pub fn apply_transition(transition: TransitionType) -> TransitionType {
    transition
}
