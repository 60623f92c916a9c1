#![forbid(unsafe_code)]

//! Width tiers used to pick a default layout shape.
//!
//! | Tier | Viewport width |
//! |------|----------------|
//! | `Sm` | `< 1024` |
//! | `Md` | `1024..1280` |
//! | `Lg` | `1280..1600` |
//! | `Xl` | `>= 1600` |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Viewport width tier, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// All tiers in ascending order.
    pub const ALL: [Self; 4] = [Self::Sm, Self::Md, Self::Lg, Self::Xl];

    /// Lower width bound (inclusive) of each tier.
    #[must_use]
    pub const fn min_width(self) -> i32 {
        match self {
            Self::Sm => 0,
            Self::Md => 1024,
            Self::Lg => 1280,
            Self::Xl => 1600,
        }
    }

    /// Tier for a viewport width.
    #[must_use]
    pub fn classify(width: i32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| width >= tier.min_width())
            .unwrap_or(Self::Sm)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
