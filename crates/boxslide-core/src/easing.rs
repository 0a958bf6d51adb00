#![forbid(unsafe_code)]

//! Named easing curves.
//!
//! Every curve maps normalized progress `t ∈ [0, 1]` to a scale in `[0, 1]`,
//! with `f(0) == 0` and `f(1) == 1` exactly. The polynomial forms keep a fixed
//! operation order so results are reproducible bit-for-bit across hosts.
//!
//! | Name | Form |
//! |------|------|
//! | `linear` | `t` |
//! | `ease` | alias of `easeInOutCubic` |
//! | `easeInQuad` / `easeOutQuad` / `easeInOutQuad` | quadratic |
//! | `easeInCubic` / `easeOutCubic` / `easeInOutCubic` | cubic |
//! | `easeInQuart` / `easeOutQuart` / `easeInOutQuart` | quartic |
//! | `easeInQuint` / `easeOutQuint` / `easeInOutQuint` | quintic |

use std::fmt;
use std::str::FromStr;

/// Easing curve selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Transition {
    #[default]
    Linear,
    Ease,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
}

impl Transition {
    /// Every curve.
    pub const ALL: [Self; 14] = [
        Self::Linear,
        Self::Ease,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInQuart,
        Self::EaseOutQuart,
        Self::EaseInOutQuart,
        Self::EaseInQuint,
        Self::EaseOutQuint,
        Self::EaseInOutQuint,
    ];

    /// Evaluate the curve at `t`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Ease | Self::EaseInOutCubic => ease_in_out_cubic(t),
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            Self::EaseInQuart => t * t * t * t,
            Self::EaseOutQuart => {
                let t = t - 1.0;
                1.0 - t * t * t * t
            }
            Self::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let t = t - 1.0;
                    1.0 - 8.0 * t * t * t * t
                }
            }
            Self::EaseInQuint => t * t * t * t * t,
            Self::EaseOutQuint => {
                let t = t - 1.0;
                1.0 + t * t * t * t * t
            }
            Self::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t * t * t * t * t
                } else {
                    let t = t - 1.0;
                    1.0 + 16.0 * t * t * t * t * t
                }
            }
        }
    }

    /// Canonical (camelCase) name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseInQuad => "easeInQuad",
            Self::EaseOutQuad => "easeOutQuad",
            Self::EaseInOutQuad => "easeInOutQuad",
            Self::EaseInCubic => "easeInCubic",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseInOutCubic => "easeInOutCubic",
            Self::EaseInQuart => "easeInQuart",
            Self::EaseOutQuart => "easeOutQuart",
            Self::EaseInOutQuart => "easeInOutQuart",
            Self::EaseInQuint => "easeInQuint",
            Self::EaseOutQuint => "easeOutQuint",
            Self::EaseInOutQuint => "easeInOutQuint",
        }
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown curve name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransition(pub String);

impl fmt::Display for UnknownTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transition: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTransition {}

impl FromStr for Transition {
    type Err = UnknownTransition;

    /// Accepts the camelCase names and their snake_case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s || snake_case(t.name()) == s)
            .ok_or_else(|| UnknownTransition(s.to_owned()))
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
