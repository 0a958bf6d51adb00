#![forbid(unsafe_code)]

//! Slide options.
//!
//! [`SlideOptions`] is what callers hand in: every field optional, any value
//! accepted. [`SlideOptions::resolve`] turns it into [`ResolvedOptions`],
//! which the runtime uses unchanged for the whole animation.
//!
//! # Defaults
//!
//! | Field | Accepted | Fallback |
//! |-------|----------|----------|
//! | `duration` | positive milliseconds | `100` |
//! | `display` | any display mode except `none` (lowercased) | `block` |
//! | `transition` | a [`Transition`] name | `linear` |
//! | `force` | `show` / `hide` | none |
//!
//! # Loading
//!
//! With the `config` feature, options can be read from TOML or JSON:
//!
//! ```toml
//! duration = 250
//! display = "flex"
//! transition = "easeOutCubic"
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::easing::Transition;

/// Fallback duration in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 100;

/// Fallback display mode.
pub const DEFAULT_DISPLAY: &str = "block";

/// Explicit toggle direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Force {
    Show,
    Hide,
}

impl Force {
    /// The other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Show => Self::Hide,
            Self::Hide => Self::Show,
        }
    }
}

/// Caller-facing slide options. Nothing here is validated until
/// [`resolve`](Self::resolve).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SlideOptions {
    /// Duration in milliseconds.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub duration: Option<i64>,
    /// Display mode applied while animating and after showing.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub display: Option<String>,
    /// Easing curve name.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub transition: Option<String>,
    /// Toggle direction override. The toggle resolver overwrites this when
    /// the element is already animating.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub force: Option<Force>,
}

impl SlideOptions {
    /// Options with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration in milliseconds (builder pattern).
    #[must_use]
    pub fn duration(mut self, ms: i64) -> Self {
        self.duration = Some(ms);
        self
    }

    /// Set the duration from text such as `"250"` or `" 250ms"`: the leading
    /// base-10 integer is used. Text without one leaves the duration unset.
    #[must_use]
    pub fn duration_text(mut self, text: &str) -> Self {
        if let Some(ms) = parse_int_prefix(text) {
            self.duration = Some(ms);
        }
        self
    }

    /// Set the display mode (builder pattern).
    #[must_use]
    pub fn display(mut self, mode: impl Into<String>) -> Self {
        self.display = Some(mode.into());
        self
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition.name().to_owned());
        self
    }

    /// Set the easing curve by name (builder pattern). Unknown names resolve
    /// to linear.
    #[must_use]
    pub fn transition_name(mut self, name: impl Into<String>) -> Self {
        self.transition = Some(name.into());
        self
    }

    /// Set the toggle direction (builder pattern).
    #[must_use]
    pub fn force(mut self, force: Force) -> Self {
        self.force = Some(force);
        self
    }

    /// Sanitise into the values the runtime animates with.
    #[must_use]
    pub fn resolve(&self) -> ResolvedOptions {
        let duration_ms = match self.duration {
            Some(ms) if ms > 0 => u32::try_from(ms).unwrap_or(u32::MAX),
            Some(_ms) => {
                #[cfg(feature = "tracing")]
                crate::logging::debug!(
                    target: "boxslide.options",
                    duration = _ms,
                    "duration replaced with default"
                );
                DEFAULT_DURATION_MS
            }
            None => DEFAULT_DURATION_MS,
        };

        let display = match self.display.as_deref().map(str::to_ascii_lowercase) {
            Some(mode) if !mode.is_empty() && mode != "none" => mode,
            _ => DEFAULT_DISPLAY.to_owned(),
        };

        let transition = match self.transition.as_deref() {
            Some(name) => name.parse().unwrap_or_else(|_err| {
                #[cfg(feature = "tracing")]
                crate::logging::debug!(
                    target: "boxslide.options",
                    transition = %_err.0,
                    "unknown transition, using linear"
                );
                Transition::Linear
            }),
            None => Transition::Linear,
        };

        ResolvedOptions {
            duration_ms,
            display,
            transition,
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        toml::from_str(s).map_err(OptionsError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(s).map_err(OptionsError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_json_str(&content)
    }
}

/// Sanitised options, fixed for the lifetime of one animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Always positive.
    pub duration_ms: u32,
    /// Lowercase, never empty, never `none`.
    pub display: String,
    pub transition: Transition,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        SlideOptions::default().resolve()
    }
}

/// Errors that can occur when loading slide options.
#[derive(Debug)]
pub enum OptionsError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
        }
    }
}

/// Leading optionally-signed decimal integer of `text`, after leading
/// whitespace. Saturates at the `i64` bounds.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let r = SlideOptions::new().resolve();
        assert_eq!(
            r,
            ResolvedOptions {
                duration_ms: 100,
                display: "block".into(),
                transition: Transition::Linear,
            }
        );
        assert_eq!(ResolvedOptions::default(), r);
    }

    #[test]
    fn non_positive_duration_falls_back() {
        for ms in [0, -5, i64::MIN] {
            assert_eq!(SlideOptions::new().duration(ms).resolve().duration_ms, 100);
        }
        assert_eq!(SlideOptions::new().duration(250).resolve().duration_ms, 250);
        assert_eq!(
            SlideOptions::new().duration(i64::MAX).resolve().duration_ms,
            u32::MAX
        );
    }

    #[test]
    fn duration_text_reads_the_integer_prefix() {
        let ms = |text: &str| SlideOptions::new().duration_text(text).duration;
        assert_eq!(ms("250"), Some(250));
        assert_eq!(ms("  250ms"), Some(250));
        assert_eq!(ms("12.9"), Some(12));
        assert_eq!(ms("-40"), Some(-40));
        assert_eq!(ms("+7"), Some(7));
        assert_eq!(ms("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(ms("fast"), None);
        assert_eq!(ms(""), None);
        assert_eq!(ms("-"), None);

        let resolved = SlideOptions::new().duration_text("250").resolve();
        assert_eq!(resolved.duration_ms, 250);
        let resolved = SlideOptions::new().duration_text("abc").resolve();
        assert_eq!(resolved.duration_ms, 100);
        let resolved = SlideOptions::new().duration_text("-5").resolve();
        assert_eq!(resolved.duration_ms, 100);
    }

    #[test]
    fn display_is_lowercased_and_never_none() {
        assert_eq!(SlideOptions::new().display("FLEX").resolve().display, "flex");
        assert_eq!(SlideOptions::new().display("None").resolve().display, "block");
        assert_eq!(SlideOptions::new().display("").resolve().display, "block");
        assert_eq!(
            SlideOptions::new().display("inline-block").resolve().display,
            "inline-block"
        );
    }

    #[test]
    fn unknown_transition_is_linear() {
        let r = SlideOptions::new().transition_name("wobble").resolve();
        assert_eq!(r.transition, Transition::Linear);
        let r = SlideOptions::new()
            .transition(Transition::EaseOutQuart)
            .resolve();
        assert_eq!(r.transition, Transition::EaseOutQuart);
    }

    #[test]
    fn force_opposite() {
        assert_eq!(Force::Show.opposite(), Force::Hide);
        assert_eq!(Force::Hide.opposite(), Force::Show);
    }

    #[cfg(feature = "config")]
    mod config {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::io::Write;

        #[test]
        fn from_toml() {
            let opts = SlideOptions::from_toml_str(
                "duration = 250\ndisplay = \"flex\"\ntransition = \"easeOutCubic\"\nforce = \"hide\"\n",
            )
            .unwrap();
            assert_eq!(
                opts,
                SlideOptions::new()
                    .duration(250)
                    .display("flex")
                    .transition(Transition::EaseOutCubic)
                    .force(Force::Hide)
            );
        }

        #[test]
        fn from_json_partial() {
            let opts = SlideOptions::from_json_str(r#"{"transition":"nope"}"#).unwrap();
            assert_eq!(opts.duration, None);
            assert_eq!(opts.resolve().transition, Transition::Linear);
        }

        #[test]
        fn from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "duration = -1").unwrap();
            let opts = SlideOptions::from_toml_file(file.path()).unwrap();
            assert_eq!(opts.resolve().duration_ms, 100);
        }

        #[test]
        fn bad_input_reports_format() {
            let err = SlideOptions::from_json_str("{").unwrap_err();
            assert!(err.to_string().starts_with("JSON parse error"));
            let err = SlideOptions::from_toml_str("duration = \"x\"").unwrap_err();
            assert!(err.to_string().starts_with("TOML parse error"));
            let err = SlideOptions::from_json_file("/definitely/not/here.json").unwrap_err();
            assert!(matches!(err, OptionsError::Io(_)));
        }

        #[test]
        fn toml_round_trip_skips_unset() {
            let text = toml::to_string(&SlideOptions::new().duration(80)).unwrap();
            assert_eq!(text.trim(), "duration = 80");
        }
    }
}
