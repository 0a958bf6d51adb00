#![forbid(unsafe_code)]

//! Progress tokens.
//!
//! A [`ProgressToken`] names one in-flight animation. The same value lives in
//! the runtime registry and on the element under [`ProgressToken::ATTRIBUTE`],
//! so "is this element animating?" is a single attribute read.

use std::fmt;
use std::num::NonZeroU32;

/// Positive integer identifying one in-flight animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgressToken(NonZeroU32);

impl ProgressToken {
    /// Element attribute holding the token.
    pub const ATTRIBUTE: &'static str = "data-progress-key";

    /// Smallest token.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Wrap a raw value; `None` for zero.
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Next candidate when probing for a free token. Wraps past `u32::MAX`
    /// to `1`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self.0.checked_add(1) {
            Some(v) => Self(v),
            None => Self::FIRST,
        }
    }

    /// Read a token back from an attribute value.
    ///
    /// Leading whitespace and an optional sign are accepted, then the leading
    /// run of digits is read. Zero, negative, overflowing, or digit-less
    /// input yields `None`.
    #[must_use]
    pub fn parse_attr(raw: &str) -> Option<Self> {
        let s = raw.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if negative || digits == 0 {
            return None;
        }
        rest[..digits].parse::<u32>().ok().and_then(Self::new)
    }
}

impl fmt::Display for ProgressToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_token() {
        assert_eq!(ProgressToken::new(0), None);
        assert_eq!(ProgressToken::new(7).map(ProgressToken::get), Some(7));
    }

    #[test]
    fn next_wraps_past_max() {
        let max = ProgressToken::new(u32::MAX).unwrap();
        assert_eq!(max.next().get(), 1);
        assert_eq!(ProgressToken::new(41).unwrap().next().get(), 42);
    }

    #[test]
    fn attribute_round_trip() {
        let t = ProgressToken::new(123_456).unwrap();
        assert_eq!(ProgressToken::parse_attr(&t.to_string()), Some(t));
    }

    #[test]
    fn parse_attr_integer_prefix() {
        assert_eq!(ProgressToken::parse_attr(" 42abc").map(ProgressToken::get), Some(42));
        assert_eq!(ProgressToken::parse_attr("+9").map(ProgressToken::get), Some(9));
        assert_eq!(ProgressToken::parse_attr("12.9").map(ProgressToken::get), Some(12));
    }

    #[test]
    fn parse_attr_rejects() {
        for raw in ["", "0", "-3", "abc", "99999999999", "+", "   "] {
            assert_eq!(ProgressToken::parse_attr(raw), None, "{raw:?}");
        }
    }
}
