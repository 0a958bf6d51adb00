#![forbid(unsafe_code)]

//! Box-model property set.
//!
//! A [`BoxModel`] is a complete snapshot of the ten animatable properties:
//! content width and height, four paddings, and four margins. A
//! [`Destination`] is the partial counterpart, naming only the properties a
//! slide should move.
//!
//! # Invariants
//!
//! 1. A [`BoxModel`] always carries all ten values, and every value is finite.
//! 2. [`BoxProperty::ALL`] fixes the canonical property order; iteration over
//!    snapshots and destinations always follows it.
//! 3. [`parse_px`] never fails: anything it cannot read becomes `0.0`.

use std::fmt;

/// One of the ten animatable box-model properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoxProperty {
    Width,
    Height,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
}

impl BoxProperty {
    /// Every property, in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Width,
        Self::Height,
        Self::PaddingTop,
        Self::PaddingRight,
        Self::PaddingBottom,
        Self::PaddingLeft,
        Self::MarginTop,
        Self::MarginRight,
        Self::MarginBottom,
        Self::MarginLeft,
    ];

    /// Property name as used by computed-style lookups (`padding-top`).
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::MarginTop => "margin-top",
            Self::MarginRight => "margin-right",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",
        }
    }

    /// Property name as used by inline style objects (`paddingTop`).
    #[must_use]
    pub const fn style_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::PaddingTop => "paddingTop",
            Self::PaddingRight => "paddingRight",
            Self::PaddingBottom => "paddingBottom",
            Self::PaddingLeft => "paddingLeft",
            Self::MarginTop => "marginTop",
            Self::MarginRight => "marginRight",
            Self::MarginBottom => "marginBottom",
            Self::MarginLeft => "marginLeft",
        }
    }

    /// The slide axis this property belongs to.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Width
            | Self::PaddingRight
            | Self::PaddingLeft
            | Self::MarginRight
            | Self::MarginLeft => Axis::Horizontal,
            Self::Height
            | Self::PaddingTop
            | Self::PaddingBottom
            | Self::MarginTop
            | Self::MarginBottom => Axis::Vertical,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BoxProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style_name())
    }
}

/// Slide direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Width plus left/right padding and margin.
    Horizontal,
    /// Height plus top/bottom padding and margin.
    Vertical,
}

impl Axis {
    /// Properties moved by a slide along this axis.
    #[must_use]
    pub const fn properties(self) -> [BoxProperty; 5] {
        match self {
            Self::Horizontal => [
                BoxProperty::Width,
                BoxProperty::PaddingRight,
                BoxProperty::PaddingLeft,
                BoxProperty::MarginRight,
                BoxProperty::MarginLeft,
            ],
            Self::Vertical => [
                BoxProperty::Height,
                BoxProperty::PaddingTop,
                BoxProperty::PaddingBottom,
                BoxProperty::MarginTop,
                BoxProperty::MarginBottom,
            ],
        }
    }
}

/// Complete snapshot of the ten box-model properties, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxModel {
    values: [f64; 10],
}

impl BoxModel {
    /// The zeroed-out snapshot: an element occupying no space.
    pub const NOTHING: Self = Self { values: [0.0; 10] };

    /// Build a snapshot by asking `f` for every property.
    ///
    /// Non-finite results are stored as `0.0`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(BoxProperty) -> f64) -> Self {
        let mut out = Self::NOTHING;
        for prop in BoxProperty::ALL {
            out.set(prop, f(prop));
        }
        out
    }

    /// Value of `prop`.
    #[inline]
    #[must_use]
    pub const fn get(&self, prop: BoxProperty) -> f64 {
        self.values[prop.index()]
    }

    /// Set `prop`, coercing non-finite input to `0.0`.
    pub fn set(&mut self, prop: BoxProperty, value: f64) {
        self.values[prop.index()] = if value.is_finite() { value } else { 0.0 };
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, prop: BoxProperty, value: f64) -> Self {
        self.set(prop, value);
        self
    }

    /// Whether every property is zero.
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Iterate `(property, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxProperty, f64)> + '_ {
        BoxProperty::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Project onto the properties of one axis.
    #[must_use]
    pub fn restrict(&self, axis: Axis) -> Destination {
        axis.properties()
            .into_iter()
            .fold(Destination::new(), |dest, p| dest.with(p, self.get(p)))
    }
}

impl Default for BoxModel {
    fn default() -> Self {
        Self::NOTHING
    }
}

/// Partial map of target values for a slide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Destination {
    values: [Option<f64>; 10],
}

impl Destination {
    /// An empty destination.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: [None; 10] }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, prop: BoxProperty, value: f64) -> Self {
        self.set(prop, value);
        self
    }

    /// Target `prop` at `value`. Non-finite values are kept; planning skips them.
    pub fn set(&mut self, prop: BoxProperty, value: f64) {
        self.values[prop.index()] = Some(value);
    }

    /// Target for `prop`, if any.
    #[must_use]
    pub const fn get(&self, prop: BoxProperty) -> Option<f64> {
        self.values[prop.index()]
    }

    /// True when no property has a target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Number of properties with a target.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Iterate targeted `(property, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxProperty, f64)> + '_ {
        BoxProperty::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }
}

impl From<BoxModel> for Destination {
    fn from(model: BoxModel) -> Self {
        BoxProperty::ALL
            .into_iter()
            .fold(Self::new(), |dest, p| dest.with(p, model.get(p)))
    }
}

impl FromIterator<(BoxProperty, f64)> for Destination {
    fn from_iter<I: IntoIterator<Item = (BoxProperty, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |dest, (p, v)| dest.with(p, v))
    }
}

/// Read a leading decimal number out of a computed-style string (`"12.5px"`).
///
/// Leading whitespace is skipped, then the longest `[+-]digits[.digits][e[+-]digits]`
/// prefix is parsed. No number, or a non-finite one, yields `0.0`.
#[must_use]
pub fn parse_px(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        mantissa += frac_end - (end + 1);
        if mantissa > 0 {
            end = frac_end;
        }
    }
    if mantissa == 0 {
        return 0.0;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < len && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nothing_is_all_zero() {
        assert!(BoxModel::NOTHING.is_nothing());
        assert_eq!(BoxModel::default(), BoxModel::NOTHING);
        assert_eq!(BoxModel::NOTHING.iter().count(), 10);
    }

    #[test]
    fn set_coerces_non_finite() {
        let m = BoxModel::NOTHING
            .with(BoxProperty::Width, f64::NAN)
            .with(BoxProperty::Height, f64::INFINITY)
            .with(BoxProperty::MarginTop, -4.0);
        assert_eq!(m.get(BoxProperty::Width), 0.0);
        assert_eq!(m.get(BoxProperty::Height), 0.0);
        assert_eq!(m.get(BoxProperty::MarginTop), -4.0);
    }

    #[test]
    fn axis_properties_partition_all() {
        let mut seen: Vec<BoxProperty> = Axis::Horizontal
            .properties()
            .into_iter()
            .chain(Axis::Vertical.properties())
            .collect();
        seen.sort();
        assert_eq!(seen, BoxProperty::ALL.to_vec());
        for p in Axis::Horizontal.properties() {
            assert_eq!(p.axis(), Axis::Horizontal);
        }
        for p in Axis::Vertical.properties() {
            assert_eq!(p.axis(), Axis::Vertical);
        }
    }

    #[test]
    fn restrict_keeps_only_axis_keys() {
        let m = BoxModel::from_fn(|p| p as usize as f64 + 1.0);
        let h = m.restrict(Axis::Horizontal);
        assert_eq!(h.len(), 5);
        assert_eq!(h.get(BoxProperty::Width), Some(1.0));
        assert_eq!(h.get(BoxProperty::Height), None);
        assert_eq!(h.get(BoxProperty::MarginLeft), Some(10.0));

        let v = m.restrict(Axis::Vertical);
        assert_eq!(v.get(BoxProperty::Height), Some(2.0));
        assert_eq!(v.get(BoxProperty::PaddingLeft), None);
    }

    #[test]
    fn destination_iterates_in_canonical_order() {
        let d: Destination = [(BoxProperty::MarginLeft, 3.0), (BoxProperty::Width, 1.0)]
            .into_iter()
            .collect();
        let keys: Vec<_> = d.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec![BoxProperty::Width, BoxProperty::MarginLeft]);
        assert!(!d.is_empty());
        assert!(Destination::new().is_empty());
    }

    #[test]
    fn property_names() {
        assert_eq!(BoxProperty::PaddingBottom.css_name(), "padding-bottom");
        assert_eq!(BoxProperty::PaddingBottom.style_name(), "paddingBottom");
        assert_eq!(BoxProperty::MarginLeft.to_string(), "marginLeft");
    }

    #[test]
    fn parse_px_reads_numeric_prefix() {
        assert_eq!(parse_px("80px"), 80.0);
        assert_eq!(parse_px("  12.5px"), 12.5);
        assert_eq!(parse_px("-3px"), -3.0);
        assert_eq!(parse_px(".5em"), 0.5);
        assert_eq!(parse_px("7."), 7.0);
        assert_eq!(parse_px("1e2px"), 100.0);
        assert_eq!(parse_px("1e"), 1.0);
        assert_eq!(parse_px("2e+"), 2.0);
    }

    #[test]
    fn parse_px_garbage_is_zero() {
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
        assert_eq!(parse_px("."), 0.0);
        assert_eq!(parse_px("-"), 0.0);
        assert_eq!(parse_px("px12"), 0.0);
        assert_eq!(parse_px("1e999"), 0.0);
    }
}
