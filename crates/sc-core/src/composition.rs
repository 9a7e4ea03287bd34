//! Chemical composition inputs.
//!
//! Every field is restricted to a discrete arithmetic sequence of legal values.
//! Values are produced in closed form (`min + i * step`, rounded to the field's
//! precision) so that repeated enumeration never accumulates step drift.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{VALUE_MATCH_TOL, nearly_equal, round_to};
use std::fmt;

/// Number of composition fields fed to the model.
pub const ELEMENT_COUNT: usize = 13;

/// A composition field, in the column order the prediction model expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Element {
    Carbon,
    Silicon,
    Manganese,
    Phosphorus,
    Sulphur,
    Nickel,
    Chromium,
    Molybdenum,
    Copper,
    Vanadium,
    Aluminum,
    Nitrogen,
    NiobiumTantalum,
}

impl Element {
    pub const ALL: [Element; ELEMENT_COUNT] = [
        Element::Carbon,
        Element::Silicon,
        Element::Manganese,
        Element::Phosphorus,
        Element::Sulphur,
        Element::Nickel,
        Element::Chromium,
        Element::Molybdenum,
        Element::Copper,
        Element::Vanadium,
        Element::Aluminum,
        Element::Nitrogen,
        Element::NiobiumTantalum,
    ];

    /// Position of this field in the feature vector.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Feature column name used by the trained model.
    ///
    /// Copper is spelled `cooper` in the training data; the column name has to
    /// match it exactly.
    pub fn column(self) -> &'static str {
        match self {
            Self::Carbon => "carbon",
            Self::Silicon => "silicon",
            Self::Manganese => "manganese",
            Self::Phosphorus => "phosphorus",
            Self::Sulphur => "sulphur",
            Self::Nickel => "nickel",
            Self::Chromium => "chromium",
            Self::Molybdenum => "molybdenum",
            Self::Copper => "cooper",
            Self::Vanadium => "vanadium",
            Self::Aluminum => "aluminum",
            Self::Nitrogen => "nitrogen",
            Self::NiobiumTantalum => "niobium_tantalum",
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Carbon => "Carbon",
            Self::Silicon => "Silicon",
            Self::Manganese => "Manganese",
            Self::Phosphorus => "Phosphorus",
            Self::Sulphur => "Sulphur",
            Self::Nickel => "Nickel",
            Self::Chromium => "Chromium",
            Self::Molybdenum => "Molybdenum",
            Self::Copper => "Copper",
            Self::Vanadium => "Vanadium",
            Self::Aluminum => "Aluminum",
            Self::Nitrogen => "Nitrogen",
            Self::NiobiumTantalum => "Niobium + Tantalum",
        }
    }

    /// Input control label, e.g. "Carbon content (in %)".
    pub fn label(self) -> String {
        format!("{} content (in %)", self.name())
    }

    /// Legal value range for this field.
    pub fn range(self) -> ValueRange {
        match self {
            Self::Carbon => ValueRange::new(0.070, 0.005, 59, 3, 0.22),
            // 0.56 is included: the training grid was built with a float arange
            Self::Silicon => ValueRange::new(0.100, 0.005, 93, 3, 0.28),
            Self::Manganese => ValueRange::new(0.400, 0.005, 222, 3, 0.95),
            Self::Phosphorus => ValueRange::new(0.000, 0.001, 31, 3, 0.015),
            Self::Sulphur => ValueRange::new(0.000, 0.001, 23, 3, 0.012),
            Self::Nickel => ValueRange::new(0.000, 0.005, 130, 3, 0.3),
            Self::Chromium => ValueRange::new(0.000, 0.005, 270, 3, 0.65),
            Self::Molybdenum => ValueRange::new(0.000, 0.005, 280, 3, 0.7),
            Self::Copper => ValueRange::new(0.000, 0.005, 51, 3, 0.12),
            Self::Vanadium => ValueRange::new(0.000, 0.005, 61, 3, 0.15),
            Self::Aluminum => ValueRange::new(0.000, 0.001, 51, 3, 0.025),
            Self::Nitrogen => ValueRange::new(0.0000, 0.0001, 151, 4, 0.007),
            Self::NiobiumTantalum => ValueRange::new(0.0000, 0.0005, 4, 4, 0.001),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Ascending arithmetic sequence of legal values for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub step: f64,
    /// Number of legal values (always >= 1)
    pub count: usize,
    /// Decimal places every value is rounded to
    pub decimals: u32,
    pub default: f64,
}

impl ValueRange {
    pub const fn new(min: f64, step: f64, count: usize, decimals: u32, default: f64) -> Self {
        Self {
            min,
            step,
            count,
            decimals,
            default,
        }
    }

    /// The `i`-th legal value. Indices past the end are clamped to the maximum.
    pub fn value(&self, i: usize) -> f64 {
        let i = i.min(self.count - 1);
        round_to(self.min + i as f64 * self.step, self.decimals)
    }

    pub fn max(&self) -> f64 {
        self.value(self.count - 1)
    }

    /// Index of `v` if it is one of the legal values.
    ///
    /// `v` is not rounded first: 0.2204 is not carbon's 0.220.
    pub fn index_of(&self, v: f64) -> Option<usize> {
        if !v.is_finite() {
            return None;
        }
        let pos = ((v - self.min) / self.step).round();
        if pos < 0.0 || pos >= self.count as f64 {
            return None;
        }
        let i = pos as usize;
        nearly_equal(self.value(i), v, VALUE_MATCH_TOL).then_some(i)
    }

    /// Index of the legal value nearest to `v`.
    pub fn snap_index(&self, v: f64) -> usize {
        if v.is_nan() {
            return self.default_index();
        }
        let pos = ((v - self.min) / self.step).round();
        if pos <= 0.0 {
            0
        } else {
            (pos as usize).min(self.count - 1)
        }
    }

    pub fn default_index(&self) -> usize {
        self.snap_index(self.default)
    }
}

/// One steel composition: a legal value for each of the 13 fields.
///
/// Values are held as indices into each field's [`ValueRange`], so a sample can
/// never carry an out-of-domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositionSample {
    indices: [usize; ELEMENT_COUNT],
}

impl Default for CompositionSample {
    fn default() -> Self {
        Self::from_fn(|e| e.range().default_index())
    }
}

impl CompositionSample {
    fn from_fn(f: impl Fn(Element) -> usize) -> Self {
        let mut indices = [0; ELEMENT_COUNT];
        for e in Element::ALL {
            indices[e.position()] = f(e);
        }
        Self { indices }
    }

    /// Every field at its minimum.
    pub fn minimum() -> Self {
        Self::from_fn(|_| 0)
    }

    /// Every field at its maximum.
    pub fn maximum() -> Self {
        Self::from_fn(|e| e.range().count - 1)
    }

    pub fn get(&self, element: Element) -> f64 {
        element.range().value(self.indices[element.position()])
    }

    pub fn index(&self, element: Element) -> usize {
        self.indices[element.position()]
    }

    /// Select the `i`-th legal value (clamped to the last one).
    pub fn set_index(&mut self, element: Element, i: usize) {
        self.indices[element.position()] = i.min(element.range().count - 1);
    }

    /// Set a field to `value`, which must be one of its legal values exactly.
    /// Extra digits beyond the field's precision are out of domain.
    pub fn set(&mut self, element: Element, value: f64) -> CoreResult<()> {
        let range = element.range();
        let i = range.index_of(value).ok_or(CoreError::OutOfDomain {
            field: element.column(),
            value,
            min: range.min,
            max: range.max(),
            step: range.step,
        })?;
        self.indices[element.position()] = i;
        Ok(())
    }

    pub fn with(mut self, element: Element, value: f64) -> CoreResult<Self> {
        self.set(element, value)?;
        Ok(self)
    }

    /// Composition values in model column order.
    pub fn features(&self) -> [f64; ELEMENT_COUNT] {
        let mut out = [0.0; ELEMENT_COUNT];
        for e in Element::ALL {
            out[e.position()] = self.get(e);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.into_iter().map(move |e| (e, self.get(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_match_documented_bounds() {
        let expect = [
            (Element::Carbon, 0.07, 0.36, 59),
            (Element::Silicon, 0.10, 0.56, 93),
            (Element::Manganese, 0.4, 1.505, 222),
            (Element::Phosphorus, 0.0, 0.03, 31),
            (Element::Sulphur, 0.0, 0.022, 23),
            (Element::Nickel, 0.0, 0.645, 130),
            (Element::Chromium, 0.0, 1.345, 270),
            (Element::Molybdenum, 0.0, 1.395, 280),
            (Element::Copper, 0.0, 0.25, 51),
            (Element::Vanadium, 0.0, 0.3, 61),
            (Element::Aluminum, 0.0, 0.05, 51),
            (Element::Nitrogen, 0.0, 0.015, 151),
            (Element::NiobiumTantalum, 0.0, 0.0015, 4),
        ];
        for (e, min, max, count) in expect {
            let r = e.range();
            assert_eq!(r.value(0), min, "{e} min");
            assert_eq!(r.max(), max, "{e} max");
            assert_eq!(r.count, count, "{e} count");
        }
    }

    #[test]
    fn defaults_are_legal_values() {
        for e in Element::ALL {
            let r = e.range();
            assert!(r.index_of(r.default).is_some(), "{e} default {}", r.default);
            assert_eq!(r.value(r.default_index()), r.default);
        }
    }

    #[test]
    fn values_are_strictly_ascending_and_rounded() {
        for e in Element::ALL {
            let r = e.range();
            let values: Vec<f64> = (0..r.count).map(|i| r.value(i)).collect();
            assert_eq!(values.len(), r.count);
            for w in values.windows(2) {
                assert!(w[1] > w[0], "{e}: {} !> {}", w[1], w[0]);
            }
            for v in values {
                assert_eq!(round_to(v, r.decimals), v);
            }
        }
    }

    #[test]
    fn carbon_sequence_has_no_drift() {
        let r = Element::Carbon.range();
        assert_eq!(r.value(3), 0.085);
        assert_eq!(r.value(30), 0.22);
        assert_eq!(r.index_of(0.085), Some(3));
    }

    #[test]
    fn index_of_rejects_off_grid_and_out_of_range() {
        let r = Element::Carbon.range();
        assert_eq!(r.index_of(0.0725), None);
        assert_eq!(r.index_of(0.065), None);
        assert_eq!(r.index_of(0.365), None);
        assert_eq!(r.index_of(f64::NAN), None);
    }

    #[test]
    fn snap_clamps_to_bounds() {
        let r = Element::Nitrogen.range();
        assert_eq!(r.snap_index(-1.0), 0);
        assert_eq!(r.value(r.snap_index(1.0)), 0.015);
        assert_eq!(r.value(r.snap_index(0.00704)), 0.007);
        assert_eq!(r.snap_index(f64::NAN), r.default_index());
    }

    #[test]
    fn default_sample_matches_documented_defaults() {
        let s = CompositionSample::default();
        assert_eq!(
            s.features(),
            [
                0.22, 0.28, 0.95, 0.015, 0.012, 0.3, 0.65, 0.7, 0.12, 0.15, 0.025, 0.007, 0.001
            ]
        );
    }

    #[test]
    fn set_rejects_illegal_value() {
        let mut s = CompositionSample::default();
        let err = s.set(Element::Carbon, 0.5).unwrap_err();
        assert!(matches!(err, CoreError::OutOfDomain { field: "carbon", .. }));
        assert_eq!(s.get(Element::Carbon), 0.22);

        s.set(Element::Carbon, 0.3).unwrap();
        assert_eq!(s.get(Element::Carbon), 0.3);
    }

    #[test]
    fn set_index_clamps() {
        let mut s = CompositionSample::minimum();
        s.set_index(Element::NiobiumTantalum, 99);
        assert_eq!(s.get(Element::NiobiumTantalum), 0.0015);
    }

    #[test]
    fn set_rejects_digits_beyond_precision() {
        let mut s = CompositionSample::default();
        let err = s.set(Element::Carbon, 0.2204).unwrap_err();
        assert!(matches!(err, CoreError::OutOfDomain { field: "carbon", .. }));
        assert!(s.set(Element::Nitrogen, 0.00705).is_err());
        assert_eq!(s.get(Element::Nitrogen), 0.007);

        s.set(Element::Nitrogen, 0.0071).unwrap();
        assert_eq!(s.get(Element::Nitrogen), 0.0071);
        // accumulated float noise still matches the legal value
        s.set(Element::Carbon, 0.07 + 0.005 + 0.005 + 0.005).unwrap();
        assert_eq!(s.get(Element::Carbon), 0.085);
    }

    #[test]
    fn positions_follow_column_order() {
        for (i, e) in Element::ALL.iter().enumerate() {
            assert_eq!(e.position(), i);
        }
    }
}
