use crate::CoreError;

/// Absolute slack when matching a parsed value against a legal grid value.
///
/// Far below the finest step (0.0001) and above parse/round noise.
pub const VALUE_MATCH_TOL: f64 = 1e-9;

pub fn nearly_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_is_absolute() {
        assert!(nearly_equal(0.085, 0.07 + 0.005 + 0.005 + 0.005, VALUE_MATCH_TOL));
        assert!(!nearly_equal(0.22, 0.2204, VALUE_MATCH_TOL));
        assert!(!nearly_equal(0.0001, 0.0002, VALUE_MATCH_TOL));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "yield").unwrap_err();
        assert!(matches!(err, CoreError::NonFinite { what: "yield", .. }));
        assert_eq!(ensure_finite(250.0, "yield").unwrap(), 250.0);
    }

    #[test]
    fn round_to_removes_step_drift() {
        // adding 0.005 three times to 0.07 accumulates to 0.08500000000000002
        let drifted = 0.07 + 0.005 + 0.005 + 0.005;
        assert_ne!(drifted, 0.085);
        assert_eq!(round_to(drifted, 3), 0.085);
        assert_eq!(round_to(0.00049999, 4), 0.0005);
    }
}
