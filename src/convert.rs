//! Convenience conversion helpers over the shared registry.
//!
//! This is the surface most callers want: string-named conversions against
//! [`UNITS`], the roof-pitch helper, and a few factors that are needed often
//! enough to be worth computing once.

use crate::parse::parse_unit;
use crate::quantity::Quantity;
use crate::unit::ConversionError;
use crate::units::UNITS;
use std::sync::LazyLock;

/// Convert an optional value between named units.
///
/// `None` passes through untouched, before any unit lookup, so absent sensor
/// readings flow through conversion pipelines without special-casing.
/// Otherwise behaves like [`convert_scalar`].
pub fn convert(value: Option<f64>, old_unit: &str, new_unit: &str) -> Result<Option<f64>, ConversionError> {
    match value {
        None => Ok(None),
        Some(v) => convert_scalar(v, old_unit, new_unit).map(Some),
    }
}

/// Convert a value between named units, returning the bare magnitude.
///
/// Both unit arguments accept anything [`parse_unit`] understands, including
/// aliases and compound expressions like `"cubic_feet/min"`. Fails with
/// [`ConversionError::UnknownUnit`] for names the registry does not know and
/// [`ConversionError::IncompatibleDimensions`] for unit pairs that do not
/// measure the same dimension.
pub fn convert_scalar(value: f64, old_unit: &str, new_unit: &str) -> Result<f64, ConversionError> {
    let from = parse_unit(&UNITS, old_unit)?;
    let to = parse_unit(&UNITS, new_unit)?;
    let converted = Quantity::new(value, from).convert_to(&to)?;
    Ok(converted.magnitude)
}

/// Convert a roof pitch (rise per 12 units of run) to a slope angle in
/// degrees. A 12/12 pitch is a 45° slope.
pub fn pitch2deg(pitch: f64) -> f64 {
    let radians = (pitch / 12.0).atan();
    convert_scalar(radians, "rad", "deg").expect("rad and deg are registered angle units")
}

/// Additive offset from the Celsius scale to Kelvin (273.15)
pub static DEGC_TO_K: LazyLock<f64> = LazyLock::new(|| {
    convert_scalar(0.0, "degC", "K").expect("degC and K are registered temperature units")
});

/// Factor converting kilowatt-hours to therms
pub static KWH_TO_THERMS: LazyLock<f64> = LazyLock::new(|| {
    convert_scalar(1.0, "kWh", "therms").expect("kWh and therm are registered energy units")
});

/// Factor converting cubic feet per minute to cubic meters per second
pub static CFM_TO_M3S: LazyLock<f64> = LazyLock::new(|| {
    convert_scalar(1.0, "cubic_feet/min", "m^3/s").expect("flow units are registered")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_none_passes_through() {
        assert_eq!(convert(None, "m", "ft").unwrap(), None);
    }

    #[test]
    fn test_none_passes_through_before_lookup() {
        // The short-circuit happens before any unit lookup, so nonsense
        // strings are fine when the value is absent.
        assert_eq!(convert(None, "not_a_unit", "also_not_a_unit").unwrap(), None);
    }

    #[test]
    fn test_celsius_to_kelvin() {
        assert_close(convert(Some(0.0), "degC", "K").unwrap().unwrap(), 273.15);
    }

    #[test]
    fn test_inch_h2o_to_pascal() {
        assert_close(convert(Some(1.0), "inch_H2O_39F", "Pa").unwrap().unwrap(), 249.08891);
        // Via alias on both sides
        assert_close(convert(Some(1.0), "inH2O", "pascal").unwrap().unwrap(), 249.08891);
    }

    #[test]
    fn test_percent_to_unitless() {
        assert_close(convert(Some(50.0), "percent", "unitless").unwrap().unwrap(), 0.5);
        assert_close(convert(Some(0.5), "unitless", "percent").unwrap().unwrap(), 50.0);
    }

    #[test]
    fn test_incompatible_dimensions() {
        let err = convert(Some(5.0), "meter", "second").unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(Some(5.0), "meter", "bogus_unit_xyz").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("bogus_unit_xyz".to_string()));
    }

    #[test]
    fn test_unitless_does_not_coerce_to_angle() {
        let err = convert(Some(1.0), "unitless", "rad").unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_round_trip() {
        for (value, u1, u2) in [
            (21.5, "degC", "degF"),
            (3.7, "kWh", "therms"),
            (1250.0, "cfm", "m^3/s"),
            (0.25, "inch_H2O_39F", "Pa"),
            (88.0, "percent", "unitless"),
        ] {
            let there = convert_scalar(value, u1, u2).unwrap();
            let back = convert_scalar(there, u2, u1).unwrap();
            assert_close(back, value);
        }
    }

    #[test]
    fn test_pitch2deg() {
        assert_close(pitch2deg(12.0), 45.0);
        assert_close(pitch2deg(0.0), 0.0);
        // 6/12 pitch, a common roof slope
        assert_close(pitch2deg(6.0), 26.56505117707799);
        // Total over the reals, including negative pitches
        assert_close(pitch2deg(-12.0), -45.0);
    }

    #[test]
    fn test_degc_to_k_constant() {
        assert_close(*DEGC_TO_K, 273.15);
    }

    #[test]
    fn test_kwh_to_therms_constant() {
        assert_close(*KWH_TO_THERMS, 3.6e6 / 1.0550558526e8);
        // Sanity: a therm is about 29.3 kWh
        assert_close(1.0 / *KWH_TO_THERMS, 29.307107016666668);
    }

    #[test]
    fn test_cfm_to_m3s_constant() {
        assert_close(*CFM_TO_M3S, 0.028316846592 / 60.0);
        // The compound expression and the registered cfm symbol agree
        assert_close(*CFM_TO_M3S, convert_scalar(1.0, "cfm", "m^3/s").unwrap());
    }
}
