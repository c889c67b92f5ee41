//! Unit representation with conversion factors

use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A physical unit with its dimension and conversion factors.
///
/// Conversion model: `value_si = value * to_si_factor + to_si_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kWh", "inch_H2O_39F")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilowatt-hour")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to the SI base unit
    pub to_si_factor: f64,
    /// Offset for non-proportional units like Celsius and Fahrenheit
    pub to_si_offset: f64,
    /// Category for organization (e.g., "length", "pressure")
    pub category: String,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, to_si_factor: f64, category: &str) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset: 0.0,
            category: category.to_string(),
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: f64,
        to_si_offset: f64,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// The dimensionless unity unit, the neutral element of unit algebra
    pub fn unity() -> Self {
        Unit::new("1", "dimensionless", Dimension::DIMENSIONLESS, 1.0, "dimensionless")
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.to_si_offset != 0.0
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to the SI base unit
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.to_si_factor + self.to_si_offset
    }

    /// Convert a value from the SI base unit to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        (value_si - self.to_si_offset) / self.to_si_factor
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, ConversionError> {
        if !self.is_compatible(target) {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        Ok(target.from_si(self.to_si(value)))
    }

    /// Multiply two units (e.g., kW * h -> kWh)
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{}*{}", self.symbol, other.symbol),
            name: format!("{} {}", self.name, other.name),
            dimension: self.dimension.multiply(&other.dimension),
            to_si_factor: self.to_si_factor * other.to_si_factor,
            // Product of offset units loses meaning
            to_si_offset: 0.0,
            category: "derived".to_string(),
        }
    }

    /// Divide two units (e.g., ft3 / min -> ft3/min)
    pub fn divide(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{}/{}", self.symbol, other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension: self.dimension.divide(&other.dimension),
            to_si_factor: self.to_si_factor / other.to_si_factor,
            to_si_offset: 0.0,
            category: "derived".to_string(),
        }
    }

    /// Raise unit to an integer power (e.g., m^3)
    pub fn power(&self, exp: i32) -> Unit {
        let symbol = if exp == 1 {
            self.symbol.clone()
        } else {
            format!("{}^{}", self.symbol, exp)
        };

        Unit {
            symbol,
            name: format!("{}^{}", self.name, exp),
            dimension: self.dimension.power(exp),
            to_si_factor: self.to_si_factor.powi(exp),
            to_si_offset: 0.0,
            category: self.category.clone(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors surfaced by unit lookup and conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Units have incompatible dimensions
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },
    /// Unit symbol not known to the registry
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// Exponent in a unit expression did not parse as an integer
    #[error("invalid exponent in unit expression: {0}")]
    InvalidExponent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length")
    }

    fn foot() -> Unit {
        Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, 1.0, "time")
    }

    fn celsius() -> Unit {
        Unit::with_offset("degC", "celsius", Dimension::TEMPERATURE, 1.0, 273.15, "temperature")
    }

    #[test]
    fn test_compatibility() {
        assert!(meter().is_compatible(&foot()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_proportional_conversion() {
        let value = foot().convert_to(10.0, &meter()).unwrap();
        assert!((value - 3.048).abs() < 1e-12);
    }

    #[test]
    fn test_offset_conversion() {
        let kelvin = Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature");
        let value = celsius().convert_to(0.0, &kelvin).unwrap();
        assert!((value - 273.15).abs() < 1e-12);

        let back = kelvin.convert_to(273.15, &celsius()).unwrap();
        assert!(back.abs() < 1e-12);
    }

    #[test]
    fn test_incompatible_conversion() {
        let err = meter().convert_to(1.0, &second()).unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_unit_algebra() {
        let m3 = meter().power(3);
        assert_eq!(m3.symbol, "m^3");
        assert_eq!(m3.dimension, Dimension::VOLUME);

        let flow = m3.divide(&second());
        assert_eq!(flow.dimension, Dimension::VOLUMETRIC_FLOW);

        let area = meter().multiply(&meter());
        assert_eq!(area.dimension, Dimension::AREA);
    }

    #[test]
    fn test_offset_dropped_in_compounds() {
        let compound = celsius().multiply(&meter());
        assert!(!compound.has_offset());
    }

    #[test]
    fn test_unity() {
        let one = Unit::unity();
        assert!(one.dimension.is_dimensionless());
        assert_eq!(one.to_si(42.0), 42.0);
    }
}
