//! Quantity type - a magnitude with an associated unit

use crate::unit::ConversionError;
use crate::{Dimension, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical quantity: a numeric magnitude with an associated unit.
///
/// Quantities are produced on demand and are immutable; conversion returns a
/// new quantity. Two quantities built against the same registry agree on what
/// their units mean, which is why the crate keeps a single shared registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric magnitude
    pub magnitude: f64,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Quantity { magnitude, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(magnitude: f64) -> Self {
        Quantity {
            magnitude,
            unit: Unit::unity(),
        }
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// The magnitude expressed in SI base units
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.magnitude)
    }

    /// Convert to another unit
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        let magnitude = self.unit.convert_to(self.magnitude, target)?;
        Ok(Quantity::new(magnitude, target.clone()))
    }

    /// Add two quantities (must have compatible dimensions)
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.magnitude + converted.magnitude, self.unit.clone()))
    }

    /// Subtract two quantities (must have compatible dimensions)
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.magnitude - converted.magnitude, self.unit.clone()))
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.magnitude * other.magnitude, self.unit.multiply(&other.unit))
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.magnitude / other.magnitude, self.unit.divide(&other.unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() || self.unit.symbol == "1" {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare SI values; incompatible quantities are never equal
        if !self.is_compatible(other) {
            return false;
        }
        self.si_value() == other.si_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length")
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, 1.0, "time")
    }

    #[test]
    fn test_quantity_creation() {
        let q = Quantity::new(5.0, meter());
        assert_eq!(q.magnitude, 5.0);
        assert_eq!(q.unit.symbol, "m");
    }

    #[test]
    fn test_dimensionless() {
        let q = Quantity::dimensionless(42.0);
        assert!(q.is_dimensionless());
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::new(5000.0, meter());
        let converted = q.convert_to(&kilometer()).unwrap();
        assert_eq!(converted.magnitude, 5.0);
        assert_eq!(converted.unit.symbol, "km");
    }

    #[test]
    fn test_convert_incompatible() {
        let q = Quantity::new(5.0, meter());
        assert!(q.convert_to(&second()).is_err());
    }

    #[test]
    fn test_add() {
        let q1 = Quantity::new(1.0, kilometer());
        let q2 = Quantity::new(500.0, meter());
        let sum = q1.add(&q2).unwrap();

        assert_eq!(sum.magnitude, 1.5);
        assert_eq!(sum.unit.symbol, "km");
    }

    #[test]
    fn test_add_incompatible() {
        let q1 = Quantity::new(1.0, meter());
        let q2 = Quantity::new(1.0, second());
        assert!(q1.add(&q2).is_err());
    }

    #[test]
    fn test_mul_div() {
        let distance = Quantity::new(100.0, meter());
        let time = Quantity::new(10.0, second());

        let speed = distance.div(&time);
        assert_eq!(speed.magnitude, 10.0);
        assert_eq!(speed.dimension(), Dimension::LENGTH.divide(&Dimension::TIME));

        let area = distance.mul(&distance);
        assert_eq!(area.magnitude, 10000.0);
        assert_eq!(area.dimension(), Dimension::AREA);
    }

    #[test]
    fn test_equality() {
        let q1 = Quantity::new(1.0, kilometer());
        let q2 = Quantity::new(1000.0, meter());
        assert_eq!(q1, q2);

        let q3 = Quantity::new(1.0, second());
        assert_ne!(q1, q3);
    }

    #[test]
    fn test_display() {
        let q = Quantity::new(5.0, meter());
        assert_eq!(format!("{}", q), "5 m");

        let d = Quantity::dimensionless(2.5);
        assert_eq!(format!("{}", d), "2.5");
    }

    #[test]
    fn test_serde_round_trip() {
        let q = Quantity::new(3.5, kilometer());
        let json = serde_json::to_string(&q).unwrap();
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
        assert_eq!(back.unit.symbol, "km");
    }
}
