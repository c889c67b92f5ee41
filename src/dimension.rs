//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an 8-element vector:
//! [length, mass, time, current, temperature, amount, luminosity, ratio].
//! The eighth slot is a pseudo-dimension backing `unitless`/`percent` so
//! explicit ratios never silently convert to plain dimensionless values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimensions of a physical quantity, as exponents of the 7 SI base
/// dimensions plus the ratio pseudo-dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity, ratio]
    pub exponents: [i32; 8],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0, 0] };

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0, 0, 0] };

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0, 0, 0] };

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0, 0, 0] };

    /// Electric current dimension [I]
    pub const CURRENT: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0, 0, 0] };

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0, 0, 0] };

    /// Amount of substance dimension [N]
    pub const AMOUNT: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 1, 0, 0] };

    /// Luminous intensity dimension [J]
    pub const LUMINOSITY: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 1, 0] };

    /// Explicit ratio pseudo-dimension [R], for `unitless` and `percent`
    pub const RATIO: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0, 1] };

    /// Area [L^2]
    pub const AREA: Dimension = Dimension { exponents: [2, 0, 0, 0, 0, 0, 0, 0] };

    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension { exponents: [3, 0, 0, 0, 0, 0, 0, 0] };

    /// Volumetric flow [L^3 T^-1]
    pub const VOLUMETRIC_FLOW: Dimension = Dimension { exponents: [3, 0, -1, 0, 0, 0, 0, 0] };

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0, 0, 0] };

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension { exponents: [2, 1, -2, 0, 0, 0, 0, 0] };

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension { exponents: [2, 1, -3, 0, 0, 0, 0, 0] };

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension { exponents: [-1, 1, -2, 0, 0, 0, 0, 0] };

    /// Create a new dimension from exponents
    pub fn new(exponents: [i32; 8]) -> Self {
        Dimension { exponents }
    }

    /// Resolve a named base dimension, as used in `[...]` definition
    /// expressions. `no_unit` is the name the ratio pseudo-dimension goes by
    /// in definition strings.
    pub fn base(name: &str) -> Option<Dimension> {
        match name {
            "length" => Some(Self::LENGTH),
            "mass" => Some(Self::MASS),
            "time" => Some(Self::TIME),
            "current" => Some(Self::CURRENT),
            "temperature" => Some(Self::TEMPERATURE),
            "amount" => Some(Self::AMOUNT),
            "luminosity" => Some(Self::LUMINOSITY),
            "no_unit" | "ratio" => Some(Self::RATIO),
            _ => None,
        }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 8];
        for i in 0..8 {
            result[i] = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 8];
        for i in 0..8 {
            result[i] = self.exponents[i] - other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Dimension {
        let mut result = [0i32; 8];
        for i in 0..8 {
            result[i] = self.exponents[i] * exp;
        }
        Dimension { exponents: result }
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0, 0, 0] => Some("current"),
            [0, 0, 0, 0, 1, 0, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 0, 1, 0, 0] => Some("amount"),
            [0, 0, 0, 0, 0, 0, 1, 0] => Some("luminosity"),
            [0, 0, 0, 0, 0, 0, 0, 1] => Some("ratio"),
            [2, 0, 0, 0, 0, 0, 0, 0] => Some("area"),
            [3, 0, 0, 0, 0, 0, 0, 0] => Some("volume"),
            [3, 0, -1, 0, 0, 0, 0, 0] => Some("volumetric flow"),
            [1, 1, -2, 0, 0, 0, 0, 0] => Some("force"),
            [2, 1, -2, 0, 0, 0, 0, 0] => Some("energy"),
            [2, 1, -3, 0, 0, 0, 0, 0] => Some("power"),
            [-1, 1, -2, 0, 0, 0, 0, 0] => Some("pressure"),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["L", "M", "T", "I", "Θ", "N", "J", "R"];
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(names[i].to_string());
                } else {
                    parts.push(format!("{}^{}", names[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_ratio_is_not_dimensionless() {
        // The ratio pseudo-dimension keeps unitless/percent out of the
        // plain-dimensionless equivalence class.
        assert!(!Dimension::RATIO.is_dimensionless());
        assert_ne!(Dimension::RATIO, Dimension::DIMENSIONLESS);
    }

    #[test]
    fn test_multiply_divide() {
        let flow = Dimension::VOLUME.divide(&Dimension::TIME);
        assert_eq!(flow, Dimension::VOLUMETRIC_FLOW);

        let energy = Dimension::FORCE.multiply(&Dimension::LENGTH);
        assert_eq!(energy, Dimension::ENERGY);
    }

    #[test]
    fn test_power() {
        let area = Dimension::LENGTH.power(2);
        assert_eq!(area, Dimension::AREA);

        let volume = Dimension::LENGTH.power(3);
        assert_eq!(volume, Dimension::VOLUME);
    }

    #[test]
    fn test_base_lookup() {
        assert_eq!(Dimension::base("length"), Some(Dimension::LENGTH));
        assert_eq!(Dimension::base("no_unit"), Some(Dimension::RATIO));
        assert_eq!(Dimension::base("flavor"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::LENGTH), "L");
        assert_eq!(format!("{}", Dimension::PRESSURE), "L^-1 M T^-2");
        assert_eq!(format!("{}", Dimension::RATIO), "R");
    }

    #[test]
    fn test_name() {
        assert_eq!(Dimension::PRESSURE.name(), Some("pressure"));
        assert_eq!(Dimension::RATIO.name(), Some("ratio"));
        assert_eq!(Dimension::new([1, 1, 0, 0, 0, 0, 0, 0]).name(), None);
    }
}
