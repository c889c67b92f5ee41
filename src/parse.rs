//! Unit string parsing - resolve expressions like "kWh", "cubic_feet/min",
//! or "kg*m/s^2" against a registry.

use crate::unit::ConversionError;
use crate::units::UnitRegistry;
use crate::Unit;

/// Parse a unit string into a [`Unit`].
///
/// Supported formats:
/// - Simple symbols and aliases: "m", "kWh", "pascal"
/// - Powers: "m^3", "s^-1"
/// - Products: "kW*h", "kg*m"
/// - Quotients: "m^3/s", "cubic_feet/min", "m/s/s"
pub fn parse_unit(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(Unit::unity());
    }

    // Try direct lookup first
    if let Some(unit) = registry.get(s) {
        return Ok(unit.clone());
    }

    parse_quotient(registry, s)
}

/// Parse a quotient chain: "a/b/c" reads as a / b / c
fn parse_quotient(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let mut parts = s.split('/');

    // split always yields at least one part
    let mut result = parse_product(registry, parts.next().unwrap_or_default())?;
    for denominator in parts {
        let unit = parse_product(registry, denominator)?;
        result = result.divide(&unit);
    }

    Ok(result)
}

/// Parse a product of units like "kg*m" or "kW*h"
fn parse_product(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let factors: Vec<&str> = s
        .split(|c| c == '*' || c == '·' || c == ' ')
        .filter(|p| !p.is_empty())
        .collect();

    if factors.is_empty() {
        return Ok(Unit::unity());
    }

    let mut result = parse_power(registry, factors[0])?;
    for factor in &factors[1..] {
        let unit = parse_power(registry, factor)?;
        result = result.multiply(&unit);
    }

    Ok(result)
}

/// Parse a unit with optional power like "m^3" or "s^-1"
fn parse_power(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if let Some((base, exp_str)) = s.split_once('^') {
        let base_unit = lookup_base_unit(registry, base)?;
        let exponent: i32 = exp_str
            .parse()
            .map_err(|_| ConversionError::InvalidExponent(exp_str.to_string()))?;
        return Ok(base_unit.power(exponent));
    }

    lookup_base_unit(registry, s)
}

/// Look up a base unit by symbol or alias
fn lookup_base_unit(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if s == "1" || s.is_empty() {
        return Ok(Unit::unity());
    }

    registry
        .get(s)
        .cloned()
        .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
}
