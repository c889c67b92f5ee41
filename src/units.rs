//! Unit registry - built-in catalog, runtime definitions, and the shared
//! process-wide instance.

use crate::parse::parse_unit;
use crate::{Dimension, Unit};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// The shared process-wide registry. Built on first use, immutable after
/// construction, safe for concurrent reads. All quantities in a process must
/// be built against the same registry or their units will not agree.
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Custom unit definitions registered on top of the built-in catalog.
///
/// `inch_H2O_39F` is the inch of water column at ~39°F (~4°C), the density
/// maximum of water; `unitless` and `percent` are explicit-ratio
/// pseudo-units that do not coerce to plain dimensionless values.
pub const CUSTOM_UNIT_DEFINITIONS: [&str; 3] = [
    "inch_H2O_39F = 249.08891 * Pa = inH2O_39F = inH2O",
    "unitless = [no_unit]",
    "percent = unitless / 100 = percentage",
];

/// Outcome of a [`UnitRegistry::define`] call.
///
/// Redefinition is reported as an outcome rather than an error so that
/// re-running setup is safe without error-recovery control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineOutcome {
    /// The unit and its aliases were registered
    Defined,
    /// The name is already known; the registry was left untouched
    AlreadyDefined,
}

/// Errors surfaced by [`UnitRegistry::define`]. Unlike redefinition, these
/// are genuine faults and are never swallowed.
#[derive(Debug, Error)]
pub enum DefineError {
    /// Definition string does not match `NAME = EXPR [= ALIAS]...`
    #[error("malformed unit definition: {0:?}")]
    Malformed(String),
    /// `[...]` expression names a base dimension the registry does not know
    #[error("unknown base dimension: [{0}]")]
    UnknownDimension(String),
    /// The defining expression references an unknown unit or fails to parse
    #[error("in definition of {name}: {source}")]
    Expression {
        name: String,
        #[source]
        source: crate::unit::ConversionError,
    },
}

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl UnitRegistry {
    /// Build a registry with the built-in catalog and the custom definitions
    /// from [`CUSTOM_UNIT_DEFINITIONS`].
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_base_catalog();
        registry
            .register_custom_units()
            .expect("built-in custom unit definitions are well-formed");
        debug!(
            units = registry.units.len(),
            aliases = registry.aliases.len(),
            "unit registry initialized"
        );
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical);
        }
        None
    }

    /// Whether a name is taken, either as a unit symbol or as an alias
    pub fn is_defined(&self, name: &str) -> bool {
        self.units.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values().filter(|u| u.category == category).collect()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    /// Define a unit at runtime from a definition string.
    ///
    /// Grammar: `NAME = EXPR [= ALIAS]...` where EXPR is one of
    /// - `[dimension]` - a new base unit of a named base dimension
    ///   (`no_unit` names the ratio pseudo-dimension),
    /// - `NUMBER * UNIT_EXPR` - a scaled derived unit,
    /// - `UNIT_EXPR / NUMBER` - a down-scaled derived unit,
    /// - `UNIT_EXPR` - a plain renaming.
    ///
    /// Defining a name that is already taken returns
    /// [`DefineOutcome::AlreadyDefined`] and leaves the registry untouched,
    /// so running the same definitions twice is safe.
    pub fn define(&mut self, spec: &str) -> Result<DefineOutcome, DefineError> {
        let mut parts = spec.split('=').map(str::trim);

        let name = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DefineError::Malformed(spec.to_string()))?;
        let expr = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DefineError::Malformed(spec.to_string()))?;
        let aliases: Vec<&str> = parts.collect();

        if self.is_defined(name) {
            debug!(name, "unit already defined, skipping");
            return Ok(DefineOutcome::AlreadyDefined);
        }

        let unit = self.unit_from_expr(name, expr)?;
        debug!(name, expr, "defined unit");
        self.register(unit);
        for alias in aliases {
            if !alias.is_empty() && !self.is_defined(alias) {
                self.alias(alias, name);
            }
        }

        Ok(DefineOutcome::Defined)
    }

    /// Register the custom definitions from [`CUSTOM_UNIT_DEFINITIONS`].
    ///
    /// Idempotent: names that already exist are skipped. Genuine definition
    /// faults still propagate.
    pub fn register_custom_units(&mut self) -> Result<(), DefineError> {
        for spec in CUSTOM_UNIT_DEFINITIONS {
            self.define(spec)?;
        }
        Ok(())
    }

    /// Build a unit named `name` from a definition expression
    fn unit_from_expr(&self, name: &str, expr: &str) -> Result<Unit, DefineError> {
        // [dimension] - new base unit
        if let Some(dim_name) = expr.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            let dim_name = dim_name.trim();
            let dimension = Dimension::base(dim_name)
                .ok_or_else(|| DefineError::UnknownDimension(dim_name.to_string()))?;
            return Ok(Unit::new(name, name, dimension, 1.0, dim_name));
        }

        let derive = |base: Unit, scale: f64| {
            Unit::with_offset(
                name,
                name,
                base.dimension,
                base.to_si_factor * scale,
                base.to_si_offset,
                &base.category,
            )
        };

        // NUMBER * UNIT_EXPR
        if let Some((lhs, rhs)) = expr.split_once('*') {
            if let Ok(magnitude) = lhs.trim().parse::<f64>() {
                let base = self.parse_expr(name, rhs)?;
                return Ok(derive(base, magnitude));
            }
        }

        // UNIT_EXPR / NUMBER
        if let Some((lhs, rhs)) = expr.rsplit_once('/') {
            if let Ok(divisor) = rhs.trim().parse::<f64>() {
                let base = self.parse_expr(name, lhs)?;
                return Ok(derive(base, 1.0 / divisor));
            }
        }

        // Plain renaming of an existing unit expression
        let base = self.parse_expr(name, expr)?;
        Ok(derive(base, 1.0))
    }

    fn parse_expr(&self, name: &str, expr: &str) -> Result<Unit, DefineError> {
        parse_unit(self, expr.trim()).map_err(|source| DefineError::Expression {
            name: name.to_string(),
            source,
        })
    }

    fn register(&mut self, unit: Unit) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_base_catalog(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_flow_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_angle_units();
    }

    fn register_length_units(&mut self) {
        self.register(Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length"));
        self.register(Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length"));
        self.register(Unit::new("cm", "centimeter", Dimension::LENGTH, 0.01, "length"));
        self.register(Unit::new("mm", "millimeter", Dimension::LENGTH, 0.001, "length"));
        self.register(Unit::new("in", "inch", Dimension::LENGTH, 0.0254, "length"));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length"));
        self.register(Unit::new("yd", "yard", Dimension::LENGTH, 0.9144, "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, 1609.344, "length"));

        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("metres", "m");
        self.alias("kilometer", "km");
        self.alias("kilometers", "km");
        self.alias("centimeter", "cm");
        self.alias("centimeters", "cm");
        self.alias("millimeter", "mm");
        self.alias("millimeters", "mm");
        self.alias("inch", "in");
        self.alias("inches", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("yard", "yd");
        self.alias("yards", "yd");
        self.alias("mile", "mi");
        self.alias("miles", "mi");
    }

    fn register_mass_units(&mut self) {
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass"));
        self.register(Unit::new("g", "gram", Dimension::MASS, 0.001, "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, 1000.0, "mass"));
        self.register(Unit::new("lb", "pound", Dimension::MASS, 0.45359237, "mass"));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, 0.028349523125, "mass"));

        self.alias("kilogram", "kg");
        self.alias("kilograms", "kg");
        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("tonne", "t");
        self.alias("tonnes", "t");
        self.alias("pound", "lb");
        self.alias("pounds", "lb");
        self.alias("lbs", "lb");
        self.alias("ounce", "oz");
        self.alias("ounces", "oz");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", "second", Dimension::TIME, 1.0, "time"));
        self.register(Unit::new("ms", "millisecond", Dimension::TIME, 0.001, "time"));
        self.register(Unit::new("min", "minute", Dimension::TIME, 60.0, "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, 3600.0, "time"));
        self.register(Unit::new("d", "day", Dimension::TIME, 86400.0, "time"));

        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("sec", "s");
        self.alias("millisecond", "ms");
        self.alias("milliseconds", "ms");
        self.alias("minute", "min");
        self.alias("minutes", "min");
        self.alias("hour", "h");
        self.alias("hours", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("days", "d");
    }

    fn register_temperature_units(&mut self) {
        // Kelvin is the SI base unit
        self.register(Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature"));

        // Celsius: K = C + 273.15
        self.register(Unit::with_offset(
            "degC",
            "celsius",
            Dimension::TEMPERATURE,
            1.0,
            273.15,
            "temperature",
        ));

        // Fahrenheit: K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "degF",
            "fahrenheit",
            Dimension::TEMPERATURE,
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
            "temperature",
        ));

        // Rankine: K = R * 5/9
        self.register(Unit::new("degR", "rankine", Dimension::TEMPERATURE, 5.0 / 9.0, "temperature"));

        self.alias("kelvin", "K");
        self.alias("C", "degC");
        self.alias("celsius", "degC");
        self.alias("°C", "degC");
        self.alias("F", "degF");
        self.alias("fahrenheit", "degF");
        self.alias("°F", "degF");
        self.alias("R", "degR");
        self.alias("rankine", "degR");
        self.alias("°R", "degR");
    }

    fn register_area_units(&mut self) {
        self.register(Unit::new("m2", "square meter", Dimension::AREA, 1.0, "area"));
        self.register(Unit::new("cm2", "square centimeter", Dimension::AREA, 0.0001, "area"));
        self.register(Unit::new("ft2", "square foot", Dimension::AREA, 0.09290304, "area"));
        self.register(Unit::new("in2", "square inch", Dimension::AREA, 0.00064516, "area"));

        self.alias("m²", "m2");
        self.alias("sqm", "m2");
        self.alias("square_meter", "m2");
        self.alias("square_meters", "m2");
        self.alias("ft²", "ft2");
        self.alias("sqft", "ft2");
        self.alias("square_feet", "ft2");
        self.alias("in²", "in2");
    }

    fn register_volume_units(&mut self) {
        self.register(Unit::new("m3", "cubic meter", Dimension::VOLUME, 1.0, "volume"));
        self.register(Unit::new("L", "liter", Dimension::VOLUME, 0.001, "volume"));
        self.register(Unit::new("mL", "milliliter", Dimension::VOLUME, 1e-6, "volume"));
        self.register(Unit::new("gal", "gallon", Dimension::VOLUME, 0.003785411784, "volume"));
        self.register(Unit::new("ft3", "cubic foot", Dimension::VOLUME, 0.028316846592, "volume"));
        self.register(Unit::new("in3", "cubic inch", Dimension::VOLUME, 1.6387064e-5, "volume"));

        self.alias("m³", "m3");
        self.alias("cubic_meter", "m3");
        self.alias("cubic_meters", "m3");
        self.alias("liter", "L");
        self.alias("liters", "L");
        self.alias("litre", "L");
        self.alias("litres", "L");
        self.alias("l", "L");
        self.alias("ml", "mL");
        self.alias("milliliter", "mL");
        self.alias("milliliters", "mL");
        self.alias("gallon", "gal");
        self.alias("gallons", "gal");
        self.alias("ft³", "ft3");
        self.alias("cubic_foot", "ft3");
        self.alias("cubic_feet", "ft3");
        self.alias("in³", "in3");
        self.alias("cubic_inch", "in3");
        self.alias("cubic_inches", "in3");
    }

    fn register_flow_units(&mut self) {
        // cfm is common enough in duct sizing to deserve its own symbol
        self.register(Unit::new(
            "cfm",
            "cubic foot per minute",
            Dimension::VOLUMETRIC_FLOW,
            0.028316846592 / 60.0,
            "flow",
        ));

        self.alias("CFM", "cfm");
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", "newton", Dimension::FORCE, 1.0, "force"));
        self.register(Unit::new("kN", "kilonewton", Dimension::FORCE, 1000.0, "force"));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, 4.4482216152605, "force"));

        self.alias("newton", "N");
        self.alias("newtons", "N");
    }

    fn register_energy_units(&mut self) {
        self.register(Unit::new("J", "joule", Dimension::ENERGY, 1.0, "energy"));
        self.register(Unit::new("kJ", "kilojoule", Dimension::ENERGY, 1000.0, "energy"));
        self.register(Unit::new("MJ", "megajoule", Dimension::ENERGY, 1e6, "energy"));
        self.register(Unit::new("cal", "calorie", Dimension::ENERGY, 4.184, "energy"));
        self.register(Unit::new("Wh", "watt-hour", Dimension::ENERGY, 3600.0, "energy"));
        self.register(Unit::new("kWh", "kilowatt-hour", Dimension::ENERGY, 3.6e6, "energy"));
        self.register(Unit::new("BTU", "British thermal unit", Dimension::ENERGY, 1055.05585262, "energy"));
        // therm: 100000 BTU (international table)
        self.register(Unit::new("therm", "therm", Dimension::ENERGY, 1.0550558526e8, "energy"));

        self.alias("joule", "J");
        self.alias("joules", "J");
        self.alias("calorie", "cal");
        self.alias("calories", "cal");
        self.alias("watt_hour", "Wh");
        self.alias("kwh", "kWh");
        self.alias("kilowatt_hour", "kWh");
        self.alias("kilowatt_hours", "kWh");
        self.alias("Btu", "BTU");
        self.alias("btu", "BTU");
        self.alias("therms", "therm");
    }

    fn register_power_units(&mut self) {
        self.register(Unit::new("W", "watt", Dimension::POWER, 1.0, "power"));
        self.register(Unit::new("kW", "kilowatt", Dimension::POWER, 1000.0, "power"));
        self.register(Unit::new("MW", "megawatt", Dimension::POWER, 1e6, "power"));
        self.register(Unit::new("hp", "horsepower", Dimension::POWER, 745.699872, "power"));

        self.alias("watt", "W");
        self.alias("watts", "W");
        self.alias("kilowatt", "kW");
        self.alias("kilowatts", "kW");
        self.alias("horsepower", "hp");
    }

    fn register_pressure_units(&mut self) {
        self.register(Unit::new("Pa", "pascal", Dimension::PRESSURE, 1.0, "pressure"));
        self.register(Unit::new("kPa", "kilopascal", Dimension::PRESSURE, 1000.0, "pressure"));
        self.register(Unit::new("hPa", "hectopascal", Dimension::PRESSURE, 100.0, "pressure"));
        self.register(Unit::new("bar", "bar", Dimension::PRESSURE, 1e5, "pressure"));
        self.register(Unit::new("mbar", "millibar", Dimension::PRESSURE, 100.0, "pressure"));
        self.register(Unit::new("atm", "atmosphere", Dimension::PRESSURE, 101325.0, "pressure"));
        self.register(Unit::new("psi", "pound per square inch", Dimension::PRESSURE, 6894.757293168, "pressure"));
        self.register(Unit::new("mmHg", "millimeter of mercury", Dimension::PRESSURE, 133.322387415, "pressure"));
        self.register(Unit::new("inHg", "inch of mercury", Dimension::PRESSURE, 3386.389, "pressure"));

        self.alias("pascal", "Pa");
        self.alias("pascals", "Pa");
        self.alias("kilopascal", "kPa");
        self.alias("kilopascals", "kPa");
        self.alias("atmosphere", "atm");
        self.alias("atmospheres", "atm");
    }

    fn register_angle_units(&mut self) {
        // Angles are dimensionless
        self.register(Unit::new("rad", "radian", Dimension::DIMENSIONLESS, 1.0, "angle"));
        self.register(Unit::new(
            "deg",
            "degree",
            Dimension::DIMENSIONLESS,
            std::f64::consts::PI / 180.0,
            "angle",
        ));

        self.alias("radian", "rad");
        self.alias("radians", "rad");
        self.alias("degree", "deg");
        self.alias("degrees", "deg");
        self.alias("°", "deg");
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
