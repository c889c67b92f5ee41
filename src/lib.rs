//! hvac-units - Runtime unit registry with dimensional analysis
//!
//! Provides unit-aware quantities with dimensional analysis over a runtime
//! registry, plus the conversion helpers building-energy code reaches for
//! most often.
//!
//! The registry carries SI and imperial units for length, mass, time,
//! temperature (with offset handling for degC/degF), area, volume, flow,
//! force, energy, power, pressure, and angle, and three custom definitions
//! on top:
//! - `inch_H2O_39F` (aliases `inH2O_39F`, `inH2O`) = 249.08891 Pa
//! - `unitless`, an explicit-ratio pseudo-unit with its own dimension
//! - `percent` (alias `percentage`) = unitless / 100
//!
//! One registry instance is shared process-wide as [`UNITS`]; quantities
//! built against it are mutually convertible. Typical use goes through
//! [`convert`]:
//!
//! ```
//! use hvac_units::convert;
//!
//! let pa = convert(Some(1.0), "inH2O", "Pa").unwrap();
//! assert_eq!(pa, Some(249.08891));
//!
//! // Absent values pass through untouched
//! assert_eq!(convert(None, "degC", "K").unwrap(), None);
//! ```

mod convert;
mod dimension;
mod parse;
mod quantity;
mod unit;
mod units;

pub use convert::{convert, convert_scalar, pitch2deg, CFM_TO_M3S, DEGC_TO_K, KWH_TO_THERMS};
pub use dimension::Dimension;
pub use parse::parse_unit;
pub use quantity::Quantity;
pub use unit::{ConversionError, Unit};
pub use units::{DefineError, DefineOutcome, UnitRegistry, CUSTOM_UNIT_DEFINITIONS, UNITS};
