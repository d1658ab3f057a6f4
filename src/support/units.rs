//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature,
//! pressure, power). This module provides extensions that are useful for
//! heat exchanger modeling but aren't included in [`uom`]:
//!
//! - Quantity aliases for specific enthalpy, heat transfer coefficients,
//!   fouling resistances, and mass flux, with constructor helpers for the
//!   aliases that have no named [`uom`] unit.
//! - The [`TemperatureDifference`] trait, which provides a
//!   [`minus`](TemperatureDifference::minus) method for subtracting one
//!   absolute temperature from another to get a [`TemperatureInterval`]:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use plateflow::support::units::TemperatureDifference;
//!
//! let t1 = ThermodynamicTemperature::new::<kelvin>(300.0);
//! let t2 = ThermodynamicTemperature::new::<kelvin>(250.0);
//! let delta_t = t1.minus(t2);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```
//!
//! [`TemperatureInterval`]: uom::si::f64::TemperatureInterval

mod quantities;
mod temperature_difference;

pub use quantities::{
    FoulingResistance, HeatTransferCoefficient, MassFlux, SpecificEnthalpy, fouling_resistance,
    heat_transfer_coefficient, joules_per_kilogram,
};
pub use temperature_difference::TemperatureDifference;
