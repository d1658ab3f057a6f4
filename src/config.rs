//! Solver configuration shared across discretization and sizing.

use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, Power, TemperatureInterval},
    length::meter,
    power::watt,
    temperature_interval::kelvin,
};

/// Configuration for the discretization and sizing routines.
///
/// Every entry point takes an explicit `CoreConfig` value. The defaults are
/// suitable for refrigerant-scale plate exchangers; override fields as needed:
///
/// ```
/// use plateflow::config::CoreConfig;
/// use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};
///
/// let config = CoreConfig {
///     max_delta_t: TemperatureInterval::new::<kelvin>(2.0),
///     ..CoreConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreConfig {
    /// Duties with a magnitude below this are treated as zero.
    pub tol_abs: Power,
    /// Relative tolerance for duty agreement between the two streams.
    pub tol_rel: f64,
    /// Absolute tolerance on vapor quality comparisons.
    pub tol_abs_x: f64,
    /// Relative tolerance on enthalpy comparisons at regime boundaries.
    pub tol_rel_h: f64,
    /// Largest temperature change across a single-phase segment.
    pub max_delta_t: TemperatureInterval,
    /// Largest quality change across a two-phase segment.
    pub max_delta_x: f64,
    /// Iteration cap for the bracketed root searches.
    pub max_iterations: usize,
    /// Search bracket for per-segment and whole-exchanger length solves.
    pub length_bracket: [Length; 2],
    /// Gravitational acceleration used by the static-head pressure drop term.
    pub gravity: Acceleration,
    /// When true, a degenerate temperature profile is an error instead of a
    /// logged warning with a NaN mean temperature difference.
    pub strict_lmtd: bool,
    /// With an even plate count, give the extra channel to the working fluid.
    pub even_plates_working: bool,
    /// Pressure drop terms included per stream.
    pub pressure_drops: PressureDropToggles,
}

/// Selects which pressure drop contributions are evaluated for each stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureDropToggles {
    pub friction_working: bool,
    pub friction_secondary: bool,
    pub acceleration_working: bool,
    pub acceleration_secondary: bool,
    pub head_working: bool,
    pub head_secondary: bool,
    pub port_working: bool,
    pub port_secondary: bool,
}

impl Default for PressureDropToggles {
    fn default() -> Self {
        Self {
            friction_working: true,
            friction_secondary: true,
            acceleration_working: true,
            acceleration_secondary: true,
            head_working: true,
            head_secondary: true,
            port_working: true,
            port_secondary: true,
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tol_abs: Power::new::<watt>(1e-7),
            tol_rel: 1e-7,
            tol_abs_x: 1e-10,
            tol_rel_h: 1e-7,
            max_delta_t: TemperatureInterval::new::<kelvin>(5.0),
            max_delta_x: 0.1,
            max_iterations: 50,
            length_bracket: [Length::new::<meter>(1e-5), Length::new::<meter>(1e2)],
            gravity: Acceleration::new::<meter_per_second_squared>(9.806_65),
            strict_lmtd: false,
            even_plates_working: true,
            pressure_drops: PressureDropToggles::default(),
        }
    }
}
