//! Immutable thermodynamic state snapshots.

use uom::si::f64::{
    DynamicViscosity, MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermalConductivity,
    ThermodynamicTemperature,
};

use crate::support::units::SpecificEnthalpy;

/// The phase of a fluid at a given state.
///
/// Saturated boundary states are distinguished from the interior of the
/// two-phase dome so regime boundaries can be detected without comparing
/// qualities against tolerances at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    SaturatedLiquid,
    TwoPhase,
    SaturatedVapor,
    Vapor,
    /// Above the critical pressure, below the critical temperature.
    SupercriticalLiquid,
    /// Above the critical pressure and the critical temperature.
    SupercriticalVapor,
}

impl Phase {
    /// True for states inside or on the boundary of the two-phase dome.
    #[must_use]
    pub fn is_two_phase(self) -> bool {
        matches!(
            self,
            Self::SaturatedLiquid | Self::TwoPhase | Self::SaturatedVapor
        )
    }

    /// True for states at or beyond the critical pressure.
    #[must_use]
    pub fn is_supercritical(self) -> bool {
        matches!(self, Self::SupercriticalLiquid | Self::SupercriticalVapor)
    }
}

/// The thermodynamic state of a flowing fluid at one location.
///
/// A `FlowState` is a pure snapshot: it is produced by a
/// [`PropertyBackend`](crate::thermo::PropertyBackend), never mutated in
/// place, and carries the transport properties needed by heat transfer and
/// friction correlations alongside the equilibrium properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
    pub enthalpy: SpecificEnthalpy,
    /// Vapor quality; `None` outside the two-phase dome.
    pub quality: Option<Ratio>,
    pub phase: Phase,
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    pub conductivity: ThermalConductivity,
    pub cp: SpecificHeatCapacity,
}

impl FlowState {
    /// The Prandtl number, cp·μ/k.
    #[must_use]
    pub fn prandtl(&self) -> Ratio {
        self.cp * self.viscosity / self.conductivity
    }

    /// The vapor quality as a plain number, with states left of the dome
    /// mapped below zero and states right of it above one.
    ///
    /// This keeps quality comparisons total during discretization, matching
    /// the convention of property libraries that report -1 outside the dome.
    #[must_use]
    pub fn quality_or_sentinel(&self) -> f64 {
        use uom::si::ratio::ratio;
        match self.quality {
            Some(x) => x.get::<ratio>(),
            None => match self.phase {
                Phase::Liquid | Phase::SupercriticalLiquid => -1.0,
                _ => 2.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        dynamic_viscosity::pascal_second, mass_density::kilogram_per_cubic_meter,
        pressure::pascal, ratio::ratio, specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::kelvin,
    };

    use crate::support::units::joules_per_kilogram;

    fn liquid_water_like() -> FlowState {
        FlowState {
            pressure: Pressure::new::<pascal>(101_325.0),
            temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
            enthalpy: joules_per_kilogram(1.12e5),
            quality: None,
            phase: Phase::Liquid,
            density: MassDensity::new::<kilogram_per_cubic_meter>(996.0),
            viscosity: DynamicViscosity::new::<pascal_second>(8.54e-4),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.61),
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4180.0),
        }
    }

    #[test]
    fn prandtl_number() {
        let state = liquid_water_like();
        assert_relative_eq!(
            state.prandtl().get::<ratio>(),
            4180.0 * 8.54e-4 / 0.61,
            max_relative = 1e-12
        );
    }

    #[test]
    fn quality_sentinels() {
        let liquid = liquid_water_like();
        assert_relative_eq!(liquid.quality_or_sentinel(), -1.0);

        let two_phase = FlowState {
            quality: Some(Ratio::new::<ratio>(0.4)),
            phase: Phase::TwoPhase,
            ..liquid
        };
        assert_relative_eq!(two_phase.quality_or_sentinel(), 0.4);

        let vapor = FlowState {
            phase: Phase::Vapor,
            ..liquid
        };
        assert_relative_eq!(vapor.quality_or_sentinel(), 2.0);
    }

    #[test]
    fn phase_predicates() {
        assert!(Phase::SaturatedLiquid.is_two_phase());
        assert!(Phase::TwoPhase.is_two_phase());
        assert!(!Phase::Vapor.is_two_phase());
        assert!(Phase::SupercriticalVapor.is_supercritical());
        assert!(!Phase::Liquid.is_supercritical());
    }
}
