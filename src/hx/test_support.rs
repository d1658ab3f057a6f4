//! Shared fixtures for exchanger tests.
//!
//! The property backends here are deliberately simple analytic fluids: a
//! two-phase fluid with constant phase heat capacities and a linear dome,
//! and a sensible liquid with a single constant heat capacity. They make
//! energy balances exact so tests can assert against closed-form numbers.

use uom::si::{
    angle::degree,
    dynamic_viscosity::pascal_second,
    f64::{Angle, DynamicViscosity, Length, MassDensity, MassRate, Pressure, Ratio,
        SpecificHeatCapacity, ThermalConductivity, ThermodynamicTemperature},
    length::{meter, millimeter},
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    config::CoreConfig,
    geometry::{PlateGeometry, PortSpec},
    hx::{
        exchanger::ExchangerParams,
        flow_config::FlowConfig,
        streams::{MassFlows, PlateArrangement, StreamSpec, WallSpec},
    },
    state::{FlowState, Phase},
    support::units::{SpecificEnthalpy, fouling_resistance, joules_per_kilogram},
    thermo::{PropertyBackend, PropertyError, Saturation, StateInput},
};

pub fn config() -> CoreConfig {
    CoreConfig::default()
}

/// A subcooled liquid state with cp = 4000 J/(kg·K) and h = cp·(T − 250 K),
/// so enthalpy differences equal cp times temperature differences exactly.
pub fn liquid_state(t_kelvin: f64) -> FlowState {
    FlowState {
        pressure: Pressure::new::<pascal>(2.0e5),
        temperature: ThermodynamicTemperature::new::<kelvin>(t_kelvin),
        enthalpy: joules_per_kilogram(4000.0 * (t_kelvin - 250.0)),
        quality: None,
        phase: Phase::Liquid,
        density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
        viscosity: DynamicViscosity::new::<pascal_second>(1.0e-3),
        conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
        cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4000.0),
    }
}

/// A two-phase fluid with a rectangular dome.
///
/// Saturation sits at 320 K regardless of pressure, with h_f = 2e5 and
/// h_g = 4e5 J/kg. Liquid cp is 2000 and vapor cp is 1500 J/(kg·K), so
/// subcooling and superheat map linearly to enthalpy. At or above the
/// critical pressure the dome disappears and the liquid cp applies
/// throughout.
#[derive(Debug, Clone, Copy)]
pub struct LinearTwoPhaseBackend {
    p_crit: Pressure,
    t_sat: f64,
    h_f: f64,
    h_g: f64,
    cp_liquid: f64,
    cp_vapor: f64,
}

impl Default for LinearTwoPhaseBackend {
    fn default() -> Self {
        Self {
            p_crit: Pressure::new::<pascal>(5.0e6),
            t_sat: 320.0,
            h_f: 2.0e5,
            h_g: 4.0e5,
            cp_liquid: 2000.0,
            cp_vapor: 1500.0,
        }
    }
}

impl LinearTwoPhaseBackend {
    pub fn critical_pressure(&self) -> Pressure {
        self.p_crit
    }

    fn state(&self, pressure: Pressure, enthalpy: SpecificEnthalpy) -> FlowState {
        let h = enthalpy.value;
        let supercritical = pressure >= self.p_crit;

        let (temperature, quality, phase) = if supercritical {
            let t = self.t_sat + (h - self.h_f) / self.cp_liquid;
            let phase = if h <= self.h_f {
                Phase::SupercriticalLiquid
            } else {
                Phase::SupercriticalVapor
            };
            (t, None, phase)
        } else if h < self.h_f {
            let t = self.t_sat - (self.h_f - h) / self.cp_liquid;
            (t, None, Phase::Liquid)
        } else if h > self.h_g {
            let t = self.t_sat + (h - self.h_g) / self.cp_vapor;
            (t, None, Phase::Vapor)
        } else {
            let x = (h - self.h_f) / (self.h_g - self.h_f);
            let phase = if h == self.h_f {
                Phase::SaturatedLiquid
            } else if h == self.h_g {
                Phase::SaturatedVapor
            } else {
                Phase::TwoPhase
            };
            (self.t_sat, Some(Ratio::new::<ratio>(x)), phase)
        };

        let x = quality.map_or(if h < self.h_f { 0.0 } else { 1.0 }, |q| q.get::<ratio>());
        let density = 1.0 / ((1.0 - x) / 800.0 + x / 40.0);
        let viscosity = (1.0 - x) * 2.0e-4 + x * 1.2e-5;
        let conductivity = (1.0 - x) * 0.08 + x * 0.015;
        let cp = if h > self.h_g {
            self.cp_vapor
        } else {
            self.cp_liquid
        };

        FlowState {
            pressure,
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            enthalpy,
            quality,
            phase,
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
            viscosity: DynamicViscosity::new::<pascal_second>(viscosity),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(conductivity),
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp),
        }
    }
}

impl PropertyBackend for LinearTwoPhaseBackend {
    fn state_from(&self, input: StateInput) -> Result<FlowState, PropertyError> {
        match input {
            StateInput::PressureEnthalpy(p, h) => Ok(self.state(p, h)),
            StateInput::PressureQuality(p, x) => {
                let x = x.get::<ratio>();
                if !(0.0..=1.0).contains(&x) {
                    return Err(PropertyError::InvalidState {
                        context: format!("quality {x} outside [0, 1]"),
                    });
                }
                let h = self.h_f + x * (self.h_g - self.h_f);
                Ok(self.state(p, joules_per_kilogram(h)))
            }
            StateInput::TemperaturePressure(t, p) => {
                let t = t.get::<kelvin>();
                if p < self.p_crit && (t - self.t_sat).abs() < f64::EPSILON {
                    return Err(PropertyError::InvalidState {
                        context: "temperature and pressure are saturated, state is ambiguous"
                            .into(),
                    });
                }
                let h = if t < self.t_sat || p >= self.p_crit {
                    self.h_f - self.cp_liquid * (self.t_sat - t)
                } else {
                    self.h_g + self.cp_vapor * (t - self.t_sat)
                };
                Ok(self.state(p, joules_per_kilogram(h)))
            }
        }
    }

    fn saturation(&self, pressure: Pressure) -> Result<Saturation, PropertyError> {
        if pressure >= self.p_crit {
            return Ok(Saturation::Supercritical);
        }
        Ok(Saturation::Subcritical {
            liquid: self.state(pressure, joules_per_kilogram(self.h_f)),
            vapor: self.state(pressure, joules_per_kilogram(self.h_g)),
        })
    }
}

/// A single-phase liquid with h = cp·T and no dome in its modeled range.
#[derive(Debug, Clone, Copy)]
pub struct SensibleBackend {
    cp: f64,
}

impl Default for SensibleBackend {
    fn default() -> Self {
        Self { cp: 4000.0 }
    }
}

impl SensibleBackend {
    fn state(&self, pressure: Pressure, enthalpy: SpecificEnthalpy) -> FlowState {
        FlowState {
            pressure,
            temperature: ThermodynamicTemperature::new::<kelvin>(enthalpy.value / self.cp),
            enthalpy,
            quality: None,
            phase: Phase::Liquid,
            density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
            viscosity: DynamicViscosity::new::<pascal_second>(1.0e-3),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.cp),
        }
    }
}

impl PropertyBackend for SensibleBackend {
    fn state_from(&self, input: StateInput) -> Result<FlowState, PropertyError> {
        match input {
            StateInput::PressureEnthalpy(p, h) => Ok(self.state(p, h)),
            StateInput::TemperaturePressure(t, p) => {
                Ok(self.state(p, joules_per_kilogram(self.cp * t.get::<kelvin>())))
            }
            StateInput::PressureQuality(..) => Err(PropertyError::Undefined {
                context: "sensible fluid has no vapor quality".into(),
            }),
        }
    }

    fn saturation(&self, _pressure: Pressure) -> Result<Saturation, PropertyError> {
        // No dome within the modeled range.
        Ok(Saturation::Supercritical)
    }
}

fn chevron() -> PlateGeometry {
    PlateGeometry::ChevronPlate {
        spacing: Length::new::<millimeter>(2.0),
        chevron_angle: Angle::new::<degree>(60.0),
        corrugation_pitch: Length::new::<millimeter>(7.0),
        enlargement: 1.17,
    }
}

fn common_params(
    wf_in: FlowState,
    wf_out: FlowState,
    sf_in: FlowState,
    sf_out: FlowState,
) -> ExchangerParams {
    ExchangerParams {
        wf_in,
        wf_out,
        sf_in,
        sf_out,
        mass_flows: MassFlows::new(
            MassRate::new::<kilogram_per_second>(0.1),
            MassRate::new::<kilogram_per_second>(0.5),
        )
        .unwrap(),
        flow: FlowConfig::default(),
        plates: PlateArrangement::new(11).unwrap(),
        working_geometry: chevron(),
        secondary_geometry: chevron(),
        working_spec: StreamSpec::new(1.0, fouling_resistance(0.0)).unwrap(),
        secondary_spec: StreamSpec::new(1.0, fouling_resistance(0.0)).unwrap(),
        wall: WallSpec::new(
            Length::new::<millimeter>(0.5),
            ThermalConductivity::new::<watt_per_meter_kelvin>(16.0),
            1.0,
        )
        .unwrap(),
        ports: PortSpec {
            working_diameter: Length::new::<millimeter>(30.0),
            secondary_diameter: Length::new::<millimeter>(30.0),
            vertical_separation: None,
        },
        eff_thermal: 1.0,
        length: Length::new::<meter>(0.3),
        width: Length::new::<meter>(0.1),
        config: CoreConfig::default(),
    }
}

/// A counterflow evaporator crossing all three regimes: the working fluid
/// enters 25 K subcooled and leaves 20 K superheated, heated by a sensible
/// stream from 350 K. The secondary outlet closes the energy balance at
/// unity thermal efficiency.
pub fn evaporator_params() -> ExchangerParams {
    let working = LinearTwoPhaseBackend::default();
    let secondary = SensibleBackend::default();
    let p_wf = Pressure::new::<pascal>(1.0e5);
    let p_sf = Pressure::new::<pascal>(2.0e5);

    let wf_in = working
        .state_from(StateInput::PressureEnthalpy(p_wf, joules_per_kilogram(1.5e5)))
        .unwrap();
    let wf_out = working
        .state_from(StateInput::PressureEnthalpy(p_wf, joules_per_kilogram(4.3e5)))
        .unwrap();
    // 0.1/0.5 flow ratio: the secondary drops 0.2 x 2.8e5 = 5.6e4 J/kg.
    let sf_in = secondary
        .state_from(StateInput::PressureEnthalpy(p_sf, joules_per_kilogram(1.4e6)))
        .unwrap();
    let sf_out = secondary
        .state_from(StateInput::PressureEnthalpy(p_sf, joules_per_kilogram(1.344e6)))
        .unwrap();

    common_params(wf_in, wf_out, sf_in, sf_out)
}

/// A counterflow condenser: superheated vapor in, subcooled liquid out,
/// cooled by a sensible stream entering at 290 K.
pub fn condenser_params() -> ExchangerParams {
    let working = LinearTwoPhaseBackend::default();
    let secondary = SensibleBackend::default();
    let p_wf = Pressure::new::<pascal>(1.0e5);
    let p_sf = Pressure::new::<pascal>(2.0e5);

    let wf_in = working
        .state_from(StateInput::PressureEnthalpy(p_wf, joules_per_kilogram(4.2e5)))
        .unwrap();
    let wf_out = working
        .state_from(StateInput::PressureEnthalpy(p_wf, joules_per_kilogram(1.8e5)))
        .unwrap();
    // The secondary gains 0.2 x 2.4e5 = 4.8e4 J/kg.
    let sf_in = secondary
        .state_from(StateInput::PressureEnthalpy(p_sf, joules_per_kilogram(1.16e6)))
        .unwrap();
    let sf_out = secondary
        .state_from(StateInput::PressureEnthalpy(p_sf, joules_per_kilogram(1.208e6)))
        .unwrap();

    common_params(wf_in, wf_out, sf_in, sf_out)
}
