use uom::{
    si::{
        ISQ, Quantity, SI,
        area::square_meter,
        f64::{Area, MassRate, Power, TemperatureInterval},
        mass_rate::kilogram_per_second,
        power::watt,
        temperature_interval::kelvin,
    },
    typenum::{N1, N2, N3, P1, P2, P3, Z0},
};

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Convective heat transfer coefficient, W/(m²·K) in SI.
pub type HeatTransferCoefficient = Quantity<ISQ<Z0, P1, N3, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Area-specific fouling resistance, m²·K/W in SI.
pub type FoulingResistance = Quantity<ISQ<Z0, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Mass flux through a flow cross-section, kg/(m²·s) in SI.
pub type MassFlux = Quantity<ISQ<N2, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Builds a [`SpecificEnthalpy`] from a value in J/kg.
#[must_use]
pub fn joules_per_kilogram(value: f64) -> SpecificEnthalpy {
    Power::new::<watt>(value) / MassRate::new::<kilogram_per_second>(1.0)
}

/// Builds a [`HeatTransferCoefficient`] from a value in W/(m²·K).
#[must_use]
pub fn heat_transfer_coefficient(value: f64) -> HeatTransferCoefficient {
    Power::new::<watt>(value)
        / Area::new::<square_meter>(1.0)
        / TemperatureInterval::new::<kelvin>(1.0)
}

/// Builds a [`FoulingResistance`] from a value in m²·K/W.
#[must_use]
pub fn fouling_resistance(value: f64) -> FoulingResistance {
    Area::new::<square_meter>(value) * TemperatureInterval::new::<kelvin>(1.0)
        / Power::new::<watt>(1.0)
}
