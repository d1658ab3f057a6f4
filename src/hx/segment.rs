//! Per-segment thermal analysis: duty, mean temperature difference, overall
//! conductance, and segment-level geometry solves.

pub mod phase;

use thiserror::Error;
use uom::si::{
    f64::{Area, Length, Power, TemperatureInterval},
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::{
    config::CoreConfig,
    correlation::CorrelationError,
    hx::{
        flow_config::{FlowSense, HxDirection},
        streams::{MassFlows, StreamRole, StreamSpec, WallSpec},
    },
    rootfind::{self, RootError},
    state::FlowState,
    support::units::{HeatTransferCoefficient, TemperatureDifference, heat_transfer_coefficient},
    thermo::PropertyError,
};

pub use phase::{PhaseError, SegmentPhase};

/// One phase-homogeneous slice of the exchanger.
///
/// A segment is bounded by four states, two per stream, all produced by the
/// discretizer. Segments are owned by their exchanger and rebuilt from
/// scratch on every discretization; `length` is zero until a sizing pass
/// assigns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub wf_in: FlowState,
    pub wf_out: FlowState,
    pub sf_in: FlowState,
    pub sf_out: FlowState,
    pub phase: SegmentPhase,
    pub length: Length,
}

/// The shared thermal parameters segment methods evaluate against.
#[derive(Debug, Clone, Copy)]
pub struct ThermalContext<'a> {
    pub mass_flows: &'a MassFlows,
    pub sense: FlowSense,
    pub direction: HxDirection,
    /// Thermal efficiency applied to whichever stream loses heat.
    pub eff_thermal: f64,
    pub working: &'a StreamSpec,
    pub secondary: &'a StreamSpec,
    pub wall: &'a WallSpec,
    pub working_channels: u32,
    pub secondary_channels: u32,
    pub wall_count: u32,
    pub config: &'a CoreConfig,
}

impl ThermalContext<'_> {
    /// The efficiency factor for one stream: the stream gaining heat keeps
    /// its full enthalpy change, the losing stream's is derated.
    #[must_use]
    pub fn eff_factor(&self, role: StreamRole) -> f64 {
        let gaining = matches!(
            (self.direction, role),
            (HxDirection::Evaporating, StreamRole::Working)
                | (HxDirection::Condensing, StreamRole::Secondary)
        );
        if gaining { 1.0 } else { self.eff_thermal }
    }

    #[must_use]
    pub fn channels(&self, role: StreamRole) -> u32 {
        match role {
            StreamRole::Working => self.working_channels,
            StreamRole::Secondary => self.secondary_channels,
        }
    }

    /// Combines the film coefficients, fouling, and wall conduction into an
    /// overall coefficient referenced to the nominal plate area.
    #[must_use]
    pub fn overall_htc(
        &self,
        working_htc: HeatTransferCoefficient,
        secondary_htc: HeatTransferCoefficient,
    ) -> HeatTransferCoefficient {
        let side = |htc: HeatTransferCoefficient, spec: &StreamSpec, channels: u32| {
            (1.0 / htc.value + spec.fouling().value) / spec.area_ratio() / f64::from(channels)
        };
        let r_working = side(working_htc, self.working, self.working_channels);
        let r_secondary = side(secondary_htc, self.secondary, self.secondary_channels);
        let r_wall = self.wall.thickness().value
            / (self.wall.conductivity().value
                * self.wall.area_ratio()
                * f64::from(self.wall_count));
        heat_transfer_coefficient(1.0 / (r_working + r_secondary + r_wall))
    }
}

impl Segment {
    /// The segment's nominal plate area for a plate of `width`.
    #[must_use]
    pub fn area(&self, width: Length) -> Area {
        self.length * width
    }

    /// The segment duty, positive when the working fluid gains heat.
    ///
    /// Both stream energy balances are evaluated; duties below the absolute
    /// tolerance snap to zero. If the two disagree beyond the relative
    /// tolerance a warning is logged and the working stream duty is
    /// authoritative.
    #[must_use]
    pub fn duty(&self, ctx: &ThermalContext<'_>) -> Power {
        let snap = |q: Power| {
            if q.abs() < ctx.config.tol_abs {
                Power::default()
            } else {
                q
            }
        };

        let q_working = snap(
            ctx.mass_flows.working()
                * (self.wf_out.enthalpy - self.wf_in.enthalpy)
                * ctx.eff_factor(StreamRole::Working),
        );
        let q_secondary = snap(
            ctx.mass_flows.secondary()
                * (self.sf_in.enthalpy - self.sf_out.enthalpy)
                * ctx.eff_factor(StreamRole::Secondary),
        );

        let diff = (q_working - q_secondary).abs();
        let scale = q_working.abs().max(q_secondary.abs());
        if diff > ctx.config.tol_abs && diff > scale * ctx.config.tol_rel {
            tracing::warn!(
                q_working_w = q_working.value,
                q_secondary_w = q_secondary.value,
                "stream energy balances disagree; using the working stream duty"
            );
        }

        q_working
    }

    /// The log-mean temperature difference across the segment.
    ///
    /// The sign convention follows the duty: positive when the working fluid
    /// gains heat. A temperature profile with no consistent driving
    /// difference has no defined mean; by default that logs a warning and
    /// yields NaN, in strict mode it is an error.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::UnsupportedFlowSense`] for cross flow, and
    /// [`SegmentError::DegenerateTemperature`] in strict mode.
    pub fn lmtd(&self, ctx: &ThermalContext<'_>) -> Result<TemperatureInterval, SegmentError> {
        let (dt1, dt2) = match ctx.sense {
            FlowSense::CounterFlow => (
                self.sf_in.temperature.minus(self.wf_out.temperature),
                self.sf_out.temperature.minus(self.wf_in.temperature),
            ),
            FlowSense::ParallelFlow => (
                self.sf_out.temperature.minus(self.wf_out.temperature),
                self.sf_in.temperature.minus(self.wf_in.temperature),
            ),
            FlowSense::CrossFlow => return Err(SegmentError::UnsupportedFlowSense),
        };

        let dt1 = dt1.get::<delta_kelvin>();
        let dt2 = dt2.get::<delta_kelvin>();
        let ratio = dt1 / dt2;
        // A balanced profile is the dt1 == dt2 limit of the log mean.
        let value = if (dt1 - dt2).abs() <= 1e-12 * dt1.abs().max(dt2.abs()) {
            dt1
        } else {
            (dt1 - dt2) / ratio.ln()
        };

        if ratio <= 0.0 || !value.is_finite() {
            if ctx.config.strict_lmtd {
                return Err(SegmentError::DegenerateTemperature { dt1, dt2 });
            }
            tracing::warn!(
                dt1_k = dt1,
                dt2_k = dt2,
                "temperature profile has no defined log-mean difference"
            );
            return Ok(TemperatureInterval::new::<delta_kelvin>(f64::NAN));
        }

        Ok(TemperatureInterval::new::<delta_kelvin>(value))
    }

    /// The plate area needed to transfer `duty` at the given overall
    /// coefficient and mean temperature difference.
    #[must_use]
    pub fn required_area(
        duty: Power,
        overall: HeatTransferCoefficient,
        lmtd: TemperatureInterval,
    ) -> Area {
        Area::new::<uom::si::area::square_meter>(
            duty.value / (overall.value * lmtd.get::<delta_kelvin>()),
        )
    }

    /// Solves the flow length at which the segment transfers its duty.
    ///
    /// `overall_of` maps a trial length to the overall coefficient, letting
    /// length-dependent correlations participate in the solve. The residual
    /// is `Q - U(L)·L·W·ΔT_lm` over the configured length bracket.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::NonConvergence`] when no bracket straddles a
    /// root or the iteration cap is reached, or the error from `overall_of`.
    pub fn solve_length<F>(
        &self,
        duty: Power,
        lmtd: TemperatureInterval,
        width: Length,
        config: &CoreConfig,
        mut overall_of: F,
    ) -> Result<Length, SegmentError>
    where
        F: FnMut(Length) -> Result<HeatTransferCoefficient, SegmentError>,
    {
        let q = duty.value;
        let w = width.value;
        let dt = lmtd.get::<delta_kelvin>();
        let bracket = [config.length_bracket[0].value, config.length_bracket[1].value];
        let rf_config = rootfind::Config {
            max_iters: config.max_iterations,
            x_tol: 1e-12,
            f_tol: config.tol_abs.value,
        };

        let root = rootfind::solve_bracketed(
            |l| {
                let u = overall_of(Length::new::<meter>(l))?;
                Ok(q - u.value * l * w * dt)
            },
            bracket,
            &rf_config,
        )?;

        Ok(Length::new::<meter>(root.x))
    }
}

/// Errors from segment-level analysis.
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("degenerate temperature profile (ΔT1 = {dt1} K, ΔT2 = {dt2} K)")]
    DegenerateTemperature { dt1: f64, dt2: f64 },

    #[error("cross flow segments cannot be analyzed")]
    UnsupportedFlowSense,

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error("segment length solve failed")]
    NonConvergence(#[source] Box<RootError<SegmentError>>),
}

impl From<RootError<SegmentError>> for SegmentError {
    fn from(error: RootError<SegmentError>) -> Self {
        match error {
            RootError::Objective(inner) => inner,
            other => Self::NonConvergence(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{MassRate, ThermalConductivity},
        length::millimeter,
        mass_rate::kilogram_per_second,
        power::watt,
        thermal_conductivity::watt_per_meter_kelvin,
    };

    use crate::{
        hx::test_support::{config, liquid_state},
        support::units::fouling_resistance,
    };

    fn flows() -> MassFlows {
        MassFlows::new(
            MassRate::new::<kilogram_per_second>(0.25),
            MassRate::new::<kilogram_per_second>(0.5),
        )
        .unwrap()
    }

    fn specs() -> (StreamSpec, StreamSpec, WallSpec) {
        (
            StreamSpec::new(1.0, fouling_resistance(0.0)).unwrap(),
            StreamSpec::new(1.0, fouling_resistance(0.0)).unwrap(),
            WallSpec::new(
                Length::new::<millimeter>(0.5),
                ThermalConductivity::new::<watt_per_meter_kelvin>(16.0),
                1.0,
            )
            .unwrap(),
        )
    }

    fn context<'a>(
        mass_flows: &'a MassFlows,
        working: &'a StreamSpec,
        secondary: &'a StreamSpec,
        wall: &'a WallSpec,
        core: &'a CoreConfig,
        sense: FlowSense,
    ) -> ThermalContext<'a> {
        ThermalContext {
            mass_flows,
            sense,
            direction: HxDirection::Evaporating,
            eff_thermal: 1.0,
            working,
            secondary,
            wall,
            working_channels: 2,
            secondary_channels: 2,
            wall_count: 4,
            config: core,
        }
    }

    fn segment(wf_in_t: f64, wf_out_t: f64, sf_in_t: f64, sf_out_t: f64) -> Segment {
        // Enthalpies consistent with cp = 4000 J/(kg·K) liquid states.
        Segment {
            wf_in: liquid_state(wf_in_t),
            wf_out: liquid_state(wf_out_t),
            sf_in: liquid_state(sf_in_t),
            sf_out: liquid_state(sf_out_t),
            phase: SegmentPhase::Liquid,
            length: Length::new::<meter>(0.0),
        }
    }

    #[test]
    fn counterflow_lmtd() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = config();
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::CounterFlow,
        );

        // wf 300 -> 310, sf 330 -> 315: ΔT1 = 330-310 = 20, ΔT2 = 315-300 = 15.
        let segment = segment(300.0, 310.0, 330.0, 315.0);
        let lmtd = segment.lmtd(&ctx).unwrap().get::<delta_kelvin>();
        let expected = (20.0 - 15.0) / (20.0_f64 / 15.0).ln();
        assert_relative_eq!(lmtd, expected, max_relative = 1e-12);
    }

    #[test]
    fn parallel_lmtd() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = config();
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::ParallelFlow,
        );

        // wf 300 -> 310, sf 330 -> 315: ΔT1 = 315-310 = 5, ΔT2 = 330-300 = 30.
        let segment = segment(300.0, 310.0, 330.0, 315.0);
        let lmtd = segment.lmtd(&ctx).unwrap().get::<delta_kelvin>();
        let expected = (5.0 - 30.0) / (5.0_f64 / 30.0).ln();
        assert_relative_eq!(lmtd, expected, max_relative = 1e-12);
    }

    #[test]
    fn degenerate_lmtd_is_nan_by_default_and_an_error_in_strict_mode() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = config();
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::CounterFlow,
        );

        // The secondary crosses the working stream: ΔT1 and ΔT2 have
        // opposite signs.
        let segment = segment(300.0, 310.0, 305.0, 304.0);
        assert!(segment.lmtd(&ctx).unwrap().get::<delta_kelvin>().is_nan());

        let strict = CoreConfig {
            strict_lmtd: true,
            ..config()
        };
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &strict,
            FlowSense::CounterFlow,
        );
        assert!(matches!(
            segment.lmtd(&ctx),
            Err(SegmentError::DegenerateTemperature { .. })
        ));
    }

    #[test]
    fn duty_uses_the_working_stream_and_applies_the_efficiency_to_the_loser() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = config();
        let mut ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::CounterFlow,
        );
        ctx.eff_thermal = 0.9;

        // Evaporating: the working stream gains at full effect.
        assert_relative_eq!(ctx.eff_factor(StreamRole::Working), 1.0);
        assert_relative_eq!(ctx.eff_factor(StreamRole::Secondary), 0.9);

        // cp = 4000, wf 0.25 kg/s heated 10 K: Q = 10 kW.
        let segment = segment(300.0, 310.0, 330.0, 325.0);
        let duty = segment.duty(&ctx);
        assert_relative_eq!(duty.get::<watt>(), 10_000.0, max_relative = 1e-9);
    }

    #[test]
    fn tiny_duties_snap_to_zero() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = CoreConfig {
            tol_abs: Power::new::<watt>(1.0),
            ..config()
        };
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::CounterFlow,
        );

        let segment = segment(300.0, 300.000_01, 330.0, 330.0);
        assert_relative_eq!(segment.duty(&ctx).get::<watt>(), 0.0);
    }

    #[test]
    fn overall_htc_is_the_series_resistance_sum() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = config();
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::CounterFlow,
        );

        let u = ctx.overall_htc(
            heat_transfer_coefficient(2000.0),
            heat_transfer_coefficient(4000.0),
        );
        let r_working = (1.0 / 2000.0) / 2.0;
        let r_secondary = (1.0 / 4000.0) / 2.0;
        let r_wall = 0.0005 / (16.0 * 4.0);
        assert_relative_eq!(
            u.value,
            1.0 / (r_working + r_secondary + r_wall),
            max_relative = 1e-12
        );
    }

    #[test]
    fn solve_length_matches_the_direct_formula_for_a_constant_coefficient() {
        let mass_flows = flows();
        let (working, secondary, wall) = specs();
        let core = config();
        let ctx = context(
            &mass_flows,
            &working,
            &secondary,
            &wall,
            &core,
            FlowSense::CounterFlow,
        );

        let segment = segment(300.0, 310.0, 330.0, 315.0);
        let duty = segment.duty(&ctx);
        let lmtd = segment.lmtd(&ctx).unwrap();
        let u = heat_transfer_coefficient(1500.0);
        let width = Length::new::<meter>(0.12);

        let length = segment
            .solve_length(duty, lmtd, width, &core, |_| Ok(u))
            .unwrap();

        let expected = duty.value / (u.value * width.value * lmtd.get::<delta_kelvin>());
        assert_relative_eq!(length.get::<meter>(), expected, epsilon = 1e-5);
    }
}
