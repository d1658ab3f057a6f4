//! The two-stream plate exchanger aggregate.

use thiserror::Error;
use uom::si::f64::{Area, Length, Power};

use crate::{
    config::CoreConfig,
    geometry::{GeometryError, PlateGeometry, PortSpec},
    hx::{
        flow_config::{FlowConfig, HxDirection},
        segment::{Segment, ThermalContext},
        streams::{MassFlows, PlateArrangement, SpecError, StreamRole, StreamSpec, WallSpec},
    },
    state::FlowState,
    support::{
        constraint::{ConstraintError, StrictlyPositive, UnitIntervalLowerOpen},
        units::MassFlux,
    },
};

/// Everything needed to construct an [`Exchanger`].
///
/// The four boundary states fully determine the duty; geometry fields are
/// starting values that sizing operations overwrite.
#[derive(Debug, Clone, Copy)]
pub struct ExchangerParams {
    pub wf_in: FlowState,
    pub wf_out: FlowState,
    pub sf_in: FlowState,
    pub sf_out: FlowState,
    pub mass_flows: MassFlows,
    pub flow: FlowConfig,
    pub plates: PlateArrangement,
    pub working_geometry: PlateGeometry,
    pub secondary_geometry: PlateGeometry,
    pub working_spec: StreamSpec,
    pub secondary_spec: StreamSpec,
    pub wall: WallSpec,
    pub ports: PortSpec,
    /// Thermal efficiency applied to the stream losing heat, in `(0, 1]`.
    pub eff_thermal: f64,
    pub length: Length,
    pub width: Length,
    pub config: CoreConfig,
}

/// A two-stream plate heat exchanger.
///
/// Owns its boundary states, geometry, and the ordered segment chain. The
/// segment order follows the working fluid flow direction. Segments are
/// rebuilt by [`discretize`](Exchanger::discretize) and sized by
/// [`size`](Exchanger::size); nothing is cached across those calls.
#[derive(Debug, Clone)]
pub struct Exchanger {
    pub(crate) wf_in: FlowState,
    pub(crate) wf_out: FlowState,
    pub(crate) sf_in: FlowState,
    pub(crate) sf_out: FlowState,
    pub(crate) mass_flows: MassFlows,
    pub(crate) flow: FlowConfig,
    pub(crate) plates: PlateArrangement,
    pub(crate) working_geometry: PlateGeometry,
    pub(crate) secondary_geometry: PlateGeometry,
    pub(crate) working_spec: StreamSpec,
    pub(crate) secondary_spec: StreamSpec,
    pub(crate) wall: WallSpec,
    pub(crate) ports: PortSpec,
    pub(crate) eff_thermal: f64,
    pub(crate) length: Length,
    pub(crate) width: Length,
    pub(crate) config: CoreConfig,
    pub(crate) segments: Vec<Segment>,
}

impl Exchanger {
    /// Validates the parameters and constructs an exchanger with an empty
    /// segment chain.
    ///
    /// # Errors
    ///
    /// Returns an [`ExchangerError`] if a geometry, efficiency, or dimension
    /// is out of range.
    pub fn new(params: ExchangerParams) -> Result<Self, ExchangerError> {
        params.working_geometry.validate()?;
        params.secondary_geometry.validate()?;
        UnitIntervalLowerOpen::new(params.eff_thermal)?;
        StrictlyPositive::new(params.length)?;
        StrictlyPositive::new(params.width)?;

        Ok(Self {
            wf_in: params.wf_in,
            wf_out: params.wf_out,
            sf_in: params.sf_in,
            sf_out: params.sf_out,
            mass_flows: params.mass_flows,
            flow: params.flow,
            plates: params.plates,
            working_geometry: params.working_geometry,
            secondary_geometry: params.secondary_geometry,
            working_spec: params.working_spec,
            secondary_spec: params.secondary_spec,
            wall: params.wall,
            ports: params.ports,
            eff_thermal: params.eff_thermal,
            length: params.length,
            width: params.width,
            config: params.config,
            segments: Vec::new(),
        })
    }

    /// The duty direction implied by the two inlet temperatures.
    #[must_use]
    pub fn direction(&self) -> HxDirection {
        HxDirection::from_inlets(&self.wf_in, &self.sf_in)
    }

    /// The segment chain, ordered along the working fluid flow.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn plates(&self) -> PlateArrangement {
        self.plates
    }

    #[must_use]
    pub fn flow(&self) -> FlowConfig {
        self.flow
    }

    #[must_use]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// The secondary outlet state, which [`size`](Exchanger::size) replaces
    /// when solving for it.
    #[must_use]
    pub fn secondary_outlet(&self) -> &FlowState {
        &self.sf_out
    }

    /// Total nominal plate area across all segments.
    #[must_use]
    pub fn total_area(&self) -> Area {
        self.segments
            .iter()
            .map(|segment| segment.area(self.width))
            .fold(Area::default(), |acc, a| acc + a)
    }

    /// The whole-exchanger duty from the working stream boundary states,
    /// positive when the working fluid gains heat.
    #[must_use]
    pub fn duty(&self) -> Power {
        let eff = match self.direction() {
            HxDirection::Evaporating => 1.0,
            HxDirection::Condensing => self.eff_thermal,
        };
        self.mass_flows.working() * (self.wf_out.enthalpy - self.wf_in.enthalpy) * eff
    }

    /// The boundary states of one stream, in flow order.
    #[must_use]
    pub fn boundary_states(&self, role: StreamRole) -> (&FlowState, &FlowState) {
        match role {
            StreamRole::Working => (&self.wf_in, &self.wf_out),
            StreamRole::Secondary => (&self.sf_in, &self.sf_out),
        }
    }

    #[must_use]
    pub(crate) fn geometry(&self, role: StreamRole) -> &PlateGeometry {
        match role {
            StreamRole::Working => &self.working_geometry,
            StreamRole::Secondary => &self.secondary_geometry,
        }
    }

    /// The mass flux through one channel of the given stream.
    #[must_use]
    pub fn mass_flux(&self, role: StreamRole) -> MassFlux {
        let channels = self
            .plates
            .channels(role, self.config.even_plates_working);
        let flow_area = self.geometry(role).channel_flow_area(self.width);
        self.mass_flows.get(role) / (flow_area * f64::from(channels))
    }

    pub(crate) fn thermal_context(&self) -> ThermalContext<'_> {
        ThermalContext {
            mass_flows: &self.mass_flows,
            sense: self.flow.sense,
            direction: self.direction(),
            eff_thermal: self.eff_thermal,
            working: &self.working_spec,
            secondary: &self.secondary_spec,
            wall: &self.wall,
            working_channels: self
                .plates
                .channels(StreamRole::Working, self.config.even_plates_working),
            secondary_channels: self
                .plates
                .channels(StreamRole::Secondary, self.config.even_plates_working),
            wall_count: self.plates.wall_count(),
            config: &self.config,
        }
    }
}

/// Errors from exchanger construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangerError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error(transparent)]
    Spec(#[from] SpecError),
}
