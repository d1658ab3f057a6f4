//! Stream pressure drop totals over the sized segment chain.
//!
//! Four contributions, each individually switchable per stream: channel
//! friction from the correlation set, flow acceleration from the density
//! change, static head when the stream runs vertically, and port losses at
//! the two manifolds. Friction needs sized segments; the other terms only
//! use the boundary states.

use uom::si::{f64::Pressure, pressure::pascal};

use crate::{
    correlation::{CorrelationRequest, CorrelationSet, TransferMode},
    hx::{
        exchanger::Exchanger,
        flow_config::HxDirection,
        segment::{SegmentError, SegmentPhase},
        streams::StreamRole,
    },
};

impl Exchanger {
    /// The total pressure drop of one stream, positive for a loss.
    ///
    /// The static head term is signed: a vertical stream flowing against
    /// gravity pays head, one flowing with it recovers head. The working
    /// stream rises in evaporators and falls in condensers; the secondary
    /// stream runs the opposite way.
    ///
    /// # Errors
    ///
    /// Returns a [`SegmentError`] if a friction correlation cannot be
    /// resolved or evaluated.
    pub fn pressure_drop<C: CorrelationSet>(
        &self,
        role: StreamRole,
        correlations: &C,
    ) -> Result<Pressure, SegmentError> {
        let toggles = &self.config.pressure_drops;
        let (friction_on, acceleration_on, head_on, port_on, vertical, port_diameter) = match role
        {
            StreamRole::Working => (
                toggles.friction_working,
                toggles.acceleration_working,
                toggles.head_working,
                toggles.port_working,
                self.flow.vertical_working,
                self.ports.working_diameter,
            ),
            StreamRole::Secondary => (
                toggles.friction_secondary,
                toggles.acceleration_secondary,
                toggles.head_secondary,
                toggles.port_secondary,
                self.flow.vertical_secondary,
                self.ports.secondary_diameter,
            ),
        };

        let direction = self.direction();
        let (inlet, outlet) = self.boundary_states(role);
        let mass_flux = self.mass_flux(role).value;
        let mut total = 0.0;

        if friction_on {
            let channels = self.plates.channels(role, self.config.even_plates_working);
            for segment in &self.segments {
                let phase = match role {
                    StreamRole::Working => segment.phase,
                    StreamRole::Secondary => {
                        SegmentPhase::for_secondary(segment.sf_in.phase, direction)
                    }
                };
                let id = correlations.lookup(
                    self.geometry(role),
                    TransferMode::Friction,
                    phase,
                    role,
                )?;
                let (segment_in, segment_out) = match role {
                    StreamRole::Working => (&segment.wf_in, &segment.wf_out),
                    StreamRole::Secondary => (&segment.sf_in, &segment.sf_out),
                };
                let request = CorrelationRequest {
                    inlet: segment_in,
                    outlet: segment_out,
                    mass_flux: self.mass_flux(role),
                    channels,
                    geometry: self.geometry(role),
                    length: segment.length,
                    width: self.width,
                    role,
                    phase,
                };
                total += correlations.invoke(id, &request)?.dp_friction.value;
            }
        }

        if acceleration_on {
            total += mass_flux
                * mass_flux
                * (1.0 / outlet.density.value - 1.0 / inlet.density.value);
        }

        if head_on && vertical {
            let against_gravity = matches!(
                (direction, role),
                (HxDirection::Evaporating, StreamRole::Working)
                    | (HxDirection::Condensing, StreamRole::Secondary)
            );
            let sign = if against_gravity { 1.0 } else { -1.0 };
            let rise = self
                .ports
                .vertical_separation
                .unwrap_or(self.length)
                .value;
            total += sign * outlet.density.value * self.config.gravity.value * rise;
        }

        if port_on {
            let port_area =
                std::f64::consts::FRAC_PI_4 * port_diameter.value * port_diameter.value;
            let port_flux = self.mass_flows.get(role).value / port_area;
            // The inlet manifold loses a full velocity head, the outlet 0.4.
            let kinetic = port_flux * port_flux / 2.0;
            total += kinetic / inlet.density.value + 0.4 * kinetic / outlet.density.value;
        }

        Ok(Pressure::new::<pascal>(total))
    }
}
