//! Splitting the working fluid enthalpy path into phase-homogeneous segments.
//!
//! The walk happens in enthalpy order: the "left" anchor is the boundary
//! state with the lower working fluid enthalpy (the inlet when evaporating,
//! the outlet when condensing), and regimes are laid out left to right as
//! liquid, two-phase, and vapor, each only if the enthalpy span actually
//! reaches it. The chain is reversed at the end for condensers so segments
//! always follow the working fluid flow direction.

use thiserror::Error;
use uom::si::{
    f64::{Length, Pressure},
    temperature_interval::kelvin as delta_kelvin,
};

use crate::{
    hx::{
        continuity::{self, ContinuityError},
        exchanger::Exchanger,
        flow_config::{FlowSense, HxDirection},
        segment::{PhaseError, Segment, SegmentPhase},
    },
    state::FlowState,
    support::units::{SpecificEnthalpy, TemperatureDifference},
    thermo::{PropertyBackend, PropertyError, Saturation, StateInput},
};

/// Errors from discretization.
#[derive(Debug, Error)]
pub enum DiscretizeError {
    #[error("cross flow exchangers cannot be discretized")]
    UnsupportedFlowSense,

    /// The enthalpy path has no resolvable duty.
    #[error("discretization produced no segments")]
    ZeroSegments,

    /// Boundary or saturation enthalpies are ordered inconsistently.
    #[error("regime boundaries are not monotonic: {context}")]
    PhaseOrdering { context: String },

    #[error(transparent)]
    Continuity(#[from] ContinuityError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// How node positions are spaced within one regime.
#[derive(Debug, Clone, Copy)]
enum Spacing {
    /// Even enthalpy steps bounded by the temperature increment.
    Temperature,
    /// Even enthalpy steps bounded by the quality increment.
    Quality {
        h_f: SpecificEnthalpy,
        h_g: SpecificEnthalpy,
    },
}

impl Exchanger {
    /// Rebuilds the segment chain from the boundary states.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscretizeError`] for cross flow, inconsistent anchors,
    /// an empty chain, a continuity break, or a failed property call.
    pub fn discretize<W, S>(&mut self, working: &W, secondary: &S) -> Result<(), DiscretizeError>
    where
        W: PropertyBackend,
        S: PropertyBackend,
    {
        let sense = self.flow.sense;
        if sense == FlowSense::CrossFlow {
            return Err(DiscretizeError::UnsupportedFlowSense);
        }

        let direction = self.direction();
        let (left, right) = match direction {
            HxDirection::Evaporating => (self.wf_in, self.wf_out),
            HxDirection::Condensing => (self.wf_out, self.wf_in),
        };
        if right.enthalpy < left.enthalpy {
            return Err(DiscretizeError::PhaseOrdering {
                context: "working fluid enthalpy anchors are inverted".into(),
            });
        }

        let span = right.enthalpy - left.enthalpy;
        if (self.mass_flows.working() * span).abs() < self.config.tol_abs {
            return Err(DiscretizeError::ZeroSegments);
        }

        // The secondary anchor at the left end, and the slope of its
        // enthalpy along the walk. In counter flow both streams get hotter
        // to the right; in parallel flow they move in opposition.
        let sf_left = match (direction, sense) {
            (HxDirection::Evaporating, FlowSense::CounterFlow)
            | (HxDirection::Condensing, FlowSense::ParallelFlow) => self.sf_out,
            _ => self.sf_in,
        };
        let eff_working = match direction {
            HxDirection::Evaporating => 1.0,
            HxDirection::Condensing => self.eff_thermal,
        };
        let eff_secondary = match direction {
            HxDirection::Evaporating => self.eff_thermal,
            HxDirection::Condensing => 1.0,
        };
        let coupling = (self.mass_flows.working() * eff_working)
            / (self.mass_flows.secondary() * eff_secondary);
        let slope = match sense {
            FlowSense::CounterFlow => 1.0,
            FlowSense::ParallelFlow => -1.0,
            FlowSense::CrossFlow => unreachable!(),
        };

        let p_working = left.pressure;
        let p_secondary = self.sf_in.pressure;
        let h_left = left.enthalpy;
        let h_sf_left = sf_left.enthalpy;
        let sf_enthalpy_at =
            |h: SpecificEnthalpy| h_sf_left + (h - h_left) * coupling * slope;

        let regimes = self.plan_regimes(working, &left, &right)?;

        let mut segments: Vec<Segment> = Vec::new();
        for (lo, hi, spacing) in regimes {
            let count = self.node_intervals(working, lo, hi, p_working, spacing)?;

            let mut previous: Option<(FlowState, FlowState)> = None;
            for node in 0..=count {
                // Endpoints are taken exactly so adjacent regimes share
                // bitwise-identical boundary states.
                let h = if node == 0 {
                    lo
                } else if node == count {
                    hi
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let fraction = node as f64 / count as f64;
                    lo + (hi - lo) * fraction
                };
                let wf_state =
                    working.state_from(StateInput::PressureEnthalpy(p_working, h))?;
                let sf_state = secondary
                    .state_from(StateInput::PressureEnthalpy(p_secondary, sf_enthalpy_at(h)))?;

                if let Some((wf_low, sf_low)) = previous {
                    segments.push(build_segment(
                        (wf_low, wf_state),
                        (sf_low, sf_state),
                        direction,
                        slope,
                    )?);
                }
                previous = Some((wf_state, sf_state));
            }
        }

        if direction == HxDirection::Condensing {
            segments.reverse();
        }
        if segments.is_empty() {
            return Err(DiscretizeError::ZeroSegments);
        }
        continuity::validate(&segments, sense)?;

        self.segments = segments;
        Ok(())
    }

    /// Lays out the conditional regime sequence over `[left.h, right.h]`.
    fn plan_regimes<W: PropertyBackend>(
        &self,
        working: &W,
        left: &FlowState,
        right: &FlowState,
    ) -> Result<Vec<(SpecificEnthalpy, SpecificEnthalpy, Spacing)>, DiscretizeError> {
        let mut regimes = Vec::new();
        let (h_left, h_right) = (left.enthalpy, right.enthalpy);

        match working.saturation(left.pressure)? {
            Saturation::Supercritical => {
                regimes.push((h_left, h_right, Spacing::Temperature));
            }
            Saturation::Subcritical { liquid, vapor } => {
                let h_f = liquid.enthalpy;
                let h_g = vapor.enthalpy;
                if h_g <= h_f {
                    return Err(DiscretizeError::PhaseOrdering {
                        context: "saturated vapor enthalpy below saturated liquid".into(),
                    });
                }
                let near = |h: SpecificEnthalpy, boundary: SpecificEnthalpy| {
                    h.value <= boundary.value + self.config.tol_rel_h * boundary.value.abs()
                };
                let mut end_found = false;

                // Subcooled liquid up to the dome.
                if left.quality_or_sentinel() < -self.config.tol_abs_x && h_left < h_f {
                    let hi = if near(h_right, h_f) {
                        end_found = true;
                        h_right.min(h_f)
                    } else {
                        h_f
                    };
                    if hi > h_left {
                        regimes.push((h_left, hi, Spacing::Temperature));
                    }
                }

                // Inside the dome.
                if !end_found && !near(h_right, h_f) && h_left < h_g {
                    let lo = h_left.max(h_f);
                    let hi = if near(h_right, h_g) {
                        end_found = true;
                        h_right.min(h_g)
                    } else {
                        h_g
                    };
                    if hi > lo {
                        regimes.push((lo, hi, Spacing::Quality { h_f, h_g }));
                    }
                }

                // Superheated vapor beyond the dome.
                if !end_found && !near(h_right, h_g) {
                    let lo = h_left.max(h_g);
                    if h_right > lo {
                        regimes.push((lo, h_right, Spacing::Temperature));
                    }
                }
            }
        }

        Ok(regimes)
    }

    /// Number of segments a regime is split into, from the configured
    /// temperature or quality increment.
    fn node_intervals<W: PropertyBackend>(
        &self,
        working: &W,
        lo: SpecificEnthalpy,
        hi: SpecificEnthalpy,
        pressure: Pressure,
        spacing: Spacing,
    ) -> Result<usize, DiscretizeError> {
        let span = match spacing {
            Spacing::Temperature => {
                let t_lo = working
                    .state_from(StateInput::PressureEnthalpy(pressure, lo))?
                    .temperature;
                let t_hi = working
                    .state_from(StateInput::PressureEnthalpy(pressure, hi))?
                    .temperature;
                (t_hi.minus(t_lo).get::<delta_kelvin>()
                    / self.config.max_delta_t.get::<delta_kelvin>())
                .abs()
            }
            Spacing::Quality { h_f, h_g } => {
                let width = ((hi - lo) / (h_g - h_f)).value;
                (width / self.config.max_delta_x).abs()
            }
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok((span.ceil() as usize).max(1))
    }
}

/// Assembles one segment from its two bounding nodes, `low` being the node
/// with the lower working fluid enthalpy.
fn build_segment(
    (wf_low, wf_high): (FlowState, FlowState),
    (sf_low, sf_high): (FlowState, FlowState),
    direction: HxDirection,
    slope: f64,
) -> Result<Segment, PhaseError> {
    let (wf_in, wf_out) = match direction {
        HxDirection::Evaporating => (wf_low, wf_high),
        HxDirection::Condensing => (wf_high, wf_low),
    };

    // The secondary enters a segment on its hot side when it is losing heat
    // (evaporators) and on its cold side when gaining (condensers). Its
    // enthalpy rises with the walk in counter flow and falls in parallel.
    let (sf_hot, sf_cold) = if slope > 0.0 {
        (sf_high, sf_low)
    } else {
        (sf_low, sf_high)
    };
    let (sf_in, sf_out) = match direction {
        HxDirection::Evaporating => (sf_hot, sf_cold),
        HxDirection::Condensing => (sf_cold, sf_hot),
    };

    let phase = SegmentPhase::classify(wf_in.phase, wf_out.phase, direction)?;
    Ok(Segment {
        wf_in,
        wf_out,
        sf_in,
        sf_out,
        phase,
        length: Length::default(),
    })
}
