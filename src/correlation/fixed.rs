//! A correlation set with constant per-regime coefficients.
//!
//! Useful when measured or assumed film coefficients are available, and as a
//! fast stand-in during early design studies before a geometry-specific
//! correlation set is selected.

use uom::si::{f64::Pressure, pressure::pascal};

use super::{Coefficients, CorrelationError, CorrelationRequest, CorrelationSet, TransferMode};
use crate::{
    geometry::PlateGeometry,
    hx::{SegmentPhase, StreamRole},
    support::units::{HeatTransferCoefficient, heat_transfer_coefficient},
};

/// Constant film coefficients per working fluid regime, one coefficient for
/// the secondary stream, and one Fanning friction factor for both streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCoefficients {
    pub liquid: HeatTransferCoefficient,
    pub two_phase: HeatTransferCoefficient,
    pub vapor: HeatTransferCoefficient,
    pub secondary: HeatTransferCoefficient,
    pub friction_factor: f64,
}

impl Default for FixedCoefficients {
    /// Film coefficients of refrigerant-to-water plate exchanger magnitude.
    fn default() -> Self {
        Self {
            liquid: heat_transfer_coefficient(1_000.0),
            two_phase: heat_transfer_coefficient(5_000.0),
            vapor: heat_transfer_coefficient(600.0),
            secondary: heat_transfer_coefficient(4_000.0),
            friction_factor: 0.01,
        }
    }
}

/// Resolved dispatch for [`FixedCoefficients`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedId {
    Heat {
        role: StreamRole,
        phase: SegmentPhase,
    },
    Friction,
}

impl CorrelationSet for FixedCoefficients {
    type Id = FixedId;

    fn lookup(
        &self,
        _geometry: &PlateGeometry,
        mode: TransferMode,
        phase: SegmentPhase,
        role: StreamRole,
    ) -> Result<Self::Id, CorrelationError> {
        Ok(match mode {
            TransferMode::Heat => FixedId::Heat { role, phase },
            TransferMode::Friction => FixedId::Friction,
        })
    }

    fn invoke(
        &self,
        id: Self::Id,
        request: &CorrelationRequest<'_>,
    ) -> Result<Coefficients, CorrelationError> {
        match id {
            FixedId::Heat { role, phase } => {
                let htc = match role {
                    StreamRole::Secondary => self.secondary,
                    StreamRole::Working => match phase {
                        SegmentPhase::Liquid => self.liquid,
                        SegmentPhase::TwoPhaseEvaporating | SegmentPhase::TwoPhaseCondensing => {
                            self.two_phase
                        }
                        SegmentPhase::Vapor => self.vapor,
                    },
                };
                Ok(Coefficients {
                    htc,
                    friction_factor: 0.0,
                    dp_friction: Pressure::new::<pascal>(0.0),
                })
            }
            FixedId::Friction => {
                // Fanning form: dp = 2·f·G²·L / (ρ·Dh), with the density
                // averaged over the segment endpoints.
                let g = request.mass_flux.value;
                let rho = 0.5 * (request.inlet.density.value + request.outlet.density.value);
                let dh = request.geometry.hydraulic_diameter(request.width).value;
                if rho <= 0.0 || dh <= 0.0 {
                    return Err(CorrelationError::Evaluation {
                        context: format!(
                            "non-physical friction inputs (rho = {rho}, dh = {dh})"
                        ),
                    });
                }
                let dp = 2.0 * self.friction_factor * g * g * request.length.value / (rho * dh);
                Ok(Coefficients {
                    htc: heat_transfer_coefficient(0.0),
                    friction_factor: self.friction_factor,
                    dp_friction: Pressure::new::<pascal>(dp),
                })
            }
        }
    }
}
