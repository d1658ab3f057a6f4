//! The consumed interface to heat transfer and friction correlations.
//!
//! The core never evaluates correlation physics itself. A caller supplies a
//! [`CorrelationSet`] that resolves an opaque correlation identifier for a
//! (geometry, transfer mode, phase regime, stream role) combination and
//! evaluates it for a concrete segment. The identifiers let a set resolve
//! its dispatch once and reuse it across repeated invocations during
//! root-finding.

pub mod fixed;

use thiserror::Error;
use uom::si::f64::{Length, Pressure};

use crate::{
    geometry::PlateGeometry,
    hx::{SegmentPhase, StreamRole},
    state::FlowState,
    support::units::{HeatTransferCoefficient, MassFlux},
};

/// Which physical effect a correlation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Heat,
    Friction,
}

/// The outputs of one correlation evaluation.
///
/// A heat transfer correlation fills `htc`; a friction correlation fills
/// `friction_factor` and `dp_friction`. Unused outputs are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Convective heat transfer coefficient.
    pub htc: HeatTransferCoefficient,
    /// Fanning friction factor.
    pub friction_factor: f64,
    /// Frictional pressure drop across the segment.
    pub dp_friction: Pressure,
}

/// Everything a correlation may need about one segment of one stream.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationRequest<'a> {
    pub inlet: &'a FlowState,
    pub outlet: &'a FlowState,
    /// Mass flux through one channel.
    pub mass_flux: MassFlux,
    /// Parallel channels carrying this stream.
    pub channels: u32,
    pub geometry: &'a PlateGeometry,
    /// Flow length of the segment.
    pub length: Length,
    /// Plate width.
    pub width: Length,
    pub role: StreamRole,
    pub phase: SegmentPhase,
}

/// A registry of heat transfer and friction correlations.
///
/// `lookup` resolves the correlation for a combination; `invoke` evaluates
/// it. Splitting the two lets sizing loops resolve once per segment and
/// re-evaluate many times as trial geometry changes.
pub trait CorrelationSet {
    /// An opaque, cheaply copyable correlation identifier.
    type Id: Copy;

    /// Resolves the correlation for the given combination.
    ///
    /// # Errors
    ///
    /// Returns a [`CorrelationError`] if the set has no correlation for the
    /// combination, or the geometry is incompatible with it.
    fn lookup(
        &self,
        geometry: &PlateGeometry,
        mode: TransferMode,
        phase: SegmentPhase,
        role: StreamRole,
    ) -> Result<Self::Id, CorrelationError>;

    /// Evaluates a previously resolved correlation for one segment.
    ///
    /// # Errors
    ///
    /// Returns a [`CorrelationError`] if the evaluation fails.
    fn invoke(
        &self,
        id: Self::Id,
        request: &CorrelationRequest<'_>,
    ) -> Result<Coefficients, CorrelationError>;
}

/// Errors from correlation resolution or evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrelationError {
    /// The set has no correlation for this combination.
    #[error("no correlation for {mode:?} transfer, {phase:?} regime, {role:?} stream")]
    Unsupported {
        mode: TransferMode,
        phase: SegmentPhase,
        role: StreamRole,
    },

    /// The resolved correlation cannot handle the given channel geometry.
    #[error("correlation does not support this channel geometry: {context}")]
    UnsupportedGeometry { context: String },

    /// The correlation failed to evaluate.
    #[error("correlation evaluation failed: {context}")]
    Evaluation { context: String },
}
