//! Phase classification of a segment from its endpoint states.

use thiserror::Error;

use crate::{hx::flow_config::HxDirection, state::Phase};

/// The phase regime of one segment of the working fluid path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPhase {
    Liquid,
    TwoPhaseEvaporating,
    TwoPhaseCondensing,
    Vapor,
}

/// The coarse phase region a state can belong to. Saturated boundary states
/// belong to two regions at once, which is what makes classification of a
/// segment ending exactly on the dome unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Liquid,
    TwoPhase,
    Vapor,
}

fn candidates(phase: Phase) -> &'static [Region] {
    match phase {
        Phase::Liquid | Phase::SupercriticalLiquid => &[Region::Liquid],
        Phase::SaturatedLiquid => &[Region::Liquid, Region::TwoPhase],
        Phase::TwoPhase => &[Region::TwoPhase],
        Phase::SaturatedVapor => &[Region::TwoPhase, Region::Vapor],
        Phase::Vapor | Phase::SupercriticalVapor => &[Region::Vapor],
    }
}

impl SegmentPhase {
    /// Classifies a segment from its working fluid endpoint phases.
    ///
    /// The function is total over all endpoint combinations: every pair
    /// either classifies to exactly one regime or is rejected as spanning a
    /// phase boundary. When both endpoints sit on the dome boundary the
    /// two-phase interpretation wins, so saturated-to-saturated segments are
    /// classified as the dome crossing they bound.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::IncompatibleEndpoints`] when no single regime
    /// contains both endpoints, which indicates the discretizer produced a
    /// segment across a regime boundary.
    pub fn classify(
        inlet: Phase,
        outlet: Phase,
        direction: HxDirection,
    ) -> Result<Self, PhaseError> {
        // Above the critical pressure there is no phase boundary, so a
        // pseudo-liquid to pseudo-vapor crossing is still one regime. Tag it
        // by the outlet side.
        if inlet.is_supercritical() && outlet.is_supercritical() {
            return Ok(match outlet {
                Phase::SupercriticalVapor => Self::Vapor,
                _ => Self::Liquid,
            });
        }

        let inlet_regions = candidates(inlet);
        let outlet_regions = candidates(outlet);

        let common = |region: Region| {
            inlet_regions.contains(&region) && outlet_regions.contains(&region)
        };

        if common(Region::TwoPhase) {
            return Ok(match direction {
                HxDirection::Evaporating => Self::TwoPhaseEvaporating,
                HxDirection::Condensing => Self::TwoPhaseCondensing,
            });
        }
        if common(Region::Liquid) {
            return Ok(Self::Liquid);
        }
        if common(Region::Vapor) {
            return Ok(Self::Vapor);
        }
        Err(PhaseError::IncompatibleEndpoints { inlet, outlet })
    }

    /// Maps a secondary stream state to the regime tag used for its
    /// correlation lookups.
    ///
    /// The secondary stream is modeled as sensible single-phase flow; if it
    /// is nevertheless inside the dome, it must be changing phase in the
    /// direction opposite to the working fluid.
    #[must_use]
    pub fn for_secondary(phase: Phase, direction: HxDirection) -> Self {
        match candidates(phase) {
            [Region::Liquid] => Self::Liquid,
            [Region::Vapor] => Self::Vapor,
            _ => match direction {
                HxDirection::Evaporating => Self::TwoPhaseCondensing,
                HxDirection::Condensing => Self::TwoPhaseEvaporating,
            },
        }
    }

    /// True for the two-phase regimes.
    #[must_use]
    pub fn is_two_phase(self) -> bool {
        matches!(self, Self::TwoPhaseEvaporating | Self::TwoPhaseCondensing)
    }
}

/// Errors from segment phase classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("segment endpoints span a phase boundary: {inlet:?} -> {outlet:?}")]
    IncompatibleEndpoints { inlet: Phase, outlet: Phase },
}
