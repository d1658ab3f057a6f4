//! Validation that the segment chain is physically continuous.

use thiserror::Error;

use crate::hx::{flow_config::FlowSense, segment::Segment};

/// The segment chain breaks between `index - 1` and `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("segment chain is discontinuous at index {index}")]
pub struct ContinuityError {
    pub index: usize,
}

fn same_point(a: &crate::state::FlowState, b: &crate::state::FlowState) -> bool {
    a.pressure == b.pressure && a.enthalpy == b.enthalpy
}

/// Checks that adjacent segments share their boundary states.
///
/// Segments are ordered along the working fluid flow, so each working inlet
/// must equal the previous working outlet. The secondary stream traverses
/// the chain in the same order for parallel flow and in reverse for counter
/// flow.
///
/// # Errors
///
/// Returns a [`ContinuityError`] with the index of the first break.
pub fn validate(segments: &[Segment], sense: FlowSense) -> Result<(), ContinuityError> {
    for (index, pair) in segments.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let index = index + 1;

        if !same_point(&current.wf_in, &previous.wf_out) {
            return Err(ContinuityError { index });
        }

        let secondary_ok = match sense {
            FlowSense::CounterFlow => same_point(&current.sf_out, &previous.sf_in),
            FlowSense::ParallelFlow => same_point(&current.sf_in, &previous.sf_out),
            FlowSense::CrossFlow => false,
        };
        if !secondary_ok {
            return Err(ContinuityError { index });
        }
    }
    Ok(())
}
