//! Flow arrangement and orientation of the two streams.

use crate::state::FlowState;

/// Relative flow direction of the two streams.
///
/// Discretization supports counter and parallel flow. Cross flow exists in
/// the type so arrangements can be represented uniformly, but the segment
/// chain has no meaning for it and the discretizer rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSense {
    CounterFlow,
    ParallelFlow,
    CrossFlow,
}

/// Whether the working fluid gains or loses heat.
///
/// Derived from the inlet temperatures: a secondary stream hotter than the
/// working stream drives evaporation, a colder one drives condensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HxDirection {
    Evaporating,
    Condensing,
}

impl HxDirection {
    /// Classifies the duty direction from the two inlet states.
    #[must_use]
    pub fn from_inlets(working_in: &FlowState, secondary_in: &FlowState) -> Self {
        if secondary_in.temperature > working_in.temperature {
            Self::Evaporating
        } else {
            Self::Condensing
        }
    }
}

/// Flow arrangement of an exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    pub sense: FlowSense,
    /// Number of passes each stream makes through the stack.
    pub passes: u32,
    /// True when the working fluid channels run vertically, which makes the
    /// static head pressure drop term meaningful for that stream.
    pub vertical_working: bool,
    /// As above, for the secondary stream.
    pub vertical_secondary: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            sense: FlowSense::CounterFlow,
            passes: 1,
            vertical_working: true,
            vertical_secondary: true,
        }
    }
}
