//! Two-stream plate heat exchanger segmentation and sizing.
//!
//! An [`Exchanger`] is built from boundary states and geometry, split into
//! phase-homogeneous [`Segment`]s by [`Exchanger::discretize`], and sized by
//! [`Exchanger::size`] against one of the [`SizeTarget`] attributes. Fluid
//! properties and transfer correlations are consumed through the
//! [`PropertyBackend`](crate::thermo::PropertyBackend) and
//! [`CorrelationSet`](crate::correlation::CorrelationSet) traits.

pub mod continuity;
pub mod discretize;
pub mod exchanger;
pub mod flow_config;
pub mod pressure_drop;
pub mod segment;
pub mod sizing;
pub mod streams;

#[cfg(test)]
pub(crate) mod test_support;

pub use continuity::ContinuityError;
pub use discretize::DiscretizeError;
pub use exchanger::{Exchanger, ExchangerError, ExchangerParams};
pub use flow_config::{FlowConfig, FlowSense, HxDirection};
pub use segment::{PhaseError, Segment, SegmentError, SegmentPhase, ThermalContext};
pub use sizing::{SizeError, SizeTarget};
pub use streams::{MassFlows, PlateArrangement, SpecError, StreamRole, StreamSpec, WallSpec};
