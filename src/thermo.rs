//! The consumed interface to fluid property calculations.
//!
//! The crate never computes equilibrium or transport properties itself.
//! Callers supply a [`PropertyBackend`] per fluid, typically wrapping an
//! equation-of-state library, and the discretization and sizing routines
//! query it through this trait.

use thiserror::Error;
use uom::si::f64::{Pressure, Ratio, ThermodynamicTemperature};

use crate::{state::FlowState, support::units::SpecificEnthalpy};

/// A typed input from which a backend can construct a [`FlowState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    PressureEnthalpy(Pressure, SpecificEnthalpy),
    PressureQuality(Pressure, Ratio),
    TemperaturePressure(ThermodynamicTemperature, Pressure),
}

/// Saturation conditions at a given pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Saturation {
    /// Below the critical pressure: the two saturated boundary states.
    Subcritical {
        liquid: FlowState,
        vapor: FlowState,
    },
    /// At or above the critical pressure there is no phase boundary.
    Supercritical,
}

/// A source of thermodynamic states for a single fluid.
///
/// One backend instance is bound to one fluid; exchangers with different
/// fluids on each side take one backend per stream. Implementations must be
/// pure: the same input always produces the same state.
pub trait PropertyBackend {
    /// Constructs a state from the given input pair.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the state cannot be constructed,
    /// for example when the input lies outside the backend's domain.
    fn state_from(&self, input: StateInput) -> Result<FlowState, PropertyError>;

    /// Constructs a state near `base` from the given input pair.
    ///
    /// Backends backed by iterative property solvers can use `base` as an
    /// initial guess. The default implementation ignores it.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the state cannot be constructed.
    fn state_at(&self, base: &FlowState, input: StateInput) -> Result<FlowState, PropertyError> {
        let _ = base;
        self.state_from(input)
    }

    /// Returns the saturation boundary states at `pressure`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the saturation call fails.
    fn saturation(&self, pressure: Pressure) -> Result<Saturation, PropertyError>;
}

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, the speed of sound of a pure fluid within the vapor dome.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The input state is outside the backend's valid domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}
