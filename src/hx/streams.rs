//! Validated value objects describing the two streams and the plate stack.

use thiserror::Error;
use uom::si::f64::{Length, MassRate, ThermalConductivity};

use crate::support::{
    constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive},
    units::FoulingResistance,
};

/// Identifies one of the two streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRole {
    Working,
    Secondary,
}

/// The mass flow rates of both streams.
///
/// Both rates are strictly positive; a stalled stream has no meaningful
/// temperature profile to discretize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassFlows {
    working: Constrained<MassRate, StrictlyPositive>,
    secondary: Constrained<MassRate, StrictlyPositive>,
}

impl MassFlows {
    /// Validates and stores the two mass flow rates.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if either rate is not strictly positive.
    pub fn new(working: MassRate, secondary: MassRate) -> Result<Self, ConstraintError> {
        Ok(Self {
            working: Constrained::new(working)?,
            secondary: Constrained::new(secondary)?,
        })
    }

    /// Creates `MassFlows` from already-constrained values.
    #[must_use]
    pub fn from_constrained(
        working: Constrained<MassRate, StrictlyPositive>,
        secondary: Constrained<MassRate, StrictlyPositive>,
    ) -> Self {
        Self { working, secondary }
    }

    #[must_use]
    pub fn working(&self) -> MassRate {
        self.working.into_inner()
    }

    #[must_use]
    pub fn secondary(&self) -> MassRate {
        self.secondary.into_inner()
    }

    #[must_use]
    pub fn get(&self, role: StreamRole) -> MassRate {
        match role {
            StreamRole::Working => self.working(),
            StreamRole::Secondary => self.secondary(),
        }
    }
}

/// Per-stream thermal resistance parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamSpec {
    area_ratio: f64,
    fouling: Constrained<FoulingResistance, NonNegative>,
}

impl StreamSpec {
    /// Validates and stores the stream parameters.
    ///
    /// `area_ratio` scales the nominal plate area to this stream's effective
    /// heat transfer area and must be strictly positive. `fouling` is the
    /// area-specific fouling resistance and may be zero for clean surfaces.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if a parameter is out of range.
    pub fn new(area_ratio: f64, fouling: FoulingResistance) -> Result<Self, ConstraintError> {
        StrictlyPositive::new(area_ratio)?;
        Ok(Self {
            area_ratio,
            fouling: Constrained::new(fouling)?,
        })
    }

    #[must_use]
    pub fn area_ratio(&self) -> f64 {
        self.area_ratio
    }

    #[must_use]
    pub fn fouling(&self) -> FoulingResistance {
        self.fouling.into_inner()
    }
}

/// The separating wall between the streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    thickness: Length,
    conductivity: ThermalConductivity,
    area_ratio: f64,
}

impl WallSpec {
    /// Validates and stores the wall parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if a parameter is not strictly positive.
    pub fn new(
        thickness: Length,
        conductivity: ThermalConductivity,
        area_ratio: f64,
    ) -> Result<Self, ConstraintError> {
        StrictlyPositive::new(thickness)?;
        StrictlyPositive::new(conductivity)?;
        StrictlyPositive::new(area_ratio)?;
        Ok(Self {
            thickness,
            conductivity,
            area_ratio,
        })
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }

    #[must_use]
    pub fn area_ratio(&self) -> f64 {
        self.area_ratio
    }
}

/// The plate stack and how its channels split between the streams.
///
/// A stack of `plates` plates forms `plates - 1` channels. The two end
/// plates are adiabatic, so `plates - 2` plates conduct between the streams.
/// When the channel count is odd, the extra channel goes to whichever stream
/// the `even_plates_working` flag selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateArrangement {
    plates: u32,
}

impl PlateArrangement {
    /// Validates the plate count.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::TooFewPlates`] for stacks below three plates,
    /// which have no conducting wall.
    pub fn new(plates: u32) -> Result<Self, SpecError> {
        if plates < 3 {
            return Err(SpecError::TooFewPlates { plates });
        }
        Ok(Self { plates })
    }

    #[must_use]
    pub fn plates(&self) -> u32 {
        self.plates
    }

    #[must_use]
    pub fn wall_count(&self) -> u32 {
        self.plates - 2
    }

    #[must_use]
    pub fn total_channels(&self) -> u32 {
        self.plates - 1
    }

    #[must_use]
    pub fn channels(&self, role: StreamRole, even_plates_working: bool) -> u32 {
        let total = self.total_channels();
        let working = if total % 2 == 0 {
            total / 2
        } else if even_plates_working {
            total.div_ceil(2)
        } else {
            total / 2
        };
        match role {
            StreamRole::Working => working,
            StreamRole::Secondary => total - working,
        }
    }
}

/// Errors from stream and stack specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error("a plate stack needs at least 3 plates, got {plates}")]
    TooFewPlates { plates: u32 },
}
