//! Channel geometry descriptors for plate exchangers.
//!
//! A [`PlateGeometry`] describes the corrugation pattern of one stream's
//! channels. The core only uses it for bulk flow quantities (flow area,
//! hydraulic diameter, surface enlargement); correlation sets are free to
//! read the pattern-specific fields directly.

use thiserror::Error;
use uom::si::f64::{Angle, Area, Length};

/// The corrugation pattern of a plate channel.
///
/// All fields are geometric constants of the plate stack; none of them
/// change during sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlateGeometry {
    /// Chevron (herringbone) corrugations.
    ChevronPlate {
        /// Mean plate spacing (corrugation amplitude).
        spacing: Length,
        /// Chevron angle measured from the flow direction.
        chevron_angle: Angle,
        /// Corrugation wavelength.
        corrugation_pitch: Length,
        /// Ratio of developed to projected plate area.
        enlargement: f64,
    },
    /// Offset strip fins brazed between flat plates.
    OffsetFin {
        /// Fin spacing (channel pitch).
        spacing: Length,
        /// Fin height.
        height: Length,
        /// Fin material thickness.
        thickness: Length,
        /// Length of each fin strip in the flow direction.
        fin_length: Length,
    },
    /// Flat plates with no corrugation.
    SmoothPlate {
        /// Plate spacing.
        spacing: Length,
    },
}

impl PlateGeometry {
    /// The free flow cross-section of one channel for a plate of `width`.
    #[must_use]
    pub fn channel_flow_area(&self, width: Length) -> Area {
        match *self {
            Self::ChevronPlate { spacing, .. } | Self::SmoothPlate { spacing } => spacing * width,
            Self::OffsetFin {
                spacing,
                height,
                thickness,
                ..
            } => height * width * ((spacing - thickness) / spacing).value,
        }
    }

    /// The hydraulic diameter of one channel for a plate of `width`.
    #[must_use]
    pub fn hydraulic_diameter(&self, width: Length) -> Length {
        match *self {
            Self::ChevronPlate {
                spacing,
                enlargement,
                ..
            } => spacing * (2.0 / enlargement),
            Self::SmoothPlate { spacing } => {
                // 4·A / P for a thin rectangular duct.
                spacing * width * (4.0 / 2.0) / (spacing + width)
            }
            Self::OffsetFin {
                spacing,
                height,
                thickness,
                ..
            } => {
                let free = spacing - thickness;
                free * height * (4.0 / 2.0) / (free + height)
            }
        }
    }

    /// Ratio of developed heat transfer area to projected plate area.
    #[must_use]
    pub fn enlargement(&self) -> f64 {
        match *self {
            Self::ChevronPlate { enlargement, .. } => enlargement,
            Self::OffsetFin { .. } | Self::SmoothPlate { .. } => 1.0,
        }
    }

    /// Checks that every dimension is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] naming the offending field.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let check = |name: &'static str, value: Length| {
            if value.value.is_finite() && value.value > 0.0 {
                Ok(())
            } else {
                Err(GeometryError::NonPositiveDimension { name })
            }
        };
        match *self {
            Self::ChevronPlate {
                spacing,
                corrugation_pitch,
                enlargement,
                ..
            } => {
                check("spacing", spacing)?;
                check("corrugation_pitch", corrugation_pitch)?;
                if !(enlargement.is_finite() && enlargement >= 1.0) {
                    return Err(GeometryError::InvalidEnlargement { value: enlargement });
                }
                Ok(())
            }
            Self::OffsetFin {
                spacing,
                height,
                thickness,
                fin_length,
            } => {
                check("spacing", spacing)?;
                check("height", height)?;
                check("thickness", thickness)?;
                check("fin_length", fin_length)?;
                if thickness >= spacing {
                    return Err(GeometryError::NonPositiveDimension {
                        name: "spacing - thickness",
                    });
                }
                Ok(())
            }
            Self::SmoothPlate { spacing } => check("spacing", spacing),
        }
    }
}

/// Inlet and outlet port dimensions of a plate stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortSpec {
    /// Port diameter on the working fluid side.
    pub working_diameter: Length,
    /// Port diameter on the secondary fluid side.
    pub secondary_diameter: Length,
    /// Vertical distance between the inlet and outlet ports. The static
    /// head term falls back to the flow length when this is unset.
    pub vertical_separation: Option<Length>,
}

/// Errors from geometry validation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("geometry dimension `{name}` must be positive")]
    NonPositiveDimension { name: &'static str },
    #[error("enlargement factor must be at least one, got {value}")]
    InvalidEnlargement { value: f64 },
}
