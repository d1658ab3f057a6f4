//! Exchanger-level sizing against the discretized segment chain.
//!
//! Every target reduces to the same segment-level relation, `Q = U·A·ΔT_lm`.
//! Area is solved directly. Length re-solves each segment iteratively because
//! the overall coefficient can depend on the trial length through the
//! correlations. Width wraps the per-segment solves in an outer root-find,
//! and plate count walks its integer bracket until the residual changes sign.

use thiserror::Error;
use uom::si::{f64::Length, length::meter};

use crate::{
    correlation::{CorrelationRequest, CorrelationSet, TransferMode},
    hx::{
        discretize::DiscretizeError,
        exchanger::Exchanger,
        segment::{Segment, SegmentError, SegmentPhase, ThermalContext},
        streams::{PlateArrangement, SpecError, StreamRole},
    },
    rootfind::{self, RootError},
    support::units::HeatTransferCoefficient,
    thermo::{PropertyBackend, PropertyError, StateInput},
};

/// The geometric attribute a sizing call solves for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeTarget {
    /// Assign each segment its directly computed required area; the
    /// exchanger length becomes the sum of the segment lengths.
    Area,
    /// Recompute the secondary outlet state from the working-stream energy
    /// balance, then refresh the segment chain.
    SecondaryOutlet,
    /// Solve each segment's length iteratively, so length-sensitive
    /// correlations participate, and sum.
    Length,
    /// Root-find the plate width at which the required total length equals
    /// the exchanger's current length.
    Width { bracket: [Length; 2] },
    /// Step the plate count through `min..=max` until the required length
    /// crosses the exchanger's current length, keeping the closer of the
    /// two trials at the crossing.
    PlateCount { min: u32, max: u32 },
}

/// Errors from sizing.
#[derive(Debug, Error)]
pub enum SizeError {
    #[error(transparent)]
    Discretize(#[from] DiscretizeError),

    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error("sizing solve failed")]
    NonConvergence(#[source] Box<RootError<SizeError>>),

    /// The plate count walk ran out of candidates without a sign change.
    #[error("no plate count in [{min}, {max}] crosses the target length")]
    BracketExhausted { min: u32, max: u32 },
}

impl From<RootError<SizeError>> for SizeError {
    fn from(error: RootError<SizeError>) -> Self {
        match error {
            RootError::Objective(inner) => inner,
            other => Self::NonConvergence(Box::new(other)),
        }
    }
}

impl Exchanger {
    /// Sizes the exchanger for `target`, rebuilding the segment chain first.
    ///
    /// On success the segment lengths and the targeted geometry field are
    /// consistent with the boundary states. On failure the exchanger may be
    /// left at the last trial geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`SizeError`] when discretization, a segment solve, or the
    /// outer root-find fails.
    pub fn size<W, S, C>(
        &mut self,
        target: SizeTarget,
        working: &W,
        secondary: &S,
        correlations: &C,
    ) -> Result<(), SizeError>
    where
        W: PropertyBackend,
        S: PropertyBackend,
        C: CorrelationSet,
    {
        match target {
            SizeTarget::Area => {
                self.discretize(working, secondary)?;
                self.length = self.assign_direct_lengths(correlations)?;
                Ok(())
            }
            SizeTarget::SecondaryOutlet => {
                let duty_over_flow = (self.wf_out.enthalpy - self.wf_in.enthalpy)
                    * (self.mass_flows.working() * self.eff_factor(StreamRole::Working)
                        / (self.mass_flows.secondary()
                            * self.eff_factor(StreamRole::Secondary)));
                let h_out = self.sf_in.enthalpy - duty_over_flow;
                self.sf_out = secondary.state_at(
                    &self.sf_in,
                    StateInput::PressureEnthalpy(self.sf_in.pressure, h_out),
                )?;
                self.discretize(working, secondary)?;
                Ok(())
            }
            SizeTarget::Length => {
                self.discretize(working, secondary)?;
                self.length = self.solve_segment_lengths(correlations)?;
                Ok(())
            }
            SizeTarget::Width { bracket } => {
                self.discretize(working, secondary)?;
                self.solve_width(bracket, correlations)
            }
            SizeTarget::PlateCount { min, max } => {
                self.discretize(working, secondary)?;
                self.solve_plate_count(min, max, correlations)
            }
        }
    }

    fn eff_factor(&self, role: StreamRole) -> f64 {
        self.thermal_context().eff_factor(role)
    }

    fn solve_width<C: CorrelationSet>(
        &mut self,
        bracket: [Length; 2],
        correlations: &C,
    ) -> Result<(), SizeError> {
        let target = self.length;
        let rf_config = rootfind::Config {
            max_iters: self.config.max_iterations,
            x_tol: 1e-12,
            f_tol: self.config.tol_rel * target.value,
        };

        let root = rootfind::solve_bracketed(
            |w| {
                self.width = Length::new::<meter>(w);
                let required = self.solve_segment_lengths(correlations)?;
                Ok::<f64, SizeError>(required.value - target.value)
            },
            [bracket[0].value, bracket[1].value],
            &rf_config,
        )?;

        self.width = Length::new::<meter>(root.x);
        self.solve_segment_lengths(correlations)?;
        tracing::debug!(width_m = root.x, iterations = root.iterations, "width sized");
        Ok(())
    }

    fn solve_plate_count<C: CorrelationSet>(
        &mut self,
        min: u32,
        max: u32,
        correlations: &C,
    ) -> Result<(), SizeError> {
        let target = self.length;
        let mut previous: Option<(u32, f64)> = None;

        for plates in min..=max {
            self.plates = PlateArrangement::new(plates)?;
            let required = self.solve_segment_lengths(correlations)?;
            let diff = required.value - target.value;

            let crossed = match previous {
                Some((_, prior)) => diff == 0.0 || diff.signum() != prior.signum(),
                None => diff == 0.0,
            };
            if crossed {
                let chosen = match previous {
                    Some((prior_plates, prior)) if prior.abs() < diff.abs() => prior_plates,
                    _ => plates,
                };
                self.plates = PlateArrangement::new(chosen)?;
                self.solve_segment_lengths(correlations)?;
                tracing::debug!(plates = chosen, "plate count sized");
                return Ok(());
            }
            previous = Some((plates, diff));
        }

        Err(SizeError::BracketExhausted { min, max })
    }

    /// Assigns each segment the area given by the direct formula, with the
    /// overall coefficient evaluated at the exchanger's current length.
    fn assign_direct_lengths<C: CorrelationSet>(
        &mut self,
        correlations: &C,
    ) -> Result<Length, SizeError> {
        let length = self.length;
        let width = self.width;
        let mut segments = std::mem::take(&mut self.segments);
        let ctx = self.thermal_context();

        let result = segments.iter_mut().try_fold(Length::default(), |total, segment| {
            let duty = segment.duty(&ctx);
            if duty.abs() < ctx.config.tol_abs {
                segment.length = Length::default();
                return Ok(total);
            }
            let lmtd = segment.lmtd(&ctx)?;
            let overall = self.segment_overall(&ctx, segment, length, correlations)?;
            let area = Segment::required_area(duty, overall, lmtd);
            segment.length = area / width;
            Ok::<Length, SizeError>(total + segment.length)
        });

        self.segments = segments;
        result
    }

    /// Solves every segment's length against its duty and sums them. Zero
    /// duty segments keep zero length.
    fn solve_segment_lengths<C: CorrelationSet>(
        &mut self,
        correlations: &C,
    ) -> Result<Length, SizeError> {
        let width = self.width;
        let mut segments = std::mem::take(&mut self.segments);
        let ctx = self.thermal_context();

        let result = segments.iter_mut().try_fold(Length::default(), |total, segment| {
            let duty = segment.duty(&ctx);
            if duty.abs() < ctx.config.tol_abs {
                segment.length = Length::default();
                return Ok(total);
            }
            let lmtd = segment.lmtd(&ctx)?;
            segment.length = segment.solve_length(duty, lmtd, width, ctx.config, |l| {
                self.segment_overall(&ctx, segment, l, correlations)
            })?;
            Ok::<Length, SizeError>(total + segment.length)
        });

        self.segments = segments;
        result
    }

    /// The overall coefficient of one segment at a trial length.
    fn segment_overall<C: CorrelationSet>(
        &self,
        ctx: &ThermalContext<'_>,
        segment: &Segment,
        length: Length,
        correlations: &C,
    ) -> Result<HeatTransferCoefficient, SegmentError> {
        let working_id = correlations.lookup(
            self.geometry(StreamRole::Working),
            TransferMode::Heat,
            segment.phase,
            StreamRole::Working,
        )?;
        let secondary_phase = SegmentPhase::for_secondary(segment.sf_in.phase, self.direction());
        let secondary_id = correlations.lookup(
            self.geometry(StreamRole::Secondary),
            TransferMode::Heat,
            secondary_phase,
            StreamRole::Secondary,
        )?;

        let working_request = CorrelationRequest {
            inlet: &segment.wf_in,
            outlet: &segment.wf_out,
            mass_flux: self.mass_flux(StreamRole::Working),
            channels: ctx.working_channels,
            geometry: self.geometry(StreamRole::Working),
            length,
            width: self.width,
            role: StreamRole::Working,
            phase: segment.phase,
        };
        let secondary_request = CorrelationRequest {
            inlet: &segment.sf_in,
            outlet: &segment.sf_out,
            mass_flux: self.mass_flux(StreamRole::Secondary),
            channels: ctx.secondary_channels,
            geometry: self.geometry(StreamRole::Secondary),
            length,
            width: self.width,
            role: StreamRole::Secondary,
            phase: secondary_phase,
        };

        let working_htc = correlations.invoke(working_id, &working_request)?.htc;
        let secondary_htc = correlations.invoke(secondary_id, &secondary_request)?.htc;
        Ok(ctx.overall_htc(working_htc, secondary_htc))
    }
}
