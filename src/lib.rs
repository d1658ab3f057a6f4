//! # Plateflow
//!
//! Segmentation and sizing for two-stream plate heat exchangers in
//! thermodynamic cycle models.
//!
//! Given the four boundary [`FlowState`](state::FlowState)s of an exchanger,
//! the crate splits the working fluid enthalpy path into phase-homogeneous
//! segments, evaluates each segment's conductance and duty through pluggable
//! correlations, and root-solves a geometric attribute (area, length, width,
//! or plate count) against the energy balance.
//!
//! ## Crate layout
//!
//! - [`hx`]: The exchanger aggregate, discretization, sizing, and pressure
//!   drop routines.
//! - [`thermo`] and [`correlation`]: The consumed traits for fluid
//!   properties and transfer correlations. The crate computes no physics of
//!   its own through either.
//! - [`geometry`], [`state`], [`config`]: Plate channel geometry, fluid
//!   state snapshots, and solver configuration.
//! - [`rootfind`]: Bracketed root-finding with a secant-extrapolated
//!   bracket recovery, used by every iterative sizing path.
//! - [`support`]: Constraint newtypes and unit helpers used across the
//!   crate. Public because they appear in signatures; not a stable API.

pub mod config;
pub mod correlation;
pub mod geometry;
pub mod hx;
pub mod rootfind;
pub mod state;
pub mod support;
pub mod thermo;
