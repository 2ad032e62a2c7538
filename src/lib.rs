//! Shade-aware pedestrian routing and interactive walk sessions.
//!
//! This crate is the high-level surface over [`shadewalk_core`]: a
//! [`RouteEngine`] that loads a street graph document and answers routing
//! and shade queries, and a [`WalkSession`] that tracks a walker stepping
//! from a snapped start toward a snapped goal, comparing the walked trail
//! against precomputed reference routes.

pub mod config;
pub mod engine;
pub mod session;

pub use config::{
    DEFAULT_GOAL_RADIUS_M, DEFAULT_MAX_STEP_M, DEFAULT_SAMPLE_RADIUS_M, SessionConfig,
};
pub use engine::RouteEngine;
pub use session::{ReferenceRoute, StepOutcome, TrailSummary, WalkSession};

pub use shadewalk_core::prelude::*;
