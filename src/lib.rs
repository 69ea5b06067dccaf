//! Career benchmarking and recommendation engine.
//!
//! A user's profile is scored against a synthetic peer population, the
//! resulting benchmark report drives a rule list that produces a career plan,
//! and the plan's recommendations are tracked through a small lifecycle.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
