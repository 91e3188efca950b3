//! Clinical scoring and stepped-care recommendation engine for tele-audiology workflows.
//!
//! The rule engine (hearing risk triage, tinnitus impact banding, care path projection) lives
//! under [`workflows`] as pure functions. [`workflows::patient`] composes those rules with a
//! pluggable record store and exposes them over HTTP.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
