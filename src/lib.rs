//! Intersection Simulation Library
//!
//! Cars on four threads share one intersection through a single-permit
//! semaphore while a collision auditor checks that they never overlap.
//! Runs headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
