//! Pipeline entry points.
//!
//! - `transition`: pure state transition and notification throttling
//! - `run_check`: one fetch → detect → decide → notify → save run

pub mod check;
pub mod transition;

pub use check::{CheckReport, run_check};
pub use transition::{Transition, TransitionEngine};
