//! # Data Requirements Core
//!
//! Core data structures and types for the Data Requirements Engine.
//!
//! This crate provides the fundamental building blocks for describing what
//! valid data must look like and for reporting how observed data deviates.
//! A requirement is a declarative tree of typed variants; a difference is a
//! single detected discrepancy between observed data and a requirement.
//!
//! ## Key Concepts
//!
//! - **Value**: the scalar atom the engine compares
//! - **RawRequirement**: caller-supplied requirement tree, pre-normalization
//! - **Difference**: one discrepancy (Missing, Extra, Invalid, Deviation)
//! - **ValidationFailure**: the complete, ordered report of a failed run
//!
//! ## Example
//!
//! ```rust
//! use requirements_core::{Difference, GroupedDifference, ValidationFailure, Value};
//!
//! let failure = ValidationFailure::new(vec![
//!     GroupedDifference::ungrouped(Difference::extra(Value::Int(9))),
//! ]);
//! assert_eq!(failure.counts.extra, 1);
//! println!("{failure}");
//! ```

pub mod builder;
pub mod difference;
pub mod error;
pub mod report;
pub mod requirement;
pub mod value;

pub use builder::*;
pub use difference::*;
pub use error::*;
pub use report::*;
pub use requirement::*;
pub use value::*;
