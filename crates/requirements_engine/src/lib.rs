//! # Data Requirements Engine
//!
//! Requirement-matching and difference-computation engine. This crate takes
//! an observed data container and a declarative requirement and determines
//! exactly what is missing, extra, invalid, or numerically deviant:
//!
//! - Matching against literals, regex patterns, type descriptors, and
//!   arbitrary predicates
//! - Unordered set membership and position-sensitive sequence comparison
//! - Group-wise comparison with results tagged by group key
//! - Numeric deviation within a configurable tolerance
//!
//! The engine is synchronous and stateless between calls. It consumes three
//! abstract shapes (scalar, ordered collection, grouped mapping) that a
//! data-loading collaborator materializes; it never performs I/O itself.
//!
//! ## Example
//!
//! ```rust
//! use requirements_core::RawRequirement;
//! use requirements_engine::{validate, Observed};
//!
//! let requirement = RawRequirement::groups([
//!     ("x", RawRequirement::set([
//!         RawRequirement::equal(1),
//!         RawRequirement::equal(2),
//!     ])),
//!     ("y", RawRequirement::set([RawRequirement::equal(3)])),
//! ]);
//! let observed = Observed::groups([
//!     ("x", Observed::collection([1, 2])),
//!     ("z", Observed::collection([9])),
//! ]);
//!
//! let failure = validate(&observed, &requirement).unwrap_err();
//! // [y] missing: 3
//! // [z] extra: 9
//! println!("{failure}");
//! ```

mod differ;
mod engine;
mod groups;
mod matcher;
mod normalize;
mod observed;

pub use differ::*;
pub use engine::*;
pub use groups::*;
pub use matcher::*;
pub use normalize::*;
pub use observed::*;
