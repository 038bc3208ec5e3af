//! # wall_core - Cantilever Retaining Wall Design Engine
//!
//! `wall_core` is the computational heart of Buttress. It sizes a reinforced
//! concrete cantilever retaining wall, checks its global stability and designs
//! the stem reinforcement. All inputs and outputs are JSON-serializable, so the
//! engine can sit behind a CLI, a web form or a report generator unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **One unit policy**: inputs converted once to t, m, t/m², kg/cm²
//!
//! ## Quick Start
//!
//! ```rust
//! use wall_core::calculations::{analyze, Theory};
//! use wall_core::wall::WallInput;
//!
//! let input = WallInput::default();
//! let design = analyze(&input, Theory::Rankine).unwrap();
//!
//! for nc in &design.non_conformances {
//!     println!("{}", nc);
//! }
//! let json = serde_json::to_string_pretty(&design).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`wall`] - Wall input and canonical design parameters
//! - [`soil`] - Backfill and foundation soil properties
//! - [`materials`] - Concrete, steel and reinforcing bars
//! - [`loads`] - Surcharge
//! - [`settings`] - Design criteria (thresholds, factors, bar choices)
//! - [`calculations`] - Pressure, geometry, stability, reinforcement, comparison
//! - [`report`] - Summary rows for printed output
//! - [`units`] - Type-safe unit wrappers
//! - [`constants`] - Unit weights and code-minimum floors
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod report;
pub mod settings;
pub mod soil;
pub mod units;
pub mod wall;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, compare_theories, NonConformance, Theory, TheoryComparison, WallDesign};
pub use errors::{CalcError, CalcResult};
pub use settings::DesignCriteria;
pub use wall::{DesignParameters, WallInput};
