//! # steel_core - Steel Member Capacity Engine
//!
//! `steel_core` evaluates structural-steel member capacities per AISC 360
//! (LRFD): local and global slenderness, flexural buckling of columns,
//! lateral-torsional buckling of beams, web shear and serviceability
//! deflection, plus E.060 load-combination envelopes. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: A section record, a grade and boundary conditions go in;
//!   strengths and flags come out
//! - **Lazy**: Evaluators derive each quantity on first use and keep it
//! - **Rich Errors**: Structured error types naming the missing property and shape
//! - **Traceable**: Every derived value can be recorded against its code equation
//!
//! ## Quick Start
//!
//! ```rust
//! use steel_core::{CompressedElement, Element, SectionProperty as P, Steel, SteelSection};
//!
//! let section = SteelSection::new("W10X19", 5.62, 0.10)?
//!     .with(P::Rx, 4.14)
//!     .with(P::Ry, 0.874)
//!     .with(P::Bf, 4.02)
//!     .with(P::Tf, 0.395)
//!     .with(P::Tw, 0.25)
//!     .with(P::H, 8.375);
//! let column = Element::new("C-1", Steel::astm_a36(), section, 126.0)?
//!     .with_effective_length_factors(1.0, 1.0)?;
//!
//! let check = CompressedElement::new(&column);
//! if check.check_slenderness()?.is_ok() {
//!     println!("φPn = {:.1} kip", check.available_strength()?);
//! }
//! # Ok::<(), steel_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Steel grades, shape classification and section records
//! - [`element`] - A member: section, grade, length and K factors
//! - [`calculations`] - Compression, flexure and shear evaluators
//! - [`equations`] - AISC formulas and the equation registry
//! - [`loads`] - E.060 LRFD load combinations
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod element;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod materials;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    CompressedElement, CurvePoint, DeflectionCheck, FlexedElement, Regime, ShearedElement,
    Slenderness,
};
pub use element::Element;
pub use equations::{EquationTracker, TraceSink};
pub use errors::{CalcError, CalcResult};
pub use loads::{LoadCombination, LoadType};
pub use materials::{SectionProperty, ShapeFamily, ShapeType, Steel, SteelSection};
