//! # Structural Steel Equations
//!
//! Closed-form AISC 360 LRFD provisions used by the capacity checks, kept in
//! one place so each can be verified against the code on its own:
//!
//! - [`aisc`] - Chapters B, E, F and G (slenderness, compression, flexure, shear)
//! - [`beam`] - Simply-supported serviceability formulas (deflection)
//! - [`registry`] - Equation metadata and usage tracking for calculation trails
//!
//! All functions are pure and unit-agnostic: feed them a consistent system
//! (kip-in-ksi throughout the tests).
//!
//! ## References
//!
//! - AISC 360-16: Specification for Structural Steel Buildings
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod aisc;
pub mod beam;
pub mod registry;

pub use aisc::{
    buckling_limit, critical_buckling_stress, elastic_ltb_moment, euler_stress,
    inelastic_limit_length, inelastic_ltb_moment, nominal_shear, plastic_limit_length,
    plastic_moment, web_shear_coefficient,
};
pub use beam::{deflection_limit, uniform_load_max_deflection};
pub use registry::{
    CodeReference, Equation, EquationCategory, EquationMetadata, EquationTracker, EquationUsage,
    TraceSink,
};
