//! Load combinations per E.060 (LRFD)
//!
//! This module provides the service load categories and the strength
//! combinations used to factor member forces before they are compared
//! against the available strengths of [`crate::calculations`].
//!
//! # Overview
//!
//! - [`LoadType`] - The seven load categories (D, L, Lr, W, S, E, R)
//! - [`LoadCombination`] - Service load effects plus the accompanying-live-load flag
//! - [`CombinationRule`] - Factors of one combination
//! - [`Combinations`] - Ordered tag → factored value set with envelopes
//!
//! # Example
//!
//! ```
//! use steel_core::loads::LoadCombination;
//!
//! // Moments in kip-ft on a floor beam
//! let moments = LoadCombination {
//!     d: 100.0,
//!     l: 50.0,
//!     ..Default::default()
//! };
//!
//! let (tag, mu) = moments.envelope_max();
//! assert_eq!(tag, "2-Lr");
//! assert_eq!(mu, 200.0);
//! ```

pub mod combinations;
pub mod load_types;

pub use combinations::{
    CombinationResult, CombinationRule, Combinations, GoverningResults, LoadCombination,
};
pub use load_types::LoadType;
