//! # Serviceability Formulas
//!
//! Midspan deflection of a simply-supported beam under full-span uniform load
//! and the span-ratio limits it is checked against.
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `w` = Uniform load intensity (force per unit length)
//! - `δ` = Deflection
//! - `E` = Modulus of elasticity
//! - `I` = Moment of inertia about the bending axis
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Deflection: Positive downward
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1, Case 2a
//! - IBC Table 1604.3 (L/360 live, L/240 total)

/// Denominator of the live-load deflection limit, L/360
pub const LIVE_LOAD_LIMIT_RATIO: f64 = 360.0;

/// Denominator of the total-load deflection limit, L/240
pub const TOTAL_LOAD_LIMIT_RATIO: f64 = 240.0;

/// Maximum deflection for uniform load (at midspan)
///
/// ```text
///    ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ w
///    ════════════════
///    △      δ       △
///        ←── L ──→
/// ```
///
/// # Formula
/// δ_max = 5wL⁴ / (384EI)
///
/// # Example
/// ```rust
/// use steel_core::equations::beam::uniform_load_max_deflection;
///
/// // 1 kip/in over 100 in, E = 29000 ksi, I = 100 in⁴
/// let delta = uniform_load_max_deflection(1.0, 100.0, 29_000.0, 100.0);
/// assert!((delta - 0.449).abs() < 0.001);
/// ```
#[inline]
pub fn uniform_load_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * i)
}

/// Allowable deflection L/ratio
#[inline]
pub fn deflection_limit(l: f64, ratio: f64) -> f64 {
    l / ratio
}
