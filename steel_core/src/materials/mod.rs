//! # Materials
//!
//! Steel grades and rolled-shape section records.
//!
//! - [`Steel`]: elastic modulus and yield strength of a grade
//! - [`steel`]: shape classification and the [`SteelSection`] property record
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::Steel;
//!
//! let a36 = Steel::astm_a36();
//! assert_eq!(a36.fy, 36.0);
//! assert!((a36.ratio_sqrt() - (29_000.0f64 / 36.0).sqrt()).abs() < 1e-12);
//! ```

pub mod steel;

pub use steel::{SectionProperty, ShapeFamily, ShapeType, SteelSection};

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcResult};

/// Structural steel grade.
///
/// Units are whatever the caller uses consistently (the built-in presets are
/// in ksi). Created once per grade and copied into each element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steel {
    /// Modulus of elasticity E
    pub e: f64,
    /// Specified minimum yield stress Fy
    pub fy: f64,
}

impl Steel {
    /// Create a grade, rejecting non-positive or non-finite values
    pub fn new(e: f64, fy: f64) -> CalcResult<Self> {
        Ok(Steel {
            e: ensure_positive("E", e)?,
            fy: ensure_positive("Fy", fy)?,
        })
    }

    /// ASTM A36: E = 29,000 ksi, Fy = 36 ksi
    pub fn astm_a36() -> Self {
        Steel { e: 29_000.0, fy: 36.0 }
    }

    /// ASTM A992 (wide-flange default): E = 29,000 ksi, Fy = 50 ksi
    pub fn astm_a992() -> Self {
        Steel { e: 29_000.0, fy: 50.0 }
    }

    /// √(E/Fy), the factor every AISC width-thickness limit is scaled by
    pub fn ratio_sqrt(&self) -> f64 {
        (self.e / self.fy).sqrt()
    }
}

impl std::fmt::Display for Steel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Steel (E={}, Fy={})", self.e, self.fy)
    }
}
