//! # Element
//!
//! One physical member under one set of boundary conditions: a section, a
//! steel grade, the member length and (for compression checks) the
//! effective-length factors.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::element::Element;
//! use steel_core::materials::{Steel, SteelSection};
//!
//! let section = SteelSection::new("W10X19", 5.62, 0.10).unwrap();
//! let column = Element::new("C-1", Steel::astm_a36(), section, 126.0)
//!     .unwrap()
//!     .with_effective_length_factors(1.35, 1.0)
//!     .unwrap();
//!
//! assert_eq!(column.kx, Some(1.35));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::materials::{SectionProperty, Steel, SteelSection};

/// Structural member under check.
///
/// Lengths must be in the same unit as the section's radii of gyration; the
/// engine does not convert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// User label (e.g. "C-1", "V1")
    pub name: String,

    /// Steel grade
    pub material: Steel,

    /// Section property record
    pub section: SteelSection,

    /// Member (unbraced) length L
    pub length: f64,

    /// Effective-length factor about the strong axis (compression only)
    pub kx: Option<f64>,

    /// Effective-length factor about the weak axis (compression only)
    pub ky: Option<f64>,
}

impl Element {
    /// Bind a section and grade into a member of the given length
    pub fn new(
        name: impl Into<String>,
        material: Steel,
        section: SteelSection,
        length: f64,
    ) -> CalcResult<Self> {
        Ok(Element {
            name: name.into(),
            material,
            section,
            length: ensure_positive("L", length)?,
            kx: None,
            ky: None,
        })
    }

    /// Attach effective-length factors Kx and Ky (builder pattern)
    pub fn with_effective_length_factors(mut self, kx: f64, ky: f64) -> CalcResult<Self> {
        self.kx = Some(ensure_positive("Kx", kx)?);
        self.ky = Some(ensure_positive("Ky", ky)?);
        Ok(self)
    }

    /// Elastic modulus of the grade
    pub fn e(&self) -> f64 {
        self.material.e
    }

    /// Yield stress of the grade
    pub fn fy(&self) -> f64 {
        self.material.fy
    }

    /// Kx, or `MissingParameter` if the element was built without it
    pub fn require_kx(&self) -> CalcResult<f64> {
        self.kx
            .ok_or_else(|| CalcError::missing_parameter("Kx", &self.section.shape))
    }

    /// Ky, or `MissingParameter` if the element was built without it
    pub fn require_ky(&self) -> CalcResult<f64> {
        self.ky
            .ok_or_else(|| CalcError::missing_parameter("Ky", &self.section.shape))
    }

    /// Shorthand for `self.section.require(property)`
    pub fn require(&self, property: SectionProperty) -> CalcResult<f64> {
        self.section.require(property)
    }
}
