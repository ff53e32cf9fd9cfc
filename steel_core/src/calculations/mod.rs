//! # Member Capacity Checks
//!
//! Each check wraps an [`Element`](crate::element::Element) in an evaluator
//! that derives its quantities lazily and memoizes them for its lifetime:
//!
//! - [`compression`] - Flexural buckling of compression members (Chapter E)
//! - [`flexure`] - Yielding, lateral-torsional and flange local buckling (F2, F3)
//! - [`shear`] - Web shear strength (G2)
//! - [`slenderness`] - Width-to-thickness and member slenderness classification
//!
//! Evaluators are cheap to build and hold only a borrow of the element.
//! Every derived value is reported through `tracing` at debug level and, if
//! a [`TraceSink`] was attached with `with_trace`, recorded there as well.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::flexure::FlexedElement;
//! use steel_core::element::Element;
//! use steel_core::equations::{EquationTracker, Equation};
//! use steel_core::materials::{SectionProperty as P, Steel, SteelSection};
//!
//! let section = SteelSection::new("W10X22", 6.49, 0.239)
//!     .unwrap()
//!     .with(P::Ry, 1.33)
//!     .with(P::Zx, 26.0);
//! let beam = Element::new("V1", Steel::astm_a992(), section, 240.0).unwrap();
//!
//! let tracker = EquationTracker::new();
//! let flexure = FlexedElement::new(&beam, 120.0, 1.0).unwrap().with_trace(&tracker);
//! assert!((flexure.mp().unwrap() - 1300.0).abs() < 1e-9);
//! assert_eq!(tracker.value_of(Equation::PlasticMoment), Some(1300.0));
//! ```

pub mod compression;
pub mod flexure;
pub mod shear;
pub mod slenderness;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::equations::registry::{Equation, EquationUsage, TraceSink};
use crate::errors::CalcResult;

pub use compression::{CompressedElement, CompressionSlenderness};
pub use flexure::{DeflectionCheck, FlexedElement};
pub use shear::ShearedElement;
pub use slenderness::{ElementSlenderness, SectionElement, Slenderness};

/// Which branch of a capacity curve a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Full plastic capacity (Lb ≤ Lp, or web shear yielding with Cv = 1)
    Plastic,
    /// Inelastic buckling
    Inelastic,
    /// Elastic buckling
    Elastic,
    /// Noncompact flange or web local buckling
    NonCompact,
    /// Slender flange or web local buckling
    Slender,
}

impl Regime {
    pub fn display_name(&self) -> &'static str {
        match self {
            Regime::Plastic => "Plastic",
            Regime::Inelastic => "Inelastic",
            Regime::Elastic => "Elastic",
            Regime::NonCompact => "Noncompact",
            Regime::Slender => "Slender",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One sample of a capacity curve (e.g. φMn against Lb).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Swept parameter
    pub x: f64,
    /// Capacity at `x`
    pub y: f64,
    /// Branch that produced `y`
    pub regime: Regime,
}

/// Reporting context shared by the evaluators: the element's name and the
/// optional trace sink.
#[derive(Clone, Copy)]
pub(crate) struct Tracer<'a> {
    element: &'a str,
    sink: Option<&'a dyn TraceSink>,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(element: &'a str) -> Self {
        Tracer {
            element,
            sink: None,
        }
    }

    pub(crate) fn with_sink(self, sink: &'a dyn TraceSink) -> Self {
        Tracer {
            sink: Some(sink),
            ..self
        }
    }

    /// Report a derived value. `axis` qualifies per-axis quantities.
    pub(crate) fn emit(&self, equation: Equation, axis: Option<&str>, value: f64) {
        let symbol = equation.metadata().symbol;
        tracing::debug!(element = self.element, symbol, axis, value, "derived");
        if let Some(sink) = self.sink {
            let context = match axis {
                Some(axis) => format!("{} ({})", self.element, axis),
                None => self.element.to_string(),
            };
            sink.record(EquationUsage::new(equation, context, value));
        }
    }

    /// Compute once, report once, then serve the cached value.
    pub(crate) fn memo<F>(
        &self,
        cell: &OnceCell<f64>,
        equation: Equation,
        axis: Option<&str>,
        compute: F,
    ) -> CalcResult<f64>
    where
        F: FnOnce() -> CalcResult<f64>,
    {
        cell.get_or_try_init(|| {
            let value = compute()?;
            self.emit(equation, axis, value);
            Ok(value)
        })
        .copied()
    }
}

impl std::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("element", &self.element)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
