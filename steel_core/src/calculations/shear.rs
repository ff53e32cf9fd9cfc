//! # Shear
//!
//! Web shear strength of I-shapes and channels without tension-field
//! action (AISC G2.1).
//!
//! Rolled I-shapes use λr = 2.24·√(E/Fy) with φv = 1.0; channels use
//! λr = 1.10·√(kv·E/Fy) with φv = 0.9. Because the I-shape limit sits
//! above 1.10·√(kv·E/Fy), Cv jumps above 1.0 just past λr. That step is
//! kept as-is.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::shear::ShearedElement;
//! use steel_core::element::Element;
//! use steel_core::materials::{SectionProperty as P, Steel, SteelSection};
//!
//! let section = SteelSection::new("W10X22", 6.49, 0.239)
//!     .unwrap()
//!     .with(P::D, 10.2)
//!     .with(P::Tw, 0.24)
//!     .with(P::H, 8.625);
//! let beam = Element::new("V1", Steel::astm_a992(), section, 240.0).unwrap();
//!
//! let shear = ShearedElement::new(&beam, None).unwrap();
//! assert_eq!(shear.cv().unwrap(), 1.0);
//! assert!((shear.available_shear().unwrap() - 73.44).abs() < 1e-9);
//! ```

use once_cell::unsync::OnceCell;

use super::{CurvePoint, Regime, Tracer};
use crate::element::Element;
use crate::equations::aisc::{self, MAX_STIFFENED_PANEL_RATIO, PHI_SHEAR, PHI_SHEAR_ROLLED_I};
use crate::equations::registry::{Equation, TraceSink};
use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::materials::{SectionProperty, ShapeFamily};

const CHECK: &str = "shear";

/// Shear evaluator over one element, with optional stiffener spacing `a`.
#[derive(Debug)]
pub struct ShearedElement<'a> {
    element: &'a Element,
    a: Option<f64>,
    tracer: Tracer<'a>,
    aw: OnceCell<f64>,
    kv: OnceCell<f64>,
    lambda_w: OnceCell<f64>,
    lambda_r: OnceCell<f64>,
    cv: OnceCell<f64>,
    vn: OnceCell<f64>,
    available_shear: OnceCell<f64>,
}

impl<'a> ShearedElement<'a> {
    /// `a` is the clear distance between transverse stiffeners, if any.
    pub fn new(element: &'a Element, a: Option<f64>) -> CalcResult<Self> {
        let a = a.map(|a| ensure_positive("a", a)).transpose()?;
        tracing::info!(element = %element.name, shape = %element.section.shape, ?a, "applying shear");
        Ok(ShearedElement {
            element,
            a,
            tracer: Tracer::new(&element.name),
            aw: OnceCell::new(),
            kv: OnceCell::new(),
            lambda_w: OnceCell::new(),
            lambda_r: OnceCell::new(),
            cv: OnceCell::new(),
            vn: OnceCell::new(),
            available_shear: OnceCell::new(),
        })
    }

    /// Record every derived value into `sink`
    pub fn with_trace(mut self, sink: &'a dyn TraceSink) -> Self {
        self.tracer = self.tracer.with_sink(sink);
        self
    }

    pub fn element(&self) -> &Element {
        self.element
    }

    pub fn stiffener_spacing(&self) -> Option<f64> {
        self.a
    }

    fn unsupported(&self) -> CalcError {
        tracing::warn!(shape = %self.element.section.shape, "unsupported shape for shear");
        CalcError::unsupported_shape(CHECK, &self.element.section.shape)
    }

    /// Aw = d·tw
    pub fn aw(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.aw, Equation::WebShearArea, None, || {
            Ok(aisc::web_area(
                self.element.require(SectionProperty::D)?,
                self.element.require(SectionProperty::Tw)?,
            ))
        })
    }

    /// kv = 5.34 unless stiffeners are closer than 3h
    pub fn kv(&self) -> CalcResult<f64> {
        self.tracer
            .memo(&self.kv, Equation::ShearBucklingCoefficient, None, || {
                Ok(aisc::shear_buckling_coefficient(
                    self.a,
                    self.element.section.web_height()?,
                ))
            })
    }

    /// λw = h/tw
    pub fn lambda_w(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.lambda_w, Equation::WebSlenderness, None, || {
            Ok(aisc::web_ratio(
                self.element.section.web_height()?,
                self.element.require(SectionProperty::Tw)?,
            ))
        })
    }

    /// Web slenderness limit below which Cv = 1
    pub fn lambda_r(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.lambda_r, Equation::WebShearLimit, None, || {
            let (e, fy) = (self.element.e(), self.element.fy());
            match self.element.section.family()? {
                ShapeFamily::WideFlange => Ok(aisc::rolled_web_shear_limit(e, fy)),
                ShapeFamily::Channel => Ok(aisc::shear_yield_limit(self.kv()?, e, fy)),
                _ => Err(self.unsupported()),
            }
        })
    }

    /// Cv = 1.0 when λw ≤ λr, else 1.10·√(kv·E/Fy)/λw
    pub fn cv(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.cv, Equation::WebShearCoefficient, None, || {
            self.cv_at(self.lambda_w()?)
        })
    }

    fn cv_at(&self, lambda_w: f64) -> CalcResult<f64> {
        Ok(aisc::web_shear_coefficient(
            lambda_w,
            self.lambda_r()?,
            self.kv()?,
            self.element.e(),
            self.element.fy(),
        ))
    }

    /// Vn = 0.6·Fy·Aw·Cv.
    ///
    /// Stiffened panels (a/h ≤ 3) would need tension-field action, which is
    /// not implemented.
    pub fn vn(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.vn, Equation::NominalShear, None, || {
            if let Some(a) = self.a {
                let h = self.element.section.web_height()?;
                if a / h <= MAX_STIFFENED_PANEL_RATIO {
                    tracing::warn!(element = %self.element.name, a, h, "tension field action required");
                    return Err(CalcError::not_implemented(
                        "Tension field action (AISC G2.2)",
                    ));
                }
            }
            Ok(aisc::nominal_shear(
                self.element.fy(),
                self.aw()?,
                self.cv()?,
            ))
        })
    }

    /// φv: 1.0 for rolled I-shapes, 0.9 for channels
    pub fn phi(&self) -> CalcResult<f64> {
        match self.element.section.family()? {
            ShapeFamily::WideFlange => Ok(PHI_SHEAR_ROLLED_I),
            ShapeFamily::Channel => Ok(PHI_SHEAR),
            _ => Err(self.unsupported()),
        }
    }

    /// φVn
    pub fn available_shear(&self) -> CalcResult<f64> {
        let value = self.tracer.memo(
            &self.available_shear,
            Equation::AvailableShearStrength,
            None,
            || Ok(self.phi()? * self.vn()?),
        )?;
        tracing::info!(element = %self.element.name, phi_vn = value, "shear capacity");
        Ok(value)
    }

    /// φ·0.6·Fy·Aw·Cv(λ) over the given web slenderness values.
    ///
    /// Points with Cv = 1 are tagged plastic, the rest inelastic.
    pub fn available_shear_curve(&self, lambdas: &[f64]) -> CalcResult<Vec<CurvePoint>> {
        let phi = self.phi()?;
        let aw = self.aw()?;
        let lambda_r = self.lambda_r()?;
        lambdas
            .iter()
            .map(|&lambda| -> CalcResult<CurvePoint> {
                let lambda = ensure_positive("λw", lambda)?;
                let cv = self.cv_at(lambda)?;
                Ok(CurvePoint {
                    x: lambda,
                    y: phi * aisc::nominal_shear(self.element.fy(), aw, cv),
                    regime: if lambda <= lambda_r {
                        Regime::Plastic
                    } else {
                        Regime::Inelastic
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{SectionProperty as P, Steel, SteelSection};
    use proptest::prelude::*;

    fn w10x22() -> SteelSection {
        SteelSection::new("W10X22", 6.49, 0.239)
            .unwrap()
            .with(P::D, 10.2)
            .with(P::Tw, 0.24)
            .with(P::H, 8.625)
    }

    fn beam(section: SteelSection) -> Element {
        Element::new("V1", Steel::astm_a992(), section, 240.0).unwrap()
    }

    #[test]
    fn test_rolled_i_shape() {
        let member = beam(w10x22());
        let shear = ShearedElement::new(&member, None).unwrap();
        assert!((shear.aw().unwrap() - 2.448).abs() < 1e-12);
        assert_eq!(shear.kv().unwrap(), 5.34);
        assert!((shear.lambda_w().unwrap() - 35.9375).abs() < 1e-9);
        assert!((shear.lambda_r().unwrap() - 53.946).abs() < 1e-3);
        assert_eq!(shear.cv().unwrap(), 1.0);
        assert!((shear.vn().unwrap() - 73.44).abs() < 1e-9);
        assert_eq!(shear.phi().unwrap(), 1.0);
        assert!((shear.available_shear().unwrap() - 73.44).abs() < 1e-9);
    }

    #[test]
    fn test_slender_web() {
        let member = beam(w10x22().with(P::Tw, 0.1));
        let shear = ShearedElement::new(&member, None).unwrap();
        assert!((shear.cv().unwrap() - 0.70977).abs() < 1e-5);
        assert!((shear.vn().unwrap() - 21.719).abs() < 1e-3);
    }

    #[test]
    fn test_channel() {
        let section = SteelSection::new("C8X11.5", 3.37, 0.13)
            .unwrap()
            .with(P::D, 8.0)
            .with(P::Tw, 0.22)
            .with(P::H, 6.75);
        let member = Element::new("V2", Steel::astm_a36(), section, 120.0).unwrap();
        let shear = ShearedElement::new(&member, None).unwrap();
        assert!((shear.lambda_r().unwrap() - 72.146).abs() < 1e-3);
        assert_eq!(shear.phi().unwrap(), 0.9);
        assert!((shear.available_shear().unwrap() - 34.2144).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_shape() {
        let section = SteelSection::new("HSS6X6X1/4", 5.24, 45.6)
            .unwrap()
            .with(P::D, 6.0)
            .with(P::Tw, 0.233)
            .with(P::H, 5.3);
        let member = beam(section);
        let shear = ShearedElement::new(&member, None).unwrap();
        assert_eq!(shear.phi().unwrap_err().error_code(), "UNSUPPORTED_SHAPE");
        assert_eq!(shear.lambda_r().unwrap_err().error_code(), "UNSUPPORTED_SHAPE");
    }

    #[test]
    fn test_stiffened_panel() {
        let member = beam(w10x22());

        let close = ShearedElement::new(&member, Some(20.0)).unwrap();
        assert!((close.kv().unwrap() - 5.92988).abs() < 1e-5);
        assert_eq!(
            close.vn().unwrap_err(),
            CalcError::not_implemented("Tension field action (AISC G2.2)")
        );

        let wide = ShearedElement::new(&member, Some(30.0)).unwrap();
        assert_eq!(wide.kv().unwrap(), 5.34);
        assert!(wide.vn().is_ok());
    }

    #[test]
    fn test_invalid_spacing() {
        let member = beam(w10x22());
        assert!(ShearedElement::new(&member, Some(0.0)).is_err());
    }

    #[test]
    fn test_missing_web_height() {
        let mut section = w10x22();
        section.h = None;
        let member = beam(section);
        let shear = ShearedElement::new(&member, None).unwrap();
        assert_eq!(shear.lambda_w().unwrap_err().missing_parameter_name(), Some("h"));
    }

    #[test]
    fn test_curve_discontinuity() {
        let member = beam(w10x22());
        let shear = ShearedElement::new(&member, None).unwrap();
        let lambda_r = shear.lambda_r().unwrap();
        let curve = shear
            .available_shear_curve(&[lambda_r, lambda_r + 1e-6, 100.0])
            .unwrap();
        assert_eq!(curve[0].regime, Regime::Plastic);
        assert!((curve[0].y - 73.44).abs() < 1e-9);
        assert_eq!(curve[1].regime, Regime::Inelastic);
        assert!(curve[1].y > curve[0].y);
        assert!((curve[2].y - 44.958).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_cv_is_one_up_to_limit(tw in 0.16f64..1.0) {
            let member = beam(w10x22().with(P::Tw, tw));
            let shear = ShearedElement::new(&member, None).unwrap();
            if shear.lambda_w().unwrap() <= shear.lambda_r().unwrap() {
                prop_assert_eq!(shear.cv().unwrap(), 1.0);
            } else {
                prop_assert!(shear.cv().unwrap() != 1.0);
            }
        }
    }
}
