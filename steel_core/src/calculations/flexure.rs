//! # Flexural Members
//!
//! Strong-axis bending of doubly symmetric I-shapes and channels (AISC F2,
//! F3) plus the midspan deflection serviceability check.
//!
//! ## Procedure
//!
//! 1. Classify flange and web; the worse class governs (flange on a tie)
//! 2. Compact sections: lateral-torsional buckling against Lb
//!    - Lb ≤ Lp: Mn = Mp
//!    - Lp < Lb ≤ Lr: inelastic LTB (F2-2), capped at Mp
//!    - Lb > Lr: elastic LTB (F2-3), capped at Mp
//! 3. Noncompact: F3-1; slender: F3-2, both with the governing λ
//! 4. φMn = 0.90·Mn
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::flexure::FlexedElement;
//! use steel_core::calculations::Regime;
//! use steel_core::element::Element;
//! use steel_core::materials::{SectionProperty as P, Steel, SteelSection};
//!
//! let section = SteelSection::new("W10X22", 6.49, 0.239)
//!     .unwrap()
//!     .with(P::D, 10.2)
//!     .with(P::Bf, 5.75)
//!     .with(P::Tf, 0.36)
//!     .with(P::Tw, 0.24)
//!     .with(P::H, 8.625)
//!     .with(P::Sx, 23.2)
//!     .with(P::Zx, 26.0)
//!     .with(P::Iy, 11.4)
//!     .with(P::Ry, 1.33)
//!     .with(P::Cw, 275.0);
//! let beam = Element::new("V1", Steel::astm_a992(), section, 240.0).unwrap();
//!
//! let flexure = FlexedElement::new(&beam, 120.0, 1.0).unwrap();
//! assert_eq!(flexure.regime().unwrap(), Regime::Inelastic);
//! assert!((flexure.available_moment().unwrap() - 914.36).abs() < 0.01);
//! ```

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use super::slenderness::{self, ElementSlenderness, Slenderness};
use super::{CurvePoint, Regime, Tracer};
use crate::element::Element;
use crate::equations::aisc::{self, PHI_FLEXURE};
use crate::equations::beam::{self, LIVE_LOAD_LIMIT_RATIO, TOTAL_LOAD_LIMIT_RATIO};
use crate::equations::registry::{Equation, TraceSink};
use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::materials::{SectionProperty, ShapeFamily};

fn ensure_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite, non-negative number",
        ));
    }
    Ok(value)
}

/// Result of the uniform-load deflection check.
///
/// Passing requires δ_live < L/360 and δ_total < L/240.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionCheck {
    pub live_deflection: f64,
    pub total_deflection: f64,
    pub live_limit: f64,
    pub total_limit: f64,
    pub live_ok: bool,
    pub total_ok: bool,
}

impl DeflectionCheck {
    pub fn passes(&self) -> bool {
        self.live_ok && self.total_ok
    }
}

/// Flexure evaluator over one element for a given Lb and Cb.
#[derive(Debug)]
pub struct FlexedElement<'a> {
    element: &'a Element,
    lb: f64,
    cb: f64,
    tracer: Tracer<'a>,
    rts: OnceCell<f64>,
    ho: OnceCell<f64>,
    lp: OnceCell<f64>,
    c: OnceCell<f64>,
    lr: OnceCell<f64>,
    mp: OnceCell<f64>,
    mr: OnceCell<f64>,
    flange: OnceCell<ElementSlenderness>,
    web: OnceCell<ElementSlenderness>,
    class: OnceCell<Slenderness>,
    mn: OnceCell<f64>,
    available_moment: OnceCell<f64>,
}

impl<'a> FlexedElement<'a> {
    /// Unbraced length `lb` must be ≥ 0 and `cb` > 0.
    pub fn new(element: &'a Element, lb: f64, cb: f64) -> CalcResult<Self> {
        let lb = ensure_non_negative("Lb", lb)?;
        let cb = ensure_positive("Cb", cb)?;
        tracing::info!(element = %element.name, shape = %element.section.shape, lb, cb, "applying flexure");
        Ok(FlexedElement {
            element,
            lb,
            cb,
            tracer: Tracer::new(&element.name),
            rts: OnceCell::new(),
            ho: OnceCell::new(),
            lp: OnceCell::new(),
            c: OnceCell::new(),
            lr: OnceCell::new(),
            mp: OnceCell::new(),
            mr: OnceCell::new(),
            flange: OnceCell::new(),
            web: OnceCell::new(),
            class: OnceCell::new(),
            mn: OnceCell::new(),
            available_moment: OnceCell::new(),
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

    pub fn lb(&self) -> f64 {
        self.lb
    }

    pub fn cb(&self) -> f64 {
        self.cb
    }

    fn prop(&self, property: SectionProperty) -> CalcResult<f64> {
        self.element.require(property)
    }

    // ---------------------------------------------------------------------
    // Section geometry
    // ---------------------------------------------------------------------

    /// rts = √(√(Iy·Cw)/Sx)
    pub fn rts(&self) -> CalcResult<f64> {
        self.tracer
            .memo(&self.rts, Equation::EffectiveRadiusOfGyration, None, || {
                Ok(aisc::effective_radius_of_gyration(
                    self.prop(SectionProperty::Iy)?,
                    self.prop(SectionProperty::Cw)?,
                    self.prop(SectionProperty::Sx)?,
                ))
            })
    }

    /// ho = d − tf
    pub fn ho(&self) -> CalcResult<f64> {
        self.tracer
            .memo(&self.ho, Equation::FlangeCentroidDistance, None, || {
                Ok(self.prop(SectionProperty::D)? - self.prop(SectionProperty::Tf)?)
            })
    }

    // ---------------------------------------------------------------------
    // Lateral-torsional buckling
    // ---------------------------------------------------------------------

    /// Lp = 1.76·ry·√(E/Fy)
    pub fn lp(&self) -> CalcResult<f64> {
        self.tracer
            .memo(&self.lp, Equation::PlasticLimitLength, None, || {
                Ok(aisc::plastic_limit_length(
                    self.prop(SectionProperty::Ry)?,
                    self.element.e(),
                    self.element.fy(),
                ))
            })
    }

    /// c = (ho/2)·√(Iy/Cw); I-shapes and channels only.
    ///
    /// I-shapes use the channel expression rather than c = 1.
    pub fn c(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.c, Equation::TorsionFactor, None, || {
            match self.element.section.family()? {
                ShapeFamily::WideFlange | ShapeFamily::Channel => Ok(aisc::torsion_factor_c(
                    self.ho()?,
                    self.prop(SectionProperty::Iy)?,
                    self.prop(SectionProperty::Cw)?,
                )),
                _ => {
                    tracing::warn!(shape = %self.element.section.shape, "torsion factor c undefined for shape");
                    Err(CalcError::unsupported_shape(
                        "flexure torsion factor c",
                        &self.element.section.shape,
                    ))
                }
            }
        })
    }

    /// Lr (F2-6)
    pub fn lr(&self) -> CalcResult<f64> {
        self.tracer
            .memo(&self.lr, Equation::InelasticLimitLength, None, || {
                Ok(aisc::inelastic_limit_length(
                    self.rts()?,
                    self.element.e(),
                    self.element.fy(),
                    self.prop(SectionProperty::J)?,
                    self.c()?,
                    self.prop(SectionProperty::Sx)?,
                    self.ho()?,
                ))
            })
    }

    /// Mp = Fy·Zx
    pub fn mp(&self) -> CalcResult<f64> {
        self.tracer.memo(&self.mp, Equation::PlasticMoment, None, || {
            Ok(aisc::plastic_moment(
                self.element.fy(),
                self.prop(SectionProperty::Zx)?,
            ))
        })
    }

    /// Mr = inelastic Mn at Lb = Lr (0.7·Fy·Sx when Cb = 1)
    pub fn mr(&self) -> CalcResult<f64> {
        self.tracer
            .memo(&self.mr, Equation::InelasticLtbMoment, Some("Lr"), || {
                self.inelastic_mn(self.lr()?)
            })
    }

    /// F2-2 at an arbitrary unbraced length, capped at Mp
    pub fn inelastic_mn(&self, lb: f64) -> CalcResult<f64> {
        let value = aisc::inelastic_ltb_moment(
            self.cb,
            self.mp()?,
            self.element.fy(),
            self.prop(SectionProperty::Sx)?,
            lb,
            self.lp()?,
            self.lr()?,
        );
        tracing::debug!(element = %self.element.name, lb, value, "inelastic Mn");
        Ok(value)
    }

    /// F2-3 at an arbitrary unbraced length (uncapped)
    pub fn elastic_mn(&self, lb: f64) -> CalcResult<f64> {
        let lb = ensure_positive("Lb", lb)?;
        let value = aisc::elastic_ltb_moment(
            self.cb,
            self.element.e(),
            lb,
            self.rts()?,
            self.prop(SectionProperty::J)?,
            self.c()?,
            self.prop(SectionProperty::Sx)?,
            self.ho()?,
        );
        tracing::debug!(element = %self.element.name, lb, value, "elastic Mn");
        Ok(value)
    }

    /// Lateral-torsional regime at `lb`
    pub fn ltb_regime(&self, lb: f64) -> CalcResult<Regime> {
        Ok(if lb <= self.lp()? {
            Regime::Plastic
        } else if lb <= self.lr()? {
            Regime::Inelastic
        } else {
            Regime::Elastic
        })
    }

    /// Mn of a compact section at `lb`, never above Mp
    pub fn compact_mn(&self, lb: f64) -> CalcResult<f64> {
        match self.ltb_regime(lb)? {
            Regime::Plastic => self.mp(),
            Regime::Inelastic => self.inelastic_mn(lb),
            _ => Ok(self.elastic_mn(lb)?.min(self.mp()?)),
        }
    }

    // ---------------------------------------------------------------------
    // Local slenderness
    // ---------------------------------------------------------------------

    pub fn flange_slenderness(&self) -> CalcResult<ElementSlenderness> {
        self.flange
            .get_or_try_init(|| {
                let flange = slenderness::flexure_flange(self.element)?;
                self.tracer.emit(Equation::FlangeSlenderness, None, flange.ratio);
                Ok(flange)
            })
            .copied()
    }

    pub fn web_slenderness(&self) -> CalcResult<ElementSlenderness> {
        self.web
            .get_or_try_init(|| {
                let web = slenderness::flexure_web(self.element)?;
                self.tracer.emit(Equation::WebSlenderness, None, web.ratio);
                Ok(web)
            })
            .copied()
    }

    /// Flange or web, whichever classifies worse
    pub fn governing_lambda(&self) -> CalcResult<ElementSlenderness> {
        Ok(slenderness::governing(
            self.flange_slenderness()?,
            self.web_slenderness()?,
        ))
    }

    /// Combined class of the section
    pub fn slenderness(&self) -> CalcResult<Slenderness> {
        self.class
            .get_or_try_init(|| {
                let class = self.governing_lambda()?.class;
                if class.is_slender() {
                    tracing::warn!(element = %self.element.name, %class, "section classification");
                } else {
                    tracing::info!(element = %self.element.name, %class, "section classification");
                }
                Ok(class)
            })
            .copied()
    }

    // ---------------------------------------------------------------------
    // Strength
    // ---------------------------------------------------------------------

    /// Branch that governs Mn for this Lb
    pub fn regime(&self) -> CalcResult<Regime> {
        match self.slenderness()? {
            Slenderness::Compact => self.ltb_regime(self.lb),
            Slenderness::NonCompact => Ok(Regime::NonCompact),
            Slenderness::Slender => Ok(Regime::Slender),
        }
    }

    /// Nominal flexural strength
    pub fn mn(&self) -> CalcResult<f64> {
        let regime = self.regime()?;
        let equation = match regime {
            Regime::Plastic => Equation::PlasticMoment,
            Regime::Inelastic => Equation::InelasticLtbMoment,
            Regime::Elastic => Equation::ElasticLtbMoment,
            Regime::NonCompact => Equation::NoncompactMoment,
            Regime::Slender => Equation::SlenderMoment,
        };
        self.tracer.memo(&self.mn, equation, Some("Lb"), || match regime {
            Regime::NonCompact => {
                let lambda = self.governing_lambda()?;
                Ok(aisc::noncompact_moment(
                    self.mp()?,
                    self.element.fy(),
                    self.prop(SectionProperty::Sx)?,
                    lambda.ratio,
                    lambda.lambda_p,
                    lambda.lambda_r,
                ))
            }
            Regime::Slender => {
                let kc = aisc::kc_factor(
                    self.element.section.web_height()?,
                    self.prop(SectionProperty::Tw)?,
                );
                Ok(aisc::slender_moment(
                    self.element.e(),
                    kc,
                    self.prop(SectionProperty::Sx)?,
                    self.governing_lambda()?.ratio,
                ))
            }
            _ => self.compact_mn(self.lb),
        })
    }

    /// φMn = 0.90·Mn
    pub fn available_moment(&self) -> CalcResult<f64> {
        let value = self.tracer.memo(
            &self.available_moment,
            Equation::AvailableFlexuralStrength,
            None,
            || Ok(PHI_FLEXURE * self.mn()?),
        )?;
        tracing::info!(element = %self.element.name, phi_mn = value, "flexure capacity");
        Ok(value)
    }

    /// φMn of the compact-section LTB curve at each Lb.
    ///
    /// Local slenderness is ignored; this is the lateral-torsional envelope.
    pub fn available_moment_curve(&self, lbs: &[f64]) -> CalcResult<Vec<CurvePoint>> {
        lbs.iter()
            .map(|&lb| -> CalcResult<CurvePoint> {
                let lb = ensure_non_negative("Lb", lb)?;
                Ok(CurvePoint {
                    x: lb,
                    y: PHI_FLEXURE * self.compact_mn(lb)?,
                    regime: self.ltb_regime(lb)?,
                })
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Serviceability
    // ---------------------------------------------------------------------

    /// Midspan deflection under uniform dead and live load over the element
    /// length, against L/360 (live) and L/240 (total).
    pub fn deflection_check(&self, w_dead: f64, w_live: f64) -> CalcResult<DeflectionCheck> {
        let w_dead = ensure_non_negative("w_dead", w_dead)?;
        let w_live = ensure_non_negative("w_live", w_live)?;
        let ix = self.prop(SectionProperty::Ix)?;
        let (l, e) = (self.element.length, self.element.e());

        let live_deflection = beam::uniform_load_max_deflection(w_live, l, e, ix);
        let total_deflection = beam::uniform_load_max_deflection(w_dead + w_live, l, e, ix);
        let live_limit = beam::deflection_limit(l, LIVE_LOAD_LIMIT_RATIO);
        let total_limit = beam::deflection_limit(l, TOTAL_LOAD_LIMIT_RATIO);

        self.tracer
            .emit(Equation::UniformLoadMaxDeflection, Some("live"), live_deflection);
        self.tracer
            .emit(Equation::UniformLoadMaxDeflection, Some("total"), total_deflection);
        self.tracer
            .emit(Equation::DeflectionLimit, Some("live"), live_limit);
        self.tracer
            .emit(Equation::DeflectionLimit, Some("total"), total_limit);

        let check = DeflectionCheck {
            live_deflection,
            total_deflection,
            live_limit,
            total_limit,
            live_ok: live_deflection < live_limit,
            total_ok: total_deflection < total_limit,
        };
        if check.passes() {
            tracing::info!(element = %self.element.name, live_deflection, total_deflection, "deflection ok");
        } else {
            tracing::warn!(element = %self.element.name, live_deflection, total_deflection, "deflection exceeds limit");
        }
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::slenderness::SectionElement;
    use crate::equations::EquationTracker;
    use crate::materials::{SectionProperty as P, Steel, SteelSection};
    use proptest::prelude::*;

    fn w10x22() -> SteelSection {
        SteelSection::new("W10X22", 6.49, 0.239)
            .unwrap()
            .with(P::D, 10.2)
            .with(P::Bf, 5.75)
            .with(P::Tf, 0.36)
            .with(P::Tw, 0.24)
            .with(P::H, 8.625)
            .with(P::Ix, 118.0)
            .with(P::Sx, 23.2)
            .with(P::Zx, 26.0)
            .with(P::Iy, 11.4)
            .with(P::Ry, 1.33)
            .with(P::Cw, 275.0)
    }

    fn beam(section: SteelSection) -> Element {
        Element::new("V1", Steel::astm_a992(), section, 240.0).unwrap()
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_w10x22_derived_values() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 120.0, 1.0).unwrap();

        assert_close(flexure.rts().unwrap(), 1.5535, 1e-4);
        assert_close(flexure.ho().unwrap(), 9.84, 1e-12);
        assert_close(flexure.lp().unwrap(), 56.374, 1e-3);
        assert_close(flexure.c().unwrap(), 1.00173, 1e-5);
        assert_close(flexure.lr().unwrap(), 165.687, 1e-3);
        assert_close(flexure.mp().unwrap(), 1300.0, 1e-9);
        assert_close(flexure.mr().unwrap(), 812.0, 1e-6);
    }

    #[test]
    fn test_inelastic_ltb() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 120.0, 1.0).unwrap();
        assert_eq!(flexure.slenderness().unwrap(), Slenderness::Compact);
        assert_eq!(flexure.regime().unwrap(), Regime::Inelastic);
        assert_close(flexure.mn().unwrap(), 1015.957, 1e-3);
        assert_close(flexure.available_moment().unwrap(), 914.361, 1e-3);
    }

    #[test]
    fn test_plastic_and_elastic_ltb() {
        let member = beam(w10x22());

        let short = FlexedElement::new(&member, 30.0, 1.0).unwrap();
        assert_eq!(short.regime().unwrap(), Regime::Plastic);
        assert_eq!(short.mn().unwrap(), 1300.0);

        let long = FlexedElement::new(&member, 200.0, 1.0).unwrap();
        assert_eq!(long.regime().unwrap(), Regime::Elastic);
        assert_close(long.mn().unwrap(), 614.928, 1e-3);
    }

    #[test]
    fn test_cb_capped_at_mp() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 120.0, 1.67).unwrap();
        assert_eq!(flexure.mn().unwrap(), 1300.0);
    }

    #[test]
    fn test_limit_lengths_match_moments() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 0.0, 1.0).unwrap();
        let (lp, lr) = (flexure.lp().unwrap(), flexure.lr().unwrap());
        assert_eq!(flexure.compact_mn(lp).unwrap(), flexure.mp().unwrap());
        assert_eq!(flexure.compact_mn(lr).unwrap(), flexure.mr().unwrap());
    }

    #[test]
    fn test_unbraced_length_at_lr() {
        let member = beam(w10x22());
        let lr = FlexedElement::new(&member, 0.0, 1.0).unwrap().lr().unwrap();

        let at_lr = FlexedElement::new(&member, lr, 1.0).unwrap();
        assert_eq!(at_lr.regime().unwrap(), Regime::Inelastic);
        assert_eq!(at_lr.mn().unwrap(), at_lr.mr().unwrap());
        assert_close(at_lr.mn().unwrap(), 0.7 * 50.0 * 23.2, 1e-6);

        let past_lr = FlexedElement::new(&member, lr * (1.0 + 1e-9), 1.0).unwrap();
        assert_eq!(past_lr.regime().unwrap(), Regime::Elastic);
        assert_close(past_lr.mn().unwrap(), at_lr.mn().unwrap(), 1e-3);
    }

    #[test]
    fn test_zero_torsional_constant_rejected() {
        let member = beam(w10x22().with(P::J, 0.0));
        let flexure = FlexedElement::new(&member, 200.0, 1.0).unwrap();
        assert_eq!(flexure.lr().unwrap_err().error_code(), "INVALID_INPUT");
        assert!(flexure.elastic_mn(200.0).is_err());
    }

    #[test]
    fn test_noncompact_flange() {
        let member = beam(w10x22().with(P::Bf, 8.0));
        let flexure = FlexedElement::new(&member, 30.0, 1.0).unwrap();
        assert_eq!(flexure.slenderness().unwrap(), Slenderness::NonCompact);
        assert_eq!(flexure.regime().unwrap(), Regime::NonCompact);
        assert_close(flexure.mn().unwrap(), 1235.959, 1e-3);
    }

    #[test]
    fn test_slender_flange() {
        let member = beam(w10x22().with(P::Bf, 18.0));
        let flexure = FlexedElement::new(&member, 30.0, 1.0).unwrap();
        assert_eq!(flexure.regime().unwrap(), Regime::Slender);
        assert_close(flexure.mn().unwrap(), 646.449, 1e-3);
    }

    #[test]
    fn test_slender_web_governs() {
        let member = beam(w10x22().with(P::Tw, 0.06));
        let flexure = FlexedElement::new(&member, 30.0, 1.0).unwrap();
        let governing = flexure.governing_lambda().unwrap();
        assert_eq!(governing.element, SectionElement::Web);
        assert_eq!(flexure.slenderness().unwrap(), Slenderness::Slender);
    }

    #[test]
    fn test_missing_zx() {
        let mut section = w10x22();
        section.zx = None;
        let member = beam(section);
        let flexure = FlexedElement::new(&member, 120.0, 1.0).unwrap();
        assert_eq!(
            flexure.mp().unwrap_err(),
            CalcError::missing_parameter("zx", "W10X22")
        );
    }

    #[test]
    fn test_c_unsupported_for_angles() {
        let section = SteelSection::new("L4X4X1/2", 3.75, 0.322)
            .unwrap()
            .with(P::D, 4.0)
            .with(P::Tf, 0.5)
            .with(P::Iy, 5.52)
            .with(P::Cw, 0.36);
        let member = beam(section);
        let flexure = FlexedElement::new(&member, 60.0, 1.0).unwrap();
        assert_eq!(flexure.c().unwrap_err().error_code(), "UNSUPPORTED_SHAPE");
    }

    #[test]
    fn test_invalid_parameters() {
        let member = beam(w10x22());
        assert!(FlexedElement::new(&member, -1.0, 1.0).is_err());
        assert!(FlexedElement::new(&member, 120.0, 0.0).is_err());
        assert!(FlexedElement::new(&member, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_curve_regions() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 120.0, 1.0).unwrap();
        let curve = flexure
            .available_moment_curve(&[0.0, 50.0, 120.0, 200.0])
            .unwrap();
        let regimes: Vec<_> = curve.iter().map(|p| p.regime).collect();
        assert_eq!(
            regimes,
            vec![Regime::Plastic, Regime::Plastic, Regime::Inelastic, Regime::Elastic]
        );
        assert_close(curve[0].y, 0.9 * 1300.0, 1e-9);
        assert_close(curve[2].y, flexure.available_moment().unwrap(), 1e-9);
    }

    #[test]
    fn test_deflection_check() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 120.0, 1.0).unwrap();

        let ok = flexure.deflection_check(0.02, 0.03).unwrap();
        assert_close(ok.live_deflection, 0.3787, 1e-4);
        assert_close(ok.total_deflection, 0.6312, 1e-4);
        assert_close(ok.live_limit, 240.0 / 360.0, 1e-12);
        assert_close(ok.total_limit, 1.0, 1e-12);
        assert!(ok.passes());

        let bad = flexure.deflection_check(0.02, 0.06).unwrap();
        assert!(!bad.live_ok);
        assert!(!bad.total_ok);
        assert!(!bad.passes());
    }

    #[test]
    fn test_deflection_limits_checked_separately() {
        let member = beam(w10x22());
        let flexure = FlexedElement::new(&member, 120.0, 1.0).unwrap();

        // Heavy dead load: live within L/360, total over L/240
        let heavy_dead = flexure.deflection_check(0.08, 0.01).unwrap();
        assert!(heavy_dead.live_ok);
        assert!(!heavy_dead.total_ok);
        assert!(!heavy_dead.passes());

        // Live only: over L/360 but within L/240
        let live_only = flexure.deflection_check(0.0, 0.06).unwrap();
        assert!(!live_only.live_ok);
        assert!(live_only.total_ok);
        assert!(!live_only.passes());
    }

    #[test]
    fn test_deflection_trace_records_limits() {
        let member = beam(w10x22());
        let tracker = EquationTracker::new();
        let flexure = FlexedElement::new(&member, 120.0, 1.0)
            .unwrap()
            .with_trace(&tracker);
        flexure.deflection_check(0.02, 0.03).unwrap();
        // Last recorded limit is the total-load one
        assert_eq!(tracker.value_of(Equation::DeflectionLimit), Some(1.0));
        assert_eq!(tracker.len(), 4);
    }

    #[test]
    fn test_trace_memoization() {
        let member = beam(w10x22());
        let tracker = EquationTracker::new();
        let flexure = FlexedElement::new(&member, 120.0, 1.0)
            .unwrap()
            .with_trace(&tracker);

        flexure.available_moment().unwrap();
        let count = tracker.len();
        flexure.available_moment().unwrap();
        flexure.lr().unwrap();
        assert_eq!(flexure.slenderness().unwrap(), Slenderness::Compact);
        assert_eq!(flexure.regime().unwrap(), Regime::Inelastic);
        assert_eq!(tracker.len(), count);
        assert_eq!(tracker.value_of(Equation::PlasticMoment), Some(1300.0));
        assert!(tracker.generate_markdown().contains("AISC 360-16 F2-6"));
    }

    proptest! {
        #[test]
        fn prop_compact_mn_non_increasing(a in 0.0f64..165.0, b in 0.0f64..165.0) {
            let member = beam(w10x22());
            let flexure = FlexedElement::new(&member, 0.0, 1.0).unwrap();
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(flexure.compact_mn(long).unwrap() <= flexure.compact_mn(short).unwrap() + 1e-9);
        }

        #[test]
        fn prop_compact_mn_bounded_by_mp(lb in 0.0f64..1000.0, cb in 1.0f64..3.0) {
            let member = beam(w10x22());
            let flexure = FlexedElement::new(&member, lb, cb).unwrap();
            prop_assert!(flexure.compact_mn(lb).unwrap() <= 1300.0);
        }
    }
}
