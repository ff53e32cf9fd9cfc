//! # Slenderness Classification
//!
//! Width-to-thickness classification of flanges and webs (AISC Table B4.1)
//! and member slenderness against the KL/r ceiling (E2).
//!
//! Flexure uses a three-tier scale (compact, noncompact, slender). Compression
//! has no noncompact tier: an element is either below λr or slender, and the
//! comparison is strict.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::equations::aisc::{self, limits, GLOBAL_SLENDERNESS_LIMIT};
use crate::errors::CalcResult;
use crate::materials::SectionProperty;

/// Local buckling class, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slenderness {
    Compact,
    NonCompact,
    Slender,
}

impl Slenderness {
    /// Three-tier classification: ratio ≤ λp compact, ratio ≤ λr noncompact
    pub fn classify(ratio: f64, lambda_p: f64, lambda_r: f64) -> Self {
        if ratio <= lambda_p {
            Slenderness::Compact
        } else if ratio <= lambda_r {
            Slenderness::NonCompact
        } else {
            Slenderness::Slender
        }
    }

    pub fn is_slender(&self) -> bool {
        matches!(self, Slenderness::Slender)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Slenderness::Compact => "compact",
            Slenderness::NonCompact => "noncompact",
            Slenderness::Slender => "slender",
        }
    }
}

impl std::fmt::Display for Slenderness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Plate element of an I-shape or channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionElement {
    Flange,
    Web,
}

/// Ratio, limits and class of one plate element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSlenderness {
    pub element: SectionElement,
    /// Width-to-thickness ratio λ
    pub ratio: f64,
    /// Compact limit λp (equal to λr for compression)
    pub lambda_p: f64,
    /// Noncompact limit λr
    pub lambda_r: f64,
    pub class: Slenderness,
}

impl ElementSlenderness {
    fn flexure(element: SectionElement, ratio: f64, lambda_p: f64, lambda_r: f64) -> Self {
        ElementSlenderness {
            element,
            ratio,
            lambda_p,
            lambda_r,
            class: Slenderness::classify(ratio, lambda_p, lambda_r),
        }
    }

    fn compression(element: SectionElement, ratio: f64, lambda_r: f64) -> Self {
        let class = if ratio < lambda_r {
            Slenderness::Compact
        } else {
            Slenderness::Slender
        };
        ElementSlenderness {
            element,
            ratio,
            lambda_p: lambda_r,
            lambda_r,
            class,
        }
    }
}

fn flange_ratio(member: &Element) -> CalcResult<f64> {
    Ok(aisc::flange_ratio(
        member.require(SectionProperty::Bf)?,
        member.require(SectionProperty::Tf)?,
    ))
}

fn web_ratio(member: &Element) -> CalcResult<f64> {
    Ok(aisc::web_ratio(
        member.section.web_height()?,
        member.require(SectionProperty::Tw)?,
    ))
}

/// Flange classification for flexure (Table B4.1b case 10)
pub fn flexure_flange(member: &Element) -> CalcResult<ElementSlenderness> {
    let root = member.material.ratio_sqrt();
    Ok(ElementSlenderness::flexure(
        SectionElement::Flange,
        flange_ratio(member)?,
        limits::FLANGE_COMPACT_FLEXURE * root,
        limits::FLANGE_NONCOMPACT_FLEXURE * root,
    ))
}

/// Web classification for flexure (Table B4.1b case 15)
pub fn flexure_web(member: &Element) -> CalcResult<ElementSlenderness> {
    let root = member.material.ratio_sqrt();
    Ok(ElementSlenderness::flexure(
        SectionElement::Web,
        web_ratio(member)?,
        limits::WEB_COMPACT_FLEXURE * root,
        limits::WEB_NONCOMPACT_FLEXURE * root,
    ))
}

/// The worse of the two classifications; the flange wins a tie.
pub fn governing(flange: ElementSlenderness, web: ElementSlenderness) -> ElementSlenderness {
    if web.class > flange.class {
        web
    } else {
        flange
    }
}

/// Flange classification for compression (Table B4.1a case 1)
pub fn compression_flange(member: &Element) -> CalcResult<ElementSlenderness> {
    let lambda_r = limits::FLANGE_SLENDER_COMPRESSION * member.material.ratio_sqrt();
    Ok(ElementSlenderness::compression(
        SectionElement::Flange,
        flange_ratio(member)?,
        lambda_r,
    ))
}

/// Web classification for compression (Table B4.1a case 5)
pub fn compression_web(member: &Element) -> CalcResult<ElementSlenderness> {
    let lambda_r = limits::WEB_SLENDER_COMPRESSION * member.material.ratio_sqrt();
    Ok(ElementSlenderness::compression(
        SectionElement::Web,
        web_ratio(member)?,
        lambda_r,
    ))
}

/// Locally slender in compression unless both flange and web are below λr.
pub fn is_locally_slender_in_compression(member: &Element) -> CalcResult<bool> {
    let flange = compression_flange(member)?;
    let web = compression_web(member)?;
    let slender = flange.class.is_slender() || web.class.is_slender();
    if slender {
        tracing::warn!(
            element = %member.name,
            flange = flange.ratio,
            web = web.ratio,
            "member is locally slender"
        );
    } else {
        tracing::info!(element = %member.name, "member is not locally slender");
    }
    Ok(slender)
}

/// Slender when either KL/r reaches the ceiling of 200.
pub fn is_globally_slender(slenderness_x: f64, slenderness_y: f64) -> bool {
    slenderness_x >= GLOBAL_SLENDERNESS_LIMIT || slenderness_y >= GLOBAL_SLENDERNESS_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::materials::{SectionProperty as P, Steel, SteelSection};

    fn w10x19() -> Element {
        let section = SteelSection::new("W10X19", 5.62, 0.10)
            .unwrap()
            .with(P::Bf, 4.02)
            .with(P::Tf, 0.395)
            .with(P::Tw, 0.25)
            .with(P::H, 8.375);
        Element::new("C-1", Steel::astm_a36(), section, 126.0).unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Slenderness::classify(9.0, 9.0, 24.0), Slenderness::Compact);
        assert_eq!(Slenderness::classify(9.1, 9.0, 24.0), Slenderness::NonCompact);
        assert_eq!(Slenderness::classify(24.0, 9.0, 24.0), Slenderness::NonCompact);
        assert_eq!(Slenderness::classify(24.1, 9.0, 24.0), Slenderness::Slender);
    }

    #[test]
    fn test_ordering() {
        assert!(Slenderness::Compact < Slenderness::NonCompact);
        assert!(Slenderness::NonCompact < Slenderness::Slender);
    }

    #[test]
    fn test_flexure_flange_w10x19() {
        let flange = flexure_flange(&w10x19()).unwrap();
        // 4.02 / (2 * 0.395) = 5.089; 0.38 * sqrt(29000/36) = 10.785
        assert!((flange.ratio - 5.089).abs() < 0.001);
        assert!((flange.lambda_p - 10.785).abs() < 0.001);
        assert_eq!(flange.class, Slenderness::Compact);
    }

    #[test]
    fn test_compression_local_w10x19() {
        let member = w10x19();
        assert_eq!(compression_flange(&member).unwrap().class, Slenderness::Compact);
        // 33.5 < 1.49 * sqrt(29000/36) = 42.29
        assert_eq!(compression_web(&member).unwrap().class, Slenderness::Compact);
        assert!(!is_locally_slender_in_compression(&member).unwrap());
    }

    #[test]
    fn test_compression_is_strict() {
        let element = ElementSlenderness::compression(SectionElement::Web, 42.0, 42.0);
        assert_eq!(element.class, Slenderness::Slender);
    }

    #[test]
    fn test_thin_web_makes_member_slender() {
        let mut member = w10x19();
        member.section = member.section.clone().with(P::Tw, 0.15);
        assert!(is_locally_slender_in_compression(&member).unwrap());
    }

    #[test]
    fn test_governing_prefers_flange_on_tie() {
        let flange = ElementSlenderness::flexure(SectionElement::Flange, 12.0, 9.0, 24.0);
        let web = ElementSlenderness::flexure(SectionElement::Web, 95.0, 90.0, 137.0);
        assert_eq!(governing(flange, web).element, SectionElement::Flange);

        let slender_web = ElementSlenderness::flexure(SectionElement::Web, 140.0, 90.0, 137.0);
        assert_eq!(governing(flange, slender_web).element, SectionElement::Web);
    }

    #[test]
    fn test_global_ceiling_inclusive() {
        assert!(!is_globally_slender(199.9, 56.7));
        assert!(is_globally_slender(200.0, 56.7));
        assert!(is_globally_slender(16.2, 250.0));
    }

    #[test]
    fn test_missing_flange_width() {
        let section = SteelSection::new("W10X19", 5.62, 0.10).unwrap();
        let member = Element::new("C-1", Steel::astm_a36(), section, 126.0).unwrap();
        assert_eq!(
            flexure_flange(&member).unwrap_err(),
            CalcError::missing_parameter("bf", "W10X19")
        );
    }
}
