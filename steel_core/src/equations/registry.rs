//! # Equation Registry
//!
//! Registry of the AISC 360 equations the capacity checks apply, plus the
//! trace sink evaluators report through.
//!
//! ## Architecture
//!
//! - [`Equation`] identifies a code equation; [`Equation::metadata`] gives its
//!   name, plain-text formula, code reference and category
//! - [`TraceSink`] is what an evaluator is handed to report each derived
//!   value; [`EquationTracker`] is the collecting implementation
//! - [`EquationTracker::generate_markdown`] renders a calculation trail
//!
//! ## Usage
//!
//! ```rust
//! use steel_core::equations::registry::{Equation, EquationTracker, EquationUsage, TraceSink};
//!
//! let tracker = EquationTracker::new();
//! tracker.record(EquationUsage::new(Equation::PlasticMoment, "V1", 936.0));
//!
//! assert_eq!(tracker.value_of(Equation::PlasticMoment), Some(936.0));
//! println!("{}", Equation::PlasticMoment.metadata().formula_plain);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a structural engineering code or standard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// AISC 360 - Specification for Structural Steel Buildings
    AISC360 {
        year: u16,
        section: &'static str,
    },
    /// Roark's Formulas for Stress and Strain
    Roarks {
        edition: u8,
        table: &'static str,
        case: &'static str,
    },
    /// IBC - International Building Code
    IBC {
        year: u16,
        section: &'static str,
    },
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::AISC360 { year, section } => {
                format!("AISC 360-{} {}", year % 100, section)
            }
            CodeReference::Roarks { edition, table, case } => {
                format!("Roark's {}ed, {}, Case {}", edition, table, case)
            }
            CodeReference::IBC { year, section } => {
                format!("IBC {} {}", year, section)
            }
        }
    }
}

const AISC_YEAR: u16 = 2016;

const fn aisc(section: &'static str) -> CodeReference {
    CodeReference::AISC360 {
        year: AISC_YEAR,
        section,
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in a calculation trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Width-to-thickness and member slenderness
    Slenderness,
    /// Chapter E flexural buckling
    Compression,
    /// Chapter F yielding and lateral-torsional buckling
    Flexure,
    /// Chapter G web shear
    Shear,
    /// Serviceability deflection
    Deflections,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Slenderness => "Slenderness",
            EquationCategory::Compression => "Compression",
            EquationCategory::Flexure => "Flexure",
            EquationCategory::Shear => "Shear",
            EquationCategory::Deflections => "Deflections",
        }
    }

    /// Sort order for reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Slenderness => 1,
            EquationCategory::Compression => 2,
            EquationCategory::Flexure => 3,
            EquationCategory::Shear => 4,
            EquationCategory::Deflections => 5,
        }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Metadata for one code equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Result symbol (e.g. "Lp", "Fcr")
    pub symbol: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Category for grouping
    pub category: EquationCategory,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All code equations applied by the capacity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Slenderness (Chapter B, E2)
    // -------------------------------------------------------------------------
    /// λf = bf/(2tf)
    FlangeSlenderness,
    /// λw = h/tw
    WebSlenderness,
    /// KL/r about one axis
    MemberSlenderness,

    // -------------------------------------------------------------------------
    // Compression (Chapter E)
    // -------------------------------------------------------------------------
    /// 4.71·√(E/Fy)
    BucklingLimit,
    /// Fe = π²E/(KL/r)²
    EulerStress,
    /// Fcr = 0.658^(Fy/Fe)·Fy
    InelasticBucklingStress,
    /// Fcr = 0.877·Fe
    ElasticBucklingStress,
    /// φPn = φc·Fcr·Ag
    AvailableCompressiveStrength,

    // -------------------------------------------------------------------------
    // Flexure (Sections F2, F3)
    // -------------------------------------------------------------------------
    /// rts = √(√(Iy·Cw)/Sx)
    EffectiveRadiusOfGyration,
    /// ho = d − tf
    FlangeCentroidDistance,
    /// c = (ho/2)·√(Iy/Cw)
    TorsionFactor,
    /// Lp = 1.76·ry·√(E/Fy)
    PlasticLimitLength,
    /// Lr (F2-6)
    InelasticLimitLength,
    /// Mp = Fy·Zx
    PlasticMoment,
    /// Mn = Cb[Mp − (Mp − 0.7FySx)(Lb − Lp)/(Lr − Lp)]
    InelasticLtbMoment,
    /// Mn = Fcr·Sx
    ElasticLtbMoment,
    /// Mn for a noncompact flange
    NoncompactMoment,
    /// Mn = 0.9E·kc·Sx/λ²
    SlenderMoment,
    /// φMn = φb·Mn
    AvailableFlexuralStrength,

    // -------------------------------------------------------------------------
    // Shear (Section G2)
    // -------------------------------------------------------------------------
    /// Aw = d·tw
    WebShearArea,
    /// kv (G2-5)
    ShearBucklingCoefficient,
    /// λr for web shear
    WebShearLimit,
    /// Cv (G2-3/G2-4)
    WebShearCoefficient,
    /// Vn = 0.6·Fy·Aw·Cv
    NominalShear,
    /// φVn = φv·Vn
    AvailableShearStrength,

    // -------------------------------------------------------------------------
    // Serviceability
    // -------------------------------------------------------------------------
    /// δ = 5wL⁴/(384EI)
    UniformLoadMaxDeflection,
    /// L/360, L/240
    DeflectionLimit,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        use EquationCategory as Cat;

        let (name, symbol, formula_plain, reference, category) = match self {
            Equation::FlangeSlenderness => (
                "Flange width-to-thickness ratio",
                "λf",
                "λf = bf / (2·tf)",
                aisc("Table B4.1"),
                Cat::Slenderness,
            ),
            Equation::WebSlenderness => (
                "Web height-to-thickness ratio",
                "λw",
                "λw = h / tw",
                aisc("Table B4.1"),
                Cat::Slenderness,
            ),
            Equation::MemberSlenderness => (
                "Member slenderness",
                "KL/r",
                "KL/r < 200",
                aisc("E2"),
                Cat::Slenderness,
            ),
            Equation::BucklingLimit => (
                "Inelastic/elastic buckling boundary",
                "4.71√(E/Fy)",
                "KL/r = 4.71·√(E/Fy)",
                aisc("E3"),
                Cat::Compression,
            ),
            Equation::EulerStress => (
                "Elastic buckling stress",
                "Fe",
                "Fe = π²E / (KL/r)²",
                aisc("E3-4"),
                Cat::Compression,
            ),
            Equation::InelasticBucklingStress => (
                "Inelastic buckling critical stress",
                "Fcr",
                "Fcr = 0.658^(Fy/Fe)·Fy",
                aisc("E3-2"),
                Cat::Compression,
            ),
            Equation::ElasticBucklingStress => (
                "Elastic buckling critical stress",
                "Fcr",
                "Fcr = 0.877·Fe",
                aisc("E3-3"),
                Cat::Compression,
            ),
            Equation::AvailableCompressiveStrength => (
                "Available compressive strength",
                "φPn",
                "φPn = 0.90·Fcr·Ag",
                aisc("E3-1"),
                Cat::Compression,
            ),
            Equation::EffectiveRadiusOfGyration => (
                "Effective radius of gyration",
                "rts",
                "rts = √(√(Iy·Cw) / Sx)",
                aisc("F2-7"),
                Cat::Flexure,
            ),
            Equation::FlangeCentroidDistance => (
                "Distance between flange centroids",
                "ho",
                "ho = d − tf",
                aisc("F2.2"),
                Cat::Flexure,
            ),
            Equation::TorsionFactor => (
                "Torsion factor",
                "c",
                "c = (ho/2)·√(Iy/Cw)",
                aisc("F2-8b"),
                Cat::Flexure,
            ),
            Equation::PlasticLimitLength => (
                "Limiting unbraced length for yielding",
                "Lp",
                "Lp = 1.76·ry·√(E/Fy)",
                aisc("F2-5"),
                Cat::Flexure,
            ),
            Equation::InelasticLimitLength => (
                "Limiting unbraced length for inelastic LTB",
                "Lr",
                "Lr = 1.95·rts·E/(0.7Fy)·√(Jc/(Sx·ho))·√(1 + √(1 + 6.76(0.7Fy·Sx·ho/(E·J·c))²))",
                aisc("F2-6"),
                Cat::Flexure,
            ),
            Equation::PlasticMoment => (
                "Plastic moment",
                "Mp",
                "Mp = Fy·Zx",
                aisc("F2-1"),
                Cat::Flexure,
            ),
            Equation::InelasticLtbMoment => (
                "Inelastic lateral-torsional buckling moment",
                "Mn",
                "Mn = Cb[Mp − (Mp − 0.7Fy·Sx)(Lb − Lp)/(Lr − Lp)] ≤ Mp",
                aisc("F2-2"),
                Cat::Flexure,
            ),
            Equation::ElasticLtbMoment => (
                "Elastic lateral-torsional buckling moment",
                "Mn",
                "Mn = Cb·π²E/(Lb/rts)²·√(1 + 0.078(Jc/(Sx·ho))(Lb/rts)²)·Sx",
                aisc("F2-3"),
                Cat::Flexure,
            ),
            Equation::NoncompactMoment => (
                "Compression flange local buckling, noncompact",
                "Mn",
                "Mn = Mp − (Mp − 0.7Fy·Sx)(λ − λp)/(λr − λp)",
                aisc("F3-1"),
                Cat::Flexure,
            ),
            Equation::SlenderMoment => (
                "Compression flange local buckling, slender",
                "Mn",
                "Mn = 0.9E·kc·Sx / λ²",
                aisc("F3-2"),
                Cat::Flexure,
            ),
            Equation::AvailableFlexuralStrength => (
                "Available flexural strength",
                "φMn",
                "φMn = 0.90·Mn",
                aisc("F1"),
                Cat::Flexure,
            ),
            Equation::WebShearArea => (
                "Web shear area",
                "Aw",
                "Aw = d·tw",
                aisc("G2.1"),
                Cat::Shear,
            ),
            Equation::ShearBucklingCoefficient => (
                "Web shear buckling coefficient",
                "kv",
                "kv = 5.34 (a/h > 3), else 5 + 5/(a/h)²",
                aisc("G2-5"),
                Cat::Shear,
            ),
            Equation::WebShearLimit => (
                "Web shear slenderness limit",
                "λr",
                "λr = 2.24√(E/Fy) (rolled I), 1.10√(kv·E/Fy) otherwise",
                aisc("G2.1"),
                Cat::Shear,
            ),
            Equation::WebShearCoefficient => (
                "Web shear strength coefficient",
                "Cv",
                "Cv = 1.0 (λw ≤ λr), else 1.10√(kv·E/Fy)/λw",
                aisc("G2-3"),
                Cat::Shear,
            ),
            Equation::NominalShear => (
                "Nominal shear strength",
                "Vn",
                "Vn = 0.6·Fy·Aw·Cv",
                aisc("G2-1"),
                Cat::Shear,
            ),
            Equation::AvailableShearStrength => (
                "Available shear strength",
                "φVn",
                "φVn = φv·Vn",
                aisc("G1"),
                Cat::Shear,
            ),
            Equation::UniformLoadMaxDeflection => (
                "Midspan deflection, uniform load",
                "δ",
                "δ = 5wL⁴ / (384EI)",
                CodeReference::Roarks {
                    edition: 8,
                    table: "Table 8.1",
                    case: "2a",
                },
                Cat::Deflections,
            ),
            Equation::DeflectionLimit => (
                "Deflection limit",
                "δ_allow",
                "δ_allow = L/360 (live), L/240 (dead + live)",
                CodeReference::IBC {
                    year: 2018,
                    section: "Table 1604.3",
                },
                Cat::Deflections,
            ),
        };

        EquationMetadata {
            name,
            symbol,
            formula_plain,
            reference,
            category,
        }
    }
}

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation evaluated during a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Element the value belongs to (e.g. "V1"), optionally with an axis
    pub context: String,
    /// Resulting value
    pub value: f64,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>, value: f64) -> Self {
        Self {
            equation,
            context: context.into(),
            value,
        }
    }
}

/// Receiver of equation usages, handed to evaluators with `with_trace`.
///
/// Evaluators only hold a shared reference, so implementations use interior
/// mutability.
pub trait TraceSink {
    /// Accept one evaluated equation
    fn record(&self, usage: EquationUsage);
}

/// Collector for equation usage during a check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: RefCell<Vec<EquationUsage>>,
}

impl TraceSink for EquationTracker {
    fn record(&self, usage: EquationUsage) {
        self.usages.borrow_mut().push(usage);
    }
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded usages, in evaluation order
    pub fn usages(&self) -> Vec<EquationUsage> {
        self.usages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.usages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.usages.borrow().is_empty()
    }

    /// Most recent value recorded for an equation
    pub fn value_of(&self, equation: Equation) -> Option<f64> {
        self.usages
            .borrow()
            .iter()
            .rev()
            .find(|u| u.equation == equation)
            .map(|u| u.value)
    }

    /// Get unique equations used (deduplicated, first-use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .borrow()
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, in report order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&self, other: EquationTracker) {
        self.usages.borrow_mut().extend(other.usages.into_inner());
    }

    /// Render the calculation trail as a markdown table
    pub fn generate_markdown(&self) -> String {
        let mut out = String::from("| Element | Symbol | Equation | Value | Reference |\n");
        out.push_str("|---|---|---|---|---|\n");
        for usage in self.usages.borrow().iter() {
            let meta = usage.equation.metadata();
            out.push_str(&format!(
                "| {} | {} | {} | {:.4} | {} |\n",
                usage.context,
                meta.symbol,
                meta.formula_plain,
                usage.value,
                meta.reference.citation()
            ));
        }
        out
    }
}
