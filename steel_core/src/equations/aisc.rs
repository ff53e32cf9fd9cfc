//! # AISC 360 Member Strength Formulas
//!
//! Closed-form equations from AISC 360-16 Chapters B, E, F and G (LRFD).
//! Every function is pure and unit-agnostic; callers pass consistent units
//! (the AISC tables use kip, inch, ksi).
//!
//! ## Notation
//!
//! - `E` = Modulus of elasticity
//! - `Fy` = Specified minimum yield stress
//! - `KL/r` = Member slenderness
//! - `Fe` = Elastic (Euler) buckling stress
//! - `Fcr` = Critical stress
//! - `Lb`, `Lp`, `Lr` = Unbraced length and its limiting values
//! - `Mp`, `Mn` = Plastic and nominal moment
//! - `Cb` = Lateral-torsional buckling modification factor
//! - `kv`, `Cv` = Web shear buckling coefficient and web shear strength coefficient
//!
//! ## References
//!
//! - AISC 360-16 Table B4.1a / B4.1b: width-to-thickness limits
//! - AISC 360-16 Section E3: flexural buckling
//! - AISC 360-16 Sections F2, F3: doubly symmetric I-shapes in flexure
//! - AISC 360-16 Section G2: shear strength of webs

use std::f64::consts::PI;

// =============================================================================
// RESISTANCE FACTORS AND LIMITS
// =============================================================================

/// φc for compression (E1)
pub const PHI_COMPRESSION: f64 = 0.90;

/// φb for flexure (F1)
pub const PHI_FLEXURE: f64 = 0.90;

/// φv for rolled I-shapes meeting the G2.1(a) web limit
pub const PHI_SHEAR_ROLLED_I: f64 = 1.00;

/// φv for all other webs (G1)
pub const PHI_SHEAR: f64 = 0.90;

/// Recommended ceiling on KL/r for compression members (E2 user note)
pub const GLOBAL_SLENDERNESS_LIMIT: f64 = 200.0;

/// Unstiffened web shear buckling coefficient (G2.1(b)(2))
pub const KV_UNSTIFFENED: f64 = 5.34;

/// Stiffener spacing ratio a/h above which a web counts as unstiffened
pub const MAX_STIFFENED_PANEL_RATIO: f64 = 3.0;

// =============================================================================
// WIDTH-TO-THICKNESS LIMITS (Table B4.1)
// =============================================================================

/// Multipliers on √(E/Fy) for each width-to-thickness limit.
pub mod limits {
    /// λp, flange of rolled I-shape in flexure (Table B4.1b case 10)
    pub const FLANGE_COMPACT_FLEXURE: f64 = 0.38;
    /// λr, flange of rolled I-shape in flexure (Table B4.1b case 10)
    pub const FLANGE_NONCOMPACT_FLEXURE: f64 = 1.0;
    /// λp, web of doubly symmetric I-shape in flexure (Table B4.1b case 15)
    pub const WEB_COMPACT_FLEXURE: f64 = 3.76;
    /// λr, web of doubly symmetric I-shape in flexure (Table B4.1b case 15)
    pub const WEB_NONCOMPACT_FLEXURE: f64 = 5.70;
    /// λr, flange of rolled I-shape in compression (Table B4.1a case 1)
    pub const FLANGE_SLENDER_COMPRESSION: f64 = 0.56;
    /// λr, web of doubly symmetric I-shape in compression (Table B4.1a case 5)
    pub const WEB_SLENDER_COMPRESSION: f64 = 1.49;
}

/// √(E/Fy)
#[inline]
pub fn sqrt_e_over_fy(e: f64, fy: f64) -> f64 {
    (e / fy).sqrt()
}

/// Flange width-to-thickness ratio λf = bf / (2·tf)
#[inline]
pub fn flange_ratio(bf: f64, tf: f64) -> f64 {
    bf / (2.0 * tf)
}

/// Web height-to-thickness ratio λw = h / tw
#[inline]
pub fn web_ratio(h: f64, tw: f64) -> f64 {
    h / tw
}

// =============================================================================
// COMPRESSION (Chapter E)
// =============================================================================

/// Member slenderness K·L/r
#[inline]
pub fn member_slenderness(k: f64, length: f64, r: f64) -> f64 {
    k * length / r
}

/// Boundary between inelastic and elastic flexural buckling.
///
/// # Formula (AISC E3)
/// KL/r = 4.71·√(E/Fy)
///
/// # Example
/// ```rust
/// use steel_core::equations::aisc::buckling_limit;
///
/// let limit = buckling_limit(29_000.0, 36.0);
/// assert!((limit - 133.68).abs() < 0.01);
/// ```
#[inline]
pub fn buckling_limit(e: f64, fy: f64) -> f64 {
    4.71 * sqrt_e_over_fy(e, fy)
}

/// Elastic (Euler) buckling stress.
///
/// # Formula (AISC E3-4)
/// Fe = π²E / (KL/r)²
#[inline]
pub fn euler_stress(e: f64, slenderness: f64) -> f64 {
    PI.powi(2) * e / slenderness.powi(2)
}

/// Inelastic buckling critical stress (AISC E3-2): Fcr = 0.658^(Fy/Fe)·Fy
#[inline]
pub fn inelastic_buckling_stress(fy: f64, fe: f64) -> f64 {
    0.658_f64.powf(fy / fe) * fy
}

/// Elastic buckling critical stress (AISC E3-3): Fcr = 0.877·Fe
#[inline]
pub fn elastic_buckling_stress(fe: f64) -> f64 {
    0.877 * fe
}

/// Flexural buckling critical stress for one axis.
///
/// Picks E3-2 when KL/r ≤ 4.71·√(E/Fy), otherwise E3-3.
///
/// # Example
/// ```rust
/// use steel_core::equations::aisc::critical_buckling_stress;
///
/// // Very stocky member: Fcr approaches Fy
/// let fcr = critical_buckling_stress(29_000.0, 50.0, 1.0);
/// assert!((fcr - 50.0).abs() < 0.01);
/// ```
pub fn critical_buckling_stress(e: f64, fy: f64, slenderness: f64) -> f64 {
    let fe = euler_stress(e, slenderness);
    if slenderness <= buckling_limit(e, fy) {
        inelastic_buckling_stress(fy, fe)
    } else {
        elastic_buckling_stress(fe)
    }
}

// =============================================================================
// FLEXURE: LATERAL-TORSIONAL BUCKLING (Sections F2, F3)
// =============================================================================

/// Limiting laterally unbraced length for the limit state of yielding.
///
/// # Formula (AISC F2-5)
/// Lp = 1.76·ry·√(E/Fy)
#[inline]
pub fn plastic_limit_length(ry: f64, e: f64, fy: f64) -> f64 {
    1.76 * ry * sqrt_e_over_fy(e, fy)
}

/// Effective radius of gyration (AISC F2-7): rts = √(√(Iy·Cw) / Sx)
#[inline]
pub fn effective_radius_of_gyration(iy: f64, cw: f64, sx: f64) -> f64 {
    ((iy * cw).sqrt() / sx).sqrt()
}

/// Torsion factor c (AISC F2-8b): c = (ho/2)·√(Iy/Cw)
#[inline]
pub fn torsion_factor_c(ho: f64, iy: f64, cw: f64) -> f64 {
    (ho / 2.0) * (iy / cw).sqrt()
}

/// Limiting unbraced length for inelastic lateral-torsional buckling.
///
/// # Formula (AISC F2-6)
/// ```text
/// Lr = 1.95·rts·E/(0.7·Fy) · √(J·c/(Sx·ho)) · √(1 + √(1 + 6.76·(0.7·Fy·Sx·ho/(E·J·c))²))
/// ```
pub fn inelastic_limit_length(
    rts: f64,
    e: f64,
    fy: f64,
    j: f64,
    c: f64,
    sx: f64,
    ho: f64,
) -> f64 {
    let torsion_term = (j * c / (sx * ho)).sqrt();
    let stress_term = 0.7 * fy * sx * ho / (e * j * c);
    let root = (1.0 + (1.0 + 6.76 * stress_term.powi(2)).sqrt()).sqrt();
    1.95 * rts * e / (0.7 * fy) * torsion_term * root
}

/// Plastic moment (AISC F2-1): Mp = Fy·Zx
#[inline]
pub fn plastic_moment(fy: f64, zx: f64) -> f64 {
    fy * zx
}

/// Moment at the onset of yielding with residual stress: 0.7·Fy·Sx
#[inline]
pub fn residual_yield_moment(fy: f64, sx: f64) -> f64 {
    0.7 * fy * sx
}

/// Inelastic lateral-torsional buckling moment.
///
/// # Formula (AISC F2-2)
/// Mn = Cb·[Mp − (Mp − 0.7·Fy·Sx)·(Lb − Lp)/(Lr − Lp)] ≤ Mp
pub fn inelastic_ltb_moment(
    cb: f64,
    mp: f64,
    fy: f64,
    sx: f64,
    lb: f64,
    lp: f64,
    lr: f64,
) -> f64 {
    let interpolated = mp - (mp - residual_yield_moment(fy, sx)) * ((lb - lp) / (lr - lp));
    (cb * interpolated).min(mp)
}

/// Elastic lateral-torsional buckling moment, Fcr·Sx.
///
/// # Formula (AISC F2-3, F2-4)
/// ```text
/// Fcr = Cb·π²·E/(Lb/rts)² · √(1 + 0.078·(J·c/(Sx·ho))·(Lb/rts)²)
/// Mn  = Fcr·Sx
/// ```
#[allow(clippy::too_many_arguments)]
pub fn elastic_ltb_moment(
    cb: f64,
    e: f64,
    lb: f64,
    rts: f64,
    j: f64,
    c: f64,
    sx: f64,
    ho: f64,
) -> f64 {
    let slenderness_sq = (lb / rts).powi(2);
    let fcr = (cb * PI.powi(2) * e / slenderness_sq)
        * (1.0 + 0.078 * (j * c / (sx * ho)) * slenderness_sq).sqrt();
    fcr * sx
}

/// Compression-flange local buckling, noncompact flange (AISC F3-1).
///
/// Mn = Mp − (Mp − 0.7·Fy·Sx)·(λ − λp)/(λr − λp)
pub fn noncompact_moment(mp: f64, fy: f64, sx: f64, lambda: f64, lambda_p: f64, lambda_r: f64) -> f64 {
    mp - (mp - residual_yield_moment(fy, sx)) * (lambda - lambda_p) / (lambda_r - lambda_p)
}

/// kc = 4/√(h/tw)
#[inline]
pub fn kc_factor(h: f64, tw: f64) -> f64 {
    4.0 / (h / tw).sqrt()
}

/// Compression-flange local buckling, slender flange (AISC F3-2): Mn = 0.9·E·kc·Sx/λ²
#[inline]
pub fn slender_moment(e: f64, kc: f64, sx: f64, lambda: f64) -> f64 {
    0.9 * e * kc * sx / lambda.powi(2)
}

// =============================================================================
// SHEAR (Section G2)
// =============================================================================

/// Web shear area Aw = d·tw
#[inline]
pub fn web_area(d: f64, tw: f64) -> f64 {
    d * tw
}

/// Web shear buckling coefficient.
///
/// # Formula (AISC G2-5)
/// - kv = 5.34 with no stiffeners or a/h > 3
/// - kv = 5 + 5/(a/h)² otherwise
pub fn shear_buckling_coefficient(a: Option<f64>, h: f64) -> f64 {
    match a {
        Some(a) if a / h <= MAX_STIFFENED_PANEL_RATIO => 5.0 + 5.0 / (a / h).powi(2),
        _ => KV_UNSTIFFENED,
    }
}

/// 1.10·√(kv·E/Fy), the G2-3/G2-4 web yielding limit
#[inline]
pub fn shear_yield_limit(kv: f64, e: f64, fy: f64) -> f64 {
    1.10 * (kv * e / fy).sqrt()
}

/// 2.24·√(E/Fy), the G2.1(a) limit for rolled I-shape webs
#[inline]
pub fn rolled_web_shear_limit(e: f64, fy: f64) -> f64 {
    2.24 * sqrt_e_over_fy(e, fy)
}

/// Web shear strength coefficient Cv (G2-3, G2-4).
///
/// 1.0 while λw ≤ λr, otherwise 1.10·√(kv·E/Fy)/λw.
pub fn web_shear_coefficient(lambda_w: f64, lambda_r: f64, kv: f64, e: f64, fy: f64) -> f64 {
    if lambda_w <= lambda_r {
        1.0
    } else {
        shear_yield_limit(kv, e, fy) / lambda_w
    }
}

/// Nominal shear strength (AISC G2-1): Vn = 0.6·Fy·Aw·Cv
#[inline]
pub fn nominal_shear(fy: f64, aw: f64, cv: f64) -> f64 {
    0.6 * fy * aw * cv
}
