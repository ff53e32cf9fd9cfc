//! Steel Section Records (AISC)
//!
//! Geometric properties of rolled steel shapes, keyed the way the AISC Shapes
//! Database names its columns (`a`, `d`, `tw`, `bf`, `zx`, ...).
//!
//! A record only has to carry what the checks applied to it consume: gross
//! area and torsional constant are always required, everything else is
//! optional and validated the first time a check asks for it through
//! [`SteelSection::require`].
//!
//! ## Supported Shape Types
//!
//! - **W, M, S, HP**: wide-flange and I-shaped members
//! - **C, MC**: channels
//! - **WT, MT, ST**: structural tees
//! - **L, 2L**: single and double angles
//! - **HSS**: hollow structural sections
//! - **Pipe**
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::{SectionProperty, SteelSection};
//!
//! let section = SteelSection::new("W10X22", 6.49, 0.239)
//!     .unwrap()
//!     .with(SectionProperty::Zx, 26.0);
//!
//! assert_eq!(section.require(SectionProperty::Zx).unwrap(), 26.0);
//! let err = section.require(SectionProperty::Cw).unwrap_err();
//! assert_eq!(err.missing_parameter_name(), Some("cw"));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcError, CalcResult};

/// Steel shape type, parsed from the designation prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    /// Wide flange beam (W-shape)
    W,
    /// Miscellaneous shape (M-shape)
    M,
    /// American Standard beam (S-shape)
    S,
    /// H-pile (HP-shape)
    HP,
    /// American Standard channel (C-shape)
    C,
    /// Miscellaneous channel (MC-shape)
    MC,
    /// Single angle (L-shape)
    L,
    /// Double angle (2L-shape)
    TwoL,
    /// Structural tee cut from W-shape
    WT,
    /// Structural tee cut from M-shape
    MT,
    /// Structural tee cut from S-shape
    ST,
    /// Hollow structural section (rectangular, square or round)
    Hss,
    /// Pipe (standard, extra strong, double extra strong)
    Pipe,
}

impl ShapeType {
    /// Prefixes in match order: longer prefixes first so "MC" is not read as "M"
    const PREFIXES: [(&'static str, ShapeType); 14] = [
        ("PIPE", ShapeType::Pipe),
        ("HSS", ShapeType::Hss),
        ("2L", ShapeType::TwoL),
        ("HP", ShapeType::HP),
        ("MC", ShapeType::MC),
        ("WT", ShapeType::WT),
        ("MT", ShapeType::MT),
        ("ST", ShapeType::ST),
        ("W", ShapeType::W),
        ("M", ShapeType::M),
        ("S", ShapeType::S),
        ("H", ShapeType::HP),
        ("C", ShapeType::C),
        ("L", ShapeType::L),
    ];

    /// Parse from a full designation such as "W10X22" or "C8x11.5"
    pub fn from_designation(designation: &str) -> Option<Self> {
        let upper = designation.trim().to_uppercase();
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| upper.starts_with(prefix))
            .map(|(_, shape_type)| *shape_type)
    }

    /// Family of formulas this shape type falls under
    pub fn family(&self) -> ShapeFamily {
        match self {
            ShapeType::W | ShapeType::M | ShapeType::S | ShapeType::HP => ShapeFamily::WideFlange,
            ShapeType::C | ShapeType::MC => ShapeFamily::Channel,
            ShapeType::WT | ShapeType::MT | ShapeType::ST => ShapeFamily::Tee,
            ShapeType::L => ShapeFamily::Angle,
            ShapeType::TwoL => ShapeFamily::DoubleAngle,
            ShapeType::Hss => ShapeFamily::Tube,
            ShapeType::Pipe => ShapeFamily::Pipe,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeType::W => "Wide Flange (W)",
            ShapeType::M => "Miscellaneous (M)",
            ShapeType::S => "American Standard (S)",
            ShapeType::HP => "H-Pile (HP)",
            ShapeType::C => "Channel (C)",
            ShapeType::MC => "Miscellaneous Channel (MC)",
            ShapeType::L => "Angle (L)",
            ShapeType::TwoL => "Double Angle (2L)",
            ShapeType::WT => "Tee (WT)",
            ShapeType::MT => "Tee (MT)",
            ShapeType::ST => "Tee (ST)",
            ShapeType::Hss => "Hollow Structural Section (HSS)",
            ShapeType::Pipe => "Pipe",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Closed set of shape families the capacity checks dispatch on.
///
/// Each evaluator matches on this and rejects the families its provisions
/// do not cover with [`CalcError::UnsupportedShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeFamily {
    /// Doubly symmetric I-shapes: W, M, S, HP
    WideFlange,
    /// C and MC channels
    Channel,
    /// WT, MT, ST tees
    Tee,
    /// Single angles
    Angle,
    /// Double angles
    DoubleAngle,
    /// HSS
    Tube,
    /// Pipe
    Pipe,
}

/// Every property a section record may carry.
///
/// `name()` is the lower-case key used by the section-property store and in
/// `MissingParameter` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionProperty {
    /// Gross area A
    A,
    /// Torsional constant J
    J,
    /// Overall depth d
    D,
    /// Distance from outer flange face to web toe of fillet
    K,
    /// Distance from web centerline to flange toe of fillet
    K1,
    /// Strong-axis moment of inertia
    Ix,
    /// Strong-axis elastic section modulus
    Sx,
    /// Strong-axis radius of gyration
    Rx,
    /// Strong-axis plastic section modulus
    Zx,
    /// Weak-axis moment of inertia
    Iy,
    /// Weak-axis elastic section modulus
    Sy,
    /// Weak-axis radius of gyration
    Ry,
    /// Weak-axis plastic section modulus
    Zy,
    /// Warping constant
    Cw,
    /// Web thickness
    Tw,
    /// Flange width
    Bf,
    /// Flange thickness
    Tf,
    /// Distance between web toes of fillets (AISC "T")
    T,
    /// Clear web height h
    H,
    /// Leg / wall width b
    B,
    /// Nominal weight per unit length
    WtFt,
    /// Centroid offset of a channel
    XBar,
    /// Shear-center offset of a channel
    Eo,
    /// Horizontal centroid distance of an angle
    X,
    /// Vertical centroid distance of an angle
    Y,
    /// Minor principal-axis radius of gyration (angles)
    Rz,
    /// Tangent of principal-axis angle (angles)
    TanAlpha,
    /// Polar radius of gyration about the shear center
    RoBar,
    /// Outside diameter (pipe)
    Od,
    /// Inside diameter (pipe)
    Id,
    /// Slender-element reduction factor (double angles)
    Qs,
}

impl SectionProperty {
    /// All properties, in record order
    pub const ALL: [SectionProperty; 31] = [
        SectionProperty::A,
        SectionProperty::J,
        SectionProperty::D,
        SectionProperty::K,
        SectionProperty::K1,
        SectionProperty::Ix,
        SectionProperty::Sx,
        SectionProperty::Rx,
        SectionProperty::Zx,
        SectionProperty::Iy,
        SectionProperty::Sy,
        SectionProperty::Ry,
        SectionProperty::Zy,
        SectionProperty::Cw,
        SectionProperty::Tw,
        SectionProperty::Bf,
        SectionProperty::Tf,
        SectionProperty::T,
        SectionProperty::H,
        SectionProperty::B,
        SectionProperty::WtFt,
        SectionProperty::XBar,
        SectionProperty::Eo,
        SectionProperty::X,
        SectionProperty::Y,
        SectionProperty::Rz,
        SectionProperty::TanAlpha,
        SectionProperty::RoBar,
        SectionProperty::Od,
        SectionProperty::Id,
        SectionProperty::Qs,
    ];

    /// Record key (e.g. "zx", "bf", "tan_a")
    pub fn name(&self) -> &'static str {
        match self {
            SectionProperty::A => "a",
            SectionProperty::J => "j",
            SectionProperty::D => "d",
            SectionProperty::K => "k",
            SectionProperty::K1 => "k1",
            SectionProperty::Ix => "ix",
            SectionProperty::Sx => "sx",
            SectionProperty::Rx => "rx",
            SectionProperty::Zx => "zx",
            SectionProperty::Iy => "iy",
            SectionProperty::Sy => "sy",
            SectionProperty::Ry => "ry",
            SectionProperty::Zy => "zy",
            SectionProperty::Cw => "cw",
            SectionProperty::Tw => "tw",
            SectionProperty::Bf => "bf",
            SectionProperty::Tf => "tf",
            SectionProperty::T => "t",
            SectionProperty::H => "h",
            SectionProperty::B => "b",
            SectionProperty::WtFt => "wt_ft",
            SectionProperty::XBar => "x_bar",
            SectionProperty::Eo => "eo",
            SectionProperty::X => "x",
            SectionProperty::Y => "y",
            SectionProperty::Rz => "rz",
            SectionProperty::TanAlpha => "tan_a",
            SectionProperty::RoBar => "ro_bar",
            SectionProperty::Od => "o_d",
            SectionProperty::Id => "i_d",
            SectionProperty::Qs => "qs",
        }
    }

    /// Parse a record key, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::ALL.iter().copied().find(|p| p.name() == lower)
    }
}

impl std::fmt::Display for SectionProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Property record for one rolled steel section.
///
/// All dimensional values share one consistent unit system chosen by the
/// caller (the AISC tables use inches).
///
/// `rts` and `ho` are derived by the flexure checks, so tabulated values of
/// either are treated as unknown keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SteelSection {
    /// Designation as it appears in the section store (e.g. "W10X22")
    pub shape: String,

    // === Required ===
    /// Gross area
    pub a: f64,
    /// Torsional constant
    pub j: f64,

    // === Dimensions ===
    pub d: Option<f64>,
    pub k: Option<f64>,
    pub k1: Option<f64>,
    pub tw: Option<f64>,
    pub bf: Option<f64>,
    pub tf: Option<f64>,
    pub t: Option<f64>,
    pub h: Option<f64>,
    pub b: Option<f64>,
    pub wt_ft: Option<f64>,

    // === Strong axis (X-X) ===
    pub ix: Option<f64>,
    pub sx: Option<f64>,
    pub rx: Option<f64>,
    pub zx: Option<f64>,

    // === Weak axis (Y-Y) ===
    pub iy: Option<f64>,
    pub sy: Option<f64>,
    pub ry: Option<f64>,
    pub zy: Option<f64>,

    // === Torsion / LTB ===
    pub cw: Option<f64>,
    pub ro_bar: Option<f64>,

    // === Channels ===
    pub x_bar: Option<f64>,
    pub eo: Option<f64>,

    // === Angles ===
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rz: Option<f64>,
    pub tan_a: Option<f64>,
    pub qs: Option<f64>,

    // === Pipes ===
    pub o_d: Option<f64>,
    pub i_d: Option<f64>,
}

impl SteelSection {
    /// Create a section with only its required properties.
    ///
    /// Fails with `UnsupportedShape` if the designation prefix is unknown and
    /// with `InvalidInput` if `a` or `j` is not strictly positive.
    pub fn new(shape: impl Into<String>, a: f64, j: f64) -> CalcResult<Self> {
        let shape = shape.into();
        if ShapeType::from_designation(&shape).is_none() {
            return Err(CalcError::unsupported_shape("section record", shape));
        }
        Ok(SteelSection {
            shape,
            a: ensure_positive("a", a)?,
            j: ensure_positive("j", j)?,
            ..Default::default()
        })
    }

    /// Build a section from a partial record (one row of the section store).
    ///
    /// Keys are matched case-insensitively against [`SectionProperty::name`];
    /// unknown keys are skipped. `None` values stay absent. Present values are
    /// checked for positivity up front.
    pub fn from_record<'k, I>(shape: impl Into<String>, record: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = (&'k str, Option<f64>)>,
    {
        let shape = shape.into();
        let mut a = None;
        let mut j = None;
        let mut optional = Vec::new();

        for (key, value) in record {
            let Some(property) = SectionProperty::from_name(key) else {
                tracing::debug!(shape = %shape, key, "ignoring unknown section property");
                continue;
            };
            let Some(value) = value else { continue };
            let value = ensure_positive(property.name(), value)?;
            match property {
                SectionProperty::A => a = Some(value),
                SectionProperty::J => j = Some(value),
                _ => optional.push((property, value)),
            }
        }

        let a = a.ok_or_else(|| CalcError::missing_parameter("a", &shape))?;
        let j = j.ok_or_else(|| CalcError::missing_parameter("j", &shape))?;

        let section = optional
            .into_iter()
            .fold(SteelSection::new(shape, a, j)?, |s, (p, v)| s.with(p, v));
        Ok(section)
    }

    /// Parse a JSON object record through [`SteelSection::from_record`].
    ///
    /// Missing keys and `null` are absent properties, so a record without
    /// `a` or `j` fails with `MissingParameter` rather than reading zero.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let malformed =
            |reason: String| CalcError::invalid_input("section", json.to_string(), reason);
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| malformed(format!("Malformed record: {}", e)))?;
        let shape = object
            .get("shape")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| malformed("Record has no \"shape\" designation".to_string()))?;

        let mut record = Vec::with_capacity(object.len());
        for (key, value) in object.iter().filter(|(key, _)| key.as_str() != "shape") {
            let value = match value {
                serde_json::Value::Null => None,
                serde_json::Value::Number(n) => n.as_f64(),
                // Non-numeric columns of the shapes database are skipped
                _ if SectionProperty::from_name(key).is_none() => None,
                other => {
                    return Err(CalcError::invalid_input(
                        key.as_str(),
                        other.to_string(),
                        "Must be a number or null",
                    ))
                }
            };
            record.push((key.as_str(), value));
        }
        Self::from_record(shape, record)
    }

    /// Set an optional property (builder pattern).
    ///
    /// Setting `A` or `J` replaces the required value. Positivity of every
    /// property, `A` and `J` included, is checked when it is read through
    /// [`SteelSection::require`] or by [`SteelSection::validate`].
    pub fn with(mut self, property: SectionProperty, value: f64) -> Self {
        match property {
            SectionProperty::A => self.a = value,
            SectionProperty::J => self.j = value,
            _ => {
                if let Some(slot) = self.slot_mut(property) {
                    *slot = Some(value);
                }
            }
        }
        self
    }

    /// Check the designation and every present property
    pub fn validate(&self) -> CalcResult<()> {
        self.shape_type()?;
        for property in SectionProperty::ALL {
            if let Some(value) = self.get(property) {
                ensure_positive(property.name(), value)?;
            }
        }
        Ok(())
    }

    /// Shape type parsed from the designation
    pub fn shape_type(&self) -> CalcResult<ShapeType> {
        ShapeType::from_designation(&self.shape)
            .ok_or_else(|| CalcError::unsupported_shape("section record", &self.shape))
    }

    /// Shape family parsed from the designation
    pub fn family(&self) -> CalcResult<ShapeFamily> {
        self.shape_type().map(|t| t.family())
    }

    /// Raw read of a property; `None` when absent
    pub fn get(&self, property: SectionProperty) -> Option<f64> {
        match property {
            SectionProperty::A => Some(self.a),
            SectionProperty::J => Some(self.j),
            SectionProperty::D => self.d,
            SectionProperty::K => self.k,
            SectionProperty::K1 => self.k1,
            SectionProperty::Ix => self.ix,
            SectionProperty::Sx => self.sx,
            SectionProperty::Rx => self.rx,
            SectionProperty::Zx => self.zx,
            SectionProperty::Iy => self.iy,
            SectionProperty::Sy => self.sy,
            SectionProperty::Ry => self.ry,
            SectionProperty::Zy => self.zy,
            SectionProperty::Cw => self.cw,
            SectionProperty::Tw => self.tw,
            SectionProperty::Bf => self.bf,
            SectionProperty::Tf => self.tf,
            SectionProperty::T => self.t,
            SectionProperty::H => self.h,
            SectionProperty::B => self.b,
            SectionProperty::WtFt => self.wt_ft,
            SectionProperty::XBar => self.x_bar,
            SectionProperty::Eo => self.eo,
            SectionProperty::X => self.x,
            SectionProperty::Y => self.y,
            SectionProperty::Rz => self.rz,
            SectionProperty::TanAlpha => self.tan_a,
            SectionProperty::RoBar => self.ro_bar,
            SectionProperty::Od => self.o_d,
            SectionProperty::Id => self.i_d,
            SectionProperty::Qs => self.qs,
        }
    }

    /// Validated read: the one place presence and positivity are enforced.
    ///
    /// Absent → `MissingParameter` naming the property and this shape;
    /// present but zero/negative/non-finite → `InvalidInput`.
    pub fn require(&self, property: SectionProperty) -> CalcResult<f64> {
        match self.get(property) {
            Some(value) => ensure_positive(property.name(), value),
            None => {
                tracing::error!(shape = %self.shape, parameter = property.name(), "missing section property");
                Err(CalcError::missing_parameter(property.name(), &self.shape))
            }
        }
    }

    /// Clear web height h
    pub fn web_height(&self) -> CalcResult<f64> {
        self.require(SectionProperty::H)
    }

    fn slot_mut(&mut self, property: SectionProperty) -> Option<&mut Option<f64>> {
        let slot = match property {
            SectionProperty::A | SectionProperty::J => return None,
            SectionProperty::D => &mut self.d,
            SectionProperty::K => &mut self.k,
            SectionProperty::K1 => &mut self.k1,
            SectionProperty::Ix => &mut self.ix,
            SectionProperty::Sx => &mut self.sx,
            SectionProperty::Rx => &mut self.rx,
            SectionProperty::Zx => &mut self.zx,
            SectionProperty::Iy => &mut self.iy,
            SectionProperty::Sy => &mut self.sy,
            SectionProperty::Ry => &mut self.ry,
            SectionProperty::Zy => &mut self.zy,
            SectionProperty::Cw => &mut self.cw,
            SectionProperty::Tw => &mut self.tw,
            SectionProperty::Bf => &mut self.bf,
            SectionProperty::Tf => &mut self.tf,
            SectionProperty::T => &mut self.t,
            SectionProperty::H => &mut self.h,
            SectionProperty::B => &mut self.b,
            SectionProperty::WtFt => &mut self.wt_ft,
            SectionProperty::XBar => &mut self.x_bar,
            SectionProperty::Eo => &mut self.eo,
            SectionProperty::X => &mut self.x,
            SectionProperty::Y => &mut self.y,
            SectionProperty::Rz => &mut self.rz,
            SectionProperty::TanAlpha => &mut self.tan_a,
            SectionProperty::RoBar => &mut self.ro_bar,
            SectionProperty::Od => &mut self.o_d,
            SectionProperty::Id => &mut self.i_d,
            SectionProperty::Qs => &mut self.qs,
        };
        Some(slot)
    }
}

impl std::fmt::Display for SteelSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (A={:.3}, J={:.3})", self.shape, self.a, self.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_type_parsing() {
        assert_eq!(ShapeType::from_designation("W10X22"), Some(ShapeType::W));
        assert_eq!(ShapeType::from_designation("w10x19"), Some(ShapeType::W));
        assert_eq!(ShapeType::from_designation("MC8X8.5"), Some(ShapeType::MC));
        assert_eq!(ShapeType::from_designation("M12X10"), Some(ShapeType::M));
        assert_eq!(ShapeType::from_designation("WT5X11"), Some(ShapeType::WT));
        assert_eq!(ShapeType::from_designation("2L4X4X1/2"), Some(ShapeType::TwoL));
        assert_eq!(ShapeType::from_designation("HSS6X6X1/4"), Some(ShapeType::Hss));
        assert_eq!(ShapeType::from_designation("HP10X42"), Some(ShapeType::HP));
        assert_eq!(ShapeType::from_designation("Pipe4STD"), Some(ShapeType::Pipe));
        assert_eq!(ShapeType::from_designation("ZZ9"), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(ShapeType::S.family(), ShapeFamily::WideFlange);
        assert_eq!(ShapeType::MC.family(), ShapeFamily::Channel);
        assert_eq!(ShapeType::ST.family(), ShapeFamily::Tee);
        assert_eq!(ShapeType::TwoL.family(), ShapeFamily::DoubleAngle);
    }

    #[test]
    fn test_property_names_roundtrip() {
        for property in SectionProperty::ALL {
            assert_eq!(SectionProperty::from_name(property.name()), Some(property));
        }
        assert_eq!(SectionProperty::from_name("ZX"), Some(SectionProperty::Zx));
        assert_eq!(SectionProperty::from_name("nope"), None);
    }

    #[test]
    fn test_require_missing_names_property_and_shape() {
        let section = SteelSection::new("W10X22", 6.49, 0.239).unwrap();
        let err = section.require(SectionProperty::Zx).unwrap_err();
        assert_eq!(err, CalcError::missing_parameter("zx", "W10X22"));
    }

    #[test]
    fn test_require_rejects_zero() {
        let section = SteelSection::new("W10X22", 6.49, 0.239)
            .unwrap()
            .with(SectionProperty::Tw, 0.0);
        assert_eq!(section.require(SectionProperty::Tw).unwrap_err().error_code(), "INVALID_INPUT");
        assert!(section.validate().is_err());
    }

    #[test]
    fn test_new_rejects_unknown_prefix() {
        let err = SteelSection::new("XYZ12", 1.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SHAPE");
    }

    #[test]
    fn test_from_record_partial() {
        let record = vec![
            ("a", Some(6.49)),
            ("j", Some(0.239)),
            ("d", Some(10.2)),
            ("zx", None),
            ("edi_std_nomenclature", Some(1.0)),
        ];
        let section = SteelSection::from_record("W10X22", record).unwrap();
        assert_eq!(section.d, Some(10.2));
        assert_eq!(section.zx, None);
        assert_eq!(section.require(SectionProperty::D).unwrap(), 10.2);
    }

    #[test]
    fn test_from_record_missing_area() {
        let err = SteelSection::from_record("W10X22", vec![("j", Some(0.239))]).unwrap_err();
        assert_eq!(err, CalcError::missing_parameter("a", "W10X22"));
    }

    #[test]
    fn test_from_record_rejects_negative() {
        let record = vec![("a", Some(6.49)), ("j", Some(0.239)), ("bf", Some(-5.75))];
        let err = SteelSection::from_record("W10X22", record).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{ "shape": "W10X22", "a": 6.49, "j": 0.239, "zx": 26.0, "cw": null }"#;
        let section = SteelSection::from_json(json).unwrap();
        assert_eq!(section.zx, Some(26.0));
        assert_eq!(section.cw, None);
        assert_eq!(section.shape_type().unwrap(), ShapeType::W);
    }

    #[test]
    fn test_from_json_missing_required() {
        let err = SteelSection::from_json(r#"{ "shape": "W10X22", "j": 0.239 }"#).unwrap_err();
        assert_eq!(err, CalcError::missing_parameter("a", "W10X22"));

        let err = SteelSection::from_json(r#"{ "shape": "W10X22", "a": 6.49, "j": null }"#)
            .unwrap_err();
        assert_eq!(err, CalcError::missing_parameter("j", "W10X22"));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let zero = SteelSection::from_json(r#"{ "shape": "W10X22", "a": 0, "j": 0.239 }"#);
        assert_eq!(zero.unwrap_err().error_code(), "INVALID_INPUT");

        let text = SteelSection::from_json(r#"{ "shape": "W10X22", "a": "big", "j": 0.239 }"#);
        assert_eq!(text.unwrap_err().error_code(), "INVALID_INPUT");

        let no_shape = SteelSection::from_json(r#"{ "a": 6.49, "j": 0.239 }"#);
        assert_eq!(no_shape.unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_from_json_skips_text_columns() {
        let json = r#"{ "shape": "W10X22", "type": "W", "a": 6.49, "j": 0.239, "rts": 1.55 }"#;
        let section = SteelSection::from_json(json).unwrap();
        assert_eq!(section.a, 6.49);
    }

    #[test]
    fn test_required_properties_checked_on_read() {
        let section = SteelSection::new("W10X22", 6.49, 0.239)
            .unwrap()
            .with(SectionProperty::A, 0.0)
            .with(SectionProperty::J, -1.0);
        assert_eq!(section.require(SectionProperty::A).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(section.require(SectionProperty::J).unwrap_err().error_code(), "INVALID_INPUT");
        assert!(section.validate().is_err());
    }

    #[test]
    fn test_web_height() {
        let section = SteelSection::new("W10X22", 6.49, 0.239).unwrap();
        assert_eq!(section.web_height().unwrap_err(), CalcError::missing_parameter("h", "W10X22"));
        assert_eq!(section.with(SectionProperty::H, 8.625).web_height().unwrap(), 8.625);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let section = SteelSection::new("C8X11.5", 3.37, 0.13)
            .unwrap()
            .with(SectionProperty::XBar, 0.571);
        let json = serde_json::to_string(&section).unwrap();
        let parsed: SteelSection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, section);
        assert_eq!(parsed.family().unwrap(), ShapeFamily::Channel);
    }
}
