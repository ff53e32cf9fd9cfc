//! E.060 LRFD Load Combinations
//!
//! Factor tables for the Peruvian E.060 strength combinations and their
//! application to one set of service load effects.
//!
//! ## Accompanying Live Load
//!
//! Combinations 3, 4 and 5 carry the floor live load as an accompanying
//! load: 0.5L normally, or the full L when `special_case` is set (places of
//! public assembly, garages, live loads above 500 kgf/m²).
//!
//! ## Sign Convention
//!
//! W and E are signed effects. Combinations 5 and 6 include both ±E and ±W
//! variants; combination 4 only adds +1.3W.

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use crate::errors::{CalcError, CalcResult};

/// Factors of one combination, applied in order
///
/// # Example
/// ```
/// use steel_core::loads::{CombinationRule, LoadCombination, LoadType};
///
/// let rule = CombinationRule::new("2-Lr")
///     .with_factor(LoadType::Dead, 1.2)
///     .with_factor(LoadType::Live, 1.6)
///     .with_factor(LoadType::LiveRoof, 0.5);
/// assert_eq!(rule.equation, "1.2D + 1.6L + 0.5Lr");
///
/// let loads = LoadCombination::new(100.0, 50.0, 0.0, 0.0, 0.0, 0.0, 0.0);
/// assert_eq!(rule.apply(&loads), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRule {
    /// Combination tag (e.g. "1", "3-Lr-W", "6-E-")
    pub tag: String,

    /// Human-readable equation for display (e.g. "1.2D + 1.6L + 0.5S")
    pub equation: String,

    /// Load factors in equation order
    pub factors: Vec<(LoadType, f64)>,
}

impl CombinationRule {
    /// Create an empty rule
    pub fn new(tag: impl Into<String>) -> Self {
        CombinationRule {
            tag: tag.into(),
            equation: String::new(),
            factors: Vec::new(),
        }
    }

    /// Append a load factor (builder pattern); the equation follows along
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        let magnitude = factor.abs();
        let term = if magnitude == 1.0 {
            load_type.code().to_string()
        } else {
            format!("{}{}", magnitude, load_type.code())
        };
        self.equation = match (self.equation.is_empty(), factor < 0.0) {
            (true, false) => term,
            (true, true) => format!("-{}", term),
            (false, false) => format!("{} + {}", self.equation, term),
            (false, true) => format!("{} - {}", self.equation, term),
        };
        self.factors.push((load_type, factor));
        self
    }

    /// Factored sum for the given service loads
    pub fn apply(&self, loads: &LoadCombination) -> f64 {
        self.factors
            .iter()
            .map(|(load_type, factor)| factor * loads.get(*load_type))
            .sum()
    }

    /// Get the factor for a specific load type (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors
            .iter()
            .filter(|(lt, _)| *lt == load_type)
            .map(|(_, f)| f)
            .sum()
    }
}

/// Service load effects (one member force) by load type.
///
/// # JSON Format
/// ```json
/// { "d": 100.0, "l": 50.0, "lr": 0.0, "w": 0.0, "s": 0.0, "e": 0.0, "r": 0.0, "special_case": false }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadCombination {
    pub d: f64,
    pub l: f64,
    pub lr: f64,
    pub w: f64,
    pub s: f64,
    pub e: f64,
    pub r: f64,
    /// Use the full live load as accompanying load instead of 0.5L
    pub special_case: bool,
}

impl LoadCombination {
    pub fn new(d: f64, l: f64, lr: f64, w: f64, s: f64, e: f64, r: f64) -> Self {
        LoadCombination {
            d,
            l,
            lr,
            w,
            s,
            e,
            r,
            special_case: false,
        }
    }

    /// Set the accompanying-live-load flag (builder pattern)
    pub fn with_special_case(mut self, special_case: bool) -> Self {
        self.special_case = special_case;
        self
    }

    /// Value of one component
    pub fn get(&self, load_type: LoadType) -> f64 {
        match load_type {
            LoadType::Dead => self.d,
            LoadType::Live => self.l,
            LoadType::LiveRoof => self.lr,
            LoadType::Wind => self.w,
            LoadType::Snow => self.s,
            LoadType::Seismic => self.e,
            LoadType::Rain => self.r,
        }
    }

    /// Reject non-finite components
    pub fn validate(&self) -> CalcResult<()> {
        for load_type in LoadType::ALL {
            let value = self.get(load_type);
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    load_type.code(),
                    value.to_string(),
                    format!("{} must be finite", load_type.description()),
                ));
            }
        }
        Ok(())
    }

    /// Factor on L when it accompanies another variable load
    pub fn accompanying_live_factor(&self) -> f64 {
        if self.special_case {
            1.0
        } else {
            0.5
        }
    }

    /// The 19 E.060 combinations, in tag order
    pub fn rules(&self) -> Vec<CombinationRule> {
        let l_acc = self.accompanying_live_factor();
        let mut rules = Vec::with_capacity(19);

        // 1. 1.4D
        rules.push(CombinationRule::new("1").with_factor(LoadType::Dead, 1.4));

        // 2. 1.2D + 1.6L + 0.5(Lr or S or R)
        for roof in LoadType::ROOF {
            rules.push(
                CombinationRule::new(format!("2-{}", roof.code()))
                    .with_factor(LoadType::Dead, 1.2)
                    .with_factor(LoadType::Live, 1.6)
                    .with_factor(roof, 0.5),
            );
        }

        // 3. 1.2D + 1.6(Lr or S or R) + (L_acc or 0.8W)
        for roof in LoadType::ROOF {
            let base = CombinationRule::new("")
                .with_factor(LoadType::Dead, 1.2)
                .with_factor(roof, 1.6);
            rules.push(CombinationRule {
                tag: format!("3-{}-L", roof.code()),
                ..base.clone().with_factor(LoadType::Live, l_acc)
            });
            rules.push(CombinationRule {
                tag: format!("3-{}-W", roof.code()),
                ..base.with_factor(LoadType::Wind, 0.8)
            });
        }

        // 4. 1.2D + 1.3W + L_acc + 0.5(Lr or S or R)
        for roof in LoadType::ROOF {
            rules.push(
                CombinationRule::new(format!("4-{}", roof.code()))
                    .with_factor(LoadType::Dead, 1.2)
                    .with_factor(LoadType::Wind, 1.3)
                    .with_factor(LoadType::Live, l_acc)
                    .with_factor(roof, 0.5),
            );
        }

        // 5. 1.2D ± 1.0E + L_acc + 0.2S
        for (suffix, sign) in [("+", 1.0), ("-", -1.0)] {
            rules.push(
                CombinationRule::new(format!("5-E{}", suffix))
                    .with_factor(LoadType::Dead, 1.2)
                    .with_factor(LoadType::Seismic, sign)
                    .with_factor(LoadType::Live, l_acc)
                    .with_factor(LoadType::Snow, 0.2),
            );
        }

        // 6. 0.9D ± (1.3W or 1.0E)
        for (load_type, factor) in [(LoadType::Wind, 1.3), (LoadType::Seismic, 1.0)] {
            for (suffix, sign) in [("+", 1.0), ("-", -1.0)] {
                rules.push(
                    CombinationRule::new(format!("6-{}{}", load_type.code(), suffix))
                        .with_factor(LoadType::Dead, 0.9)
                        .with_factor(load_type, sign * factor),
                );
            }
        }

        rules
    }

    /// Apply every rule
    pub fn combinations(&self) -> Combinations {
        Combinations {
            entries: self
                .rules()
                .into_iter()
                .map(|rule| CombinationResult {
                    value: rule.apply(self),
                    tag: rule.tag,
                })
                .collect(),
        }
    }

    /// Combination with the greatest signed value
    pub fn envelope_max(&self) -> (String, f64) {
        let governing = self.combinations().governing();
        (governing.max_tag, governing.max_value)
    }

    /// Combination with the least signed value
    pub fn envelope_min(&self) -> (String, f64) {
        let governing = self.combinations().governing();
        (governing.min_tag, governing.min_value)
    }
}

/// One factored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    pub tag: String,
    pub value: f64,
}

/// Ordered tag → value set produced by [`LoadCombination::combinations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combinations {
    entries: Vec<CombinationResult>,
}

impl Combinations {
    /// Value of a tag, if it exists
    pub fn get(&self, tag: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombinationResult> {
        self.entries.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum and minimum in a single pass; ties keep the earlier tag
    pub fn governing(&self) -> GoverningResults {
        let mut max_value = f64::NEG_INFINITY;
        let mut max_tag = String::new();
        let mut min_value = f64::INFINITY;
        let mut min_tag = String::new();

        for entry in &self.entries {
            if entry.value > max_value {
                max_value = entry.value;
                max_tag = entry.tag.clone();
            }
            if entry.value < min_value {
                min_value = entry.value;
                min_tag = entry.tag.clone();
            }
        }

        tracing::debug!(%max_tag, max_value, %min_tag, min_value, "load envelope");
        GoverningResults {
            max_tag,
            max_value,
            min_tag,
            min_value,
        }
    }
}

/// Results from finding both max and min governing combinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningResults {
    /// Greatest factored value (strength design)
    pub max_value: f64,
    /// Tag of the greatest value
    pub max_tag: String,
    /// Least factored value (uplift, stress reversal)
    pub min_value: f64,
    /// Tag of the least value
    pub min_tag: String,
}
