//! Load type definitions per E.060
//!
//! The seven service load categories that enter the LRFD combinations.

use serde::{Deserialize, Serialize};

/// Service load categories.
///
/// Each load type has a standard abbreviation used in load combination equations.
///
/// # Example
/// ```
/// use steel_core::loads::LoadType;
///
/// let dead = LoadType::Dead;
/// assert_eq!(dead.code(), "D");
/// assert_eq!(dead.description(), "Dead load");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load (self-weight of structure and permanent attachments)
    Dead,
    /// L - Live load (floor live load, occupancy)
    Live,
    /// Lr - Roof live load (maintenance, workers)
    LiveRoof,
    /// W - Wind load
    Wind,
    /// S - Snow load
    Snow,
    /// E - Seismic (earthquake) load
    Seismic,
    /// R - Rain load
    Rain,
}

impl LoadType {
    /// All load types in component order (D, L, Lr, W, S, E, R)
    pub const ALL: [LoadType; 7] = [
        LoadType::Dead,
        LoadType::Live,
        LoadType::LiveRoof,
        LoadType::Wind,
        LoadType::Snow,
        LoadType::Seismic,
        LoadType::Rain,
    ];

    /// Roof loads that alternate in combinations 2, 3 and 4
    pub const ROOF: [LoadType; 3] = [LoadType::LiveRoof, LoadType::Snow, LoadType::Rain];

    /// Standard abbreviation code (D, L, Lr, W, S, E, R)
    ///
    /// # Example
    /// ```
    /// use steel_core::loads::LoadType;
    /// assert_eq!(LoadType::LiveRoof.code(), "Lr");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::LiveRoof => "Lr",
            LoadType::Wind => "W",
            LoadType::Snow => "S",
            LoadType::Seismic => "E",
            LoadType::Rain => "R",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::Live => "Live load",
            LoadType::LiveRoof => "Roof live load",
            LoadType::Wind => "Wind load",
            LoadType::Snow => "Snow load",
            LoadType::Seismic => "Seismic load",
            LoadType::Rain => "Rain load",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
