//! Energy efficiency letter bands.
//!
//! Maps a numeric energy efficiency score to the A–G band used on
//! certificates. The mapping is total: any `f64`, including negative values,
//! values above 100 and NaN, lands in some band, with G as the floor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EpcError;

/// Letter band of an energy efficiency score, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnergyBand {
    /// 92 and above
    A,
    /// 81–91
    B,
    /// 69–80
    C,
    /// 55–68
    D,
    /// 39–54
    E,
    /// 21–38
    F,
    /// 20 and below
    G,
}

impl EnergyBand {
    /// All bands, best first.
    pub const ALL: [EnergyBand; 7] = [
        EnergyBand::A,
        EnergyBand::B,
        EnergyBand::C,
        EnergyBand::D,
        EnergyBand::E,
        EnergyBand::F,
        EnergyBand::G,
    ];

    /// Inclusive lower bound of the band, or `None` for the catch-all G.
    pub fn lower_bound(self) -> Option<f64> {
        match self {
            EnergyBand::A => Some(92.0),
            EnergyBand::B => Some(81.0),
            EnergyBand::C => Some(69.0),
            EnergyBand::D => Some(55.0),
            EnergyBand::E => Some(39.0),
            EnergyBand::F => Some(21.0),
            EnergyBand::G => None,
        }
    }

    /// Single-letter form of the band.
    pub fn as_char(self) -> char {
        match self {
            EnergyBand::A => 'A',
            EnergyBand::B => 'B',
            EnergyBand::C => 'C',
            EnergyBand::D => 'D',
            EnergyBand::E => 'E',
            EnergyBand::F => 'F',
            EnergyBand::G => 'G',
        }
    }
}

/// Maps a score to its band.
pub fn grade_for(score: f64) -> EnergyBand {
    EnergyBand::ALL
        .into_iter()
        .find(|band| band.lower_bound().is_none_or(|bound| score >= bound))
        .unwrap_or(EnergyBand::G)
}

impl fmt::Display for EnergyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for EnergyBand {
    type Err = EpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(EnergyBand::A),
            "B" => Ok(EnergyBand::B),
            "C" => Ok(EnergyBand::C),
            "D" => Ok(EnergyBand::D),
            "E" => Ok(EnergyBand::E),
            "F" => Ok(EnergyBand::F),
            "G" => Ok(EnergyBand::G),
            other => Err(EpcError::config(format!("unknown energy band '{other}'"))),
        }
    }
}
