//! # Grade Bands
//!
//! Maps a mark total onto a letter grade using fixed descending percentage
//! thresholds. A sheet with no available marks has no meaningful percentage and
//! gets the `N/A` sentinel instead of a letter.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// Lower bound (inclusive, in percent) for each letter, highest first.
const BANDS: [(f64, Grade); 7] = [
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::BPlus),
    (60.0, Grade::B),
    (50.0, Grade::CPlus),
    (40.0, Grade::C),
    (30.0, Grade::D),
];

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NotApplicable => "N/A",
        }
    }

    /// Letter for a percentage in `0..=100`.
    pub fn from_percentage(percentage: f64) -> Self {
        BANDS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "N/A" => Ok(Grade::NotApplicable),
            other => Err(format!("unknown grade '{other}'")),
        }
    }
}

/// Helper to compute percentage safely.
pub fn percentage(awarded: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (awarded * 100.0) / max
    }
}

/// Derives the letter grade for a mark total.
///
/// Returns [`Grade::NotApplicable`] when `total_max_marks` is zero.
pub fn calculate_grade(total_marks_awarded: f64, total_max_marks: f64) -> Grade {
    if total_max_marks == 0.0 {
        return Grade::NotApplicable;
    }
    Grade::from_percentage(percentage(total_marks_awarded, total_max_marks))
}
