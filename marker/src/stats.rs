//! Dashboard statistics over a teacher's stored scores.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreStats {
    pub total: usize,
    pub avg_score: f64,
    pub max_score: f64,
    pub min_score: f64,
}

impl ScoreStats {
    /// Count, mean, highest and lowest of `scores`; all zero when empty.
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let sum: f64 = scores.iter().sum();
        let max_score = scores.iter().copied().fold(f64::MIN, f64::max);
        let min_score = scores.iter().copied().fold(f64::MAX, f64::min);

        Self {
            total: scores.len(),
            avg_score: sum / scores.len() as f64,
            max_score,
            min_score,
        }
    }
}
