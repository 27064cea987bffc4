//! Plagiarism report assembly and match highlighting.

use crate::types::{PlagiarismCheck, PlagiarismMatch, PlagiarismReport, PlagiarismStatus};
use serde::Serialize;

/// Similarity above this percentage flags the sheet for review.
pub const PLAGIARISM_THRESHOLD_PERCENT: f64 = 5.0;

pub fn status_for(percentage: f64) -> PlagiarismStatus {
    if percentage > PLAGIARISM_THRESHOLD_PERCENT {
        PlagiarismStatus::Detected
    } else {
        PlagiarismStatus::Clear
    }
}

fn default_summary(percentage: f64) -> String {
    if percentage > PLAGIARISM_THRESHOLD_PERCENT {
        format!(
            "A low to moderate similarity score of {percentage}% was detected. Manual review is recommended."
        )
    } else {
        format!("No significant plagiarism detected ({percentage}% similarity).")
    }
}

/// Builds the stored report from the model's raw verdict.
///
/// The percentage is clamped to `0..=100`; a blank summary is replaced by a
/// standard sentence matching the status.
pub fn report_from_check(check: PlagiarismCheck) -> PlagiarismReport {
    let percentage = if check.percentage.is_nan() {
        0.0
    } else {
        check.percentage.clamp(0.0, 100.0)
    };
    let summary = check
        .summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_summary(percentage));
    let matches = check
        .matches
        .into_iter()
        .filter(|m| !m.student_text.trim().is_empty())
        .collect();

    PlagiarismReport {
        status: status_for(percentage),
        summary,
        matches,
        plagiarism_percentage: percentage,
    }
}

/// A run of extracted text, optionally attributed to a possible source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSegment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Splits `text` into plain and matched segments.
///
/// Each match is located at its first occurrence. Matches that overlap an
/// earlier one are dropped, as are matches that do not occur at all.
pub fn highlight(text: &str, matches: &[PlagiarismMatch]) -> Vec<TextSegment> {
    let mut spans: Vec<(usize, usize, &str)> = matches
        .iter()
        .filter(|m| !m.student_text.is_empty())
        .filter_map(|m| {
            text.find(&m.student_text)
                .map(|start| (start, start + m.student_text.len(), m.source.as_str()))
        })
        .collect();
    spans.sort_by_key(|(start, _, _)| *start);

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end, source) in spans {
        if start < cursor {
            continue;
        }
        if start > cursor {
            segments.push(TextSegment {
                text: text[cursor..start].to_string(),
                source: None,
            });
        }
        segments.push(TextSegment {
            text: text[start..end].to_string(),
            source: Some(source.to_string()),
        });
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(TextSegment {
            text: text[cursor..].to_string(),
            source: None,
        });
    }
    segments
}
