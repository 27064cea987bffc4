//! Reconciliation of teacher edits with the derived summary.
//!
//! Invariant: after any function here returns `Ok`, every item's mark lies in
//! `[0, max_marks]` and `summary.total_marks_awarded` equals the sum of the item
//! marks, with the grade derived from that total.

use crate::error::MarkerError;
use crate::scorer::{clamp_marks, sanitise_item, summarise};
use crate::types::EvaluationResult;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A teacher's change to one question, addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemEdit {
    pub index: usize,
    /// Anything that is not a number (or a numeric string) counts as 0.
    #[serde(default, deserialize_with = "lenient_marks")]
    pub marks_awarded: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub student_answer: Option<String>,
}

fn lenient_marks<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let marks = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(_) => 0.0,
    };
    Ok(Some(marks))
}

/// A batch of edits to one stored evaluation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EvaluationEdit {
    #[serde(default)]
    pub items: Vec<ItemEdit>,
    #[serde(default)]
    pub overall_feedback: Option<String>,
}

/// Re-clamps every item and re-derives the summary from the items.
///
/// The overall feedback is the only summary field carried over.
pub fn recompute(result: &mut EvaluationResult) {
    let items = std::mem::take(&mut result.evaluation);
    result.evaluation = items.into_iter().map(sanitise_item).collect();
    let feedback = std::mem::take(&mut result.summary.overall_feedback);
    result.summary = summarise(&result.evaluation, feedback);
}

/// Applies a batch of edits, then recomputes.
///
/// The batch is validated before anything changes: one out-of-range index rejects
/// the whole batch and leaves `result` untouched.
pub fn apply_edits(result: &mut EvaluationResult, edit: &EvaluationEdit) -> Result<(), MarkerError> {
    let count = result.evaluation.len();
    if let Some(bad) = edit.items.iter().find(|e| e.index >= count) {
        return Err(MarkerError::InvalidEdit(format!(
            "question index {} is out of range (sheet has {} questions)",
            bad.index, count
        )));
    }

    for change in &edit.items {
        let item = &mut result.evaluation[change.index];
        if let Some(marks) = change.marks_awarded {
            item.marks_awarded = clamp_marks(marks, item.max_marks);
        }
        if let Some(feedback) = &change.feedback {
            item.feedback = feedback.clone();
        }
        if let Some(answer) = &change.student_answer {
            item.student_answer = answer.clone();
        }
    }
    if let Some(feedback) = &edit.overall_feedback {
        result.summary.overall_feedback = feedback.clone();
    }

    recompute(result);
    Ok(())
}

/// True when the stored summary matches what the items imply.
pub fn is_consistent(result: &EvaluationResult) -> bool {
    let expected = summarise(&result.evaluation, result.summary.overall_feedback.clone());
    result.evaluation.iter().all(|i| {
        i.marks_awarded >= 0.0 && i.marks_awarded <= i.max_marks
    }) && expected == result.summary
}
