//! # Scorer Module
//!
//! Turns the model's per-question verdict into a complete [`EvaluationResult`]:
//! marks are clamped into range, totals are summed and the letter grade derived.

use crate::grade::calculate_grade;
use crate::plagiarism;
use crate::types::{
    AiEvaluation, EvaluationItem, EvaluationRequest, EvaluationResult, EvaluationSummary,
    PlagiarismCheck,
};
use chrono::{DateTime, SecondsFormat, Utc};

/// Clamps a mark into `[0, max_marks]`.
///
/// A non-numeric mark counts as zero and a negative maximum is treated as zero.
pub fn clamp_marks(marks: f64, max_marks: f64) -> f64 {
    let max = if max_marks.is_finite() {
        max_marks.max(0.0)
    } else {
        0.0
    };
    if marks.is_nan() {
        return 0.0;
    }
    marks.clamp(0.0, max)
}

/// Normalises one item so it satisfies the mark invariants.
pub fn sanitise_item(mut item: EvaluationItem) -> EvaluationItem {
    if !item.max_marks.is_finite() || item.max_marks < 0.0 {
        item.max_marks = 0.0;
    }
    item.marks_awarded = clamp_marks(item.marks_awarded, item.max_marks);
    item
}

/// Sums the items and derives the grade.
pub fn summarise(items: &[EvaluationItem], overall_feedback: impl Into<String>) -> EvaluationSummary {
    let total_marks_awarded: f64 = items.iter().map(|i| i.marks_awarded).sum();
    let total_max_marks: f64 = items.iter().map(|i| i.max_marks).sum();

    EvaluationSummary {
        total_marks_awarded,
        total_max_marks,
        final_grade: calculate_grade(total_marks_awarded, total_max_marks),
        overall_feedback: overall_feedback.into(),
    }
}

/// Assembles the final result for a freshly graded sheet.
pub fn assemble(
    request: &EvaluationRequest,
    ai: AiEvaluation,
    plagiarism: PlagiarismCheck,
    evaluated_at: DateTime<Utc>,
) -> EvaluationResult {
    let evaluation: Vec<EvaluationItem> = ai.items.into_iter().map(sanitise_item).collect();
    let summary = summarise(&evaluation, ai.overall_feedback);

    tracing::debug!(
        submission_id = %request.submission_id,
        questions = evaluation.len(),
        total = summary.total_marks_awarded,
        max = summary.total_max_marks,
        grade = %summary.final_grade,
        "Assembled evaluation"
    );

    EvaluationResult {
        submission_id: request.submission_id.clone(),
        student_name: request.student_name.clone(),
        roll_no: request.roll_no.clone(),
        subject: request.subject.clone(),
        submission_date: evaluated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        extracted_text: request.answer_text.clone(),
        plagiarism_report: plagiarism::report_from_check(plagiarism),
        evaluation,
        summary,
    }
}
