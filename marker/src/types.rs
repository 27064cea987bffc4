//! # Types Module
//!
//! Core data structures shared by the grading pipeline, the persistence layer and
//! the HTTP surface. Everything here serialises with `snake_case` field names; the
//! model-facing wire types live in [`crate::gemini::wire`] instead.

use crate::grade::Grade;
use serde::{Deserialize, Serialize};

/// One question of a graded answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationItem {
    /// The question being evaluated, as the model read it from the question paper.
    pub question: String,
    /// Short summary of what the student wrote for this question.
    pub student_answer: String,
    /// Marks awarded; always within `[0, max_marks]` once reconciled.
    pub marks_awarded: f64,
    /// Maximum marks available for the question.
    pub max_marks: f64,
    /// Constructive feedback for this answer.
    pub feedback: String,
}

/// Totals and grade for a whole answer sheet.
///
/// The numeric fields and the grade are derived from the evaluation items and are
/// never edited directly; see [`crate::reconcile::recompute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total_marks_awarded: f64,
    pub total_max_marks: f64,
    pub final_grade: Grade,
    pub overall_feedback: String,
}

/// Outcome of the plagiarism check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlagiarismStatus {
    #[serde(rename = "Clear")]
    Clear,
    #[serde(rename = "Plagiarism Detected")]
    Detected,
}

impl std::fmt::Display for PlagiarismStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlagiarismStatus::Clear => write!(f, "Clear"),
            PlagiarismStatus::Detected => write!(f, "Plagiarism Detected"),
        }
    }
}

/// A passage of the student's text that resembles an outside source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismMatch {
    pub student_text: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismReport {
    pub status: PlagiarismStatus,
    pub summary: String,
    #[serde(default)]
    pub matches: Vec<PlagiarismMatch>,
    pub plagiarism_percentage: f64,
}

/// A complete graded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Teacher-supplied unique identifier; the record key.
    pub submission_id: String,
    pub student_name: String,
    pub roll_no: String,
    pub subject: String,
    /// RFC 3339 timestamp (UTC) of when the sheet was evaluated.
    pub submission_date: String,
    /// Text extracted from the answer sheet.
    pub extracted_text: String,
    pub plagiarism_report: PlagiarismReport,
    pub evaluation: Vec<EvaluationItem>,
    pub summary: EvaluationSummary,
}

/// Everything the grader needs to evaluate one answer sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    pub submission_id: String,
    pub student_name: String,
    pub roll_no: String,
    pub subject: String,
    pub question_text: String,
    pub answer_text: String,
    /// Marking scheme agreed with the teacher; empty means general academic standards.
    pub custom_rules: String,
}

/// The model's raw verdict before totals and grade are derived.
#[derive(Debug, Clone, PartialEq)]
pub struct AiEvaluation {
    pub items: Vec<EvaluationItem>,
    pub overall_feedback: String,
}

/// Raw plagiarism verdict from the model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlagiarismCheck {
    pub percentage: f64,
    pub summary: Option<String>,
    pub matches: Vec<PlagiarismMatch>,
}

/// An uploaded document (question paper or answer sheet).
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: "application/pdf".into(),
            bytes,
        }
    }

    /// True when the content carries the `%PDF` signature.
    pub fn looks_like_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF")
    }
}

/// Who said a line in the rules chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Read access to the identity fields used by list filtering and search.
///
/// Implemented for [`EvaluationResult`] and for the persisted report rows so both
/// can be filtered without conversion.
pub trait SubmissionRecord {
    fn submission_id(&self) -> &str;
    fn student_name(&self) -> &str;
    fn roll_no(&self) -> &str;
    fn subject(&self) -> &str;
}

impl SubmissionRecord for EvaluationResult {
    fn submission_id(&self) -> &str {
        &self.submission_id
    }

    fn student_name(&self) -> &str {
        &self.student_name
    }

    fn roll_no(&self) -> &str {
        &self.roll_no
    }

    fn subject(&self) -> &str {
        &self.subject
    }
}
