//! # Marker Library
//!
//! Grading logic for handwritten and printed exam answer sheets.
//!
//! ## Key Concepts
//! - **Grader**: the model-backed service that extracts text, grades answers,
//!   checks similarity and helps draft marking rules ([`traits::grader::Grader`],
//!   implemented by [`gemini::GeminiGrader`]).
//! - **Scorer**: turns a raw model verdict into an [`types::EvaluationResult`] with
//!   clamped marks, summed totals and a letter grade.
//! - **Reconcile**: applies teacher edits and keeps the summary derived from the items.
//! - **Filters** and **Stats**: list search and score statistics for the dashboards.

pub mod error;
pub mod filters;
pub mod gemini;
pub mod grade;
pub mod plagiarism;
pub mod reconcile;
pub mod rules;
pub mod scorer;
pub mod stats;
pub mod traits;
pub mod types;

use crate::error::MarkerError;
use crate::traits::grader::Grader;
use crate::types::{Document, EvaluationRequest, EvaluationResult};
use chrono::Utc;

/// Everything needed to grade one submission.
#[derive(Debug, Clone)]
pub struct EvaluationJob {
    pub submission_id: String,
    pub student_name: String,
    pub roll_no: String,
    pub subject: String,
    pub question_paper: Document,
    pub answer_sheet: Document,
    pub custom_rules: String,
}

impl EvaluationJob {
    /// Runs the full pipeline: extract both documents, check similarity, grade,
    /// then assemble the result.
    ///
    /// The result is not persisted; the caller decides whether to save it.
    pub async fn run(self, grader: &dyn Grader) -> Result<EvaluationResult, MarkerError> {
        for doc in [&self.question_paper, &self.answer_sheet] {
            if !doc.looks_like_pdf() {
                return Err(MarkerError::InvalidDocument(format!(
                    "{} is not a PDF",
                    doc.file_name
                )));
            }
        }

        let (question_text, answer_text) = tokio::try_join!(
            grader.extract_text(&self.question_paper),
            grader.extract_text(&self.answer_sheet),
        )?;

        let plagiarism = grader.check_plagiarism(&answer_text).await?;

        let request = EvaluationRequest {
            submission_id: self.submission_id,
            student_name: self.student_name,
            roll_no: self.roll_no,
            subject: self.subject,
            question_text,
            answer_text,
            custom_rules: self.custom_rules,
        };
        let ai = grader.evaluate(&request).await?;

        Ok(scorer::assemble(&request, ai, plagiarism, Utc::now()))
    }
}
