//! The seam between the grading pipeline and the model that does the reading.

use crate::error::MarkerError;
use crate::types::{AiEvaluation, ChatMessage, Document, EvaluationRequest, PlagiarismCheck};
use async_trait::async_trait;

/// A service that can read documents and grade answer sheets.
///
/// [`crate::gemini::GeminiGrader`] is the production implementation; tests plug
/// in canned implementations.
#[async_trait]
pub trait Grader: Send + Sync {
    /// Extracts all text from a printed or handwritten document.
    async fn extract_text(&self, document: &Document) -> Result<String, MarkerError>;

    /// Grades the answer text question by question against the question paper.
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<AiEvaluation, MarkerError>;

    /// Estimates how much of the text resembles outside sources.
    async fn check_plagiarism(&self, text: &str) -> Result<PlagiarismCheck, MarkerError>;

    /// Continues a rules conversation and returns the model's reply.
    async fn chat_rules(&self, history: &[ChatMessage]) -> Result<String, MarkerError>;
}
