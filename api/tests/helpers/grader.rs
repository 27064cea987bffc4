use async_trait::async_trait;
use marker::error::MarkerError;
use marker::traits::grader::Grader;
use marker::types::{
    AiEvaluation, ChatMessage, Document, EvaluationItem, EvaluationRequest, PlagiarismCheck,
    PlagiarismMatch,
};

/// Canned grader so route tests never reach the network.
#[derive(Debug, Clone)]
pub struct StubGrader {
    pub fail: bool,
    pub plagiarism_percentage: f64,
}

impl Default for StubGrader {
    fn default() -> Self {
        Self {
            fail: false,
            plagiarism_percentage: 2.0,
        }
    }
}

impl StubGrader {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), MarkerError> {
        if self.fail {
            Err(MarkerError::Api {
                status: 503,
                body: "model overloaded".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Grader for StubGrader {
    async fn extract_text(&self, document: &Document) -> Result<String, MarkerError> {
        self.check()?;
        Ok(format!("Text of {}: Force equals mass times acceleration.", document.file_name))
    }

    async fn evaluate(&self, _request: &EvaluationRequest) -> Result<AiEvaluation, MarkerError> {
        self.check()?;
        Ok(AiEvaluation {
            items: vec![
                EvaluationItem {
                    question: "Q1. State Newton's second law.".into(),
                    student_answer: "F = ma".into(),
                    marks_awarded: 9.0,
                    max_marks: 10.0,
                    feedback: "Correct, add units.".into(),
                },
                EvaluationItem {
                    question: "Q2. Define inertia.".into(),
                    student_answer: "Resistance to change".into(),
                    marks_awarded: 12.0,
                    max_marks: 10.0,
                    feedback: "Complete.".into(),
                },
            ],
            overall_feedback: "Strong understanding.".into(),
        })
    }

    async fn check_plagiarism(&self, _text: &str) -> Result<PlagiarismCheck, MarkerError> {
        self.check()?;
        Ok(PlagiarismCheck {
            percentage: self.plagiarism_percentage,
            summary: None,
            matches: vec![PlagiarismMatch {
                student_text: "mass times acceleration".into(),
                source: "Physics textbook".into(),
            }],
        })
    }

    async fn chat_rules(&self, history: &[ChatMessage]) -> Result<String, MarkerError> {
        self.check()?;
        let last = history.last().map(|m| m.text.as_str()).unwrap_or_default();
        Ok(format!("1. {last}"))
    }
}
