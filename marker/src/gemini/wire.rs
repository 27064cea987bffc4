//! Request and response bodies for the Gemini `generateContent` endpoint, plus
//! the JSON payloads the model is asked to produce.

use crate::error::MarkerError;
use crate::types::{AiEvaluation, EvaluationItem, PlagiarismCheck, PlagiarismMatch};
use serde::{Deserialize, Serialize};

/// Request body for the Gemini API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    pub fn with_role(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

/// Either a text prompt or an inline file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, base64_data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: base64_data,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    pub fn json(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(schema),
        }
    }
}

/// Response from the Gemini API.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PartResponse {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Result<String, MarkerError> {
        let parts = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default();

        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            return Err(MarkerError::InvalidResponse(
                "response contained no text".into(),
            ));
        }
        Ok(text)
    }
}

/// Removes a surrounding Markdown code fence, if the model added one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Per-question verdict as the model writes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiItemPayload {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub student_answer: String,
    #[serde(default)]
    pub marks_awarded: f64,
    #[serde(default)]
    pub max_marks: f64,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummaryPayload {
    #[serde(default)]
    pub overall_feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct AiEvaluationPayload {
    pub evaluation: Vec<AiItemPayload>,
    pub summary: AiSummaryPayload,
}

impl From<AiEvaluationPayload> for AiEvaluation {
    fn from(payload: AiEvaluationPayload) -> Self {
        AiEvaluation {
            items: payload
                .evaluation
                .into_iter()
                .map(|i| EvaluationItem {
                    question: i.question,
                    student_answer: i.student_answer,
                    marks_awarded: i.marks_awarded,
                    max_marks: i.max_marks,
                    feedback: i.feedback,
                })
                .collect(),
            overall_feedback: payload.summary.overall_feedback,
        }
    }
}

pub fn parse_evaluation(text: &str) -> Result<AiEvaluation, MarkerError> {
    serde_json::from_str::<AiEvaluationPayload>(strip_code_fence(text))
        .map(AiEvaluation::from)
        .map_err(|e| {
            MarkerError::InvalidResponse(format!("evaluation JSON did not match schema: {e}"))
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMatchPayload {
    #[serde(default)]
    pub student_text: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPlagiarismPayload {
    pub plagiarism_percentage: f64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub matches: Vec<AiMatchPayload>,
}

pub fn parse_plagiarism(text: &str) -> Result<PlagiarismCheck, MarkerError> {
    let payload: AiPlagiarismPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| MarkerError::InvalidResponse(format!("plagiarism JSON did not match schema: {e}")))?;

    Ok(PlagiarismCheck {
        percentage: payload.plagiarism_percentage,
        summary: payload.summary,
        matches: payload
            .matches
            .into_iter()
            .map(|m| PlagiarismMatch {
                student_text: m.student_text,
                source: m.source,
            })
            .collect(),
    })
}
