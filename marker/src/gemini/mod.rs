//! # Gemini Grader
//!
//! [`GeminiGrader`] implements [`Grader`] against Google's Gemini
//! `generateContent` endpoint.
//!
//! - Text extraction sends the PDF inline (base64) to the extraction model.
//! - Grading asks the grading model, and the plagiarism check the extraction model,
//!   for JSON constrained by a response schema, parsed into the marker types.
//! - The rules chat forwards the transcript with a fixed system instruction.
//!
//! Rate limits (429), server errors (5xx) and transport failures are retried with
//! exponential backoff, up to `AI_MAX_RETRIES` extra attempts.

pub mod prompts;
pub mod wire;

use crate::error::MarkerError;
use crate::traits::grader::Grader;
use crate::types::{AiEvaluation, ChatMessage, ChatRole, Document, EvaluationRequest, PlagiarismCheck};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use std::time::Duration;
use util::config;
use wire::{Content, GeminiRequest, GeminiResponse, GenerationConfig, Part};

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct GeminiGrader {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    grading_model: String,
    extraction_model: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiGrader {
    /// Builds a grader from the global configuration.
    pub fn from_config() -> Result<Self, MarkerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config::ai_request_timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            api_key: config::gemini_api_key(),
            base_url: config::gemini_base_url(),
            grading_model: config::grading_model(),
            extraction_model: config::extraction_model(),
            max_retries: config::ai_max_retries(),
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Sends one request, retrying transient failures.
    async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<String, MarkerError> {
        if self.api_key.trim().is_empty() {
            return Err(MarkerError::Configuration(
                "GEMINI_API_KEY is not set".into(),
            ));
        }

        let url = self.endpoint(model);
        let mut attempt = 0;
        loop {
            match self.send_once(&url, request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = backoff_delay(self.retry_delay, attempt);
                    tracing::warn!(
                        model,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Gemini request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(model, error = %e, "Gemini request failed");
                    return Err(e);
                }
            }
        }
    }

    async fn send_once(&self, url: &str, request: &GeminiRequest) -> Result<String, MarkerError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MarkerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            MarkerError::InvalidResponse(format!("error decoding response body: {e}"))
        })?;
        parsed.text()
    }
}

/// `base * 2^attempt`, saturating instead of overflowing for large attempts.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt))
}

pub fn extraction_request(document: &Document) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            role: None,
            parts: vec![
                Part::text(prompts::EXTRACTION_PROMPT),
                Part::inline(
                    document.mime_type.clone(),
                    general_purpose::STANDARD.encode(&document.bytes),
                ),
            ],
        }],
        system_instruction: None,
        generation_config: None,
    }
}

pub fn evaluation_request(request: &EvaluationRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content::text(prompts::evaluation_prompt(
            &request.question_text,
            &request.answer_text,
            &request.custom_rules,
        ))],
        system_instruction: None,
        generation_config: Some(GenerationConfig::json(prompts::evaluation_schema())),
    }
}

pub fn plagiarism_request(text: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content::text(prompts::plagiarism_prompt(text))],
        system_instruction: None,
        generation_config: Some(GenerationConfig::json(prompts::plagiarism_schema())),
    }
}

pub fn rules_request(history: &[ChatMessage]) -> GeminiRequest {
    GeminiRequest {
        contents: history
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                };
                Content::with_role(role, m.text.clone())
            })
            .collect(),
        system_instruction: Some(Content::text(prompts::RULES_SYSTEM_INSTRUCTION)),
        generation_config: None,
    }
}

#[async_trait]
impl Grader for GeminiGrader {
    async fn extract_text(&self, document: &Document) -> Result<String, MarkerError> {
        if !document.looks_like_pdf() {
            return Err(MarkerError::InvalidDocument(format!(
                "{} is not a PDF",
                document.file_name
            )));
        }
        tracing::info!(file = %document.file_name, bytes = document.bytes.len(), "Extracting text");
        let text = self
            .generate(&self.extraction_model, &extraction_request(document))
            .await?;
        Ok(text.trim().to_string())
    }

    async fn evaluate(&self, request: &EvaluationRequest) -> Result<AiEvaluation, MarkerError> {
        tracing::info!(submission_id = %request.submission_id, "Grading answer sheet");
        let text = self
            .generate(&self.grading_model, &evaluation_request(request))
            .await?;
        wire::parse_evaluation(&text)
    }

    async fn check_plagiarism(&self, text: &str) -> Result<PlagiarismCheck, MarkerError> {
        let raw = self
            .generate(&self.extraction_model, &plagiarism_request(text))
            .await?;
        wire::parse_plagiarism(&raw)
    }

    async fn chat_rules(&self, history: &[ChatMessage]) -> Result<String, MarkerError> {
        let reply = self
            .generate(&self.grading_model, &rules_request(history))
            .await?;
        Ok(reply.trim().to_string())
    }
}
