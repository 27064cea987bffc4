//! `/rules`: chat with the model to agree on a marking scheme.

use crate::response::ApiResponse;
use crate::routes::common::{error_response, json_rejection};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use marker::rules::{self, FAILURE_REPLY, GREETING};
use marker::types::{ChatMessage, ChatRole};
use serde::{Deserialize, Serialize};

pub fn rules_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Rules in effect before this conversation.
    #[serde(default)]
    pub current_rules: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// The rules to attach to the evaluation after this reply.
    pub rules: String,
}

/// POST /rules/chat
///
/// An empty transcript returns the opening greeting without calling the model.
/// Otherwise the transcript must end with a teacher message.
///
/// ### Responses
/// - `200 OK` with `reply` and the resulting `rules`
/// - `400 Bad Request` (unreadable body, or last message is not from the teacher)
/// - `502 Bad Gateway` (model unavailable)
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => return json_rejection(e),
    };
    if req.messages.is_empty() {
        let body = ChatReply {
            reply: GREETING.to_string(),
            rules: req.current_rules,
        };
        return (StatusCode::OK, Json(ApiResponse::success(body, "Greeting"))).into_response();
    }
    if !rules::awaiting_model(&req.messages) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "The last message must be a non-empty message from the teacher",
        );
    }

    let reply = match state.grader().chat_rules(&req.messages).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "Rules chat failed");
            return error_response(StatusCode::BAD_GATEWAY, FAILURE_REPLY);
        }
    };

    let mut transcript = req.messages;
    transcript.push(ChatMessage {
        role: ChatRole::Model,
        text: reply.clone(),
    });
    let body = ChatReply {
        rules: rules::final_rules(&transcript, &req.current_rules),
        reply,
    };
    (StatusCode::OK, Json(ApiResponse::success(body, "Rules updated"))).into_response()
}
