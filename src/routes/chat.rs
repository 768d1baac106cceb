use crate::{error::ChinoResult, maud_conveniences::errors_list, state::ChinoState};
use axum::{Form, Json, extract::State};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    message: String,
}

pub async fn post_chat(
    State(state): State<ChinoState>,
    Json(ChatMessage { message }): Json<ChatMessage>,
) -> ChinoResult<Json<Value>> {
    let students = state.store().load_all().await?;
    let reply = state.chat().answer(&message, &students).await?;

    Ok(Json(json!({"reply": reply})))
}

pub async fn internal_post_chat(
    State(state): State<ChinoState>,
    Form(ChatMessage { message }): Form<ChatMessage>,
) -> ChinoResult<Markup> {
    let students = state.store().load_all().await?;

    Ok(match state.chat().answer(&message, &students).await {
        Ok(reply) => html! {
            div class="p-2" {
                p class="text-gray-400 italic" {"You: " (message)}
                p class="text-gray-100" {(reply)}
            }
        },
        Err(error) => errors_list(Some("Chat error"), [error.to_string()]),
    })
}
