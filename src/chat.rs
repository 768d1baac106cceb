use crate::{
    config::ChatConfig,
    data::student::Student,
    error::{
        BuildChatClientSnafu, ChatUpstreamSnafu, ChatUpstreamStatusSnafu, ChinoResult,
        EmptyChatCompletionSnafu, EmptyChatMessageSnafu, EncodeChatContextSnafu,
        MissingChatCredentialSnafu, NoStudentsForChatSnafu,
    },
};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt, ensure};
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<CompletionMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionReply,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    content: String,
}

/// Stateless proxy to an OpenAI-style chat-completion endpoint. All the
/// knobs come from the [`ChatConfig`] handed over at construction; handlers
/// never reach into the environment themselves.
#[derive(Clone, Debug)]
pub struct ChatClient {
    config: Arc<ChatConfig>,
    client: Client,
}

impl ChatClient {
    pub fn new(config: Arc<ChatConfig>) -> ChinoResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context(BuildChatClientSnafu)?;

        Ok(Self { config, client })
    }

    /// One bounded round trip per user message; no retries, no streaming, no
    /// conversation history across calls.
    pub async fn answer(&self, message: &str, students: &[Student]) -> ChinoResult<String> {
        let message = message.trim();
        ensure!(!message.is_empty(), EmptyChatMessageSnafu);
        ensure!(!students.is_empty(), NoStudentsForChatSnafu);

        let api_key = self
            .config
            .api_key
            .as_ref()
            .context(MissingChatCredentialSnafu)?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: dataset_instruction(students)?,
                },
                CompletionMessage {
                    role: "user",
                    content: message.to_string(),
                },
            ],
            temperature: 0.2,
        };

        debug!(model = %self.config.model, "Forwarding chat message upstream");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.endpoint))
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .context(ChatUpstreamSnafu)?;

        ensure!(
            response.status().is_success(),
            ChatUpstreamStatusSnafu {
                status: response.status().as_u16(),
            }
        );

        let completion: CompletionResponse = response.json().await.context(ChatUpstreamSnafu)?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        ensure!(!reply.trim().is_empty(), EmptyChatCompletionSnafu);

        Ok(reply)
    }
}

fn dataset_instruction(students: &[Student]) -> ChinoResult<String> {
    let dataset = serde_json::to_string_pretty(students).context(EncodeChatContextSnafu)?;

    Ok(format!(
        "You are an assistant for a student record system. Answer using only the \
         student records below. If the records cannot answer the question, say that \
         you cannot answer from the available data.\n\nStudent records:\n{dataset}"
    ))
}
