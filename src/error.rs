use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;
use std::{num::ParseIntError, path::PathBuf};

pub type ChinoResult<T> = Result<T, ChinoError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ChinoError {
    #[snafu(display("Unable to parse chat timeout"))]
    ParseTimeout { source: ParseIntError },
    #[snafu(display("Error reading student store at {}", path.display()))]
    ReadStore {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error writing student store at {}", path.display()))]
    WriteStore {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error swapping new student store into {}", path.display()))]
    SwapStore {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error decoding student store"))]
    DecodeStore { source: serde_json::Error },
    #[snafu(display("Error encoding student store"))]
    EncodeStore { source: serde_json::Error },
    #[snafu(display("Invalid {}: {}", field, reason))]
    InvalidStudentField {
        field: &'static str,
        reason: &'static str,
    },
    #[snafu(display("A student with id {} already exists", id))]
    DuplicateStudentId { id: String },
    #[snafu(display("Unable to find student with id: {}", id))]
    MissingStudent { id: String },
    #[snafu(display("Chat message must not be empty"))]
    EmptyChatMessage,
    #[snafu(display("No student records available to answer from"))]
    NoStudentsForChat,
    #[snafu(display("No API credential configured for the chat service"))]
    MissingChatCredential,
    #[snafu(display("Error building the chat HTTP client"))]
    BuildChatClient { source: reqwest::Error },
    #[snafu(display("Error encoding student records for the chat context"))]
    EncodeChatContext { source: serde_json::Error },
    #[snafu(display("Error reaching the chat completion service"))]
    ChatUpstream { source: reqwest::Error },
    #[snafu(display("Chat completion service returned status {}", status))]
    ChatUpstreamStatus { status: u16 },
    #[snafu(display("Chat completion service returned no answer"))]
    EmptyChatCompletion,
    #[snafu(display("Error with multipart form input"))]
    Multipart {
        source: axum::extract::multipart::MultipartError,
    },
    #[snafu(display("Error with CSVs"))]
    Csv { source: csv::Error },
}

impl IntoResponse for ChinoError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const CF: StatusCode = StatusCode::CONFLICT; //duplicate id

        let status_code = match &self {
            Self::ParseTimeout { .. } => ISE,
            Self::ReadStore { .. } | Self::WriteStore { .. } | Self::SwapStore { .. } => ISE,
            Self::DecodeStore { .. } | Self::EncodeStore { .. } => ISE,
            Self::InvalidStudentField { .. } => BI,
            Self::DuplicateStudentId { .. } => CF,
            Self::MissingStudent { .. } => NF,
            Self::EmptyChatMessage | Self::NoStudentsForChat => BI,
            Self::MissingChatCredential => ISE,
            Self::BuildChatClient { .. } | Self::EncodeChatContext { .. } => ISE,
            Self::ChatUpstream { .. } | Self::ChatUpstreamStatus { .. } => ISE,
            Self::EmptyChatCompletion => ISE,
            Self::Multipart { source } => source.status(),
            Self::Csv { .. } => ISE,
        };

        error!(?self, "Error!");
        (status_code, Json(json!({"error": self.to_string()}))).into_response()
    }
}
