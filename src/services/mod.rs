//! Remote resources managed by the admin: widget configurations and chatbots.

pub mod chatbot;
pub mod widget;

pub use self::chatbot::{Chatbot, ChatbotData, ChatbotService, ChatbotStatus, LlmProvider};
pub use self::widget::{LoadedWidget, WidgetService};

use crate::api::ApiError;
use ::widget::ApiEnvelope;

/// Errors from service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Local validation failed; nothing was sent.
    #[error("invalid widget configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    /// The API answered with `success: false` or no data.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Unwrap an envelope, turning `success: false` or missing data into
/// [`ServiceError::Rejected`] with the server message or `fallback`.
fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, fallback: &str) -> Result<T, ServiceError> {
    let message = envelope.message.clone();
    envelope
        .into_data()
        .ok_or_else(|| ServiceError::Rejected(message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_owned())))
}
