//! Chatbot CRUD over `/chatbots`.

use super::{ServiceError, unwrap_envelope};
use crate::api::{ApiClient, ApiOptions};
use ::widget::ApiEnvelope;
use serde::{Deserialize, Serialize};

const CHATBOTS_PATH: &str = "/chatbots";
const NOT_RETURNED: &str = "El servidor no devolvió el chatbot.";
const DELETE_REJECTED: &str = "No se pudo eliminar el chatbot.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Openai,
    Gemini,
    Anthropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatbotStatus {
    Active,
    Inactive,
    Testing,
}

/// Fields the admin sends when creating or updating a chatbot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub system_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub llm_provider: LlmProvider,
    #[serde(default)]
    pub active: bool,
    /// Provider settings (`openai`, `gemini`, `anthropic`) and `vectorstore`,
    /// passed through untouched.
    #[serde(flatten)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// Install links the server attaches to a chatbot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotWidgetLinks {
    pub script_url: String,
    pub preview_url: String,
    pub config_url: String,
    pub embed_code: String,
}

/// A chatbot as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chatbot {
    pub id: String,
    pub status: ChatbotStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<ChatbotWidgetLinks>,
    #[serde(flatten)]
    pub data: ChatbotData,
}

#[derive(Deserialize)]
struct DeleteResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

pub struct ChatbotService {
    api: ApiClient,
}

impl ChatbotService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// [`ServiceError::Rejected`] or [`ServiceError::Api`].
    pub async fn list(&self) -> Result<Vec<Chatbot>, ServiceError> {
        let envelope: ApiEnvelope<Vec<Chatbot>> = self.api.get(CHATBOTS_PATH, &ApiOptions::new()).await?;
        if envelope.success && envelope.data.is_none() {
            return Ok(Vec::new());
        }
        unwrap_envelope(envelope, NOT_RETURNED)
    }

    /// # Errors
    ///
    /// [`ServiceError::Rejected`] or [`ServiceError::Api`].
    pub async fn get(&self, id: &str) -> Result<Chatbot, ServiceError> {
        let envelope = self.api.get(&format!("{CHATBOTS_PATH}/{id}"), &ApiOptions::new()).await?;
        unwrap_envelope(envelope, NOT_RETURNED)
    }

    /// # Errors
    ///
    /// [`ServiceError::Rejected`] or [`ServiceError::Api`].
    pub async fn create(&self, data: &ChatbotData) -> Result<Chatbot, ServiceError> {
        let envelope = self.api.post(CHATBOTS_PATH, data, &ApiOptions::new()).await?;
        let created: Chatbot = unwrap_envelope(envelope, NOT_RETURNED)?;
        tracing::info!(id = %created.id, name = %created.data.name, "chatbot created");
        Ok(created)
    }

    /// Replace the chatbot's fields with `data`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Rejected`] or [`ServiceError::Api`].
    pub async fn update(&self, id: &str, data: &ChatbotData) -> Result<Chatbot, ServiceError> {
        let envelope = self.api.put(&format!("{CHATBOTS_PATH}/{id}"), data, &ApiOptions::new()).await?;
        let updated: Chatbot = unwrap_envelope(envelope, NOT_RETURNED)?;
        tracing::info!(id = %updated.id, "chatbot updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// [`ServiceError::Rejected`] when the server answers `success: false`,
    /// or [`ServiceError::Api`].
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let response: DeleteResponse = self.api.delete(&format!("{CHATBOTS_PATH}/{id}"), &ApiOptions::new()).await?;
        if !response.success {
            return Err(ServiceError::Rejected(response.message.unwrap_or_else(|| DELETE_REJECTED.to_owned())));
        }
        tracing::info!(id, "chatbot deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod tests;
