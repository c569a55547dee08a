//! Widget configuration service.
//!
//! Loading never fails: a chatbot without a stored configuration (or an
//! unreachable API) gets the default one. Saving validates locally first
//! and only sends normalized payloads.

use super::{ServiceError, unwrap_envelope};
use crate::api::{ApiClient, ApiOptions};
use serde::Serialize;
use ::widget::{ApiEnvelope, EmbedLocator, WidgetConfig, WidgetEmbed, WidgetScript};

pub const SAVED_MESSAGE: &str = "Configuración del widget guardada correctamente.";
const SAVE_REJECTED: &str = "No se pudo guardar la configuración del widget.";
const SCRIPT_UNAVAILABLE: &str = "No se pudo obtener el script del widget.";

/// A configuration ready for editing, plus its install snippet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedWidget {
    pub config: WidgetConfig,
    pub embed: WidgetEmbed,
    /// True when the config came from defaults instead of the server.
    pub from_defaults: bool,
}

pub struct WidgetService {
    api: ApiClient,
    locator: EmbedLocator,
}

impl WidgetService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let locator = EmbedLocator::new(api.base_url());
        Self { api, locator }
    }

    #[must_use]
    pub fn locator(&self) -> &EmbedLocator {
        &self.locator
    }

    /// Stored configuration for `chatbot_id`, or the defaults when the
    /// server has none or cannot be reached.
    pub async fn load(&self, chatbot_id: &str) -> LoadedWidget {
        let path = format!("/embed/config/{chatbot_id}");
        let remote = match self.api.get::<ApiEnvelope<WidgetConfig>>(&path, &ApiOptions::new()).await {
            Ok(envelope) => envelope.into_data(),
            Err(e) => {
                tracing::warn!(chatbot_id, error = %e, "widget config load failed");
                None
            }
        };

        let (config, from_defaults) = match remote {
            Some(config) => (config, false),
            None => {
                tracing::warn!(chatbot_id, "no stored widget config; using defaults");
                (::widget::default_config(chatbot_id), true)
            }
        };

        LoadedWidget { config, embed: self.locator.embed(chatbot_id), from_defaults }
    }

    /// Validate, normalize and store `config`. Returns the server's copy.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Invalid`] with every violated rule; no request is made
    /// - [`ServiceError::Rejected`] when the API answers `success: false`
    /// - [`ServiceError::Api`] for transport and HTTP failures
    pub async fn save(&self, config: &WidgetConfig) -> Result<WidgetConfig, ServiceError> {
        let report = ::widget::validate(config);
        if !report.is_valid {
            tracing::warn!(chatbot_id = %config.chatbot_id, errors = report.errors.len(), "widget config rejected locally");
            return Err(ServiceError::Invalid(report.errors));
        }

        let payload = ::widget::normalize_for_api(config);
        let path = format!("/embed/config/{}", payload.chatbot_id);
        let envelope: ApiEnvelope<WidgetConfig> = self.api.put(&path, &payload, &ApiOptions::new()).await?;
        let saved = unwrap_envelope(envelope, SAVE_REJECTED)?;

        tracing::info!(chatbot_id = %saved.chatbot_id, "widget config saved");
        self.api.notifier().toast_info(SAVED_MESSAGE);
        Ok(saved)
    }

    /// Script location served by the API for `chatbot_id`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Rejected`] or [`ServiceError::Api`] as for [`WidgetService::save`].
    pub async fn script(&self, chatbot_id: &str) -> Result<WidgetScript, ServiceError> {
        let path = format!("/embed/widget/{chatbot_id}.js");
        let envelope: ApiEnvelope<WidgetScript> = self.api.get(&path, &ApiOptions::new()).await?;
        unwrap_envelope(envelope, SCRIPT_UNAVAILABLE)
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
