//! Embed script locator: script URL, `<script>` snippet and preview URL.

use serde::Serialize;

/// Everything a site owner needs to install a chatbot's widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEmbed {
    pub script_url: String,
    pub embed_code: String,
    pub preview_url: String,
}

/// Builds widget URLs under the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedLocator {
    base_url: String,
}

impl EmbedLocator {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/embed/widget/{id}.js`
    #[must_use]
    pub fn script_url(&self, chatbot_id: &str) -> String {
        format!("{}/embed/widget/{chatbot_id}.js", self.base_url)
    }

    /// `<script src="{script_url}" async></script>`
    #[must_use]
    pub fn embed_code(&self, chatbot_id: &str) -> String {
        format!("<script src=\"{}\" async></script>", self.script_url(chatbot_id))
    }

    /// `{base}/embed/preview/{id}`
    #[must_use]
    pub fn preview_url(&self, chatbot_id: &str) -> String {
        format!("{}/embed/preview/{chatbot_id}", self.base_url)
    }

    #[must_use]
    pub fn embed(&self, chatbot_id: &str) -> WidgetEmbed {
        WidgetEmbed {
            script_url: self.script_url(chatbot_id),
            embed_code: self.embed_code(chatbot_id),
            preview_url: self.preview_url(chatbot_id),
        }
    }
}

#[cfg(test)]
#[path = "embed_test.rs"]
mod tests;
