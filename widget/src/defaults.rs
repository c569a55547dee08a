//! Default widget template used when a chatbot has no persisted config.

use crate::model::{
    AnimationType, BubblePosition, ChatConfig, ChatPosition, WidgetAppearance, WidgetBehavior, WidgetConfig,
    WidgetPosition,
};

pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";
pub const DEFAULT_ALLOWED_FILE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Build the default configuration for `chatbot_id`.
///
/// Only `chatbot_id` varies between calls; metadata fields are left empty so
/// the server assigns them on first save.
#[must_use]
pub fn default_config(chatbot_id: &str) -> WidgetConfig {
    WidgetConfig {
        id: None,
        chatbot_id: chatbot_id.to_owned(),
        appearance: default_appearance(),
        behavior: default_behavior(),
        position: default_position(),
        chat: default_chat(),
        created_at: None,
        updated_at: None,
    }
}

fn default_appearance() -> WidgetAppearance {
    WidgetAppearance {
        primary_color: DEFAULT_PRIMARY_COLOR.to_owned(),
        secondary_color: "#EFF6FF".to_owned(),
        background_color: "#FFFFFF".to_owned(),
        text_color: "#1F2937".to_owned(),
        bubble_background_color: DEFAULT_PRIMARY_COLOR.to_owned(),
        bubble_icon_color: "#FFFFFF".to_owned(),
        bubble_shadow: true,
        font_family: "Inter, system-ui, sans-serif".to_owned(),
        font_size: 14.0,
        border_radius: 12.0,
        border_width: 1.0,
        border_color: "#E5E7EB".to_owned(),
        has_gradient: false,
        gradient_from: Some(DEFAULT_PRIMARY_COLOR.to_owned()),
        gradient_to: Some("#1D4ED8".to_owned()),
        opacity: 1.0,
    }
}

fn default_behavior() -> WidgetBehavior {
    WidgetBehavior {
        auto_open: false,
        auto_open_delay: 3.0,
        allow_close: true,
        close_on_escape: true,
        allow_minimize: true,
        allow_resize: false,
        enable_animations: true,
        animation_type: AnimationType::Slide,
        animation_duration: 300.0,
        enable_sounds: false,
        remember_state: true,
    }
}

fn default_position() -> WidgetPosition {
    WidgetPosition {
        bubble_position: BubblePosition::BottomRight,
        bubble_margin_x: 20.0,
        bubble_margin_y: 20.0,
        bubble_size: 60.0,
        chat_position: ChatPosition::Corner,
        chat_width: 400.0,
        chat_height: 600.0,
        mobile_breakpoint: 768.0,
        mobile_width: "100%".to_owned(),
        mobile_height: "100%".to_owned(),
    }
}

fn default_chat() -> ChatConfig {
    ChatConfig {
        show_header: true,
        header_title: "Chat de Soporte".to_owned(),
        header_subtitle: "Estamos aquí para ayudarte".to_owned(),
        show_avatar: true,
        avatar_url: String::new(),
        welcome_message: "¡Hola! ¿En qué puedo ayudarte hoy?".to_owned(),
        placeholder_text: "Escribe tu mensaje...".to_owned(),
        allow_file_upload: false,
        max_file_size: 5.0,
        allowed_file_types: DEFAULT_ALLOWED_FILE_TYPES.iter().map(|t| (*t).to_owned()).collect(),
        show_typing_indicator: true,
        show_timestamps: false,
        max_messages: 50.0,
        show_powered_by: true,
        custom_branding: String::new(),
    }
}

#[cfg(test)]
#[path = "defaults_test.rs"]
mod tests;
