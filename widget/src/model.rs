//! Widget configuration data model as exchanged with the REST backend.
//!
//! Field names are camelCase on the wire. Numeric fields are kept as `f64`
//! so fractional form input survives until [`crate::normalize_for_api`].

use serde::{Deserialize, Serialize, Serializer};

// =============================================================================
// CONFIG
// =============================================================================

/// Full widget configuration for one chatbot. Saved by full replacement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub chatbot_id: String,
    pub appearance: WidgetAppearance,
    pub behavior: WidgetBehavior,
    pub position: WidgetPosition,
    pub chat: ChatConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Colors, typography, borders and visual effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetAppearance {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,

    pub bubble_background_color: String,
    pub bubble_icon_color: String,
    pub bubble_shadow: bool,

    pub font_family: String,
    /// Pixels, 10–20.
    #[serde(serialize_with = "whole_number")]
    pub font_size: f64,

    /// Pixels, 0–50.
    #[serde(serialize_with = "whole_number")]
    pub border_radius: f64,
    /// Pixels, 0–10.
    #[serde(serialize_with = "whole_number")]
    pub border_width: f64,
    pub border_color: String,

    pub has_gradient: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_to: Option<String>,
    /// 0.1–1.
    pub opacity: f64,
}

/// Open/close behavior, animations, sounds and persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBehavior {
    pub auto_open: bool,
    /// Seconds, 0–60.
    #[serde(serialize_with = "whole_number")]
    pub auto_open_delay: f64,

    pub allow_close: bool,
    pub close_on_escape: bool,

    pub allow_minimize: bool,
    pub allow_resize: bool,

    pub enable_animations: bool,
    pub animation_type: AnimationType,
    /// Milliseconds, 100–2000.
    #[serde(serialize_with = "whole_number")]
    pub animation_duration: f64,

    pub enable_sounds: bool,
    pub remember_state: bool,
}

/// Bubble and chat panel placement, plus responsive overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPosition {
    pub bubble_position: BubblePosition,
    /// Pixels, 0–100.
    #[serde(serialize_with = "whole_number")]
    pub bubble_margin_x: f64,
    /// Pixels, 0–100.
    #[serde(serialize_with = "whole_number")]
    pub bubble_margin_y: f64,
    /// Pixels, 40–100.
    #[serde(serialize_with = "whole_number")]
    pub bubble_size: f64,

    pub chat_position: ChatPosition,
    /// Pixels, 300–800.
    #[serde(serialize_with = "whole_number")]
    pub chat_width: f64,
    /// Pixels, 400–800.
    #[serde(serialize_with = "whole_number")]
    pub chat_height: f64,

    /// Pixels, 320–1200.
    #[serde(serialize_with = "whole_number")]
    pub mobile_breakpoint: f64,
    /// CSS length such as `100%` or `360px`.
    pub mobile_width: String,
    pub mobile_height: String,
}

/// Chat panel content: header, messages, uploads and branding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    pub show_header: bool,
    pub header_title: String,
    pub header_subtitle: String,
    pub show_avatar: bool,
    pub avatar_url: String,

    pub welcome_message: String,
    pub placeholder_text: String,

    pub allow_file_upload: bool,
    /// Megabytes, 1–50.
    #[serde(serialize_with = "whole_number")]
    pub max_file_size: f64,
    pub allowed_file_types: Vec<String>,

    pub show_typing_indicator: bool,
    pub show_timestamps: bool,
    /// 10–200.
    #[serde(serialize_with = "whole_number")]
    pub max_messages: f64,

    pub show_powered_by: bool,
    pub custom_branding: String,
}

/// Integral values go out as JSON integers (`60`, not `60.0`); anything
/// fractional or out of `i64` range is written as a float.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::float_cmp)]
    if value.is_finite() && value.fract() == 0.0 && *value >= i64::MIN as f64 && *value <= i64::MAX as f64 {
        return serializer.serialize_i64(*value as i64);
    }
    serializer.serialize_f64(*value)
}

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// Screen corner the launcher bubble is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BubblePosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

/// Vertical screen edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Horizontal screen edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalSide {
    Left,
    Right,
}

impl BubblePosition {
    pub const ALL: [Self; 4] = [Self::BottomRight, Self::BottomLeft, Self::TopRight, Self::TopLeft];

    #[must_use]
    pub fn vertical(self) -> VerticalSide {
        match self {
            Self::BottomRight | Self::BottomLeft => VerticalSide::Bottom,
            Self::TopRight | Self::TopLeft => VerticalSide::Top,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> HorizontalSide {
        match self {
            Self::BottomRight | Self::TopRight => HorizontalSide::Right,
            Self::BottomLeft | Self::TopLeft => HorizontalSide::Left,
        }
    }

    /// Wire value, e.g. `bottom-right`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
        }
    }

    /// Label shown in the admin form selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BottomRight => "Abajo Derecha",
            Self::BottomLeft => "Abajo Izquierda",
            Self::TopRight => "Arriba Derecha",
            Self::TopLeft => "Arriba Izquierda",
        }
    }
}

/// Where the chat panel opens relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatPosition {
    #[default]
    Corner,
    Center,
    Sidebar,
}

impl ChatPosition {
    pub const ALL: [Self; 3] = [Self::Corner, Self::Center, Self::Sidebar];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corner => "corner",
            Self::Center => "center",
            Self::Sidebar => "sidebar",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Corner => "Esquina",
            Self::Center => "Centro",
            Self::Sidebar => "Barra lateral",
        }
    }
}

/// Open/close animation applied to the chat panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    Fade,
    #[default]
    Slide,
    Bounce,
    None,
}

impl AnimationType {
    pub const ALL: [Self; 4] = [Self::Fade, Self::Slide, Self::Bounce, Self::None];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Bounce => "bounce",
            Self::None => "none",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fade => "Desvanecer",
            Self::Slide => "Deslizar",
            Self::Bounce => "Rebotar",
            Self::None => "Sin animación",
        }
    }
}

/// Font stacks offered by the admin form as `(css value, label)`.
pub const FONT_FAMILIES: [(&str, &str); 5] = [
    ("Inter, system-ui, sans-serif", "Inter"),
    ("Arial, sans-serif", "Arial"),
    ("Helvetica, sans-serif", "Helvetica"),
    ("Georgia, serif", "Georgia"),
    ("Times New Roman, serif", "Times New Roman"),
];

// =============================================================================
// API ENVELOPES
// =============================================================================

/// `{success, data, message?}` wrapper used by every backend response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful response; `None` when `success` is false.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Script location and embed snippet served for a chatbot's widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetScript {
    pub script_url: String,
    pub embed_code: String,
    pub preview_url: String,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
