//! Embeddable chat widget configuration: model, defaults, validation,
//! wire normalization, and preview style derivation.
//!
//! This crate is UI-framework agnostic and performs no I/O, so the admin
//! client, the CLI, and any preview renderer can share one definition of
//! what a widget configuration is and how it looks.

pub mod defaults;
pub mod embed;
pub mod model;
pub mod normalize;
pub mod style;
pub mod validate;

pub use defaults::default_config;
pub use embed::{EmbedLocator, WidgetEmbed};
pub use model::{
    AnimationType, ApiEnvelope, BubblePosition, ChatConfig, ChatPosition, FONT_FAMILIES, HorizontalSide,
    VerticalSide, WidgetAppearance, WidgetBehavior, WidgetConfig, WidgetPosition, WidgetScript,
};
pub use normalize::normalize_for_api;
pub use style::{WidgetStyles, animation_class, derive_styles};
pub use validate::{ValidationReport, is_hex_color, validate};
