//! Wire normalization applied right before a config is sent to the API.

use crate::model::WidgetConfig;

/// Return a copy of `config` with pixel, millisecond, size and count fields
/// rounded to integers and opacity rounded to two decimals.
///
/// Rounding is half away from zero. Out-of-range values are rounded, never
/// clamped; range checks belong to [`crate::validate`].
#[must_use]
pub fn normalize_for_api(config: &WidgetConfig) -> WidgetConfig {
    let mut out = config.clone();

    let appearance = &mut out.appearance;
    appearance.font_size = appearance.font_size.round();
    appearance.border_radius = appearance.border_radius.round();
    appearance.border_width = appearance.border_width.round();
    appearance.opacity = round_to_hundredths(appearance.opacity);

    let position = &mut out.position;
    position.bubble_margin_x = position.bubble_margin_x.round();
    position.bubble_margin_y = position.bubble_margin_y.round();
    position.bubble_size = position.bubble_size.round();
    position.chat_width = position.chat_width.round();
    position.chat_height = position.chat_height.round();
    position.mobile_breakpoint = position.mobile_breakpoint.round();

    let behavior = &mut out.behavior;
    behavior.auto_open_delay = behavior.auto_open_delay.round();
    behavior.animation_duration = behavior.animation_duration.round();

    let chat = &mut out.chat;
    chat.max_file_size = chat.max_file_size.round();
    chat.max_messages = chat.max_messages.round();

    out
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
