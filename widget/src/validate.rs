//! Widget configuration validation.
//!
//! Every rule is evaluated and every violation reported, so the admin UI can
//! show all problems at once. Validation never fails; callers inspect the
//! returned [`ValidationReport`].

use serde::Serialize;

use crate::model::WidgetConfig;

/// Outcome of [`validate`]. `is_valid` is true exactly when `errors` is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }
}

/// Check `config` against all documented field rules.
#[must_use]
pub fn validate(config: &WidgetConfig) -> ValidationReport {
    let mut errors = Vec::new();
    let appearance = &config.appearance;
    let behavior = &config.behavior;
    let position = &config.position;
    let chat = &config.chat;

    if config.chatbot_id.trim().is_empty() {
        errors.push("ID del chatbot es requerido".to_owned());
    }

    if !is_hex_color(&appearance.primary_color) {
        errors.push("Color primario debe ser un color hexadecimal válido".to_owned());
    }
    if !is_hex_color(&appearance.background_color) {
        errors.push("Color de fondo debe ser un color hexadecimal válido".to_owned());
    }

    check_range(&mut errors, position.bubble_size, 40.0, 100.0, "Tamaño de la burbuja debe estar entre 40 y 100 pixels");
    check_range(&mut errors, position.chat_width, 300.0, 800.0, "Ancho del chat debe estar entre 300 y 800 pixels");
    check_range(&mut errors, position.chat_height, 400.0, 800.0, "Alto del chat debe estar entre 400 y 800 pixels");

    check_range(
        &mut errors,
        behavior.auto_open_delay,
        0.0,
        60.0,
        "Retraso de apertura automática debe estar entre 0 y 60 segundos",
    );

    if chat.header_title.trim().is_empty() {
        errors.push("Título del header es requerido".to_owned());
    }
    if chat.welcome_message.trim().is_empty() {
        errors.push("Mensaje de bienvenida es requerido".to_owned());
    }
    check_range(&mut errors, chat.max_file_size, 1.0, 50.0, "Tamaño máximo de archivo debe estar entre 1 y 50 MB");

    // Ranges the admin form enforces field by field.
    check_range(&mut errors, appearance.font_size, 10.0, 20.0, "Tamaño de fuente debe estar entre 10 y 20 pixels");
    check_range(&mut errors, appearance.border_radius, 0.0, 50.0, "Radio del borde debe estar entre 0 y 50 pixels");
    check_range(&mut errors, appearance.border_width, 0.0, 10.0, "Ancho del borde debe estar entre 0 y 10 pixels");
    check_range(&mut errors, appearance.opacity, 0.1, 1.0, "Opacidad debe estar entre 0.1 y 1");
    check_range(
        &mut errors,
        behavior.animation_duration,
        100.0,
        2000.0,
        "Duración de la animación debe estar entre 100 y 2000 milisegundos",
    );
    check_range(&mut errors, position.bubble_margin_x, 0.0, 100.0, "Margen horizontal debe estar entre 0 y 100 pixels");
    check_range(&mut errors, position.bubble_margin_y, 0.0, 100.0, "Margen vertical debe estar entre 0 y 100 pixels");
    check_range(
        &mut errors,
        position.mobile_breakpoint,
        320.0,
        1200.0,
        "Punto de quiebre móvil debe estar entre 320 y 1200 pixels",
    );
    check_range(&mut errors, chat.max_messages, 10.0, 200.0, "Máximo de mensajes debe estar entre 10 y 200");

    ValidationReport::from_errors(errors)
}

/// True for `#RGB` or `#RRGGBB` with hexadecimal digits of either case.
#[must_use]
pub fn is_hex_color(raw: &str) -> bool {
    let Some(hex) = raw.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

// NaN fails every comparison, so non-finite input is reported too.
fn check_range(errors: &mut Vec<String>, value: f64, min: f64, max: f64, message: &str) {
    if !(value >= min && value <= max) {
        errors.push(message.to_owned());
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
