//! Preview style derivation for the launcher bubble, chat panel and header.
//!
//! DESIGN
//! ======
//! `derive_styles` is a pure function of `(config, is_open)`. Styles are
//! typed so placement can be asserted directly; each style also renders to
//! ordered CSS declarations for inline `style` attributes.
//!
//! PLACEMENT
//! =========
//! The bubble gets exactly one vertical and one horizontal offset, taken
//! from the margins on the sides named by `bubblePosition`. In `corner` mode
//! the panel shares the bubble's sides and clears it by `bubbleSize` plus
//! [`BUBBLE_GAP_PX`]. `sidebar` pins the panel full-height to the bubble's
//! horizontal edge.

use std::fmt;

use serde_json::{Map, Value};

use crate::model::{ChatPosition, HorizontalSide, VerticalSide, WidgetAppearance, WidgetBehavior, WidgetConfig};

/// Space between the bubble and a corner-anchored chat panel.
pub const BUBBLE_GAP_PX: f64 = 10.0;

const BUBBLE_SHADOW: &str = "0 4px 12px rgba(0, 0, 0, 0.15)";
const CHAT_SHADOW: &str = "0 8px 30px rgba(0, 0, 0, 0.2)";
const CENTER_TRANSFORM: &str = "translate(-50%, -50%)";
const PANEL_GRADIENT_DEG: u16 = 135;
const HEADER_GRADIENT_DEG: u16 = 90;

// =============================================================================
// CSS VALUES
// =============================================================================

/// A CSS length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Zero,
    Px(f64),
    Percent(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("0"),
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Absolute-position offsets. Unset edges are omitted from the output.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inset {
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
}

impl Inset {
    fn push_declarations(&self, out: &mut Vec<(&'static str, String)>) {
        let edges = [("top", self.top), ("right", self.right), ("bottom", self.bottom), ("left", self.left)];
        for (name, value) in edges {
            if let Some(value) = value {
                out.push((name, value.to_string()));
            }
        }
    }
}

/// Flat color or two-stop linear gradient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    Solid(String),
    LinearGradient { angle_deg: u16, from: String, to: String },
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid(color) => f.write_str(color),
            Self::LinearGradient { angle_deg, from, to } => write!(f, "linear-gradient({angle_deg}deg, {from}, {to})"),
        }
    }
}

// =============================================================================
// STYLES
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct BubbleStyle {
    pub background_color: String,
    pub color: String,
    /// Width and height in pixels.
    pub size: f64,
    pub box_shadow: Option<&'static str>,
    pub inset: Inset,
    /// `None` when animations are disabled.
    pub transition: Option<String>,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatStyle {
    pub background: Background,
    pub color: String,
    pub font_family: String,
    pub font_size: f64,
    pub border_radius: f64,
    pub border: String,
    pub width: Length,
    pub height: Length,
    pub visible: bool,
    pub inset: Inset,
    pub transform: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: Background,
    pub visible: bool,
}

/// Styles for one preview render.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetStyles {
    pub bubble: BubbleStyle,
    pub chat: ChatStyle,
    pub header: HeaderStyle,
}

impl BubbleStyle {
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let size = Length::Px(self.size).to_string();
        let mut out = vec![
            ("background-color", self.background_color.clone()),
            ("color", self.color.clone()),
            ("width", size.clone()),
            ("height", size),
            ("border-radius", "50%".to_owned()),
            ("box-shadow", self.box_shadow.unwrap_or("none").to_owned()),
            ("position", "absolute".to_owned()),
        ];
        self.inset.push_declarations(&mut out);
        out.extend([
            ("cursor", "pointer".to_owned()),
            ("display", "flex".to_owned()),
            ("align-items", "center".to_owned()),
            ("justify-content", "center".to_owned()),
            ("transition", self.transition.clone().unwrap_or_else(|| "none".to_owned())),
            ("opacity", self.opacity.to_string()),
        ]);
        out
    }
}

impl ChatStyle {
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("background", self.background.to_string()),
            ("color", self.color.clone()),
            ("font-family", self.font_family.clone()),
            ("font-size", Length::Px(self.font_size).to_string()),
            ("border-radius", Length::Px(self.border_radius).to_string()),
            ("border", self.border.clone()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("position", "absolute".to_owned()),
        ];
        self.inset.push_declarations(&mut out);
        if let Some(transform) = self.transform {
            out.push(("transform", transform.to_owned()));
        }
        out.extend([
            ("box-shadow", CHAT_SHADOW.to_owned()),
            ("display", if self.visible { "flex" } else { "none" }.to_owned()),
            ("flex-direction", "column".to_owned()),
            ("overflow", "hidden".to_owned()),
        ]);
        out
    }
}

impl HeaderStyle {
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("background", self.background.to_string()),
            ("color", "white".to_owned()),
            ("padding", "16px".to_owned()),
            ("display", if self.visible { "block" } else { "none" }.to_owned()),
        ]
    }
}

impl WidgetStyles {
    /// `{"bubble": {...}, "chat": {...}, "header": {...}}` keyed by CSS property.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        root.insert("bubble".to_owned(), declarations_to_json(&self.bubble.declarations()));
        root.insert("chat".to_owned(), declarations_to_json(&self.chat.declarations()));
        root.insert("header".to_owned(), declarations_to_json(&self.header.declarations()));
        Value::Object(root)
    }
}

/// Render declarations as an inline `style` attribute value.
#[must_use]
pub fn inline(declarations: &[(&'static str, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn declarations_to_json(declarations: &[(&'static str, String)]) -> Value {
    let map = declarations
        .iter()
        .map(|(name, value)| ((*name).to_owned(), Value::String(value.clone())))
        .collect::<Map<_, _>>();
    Value::Object(map)
}

// =============================================================================
// DERIVATION
// =============================================================================

/// Compute bubble, chat panel and header styles for a preview render.
#[must_use]
pub fn derive_styles(config: &WidgetConfig, is_open: bool) -> WidgetStyles {
    WidgetStyles {
        bubble: bubble_style(config),
        chat: chat_style(config, is_open),
        header: header_style(config),
    }
}

/// CSS class for the open animation, e.g. `animate-slide`.
#[must_use]
pub fn animation_class(behavior: &WidgetBehavior) -> Option<String> {
    behavior
        .enable_animations
        .then(|| format!("animate-{}", behavior.animation_type.as_str()))
}

fn bubble_style(config: &WidgetConfig) -> BubbleStyle {
    let appearance = &config.appearance;
    let behavior = &config.behavior;
    let position = &config.position;

    let mut inset = Inset::default();
    let margin_y = Some(Length::Px(position.bubble_margin_y));
    let margin_x = Some(Length::Px(position.bubble_margin_x));
    match position.bubble_position.vertical() {
        VerticalSide::Top => inset.top = margin_y,
        VerticalSide::Bottom => inset.bottom = margin_y,
    }
    match position.bubble_position.horizontal() {
        HorizontalSide::Left => inset.left = margin_x,
        HorizontalSide::Right => inset.right = margin_x,
    }

    BubbleStyle {
        background_color: appearance.bubble_background_color.clone(),
        color: appearance.bubble_icon_color.clone(),
        size: position.bubble_size,
        box_shadow: appearance.bubble_shadow.then_some(BUBBLE_SHADOW),
        inset,
        transition: behavior
            .enable_animations
            .then(|| format!("all {}ms ease", behavior.animation_duration)),
        opacity: appearance.opacity,
    }
}

fn chat_style(config: &WidgetConfig, is_open: bool) -> ChatStyle {
    let appearance = &config.appearance;
    let position = &config.position;
    let vertical = position.bubble_position.vertical();
    let horizontal = position.bubble_position.horizontal();

    let mut inset = Inset::default();
    let mut transform = None;
    let mut height = Length::Px(position.chat_height);

    match position.chat_position {
        ChatPosition::Corner => {
            let clearance = Some(Length::Px(position.bubble_margin_y + position.bubble_size + BUBBLE_GAP_PX));
            let margin_x = Some(Length::Px(position.bubble_margin_x));
            match vertical {
                VerticalSide::Top => inset.top = clearance,
                VerticalSide::Bottom => inset.bottom = clearance,
            }
            match horizontal {
                HorizontalSide::Left => inset.left = margin_x,
                HorizontalSide::Right => inset.right = margin_x,
            }
        }
        ChatPosition::Center => {
            inset.top = Some(Length::Percent(50.0));
            inset.left = Some(Length::Percent(50.0));
            transform = Some(CENTER_TRANSFORM);
        }
        ChatPosition::Sidebar => {
            inset.top = Some(Length::Zero);
            inset.bottom = Some(Length::Zero);
            height = Length::Percent(100.0);
            match horizontal {
                HorizontalSide::Left => inset.left = Some(Length::Zero),
                HorizontalSide::Right => inset.right = Some(Length::Zero),
            }
        }
    }

    ChatStyle {
        background: panel_background(appearance),
        color: appearance.text_color.clone(),
        font_family: appearance.font_family.clone(),
        font_size: appearance.font_size,
        border_radius: appearance.border_radius,
        border: format!("{}px solid {}", appearance.border_width, appearance.border_color),
        width: Length::Px(position.chat_width),
        height,
        visible: is_open,
        inset,
        transform,
    }
}

fn panel_background(appearance: &WidgetAppearance) -> Background {
    if !appearance.has_gradient {
        return Background::Solid(appearance.background_color.clone());
    }
    let stop = |color: Option<&str>| color.unwrap_or(&appearance.background_color).to_owned();
    Background::LinearGradient {
        angle_deg: PANEL_GRADIENT_DEG,
        from: stop(appearance.gradient_from.as_deref()),
        to: stop(appearance.gradient_to.as_deref()),
    }
}

fn header_style(config: &WidgetConfig) -> HeaderStyle {
    let appearance = &config.appearance;
    let background = if appearance.has_gradient {
        Background::LinearGradient {
            angle_deg: HEADER_GRADIENT_DEG,
            from: appearance.primary_color.clone(),
            to: appearance.secondary_color.clone(),
        }
    } else {
        Background::Solid(appearance.primary_color.clone())
    };
    HeaderStyle { background, visible: config.chat.show_header }
}

#[cfg(test)]
#[path = "style_test.rs"]
mod tests;
