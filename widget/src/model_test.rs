use super::*;
use crate::default_config;

#[test]
fn config_serializes_with_camel_case_wire_names() {
    let json = serde_json::to_value(default_config("bot-1")).unwrap();
    assert_eq!(json["chatbotId"], "bot-1");
    assert_eq!(json["appearance"]["primaryColor"], "#3B82F6");
    assert_eq!(json["position"]["bubblePosition"], "bottom-right");
    assert_eq!(json["position"]["chatPosition"], "corner");
    assert_eq!(json["behavior"]["animationType"], "slide");
    assert_eq!(json["chat"]["allowedFileTypes"][2], "application/pdf");
}

#[test]
fn absent_metadata_is_not_serialized() {
    let json = serde_json::to_value(default_config("bot-1")).unwrap();
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("id"));
    assert!(!obj.contains_key("createdAt"));
    assert!(!obj.contains_key("updatedAt"));
}

#[test]
fn server_copy_with_metadata_and_integer_numbers_deserializes() {
    let mut json = serde_json::to_value(default_config("bot-7")).unwrap();
    json["id"] = serde_json::json!("cfg-1");
    json["createdAt"] = serde_json::json!("2025-01-01T00:00:00Z");
    json["position"]["bubbleSize"] = serde_json::json!(72);
    json["appearance"].as_object_mut().unwrap().remove("gradientFrom");

    let config: WidgetConfig = serde_json::from_value(json).unwrap();
    assert_eq!(config.id.as_deref(), Some("cfg-1"));
    assert_eq!(config.created_at.as_deref(), Some("2025-01-01T00:00:00Z"));
    assert!((config.position.bubble_size - 72.0).abs() < f64::EPSILON);
    assert!(config.appearance.gradient_from.is_none());
}

#[test]
fn unknown_enum_value_is_rejected() {
    let mut json = serde_json::to_value(default_config("bot-1")).unwrap();
    json["position"]["bubblePosition"] = serde_json::json!("middle");
    assert!(serde_json::from_value::<WidgetConfig>(json).is_err());
}

#[test]
fn bubble_position_sides() {
    assert_eq!(BubblePosition::BottomRight.vertical(), VerticalSide::Bottom);
    assert_eq!(BubblePosition::BottomRight.horizontal(), HorizontalSide::Right);
    assert_eq!(BubblePosition::BottomLeft.horizontal(), HorizontalSide::Left);
    assert_eq!(BubblePosition::TopRight.vertical(), VerticalSide::Top);
    assert_eq!(BubblePosition::TopLeft.horizontal(), HorizontalSide::Left);
}

#[test]
fn as_str_matches_serde_value() {
    for pos in BubblePosition::ALL {
        assert_eq!(serde_json::to_value(pos).unwrap(), pos.as_str());
    }
    for pos in ChatPosition::ALL {
        assert_eq!(serde_json::to_value(pos).unwrap(), pos.as_str());
    }
    for kind in AnimationType::ALL {
        assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
    }
}

#[test]
fn selector_labels() {
    assert_eq!(BubblePosition::TopLeft.label(), "Arriba Izquierda");
    assert_eq!(ChatPosition::Sidebar.label(), "Barra lateral");
    assert_eq!(AnimationType::None.label(), "Sin animación");
    assert_eq!(FONT_FAMILIES[0].1, "Inter");
}

#[test]
fn envelope_into_data_respects_success_flag() {
    let ok: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true,"data":5}"#).unwrap();
    assert_eq!(ok.into_data(), Some(5));

    let failed: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":false,"data":5,"message":"nope"}"#).unwrap();
    assert_eq!(failed.message.as_deref(), Some("nope"));
    assert_eq!(failed.into_data(), None);

    let missing: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert_eq!(missing.into_data(), None);
}

#[test]
fn widget_script_uses_camel_case() {
    let script: WidgetScript = serde_json::from_str(
        r#"{"scriptUrl":"https://a/x.js","embedCode":"<script></script>","previewUrl":"https://a/p"}"#,
    )
    .unwrap();
    assert_eq!(script.script_url, "https://a/x.js");
    assert_eq!(script.preview_url, "https://a/p");
}

#[test]
fn fractional_integer_fields_stay_floats_on_the_wire() {
    let mut config = default_config("bot-1");
    config.position.chat_width = 400.5;
    config.position.bubble_margin_x = -4.0;
    let json = serde_json::to_value(config).unwrap();
    assert!(json["position"]["chatWidth"].is_f64());
    assert_eq!(json["position"]["chatWidth"], 400.5);
    assert!(json["position"]["bubbleMarginX"].is_i64());
    assert_eq!(json["position"]["bubbleMarginX"], -4);
}
