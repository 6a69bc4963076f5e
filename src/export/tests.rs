//! Unit tests for the export module's wire format.

use bevy::prelude::*;

use crate::design::{BackgroundImage, Design, OverlayId, OverlayPatch, TextAlign};

use super::save::SavedDesign;

fn design_with_background() -> Design {
    let mut design = Design::default();
    design.set_background(BackgroundImage::for_tests(16, 9));
    design
}

#[test]
fn test_saved_design_round_trip_preserves_everything() {
    let mut design = design_with_background();
    let first = design.add_overlay();
    design.update_overlay(
        first,
        OverlayPatch {
            text: Some("Summer Sale".to_string()),
            color: Some("#FFD700".to_string()),
            text_align: Some(TextAlign::Left),
            position: Some(Vec2::new(12.5, 87.5)),
            ..Default::default()
        },
    );
    let second = design.add_overlay();
    design.update_overlay(
        second,
        OverlayPatch {
            font_family: Some("Georgia".to_string()),
            font_size: Some("24px".to_string()),
            font_weight: Some("normal".to_string()),
            ..Default::default()
        },
    );

    let json = serde_json::to_string(&SavedDesign::from_design(&design)).unwrap();
    let restored: SavedDesign = serde_json::from_str(&json).unwrap();
    let (background, overlays) = restored.into_parts().unwrap();

    let bg = background.unwrap();
    assert_eq!((bg.width, bg.height), (16, 9));
    assert_eq!(bg.mime, "image/png");

    assert_eq!(overlays.len(), 2);
    assert_eq!(overlays[0].id, first);
    assert_eq!(overlays[1].id, second);
    assert_eq!(overlays[0].text, "Summer Sale");
    assert_eq!(overlays[0].color, "#FFD700");
    assert_eq!(overlays[0].text_align, TextAlign::Left);
    assert_eq!(overlays[0].position, Vec2::new(12.5, 87.5));
    assert_eq!(overlays[1].font_family, "Georgia");
    assert_eq!(overlays[1].font_size, "24px");
    assert_eq!(overlays[1].font_weight, "normal");
}

#[test]
fn test_restore_from_saved_design_replaces_document() {
    let mut design = design_with_background();
    design.add_overlay();
    let saved = SavedDesign::from_design(&design);

    let mut other = Design::default();
    other.add_overlay();
    other.add_overlay();
    let (background, overlays) = saved.into_parts().unwrap();
    other.restore(background, overlays);

    assert!(other.background.is_some());
    assert_eq!(other.overlays.len(), 1);
    assert!(other.selected.is_none());
    // New overlays never collide with restored ids
    let fresh = other.add_overlay();
    assert_eq!(other.overlays.iter().filter(|o| o.id == fresh).count(), 1);
}

#[test]
fn test_exported_json_uses_camel_case_field_names() {
    let mut design = design_with_background();
    let id = design.add_overlay();
    design.update_overlay(
        id,
        OverlayPatch {
            text: Some("Hello".to_string()),
            color: Some("#FF0000".to_string()),
            ..Default::default()
        },
    );

    let value: serde_json::Value =
        serde_json::to_value(SavedDesign::from_design(&design)).unwrap();

    let template = value["template"].as_str().unwrap();
    assert!(template.starts_with("data:image/png;base64,"));

    let text = &value["texts"][0];
    assert_eq!(text["id"], id.0);
    assert_eq!(text["text"], "Hello");
    assert_eq!(text["fontFamily"], "Montserrat");
    assert_eq!(text["fontSize"], "48px");
    assert_eq!(text["color"], "#FF0000");
    assert_eq!(text["fontWeight"], "bold");
    assert_eq!(text["textAlign"], "center");
    assert_eq!(text["position"]["x"], 50.0);
    assert_eq!(text["position"]["y"], 50.0);
    assert!(value["timestamp"].is_string());
}

#[test]
fn test_design_without_background_exports_null_template() {
    let mut design = Design::default();
    design.add_overlay();
    let saved = SavedDesign::from_design(&design);
    assert!(saved.template.is_none());

    let (background, overlays) = saved.into_parts().unwrap();
    assert!(background.is_none());
    assert_eq!(overlays.len(), 1);
}

#[test]
fn test_corrupt_template_is_rejected() {
    let json = r#"{
        "template": "data:image/png;base64,!!!not-base64!!!",
        "texts": [],
        "timestamp": "2026-08-30T00:00:00.000Z"
    }"#;
    let saved: SavedDesign = serde_json::from_str(json).unwrap();
    assert!(saved.into_parts().is_err());
}

#[test]
fn test_timestamp_is_metadata_only() {
    let json = r##"{
        "texts": [{
            "id": 42,
            "text": "Hi",
            "fontFamily": "Impact",
            "fontSize": "60px",
            "color": "#000000",
            "fontWeight": "normal",
            "textAlign": "right",
            "position": {"x": -10.0, "y": 110.0}
        }],
        "timestamp": "1999-01-01T00:00:00Z"
    }"##;
    let saved: SavedDesign = serde_json::from_str(json).unwrap();
    let (_, overlays) = saved.into_parts().unwrap();
    assert_eq!(overlays[0].id, OverlayId(42));
    // Off-canvas positions survive load unclamped
    assert_eq!(overlays[0].position, Vec2::new(-10.0, 110.0));
}
