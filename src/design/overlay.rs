//! Overlay types and the fixed style catalogs presented by the editor.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT,
    DEFAULT_OVERLAY_TEXT, DEFAULT_POSITION,
};

/// Opaque, stable identity of an overlay. Assigned once at creation and
/// never reused, even across save/load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

/// Font families the editor offers. Order defines how they are listed,
/// nothing more.
pub const FONT_FAMILIES: &[&str] = &[
    "Montserrat",
    "Arial",
    "Georgia",
    "Impact",
    "Verdana",
    "Courier New",
    "Times New Roman",
];

/// Font size ladder. Sizes are opaque tokens to the document model; only
/// rendering parses them.
pub const FONT_SIZES: &[&str] = &["18px", "24px", "32px", "48px", "64px", "80px", "96px"];

/// Font weight tokens.
pub const FONT_WEIGHTS: &[&str] = &["normal", "bold"];

/// Horizontal alignment of a multi-line overlay within its own block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn display_name(&self) -> &'static str {
        match self {
            TextAlign::Left => "Left",
            TextAlign::Center => "Center",
            TextAlign::Right => "Right",
        }
    }

    pub fn all() -> &'static [TextAlign] {
        &[TextAlign::Left, TextAlign::Center, TextAlign::Right]
    }
}

/// One positioned, styled text layer drawn atop the background.
///
/// `position` is the overlay's anchor in percent of canvas width/height;
/// the text block is rendered centered on it. Values outside [0,100] are
/// legal and simply place the overlay partly or fully off-canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: OverlayId,
    pub text: String,
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub color: String,
    pub text_align: TextAlign,
    pub position: Vec2,
}

impl Overlay {
    /// A freshly added overlay: fixed default style, centered.
    pub fn with_defaults(id: OverlayId) -> Self {
        Self {
            id,
            text: DEFAULT_OVERLAY_TEXT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            color: DEFAULT_COLOR.to_string(),
            text_align: TextAlign::default(),
            position: Vec2::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1),
        }
    }
}

/// Partial attribute patch applied to an overlay by id. Unset fields keep
/// their prior values (merge, not replace).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPatch {
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub text_align: Option<TextAlign>,
    pub position: Option<Vec2>,
}

impl OverlayPatch {
    pub fn position(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, overlay: &mut Overlay) {
        if let Some(text) = &self.text {
            overlay.text = text.clone();
        }
        if let Some(family) = &self.font_family {
            overlay.font_family = family.clone();
        }
        if let Some(size) = &self.font_size {
            overlay.font_size = size.clone();
        }
        if let Some(weight) = &self.font_weight {
            overlay.font_weight = weight.clone();
        }
        if let Some(color) = &self.color {
            overlay.color = color.clone();
        }
        if let Some(align) = self.text_align {
            overlay.text_align = align;
        }
        if let Some(position) = self.position {
            overlay.position = position;
        }
    }
}

/// Parse a size token from the ladder ("48px") into pixels. Falls back to
/// the default size for tokens the catalog never produced.
pub fn px_from_token(token: &str) -> f32 {
    token
        .strip_suffix("px")
        .and_then(|n| n.trim().parse::<f32>().ok())
        .unwrap_or(48.0)
}

/// Parse a CSS-style color literal: `#RGB`, `#RRGGBB`, `#RRGGBBAA`, or
/// `rgb(r, g, b)` / `rgba(r, g, b, a)`. Returns RGBA bytes.
pub fn parse_color(value: &str) -> Option<[u8; 4]> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(body) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        return parse_functional(body.strip_suffix(')')?);
    }
    None
}

fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    // Length is in bytes; multi-byte input must be rejected before slicing
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let nibble = c.to_digit(16)? as u8;
                out[i] = nibble << 4 | nibble;
            }
            Some(out)
        }
        6 | 8 => {
            let mut out = [0u8, 0, 0, 255];
            for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
                out[i] = u8::from_str_radix(std::str::from_utf8(pair).ok()?, 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<[u8; 4]> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = parts[0].parse::<f32>().ok()?;
    let g = parts[1].parse::<f32>().ok()?;
    let b = parts[2].parse::<f32>().ok()?;
    let a = if parts.len() == 4 {
        parts[3].parse::<f32>().ok()? * 255.0
    } else {
        255.0
    };
    Some([
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
        a.clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_catalogs() {
        assert!(FONT_FAMILIES.contains(&DEFAULT_FONT_FAMILY));
        assert!(FONT_SIZES.contains(&DEFAULT_FONT_SIZE));
        assert!(FONT_WEIGHTS.contains(&DEFAULT_FONT_WEIGHT));
    }

    #[test]
    fn test_with_defaults() {
        let overlay = Overlay::with_defaults(OverlayId(7));
        assert_eq!(overlay.id, OverlayId(7));
        assert_eq!(overlay.text, DEFAULT_OVERLAY_TEXT);
        assert_eq!(overlay.font_family, "Montserrat");
        assert_eq!(overlay.font_size, "48px");
        assert_eq!(overlay.font_weight, "bold");
        assert_eq!(overlay.text_align, TextAlign::Center);
        assert_eq!(overlay.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_patch_merge_leaves_other_fields() {
        let mut overlay = Overlay::with_defaults(OverlayId(1));
        let before = overlay.clone();
        let patch = OverlayPatch {
            color: Some("#FF0000".to_string()),
            ..OverlayPatch::default()
        };
        patch.apply_to(&mut overlay);
        assert_eq!(overlay.color, "#FF0000");
        assert_eq!(overlay.text, before.text);
        assert_eq!(overlay.font_family, before.font_family);
        assert_eq!(overlay.font_size, before.font_size);
        assert_eq!(overlay.font_weight, before.font_weight);
        assert_eq!(overlay.text_align, before.text_align);
        assert_eq!(overlay.position, before.position);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut overlay = Overlay::with_defaults(OverlayId(1));
        let before = overlay.clone();
        assert!(OverlayPatch::default().is_empty());
        OverlayPatch::default().apply_to(&mut overlay);
        assert_eq!(overlay, before);
    }

    #[test]
    fn test_text_align_serde_tokens() {
        assert_eq!(serde_json::to_string(&TextAlign::Left).unwrap(), "\"left\"");
        assert_eq!(
            serde_json::to_string(&TextAlign::Center).unwrap(),
            "\"center\""
        );
        assert_eq!(
            serde_json::from_str::<TextAlign>("\"right\"").unwrap(),
            TextAlign::Right
        );
    }

    #[test]
    fn test_px_from_token() {
        assert_eq!(px_from_token("18px"), 18.0);
        assert_eq!(px_from_token("96px"), 96.0);
        // Unknown tokens fall back to the default size
        assert_eq!(px_from_token("huge"), 48.0);
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_color("#fff"), Some([255, 255, 255, 255]));
        assert_eq!(parse_color("#00000080"), Some([0, 0, 0, 128]));
    }

    #[test]
    fn test_parse_color_functional() {
        assert_eq!(parse_color("rgb(255, 128, 0)"), Some([255, 128, 0, 255]));
        assert_eq!(parse_color("rgba(0, 0, 0, 0.5)"), Some([0, 0, 0, 127]));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("blue-ish"), None);
        assert_eq!(parse_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_parse_color_rejects_multibyte_input() {
        // 6 and 8 bytes long, but not 6/8 characters; must not panic
        assert_eq!(parse_color("#aééa"), None);
        assert_eq!(parse_color("#ааа"), None);
        assert_eq!(parse_color("#ab\u{e9}f\u{e9}b"), None);
    }
}
