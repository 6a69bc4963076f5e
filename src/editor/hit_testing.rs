//! Hit testing for pointer-down events on overlays.
//!
//! Bounds are an approximation from character count and font size rather
//! than shaped glyph metrics, so they stay cheap and independent of any
//! font being loaded. A minimum size keeps short or empty overlays
//! clickable.

use bevy::prelude::*;

use crate::design::{Design, Overlay, OverlayId, px_from_token};

use super::canvas::{CanvasRect, screen_from_percent};

/// Approximate screen-space bounding box (min, max) of an overlay.
pub fn overlay_screen_bounds(overlay: &Overlay, rect: CanvasRect) -> (Vec2, Vec2) {
    let px = px_from_token(&overlay.font_size);
    let lines: Vec<&str> = overlay.text.split('\n').collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    // ~0.5em average advance; floors keep tiny overlays grabbable
    let width = (longest as f32 * px * 0.5).max(40.0);
    let height = (lines.len() as f32 * px).max(20.0);

    let center = screen_from_percent(rect, overlay.position);
    let half = Vec2::new(width / 2.0, height / 2.0);
    (center - half, center + half)
}

/// Check if a screen-space point is inside an overlay's bounds.
pub fn point_in_overlay(point: Vec2, overlay: &Overlay, rect: CanvasRect) -> bool {
    let (min, max) = overlay_screen_bounds(overlay, rect);
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Find the overlay under a screen-space point, topmost (latest-added)
/// first.
pub fn find_overlay_at(design: &Design, rect: CanvasRect, point: Vec2) -> Option<OverlayId> {
    design
        .overlays
        .iter()
        .rev()
        .find(|o| point_in_overlay(point, o, rect))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> CanvasRect {
        CanvasRect {
            left: 100.0,
            top: 50.0,
            width: 800.0,
            height: 600.0,
        }
    }

    fn overlay_at(design: &mut Design, x: f32, y: f32) -> OverlayId {
        let id = design.add_overlay();
        design.update_overlay(id, crate::design::OverlayPatch::position(Vec2::new(x, y)));
        id
    }

    #[test]
    fn test_bounds_are_centered_on_anchor() {
        let mut design = Design::default();
        let id = overlay_at(&mut design, 50.0, 50.0);
        let overlay = design.overlay(id).unwrap().clone();

        let (min, max) = overlay_screen_bounds(&overlay, rect());
        let center = (min + max) / 2.0;
        // Anchor {50,50} is the canvas midpoint: (100+400, 50+300)
        assert_eq!(center, Vec2::new(500.0, 350.0));
    }

    #[test]
    fn test_empty_text_keeps_minimum_bounds() {
        let mut design = Design::default();
        let id = overlay_at(&mut design, 50.0, 50.0);
        design.update_overlay(
            id,
            crate::design::OverlayPatch {
                text: Some(String::new()),
                ..Default::default()
            },
        );
        let overlay = design.overlay(id).unwrap().clone();
        let (min, max) = overlay_screen_bounds(&overlay, rect());
        assert!(max.x - min.x >= 40.0);
        assert!(max.y - min.y >= 20.0);
    }

    #[test]
    fn test_point_in_overlay() {
        let mut design = Design::default();
        let id = overlay_at(&mut design, 50.0, 50.0);
        let overlay = design.overlay(id).unwrap().clone();

        assert!(point_in_overlay(Vec2::new(500.0, 350.0), &overlay, rect()));
        assert!(!point_in_overlay(Vec2::new(120.0, 80.0), &overlay, rect()));
    }

    #[test]
    fn test_find_overlay_prefers_topmost() {
        let mut design = Design::default();
        let below = overlay_at(&mut design, 50.0, 50.0);
        let above = overlay_at(&mut design, 50.0, 50.0);
        assert_ne!(below, above);

        assert_eq!(
            find_overlay_at(&design, rect(), Vec2::new(500.0, 350.0)),
            Some(above)
        );
    }

    #[test]
    fn test_find_overlay_misses_empty_canvas() {
        let design = Design::default();
        assert_eq!(find_overlay_at(&design, rect(), Vec2::new(500.0, 350.0)), None);
    }
}
