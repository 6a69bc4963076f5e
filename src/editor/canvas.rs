//! The canvas: background display, overlay rendering, and the screen-to
//! percent coordinate transform.
//!
//! The canvas rectangle is re-measured every frame from the panel layout
//! and published as [`CanvasRect`], so the drag controller's math stays a
//! pure function of an injected rectangle rather than anything queried
//! from the UI toolkit.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{EguiContexts, EguiTextureHandle, EguiUserTextures, egui};

use crate::constants::{CANVAS_MARGIN, SHADOW_OFFSET};
use crate::design::{Design, Overlay, TextAlign, parse_color, px_from_token};
use crate::theme;
use crate::ui::DialogState;

use super::drag::{DragState, apply_pointer_event, interpret_pointer};
use super::fonts::FontLibrary;
use super::hit_testing::overlay_screen_bounds;

/// The canvas's on-screen rectangle, in window points.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn from_egui(rect: egui::Rect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

/// Pointer position -> anchor percentages. Exact, never clamped: fast
/// drags past an edge produce values outside [0,100] and the overlay
/// simply renders off-canvas. Callers must pass a laid-out (non-empty)
/// rectangle.
pub fn percent_from_pointer(rect: CanvasRect, pointer: Vec2) -> Vec2 {
    Vec2::new(
        (pointer.x - rect.left) / rect.width * 100.0,
        (pointer.y - rect.top) / rect.height * 100.0,
    )
}

/// Anchor percentages -> screen position (inverse of
/// [`percent_from_pointer`]).
pub fn screen_from_percent(rect: CanvasRect, percent: Vec2) -> Vec2 {
    Vec2::new(
        rect.left + percent.x / 100.0 * rect.width,
        rect.top + percent.y / 100.0 * rect.height,
    )
}

/// Aspect-fit an image of the given pixel size into the available rect,
/// centered.
pub fn fit_rect(image_width: u32, image_height: u32, avail: egui::Rect) -> egui::Rect {
    if avail.width() <= 0.0 || avail.height() <= 0.0 || image_width == 0 || image_height == 0 {
        return avail;
    }
    let scale = (avail.width() / image_width as f32).min(avail.height() / image_height as f32);
    let size = egui::vec2(image_width as f32 * scale, image_height as f32 * scale);
    egui::Rect::from_center_size(avail.center(), size)
}

/// Cached egui texture for the current background.
#[derive(Resource, Default)]
pub struct BackgroundTexture {
    revision: u64,
    handle: Option<Handle<Image>>,
    texture_id: Option<egui::TextureId>,
}

/// Re-upload the background texture whenever the document's background
/// revision changes.
pub fn sync_background_texture(
    design: Res<Design>,
    mut cache: ResMut<BackgroundTexture>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    if cache.revision == design.background_revision {
        return;
    }
    cache.revision = design.background_revision;
    cache.handle = None;
    cache.texture_id = None;

    let Some(background) = design.background.as_ref() else {
        return;
    };

    let rgba = match background.decode() {
        Ok(decoded) => decoded.into_rgba8(),
        Err(e) => {
            // set_background validated the bytes, so this is unexpected
            error!("Failed to decode stored background: {}", e);
            return;
        }
    };

    let image = Image::new(
        Extent3d {
            width: rgba.width(),
            height: rgba.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    );
    let handle = images.add(image);
    cache.texture_id = Some(egui_textures.add_image(EguiTextureHandle::Weak(handle.id())));
    cache.handle = Some(handle);
}

/// Central-panel canvas: draws the background and overlays, and feeds
/// pointer input to the drag controller.
#[allow(clippy::too_many_arguments)]
pub fn canvas_ui(
    mut contexts: EguiContexts,
    mut design: ResMut<Design>,
    mut drag_state: ResMut<DragState>,
    mut canvas_rect: ResMut<CanvasRect>,
    background: Res<BackgroundTexture>,
    fonts: Res<FontLibrary>,
    dialog_state: Res<DialogState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(theme::CANVAS_BACKDROP))
        .show(ctx, |ui| {
            let (panel_rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let painter = ui.painter_at(panel_rect);

            let avail = panel_rect.shrink(CANVAS_MARGIN);
            let image_rect = match design.background.as_ref() {
                Some(bg) => fit_rect(bg.width, bg.height, avail),
                None => avail,
            };
            *canvas_rect = CanvasRect::from_egui(image_rect);

            match background.texture_id {
                Some(texture_id) => {
                    painter.image(
                        texture_id,
                        image_rect,
                        egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                None => {
                    painter.text(
                        image_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Upload a background image to get started",
                        egui::FontId::proportional(16.0),
                        theme::CANVAS_HINT,
                    );
                }
            }

            // Input first so a click-to-move draws at its new spot this frame
            if !dialog_state.any_modal_open
                && canvas_rect.width > 0.0
                && canvas_rect.height > 0.0
            {
                let (pressed, down, pos) = ui.input(|i| {
                    (
                        i.pointer.primary_pressed(),
                        i.pointer.primary_down(),
                        i.pointer.interact_pos().map(|p| Vec2::new(p.x, p.y)),
                    )
                });
                let over_canvas = response.hovered();
                if let Some(event) = interpret_pointer(
                    pressed,
                    down,
                    over_canvas,
                    pos,
                    *canvas_rect,
                    drag_state.is_dragging,
                ) {
                    apply_pointer_event(&mut design, &mut drag_state, *canvas_rect, event);
                }
            }

            draw_overlays(&painter, &design, *canvas_rect, &fonts);
        });
    Ok(())
}

fn draw_overlays(painter: &egui::Painter, design: &Design, rect: CanvasRect, fonts: &FontLibrary) {
    for overlay in &design.overlays {
        if !overlay.text.is_empty() {
            draw_overlay_text(painter, overlay, rect, fonts);
        }
        if design.selected == Some(overlay.id) {
            let (min, max) = overlay_screen_bounds(overlay, rect);
            let bounds =
                egui::Rect::from_min_max(egui::pos2(min.x, min.y), egui::pos2(max.x, max.y))
                    .expand(4.0);
            painter.rect_stroke(
                bounds,
                egui::CornerRadius::same(2),
                egui::Stroke::new(1.5, theme::SELECTION_OUTLINE),
                egui::StrokeKind::Outside,
            );
        }
    }
}

/// Draw one overlay: per-line alignment inside the block, block centered
/// on the anchor, fixed drop shadow underneath.
fn draw_overlay_text(
    painter: &egui::Painter,
    overlay: &Overlay,
    rect: CanvasRect,
    fonts: &FontLibrary,
) {
    let px = px_from_token(&overlay.font_size);
    let font_id = egui::FontId::new(px, fonts.egui_family(&overlay.font_family, &overlay.font_weight));
    let rgba = parse_color(&overlay.color).unwrap_or([255, 255, 255, 255]);
    let color = egui::Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3]);
    let center = screen_from_percent(rect, overlay.position);

    let lines: Vec<&str> = overlay.text.split('\n').collect();
    let galleys: Vec<_> = lines
        .iter()
        .map(|l| painter.layout_no_wrap((*l).to_string(), font_id.clone(), color))
        .collect();
    let shadows: Vec<_> = lines
        .iter()
        .map(|l| painter.layout_no_wrap((*l).to_string(), font_id.clone(), theme::OVERLAY_SHADOW))
        .collect();

    let block_width = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max);
    let block_height: f32 = galleys.iter().map(|g| g.size().y).sum();

    let mut y = center.y - block_height / 2.0;
    for (galley, shadow) in galleys.into_iter().zip(shadows) {
        let x = match overlay.text_align {
            TextAlign::Left => center.x - block_width / 2.0,
            TextAlign::Center => center.x - galley.size().x / 2.0,
            TextAlign::Right => center.x + block_width / 2.0 - galley.size().x,
        };
        let height = galley.size().y;
        painter.galley(
            egui::pos2(x + SHADOW_OFFSET, y + SHADOW_OFFSET),
            shadow,
            theme::OVERLAY_SHADOW,
        );
        painter.galley(egui::pos2(x, y), galley, color);
        y += height;
    }
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

    #[test]
    fn test_percent_from_pointer_formula() {
        let pos = percent_from_pointer(rect(), Vec2::new(500.0, 350.0));
        assert_eq!(pos, Vec2::new(50.0, 50.0));

        let pos = percent_from_pointer(rect(), Vec2::new(100.0, 50.0));
        assert_eq!(pos, Vec2::new(0.0, 0.0));

        let pos = percent_from_pointer(rect(), Vec2::new(900.0, 650.0));
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_percent_from_pointer_is_not_clamped() {
        // Fast pointer movement past an edge: values leave [0,100]
        let pos = percent_from_pointer(rect(), Vec2::new(980.0, 20.0));
        assert_eq!(pos, Vec2::new(110.0, -5.0));
    }

    #[test]
    fn test_screen_from_percent_inverts_the_formula() {
        let original = Vec2::new(512.0, 123.0);
        let percent = percent_from_pointer(rect(), original);
        let screen = screen_from_percent(rect(), percent);
        assert!((screen - original).length() < 1e-3);
    }

    #[test]
    fn test_fit_rect_preserves_aspect() {
        let avail = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1000.0, 500.0));

        // Wide image bound by height
        let fitted = fit_rect(200, 100, avail);
        assert_eq!(fitted.height(), 500.0);
        assert_eq!(fitted.width(), 1000.0);

        // Tall image bound by height too
        let fitted = fit_rect(100, 200, avail);
        assert_eq!(fitted.height(), 500.0);
        assert_eq!(fitted.width(), 250.0);
        assert_eq!(fitted.center(), avail.center());
    }

    #[test]
    fn test_fit_rect_degenerate_inputs() {
        let avail = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        assert_eq!(fit_rect(0, 0, avail), avail);
    }

    #[test]
    fn test_canvas_rect_contains() {
        let r = rect();
        assert!(r.contains(Vec2::new(100.0, 50.0)));
        assert!(r.contains(Vec2::new(900.0, 650.0)));
        assert!(!r.contains(Vec2::new(99.0, 50.0)));
        assert!(!r.contains(Vec2::new(500.0, 651.0)));
    }
}
