//! CPU rasterization of the design into a flattened PNG.
//!
//! Export renders at the background's native resolution. Font sizes are
//! scaled by the ratio of the background width to the on-screen canvas
//! width, so the exported image matches what the canvas shows.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use image::{ImageFormat, RgbaImage};

use crate::constants::SHADOW_OFFSET;
use crate::design::{Design, Overlay, TextAlign, parse_color, px_from_token};
use crate::editor::{CanvasRect, FontLibrary};

use super::messages::ExportImageRequest;
use super::resources::{AsyncFileOperation, ExportError, ExportImageTask};
use super::results::WriteResult;

/// Shadow color used in the flattened output, matching
/// [`crate::theme::OVERLAY_SHADOW`].
const SHADOW_RGBA: [u8; 4] = [0, 0, 0, 190];

#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    Decode(String),
    FontUnavailable(String),
    Encode(String),
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::Decode(e) => write!(f, "Failed to decode background: {}", e),
            RasterError::FontUnavailable(family) => {
                write!(f, "Font '{}' is not available for export", family)
            }
            RasterError::Encode(e) => write!(f, "Failed to encode PNG: {}", e),
        }
    }
}

impl std::error::Error for RasterError {}

/// Everything a flatten task needs, captured from the live document.
pub struct FlattenJob {
    pub background_bytes: Arc<Vec<u8>>,
    pub overlays: Vec<Overlay>,
    pub fonts: HashMap<String, Arc<Vec<u8>>>,
    /// On-screen canvas width at request time, for the export scale
    pub canvas_width: f32,
}

/// Flatten the job into PNG bytes.
pub fn flatten(job: &FlattenJob) -> Result<Vec<u8>, RasterError> {
    let decoded = image::load_from_memory(&job.background_bytes)
        .map_err(|e| RasterError::Decode(e.to_string()))?;
    let mut canvas = decoded.into_rgba8();
    let (width, height) = canvas.dimensions();

    let scale = if job.canvas_width > 0.0 {
        width as f32 / job.canvas_width
    } else {
        1.0
    };

    let mut font_cache: HashMap<(String, String), FontArc> = HashMap::new();

    for overlay in &job.overlays {
        if overlay.text.is_empty() {
            continue;
        }
        let font = load_face(&mut font_cache, &job.fonts, overlay)?;
        let px = PxScale::from(px_from_token(&overlay.font_size) * scale);
        let color = parse_color(&overlay.color).unwrap_or([255, 255, 255, 255]);

        let anchor_x = overlay.position.x / 100.0 * width as f32;
        let anchor_y = overlay.position.y / 100.0 * height as f32;
        let shadow_offset = SHADOW_OFFSET * scale;

        let scaled = font.as_scaled(px);
        let line_height = scaled.ascent() - scaled.descent() + scaled.line_gap();
        let lines: Vec<&str> = overlay.text.split('\n').collect();
        let widths: Vec<f32> = lines.iter().map(|l| line_width(&scaled, l)).collect();
        let block_width = widths.iter().copied().fold(0.0, f32::max);
        let block_height = line_height * lines.len() as f32;

        let top = anchor_y - block_height / 2.0;
        for (index, (line, line_w)) in lines.iter().zip(&widths).enumerate() {
            let x = match overlay.text_align {
                TextAlign::Left => anchor_x - block_width / 2.0,
                TextAlign::Center => anchor_x - line_w / 2.0,
                TextAlign::Right => anchor_x + block_width / 2.0 - line_w,
            };
            let baseline = top + line_height * index as f32 + scaled.ascent();

            draw_line(
                &mut canvas,
                &font,
                px,
                line,
                x + shadow_offset,
                baseline + shadow_offset,
                SHADOW_RGBA,
            );
            draw_line(&mut canvas, &font, px, line, x, baseline, color);
        }
    }

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(out)
}

fn load_face(
    cache: &mut HashMap<(String, String), FontArc>,
    fonts: &HashMap<String, Arc<Vec<u8>>>,
    overlay: &Overlay,
) -> Result<FontArc, RasterError> {
    let key = (overlay.font_family.clone(), overlay.font_weight.clone());
    if let Some(font) = cache.get(&key) {
        return Ok(font.clone());
    }
    let bytes = face_bytes(fonts, &overlay.font_family, &overlay.font_weight)
        .ok_or_else(|| RasterError::FontUnavailable(overlay.font_family.clone()))?;
    let font = FontArc::try_from_vec((*bytes).clone())
        .map_err(|_| RasterError::FontUnavailable(overlay.font_family.clone()))?;
    cache.insert(key, font.clone());
    Ok(font)
}

/// Bold prefers the dedicated bold face and falls back to the regular
/// one, matching the canvas font lookup.
fn face_bytes(
    fonts: &HashMap<String, Arc<Vec<u8>>>,
    family: &str,
    weight: &str,
) -> Option<Arc<Vec<u8>>> {
    if weight == "bold"
        && let Some(bytes) = fonts.get(&format!("{} Bold", family))
    {
        return Some(bytes.clone());
    }
    fonts.get(family).cloned()
}

fn line_width<F, SF>(scaled: &SF, line: &str) -> f32
where
    F: Font,
    SF: ScaleFont<F>,
{
    let mut width = 0.0;
    let mut previous = None;
    for ch in line.chars() {
        let gid = scaled.font().glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, gid);
        }
        width += scaled.h_advance(gid);
        previous = Some(gid);
    }
    width
}

fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontArc,
    px: PxScale,
    line: &str,
    start_x: f32,
    baseline: f32,
    color: [u8; 4],
) {
    let scaled = font.as_scaled(px);
    let mut caret = start_x;
    let mut previous = None;
    for ch in line.chars() {
        let gid = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, gid);
        }
        let glyph = gid.with_scale_and_position(px, point(caret, baseline));
        caret += scaled.h_advance(gid);
        previous = Some(gid);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x + gx as f32;
                let y = bounds.min.y + gy as f32;
                // Unclamped positions can land off-image
                if x < 0.0 || y < 0.0 || x >= canvas.width() as f32 || y >= canvas.height() as f32 {
                    return;
                }
                let alpha = coverage * color[3] as f32 / 255.0;
                if alpha <= 0.0 {
                    return;
                }
                blend_pixel(canvas, x as u32, y as u32, color, alpha);
            });
        }
    }
}

fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: [u8; 4], alpha: f32) {
    let pixel = canvas.get_pixel_mut(x, y);
    for channel in 0..3 {
        let src = color[channel] as f32;
        let dst = pixel[channel] as f32;
        pixel[channel] = (src * alpha + dst * (1.0 - alpha)).round() as u8;
    }
    let dst_a = pixel[3] as f32 / 255.0;
    pixel[3] = ((alpha + dst_a * (1.0 - alpha)) * 255.0).round() as u8;
}

/// Starts an async PNG export.
pub fn export_image_system(
    mut commands: Commands,
    mut events: MessageReader<ExportImageRequest>,
    design: Res<Design>,
    fonts: Res<FontLibrary>,
    canvas_rect: Res<CanvasRect>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }
        let Some(background) = design.background.as_ref() else {
            warn!("Image export requested without a background");
            continue;
        };
        if design.overlays.is_empty() {
            warn!("Image export requested without any text");
            continue;
        }

        let job = FlattenJob {
            background_bytes: background.bytes.clone(),
            overlays: design.overlays.clone(),
            fonts: fonts.snapshot(),
            canvas_width: canvas_rect.width,
        };
        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("design")
            .to_string();

        async_op.is_exporting = true;
        async_op.operation_description = Some(format!("Exporting {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match flatten(&job) {
                Ok(png) => {
                    if let Err(e) = std::fs::write(&path, png) {
                        WriteResult {
                            path,
                            success: false,
                            error: Some(format!("Failed to write file: {}", e)),
                        }
                    } else {
                        WriteResult {
                            path,
                            success: true,
                            error: None,
                        }
                    }
                }
                Err(e) => WriteResult {
                    path,
                    success: false,
                    error: Some(e.to_string()),
                },
            }
        });

        commands.spawn(ExportImageTask(task));
    }
}

/// Polls PNG export tasks and handles completion.
pub fn poll_export_image_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportImageTask)>,
    mut async_op: ResMut<AsyncFileOperation>,
    mut export_error: ResMut<ExportError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_exporting = false;
            async_op.operation_description = None;

            if result.success {
                info!("Image exported to {:?}", result.path);
                export_error.message = None;
            } else if let Some(error) = result.error {
                error!("{}", error);
                export_error.message = Some(error);
            }

            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{BackgroundImage, OverlayId};

    fn job_with(overlays: Vec<Overlay>) -> FlattenJob {
        let background = BackgroundImage::for_tests(8, 6);
        FlattenJob {
            background_bytes: background.bytes.clone(),
            overlays,
            fonts: HashMap::new(),
            canvas_width: 8.0,
        }
    }

    #[test]
    fn test_flatten_without_text_produces_background_png() {
        let png = flatten(&job_with(vec![])).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 6);
    }

    #[test]
    fn test_flatten_skips_empty_overlay_text() {
        let mut overlay = Overlay::with_defaults(OverlayId(1));
        overlay.text = String::new();
        // No fonts loaded, but empty text never reaches the rasterizer
        assert!(flatten(&job_with(vec![overlay])).is_ok());
    }

    #[test]
    fn test_flatten_reports_missing_font() {
        let overlay = Overlay::with_defaults(OverlayId(1));
        let err = flatten(&job_with(vec![overlay])).unwrap_err();
        assert_eq!(err, RasterError::FontUnavailable("Montserrat".to_string()));
    }

    #[test]
    fn test_flatten_rejects_garbage_background() {
        let job = FlattenJob {
            background_bytes: Arc::new(vec![1, 2, 3, 4]),
            overlays: vec![],
            fonts: HashMap::new(),
            canvas_width: 100.0,
        };
        assert!(matches!(flatten(&job), Err(RasterError::Decode(_))));
    }

    #[test]
    fn test_raster_error_display() {
        let err = RasterError::FontUnavailable("Georgia".to_string());
        assert_eq!(err.to_string(), "Font 'Georgia' is not available for export");
    }

    #[test]
    fn test_blend_pixel_full_alpha_replaces_color() {
        let mut canvas = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
        blend_pixel(&mut canvas, 0, 0, [255, 0, 0, 255], 1.0);
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
