//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and
//! canvas rendering. Modify values here to change the color scheme.

use bevy_egui::egui;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Backdrop behind the canvas (visible around the background image)
pub const CANVAS_BACKDROP: egui::Color32 = egui::Color32::from_rgb(24, 24, 28);

/// Hint text shown before a background is uploaded
pub const CANVAS_HINT: egui::Color32 = egui::Color32::from_rgb(140, 140, 150);

/// Fixed drop shadow drawn under every overlay for legibility
pub const OVERLAY_SHADOW: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 190);

// ============================================================================
// Selection Colors
// ============================================================================

/// Light blue outline around the selected overlay
pub const SELECTION_OUTLINE: egui::Color32 = egui::Color32::from_rgb(51, 153, 255);

// ============================================================================
// Color Swatches
// ============================================================================

/// Fixed swatch palette offered in the properties panel. The committed
/// value is the hex literal; the `Color32` is only for the swatch button.
pub fn color_swatches() -> [(&'static str, &'static str, egui::Color32); 8] {
    [
        ("#FFFFFF", "White", egui::Color32::WHITE),
        ("#000000", "Black", egui::Color32::BLACK),
        ("#FF0000", "Red", egui::Color32::RED),
        ("#FFD700", "Gold", egui::Color32::from_rgb(255, 215, 0)),
        ("#00B140", "Green", egui::Color32::from_rgb(0, 177, 64)),
        ("#1E90FF", "Blue", egui::Color32::from_rgb(30, 144, 255)),
        ("#FF69B4", "Pink", egui::Color32::from_rgb(255, 105, 180)),
        ("#FFA500", "Orange", egui::Color32::from_rgb(255, 165, 0)),
    ]
}
