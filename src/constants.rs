//! Centralized constants used across the application.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Fixed default attributes for a freshly added overlay
pub const DEFAULT_OVERLAY_TEXT: &str = "Your text here";
pub const DEFAULT_FONT_FAMILY: &str = "Montserrat";
pub const DEFAULT_FONT_SIZE: &str = "48px";
pub const DEFAULT_FONT_WEIGHT: &str = "bold";
pub const DEFAULT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_POSITION: (f32, f32) = (50.0, 50.0);

/// Suggested file names for the two export dialogs
pub const IMAGE_EXPORT_FILE_NAME: &str = "design.png";
pub const DESIGN_EXPORT_FILE_NAME: &str = "design.json";

/// Drop-shadow offset applied to every overlay, in on-screen pixels
pub const SHADOW_OFFSET: f32 = 2.0;

/// Empty margin kept around the canvas inside the central panel
pub const CANVAS_MARGIN: f32 = 24.0;

/// Directory searched for the font catalog's .ttf files
pub const FONT_DIR: &str = "assets/fonts";

/// Maximum number of recent design files to remember in config
pub const MAX_RECENT_DESIGNS: usize = 5;

/// Quick-position presets: label and anchor percentages
pub const QUICK_POSITIONS: &[(&str, f32, f32)] = &[
    ("Top Left", 15.0, 12.0),
    ("Top", 50.0, 12.0),
    ("Top Right", 85.0, 12.0),
    ("Left", 15.0, 50.0),
    ("Center", 50.0, 50.0),
    ("Right", 85.0, 50.0),
    ("Bottom Left", 15.0, 88.0),
    ("Bottom", 50.0, 88.0),
    ("Bottom Right", 85.0, 88.0),
];
