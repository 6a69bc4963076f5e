mod background;
mod document;
mod overlay;

pub use background::BackgroundImage;
pub use document::Design;
pub use overlay::{
    FONT_FAMILIES, FONT_SIZES, FONT_WEIGHTS, Overlay, OverlayId, OverlayPatch, TextAlign,
    parse_color, px_from_token,
};

use bevy::prelude::*;

pub struct DesignPlugin;

impl Plugin for DesignPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Design>();
    }
}
