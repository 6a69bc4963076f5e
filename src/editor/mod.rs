//! Editor interaction: canvas rendering, drag handling, hit testing,
//! keyboard shortcuts, and the font library backing both of them.

pub mod canvas;
pub mod drag;
pub mod fonts;
pub mod hit_testing;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

pub use canvas::{BackgroundTexture, CanvasRect, percent_from_pointer, screen_from_percent};
pub use drag::DragState;
pub use fonts::FontLibrary;

use crate::design::Design;
use crate::ui::DialogState;

/// Delete or Backspace removes the selected overlay, unless a text field
/// has keyboard focus or a modal dialog is open.
fn handle_delete_shortcut(
    mut contexts: EguiContexts,
    mut design: ResMut<Design>,
    dialog_state: Res<DialogState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    if dialog_state.any_modal_open || ctx.wants_keyboard_input() {
        return Ok(());
    }
    let pressed = ctx.input(|i| {
        i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)
    });
    if pressed && let Some(id) = design.selected {
        design.delete_overlay(id);
        info!("Deleted overlay {:?} via keyboard", id);
    }
    Ok(())
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CanvasRect>()
            .init_resource::<DragState>()
            .init_resource::<BackgroundTexture>()
            .init_resource::<FontLibrary>()
            .add_systems(Startup, fonts::load_fonts)
            .add_systems(Update, canvas::sync_background_texture)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    fonts::install_canvas_fonts,
                    canvas::canvas_ui,
                    handle_delete_shortcut,
                )
                    .chain()
                    .after(crate::ui::toolbar_ui)
                    .after(crate::ui::properties_panel_ui),
            );
    }
}
