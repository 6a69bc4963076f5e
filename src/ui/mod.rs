mod dialogs;
mod properties;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::export::{AsyncFileOperation, ExportError, LoadError};

pub use properties::{PropertiesPanelState, properties_panel_ui};
pub use toolbar::toolbar_ui;

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input and keyboard shortcuts check this to avoid acting while
/// the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    config_reset: Res<ConfigResetNotification>,
    export_error: Res<ExportError>,
    load_error: Res<LoadError>,
    async_op: Res<AsyncFileOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = config_reset.show
        || export_error.message.is_some()
        || load_error.message.is_some()
        || async_op.is_busy();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<PropertiesPanelState>()
            // Toolbar and side panel claim their space before the canvas
            // fills the remainder; chain() enforces the ordering
            .add_systems(
                EguiPrimaryContextPass,
                (toolbar::toolbar_ui, properties::properties_panel_ui).chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dialogs::export_error_dialog_ui,
                    dialogs::load_error_dialog_ui,
                    dialogs::async_operation_modal_ui,
                    dialogs::config_reset_notification_ui,
                )
                    .after(properties::properties_panel_ui),
            )
            .add_systems(First, update_dialog_state);
    }
}
