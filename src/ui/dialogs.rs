//! Modal dialog windows: file errors, in-flight operations, and the
//! config reset notification.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::ConfigResetNotification;
use crate::export::{AsyncFileOperation, ExportError, LoadError};

/// Error dialog for failed exports.
pub fn export_error_dialog_ui(
    mut contexts: EguiContexts,
    mut export_error: ResMut<ExportError>,
) -> Result {
    let Some(error) = export_error.message.clone() else {
        return Ok(());
    };
    egui::Window::new("Export Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(egui::Color32::RED, &error);
            });
            if ui.button("Dismiss").clicked() {
                export_error.message = None;
            }
        });
    Ok(())
}

/// Error dialog for failed uploads and design loads.
pub fn load_error_dialog_ui(
    mut contexts: EguiContexts,
    mut load_error: ResMut<LoadError>,
) -> Result {
    let Some(error) = load_error.message.clone() else {
        return Ok(());
    };
    egui::Window::new("Load Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(egui::Color32::RED, &error);
            });
            if ui.button("Dismiss").clicked() {
                load_error.message = None;
            }
        });
    Ok(())
}

/// Non-dismissable modal shown while file I/O is in flight.
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncFileOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }
    let description = async_op
        .operation_description
        .clone()
        .unwrap_or_else(|| "Working...".to_string());
    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(description);
            });
        });
    Ok(())
}

/// One-time notification that the config file was reset to defaults.
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }
    let reason = notification
        .reason
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());
    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings were reset to defaults.");
            ui.label(egui::RichText::new(reason).color(egui::Color32::GRAY).size(12.0));
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });
    Ok(())
}
