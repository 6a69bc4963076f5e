use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::{AppConfig, SaveConfigRequest};
use crate::constants::{DESIGN_EXPORT_FILE_NAME, IMAGE_EXPORT_FILE_NAME};
use crate::design::Design;
use crate::export::{
    ExportDesignRequest, ExportImageRequest, OpenDesignRequest, UploadBackgroundRequest,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Main toolbar: document actions on the left, exports on the right.
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut design: ResMut<Design>,
    mut config: ResMut<AppConfig>,
    mut upload_events: MessageWriter<UploadBackgroundRequest>,
    mut open_events: MessageWriter<OpenDesignRequest>,
    mut image_events: MessageWriter<ExportImageRequest>,
    mut design_events: MessageWriter<ExportDesignRequest>,
    mut save_config_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                if ui
                    .add(egui::Button::new("Add Text").min_size(egui::vec2(0.0, 28.0)))
                    .clicked()
                {
                    let id = design.add_overlay();
                    info!("Added overlay {:?}", id);
                }

                if ui
                    .add(egui::Button::new("Upload Image...").min_size(egui::vec2(0.0, 28.0)))
                    .clicked()
                {
                    let mut dialog = rfd::FileDialog::new()
                        .add_filter("Images", IMAGE_EXTENSIONS)
                        .set_title("Upload Background Image");
                    if let Some(dir) = &config.data.last_background_dir {
                        dialog = dialog.set_directory(dir);
                    }
                    if let Some(path) = dialog.pick_file() {
                        if let Some(parent) = path.parent() {
                            config.data.last_background_dir = Some(parent.to_path_buf());
                            config.dirty = true;
                            save_config_events.write(SaveConfigRequest);
                        }
                        upload_events.write(UploadBackgroundRequest { path });
                    }
                }

                if ui
                    .add(egui::Button::new("Open Design...").min_size(egui::vec2(0.0, 28.0)))
                    .clicked()
                {
                    let mut dialog = rfd::FileDialog::new()
                        .add_filter("Design Files", &["json"])
                        .set_title("Open Design");
                    if let Some(dir) = &config.data.last_export_dir {
                        dialog = dialog.set_directory(dir);
                    }
                    if let Some(path) = dialog.pick_file() {
                        open_events.write(OpenDesignRequest { path });
                    }
                }

                if !config.data.recent_designs.is_empty() {
                    ui.menu_button("Recent", |ui| {
                        let recents = config.data.recent_designs.clone();
                        for path in recents {
                            let label = path
                                .file_name()
                                .and_then(|n| n.to_str())
                                .unwrap_or("design.json")
                                .to_string();
                            if ui.button(label).clicked() {
                                open_events.write(OpenDesignRequest { path });
                                ui.close();
                            }
                        }
                    });
                }

                // Right-aligned export buttons
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let can_export = design.can_export();

                    let export_json = ui.add_enabled(
                        can_export,
                        egui::Button::new("Export JSON").min_size(egui::vec2(0.0, 28.0)),
                    );
                    if export_json.clicked()
                        && let Some(path) = export_dialog(&config, DESIGN_EXPORT_FILE_NAME)
                            .add_filter("Design Files", &["json"])
                            .save_file()
                    {
                        remember_export_dir(&mut config, &path, &mut save_config_events);
                        design_events.write(ExportDesignRequest { path });
                    }

                    let export_png = ui.add_enabled(
                        can_export,
                        egui::Button::new("Export PNG").min_size(egui::vec2(0.0, 28.0)),
                    );
                    if export_png.clicked()
                        && let Some(path) = export_dialog(&config, IMAGE_EXPORT_FILE_NAME)
                            .add_filter("PNG Image", &["png"])
                            .save_file()
                    {
                        remember_export_dir(&mut config, &path, &mut save_config_events);
                        image_events.write(ExportImageRequest { path });
                    }

                    if !can_export {
                        ui.label(
                            egui::RichText::new("Add a background and text to export")
                                .color(egui::Color32::GRAY)
                                .size(12.0),
                        );
                    }
                });
            });
        });
    Ok(())
}

fn export_dialog(config: &AppConfig, file_name: &str) -> rfd::FileDialog {
    let mut dialog = rfd::FileDialog::new().set_file_name(file_name);
    if let Some(dir) = &config.data.last_export_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog
}

fn remember_export_dir(
    config: &mut AppConfig,
    path: &std::path::Path,
    save_events: &mut MessageWriter<SaveConfigRequest>,
) {
    if let Some(parent) = path.parent() {
        config.data.last_export_dir = Some(parent.to_path_buf());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}
