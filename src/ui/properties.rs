//! Right-hand properties panel for the selected text overlay.
//!
//! Widgets never write into the document directly. Edits accumulate into
//! an [`OverlayPatch`] and are applied in one call at the end of the
//! frame, so a patch either lands whole or not at all.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::constants::QUICK_POSITIONS;
use crate::design::{
    Design, FONT_FAMILIES, FONT_SIZES, FONT_WEIGHTS, OverlayPatch, TextAlign, parse_color,
};
use crate::theme;

/// Panel-local state that is staged rather than committed per keystroke.
#[derive(Resource, Default)]
pub struct PropertiesPanelState {
    /// Custom color text, committed only when Apply validates it
    pub custom_color: String,
}

pub fn properties_panel_ui(
    mut contexts: EguiContexts,
    mut design: ResMut<Design>,
    mut panel_state: ResMut<PropertiesPanelState>,
) -> Result {
    egui::SidePanel::right("properties_panel")
        .resizable(false)
        .default_width(240.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(8.0);
            ui.heading("Text Properties");
            ui.separator();

            let Some(overlay) = design.selected_overlay() else {
                ui.label("No text selected");
                ui.label(
                    egui::RichText::new("Click a text on the canvas or use Add Text.")
                        .color(egui::Color32::GRAY)
                        .size(12.0),
                );
                return;
            };

            let id = overlay.id;
            let mut text = overlay.text.clone();
            let font_family = overlay.font_family.clone();
            let font_size = overlay.font_size.clone();
            let font_weight = overlay.font_weight.clone();
            let color = overlay.color.clone();
            let text_align = overlay.text_align;

            let mut patch = OverlayPatch::default();

            ui.label("Content:");
            if ui.text_edit_multiline(&mut text).changed() {
                patch.text = Some(text);
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Font:");
                egui::ComboBox::from_id_salt("overlay_font_family")
                    .selected_text(&font_family)
                    .show_ui(ui, |ui| {
                        for family in FONT_FAMILIES {
                            if ui
                                .selectable_label(font_family == *family, *family)
                                .clicked()
                            {
                                patch.font_family = Some((*family).to_string());
                            }
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Size:");
                egui::ComboBox::from_id_salt("overlay_font_size")
                    .selected_text(&font_size)
                    .show_ui(ui, |ui| {
                        for size in FONT_SIZES {
                            if ui.selectable_label(font_size == *size, *size).clicked() {
                                patch.font_size = Some((*size).to_string());
                            }
                        }
                    });

                egui::ComboBox::from_id_salt("overlay_font_weight")
                    .selected_text(&font_weight)
                    .show_ui(ui, |ui| {
                        for weight in FONT_WEIGHTS {
                            if ui
                                .selectable_label(font_weight == *weight, *weight)
                                .clicked()
                            {
                                patch.font_weight = Some((*weight).to_string());
                            }
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Align:");
                for align in TextAlign::all() {
                    if ui
                        .selectable_label(text_align == *align, align.display_name())
                        .clicked()
                    {
                        patch.text_align = Some(*align);
                    }
                }
            });

            ui.separator();

            ui.label("Color:");
            ui.horizontal_wrapped(|ui| {
                for (hex, name, swatch) in theme::color_swatches() {
                    let button = egui::Button::new("")
                        .fill(swatch)
                        .min_size(egui::vec2(22.0, 22.0))
                        .stroke(if color == hex {
                            egui::Stroke::new(2.0, theme::SELECTION_OUTLINE)
                        } else {
                            egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
                        });
                    if ui.add(button).on_hover_text(name).clicked() {
                        patch.color = Some(hex.to_string());
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut panel_state.custom_color)
                        .hint_text("#RRGGBB")
                        .desired_width(90.0),
                );
                let valid = parse_color(&panel_state.custom_color).is_some();
                if ui.add_enabled(valid, egui::Button::new("Apply")).clicked() {
                    patch.color = Some(panel_state.custom_color.clone());
                }
                if !valid && !panel_state.custom_color.is_empty() {
                    ui.colored_label(egui::Color32::RED, "Invalid");
                }
            });

            ui.separator();

            ui.label("Position:");
            egui::Grid::new("quick_positions").show(ui, |ui| {
                for (index, (label, x, y)) in QUICK_POSITIONS.iter().enumerate() {
                    if ui.button(*label).clicked() {
                        patch.position = Some(Vec2::new(*x, *y));
                    }
                    if index % 3 == 2 {
                        ui.end_row();
                    }
                }
            });

            ui.separator();

            if ui
                .add(
                    egui::Button::new(egui::RichText::new("Delete Text").color(egui::Color32::RED)),
                )
                .clicked()
            {
                design.delete_overlay(id);
                info!("Deleted overlay {:?}", id);
                return;
            }

            if !patch.is_empty() {
                design.update_overlay(id, patch);
            }
        });
    Ok(())
}
