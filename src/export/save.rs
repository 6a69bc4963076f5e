//! Design JSON export, the saved wire format, and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use chrono::SecondsFormat;
use futures_lite::future;
use serde::{Deserialize, Serialize};

use crate::config::AddRecentDesignRequest;
use crate::design::{BackgroundImage, Design, Overlay, OverlayId, TextAlign};

use super::messages::ExportDesignRequest;
use super::resources::{AsyncFileOperation, ExportDesignTask, ExportError};
use super::results::WriteResult;

/// Wire format of an exported design. Field names are camelCased and
/// stable so exported files stay portable across versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    /// Background image embedded as a data URI, if one was uploaded
    #[serde(default)]
    pub template: Option<String>,
    pub texts: Vec<SavedText>,
    /// Export time, RFC 3339. Metadata only; ignored on load.
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedText {
    pub id: OverlayId,
    pub text: String,
    pub font_family: String,
    pub font_size: String,
    pub color: String,
    pub font_weight: String,
    pub text_align: TextAlign,
    pub position: SavedPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPosition {
    pub x: f32,
    pub y: f32,
}

impl SavedText {
    pub fn from_overlay(overlay: &Overlay) -> Self {
        Self {
            id: overlay.id,
            text: overlay.text.clone(),
            font_family: overlay.font_family.clone(),
            font_size: overlay.font_size.clone(),
            color: overlay.color.clone(),
            font_weight: overlay.font_weight.clone(),
            text_align: overlay.text_align,
            position: SavedPosition {
                x: overlay.position.x,
                y: overlay.position.y,
            },
        }
    }

    pub fn into_overlay(self) -> Overlay {
        Overlay {
            id: self.id,
            text: self.text,
            font_family: self.font_family,
            font_size: self.font_size,
            color: self.color,
            font_weight: self.font_weight,
            text_align: self.text_align,
            position: Vec2::new(self.position.x, self.position.y),
        }
    }
}

impl SavedDesign {
    pub fn from_design(design: &Design) -> Self {
        Self {
            template: design.background.as_ref().map(|bg| bg.to_data_uri()),
            texts: design.overlays.iter().map(SavedText::from_overlay).collect(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Decode the wire format back into document state. Fails only when
    /// a template is present but its data URI does not decode.
    pub fn into_parts(self) -> Result<(Option<BackgroundImage>, Vec<Overlay>), String> {
        let background = match self.template {
            Some(uri) => Some(BackgroundImage::from_data_uri(&uri)?),
            None => None,
        };
        let overlays = self.texts.into_iter().map(SavedText::into_overlay).collect();
        Ok((background, overlays))
    }
}

/// Starts an async JSON export.
pub fn export_design_system(
    mut commands: Commands,
    mut events: MessageReader<ExportDesignRequest>,
    design: Res<Design>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }
        // The toolbar disables export in this state; guard anyway
        if !design.can_export() {
            warn!("Export requested without a background and at least one text");
            continue;
        }

        let saved = SavedDesign::from_design(&design);
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
            match serde_json::to_string_pretty(&saved) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
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
                    error: Some(format!("Failed to serialize design: {}", e)),
                },
            }
        });

        commands.spawn(ExportDesignTask(task));
    }
}

/// Polls JSON export tasks and handles completion.
pub fn poll_export_design_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportDesignTask)>,
    mut async_op: ResMut<AsyncFileOperation>,
    mut export_error: ResMut<ExportError>,
    mut recent_events: MessageWriter<AddRecentDesignRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_exporting = false;
            async_op.operation_description = None;

            if result.success {
                info!("Design exported to {:?}", result.path);
                export_error.message = None;
                recent_events.write(AddRecentDesignRequest { path: result.path });
            } else if let Some(error) = result.error {
                error!("{}", error);
                export_error.message = Some(error);
            }

            commands.entity(entity).despawn();
        }
    }
}
