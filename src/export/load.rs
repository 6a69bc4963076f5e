//! Background upload and design load systems with task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::AddRecentDesignRequest;
use crate::design::{BackgroundImage, Design};

use super::messages::{OpenDesignRequest, UploadBackgroundRequest};
use super::resources::{AsyncFileOperation, LoadError, OpenDesignTask, UploadBackgroundTask};
use super::results::{OpenResult, UploadResult};
use super::save::SavedDesign;

/// Starts an async background upload. The file is read and
/// decode-validated off the main thread.
pub fn upload_background_system(
    mut commands: Commands,
    mut events: MessageReader<UploadBackgroundRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Loading {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match std::fs::read(&path) {
                Ok(bytes) => match BackgroundImage::from_bytes(bytes) {
                    Ok(background) => UploadResult {
                        path,
                        background: Some(background),
                        error: None,
                    },
                    Err(e) => UploadResult {
                        path,
                        background: None,
                        error: Some(e),
                    },
                },
                Err(e) => UploadResult {
                    path,
                    background: None,
                    error: Some(format!("Failed to read file: {}", e)),
                },
            }
        });

        commands.spawn(UploadBackgroundTask(task));
    }
}

/// Polls upload tasks. A valid image replaces the background; overlays
/// are untouched.
pub fn poll_upload_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut UploadBackgroundTask)>,
    mut async_op: ResMut<AsyncFileOperation>,
    mut design: ResMut<Design>,
    mut load_error: ResMut<LoadError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;

            if let Some(background) = result.background {
                info!(
                    "Background loaded from {:?} ({}x{})",
                    result.path, background.width, background.height
                );
                load_error.message = None;
                design.set_background(background);
            } else if let Some(error) = result.error {
                error!("{}", error);
                load_error.message = Some(error);
            }

            commands.entity(entity).despawn();
        }
    }
}

/// Starts an async design load from an exported JSON file.
pub fn open_design_system(
    mut commands: Commands,
    mut events: MessageReader<OpenDesignRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("design")
            .to_string();

        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Opening {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<SavedDesign>(&json) {
                    Ok(saved) => OpenResult {
                        path,
                        saved: Some(saved),
                        error: None,
                    },
                    Err(e) => OpenResult {
                        path,
                        saved: None,
                        error: Some(format!("Not a valid design file: {}", e)),
                    },
                },
                Err(e) => OpenResult {
                    path,
                    saved: None,
                    error: Some(format!("Failed to read file: {}", e)),
                },
            }
        });

        commands.spawn(OpenDesignTask(task));
    }
}

/// Polls design load tasks. The current document is replaced wholesale
/// on success and left untouched on any failure.
pub fn poll_open_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut OpenDesignTask)>,
    mut async_op: ResMut<AsyncFileOperation>,
    mut design: ResMut<Design>,
    mut load_error: ResMut<LoadError>,
    mut recent_events: MessageWriter<AddRecentDesignRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;

            match result.saved.map(SavedDesign::into_parts) {
                Some(Ok((background, overlays))) => {
                    info!(
                        "Design opened from {:?} ({} texts)",
                        result.path,
                        overlays.len()
                    );
                    load_error.message = None;
                    design.restore(background, overlays);
                    recent_events.write(AddRecentDesignRequest { path: result.path });
                }
                Some(Err(error)) => {
                    error!("{}", error);
                    load_error.message = Some(error);
                }
                None => {
                    if let Some(error) = result.error {
                        error!("{}", error);
                        load_error.message = Some(error);
                    }
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
