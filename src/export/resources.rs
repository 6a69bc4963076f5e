//! Resource types for file operation state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;

use super::results::{OpenResult, UploadResult, WriteResult};

/// Export errors held for display to the user.
#[derive(Resource, Default)]
pub struct ExportError {
    pub message: Option<String>,
}

/// Upload/open errors held for display to the user.
#[derive(Resource, Default)]
pub struct LoadError {
    pub message: Option<String>,
}

/// Tracks in-flight async file I/O for the modal dialog.
#[derive(Resource, Default)]
pub struct AsyncFileOperation {
    /// Whether an export (PNG or JSON) is in progress
    pub is_exporting: bool,
    /// Whether an upload or design load is in progress
    pub is_loading: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncFileOperation {
    pub fn is_busy(&self) -> bool {
        self.is_exporting || self.is_loading
    }
}

/// Component for a PNG export task
#[derive(Component)]
pub struct ExportImageTask(pub Task<WriteResult>);

/// Component for a JSON export task
#[derive(Component)]
pub struct ExportDesignTask(pub Task<WriteResult>);

/// Component for a background upload task
#[derive(Component)]
pub struct UploadBackgroundTask(pub Task<UploadResult>);

/// Component for a design load task
#[derive(Component)]
pub struct OpenDesignTask(pub Task<OpenResult>);
