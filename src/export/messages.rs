//! Message types for file operations.

use bevy::prelude::*;
use std::path::PathBuf;

/// Request to load an image file as the design background.
#[derive(Message)]
pub struct UploadBackgroundRequest {
    pub path: PathBuf,
}

/// Request to flatten the design into a PNG at the given path.
#[derive(Message)]
pub struct ExportImageRequest {
    pub path: PathBuf,
}

/// Request to serialize the design to JSON at the given path.
#[derive(Message)]
pub struct ExportDesignRequest {
    pub path: PathBuf,
}

/// Request to load a previously exported design JSON.
#[derive(Message)]
pub struct OpenDesignRequest {
    pub path: PathBuf,
}
