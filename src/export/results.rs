//! Result types for async file operations.

use std::path::PathBuf;

use crate::design::BackgroundImage;

use super::save::SavedDesign;

/// Result of an async write (PNG or JSON export).
pub struct WriteResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an async background upload.
pub struct UploadResult {
    pub path: PathBuf,
    pub background: Option<BackgroundImage>,
    pub error: Option<String>,
}

/// Result of an async design load.
pub struct OpenResult {
    pub path: PathBuf,
    pub saved: Option<SavedDesign>,
    pub error: Option<String>,
}
