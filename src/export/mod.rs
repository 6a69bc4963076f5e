//! File I/O for the design: background upload, PNG flatten export,
//! structured JSON export, and loading exported designs back in.
//!
//! All file work runs on the [`bevy::tasks::IoTaskPool`]; request
//! messages start a task, poll systems apply the result on the main
//! thread.
//!
//! ## Key Types
//!
//! - [`SavedDesign`] - JSON wire format for exported designs
//! - [`FlattenJob`] / [`flatten`] - CPU rasterization of the design
//! - [`AsyncFileOperation`] - Tracks in-flight I/O for the modal dialog
//!
//! ## Systems
//!
//! - [`upload_background_system`] / [`poll_upload_tasks`]
//! - [`export_image_system`] / [`poll_export_image_tasks`]
//! - [`export_design_system`] / [`poll_export_design_tasks`]
//! - [`open_design_system`] / [`poll_open_tasks`]

mod load;
mod messages;
mod raster;
mod resources;
mod results;
mod save;

#[cfg(test)]
mod tests;

pub use messages::{
    ExportDesignRequest, ExportImageRequest, OpenDesignRequest, UploadBackgroundRequest,
};

pub use resources::{AsyncFileOperation, ExportError, LoadError};

pub use raster::{FlattenJob, RasterError, flatten};
pub use save::{SavedDesign, SavedPosition, SavedText};

pub use load::{open_design_system, poll_open_tasks, poll_upload_tasks, upload_background_system};
pub use raster::{export_image_system, poll_export_image_tasks};
pub use save::{export_design_system, poll_export_design_tasks};

use bevy::prelude::*;

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AsyncFileOperation>()
            .init_resource::<ExportError>()
            .init_resource::<LoadError>()
            .add_message::<UploadBackgroundRequest>()
            .add_message::<ExportImageRequest>()
            .add_message::<ExportDesignRequest>()
            .add_message::<OpenDesignRequest>()
            .add_systems(
                Update,
                (
                    upload_background_system.run_if(on_message::<UploadBackgroundRequest>),
                    export_image_system.run_if(on_message::<ExportImageRequest>),
                    export_design_system.run_if(on_message::<ExportDesignRequest>),
                    open_design_system.run_if(on_message::<OpenDesignRequest>),
                    poll_upload_tasks,
                    poll_export_image_tasks,
                    poll_export_design_tasks,
                    poll_open_tasks,
                ),
            );
    }
}
