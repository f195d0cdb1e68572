//! Device collaborators used by the registration tab
//!
//! Camera, photo library, image manipulation and media library access are
//! provided by the host. Only the call sequence lives in this crate; the
//! permission prompts and picker UI belong to the host.

use crate::constants::PROFILE_IMAGE_WIDTH;
use crate::logger;
use crate::utils::DeviceError;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Options passed to the camera and library pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub allows_editing: bool,
    pub aspect: (u32, u32),
}

impl Default for PickerOptions {
    /// Editable, square crop
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: (1, 1),
        }
    }
}

/// What the picker returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickedImage {
    Cancelled,
    Picked { uri: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

/// Resize + re-encode request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulateOptions {
    pub resize_width: u32,
    pub compress: f32,
    pub format: ImageFormat,
}

impl Default for ManipulateOptions {
    fn default() -> Self {
        Self {
            resize_width: PROFILE_IMAGE_WIDTH,
            compress: 1.0,
            format: ImageFormat::Png,
        }
    }
}

#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn request_camera_permission(&self) -> Result<PermissionStatus, DeviceError>;

    async fn request_media_library_permission(&self) -> Result<PermissionStatus, DeviceError>;

    async fn launch_camera(&self, options: PickerOptions) -> Result<PickedImage, DeviceError>;

    async fn launch_image_library(&self, options: PickerOptions)
        -> Result<PickedImage, DeviceError>;
}

#[async_trait]
pub trait ImageManipulator: Send + Sync {
    /// Returns the uri of the processed image
    async fn manipulate(&self, uri: &str, options: ManipulateOptions)
        -> Result<String, DeviceError>;
}

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn save_to_library(&self, uri: &str) -> Result<(), DeviceError>;
}

/// Where a profile image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Gallery,
}

/// Result of one pick-and-process attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    PermissionDenied,
    Cancelled,
    /// The processed image replaced the avatar. `saved_to_library` is false
    /// when the media library rejected the copy.
    Updated { uri: String, saved_to_library: bool },
    Failed(DeviceError),
}

#[derive(Clone)]
pub struct DeviceServices {
    pub picker: Arc<dyn ImagePicker>,
    pub manipulator: Arc<dyn ImageManipulator>,
    pub library: Arc<dyn MediaLibrary>,
}

impl DeviceServices {
    /// Ask permission, pick, resize. Returns the processed uri on success.
    ///
    /// Saving to the media library happens separately in
    /// [`DeviceServices::save_to_library`] so the caller can show the image
    /// before the copy completes.
    pub async fn pick_and_process(&self, source: ImageSource) -> Result<Option<String>, PickError> {
        let permission = match source {
            ImageSource::Camera => self.picker.request_camera_permission().await,
            ImageSource::Gallery => self.picker.request_media_library_permission().await,
        }
        .map_err(PickError::Device)?;

        if permission != PermissionStatus::Granted {
            logger::log_info(&format!("{:?} permission not granted: {:?}", source, permission));
            return Err(PickError::PermissionDenied);
        }

        let options = PickerOptions::default();
        let picked = match source {
            ImageSource::Camera => self.picker.launch_camera(options).await,
            ImageSource::Gallery => self.picker.launch_image_library(options).await,
        }
        .map_err(PickError::Device)?;

        let uri = match picked {
            PickedImage::Cancelled => return Ok(None),
            PickedImage::Picked { uri } => uri,
        };
        logger::log_debug(&format!("Picked image {}", uri));

        let processed = self
            .manipulator
            .manipulate(&uri, ManipulateOptions::default())
            .await
            .map_err(PickError::Device)?;
        logger::log_debug(&format!("Processed image {}", processed));

        Ok(Some(processed))
    }

    /// Copy a processed image to the device library; failures are logged.
    pub async fn save_to_library(&self, uri: &str) -> bool {
        match self.library.save_to_library(uri).await {
            Ok(()) => true,
            Err(e) => {
                logger::log_warn(&format!("Could not save image to library: {}", e));
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    PermissionDenied,
    Device(DeviceError),
}
