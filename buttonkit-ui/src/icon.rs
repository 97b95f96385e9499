//! Scalable icon bitmaps

use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;

use crate::geometry::Size;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Failed to load image: {0}")]
    ImageLoadError(#[from] image::ImageError),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

/// A bitmap icon with a logical size that is re-rendered for the current
/// display scale.
///
/// The decoded source image is kept so every rescale starts from the original
/// pixels instead of a previously scaled copy.
#[derive(Clone)]
pub struct Icon {
    source: Arc<RgbaImage>,
    logical: (u32, u32),
    scale: f32,
    bitmap: RgbaImage,
}

impl Icon {
    /// Decode an icon from image bytes, using the image dimensions as the logical size.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IconError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    /// Load an icon from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let logical = image.dimensions();
        Self {
            bitmap: image.clone(),
            source: Arc::new(image),
            logical,
            scale: 1.0,
        }
    }

    /// Set the logical size (before scaling), keeping the current scale
    pub fn with_logical_size(mut self, width: u32, height: u32) -> Self {
        self.logical = (width.max(1), height.max(1));
        self.regenerate();
        self
    }

    /// Square logical size, the usual way icons are requested
    pub fn with_px(self, px: u32) -> Self {
        self.with_logical_size(px, px)
    }

    /// Re-render for a new display scale factor
    pub fn rescale(&mut self, scale: f32) {
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("Ignoring invalid icon scale factor {}", scale);
            return;
        }
        if (self.scale - scale).abs() < f32::EPSILON {
            return;
        }
        self.scale = scale;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let width = ((self.logical.0 as f32 * self.scale).round() as u32).max(1);
        let height = ((self.logical.1 as f32 * self.scale).round() as u32).max(1);
        if self.source.dimensions() == (width, height) {
            self.bitmap = (*self.source).clone();
        } else {
            self.bitmap = imageops::resize(&*self.source, width, height, FilterType::Lanczos3);
        }
        log::debug!(
            "Icon regenerated at {}x{} (scale {})",
            width, height, self.scale
        );
    }

    /// Current bitmap size in pixels
    pub fn size(&self) -> Size {
        let (w, h) = self.bitmap.dimensions();
        Size::new(w as f32, h as f32)
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.logical
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }
}

impl std::fmt::Debug for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Icon")
            .field("logical", &self.logical)
            .field("scale", &self.scale)
            .field("size", &self.bitmap.dimensions())
            .finish()
    }
}

/// Convenience function to load an icon from a file path.
pub fn icon(path: impl AsRef<Path>) -> Result<Icon, IconError> {
    Icon::from_path(path)
}

/// Convenience function to decode an icon from embedded bytes.
pub fn icon_bytes(bytes: &[u8]) -> Result<Icon, IconError> {
    Icon::from_bytes(bytes)
}
