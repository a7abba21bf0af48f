//! Per-item icon bitmaps cached on disk as `icons/<item-id>.png`.
//!
//! Entries are keyed by item id alone. Nothing here notices that an item's
//! executable or custom icon changed, so callers must [`IconCache::invalidate`]
//! whenever either path changes.

use crate::types::ItemId;
use image::DynamicImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum IconCacheError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Image error: {0}")]
        Image(#[from] image::ImageError),

        #[error("Resize error: {0}")]
        Resize(#[from] fast_image_resize::ResizeError),

        #[error("No icon could be extracted from {0}")]
        NothingExtracted(PathBuf),
    }
}

use error::IconCacheError;

/// Produces PNG bytes for the icon of a file. Platform front ends plug in the
/// shell thumbnail API here.
pub trait IconExtractor: Send + Sync {
    fn extract(&self, source: &Path) -> Result<Vec<u8>, IconCacheError>;
}

/// Portable extractor: decodes image files (custom icons) and scales them
/// down to icon size. Executables are not images and yield an error.
#[derive(Debug, Clone, Copy)]
pub struct ImageThumbnailExtractor {
    pub size: u32,
}

impl ImageThumbnailExtractor {
    pub const ICON_SIZE: u32 = 32;
}

impl Default for ImageThumbnailExtractor {
    fn default() -> Self {
        Self {
            size: Self::ICON_SIZE,
        }
    }
}

impl IconExtractor for ImageThumbnailExtractor {
    fn extract(&self, source: &Path) -> Result<Vec<u8>, IconCacheError> {
        let src_image = image::open(source)?;
        let (src_width, src_height) = (src_image.width(), src_image.height());

        // Only ever shrink, preserving aspect ratio
        let scale = (self.size as f32 / src_width.max(src_height) as f32).min(1.0);
        let dst_width = ((src_width as f32 * scale) as u32).max(1);
        let dst_height = ((src_height as f32 * scale) as u32).max(1);

        let mut dst_image = DynamicImage::new(dst_width, dst_height, src_image.color());

        let mut resizer = fast_image_resize::Resizer::new();
        resizer.resize(
            &src_image,
            &mut dst_image,
            Some(&fast_image_resize::ResizeOptions::new().resize_alg(
                fast_image_resize::ResizeAlg::Convolution(fast_image_resize::FilterType::Lanczos3),
            )),
        )?;

        let mut png = Vec::new();
        dst_image.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
        Ok(png)
    }
}

pub struct IconCache {
    icons_path: PathBuf,
    extractor: Box<dyn IconExtractor>,
}

impl IconCache {
    pub fn new(icons_path: PathBuf, extractor: impl IconExtractor + 'static) -> Self {
        Self {
            icons_path,
            extractor: Box::new(extractor),
        }
    }

    pub fn cached_path(&self, id: ItemId) -> PathBuf {
        self.icons_path
            .join(format!("{}.png", id.as_uuid().simple()))
    }

    /// Custom icon when set and present on disk, else the executable itself.
    pub fn resolve_source<'a>(file_path: &'a Path, custom_icon: Option<&'a Path>) -> &'a Path {
        match custom_icon {
            Some(custom) if custom.exists() => custom,
            _ => file_path,
        }
    }

    /// Icon for an item, extracting and caching it on first use.
    /// `None` on any failure.
    pub fn get(
        &self,
        file_path: &Path,
        id: ItemId,
        custom_icon: Option<&Path>,
    ) -> Option<DynamicImage> {
        self.try_get(file_path, id, custom_icon)
            .unwrap_or_else(|e| {
                log::warn!("No icon for item {id}: {e}");
                None
            })
    }

    /// `Ok(None)` when the icon source does not exist.
    pub fn try_get(
        &self,
        file_path: &Path,
        id: ItemId,
        custom_icon: Option<&Path>,
    ) -> Result<Option<DynamicImage>, IconCacheError> {
        let source = Self::resolve_source(file_path, custom_icon);
        if !source.exists() {
            return Ok(None);
        }

        let cache_path = self.cached_path(id);
        if !cache_path.exists() {
            self.extract_to_cache(source, &cache_path)?;
        }

        let bytes = std::fs::read(&cache_path)?;
        match image::load_from_memory(&bytes) {
            Ok(icon) => Ok(Some(icon)),
            Err(e) => {
                // Unreadable entry; drop it so the next lookup extracts again
                let _ = std::fs::remove_file(&cache_path);
                Err(e.into())
            }
        }
    }

    pub fn invalidate(&self, id: ItemId) {
        let cache_path = self.cached_path(id);
        match std::fs::remove_file(&cache_path) {
            Ok(()) => log::debug!("Invalidated icon for item {id}"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not invalidate icon {}: {e}", cache_path.display()),
        }
    }

    fn extract_to_cache(&self, source: &Path, cache_path: &Path) -> Result<(), IconCacheError> {
        let png = self.extractor.extract(source)?;
        if png.is_empty() {
            return Err(IconCacheError::NothingExtracted(source.to_path_buf()));
        }

        if let Some(parent) = cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(cache_path, png)?;
        Ok(())
    }
}
