//! Decoded images and their lazily created GL textures.

use std::cell::Cell;
use std::sync::Arc;

use image::RgbaImage;

use crate::backend::Backend;
use crate::config::TextureFilter;
use crate::error::Result;

/// RGBA pixel data plus the GPU texture it is uploaded into.
///
/// Textures are owned by the application (typically in an `Rc`); primitives
/// only observe them. The GL texture object is created on first bind and
/// deleted when the texture drops.
pub struct Texture<B: Backend> {
    backend: Arc<B>,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    /// GL texture name, lazily created. `None` until first bind.
    raw: Cell<Option<B::Texture>>,
    loaded: Cell<bool>,
}

impl<B: Backend> Texture<B> {
    /// Wrap already decoded pixels.
    pub fn from_rgba(backend: Arc<B>, image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            backend,
            pixels: image.into_raw(),
            width,
            height,
            raw: Cell::new(None),
            loaded: Cell::new(false),
        }
    }

    /// Decode an encoded image (PNG or JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`](crate::Error::Image) if decoding fails.
    pub fn from_memory(backend: Arc<B>, data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data)?.to_rgba8();
        Ok(Self::from_rgba(backend, image))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixel data has been uploaded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Bind the texture on unit 0, creating the GL object if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the texture object cannot
    /// be created.
    pub fn bind(&self) -> Result<()> {
        let raw = self.ensure_raw()?;
        self.backend.bind_texture(Some(raw));
        Ok(())
    }

    /// Upload the pixel data. Safe to call again; every call re-uploads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the texture object cannot
    /// be created or the image is too large for GL.
    pub fn upload_to_gpu(&self, filter: TextureFilter) -> Result<()> {
        self.bind()?;
        self.backend
            .texture_image_rgba(self.width, self.height, &self.pixels, filter)?;
        log::trace!("uploaded {}x{} texture", self.width, self.height);
        self.loaded.set(true);
        Ok(())
    }

    fn ensure_raw(&self) -> Result<B::Texture> {
        if let Some(raw) = self.raw.get() {
            return Ok(raw);
        }
        let raw = self.backend.create_texture()?;
        log::debug!("generated texture {raw:?}");
        self.raw.set(Some(raw));
        Ok(raw)
    }
}

impl<B: Backend> Drop for Texture<B> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.backend.delete_texture(raw);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingBackend};

    fn checker(backend: &Arc<RecordingBackend>) -> Texture<RecordingBackend> {
        let image = RgbaImage::from_fn(2, 3, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        Texture::from_rgba(Arc::clone(backend), image)
    }

    #[test]
    fn bind_creates_once() {
        let backend = Arc::new(RecordingBackend::default());
        let texture = checker(&backend);
        assert_eq!((texture.width(), texture.height()), (2, 3));

        texture.bind().unwrap();
        texture.bind().unwrap();
        assert_eq!(backend.count(|c| matches!(c, Call::CreateTexture(_))), 1);
        assert!(!texture.is_loaded());
    }

    #[test]
    fn upload_marks_loaded_and_sends_pixels() {
        let backend = Arc::new(RecordingBackend::default());
        let texture = checker(&backend);
        texture.upload_to_gpu(TextureFilter::Nearest).unwrap();

        assert!(texture.is_loaded());
        assert!(backend.calls().contains(&Call::TextureImage {
            texture: Some(1),
            width: 2,
            height: 3,
            filter: TextureFilter::Nearest,
        }));
    }

    #[test]
    fn drop_deletes_created_texture() {
        let backend = Arc::new(RecordingBackend::default());
        let texture = checker(&backend);
        texture.bind().unwrap();
        drop(texture);
        assert_eq!(backend.calls().last(), Some(&Call::DeleteTexture(1)));

        backend.clear();
        drop(checker(&backend));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn png_bytes_decode_to_rgba() {
        let backend = Arc::new(RecordingBackend::default());
        let source = RgbaImage::from_pixel(5, 7, image::Rgba([10, 20, 30, 255]));
        let mut png = Vec::new();
        source
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let texture = Texture::from_memory(Arc::clone(&backend), &png).unwrap();
        assert_eq!((texture.width(), texture.height()), (5, 7));
        assert!(backend.calls().is_empty());

        texture.upload_to_gpu(TextureFilter::Linear).unwrap();
        assert!(backend.calls().contains(&Call::TextureImage {
            texture: Some(1),
            width: 5,
            height: 7,
            filter: TextureFilter::Linear,
        }));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let backend = Arc::new(RecordingBackend::default());
        let result = Texture::from_memory(backend, b"not an image");
        assert!(matches!(result, Err(crate::Error::Image(_))));
    }
}
