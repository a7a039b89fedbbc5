//! Per-surface rendering state: backend, viewport, configuration and the
//! cached projection.

use std::sync::Arc;

use glam::Mat4;

use crate::backend::Backend;
use crate::config::RenderConfig;

/// Drawable size in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both extents are positive and finite.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Orthographic projection for a viewport, computed on first use and kept
/// until the viewport changes.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    cached: Option<Mat4>,
}

impl ProjectionCache {
    /// The projection for `viewport`, computing it if the cache is empty.
    ///
    /// An empty viewport (e.g. a minimized window) has no finite projection.
    /// The last good matrix is returned instead, or identity if there is
    /// none, and nothing is cached.
    pub fn get(&mut self, viewport: Viewport, config: &RenderConfig) -> Mat4 {
        if !viewport.is_valid() {
            return self.cached.unwrap_or(Mat4::IDENTITY);
        }
        *self.cached.get_or_insert_with(|| {
            log::trace!(
                "computing projection for {}x{}",
                viewport.width,
                viewport.height
            );
            Mat4::orthographic_rh_gl(
                0.0,
                viewport.width,
                0.0,
                viewport.height,
                config.z_near,
                config.z_far,
            )
        })
    }

    /// Drop the cached matrix.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether a matrix is cached.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

/// Everything a primitive needs from the surface it draws on.
///
/// Create one per GL context and call [`resize`](Self::resize) whenever the
/// drawable size changes.
pub struct RenderContext<B: Backend> {
    backend: Arc<B>,
    viewport: Viewport,
    config: RenderConfig,
    projection: ProjectionCache,
}

impl<B: Backend> RenderContext<B> {
    /// A context with the default configuration.
    pub fn new(backend: Arc<B>, viewport: Viewport) -> Self {
        Self::with_config(backend, viewport, RenderConfig::default())
    }

    /// A context with an explicit configuration.
    pub fn with_config(backend: Arc<B>, viewport: Viewport, config: RenderConfig) -> Self {
        if !viewport.is_valid() {
            log::warn!("render context created with empty viewport {viewport:?}");
        }
        Self {
            backend,
            viewport,
            config,
            projection: ProjectionCache::default(),
        }
    }

    /// The backend every GPU call goes through.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Current drawable size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Update the drawable size. The projection is recomputed on the next
    /// draw if the size actually changed.
    ///
    /// An empty viewport keeps the previous projection until a valid size
    /// arrives.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if viewport.is_valid() {
            log::debug!(
                "viewport resized to {}x{}",
                viewport.width,
                viewport.height
            );
            self.projection.invalidate();
        } else {
            log::warn!("viewport resized to empty {viewport:?}; keeping previous projection");
        }
    }

    /// The projection matching the current viewport.
    pub fn projection(&mut self) -> Mat4 {
        self.projection.get(self.viewport, &self.config)
    }
}
