//! Render configuration consumed by [`RenderContext`](crate::RenderContext).

/// Usage hint passed to `glBufferData` when uploading vertex data.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded rarely, drawn many times (`GL_STATIC_DRAW`).
    #[default]
    StaticDraw,
    /// Uploaded repeatedly, drawn many times (`GL_DYNAMIC_DRAW`).
    DynamicDraw,
    /// Uploaded once per draw (`GL_STREAM_DRAW`).
    StreamDraw,
}

/// Minification/magnification filter applied to uploaded textures.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextureFilter {
    /// Bilinear filtering (`GL_LINEAR`).
    #[default]
    Linear,
    /// Nearest-neighbour filtering (`GL_NEAREST`), for pixel art.
    Nearest,
}

/// Settings shared by every primitive drawn through one render context.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderConfig {
    /// Near clip plane of the orthographic projection. Primitives at
    /// `z = 0` are only visible when this is below zero.
    pub z_near: f32,
    /// Far clip plane of the orthographic projection.
    pub z_far: f32,
    /// Usage hint for vertex buffer uploads.
    pub vertex_usage: BufferUsage,
    /// Filter used when a texture is uploaded.
    pub texture_filter: TextureFilter,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            z_near: -1.0,
            z_far: 1000.0,
            vertex_usage: BufferUsage::default(),
            texture_filter: TextureFilter::default(),
        }
    }
}
