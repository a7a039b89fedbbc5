//! The capability contract between primitives and the GPU.
//!
//! Everything the crate does to GPU state goes through [`Backend`]. The
//! production implementation is [`GlowBackend`](crate::GlowBackend); tests
//! substitute a recording fake so that generation and upload decisions can be
//! checked without a GL context.

use std::fmt;

use crate::config::{BufferUsage, TextureFilter};
use crate::error::Result;

/// Primitive topology for `glDrawArrays`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Topology {
    /// Independent triangles (`GL_TRIANGLES`).
    Triangles,
}

/// One float vertex attribute inside an interleaved vertex buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Distance in bytes between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the attribute inside a vertex.
    pub offset: i32,
}

/// Low-level GPU operations used by handles, textures, shaders and
/// primitives.
///
/// Object handles are plain `Copy` names, as in OpenGL. Binding calls take
/// `Option` so that `None` unbinds. Implementations may assume every call
/// happens on the thread that owns the GPU context.
pub trait Backend {
    /// Buffer object name.
    type Buffer: Copy + fmt::Debug;
    /// Vertex array object name.
    type VertexArray: Copy + fmt::Debug;
    /// Texture object name.
    type Texture: Copy + fmt::Debug;
    /// Linked program name.
    type Program: Copy + fmt::Debug;
    /// Location of a uniform inside a program. Cached per program after the
    /// first lookup.
    type UniformLocation: Clone;

    /// Create a buffer object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the driver refuses.
    fn create_buffer(&self) -> Result<Self::Buffer>;
    /// Delete a buffer object.
    fn delete_buffer(&self, buffer: Self::Buffer);
    /// Bind (or unbind) the `GL_ARRAY_BUFFER` target.
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Replace the whole content of the bound array buffer.
    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage);

    /// Create a vertex array object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the driver refuses.
    fn create_vertex_array(&self) -> Result<Self::VertexArray>;
    /// Delete a vertex array object.
    fn delete_vertex_array(&self, array: Self::VertexArray);
    /// Bind (or unbind) a vertex array object.
    fn bind_vertex_array(&self, array: Option<Self::VertexArray>);
    /// Enable and describe a float attribute on the bound vertex array.
    fn vertex_attribute(&self, attribute: &VertexAttribute);

    /// Create a texture object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the driver refuses.
    fn create_texture(&self) -> Result<Self::Texture>;
    /// Delete a texture object.
    fn delete_texture(&self, texture: Self::Texture);
    /// Bind (or unbind) a 2D texture on texture unit 0.
    fn bind_texture(&self, texture: Option<Self::Texture>);
    /// Upload tightly packed RGBA8 pixels into the bound 2D texture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the dimensions do not fit
    /// the GL API.
    fn texture_image_rgba(
        &self,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: TextureFilter,
    ) -> Result<()>;

    /// Compile and link a program from vertex and fragment sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) with the driver log if
    /// compilation or linking fails.
    fn compile_program(&self, vertex_src: &str, fragment_src: &str) -> Result<Self::Program>;
    /// Delete a program.
    fn delete_program(&self, program: Self::Program);
    /// Make a program current (or none).
    fn use_program(&self, program: Option<Self::Program>);
    /// Look up a uniform by name. `None` if the program has no such active
    /// uniform.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    /// Set a `mat4` uniform on the current program from column-major data.
    fn uniform_matrix4(&self, location: &Self::UniformLocation, transpose: bool, value: &[f32; 16]);
    /// Set an `int`/`bool`/`sampler2D` uniform on the current program.
    fn uniform_i32(&self, location: &Self::UniformLocation, value: i32);

    /// Draw `count` vertices from the bound vertex array.
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
}
