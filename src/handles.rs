//! Owning wrappers around GPU buffer and vertex array objects.
//!
//! A handle starts ungenerated; the owner calls [`generate`] once, after
//! checking `is_generated`. The GPU object is deleted when the handle drops.
//!
//! [`generate`]: GpuBuffer::generate

use std::sync::Arc;

use crate::backend::{Backend, VertexAttribute};
use crate::config::BufferUsage;
use crate::error::Result;
use crate::vertex::Vertex;

/// A vertex buffer object.
pub struct GpuBuffer<B: Backend> {
    backend: Arc<B>,
    raw: Option<B::Buffer>,
}

impl<B: Backend> GpuBuffer<B> {
    /// An ungenerated buffer on `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend, raw: None }
    }

    /// Whether the GPU object exists.
    pub fn is_generated(&self) -> bool {
        self.raw.is_some()
    }

    /// Create the GPU object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the driver refuses.
    pub fn generate(&mut self) -> Result<()> {
        debug_assert!(!self.is_generated(), "buffer generated twice");
        let raw = self.backend.create_buffer()?;
        log::debug!("generated vertex buffer {raw:?}");
        self.raw = Some(raw);
        Ok(())
    }

    /// Bind as the current array buffer.
    pub fn bind(&self) {
        self.backend.bind_array_buffer(self.raw);
    }

    /// Replace the whole buffer content with `vertices`. The buffer must be
    /// bound.
    pub fn data(&self, vertices: &[Vertex], usage: BufferUsage) {
        log::trace!("uploading {} vertices", vertices.len());
        self.backend
            .array_buffer_data(bytemuck::cast_slice(vertices), usage);
    }
}

impl<B: Backend> Drop for GpuBuffer<B> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.backend.delete_buffer(raw);
        }
    }
}

/// A vertex array object.
pub struct VertexArray<B: Backend> {
    backend: Arc<B>,
    raw: Option<B::VertexArray>,
}

impl<B: Backend> VertexArray<B> {
    /// An ungenerated vertex array on `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend, raw: None }
    }

    /// Whether the GPU object exists.
    pub fn is_generated(&self) -> bool {
        self.raw.is_some()
    }

    /// Create the GPU object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`](crate::Error::Gl) if the driver refuses.
    pub fn generate(&mut self) -> Result<()> {
        debug_assert!(!self.is_generated(), "vertex array generated twice");
        let raw = self.backend.create_vertex_array()?;
        log::debug!("generated vertex array {raw:?}");
        self.raw = Some(raw);
        Ok(())
    }

    /// Bind as the current vertex array.
    pub fn bind(&self) {
        self.backend.bind_vertex_array(self.raw);
    }

    /// Describe the attributes of the currently bound array buffer on this
    /// (bound) vertex array.
    pub fn declare_layout(&self, attributes: &[VertexAttribute]) {
        for attribute in attributes {
            self.backend.vertex_attribute(attribute);
        }
    }
}

impl<B: Backend> Drop for VertexArray<B> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.backend.delete_vertex_array(raw);
        }
    }
}
