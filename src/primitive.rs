//! Drawable primitives: a transform, an optional texture and the GPU
//! resources that mirror them.
//!
//! Setters only touch CPU state. [`Primitive::draw`] realizes GPU resources
//! on first use and re-uploads vertex or texture data only when the
//! corresponding [`SyncState`] says the GPU copy is stale.

use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use glam::Vec3;

use crate::backend::Backend;
use crate::context::RenderContext;
use crate::error::{Error, Result};
use crate::handles::{GpuBuffer, VertexArray};
use crate::shaders::ShaderPack;
use crate::shape::{Quad, Shape, Tri};
use crate::sync::{PendingWork, SyncState};
use crate::texture::Texture;
use crate::transform::{Size, Transform2D};
use crate::vertex::{scale_template, Vertex};

/// A textured, sized, placed and rotated rectangle.
pub type Widget<B> = Primitive<Quad, B>;

/// A textured, sized, placed and rotated triangle.
pub type Triangle<B> = Primitive<Tri, B>;

/// A drawable shape of kind `S` on backend `B`.
///
/// # Example
///
/// ```no_run
/// # use std::{rc::Rc, sync::Arc};
/// # use glow_primitives::{Backend, RenderContext, ShaderPack, Size, Texture, Widget};
/// # fn example<B: Backend>(ctx: &mut RenderContext<B>, shaders: &ShaderPack<B>,
/// #                        texture: Rc<Texture<B>>) -> glow_primitives::Result<()> {
/// let mut widget = Widget::with_texture(&texture);
/// widget.set_size(Size::new(50.0, 80.0));
///
/// // Each frame:
/// widget.draw(ctx, shaders)?;
/// # Ok(())
/// # }
/// ```
pub struct Primitive<S: Shape, B: Backend> {
    transform: Transform2D,
    /// Observed, never owned. `None` once reset.
    texture: Option<Weak<Texture<B>>>,
    buffer: Option<GpuBuffer<B>>,
    array: Option<VertexArray<B>>,
    vertex_sync: SyncState,
    texture_sync: SyncState,
    shape: PhantomData<S>,
}

impl<S: Shape, B: Backend> Default for Primitive<S, B> {
    fn default() -> Self {
        Self {
            transform: Transform2D::default(),
            texture: None,
            buffer: None,
            array: None,
            vertex_sync: SyncState::Unallocated,
            texture_sync: SyncState::Unallocated,
            shape: PhantomData,
        }
    }
}

impl<S: Shape, B: Backend> Primitive<S, B> {
    /// An untextured primitive of the default 100×100 size.
    pub fn new() -> Self {
        Self::default()
    }

    /// A primitive showing `texture`.
    pub fn with_texture(texture: &Rc<Texture<B>>) -> Self {
        let mut primitive = Self::new();
        primitive.set_texture(texture);
        primitive
    }

    /// Show `texture`. Its pixels are uploaded on the next draw.
    pub fn set_texture(&mut self, texture: &Rc<Texture<B>>) {
        self.texture = Some(Rc::downgrade(texture));
        self.texture_sync = SyncState::Dirty;
    }

    /// The texture, if one is set and its owner still holds it.
    pub fn texture(&self) -> Option<Rc<Texture<B>>> {
        self.texture.as_ref().and_then(Weak::upgrade)
    }

    /// Stop showing a texture. The texture itself is left untouched.
    pub fn reset_texture(&mut self) {
        self.texture = None;
    }

    /// Resize. Vertex data is re-uploaded on the next draw.
    pub fn set_size(&mut self, size: Size) {
        self.transform.set_size(size);
        self.vertex_sync.invalidate();
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.transform.size()
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
    }

    /// Add `offset` to the position.
    pub fn move_by(&mut self, offset: Vec3) {
        self.transform.move_by(offset);
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.transform.set_rotation(degrees);
    }

    /// Add `degrees` to the rotation.
    pub fn rotate(&mut self, degrees: f32) {
        self.transform.rotate(degrees);
    }

    /// Current rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.transform.rotation()
    }

    /// Set the rotation pivot.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.transform.set_origin(origin);
    }

    /// Current rotation pivot.
    pub fn origin(&self) -> Vec3 {
        self.transform.origin()
    }

    /// The full transform.
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Vertices at the current size, as the next upload would send them.
    pub fn vertices(&self) -> Vec<Vertex> {
        scale_template(S::TEMPLATE, self.transform.size())
    }

    /// What the next [`draw`](Self::draw) will generate or upload.
    pub fn pending(&self) -> PendingWork {
        PendingWork {
            generate_buffer: !self.buffer.as_ref().is_some_and(GpuBuffer::is_generated),
            generate_array: !self.array.as_ref().is_some_and(VertexArray::is_generated),
            upload_vertices: self.vertex_sync.needs_upload(),
            upload_texture: self.texture().is_some() && self.texture_sync.needs_upload(),
        }
    }

    /// Draw with the program named by the shape, synchronizing GPU state
    /// first.
    ///
    /// The texture is uploaded before vertex data, and both before the draw
    /// call. A sync state is only marked clean once its upload went through,
    /// so a failed draw retries the same work next time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingShader`] if the pack has no program for the
    /// shape, and [`Error::Gl`] if a GPU object cannot be created.
    pub fn draw(&mut self, ctx: &mut RenderContext<B>, shaders: &ShaderPack<B>) -> Result<()> {
        let program = shaders.get(S::PROGRAM)?;
        program.activate();

        let backend = Arc::clone(ctx.backend());
        let config = *ctx.config();

        match self.texture() {
            Some(texture) => {
                // Uploading binds as well.
                if self.texture_sync.needs_upload() {
                    texture.upload_to_gpu(config.texture_filter)?;
                    self.texture_sync.mark_synced();
                } else {
                    texture.bind()?;
                }
                program.set_uniform_i32("uTexture", 0);
                program.set_uniform_i32("uTextured", 1);
            }
            None => {
                if self.texture.is_some() {
                    log::debug!("texture dropped by its owner; drawing untextured");
                }
                program.set_uniform_i32("uTextured", 0);
            }
        }

        let buffer = self
            .buffer
            .get_or_insert_with(|| GpuBuffer::new(Arc::clone(&backend)));
        if !buffer.is_generated() {
            buffer.generate()?;
        }
        let array = self
            .array
            .get_or_insert_with(|| VertexArray::new(Arc::clone(&backend)));
        if !array.is_generated() {
            array.generate()?;
        }

        array.bind();
        // The attribute pointers below capture whichever buffer is bound.
        buffer.bind();

        if self.vertex_sync.needs_upload() {
            let vertices = scale_template(S::TEMPLATE, self.transform.size());
            buffer.data(&vertices, config.vertex_usage);
            self.vertex_sync.mark_synced();
        }

        array.declare_layout(&Vertex::ATTRIBUTES);

        program.set_uniform_mat4("uProjection", false, &ctx.projection());
        program.set_uniform_mat4("uModel", false, &self.transform.model_matrix());

        let count = S::TEMPLATE.len();
        let count = i32::try_from(count).map_err(|_| Error::TooManyVertices(count))?;
        log::trace!("drawing {count} vertices with {}", S::PROGRAM);
        backend.draw_arrays(S::TOPOLOGY, 0, count);
        backend.bind_vertex_array(None);

        Ok(())
    }
}

impl<S: Shape, B: Backend> fmt::Debug for Primitive<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("program", &S::PROGRAM)
            .field("transform", &self.transform)
            .field("textured", &self.texture().is_some())
            .field("pending", &self.pending())
            .finish()
    }
}
