//! Lazily synchronized 2D primitives for OpenGL via [glow].
//!
//! This crate provides [`Widget`] (a rectangle) and [`Triangle`], each with
//! its own size, position, rotation, origin and optional texture. Setters
//! only change CPU-side state; [`Primitive::draw`] creates GPU objects on
//! first use and re-uploads vertex or texture data only when it changed.
//!
//! # Synchronization model
//!
//! - **Vertices** depend only on the size. Position, origin and rotation are
//!   sent as the `uModel` uniform every draw and never trigger an upload.
//! - **Textures** are owned by the application and observed through a weak
//!   reference. Setting a texture schedules exactly one upload.
//! - **Projection** is cached by the [`RenderContext`] and recomputed after
//!   [`RenderContext::resize`] changes the viewport.
//!
//! Every GPU call goes through the [`Backend`] trait. [`GlowBackend`] is the
//! OpenGL implementation.
//!
//! # Safety
//!
//! Creating a [`GlowBackend`] is `unsafe`: the wrapped context must stay
//! valid and current while the backend or anything created from it is alive.
//! Everything else is safe. `GlowBackend` is neither `Send` nor `Sync`, so
//! textures, programs and primitives built on it cannot leave the thread
//! that owns the context.
//!
//! [glow]: https://docs.rs/glow

mod backend;
mod config;
mod context;
mod error;
#[cfg(feature = "glow")]
mod glow_backend;
mod handles;
mod primitive;
mod shaders;
mod shape;
mod sync;
#[cfg(test)]
mod testing;
mod texture;
mod transform;
mod vertex;

pub use backend::{Backend, Topology, VertexAttribute};
pub use config::{BufferUsage, RenderConfig, TextureFilter};
pub use context::{ProjectionCache, RenderContext, Viewport};
pub use error::{Error, Result};
#[cfg(feature = "glow")]
pub use glow_backend::GlowBackend;
pub use handles::{GpuBuffer, VertexArray};
pub use primitive::{Primitive, Triangle, Widget};
pub use shaders::{
    ShaderPack, ShaderProgram, PRIMITIVE_FRAGMENT_SRC, PRIMITIVE_VERTEX_SRC, TRIANGLE_PROGRAM,
    WIDGET_PROGRAM,
};
pub use shape::{Quad, Shape, Tri};
pub use sync::{PendingWork, SyncState};
pub use texture::Texture;
pub use transform::{Size, Transform2D};
pub use vertex::{scale_template, ScaleAxes, TemplateVertex, Vertex};

/// Re-exported so callers can build positions without naming the version.
pub use glam;
