//! [`Backend`] implementation over a [`glow::Context`].

use std::marker::PhantomData;

use glow::{HasContext, PixelUnpackData};

use crate::backend::{Backend, Topology, VertexAttribute};
use crate::config::{BufferUsage, TextureFilter};
use crate::error::{Error, Result};

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// Convert a `u32` dimension to the `i32` GL expects.
fn gl_size(value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Gl(format!("dimension {value} exceeds i32::MAX")))
}

/// OpenGL backend driven through glow.
///
/// All GL calls are issued on the wrapped context. The backend does not make
/// the context current; that is the windowing layer's job.
///
/// The backend is neither `Send` nor `Sync`, and neither is anything holding
/// it, so GL objects are always used and deleted on the thread that created
/// the backend:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<glow_primitives::Texture<glow_primitives::GlowBackend>>();
/// ```
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<std::sync::Arc<glow_primitives::GlowBackend>>();
/// ```
pub struct GlowBackend {
    gl: glow::Context,
    /// Pins the backend to the thread owning the current context.
    _not_send: PhantomData<*const ()>,
}

impl GlowBackend {
    /// Wrap a glow context.
    ///
    /// # Safety
    ///
    /// The context must be valid and current on the calling thread for as
    /// long as this backend, or any handle, texture or program created
    /// through it, is alive. Every method of [`Backend`] issues raw GL calls
    /// under that assumption.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            _not_send: PhantomData,
        }
    }

    /// Access the underlying context, for GL calls outside this crate.
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

impl Backend for GlowBackend {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Texture = glow::Texture;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_buffer(&self) -> Result<Self::Buffer> {
        unsafe { self.gl.create_buffer() }.map_err(Error::Gl)
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) };
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) };
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        let usage = match usage {
            BufferUsage::StaticDraw => glow::STATIC_DRAW,
            BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
            BufferUsage::StreamDraw => glow::STREAM_DRAW,
        };
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, usage);
        }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray> {
        unsafe { self.gl.create_vertex_array() }.map_err(Error::Gl)
    }

    fn delete_vertex_array(&self, array: Self::VertexArray) {
        unsafe { self.gl.delete_vertex_array(array) };
    }

    fn bind_vertex_array(&self, array: Option<Self::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(array) };
    }

    fn vertex_attribute(&self, attribute: &VertexAttribute) {
        unsafe {
            self.gl.enable_vertex_attrib_array(attribute.location);
            self.gl.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components,
                glow::FLOAT,
                false,
                attribute.stride,
                attribute.offset,
            );
        }
    }

    fn create_texture(&self) -> Result<Self::Texture> {
        unsafe { self.gl.create_texture() }.map_err(Error::Gl)
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) };
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0);
            self.gl.bind_texture(glow::TEXTURE_2D, texture);
        }
    }

    fn texture_image_rgba(
        &self,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: TextureFilter,
    ) -> Result<()> {
        let w = gl_size(width)?;
        let h = gl_size(height)?;
        let filter = match filter {
            TextureFilter::Linear => glow::LINEAR,
            TextureFilter::Nearest => glow::NEAREST,
        };

        // GL constant values are small enough that the cast is always safe.
        #[expect(clippy::cast_possible_wrap)]
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                RGBA8_INTERNAL_FORMAT,
                w,
                h,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(pixels)),
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter as i32);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
        }
        Ok(())
    }

    fn compile_program(&self, vertex_src: &str, fragment_src: &str) -> Result<Self::Program> {
        let gl = &self.gl;
        let program = unsafe { gl.create_program() }.map_err(Error::Gl)?;

        let vs = match compile_shader(gl, glow::VERTEX_SHADER, vertex_src) {
            Ok(vs) => vs,
            Err(err) => {
                unsafe { gl.delete_program(program) };
                return Err(err);
            }
        };
        let fs = match compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) {
            Ok(fs) => fs,
            Err(err) => {
                unsafe {
                    gl.delete_shader(vs);
                    gl.delete_program(program);
                }
                return Err(err);
            }
        };

        unsafe {
            gl.attach_shader(program, vs);
            gl.attach_shader(program, fs);
            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(Error::Gl(format!("Program link error: {log}")));
            }

            gl.detach_shader(program, vs);
            gl.detach_shader(program, fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
        }

        Ok(program)
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) };
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) };
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn uniform_matrix4(&self, location: &Self::UniformLocation, transpose: bool, value: &[f32; 16]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(location), transpose, value);
        }
    }

    fn uniform_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe { self.gl.uniform_1_i32(Some(location), value) };
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        let mode = match topology {
            Topology::Triangles => glow::TRIANGLES,
        };
        unsafe { self.gl.draw_arrays(mode, first, count) };
    }
}

/// Compile a single shader stage (vertex or fragment) from source.
fn compile_shader(gl: &glow::Context, shader_type: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(Error::Gl)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::Gl(format!("Shader compile error: {log}")));
        }

        Ok(shader)
    }
}
