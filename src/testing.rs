//! A [`Backend`] that records calls instead of talking to a GPU.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::backend::{Backend, Topology, VertexAttribute};
use crate::config::{BufferUsage, TextureFilter};
use crate::error::{Error, Result};
use crate::vertex::Vertex;

/// One recorded backend call. Object names are handed out from a single
/// counter starting at 1.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer(Option<u32>),
    BufferData(Vec<Vertex>, BufferUsage),
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribute(VertexAttribute),
    CreateTexture(u32),
    DeleteTexture(u32),
    BindTexture(Option<u32>),
    TextureImage {
        texture: Option<u32>,
        width: u32,
        height: u32,
        filter: TextureFilter,
    },
    CompileProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformMatrix4 {
        name: String,
        transpose: bool,
        value: [f32; 16],
    },
    UniformI32 {
        name: String,
        value: i32,
    },
    DrawArrays {
        topology: Topology,
        first: i32,
        count: i32,
    },
}

#[derive(Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    next_name: Cell<u32>,
    bound_texture: Cell<Option<u32>>,
    fail_creation: Cell<bool>,
    location_queries: Cell<usize>,
    hidden_uniforms: RefCell<HashSet<String>>,
}

impl RecordingBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make every following `create_*` call fail until reset.
    pub fn set_fail_creation(&self, fail: bool) {
        self.fail_creation.set(fail);
    }

    /// Number of `uniform_location` calls so far.
    pub fn location_queries(&self) -> usize {
        self.location_queries.get()
    }

    /// Report `name` as absent from every program.
    pub fn hide_uniform(&self, name: &str) {
        self.hidden_uniforms.borrow_mut().insert(name.to_owned());
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    /// Vertex lists passed to `array_buffer_data`, in order.
    pub fn uploads(&self) -> Vec<Vec<Vertex>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::BufferData(vertices, _) => Some(vertices.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names of the textures that received pixel data, in order.
    pub fn texture_uploads(&self) -> Vec<Option<u32>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::TextureImage { texture, .. } => Some(*texture),
                _ => None,
            })
            .collect()
    }

    pub fn generations(&self) -> usize {
        self.count(|call| matches!(call, Call::CreateBuffer(_) | Call::CreateVertexArray(_)))
    }

    pub fn draws(&self) -> Vec<(Topology, i32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DrawArrays {
                    topology, count, ..
                } => Some((*topology, *count)),
                _ => None,
            })
            .collect()
    }

    /// The last value written to the named `mat4` uniform.
    pub fn last_matrix(&self, name: &str) -> Option<[f32; 16]> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                Call::UniformMatrix4 { name: n, value, .. } if n == name => Some(*value),
                _ => None,
            })
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn create(&self, make: fn(u32) -> Call) -> Result<u32> {
        if self.fail_creation.get() {
            return Err(Error::Gl("out of memory".into()));
        }
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        self.record(make(name));
        Ok(name)
    }
}

fn decode_vertices(data: &[u8]) -> Vec<Vertex> {
    let floats: Vec<f32> = data
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    floats
        .chunks_exact(8)
        .map(|f| Vertex::new([f[0], f[1], f[2]], [f[3], f[4]], [f[5], f[6], f[7]]))
        .collect()
}

impl Backend for RecordingBackend {
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type Program = u32;
    type UniformLocation = String;

    fn create_buffer(&self) -> Result<u32> {
        self.create(Call::CreateBuffer)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.record(Call::BindBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        self.record(Call::BufferData(decode_vertices(data), usage));
    }

    fn create_vertex_array(&self) -> Result<u32> {
        self.create(Call::CreateVertexArray)
    }

    fn delete_vertex_array(&self, array: u32) {
        self.record(Call::DeleteVertexArray(array));
    }

    fn bind_vertex_array(&self, array: Option<u32>) {
        self.record(Call::BindVertexArray(array));
    }

    fn vertex_attribute(&self, attribute: &VertexAttribute) {
        self.record(Call::VertexAttribute(*attribute));
    }

    fn create_texture(&self) -> Result<u32> {
        self.create(Call::CreateTexture)
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.bound_texture.set(texture);
        self.record(Call::BindTexture(texture));
    }

    fn texture_image_rgba(
        &self,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: TextureFilter,
    ) -> Result<()> {
        assert_eq!(pixels.len(), (width * height * 4) as usize);
        self.record(Call::TextureImage {
            texture: self.bound_texture.get(),
            width,
            height,
            filter,
        });
        Ok(())
    }

    fn compile_program(&self, _vertex_src: &str, _fragment_src: &str) -> Result<u32> {
        self.create(Call::CompileProgram)
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        self.location_queries.set(self.location_queries.get() + 1);
        if self.hidden_uniforms.borrow().contains(name) {
            None
        } else {
            Some(name.to_owned())
        }
    }

    fn uniform_matrix4(&self, location: &String, transpose: bool, value: &[f32; 16]) {
        self.record(Call::UniformMatrix4 {
            name: location.clone(),
            transpose,
            value: *value,
        });
    }

    fn uniform_i32(&self, location: &String, value: i32) {
        self.record(Call::UniformI32 {
            name: location.clone(),
            value,
        });
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(Call::DrawArrays {
            topology,
            first,
            count,
        });
    }
}

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
