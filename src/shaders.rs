//! GLSL sources for the built-in programs and the named program set
//! primitives draw with.
//!
//! All shaders target GLSL 3.30 core, matching the vertex array objects the
//! primitives rely on.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;

use crate::backend::Backend;
use crate::error::{Error, Result};

/// Vertex shader shared by widgets and triangles.
///
/// Vertex positions are already scaled to the primitive size; the model
/// matrix places and rotates them, the projection maps pixels to clip space.
///
/// # Attributes
///
/// | Location | Name         | Type   |
/// |----------|--------------|--------|
/// | 0        | `aPosition`  | `vec3` |
/// | 1        | `aTexCoord`  | `vec2` |
/// | 2        | `aNormal`    | `vec3` |
///
/// # Uniforms
///
/// | Name          | Type   | Description                         |
/// |---------------|--------|-------------------------------------|
/// | `uProjection` | `mat4` | Orthographic projection of the view |
/// | `uModel`      | `mat4` | Position, origin and rotation       |
pub const PRIMITIVE_VERTEX_SRC: &str = r"#version 330 core

layout (location = 0) in vec3 aPosition;
layout (location = 1) in vec2 aTexCoord;
layout (location = 2) in vec3 aNormal;

uniform mat4 uProjection;
uniform mat4 uModel;

out vec2 vTexCoord;

void main() {
    vTexCoord = aTexCoord;
    gl_Position = uProjection * uModel * vec4(aPosition, 1.0);
}
";

/// Fragment shader shared by widgets and triangles.
///
/// Untextured primitives are drawn opaque white, so a missing texture never
/// samples an unbound unit.
///
/// # Uniforms
///
/// | Name        | Type        | Description                        |
/// |-------------|-------------|------------------------------------|
/// | `uTexture`  | `sampler2D` | Texture unit index (always 0)      |
/// | `uTextured` | `bool`      | Whether a texture is bound         |
pub const PRIMITIVE_FRAGMENT_SRC: &str = r"#version 330 core

in vec2 vTexCoord;

uniform sampler2D uTexture;
uniform bool uTextured;

out vec4 fragColor;

void main() {
    if (uTextured) {
        fragColor = texture(uTexture, vTexCoord);
    } else {
        fragColor = vec4(1.0);
    }
}
";

/// Program name used by [`Widget`](crate::Widget).
pub const WIDGET_PROGRAM: &str = "widget";
/// Program name used by [`Triangle`](crate::Triangle).
pub const TRIANGLE_PROGRAM: &str = "triangle";

/// A linked shader program. Deleted on drop.
pub struct ShaderProgram<B: Backend> {
    backend: Arc<B>,
    raw: B::Program,
    /// Uniform locations by name, looked up on first use. `None` marks a
    /// name the program does not have.
    locations: RefCell<HashMap<String, Option<B::UniformLocation>>>,
}

impl<B: Backend> ShaderProgram<B> {
    /// Compile and link a program.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`] with the driver log on compile or link failure.
    pub fn compile(backend: Arc<B>, vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let raw = backend.compile_program(vertex_src, fragment_src)?;
        log::debug!("linked shader program {raw:?}");
        Ok(Self {
            backend,
            raw,
            locations: RefCell::new(HashMap::new()),
        })
    }

    /// Make this the current program.
    pub fn activate(&self) {
        self.backend.use_program(Some(self.raw));
    }

    /// Set a `mat4` uniform. The program must be active.
    pub fn set_uniform_mat4(&self, name: &str, transpose: bool, matrix: &Mat4) {
        if let Some(location) = self.location(name) {
            self.backend
                .uniform_matrix4(&location, transpose, &matrix.to_cols_array());
        }
    }

    /// Set an `int`, `bool` or sampler uniform. The program must be active.
    pub fn set_uniform_i32(&self, name: &str, value: i32) {
        if let Some(location) = self.location(name) {
            self.backend.uniform_i32(&location, value);
        }
    }

    /// GL ignores writes to inactive uniforms, so a missing one is only
    /// reported once, not treated as an error.
    fn location(&self, name: &str) -> Option<B::UniformLocation> {
        if let Some(cached) = self.locations.borrow().get(name) {
            return cached.clone();
        }
        let location = self.backend.uniform_location(self.raw, name);
        if location.is_none() {
            log::warn!("uniform {name} is not active in program {:?}", self.raw);
        }
        self.locations
            .borrow_mut()
            .insert(name.to_owned(), location.clone());
        location
    }
}

impl<B: Backend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.backend.delete_program(self.raw);
    }
}

/// Programs addressed by name.
pub struct ShaderPack<B: Backend> {
    programs: HashMap<String, ShaderProgram<B>>,
}

impl<B: Backend> Default for ShaderPack<B> {
    fn default() -> Self {
        Self {
            programs: HashMap::new(),
        }
    }
}

impl<B: Backend> ShaderPack<B> {
    /// An empty pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pack holding the built-in `widget` and `triangle` programs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`] if either program fails to build.
    pub fn with_builtin(backend: &Arc<B>) -> Result<Self> {
        let mut pack = Self::new();
        for name in [WIDGET_PROGRAM, TRIANGLE_PROGRAM] {
            pack.compile(
                Arc::clone(backend),
                name,
                PRIMITIVE_VERTEX_SRC,
                PRIMITIVE_FRAGMENT_SRC,
            )?;
        }
        Ok(pack)
    }

    /// Compile a program and store it under `name`, replacing any previous
    /// program of that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gl`] on compile or link failure; the pack is left
    /// unchanged.
    pub fn compile(
        &mut self,
        backend: Arc<B>,
        name: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<()> {
        let program = ShaderProgram::compile(backend, vertex_src, fragment_src)?;
        self.insert(name, program);
        Ok(())
    }

    /// Store an already linked program under `name`.
    pub fn insert(&mut self, name: &str, program: ShaderProgram<B>) {
        self.programs.insert(name.to_owned(), program);
    }

    /// Look up a program.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingShader`] if no program has that name.
    pub fn get(&self, name: &str) -> Result<&ShaderProgram<B>> {
        self.programs
            .get(name)
            .ok_or_else(|| Error::MissingShader(name.to_owned()))
    }

    /// Whether a program of that name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }
}
