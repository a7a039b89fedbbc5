//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors surfaced by drawing and resource creation.
#[derive(Error, Debug)]
pub enum Error {
    /// A primitive asked the shader pack for a program it does not contain.
    #[error("shader program not found: {0}")]
    MissingShader(String),
    /// The GL driver refused to create an object or to compile/link a
    /// program. glow reports these failures as plain strings.
    #[error("GL error: {0}")]
    Gl(String),
    /// Texture pixel data could not be decoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// A vertex template is too long for a single `glDrawArrays` call.
    #[error("vertex count {0} exceeds i32::MAX")]
    TooManyVertices(usize),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
