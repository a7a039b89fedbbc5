//! Unit-space vertex templates of the primitive kinds.

use crate::backend::Topology;
use crate::shaders::{TRIANGLE_PROGRAM, WIDGET_PROGRAM};
use crate::vertex::TemplateVertex;

/// A primitive kind: its template, topology and program.
///
/// The template is shared read-only by every primitive of the kind; per
/// instance scaling always works on a copy.
pub trait Shape {
    /// Name of the program in the [`ShaderPack`](crate::ShaderPack).
    const PROGRAM: &'static str;
    /// Topology used to draw [`TEMPLATE`](Self::TEMPLATE).
    const TOPOLOGY: Topology;
    /// Vertices in `[0, 1]` space, with their scale masks.
    const TEMPLATE: &'static [TemplateVertex];
}

/// Axis-aligned rectangle made of two triangles.
#[derive(Debug, Copy, Clone, Default)]
pub struct Quad;

const QUAD_TEMPLATE: [TemplateVertex; 6] = [
    TemplateVertex::unit(0.0, 0.0),
    TemplateVertex::unit(1.0, 0.0),
    TemplateVertex::unit(1.0, 1.0),
    TemplateVertex::unit(0.0, 0.0),
    TemplateVertex::unit(1.0, 1.0),
    TemplateVertex::unit(0.0, 1.0),
];

impl Shape for Quad {
    const PROGRAM: &'static str = WIDGET_PROGRAM;
    const TOPOLOGY: Topology = Topology::Triangles;
    const TEMPLATE: &'static [TemplateVertex] = &QUAD_TEMPLATE;
}

/// Right triangle with the right angle at `(1, 0)`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tri;

const TRI_TEMPLATE: [TemplateVertex; 3] = [
    TemplateVertex::unit(0.0, 0.0),
    TemplateVertex::unit(1.0, 0.0),
    TemplateVertex::unit(1.0, 1.0),
];

impl Shape for Tri {
    const PROGRAM: &'static str = TRIANGLE_PROGRAM;
    const TOPOLOGY: Topology = Topology::Triangles;
    const TEMPLATE: &'static [TemplateVertex] = &TRI_TEMPLATE;
}
