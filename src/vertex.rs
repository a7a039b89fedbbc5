//! Vertex layout and shape templates.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

use crate::backend::VertexAttribute;
use crate::transform::Size;

/// An interleaved vertex, ready for the GPU.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Local-space position. Templates live in `[0, 1]`.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// Surface normal.
    pub normal: [f32; 3],
}

// 32 bytes, well within i32 range.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

impl Vertex {
    /// Attribute layout of [`Vertex`]: position at location 0, UV at 1,
    /// normal at 2.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            components: 3,
            stride: STRIDE,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 2,
            stride: STRIDE,
            offset: 12,
        },
        VertexAttribute {
            location: 2,
            components: 3,
            stride: STRIDE,
            offset: 20,
        },
    ];

    /// Shorthand for template tables.
    pub const fn new(position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

bitflags! {
    /// Which position axes of a template vertex are multiplied by the
    /// primitive's size.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct ScaleAxes: u8 {
        /// X is multiplied by the width.
        const X = 0b01;
        /// Y is multiplied by the height.
        const Y = 0b10;
        /// Both axes scale.
        const XY = Self::X.bits() | Self::Y.bits();
    }
}

/// A vertex of a unit-space shape together with the axes it scales on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TemplateVertex {
    /// The unscaled vertex.
    pub vertex: Vertex,
    /// Axes multiplied by the size when the template is realized.
    pub scale: ScaleAxes,
}

impl TemplateVertex {
    /// Vertex at `(x, y)` in unit space, with UV equal to the position and a
    /// +Z normal. Each axis whose coordinate is non-zero scales.
    pub const fn unit(x: f32, y: f32) -> Self {
        let mut scale = ScaleAxes::empty();
        if x != 0.0 {
            scale = scale.union(ScaleAxes::X);
        }
        if y != 0.0 {
            scale = scale.union(ScaleAxes::Y);
        }
        Self {
            vertex: Vertex::new([x, y, 0.0], [x, y], [0.0, 0.0, 1.0]),
            scale,
        }
    }
}

/// Realize a template at `size`: a fresh copy whose masked position axes are
/// multiplied by width and height. The template itself is never touched.
pub fn scale_template(template: &[TemplateVertex], size: Size) -> Vec<Vertex> {
    template
        .iter()
        .map(|t| {
            let mut vertex = t.vertex;
            if t.scale.contains(ScaleAxes::X) {
                vertex.position[0] *= size.width();
            }
            if t.scale.contains(ScaleAxes::Y) {
                vertex.position[1] *= size.height();
            }
            vertex
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_matches_attribute_offsets() {
        assert_eq!(STRIDE, 32);
        let [position, uv, normal] = Vertex::ATTRIBUTES;
        assert_eq!(uv.offset, position.offset + 4 * position.components);
        assert_eq!(normal.offset, uv.offset + 4 * uv.components);
    }

    #[test]
    fn unit_vertex_masks_follow_coordinates() {
        assert_eq!(TemplateVertex::unit(0.0, 0.0).scale, ScaleAxes::empty());
        assert_eq!(TemplateVertex::unit(1.0, 0.0).scale, ScaleAxes::X);
        assert_eq!(TemplateVertex::unit(0.0, 1.0).scale, ScaleAxes::Y);
        assert_eq!(TemplateVertex::unit(1.0, 1.0).scale, ScaleAxes::XY);
    }

    #[test]
    fn scaling_copies_and_leaves_template_alone() {
        let template = [
            TemplateVertex::unit(0.0, 0.0),
            TemplateVertex::unit(1.0, 0.0),
            TemplateVertex::unit(1.0, 1.0),
        ];
        let scaled = scale_template(&template, Size::new(50.0, 80.0));

        assert_eq!(scaled[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(scaled[1].position, [50.0, 0.0, 0.0]);
        assert_eq!(scaled[2].position, [50.0, 80.0, 0.0]);
        // UVs stay in unit space.
        assert_eq!(scaled[2].uv, [1.0, 1.0]);
        assert_eq!(template[2].vertex.position, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_size_collapses_without_error() {
        let template = [TemplateVertex::unit(1.0, 1.0)];
        let scaled = scale_template(&template, Size::new(0.0, 7.0));
        assert_eq!(scaled[0].position, [0.0, 7.0, 0.0]);
    }

    #[test]
    fn unmasked_axis_keeps_template_value() {
        let template = [TemplateVertex {
            vertex: Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0], [0.0, 0.0, 1.0]),
            scale: ScaleAxes::Y,
        }];
        let scaled = scale_template(&template, Size::new(10.0, 20.0));
        assert_eq!(scaled[0].position, [1.0, 20.0, 0.0]);
    }
}
