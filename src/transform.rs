//! Size, position, rotation and origin of a primitive.

use glam::{Mat4, Vec3};

/// Width and height in pixels. Always finite and non-negative.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

/// Negative, NaN and infinite extents become zero.
fn extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

impl Size {
    /// Create a size. Components that are negative or not finite are
    /// clamped to zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: extent(width),
            height: extent(height),
        }
    }

    /// Horizontal extent.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Vertical extent.
    pub fn height(self) -> f32 {
        self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

impl From<[f32; 2]> for Size {
    fn from([width, height]: [f32; 2]) -> Self {
        Self::new(width, height)
    }
}

/// Placement of a primitive.
///
/// Position, origin and rotation are applied through the model matrix at
/// draw time. Only the size is baked into vertex data.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform2D {
    size: Size,
    position: Vec3,
    origin: Vec3,
    rotation: f32,
}

impl Transform2D {
    /// Set the size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the position. `z` orders overlapping primitives.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Add `offset` to the position.
    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the rotation around the origin, in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// Add `degrees` to the current rotation. No wraparound is applied.
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    /// Current rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the rotation pivot, in local space.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Current rotation pivot.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Local-to-world matrix: rotate around the origin, then translate by
    /// the position.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position + self.origin)
            * Mat4::from_rotation_z(self.rotation.to_radians())
            * Mat4::from_translation(-self.origin)
    }
}
