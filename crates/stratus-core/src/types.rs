//! Common value types for stratus-core
//!
//! Small vector and color types shared by the projection and rendering
//! modules. Positions and colors arrive as flat `f32` buffers; these
//! wrappers exist for the places where named components read better than
//! index arithmetic.

use serde::{Deserialize, Serialize};

/// A 2D vector of f32 values (screen-space coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Vec2f {
    fn from(arr: [f32; 2]) -> Self {
        Self { x: arr[0], y: arr[1] }
    }
}

impl From<Vec2f> for [f32; 2] {
    fn from(v: Vec2f) -> Self {
        [v.x, v.y]
    }
}

/// A 3D vector of f32 values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Get the length of the vector
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<[f32; 3]> for Vec3f {
    fn from(arr: [f32; 3]) -> Self {
        Self { x: arr[0], y: arr[1], z: arr[2] }
    }
}

impl From<Vec3f> for [f32; 3] {
    fn from(v: Vec3f) -> Self {
        [v.x, v.y, v.z]
    }
}

/// A 4D vector of f32 values (homogeneous coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4f {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Lift a 3D point to homogeneous coordinates (w = 1)
    pub fn from_point(p: Vec3f) -> Self {
        Self { x: p.x, y: p.y, z: p.z, w: 1.0 }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vec4f {
    fn from(arr: [f32; 4]) -> Self {
        Self { x: arr[0], y: arr[1], z: arr[2], w: arr[3] }
    }
}

impl From<Vec4f> for [f32; 4] {
    fn from(v: Vec4f) -> Self {
        [v.x, v.y, v.z, v.w]
    }
}

/// An RGB color represented as three f32 values (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from hex color (e.g., 0x1a1a1a)
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Map unit-range channels to rasterizer bytes (rounded, 0-255)
    pub fn to_rgb8(&self) -> [u8; 3] {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }

    /// Common colors
    pub fn black() -> Self { Self { r: 0.0, g: 0.0, b: 0.0 } }
    pub fn white() -> Self { Self { r: 1.0, g: 1.0, b: 1.0 } }
}

impl Default for ColorRgb {
    fn default() -> Self {
        Self::black()
    }
}

impl From<[f32; 3]> for ColorRgb {
    fn from(arr: [f32; 3]) -> Self {
        Self { r: arr[0], g: arr[1], b: arr[2] }
    }
}

impl From<ColorRgb> for [f32; 3] {
    fn from(c: ColorRgb) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3f_length() {
        let v = Vec3f::new(3.0, 4.0, 0.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec4f_from_point() {
        let v = Vec4f::from_point(Vec3f::new(1.0, 2.0, 3.0));
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_color_from_hex() {
        let color = ColorRgb::from_hex(0xFF0000);
        assert!((color.r - 1.0).abs() < 1e-6);
        assert!(color.g.abs() < 1e-6);
        assert!(color.b.abs() < 1e-6);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(ColorRgb::new(0.0, 0.5, 1.0).to_rgb8(), [0, 128, 255]);
        // Out-of-range channels are clamped, not wrapped
        assert_eq!(ColorRgb::new(-0.5, 1.5, 0.0).to_rgb8(), [0, 255, 0]);
    }
}
