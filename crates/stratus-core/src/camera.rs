//! Camera state for scatter rendering
//!
//! The render core never owns a scene graph. Each frame it receives a
//! read-only [`CameraState`] snapshot (projection matrix, model-view matrix,
//! fog parameters) from the owning view layer and projects points through
//! it. Constructors for perspective and orthographic cameras are provided
//! so tests and exports can build realistic states without a scene library.

use serde::{Deserialize, Serialize};

use crate::types::{ColorRgb, Vec3f, Vec4f};

/// 3D vector type
pub type Vec3 = [f32; 3];

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Fog parameters for depth cueing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FogParams {
    /// Distance at which fog starts
    pub near: f32,

    /// Distance at which fog fully covers the base color
    pub far: f32,

    /// Fog color (usually the background color)
    pub color: ColorRgb,
}

impl Default for FogParams {
    fn default() -> Self {
        Self {
            near: 1.0,
            far: 1000.0,
            color: ColorRgb::white(),
        }
    }
}

/// Read-only camera snapshot for one frame
///
/// Owned by the view layer; the core only reads it. Replacing the snapshot
/// wholesale between frames is the only form of camera mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraState {
    /// Projection matrix (camera space to clip space)
    pub projection: Mat4,

    /// Model-view matrix (model space to camera space)
    pub model_view: Mat4,

    /// Fog parameters for 3D depth cueing
    pub fog: FogParams,
}

impl CameraState {
    /// Create a camera state from explicit matrices
    pub fn new(projection: Mat4, model_view: Mat4, fog: FogParams) -> Self {
        Self {
            projection,
            model_view,
            fog,
        }
    }

    /// Identity camera: points project straight to NDC
    pub fn identity(fog: FogParams) -> Self {
        Self::new(identity_matrix(), identity_matrix(), fog)
    }

    /// Perspective camera looking from `eye` toward `target`
    pub fn perspective(eye: Vec3, target: Vec3, fov_degrees: f32, aspect: f32, fog: FogParams) -> Self {
        Self::new(
            perspective(fov_degrees.to_radians(), aspect, 0.1, 1000.0),
            look_at(eye, target, [0.0, 1.0, 0.0]),
            fog,
        )
    }

    /// Orthographic camera for 2D embeddings
    ///
    /// `half_height` is half the visible world-space extent vertically;
    /// shrinking it zooms in.
    pub fn orthographic(eye: Vec3, target: Vec3, half_height: f32, aspect: f32, fog: FogParams) -> Self {
        let half_width = half_height * aspect;
        Self::new(
            orthographic(-half_width, half_width, -half_height, half_height, 0.1, 1000.0),
            look_at(eye, target, [0.0, 1.0, 0.0]),
            fog,
        )
    }

    /// Combined projection * model-view matrix
    pub fn combined(&self) -> Mat4 {
        mat4_multiply(self.projection, self.model_view)
    }

    /// Horizontal projection scale factor
    ///
    /// For an orthographic projection this grows as the camera zooms in;
    /// the 2D point-size curve keys off it.
    pub fn zoom_scale(&self) -> f32 {
        self.projection[0][0]
    }

    /// Transform a model-space point into camera space
    pub fn to_camera_space(&self, point: Vec3f) -> Vec4f {
        mat4_transform(self.model_view, Vec4f::from_point(point))
    }

    /// Project a model-space point to normalized device coordinates
    pub fn project_to_ndc(&self, point: Vec3f) -> Vec3f {
        let clip = mat4_transform(self.combined(), Vec4f::from_point(point));
        let w = if clip.w.abs() > f32::EPSILON { clip.w } else { 1.0 };
        Vec3f::new(clip.x / w, clip.y / w, clip.z / w)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::identity(FogParams::default())
    }
}

// MARK: - Matrix utilities

pub(crate) fn identity_matrix() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub(crate) fn mat4_multiply(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

pub(crate) fn mat4_transform(m: Mat4, v: Vec4f) -> Vec4f {
    let v = v.to_array();
    let mut out = [0.0f32; 4];

    for (col, &value) in v.iter().enumerate() {
        for row in 0..4 {
            out[row] += m[col][row] * value;
        }
    }

    Vec4f::from(out)
}

fn vec_sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn vec_dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn vec_cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn vec_length(v: Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn vec_normalize(v: Vec3) -> Vec3 {
    let len = vec_length(v);
    if len > 0.0001 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

pub(crate) fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = vec_normalize(vec_sub(target, eye));
    let s = vec_normalize(vec_cross(f, up));
    let u = vec_cross(s, f);

    [
        [s[0], u[0], -f[0], 0.0],
        [s[1], u[1], -f[1], 0.0],
        [s[2], u[2], -f[2], 0.0],
        [-vec_dot(s, eye), -vec_dot(u, eye), vec_dot(f, eye), 1.0],
    ]
}

pub(crate) fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let tan_half_fov = (fov / 2.0).tan();

    let mut m = [[0.0; 4]; 4];
    m[0][0] = 1.0 / (aspect * tan_half_fov);
    m[1][1] = 1.0 / tan_half_fov;
    m[2][2] = -(far + near) / (far - near);
    m[2][3] = -1.0;
    m[3][2] = -(2.0 * far * near) / (far - near);

    m
}

pub(crate) fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = [[0.0; 4]; 4];
    m[0][0] = 2.0 / (right - left);
    m[1][1] = 2.0 / (top - bottom);
    m[2][2] = -2.0 / (far - near);
    m[3][0] = -(right + left) / (right - left);
    m[3][1] = -(top + bottom) / (top - bottom);
    m[3][2] = -(far + near) / (far - near);
    m[3][3] = 1.0;

    m
}
