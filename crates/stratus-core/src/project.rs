//! Point projection
//!
//! Transforms model-space points into screen pixels and computes the
//! visual size of each point. 2D embeddings follow a non-linear
//! zoom-response curve rather than the camera's raw projection scale; 3D
//! embeddings get perspective foreshortening plus depth fog.

use std::f32::consts::PI;

use crate::camera::CameraState;
use crate::error::{validation, RenderResult};
use crate::fog;
use crate::size::base_point_size;
use crate::trace::{Dimensions, TraceInfo};
use crate::types::{ColorRgb, Vec2f, Vec3f};

/// Divisor mapping a point size to the rasterizer's radius convention
const RADIUS_DIVISOR: f32 = 4.0;

/// Offset shifting the zoom pivot of the 2D size curve
const ZOOM_OFFSET: f32 = 0.3;

/// Screen viewport in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> RenderResult<Self> {
        validation::validate_viewport(width, height)?;
        Ok(Self { width, height })
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Zoom-response scaling curve for 2D point sizes
///
/// Shrinks points slowly when zooming out (arctan saturating at
/// `MIN_SCALE`) and enlarges them slowly when zooming in (saturating at
/// `MAX_SCALE`), so point area does not track the linear camera zoom.
pub fn zoom_response_scale(zoom: f32) -> f32 {
    const MIN_SCALE: f32 = 0.1; // minimum scaling factor
    const OUT_SPEED: f32 = 2.0; // shrink speed when zooming out
    const MAX_SCALE: f32 = 15.0; // maximum scaling factor
    const IN_SPEED: f32 = 0.02; // enlarge speed when zooming in

    let out_norm = (1.0 - MIN_SCALE) / OUT_SPEED.atan();

    if zoom < 1.0 {
        1.0 + out_norm * (OUT_SPEED * (zoom - 1.0)).atan()
    } else {
        1.0 + 2.0 / PI * (MAX_SCALE - 1.0) * (IN_SPEED * (zoom - 1.0)).atan()
    }
}

/// One point after projection: pixel position, visual size, fogged color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub position: Vec2f,
    pub point_size: f32,
    pub color: ColorRgb,
}

/// Projects trace points through one camera snapshot
///
/// Holds everything that is constant across a frame: the camera, the
/// viewport, the trace dimensionality, and the base point size. Pure; two
/// projectors built from the same inputs produce identical output.
#[derive(Clone, Debug)]
pub struct Projector<'a> {
    camera: &'a CameraState,
    viewport: Viewport,
    dimensions: Dimensions,
    base_size: f32,
    size_2d: f32,
}

impl<'a> Projector<'a> {
    pub fn new(
        camera: &'a CameraState,
        viewport: Viewport,
        dimensions: Dimensions,
        base_size: f32,
    ) -> Self {
        let zoom = camera.zoom_scale() + ZOOM_OFFSET;
        let size_2d = base_size * zoom_response_scale(zoom);
        Self {
            camera,
            viewport,
            dimensions,
            base_size,
            size_2d,
        }
    }

    /// Projector for a trace, with the base size from the point-size model
    pub fn for_trace(camera: &'a CameraState, viewport: Viewport, trace: &TraceInfo) -> Self {
        let base = base_point_size(trace.npoints(), trace.dimensions());
        Self::new(camera, viewport, trace.dimensions(), base)
    }

    /// Base point radius this projector was built with
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Map a model-space point to pixel coordinates
    ///
    /// NDC x grows rightward and y upward; pixel y grows downward, hence
    /// the sign flip.
    pub fn screen_position(&self, pos: Vec3f) -> Vec2f {
        let ndc = self.camera.project_to_ndc(pos);
        Vec2f::new(
            ndc.x * self.viewport.half_width() + self.viewport.half_width(),
            -ndc.y * self.viewport.half_height() + self.viewport.half_height(),
        )
    }

    /// Project one point: pixel position, visual size, and fogged color
    pub fn project(&self, pos: Vec3f, base_color: ColorRgb) -> ProjectedPoint {
        let position = self.screen_position(pos);

        match self.dimensions {
            Dimensions::Two => ProjectedPoint {
                position,
                point_size: self.size_2d,
                color: base_color,
            },
            Dimensions::Three => {
                let camera_space = self.camera.to_camera_space(pos);
                let point_size = -self.base_size / camera_space.z;
                let fog_depth = self.base_size / point_size * 1.2;
                ProjectedPoint {
                    position,
                    point_size,
                    color: fog::blend(&self.camera.fog, fog_depth, base_color),
                }
            }
        }
    }
}

/// Rasterized radius of a point: visual size times the user multiplier,
/// divided by the rasterizer's radius convention
pub fn raster_radius(point_size: f32, user_multiplier: f32) -> f32 {
    point_size * user_multiplier / RADIUS_DIVISOR
}
