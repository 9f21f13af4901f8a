//! Frame rendering
//!
//! Drives a per-frame draw over an immutable snapshot of trace, camera,
//! and selection state. The same path renders live frames and exports;
//! re-running a draw with unchanged inputs produces an identical sequence
//! of surface operations.

use crate::camera::CameraState;
use crate::project::{raster_radius, Projector, Viewport};
use crate::trace::{SelectionState, TraceInfo};
use crate::types::{ColorRgb, Vec3f};

/// Abstract 2D draw target
///
/// Implemented by raster canvases, vector backends, and test recorders.
/// The core only ever fills circles and places label text; everything else
/// about the target (pixels, markup, clipboard) is the collaborator's
/// concern.
pub trait Surface {
    /// Fill a circle of `radius` pixels centered at (`x`, `y`)
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: ColorRgb, alpha: f32);

    /// Place label text anchored at (`x`, `y`)
    fn fill_text(&mut self, x: f32, y: f32, text: &str, color: ColorRgb);
}

/// Per-frame draw settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawSettings {
    /// Opacity of selected points
    pub marker_opacity: f32,

    /// Opacity of points outside the active selection
    pub unselected_marker_opacity: f32,

    /// User-controlled point size multiplier
    pub point_scale: f32,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            marker_opacity: 1.0,
            unselected_marker_opacity: 0.1,
            point_scale: 1.0,
        }
    }
}

impl DrawSettings {
    /// Set the opacity of selected points
    pub fn with_marker_opacity(mut self, opacity: f32) -> Self {
        self.marker_opacity = opacity;
        self
    }

    /// Set the opacity of points outside the active selection
    pub fn with_unselected_opacity(mut self, opacity: f32) -> Self {
        self.unselected_marker_opacity = opacity;
        self
    }

    /// Set the user-controlled point size multiplier
    pub fn with_point_scale(mut self, scale: f32) -> Self {
        self.point_scale = scale;
        self
    }
}

/// A category label anchored at a world-space position
#[derive(Clone, Debug, PartialEq)]
pub struct LabelAnchor {
    pub text: String,
    pub position: Vec3f,
    pub color: ColorRgb,
}

/// Closed set of rendering strategies, resolved at construction
///
/// Replaces lookup of named visualizers by string key: a chart either
/// draws points, or draws points with category labels on top.
#[derive(Clone, Debug, Default)]
pub enum RenderStrategy {
    /// Point sprites only
    #[default]
    Points,

    /// Point sprites with category labels at their anchors
    Labels(Vec<LabelAnchor>),
}

/// Immutable inputs for one frame
///
/// Assembled by the owning view layer and passed in whole; the draw never
/// reads ambient state.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    pub trace: &'a TraceInfo,
    pub camera: &'a CameraState,
    pub selection: &'a SelectionState,
    pub settings: DrawSettings,
    pub viewport: Viewport,

    /// Whether an image-backed trace's tile source is ready this frame.
    /// Ignored for sprite traces.
    pub source_ready: bool,
}

impl<'a> FrameSnapshot<'a> {
    pub fn new(
        trace: &'a TraceInfo,
        camera: &'a CameraState,
        selection: &'a SelectionState,
        settings: DrawSettings,
        viewport: Viewport,
    ) -> Self {
        Self {
            trace,
            camera,
            selection,
            settings,
            viewport,
            source_ready: true,
        }
    }

    pub fn with_source_ready(mut self, ready: bool) -> Self {
        self.source_ready = ready;
        self
    }
}

/// Counters for a completed draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Points painted
    pub points_drawn: usize,

    /// Points painted at full marker opacity
    pub selected: usize,
}

/// Result of attempting one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame was painted
    Drawn(FrameStats),

    /// Image-backed trace whose source is not ready: nothing was painted,
    /// and one redraw is owed once the source signals readiness
    AwaitingSource,
}

/// Paint every point of the snapshot onto the surface
///
/// Shared by live rendering and export. Opacity is selection-aware: a
/// point is selected when the chart's selection set is empty or contains
/// its index.
pub fn draw_points(surface: &mut dyn Surface, snapshot: &FrameSnapshot<'_>) -> FrameStats {
    let trace = snapshot.trace;
    let projector = Projector::for_trace(snapshot.camera, snapshot.viewport, trace);
    let chart_key = trace.embedding.embedding_key();

    let mut stats = FrameStats::default();
    for i in 0..trace.npoints() {
        let selected = snapshot.selection.is_selected(&chart_key, i);
        let alpha = if selected {
            snapshot.settings.marker_opacity
        } else {
            snapshot.settings.unselected_marker_opacity
        };

        let point = projector.project(trace.buffer.position(i).into(), trace.buffer.color(i));
        let radius = raster_radius(point.point_size, snapshot.settings.point_scale);
        surface.fill_circle(point.position.x, point.position.y, radius, point.color, alpha);

        stats.points_drawn += 1;
        if selected {
            stats.selected += 1;
        }
    }
    stats
}

/// Orchestrates frame draws for one chart
///
/// Holds only the rendering strategy and the pending-redraw latch for
/// image-backed traces; all per-frame inputs arrive in the snapshot.
#[derive(Debug, Default)]
pub struct RenderOrchestrator {
    strategy: RenderStrategy,
    awaiting_source: bool,
}

impl RenderOrchestrator {
    pub fn new(strategy: RenderStrategy) -> Self {
        Self {
            strategy,
            awaiting_source: false,
        }
    }

    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    /// Draw one frame
    ///
    /// An image-backed trace with an unready source yields
    /// [`FrameOutcome::AwaitingSource`]: no surface operation is issued and
    /// no error is raised; the next [`Self::source_ready`] notification
    /// re-arms exactly one redraw.
    pub fn draw_frame(
        &mut self,
        surface: &mut dyn Surface,
        snapshot: &FrameSnapshot<'_>,
    ) -> FrameOutcome {
        if snapshot.trace.is_image && !snapshot.source_ready {
            self.awaiting_source = true;
            return FrameOutcome::AwaitingSource;
        }
        self.awaiting_source = false;

        let stats = draw_points(surface, snapshot);

        if let RenderStrategy::Labels(anchors) = &self.strategy {
            let projector = Projector::for_trace(snapshot.camera, snapshot.viewport, snapshot.trace);
            for anchor in anchors {
                let pos = projector.screen_position(anchor.position);
                surface.fill_text(pos.x, pos.y, &anchor.text, anchor.color);
            }
        }

        FrameOutcome::Drawn(stats)
    }

    /// Signal that the image source became ready
    ///
    /// Returns `true` exactly once per skipped frame: the caller should
    /// re-issue the draw. Further notifications are no-ops until another
    /// frame is skipped.
    pub fn source_ready(&mut self) -> bool {
        std::mem::take(&mut self.awaiting_source)
    }
}
