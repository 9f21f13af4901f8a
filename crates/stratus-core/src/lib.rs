//! stratus-core - Rendering engine for embedding scatter charts
//!
//! This crate provides the core rendering path for stratus, a visualization
//! tool for large 2D/3D point-cloud embeddings (thousands to millions of
//! points).
//!
//! # Key Components
//!
//! - **TraceInfo**: One embedding's render-ready positions, colors, and flags
//! - **CameraState**: Read-only per-frame camera snapshot with fog parameters
//! - **Projector**: Model space to screen pixels, with adaptive point sizing
//! - **RenderOrchestrator**: Per-frame draw over an immutable snapshot
//! - **Export**: The same draw path serialized to a vector surface
//!
//! # Frame model
//!
//! Rendering is single-threaded, synchronous, and frame-driven. Every draw
//! consumes an immutable [`render::FrameSnapshot`] of trace, camera, and
//! selection state; identical inputs produce identical draw sequences, both
//! on screen and in exports.

pub mod camera;
pub mod error;
pub mod export;
pub mod fog;
pub mod project;
pub mod render;
pub mod size;
pub mod trace;
pub mod types;

pub use camera::{CameraState, FogParams, Mat4, Vec3};
pub use error::{ExportError, RenderError, TraceError};
pub use export::{export_svg, ExportConfig, ExportFormat, SvgSurface};
pub use project::{raster_radius, zoom_response_scale, ProjectedPoint, Projector, Viewport};
pub use render::{
    draw_points, DrawSettings, FrameOutcome, FrameSnapshot, FrameStats, LabelAnchor,
    RenderOrchestrator, RenderStrategy, Surface,
};
pub use size::base_point_size;
pub use trace::{
    ColorChannels, Dimensions, EmbeddingRef, PointBuffer, SelectionState, TraceInfo,
};
pub use types::{ColorRgb, Vec2f, Vec3f, Vec4f};
