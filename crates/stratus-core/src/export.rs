//! Static figure export
//!
//! Re-renders a chart deterministically onto an offscreen surface using
//! the exact projection, sizing, and fog path of the live renderer. The
//! vector backend serializes to SVG markup; raster encoding (PNG bytes,
//! clipboard blobs) is the embedding application's concern, which receives
//! the draw calls through the same [`Surface`] trait.

use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::error::{validation, ExportResult};
use crate::project::Viewport;
use crate::render::{draw_points, DrawSettings, FrameSnapshot, FrameStats, Surface};
use crate::trace::{SelectionState, TraceInfo};
use crate::types::ColorRgb;

/// Pixels reserved next to the chart for a categorical swatch legend
const CATEGORICAL_LEGEND_WIDTH: u32 = 150;

/// Pixels reserved under the chart for a continuous color-bar strip
const COLOR_BAR_HEIGHT: u32 = 150;

/// Export format for figures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// PNG raster image
    Png,
    /// SVG scalable vector graphics
    Svg,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
        }
    }

    /// Check if this format is raster (vs vector)
    pub fn is_raster(&self) -> bool {
        matches!(self, ExportFormat::Png)
    }

    /// Check if this format is vector
    pub fn is_vector(&self) -> bool {
        !self.is_raster()
    }
}

/// Export configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format
    pub format: ExportFormat,

    /// Chart width in pixels (before legend space)
    pub width: u32,

    /// Chart height in pixels (before legend space)
    pub height: u32,

    /// Device-pixel-ratio scale factor for raster output
    pub scale: f32,

    /// Reserve space for the legend next to / under the chart
    pub include_legend: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            width: 800,
            height: 800,
            scale: 1.0,
            include_legend: true,
        }
    }
}

impl ExportConfig {
    /// Create config for PNG export
    pub fn png(width: u32, height: u32) -> Self {
        Self {
            format: ExportFormat::Png,
            width,
            height,
            ..Default::default()
        }
    }

    /// Create config for SVG export
    pub fn svg(width: u32, height: u32) -> Self {
        Self {
            format: ExportFormat::Svg,
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the device-pixel-ratio scale factor
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Skip legend space reservation
    pub fn without_legend(mut self) -> Self {
        self.include_legend = false;
        self
    }

    /// Total export size including legend space for this trace
    ///
    /// Categorical traces get a swatch column to the right; continuous
    /// traces get a color-bar strip underneath. Legend drawing itself is
    /// composed by the caller in the reserved area.
    pub fn total_size(&self, trace: &TraceInfo) -> (u32, u32) {
        if !self.include_legend {
            return (self.width, self.height);
        }
        if trace.continuous {
            (self.width, self.height + COLOR_BAR_HEIGHT)
        } else {
            (self.width + CATEGORICAL_LEGEND_WIDTH, self.height)
        }
    }

    /// Raster dimensions scaled by the device pixel ratio
    pub fn raster_size(&self, trace: &TraceInfo) -> (u32, u32) {
        let (w, h) = self.total_size(trace);
        (
            (w as f32 * self.scale) as u32,
            (h as f32 * self.scale) as u32,
        )
    }

    /// Get suggested filename based on the trace and format
    pub fn suggested_filename(&self, trace: &TraceInfo) -> String {
        format!("{}.{}", trace.display_name(), self.format.extension())
    }
}

/// A [`Surface`] that serializes its draw calls to SVG markup
#[derive(Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Serialize accumulated draw calls to an SVG document
    pub fn serialize(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n{}</svg>\n",
            self.width, self.height, self.width, self.height, self.body
        )
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

impl Surface for SvgSurface {
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: ColorRgb, alpha: f32) {
        let [r, g, b] = color.to_rgb8();
        self.body.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.3}\" fill=\"rgb({},{},{})\" fill-opacity=\"{}\"/>\n",
            x, y, radius, r, g, b, alpha
        ));
    }

    fn fill_text(&mut self, x: f32, y: f32, text: &str, color: ColorRgb) {
        let [r, g, b] = color.to_rgb8();
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"rgb({},{},{})\">{}</text>\n",
            x,
            y,
            r,
            g,
            b,
            Self::escape(text)
        ));
    }
}

/// Render a chart to SVG markup
///
/// Reuses the live draw path over read-only state; the trace and selection
/// are untouched. The chart is painted into the top-left chart area, with
/// legend space left blank for the caller to compose into.
pub fn export_svg(
    trace: &TraceInfo,
    camera: &CameraState,
    selection: &SelectionState,
    settings: DrawSettings,
    config: &ExportConfig,
) -> ExportResult<(String, FrameStats)> {
    validation::validate_dimensions(config.width, config.height)?;

    let viewport = Viewport::new(config.width as f32, config.height as f32)?;
    let (total_w, total_h) = config.total_size(trace);
    let mut surface = SvgSurface::new(total_w, total_h);

    let snapshot = FrameSnapshot::new(trace, camera, selection, settings, viewport);
    let stats = draw_points(&mut surface, &snapshot);

    Ok((surface.serialize(), stats))
}
