//! Trace data model
//!
//! A trace is one embedding's render-ready point set: positions, colors,
//! and the flags selecting a rendering mode. Buffers are validated once at
//! construction, owned exclusively by their trace, and replaced wholesale
//! when an embedding is recomputed; nothing mutates them during a draw.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::{TraceError, TraceResult};
use crate::types::ColorRgb;

/// Color channel layout of a point buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorChannels {
    Rgb,
    Rgba,
}

impl ColorChannels {
    /// Number of floats per point
    pub fn stride(&self) -> usize {
        match self {
            ColorChannels::Rgb => 3,
            ColorChannels::Rgba => 4,
        }
    }
}

/// Contiguous point positions and aligned colors
///
/// Positions are always 3 scalars per point; z is carried but unused for
/// 2D embeddings. Colors are 3 or 4 floats per point depending on layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointBuffer {
    npoints: usize,
    channels: ColorChannels,
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl PointBuffer {
    /// Build a buffer, validating lengths against the point count
    pub fn new(
        npoints: usize,
        positions: Vec<f32>,
        colors: Vec<f32>,
        channels: ColorChannels,
    ) -> TraceResult<Self> {
        let expected_positions = npoints * 3;
        if positions.len() != expected_positions {
            return Err(TraceError::PositionLength {
                npoints,
                expected: expected_positions,
                actual: positions.len(),
            });
        }

        let expected_colors = npoints * channels.stride();
        if colors.len() != expected_colors {
            return Err(TraceError::ColorLength {
                npoints,
                channels: channels.stride(),
                expected: expected_colors,
                actual: colors.len(),
            });
        }

        Ok(Self {
            npoints,
            channels,
            positions,
            colors,
        })
    }

    /// Authoritative point count
    pub fn len(&self) -> usize {
        self.npoints
    }

    pub fn is_empty(&self) -> bool {
        self.npoints == 0
    }

    pub fn channels(&self) -> ColorChannels {
        self.channels
    }

    /// Position of point `index` as `[x, y, z]`
    pub fn position(&self, index: usize) -> [f32; 3] {
        let k = index * 3;
        [self.positions[k], self.positions[k + 1], self.positions[k + 2]]
    }

    /// RGB color of point `index` (alpha channel, if present, is skipped;
    /// per-point opacity comes from selection state instead)
    pub fn color(&self, index: usize) -> ColorRgb {
        let j = index * self.channels.stride();
        ColorRgb::new(self.colors[j], self.colors[j + 1], self.colors[j + 2])
    }

    /// Raw position buffer
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Raw color buffer
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }
}

/// Embedding dimensionality
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensions {
    Two,
    Three,
}

impl Dimensions {
    pub fn is_3d(&self) -> bool {
        matches!(self, Dimensions::Three)
    }

    pub fn ndim(&self) -> u8 {
        match self {
            Dimensions::Two => 2,
            Dimensions::Three => 3,
        }
    }
}

/// Reference to the embedding basis a trace's positions are expressed in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRef {
    /// Embedding name (e.g. "X_umap")
    pub name: String,

    /// Dimensionality of the embedding
    pub dimensions: Dimensions,
}

impl EmbeddingRef {
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }

    /// Chart identity derived from the embedding
    ///
    /// 2D is the unsuffixed default; a 3D view of the same basis gets its
    /// own key so its selection state is tracked independently.
    pub fn embedding_key(&self) -> String {
        match self.dimensions {
            Dimensions::Two => self.name.clone(),
            Dimensions::Three => format!("{}_3", self.name),
        }
    }
}

/// One embedding's render-ready data
///
/// Constructed when an embedding is computed or loaded, replaced wholesale
/// on recompute, and read-only during rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceInfo {
    /// Display name of the colored field
    pub name: String,

    /// Embedding the positions are expressed in
    pub embedding: EmbeddingRef,

    /// Validated positions + colors
    pub buffer: PointBuffer,

    /// Backed by an image tile source rather than point sprites
    pub is_image: bool,

    /// Continuous (color-bar legend) vs categorical (swatch legend) field
    pub continuous: bool,
}

impl TraceInfo {
    pub fn new(
        name: impl Into<String>,
        embedding: EmbeddingRef,
        buffer: PointBuffer,
    ) -> Self {
        Self {
            name: name.into(),
            embedding,
            buffer,
            is_image: false,
            continuous: false,
        }
    }

    pub fn npoints(&self) -> usize {
        self.buffer.len()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.embedding.dimensions
    }

    /// Name for display and export filenames; the reserved count trace is
    /// renamed to its user-facing form
    pub fn display_name(&self) -> &str {
        if self.name == "__count" {
            "count"
        } else {
            &self.name
        }
    }
}

/// Per-chart selection sets, keyed by embedding identity
///
/// An empty set (or an absent entry) means "no restriction": every point
/// renders at full marker opacity. Mutated only by selection-engine output
/// or an explicit deselect, never during a draw pass.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SelectionState {
    charts: HashMap<String, BTreeSet<usize>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection for a chart, validating index bounds
    pub fn set(&mut self, key: impl Into<String>, indices: &[usize], npoints: usize) -> TraceResult<()> {
        let mut set = BTreeSet::new();
        for &index in indices {
            if index >= npoints {
                return Err(TraceError::IndexOutOfRange { index, npoints });
            }
            set.insert(index);
        }
        self.charts.insert(key.into(), set);
        Ok(())
    }

    /// Drop the selection for a chart (back to "no restriction")
    pub fn deselect(&mut self, key: &str) {
        self.charts.remove(key);
    }

    /// Selection set for a chart, if any
    pub fn get(&self, key: &str) -> Option<&BTreeSet<usize>> {
        self.charts.get(key)
    }

    /// Whether a point renders as selected
    ///
    /// A point is selected when the chart has no restriction or the set
    /// contains its index.
    pub fn is_selected(&self, key: &str, index: usize) -> bool {
        match self.charts.get(key) {
            Some(set) if !set.is_empty() => set.contains(&index),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(npoints: usize) -> PointBuffer {
        PointBuffer::new(
            npoints,
            vec![0.0; npoints * 3],
            vec![0.5; npoints * 4],
            ColorChannels::Rgba,
        )
        .unwrap()
    }

    #[test]
    fn test_point_buffer_validates_positions() {
        let err = PointBuffer::new(2, vec![0.0; 5], vec![0.0; 8], ColorChannels::Rgba);
        assert!(matches!(
            err,
            Err(TraceError::PositionLength { expected: 6, actual: 5, .. })
        ));
    }

    #[test]
    fn test_point_buffer_validates_colors() {
        let err = PointBuffer::new(2, vec![0.0; 6], vec![0.0; 7], ColorChannels::Rgb);
        assert!(matches!(
            err,
            Err(TraceError::ColorLength { expected: 6, actual: 7, .. })
        ));
    }

    #[test]
    fn test_point_buffer_accessors() {
        let buf = PointBuffer::new(
            2,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![0.1, 0.2, 0.3, 1.0, 0.4, 0.5, 0.6, 1.0],
            ColorChannels::Rgba,
        )
        .unwrap();

        assert_eq!(buf.position(1), [4.0, 5.0, 6.0]);
        let c = buf.color(1);
        assert!((c.r - 0.4).abs() < 1e-6);
        assert!((c.b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_embedding_key() {
        let umap2 = EmbeddingRef::new("X_umap", Dimensions::Two);
        let umap3 = EmbeddingRef::new("X_umap", Dimensions::Three);
        assert_eq!(umap2.embedding_key(), "X_umap");
        assert_eq!(umap3.embedding_key(), "X_umap_3");
        assert_ne!(umap2.embedding_key(), umap3.embedding_key());
    }

    #[test]
    fn test_display_name_count() {
        let mut trace = TraceInfo::new(
            "__count",
            EmbeddingRef::new("X_umap", Dimensions::Two),
            buffer(1),
        );
        assert_eq!(trace.display_name(), "count");
        trace.name = "leiden".to_string();
        assert_eq!(trace.display_name(), "leiden");
    }

    #[test]
    fn test_selection_empty_means_all_selected() {
        let state = SelectionState::new();
        assert!(state.is_selected("X_umap", 0));
        assert!(state.is_selected("X_umap", 99));
    }

    #[test]
    fn test_selection_membership() {
        let mut state = SelectionState::new();
        state.set("X_umap", &[1, 3], 10).unwrap();
        assert!(state.is_selected("X_umap", 1));
        assert!(!state.is_selected("X_umap", 2));
        // Other charts are unaffected
        assert!(state.is_selected("X_tsne", 2));
    }

    #[test]
    fn test_selection_rejects_out_of_range() {
        let mut state = SelectionState::new();
        let err = state.set("X_umap", &[10], 10);
        assert!(matches!(err, Err(TraceError::IndexOutOfRange { index: 10, npoints: 10 })));
    }

    #[test]
    fn test_deselect_restores_no_restriction() {
        let mut state = SelectionState::new();
        state.set("X_umap", &[1], 10).unwrap();
        assert!(!state.is_selected("X_umap", 2));
        state.deselect("X_umap");
        assert!(state.is_selected("X_umap", 2));
    }
}
