//! Selection gesture results
//!
//! A completed lasso or box gesture produces one [`SelectionResult`] event,
//! sent back to the owning state holder instead of mutating shared chart
//! state in place. An empty gesture is an explicit deselect for the chart,
//! not an empty-but-valid selection.

use serde::{Deserialize, Serialize};

use stratus_core::{EmbeddingRef, TraceInfo};

/// Point-index selection payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionValue {
    /// Embedding basis the indices were picked in
    pub basis: EmbeddingRef,

    /// Selected row indices
    pub points: Vec<usize>,
}

/// Outcome of one completed selection gesture, keyed by chart identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionResult {
    /// Nothing was contained: clear the chart's selection
    Deselect { name: String },

    /// Points were contained
    Select {
        name: String,
        /// Replace the existing selection (`true`) or extend it while the
        /// user is editing an existing selection (`false`)
        clear: bool,
        value: SelectionValue,
    },
}

impl SelectionResult {
    /// Build the gesture result for a trace
    ///
    /// `edit` is the chart's edit-selection mode: while editing, new picks
    /// extend the current selection instead of replacing it.
    pub fn from_points(trace: &TraceInfo, points: Vec<usize>, edit: bool) -> Self {
        let name = trace.embedding.embedding_key();
        if points.is_empty() {
            SelectionResult::Deselect { name }
        } else {
            SelectionResult::Select {
                name,
                clear: !edit,
                value: SelectionValue {
                    basis: trace.embedding.clone(),
                    points,
                },
            }
        }
    }

    /// Chart identity this result applies to
    pub fn name(&self) -> &str {
        match self {
            SelectionResult::Deselect { name } => name,
            SelectionResult::Select { name, .. } => name,
        }
    }
}
