//! stratus-selection - Interactive selection and filtering for stratus
//!
//! This crate turns completed pointer gestures and declarative filter specs
//! into row-index sets over a chart's trace data.
//!
//! # Key Components
//!
//! - **Lasso**: Screen-space polygon containment over projected points
//! - **Region**: Axis-aligned box sequences over raw embedding coordinates
//! - **Filter**: The `[field, op, value]` filter algebra with one global
//!   combine mode
//! - **SelectionResult**: Gesture outcomes as events, keyed by chart identity
//!
//! Gestures never mutate chart state directly: each one produces a
//! [`SelectionResult`] that the owning state holder applies, and filters
//! evaluate to index sets through the [`filter::FilterContext`] boundary
//! without touching storage.

pub mod filter;
pub mod lasso;
pub mod region;
pub mod result;

pub use filter::{
    passing_filter_indices, BasisRef, Combine, Filter, FilterContext, FilterError, FilterOp,
    FilterSpec, FilterValue, Literal, SpatialOp, SpatialValue,
};
pub use lasso::{lasso_points, lasso_select, point_in_polygon};
pub use region::{region_indices, region_select, Region};
pub use result::{SelectionResult, SelectionValue};
