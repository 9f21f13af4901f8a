//! Filter algebra over row indices
//!
//! A filter spec is an ordered list of entries, each either a column
//! predicate `[name, op, value]` or a spatial selection
//! `[basis, "selection", value]`, plus one global combine mode. Every
//! entry produces a keep-set of row indices; the first entry seeds the
//! running result and each subsequent keep-set folds in with the global
//! mode (`and` intersects, `or` unions). No spec, or an empty entry list,
//! means no filtering at all.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::region::{mask_indices, region_indices, Region};

/// Filter evaluation errors
///
/// Both variants are fatal for the evaluation: the caller surfaces them as
/// configuration errors rather than retrying.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Unknown filter: operator '{op}' cannot be applied to the supplied value")]
    UnknownOperator { op: String },

    #[error("Point-list selection over field '{field}' is not implemented")]
    NotImplemented { field: String },
}

/// Result type for filter evaluation
pub type FilterResult<T> = Result<T, FilterError>;

/// Global combine mode applied pairwise across keep-sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    #[default]
    And,
    Or,
}

/// Column comparison operators (wire spellings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "in")]
    In,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

impl FilterOp {
    /// Get the wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::In => "in",
            FilterOp::Gt => ">",
            FilterOp::Eq => "=",
            FilterOp::Lt => "<",
            FilterOp::Ne => "!=",
            FilterOp::Ge => ">=",
            FilterOp::Le => "<=",
        }
    }

    /// Evaluate a scalar comparison (not defined for `in`)
    fn compare(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            FilterOp::Gt => lhs > rhs,
            FilterOp::Eq => lhs == rhs,
            FilterOp::Lt => lhs < rhs,
            FilterOp::Ne => lhs != rhs,
            FilterOp::Ge => lhs >= rhs,
            FilterOp::Le => lhs <= rhs,
            FilterOp::In => false,
        }
    }
}

/// The fixed operator tag of spatial entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialOp {
    #[serde(rename = "selection")]
    Selection,
}

/// A literal in a filter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            Literal::Text(_) => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(t) => Some(t),
            Literal::Number(_) => None,
        }
    }
}

/// Right-hand side of a column predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    List(Vec<Literal>),
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<&str> for FilterValue {
    fn from(t: &str) -> Self {
        FilterValue::Text(t.to_string())
    }
}

impl From<Vec<f64>> for FilterValue {
    fn from(items: Vec<f64>) -> Self {
        FilterValue::List(items.into_iter().map(Literal::Number).collect())
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(items: Vec<&str>) -> Self {
        FilterValue::List(items.into_iter().map(|t| Literal::Text(t.to_string())).collect())
    }
}

/// Reference to an embedding basis in a spatial filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisRef {
    /// Embedding name (e.g. "X_umap")
    pub basis: String,

    /// Bin count for aggregated (binned) bases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbins: Option<u32>,

    /// Aggregation function for binned bases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agg: Option<String>,

    /// Dimensionality of the basis
    #[serde(default = "default_ndim")]
    pub ndim: u8,

    /// Whether the basis was precomputed server-side
    #[serde(default)]
    pub precomputed: bool,
}

fn default_ndim() -> u8 {
    2
}

impl BasisRef {
    pub fn new(basis: impl Into<String>) -> Self {
        Self {
            basis: basis.into(),
            nbins: None,
            agg: None,
            ndim: 2,
            precomputed: false,
        }
    }

    pub fn with_ndim(mut self, ndim: u8) -> Self {
        self.ndim = ndim;
        self
    }

    pub fn with_bins(mut self, nbins: u32, agg: impl Into<String>) -> Self {
        self.nbins = Some(nbins);
        self.agg = Some(agg.into());
        self
    }

    /// Full name of the resolved field for a binned basis
    pub fn full_name(&self) -> String {
        match self.nbins {
            Some(nbins) => format!(
                "{}_{}_{}",
                self.basis,
                nbins,
                self.agg.as_deref().unwrap_or("max")
            ),
            None => self.basis.clone(),
        }
    }

    /// Whether point-index lists resolve against the identity field
    ///
    /// An unbinned basis keeps row identity, so an explicit point list is
    /// usable as a keep-set directly. A binned basis resolves to its
    /// aggregate field instead, where point lists are not supported.
    pub fn resolves_to_index(&self) -> bool {
        self.nbins.is_none()
    }
}

/// Payload of a spatial filter entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpatialValue {
    /// Explicit point-index keep-set
    Points { points: Vec<usize> },

    /// Sequence of selection regions over the basis coordinates
    Path { path: Vec<Region> },
}

/// One filter entry: a column predicate or a spatial selection
///
/// Tagged variants replace runtime inspection of the field shape; the wire
/// form stays the `[field, op, value]` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Spatial(BasisRef, SpatialOp, SpatialValue),
    Column(String, FilterOp, FilterValue),
}

impl Filter {
    pub fn column(name: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Filter::Column(name.into(), op, value.into())
    }

    pub fn spatial(basis: BasisRef, value: SpatialValue) -> Self {
        Filter::Spatial(basis, SpatialOp::Selection, value)
    }
}

/// A complete filter specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub filters: Vec<Filter>,

    #[serde(default)]
    pub combine: Combine,
}

impl FilterSpec {
    pub fn new(filters: Vec<Filter>, combine: Combine) -> Self {
        Self { filters, combine }
    }
}

/// Column data boundary for filter evaluation
///
/// The dataset side implements this; evaluation never sees storage.
pub trait FilterContext {
    /// Number of rows in the dataset
    fn nrows(&self) -> usize;

    /// Numeric column by name, if present
    fn numeric_column(&self, field: &str) -> Option<&[f64]>;

    /// Categorical/text column by name, if present
    fn text_column(&self, field: &str) -> Option<&[String]>;

    /// Coordinate columns of an embedding basis, in axis order
    fn coordinate_columns(&self, basis: &BasisRef) -> Option<Vec<&[f64]>>;
}

/// Evaluate a filter spec against column data
///
/// Returns `Ok(None)` when no filtering applies (absent spec or empty
/// entry list); otherwise the sorted, deduplicated row indices passing the
/// combined filters. Keep-sets are restricted to `[0, nrows)`.
pub fn passing_filter_indices<C: FilterContext>(
    ctx: &C,
    spec: Option<&FilterSpec>,
) -> FilterResult<Option<Vec<usize>>> {
    let Some(spec) = spec else {
        return Ok(None);
    };
    if spec.filters.is_empty() {
        return Ok(None);
    }

    let nrows = ctx.nrows();
    let mut passing: Option<BTreeSet<usize>> = None;

    for filter in &spec.filters {
        let keep = match filter {
            Filter::Column(name, op, value) => column_keep(ctx, name, *op, value)?,
            Filter::Spatial(basis, _, value) => spatial_keep(ctx, basis, value)?,
        };
        let keep: BTreeSet<usize> = keep.into_iter().filter(|&i| i < nrows).collect();

        passing = Some(match passing {
            // The first entry seeds the running result
            None => keep,
            Some(prev) => match spec.combine {
                Combine::And => prev.intersection(&keep).copied().collect(),
                Combine::Or => prev.union(&keep).copied().collect(),
            },
        });
    }

    Ok(passing.map(|set| set.into_iter().collect()))
}

/// Keep-set of one column predicate
fn column_keep<C: FilterContext>(
    ctx: &C,
    name: &str,
    op: FilterOp,
    value: &FilterValue,
) -> FilterResult<Vec<usize>> {
    if let Some(column) = ctx.numeric_column(name) {
        let mask: Vec<bool> = match (op, value) {
            (FilterOp::In, FilterValue::List(items)) => {
                let targets: Vec<f64> = items.iter().filter_map(Literal::as_number).collect();
                column
                    .iter()
                    .map(|v| targets.iter().any(|t| t == v))
                    .collect()
            }
            (FilterOp::In, _) => return Err(unknown(op)),
            (_, FilterValue::Number(rhs)) => column.iter().map(|&v| op.compare(v, *rhs)).collect(),
            _ => return Err(unknown(op)),
        };
        return Ok(mask_indices(&mask));
    }

    if let Some(column) = ctx.text_column(name) {
        let mask: Vec<bool> = match (op, value) {
            (FilterOp::In, FilterValue::List(items)) => {
                let targets: Vec<&str> = items.iter().filter_map(Literal::as_text).collect();
                column
                    .iter()
                    .map(|v| targets.iter().any(|t| t == v))
                    .collect()
            }
            (FilterOp::Eq, FilterValue::Text(rhs)) => column.iter().map(|v| v == rhs).collect(),
            (FilterOp::Ne, FilterValue::Text(rhs)) => column.iter().map(|v| v != rhs).collect(),
            _ => return Err(unknown(op)),
        };
        return Ok(mask_indices(&mask));
    }

    Err(FilterError::FieldNotFound(name.to_string()))
}

/// Keep-set of one spatial entry
fn spatial_keep<C: FilterContext>(
    ctx: &C,
    basis: &BasisRef,
    value: &SpatialValue,
) -> FilterResult<Vec<usize>> {
    match value {
        SpatialValue::Points { points } => {
            if !basis.resolves_to_index() {
                return Err(FilterError::NotImplemented {
                    field: basis.full_name(),
                });
            }
            Ok(points.clone())
        }
        SpatialValue::Path { path } => {
            let coords = ctx
                .coordinate_columns(basis)
                .ok_or_else(|| FilterError::FieldNotFound(basis.basis.clone()))?;
            Ok(region_indices(path, &coords, ctx.nrows()))
        }
    }
}

fn unknown(op: FilterOp) -> FilterError {
    FilterError::UnknownOperator {
        op: op.as_str().to_string(),
    }
}
