//! Box region selection
//!
//! A box gesture arrives as a sequence of axis-aligned regions over the
//! embedding's raw coordinate columns, each 2D (`x`, `y`, `width`,
//! `height`) or 3D (plus `z`, `depth`). Within one region the per-axis
//! membership tests intersect; across the sequence the per-region results
//! union, modeling a multi-rectangle additive selection. Bounds are
//! inclusive on both edges.

use serde::{Deserialize, Serialize};

use stratus_core::TraceInfo;

use crate::result::SelectionResult;

/// One axis-aligned selection region in embedding coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Near z bound; present for 3D regions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,

    /// z extent paired with `z`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl Region {
    /// 2D region
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            z: None,
            depth: None,
        }
    }

    /// 3D region
    pub fn cuboid(x: f64, y: f64, width: f64, height: f64, z: f64, depth: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            z: Some(z),
            depth: Some(depth),
        }
    }

    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }
}

/// Inclusive interval membership: `lo <= value <= lo + extent`
fn in_extent(value: f64, lo: f64, extent: f64) -> bool {
    value >= lo && value <= lo + extent
}

/// Membership mask of one region over coordinate columns
///
/// `coords` holds the embedding's coordinate columns in axis order; the z
/// column is only consulted for 3D regions.
fn region_mask(region: &Region, coords: &[&[f64]], nrows: usize) -> Vec<bool> {
    let xs = coords.first().copied().unwrap_or(&[]);
    let ys = coords.get(1).copied().unwrap_or(&[]);
    let zs = coords.get(2).copied();

    let mut mask = vec![false; nrows];
    for (i, keep) in mask.iter_mut().enumerate() {
        let x_in = xs.get(i).is_some_and(|&v| in_extent(v, region.x, region.width));
        let y_in = ys.get(i).is_some_and(|&v| in_extent(v, region.y, region.height));
        let mut inside = x_in && y_in;

        if let (Some(z), Some(depth)) = (region.z, region.depth) {
            let z_in = zs
                .and_then(|col| col.get(i))
                .is_some_and(|&v| in_extent(v, z, depth));
            inside = inside && z_in;
        }
        *keep = inside;
    }
    mask
}

/// Combine two masks with OR
fn or_masks(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b.iter()).map(|(&a, &b)| a || b).collect()
}

/// Get indices of set mask entries
pub(crate) fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &b)| if b { Some(i) } else { None })
        .collect()
}

/// Indices kept by a sequence of regions over coordinate columns
///
/// Per-axis tests AND within a region; regions OR across the sequence.
/// Returns a sorted index list. An empty region sequence keeps nothing.
pub fn region_indices(regions: &[Region], coords: &[&[f64]], nrows: usize) -> Vec<usize> {
    let mut combined: Option<Vec<bool>> = None;
    for region in regions {
        let mask = region_mask(region, coords, nrows);
        combined = Some(match combined {
            Some(prev) => or_masks(&prev, &mask),
            None => mask,
        });
    }

    combined.map(|mask| mask_indices(&mask)).unwrap_or_default()
}

/// Run a completed box gesture against a trace
///
/// `coords` holds the embedding's raw coordinate columns in axis order. An
/// empty containment result is an explicit deselect for the chart, same as
/// the lasso path.
pub fn region_select(
    trace: &TraceInfo,
    regions: &[Region],
    coords: &[&[f64]],
    edit: bool,
) -> SelectionResult {
    let points = region_indices(regions, coords, trace.npoints());
    SelectionResult::from_points(trace, points, edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_box_union() {
        // positions (0,0) and (5,5)
        let x = [0.0, 5.0];
        let y = [0.0, 5.0];
        let coords: Vec<&[f64]> = vec![&x, &y];

        let low = Region::rect(-1.0, -1.0, 2.0, 2.0);
        let high = Region::rect(4.0, 4.0, 2.0, 2.0);

        assert_eq!(region_indices(&[low], &coords, 2), vec![0]);
        assert_eq!(region_indices(&[high], &coords, 2), vec![1]);
        // Regions union across the sequence
        assert_eq!(region_indices(&[low, high], &coords, 2), vec![0, 1]);
    }

    #[test]
    fn test_boundary_values_are_included() {
        let x = [1.0, 3.0, 0.999, 3.001];
        let y = [0.0, 0.0, 0.0, 0.0];
        let coords: Vec<&[f64]> = vec![&x, &y];

        // val == lo and val == lo + extent are both inside
        let region = Region::rect(1.0, -1.0, 2.0, 2.0);
        assert_eq!(region_indices(&[region], &coords, 4), vec![0, 1]);
    }

    #[test]
    fn test_axes_intersect_within_a_region() {
        let x = [0.5, 0.5, 5.0];
        let y = [0.5, 5.0, 0.5];
        let coords: Vec<&[f64]> = vec![&x, &y];

        // Only the point inside on both axes survives
        let region = Region::rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(region_indices(&[region], &coords, 3), vec![0]);
    }

    #[test]
    fn test_3d_region_consults_depth() {
        let x = [0.5, 0.5];
        let y = [0.5, 0.5];
        let z = [0.5, 9.0];
        let coords: Vec<&[f64]> = vec![&x, &y, &z];

        let flat = Region::rect(0.0, 0.0, 1.0, 1.0);
        let deep = Region::cuboid(0.0, 0.0, 1.0, 1.0, 0.0, 1.0);

        // Without a z bound both points pass; with one, only the near point
        assert_eq!(region_indices(&[flat], &coords, 2), vec![0, 1]);
        assert_eq!(region_indices(&[deep], &coords, 2), vec![0]);
    }

    #[test]
    fn test_empty_region_sequence_keeps_nothing() {
        let x = [0.0];
        let y = [0.0];
        let coords: Vec<&[f64]> = vec![&x, &y];
        assert!(region_indices(&[], &coords, 1).is_empty());
    }

    #[test]
    fn test_projected_corners_round_trip() {
        use stratus_core::{CameraState, Dimensions, Projector, Vec3f, Viewport};

        // World-space points, two inside the box and one outside
        let world = [
            Vec3f::new(0.0, 0.0, 0.0),
            Vec3f::new(0.3, -0.2, 0.0),
            Vec3f::new(0.9, 0.9, 0.0),
        ];
        let (x0, y0, w, h) = (-0.5f32, -0.5f32, 1.0f32, 1.0f32);

        let camera = CameraState::default();
        let viewport = Viewport::new(640.0, 480.0).unwrap();
        let projector = Projector::new(&camera, viewport, Dimensions::Two, 1.0);

        // Project the box corners, then run the same box test in screen space
        let a = projector.screen_position(Vec3f::new(x0, y0, 0.0));
        let b = projector.screen_position(Vec3f::new(x0 + w, y0 + h, 0.0));
        let screen_box = Region::rect(
            a.x.min(b.x) as f64,
            a.y.min(b.y) as f64,
            (a.x - b.x).abs() as f64,
            (a.y - b.y).abs() as f64,
        );

        let screen: Vec<_> = world.iter().map(|&p| projector.screen_position(p)).collect();
        let xs: Vec<f64> = screen.iter().map(|p| p.x as f64).collect();
        let ys: Vec<f64> = screen.iter().map(|p| p.y as f64).collect();
        let coords: Vec<&[f64]> = vec![&xs, &ys];

        assert_eq!(region_indices(&[screen_box], &coords, 3), vec![0, 1]);
    }

    #[test]
    fn test_region_select_gesture_boundary() {
        use stratus_core::{ColorChannels, Dimensions, EmbeddingRef, PointBuffer};

        let trace = TraceInfo::new(
            "leiden",
            EmbeddingRef::new("X_umap", Dimensions::Two),
            PointBuffer::new(2, vec![0.0; 6], vec![0.0; 6], ColorChannels::Rgb).unwrap(),
        );
        let x = [0.0, 5.0];
        let y = [0.0, 5.0];
        let coords: Vec<&[f64]> = vec![&x, &y];

        let hit = region_select(&trace, &[Region::rect(-1.0, -1.0, 2.0, 2.0)], &coords, false);
        match hit {
            SelectionResult::Select { clear, value, .. } => {
                assert!(clear);
                assert_eq!(value.points, vec![0]);
            }
            other => panic!("expected select, got {:?}", other),
        }

        let miss = region_select(&trace, &[Region::rect(50.0, 50.0, 1.0, 1.0)], &coords, false);
        assert_eq!(
            miss,
            SelectionResult::Deselect {
                name: "X_umap".to_string()
            }
        );
    }

    #[test]
    fn test_region_wire_shape() {
        let rect: Region = serde_json::from_str(r#"{"x":-1,"y":-1,"width":2,"height":2}"#).unwrap();
        assert_eq!(rect, Region::rect(-1.0, -1.0, 2.0, 2.0));
        assert!(!rect.is_3d());

        let cuboid: Region =
            serde_json::from_str(r#"{"x":0,"y":0,"width":1,"height":1,"z":2,"depth":3}"#).unwrap();
        assert_eq!(cuboid, Region::cuboid(0.0, 0.0, 1.0, 1.0, 2.0, 3.0));

        // 2D regions serialize without z fields
        let json = serde_json::to_string(&rect).unwrap();
        assert!(!json.contains("\"z\""));
    }
}
