//! Lasso selection
//!
//! A completed lasso gesture arrives as an ordered polygon of screen-space
//! vertices. Every trace point is projected to screen coordinates through
//! the same camera snapshot the frame was drawn with, then tested for
//! polygon containment with an even-odd ray cast.

use stratus_core::{CameraState, Projector, TraceInfo, Vec2f, Viewport};

use crate::result::SelectionResult;

/// Even-odd point-in-polygon test
///
/// Casts a ray in +x and counts edge crossings. Degenerate polygons with
/// fewer than 3 vertices contain nothing.
pub fn point_in_polygon(point: Vec2f, vertices: &[Vec2f]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Indices of trace points whose screen projection lies inside the polygon
pub fn lasso_points(
    trace: &TraceInfo,
    camera: &CameraState,
    viewport: Viewport,
    polygon: &[Vec2f],
) -> Vec<usize> {
    let projector = Projector::for_trace(camera, viewport, trace);

    (0..trace.npoints())
        .filter(|&i| {
            let screen = projector.screen_position(trace.buffer.position(i).into());
            point_in_polygon(screen, polygon)
        })
        .collect()
}

/// Run a completed lasso gesture against a trace
///
/// An empty containment result is an explicit deselect for the chart.
pub fn lasso_select(
    trace: &TraceInfo,
    camera: &CameraState,
    viewport: Viewport,
    polygon: &[Vec2f],
    edit: bool,
) -> SelectionResult {
    let points = lasso_points(trace, camera, viewport, polygon);
    SelectionResult::from_points(trace, points, edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_core::{ColorChannels, Dimensions, EmbeddingRef, PointBuffer};

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vec2f> {
        vec![
            Vec2f::new(x0, y0),
            Vec2f::new(x1, y0),
            Vec2f::new(x1, y1),
            Vec2f::new(x0, y1),
        ]
    }

    fn trace(positions: Vec<f32>) -> TraceInfo {
        let npoints = positions.len() / 3;
        TraceInfo::new(
            "leiden",
            EmbeddingRef::new("X_umap", Dimensions::Two),
            PointBuffer::new(
                npoints,
                positions,
                vec![0.5; npoints * 3],
                ColorChannels::Rgb,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_point_in_polygon_square() {
        let poly = square(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_polygon(Vec2f::new(5.0, 5.0), &poly));
        assert!(!point_in_polygon(Vec2f::new(15.0, 5.0), &poly));
        assert!(!point_in_polygon(Vec2f::new(5.0, -1.0), &poly));
    }

    #[test]
    fn test_point_in_polygon_concave() {
        // L-shape: the notch at the top right is outside
        let poly = vec![
            Vec2f::new(0.0, 0.0),
            Vec2f::new(10.0, 0.0),
            Vec2f::new(10.0, 5.0),
            Vec2f::new(5.0, 5.0),
            Vec2f::new(5.0, 10.0),
            Vec2f::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Vec2f::new(2.0, 8.0), &poly));
        assert!(point_in_polygon(Vec2f::new(8.0, 2.0), &poly));
        assert!(!point_in_polygon(Vec2f::new(8.0, 8.0), &poly));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        assert!(!point_in_polygon(Vec2f::new(0.0, 0.0), &[]));
        assert!(!point_in_polygon(
            Vec2f::new(0.0, 0.0),
            &[Vec2f::new(-1.0, -1.0), Vec2f::new(1.0, 1.0)]
        ));
    }

    #[test]
    fn test_lasso_selects_projected_points() {
        // Identity camera on a 100x100 viewport: NDC (0,0) maps to (50,50),
        // NDC (0.5,0.5) to (75,25)
        let trace = trace(vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.0]);
        let camera = CameraState::default();
        let viewport = Viewport::new(100.0, 100.0).unwrap();

        let around_center = square(40.0, 40.0, 60.0, 60.0);
        assert_eq!(
            lasso_points(&trace, &camera, viewport, &around_center),
            vec![0]
        );

        let around_upper_right = square(70.0, 20.0, 80.0, 30.0);
        assert_eq!(
            lasso_points(&trace, &camera, viewport, &around_upper_right),
            vec![1]
        );

        let around_both = square(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            lasso_points(&trace, &camera, viewport, &around_both),
            vec![0, 1]
        );
    }

    #[test]
    fn test_empty_lasso_is_deselect() {
        let trace = trace(vec![0.0, 0.0, 0.0]);
        let camera = CameraState::default();
        let viewport = Viewport::new(100.0, 100.0).unwrap();

        let far_away = square(90.0, 90.0, 95.0, 95.0);
        let result = lasso_select(&trace, &camera, viewport, &far_away, false);
        assert_eq!(
            result,
            SelectionResult::Deselect {
                name: "X_umap".to_string()
            }
        );
    }

    #[test]
    fn test_lasso_select_carries_points() {
        let trace = trace(vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.0]);
        let camera = CameraState::default();
        let viewport = Viewport::new(100.0, 100.0).unwrap();

        let result = lasso_select(&trace, &camera, viewport, &square(0.0, 0.0, 100.0, 100.0), true);
        match result {
            SelectionResult::Select { clear, value, .. } => {
                assert!(!clear);
                assert_eq!(value.points, vec![0, 1]);
            }
            other => panic!("expected select, got {:?}", other),
        }
    }
}
