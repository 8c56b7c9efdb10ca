//! Clipping and predicate primitives for layout shapes.
//!
//! Every shape a layout produces is convex (circles, hexagons, and
//! hexagons cut by a disc), so clipping reduces to Sutherland–Hodgman
//! against a convex clip polygon.

use std::f64::consts::PI;

use lyon_geom::{point, vector, Angle, Arc};

use crate::error::LayoutError;
use crate::geometry::{Circle, LENGTH_EPSILON, Point, Polygon};

/// Relative tolerance for circle flattening (fraction of the radius).
///
/// Lower = more vertices, smoother outlines. At 1e-3 a circle becomes
/// roughly seventy segments, close to what CAD viewers draw.
pub const CIRCLE_TOLERANCE: f64 = 1e-3;

// ============================================================================
// POINT IN POLYGON (Ray Casting Algorithm)
// ============================================================================

/// Test if a point is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

// ============================================================================
// CIRCLE FLATTENING
// ============================================================================

/// Flatten a circle into a counter-clockwise vertex loop.
///
/// Uses lyon_geom's arc flattening so the vertex count adapts to the
/// radius; the closing vertex is dropped (loops are implicitly closed).
pub fn flatten_circle(circle: &Circle) -> Vec<Point> {
    let arc = Arc {
        center: point(circle.center.x, circle.center.y),
        radii: vector(circle.radius, circle.radius),
        start_angle: Angle::radians(0.0),
        sweep_angle: Angle::radians(2.0 * PI),
        x_rotation: Angle::radians(0.0),
    };

    let start = Point::new(circle.center.x + circle.radius, circle.center.y);
    let mut points = vec![start];
    arc.for_each_flattened(circle.radius * CIRCLE_TOLERANCE, &mut |segment| {
        points.push(Point::new(segment.to.x, segment.to.y));
    });

    // Remove the closing vertex and any duplicates from flattening
    points.dedup_by(|a, b| a.distance(*b) < LENGTH_EPSILON);
    if points.len() > 1 && points[0].distance(points[points.len() - 1]) < circle.radius * CIRCLE_TOLERANCE {
        points.pop();
    }
    points
}

// ============================================================================
// CONVEX CLIPPING (Sutherland–Hodgman)
// ============================================================================

/// Which side of the directed edge `a`→`b` the point lies on.
///
/// Positive = left (inside for a counter-clockwise clip polygon).
#[inline]
fn edge_side(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Intersection of segment `p`–`q` with the infinite line through `a`–`b`.
#[inline]
fn edge_crossing(a: Point, b: Point, p: Point, q: Point) -> Point {
    let sp = edge_side(a, b, p);
    let sq = edge_side(a, b, q);
    let t = sp / (sp - sq);
    Point::new(p.x + t * (q.x - p.x), p.y + t * (q.y - p.y))
}

/// Clip a polygon against a convex clip polygon.
///
/// Returns the part of `subject` inside `clip`; the result is empty when
/// they do not overlap. The clip polygon may wind either way.
///
/// # Errors
/// `DegenerateGeometry` if the clip polygon has fewer than three vertices
/// or no area - a malformed clip region would otherwise silently clip
/// everything away.
pub fn clip_convex_polygon(subject: &Polygon, clip: &Polygon) -> Result<Polygon, LayoutError> {
    if clip.is_degenerate() {
        return Err(LayoutError::degenerate(format!(
            "clip polygon with {} vertices has no area",
            clip.outer.len()
        )));
    }

    // Work with a counter-clockwise clip loop
    let mut clip_loop = clip.outer.clone();
    if clip.signed_area() < 0.0 {
        clip_loop.reverse();
    }

    let mut output = subject.outer.clone();
    let n = clip_loop.len();

    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let a = clip_loop[i];
        let b = clip_loop[(i + 1) % n];

        let input = std::mem::take(&mut output);
        let m = input.len();
        for k in 0..m {
            let current = input[k];
            let previous = input[(k + m - 1) % m];
            let current_in = edge_side(a, b, current) >= 0.0;
            let previous_in = edge_side(a, b, previous) >= 0.0;

            if current_in {
                if !previous_in {
                    output.push(edge_crossing(a, b, previous, current));
                }
                output.push(current);
            } else if previous_in {
                output.push(edge_crossing(a, b, previous, current));
            }
        }
    }

    output.dedup_by(|a, b| a.distance(*b) < LENGTH_EPSILON);
    if output.len() > 1 && output[0].distance(output[output.len() - 1]) < LENGTH_EPSILON {
        output.pop();
    }
    if output.len() < 3 {
        output.clear();
    }

    Ok(Polygon::new(output))
}

/// Clip a polygon to a disc (the disc is flattened first).
pub fn clip_to_disc(subject: &Polygon, disc: &Circle) -> Result<Polygon, LayoutError> {
    clip_convex_polygon(subject, &disc.to_polygon())
}

/// Area shared by two convex polygons.
pub fn convex_intersection_area(a: &Polygon, b: &Polygon) -> Result<f64, LayoutError> {
    Ok(clip_convex_polygon(a, b)?.area())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ])
    }

    #[test]
    fn point_inside_square() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(point_in_polygon(5.0, 5.0, &sq.outer));
        assert!(!point_in_polygon(15.0, 5.0, &sq.outer));
        assert!(!point_in_polygon(-1.0, 5.0, &sq.outer));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_segment_distance(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((point_segment_distance(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
        assert!((point_segment_distance(Point::new(1.0, 1.0), a, a) - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn flattened_circle_is_ccw_loop_on_the_circle() {
        let circle = Circle::new(Point::new(1.0, 2.0), 0.5).unwrap();
        let outline = flatten_circle(&circle);

        assert!(outline.len() > 20, "circle should flatten to many vertices, got {}", outline.len());
        for p in &outline {
            assert!((p.distance(circle.center) - 0.5).abs() < 1e-9);
        }

        let poly = Polygon::new(outline);
        assert!(poly.signed_area() > 0.0);
        // Inscribed polygon area is slightly below πr²
        let rel = (circle.area() - poly.area()) / circle.area();
        assert!(rel > 0.0 && rel < 0.01, "relative area error {}", rel);
    }

    #[test]
    fn clip_square_by_square() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let clipped = clip_convex_polygon(&a, &b).unwrap();
        assert!((clipped.area() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn clip_accepts_clockwise_clip_polygon() {
        let a = square(0.0, 0.0, 10.0);
        let mut b = square(5.0, 5.0, 10.0);
        b.outer.reverse();
        let clipped = clip_convex_polygon(&a, &b).unwrap();
        assert!((clipped.area() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn clip_disjoint_is_empty() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        let clipped = clip_convex_polygon(&a, &b).unwrap();
        assert!(clipped.outer.is_empty());
        assert_eq!(clipped.area(), 0.0);
    }

    #[test]
    fn clip_inside_keeps_subject() {
        let a = square(2.0, 2.0, 1.0);
        let b = square(0.0, 0.0, 10.0);
        let clipped = clip_convex_polygon(&a, &b).unwrap();
        assert_eq!(clipped.outer.len(), 4);
        assert!((clipped.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_clip_polygon_is_an_error() {
        let a = square(0.0, 0.0, 1.0);
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(matches!(
            clip_convex_polygon(&a, &line),
            Err(LayoutError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn hexagon_clipped_by_disc_loses_area() {
        let hex = Polygon::pointy_hexagon(Point::new(1.0, 0.0), 0.5).unwrap();
        let disc = Circle::new(Point::ORIGIN, 1.0).unwrap();
        let clipped = clip_to_disc(&hex, &disc).unwrap();
        assert!(clipped.area() > 0.0);
        assert!(clipped.area() < hex.area());
        assert!(disc.contains_polygon(&clipped));
    }
}
