//! Core geometry types for burner-face.
//!
//! All lengths are in meters. The burner face is the XY plane with the
//! central jet at the origin.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` = can duplicate the value
//! - `Copy` = can copy implicitly (small stack values only)
//! - `PartialEq` = can compare with `==`

use std::f64::consts::PI;

use serde::Serialize;

use crate::clip;
use crate::error::LayoutError;

/// Tolerance for length comparisons (meters).
///
/// Layout dimensions are millimetres, so this sits many orders of magnitude
/// below any real feature while still absorbing float noise on tangency.
pub const LENGTH_EPSILON: f64 = 1e-12;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance to the origin (the central jet position).
    #[inline]
    pub fn norm(&self) -> f64 {
        self.distance(Point::ORIGIN)
    }
}

/// A circle given by center and radius.
///
/// Kept analytic: predicates and areas are exact, and the vertex loop is
/// only produced on demand by [`Circle::outline`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Create a circle, rejecting non-finite or non-positive radii.
    pub fn new(center: Point, radius: f64) -> Result<Self, LayoutError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LayoutError::degenerate(format!(
                "circle at ({:.6}, {:.6}) has radius {}",
                center.x, center.y, radius
            )));
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(LayoutError::degenerate("circle center is not finite"));
        }
        Ok(Self { center, radius })
    }

    /// Create a circle from a diameter.
    pub fn from_diameter(center: Point, diameter: f64) -> Result<Self, LayoutError> {
        Self::new(center, diameter / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// True if `other` lies fully inside this circle (internal tangency included).
    #[inline]
    pub fn contains_circle(&self, other: &Circle) -> bool {
        self.center.distance(other.center) + other.radius <= self.radius + LENGTH_EPSILON
    }

    /// True if the two discs share a region of positive area.
    ///
    /// Tangent circles touch in a single point and do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance(other.center) < self.radius + other.radius - LENGTH_EPSILON
    }

    /// True if the two discs touch or overlap.
    #[inline]
    pub fn intersects(&self, other: &Circle) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius + LENGTH_EPSILON
    }

    /// True if every vertex of `polygon` lies inside this circle.
    ///
    /// The disc is convex, so this is exact for the polygon's region.
    pub fn contains_polygon(&self, polygon: &Polygon) -> bool {
        !polygon.outer.is_empty()
            && polygon
                .outer
                .iter()
                .all(|p| self.center.distance(*p) <= self.radius + LENGTH_EPSILON)
    }

    /// Counter-clockwise vertex loop approximating the circle.
    pub fn outline(&self) -> Vec<Point> {
        clip::flatten_circle(self)
    }

    /// The circle discretized as a polygon (for clipping).
    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(self.outline())
    }
}

/// A simple polygon given by its outer boundary.
///
/// ## Rust Lesson #4: Ownership & Vec
///
/// This struct OWNS its points - when it's dropped, they're freed.
/// `&[Point]` would be a BORROWED slice (read-only view).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    /// Boundary vertices (counter-clockwise, not closed)
    pub outer: Vec<Point>,
}

impl Polygon {
    pub fn new(outer: Vec<Point>) -> Self {
        Self { outer }
    }

    /// Pointy-top hexagon: vertices at 30° + k·60°, counter-clockwise.
    ///
    /// With this orientation the flat sides face ±x, matching the lattice
    /// whose nearest neighbours lie along the x axis.
    pub fn pointy_hexagon(center: Point, circumradius: f64) -> Result<Self, LayoutError> {
        if !circumradius.is_finite() || circumradius <= 0.0 {
            return Err(LayoutError::degenerate(format!(
                "hexagon at ({:.6}, {:.6}) has circumradius {}",
                center.x, center.y, circumradius
            )));
        }
        let outer = (0..6)
            .map(|i| {
                let angle = PI / 6.0 + PI / 3.0 * i as f64;
                Point::new(
                    center.x + circumradius * angle.cos(),
                    center.y + circumradius * angle.sin(),
                )
            })
            .collect();
        Ok(Self { outer })
    }

    /// Get the bounding box as (min_x, min_y, max_x, max_y).
    ///
    /// ## Rust Lesson #6: Option<T>
    ///
    /// Rust has no `null`. An empty polygon has no bounding box, so we
    /// return `None` and the compiler makes callers handle it.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        if self.outer.is_empty() {
            return None;
        }

        let min_x = self.outer.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.outer.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.outer.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.outer.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some((min_x, min_y, max_x, max_y))
    }

    /// Calculate signed area using the shoelace formula.
    ///
    /// Positive for counter-clockwise winding.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.outer)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Fewer than three vertices or no enclosed area.
    pub fn is_degenerate(&self) -> bool {
        self.outer.len() < 3 || self.area() <= LENGTH_EPSILON * LENGTH_EPSILON
    }

    /// True if the polygon and the disc share any point.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        if self.outer.len() < 3 {
            return false;
        }
        if clip::point_in_polygon(circle.center.x, circle.center.y, &self.outer) {
            return true;
        }
        let n = self.outer.len();
        (0..n).any(|i| {
            let a = self.outer[i];
            let b = self.outer[(i + 1) % n];
            clip::point_segment_distance(circle.center, a, b) <= circle.radius + LENGTH_EPSILON
        })
    }
}

/// Calculate signed area of a point sequence using the shoelace formula.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// A 2-D region produced by a layout: a true circle or a polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(c) => c.area(),
            Shape::Polygon(p) => p.area(),
        }
    }

    /// Ordered vertex loop of the shape boundary.
    ///
    /// Circles are discretized; polygons return their own vertices.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Shape::Circle(c) => c.outline(),
            Shape::Polygon(p) => p.outer.clone(),
        }
    }

    /// True if the shape and the disc share any point.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        match self {
            Shape::Circle(c) => c.intersects(circle),
            Shape::Polygon(p) => p.intersects_circle(circle),
        }
    }

    /// True if the shape and the disc share a region of positive area.
    ///
    /// Polygons are clipped against the flattened disc; a clip failure is
    /// returned rather than read as "no overlap".
    pub fn overlaps_circle(&self, circle: &Circle) -> Result<bool, LayoutError> {
        match self {
            Shape::Circle(c) => Ok(c.overlaps(circle)),
            Shape::Polygon(p) => {
                let shared = clip::convex_intersection_area(p, &circle.to_polygon())?;
                Ok(shared > LENGTH_EPSILON * LENGTH_EPSILON)
            }
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

// ============================================================================
// TESTS
// ============================================================================
