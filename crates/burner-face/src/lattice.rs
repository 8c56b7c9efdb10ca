//! Hexagonal lattice generation.
//!
//! Cells are indexed by cubic coordinates `(q, r, s)` with `q + r + s = 0`
//! and projected onto the plane with the pointy-top basis:
//!
//! ```text
//! x = size · (√3·q + √3/2·r)
//! y = size · (3/2·r)          size = center_distance / √3
//! ```
//!
//! so neighbouring cells sit exactly `center_distance` apart.

use serde::Serialize;

use crate::error::LayoutError;
use crate::geometry::Point;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Cubic hex coordinate. Invariant: `q + r + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CubicCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl CubicCoord {
    pub const ORIGIN: CubicCoord = CubicCoord { q: 0, r: 0, s: 0 };

    /// Build from axial `(q, r)`; `s` follows from the invariant.
    #[inline]
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    #[inline]
    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// Hex distance from the origin (ring index).
    #[inline]
    pub fn ring(&self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s.abs())
    }

    /// Round fractional cubic coordinates to the nearest cell.
    ///
    /// The component with the largest rounding error is recomputed from the
    /// other two so the result keeps `q + r + s = 0`.
    pub fn round(fq: f64, fr: f64, fs: f64) -> Self {
        let mut q = fq.round();
        let mut r = fr.round();
        let s = fs.round();

        let dq = (q - fq).abs();
        let dr = (r - fr).abs();
        let ds = (s - fs).abs();

        if dq > dr && dq > ds {
            q = -r - s;
        } else if dr > ds {
            r = -q - s;
        }
        CubicCoord::new(q as i32, r as i32)
    }
}

/// Project a cubic coordinate onto the plane.
///
/// `size` is the hexagon circumradius, `center_distance / √3`.
#[inline]
pub fn cubic_to_cartesian(coord: CubicCoord, size: f64) -> Point {
    Point::new(
        size * (SQRT_3 * coord.q as f64 + SQRT_3 / 2.0 * coord.r as f64),
        size * (1.5 * coord.r as f64),
    )
}

/// Same projection written as `size·√3·(q + r/2)`.
///
/// Algebraically identical to [`cubic_to_cartesian`]; kept because both
/// forms appear in layout code and must agree cell for cell.
#[inline]
pub fn cubic_to_cartesian_factored(coord: CubicCoord, size: f64) -> Point {
    Point::new(
        size * SQRT_3 * (coord.q as f64 + coord.r as f64 / 2.0),
        size * (1.5 * coord.r as f64),
    )
}

/// Inverse projection: the cell whose center is nearest to `point`.
pub fn cartesian_to_cubic(point: Point, size: f64) -> CubicCoord {
    let fq = (SQRT_3 / 3.0 * point.x - point.y / 3.0) / size;
    let fr = (2.0 / 3.0 * point.y) / size;
    CubicCoord::round(fq, fr, -fq - fr)
}

/// One lattice site: its cubic index and its position on the face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatticeCell {
    pub cubic: CubicCoord,
    pub position: Point,
}

/// All lattice cells inside a hexagonal ring around the origin.
///
/// Generation is deterministic: the same inputs always produce the same
/// cells in the same order (q ascending, then r ascending).
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    center_distance: f64,
    grid_radius: i32,
    cells: Vec<LatticeCell>,
}

impl Lattice {
    /// Enumerate the lattice covering a region of diameter `boundary`.
    ///
    /// `grid_radius = ceil((boundary / 2) / center_distance)`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `center_distance` is not a positive
    /// length or `boundary` is negative / not finite.
    pub fn generate(center_distance: f64, boundary: f64) -> Result<Self, LayoutError> {
        if !center_distance.is_finite() || center_distance <= 0.0 {
            return Err(LayoutError::InvalidConfiguration {
                field: "center_distance",
                value: center_distance,
            });
        }
        if !boundary.is_finite() || boundary < 0.0 {
            return Err(LayoutError::InvalidConfiguration { field: "boundary", value: boundary });
        }

        let grid_radius = ((boundary / 2.0) / center_distance).ceil() as i32;
        let size = center_distance / SQRT_3;

        let mut cells = Vec::with_capacity(hex_cell_count(grid_radius));
        for q in -grid_radius..=grid_radius {
            let r_min = (-grid_radius).max(-q - grid_radius);
            let r_max = grid_radius.min(-q + grid_radius);
            for r in r_min..=r_max {
                let cubic = CubicCoord::new(q, r);
                cells.push(LatticeCell { cubic, position: cubic_to_cartesian(cubic, size) });
            }
        }

        tracing::debug!(center_distance, boundary, grid_radius, cells = cells.len(), "lattice generated");

        Ok(Self { center_distance, grid_radius, cells })
    }

    pub fn center_distance(&self) -> f64 {
        self.center_distance
    }

    pub fn grid_radius(&self) -> i32 {
        self.grid_radius
    }

    /// Hexagon circumradius of one cell, `center_distance / √3`.
    pub fn cell_size(&self) -> f64 {
        self.center_distance / SQRT_3
    }

    pub fn cells(&self) -> &[LatticeCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cubic coordinates, in generation order.
    pub fn cubic_coordinates(&self) -> impl Iterator<Item = CubicCoord> + '_ {
        self.cells.iter().map(|c| c.cubic)
    }

    /// Cartesian coordinates, order-aligned with [`Lattice::cubic_coordinates`].
    pub fn cartesian_coordinates(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(|c| c.position)
    }

    /// The lattice cell nearest to `point`.
    pub fn nearest_cell(&self, point: Point) -> CubicCoord {
        cartesian_to_cubic(point, self.cell_size())
    }
}

/// Vertical distance between adjacent lattice rows for a given pitch.
#[inline]
pub fn row_height(center_distance: f64) -> f64 {
    center_distance * SQRT_3 / 2.0
}

/// Closed-form cell count of a hexagon of radius `n`: `3n² + 3n + 1`.
pub fn hex_cell_count(grid_radius: i32) -> usize {
    let n = grid_radius.max(0) as usize;
    3 * n * n + 3 * n + 1
}

// ============================================================================
// TESTS
// ============================================================================
