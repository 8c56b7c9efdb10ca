//! Fuel-position classification.
//!
//! Fuel holes repeat with period 4 in rows and period 2 along a row:
//! rows `r ≡ 0 (mod 4)` and `r ≡ 2 (mod 4)` carry a fuel hole on every
//! second cell, odd rows carry none. The origin is reserved for the jet.

use crate::geometry::Point;
use crate::lattice::{row_height, CubicCoord, Lattice, LatticeCell};

/// Canonical fuel rule on cubic coordinates.
///
/// A cell is a fuel site iff it is not the origin and
/// `r mod 4 ∈ {0, 2}` and `q mod 2 == 0` (Euclidean modulo, so negative
/// coordinates follow the same pattern).
#[inline]
pub fn is_fuel_position(coord: CubicCoord) -> bool {
    if coord.is_origin() {
        return false;
    }
    let row = coord.r.rem_euclid(4);
    let column = coord.q.rem_euclid(2);
    (row == 0 && column == 0) || (row == 2 && column == 0)
}

/// The same rule evaluated from a position on the face.
///
/// Rows are `i = round(y / row_height)` and columns
/// `j = round(x / center_distance - (0.5 if i is odd))`. On lattice points
/// `i = r` and `j = q + ⌊r/2⌋`, which is why rows `i ≡ 2 (mod 4)` test for
/// odd `j`: it is the same parity as even `q` there.
pub fn is_fuel_position_cartesian(point: Point, center_distance: f64) -> bool {
    let i = (point.y / row_height(center_distance)).round() as i64;
    let shift = if i.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
    let j = (point.x / center_distance - shift).round() as i64;

    if i == 0 && j == 0 {
        return false;
    }
    let row = i.rem_euclid(4);
    let column = j.rem_euclid(2);
    (row == 0 && column == 0) || (row == 2 && column == 1)
}

/// Lattice cells that host fuel holes, in lattice order.
pub fn fuel_positions(lattice: &Lattice) -> Vec<LatticeCell> {
    let positions: Vec<LatticeCell> = lattice
        .cells()
        .iter()
        .filter(|cell| is_fuel_position(cell.cubic))
        .copied()
        .collect();
    tracing::debug!(fuel_sites = positions.len(), cells = lattice.len(), "fuel positions classified");
    positions
}
