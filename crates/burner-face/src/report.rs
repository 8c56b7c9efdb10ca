//! Layout statistics.

use serde::Serialize;

/// Aggregate hole statistics of one layout run.
///
/// Consumed downstream by flow-area calculations. Areas are in m².
///
/// `air_to_fuel_area_ratio` is `+inf` when there is no fuel area; JSON has
/// no infinity, so serde_json writes it as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutReport {
    pub air_hole_number: usize,
    pub air_hole_area: f64,
    pub fuel_hole_number: usize,
    pub fuel_hole_area: f64,
    pub air_to_fuel_area_ratio: f64,
}

impl LayoutReport {
    /// Build a report; the ratio is derived, never passed in.
    pub fn new(
        air_hole_number: usize,
        air_hole_area: f64,
        fuel_hole_number: usize,
        fuel_hole_area: f64,
    ) -> Self {
        Self {
            air_hole_number,
            air_hole_area,
            fuel_hole_number,
            fuel_hole_area,
            air_to_fuel_area_ratio: area_ratio(air_hole_area, fuel_hole_area),
        }
    }
}

/// `air / fuel`, or `+inf` when there is no fuel area.
#[inline]
pub fn area_ratio(air_area: f64, fuel_area: f64) -> f64 {
    if fuel_area > 0.0 {
        air_area / fuel_area
    } else {
        f64::INFINITY
    }
}

impl std::fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "air holes:   {:>5}  area {:.4} mm²", self.air_hole_number, self.air_hole_area * 1e6)?;
        writeln!(f, "fuel holes:  {:>5}  area {:.4} mm²", self.fuel_hole_number, self.fuel_hole_area * 1e6)?;
        write!(f, "air/fuel area ratio: {:.4}", self.air_to_fuel_area_ratio)
    }
}
