//! Plate policy: circular holes drilled in a solid face.

use crate::classify::fuel_positions;
use crate::config::GeometryConfig;
use crate::error::LayoutError;
use crate::geometry::{Circle, Point, Shape};
use crate::holes::{AirHole, CentralJet, FuelHole, HoleLayout};
use crate::lattice::Lattice;
use crate::report::LayoutReport;

use super::LayoutPolicy;

/// Lattice extent as a multiple of the burner inner diameter.
const LATTICE_MARGIN: f64 = 1.2;

/// Usable face diameter as a multiple of the burner inner diameter.
const FACE_MARGIN: f64 = 0.95;

/// Circular air holes that hit the jet are shrunk by this factor.
const JET_CLEARANCE_SHRINK: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Solid plate with drilled air and fuel holes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatePolicy;

impl PlatePolicy {
    /// The face disc every hole must stay inside.
    fn face(config: &GeometryConfig) -> Result<Circle, LayoutError> {
        Circle::new(Point::ORIGIN, config.pilot_burner_id * FACE_MARGIN / 2.0)
    }

    fn build_fuel_holes(
        lattice: &Lattice,
        face: &Circle,
        config: &GeometryConfig,
    ) -> Result<Vec<FuelHole>, LayoutError> {
        let mut holes = Vec::new();
        for cell in fuel_positions(lattice) {
            let inner = Circle::from_diameter(cell.position, config.pilot_fuel_id)?;
            if face.contains_circle(&inner) {
                holes.push(FuelHole { cell: cell.cubic, inner, outer: None });
            }
        }
        Ok(holes)
    }

    /// Air holes are placed after fuel holes and the jet: acceptance depends
    /// on both.
    fn build_air_holes(
        lattice: &Lattice,
        face: &Circle,
        fuel: &[FuelHole],
        jet: &CentralJet,
        config: &GeometryConfig,
    ) -> Result<Vec<AirHole>, LayoutError> {
        let radius = config.pilot_air_id / 2.0;
        let mut holes = Vec::new();

        for cell in lattice.cells() {
            let circle = Circle::new(cell.position, radius)?;

            if fuel.iter().any(|f| circle.overlaps(&f.inner)) {
                continue;
            }
            // Inside the face, internal tangency included
            if !face.contains_circle(&circle) {
                continue;
            }
            // The jet position itself
            if cell.position.norm() <= radius {
                continue;
            }

            let circle = if circle.intersects(jet.collision_circle()) {
                Circle::new(cell.position, radius * JET_CLEARANCE_SHRINK)?
            } else {
                circle
            };
            holes.push(AirHole { cell: cell.cubic, shape: Shape::Circle(circle) });
        }
        Ok(holes)
    }
}

impl LayoutPolicy for PlatePolicy {
    fn build_holes(&self, config: GeometryConfig) -> Result<HoleLayout, LayoutError> {
        let lattice = Lattice::generate(config.center_distance(), config.pilot_burner_id * LATTICE_MARGIN)?;
        let face = Self::face(&config)?;

        let fuel = Self::build_fuel_holes(&lattice, &face, &config)?;
        let jet = CentralJet {
            inner: Circle::from_diameter(Point::ORIGIN, config.jet_id)?,
            outer: None,
        };
        let air = Self::build_air_holes(&lattice, &face, &fuel, &jet, &config)?;

        tracing::debug!(
            cells = lattice.len(),
            fuel = fuel.len(),
            air = air.len(),
            "plate holes built"
        );

        Ok(HoleLayout { air, fuel, jet, boundary: face, cells: Vec::new() })
    }

    fn compute_statistics(&self, layout: &HoleLayout) -> Result<LayoutReport, LayoutError> {
        let air_area: f64 = layout.air.iter().map(|h| h.shape.area()).sum();
        let fuel_area: f64 = layout.fuel.iter().map(|h| h.inner.area()).sum();
        Ok(LayoutReport::new(layout.air.len(), air_area, layout.fuel.len(), fuel_area))
    }
}
