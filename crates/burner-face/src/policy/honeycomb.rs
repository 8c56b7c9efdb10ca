//! Honeycomb policy: hexagonal air cells separated by thin walls, with
//! fuel tubes and the jet sitting in cell centers.

use crate::classify::fuel_positions;
use crate::clip::{clip_convex_polygon, clip_to_disc};
use crate::config::GeometryConfig;
use crate::error::LayoutError;
use crate::geometry::{Circle, Point, Polygon, Shape};
use crate::holes::{AirHole, CentralJet, FuelHole, HoleLayout};
use crate::lattice::{Lattice, LatticeCell};
use crate::report::LayoutReport;

use super::LayoutPolicy;

/// Lattice extent (and outer boundary disc) as a multiple of the burner ID.
const LATTICE_MARGIN: f64 = 1.1;

/// Honeycomb face bounded by the burner inner wall.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoneycombPolicy;

/// The two discs a honeycomb run works against.
struct Boundaries {
    /// Burner inner wall: cells are clipped to it, fuel tubes must fit in it
    burner: Circle,
    /// Lattice extent: every kept cell must lie inside it
    outer: Circle,
}

impl HoneycombPolicy {
    fn boundaries(config: &GeometryConfig) -> Result<Boundaries, LayoutError> {
        Ok(Boundaries {
            burner: Circle::from_diameter(Point::ORIGIN, config.pilot_burner_id)?,
            outer: Circle::from_diameter(Point::ORIGIN, config.pilot_burner_id * LATTICE_MARGIN)?,
        })
    }

    fn build_fuel_holes(
        lattice: &Lattice,
        bounds: &Boundaries,
        config: &GeometryConfig,
    ) -> Result<Vec<FuelHole>, LayoutError> {
        let mut holes = Vec::new();
        for cell in fuel_positions(lattice) {
            let inner = Circle::from_diameter(cell.position, config.pilot_fuel_id)?;
            if bounds.burner.contains_circle(&inner) {
                let outer = Circle::from_diameter(cell.position, config.pilot_fuel_od)?;
                holes.push(FuelHole { cell: cell.cubic, inner, outer: Some(outer) });
            }
        }
        Ok(holes)
    }

    /// One hexagonal cell per lattice site.
    ///
    /// Cells straddling the burner wall are cut back to it. Cells clear of
    /// the wall are kept whole when they fit in the outer disc, so a small
    /// cell in the ring between the two discs still counts.
    fn build_cells(
        lattice: &Lattice,
        bounds: &Boundaries,
        config: &GeometryConfig,
    ) -> Result<Vec<(LatticeCell, Polygon)>, LayoutError> {
        let circumradius = config.pilot_air_id / 3.0_f64.sqrt();
        let burner_polygon = bounds.burner.to_polygon();

        let mut cells = Vec::new();
        for cell in lattice.cells() {
            let hexagon = Polygon::pointy_hexagon(cell.position, circumradius)?;
            let straddles_wall =
                hexagon.intersects_circle(&bounds.burner) && !bounds.burner.contains_polygon(&hexagon);
            let hexagon = if straddles_wall {
                clip_convex_polygon(&hexagon, &burner_polygon)?
            } else {
                hexagon
            };

            if hexagon.is_degenerate() || !bounds.outer.contains_polygon(&hexagon) {
                continue;
            }
            cells.push((*cell, hexagon));
        }
        Ok(cells)
    }
}

impl LayoutPolicy for HoneycombPolicy {
    fn build_holes(&self, config: GeometryConfig) -> Result<HoleLayout, LayoutError> {
        let bounds = Self::boundaries(&config)?;
        let lattice = Lattice::generate(config.center_distance(), config.pilot_burner_id * LATTICE_MARGIN)?;

        let jet = CentralJet {
            inner: Circle::from_diameter(Point::ORIGIN, config.jet_id)?,
            outer: Some(Circle::from_diameter(Point::ORIGIN, config.jet_od)?),
        };
        let fuel = Self::build_fuel_holes(&lattice, &bounds, &config)?;
        let cells = Self::build_cells(&lattice, &bounds, &config)?;

        // The origin cell is the jet's slot; cells holding a fuel tube are
        // not air passages.
        let air: Vec<AirHole> = cells
            .iter()
            .filter(|(cell, _)| !cell.cubic.is_origin())
            .filter(|(_, hexagon)| !fuel.iter().any(|f| hexagon.intersects_circle(&f.inner)))
            .map(|(cell, hexagon)| AirHole { cell: cell.cubic, shape: Shape::Polygon(hexagon.clone()) })
            .collect();

        tracing::debug!(
            lattice = lattice.len(),
            cells = cells.len(),
            fuel = fuel.len(),
            air = air.len(),
            "honeycomb holes built"
        );

        Ok(HoleLayout {
            air,
            fuel,
            jet,
            boundary: bounds.outer,
            cells: cells.into_iter().map(|(_, hexagon)| Shape::Polygon(hexagon)).collect(),
        })
    }

    /// Honeycomb statistics run over every cell: the walls are shared, so
    /// fuel tubes and the jet tube are subtracted by their outer diameter.
    fn compute_statistics(&self, layout: &HoleLayout) -> Result<LayoutReport, LayoutError> {
        let mut cell_area = 0.0;
        for shape in &layout.cells {
            cell_area += match shape {
                Shape::Polygon(p) if layout.boundary.contains_polygon(p) => p.area(),
                Shape::Polygon(p) => clip_to_disc(p, &layout.boundary)?.area(),
                Shape::Circle(c) => c.area(),
            };
        }

        let fuel_od_area: f64 = layout
            .fuel
            .iter()
            .map(|f| f.outer.as_ref().unwrap_or(&f.inner).area())
            .sum();
        let jet_od_area = layout.jet.outer.as_ref().unwrap_or(&layout.jet.inner).area();

        let air_area = cell_area - fuel_od_area - jet_od_area;
        if air_area < 0.0 {
            return Err(LayoutError::degenerate(format!(
                "tube walls ({:.3e} m²) exceed honeycomb cell area ({:.3e} m²)",
                fuel_od_area + jet_od_area,
                cell_area
            )));
        }

        let air_number = layout
            .cells
            .len()
            .checked_sub(layout.fuel.len() + 1)
            .ok_or_else(|| {
                LayoutError::degenerate(format!(
                    "{} honeycomb cells cannot hold {} fuel tubes and the jet",
                    layout.cells.len(),
                    layout.fuel.len()
                ))
            })?;

        let fuel_area: f64 = layout.fuel.iter().map(|f| f.inner.area()).sum();
        Ok(LayoutReport::new(air_number, air_area, layout.fuel.len(), fuel_area))
    }
}
