//! Hole value types produced by a layout run.
//!
//! Holes are built once and never mutated. Outer-diameter (OD) circles are
//! companions used only to subtract tube walls from the air area; they
//! never take part in collision tests.

use serde::Serialize;

use crate::geometry::{Circle, Point, Shape};
use crate::lattice::CubicCoord;

/// A fuel tube opening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelHole {
    pub cell: CubicCoord,
    pub inner: Circle,
    /// Tube OD, present when the policy accounts for wall area
    pub outer: Option<Circle>,
}

/// An air passage: a circle on a plate, a (possibly clipped) hexagon in a
/// honeycomb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirHole {
    pub cell: CubicCoord,
    pub shape: Shape,
}

/// The central jet at the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralJet {
    pub inner: Circle,
    pub outer: Option<Circle>,
}

impl CentralJet {
    /// The circle that air holes must keep clear of.
    pub fn collision_circle(&self) -> &Circle {
        &self.inner
    }
}

/// Any hole on the face.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// Each variant carries its own data, and `match` forces every consumer
/// (statistics, export) to say what it does with each kind of hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Hole {
    Fuel(FuelHole),
    Air(AirHole),
    CentralJet(CentralJet),
}

impl Hole {
    /// Area of the opening (OD companions excluded).
    pub fn area(&self) -> f64 {
        match self {
            Hole::Fuel(f) => f.inner.area(),
            Hole::Air(a) => a.shape.area(),
            Hole::CentralJet(j) => j.inner.area(),
        }
    }

    /// Ordered boundary vertices of the opening.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Hole::Fuel(f) => f.inner.outline(),
            Hole::Air(a) => a.shape.outline(),
            Hole::CentralJet(j) => j.inner.outline(),
        }
    }
}

impl From<FuelHole> for Hole {
    fn from(hole: FuelHole) -> Self {
        Hole::Fuel(hole)
    }
}

impl From<AirHole> for Hole {
    fn from(hole: AirHole) -> Self {
        Hole::Air(hole)
    }
}

impl From<CentralJet> for Hole {
    fn from(jet: CentralJet) -> Self {
        Hole::CentralJet(jet)
    }
}

/// The raw result of a layout run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoleLayout {
    pub air: Vec<AirHole>,
    pub fuel: Vec<FuelHole>,
    pub jet: CentralJet,
    /// The disc all holes lie within (or were clipped to)
    pub boundary: Circle,
    /// Every honeycomb cell kept inside the boundary, including the cells
    /// occupied by fuel tubes and the jet. Empty for plate layouts.
    pub cells: Vec<Shape>,
}

impl HoleLayout {
    /// All holes as tagged values: air, then fuel, then the jet.
    pub fn holes(&self) -> Vec<Hole> {
        self.air
            .iter()
            .cloned()
            .map(Hole::from)
            .chain(self.fuel.iter().cloned().map(Hole::from))
            .chain(std::iter::once(Hole::from(self.jet.clone())))
            .collect()
    }
}
