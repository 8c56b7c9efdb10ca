//! # burner-face
//!
//! Hole layout engine for pilot burner faces: a hexagonal lattice of air
//! holes with fuel holes on a sparse sub-lattice and a central jet, built
//! either as a drilled plate or as a honeycomb, and reduced to the area
//! statistics the flow calculations need.
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared explicitly below; `pub use` lifts the types
//! most callers need to the crate root.
//!
//! ```
//! use burner_face::{generate_layout, GeometryConfig, Policy};
//!
//! let report = generate_layout(Policy::Plate, GeometryConfig::default()).unwrap();
//! assert!(report.fuel_hole_number > 0);
//! ```

pub mod classify;
pub mod clip;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod holes;
pub mod lattice;
pub mod policy;
pub mod report;

// Re-export common types at crate root for convenience.
pub use config::GeometryConfig;
pub use error::{ExportError, LayoutError};
pub use export::{export, export_to_dir, export_to_target, timestamped_filename, Drawing, ExportFormat, ExportTarget, Layer};
pub use geometry::{Circle, Point, Polygon, Shape};
pub use holes::{AirHole, CentralJet, FuelHole, Hole, HoleLayout};
pub use lattice::{CubicCoord, Lattice};
pub use policy::{generate_layout, get_hole_coordinates, run_layout, LayoutPolicy, Policy};
pub use report::LayoutReport;
